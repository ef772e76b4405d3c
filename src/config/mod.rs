//! Cluster configuration, immutable after construction.

/// Optional credentials for authenticated connections.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Target database plus the ordered list of replica-set member endpoints.
///
/// Endpoint order matters: it is the preference order for primary discovery.
#[derive(Debug, Clone)]
pub struct ClusterConfig {
    database: String,
    endpoints: Vec<String>,
    credentials: Option<Credentials>,
}

impl ClusterConfig {
    pub fn new(
        database: impl Into<String>,
        endpoints: Vec<String>,
        credentials: Option<Credentials>,
    ) -> Self {
        Self {
            database: database.into(),
            endpoints,
            credentials,
        }
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Username for log lines; "anonymous" when connecting unauthenticated.
    pub fn username(&self) -> &str {
        self.credentials
            .as_ref()
            .map_or("anonymous", |c| c.username.as_str())
    }
}
