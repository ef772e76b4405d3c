//! Database driver seam.
//!
//! The MongoDB client is an opaque capability provider behind the
//! [`NodeConnector`] / [`NodeSession`] traits so the sweeps can be exercised
//! against an in-memory cluster in tests.

pub mod mongo;
pub mod traits;

pub use mongo::MongoConnector;
pub use traits::{NodeConnector, NodeSession};
