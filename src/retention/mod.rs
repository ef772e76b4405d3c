//! Retention policy and cutoff arithmetic.
//!
//! Stored documents carry a `timestamp` field in epoch milliseconds; the
//! cutoff is midnight UTC of `today − N months`, expressed in the same unit.

use chrono::{Months, NaiveDate, NaiveTime};

use crate::error::SweepError;

/// Age-based retention policy: keep the last `months` months of documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    months: u32,
}

impl RetentionPolicy {
    pub fn new(months: u32) -> Self {
        Self { months }
    }

    pub fn months(&self) -> u32 {
        self.months
    }

    /// `today − N months`, clamping the day-of-month to the shorter target
    /// month (Mar 31 − 1 month is the last day of February, leap-aware).
    pub fn cutoff_date(&self, today: NaiveDate) -> Result<NaiveDate, SweepError> {
        today
            .checked_sub_months(Months::new(self.months))
            .ok_or_else(|| {
                SweepError::Cutoff(format!("{today} minus {} months underflows", self.months))
            })
    }

    /// Cutoff as epoch milliseconds: midnight UTC of the cutoff date,
    /// whole seconds × 1000 to match stored `timestamp` fields.
    pub fn cutoff_epoch_millis(&self, today: NaiveDate) -> Result<i64, SweepError> {
        let date = self.cutoff_date(today)?;
        let seconds = date.and_time(NaiveTime::MIN).and_utc().timestamp();
        seconds
            .checked_mul(1000)
            .ok_or_else(|| SweepError::Cutoff(format!("{date} does not fit in milliseconds")))
    }
}

/// Per-collection outcome of a retention sweep. Reporting only, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSweepResult {
    pub collection: String,
    /// Document count before the delete.
    pub total: u64,
    /// Documents matching `timestamp < cutoff` before the delete.
    pub matched: u64,
    /// Documents actually deleted.
    pub removed: u64,
    /// Count after the delete, re-queried from the server rather than
    /// derived as `total − removed` so concurrent writes are reflected.
    pub remaining: u64,
}
