//! Identifier and timestamp generation for new and mutated entities.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use uuid::Uuid;

/// Fresh random 128-bit identifier.
pub fn new_id() -> Uuid {
    Uuid::new_v4()
}

/// Current UTC time at microsecond precision, the finest resolution every
/// supported store keeps.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Timestamp for a mutation of an entity last stamped at `previous`.
///
/// Always strictly later than `previous`, even when the clock has not
/// advanced past it.
pub fn refreshed(previous: DateTime<Utc>) -> DateTime<Utc> {
    now().max(previous + Duration::microseconds(1))
}
