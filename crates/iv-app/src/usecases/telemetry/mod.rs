//! Opt-out usage telemetry
//!
//! Delivery never surfaces an error to a caller: a failed send waits for
//! the next cooldown window like a successful one.

mod collect;
mod send;
mod status;

pub use collect::{CollectTelemetry, GetTelemetryStatistics};
pub use send::{SendTelemetryIfDue, TelemetryOutcome};
pub use status::{GetTelemetryStatus, SetTelemetryEnabled};
