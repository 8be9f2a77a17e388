//! Helpers shared by several use cases; not use cases themselves.

mod counters;
mod step_store;

pub use counters::increment_counter;
pub use step_store::StepListStore;
