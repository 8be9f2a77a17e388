//! IntroVox application layer
//!
//! Use cases over the core ports. Each use case is built from the ports it
//! needs, holds no state between calls and runs inside its own tracing span.

pub mod deps;
pub mod usecases;

pub use deps::{AppDeps, InstanceInfo};
