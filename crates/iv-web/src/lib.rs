//! HTTP adapter of the IntroVox tour service
//!
//! `bootstrap` turns an [`iv_core::AppConfig`] into a running server;
//! `http` maps routes onto the use cases.

pub mod bootstrap;
pub mod http;

pub use bootstrap::{load_config, run_server, AppRuntime};
