// src/config/mod.rs

//! Runner configuration: TOML model and loading.

pub mod loader;
pub mod model;

pub use loader::load_config;
pub use model::{ConfigFile, RunnerConfig, RunnerSection};
