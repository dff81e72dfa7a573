pub mod config;
pub mod display;
pub mod engine;
pub mod fixtures;
pub mod snapshot;
