pub mod action;
pub mod app;
pub mod config;
pub mod event;
pub mod format;
pub mod kill_prompt;
pub mod sort;
pub mod system;
#[cfg(feature = "perf-tracing")]
pub mod trace;
pub mod ui;
