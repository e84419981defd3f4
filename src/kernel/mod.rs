pub mod config;
pub mod environment;
pub mod error;
pub mod event;
pub mod intent;
pub mod memory;
pub mod reactor;
pub mod signal;
pub mod source;
pub mod speech;
pub mod task;
pub mod telemetry;
pub mod time;
