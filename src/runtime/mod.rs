//! Application lifecycle: startup wiring, server mode, graceful shutdown

pub mod lifetime;
pub mod modes;

pub use lifetime::startup::{AppContext, StartupContext, prepare_server_startup};
