//! API Module
//!
//! Boundary contracts consumed by the external HTTP layer.
//!
//! Structure:
//! - state.rs: CoreServices (engine wiring + background contexts)
//! - commands.rs: Snapshot / quarantine / immunity / URL / status commands
//! - engine_status.rs: Status DTOs

pub mod commands;
pub mod engine_status;
pub mod state;

pub use commands::*;
pub use engine_status::EngineStatus;
pub use state::CoreServices;
