//! Immunity - Integrity self-healing monitor
//!
//! ## Structure
//! - `types.rs` - Log entries, status, ImmunityError
//! - `guard.rs` - ImmunityGuard (detect + restore) and ImmunityHandle (watcher thread)

pub mod types;
pub mod guard;


pub use types::{GuardState, ImmunityAction, ImmunityError, ImmunityStatus, IsolationLogEntry};
pub use guard::{ImmunityGuard, ImmunityHandle, ImmunityLog, PLACEHOLDER_IDENTITY};
