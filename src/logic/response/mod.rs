//! Response Module - Actions taken on detected threats
//!
//! # Components
//! - `file_quarantine.rs`: Move files into the quarantine vault
//! - `blocklist.rs`: Blocked artifacts / identities
//! - `types.rs`: ActionError, QuarantineRecord

pub mod blocklist;
pub mod file_quarantine;
pub mod types;

pub use blocklist::BlockList;
pub use file_quarantine::{vault_entry_name, QuarantineManager};
pub use types::{ActionError, QuarantineRecord};
