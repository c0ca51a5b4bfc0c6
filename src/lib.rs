//! AI Scanner Core
//!
//! Background file scanner with layered classification (signature, prefilter,
//! remote AI), quarantine, protected-file self-healing and URL phishing checks.

pub mod api;
pub mod constants;
pub mod logic;
