//! Logic Module - Business Logic & Engines
//!
//! Chứa các engines xử lý: Pipeline, AI Bridge, Scheduler, Quarantine, Immunity.
//!
//! ## Architecture
//! - `threat/` - Verdict types + local layers (signature, prefilter)
//! - `features/` - File feature extraction (text, PE entry point)
//! - `ai_bridge/` - Remote classifiers, circuit breaker, adapter
//! - `cache` - Content hash -> verdict
//! - `pipeline/` - Cache -> Signature -> Prefilter -> AI
//! - `scan_loop/` - Background scan scheduler + snapshot publication
//! - `response/` - Quarantine, blocked lists
//! - `immunity/` - Protected-file self-healing
//! - `url_scan/` - URL phishing decision

pub mod config;

// Classification
pub mod threat;
pub mod features;
pub mod ai_bridge;
pub mod cache;
pub mod pipeline;

// Background contexts
pub mod scan_loop;
pub mod immunity;

// Actions
pub mod response;

pub mod url_scan;
