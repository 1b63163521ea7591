//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Persistence: compendium dumps read from disk
//! - Export: translation artifacts written to disk
//! - Notifications: user-facing messages routed through tracing
//! - Config: Application configuration

pub mod config;
pub mod export;
pub mod notifications;
pub mod persistence;
