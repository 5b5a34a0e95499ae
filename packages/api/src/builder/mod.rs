//! Seclink builder API modules
//!
//! The fluent builder split by concern: the core structure and build step,
//! TLS policy settings, and network settings.

pub mod core;
pub mod network;
pub mod security;

pub use core::SeclinkBuilder;
