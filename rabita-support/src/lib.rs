//! # Rabita Support
//!
//! Shared utilities for the Rabita binding registry.
//!
//! This crate provides:
//! - Text rendering for error messages
//! - Common utilities shared between rabita crates

pub mod rendering;
