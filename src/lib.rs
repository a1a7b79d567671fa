//! idforged - catalog identifier extraction and metadata resolution
//!
//! This library crate exposes the resolution pipeline for the binary and
//! for integration testing.

pub mod config;
pub mod metadata;
pub mod processor;
pub mod scanner;
