//! Shared types and utilities for idforged.
//!
//! This crate holds the [`Metadata`] record every provider produces and the
//! path helpers the scanner uses to recognise catalog videos.

pub mod metadata;
pub mod paths;

pub use metadata::{Extra, Metadata};
