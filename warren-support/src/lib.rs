//! # Warren Support
//!
//! Shared utilities for the Warren registry crates.
//!
//! This crate provides:
//! - Type-name shortening for log and error output
//! - "Did you mean?" suggestions over bound capability labels

pub mod rendering;
