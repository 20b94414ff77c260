//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Short code derivation and identifier generation

pub mod code_generator;
