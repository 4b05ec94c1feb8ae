//! Utility functions shared across layers

pub mod validation;
