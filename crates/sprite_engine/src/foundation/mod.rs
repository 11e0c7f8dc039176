//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Colour values
//! - Time management
//! - Logging utilities

pub mod colour;
pub mod time;
pub mod logging;
