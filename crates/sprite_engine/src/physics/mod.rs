//! Physics module for 2D collision geometry
//!
//! Holds the pure geometry used by the movement and overlap systems. The
//! resolution algorithm itself lives with the movement system.

pub mod aabb;

pub use aabb::{Aabb, Axis, is_aabb_collision};
