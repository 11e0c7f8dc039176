//! Scene scheduling
//!
//! A scene owns the world, the event bus and an ordered roster of systems,
//! and is stepped by the host once per frame.
//!
//! ## Architecture
//!
//! ```text
//! Host loop
//!      ↓  on_update(elapsed) / on_draw(elapsed)
//! Scene (providers → systems in order → update hook)
//!      ↓
//! World (entities, tile maps)
//! ```
//!
//! Entities added before [`Scene::initialize`] are queued in the world and
//! replayed to every system, in insertion order, once the roster is known.

mod game_scene;

pub use game_scene::{Scene, UpdateHook};
