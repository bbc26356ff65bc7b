//! Terraced terrain mesh generation.
//!
//! A regular polygon footprint is recursively subdivided, lifted by a
//! noise-driven height field, and sliced into flat 0.1-unit bands with
//! vertical walls. The result is a flat vertex/index buffer pair ready for
//! GPU upload:
//! - Polygon subdivision and height assignment
//! - Terracing (roof and wall emission)
//! - Theme-based band coloring
//! - Background generation tasks

pub mod config;
pub mod error;
pub mod generator;
pub mod height_field;
pub mod mesh_builder;
pub mod noise_source;
pub mod subdivide;
pub mod task;
pub mod terracer;
pub mod theme;

pub use config::*;
pub use error::*;
pub use generator::*;
pub use height_field::*;
pub use mesh_builder::*;
pub use noise_source::*;
pub use subdivide::*;
pub use task::*;
pub use terracer::*;
pub use theme::*;

// Re-export commonly used types
pub use glam::{Vec2, Vec3};
