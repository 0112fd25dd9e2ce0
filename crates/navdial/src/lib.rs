// src/lib.rs
//! Screen-space navigation dial widgets for 3D viewers.
//!
//! The compass dial owns heading, tilt and distance, classifies pointer
//! positions into interaction states and lays itself out against a viewport;
//! two embedded centered sliders carry the tilt and distance values. A
//! separate up-aligned follower orients in-scene labels against a tracked
//! physical up vector. All of it is CPU-side: drawing is delegated to a
//! frontend through the [`items::OverlayPass`] seam.

pub mod compass;
pub mod coord;
pub mod follower;
pub mod geometry;
pub mod items;
pub mod slider;

pub use compass::{CompassRep, InteractionState};
pub use coord::{NormalizedPoint, Viewport};
pub use follower::{Follower, UpSource};
pub use items::{OverlayPass, PolyItem, Property, TextItem, WidgetRepresentation};
pub use slider::{CenteredSlider, SliderPart};
