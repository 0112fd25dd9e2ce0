// src/lib.rs
//! Demo viewer for the navigation dial widgets.
//!
//! Embeds the compass HUD over a simple ground-grid scene, drives an orbit
//! camera from the dial's heading/tilt/distance, and keeps a north marker
//! upright with the up-aligned follower.

pub mod app;
pub mod camera;
pub mod renderer;
pub mod ui;
pub mod widget;
