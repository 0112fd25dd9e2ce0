//! Retained scene items the widget layer hands to a renderer.
//!
//! Controls own their geometry and text as plain values; a frontend walks
//! them through [`OverlayPass`] once per frame. Nothing here touches the GPU.

use glam::Vec2;

/// Visual property applied to a whole poly item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Property {
    pub color: [f32; 3],
    pub opacity: f32,
    pub line_width: f32,
}

impl Property {
    pub const fn new(color: [f32; 3], opacity: f32, line_width: f32) -> Self {
        Self {
            color,
            opacity,
            line_width,
        }
    }

    /// Un-highlighted dial chrome.
    pub const fn dial_normal() -> Self {
        Self::new([1.0, 1.0, 1.0], 0.5, 1.0)
    }

    /// Highlighted dial chrome.
    pub const fn dial_selected() -> Self {
        Self::new([1.0, 1.0, 1.0], 0.8, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    Serif,
    SansSerif,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Bottom,
    Center,
    Top,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub family: FontFamily,
    pub halign: HAlign,
    pub valign: VAlign,
}

impl TextStyle {
    pub const fn new(font_size: f32, family: FontFamily, halign: HAlign, valign: VAlign) -> Self {
        Self {
            font_size,
            family,
            halign,
            valign,
        }
    }
}

/// A positioned, optionally rotated text run in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    /// Anchor position in pixels, bottom-left origin.
    pub position: Vec2,
    /// Counter-clockwise rotation about the anchor, degrees.
    pub orientation_deg: f32,
    pub style: TextStyle,
    pub color: [f32; 4],
}

impl TextItem {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            position: Vec2::ZERO,
            orientation_deg: 0.0,
            style,
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// Transformed 2D geometry plus topology, ready to draw.
///
/// `lines` holds polyline index runs and `tris` filled triangles into
/// `points`. When `vertex_colors` is present it overrides the flat property
/// color per vertex (the backdrop uses this for its alpha gradient).
#[derive(Debug, Clone, PartialEq)]
pub struct PolyItem {
    pub points: Vec<Vec2>,
    pub lines: Vec<Vec<u16>>,
    pub tris: Vec<[u16; 3]>,
    pub vertex_colors: Option<Vec<[f32; 4]>>,
    pub property: Property,
}

impl PolyItem {
    pub fn new(property: Property) -> Self {
        Self {
            points: Vec::new(),
            lines: Vec::new(),
            tris: Vec::new(),
            vertex_colors: None,
            property,
        }
    }
}

/// One render pass over the HUD layer. Implemented by the frontend;
/// submission order is the compositing order.
pub trait OverlayPass {
    fn draw_poly(&mut self, item: &PolyItem);
    fn draw_text(&mut self, item: &TextItem);
}

/// Capability interface shared by the on-screen controls.
pub trait WidgetRepresentation {
    /// Runs the deferred layout pass. Returns true when a rebuild actually
    /// happened, false when the call was a no-op or was deferred.
    fn build(&mut self) -> bool;

    /// Submits items for the opaque pass, returning the submission count.
    fn render_opaque_geometry(&mut self, pass: &mut dyn OverlayPass) -> usize;

    /// Submits items for the overlay pass, returning the submission count.
    fn render_overlay(&mut self, pass: &mut dyn OverlayPass) -> usize;

    /// Detaches the control from its render surface. Idempotent.
    fn release_graphics_resources(&mut self);
}
