//! HUD panels and widget text drawn through egui.

use egui::{Align2, Color32};
use navdial::items::{FontFamily, HAlign, VAlign};
use navdial::{CompassRep, TextItem, Viewport};

pub fn draw_hud(ctx: &egui::Context, rep: &CompassRep) {
    egui::Window::new("Navigation")
        .anchor(Align2::LEFT_TOP, [12.0, 12.0])
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            ui.label(format!("Heading  {:6.1} deg", rep.heading()));
            ui.label(format!("Tilt     {:6.1} deg", rep.tilt()));
            ui.label(format!("Distance {:6.2}", rep.distance()));
            ui.separator();
            ui.small("drag the ring to rotate, hold the caps to step tilt/distance");
        });
}

/// Paints the widget layer's text items. Positions arrive in physical
/// pixels with a bottom-left origin; egui wants y-down logical points.
pub fn paint_widget_texts(ctx: &egui::Context, texts: &[TextItem], viewport: Viewport) {
    if texts.is_empty() {
        return;
    }
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("dial-text"),
    ));
    let ppp = ctx.pixels_per_point();

    for item in texts {
        let family = match item.style.family {
            FontFamily::Serif => egui::FontFamily::Proportional,
            // Monospace keeps the multi-line readout columns steady.
            FontFamily::SansSerif => egui::FontFamily::Monospace,
        };
        let font = egui::FontId::new((item.style.font_size / ppp).max(1.0), family);
        let color = color32(item.color);

        let mut job =
            egui::text::LayoutJob::simple(item.text.clone(), font, color, f32::INFINITY);
        job.halign = match item.style.halign {
            HAlign::Left => egui::Align::Min,
            HAlign::Center => egui::Align::Center,
            HAlign::Right => egui::Align::Max,
        };
        let galley = ctx.fonts(|fonts| fonts.layout_job(job));

        let anchor = egui::pos2(
            item.position.x / ppp,
            (viewport.height as f32 - item.position.y) / ppp,
        );
        let dy = match item.style.valign {
            VAlign::Top => 0.0,
            VAlign::Center => -galley.size().y / 2.0,
            VAlign::Bottom => -galley.size().y,
        };

        // Widget orientation is counter-clockwise in y-up space; egui
        // rotates the other way in screen space.
        let angle = -item.orientation_deg.to_radians();
        let offset = egui::emath::Rot2::from_angle(angle) * egui::vec2(0.0, dy);

        let mut shape = egui::epaint::TextShape::new(anchor + offset, galley, color);
        shape.angle = angle;
        painter.add(shape);
    }
}

fn color32(rgba: [f32; 4]) -> Color32 {
    Color32::from_rgba_unmultiplied(
        (rgba[0] * 255.0) as u8,
        (rgba[1] * 255.0) as u8,
        (rgba[2] * 255.0) as u8,
        (rgba[3] * 255.0) as u8,
    )
}
