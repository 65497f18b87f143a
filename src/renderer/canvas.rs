//! Canvas 2D renderer (WASM only)
//!
//! Plain shapes: puddles as ellipses, cats as squares, the slime as a circle
//! with a health bar above it.

use std::f64::consts::{FRAC_PI_4, TAU};

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::snapshot::{RenderSink, Snapshot};
use crate::sim::PuddleOrientation;

pub struct CanvasSink {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSink {
    /// Grab the 2D context of `canvas`. None if the browser refuses.
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    /// Match the drawing buffer to the simulation canvas
    pub fn resize(&self, width: f32, height: f32) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
    }

    fn draw_puddles(&self, snap: &Snapshot) {
        let ctx = &self.ctx;
        for puddle in &snap.puddles {
            let r = puddle.radius as f64;
            let (rx, ry) = match puddle.orientation {
                PuddleOrientation::Horizontal => (r, r * 0.6),
                PuddleOrientation::Vertical => (r * 0.6, r),
            };
            ctx.set_global_alpha(puddle.opacity as f64);
            ctx.set_fill_style_str("#7CFC00");
            ctx.begin_path();
            ctx.ellipse(puddle.pos.x as f64, puddle.pos.y as f64, rx, ry, 0.0, 0.0, TAU)
                .ok();
            ctx.fill();
        }
        ctx.set_global_alpha(1.0);
    }

    fn draw_cats(&self, snap: &Snapshot) {
        let ctx = &self.ctx;
        for cat in &snap.cats {
            let (x, y, r) = (cat.pos.x as f64, cat.pos.y as f64, cat.radius as f64);
            if cat.trapped {
                ctx.set_fill_style_str("rgba(0, 255, 0, 0.5)");
                ctx.begin_path();
                ctx.arc(x, y, r * 1.2, 0.0, TAU).ok();
                ctx.fill();
            }
            ctx.set_fill_style_str(if cat.trapped { "#8A2BE2" } else { "#FF0000" });
            ctx.fill_rect(x - r, y - r, r * 2.0, r * 2.0);
            ctx.set_stroke_style_str("#000000");
            ctx.set_line_width(2.0);
            ctx.stroke_rect(x - r, y - r, r * 2.0, r * 2.0);
        }
    }

    fn draw_player(&self, snap: &Snapshot) {
        let ctx = &self.ctx;
        let p = &snap.player;
        let (x, y, r) = (p.pos.x as f64, p.pos.y as f64, p.radius as f64);

        // Blink while invulnerable
        ctx.set_global_alpha(if p.invulnerable { 0.5 } else { 1.0 });
        ctx.set_fill_style_str("#7CFC00");
        ctx.begin_path();
        ctx.arc(x, y, r, 0.0, TAU).ok();
        ctx.fill();
        ctx.set_stroke_style_str(if p.has_claws { "#FFFFFF" } else { "#32CD32" });
        ctx.set_line_width(3.0);
        ctx.stroke();
        ctx.set_global_alpha(1.0);

        let bar_w = r * 4.0;
        let bar_h = 8.0;
        let bar_x = x - bar_w / 2.0;
        let bar_y = y - r - bar_h - 5.0;
        ctx.set_fill_style_str("#555");
        ctx.fill_rect(bar_x, bar_y, bar_w, bar_h);
        ctx.set_fill_style_str("#00FF00");
        ctx.fill_rect(bar_x, bar_y, bar_w * snap.health_fraction() as f64, bar_h);
        ctx.set_stroke_style_str("#000");
        ctx.set_line_width(1.0);
        ctx.stroke_rect(bar_x, bar_y, bar_w, bar_h);
    }

    fn draw_slashes(&self, snap: &Snapshot) {
        let ctx = &self.ctx;
        ctx.set_line_width(2.0);
        ctx.set_line_cap("round");
        for slash in &snap.slashes {
            ctx.set_global_alpha(slash.opacity as f64);
            ctx.set_stroke_style_str("#FFFFFF");
            let drift = slash.lifespan as f64 / 5.0;
            for i in 0..3u32 {
                // Scatter derived from the id so a slash keeps its shape between frames
                let hash = slash.id.wrapping_mul(2654435761).wrapping_add(i * 7919);
                let angle = (hash % 1000) as f64 / 1000.0 * TAU;
                let length = 10.0 + ((hash >> 10) % 1000) as f64 / 100.0;
                let sx = slash.pos.x as f64 + angle.cos() * drift;
                let sy = slash.pos.y as f64 + angle.sin() * drift;
                ctx.begin_path();
                ctx.move_to(sx, sy);
                ctx.line_to(
                    sx + (angle + FRAC_PI_4).cos() * length,
                    sy + (angle + FRAC_PI_4).sin() * length,
                );
                ctx.stroke();
            }
        }
        ctx.set_global_alpha(1.0);
    }
}

impl RenderSink for CanvasSink {
    fn draw(&mut self, snapshot: &Snapshot) {
        self.ctx
            .clear_rect(0.0, 0.0, snapshot.width as f64, snapshot.height as f64);
        self.draw_puddles(snapshot);
        self.draw_cats(snapshot);
        self.draw_player(snapshot);
        self.draw_slashes(snapshot);
    }
}
