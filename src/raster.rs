use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect, Transform};

use crate::schema::{ColorRgba, Vec2};
use crate::surface::DrawSurface;

// Cubic approximation of a quarter arc.
const ARC_KAPPA: f32 = 0.552_284_8;

/// Software raster backend over a tiny-skia pixmap. Degenerate primitives
/// (non-positive sizes, off-canvas geometry) are dropped, matching
/// tiny-skia's own clipping.
pub struct PixmapSurface {
    pixmap: Pixmap,
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height)
            .ok_or_else(|| anyhow!("cannot allocate a {width}x{height} pixmap"))?;
        Ok(Self { pixmap })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.pixmap
            .save_png(path)
            .with_context(|| format!("failed to write {}", path.display()))
    }

    fn paint(color: ColorRgba, alpha: f32) -> Paint<'static> {
        let [r, g, b, a] = color.as_array();
        let mut paint = Paint::default();
        paint.anti_alias = true;
        if let Some(color) = tiny_skia::Color::from_rgba(
            r.clamp(0.0, 1.0),
            g.clamp(0.0, 1.0),
            b.clamp(0.0, 1.0),
            (a * alpha).clamp(0.0, 1.0),
        ) {
            paint.set_color(color);
        }
        paint
    }
}

impl DrawSurface for PixmapSurface {
    fn fill_rect(&mut self, top_left: Vec2, size: Vec2, color: ColorRgba, alpha: f32) {
        // from_xywh rejects non-positive and non-finite sizes.
        if let Some(rect) = Rect::from_xywh(top_left.x, top_left.y, size.x, size.y) {
            self.pixmap.fill_rect(
                rect,
                &Self::paint(color, alpha),
                Transform::identity(),
                None,
            );
        }
    }

    fn fill_round_rect(
        &mut self,
        top_left: Vec2,
        size: Vec2,
        corner_radius: Vec2,
        color: ColorRgba,
        alpha: f32,
    ) {
        if let Some(path) = round_rect_path(top_left, size, corner_radius) {
            self.pixmap.fill_path(
                &path,
                &Self::paint(color, alpha),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: ColorRgba, alpha: f32) {
        if !radius.is_finite() || radius <= 0.0 {
            return;
        }
        let mut builder = PathBuilder::new();
        builder.push_circle(center.x, center.y, radius);
        if let Some(path) = builder.finish() {
            self.pixmap.fill_path(
                &path,
                &Self::paint(color, alpha),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }
}

/// tiny-skia has no rounded-rect primitive; build one from lines and quarter
/// arcs. Radii are clamped to half the respective side.
fn round_rect_path(top_left: Vec2, size: Vec2, corner_radius: Vec2) -> Option<tiny_skia::Path> {
    let (w, h) = (size.x, size.y);
    if !w.is_finite() || !h.is_finite() || w <= 0.0 || h <= 0.0 {
        return None;
    }
    let (x, y) = (top_left.x, top_left.y);
    let rx = corner_radius.x.clamp(0.0, w / 2.0);
    let ry = corner_radius.y.clamp(0.0, h / 2.0);
    let (cx, cy) = (rx * ARC_KAPPA, ry * ARC_KAPPA);

    let mut pb = PathBuilder::new();
    pb.move_to(x + rx, y);
    pb.line_to(x + w - rx, y);
    pb.cubic_to(x + w - rx + cx, y, x + w, y + ry - cy, x + w, y + ry);
    pb.line_to(x + w, y + h - ry);
    pb.cubic_to(x + w, y + h - ry + cy, x + w - rx + cx, y + h, x + w - rx, y + h);
    pb.line_to(x + rx, y + h);
    pb.cubic_to(x + rx - cx, y + h, x, y + h - ry + cy, x, y + h - ry);
    pb.line_to(x, y + ry);
    pb.cubic_to(x, y + ry - cy, x + rx - cx, y, x + rx, y);
    pb.close();
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPAQUE_WHITE: ColorRgba = ColorRgba {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    fn lit_pixels(surface: &PixmapSurface) -> usize {
        surface
            .pixmap()
            .pixels()
            .iter()
            .filter(|pixel| pixel.alpha() > 0)
            .count()
    }

    #[test]
    fn rect_fill_covers_the_expected_area() {
        let mut surface = PixmapSurface::new(32, 32).expect("pixmap should allocate");
        surface.fill_rect(Vec2::new(8.0, 8.0), Vec2::new(16.0, 16.0), OPAQUE_WHITE, 1.0);
        assert_eq!(lit_pixels(&surface), 16 * 16);
    }

    #[test]
    fn zero_sized_rect_draws_nothing() {
        let mut surface = PixmapSurface::new(32, 32).expect("pixmap should allocate");
        surface.fill_rect(Vec2::new(8.0, 8.0), Vec2::new(0.0, 16.0), OPAQUE_WHITE, 1.0);
        surface.fill_rect(Vec2::new(8.0, 8.0), Vec2::new(-4.0, -4.0), OPAQUE_WHITE, 1.0);
        assert_eq!(lit_pixels(&surface), 0);
    }

    #[test]
    fn zero_radius_circle_draws_nothing() {
        let mut surface = PixmapSurface::new(32, 32).expect("pixmap should allocate");
        surface.fill_circle(Vec2::new(16.0, 16.0), 0.0, OPAQUE_WHITE, 1.0);
        surface.fill_circle(Vec2::new(16.0, 16.0), -3.0, OPAQUE_WHITE, 1.0);
        assert_eq!(lit_pixels(&surface), 0);
    }

    #[test]
    fn circle_fill_stays_inside_its_bounding_box() {
        let mut surface = PixmapSurface::new(40, 40).expect("pixmap should allocate");
        surface.fill_circle(Vec2::new(20.0, 20.0), 10.0, OPAQUE_WHITE, 1.0);

        let pixmap = surface.pixmap();
        let lit = lit_pixels(&surface);
        assert!(lit > 0, "circle should rasterize");
        for (index, pixel) in pixmap.pixels().iter().enumerate() {
            if pixel.alpha() == 0 {
                continue;
            }
            let x = (index as u32 % pixmap.width()) as f32;
            let y = (index as u32 / pixmap.width()) as f32;
            assert!(x >= 9.0 && x <= 31.0 && y >= 9.0 && y <= 31.0);
        }
    }

    #[test]
    fn round_rect_clamps_oversized_radii() {
        // Radii beyond half the side collapse to an oval-ish path, not a panic.
        let path = round_rect_path(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0), Vec2::new(50.0, 50.0));
        assert!(path.is_some());
    }

    #[test]
    fn alpha_scales_the_fill_opacity() {
        let mut opaque = PixmapSurface::new(8, 8).expect("pixmap should allocate");
        opaque.fill_rect(Vec2::new(0.0, 0.0), Vec2::new(8.0, 8.0), OPAQUE_WHITE, 1.0);
        let mut faded = PixmapSurface::new(8, 8).expect("pixmap should allocate");
        faded.fill_rect(Vec2::new(0.0, 0.0), Vec2::new(8.0, 8.0), OPAQUE_WHITE, 0.25);

        let opaque_alpha = opaque.pixmap().pixels()[0].alpha();
        let faded_alpha = faded.pixmap().pixels()[0].alpha();
        assert_eq!(opaque_alpha, 255);
        assert!(faded_alpha < opaque_alpha && faded_alpha > 0);
    }
}
