use crate::schema::{ColorRgba, ResolvedPulse, Shape, Vec2};
use crate::surface::DrawSurface;

/// Draws one pulse into its cell. Square and squircle pulses shrink (or grow,
/// under overshoot) around the cell center; circles scale their radius.
pub fn draw_pulse<S: DrawSurface>(
    surface: &mut S,
    shape: Shape,
    top_left: Vec2,
    side: f32,
    resolved: ResolvedPulse,
    color: ColorRgba,
) {
    match shape {
        Shape::Square => draw_square(surface, top_left, side, resolved, color),
        Shape::Squircle => draw_squircle(surface, top_left, side, resolved, color),
        Shape::Circle => draw_circle(surface, top_left, side, resolved, color),
    }
}

fn rectified(top_left: Vec2, side: f32, size_scale: f32) -> (Vec2, f32) {
    let effective = side * size_scale;
    let delta = (side - effective) / 2.0;
    (Vec2::new(top_left.x + delta, top_left.y + delta), effective)
}

fn draw_square<S: DrawSurface>(
    surface: &mut S,
    top_left: Vec2,
    side: f32,
    resolved: ResolvedPulse,
    color: ColorRgba,
) {
    let (origin, effective) = rectified(top_left, side, resolved.size_scale);
    surface.fill_rect(origin, Vec2::new(effective, effective), color, resolved.alpha);
}

fn draw_squircle<S: DrawSurface>(
    surface: &mut S,
    top_left: Vec2,
    side: f32,
    resolved: ResolvedPulse,
    color: ColorRgba,
) {
    let (origin, effective) = rectified(top_left, side, resolved.size_scale);
    let corner = effective / 8.0;
    surface.fill_round_rect(
        origin,
        Vec2::new(effective, effective),
        Vec2::new(corner, corner),
        color,
        resolved.alpha,
    );
}

fn draw_circle<S: DrawSurface>(
    surface: &mut S,
    top_left: Vec2,
    side: f32,
    resolved: ResolvedPulse,
    color: ColorRgba,
) {
    let radius = (side / 2.0) * resolved.size_scale;
    let center = Vec2::new(top_left.x + side / 2.0, top_left.y + side / 2.0);
    surface.fill_circle(center, radius, color, resolved.alpha);
}
