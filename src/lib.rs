//! Headless contribution-calendar renderer.
//!
//! A chart is an ordered series of normalized values in `[0, 1]`, laid out as
//! a grid of "pulses" that wraps into a new column every `row_count` rows.
//! Each pulse's opacity and size encode its value according to a [`schema::Style`].
//! The layout engine emits draw commands against a [`surface::DrawSurface`];
//! [`raster::PixmapSurface`] rasterizes them with tiny-skia, and
//! [`surface::CommandRecorder`] captures them for inspection.

pub mod chart;
pub mod layout;
pub mod manifest;
pub mod pulse;
pub mod raster;
pub mod sample;
pub mod schema;
pub mod surface;
