use thiserror::Error;

use crate::pulse;
use crate::schema::{ColorRgba, Shape, Style, Vec2};
use crate::surface::DrawSurface;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LayoutError {
    #[error("row_start ({row_start}) must be less than row_count ({row_count})")]
    InvalidRowStart { row_start: u32, row_count: u32 },
    #[error("row_count must be at least 1")]
    ZeroRows,
    #[error("canvas must have positive dimensions, got {width}x{height}")]
    EmptyCanvas { width: f32, height: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub row_count: u32,
    /// Row the first cell lands in, for aligning a partially filled leading
    /// column (e.g. a series starting mid-week). Must stay below `row_count`.
    pub row_start: u32,
    pub pulse_padding: f32,
}

/// One placed cell: where it sits in the grid and on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPlacement {
    pub index: usize,
    pub row: u32,
    pub column: u32,
    pub top_left: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridPlan {
    pub column_count: u32,
    /// Side length of every (square) cell. May come out non-positive when the
    /// canvas is smaller than the padding budget; callers must not draw then.
    pub pulse_side: f32,
    pub cells: Vec<CellPlacement>,
}

/// Computes the grid geometry for `count` cells: row-major placement that
/// wraps into a new column every `row_count` rows, starting at `row_start`.
///
/// Cell positions depend only on index and the layout parameters, never on
/// the values being charted.
pub fn plan_cells(
    count: usize,
    params: LayoutParams,
    width: f32,
    height: f32,
) -> Result<GridPlan, LayoutError> {
    if params.row_count == 0 {
        return Err(LayoutError::ZeroRows);
    }
    if params.row_start >= params.row_count {
        return Err(LayoutError::InvalidRowStart {
            row_start: params.row_start,
            row_count: params.row_count,
        });
    }
    if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
        return Err(LayoutError::EmptyCanvas { width, height });
    }

    if count == 0 {
        return Ok(GridPlan {
            column_count: 0,
            pulse_side: 0.0,
            cells: Vec::new(),
        });
    }

    let column_count = count.div_ceil(params.row_count as usize) as u32;
    let padding = params.pulse_padding;
    let column_width = width / column_count as f32 - padding;
    let row_width = height / params.row_count as f32 - padding;
    let side = column_width.min(row_width);

    let mut cells = Vec::with_capacity(count);
    let mut row = params.row_start;
    let mut column = 0u32;
    let mut offset = Vec2::new(
        padding / 2.0,
        params.row_start as f32 * (side + padding) + padding / 2.0,
    );

    for index in 0..count {
        cells.push(CellPlacement {
            index,
            row,
            column,
            top_left: offset,
        });

        row += 1;
        offset.y += side + padding;
        if row % params.row_count == 0 {
            column += 1;
            row = 0;
            offset.x += side + padding;
            offset.y = padding / 2.0;
        }
    }

    Ok(GridPlan {
        column_count,
        pulse_side: side,
        cells,
    })
}

/// What a render pass did: how many pulses were drawn, and how many were
/// skipped because the geometry degenerated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderReport {
    pub drawn: usize,
    pub skipped: usize,
    pub column_count: u32,
    pub pulse_side: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct PulseChart<'a> {
    pub values: &'a [f32],
    pub shape: Shape,
    pub style: Style,
    pub color: ColorRgba,
    pub layout: LayoutParams,
}

/// Renders one chart: plans the grid, resolves each value against the style,
/// and issues one draw command per value, in input order.
///
/// Values are taken as-is, not clamped; manifest validation enforces the
/// `[0, 1]` range before a series reaches the engine.
///
/// A canvas too small for the padding budget yields a non-positive cell side;
/// those pulses are skipped (counted in the report) rather than drawn with
/// negative dimensions.
pub fn render_chart<S: DrawSurface>(
    surface: &mut S,
    chart: &PulseChart<'_>,
    width: f32,
    height: f32,
) -> Result<RenderReport, LayoutError> {
    let plan = plan_cells(chart.values.len(), chart.layout, width, height)?;

    if !chart.values.is_empty() && plan.pulse_side <= 0.0 {
        return Ok(RenderReport {
            drawn: 0,
            skipped: chart.values.len(),
            column_count: plan.column_count,
            pulse_side: plan.pulse_side,
        });
    }

    for (cell, value) in plan.cells.iter().zip(chart.values) {
        let resolved = chart.style.resolve(*value);
        pulse::draw_pulse(
            surface,
            chart.shape,
            cell.top_left,
            plan.pulse_side,
            resolved,
            chart.color,
        );
    }

    Ok(RenderReport {
        drawn: chart.values.len(),
        skipped: 0,
        column_count: plan.column_count,
        pulse_side: plan.pulse_side,
    })
}
