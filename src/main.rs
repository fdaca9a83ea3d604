use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde_json::json;

use pulsegrid::chart::{resolve_series, ChartSeries};
use pulsegrid::layout::{plan_cells, render_chart, LayoutParams, PulseChart};
use pulsegrid::manifest::load_and_validate_manifest;
use pulsegrid::raster::PixmapSurface;
use pulsegrid::sample::sample_contributions;
use pulsegrid::schema::{AlphaRamp, Chart, ColorRgba, Shape, SizeRamp, Style};
use pulsegrid::surface::CommandRecorder;

#[derive(Debug, Parser)]
#[command(name = "pulsegrid")]
#[command(about = "Contribution-calendar pulse chart renderer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load and validate a chart manifest.
    Check {
        manifest: PathBuf,
        /// Emit a machine-readable report instead of the summary line.
        #[arg(long)]
        json: bool,
    },
    /// Render a chart manifest to a PNG.
    Render {
        manifest: PathBuf,
        #[arg(short = 'o', long = "output")]
        output: PathBuf,
    },
    /// Print the draw-command stream a manifest produces, one per line.
    Trace {
        manifest: PathBuf,
    },
    /// Render a seed-locked sample chart, no manifest required.
    Demo {
        #[arg(short = 'o', long = "output")]
        output: PathBuf,
        #[arg(long, default_value_t = 2020)]
        seed: u64,
        #[arg(long, default_value_t = 365)]
        days: u32,
        #[arg(long, default_value_t = 1060)]
        width: u32,
        #[arg(long, default_value_t = 140)]
        height: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { manifest, json } => run_check(&manifest, json),
        Commands::Render { manifest, output } => run_render(&manifest, &output),
        Commands::Trace { manifest } => run_trace(&manifest),
        Commands::Demo {
            output,
            seed,
            days,
            width,
            height,
        } => run_demo(&output, seed, days, width, height),
    }
}

fn run_check(manifest_path: &Path, json: bool) -> Result<()> {
    let manifest = match load_and_validate_manifest(manifest_path) {
        Ok(manifest) => manifest,
        Err(error) => {
            if json {
                println!(
                    "{}",
                    json!({ "status": "error", "message": format!("{error:#}") })
                );
            }
            return Err(error);
        }
    };

    let series = resolve_series(&manifest.chart)?;
    let plan = plan_cells(
        series.values.len(),
        layout_params(&manifest.chart, &series),
        manifest.canvas.width as f32,
        manifest.canvas.height as f32,
    )?;

    if json {
        println!(
            "{}",
            json!({
                "status": "ok",
                "canvas": { "width": manifest.canvas.width, "height": manifest.canvas.height },
                "pulses": series.values.len(),
                "columns": plan.column_count,
                "row_start": series.row_start,
                "pulse_side": plan.pulse_side,
            })
        );
    } else {
        println!(
            "OK: {} ({}x{}, {} pulses, {} columns, side {:.1})",
            manifest_path.display(),
            manifest.canvas.width,
            manifest.canvas.height,
            series.values.len(),
            plan.column_count,
            plan.pulse_side
        );
    }
    Ok(())
}

fn run_render(manifest_path: &Path, output_path: &Path) -> Result<()> {
    let manifest = load_and_validate_manifest(manifest_path)?;
    let series = resolve_series(&manifest.chart)?;

    let mut surface = PixmapSurface::new(manifest.canvas.width, manifest.canvas.height)?;
    let report = render_chart(
        &mut surface,
        &pulse_chart(&manifest.chart, &series),
        manifest.canvas.width as f32,
        manifest.canvas.height as f32,
    )?;
    if report.skipped > 0 {
        eprintln!(
            "warning: canvas too small for padding, skipped all {} pulses",
            report.skipped
        );
    }
    surface.save_png(output_path)?;

    println!(
        "Wrote {} ({} pulses, {} columns, side {:.1})",
        output_path.display(),
        report.drawn,
        report.column_count,
        report.pulse_side
    );
    Ok(())
}

fn run_trace(manifest_path: &Path) -> Result<()> {
    let manifest = load_and_validate_manifest(manifest_path)?;
    let series = resolve_series(&manifest.chart)?;

    let mut recorder = CommandRecorder::new();
    render_chart(
        &mut recorder,
        &pulse_chart(&manifest.chart, &series),
        manifest.canvas.width as f32,
        manifest.canvas.height as f32,
    )?;
    for command in recorder.commands() {
        println!("{command}");
    }
    Ok(())
}

fn run_demo(output_path: &Path, seed: u64, days: u32, width: u32, height: u32) -> Result<()> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).context("demo start date is valid")?;
    let chart = Chart {
        shape: Shape::Circle,
        style: Style::AlphaSize {
            alpha: AlphaRamp { min: 0.0, max: 0.6 },
            size: SizeRamp { overshoot: 1.8 },
        },
        color: ColorRgba {
            r: 0.0,
            g: 0.8,
            b: 0.2,
            a: 1.0,
        },
        row_count: 7,
        row_start: 0,
        pulse_padding: 2.0,
        values: None,
        contributions: Some(sample_contributions(seed, start, days)),
    };
    chart.validate()?;
    let series = resolve_series(&chart)?;

    let mut surface = PixmapSurface::new(width, height)?;
    let report = render_chart(
        &mut surface,
        &pulse_chart(&chart, &series),
        width as f32,
        height as f32,
    )?;
    surface.save_png(output_path)?;

    println!(
        "Wrote {} (seed {}, {} pulses, {} columns)",
        output_path.display(),
        seed,
        report.drawn,
        report.column_count
    );
    Ok(())
}

fn layout_params(chart: &Chart, series: &ChartSeries) -> LayoutParams {
    LayoutParams {
        row_count: chart.row_count,
        row_start: series.row_start,
        pulse_padding: chart.pulse_padding,
    }
}

fn pulse_chart<'a>(chart: &Chart, series: &'a ChartSeries) -> PulseChart<'a> {
    PulseChart {
        values: &series.values,
        shape: chart.shape,
        style: chart.style,
        color: chart.color,
        layout: layout_params(chart, series),
    }
}
