//! Command-line front-end: load an optional TOML config, apply flag
//! overrides, compose the fractal and write `<identifier>.<ext>`.
//!
//! Usage:
//!   fractal-render --polygon 6 --offset 0.5 --iterations 5 --minimize
//!   fractal-render --config fractal.toml --output-dir out --format bmp
//!   fractal-render --print-config > fractal.toml

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use fractal_geometry::{Composer, FractalConfig, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "fractal-render")]
#[command(about = "Grow Koch/Cesaro curves on a seed polygon and save them as an image")]
struct Cli {
    /// TOML config file; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed polygon: 3, 6 or 7.
    #[arg(long)]
    polygon: Option<u32>,
    /// Curve shape parameter; negative values flip the apex.
    #[arg(long, allow_negative_numbers = true)]
    offset: Option<f64>,
    #[arg(long)]
    iterations: Option<u32>,
    /// Seed radius in pixels; 0 selects the default.
    #[arg(long)]
    radius: Option<i32>,
    /// Size the canvas to the curve extent without padding.
    #[arg(long)]
    minimize: bool,
    #[arg(long)]
    output_dir: Option<PathBuf>,
    #[arg(long)]
    format: Option<OutputFormat>,
    /// Tracing filter, e.g. `info` or `fractal_geometry=debug`.
    #[arg(long, default_value = "info")]
    log_level: String,
    /// Print the effective config as TOML and exit.
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    fn resolve(&self) -> Result<FractalConfig> {
        let mut config = match &self.config {
            Some(path) => FractalConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => FractalConfig::default(),
        };
        if let Some(polygon) = self.polygon {
            config.polygon = polygon;
        }
        if let Some(offset) = self.offset {
            config.offset = offset;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(radius) = self.radius {
            config.radius = radius;
        }
        if self.minimize {
            config.minimize = true;
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).compact().init();

    let config = cli.resolve()?;
    if cli.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let colors = config.color_table()?;
    let composition = Composer::new(config.compose_params())
        .with_colors(colors)
        .with_background(config.background)
        .compose()
        .context("failed to compose fractal")?;

    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!("failed to create output dir {}", config.output_dir.display())
    })?;
    let path = composition
        .save(&config.output_dir, config.format)
        .with_context(|| format!("failed to save into {}", config.output_dir.display()))?;

    println!("{}", path.display());
    Ok(())
}
