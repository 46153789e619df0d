//! Render a heat data file onto a text map and print the result.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{ArgAction, Parser};
use client::domain::ports::MapWidget;
use client::domain::{DEFAULT_RADIUS, HeatmapOverlay, LatLng, OverlayConfig, Size};
use client::heat_data::HeatData;
use client::outbound::map::{InMemoryMap, MapView};
use client::outbound::renderer::{TextCanvas, TextHeatRendererFactory};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// `render-heat` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "render-heat",
    about = "Draw heat data as a character density map",
    version
)]
struct CliArgs {
    /// Heat data file: `{"max"?, "min"?, "data": [...]}`.
    #[arg(value_name = "path", default_value_os_t = default_data_path())]
    data: PathBuf,
    /// Map centre latitude.
    #[arg(long, default_value_t = 25.6586, allow_negative_numbers = true)]
    lat: f64,
    /// Map centre longitude.
    #[arg(long, default_value_t = -80.3568, allow_negative_numbers = true)]
    lng: f64,
    /// Zoom level.
    #[arg(long, default_value_t = 4.0)]
    zoom: f64,
    /// Viewport width in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,
    /// Viewport height in pixels.
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Point radius in pixels, before zoom scaling.
    #[arg(long, default_value_t = DEFAULT_RADIUS)]
    radius: f64,
    /// Field holding each record's weight.
    #[arg(long, value_name = "field", default_value = "count")]
    value_field: String,
    /// Scale the radius by 2^zoom.
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    scale_radius: bool,
    /// Normalise against the weights visible in the viewport.
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    local_extrema: bool,
    /// Character cell width in pixels.
    #[arg(long, default_value_t = TextHeatRendererFactory::DEFAULT_CELL.width)]
    cell_width: u32,
    /// Character cell height in pixels.
    #[arg(long, default_value_t = TextHeatRendererFactory::DEFAULT_CELL.height)]
    cell_height: u32,
}

fn default_data_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("heat")
        .join("demo.json")
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let heat = HeatData::load(&args.data).map_err(io::Error::other)?;

    let map = Arc::new(InMemoryMap::new(MapView {
        center: LatLng::new(args.lat, args.lng),
        zoom: args.zoom,
        size: Size::new(args.width, args.height),
    }));
    let config = OverlayConfig::builder()
        .radius(args.radius)
        .scale_radius(args.scale_radius)
        .use_local_extrema(args.local_extrema)
        .value_field(args.value_field)
        .build();
    let canvas = TextCanvas::new();
    let factory =
        TextHeatRendererFactory::new(canvas.clone(), Size::new(args.cell_width, args.cell_height));

    let mut overlay = HeatmapOverlay::new(config, Arc::new(factory));
    let widget: Arc<dyn MapWidget> = map;
    overlay
        .attach(widget)
        .map_err(|error| io::Error::other(format!("attach heat overlay: {error}")))?;
    overlay
        .set_data(&heat.data, heat.max, heat.min)
        .map_err(|error| io::Error::other(format!("draw heat data: {error}")))?;

    println!("{}", canvas.snapshot());
    Ok(())
}
