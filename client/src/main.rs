//! Page entry-point: loads locations, draws the heat overlay and serves
//! console input until stdin closes.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use client::domain::ports::{LocationListView, LocationSource, MapWidget};
use client::domain::{HeatmapOverlay, LocationSearchPage, OverlayConfig};
use client::heat_data::HeatData;
use client::inbound::console::ConsolePage;
use client::outbound::list_view::WriterListView;
use client::outbound::locations::HttpLocationSource;
use client::outbound::map::InMemoryMap;
use client::outbound::renderer::{TextCanvas, TextHeatRendererFactory};
use client::settings::PageSettings;
use ortho_config::OrthoConfig;
use tokio::io::BufReader;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// Radius, in pixels at zoom 0, given to every heat point.
const PAGE_RADIUS: f64 = 2.0;

/// Field carrying each record's weight.
const PAGE_VALUE_FIELD: &str = "count";

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = load_settings(std::env::args_os())?;
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main(settings))
}

fn load_settings<I>(args: I) -> io::Result<PageSettings>
where
    I: IntoIterator<Item = OsString>,
{
    PageSettings::load_from_iter(args)
        .map_err(|error| io::Error::other(format!("load page settings: {error}")))
}

async fn async_main(settings: PageSettings) -> io::Result<()> {
    let (source, heat) = page_data(&settings)?;

    let map = Arc::new(InMemoryMap::new(settings.map_view()));
    let config = OverlayConfig::builder()
        .radius(PAGE_RADIUS)
        .scale_radius(true)
        .use_local_extrema(true)
        .value_field(PAGE_VALUE_FIELD)
        .build();
    let canvas = TextCanvas::new();
    let factory = TextHeatRendererFactory::new(canvas.clone(), TextHeatRendererFactory::DEFAULT_CELL);
    let mut overlay = HeatmapOverlay::new(config, Arc::new(factory));
    let widget: Arc<dyn MapWidget> = map.clone();
    overlay
        .attach(widget)
        .map_err(|error| io::Error::other(format!("attach heat overlay: {error}")))?;
    overlay
        .set_data(&heat.data, heat.max, heat.min)
        .map_err(|error| io::Error::other(format!("draw heat data: {error}")))?;
    info!(points = overlay.points().len(), "heat overlay drawn");

    let view: Arc<dyn LocationListView> = Arc::new(WriterListView::new(io::stdout()));
    let mut search = LocationSearchPage::new(source, view);
    search
        .load()
        .await
        .map_err(|error| io::Error::other(format!("load locations: {error}")))?;

    let mut page = ConsolePage::new(search, overlay, map);
    let summary = page
        .run(BufReader::new(tokio::io::stdin()))
        .await
        .map_err(|error| io::Error::other(format!("console session failed: {error}")))?;
    info!(
        searches = summary.searches,
        map_commands = summary.map_commands,
        rejected = summary.rejected,
        "console session ended"
    );
    Ok(())
}

#[cfg(feature = "example-data")]
fn page_data(settings: &PageSettings) -> io::Result<(Arc<dyn LocationSource>, HeatData)> {
    if !settings.use_example_data {
        return remote_page_data(settings);
    }
    let set = client::outbound::example_data::load_example_data(
        &settings.registry_path(),
        settings.seed_name(),
    )
    .map_err(|error| io::Error::other(format!("prepare example data: {error}")))?;
    Ok((Arc::new(set.location_source()), set.heat_data()))
}

#[cfg(not(feature = "example-data"))]
fn page_data(settings: &PageSettings) -> io::Result<(Arc<dyn LocationSource>, HeatData)> {
    if settings.use_example_data {
        warn!("example data requested but the example-data feature is disabled");
    }
    remote_page_data(settings)
}

fn remote_page_data(settings: &PageSettings) -> io::Result<(Arc<dyn LocationSource>, HeatData)> {
    let base = settings
        .api_base_url()
        .map_err(|error| io::Error::other(format!("invalid API base URL: {error}")))?;
    let source = HttpLocationSource::new(&base, settings.request_timeout())
        .map_err(|error| io::Error::other(format!("create location client: {error}")))?;
    let heat = HeatData::load(&settings.heat_data_path()).map_err(io::Error::other)?;
    Ok((Arc::new(source), heat))
}
