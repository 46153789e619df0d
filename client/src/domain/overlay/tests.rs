//! Behaviour of the heat overlay against a fixed-viewport stub map.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use rstest::{fixture, rstest};

use super::*;
use crate::domain::geo::LatLngBounds;
use crate::domain::ports::{HeatRendererError, MockHeatRendererFactory};

/// A map showing a fixed rectangle, projected linearly onto the viewport.
struct StubMap {
    bounds: LatLngBounds,
    zoom: f64,
    state: Mutex<StubState>,
}

#[derive(Default)]
struct StubState {
    size: Size,
    pane: Point,
    overlays: BTreeMap<SurfaceId, Vec<(String, String)>>,
    listeners: Vec<LayerId>,
    supported: Vec<&'static str>,
}

impl StubMap {
    fn new(bounds: LatLngBounds, zoom: f64) -> Self {
        Self {
            bounds,
            zoom,
            state: Mutex::new(StubState {
                size: Size::new(800, 600),
                supported: vec!["transform"],
                ..StubState::default()
            }),
        }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, StubState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn overlay_count(&self) -> usize {
        self.state().overlays.len()
    }

    fn listeners(&self) -> Vec<LayerId> {
        self.state().listeners.clone()
    }

    fn style_of(&self, surface: SurfaceId) -> Option<Vec<(String, String)>> {
        self.state().overlays.get(&surface).cloned()
    }
}

impl MapWidget for StubMap {
    fn size(&self) -> Size {
        self.state().size
    }

    fn bounds(&self) -> LatLngBounds {
        self.bounds
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn layer_point_to_lat_lng(&self, point: Point) -> LatLng {
        let size = self.size();
        let sw = self.bounds.south_west();
        let ne = self.bounds.north_east();
        LatLng::new(
            ne.lat - point.y / f64::from(size.height) * (ne.lat - sw.lat),
            sw.lng + point.x / f64::from(size.width) * (ne.lng - sw.lng),
        )
    }

    fn lat_lng_to_container_point(&self, lat_lng: LatLng) -> Point {
        let size = self.size();
        let sw = self.bounds.south_west();
        let ne = self.bounds.north_east();
        Point::new(
            (lat_lng.lng - sw.lng) / (ne.lng - sw.lng) * f64::from(size.width),
            (ne.lat - lat_lng.lat) / (ne.lat - sw.lat) * f64::from(size.height),
        )
    }

    fn map_pane_position(&self) -> Point {
        self.state().pane
    }

    fn insert_overlay(&self, surface: &DrawingSurface) {
        self.state()
            .overlays
            .insert(surface.id(), surface.style_declarations());
    }

    fn remove_overlay(&self, surface: SurfaceId) {
        self.state().overlays.remove(&surface);
    }

    fn style_overlay(&self, surface: &DrawingSurface) {
        if let Some(style) = self.state().overlays.get_mut(&surface.id()) {
            *style = surface.style_declarations();
        }
    }

    fn on_move_end(&self, layer: LayerId) {
        self.state().listeners.push(layer);
    }

    fn off_move_end(&self, layer: LayerId) {
        self.state().listeners.retain(|listener| *listener != layer);
    }

    fn supports_style_property(&self, property: &str) -> bool {
        self.state().supported.contains(&property)
    }
}

type Frames = Arc<Mutex<Vec<HeatFrame>>>;
type Dimensions = Arc<Mutex<Vec<Size>>>;

struct RecordingRenderer {
    frames: Frames,
    dimensions: Dimensions,
    resize_failures: Arc<Mutex<usize>>,
}

impl HeatRenderer for RecordingRenderer {
    fn set_data(&mut self, frame: &HeatFrame) -> Result<(), HeatRendererError> {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(frame.clone());
        Ok(())
    }

    fn set_dimensions(&mut self, size: Size) -> Result<(), HeatRendererError> {
        {
            let mut failures = self
                .resize_failures
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if *failures > 0 {
                *failures -= 1;
                return Err(HeatRendererError::resize("busy"));
            }
        }
        self.dimensions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(size);
        Ok(())
    }
}

#[derive(Default)]
struct RecordingFactory {
    frames: Frames,
    dimensions: Dimensions,
    resize_failures: Arc<Mutex<usize>>,
}

impl RecordingFactory {
    fn fail_next_resizes(&self, count: usize) {
        *self
            .resize_failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = count;
    }

    fn frames(&self) -> Vec<HeatFrame> {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn last_frame(&self) -> HeatFrame {
        self.frames().last().cloned().expect("at least one frame")
    }

    fn dimensions(&self) -> Vec<Size> {
        self.dimensions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl HeatRendererFactory for RecordingFactory {
    fn create(&self, _config: &RendererConfig) -> Result<Box<dyn HeatRenderer>, HeatRendererError> {
        Ok(Box::new(RecordingRenderer {
            frames: Arc::clone(&self.frames),
            dimensions: Arc::clone(&self.dimensions),
            resize_failures: Arc::clone(&self.resize_failures),
        }))
    }
}

/// Viewport around Riyadh: contains P1 but not P2.
#[fixture]
fn map() -> Arc<StubMap> {
    Arc::new(StubMap::new(
        LatLngBounds::from_corners(LatLng::new(20.0, 40.0), LatLng::new(30.0, 50.0)),
        4.0,
    ))
}

#[fixture]
fn factory() -> Arc<RecordingFactory> {
    Arc::new(RecordingFactory::default())
}

fn p1() -> HeatRecord {
    HeatRecord::new()
        .with("lat", 24.64)
        .with("lng", 46.77)
        .with("value", 3.0)
}

fn p2() -> HeatRecord {
    HeatRecord::new()
        .with("lat", 50.75)
        .with("lng", -1.55)
        .with("value", 1.0)
}

fn weight(value: f64) -> HeatRecord {
    HeatRecord::new()
        .with("lat", 25.0)
        .with("lng", 45.0)
        .with("value", value)
}

fn overlay(
    config: OverlayConfig,
    factory: &Arc<RecordingFactory>,
) -> HeatmapOverlay<RecordingFactory> {
    HeatmapOverlay::new(config, Arc::clone(factory))
}

#[rstest]
fn redraw_drops_points_outside_bounds(map: Arc<StubMap>, factory: Arc<RecordingFactory>) {
    let mut layer = overlay(OverlayConfig::default(), &factory);
    layer.attach(map.clone()).expect("attach");

    layer.set_data(&[p1(), p2()], None, None).expect("set data");

    let frame = factory.last_frame();
    assert_eq!(frame.data.len(), 1);
    let expected = map.lat_lng_to_container_point(LatLng::new(24.64, 46.77));
    let point = frame.data.first().expect("projected point");
    assert_eq!(point.x, round_pixel(expected.x));
    assert_eq!(point.y, round_pixel(expected.y));
    assert_eq!(point.value, 3.0);
    assert_eq!(layer.points().len(), 2, "dropped points stay stored");
}

#[rstest]
#[case::local(true, 3.0)]
#[case::tracked(false, 8.0)]
fn frame_range_follows_extrema_mode(
    map: Arc<StubMap>,
    factory: Arc<RecordingFactory>,
    #[case] local: bool,
    #[case] expected_max: f64,
) {
    let config = OverlayConfig::builder().use_local_extrema(local).build();
    let mut layer = overlay(config, &factory);
    layer.attach(map).expect("attach");

    layer.set_data(&[p1(), p2()], Some(8.0), None).expect("set data");

    let frame = factory.last_frame();
    assert_eq!(frame.max, expected_max);
    assert_eq!(frame.min, 0.0);
}

#[rstest]
#[case::default_radius(weight(1.0), false, 2.0)]
#[case::scaled_default(weight(1.0), true, 32.0)]
#[case::scaled_override(weight(1.0).with("radius", 5.0), true, 80.0)]
#[case::unscaled_override(weight(1.0).with("radius", 5.0), false, 5.0)]
fn radius_scales_with_zoom(
    map: Arc<StubMap>,
    factory: Arc<RecordingFactory>,
    #[case] record: HeatRecord,
    #[case] scale: bool,
    #[case] expected: f64,
) {
    let config = OverlayConfig::builder().scale_radius(scale).build();
    let mut layer = overlay(config, &factory);
    layer.attach(map).expect("attach");

    layer.set_data(&[record], None, None).expect("set data");

    let frame = factory.last_frame();
    assert_eq!(frame.data.first().map(|p| p.radius), Some(expected));
}

#[rstest]
fn add_point_widens_tracked_range_monotonically(
    map: Arc<StubMap>,
    factory: Arc<RecordingFactory>,
) {
    let mut layer = overlay(OverlayConfig::default(), &factory);
    layer.attach(map).expect("attach");

    layer.add_point(&weight(5.0)).expect("first");
    layer.add_point(&weight(2.0)).expect("second");

    assert_eq!(layer.tracked_range(), IntensityRange { max: 5.0, min: 0.0 });
    assert_eq!(layer.points().len(), 2);
}

#[rstest]
fn add_points_redraws_once_per_record(map: Arc<StubMap>, factory: Arc<RecordingFactory>) {
    let mut layer = overlay(OverlayConfig::default(), &factory);
    layer.attach(map).expect("attach");
    let before = factory.frames().len();

    layer
        .add_points(&[weight(1.0), weight(-2.0), weight(4.0)])
        .expect("add points");

    let frames = factory.frames();
    assert_eq!(frames.len(), before + 3);
    let sizes: Vec<usize> = frames.iter().skip(before).map(|f| f.data.len()).collect();
    assert_eq!(sizes, vec![1, 2, 3]);
    assert_eq!(layer.tracked_range(), IntensityRange { max: 4.0, min: -2.0 });
}

#[rstest]
fn empty_dataset_pushes_empty_frame_with_tracked_range(
    map: Arc<StubMap>,
    factory: Arc<RecordingFactory>,
) {
    let mut layer = overlay(OverlayConfig::default(), &factory);

    layer.attach(map).expect("attach");

    assert_eq!(
        factory.frames(),
        vec![HeatFrame::empty(IntensityRange::INITIAL)]
    );
}

#[rstest]
fn local_extrema_with_nothing_visible_is_flat(
    map: Arc<StubMap>,
    factory: Arc<RecordingFactory>,
) {
    let config = OverlayConfig::builder().use_local_extrema(true).build();
    let mut layer = overlay(config, &factory);
    layer.attach(map).expect("attach");

    layer.set_data(&[p2()], Some(8.0), Some(1.0)).expect("set data");

    let frame = factory.last_frame();
    assert!(frame.data.is_empty());
    assert_eq!(frame.range(), IntensityRange::LOCAL_FLOOR);
}

#[rstest]
fn set_data_keeps_tracked_range_unless_supplied(
    map: Arc<StubMap>,
    factory: Arc<RecordingFactory>,
) {
    let mut layer = overlay(OverlayConfig::default(), &factory);
    layer.attach(map).expect("attach");

    layer.set_data(&[p1()], Some(8.0), Some(-1.0)).expect("first");
    layer.set_data(&[p1()], None, None).expect("second");

    assert_eq!(layer.tracked_range(), IntensityRange { max: 8.0, min: -1.0 });
}

#[rstest]
fn points_with_missing_fields_are_never_drawn(
    map: Arc<StubMap>,
    factory: Arc<RecordingFactory>,
) {
    let mut layer = overlay(OverlayConfig::default(), &factory);
    layer.attach(map).expect("attach");

    let missing_lng = HeatRecord::new().with("lat", 25.0).with("value", 1.0);
    layer.set_data(&[missing_lng, p1()], None, None).expect("set data");

    assert_eq!(factory.last_frame().data.len(), 1);
}

#[rstest]
fn custom_field_names_are_used_for_decoding(
    map: Arc<StubMap>,
    factory: Arc<RecordingFactory>,
) {
    let config = OverlayConfig::builder()
        .lat_field("latitude")
        .lng_field("longitude")
        .value_field("count")
        .build();
    let mut layer = overlay(config, &factory);
    layer.attach(map).expect("attach");

    let record = HeatRecord::new()
        .with("latitude", 24.6408)
        .with("longitude", 46.7728)
        .with("count", 3.0);
    layer.set_data(&[record], None, None).expect("set data");

    assert_eq!(factory.last_frame().data.first().map(|p| p.value), Some(3.0));
}

#[rstest]
fn attach_twice_is_rejected(map: Arc<StubMap>, factory: Arc<RecordingFactory>) {
    let mut layer = overlay(OverlayConfig::default(), &factory);
    layer.attach(map.clone()).expect("attach");

    let err = layer.attach(map).expect_err("second attach");

    assert_eq!(err, OverlayError::AlreadyAttached { layer: layer.id() });
}

#[rstest]
fn attach_inserts_sized_surface_and_subscribes(
    map: Arc<StubMap>,
    factory: Arc<RecordingFactory>,
) {
    let mut layer = overlay(OverlayConfig::default(), &factory);

    layer.attach(map.clone()).expect("attach");

    assert!(layer.is_attached());
    assert_eq!(layer.viewport_size(), Some(Size::new(800, 600)));
    assert_eq!(layer.origin(), Some(LatLng::new(30.0, 40.0)));
    assert_eq!(map.listeners(), vec![layer.id()]);
    let style = map.style_of(layer.surface().id()).expect("surface inserted");
    assert!(style.contains(&("width".to_owned(), "800px".to_owned())));
    assert!(style.contains(&("height".to_owned(), "600px".to_owned())));
}

#[rstest]
fn detach_removes_surface_and_stops_redraws(
    map: Arc<StubMap>,
    factory: Arc<RecordingFactory>,
) {
    let mut layer = overlay(OverlayConfig::default(), &factory);
    layer.attach(map.clone()).expect("attach");
    let frames = factory.frames().len();

    layer.detach();

    assert!(!layer.is_attached());
    assert_eq!(map.overlay_count(), 0);
    assert!(map.listeners().is_empty());
    assert!(!layer.handle_move_end().expect("move end"));
    layer.set_data(&[p1()], None, None).expect("set data");
    assert_eq!(factory.frames().len(), frames);

    layer.detach();
    assert!(!layer.is_attached());
}

#[rstest]
fn data_set_while_detached_is_drawn_on_attach(
    map: Arc<StubMap>,
    factory: Arc<RecordingFactory>,
) {
    let mut layer = overlay(OverlayConfig::default(), &factory);
    layer.set_data(&[p1(), p2()], None, None).expect("set data");
    assert!(factory.frames().is_empty());
    assert!(!layer.has_renderer());

    layer.attach(map).expect("attach");

    assert_eq!(factory.last_frame().data.len(), 1);
}

#[rstest]
fn renderer_is_created_once_across_reattachment(map: Arc<StubMap>) {
    let mut factory = MockHeatRendererFactory::new();
    factory.expect_create().times(1).returning(|config| {
        assert_eq!(config.size, Size::new(800, 600));
        assert_eq!(config.radius, 2.0);
        let mut renderer = crate::domain::ports::MockHeatRenderer::new();
        renderer.expect_set_data().returning(|_| Ok(()));
        Ok(Box::new(renderer))
    });
    let mut layer = HeatmapOverlay::new(OverlayConfig::default(), Arc::new(factory));

    layer.attach(map.clone()).expect("first attach");
    layer.detach();
    layer.attach(map).expect("second attach");

    assert!(layer.has_renderer());
}

#[rstest]
fn renderer_construction_failure_leaves_overlay_detached(map: Arc<StubMap>) {
    let mut factory = MockHeatRendererFactory::new();
    factory
        .expect_create()
        .returning(|_| Err(HeatRendererError::construction("no canvas")));
    let mut layer = HeatmapOverlay::new(OverlayConfig::default(), Arc::new(factory));

    let err = layer.attach(map.clone()).expect_err("attach fails");

    assert_eq!(
        err,
        OverlayError::Renderer(HeatRendererError::construction("no canvas"))
    );
    assert!(!layer.is_attached());
    assert_eq!(map.overlay_count(), 0);
}

#[rstest]
fn move_end_resizes_surface_and_renderer(map: Arc<StubMap>, factory: Arc<RecordingFactory>) {
    let mut layer = overlay(OverlayConfig::default(), &factory);
    layer.attach(map.clone()).expect("attach");
    let frames = factory.frames().len();

    map.state().size = Size::new(1024, 768);
    assert!(layer.handle_move_end().expect("move end"));

    assert_eq!(layer.surface().size(), Size::new(1024, 768));
    assert_eq!(factory.dimensions(), vec![Size::new(1024, 768)]);
    assert_eq!(factory.frames().len(), frames + 1);
}

#[rstest]
fn rejected_resize_is_retried_on_next_move_end(
    map: Arc<StubMap>,
    factory: Arc<RecordingFactory>,
) {
    let mut layer = overlay(OverlayConfig::default(), &factory);
    layer.attach(map.clone()).expect("attach");
    map.state().size = Size::new(1024, 768);
    factory.fail_next_resizes(1);

    let err = layer.handle_move_end().expect_err("resize rejected");

    assert_eq!(
        err,
        OverlayError::Renderer(HeatRendererError::resize("busy"))
    );
    assert_eq!(layer.surface().size(), Size::new(800, 600));
    assert!(factory.dimensions().is_empty());

    assert!(layer.handle_move_end().expect("move end"));

    assert_eq!(layer.surface().size(), Size::new(1024, 768));
    assert_eq!(factory.dimensions(), vec![Size::new(1024, 768)]);
}

#[rstest]
fn rejected_resize_on_reattach_keeps_overlay_detached(
    map: Arc<StubMap>,
    factory: Arc<RecordingFactory>,
) {
    let mut layer = overlay(OverlayConfig::default(), &factory);
    layer.attach(map.clone()).expect("first attach");
    layer.detach();
    map.state().size = Size::new(640, 480);
    factory.fail_next_resizes(1);

    layer.attach(map.clone()).expect_err("resize rejected");

    assert!(!layer.is_attached());
    assert_eq!(map.overlay_count(), 0);
    assert_eq!(layer.surface().size(), Size::new(800, 600));

    layer.attach(map.clone()).expect("second attach");

    assert_eq!(layer.surface().size(), Size::new(640, 480));
    assert_eq!(factory.dimensions(), vec![Size::new(640, 480)]);
}

#[rstest]
fn move_end_without_resize_only_redraws(map: Arc<StubMap>, factory: Arc<RecordingFactory>) {
    let mut layer = overlay(OverlayConfig::default(), &factory);
    layer.attach(map).expect("attach");

    assert!(layer.handle_move_end().expect("move end"));

    assert!(factory.dimensions().is_empty());
    assert_eq!(factory.frames().len(), 2);
}

#[rstest]
fn surface_translation_cancels_pane_offset(map: Arc<StubMap>, factory: Arc<RecordingFactory>) {
    map.state().supported = vec!["WebkitTransform"];
    let mut layer = overlay(OverlayConfig::default(), &factory);
    layer.attach(map.clone()).expect("attach");

    map.state().pane = Point::new(10.4, -3.6);
    layer.handle_move_end().expect("move end");

    assert_eq!(layer.surface().offset(), Some((-10, 4)));
    let style = map.style_of(layer.surface().id()).expect("surface");
    assert!(style.contains(&(
        "WebkitTransform".to_owned(),
        "translate(-10px,4px)".to_owned()
    )));
}

#[test]
fn pixels_round_half_up() {
    assert_eq!(round_pixel(2.5), 3);
    assert_eq!(round_pixel(-2.5), -2);
    assert_eq!(round_pixel(-3.6), -4);
}
