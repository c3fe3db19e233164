//! The moving-map view: configuration intake, dirty tracking and layer repaint.
//!
//! `MovingMap` is the single owner of the three layer surfaces. Every setter
//! compares the new input against the current one and marks only the layers
//! that actually depend on what changed:
//!
//! | Input | Map | Geometry | Icons |
//! |-------|-----|----------|-------|
//! | centre / range / canvas size | x | x | x |
//! | rotation | x | | |
//! | routes | x | | |
//! | geometry | | x | |
//! | icon style, size, text, rotation | | | x |
//! | icon position (moving icons only) | | | x |
//! | ownship telemetry | | | x |
//!
//! Rotation only touches the map layer because layers are drawn in the map frame
//! and the host rotates the composited container; route labels are the only
//! thing that counter-rotate.
//!
//! The host drives it in two steps: mutate through the setters, then, when
//! [`MovingMap::take_frame_request`] says so, schedule one animation frame that
//! calls [`MovingMap::render_frame`].

#[cfg(test)]
#[path = "map_test.rs"]
mod map_test;

use tracing::{debug, warn};

use crate::aircraft::{AircraftTracker, TelemetrySource};
use crate::assets::{AssetCache, ImageLoader};
use crate::config::{
    BaseMapSource, ConfigError, Drawable, GeometryConfig, IconConfig, MapConfig, RouteConfig, validate_center,
    validate_range, validate_rotation,
};
use crate::geo::GeoPoint;
use crate::geometry::draw_geometry;
use crate::icon::draw_icon;
use crate::route::draw_route;
use crate::scheduler::{DirtyLayers, Layer, RepaintScheduler};
use crate::surface::{DrawingContext, LayerSurface, SurfaceError};
use crate::viewport::ViewportState;

/// Positioning inputs for the host's base-map raster provider.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseMapParams {
    pub config_folder: String,
    pub map_id: String,
    pub center: GeoPoint,
    pub range: f64,
}

/// The moving-map view construct.
pub struct MovingMap<C: DrawingContext> {
    viewport: ViewportState,
    base_map: Option<BaseMapSource>,
    drawables: Vec<Drawable>,
    tracker: Option<AircraftTracker>,
    scheduler: RepaintScheduler,
    frame_requested: bool,
    map: LayerSurface<C>,
    geometry: LayerSurface<C>,
    icons: LayerSurface<C>,
    assets: AssetCache<C::Image>,
    loader: Option<Box<dyn ImageLoader>>,
}

impl<C: DrawingContext> Default for MovingMap<C> {
    fn default() -> Self {
        Self {
            viewport: ViewportState::default(),
            base_map: None,
            drawables: Vec::new(),
            tracker: None,
            scheduler: RepaintScheduler::new(),
            frame_requested: false,
            map: LayerSurface::new(Layer::Map),
            geometry: LayerSurface::new(Layer::Geometry),
            icons: LayerSurface::new(Layer::Icons),
            assets: AssetCache::new(),
            loader: None,
        }
    }
}

impl<C: DrawingContext> MovingMap<C> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `loader` to fetch icon images the first time an asset path is seen.
    #[must_use]
    pub fn with_loader(mut self, loader: Box<dyn ImageLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    // --- Configuration ---

    /// Replace the whole configuration.
    ///
    /// # Errors
    ///
    /// Returns the first invalid value; nothing is applied in that case.
    pub fn configure(&mut self, config: MapConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let MapConfig { center, range, rotation, base_map, drawables } = config;
        self.apply_center(center);
        self.apply_range(range);
        self.apply_rotation(rotation);
        self.base_map = base_map;
        self.apply_drawables(drawables);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::NonFiniteCoordinate`] for a NaN or infinite centre.
    pub fn set_center(&mut self, center: GeoPoint) -> Result<(), ConfigError> {
        validate_center(center)?;
        self.apply_center(center);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRange`] for zero, negative or non-finite ranges.
    pub fn set_range(&mut self, range: f64) -> Result<(), ConfigError> {
        validate_range(range)?;
        self.apply_range(range);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRotation`] for a NaN or infinite rotation.
    pub fn set_rotation(&mut self, rotation: f64) -> Result<(), ConfigError> {
        validate_rotation(rotation)?;
        self.apply_rotation(rotation);
        Ok(())
    }

    /// The host container was resized to `width` x `height` pixels.
    pub fn resize(&mut self, width: f64, height: f64) {
        let size = ViewportState::fit_container(width, height);
        if self.viewport.canvas_size != size {
            self.viewport.canvas_size = size;
            self.map.resize(size);
            self.geometry.resize(size);
            self.icons.resize(size);
            self.mark_all();
        }
    }

    /// Replace the drawable list.
    ///
    /// # Errors
    ///
    /// Returns the first invalid drawable; nothing is applied in that case.
    pub fn set_drawables(&mut self, drawables: Vec<Drawable>) -> Result<(), ConfigError> {
        drawables.iter().try_for_each(Drawable::validate)?;
        self.apply_drawables(drawables);
        Ok(())
    }

    /// Install or remove the ownship tracker.
    pub fn set_tracker(&mut self, tracker: Option<AircraftTracker>) {
        if let Some(t) = &tracker {
            self.request_image(&t.icon().icon_asset);
        }
        if self.tracker != tracker {
            self.tracker = tracker;
            self.mark(Layer::Icons);
        }
    }

    /// Per-frame telemetry update for the ownship tracker.
    pub fn tick(&mut self, telemetry: &dyn TelemetrySource) {
        let changed = self.tracker.as_mut().is_some_and(|t| t.tick(telemetry));
        if changed {
            self.mark(Layer::Icons);
        }
    }

    // --- Images ---

    /// A requested image finished decoding.
    pub fn image_loaded(&mut self, asset: &str, image: C::Image) {
        self.assets.resolve(asset, image);
        if self.uses_asset(asset) {
            self.mark(Layer::Icons);
        }
    }

    /// A requested image failed; icons using it stay label-only.
    pub fn image_failed(&mut self, asset: &str) {
        self.assets.fail(asset);
    }

    // --- Surfaces ---

    /// Bind a drawing context to `layer` and schedule its first paint.
    pub fn attach_surface(&mut self, layer: Layer, context: C) {
        let size = self.viewport.canvas_size;
        self.surface_mut(layer).attach(context, size);
        self.mark(layer);
    }

    /// Unbind the context of `layer`, e.g. when its canvas is unmounted.
    pub fn detach_surface(&mut self, layer: Layer) -> Option<C> {
        self.surface_mut(layer).detach()
    }

    pub fn surface_mut(&mut self, layer: Layer) -> &mut LayerSurface<C> {
        match layer {
            Layer::Map => &mut self.map,
            Layer::Geometry => &mut self.geometry,
            Layer::Icons => &mut self.icons,
        }
    }

    // --- Frames ---

    /// `true` once after the first dirty mark since the last frame; the host
    /// should schedule exactly one frame when it sees it.
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }

    /// Repaint every dirty layer from scratch and return which ones were dirty.
    ///
    /// Reads the current configuration, not the one in effect when the layer was
    /// marked. A drawable that fails to render is logged and skipped; the rest of
    /// the layer still paints.
    pub fn render_frame(&mut self) -> DirtyLayers {
        self.frame_requested = false;
        let dirty = self.scheduler.take_dirty();
        for layer in dirty.iter() {
            self.repaint(layer);
        }
        dirty
    }

    fn repaint(&mut self, layer: Layer) {
        let Self { viewport, drawables, tracker, assets, map, geometry, icons, .. } = self;
        let surface = match layer {
            Layer::Map => map,
            Layer::Geometry => geometry,
            Layer::Icons => icons,
        };

        let painted = surface.with_context(|ctx, size| {
            ctx.clear_rect(0.0, 0.0, size, size);
            let mut failures = 0usize;
            let mut report = |result: Result<(), SurfaceError>| {
                if let Err(error) = result {
                    failures += 1;
                    warn!(%error, ?layer, "drawable failed to render");
                }
            };
            match layer {
                Layer::Map => {
                    for route in routes(drawables) {
                        report(draw_route(ctx, route, viewport));
                    }
                }
                Layer::Geometry => {
                    for paths in geometries(drawables) {
                        report(draw_geometry(ctx, paths, viewport));
                    }
                }
                Layer::Icons => {
                    for icon in icon_configs(drawables) {
                        report(draw_icon(ctx, icon, assets.image(&icon.icon_asset), viewport));
                    }
                    if let Some(ownship) = tracker.as_ref().filter(|t| t.has_fix()) {
                        let icon = ownship.icon();
                        report(draw_icon(ctx, icon, assets.image(&icon.icon_asset), viewport));
                    }
                }
            }
            failures
        });

        match painted {
            Some(failures) => debug!(?layer, failures, "layer repainted"),
            None => debug!(?layer, "layer surface not ready, repaint skipped"),
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    #[must_use]
    pub fn drawables(&self) -> &[Drawable] {
        &self.drawables
    }

    #[must_use]
    pub fn tracker(&self) -> Option<&AircraftTracker> {
        self.tracker.as_ref()
    }

    #[must_use]
    pub fn dirty(&self) -> DirtyLayers {
        self.scheduler.dirty()
    }

    /// What the base-map provider underneath the layers should show.
    #[must_use]
    pub fn base_map(&self) -> Option<BaseMapParams> {
        self.base_map.as_ref().map(|source| BaseMapParams {
            config_folder: source.config_folder.clone(),
            map_id: source.map_id.clone(),
            center: self.viewport.center,
            range: self.viewport.range,
        })
    }

    // --- Internals ---

    fn mark(&mut self, layer: Layer) {
        if self.scheduler.mark(layer) {
            self.frame_requested = true;
        }
    }

    fn mark_all(&mut self) {
        for layer in Layer::ALL {
            self.mark(layer);
        }
    }

    fn apply_center(&mut self, center: GeoPoint) {
        if self.viewport.center != center {
            self.viewport.center = center;
            self.mark_all();
        }
    }

    fn apply_rotation(&mut self, rotation: f64) {
        if self.viewport.rotation != rotation {
            self.viewport.rotation = rotation;
            self.mark(Layer::Map);
        }
    }

    fn apply_range(&mut self, range: f64) {
        if self.viewport.range != range {
            self.viewport.range = range;
            self.mark_all();
        }
    }

    fn apply_drawables(&mut self, drawables: Vec<Drawable>) {
        if !routes(&self.drawables).eq(routes(&drawables)) {
            self.mark(Layer::Map);
        }
        if !geometries(&self.drawables).eq(geometries(&drawables)) {
            self.mark(Layer::Geometry);
        }
        if icons_need_repaint(&self.drawables, &drawables) {
            self.mark(Layer::Icons);
        }

        let assets: Vec<String> = icon_configs(&drawables).map(|icon| icon.icon_asset.clone()).collect();
        for asset in &assets {
            self.request_image(asset);
        }
        self.drawables = drawables;
    }

    fn request_image(&mut self, asset: &str) {
        if let Some(loader) = self.loader.as_deref_mut() {
            self.assets.ensure_requested(asset, loader);
        }
    }

    fn uses_asset(&self, asset: &str) -> bool {
        icon_configs(&self.drawables).any(|icon| icon.icon_asset == asset)
            || self.tracker.as_ref().is_some_and(|t| t.icon().icon_asset == asset)
    }
}

fn routes(drawables: &[Drawable]) -> impl Iterator<Item = &RouteConfig> {
    drawables.iter().filter_map(|d| match d {
        Drawable::Route(route) => Some(route),
        _ => None,
    })
}

fn geometries(drawables: &[Drawable]) -> impl Iterator<Item = &GeometryConfig> {
    drawables.iter().filter_map(|d| match d {
        Drawable::Geometry(geometry) => Some(geometry),
        _ => None,
    })
}

fn icon_configs(drawables: &[Drawable]) -> impl Iterator<Item = &IconConfig> {
    drawables.iter().filter_map(|d| match d {
        Drawable::Icon(icon) => Some(icon),
        _ => None,
    })
}

fn icons_need_repaint(old: &[Drawable], new: &[Drawable]) -> bool {
    if icon_configs(old).count() != icon_configs(new).count() {
        return true;
    }
    icon_configs(old).zip(icon_configs(new)).any(|(before, after)| before.needs_repaint(after))
}
