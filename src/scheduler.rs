//! Per-layer repaint coordination.
//!
//! Renderers never repaint directly. Whenever one of their inputs changes the
//! owning view marks the affected layer dirty here; the host drains the dirty set
//! once per animation frame and repaints each dirty layer from scratch. Marks
//! coalesce: however many arrive before the frame, each layer is repainted once,
//! using whatever state is current at repaint time.

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod scheduler_test;

use tracing::trace;

/// The independently invalidated drawing layers, bottom first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Flight plan routes.
    Map,
    /// Free-standing geometry overlays.
    Geometry,
    /// Icons and the ownship symbol.
    Icons,
}

impl Layer {
    /// All layers in paint order.
    pub const ALL: [Layer; 3] = [Layer::Map, Layer::Geometry, Layer::Icons];
}

/// Snapshot of the dirty flags taken by [`RepaintScheduler::take_dirty`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirtyLayers {
    pub map: bool,
    pub geometry: bool,
    pub icons: bool,
}

impl DirtyLayers {
    #[must_use]
    pub fn contains(&self, layer: Layer) -> bool {
        match layer {
            Layer::Map => self.map,
            Layer::Geometry => self.geometry,
            Layer::Icons => self.icons,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.map || self.geometry || self.icons)
    }

    /// Dirty layers in paint order.
    pub fn iter(&self) -> impl Iterator<Item = Layer> + '_ {
        Layer::ALL.into_iter().filter(|layer| self.contains(*layer))
    }

    fn flag_mut(&mut self, layer: Layer) -> &mut bool {
        match layer {
            Layer::Map => &mut self.map,
            Layer::Geometry => &mut self.geometry,
            Layer::Icons => &mut self.icons,
        }
    }
}

/// Dirty flags plus a single pending-frame latch.
#[derive(Debug, Default)]
pub struct RepaintScheduler {
    dirty: DirtyLayers,
    frame_pending: bool,
}

impl RepaintScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `layer` for a full repaint.
    ///
    /// Returns `true` when this mark opened a new frame request, i.e. the host
    /// should schedule one animation frame now. Later marks before that frame
    /// return `false`.
    pub fn mark(&mut self, layer: Layer) -> bool {
        *self.dirty.flag_mut(layer) = true;
        trace!(?layer, "layer marked dirty");
        if self.frame_pending {
            return false;
        }
        self.frame_pending = true;
        true
    }

    pub fn mark_map_dirty(&mut self) -> bool {
        self.mark(Layer::Map)
    }

    pub fn mark_geometry_dirty(&mut self) -> bool {
        self.mark(Layer::Geometry)
    }

    pub fn mark_icons_dirty(&mut self) -> bool {
        self.mark(Layer::Icons)
    }

    #[must_use]
    pub fn is_dirty(&self, layer: Layer) -> bool {
        self.dirty.contains(layer)
    }

    /// Current flags without draining them.
    #[must_use]
    pub fn dirty(&self) -> DirtyLayers {
        self.dirty
    }

    /// A frame has been requested and not yet drained.
    #[must_use]
    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// Drain the dirty set for repainting and release the frame latch.
    pub fn take_dirty(&mut self) -> DirtyLayers {
        self.frame_pending = false;
        std::mem::take(&mut self.dirty)
    }
}
