//! Icon image bookkeeping.
//!
//! Decoding happens outside the map. The first time an asset path shows up in
//! the configuration the cache asks the host's [`ImageLoader`] for it exactly
//! once; the host later reports the outcome through
//! [`AssetCache::resolve`] / [`AssetCache::fail`]. Icons whose image is not
//! ready are drawn label-only.

#[cfg(test)]
#[path = "assets_test.rs"]
mod assets_test;

use std::collections::HashMap;

use tracing::{debug, warn};

/// Starts loading an image asset. Completion is reported back to the map.
pub trait ImageLoader {
    fn request(&mut self, asset: &str);
}

/// Load state of one asset.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageState<I> {
    Loading,
    Ready(I),
    /// Permanently undrawable; the label still renders.
    Failed,
}

/// Images keyed by asset path.
#[derive(Debug)]
pub struct AssetCache<I> {
    images: HashMap<String, ImageState<I>>,
}

impl<I> Default for AssetCache<I> {
    fn default() -> Self {
        Self { images: HashMap::new() }
    }
}

impl<I> AssetCache<I> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask `loader` for `asset` unless it has been requested before.
    ///
    /// Returns `true` if a request was issued.
    pub fn ensure_requested(&mut self, asset: &str, loader: &mut dyn ImageLoader) -> bool {
        if self.images.contains_key(asset) {
            return false;
        }
        debug!(asset, "requesting icon image");
        self.images.insert(asset.to_owned(), ImageState::Loading);
        loader.request(asset);
        true
    }

    /// Store a decoded image.
    pub fn resolve(&mut self, asset: &str, image: I) {
        self.images.insert(asset.to_owned(), ImageState::Ready(image));
    }

    /// Record that `asset` will never load.
    pub fn fail(&mut self, asset: &str) {
        warn!(asset, "icon image failed to load");
        self.images.insert(asset.to_owned(), ImageState::Failed);
    }

    /// The decoded image, if it is ready.
    #[must_use]
    pub fn image(&self, asset: &str) -> Option<&I> {
        match self.images.get(asset) {
            Some(ImageState::Ready(image)) => Some(image),
            _ => None,
        }
    }

    #[must_use]
    pub fn state(&self, asset: &str) -> Option<&ImageState<I>> {
        self.images.get(asset)
    }
}
