// SPDX-License-Identifier: MPL-2.0
//! The image-composition editor facade.
//!
//! Owns the image collection, the gesture sessions and the load
//! lifecycle, and exposes the public operation surface: add / replace /
//! remove / select images, apply gesture and programmatic transforms to
//! the active image, and flatten the stack into a raster.
//!
//! Decoding is the shell's responsibility: `add_image` and `set_image`
//! register placeholders and the shell reports each decoded source via
//! [`ImageEditor::complete_load`]. Completions may arrive in any order;
//! a completion for an entity that has been removed in the meantime is
//! ignored.

pub mod collection;
pub mod entity;
pub mod gesture;
pub mod placement;

pub use collection::{ImageCollection, ImageRef};
pub use entity::{ImageEntity, ImageId, Transform2D};
pub use gesture::{GesturePhase, PanEvent, PinchEvent, RotateEvent};

use crate::compositor;
use crate::config::{EditorConfig, SourceOptions};
use crate::error::Result;
use crate::geometry::{ScaleFactor, Size, Vec2};
use crate::image_handler;
use gesture::{PanSession, PinchSession, RotateSession};
use std::path::Path;
use tiny_skia::Pixmap;

/// Signals produced by a load completion.
///
/// `placed` reports that the completion populated an entity;
/// `batch_loaded` fires every time the whole collection reaches the
/// loaded state; `init_completed` fires exactly once per editor, on the
/// first full load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOutcome {
    pub placed: bool,
    pub batch_loaded: bool,
    pub init_completed: bool,
}

/// An in-place replacement registered by `set_image`, applied when its
/// source finishes decoding.
#[derive(Debug, Clone)]
struct PendingSwap {
    id: ImageId,
    index: usize,
    options: SourceOptions,
    select: bool,
}

/// The image-composition editor.
#[derive(Debug)]
pub struct ImageEditor {
    config: EditorConfig,
    collection: ImageCollection,
    pan: PanSession,
    rotate: RotateSession,
    pinch: PinchSession,
    pending_swaps: Vec<PendingSwap>,
    inited: bool,
    next_id: u64,
}

impl ImageEditor {
    /// Creates an editor and registers a placeholder for every
    /// configured source. The shell drives their decodes via
    /// [`Self::complete_load`]; see [`Self::pending_sources`].
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        let mut editor = Self {
            config,
            collection: ImageCollection::new(),
            pan: PanSession::default(),
            rotate: RotateSession::default(),
            pinch: PinchSession::default(),
            pending_swaps: Vec::new(),
            inited: false,
            next_id: 0,
        };
        for entry in editor.config.image_sources.clone() {
            editor.add_image(entry, true);
        }
        editor
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The fixed container dimensions.
    #[must_use]
    pub fn container_size(&self) -> Size {
        Size::new(self.config.width, self.config.height)
    }

    /// Entities in ascending stacking order.
    pub fn images(&self) -> impl Iterator<Item = &ImageEntity> {
        self.collection.iter()
    }

    #[must_use]
    pub fn image_count(&self) -> usize {
        self.collection.len()
    }

    #[must_use]
    pub fn image(&self, target: impl Into<ImageRef>) -> Option<&ImageEntity> {
        let index = self.collection.resolve(target.into())?;
        self.collection.get(index)
    }

    /// The currently active (gesture target) image, if any.
    #[must_use]
    pub fn active_id(&self) -> Option<ImageId> {
        self.collection.active_id()
    }

    /// Sources still waiting for a decode: placeholder entities plus
    /// pending replacements, as `(id, url)` pairs for the shell to
    /// resolve.
    #[must_use]
    pub fn pending_sources(&self) -> Vec<(ImageId, String)> {
        let mut pending: Vec<(ImageId, String)> = self
            .collection
            .iter()
            .filter(|image| !image.is_loaded())
            .map(|image| (image.id(), image.url().to_string()))
            .collect();
        pending.extend(
            self.pending_swaps
                .iter()
                .map(|swap| (swap.id, swap.options.url.clone())),
        );
        pending
    }

    // ======================================================================
    // Collection lifecycle
    // ======================================================================

    /// Appends a placeholder entity with the next stacking order and
    /// returns its id. `select` requests that, once the batch this add
    /// belongs to finishes loading, the newest image becomes active.
    pub fn add_image(&mut self, source: impl Into<SourceOptions>, select: bool) -> ImageId {
        let id = self.alloc_id();
        let order = self.collection.len() as u32 + 1;
        let entity = ImageEntity::new(id, source.into(), order, select);
        self.collection.push(entity);
        id
    }

    /// Registers an in-place replacement of the entity at `index`,
    /// applied once the new source decodes. Returns the replacement's
    /// id, or `None` (no-op) if `index` is out of range.
    ///
    /// The replacement keeps the slot's order but resets transform,
    /// center point and display size to placement defaults, and its
    /// behavior flags are populated with the same contract as
    /// [`Self::add_image`].
    pub fn set_image(
        &mut self,
        source: impl Into<SourceOptions>,
        index: usize,
        select: bool,
    ) -> Option<ImageId> {
        if index >= self.collection.len() {
            return None;
        }
        let id = self.alloc_id();
        self.pending_swaps.push(PendingSwap {
            id,
            index,
            options: source.into(),
            select,
        });
        Some(id)
    }

    /// Reports a decoded source. Tolerates completions arriving in any
    /// order and completions for entities removed while the decode was
    /// in flight (those are ignored).
    pub fn complete_load(&mut self, id: ImageId, pixels: Pixmap) -> LoadOutcome {
        if let Some(position) = self.pending_swaps.iter().position(|swap| swap.id == id) {
            let swap = self.pending_swaps.remove(position);
            return self.finish_swap(swap, pixels);
        }

        let Some(index) = self.collection.resolve(ImageRef::Id(id)) else {
            // Late completion for a detached entity.
            return LoadOutcome::default();
        };

        let placement = self.placement_for(&pixels);
        if let Some(image) = self.collection.get_mut(index) {
            image.place(pixels, placement);
        }

        let mut outcome = LoadOutcome {
            placed: true,
            ..LoadOutcome::default()
        };

        // The all-loaded condition is recomputed over the full
        // collection on every completion; completion order across
        // concurrent loads is not guaranteed.
        if self.collection.all_loaded() {
            outcome.batch_loaded = true;
            if !self.inited {
                self.inited = true;
                outcome.init_completed = true;
            } else if self
                .collection
                .get(index)
                .is_some_and(ImageEntity::auto_select)
            {
                let top = self.collection.len() - 1;
                self.collection.select(ImageRef::Index(top));
            }
        }
        outcome
    }

    /// Removes an image by position or id; nonexistent targets are a
    /// no-op. Removing the active image clears the selection.
    pub fn remove_image(&mut self, target: impl Into<ImageRef>) {
        self.collection.remove(target.into());
    }

    /// Removes every image.
    pub fn remove_all(&mut self) {
        self.collection.clear();
    }

    /// Removes every image and re-registers the configured source list
    /// as fresh placeholders with selection disabled. Returns the new
    /// ids so the shell can drive their decodes.
    pub fn reset(&mut self) -> Vec<ImageId> {
        self.remove_all();
        let entries = self.config.image_sources.clone();
        entries
            .into_iter()
            .map(|entry| self.add_image(entry, false))
            .collect()
    }

    /// Sets the active image by position or id; no-op if the target
    /// does not exist.
    pub fn select_image(&mut self, target: impl Into<ImageRef>) {
        self.collection.select(target.into());
    }

    /// A tap on an image: selects it when its `click_to_select` flag is
    /// set and returns the tapped id so the shell can run its own click
    /// handling. Returns `None` for a nonexistent target.
    pub fn tap_image(&mut self, target: impl Into<ImageRef>) -> Option<ImageId> {
        let index = self.collection.resolve(target.into())?;
        let image = self.collection.get(index)?;
        let id = image.id();
        if image.click_to_select() {
            self.collection.select(ImageRef::Index(index));
        }
        Some(id)
    }

    // ======================================================================
    // Transforms
    // ======================================================================

    /// Moves the active image by a delta, updating center point and
    /// translate together. No-op without an active image.
    pub fn move_image(&mut self, dx: f32, dy: f32) {
        if let Some(image) = self.active_mut() {
            image.translate_by(Vec2::new(dx, dy));
        }
    }

    /// Sets the active image's absolute rotation in degrees. No-op
    /// without an active image.
    pub fn rotate_image(&mut self, degrees: f32) {
        if let Some(image) = self.active_mut() {
            image.set_rotation(degrees);
        }
    }

    /// Sets the active image's scale, clamped to the valid range. No-op
    /// without an active image.
    pub fn scale_image(&mut self, scale: f32) {
        if let Some(image) = self.active_mut() {
            image.set_scale(ScaleFactor::new(scale));
        }
    }

    /// Feeds a pan gesture event to the active image. No-op without an
    /// active image.
    pub fn on_pan(&mut self, event: PanEvent) {
        let Some(index) = self.collection.active_index() else {
            return;
        };
        if event.phase == GesturePhase::Start {
            if let Some(image) = self.collection.get(index) {
                self.pan.begin(image);
            }
        }
        if let Some(image) = self.collection.get_mut(index) {
            self.pan.apply(image, event.delta);
        }
    }

    /// Feeds a rotate gesture event to the active image. No-op without
    /// an active image.
    pub fn on_rotate(&mut self, event: RotateEvent) {
        let Some(index) = self.collection.active_index() else {
            return;
        };
        if event.phase == GesturePhase::Start {
            if let Some(image) = self.collection.get(index) {
                self.rotate.begin(image);
            }
        }
        if let Some(image) = self.collection.get_mut(index) {
            self.rotate.apply(image, event.rotation);
        }
    }

    /// Feeds a pinch gesture event to the active image. No-op without
    /// an active image.
    pub fn on_pinch(&mut self, event: PinchEvent) {
        let Some(index) = self.collection.active_index() else {
            return;
        };
        if event.phase == GesturePhase::Start {
            if let Some(image) = self.collection.get(index) {
                self.pinch.begin(image);
            }
        }
        if let Some(image) = self.collection.get_mut(index) {
            self.pinch.apply(image, event.scale);
        }
    }

    // ======================================================================
    // Output
    // ======================================================================

    /// Flattens the current stack into a container-sized raster. Pure
    /// with respect to the model: repeated calls without intervening
    /// mutation produce identical output.
    pub fn merge_image(&self) -> Result<Pixmap> {
        compositor::compose(self.collection.iter(), self.container_size())
    }

    /// Convenience: decodes a file synchronously and completes the add
    /// in one call.
    pub fn add_image_from_path<P: AsRef<Path>>(
        &mut self,
        path: P,
        select: bool,
    ) -> Result<(ImageId, LoadOutcome)> {
        let pixels = image_handler::load_pixmap(&path)?;
        let url = path.as_ref().to_string_lossy().into_owned();
        let id = self.add_image(url, select);
        let outcome = self.complete_load(id, pixels);
        Ok((id, outcome))
    }

    fn alloc_id(&mut self) -> ImageId {
        self.next_id += 1;
        ImageId(self.next_id)
    }

    fn active_mut(&mut self) -> Option<&mut ImageEntity> {
        let index = self.collection.active_index()?;
        self.collection.get_mut(index)
    }

    fn placement_for(&self, pixels: &Pixmap) -> placement::Placement {
        placement::fit(
            Size::new(pixels.width() as f32, pixels.height() as f32),
            self.container_size(),
        )
    }

    fn finish_swap(&mut self, swap: PendingSwap, pixels: Pixmap) -> LoadOutcome {
        if swap.index >= self.collection.len() {
            // The slot vanished while the replacement was decoding.
            return LoadOutcome::default();
        }
        let placement = self.placement_for(&pixels);
        let mut entity = ImageEntity::new(
            swap.id,
            swap.options,
            swap.index as u32 + 1,
            swap.select,
        );
        entity.place(pixels, placement);
        self.collection.replace(swap.index, entity);
        if swap.select {
            self.collection.select(ImageRef::Index(swap.index));
        }
        LoadOutcome {
            placed: true,
            ..LoadOutcome::default()
        }
    }
}

impl Default for ImageEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
