// SPDX-License-Identifier: MPL-2.0
//! Ordered image collection with stable ids and an active-image
//! pointer.
//!
//! Entities live in a `Vec` whose positions mirror their 1-based
//! `order` values; an id-to-position map is kept in sync on every
//! mutation so id lookups stay constant-time. The active image is an
//! explicit optional id, cleared when the referenced entity is removed.

use crate::editor::entity::{ImageEntity, ImageId};
use std::collections::HashMap;

/// Reference to an image by collection position or stable id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRef {
    Index(usize),
    Id(ImageId),
}

impl From<usize> for ImageRef {
    fn from(index: usize) -> Self {
        ImageRef::Index(index)
    }
}

impl From<ImageId> for ImageRef {
    fn from(id: ImageId) -> Self {
        ImageRef::Id(id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ImageCollection {
    entries: Vec<ImageEntity>,
    index_by_id: HashMap<ImageId, usize>,
    active: Option<ImageId>,
}

impl ImageCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entities in ascending `order`.
    pub fn iter(&self) -> impl Iterator<Item = &ImageEntity> {
        self.entries.iter()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ImageEntity> {
        self.entries.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut ImageEntity> {
        self.entries.get_mut(index)
    }

    #[must_use]
    pub fn contains(&self, id: ImageId) -> bool {
        self.index_by_id.contains_key(&id)
    }

    /// Resolves a position-or-id reference to a current position.
    #[must_use]
    pub fn resolve(&self, target: ImageRef) -> Option<usize> {
        match target {
            ImageRef::Index(index) if index < self.entries.len() => Some(index),
            ImageRef::Index(_) => None,
            ImageRef::Id(id) => self.index_by_id.get(&id).copied(),
        }
    }

    /// Appends an entity; the caller assigns `order = len + 1` before
    /// pushing.
    pub(crate) fn push(&mut self, entity: ImageEntity) {
        debug_assert_eq!(entity.order() as usize, self.entries.len() + 1);
        self.index_by_id.insert(entity.id(), self.entries.len());
        self.entries.push(entity);
    }

    /// Replaces the entity at `index`, keeping the position and order.
    pub(crate) fn replace(&mut self, index: usize, entity: ImageEntity) {
        debug_assert_eq!(entity.order() as usize, index + 1);
        let old = &self.entries[index];
        if self.active == Some(old.id()) {
            self.active = None;
        }
        self.index_by_id.remove(&old.id());
        self.index_by_id.insert(entity.id(), index);
        self.entries[index] = entity;
    }

    /// Removes an entity by position or id, renumbering every greater
    /// order down by one so orders stay contiguous. Returns the removed
    /// entity, or `None` if the target does not exist.
    pub(crate) fn remove(&mut self, target: ImageRef) -> Option<ImageEntity> {
        let index = self.resolve(target)?;
        let removed = self.entries.remove(index);

        if self.active == Some(removed.id()) {
            self.active = None;
        }

        for entity in self.entries.iter_mut().skip(index) {
            entity.demote_order();
        }
        self.reindex();
        Some(removed)
    }

    /// Removes every entity and clears the active pointer.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.index_by_id.clear();
        self.active = None;
    }

    /// Sets the active entity; no-op if the target does not exist.
    /// Returns whether a selection happened.
    pub(crate) fn select(&mut self, target: ImageRef) -> bool {
        match self.resolve(target) {
            Some(index) => {
                self.active = Some(self.entries[index].id());
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn active_id(&self) -> Option<ImageId> {
        self.active
    }

    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.active.and_then(|id| self.index_by_id.get(&id).copied())
    }

    /// Whether every entity has finished loading.
    #[must_use]
    pub fn all_loaded(&self) -> bool {
        self.entries.iter().all(ImageEntity::is_loaded)
    }

    fn reindex(&mut self) {
        self.index_by_id.clear();
        for (index, entity) in self.entries.iter().enumerate() {
            self.index_by_id.insert(entity.id(), index);
        }
    }
}
