// SPDX-License-Identifier: MIT OR Apache-2.0
//! Composition state: layers, canvas, timeline and selection.
//!
//! Frames and overlays live in one [`IndexMap`] keyed by id, so every
//! operation that spans "all layers" walks a single collection.

use crate::config::EngineConfig;
use crate::easing::Easing;
use crate::keyframe::Keyframe;
use crate::layer::{DeviceType, Layer, LayerId, LayerPatch, OverlayKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Editing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    /// Static layout; keyframes and visibility windows are ignored
    #[default]
    Design,
    /// Time-driven; keyframes, visibility windows and keyframe writes are active
    Video,
}

/// Canvas geometry and display zoom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasState {
    /// Composition width in canvas units
    pub width: u32,
    /// Composition height in canvas units
    pub height: u32,
    /// Display zoom; never affects stored coordinates
    pub zoom: f32,
    /// Inner padding in canvas units
    pub padding: f32,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            zoom: 0.5,
            padding: 40.0,
        }
    }
}

impl CanvasState {
    /// Zoom that fits the canvas into the available screen area
    pub fn fit_zoom(&self, available_width: f32, available_height: f32) -> f32 {
        let scale_x = available_width / self.width as f32;
        let scale_y = available_height / self.height as f32;
        scale_x.min(scale_y).min(0.85).max(0.1)
    }
}

/// Global timeline state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineState {
    /// Playhead position (seconds)
    pub current_time: f32,
    /// Timeline length (seconds)
    pub duration: f32,
    /// Whether playback is running
    pub is_playing: bool,
    /// Editing mode
    pub mode: EditorMode,
}

impl Default for TimelineState {
    fn default() -> Self {
        Self {
            current_time: 0.0,
            duration: 10.0,
            is_playing: false,
            mode: EditorMode::Design,
        }
    }
}

/// The single owner of application state
#[derive(Debug, Clone, Default)]
pub struct Composition {
    layers: IndexMap<LayerId, Layer>,
    /// Canvas geometry
    pub canvas: CanvasState,
    /// Timeline state
    pub timeline: TimelineState,
    /// Tuning constants
    pub config: EngineConfig,
    selected: Option<LayerId>,
    clipboard: Option<LayerId>,
}

impl Composition {
    /// Create an empty composition
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a composition holding one centered, selected iPhone frame
    pub fn starter() -> Self {
        let mut composition = Self::new();
        let id = composition.add_frame(DeviceType::Iphone15);
        composition.update_layer(id, &LayerPatch::new().with_position(0.0, 0.0));
        composition
    }

    /// Get a layer
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(&id)
    }

    /// Get a mutable layer
    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.get_mut(&id)
    }

    /// Iterate over all layers in insertion order
    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.values()
    }

    /// Iterate over device frames
    pub fn frames(&self) -> impl Iterator<Item = &Layer> {
        self.layers.values().filter(|l| l.is_frame())
    }

    /// Iterate over overlays
    pub fn overlays(&self) -> impl Iterator<Item = &Layer> {
        self.layers.values().filter(|l| l.is_overlay())
    }

    /// Get layer count
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Whether a layer exists
    pub fn contains(&self, id: LayerId) -> bool {
        self.layers.contains_key(&id)
    }

    /// Currently selected layer
    pub fn selected_id(&self) -> Option<LayerId> {
        self.selected
    }

    /// Select a layer; unknown ids are ignored
    pub fn select(&mut self, id: LayerId) {
        if self.contains(id) {
            self.selected = Some(id);
        }
    }

    /// Clear the selection
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// One above the highest z-index, or 1 when there are no layers
    pub fn next_z_index(&self) -> i32 {
        self.layers
            .values()
            .map(|l| l.z_index)
            .max()
            .map_or(1, |max| max + 1)
    }

    /// Latest clip end across all layers
    pub fn max_end_time(&self) -> Option<f32> {
        self.layers.values().map(Layer::end_time).reduce(f32::max)
    }

    /// Add a layer on top of the stack and select it
    pub fn insert_layer(&mut self, mut layer: Layer) -> LayerId {
        layer.z_index = self.next_z_index();
        let id = layer.id;
        tracing::debug!("Adding layer {:?} ({}) at z {}", id, layer.name, layer.z_index);
        self.layers.insert(id, layer);
        self.selected = Some(id);
        id
    }

    /// Add a device frame
    pub fn add_frame(&mut self, device: DeviceType) -> LayerId {
        self.insert_layer(Layer::frame(device).with_position(50.0, 50.0))
    }

    /// Add an overlay; `content` falls back to the kind's default
    pub fn add_overlay(&mut self, kind: OverlayKind, content: Option<&str>) -> LayerId {
        self.insert_layer(Layer::overlay(kind, content))
    }

    /// Shallow-merge fields into a layer; unknown ids are ignored
    pub fn update_layer(&mut self, id: LayerId, patch: &LayerPatch) {
        if let Some(layer) = self.layers.get_mut(&id) {
            layer.apply(patch);
        }
    }

    /// Remove a layer, clearing the selection if it pointed at it
    pub fn delete_layer(&mut self, id: LayerId) -> Option<Layer> {
        let removed = self.layers.shift_remove(&id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        tracing::debug!("Deleted layer {:?} ({})", id, removed.name);
        Some(removed)
    }

    /// Clone a layer under a new id, offset and on top; selects the copy
    pub fn duplicate_layer(&mut self, id: LayerId) -> Option<LayerId> {
        let source = self.layers.get(&id)?;
        let mut copy = source.clone();
        copy.id = LayerId::new();
        copy.name = format!("{} (Copy)", source.name);
        copy.position = source.position.offset(self.config.duplicate_offset);
        tracing::debug!("Duplicating layer {:?} as {:?}", id, copy.id);
        Some(self.insert_layer(copy))
    }

    /// Remember a layer for a later paste
    pub fn copy(&mut self, id: LayerId) {
        if self.contains(id) {
            self.clipboard = Some(id);
        }
    }

    /// Duplicate the copied layer, if it still exists
    pub fn paste(&mut self) -> Option<LayerId> {
        let id = self.clipboard?;
        self.duplicate_layer(id)
    }

    /// Keyframe of a layer near the playhead, used for easing edits
    pub fn active_keyframe(&self, id: LayerId) -> Option<&Keyframe> {
        self.layers
            .get(&id)?
            .keyframes
            .find_near(self.timeline.current_time, self.config.active_keyframe_window)
    }

    /// Change the easing of the keyframe near the playhead
    pub fn set_active_keyframe_easing(&mut self, id: LayerId, easing: Easing) {
        let time = self.timeline.current_time;
        let window = self.config.active_keyframe_window;
        let Some(layer) = self.layers.get_mut(&id) else {
            return;
        };
        let Some(keyframe_id) = layer.keyframes.find_near(time, window).map(|k| k.id) else {
            return;
        };
        if let Some(keyframe) = layer.keyframes.keyframe_mut(keyframe_id) {
            keyframe.easing = easing;
        }
    }

    /// Remove all keyframes from a layer
    pub fn clear_keyframes(&mut self, id: LayerId) {
        if let Some(layer) = self.layers.get_mut(&id) {
            layer.keyframes.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyframe::AnimatableProperty;
    use crate::layer::Position;

    #[test]
    fn test_next_z_index() {
        let mut composition = Composition::new();
        assert_eq!(composition.next_z_index(), 1);
        let a = composition.add_frame(DeviceType::Iphone15);
        let b = composition.add_overlay(OverlayKind::Emoji, None);
        assert_eq!(composition.layer(a).map(|l| l.z_index), Some(1));
        assert_eq!(composition.layer(b).map(|l| l.z_index), Some(2));
        assert_eq!(composition.next_z_index(), 3);
        assert_eq!(composition.selected_id(), Some(b));
    }

    #[test]
    fn test_delete_clears_selection() {
        let mut composition = Composition::new();
        let a = composition.add_frame(DeviceType::Iphone15);
        let b = composition.add_overlay(OverlayKind::Text, None);
        composition.select(a);

        assert!(composition.delete_layer(b).is_some());
        assert_eq!(composition.selected_id(), Some(a));

        assert!(composition.delete_layer(a).is_some());
        assert_eq!(composition.selected_id(), None);
        assert!(composition.delete_layer(a).is_none());
        assert_eq!(composition.layer_count(), 0);
    }

    #[test]
    fn test_duplicate_layer() {
        let mut composition = Composition::new();
        let a = composition.add_frame(DeviceType::IpadPro);
        composition.add_overlay(OverlayKind::Shape, None);

        let copy = composition.duplicate_layer(a).expect("duplicate");
        let source = composition.layer(a).cloned().expect("source");
        let layer = composition.layer(copy).expect("copy");
        assert_ne!(copy, a);
        assert_eq!(layer.name, "iPad Pro (Copy)");
        assert_eq!(layer.position, Position::new(70.0, 70.0));
        assert_eq!(layer.z_index, 3);
        assert_eq!(layer.kind, source.kind);
        assert_eq!(composition.selected_id(), Some(copy));
        assert_eq!(composition.frames().count(), 2);

        assert!(composition.duplicate_layer(LayerId::new()).is_none());
        assert_eq!(composition.layer_count(), 3);
    }

    #[test]
    fn test_update_unknown_layer_is_noop() {
        let mut composition = Composition::starter();
        let before: Vec<Layer> = composition.layers().cloned().collect();
        composition.update_layer(LayerId::new(), &LayerPatch::new().with_scale(3.0));
        let after: Vec<Layer> = composition.layers().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_copy_paste() {
        let mut composition = Composition::new();
        let a = composition.add_overlay(OverlayKind::Text, Some("Hello"));
        assert!(composition.paste().is_none());
        composition.copy(a);
        let pasted = composition.paste().expect("paste");
        assert_eq!(composition.layer(pasted).map(|l| l.name.as_str()), Some("Text Layer (Copy)"));

        composition.delete_layer(a);
        assert!(composition.paste().is_none());
    }

    #[test]
    fn test_active_keyframe_easing_edit() {
        let mut composition = Composition::new();
        let a = composition.add_frame(DeviceType::Iphone15);
        if let Some(layer) = composition.layer_mut(a) {
            layer.keyframes.push(Keyframe::new(2.0, AnimatableProperty::X, 10.0));
        }

        composition.timeline.current_time = 1.0;
        assert!(composition.active_keyframe(a).is_none());

        composition.timeline.current_time = 2.05;
        composition.set_active_keyframe_easing(a, Easing::Bounce);
        assert_eq!(composition.active_keyframe(a).map(|k| k.easing), Some(Easing::Bounce));

        composition.clear_keyframes(a);
        assert!(composition.active_keyframe(a).is_none());
    }

    #[test]
    fn test_fit_zoom() {
        let canvas = CanvasState::default();
        assert!((canvas.fit_zoom(960.0, 1080.0) - 0.5).abs() < 1e-6);
        assert_eq!(canvas.fit_zoom(10_000.0, 10_000.0), 0.85);
        assert_eq!(canvas.fit_zoom(10.0, 10.0), 0.1);
    }
}
