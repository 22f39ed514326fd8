// SPDX-License-Identifier: MIT OR Apache-2.0
//! Mode-aware property writes.
//!
//! Design mode writes static fields. Video mode turns animatable fields into
//! keyframe upserts at the playhead and leaves the static values alone;
//! everything else is written directly in both modes.

use crate::composition::{Composition, EditorMode};
use crate::layer::{LayerId, LayerPatch};

impl Composition {
    /// Apply an edit through the mode-aware write path; unknown ids are ignored
    pub fn apply_property_update(&mut self, id: LayerId, patch: LayerPatch) {
        let mode = self.timeline.mode;
        let time = self.timeline.current_time;
        let epsilon = self.config.keyframe_merge_epsilon;
        let easing = self.config.default_keyframe_easing;

        let Some(layer) = self.layer_mut(id) else {
            return;
        };

        match mode {
            EditorMode::Design => layer.apply(&patch),
            EditorMode::Video => {
                let (animated, rest) = patch.split_animatable();
                for (property, value) in animated {
                    layer.keyframes.upsert(property, time, value, epsilon, easing);
                }
                if !rest.is_empty() {
                    layer.apply(&rest);
                }
            }
        }
    }
}
