// SPDX-License-Identifier: MIT OR Apache-2.0
//! Values handed to the renderer: displayed transforms, visibility, entrance
//! and exit phases, paint order, indicator labels and motion paths.

use crate::composition::{Composition, EditorMode};
use crate::keyframe::AnimatableProperty;
use crate::layer::{AnimationPreset, Layer, LayerId, Position};
use serde::{Deserialize, Serialize};

/// Entrance/exit state of a visible layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationPhase {
    /// Within the entrance window
    Entering(AnimationPreset),
    /// Within the exit window
    Exiting(AnimationPreset),
    /// Neither
    Steady,
}

/// Everything the renderer needs to draw one layer at the playhead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderState {
    /// Layer
    pub id: LayerId,
    /// Displayed x
    pub x: f32,
    /// Displayed y
    pub y: f32,
    /// Displayed scale
    pub scale: f32,
    /// Displayed rotation (degrees)
    pub rotation: f32,
    /// Displayed opacity
    pub opacity: f32,
    /// Whether the layer is drawn at all
    pub visible: bool,
    /// Entrance/exit phase
    pub phase: AnimationPhase,
}

/// Sampled trajectory of a keyframed layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionPath {
    /// Evenly spaced samples across the keyframe span
    pub points: Vec<Position>,
    /// Position at each x/y keyframe
    pub markers: Vec<Position>,
}

impl Composition {
    /// Value of a property as currently shown: keyframed in video mode, static in design mode
    pub fn displayed_value(&self, layer: &Layer, property: AnimatableProperty) -> f32 {
        match self.timeline.mode {
            EditorMode::Design => layer.base_value(property),
            EditorMode::Video => layer.value_at(property, self.timeline.current_time),
        }
    }

    /// Whether the playhead is inside the layer's window (always true in design mode)
    pub fn is_visible(&self, layer: &Layer) -> bool {
        match self.timeline.mode {
            EditorMode::Design => true,
            EditorMode::Video => {
                let time = self.timeline.current_time;
                time >= layer.start_time && time <= layer.end_time()
            }
        }
    }

    fn animation_phase(&self, layer: &Layer) -> AnimationPhase {
        if self.timeline.mode == EditorMode::Design {
            return AnimationPhase::Steady;
        }
        let time = self.timeline.current_time;
        if !layer.anim_in.is_none() && time - layer.start_time < layer.anim_in_duration {
            return AnimationPhase::Entering(layer.anim_in);
        }
        if !layer.anim_out.is_none() && layer.end_time() - time < layer.anim_out_duration {
            return AnimationPhase::Exiting(layer.anim_out);
        }
        AnimationPhase::Steady
    }

    /// Render state of a layer at the playhead
    pub fn render_state(&self, id: LayerId) -> Option<RenderState> {
        let layer = self.layer(id)?;
        let visible = self.is_visible(layer);
        let phase = if visible {
            self.animation_phase(layer)
        } else {
            AnimationPhase::Steady
        };

        Some(RenderState {
            id,
            x: self.displayed_value(layer, AnimatableProperty::X),
            y: self.displayed_value(layer, AnimatableProperty::Y),
            scale: self.displayed_value(layer, AnimatableProperty::Scale),
            rotation: self.displayed_value(layer, AnimatableProperty::Rotation),
            opacity: self.displayed_value(layer, AnimatableProperty::Opacity),
            visible,
            phase,
        })
    }

    /// Layer ids in paint order (lowest z first)
    pub fn render_order(&self) -> Vec<LayerId> {
        let mut order = self.stack_descending();
        order.reverse();
        order
    }

    /// Size readout for the scale handle, e.g. `"450 x 923"` or `"150%"`
    pub fn scale_label(&self, id: LayerId) -> Option<String> {
        let layer = self.layer(id)?;
        let scale = self.displayed_value(layer, AnimatableProperty::Scale);
        Some(match layer.base_dimensions() {
            Some((width, height)) => {
                format!("{} x {}", (width * scale).round() as i32, (height * scale).round() as i32)
            }
            None => format!("{}%", (scale * 100.0).round() as i32),
        })
    }

    /// Angle readout for the rotate handle, e.g. `"45°"`
    pub fn rotation_label(&self, id: LayerId) -> Option<String> {
        let layer = self.layer(id)?;
        let rotation = self.displayed_value(layer, AnimatableProperty::Rotation);
        Some(format!("{}\u{00B0}", rotation.round() as i32))
    }

    /// Trajectory of a layer with x or y keyframes
    pub fn motion_path(&self, id: LayerId) -> Option<MotionPath> {
        let layer = self.layer(id)?;
        let keyframes = &layer.keyframes;
        if !keyframes.drives(AnimatableProperty::X) && !keyframes.drives(AnimatableProperty::Y) {
            return None;
        }
        let (first, last) = keyframes.span()?;
        let position_at = |time: f32| {
            Position::new(
                layer.value_at(AnimatableProperty::X, time),
                layer.value_at(AnimatableProperty::Y, time),
            )
        };

        let samples = self.config.motion_path_samples;
        let points = if samples == 0 || last <= first {
            vec![position_at(first)]
        } else {
            let step = (last - first) / samples as f32;
            (0..=samples).map(|i| position_at(first + step * i as f32)).collect()
        };

        let markers = keyframes
            .iter()
            .filter(|k| matches!(k.property, AnimatableProperty::X | AnimatableProperty::Y))
            .map(|k| position_at(k.timestamp))
            .collect();

        Some(MotionPath { points, markers })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyframe::Keyframe;
    use crate::layer::{DeviceType, LayerPatch, OverlayKind};
    use crate::zorder::ReorderDirection;

    fn video_composition() -> (Composition, LayerId) {
        let mut composition = Composition::new();
        composition.timeline.mode = EditorMode::Video;
        let id = composition.add_frame(DeviceType::Iphone15);
        composition.update_layer(id, &LayerPatch::new().with_timing(1.0, 4.0));
        (composition, id)
    }

    #[test]
    fn test_visibility_window() {
        let (mut composition, id) = video_composition();
        let visible_at = |composition: &mut Composition, time: f32| {
            composition.timeline.current_time = time;
            composition.render_state(id).map(|s| s.visible)
        };

        assert_eq!(visible_at(&mut composition, 0.5), Some(false));
        assert_eq!(visible_at(&mut composition, 1.0), Some(true));
        assert_eq!(visible_at(&mut composition, 5.0), Some(true));
        assert_eq!(visible_at(&mut composition, 5.1), Some(false));

        composition.timeline.mode = EditorMode::Design;
        assert_eq!(visible_at(&mut composition, 9.0), Some(true));
        assert!(composition.render_state(LayerId::new()).is_none());
    }

    #[test]
    fn test_animation_phase() {
        let (mut composition, id) = video_composition();
        let phase_at = |composition: &mut Composition, time: f32| {
            composition.timeline.current_time = time;
            composition.render_state(id).map(|s| s.phase)
        };

        assert_eq!(phase_at(&mut composition, 1.2), Some(AnimationPhase::Steady));

        if let Some(layer) = composition.layer_mut(id) {
            layer.anim_in = AnimationPreset::FadeIn;
            layer.anim_out = AnimationPreset::SlideDown;
        }
        assert_eq!(
            phase_at(&mut composition, 1.2),
            Some(AnimationPhase::Entering(AnimationPreset::FadeIn))
        );
        assert_eq!(phase_at(&mut composition, 3.0), Some(AnimationPhase::Steady));
        assert_eq!(
            phase_at(&mut composition, 4.8),
            Some(AnimationPhase::Exiting(AnimationPreset::SlideDown))
        );

        composition.timeline.mode = EditorMode::Design;
        assert_eq!(phase_at(&mut composition, 1.2), Some(AnimationPhase::Steady));
    }

    #[test]
    fn test_render_values_follow_mode() {
        let (mut composition, id) = video_composition();
        if let Some(layer) = composition.layer_mut(id) {
            layer.keyframes.push(Keyframe::new(0.0, AnimatableProperty::Opacity, 0.0));
            layer.keyframes.push(Keyframe::new(2.0, AnimatableProperty::Opacity, 1.0));
        }
        composition.timeline.current_time = 1.0;
        let state = composition.render_state(id).expect("state");
        assert!((state.opacity - 0.5).abs() < 1e-5);
        assert_eq!((state.x, state.y), (50.0, 50.0));

        composition.timeline.mode = EditorMode::Design;
        assert_eq!(composition.render_state(id).map(|s| s.opacity), Some(1.0));
    }

    #[test]
    fn test_render_order_ascending() {
        let mut composition = Composition::new();
        let a = composition.add_frame(DeviceType::Iphone15);
        let b = composition.add_overlay(OverlayKind::Emoji, None);
        let c = composition.add_overlay(OverlayKind::Text, None);
        composition.reorder(a, ReorderDirection::Front);
        assert_eq!(composition.render_order(), vec![b, c, a]);
    }

    #[test]
    fn test_labels() {
        let mut composition = Composition::new();
        let frame = composition.add_frame(DeviceType::Iphone15);
        let text = composition.add_overlay(OverlayKind::Text, None);
        composition.update_layer(frame, &LayerPatch::new().with_scale(1.5).with_rotation(44.6));
        composition.update_layer(text, &LayerPatch::new().with_scale(0.756));

        assert_eq!(composition.scale_label(frame).as_deref(), Some("450 x 923"));
        assert_eq!(composition.scale_label(text).as_deref(), Some("76%"));
        assert_eq!(composition.rotation_label(frame).as_deref(), Some("45\u{00B0}"));
        assert!(composition.scale_label(LayerId::new()).is_none());
    }

    #[test]
    fn test_motion_path() {
        let (mut composition, id) = video_composition();
        assert!(composition.motion_path(id).is_none());

        if let Some(layer) = composition.layer_mut(id) {
            layer.keyframes.push(Keyframe::new(0.0, AnimatableProperty::X, 0.0));
            layer.keyframes.push(Keyframe::new(2.0, AnimatableProperty::X, 100.0));
            layer.keyframes.push(Keyframe::new(4.0, AnimatableProperty::Scale, 2.0));
        }

        let path = composition.motion_path(id).expect("path");
        assert_eq!(path.points.len(), 51);
        assert_eq!(path.points[0], Position::new(0.0, 50.0));
        assert!((path.points[25].x - 100.0).abs() < 1e-4);
        assert_eq!(path.points[50], Position::new(100.0, 50.0));
        assert_eq!(path.markers, vec![Position::new(0.0, 50.0), Position::new(100.0, 50.0)]);
    }

    #[test]
    fn test_motion_path_single_timestamp() {
        let (mut composition, id) = video_composition();
        if let Some(layer) = composition.layer_mut(id) {
            layer.keyframes.push(Keyframe::new(1.0, AnimatableProperty::Y, -10.0));
        }
        let path = composition.motion_path(id).expect("path");
        assert_eq!(path.points, vec![Position::new(50.0, -10.0)]);
        assert_eq!(path.markers.len(), 1);
    }
}
