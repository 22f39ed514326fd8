// SPDX-License-Identifier: MIT OR Apache-2.0
//! On-canvas transform drags (move, corner scale, rotate).
//!
//! A drag records the pointer position and the layer's displayed transform
//! when it starts. Every pointer move is turned into an absolute update from
//! that baseline, so rounding never accumulates across events.

use crate::composition::Composition;
use crate::error::{EngineError, Result};
use crate::keyframe::AnimatableProperty;
use crate::layer::{LayerId, LayerPatch};
use serde::{Deserialize, Serialize};

/// Corner scale handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Corner {
    /// Top-left handle
    TopLeft,
    /// Top-right handle
    TopRight,
    /// Bottom-left handle
    BottomLeft,
    /// Bottom-right handle
    BottomRight,
}

impl Corner {
    /// +1 when dragging right grows the layer from this corner
    pub fn x_factor(&self) -> f32 {
        match self {
            Self::TopRight | Self::BottomRight => 1.0,
            Self::TopLeft | Self::BottomLeft => -1.0,
        }
    }

    /// +1 when dragging down grows the layer from this corner
    pub fn y_factor(&self) -> f32 {
        match self {
            Self::BottomLeft | Self::BottomRight => 1.0,
            Self::TopLeft | Self::TopRight => -1.0,
        }
    }
}

/// What the pointer grabbed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpatialMode {
    /// Layer body
    Move,
    /// Scale handle; `None` behaves like the bottom-right corner
    Scale {
        /// Grabbed corner
        corner: Option<Corner>,
    },
    /// Rotate handle
    Rotate,
}

/// Displayed transform captured when a drag starts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformBaseline {
    /// Horizontal offset
    pub x: f32,
    /// Vertical offset
    pub y: f32,
    /// Scale
    pub scale: f32,
    /// Rotation in degrees
    pub rotation: f32,
}

/// Guide line orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideOrientation {
    /// Vertical line at an x coordinate
    Vertical,
    /// Horizontal line at a y coordinate
    Horizontal,
}

/// Transient alignment hint; never constrains the dragged value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapGuide {
    /// Line orientation
    pub orientation: GuideOrientation,
    /// Coordinate relative to canvas center
    pub position: f32,
}

/// An active canvas drag
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialDrag {
    /// Dragged layer
    pub layer_id: LayerId,
    /// Grabbed handle
    pub mode: SpatialMode,
    /// Pointer position at drag start (screen space)
    pub pointer_start: [f32; 2],
    /// Displayed transform at drag start
    pub baseline: TransformBaseline,
}

impl SpatialDrag {
    /// Start a drag, capturing the transform as currently displayed
    pub fn begin(
        composition: &Composition,
        layer_id: LayerId,
        mode: SpatialMode,
        pointer: [f32; 2],
    ) -> Result<Self> {
        let layer = composition
            .layer(layer_id)
            .ok_or(EngineError::LayerNotFound(layer_id))?;

        let baseline = TransformBaseline {
            x: composition.displayed_value(layer, AnimatableProperty::X),
            y: composition.displayed_value(layer, AnimatableProperty::Y),
            scale: composition.displayed_value(layer, AnimatableProperty::Scale),
            rotation: composition.displayed_value(layer, AnimatableProperty::Rotation),
        };

        Ok(Self {
            layer_id,
            mode,
            pointer_start: pointer,
            baseline,
        })
    }

    /// Pointer travel since drag start, in canvas units
    pub fn canvas_delta(&self, pointer: [f32; 2], zoom: f32) -> (f32, f32) {
        (
            (pointer[0] - self.pointer_start[0]) / zoom,
            (pointer[1] - self.pointer_start[1]) / zoom,
        )
    }

    /// Compute the update for a pointer move.
    ///
    /// Returns the patch to push through the property dispatcher and the
    /// alignment guides to show (only non-empty for moves).
    pub fn update(&self, composition: &Composition, pointer: [f32; 2]) -> (LayerPatch, Vec<SnapGuide>) {
        let zoom = composition.canvas.zoom;
        let config = &composition.config;
        let (dx, dy) = self.canvas_delta(pointer, zoom);

        match self.mode {
            SpatialMode::Move => {
                let x = self.baseline.x + dx;
                let y = self.baseline.y + dy;
                let threshold = config.guide_threshold_px / zoom;
                let guides = alignment_guides(composition, self.layer_id, x, y, threshold);
                (LayerPatch::new().with_position(x, y), guides)
            }
            SpatialMode::Scale { corner } => {
                let (x_factor, y_factor) = corner.map_or((1.0, 1.0), |c| (c.x_factor(), c.y_factor()));
                let change = dx * x_factor + dy * y_factor;
                let scale = (self.baseline.scale + change * config.scale_sensitivity).max(config.min_scale);
                (LayerPatch::new().with_scale(scale), Vec::new())
            }
            SpatialMode::Rotate => {
                let rotation = self.baseline.rotation + dx;
                (LayerPatch::new().with_rotation(rotation), Vec::new())
            }
        }
    }
}

/// Guides for a layer moved to `(x, y)`: canvas center lines plus the
/// displayed x/y of every other layer within `threshold`.
pub fn alignment_guides(
    composition: &Composition,
    moving: LayerId,
    x: f32,
    y: f32,
    threshold: f32,
) -> Vec<SnapGuide> {
    let mut guides: Vec<SnapGuide> = Vec::new();
    let mut push = |orientation: GuideOrientation, position: f32| {
        let guide = SnapGuide { orientation, position };
        if !guides.contains(&guide) {
            guides.push(guide);
        }
    };

    if x.abs() < threshold {
        push(GuideOrientation::Vertical, 0.0);
    }
    if y.abs() < threshold {
        push(GuideOrientation::Horizontal, 0.0);
    }

    for other in composition.layers().filter(|l| l.id != moving) {
        let other_x = composition.displayed_value(other, AnimatableProperty::X);
        let other_y = composition.displayed_value(other, AnimatableProperty::Y);
        if (x - other_x).abs() < threshold {
            push(GuideOrientation::Vertical, other_x);
        }
        if (y - other_y).abs() < threshold {
            push(GuideOrientation::Horizontal, other_y);
        }
    }

    guides
}
