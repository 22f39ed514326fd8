// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline clip drags: move and edge resize with snapping.
//!
//! The track maps pixels to seconds linearly. Clip edges snap to the timeline
//! bounds, to the edges of every other clip and, while resizing, to lengths
//! that match another clip's duration.

use crate::composition::Composition;
use crate::error::{EngineError, Result};
use crate::layer::LayerId;
use serde::{Deserialize, Serialize};

/// Which part of the clip was grabbed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemporalMode {
    /// Clip body; shifts the clip keeping its duration
    Move,
    /// Left edge; moves the start, keeping the end
    ResizeLeft,
    /// Right edge; moves the end, keeping the start
    ResizeRight,
}

impl TemporalMode {
    /// Whether this mode changes the clip duration
    pub fn is_resize(&self) -> bool {
        matches!(self, Self::ResizeLeft | Self::ResizeRight)
    }
}

/// Linear pixel/time mapping of a timeline track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineScale {
    pixels_per_second: f32,
    duration: f32,
}

impl TimelineScale {
    /// Build the mapping for a track of `track_width_px` showing `duration` seconds
    pub fn new(track_width_px: f32, duration: f32) -> Result<Self> {
        if duration.is_nan() || duration <= 0.0 {
            tracing::warn!("Refusing pixel/time mapping for timeline of {}s", duration);
            return Err(EngineError::DegenerateTimeline(duration));
        }
        if track_width_px.is_nan() || track_width_px <= 0.0 {
            tracing::warn!("Refusing pixel/time mapping for track of {}px", track_width_px);
            return Err(EngineError::InvalidTrackWidth(track_width_px));
        }
        Ok(Self {
            pixels_per_second: track_width_px / duration,
            duration,
        })
    }

    /// Pixels per second of timeline
    pub fn pixels_per_second(&self) -> f32 {
        self.pixels_per_second
    }

    /// Timeline length (seconds)
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Convert a pixel distance to seconds
    pub fn px_to_seconds(&self, px: f32) -> f32 {
        px / self.pixels_per_second
    }

    /// Convert seconds to a pixel distance
    pub fn seconds_to_px(&self, seconds: f32) -> f32 {
        seconds * self.pixels_per_second
    }
}

/// Candidate times a dragged clip edge may snap to
#[derive(Debug, Clone, PartialEq)]
pub struct SnapPoints {
    points: Vec<f32>,
    threshold: f32,
}

impl SnapPoints {
    /// Create from explicit points and a threshold in seconds
    pub fn new(points: Vec<f32>, threshold: f32) -> Self {
        Self { points, threshold }
    }

    /// Collect snap points for a drag of `drag` on `composition`
    pub fn collect(composition: &Composition, drag: &TemporalDrag, threshold: f32) -> Self {
        let mut points = vec![0.0, composition.timeline.duration];
        let fixed_start = drag.start_at_drag_start;
        let fixed_end = drag.start_at_drag_start + drag.duration_at_drag_start;

        for other in composition.layers().filter(|l| l.id != drag.layer_id) {
            points.push(other.start_time);
            points.push(other.end_time());
            match drag.mode {
                TemporalMode::ResizeRight => points.push(fixed_start + other.duration),
                TemporalMode::ResizeLeft => points.push(fixed_end - other.duration),
                TemporalMode::Move => {}
            }
        }

        Self::new(points, threshold)
    }

    /// Nearest point within the threshold of `target`
    pub fn find_closest(&self, target: f32) -> Option<f32> {
        self.points
            .iter()
            .copied()
            .map(|point| (point, (point - target).abs()))
            .filter(|&(_, distance)| distance < self.threshold)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(point, _)| point)
    }

    /// All candidate points
    pub fn points(&self) -> &[f32] {
        &self.points
    }

    /// Snap threshold (seconds)
    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

/// Resulting clip window of a drag step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipTiming {
    /// New start (seconds)
    pub start_time: f32,
    /// New duration (seconds)
    pub duration: f32,
}

/// An active timeline drag
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalDrag {
    /// Dragged clip
    pub layer_id: LayerId,
    /// Grabbed part
    pub mode: TemporalMode,
    /// Pointer x at drag start (track pixels)
    pub pointer_start_x: f32,
    /// Clip start when the drag began
    pub start_at_drag_start: f32,
    /// Clip duration when the drag began
    pub duration_at_drag_start: f32,
}

impl TemporalDrag {
    /// Start a drag on a clip
    pub fn begin(
        composition: &Composition,
        layer_id: LayerId,
        mode: TemporalMode,
        pointer_x: f32,
    ) -> Result<Self> {
        let layer = composition
            .layer(layer_id)
            .ok_or(EngineError::LayerNotFound(layer_id))?;
        Ok(Self {
            layer_id,
            mode,
            pointer_start_x: pointer_x,
            start_at_drag_start: layer.start_time,
            duration_at_drag_start: layer.duration,
        })
    }

    /// Compute the clip window for the pointer at `pointer_x`.
    ///
    /// Returns `Ok(None)` when a left-edge resize would leave the clip shorter
    /// than the minimum duration; the event is dropped in that case.
    pub fn compute(
        &self,
        composition: &Composition,
        pointer_x: f32,
        track_width_px: f32,
    ) -> Result<Option<ClipTiming>> {
        let global = composition.timeline.duration;
        let scale = TimelineScale::new(track_width_px, global)?;
        let min_duration = composition.config.min_clip_duration;
        let delta = scale.px_to_seconds(pointer_x - self.pointer_start_x);
        let threshold = scale.px_to_seconds(composition.config.snap_threshold_px);
        let snaps = SnapPoints::collect(composition, self, threshold);

        let start = self.start_at_drag_start;
        let duration = self.duration_at_drag_start;

        let timing = match self.mode {
            TemporalMode::Move => {
                let mut new_start = start + delta;
                if let Some(snap) = snaps.find_closest(new_start) {
                    new_start = snap;
                } else if let Some(snap) = snaps.find_closest(new_start + duration) {
                    new_start = snap - duration;
                }
                new_start = new_start.max(0.0);
                if new_start + duration > global {
                    new_start = global - duration;
                }
                ClipTiming {
                    start_time: new_start.max(0.0),
                    duration,
                }
            }
            TemporalMode::ResizeRight => {
                let mut end = start + duration + delta;
                if let Some(snap) = snaps.find_closest(end) {
                    end = snap;
                }
                let mut new_duration = (end - start).max(min_duration);
                if start + new_duration > global {
                    new_duration = global - start;
                }
                ClipTiming {
                    start_time: start,
                    duration: new_duration.max(min_duration),
                }
            }
            TemporalMode::ResizeLeft => {
                let mut new_start = start + delta;
                if let Some(snap) = snaps.find_closest(new_start) {
                    new_start = snap;
                }
                let new_start = new_start.max(0.0);
                let new_duration = duration - (new_start - start);
                if new_duration <= min_duration {
                    return Ok(None);
                }
                ClipTiming {
                    start_time: new_start,
                    duration: new_duration,
                }
            }
        };

        Ok(Some(timing))
    }
}
