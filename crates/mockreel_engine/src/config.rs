// SPDX-License-Identifier: MIT OR Apache-2.0
//! Engine tuning constants.

use crate::easing::Easing;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunable constants for the controllers and the playback clock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Keyframes of one property closer than this (seconds) are the same keyframe
    pub keyframe_merge_epsilon: f32,
    /// Window (seconds) around the playhead used to find the editable keyframe
    pub active_keyframe_window: f32,
    /// Easing given to keyframes created by a drag
    pub default_keyframe_easing: Easing,
    /// Alignment guide threshold in screen pixels (divided by zoom)
    pub guide_threshold_px: f32,
    /// Scale change per canvas unit of corner drag
    pub scale_sensitivity: f32,
    /// Smallest allowed layer scale
    pub min_scale: f32,
    /// Clip edge snap threshold in timeline pixels
    pub snap_threshold_px: f32,
    /// Shortest allowed clip duration (seconds)
    pub min_clip_duration: f32,
    /// Wall-clock period of a playback tick
    pub tick_period: Duration,
    /// Timeline seconds added per playback tick
    pub tick_step: f32,
    /// Canvas offset applied to both axes of a duplicated layer
    pub duplicate_offset: f32,
    /// Seconds moved by the step back/forward transport actions
    pub transport_step: f32,
    /// Number of intervals sampled along a motion path
    pub motion_path_samples: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            keyframe_merge_epsilon: 0.05,
            active_keyframe_window: 0.1,
            default_keyframe_easing: Easing::EaseInOut,
            guide_threshold_px: 10.0,
            scale_sensitivity: 0.005,
            min_scale: 0.1,
            snap_threshold_px: 15.0,
            min_clip_duration: 0.2,
            tick_period: Duration::from_millis(100),
            tick_step: 0.1,
            duplicate_offset: 20.0,
            transport_step: 0.1,
            motion_path_samples: 50,
        }
    }
}
