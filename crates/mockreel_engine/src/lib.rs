// SPDX-License-Identifier: MIT OR Apache-2.0
//! Layer animation and manipulation engine for Mockreel.
//!
//! Mockreel composes device frames and overlays (text, emoji, shapes, media)
//! on a canvas and optionally animates them over a short timeline. This crate
//! holds everything below the pixels:
//! - Easing curves and per-property keyframe interpolation
//! - The layer model (frames and overlays in one collection, one z-order)
//! - Z-order reordering
//! - The canvas transform controller (move/scale/rotate with alignment guides)
//! - The timeline clip controller (move/resize with edge snapping)
//! - The playback clock and its async driver
//!
//! ## Architecture
//!
//! A [`Composition`] is the single owner of application state. An [`Editor`]
//! wraps it together with the one active-drag slot both controllers share.
//! Every on-canvas edit goes through the mode-aware property dispatcher, which
//! either writes static fields (design mode) or upserts keyframes at the
//! playhead (video mode).

pub mod composition;
pub mod config;
pub mod dispatch;
pub mod driver;
pub mod easing;
pub mod editor;
pub mod error;
pub mod keyframe;
pub mod layer;
pub mod media;
pub mod playback;
pub mod render;
pub mod spatial;
pub mod temporal;
pub mod zorder;

#[cfg(test)]
pub(crate) mod test_support;

pub use composition::{CanvasState, Composition, EditorMode, TimelineState};
pub use config::EngineConfig;
pub use driver::{PlaybackDriver, SharedEditor};
pub use easing::Easing;
pub use editor::{ActiveDrag, Editor};
pub use error::{EngineError, Result};
pub use keyframe::{interpolate, AnimatableProperty, Keyframe, KeyframeId, Keyframes};
pub use layer::{
    AnimationPreset, DeviceType, FramePayload, Layer, LayerId, LayerKind, LayerPatch,
    OverlayKind, OverlayPayload, OverlayStyle, Position, ShadowStyle,
};
pub use media::MediaSource;
pub use playback::{format_display_time, format_ruler_time, PlaybackClock, TickOutcome};
pub use render::{AnimationPhase, MotionPath, RenderState};
pub use spatial::{Corner, GuideOrientation, SnapGuide, SpatialDrag, SpatialMode, TransformBaseline};
pub use temporal::{ClipTiming, SnapPoints, TemporalDrag, TemporalMode, TimelineScale};
pub use zorder::ReorderDirection;
