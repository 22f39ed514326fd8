// SPDX-License-Identifier: MIT OR Apache-2.0
//! Engine error type.
//!
//! Most engine operations are total: unknown ids are ignored and out-of-range
//! values are clamped. Errors only surface where a gesture is started or a
//! pixel/time mapping has to be built.

use crate::layer::LayerId;

/// Error type for engine operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// Layer not found
    #[error("Layer not found: {0:?}")]
    LayerNotFound(LayerId),

    /// Timeline duration is zero or negative
    #[error("Timeline duration must be positive, got {0}s")]
    DegenerateTimeline(f32),

    /// Timeline track has no usable width
    #[error("Track width must be positive, got {0}px")]
    InvalidTrackWidth(f32),

    /// Another drag already holds the active-drag slot
    #[error("A drag is already in progress")]
    DragInProgress,

    /// Pointer event arrived with no matching drag active
    #[error("No active drag")]
    NoActiveDrag,

    /// Playback driver was started outside a tokio runtime
    #[error("Playback driver requires a tokio runtime")]
    RuntimeUnavailable,
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
