// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor session: the composition plus the one active-drag slot.
//!
//! Canvas and timeline drags share a single slot, so at most one gesture is
//! in flight at any time. Pointer-up always returns the slot to idle.

use crate::composition::Composition;
use crate::driver::SharedEditor;
use crate::error::{EngineError, Result};
use crate::layer::{LayerId, LayerPatch};
use crate::spatial::{SnapGuide, SpatialDrag, SpatialMode};
use crate::temporal::{ClipTiming, TemporalDrag, TemporalMode};
use parking_lot::Mutex;
use std::sync::Arc;

/// Current drag operation
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ActiveDrag {
    /// No drag in progress
    #[default]
    Idle,
    /// Canvas transform drag
    Spatial(SpatialDrag),
    /// Timeline clip drag
    Temporal(TemporalDrag),
}

impl ActiveDrag {
    /// Whether no drag is in progress
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Layer being dragged
    pub fn layer_id(&self) -> Option<LayerId> {
        match self {
            Self::Idle => None,
            Self::Spatial(drag) => Some(drag.layer_id),
            Self::Temporal(drag) => Some(drag.layer_id),
        }
    }
}

/// Composition plus transient interaction state
#[derive(Debug, Default)]
pub struct Editor {
    /// Application state
    pub composition: Composition,
    drag: ActiveDrag,
    guides: Vec<SnapGuide>,
}

impl Editor {
    /// Create an editor over a composition
    pub fn new(composition: Composition) -> Self {
        Self {
            composition,
            drag: ActiveDrag::Idle,
            guides: Vec::new(),
        }
    }

    /// Wrap into a shared handle for the playback driver and callbacks
    pub fn into_shared(self) -> SharedEditor {
        Arc::new(Mutex::new(self))
    }

    /// Current drag
    pub fn active_drag(&self) -> &ActiveDrag {
        &self.drag
    }

    /// Alignment guides to draw for the current canvas drag
    pub fn guides(&self) -> &[SnapGuide] {
        &self.guides
    }

    /// Start a canvas drag on a layer and select it
    pub fn begin_spatial_drag(&mut self, id: LayerId, mode: SpatialMode, pointer: [f32; 2]) -> Result<()> {
        if !self.drag.is_idle() {
            return Err(EngineError::DragInProgress);
        }
        let drag = SpatialDrag::begin(&self.composition, id, mode, pointer)?;
        self.composition.select(id);
        tracing::debug!("Canvas drag started on {:?} ({:?})", id, mode);
        self.drag = ActiveDrag::Spatial(drag);
        Ok(())
    }

    /// Feed a pointer move to the canvas drag
    pub fn spatial_pointer_move(&mut self, pointer: [f32; 2]) -> Result<()> {
        let ActiveDrag::Spatial(drag) = &self.drag else {
            return Err(EngineError::NoActiveDrag);
        };
        let (patch, guides) = drag.update(&self.composition, pointer);
        let id = drag.layer_id;

        self.guides = guides;
        self.composition.apply_property_update(id, patch);
        Ok(())
    }

    /// Start a timeline drag on a clip and select it
    pub fn begin_temporal_drag(&mut self, id: LayerId, mode: TemporalMode, pointer_x: f32) -> Result<()> {
        if !self.drag.is_idle() {
            return Err(EngineError::DragInProgress);
        }
        let drag = TemporalDrag::begin(&self.composition, id, mode, pointer_x)?;
        self.composition.select(id);
        tracing::debug!("Timeline drag started on {:?} ({:?})", id, mode);
        self.drag = ActiveDrag::Temporal(drag);
        Ok(())
    }

    /// Feed a pointer move to the timeline drag.
    ///
    /// Timing is written directly, never keyframed. Returns the applied
    /// window, or `None` when the event was dropped.
    pub fn temporal_pointer_move(&mut self, pointer_x: f32, track_width_px: f32) -> Result<Option<ClipTiming>> {
        let ActiveDrag::Temporal(drag) = &self.drag else {
            return Err(EngineError::NoActiveDrag);
        };
        let timing = drag.compute(&self.composition, pointer_x, track_width_px)?;
        let id = drag.layer_id;

        if let Some(timing) = timing {
            self.composition
                .update_layer(id, &LayerPatch::new().with_timing(timing.start_time, timing.duration));
        }
        Ok(timing)
    }

    /// End whatever drag is in progress
    pub fn pointer_up(&mut self) {
        let finished = std::mem::take(&mut self.drag);
        self.guides.clear();
        if let Some(id) = finished.layer_id() {
            tracing::debug!("Drag ended on {:?}", id);
        }
    }
}
