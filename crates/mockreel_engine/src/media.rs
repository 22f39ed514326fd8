// SPDX-License-Identifier: MIT OR Apache-2.0
//! Attaching ingested media to layers.

use crate::composition::Composition;
use crate::layer::{LayerId, LayerKind};
use serde::{Deserialize, Serialize};

/// Playable media produced by the ingestion collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MediaSource {
    /// Still image
    Image {
        /// Playable URL
        url: String,
    },
    /// Video clip
    Video {
        /// Playable URL
        url: String,
        /// Measured length in seconds, when known
        duration: Option<f32>,
    },
}

impl MediaSource {
    /// Playable URL
    pub fn url(&self) -> &str {
        match self {
            Self::Image { url } | Self::Video { url, .. } => url,
        }
    }

    /// Whether this is a video
    pub fn is_video(&self) -> bool {
        matches!(self, Self::Video { .. })
    }
}

impl Composition {
    /// Put media on a layer; unknown ids are ignored.
    ///
    /// A video with a measured duration also sets the clip length, and grows
    /// the timeline (rounded up to whole seconds) if the clip would overrun it.
    pub fn attach_media(&mut self, id: LayerId, source: MediaSource) {
        let Some(layer) = self.layer_mut(id) else {
            return;
        };

        match &mut layer.kind {
            LayerKind::Frame(frame) => {
                frame.content_url = Some(source.url().to_string());
                frame.is_video = source.is_video();
            }
            LayerKind::Overlay(overlay) => {
                overlay.content = source.url().to_string();
            }
        }

        let MediaSource::Video { duration: Some(duration), .. } = source else {
            return;
        };
        layer.duration = duration;
        let end = layer.end_time();

        if end > self.timeline.duration {
            let extended = end.ceil();
            tracing::info!(
                "Extending timeline from {}s to {}s for media on {:?}",
                self.timeline.duration,
                extended,
                id
            );
            self.timeline.duration = extended;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{DeviceType, LayerPatch, OverlayKind};

    #[test]
    fn test_image_on_frame() {
        let mut composition = Composition::new();
        let id = composition.add_frame(DeviceType::IpadPro);
        composition.attach_media(id, MediaSource::Image { url: "blob:shot".into() });

        let layer = composition.layer(id).expect("layer");
        let LayerKind::Frame(frame) = &layer.kind else {
            panic!("expected frame");
        };
        assert_eq!(frame.content_url.as_deref(), Some("blob:shot"));
        assert!(!frame.is_video);
        assert_eq!(layer.duration, 5.0);
    }

    #[test]
    fn test_long_video_extends_timeline() {
        crate::test_support::init_tracing();
        let mut composition = Composition::new();
        let id = composition.add_overlay(OverlayKind::Video, None);
        composition.update_layer(id, &LayerPatch::new().with_timing(2.0, 5.0));

        composition.attach_media(
            id,
            MediaSource::Video {
                url: "blob:clip".into(),
                duration: Some(9.3),
            },
        );

        let layer = composition.layer(id).expect("layer");
        assert_eq!(layer.duration, 9.3);
        let LayerKind::Overlay(overlay) = &layer.kind else {
            panic!("expected overlay");
        };
        assert_eq!(overlay.content, "blob:clip");
        assert_eq!(composition.timeline.duration, 12.0);
    }

    #[test]
    fn test_short_video_keeps_timeline() {
        let mut composition = Composition::new();
        let id = composition.add_frame(DeviceType::Iphone15);
        composition.attach_media(
            id,
            MediaSource::Video {
                url: "blob:clip".into(),
                duration: Some(3.0),
            },
        );
        assert_eq!(composition.timeline.duration, 10.0);

        composition.attach_media(
            id,
            MediaSource::Video {
                url: "blob:other".into(),
                duration: None,
            },
        );
        assert_eq!(composition.layer(id).map(|l| l.duration), Some(3.0));
    }
}
