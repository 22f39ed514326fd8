// SPDX-License-Identifier: MIT OR Apache-2.0
//! Layer model: device frames and overlays sharing one shape.
//!
//! Both layer variants carry the same transform, timing and keyframe fields;
//! they differ only in their payload, kept in [`LayerKind`].

use crate::keyframe::{AnimatableProperty, Keyframes};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a layer (unique across frames and overlays)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(pub Uuid);

impl LayerId {
    /// Create a new random layer ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LayerId {
    fn default() -> Self {
        Self::new()
    }
}

/// Offset from the canvas center, in un-zoomed canvas units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal offset
    pub x: f32,
    /// Vertical offset (down is positive)
    pub y: f32,
}

impl Position {
    /// Create a position
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Position shifted by the same amount on both axes
    pub fn offset(self, by: f32) -> Self {
        Self::new(self.x + by, self.y + by)
    }
}

/// Device frame model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceType {
    /// iPhone 15 Pro
    #[serde(rename = "iphone-15")]
    Iphone15,
    /// MacBook Air
    MacbookAir,
    /// Browser window chrome
    BrowserWindow,
    /// iPad Pro
    IpadPro,
    /// Apple Watch
    AppleWatch,
    /// Galaxy S24
    SamsungGalaxy,
    /// Galaxy S24 Ultra
    SamsungGalaxyUltra,
}

impl DeviceType {
    /// Display name, also used as the default layer name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Iphone15 => "iPhone 15 Pro",
            Self::MacbookAir => "MacBook Air",
            Self::BrowserWindow => "Chrome Browser",
            Self::IpadPro => "iPad Pro",
            Self::AppleWatch => "Apple Watch",
            Self::SamsungGalaxy => "Galaxy S24",
            Self::SamsungGalaxyUltra => "S24 Ultra",
        }
    }

    /// Screen aspect ratio (width / height)
    pub fn aspect_ratio(&self) -> f32 {
        match self {
            Self::Iphone15 | Self::SamsungGalaxy | Self::SamsungGalaxyUltra => 9.0 / 19.5,
            Self::MacbookAir => 16.0 / 10.0,
            Self::BrowserWindow => 16.0 / 9.0,
            Self::IpadPro => 4.0 / 3.0,
            Self::AppleWatch => 1.0 / 1.25,
        }
    }

    /// Unscaled frame size in canvas units, where known
    pub fn base_dimensions(&self) -> Option<(f32, f32)> {
        match self {
            Self::Iphone15 => Some((300.0, 615.0)),
            Self::MacbookAir => Some((720.0, 424.0)),
            Self::BrowserWindow => Some((600.0, 380.0)),
            Self::IpadPro => Some((480.0, 640.0)),
            Self::AppleWatch => Some((180.0, 220.0)),
            Self::SamsungGalaxy | Self::SamsungGalaxyUltra => None,
        }
    }
}

/// Overlay content kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayKind {
    /// Text block
    Text,
    /// Single emoji
    Emoji,
    /// Vector shape, named by its content string
    Shape,
    /// Still image
    Image,
    /// Video clip
    Video,
}

impl OverlayKind {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Emoji => "Emoji",
            Self::Shape => "Shape",
            Self::Image => "Image",
            Self::Video => "Video",
        }
    }

    /// Content used when none is supplied
    pub fn default_content(&self) -> &'static str {
        match self {
            Self::Text => "Double Click",
            Self::Emoji => "\u{1F525}",
            Self::Shape | Self::Image | Self::Video => "rect",
        }
    }

    /// Initial scale for a new overlay of this kind
    pub fn default_scale(&self) -> f32 {
        match self {
            Self::Image | Self::Video => 0.5,
            Self::Text | Self::Emoji | Self::Shape => 1.0,
        }
    }
}

/// Drop shadow applied around a device frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowStyle {
    /// No shadow
    None,
    /// Soft drop shadow
    #[default]
    Soft,
    /// Hard offset shadow
    Hard,
    /// Lifted, floating shadow
    Floating,
}

/// Entrance/exit animation preset, rendered by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationPreset {
    /// No animation
    #[default]
    None,
    /// Fade in
    FadeIn,
    /// Fade out
    FadeOut,
    /// Shake
    Shake,
    /// Zoom in
    ZoomIn,
    /// Zoom out
    ZoomOut,
    /// Slide up
    SlideUp,
    /// Slide down
    SlideDown,
    /// Pulse
    Pulse,
}

impl AnimationPreset {
    /// Presets offered for entrances
    pub const ENTRANCES: [AnimationPreset; 6] = [
        AnimationPreset::None,
        AnimationPreset::FadeIn,
        AnimationPreset::ZoomIn,
        AnimationPreset::SlideUp,
        AnimationPreset::Shake,
        AnimationPreset::Pulse,
    ];

    /// Presets offered for exits
    pub const EXITS: [AnimationPreset; 4] = [
        AnimationPreset::None,
        AnimationPreset::FadeOut,
        AnimationPreset::ZoomOut,
        AnimationPreset::SlideDown,
    ];

    /// Whether this preset animates at all
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Text and fill styling for overlays
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayStyle {
    /// Text color
    pub color: Option<String>,
    /// Fill color
    pub background_color: Option<String>,
    /// Font size
    pub font_size: Option<f32>,
    /// Font weight
    pub font_weight: Option<String>,
    /// Font family
    pub font_family: Option<String>,
    /// Corner radius
    pub border_radius: Option<f32>,
}

impl OverlayStyle {
    /// Default style for a new overlay of `kind`
    pub fn for_kind(kind: OverlayKind) -> Self {
        match kind {
            OverlayKind::Shape => Self {
                background_color: Some("#3b82f6".to_string()),
                border_radius: Some(20.0),
                ..Self::default()
            },
            OverlayKind::Text | OverlayKind::Emoji | OverlayKind::Image | OverlayKind::Video => Self {
                color: Some("#ffffff".to_string()),
                font_size: Some(32.0),
                ..Self::default()
            },
        }
    }
}

/// Payload of a device frame layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FramePayload {
    /// Device model
    pub device: DeviceType,
    /// Media shown on the device screen
    pub content_url: Option<String>,
    /// Whether the screen media is a video
    pub is_video: bool,
    /// Drop shadow
    pub shadow: ShadowStyle,
}

/// Payload of an overlay layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayPayload {
    /// Overlay kind
    pub kind: OverlayKind,
    /// Text, emoji, shape name or media URL
    pub content: String,
    /// Styling
    pub style: OverlayStyle,
}

/// Kind-specific layer payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "layerType", rename_all = "camelCase")]
pub enum LayerKind {
    /// Device frame
    Frame(FramePayload),
    /// Overlay
    Overlay(OverlayPayload),
}

/// A positioned, time-windowed, animatable visual element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    /// Unique layer ID
    pub id: LayerId,
    /// User-facing label
    pub name: String,
    /// Offset from canvas center
    pub position: Position,
    /// Uniform scale
    pub scale: f32,
    /// Rotation in degrees (not wrapped)
    pub rotation: f32,
    /// Opacity in [0, 1]
    pub opacity: f32,
    /// Paint order, ascending
    pub z_index: i32,
    /// Start of the visible window (seconds)
    pub start_time: f32,
    /// Length of the visible window (seconds)
    pub duration: f32,
    /// Entrance preset
    pub anim_in: AnimationPreset,
    /// Entrance length (seconds)
    pub anim_in_duration: f32,
    /// Exit preset
    pub anim_out: AnimationPreset,
    /// Exit length (seconds)
    pub anim_out_duration: f32,
    /// Keyframes, in insertion order
    pub keyframes: Keyframes,
    /// Frame or overlay payload
    pub kind: LayerKind,
}

impl Layer {
    fn with_kind(name: String, kind: LayerKind) -> Self {
        Self {
            id: LayerId::new(),
            name,
            position: Position::default(),
            scale: 1.0,
            rotation: 0.0,
            opacity: 1.0,
            z_index: 1,
            start_time: 0.0,
            duration: 5.0,
            anim_in: AnimationPreset::None,
            anim_in_duration: 0.5,
            anim_out: AnimationPreset::None,
            anim_out_duration: 0.5,
            keyframes: Keyframes::new(),
            kind,
        }
    }

    /// Create a device frame with default transform and timing
    pub fn frame(device: DeviceType) -> Self {
        Self::with_kind(
            device.name().to_string(),
            LayerKind::Frame(FramePayload {
                device,
                content_url: None,
                is_video: false,
                shadow: ShadowStyle::Soft,
            }),
        )
    }

    /// Create an overlay; `content` falls back to the kind's default
    pub fn overlay(kind: OverlayKind, content: Option<&str>) -> Self {
        let mut layer = Self::with_kind(
            format!("{} Layer", kind.name()),
            LayerKind::Overlay(OverlayPayload {
                kind,
                content: content.unwrap_or(kind.default_content()).to_string(),
                style: OverlayStyle::for_kind(kind),
            }),
        );
        layer.scale = kind.default_scale();
        layer
    }

    /// Set position
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = Position::new(x, y);
        self
    }

    /// Set the visible window
    pub fn with_timing(mut self, start_time: f32, duration: f32) -> Self {
        self.start_time = start_time;
        self.duration = duration;
        self
    }

    /// Whether this is a device frame
    pub fn is_frame(&self) -> bool {
        matches!(self.kind, LayerKind::Frame(_))
    }

    /// Whether this is an overlay
    pub fn is_overlay(&self) -> bool {
        matches!(self.kind, LayerKind::Overlay(_))
    }

    /// End of the visible window
    pub fn end_time(&self) -> f32 {
        self.start_time + self.duration
    }

    /// Stored (un-animated) value of a property
    pub fn base_value(&self, property: AnimatableProperty) -> f32 {
        match property {
            AnimatableProperty::X => self.position.x,
            AnimatableProperty::Y => self.position.y,
            AnimatableProperty::Scale => self.scale,
            AnimatableProperty::Rotation => self.rotation,
            AnimatableProperty::Opacity => self.opacity,
        }
    }

    /// Keyframed value of a property at `time`
    pub fn value_at(&self, property: AnimatableProperty, time: f32) -> f32 {
        self.keyframes.evaluate(self.base_value(property), time, property)
    }

    /// Unscaled size used by the scale indicator
    pub fn base_dimensions(&self) -> Option<(f32, f32)> {
        match &self.kind {
            LayerKind::Frame(frame) => frame.device.base_dimensions(),
            LayerKind::Overlay(overlay) if overlay.kind == OverlayKind::Shape => {
                Some((100.0, 100.0))
            }
            LayerKind::Overlay(_) => None,
        }
    }

    /// Shallow-merge a patch into this layer.
    ///
    /// Payload fields that do not apply to this layer's kind are ignored.
    pub fn apply(&mut self, patch: &LayerPatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(scale) = patch.scale {
            self.scale = scale;
        }
        if let Some(rotation) = patch.rotation {
            self.rotation = rotation;
        }
        if let Some(opacity) = patch.opacity {
            self.opacity = opacity;
        }
        if let Some(z_index) = patch.z_index {
            self.z_index = z_index;
        }
        if let Some(start_time) = patch.start_time {
            self.start_time = start_time;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(anim_in) = patch.anim_in {
            self.anim_in = anim_in;
        }
        if let Some(anim_in_duration) = patch.anim_in_duration {
            self.anim_in_duration = anim_in_duration;
        }
        if let Some(anim_out) = patch.anim_out {
            self.anim_out = anim_out;
        }
        if let Some(anim_out_duration) = patch.anim_out_duration {
            self.anim_out_duration = anim_out_duration;
        }
        if let Some(keyframes) = &patch.keyframes {
            self.keyframes.clone_from(keyframes);
        }

        match &mut self.kind {
            LayerKind::Frame(frame) => {
                if let Some(shadow) = patch.shadow {
                    frame.shadow = shadow;
                }
            }
            LayerKind::Overlay(overlay) => {
                if let Some(content) = &patch.content {
                    overlay.content.clone_from(content);
                }
                if let Some(style) = &patch.style {
                    overlay.style.clone_from(style);
                }
            }
        }
    }
}

/// Partial layer update; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerPatch {
    /// New name
    pub name: Option<String>,
    /// New position (animatable as x and y)
    pub position: Option<Position>,
    /// New scale (animatable)
    pub scale: Option<f32>,
    /// New rotation (animatable)
    pub rotation: Option<f32>,
    /// New opacity (animatable)
    pub opacity: Option<f32>,
    /// New z-index
    pub z_index: Option<i32>,
    /// New start time
    pub start_time: Option<f32>,
    /// New duration
    pub duration: Option<f32>,
    /// New entrance preset
    pub anim_in: Option<AnimationPreset>,
    /// New entrance length
    pub anim_in_duration: Option<f32>,
    /// New exit preset
    pub anim_out: Option<AnimationPreset>,
    /// New exit length
    pub anim_out_duration: Option<f32>,
    /// Replacement keyframe set
    pub keyframes: Option<Keyframes>,
    /// New overlay content
    pub content: Option<String>,
    /// New overlay style
    pub style: Option<OverlayStyle>,
    /// New frame shadow
    pub shadow: Option<ShadowStyle>,
}

impl LayerPatch {
    /// Create an empty patch
    pub fn new() -> Self {
        Self::default()
    }

    /// Set name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set position
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = Some(Position::new(x, y));
        self
    }

    /// Set scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Set rotation
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = Some(rotation);
        self
    }

    /// Set opacity
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Set the visible window
    pub fn with_timing(mut self, start_time: f32, duration: f32) -> Self {
        self.start_time = Some(start_time);
        self.duration = Some(duration);
        self
    }

    /// Set overlay content
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Split off the animatable fields.
    ///
    /// Returns the `(property, value)` pairs for position (as x and y), scale,
    /// rotation and opacity, and the patch with those fields removed.
    pub fn split_animatable(mut self) -> (Vec<(AnimatableProperty, f32)>, LayerPatch) {
        let mut animated = Vec::new();
        if let Some(position) = self.position.take() {
            animated.push((AnimatableProperty::X, position.x));
            animated.push((AnimatableProperty::Y, position.y));
        }
        if let Some(scale) = self.scale.take() {
            animated.push((AnimatableProperty::Scale, scale));
        }
        if let Some(rotation) = self.rotation.take() {
            animated.push((AnimatableProperty::Rotation, rotation));
        }
        if let Some(opacity) = self.opacity.take() {
            animated.push((AnimatableProperty::Opacity, opacity));
        }
        (animated, self)
    }
}
