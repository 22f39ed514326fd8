// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframe definitions and per-property interpolation.
//!
//! Keyframes are stored in insertion order and only sorted when a property is
//! evaluated. Each property animates on its own curve; there is no joint
//! easing across x and y.

use crate::easing::Easing;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a keyframe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyframeId(pub Uuid);

impl KeyframeId {
    /// Create a new random keyframe ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for KeyframeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Layer property that can carry keyframes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimatableProperty {
    /// Horizontal offset from canvas center
    X,
    /// Vertical offset from canvas center
    Y,
    /// Uniform scale
    Scale,
    /// Rotation in degrees
    Rotation,
    /// Opacity in [0, 1]
    Opacity,
}

impl AnimatableProperty {
    /// All animatable properties
    pub const ALL: [AnimatableProperty; 5] = [
        AnimatableProperty::X,
        AnimatableProperty::Y,
        AnimatableProperty::Scale,
        AnimatableProperty::Rotation,
        AnimatableProperty::Opacity,
    ];

    /// Wire name
    pub fn name(&self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Scale => "scale",
            Self::Rotation => "rotation",
            Self::Opacity => "opacity",
        }
    }
}

/// A timestamped target value for one property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Unique keyframe ID
    pub id: KeyframeId,
    /// Absolute time on the global timeline (seconds)
    pub timestamp: f32,
    /// Property this keyframe drives
    pub property: AnimatableProperty,
    /// Target value
    pub value: f32,
    /// Easing used on the segment that ends at this keyframe
    pub easing: Easing,
}

impl Keyframe {
    /// Create a new linear keyframe
    pub fn new(timestamp: f32, property: AnimatableProperty, value: f32) -> Self {
        Self {
            id: KeyframeId::new(),
            timestamp,
            property,
            value,
            easing: Easing::Linear,
        }
    }

    /// Set easing
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

/// Linear interpolation between two floats
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Effective value of `property` at `time`.
///
/// Returns `base` when no keyframe drives the property. Outside the keyframed
/// range the nearest keyframe's value holds. Inside, the segment is eased with
/// the easing of its end keyframe.
pub fn interpolate(
    base: f32,
    keyframes: &[Keyframe],
    time: f32,
    property: AnimatableProperty,
) -> f32 {
    let mut track: Vec<&Keyframe> = keyframes.iter().filter(|k| k.property == property).collect();
    track.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

    let (Some(first), Some(last)) = (track.first(), track.last()) else {
        return base;
    };

    if time <= first.timestamp {
        return first.value;
    }
    if time >= last.timestamp {
        return last.value;
    }

    for pair in track.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        if time >= start.timestamp && time < end.timestamp {
            let progress = (time - start.timestamp) / (end.timestamp - start.timestamp);
            return lerp(start.value, end.value, end.easing.apply(progress));
        }
    }

    base
}

/// Keyframes of one layer, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keyframes(Vec<Keyframe>);

impl Keyframes {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a keyframe
    pub fn push(&mut self, keyframe: Keyframe) {
        self.0.push(keyframe);
    }

    /// Insert or update the keyframe for `property` at `time`.
    ///
    /// A keyframe of the same property within `epsilon` seconds is overwritten
    /// in place (value only); otherwise a new keyframe with `easing` is appended.
    pub fn upsert(
        &mut self,
        property: AnimatableProperty,
        time: f32,
        value: f32,
        epsilon: f32,
        easing: Easing,
    ) -> KeyframeId {
        if let Some(existing) = self
            .0
            .iter_mut()
            .find(|k| k.property == property && (k.timestamp - time).abs() < epsilon)
        {
            existing.value = value;
            return existing.id;
        }

        let keyframe = Keyframe::new(time, property, value).with_easing(easing);
        let id = keyframe.id;
        self.0.push(keyframe);
        id
    }

    /// Evaluate one property
    pub fn evaluate(&self, base: f32, time: f32, property: AnimatableProperty) -> f32 {
        interpolate(base, &self.0, time, property)
    }

    /// First keyframe (any property) within `window` seconds of `time`
    pub fn find_near(&self, time: f32, window: f32) -> Option<&Keyframe> {
        self.0.iter().find(|k| (k.timestamp - time).abs() < window)
    }

    /// Get keyframe by ID
    pub fn keyframe(&self, id: KeyframeId) -> Option<&Keyframe> {
        self.0.iter().find(|k| k.id == id)
    }

    /// Get mutable keyframe by ID
    pub fn keyframe_mut(&mut self, id: KeyframeId) -> Option<&mut Keyframe> {
        self.0.iter_mut().find(|k| k.id == id)
    }

    /// Remove a keyframe
    pub fn remove(&mut self, id: KeyframeId) {
        self.0.retain(|k| k.id != id);
    }

    /// Remove every keyframe
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Whether any keyframe drives `property`
    pub fn drives(&self, property: AnimatableProperty) -> bool {
        self.0.iter().any(|k| k.property == property)
    }

    /// Earliest and latest timestamp over all properties
    pub fn span(&self) -> Option<(f32, f32)> {
        let mut iter = self.0.iter().map(|k| k.timestamp);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t))))
    }

    /// Keyframes of one property, in insertion order
    pub fn for_property(&self, property: AnimatableProperty) -> impl Iterator<Item = &Keyframe> {
        self.0.iter().filter(move |k| k.property == property)
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Keyframe> {
        self.0.iter()
    }

    /// All keyframes as a slice
    pub fn as_slice(&self) -> &[Keyframe] {
        &self.0
    }

    /// Get keyframe count
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Keyframe>> for Keyframes {
    fn from(keyframes: Vec<Keyframe>) -> Self {
        Self(keyframes)
    }
}
