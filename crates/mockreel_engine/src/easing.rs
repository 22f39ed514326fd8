// SPDX-License-Identifier: MIT OR Apache-2.0
//! Easing curves applied to keyframe segment progress.

use serde::{Deserialize, Serialize};

/// Easing curve used when approaching a keyframe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    /// Constant speed
    #[default]
    Linear,
    /// Quadratic acceleration
    EaseIn,
    /// Quadratic deceleration
    EaseOut,
    /// Accelerate then decelerate
    EaseInOut,
    /// Bounce-out
    Bounce,
    /// Elastic-out (overshoots before settling)
    Elastic,
}

impl Easing {
    /// All easing kinds, in picker order
    pub const ALL: [Easing; 6] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::Bounce,
        Easing::Elastic,
    ];

    /// Parse a wire name; unknown names fall back to linear
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|easing| easing.name() == name)
            .unwrap_or(Easing::Linear)
    }

    /// Wire name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseIn => "easeIn",
            Self::EaseOut => "easeOut",
            Self::EaseInOut => "easeInOut",
            Self::Bounce => "bounce",
            Self::Elastic => "elastic",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Linear => "Linear",
            Self::EaseIn => "Smooth In",
            Self::EaseOut => "Smooth Out",
            Self::EaseInOut => "Smooth In/Out",
            Self::Bounce => "Bounce",
            Self::Elastic => "Elastic",
        }
    }

    /// Map progress in [0, 1] to eased progress
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => t * (2.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Self::Bounce => bounce(t),
            Self::Elastic => elastic(t),
        }
    }
}

fn bounce(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

fn elastic(t: f32) -> f32 {
    if t == 0.0 || t == 1.0 {
        return t;
    }
    let c4 = (2.0 * std::f32::consts::PI) / 3.0;
    2.0_f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * c4).sin() + 1.0
}
