// SPDX-License-Identifier: MIT OR Apache-2.0
//! Playback clock and transport controls.
//!
//! Each tick adds a fixed step to the playhead; there is no drift
//! compensation. Playback loops at the end of the last clip rather than at
//! the end of the timeline.

use crate::composition::Composition;
use std::time::Duration;

/// Slack used when comparing the playhead against the loop point, so that
/// accumulated float error never pushes the playhead past it.
const LOOP_EPSILON: f32 = 1e-4;

/// What a single playback tick did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Playhead moved to the contained time
    Advanced(f32),
    /// Playhead reached the loop point and went back to 0
    Wrapped,
    /// Playback is paused; nothing changed
    Idle,
}

impl Composition {
    /// Time at which playback wraps to 0
    pub fn loop_point(&self) -> f32 {
        let duration = self.timeline.duration;
        let content_end = self.max_end_time().unwrap_or(duration);
        duration.min(content_end.max(1.0))
    }

    /// Advance the playhead by one tick
    pub fn playback_tick(&mut self) -> TickOutcome {
        if !self.timeline.is_playing {
            return TickOutcome::Idle;
        }

        let loop_point = self.loop_point();
        if self.timeline.current_time >= loop_point - LOOP_EPSILON {
            self.timeline.current_time = 0.0;
            tracing::debug!("Playback wrapped at {:.2}s", loop_point);
            return TickOutcome::Wrapped;
        }

        self.timeline.current_time += self.config.tick_step;
        TickOutcome::Advanced(self.timeline.current_time)
    }

    /// Start playback from the current position
    pub fn play(&mut self) {
        if !self.timeline.is_playing {
            self.timeline.is_playing = true;
            tracing::debug!("Playback started at {:.2}s", self.timeline.current_time);
        }
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if self.timeline.is_playing {
            self.timeline.is_playing = false;
            tracing::debug!("Playback paused at {:.2}s", self.timeline.current_time);
        }
    }

    /// Toggle play/pause
    pub fn toggle_play(&mut self) {
        if self.timeline.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Move the playhead, clamped to the timeline
    pub fn seek(&mut self, time: f32) {
        self.timeline.current_time = time.clamp(0.0, self.timeline.duration.max(0.0));
    }

    /// Move the playhead to a fraction of the timeline (ruler click)
    pub fn seek_fraction(&mut self, fraction: f32) {
        self.seek(fraction.clamp(0.0, 1.0) * self.timeline.duration);
    }

    /// Pause and step one transport step back
    pub fn step_back(&mut self) {
        self.pause();
        self.seek(self.timeline.current_time - self.config.transport_step);
    }

    /// Pause and step one transport step forward
    pub fn step_forward(&mut self) {
        self.pause();
        self.seek(self.timeline.current_time + self.config.transport_step);
    }

    /// Jump to the start of the timeline
    pub fn go_to_start(&mut self) {
        self.timeline.current_time = 0.0;
    }

    /// Jump to the end of the timeline
    pub fn go_to_end(&mut self) {
        self.timeline.current_time = self.timeline.duration;
    }
}

/// Frame-driven tick scheduler.
///
/// Hosts that own their own update loop feed wall-clock deltas to
/// [`PlaybackClock::advance`]; ticks fire every `period` while the
/// composition is playing. Pausing drops any partially elapsed period.
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    period: Duration,
    elapsed: Duration,
    armed: bool,
}

impl PlaybackClock {
    /// Create a clock with the given tick period
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            elapsed: Duration::ZERO,
            armed: false,
        }
    }

    /// Create a clock using the composition's configured period
    pub fn for_composition(composition: &Composition) -> Self {
        Self::new(composition.config.tick_period)
    }

    /// Whether the clock is currently scheduling ticks
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Arm when playing, disarm (and reset) when paused
    pub fn sync(&mut self, is_playing: bool) {
        if self.armed != is_playing {
            self.armed = is_playing;
            self.elapsed = Duration::ZERO;
        }
    }

    /// Feed elapsed wall-clock time and run every tick that became due
    pub fn advance(&mut self, composition: &mut Composition, delta: Duration) -> Vec<TickOutcome> {
        self.sync(composition.timeline.is_playing);
        if !self.armed || self.period.is_zero() {
            return Vec::new();
        }

        self.elapsed += delta;
        let mut outcomes = Vec::new();
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            outcomes.push(composition.playback_tick());
        }
        outcomes
    }
}

/// Ruler label, `m:ss`
pub fn format_ruler_time(seconds: f32) -> String {
    let seconds = seconds.max(0.0);
    format!("{}:{:02}", (seconds / 60.0) as u32, (seconds % 60.0) as u32)
}

/// Playhead readout, `m:ss.cc`
pub fn format_display_time(seconds: f32) -> String {
    let centis = (seconds.max(0.0) * 100.0).round() as u32;
    format!("{}:{:02}.{:02}", centis / 6000, (centis / 100) % 60, centis % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{DeviceType, LayerPatch, OverlayKind};

    fn clips_ending_at_four() -> Composition {
        let mut composition = Composition::new();
        let a = composition.add_frame(DeviceType::Iphone15);
        let b = composition.add_overlay(OverlayKind::Text, None);
        composition.update_layer(a, &LayerPatch::new().with_timing(0.0, 3.0));
        composition.update_layer(b, &LayerPatch::new().with_timing(1.5, 2.5));
        composition
    }

    #[test]
    fn test_loop_point() {
        let mut composition = Composition::new();
        assert_eq!(composition.loop_point(), 10.0);

        let id = composition.add_frame(DeviceType::Iphone15);
        assert_eq!(composition.loop_point(), 5.0);

        composition.update_layer(id, &LayerPatch::new().with_timing(0.0, 0.4));
        assert_eq!(composition.loop_point(), 1.0);

        composition.update_layer(id, &LayerPatch::new().with_timing(8.0, 6.0));
        assert_eq!(composition.loop_point(), 10.0);
    }

    #[test]
    fn test_clock_loop() {
        crate::test_support::init_tracing();
        let mut composition = clips_ending_at_four();
        composition.play();

        let mut peak: f32 = 0.0;
        let mut wrapped_after = None;
        for tick in 1..=60 {
            match composition.playback_tick() {
                TickOutcome::Advanced(time) => peak = peak.max(time),
                TickOutcome::Wrapped => {
                    wrapped_after = Some(tick);
                    break;
                }
                TickOutcome::Idle => panic!("clock idle while playing"),
            }
        }

        assert_eq!(wrapped_after, Some(41));
        assert!((peak - 4.0).abs() < 1e-3, "peak {}", peak);
        assert_eq!(composition.timeline.current_time, 0.0);
    }

    #[test]
    fn test_tick_idle_when_paused() {
        let mut composition = clips_ending_at_four();
        assert_eq!(composition.playback_tick(), TickOutcome::Idle);
        assert_eq!(composition.timeline.current_time, 0.0);
    }

    #[test]
    fn test_clock_advance_fires_per_period() {
        let mut composition = clips_ending_at_four();
        let mut clock = PlaybackClock::for_composition(&composition);

        assert!(clock.advance(&mut composition, Duration::from_millis(500)).is_empty());
        assert!(!clock.is_armed());

        composition.play();
        let outcomes = clock.advance(&mut composition, Duration::from_millis(250));
        assert_eq!(outcomes.len(), 2);
        assert!(clock.is_armed());
        let outcomes = clock.advance(&mut composition, Duration::from_millis(60));
        assert_eq!(outcomes.len(), 1);
        assert!((composition.timeline.current_time - 0.3).abs() < 1e-5);

        composition.pause();
        assert!(clock.advance(&mut composition, Duration::from_millis(90)).is_empty());
        composition.play();
        assert!(clock.advance(&mut composition, Duration::from_millis(90)).is_empty());
        assert!((composition.timeline.current_time - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_transport() {
        let mut composition = Composition::new();
        composition.toggle_play();
        assert!(composition.timeline.is_playing);

        composition.seek(2.0);
        composition.step_forward();
        assert!(!composition.timeline.is_playing);
        assert!((composition.timeline.current_time - 2.1).abs() < 1e-5);

        composition.go_to_start();
        composition.step_back();
        assert_eq!(composition.timeline.current_time, 0.0);

        composition.go_to_end();
        composition.step_forward();
        assert_eq!(composition.timeline.current_time, 10.0);

        composition.seek_fraction(0.25);
        assert_eq!(composition.timeline.current_time, 2.5);
        composition.seek_fraction(3.0);
        assert_eq!(composition.timeline.current_time, 10.0);
        composition.seek(-4.0);
        assert_eq!(composition.timeline.current_time, 0.0);
    }

    #[test]
    fn test_time_formatting() {
        assert_eq!(format_ruler_time(0.0), "0:00");
        assert_eq!(format_ruler_time(9.7), "0:09");
        assert_eq!(format_ruler_time(75.0), "1:15");
        assert_eq!(format_display_time(0.0), "0:00.00");
        assert_eq!(format_display_time(3.25), "0:03.25");
        assert_eq!(format_display_time(61.5), "1:01.50");
    }
}
