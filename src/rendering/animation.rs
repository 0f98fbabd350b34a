use std::time::Instant;

use glam::{Quat, Vec4};

use crate::rendering::common::model::Frame;

/// Source of "milliseconds since playback started".
pub trait AnimationClock {
    fn elapsed_millis(&self) -> u64;
}

/// Wall clock, counting from its construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    started: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            started: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationClock for SystemClock {
    fn elapsed_millis(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

/// Always reports the same instant, e.g. for exports of a specific pose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl AnimationClock for FixedClock {
    fn elapsed_millis(&self) -> u64 {
        self.0
    }
}

/// A frozen clock sample, shared by every node of one traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct PlaybackTime {
    millis: u64,
}

impl PlaybackTime {
    pub fn from_millis(millis: u64) -> Self {
        PlaybackTime { millis }
    }

    /// Reads the clock once, no clock means the rest pose at time 0.
    pub fn snapshot(clock: Option<&dyn AnimationClock>) -> Self {
        PlaybackTime {
            millis: clock.map_or(0, |clock| clock.elapsed_millis()),
        }
    }

    pub fn millis(self) -> u64 {
        self.millis
    }
}

pub enum AnimationSampler {}

impl AnimationSampler {
    /// The time of the last frame, 0 for static nodes.
    pub fn loop_period(frames: &[Frame]) -> u32 {
        frames.last().map_or(0, |frame| frame.time)
    }

    /// The orientation of a keyframed node at `time`, looping over the last frame's time.
    ///
    /// Neighbouring frames are blended component wise and renormalized, which is not a slerp.
    /// Existing content is authored against exactly this behaviour.
    pub fn sample(frames: &[Frame], time: PlaybackTime) -> Quat {
        let Some(last) = frames.last() else {
            return Quat::IDENTITY;
        };

        if frames.len() == 1 || last.time == 0 {
            return normalize(Vec4::from(frames[0].rotation));
        }

        let position = (time.millis() % last.time as u64) as u32;
        // position < last.time, so there always is a later frame.
        let next = frames
            .iter()
            .position(|frame| frame.time > position)
            .unwrap_or(frames.len() - 1);
        let current = next.saturating_sub(1);
        let next = (current + 1) % frames.len();

        let (lower, upper) = (&frames[current], &frames[next]);
        let span = upper.time as f32 - lower.time as f32;
        let fraction = if span == 0.0 {
            0.0
        } else {
            (position as f32 - lower.time as f32) / span
        };

        normalize(Vec4::from(lower.rotation).lerp(Vec4::from(upper.rotation), fraction))
    }
}

fn normalize(quat: Vec4) -> Quat {
    let length = quat.length();
    if length <= f32::EPSILON || !length.is_finite() {
        return Quat::IDENTITY;
    }
    Quat::from_vec4(quat / length)
}
