//! Scrubbable animation timelines.
//!
//! A [`Timeline`] is an ordered set of eased tweens over camera and texture
//! properties that share one normalized position in `[0, 1]`. Navigation
//! input moves the position; the timeline never advances on its own. Tween
//! start times and durations only set the relative pacing of the tracks.
//!
//! Every interpolator returns its endpoints exactly at 0 and 1, so seeking a
//! timeline to 0 restores the recorded start state bit for bit.

use crate::camera::{look_at_rotation, Stage};
use crate::scene::SceneId;
use glam::{Quat, Vec2, Vec3};
use std::cell::Cell;
use std::rc::Rc;

/// Easing curves, named after their usual timeline-library counterparts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ease {
    Linear,
    Power1In,
    #[default]
    Power1Out,
    Power1InOut,
    Power2InOut,
    Power3Out,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Ease::Linear => t,
            Ease::Power1In => t * t,
            Ease::Power1Out => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::Power1InOut => in_out(t, 2),
            Ease::Power2InOut => in_out(t, 3),
            Ease::Power3Out => 1.0 - (1.0 - t).powi(4),
        }
    }
}

fn in_out(t: f32, power: i32) -> f32 {
    if t < 0.5 {
        0.5 * (2.0 * t).powi(power)
    } else {
        1.0 - 0.5 * (2.0 * (1.0 - t)).powi(power)
    }
}

#[inline]
fn mix_f32(from: f32, to: f32, t: f32) -> f32 {
    if t <= 0.0 {
        from
    } else if t >= 1.0 {
        to
    } else {
        from + (to - from) * t
    }
}

#[inline]
fn mix_vec2(from: Vec2, to: Vec2, t: f32) -> Vec2 {
    if t <= 0.0 {
        from
    } else if t >= 1.0 {
        to
    } else {
        from.lerp(to, t)
    }
}

#[inline]
fn mix_vec3(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    if t <= 0.0 {
        from
    } else if t >= 1.0 {
        to
    } else {
        from.lerp(to, t)
    }
}

#[inline]
fn mix_quat(from: Quat, to: Quat, t: f32) -> Quat {
    if t <= 0.0 {
        from
    } else if t >= 1.0 {
        to
    } else {
        from.slerp(to, t)
    }
}

/// How the camera turns while it moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Facing {
    /// Orientation is left alone.
    Keep,
    Slerp { from: Quat, to: Quat },
    /// Turn from `from` until the camera faces `focus` from wherever it is.
    Towards { from: Quat, focus: Vec3 },
}

impl Facing {
    fn orientation_at(&self, position: Vec3, t: f32) -> Option<Quat> {
        match *self {
            Facing::Keep => None,
            Facing::Slerp { from, to } => Some(mix_quat(from, to, t)),
            Facing::Towards { from, focus } => {
                if t <= 0.0 {
                    Some(from)
                } else {
                    Some(mix_quat(from, look_at_rotation(position, focus), t))
                }
            }
        }
    }
}

/// Circular path around `center` in the XZ plane, with height and radius
/// blended along the way.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitPath {
    pub center: Vec3,
    pub origin: Vec3,
    pub from_angle: f32,
    pub to_angle: f32,
    pub from_radius: f32,
    pub to_radius: f32,
    pub from_height: f32,
    pub to_height: f32,
}

impl OrbitPath {
    /// Orbit starting exactly at `origin` and ending at the given bearing.
    pub fn from_origin(center: Vec3, origin: Vec3, to_angle: f32, to_radius: f32, to_height: f32) -> Self {
        let rel = origin - center;
        let from_angle = rel.z.atan2(rel.x);
        // take the short way round
        let mut delta = (to_angle - from_angle).rem_euclid(std::f32::consts::TAU);
        if delta > std::f32::consts::PI {
            delta -= std::f32::consts::TAU;
        }
        Self {
            center,
            origin,
            from_angle,
            to_angle: from_angle + delta,
            from_radius: Vec2::new(rel.x, rel.z).length(),
            to_radius,
            from_height: rel.y,
            to_height,
        }
    }

    pub fn position_at(&self, t: f32) -> Vec3 {
        if t <= 0.0 {
            return self.origin;
        }
        let angle = mix_f32(self.from_angle, self.to_angle, t);
        let radius = mix_f32(self.from_radius, self.to_radius, t);
        let height = mix_f32(self.from_height, self.to_height, t);
        self.center + Vec3::new(radius * angle.cos(), height, radius * angle.sin())
    }

    pub fn end(&self) -> Vec3 {
        self.position_at(1.0)
    }
}

/// One animated property.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Track {
    /// Straight camera move.
    Move { from: Vec3, to: Vec3, facing: Facing },
    /// Camera travels along an orbit.
    Orbit { path: OrbitPath, facing: Facing },
    Fov { from: f32, to: f32 },
    TextureOffset { scene: SceneId, from: Vec2, to: Vec2 },
    TextureRepeat { scene: SceneId, from: Vec2, to: Vec2 },
    /// Pure delay.
    Hold,
}

const CH_POSITION: u8 = 1;
const CH_ORIENTATION: u8 = 1 << 1;
const CH_FOV: u8 = 1 << 2;
const CH_TEX_OFFSET: u8 = 1 << 3;
const CH_TEX_REPEAT: u8 = 1 << 4;

impl Track {
    fn channels(&self) -> u8 {
        match self {
            Track::Move { facing, .. } | Track::Orbit { facing, .. } => {
                if matches!(facing, Facing::Keep) {
                    CH_POSITION
                } else {
                    CH_POSITION | CH_ORIENTATION
                }
            }
            Track::Fov { .. } => CH_FOV,
            Track::TextureOffset { .. } => CH_TEX_OFFSET,
            Track::TextureRepeat { .. } => CH_TEX_REPEAT,
            Track::Hold => 0,
        }
    }

    fn apply(&self, t: f32, stage: &mut Stage) {
        match self {
            Track::Move { from, to, facing } => {
                let position = mix_vec3(*from, *to, t);
                stage.camera.position = position;
                if let Some(q) = facing.orientation_at(position, t) {
                    stage.camera.orientation = q;
                }
            }
            Track::Orbit { path, facing } => {
                let position = path.position_at(t);
                stage.camera.position = position;
                if let Some(q) = facing.orientation_at(position, t) {
                    stage.camera.orientation = q;
                }
            }
            Track::Fov { from, to } => stage.camera.fov = mix_f32(*from, *to, t),
            Track::TextureOffset { scene, from, to } => {
                stage.texture_mut(*scene).offset = mix_vec2(*from, *to, t)
            }
            Track::TextureRepeat { scene, from, to } => {
                stage.texture_mut(*scene).repeat = mix_vec2(*from, *to, t)
            }
            Track::Hold => {}
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub track: Track,
    pub start: f32,
    pub duration: f32,
    pub ease: Ease,
}

impl Tween {
    fn local(&self, time: f32) -> f32 {
        if self.duration <= 0.0 {
            return if time >= self.start { 1.0 } else { 0.0 };
        }
        ((time - self.start) / self.duration).clamp(0.0, 1.0)
    }
}

/// Shared flag that stops a timeline from moving once raised.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle(Rc<Cell<bool>>);

impl CancelHandle {
    /// Stop all tweening on the owning timeline.
    pub fn cleanup(&self) {
        self.0.set(true);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimelineStatus {
    Running,
    Completed,
    Cancelled,
}

/// Default tween length, in timeline seconds.
pub const DEFAULT_TWEEN_DURATION: f32 = 0.5;

#[derive(Clone, Debug)]
pub struct Timeline {
    tweens: Vec<Tween>,
    leads: Vec<bool>,
    cursor: f32,
    last_start: f32,
    duration: f32,
    position: f32,
    reversed: bool,
    handle: CancelHandle,
}

impl Timeline {
    /// Empty timeline. A reversed timeline starts at position 1 and completes
    /// at 0.
    pub fn new(reversed: bool) -> Self {
        Self {
            tweens: Vec::new(),
            leads: Vec::new(),
            cursor: 0.0,
            last_start: 0.0,
            duration: 0.0,
            position: if reversed { 1.0 } else { 0.0 },
            reversed,
            handle: CancelHandle::default(),
        }
    }

    fn push(&mut self, track: Track, start: f32, duration: f32, ease: Ease) {
        let channels = track.channels();
        let claimed = self
            .tweens
            .iter()
            .fold(0u8, |acc, t| acc | t.track.channels());
        self.leads.push(channels & !claimed != 0);
        self.tweens.push(Tween {
            track,
            start,
            duration,
            ease,
        });
        self.last_start = start;
        self.cursor = self.cursor.max(start + duration);
        self.duration = self.duration.max(start + duration);
    }

    /// Append a tween after everything added so far.
    pub fn to(mut self, track: Track, duration: f32, ease: Ease) -> Self {
        let start = self.cursor;
        self.push(track, start, duration, ease);
        self
    }

    /// Add a tween that starts together with the previous one.
    pub fn with_previous(mut self, track: Track, duration: f32, ease: Ease) -> Self {
        let start = self.last_start;
        self.push(track, start, duration, ease);
        self
    }

    pub fn delay(self, duration: f32) -> Self {
        self.to(Track::Hold, duration, Ease::Linear)
    }

    #[inline]
    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    /// Total length in timeline seconds.
    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Normalized position in `[0, 1]`.
    #[inline]
    pub fn position(&self) -> f32 {
        self.position
    }

    #[inline]
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    pub fn handle(&self) -> CancelHandle {
        self.handle.clone()
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.handle.is_cancelled()
    }

    pub fn seek(&mut self, position: f32) {
        self.position = position.clamp(0.0, 1.0);
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        if self.reversed {
            self.position <= 0.0
        } else {
            self.position >= 1.0
        }
    }

    /// Move the position by `delta` (positive is towards zoomed-in).
    pub fn advance(&mut self, delta: f32) -> TimelineStatus {
        if self.is_cancelled() {
            return TimelineStatus::Cancelled;
        }
        self.seek(self.position + delta);
        if self.is_complete() {
            TimelineStatus::Completed
        } else {
            TimelineStatus::Running
        }
    }

    /// Write every track's value at the current position.
    pub fn apply(&self, stage: &mut Stage) {
        if self.is_cancelled() {
            return;
        }
        let time = self.position * self.duration;
        for (tween, lead) in self.tweens.iter().zip(&self.leads) {
            if time < tween.start && !*lead {
                continue;
            }
            let t = tween.ease.apply(tween.local(time));
            tween.track.apply(t, stage);
        }
    }
}
