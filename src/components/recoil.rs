//! Recoil animation state.
//!
//! Each shot starts a [`RecoilTask`] that runs for one fire interval. Every
//! tick the task samples the weapon's [`RecoilCurve`] at its progress and
//! pushes the weapon's visual offset back along local `-Z`. When the last
//! step has run the task finishes and clears the weapon's recoiling flag,
//! letting the recovery step ease the offset back to rest.
//!
//! Tasks are advanced by [`crate::systems::recoil::recoil_task_system`].
//!
//! # Restart policy
//!
//! A shot may land while the previous task is still running:
//! - [`RecoilRestart::Overlap`] keeps both. They tick independently, the
//!   newest writes the offset last, and whichever finishes first clears the
//!   recoiling flag.
//! - [`RecoilRestart::Supersede`] drops every in-flight task first.

use std::fmt;
use std::sync::Arc;

use bevy_ecs::prelude::Component;
use nalgebra::Vector3;
use smallvec::SmallVec;

use crate::components::easing::{Easing, ease};

/// Injected shaping function mapping progress in `[0, 1]` to a displacement
/// factor in `[0, 1]`.
#[derive(Clone)]
pub struct RecoilCurve {
    label: String,
    f: Arc<dyn Fn(f32) -> f32 + Send + Sync>,
}

impl RecoilCurve {
    pub fn from_easing(easing: Easing) -> Self {
        Self {
            label: easing.name().to_string(),
            f: Arc::new(move |t| ease(easing, t)),
        }
    }

    pub fn custom(label: impl Into<String>, f: impl Fn(f32) -> f32 + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            f: Arc::new(f),
        }
    }

    /// Sample the curve. Input and output are both clamped to `[0, 1]`.
    pub fn sample(&self, t: f32) -> f32 {
        (self.f)(t.clamp(0.0, 1.0)).clamp(0.0, 1.0)
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Default for RecoilCurve {
    fn default() -> Self {
        Self::from_easing(Easing::EaseInOut)
    }
}

impl fmt::Debug for RecoilCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecoilCurve").field(&self.label).finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecoilRestart {
    #[default]
    Overlap,
    Supersede,
}

impl RecoilRestart {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "overlap" => Some(RecoilRestart::Overlap),
            "supersede" => Some(RecoilRestart::Supersede),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RecoilRestart::Overlap => "overlap",
            RecoilRestart::Supersede => "supersede",
        }
    }
}

/// One running recoil animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecoilTask {
    pub elapsed: f32,
    pub duration: f32,
    /// Visual offset captured when the task started.
    pub origin: Vector3<f32>,
    pub active: bool,
}

/// Outcome of advancing a task by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecoilStep {
    /// The task wrote this offset and stays alive.
    Offset(Vector3<f32>),
    /// The task ran out of time this tick without writing.
    Finished,
}

impl RecoilTask {
    pub fn new(duration: f32, origin: Vector3<f32>) -> Self {
        Self {
            elapsed: 0.0,
            duration,
            origin,
            active: true,
        }
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            self.elapsed / self.duration
        }
    }

    /// Advance one tick.
    ///
    /// While `elapsed < duration` the offset is
    /// `origin − forward * recoil * curve(progress)` and `elapsed` then grows
    /// by `dt`. Once `elapsed ≥ duration` the task deactivates instead.
    pub fn step(&mut self, dt: f32, recoil: f32, curve: &RecoilCurve) -> RecoilStep {
        if !self.active || self.elapsed >= self.duration {
            self.active = false;
            return RecoilStep::Finished;
        }
        let kick = recoil * curve.sample(self.progress());
        let offset = self.origin - Vector3::z() * kick;
        self.elapsed += dt;
        RecoilStep::Offset(offset)
    }
}

/// In-flight recoil tasks of a weapon, oldest first.
#[derive(Component, Debug, Clone, Default)]
pub struct RecoilTasks {
    pub tasks: SmallVec<[RecoilTask; 2]>,
}

impl RecoilTasks {
    /// Start a task according to `restart`.
    pub fn start(&mut self, task: RecoilTask, restart: RecoilRestart) {
        if restart == RecoilRestart::Supersede {
            self.tasks.clear();
        }
        self.tasks.push(task);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
