//! Graph Function Library and Animator
//!
//! Parametric surface functions `f(u, v, t) -> point` and the state machine
//! that morphs between them over time. This is the CPU core of the animated
//! point-cloud graph; uploading positions to the GPU and drawing them is a
//! renderer concern and lives elsewhere.
//!
//! Inputs u and v range over [-1, 1]; t is time in seconds.

use std::f32::consts::PI;

use glam::Vec3;
use rand::Rng;

/// The available parametric surface functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FunctionName {
    Wave,
    MultiWave,
    Ripple,
    Sphere,
    Torus,
}

impl FunctionName {
    pub const ALL: [FunctionName; 5] = [
        FunctionName::Wave,
        FunctionName::MultiWave,
        FunctionName::Ripple,
        FunctionName::Sphere,
        FunctionName::Torus,
    ];

    /// The next function in cycling order, wrapping after the last.
    pub fn next(self) -> FunctionName {
        let index = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// A uniformly random function other than `self`.
    pub fn random_other(self, rng: &mut impl Rng) -> FunctionName {
        let choice = Self::ALL[rng.gen_range(1..Self::ALL.len())];
        if choice == self { Self::ALL[0] } else { choice }
    }
}

/// Evaluate a surface function at (u, v) and time t.
pub fn evaluate(function: FunctionName, u: f32, v: f32, t: f32) -> Vec3 {
    match function {
        FunctionName::Wave => wave(u, v, t),
        FunctionName::MultiWave => multi_wave(u, v, t),
        FunctionName::Ripple => ripple(u, v, t),
        FunctionName::Sphere => sphere(u, v, t),
        FunctionName::Torus => torus(u, v, t),
    }
}

/// Blend two functions at the same sample point.
///
/// `progress` runs 0..1 and is smoothstepped, so a transition eases in
/// and out instead of snapping.
pub fn morph(
    u: f32,
    v: f32,
    t: f32,
    from: FunctionName,
    to: FunctionName,
    progress: f32,
) -> Vec3 {
    let p = progress.clamp(0.0, 1.0);
    let eased = p * p * (3.0 - 2.0 * p);
    evaluate(from, u, v, t).lerp(evaluate(to, u, v, t), eased)
}

fn wave(u: f32, v: f32, t: f32) -> Vec3 {
    Vec3::new(u, (PI * (u + v + t)).sin(), v)
}

fn multi_wave(u: f32, v: f32, t: f32) -> Vec3 {
    let mut y = (PI * (u + 0.5 * t)).sin();
    y += 0.5 * (2.0 * PI * (v + t)).sin();
    y += (PI * (u + v + 0.25 * t)).sin();
    Vec3::new(u, y * (1.0 / 2.5), v)
}

fn ripple(u: f32, v: f32, t: f32) -> Vec3 {
    let d = (u * u + v * v).sqrt();
    let y = (PI * (4.0 * d - t)).sin() / (1.0 + 10.0 * d);
    Vec3::new(u, y, v)
}

fn sphere(u: f32, v: f32, t: f32) -> Vec3 {
    let r = 0.9 + 0.1 * (PI * (6.0 * u + 4.0 * v + t)).sin();
    let s = r * (0.5 * PI * v).cos();
    Vec3::new(
        s * (PI * u).sin(),
        r * (0.5 * PI * v).sin(),
        s * (PI * u).cos(),
    )
}

fn torus(u: f32, v: f32, t: f32) -> Vec3 {
    let r1 = 0.7 + 0.1 * (PI * (6.0 * u + 0.5 * t)).sin();
    let r2 = 0.15 + 0.05 * (PI * (8.0 * u + 4.0 * v + 2.0 * t)).sin();
    let s = r1 + r2 * (PI * v).cos();
    Vec3::new(s * (PI * u).sin(), r2 * (PI * v).sin(), s * (PI * u).cos())
}

/// How the animator picks the next function when one finishes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransitionMode {
    #[default]
    Cycle,
    Random,
}

/// Clock-driven state machine that shows each function for a while, then
/// morphs into the next one.
#[derive(Clone, Debug)]
pub struct GraphAnimator {
    /// Seconds each function is displayed between transitions.
    pub function_duration: f32,
    /// Seconds a morph between two functions takes.
    pub transition_duration: f32,
    pub transition_mode: TransitionMode,

    function: FunctionName,
    transition_function: FunctionName,
    duration: f32,
    transitioning: bool,
}

impl Default for GraphAnimator {
    fn default() -> Self {
        Self {
            function_duration: 1.0,
            transition_duration: 1.0,
            transition_mode: TransitionMode::Cycle,
            function: FunctionName::Wave,
            transition_function: FunctionName::Wave,
            duration: 0.0,
            transitioning: false,
        }
    }
}

impl GraphAnimator {
    pub fn new(function: FunctionName) -> Self {
        Self {
            function,
            transition_function: function,
            ..Self::default()
        }
    }

    /// The function currently displayed (the morph target while
    /// transitioning).
    pub fn function(&self) -> FunctionName {
        self.function
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// Morph progress in 0..1, or 0 outside a transition.
    pub fn transition_progress(&self) -> f32 {
        if self.transitioning {
            (self.duration / self.transition_duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Advance the clock by `delta_time` seconds.
    pub fn update(&mut self, delta_time: f32) {
        self.duration += delta_time;
        if self.transitioning {
            if self.duration >= self.transition_duration {
                self.duration -= self.transition_duration;
                self.transitioning = false;
            }
        } else if self.duration >= self.function_duration {
            self.duration -= self.function_duration;
            self.transitioning = true;
            self.transition_function = self.function;
            self.function = match self.transition_mode {
                TransitionMode::Cycle => self.function.next(),
                TransitionMode::Random => self.function.random_other(&mut rand::thread_rng()),
            };
        }
    }

    /// Evaluate the displayed surface at (u, v) for time `t`, morphing
    /// when a transition is in flight.
    pub fn sample(&self, u: f32, v: f32, t: f32) -> Vec3 {
        if self.transitioning {
            morph(
                u,
                v,
                t,
                self.transition_function,
                self.function,
                self.duration / self.transition_duration,
            )
        } else {
            evaluate(self.function, u, v, t)
        }
    }
}
