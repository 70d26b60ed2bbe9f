// ============================================================================
// ANIMATION.RS - Step-by-Step Walkthrough Controller
// ============================================================================
//
// The walkthrough shows the convolution sum one output index at a time:
// x[k], the flipped and shifted kernel h[n-k], their products, and the
// output computed so far.
//
// STATES:
//   Stopped --play--> Playing
//   Playing --pause / reset / go_to_end / last step reached--> Stopped
//
// TIMING:
// The controller has no timer. Whoever drives it calls tick() every
// step_delay() and stops calling once the state is Stopped. At speed 1.0
// that is one step per second.
// ============================================================================

use std::time::Duration;

use crate::engine::{self, StepState};
use crate::signal::clean_signal;

/// Slowest allowed playback multiplier
pub const MIN_SPEED: f64 = 0.2;

/// Fastest allowed playback multiplier
pub const MAX_SPEED: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
}

/// Everything needed to draw one step of the walkthrough
#[derive(Debug, Clone, PartialEq)]
pub struct StepFrame {
    /// Output index being computed
    pub n: usize,

    /// Total output samples
    pub output_length: usize,

    /// Products and their sum at n
    pub state: StepState,

    /// The reversed kernel slid to n, as (k, h[n-k])
    pub kernel: Vec<(isize, f64)>,

    /// y[0..=n]
    pub computed: Vec<f64>,
}

impl StepFrame {
    /// "y[2] = Σ x[k] × h[2-k] = 1.300"
    pub fn equation(&self) -> String {
        format!(
            "y[{n}] = Σ x[k] × h[{n}-k] = {:.3}",
            self.state.sum,
            n = self.n
        )
    }

    /// Expanded sum over the overlap window:
    /// "y[1] = x[0]·h[1] + x[1]·h[0] = 1.000·0.300 + 2.000·0.500 = 1.300"
    pub fn expanded_equation(&self, x: &[f64], h: &[f64]) -> String {
        let terms = self.state.contributing();
        if terms.is_empty() {
            return format!("y[{}] = 0.000", self.n);
        }

        let symbolic: Vec<String> = terms
            .iter()
            .map(|(k, _)| format!("x[{}]·h[{}]", k, self.n - k))
            .collect();
        let numeric: Vec<String> = terms
            .iter()
            .map(|(k, _)| format!("{:.3}·{:.3}", x[*k], h[self.n - k]))
            .collect();

        format!(
            "y[{}] = {} = {} = {:.3}",
            self.n,
            symbolic.join(" + "),
            numeric.join(" + "),
            self.state.sum
        )
    }

    /// "Step 3/5: Computing y[2]"
    pub fn step_label(&self) -> String {
        format!(
            "Step {}/{}: Computing y[{}]",
            self.n + 1,
            self.output_length,
            self.n
        )
    }
}

/// Drives the walkthrough: current index, play/stop state, and speed.
#[derive(Debug, Clone)]
pub struct AnimationController {
    x: Vec<f64>,
    h: Vec<f64>,
    output_length: usize,
    current_n: usize,
    state: PlaybackState,
    speed: f64,
}

impl AnimationController {
    /// Build a walkthrough for `x` and `h`. Trailing zeros are trimmed first
    /// so the animation doesn't spend steps on silent padding.
    pub fn new(x: &[f64], h: &[f64]) -> Self {
        let x = clean_signal(x);
        let h = clean_signal(h);
        let output_length = engine::output_length(x.len(), h.len());
        Self {
            x,
            h,
            output_length,
            current_n: 0,
            state: PlaybackState::Stopped,
            speed: 1.0,
        }
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn h(&self) -> &[f64] {
        &self.h
    }

    pub fn output_length(&self) -> usize {
        self.output_length
    }

    pub fn current_n(&self) -> usize {
        self.current_n
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    fn last_index(&self) -> usize {
        self.output_length.saturating_sub(1)
    }

    pub fn is_at_end(&self) -> bool {
        self.current_n >= self.last_index()
    }

    /// Set the speed multiplier, clamped to [MIN_SPEED, MAX_SPEED].
    /// Non-finite values are ignored.
    pub fn set_speed(&mut self, speed: f64) -> f64 {
        if speed.is_finite() {
            self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        }
        self.speed
    }

    /// Delay between automatic steps at the current speed
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis((1000.0 / self.speed) as u64)
    }

    // ── Navigation ──

    /// Move forward one step. Returns false at the last step.
    pub fn next_step(&mut self) -> bool {
        if self.current_n < self.last_index() {
            self.current_n += 1;
            true
        } else {
            false
        }
    }

    /// Move back one step. Returns false at the first step.
    pub fn previous_step(&mut self) -> bool {
        if self.current_n > 0 {
            self.current_n -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to an index, clamped to the output range
    pub fn go_to(&mut self, n: usize) {
        self.current_n = n.min(self.last_index());
    }

    /// Stop and return to the first step
    pub fn reset(&mut self) {
        self.pause();
        self.current_n = 0;
    }

    /// Stop and jump to the last step
    pub fn go_to_end(&mut self) {
        self.pause();
        self.current_n = self.last_index();
    }

    // ── Playback ──

    /// Start playing from the current step. At the last step the first
    /// tick stops playback again without moving.
    pub fn play(&mut self) {
        self.state = PlaybackState::Playing;
    }

    pub fn pause(&mut self) {
        self.state = PlaybackState::Stopped;
    }

    pub fn toggle(&mut self) {
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Stopped => self.play(),
        }
    }

    /// One timer callback: advance while playing and stop on the last step.
    /// Returns true if the index moved.
    pub fn tick(&mut self) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        let moved = self.next_step();
        if self.is_at_end() {
            self.pause();
        }
        moved
    }

    /// Progress through the walkthrough, 0 to 100. A single-step walkthrough
    /// is always complete.
    pub fn progress_percent(&self) -> usize {
        if self.last_index() == 0 {
            return 100;
        }
        self.current_n * 100 / self.last_index()
    }

    /// Frame for the current step
    pub fn frame(&self) -> StepFrame {
        self.frame_at(self.current_n)
    }

    /// Frame for any step, without moving the controller
    pub fn frame_at(&self, n: usize) -> StepFrame {
        let n = n.min(self.last_index());
        StepFrame {
            n,
            output_length: self.output_length,
            state: engine::step(&self.x, &self.h, n),
            kernel: engine::flipped_and_shifted(&self.h, n),
            computed: engine::partial(&self.x, &self.h, n),
        }
    }
}
