use rand::Rng;

use crate::engine;
use crate::presets::Preset;
use crate::session::SessionFile;
use crate::settings::Settings;
use crate::signal::{self, SignalStats, MAX_SIGNAL_LENGTH, MIN_SIGNAL_LENGTH};
use crate::validation::{parse_signal_input, InputError};

// ─── Signal Selection ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalId {
    X,
    H,
}

impl SignalId {
    pub fn label(&self) -> &'static str {
        match self {
            SignalId::X => "x[n] - Input Signal",
            SignalId::H => "h[n] - Impulse Response",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            SignalId::X => "x[n]",
            SignalId::H => "h[n]",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" | "x[n]" => Some(SignalId::X),
            "h" | "h[n]" => Some(SignalId::H),
            _ => None,
        }
    }
}

// ─── Editor Session ────────────────────────────────────────────────────────────

/// Everything the signal editor knows: the two operands, their convolution,
/// which signal edits apply to, and whether a drag is in progress.
///
/// The output `y` is recomputed from scratch after every mutation, so it is
/// always `engine::convolve(x, h)`.
#[derive(Debug, Clone)]
pub struct EditorSession {
    x: Vec<f64>,
    h: Vec<f64>,
    y: Vec<f64>,
    n_points: usize,

    pub current: SignalId,
    pub dragging: bool,

    // Display options
    pub show_grid: bool,
    pub stem_plot: bool,

    pub status: String,
}

impl EditorSession {
    pub fn new(x: Vec<f64>, h: Vec<f64>, n_points: usize) -> Self {
        let mut session = Self {
            x,
            h,
            y: Vec::new(),
            n_points: n_points.clamp(MIN_SIGNAL_LENGTH, MAX_SIGNAL_LENGTH),
            current: SignalId::X,
            dragging: false,
            show_grid: true,
            stem_plot: true,
            status: "Ready - Select a signal to edit".to_string(),
        };
        session.y = engine::convolve(&session.x, &session.h);
        session
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut session = Self::new(
            settings.initial_x(),
            settings.initial_h(),
            settings.signal_length,
        );
        session.show_grid = settings.show_grid;
        session.stem_plot = settings.stem_plot;
        session
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn h(&self) -> &[f64] {
        &self.h
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn n_points(&self) -> usize {
        self.n_points
    }

    pub fn signal(&self, id: SignalId) -> &[f64] {
        match id {
            SignalId::X => &self.x,
            SignalId::H => &self.h,
        }
    }

    fn signal_mut(&mut self, id: SignalId) -> &mut Vec<f64> {
        match id {
            SignalId::X => &mut self.x,
            SignalId::H => &mut self.h,
        }
    }

    /// Recompute y[n] and refresh the status line.
    pub fn recompute(&mut self) {
        self.y = engine::convolve(&self.x, &self.h);
        self.status = format!(
            "Convolution computed: {} + {} - 1 = {} samples",
            self.x.len(),
            self.h.len(),
            self.y.len()
        );
    }

    pub fn select(&mut self, id: SignalId) {
        self.current = id;
        self.status = format!("Editing {}", id.label());
    }

    /// Current signal formatted for the manual-entry field
    pub fn input_text(&self) -> String {
        signal::format_values(self.signal(self.current))
    }

    pub fn stats(&self) -> SignalStats {
        SignalStats::of(self.signal(self.current))
    }

    // ── Edits ──

    pub fn apply_preset<R: Rng + ?Sized>(&mut self, preset: Preset, rng: &mut R) {
        let values = preset.generate(self.n_points, rng);
        *self.signal_mut(self.current) = values;
        self.recompute();
        self.status = format!("Applied {} preset to {}", preset, self.current.symbol());
    }

    /// Replace the selected signal from comma-separated text.
    ///
    /// On error nothing changes and the error is returned for the caller to
    /// report.
    pub fn apply_manual_input(&mut self, text: &str) -> Result<(), InputError> {
        let values = parse_signal_input(text, self.n_points)?;
        *self.signal_mut(self.current) = values;
        self.recompute();
        Ok(())
    }

    /// Change both signals' length, clamped to the editor's bounds.
    /// Returns the length actually applied.
    pub fn set_length(&mut self, new_length: usize) -> usize {
        let new_length = new_length.clamp(MIN_SIGNAL_LENGTH, MAX_SIGNAL_LENGTH);

        self.x = signal::resize_signal(&self.x, new_length);
        self.h = signal::resize_signal(&self.h, new_length);
        self.n_points = new_length;

        self.recompute();
        self.status = format!("Signal length updated to {}", self.n_points);
        new_length
    }

    pub fn swap_signals(&mut self) {
        std::mem::swap(&mut self.x, &mut self.h);
        self.recompute();
    }

    pub fn reverse_h(&mut self) {
        self.h = signal::reverse(&self.h);
        self.recompute();
    }

    /// Scale both signals into [-1, 1]
    pub fn normalize_signals(&mut self) {
        self.x = signal::normalize(&self.x);
        self.h = signal::normalize(&self.h);
        self.recompute();
    }

    // ── Drag editing ──
    //
    // A drag sets the sample nearest the pointer's horizontal position to the
    // pointer's value; halfway positions go to the even index. Positions
    // outside the signal are ignored.

    pub fn begin_drag(&mut self, id: SignalId, position: f64, value: f64) -> bool {
        self.dragging = true;
        self.current = id;
        self.set_sample_at(position, value)
    }

    pub fn drag_to(&mut self, position: f64, value: f64) -> bool {
        if !self.dragging {
            return false;
        }
        self.set_sample_at(position, value)
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    fn set_sample_at(&mut self, position: f64, value: f64) -> bool {
        if !position.is_finite() || !value.is_finite() {
            return false;
        }
        let rounded = position.round_ties_even();
        if rounded < 0.0 {
            return false;
        }
        let n = rounded as usize;
        let id = self.current;
        let Some(sample) = self.signal_mut(id).get_mut(n) else {
            return false;
        };
        *sample = value;
        self.recompute();
        true
    }

    // ── Persistence ──

    pub fn to_session(&self) -> SessionFile {
        SessionFile::new(self.x.clone(), self.h.clone(), self.n_points)
    }

    /// Replace both signals from a saved session. The stored length is
    /// clamped to the editor's bounds and both signals are fitted to it the
    /// same way a length change does.
    pub fn load_session(&mut self, session: SessionFile) {
        self.n_points = session
            .length()
            .clamp(MIN_SIGNAL_LENGTH, MAX_SIGNAL_LENGTH);
        self.x = signal::resize_signal(&session.x_signal, self.n_points);
        self.h = signal::resize_signal(&session.h_signal, self.n_points);
        self.recompute();
    }

    /// Signals handed to the step-by-step viewer
    pub fn step_viewer_signals(&self) -> (Vec<f64>, Vec<f64>) {
        (self.x.clone(), self.h.clone())
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}
