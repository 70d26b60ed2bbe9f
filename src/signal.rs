// ============================================================================
// SIGNAL.RS - Signal Helpers
// ============================================================================
//
// Signals are plain Vec<f64> sample buffers indexed from 0. This module holds
// the edits the editor applies to them (resize, normalize, reverse), the
// cleanup applied when a signal is handed to the step viewer, and the
// summary statistics shown next to the selected signal.
// ============================================================================

/// Shortest signal the editor allows
pub const MIN_SIGNAL_LENGTH: usize = 3;

/// Longest signal the editor allows
pub const MAX_SIGNAL_LENGTH: usize = 50;

/// Remove trailing zeros.
///
/// An all-zero signal keeps its first three samples (or fewer if it is
/// shorter) so the walkthrough still has something to draw.
pub fn clean_signal(signal: &[f64]) -> Vec<f64> {
    match signal.iter().rposition(|&v| v != 0.0) {
        Some(last_nonzero) => signal[..=last_nonzero].to_vec(),
        None => signal[..signal.len().min(MIN_SIGNAL_LENGTH)].to_vec(),
    }
}

/// Resize a signal to `new_len` samples.
///
/// Growing pads with zeros. Shrinking keeps the non-zero samples in order,
/// packed from index 0, so a short pulse near the end isn't simply cut off.
pub fn resize_signal(signal: &[f64], new_len: usize) -> Vec<f64> {
    if new_len > signal.len() {
        let mut out = signal.to_vec();
        out.resize(new_len, 0.0);
        return out;
    }

    let mut out = vec![0.0; new_len];
    for (slot, &v) in out
        .iter_mut()
        .zip(signal.iter().filter(|&&v| v != 0.0))
    {
        *slot = v;
    }
    out
}

/// Scale so the largest magnitude is 1. All-zero signals are left alone.
pub fn normalize(signal: &[f64]) -> Vec<f64> {
    let peak = signal.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    if peak > 0.0 {
        signal.iter().map(|v| v / peak).collect()
    } else {
        signal.to_vec()
    }
}

pub fn reverse(signal: &[f64]) -> Vec<f64> {
    signal.iter().rev().copied().collect()
}

/// Comma-separated values with three decimals, the format used by the
/// manual-entry field.
pub fn format_values(signal: &[f64]) -> String {
    signal
        .iter()
        .map(|v| format!("{:.3}", v))
        .collect::<Vec<_>>()
        .join(",")
}

/// Summary statistics for a signal
#[derive(Debug, Clone, PartialEq)]
pub struct SignalStats {
    pub length: usize,
    pub energy: f64,
    pub max: f64,
    pub min: f64,
    pub mean: f64,
    pub non_zero: usize,
}

impl SignalStats {
    pub fn of(signal: &[f64]) -> Self {
        if signal.is_empty() {
            return Self {
                length: 0,
                energy: 0.0,
                max: 0.0,
                min: 0.0,
                mean: 0.0,
                non_zero: 0,
            };
        }

        let energy = signal.iter().map(|v| v * v).sum();
        let max = signal.iter().copied().fold(f64::MIN, f64::max);
        let min = signal.iter().copied().fold(f64::MAX, f64::min);
        let mean = signal.iter().sum::<f64>() / signal.len() as f64;
        let non_zero = signal.iter().filter(|&&v| v != 0.0).count();

        Self {
            length: signal.len(),
            energy,
            max,
            min,
            mean,
            non_zero,
        }
    }

    /// Multi-line property listing. `capacity` is the editor's configured
    /// signal length, shown as "Length: 5 / 7".
    pub fn format_info(&self, capacity: usize) -> String {
        format!(
            "Length: {} / {}\n\
             Energy: {:.3}\n\
             Max: {:.3}\n\
             Min: {:.3}\n\
             Mean: {:.3}\n\
             Non-zero: {}",
            self.length, capacity, self.energy, self.max, self.min, self.mean, self.non_zero,
        )
    }
}
