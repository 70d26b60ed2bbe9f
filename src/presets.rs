// ============================================================================
// PRESETS.RS - Signal Templates
// ============================================================================
//
// Named templates the editor can drop into the selected signal. Every preset
// is generated at the editor's current signal length.
//
// PRESET LIST:
// - impulse      δ[n]: 1 at n = 0, zero elsewhere
// - step         u[n]: all ones
// - exponential  0.8^n
// - sine         sin(2πn / 8)
// - triangular   peak at len/4, half-width len/8
// - random       uniform in [-1, 1)
// - gaussian     centered at len/2, sigma len/8
// - clear        all zeros
// ============================================================================

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Impulse,
    Step,
    Exponential,
    Sine,
    Triangular,
    Random,
    Gaussian,
    Clear,
}

impl Preset {
    pub const ALL: &'static [Preset] = &[
        Preset::Impulse,
        Preset::Step,
        Preset::Exponential,
        Preset::Sine,
        Preset::Triangular,
        Preset::Random,
        Preset::Gaussian,
        Preset::Clear,
    ];

    /// Command name, e.g. "impulse"
    pub fn name(&self) -> &'static str {
        match self {
            Preset::Impulse => "impulse",
            Preset::Step => "step",
            Preset::Exponential => "exponential",
            Preset::Sine => "sine",
            Preset::Triangular => "triangular",
            Preset::Random => "random",
            Preset::Gaussian => "gaussian",
            Preset::Clear => "clear",
        }
    }

    /// Display label, e.g. "Impulse δ[n]"
    pub fn label(&self) -> &'static str {
        match self {
            Preset::Impulse => "Impulse δ[n]",
            Preset::Step => "Step u[n]",
            Preset::Exponential => "Exponential",
            Preset::Sine => "Sinusoidal",
            Preset::Triangular => "Triangular",
            Preset::Random => "Random",
            Preset::Gaussian => "Gaussian",
            Preset::Clear => "Clear",
        }
    }

    /// Generate `len` samples. Only `Random` draws from `rng`.
    pub fn generate<R: Rng + ?Sized>(&self, len: usize, rng: &mut R) -> Vec<f64> {
        // Integer widths follow the editor's floor-division convention; a
        // zero width would divide by zero for lengths under 8.
        let quarter = (len / 4) as f64;
        let half = (len / 2) as f64;
        let eighth = (len / 8).max(1) as f64;

        (0..len)
            .map(|i| {
                let n = i as f64;
                match self {
                    Preset::Impulse => {
                        if i == 0 { 1.0 } else { 0.0 }
                    }
                    Preset::Step => 1.0,
                    Preset::Exponential => 0.8f64.powi(i as i32),
                    Preset::Sine => (2.0 * PI * n / 8.0).sin(),
                    Preset::Triangular => (1.0 - (n - quarter).abs() / eighth).max(0.0),
                    Preset::Random => rng.random_range(-1.0..1.0),
                    Preset::Gaussian => (-0.5 * ((n - half) / eighth).powi(2)).exp(),
                    Preset::Clear => 0.0,
                }
            })
            .collect()
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        // Aliases for the display labels
        let wanted = match wanted.as_str() {
            "delta" => "impulse",
            "sinusoidal" => "sine",
            other => other,
        };
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|p| p.name()).collect();
                anyhow::anyhow!("Unknown preset '{}'. Available: {}", s.trim(), names.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn make(preset: Preset, len: usize) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(7);
        preset.generate(len, &mut rng)
    }

    #[test]
    fn impulse_and_step() {
        assert_eq!(make(Preset::Impulse, 4), vec![1.0, 0.0, 0.0, 0.0]);
        assert_eq!(make(Preset::Step, 3), vec![1.0, 1.0, 1.0]);
        assert_eq!(make(Preset::Clear, 3), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn exponential_decays_by_point_eight() {
        let s = make(Preset::Exponential, 3);
        assert_eq!(s[0], 1.0);
        assert!((s[1] - 0.8).abs() < 1e-12);
        assert!((s[2] - 0.64).abs() < 1e-12);
    }

    #[test]
    fn sine_has_period_eight() {
        let s = make(Preset::Sine, 9);
        assert!(s[0].abs() < 1e-12);
        assert!((s[2] - 1.0).abs() < 1e-12);
        assert!((s[6] + 1.0).abs() < 1e-12);
        assert!(s[8].abs() < 1e-9);
    }

    #[test]
    fn triangular_peaks_at_quarter_length() {
        let s = make(Preset::Triangular, 16);
        // peak at 16/4 = 4, half-width 16/8 = 2
        assert_eq!(s[4], 1.0);
        assert_eq!(s[3], 0.5);
        assert_eq!(s[6], 0.0);
        assert_eq!(s[0], 0.0);
    }

    #[test]
    fn short_lengths_stay_finite() {
        for preset in Preset::ALL {
            for len in 3..8 {
                assert!(make(*preset, len).iter().all(|v| v.is_finite()), "{} len {}", preset, len);
            }
        }
    }

    #[test]
    fn gaussian_is_centered() {
        let s = make(Preset::Gaussian, 16);
        assert_eq!(s[8], 1.0);
        assert!((s[6] - s[10]).abs() < 1e-12);
    }

    #[test]
    fn random_stays_in_range_and_is_seedable() {
        let a = make(Preset::Random, 50);
        let b = make(Preset::Random, 50);
        assert_eq!(a, b);
        assert!(a.iter().all(|v| (-1.0..1.0).contains(v)));
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!("Gaussian".parse::<Preset>().unwrap(), Preset::Gaussian);
        assert_eq!(" delta ".parse::<Preset>().unwrap(), Preset::Impulse);
        assert!("sawtooth".parse::<Preset>().is_err());
    }
}
