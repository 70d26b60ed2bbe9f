use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::signal::{format_values, MAX_SIGNAL_LENGTH, MIN_SIGNAL_LENGTH};

// ============================================================================
// DEBUG LEVELS
// ============================================================================

/// How much diagnostic output the front ends print to stderr
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub enum DebugLevel {
    /// No debug output
    Off = 0,

    /// Basic info: settings/session loading, file writes
    Basic = 1,

    /// Verbose: + every command and recompute
    Verbose = 2,

    /// Detailed: + per-step products during playback
    Detailed = 3,
}

impl DebugLevel {
    pub fn name(&self) -> &'static str {
        match self {
            DebugLevel::Off => "Off",
            DebugLevel::Basic => "Basic",
            DebugLevel::Verbose => "Verbose",
            DebugLevel::Detailed => "Detailed",
        }
    }

    /// Parse a level name (case-insensitive) or its number
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "0" => Some(DebugLevel::Off),
            "basic" | "1" => Some(DebugLevel::Basic),
            "verbose" | "2" => Some(DebugLevel::Verbose),
            "detailed" | "3" => Some(DebugLevel::Detailed),
            _ => None,
        }
    }
}

// ============================================================================
// SETTINGS
// ============================================================================

/// All application settings, loaded from INI file or defaults.
/// Every field here is saveable/loadable.
#[derive(Debug, Clone)]
pub struct Settings {
    // ── Signals ──
    pub signal_length: usize,
    pub default_x: Vec<f64>,
    pub default_h: Vec<f64>,

    // ── Display ──
    pub show_grid: bool,
    pub stem_plot: bool,

    // ── Figure export (pixels) ──
    pub editor_figure_width: u32,
    pub editor_figure_height: u32,
    pub step_figure_width: u32,
    pub step_figure_height: u32,

    // ── Animation ──
    pub animation_speed: f64, // 1.0 = one step per second

    // ── Diagnostics ──
    pub debug_level: DebugLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Signals
            signal_length: 7,
            default_x: vec![1.0, 2.0, 1.0, 0.0, 0.0, 0.0, 0.0],
            default_h: vec![0.5, 0.3, 0.2, 0.0, 0.0, 0.0, 0.0],

            // Display
            show_grid: true,
            stem_plot: true,

            // Figure export
            editor_figure_width: 1100,
            editor_figure_height: 800,
            step_figure_width: 1600,
            step_figure_height: 1000,

            // Animation
            animation_speed: 1.0,

            // Diagnostics
            debug_level: DebugLevel::Off,
        }
    }
}

impl Settings {
    pub const FILE_NAME: &'static str = "convolution_viewer.ini";

    /// Load settings from the INI file in the working directory, or create
    /// it with defaults if it doesn't exist.
    pub fn load_or_create() -> Self {
        Self::load_or_create_at(Path::new(Self::FILE_NAME))
    }

    pub fn load_or_create_at(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => {
                    let mut settings = Self::default();
                    settings.parse_ini(&content);
                    if settings.debug_level >= DebugLevel::Basic {
                        eprintln!("[Settings] Loaded {}", path.display());
                    }
                    settings
                }
                Err(e) => {
                    eprintln!(
                        "Warning: Could not read {}: {}. Using defaults.",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            }
        } else {
            let settings = Self::default();
            settings.save_to(path);
            settings
        }
    }

    /// Save current settings to the INI file.
    pub fn save_to(&self, path: &Path) {
        if let Err(e) = fs::write(path, self.to_ini()) {
            eprintln!("Warning: Could not save {}: {}", path.display(), e);
        }
    }

    /// Default x[n] fitted to the configured length
    pub fn initial_x(&self) -> Vec<f64> {
        fit_to_length(&self.default_x, self.signal_length)
    }

    /// Default h[n] fitted to the configured length
    pub fn initial_h(&self) -> Vec<f64> {
        fit_to_length(&self.default_h, self.signal_length)
    }

    fn to_ini(&self) -> String {
        let mut s = String::new();
        s.push_str("# Convolution Viewer Settings\n");
        s.push_str("# Edit values below. Delete this file to reset to defaults.\n\n");

        s.push_str("[Signals]\n");
        s.push_str(&format!(
            "# signal_length: {} to {} samples\n",
            MIN_SIGNAL_LENGTH, MAX_SIGNAL_LENGTH
        ));
        s.push_str(&format!("signal_length = {}\n", self.signal_length));
        s.push_str(&format!("default_x = {}\n", format_values(&self.default_x)));
        s.push_str(&format!("default_h = {}\n", format_values(&self.default_h)));
        s.push('\n');

        s.push_str("[Display]\n");
        s.push_str(&format!("show_grid = {}\n", self.show_grid));
        s.push_str(&format!("stem_plot = {}\n", self.stem_plot));
        s.push('\n');

        s.push_str("[Export]\n");
        s.push_str(&format!("editor_figure_width = {}\n", self.editor_figure_width));
        s.push_str(&format!("editor_figure_height = {}\n", self.editor_figure_height));
        s.push_str(&format!("step_figure_width = {}\n", self.step_figure_width));
        s.push_str(&format!("step_figure_height = {}\n", self.step_figure_height));
        s.push('\n');

        s.push_str("[Animation]\n");
        s.push_str("# animation_speed: 0.2 to 3.0 steps per second\n");
        s.push_str(&format!("animation_speed = {}\n", self.animation_speed));
        s.push('\n');

        s.push_str("[Debug]\n");
        s.push_str("# debug_level: Off, Basic, Verbose, Detailed\n");
        s.push_str(&format!("debug_level = {}\n", self.debug_level.name()));

        s
    }

    fn parse_ini(&mut self, content: &str) {
        let map = parse_ini_to_map(content);

        // Signals
        if let Some(v) = map.get("signal_length") {
            if let Ok(n) = v.parse::<usize>() {
                self.signal_length = n.clamp(MIN_SIGNAL_LENGTH, MAX_SIGNAL_LENGTH);
            }
        }
        if let Some(v) = map.get("default_x") {
            if let Some(values) = parse_value_list(v) {
                self.default_x = values;
            }
        }
        if let Some(v) = map.get("default_h") {
            if let Some(values) = parse_value_list(v) {
                self.default_h = values;
            }
        }

        // Display
        if let Some(v) = map.get("show_grid") {
            if let Ok(b) = v.parse() {
                self.show_grid = b;
            }
        }
        if let Some(v) = map.get("stem_plot") {
            if let Ok(b) = v.parse() {
                self.stem_plot = b;
            }
        }

        // Export
        if let Some(v) = map.get("editor_figure_width") {
            if let Ok(n) = v.parse::<u32>() {
                self.editor_figure_width = n.max(200);
            }
        }
        if let Some(v) = map.get("editor_figure_height") {
            if let Ok(n) = v.parse::<u32>() {
                self.editor_figure_height = n.max(200);
            }
        }
        if let Some(v) = map.get("step_figure_width") {
            if let Ok(n) = v.parse::<u32>() {
                self.step_figure_width = n.max(200);
            }
        }
        if let Some(v) = map.get("step_figure_height") {
            if let Ok(n) = v.parse::<u32>() {
                self.step_figure_height = n.max(200);
            }
        }

        // Animation
        if let Some(v) = map.get("animation_speed") {
            if let Ok(f) = v.parse::<f64>() {
                if f.is_finite() {
                    self.animation_speed = f;
                }
            }
        }

        // Debug
        if let Some(v) = map.get("debug_level") {
            if let Some(level) = DebugLevel::from_name(v) {
                self.debug_level = level;
            }
        }
    }
}

/// Parse INI content into a flat key-value map (section headers are ignored,
/// keys are globally unique in our format).
fn parse_ini_to_map(content: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
            continue;
        }
        if let Some((key, val)) = line.split_once('=') {
            let key = key.trim().to_string();
            let val = val.trim().to_string();
            map.insert(key, val);
        }
    }
    map
}

/// "1,2,0.5" -> [1.0, 2.0, 0.5]. None if any entry is bad or none are given.
fn parse_value_list(s: &str) -> Option<Vec<f64>> {
    let values: Vec<f64> = s
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| v.parse::<f64>().ok().filter(|f| f.is_finite()))
        .collect::<Option<Vec<_>>>()?;
    if values.is_empty() { None } else { Some(values) }
}

fn fit_to_length(values: &[f64], len: usize) -> Vec<f64> {
    let mut out = values.to_vec();
    out.resize(len, 0.0);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_roundtrip_in_ini_text() {
        let mut original = Settings::default();
        original.signal_length = 12;
        original.default_x = vec![0.0, 1.0, -1.0];
        original.stem_plot = false;
        original.animation_speed = 2.5;
        original.debug_level = DebugLevel::Verbose;

        let mut restored = Settings::default();
        restored.parse_ini(&original.to_ini());

        assert_eq!(restored.signal_length, 12);
        assert_eq!(restored.default_x, vec![0.0, 1.0, -1.0]);
        assert!(!restored.stem_plot);
        assert_eq!(restored.animation_speed, 2.5);
        assert_eq!(restored.debug_level, DebugLevel::Verbose);
    }

    #[test]
    fn bad_values_keep_defaults() {
        let ini = "[Signals]
signal_length = lots
default_h = 1, oops, 3
[Animation]
animation_speed = fast
[Debug]
debug_level = chatty
";
        let mut restored = Settings::default();
        restored.parse_ini(ini);

        let defaults = Settings::default();
        assert_eq!(restored.signal_length, defaults.signal_length);
        assert_eq!(restored.default_h, defaults.default_h);
        assert_eq!(restored.animation_speed, defaults.animation_speed);
        assert_eq!(restored.debug_level, DebugLevel::Off);
    }

    #[test]
    fn signal_length_is_clamped_to_editor_bounds() {
        let mut restored = Settings::default();
        restored.parse_ini("signal_length = 1\n");
        assert_eq!(restored.signal_length, MIN_SIGNAL_LENGTH);
        restored.parse_ini("signal_length = 500\n");
        assert_eq!(restored.signal_length, MAX_SIGNAL_LENGTH);
    }

    #[test]
    fn initial_signals_fit_configured_length() {
        let mut settings = Settings::default();
        settings.signal_length = 4;
        assert_eq!(settings.initial_x(), vec![1.0, 2.0, 1.0, 0.0]);
        settings.signal_length = 9;
        assert_eq!(settings.initial_h().len(), 9);
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let path = std::env::temp_dir().join("convolution_viewer_settings_test.ini");
        std::fs::remove_file(&path).ok();

        let settings = Settings::load_or_create_at(&path);
        assert_eq!(settings.signal_length, 7);
        assert!(path.exists());

        std::fs::remove_file(&path).ok();
    }
}
