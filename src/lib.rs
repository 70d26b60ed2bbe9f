pub mod engine;
pub mod signal;
pub mod presets;
pub mod validation;
pub mod editor;
pub mod animation;
pub mod session;
pub mod settings;
pub mod commands;
pub mod report;
pub mod viewer;

#[cfg(feature = "plot")]
pub mod plot;

pub use engine::{convolve, partial, step, StepState};
pub use signal::{clean_signal, resize_signal, SignalStats, MAX_SIGNAL_LENGTH, MIN_SIGNAL_LENGTH};
pub use presets::Preset;
pub use validation::{parse_signal_input, InputError};
pub use editor::{EditorSession, SignalId};
pub use animation::{AnimationController, PlaybackState, StepFrame};
pub use session::{load_session, save_session, SessionFile};
pub use settings::{DebugLevel, Settings};
pub use viewer::StepViewer;

#[cfg(feature = "plot")]
pub use plot::{export_editor_figure, export_step_figure};
