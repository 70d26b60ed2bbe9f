// ============================================================================
// MAIN.RS - Interactive Convolution Editor
// ============================================================================
//
// Usage: convolution [SESSION.json]
//
// Edit x[n] and h[n] from the terminal; y[n] = x[n] * h[n] is recomputed
// after every change. `steps` hands the current signals to the step-by-step
// walkthrough and returns here when it quits.
// ============================================================================

use std::io::{self, Write};

use anyhow::{bail, Result};

use convolution_viewer::commands::{parse_editor_command, EditorCommand, EDITOR_HELP};
use convolution_viewer::report::render_editor;
use convolution_viewer::{
    load_session, save_session, DebugLevel, EditorSession, Preset, Settings, StepViewer,
};

// ─── App State ─────────────────────────────────────────────────────────────────

struct App {
    settings: Settings,
    session: EditorSession,
}

impl App {
    fn new(settings: Settings) -> Self {
        let session = EditorSession::from_settings(&settings);
        Self { settings, session }
    }

    fn log(&self, level: DebugLevel, tag: &str, message: &str) {
        if self.settings.debug_level >= level {
            eprintln!("[{}] {}", tag, message);
        }
    }

    fn load(&mut self, path: &str) -> Result<()> {
        let file = load_session(path)?;
        self.session.load_session(file);
        self.session.status = format!("Loaded {}", path);
        self.log(DebugLevel::Basic, "Session", &format!("Loaded {}", path));
        Ok(())
    }

    /// Apply one command. Returns false when the editor should exit.
    fn handle(&mut self, cmd: EditorCommand) -> Result<bool> {
        self.log(DebugLevel::Verbose, "Editor", &format!("{:?}", cmd));

        match cmd {
            EditorCommand::Select(id) => self.session.select(id),
            EditorCommand::Preset(preset) => self.apply_preset(preset),
            EditorCommand::Set(text) => self.session.apply_manual_input(&text)?,
            EditorCommand::Length(n) => {
                let applied = self.session.set_length(n);
                if applied != n {
                    println!("Length must be between 3 and 50; using {}", applied);
                }
            }
            EditorCommand::Swap => self.session.swap_signals(),
            EditorCommand::Reverse => self.session.reverse_h(),
            EditorCommand::Normalize => self.session.normalize_signals(),
            EditorCommand::Drag(position, value) => {
                let id = self.session.current;
                let moved = self.session.begin_drag(id, position, value);
                self.session.end_drag();
                if !moved {
                    bail!(
                        "Position {} is outside {} (0 to {})",
                        position,
                        id.symbol(),
                        self.session.n_points() - 1
                    );
                }
            }
            EditorCommand::Grid(on) => {
                self.session.show_grid = on;
                self.session.status = format!("Grid {}", if on { "on" } else { "off" });
            }
            EditorCommand::Stem(on) => {
                self.session.stem_plot = on;
                self.session.status =
                    format!("{} plots", if on { "Stem" } else { "Line" });
            }
            EditorCommand::Show => {}
            EditorCommand::Stats => {
                println!("{}", self.session.current.label());
                println!("{}", self.session.stats().format_info(self.session.n_points()));
                return Ok(true);
            }
            EditorCommand::Save(path) => {
                save_session(&self.session.to_session(), &path)?;
                self.session.status = format!("Saved {}", path);
                self.log(DebugLevel::Basic, "Session", &format!("Saved {}", path));
            }
            EditorCommand::Load(path) => self.load(&path)?,
            EditorCommand::Export(path) => self.export(&path)?,
            EditorCommand::Steps => {
                self.run_steps()?;
                self.session.status = "Back in the editor".to_string();
            }
            EditorCommand::Help => {
                println!("{}", EDITOR_HELP);
                return Ok(true);
            }
            EditorCommand::Quit => return Ok(false),
        }

        self.log(
            DebugLevel::Verbose,
            "Engine",
            &format!("y[n] has {} samples", self.session.y().len()),
        );
        println!("{}", render_editor(&self.session));
        Ok(true)
    }

    fn apply_preset(&mut self, preset: Preset) {
        self.session.apply_preset(preset, &mut rand::rng());
    }

    fn run_steps(&mut self) -> Result<()> {
        let (x, h) = self.session.step_viewer_signals();
        let mut viewer = StepViewer::new(&x, &h, &self.settings);
        viewer.run(io::stdin().lock(), &mut io::stdout())?;
        println!();
        Ok(())
    }

    #[cfg(feature = "plot")]
    fn export(&mut self, path: &str) -> Result<()> {
        let size = (
            self.settings.editor_figure_width,
            self.settings.editor_figure_height,
        );
        convolution_viewer::export_editor_figure(&self.session, size, path)?;
        self.session.status = format!("Exported figure to {}", path);
        self.log(DebugLevel::Basic, "Export", &format!("Wrote {}", path));
        Ok(())
    }

    #[cfg(not(feature = "plot"))]
    fn export(&mut self, _path: &str) -> Result<()> {
        bail!("Figure export is not available in this build (enable the 'plot' feature)")
    }
}

// ─── Main ──────────────────────────────────────────────────────────────────────

fn main() {
    let settings = Settings::load_or_create();
    let mut app = App::new(settings);

    if let Some(path) = std::env::args().nth(1) {
        if let Err(e) = app.load(&path) {
            eprintln!("Error: {:#}", e);
        }
    }

    println!("Discrete Convolution: y[n] = x[n] * h[n]");
    println!("Type 'help' for commands.\n");
    println!("{}", render_editor(&app.session));

    let stdin = io::stdin();
    loop {
        print!("{}> ", app.session.current.symbol());
        io::stdout().flush().ok();

        let mut line = String::new();
        match stdin.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error: {}", e);
                break;
            }
        }

        let cmd = match parse_editor_command(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                continue;
            }
        };

        match app.handle(cmd) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => eprintln!("Error: {:#}", e),
        }
    }
}
