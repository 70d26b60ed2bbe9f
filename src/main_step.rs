// ============================================================================
// MAIN_STEP.RS - Step-by-Step Convolution Viewer
// ============================================================================
//
// Usage: step_viewer [SESSION.json] [--speed S] [--play]
//
// Without a session file the default signals from the settings are used.
// ============================================================================

use std::io;

use anyhow::{bail, Context, Result};

use convolution_viewer::{load_session, DebugLevel, Settings, StepViewer};

const USAGE: &str = "Usage: step_viewer [SESSION.json] [--speed S] [--play]";

struct Args {
    session: Option<String>,
    speed: Option<f64>,
    play: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        session: None,
        speed: None,
        play: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--speed" => {
                let value = iter.next().context("--speed needs a value")?;
                let speed: f64 = value
                    .parse()
                    .with_context(|| format!("Invalid speed '{}'", value))?;
                args.speed = Some(speed);
            }
            "--play" => args.play = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            other if other.starts_with("--") => bail!("Unknown option '{}'\n{}", other, USAGE),
            other => {
                if args.session.is_some() {
                    bail!("Only one session file may be given\n{}", USAGE);
                }
                args.session = Some(other.to_string());
            }
        }
    }
    Ok(args)
}

fn run() -> Result<()> {
    let args = parse_args()?;
    let settings = Settings::load_or_create();

    let (x, h) = match &args.session {
        Some(path) => {
            let file = load_session(path)?;
            if settings.debug_level >= DebugLevel::Basic {
                eprintln!("[Session] Loaded {}", path);
            }
            (file.x_signal, file.h_signal)
        }
        None => (settings.initial_x(), settings.initial_h()),
    };

    let mut viewer = StepViewer::new(&x, &h, &settings);
    if let Some(speed) = args.speed {
        viewer.set_speed(speed);
    }

    let mut stdout = io::stdout();
    if args.play {
        viewer.handle(convolution_viewer::commands::StepCommand::Play, &mut stdout)?;
    }
    viewer.run(io::stdin().lock(), &mut stdout)
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
