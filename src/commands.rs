// ============================================================================
// COMMANDS.RS - Terminal Command Parser
// ============================================================================
//
// Both front ends read one command per line from stdin. This module turns a
// line into a typed command; the binaries decide what to do with it.
//
// Parsing is forgiving about case and whitespace, strict about arguments:
// a command with a missing or malformed argument is an error, never a
// silent default.
// ============================================================================

use anyhow::{bail, Context, Result};

use crate::editor::SignalId;
use crate::presets::Preset;
use crate::validation::{is_valid_float_input, is_valid_uint_input};

// ============================================================================
// SIGNAL EDITOR
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    Select(SignalId),
    Preset(Preset),
    /// Raw comma-separated values, validated by the editor
    Set(String),
    Length(usize),
    Swap,
    Reverse,
    Normalize,
    /// Drag the selected signal: pointer position, pointer value
    Drag(f64, f64),
    Grid(bool),
    Stem(bool),
    Show,
    Stats,
    Save(String),
    Load(String),
    Export(String),
    /// Hand the current signals to the walkthrough
    Steps,
    Help,
    Quit,
}

pub const EDITOR_HELP: &str = "\
Commands:
  select x|h          choose the signal to edit
  preset NAME         impulse, step, exponential, sine, triangular, random, gaussian, clear
  set v1,v2,...       enter values for the selected signal
  length N            signal length (3-50)
  swap                swap x[n] and h[n]
  reverse             reverse h[n]
  normalize           scale both signals into [-1, 1]
  drag N VALUE        set the sample nearest position N of the selected signal
  grid on|off         toggle grid in exported figures
  stem on|off         stem or line plots in exported figures
  show                print x[n], h[n] and y[n]
  stats               properties of the selected signal
  save PATH           save session (JSON)
  load PATH           load session (JSON)
  export PATH         export figure (SVG)
  steps               walk through the convolution step by step
  help                this text
  quit                exit";

pub fn parse_editor_command(line: &str) -> Result<Option<EditorCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = split_command(line);
    let cmd = match word.as_str() {
        "select" | "sel" => {
            let id = SignalId::from_name(rest)
                .with_context(|| format!("Unknown signal '{}'. Use x or h", rest))?;
            EditorCommand::Select(id)
        }
        "preset" => EditorCommand::Preset(require(rest, "preset")?.parse()?),
        "set" => EditorCommand::Set(require(rest, "set")?.to_string()),
        "length" | "len" => EditorCommand::Length(parse_uint(rest, "length")?),
        "swap" => EditorCommand::Swap,
        "reverse" => EditorCommand::Reverse,
        "normalize" => EditorCommand::Normalize,
        "drag" => {
            let mut parts = rest.split_whitespace();
            let position = parse_float(parts.next().unwrap_or(""), "drag position")?;
            let value = parse_float(parts.next().unwrap_or(""), "drag value")?;
            EditorCommand::Drag(position, value)
        }
        "grid" => EditorCommand::Grid(parse_switch(rest, "grid")?),
        "stem" => EditorCommand::Stem(parse_switch(rest, "stem")?),
        "show" => EditorCommand::Show,
        "stats" => EditorCommand::Stats,
        "save" => EditorCommand::Save(require(rest, "save")?.to_string()),
        "load" => EditorCommand::Load(require(rest, "load")?.to_string()),
        "export" => EditorCommand::Export(require(rest, "export")?.to_string()),
        "steps" | "step" => EditorCommand::Steps,
        "help" | "?" => EditorCommand::Help,
        "quit" | "exit" | "q" => EditorCommand::Quit,
        other => bail!("Unknown command '{}'. Type 'help' for a list", other),
    };
    Ok(Some(cmd))
}

// ============================================================================
// STEP VIEWER
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum StepCommand {
    Next,
    Previous,
    Reset,
    End,
    Play,
    Pause,
    Speed(f64),
    GoTo(usize),
    Show,
    Export(String),
    Help,
    Quit,
}

pub const STEP_HELP: &str = "\
Commands:
  next | n            next step
  prev | p            previous step
  reset               stop and go to the first step
  end                 stop and go to the last step
  play                play from the current step to the end
  pause               stop playing
  speed S             playback speed, 0.2 to 3.0 steps per second
  goto N              jump to output index N
  show                redraw the current step
  export PATH         export the current step as a figure (SVG)
  help                this text
  quit                exit";

pub fn parse_step_command(line: &str) -> Result<Option<StepCommand>> {
    let line = line.trim();
    if line.starts_with('#') {
        return Ok(None);
    }
    // A bare Enter advances, like pressing the next button
    if line.is_empty() {
        return Ok(Some(StepCommand::Next));
    }

    let (word, rest) = split_command(line);
    let cmd = match word.as_str() {
        "next" | "n" => StepCommand::Next,
        "prev" | "previous" | "p" => StepCommand::Previous,
        "reset" | "first" => StepCommand::Reset,
        "end" | "last" => StepCommand::End,
        "play" => StepCommand::Play,
        "pause" | "stop" => StepCommand::Pause,
        "speed" => StepCommand::Speed(parse_float(rest, "speed")?),
        "goto" | "go" => StepCommand::GoTo(parse_uint(rest, "goto")?),
        "show" => StepCommand::Show,
        "export" => StepCommand::Export(require(rest, "export")?.to_string()),
        "help" | "?" => StepCommand::Help,
        "quit" | "exit" | "q" => StepCommand::Quit,
        other => bail!("Unknown command '{}'. Type 'help' for a list", other),
    };
    Ok(Some(cmd))
}

// ─── Argument helpers ──────────────────────────────────────────────────────────

fn split_command(line: &str) -> (String, &str) {
    match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word.to_ascii_lowercase(), rest.trim()),
        None => (line.to_ascii_lowercase(), ""),
    }
}

fn require<'a>(arg: &'a str, command: &str) -> Result<&'a str> {
    if arg.is_empty() {
        bail!("'{}' needs an argument", command);
    }
    Ok(arg)
}

fn parse_uint(arg: &str, what: &str) -> Result<usize> {
    let arg = require(arg, what)?;
    if !is_valid_uint_input(arg) {
        bail!("Invalid {} '{}': expected a whole number", what, arg);
    }
    arg.parse()
        .with_context(|| format!("Invalid {} '{}'", what, arg))
}

fn parse_float(arg: &str, what: &str) -> Result<f64> {
    let arg = require(arg, what)?;
    if !is_valid_float_input(arg) || arg == "-" {
        bail!("Invalid {} '{}': expected a number", what, arg);
    }
    let value: f64 = arg
        .parse()
        .with_context(|| format!("Invalid {} '{}': expected a number", what, arg))?;
    if !value.is_finite() {
        bail!("Invalid {} '{}': expected a finite number", what, arg);
    }
    Ok(value)
}

fn parse_switch(arg: &str, what: &str) -> Result<bool> {
    match require(arg, what)?.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => bail!("Invalid {} setting '{}': use on or off", what, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor(line: &str) -> EditorCommand {
        parse_editor_command(line).unwrap().unwrap()
    }

    fn stepper(line: &str) -> StepCommand {
        parse_step_command(line).unwrap().unwrap()
    }

    #[test]
    fn editor_commands_parse() {
        assert_eq!(editor("select h"), EditorCommand::Select(SignalId::H));
        assert_eq!(editor("PRESET Gaussian"), EditorCommand::Preset(Preset::Gaussian));
        assert_eq!(editor("set 1, 2, 3"), EditorCommand::Set("1, 2, 3".to_string()));
        assert_eq!(editor("length 12"), EditorCommand::Length(12));
        assert_eq!(editor("drag 2.6 -0.5"), EditorCommand::Drag(2.6, -0.5));
        assert_eq!(editor("grid off"), EditorCommand::Grid(false));
        assert_eq!(editor("save out/session.json"), EditorCommand::Save("out/session.json".to_string()));
        assert_eq!(editor("  quit  "), EditorCommand::Quit);
    }

    #[test]
    fn blank_and_comment_lines_are_skipped_in_editor() {
        assert_eq!(parse_editor_command("").unwrap(), None);
        assert_eq!(parse_editor_command("# note").unwrap(), None);
    }

    #[test]
    fn editor_argument_errors() {
        assert!(parse_editor_command("select y").is_err());
        assert!(parse_editor_command("preset").is_err());
        assert!(parse_editor_command("length -3").is_err());
        assert!(parse_editor_command("length seven").is_err());
        assert!(parse_editor_command("drag 1").is_err());
        assert!(parse_editor_command("stem maybe").is_err());
        assert!(parse_editor_command("frobnicate").is_err());
    }

    #[test]
    fn step_commands_parse() {
        assert_eq!(stepper(""), StepCommand::Next);
        assert_eq!(stepper("p"), StepCommand::Previous);
        assert_eq!(stepper("speed 1.5"), StepCommand::Speed(1.5));
        assert_eq!(stepper("goto 3"), StepCommand::GoTo(3));
        assert_eq!(stepper("export step.svg"), StepCommand::Export("step.svg".to_string()));
        assert!(parse_step_command("speed fast").is_err());
        assert!(parse_step_command("speed inf").is_err());
        assert!(parse_step_command("goto").is_err());
    }
}
