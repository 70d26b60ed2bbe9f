// ============================================================================
// VIEWER.RS - Step-by-Step Walkthrough Front End
// ============================================================================
//
// Line-driven front end around AnimationController. Reads commands from any
// BufRead, writes the rendered steps to any Write, and reports command errors
// on stderr without stopping.
//
// PLAYBACK:
// `play` is the timer loop: tick, sleep step_delay(), repeat until the
// controller stops itself on the last step. Input is not read while playing.
// ============================================================================

use std::io::{BufRead, Write};
use std::thread;

use anyhow::Result;

use crate::animation::AnimationController;
use crate::commands::{parse_step_command, StepCommand, STEP_HELP};
use crate::report::render_step;
use crate::settings::{DebugLevel, Settings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct StepViewer {
    anim: AnimationController,
    debug_level: DebugLevel,
    figure_size: (u32, u32),
    /// Sleep between steps while playing. Off in tests.
    realtime: bool,
}

impl StepViewer {
    pub fn new(x: &[f64], h: &[f64], settings: &Settings) -> Self {
        let mut anim = AnimationController::new(x, h);
        anim.set_speed(settings.animation_speed);
        Self {
            anim,
            debug_level: settings.debug_level,
            figure_size: (settings.step_figure_width, settings.step_figure_height),
            realtime: true,
        }
    }

    pub fn controller(&self) -> &AnimationController {
        &self.anim
    }

    pub fn set_realtime(&mut self, realtime: bool) {
        self.realtime = realtime;
    }

    pub fn set_speed(&mut self, speed: f64) -> f64 {
        self.anim.set_speed(speed)
    }

    /// Read commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        writeln!(
            out,
            "Step-by-step convolution: {} + {} - 1 = {} output samples. Enter advances, 'help' lists commands.",
            self.anim.x().len(),
            self.anim.h().len(),
            self.anim.output_length()
        )?;
        writeln!(out, "{}", render_step(&self.anim))?;
        prompt(out)?;

        for line in input.lines() {
            let line = line?;
            match parse_step_command(&line) {
                Ok(Some(cmd)) => match self.handle(cmd, out) {
                    Ok(Flow::Quit) => break,
                    Ok(Flow::Continue) => {}
                    Err(e) => eprintln!("Error: {:#}", e),
                },
                Ok(None) => {}
                Err(e) => eprintln!("Error: {:#}", e),
            }
            prompt(out)?;
        }
        Ok(())
    }

    pub fn handle<W: Write>(&mut self, cmd: StepCommand, out: &mut W) -> Result<Flow> {
        if self.debug_level >= DebugLevel::Verbose {
            eprintln!("[Viewer] {:?} at n={}", cmd, self.anim.current_n());
        }

        match cmd {
            StepCommand::Next => {
                if self.anim.next_step() {
                    self.show(out)?;
                } else {
                    writeln!(out, "Already at the last step")?;
                }
            }
            StepCommand::Previous => {
                if self.anim.previous_step() {
                    self.show(out)?;
                } else {
                    writeln!(out, "Already at the first step")?;
                }
            }
            StepCommand::Reset => {
                self.anim.reset();
                self.show(out)?;
            }
            StepCommand::End => {
                self.anim.go_to_end();
                self.show(out)?;
            }
            StepCommand::Play => self.play(out)?,
            StepCommand::Pause => {
                self.anim.pause();
                writeln!(out, "Paused at step {}", self.anim.current_n() + 1)?;
            }
            StepCommand::Speed(speed) => {
                let applied = self.anim.set_speed(speed);
                writeln!(
                    out,
                    "Speed: {:.1}x ({} ms per step)",
                    applied,
                    self.anim.step_delay().as_millis()
                )?;
            }
            StepCommand::GoTo(n) => {
                self.anim.go_to(n);
                self.show(out)?;
            }
            StepCommand::Show => self.show(out)?,
            StepCommand::Export(path) => self.export(&path, out)?,
            StepCommand::Help => writeln!(out, "{}", STEP_HELP)?,
            StepCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn show<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "{}", render_step(&self.anim))?;
        if self.debug_level >= DebugLevel::Detailed {
            let frame = self.anim.frame();
            eprintln!(
                "[Engine] n={} products={:?} sum={}",
                frame.n, frame.state.products, frame.state.sum
            );
        }
        Ok(())
    }

    fn play<W: Write>(&mut self, out: &mut W) -> Result<()> {
        self.anim.play();
        self.show(out)?;

        while self.anim.is_playing() {
            if self.realtime {
                thread::sleep(self.anim.step_delay());
            }
            if self.anim.tick() {
                writeln!(out)?;
                self.show(out)?;
            }
        }

        writeln!(out, "Animation complete!")?;
        Ok(())
    }

    #[cfg(feature = "plot")]
    fn export<W: Write>(&self, path: &str, out: &mut W) -> Result<()> {
        let frame = self.anim.frame();
        crate::plot::export_step_figure(&frame, self.anim.x(), self.anim.h(), self.figure_size, path)?;
        if self.debug_level >= DebugLevel::Basic {
            eprintln!("[Export] Wrote {}", path);
        }
        writeln!(out, "Exported step {} to {}", frame.n + 1, path)?;
        Ok(())
    }

    #[cfg(not(feature = "plot"))]
    fn export<W: Write>(&self, _path: &str, _out: &mut W) -> Result<()> {
        let _ = self.figure_size;
        anyhow::bail!("Figure export is not available in this build (enable the 'plot' feature)")
    }
}

fn prompt<W: Write>(out: &mut W) -> Result<()> {
    write!(out, "step> ")?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn viewer() -> StepViewer {
        let mut viewer = StepViewer::new(&[1.0, 2.0, 1.0], &[0.5, 0.3, 0.2], &Settings::default());
        viewer.set_realtime(false);
        viewer
    }

    fn run(viewer: &mut StepViewer, script: &str) -> String {
        let mut out = Vec::new();
        viewer.run(Cursor::new(script), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn enter_advances_and_quit_stops_reading() {
        let mut v = viewer();
        let text = run(&mut v, "\nn\nquit\nn\n");
        assert_eq!(v.controller().current_n(), 2);
        assert!(text.contains("Step 3/5: Computing y[2]"));
    }

    #[test]
    fn play_runs_to_the_end() {
        let mut v = viewer();
        let text = run(&mut v, "play\n");
        assert_eq!(v.controller().current_n(), 4);
        assert!(!v.controller().is_playing());
        assert!(text.contains("Step 5/5: Computing y[4]"));
        assert!(text.contains("Animation complete!"));
    }

    #[test]
    fn bad_commands_do_not_stop_the_session() {
        let mut v = viewer();
        run(&mut v, "bogus\nspeed fast\nn\n");
        assert_eq!(v.controller().current_n(), 1);
    }

    #[test]
    fn speed_and_navigation_commands() {
        let mut v = viewer();
        let text = run(&mut v, "speed 9\ngoto 3\nprev\nend\nn\nreset\np\n");
        assert_eq!(v.controller().speed(), 3.0);
        assert!(text.contains("Speed: 3.0x (333 ms per step)"));
        assert!(text.contains("Already at the last step"));
        assert!(text.contains("Already at the first step"));
        assert_eq!(v.controller().current_n(), 0);
    }

    #[test]
    fn speed_comes_from_settings() {
        let settings = Settings {
            animation_speed: 2.0,
            ..Settings::default()
        };
        let v = StepViewer::new(&[1.0, 1.0, 1.0], &[1.0, 1.0, 1.0], &settings);
        assert_eq!(v.controller().speed(), 2.0);
    }

    #[cfg(feature = "plot")]
    #[test]
    fn export_writes_current_step() {
        let mut v = viewer();
        let path = std::env::temp_dir().join("convolution_viewer_viewer_export.svg");
        let mut out = Vec::new();
        v.handle(StepCommand::Export(path.display().to_string()), &mut out)
            .unwrap();
        assert!(path.exists());
        std::fs::remove_file(&path).ok();
    }
}
