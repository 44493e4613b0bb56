use super::{display::DisplayTerminal, App};
use std::io;
use tracing::{debug, error};

pub enum RunnerEvent {
    Quit,
    Pause,
    Resume,
    Step,
    NextPanel,
    FlipDirection,
    Reseed,
    None,
}

/// Plays the results back one step per tick until the user quits.
pub struct SimulationRunner {
    terminal: DisplayTerminal,
    app: App,
    paused: bool,
}

impl SimulationRunner {
    pub fn new(app: App) -> Result<Self, io::Error> {
        let terminal = DisplayTerminal::new(app.config().tick_rate)?;

        Ok(Self {
            terminal,
            app,
            paused: false,
        })
    }

    // Returns false if the program should quit
    pub fn run(&mut self) -> bool {
        if !self.paused {
            self.app.advance();
        }
        if let Err(error) = self.terminal.draw(&self.app, self.paused) {
            error!(%error, "failed to draw frame");
            return false;
        }

        match self.terminal.get_input() {
            RunnerEvent::Quit => return false,
            RunnerEvent::Pause if !self.paused => self.paused = true,
            RunnerEvent::Resume if self.paused => self.paused = false,
            RunnerEvent::Step if self.paused => self.app.advance(),
            RunnerEvent::NextPanel => {
                self.app.next_panel();
                debug!(panel = self.app.panel().title(), "switched panel");
            }
            RunnerEvent::FlipDirection => {
                self.app.flip_direction();
                debug!(direction = ?self.app.config().direction, "flipped disk direction");
            }
            RunnerEvent::Reseed => {
                if let Err(error) = self.app.regenerate() {
                    error!(%error, "failed to generate a scenario");
                }
            }
            _ => {}
        }
        true
    }
}
