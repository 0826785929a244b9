//! Frame driver: input, simulation and rendering once per display frame
//!
//! The host owns pacing (display refresh) and calls [`FrameDriver::frame`]
//! each frame. Nothing here blocks or sleeps.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::input::InputTranslator;
use crate::sim::{GameState, Snapshot, tick};

/// Presentation layer contract; must not affect the simulation
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot);
}

/// How simulation ticks relate to display frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pacing {
    /// Exactly one tick per frame; game speed follows the refresh rate
    Locked,
    /// Fixed tick length fed by an accumulator of elapsed time
    Fixed { tick_secs: f64 },
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing::Fixed { tick_secs: SIM_DT }
    }
}

pub struct FrameDriver {
    state: GameState,
    input: InputTranslator,
    pacing: Pacing,
    accumulator: f64,
    last_time: Option<f64>,
    running: bool,
    /// Last published snapshot (always a completed tick)
    snapshot: Snapshot,
}

impl FrameDriver {
    pub fn new(state: GameState, pacing: Pacing) -> Self {
        let pacing = match pacing {
            Pacing::Fixed { tick_secs } if !(tick_secs.is_finite() && tick_secs > 0.0) => {
                log::warn!("Invalid tick length {tick_secs}, using {SIM_DT}");
                Pacing::Fixed { tick_secs: SIM_DT }
            }
            other => other,
        };
        let snapshot = Snapshot::capture(&state);
        Self {
            state,
            input: InputTranslator::new(),
            pacing,
            accumulator: 0.0,
            last_time: None,
            running: true,
            snapshot,
        }
    }

    /// Where the host forwards key events
    pub fn input_mut(&mut self) -> &mut InputTranslator {
        &mut self.input
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the loop; safe to call any number of times
    pub fn stop(&mut self) {
        if self.running {
            log::info!("Frame driver stopped at tick {}", self.state.time_ticks);
            self.running = false;
        }
    }

    /// Run one display frame at host time `now` (seconds)
    ///
    /// Returns false once the driver has been stopped.
    pub fn frame<R: Renderer + ?Sized>(&mut self, now: f64, renderer: &mut R) -> bool {
        if !self.running {
            return false;
        }

        let due = self.ticks_due(now);
        for _ in 0..due {
            let intents = self.input.intents();
            tick(&mut self.state, &intents);
            // Clear one-shot inputs after processing
            self.input.clear_one_shots();
        }

        self.snapshot = Snapshot::capture(&self.state);
        renderer.render(&self.snapshot);
        true
    }

    fn ticks_due(&mut self, now: f64) -> u32 {
        match self.pacing {
            Pacing::Locked => 1,
            Pacing::Fixed { tick_secs } => {
                let dt = match self.last_time {
                    Some(last) => (now - last).clamp(0.0, 0.1),
                    None => 0.0,
                };
                self.last_time = Some(now);
                self.accumulator += dt;

                let mut substeps = 0;
                while self.accumulator >= tick_secs && substeps < MAX_SUBSTEPS {
                    self.accumulator -= tick_secs;
                    substeps += 1;
                }
                substeps
            }
        }
    }
}

/// Headless renderer that writes the HUD to the log
#[derive(Debug)]
pub struct LogRenderer {
    every: u64,
    frames: u64,
    last_overlay: (bool, bool),
}

impl LogRenderer {
    /// Log the HUD every `every` frames, and whenever pause/game-over flips
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            frames: 0,
            last_overlay: (false, false),
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, snapshot: &Snapshot) {
        let overlay = (snapshot.paused, snapshot.game_over);
        if self.frames % self.every == 0 || overlay != self.last_overlay {
            log::info!("{}", snapshot.hud_line());
        }
        self.last_overlay = overlay;
        self.frames += 1;
    }
}
