use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};
use web_time::{Duration, Instant};

use crate::*;

/// Draws the board. Receives a full redraw request after every new game and
/// the changed cells after each move.
pub trait RenderSurface {
    fn board_reset(&mut self, size: Coord2, cells: &[CellView]);
    fn cells_changed(&mut self, cells: &[CellView]);
}

/// Remaining-mines display. Driven by absolute resets and ±1 steps.
pub trait MineCounter {
    fn set_value(&mut self, value: CellCount);
    fn increment(&mut self);
    fn decrement(&mut self);
}

pub trait Timer {
    fn start(&mut self);
    fn stop(&mut self);
    fn elapsed_secs(&self) -> u32;
}

pub trait ResultNotifier {
    fn game_over(&mut self, result: &GameResult);
    fn set_mood(&mut self, mood: Mood);
}

impl RenderSurface for () {
    fn board_reset(&mut self, _size: Coord2, _cells: &[CellView]) {}
    fn cells_changed(&mut self, _cells: &[CellView]) {}
}

impl MineCounter for () {
    fn set_value(&mut self, _value: CellCount) {}
    fn increment(&mut self) {}
    fn decrement(&mut self) {}
}

impl Timer for () {
    fn start(&mut self) {}
    fn stop(&mut self) {}
    fn elapsed_secs(&self) -> u32 {
        0
    }
}

impl ResultNotifier for () {
    fn game_over(&mut self, _result: &GameResult) {}
    fn set_mood(&mut self, _mood: Mood) {}
}

/// Face shown on the new-game control.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Neutral,
    Positive,
    Negative,
}

impl Default for Mood {
    fn default() -> Self {
        Self::Neutral
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub won: bool,
    pub message: String,
}

impl GameResult {
    pub fn lost() -> Self {
        Self {
            won: false,
            message: "You lost, try again!".into(),
        }
    }

    /// The time is only mentioned while it is below the display cap.
    pub fn won(elapsed_secs: u32, max_seconds_elapsed: u32) -> Self {
        let message = if elapsed_secs < max_seconds_elapsed {
            alloc::format!("You won, it took you {elapsed_secs} second, congratulations!")
        } else {
            "You won, congratulations!".into()
        };
        Self { won: true, message }
    }
}

/// Everything outside the engine that reacts to it.
pub struct Collaborators {
    pub(crate) render: Box<dyn RenderSurface>,
    pub(crate) counter: Box<dyn MineCounter>,
    pub(crate) timer: Box<dyn Timer>,
    pub(crate) notifier: Box<dyn ResultNotifier>,
}

impl Collaborators {
    pub fn with_render(mut self, render: impl RenderSurface + 'static) -> Self {
        self.render = Box::new(render);
        self
    }

    pub fn with_counter(mut self, counter: impl MineCounter + 'static) -> Self {
        self.counter = Box::new(counter);
        self
    }

    pub fn with_timer(mut self, timer: impl Timer + 'static) -> Self {
        self.timer = Box::new(timer);
        self
    }

    pub fn with_notifier(mut self, notifier: impl ResultNotifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            render: Box::new(()),
            counter: Box::new(()),
            timer: Box::new(()),
            notifier: Box::new(()),
        }
    }
}

impl fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

/// Wall-clock [`Timer`]; works natively and in the browser.
#[derive(Clone, Debug, Default)]
pub struct Stopwatch {
    started_at: Option<Instant>,
    stopped_after: Option<Duration>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.stopped_after.is_none()
    }

    fn elapsed(&self) -> Duration {
        match (self.started_at, self.stopped_after) {
            (_, Some(elapsed)) => elapsed,
            (Some(started_at), None) => started_at.elapsed(),
            (None, None) => Duration::ZERO,
        }
    }
}

impl Timer for Stopwatch {
    fn start(&mut self) {
        self.started_at = Some(Instant::now());
        self.stopped_after = None;
    }

    fn stop(&mut self) {
        if self.is_running() {
            self.stopped_after = Some(self.elapsed());
        }
    }

    fn elapsed_secs(&self) -> u32 {
        self.elapsed().as_secs().try_into().unwrap_or(u32::MAX)
    }
}
