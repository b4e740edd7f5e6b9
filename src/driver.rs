//! Wall-clock driving of a [`Game`]
//!
//! The only place that looks at time. Each frame applies at most one action
//! and at most one gravity step.

use crate::game::{Action, Game, Mode};
use std::ops::ControlFlow;
use std::time::{Duration, Instant};

/// Elapsed-time trigger for gravity
#[derive(Debug, Clone, Copy)]
pub struct GravityTimer {
    last: Instant,
}

impl GravityTimer {
    pub fn new(now: Instant) -> Self {
        Self { last: now }
    }

    /// True once `interval` has passed since the last step; rearms when it fires
    pub fn due(&mut self, now: Instant, interval: Duration) -> bool {
        if now.saturating_duration_since(self.last) >= interval {
            self.last = now;
            true
        } else {
            false
        }
    }

    /// Forget any time accumulated so far
    pub fn rearm(&mut self, now: Instant) {
        self.last = now;
    }
}

/// A game plus its gravity clock
#[derive(Debug, Clone)]
pub struct Driver {
    game: Game,
    timer: GravityTimer,
}

impl Driver {
    pub fn new(game: Game, now: Instant) -> Self {
        Self {
            game,
            timer: GravityTimer::new(now),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run one loop iteration at `now`. `Break` means quit.
    pub fn frame(&mut self, now: Instant, action: Option<Action>) -> ControlFlow<()> {
        let was_running = self.game.mode() == Mode::Running;

        if let Some(action) = action {
            self.game.process_action(action)?;
        }

        // Time spent paused (or over) never turns into gravity debt
        if was_running && self.game.mode() == Mode::Running {
            if self.timer.due(now, self.game.gravity_interval()) {
                self.game.gravity_tick();
            }
        } else {
            self.timer.rearm(now);
        }

        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::EngineConfig;

    fn driver(start: Instant) -> Driver {
        Driver::new(Game::with_seed(EngineConfig::default(), 11), start)
    }

    #[test]
    fn test_timer_fires_after_interval() {
        let start = Instant::now();
        let mut timer = GravityTimer::new(start);
        let interval = Duration::from_millis(600);
        assert!(!timer.due(start + Duration::from_millis(599), interval));
        assert!(timer.due(start + Duration::from_millis(600), interval));
        // Rearmed at 600ms
        assert!(!timer.due(start + Duration::from_millis(1000), interval));
        assert!(timer.due(start + Duration::from_millis(1200), interval));
    }

    #[test]
    fn test_gravity_moves_piece_once_per_interval() {
        let start = Instant::now();
        let mut driver = driver(start);
        let y0 = driver.game().current().y;

        let _ = driver.frame(start + Duration::from_millis(100), None);
        assert_eq!(driver.game().current().y, y0);

        let _ = driver.frame(start + Duration::from_millis(600), None);
        assert_eq!(driver.game().current().y, y0 + 1);

        // A long stall still yields a single step per frame
        let _ = driver.frame(start + Duration::from_secs(10), None);
        assert_eq!(driver.game().current().y, y0 + 2);
    }

    #[test]
    fn test_pause_freezes_piece_regardless_of_elapsed_time() {
        let start = Instant::now();
        let mut driver = driver(start);
        let _ = driver.frame(start + Duration::from_millis(300), Some(Action::TogglePause));
        assert_eq!(driver.game().mode(), Mode::Paused);
        let before = driver.game().current().clone();

        for secs in [1, 5, 60, 3600] {
            let _ = driver.frame(start + Duration::from_secs(secs), None);
            assert_eq!(driver.game().current(), &before);
        }

        // Unpausing does not cash in the paused time
        let resume = start + Duration::from_secs(7200);
        let _ = driver.frame(resume, Some(Action::TogglePause));
        assert_eq!(driver.game().mode(), Mode::Running);
        assert_eq!(driver.game().current(), &before);

        let _ = driver.frame(resume + Duration::from_millis(599), None);
        assert_eq!(driver.game().current(), &before);
        let _ = driver.frame(resume + Duration::from_millis(600), None);
        assert_eq!(driver.game().current().y, before.y + 1);
    }

    #[test]
    fn test_unpause_after_long_gap_without_frames() {
        let start = Instant::now();
        let mut driver = driver(start);
        let _ = driver.frame(start, Some(Action::TogglePause));
        let before = driver.game().current().clone();

        let _ = driver.frame(start + Duration::from_secs(30), Some(Action::TogglePause));
        assert_eq!(driver.game().current(), &before);
    }

    #[test]
    fn test_quit_breaks_loop() {
        let start = Instant::now();
        let mut driver = driver(start);
        assert_eq!(driver.frame(start, None), ControlFlow::Continue(()));
        assert_eq!(
            driver.frame(start, Some(Action::Quit)),
            ControlFlow::Break(())
        );
    }
}
