use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::timer::Scheduler;

/// Gameplay constants, fixed at startup. Coordinates are logical units;
/// the TUI layer scales them onto terminal cells.
#[derive(Clone, Copy)]
pub struct Config {
    pub width: f32,
    pub height: f32,
    pub radius: f32,
    /// Vertical strip at the top reserved for the score/time display;
    /// targets never spawn overlapping it.
    pub ui_margin: f32,
    pub start_time: u32,
    pub initial_interval_ms: u64,
    pub speed_multiplier: f64,
    pub min_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 400.0,
            radius: 25.0,
            ui_margin: 20.0,
            start_time: 30,
            initial_interval_ms: 1000,
            speed_multiplier: 0.9,
            min_interval_ms: 100,
        }
    }
}

const COUNTDOWN_MS: u64 = 1000;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Timer {
    Countdown,
    Move,
}

/// The whole game: one target, one clock, two recurring timers.
///
/// A fixed 1-second countdown timer and a move timer (whose cadence shrinks
/// with every hit) run independently once started, and both decrement the
/// remaining time. The clock therefore runs down at roughly two units per
/// real second at base rate, faster once the move interval shrinks. That is
/// inherited behavior and preserved deliberately.
///
/// Time is virtual: the owner pumps `advance` with elapsed milliseconds and
/// the internal scheduler dispatches whatever came due, so the game runs
/// headless in tests.
pub struct ClickGame {
    cfg: Config,
    score: u32,
    time_left: u32,
    /// Move interval in ms, kept fractional between hits so repeated
    /// shrinking follows 1000 * 0.9^n; floored whenever scheduling.
    interval: f64,
    running: bool,
    over: bool,
    target: (f32, f32),
    rng: StdRng,
    scheduler: Scheduler<Timer>,
}

impl ClickGame {
    pub fn new() -> Self {
        Self::with_rng(Config::default(), StdRng::from_entropy())
    }

    fn with_rng(cfg: Config, rng: StdRng) -> Self {
        let mut game = Self {
            cfg,
            score: 0,
            time_left: cfg.start_time,
            interval: cfg.initial_interval_ms as f64,
            running: false,
            over: false,
            target: (cfg.width / 2.0, cfg.height / 2.0),
            rng,
            scheduler: Scheduler::new(),
        };
        game.spawn_target();
        game
    }

    /// Starts a run. No-op while one is already in progress, so a second
    /// press can never double up the timers. The target keeps its current
    /// position until the first move tick relocates it.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.over = false;
        self.score = 0;
        self.time_left = self.cfg.start_time;
        self.interval = self.cfg.initial_interval_ms as f64;
        self.scheduler.schedule_in(COUNTDOWN_MS, Timer::Countdown);
        self.scheduler.schedule_in(self.move_interval_ms(), Timer::Move);
    }

    /// Stops the game and restores the initial state, with one fresh target
    /// on the field. Pending timers from the old run are dropped outright;
    /// the `running` guards in the tick handlers are the backstop should
    /// one ever slip through.
    pub fn reset(&mut self) {
        self.running = false;
        self.over = false;
        self.score = 0;
        self.time_left = self.cfg.start_time;
        self.interval = self.cfg.initial_interval_ms as f64;
        self.scheduler.cancel_all();
        self.spawn_target();
    }

    /// A click on the field, in logical coordinates. Ignored unless the
    /// game is running; a click exactly on the target's edge counts as a
    /// hit, anything further out is ignored (no miss penalty).
    pub fn on_field_click(&mut self, x: f32, y: f32) {
        if !self.running {
            return;
        }
        let (tx, ty) = self.target;
        let (dx, dy) = (x - tx, y - ty);
        if dx * dx + dy * dy <= self.cfg.radius * self.cfg.radius {
            self.score += 1;
            self.interval =
                (self.interval * self.cfg.speed_multiplier).max(self.cfg.min_interval_ms as f64);
            self.spawn_target();
        }
    }

    /// Advances the virtual clock and dispatches every timer that came due,
    /// in deadline order. Call with wall-clock deltas from the event loop,
    /// or with synthetic deltas in tests.
    pub fn advance(&mut self, dt_ms: u64) {
        self.scheduler.advance(dt_ms);
        while let Some(fired) = self.scheduler.pop_due() {
            match fired.task {
                Timer::Countdown => self.countdown_tick(fired.due_ms),
                Timer::Move => self.move_tick(fired.due_ms),
            }
        }
    }

    fn countdown_tick(&mut self, due_ms: u64) {
        if !self.running {
            return;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.end_game();
            return;
        }
        self.scheduler.schedule_at(due_ms + COUNTDOWN_MS, Timer::Countdown);
    }

    fn move_tick(&mut self, due_ms: u64) {
        if !self.running {
            return;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.end_game();
            return;
        }
        self.spawn_target();
        // Reschedule with the current interval, so hits mid-run speed up
        // this timer's own cadence too.
        self.scheduler.schedule_at(due_ms + self.move_interval_ms(), Timer::Move);
    }

    fn end_game(&mut self) {
        self.running = false;
        self.over = true;
        self.scheduler.cancel_all();
    }

    /// Relocates the target to a uniformly random in-bounds position,
    /// replacing the old one. There is never more than one target.
    fn spawn_target(&mut self) {
        let x = self
            .rng
            .gen_range(self.cfg.radius..=self.cfg.width - self.cfg.radius);
        let y = self
            .rng
            .gen_range(self.cfg.radius + self.cfg.ui_margin..=self.cfg.height - self.cfg.radius);
        self.target = (x, y);
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn target(&self) -> (f32, f32) {
        self.target
    }

    /// The move interval as observed: `floor` of the fractional value,
    /// never below the configured minimum.
    pub fn move_interval_ms(&self) -> u64 {
        self.interval.floor() as u64
    }

    pub fn config(&self) -> Config {
        self.cfg
    }
}
