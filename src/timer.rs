/// Single-threaded timer queue over a virtual millisecond clock.
///
/// Tasks are scheduled at absolute deadlines and drained with `pop_due`
/// after the clock has been advanced. Recurring behavior is built by the
/// caller rescheduling from the fired deadline, so cadence never drifts
/// with dispatch latency. `cancel_all` drops every pending task, which is
/// how a game reset invalidates timers from the previous run.
pub struct Scheduler<T> {
    now_ms: u64,
    next_seq: u64,
    pending: Vec<Entry<T>>,
}

struct Entry<T> {
    due_ms: u64,
    seq: u64,
    task: T,
}

/// A task whose deadline has passed, along with that deadline.
pub struct Fired<T> {
    pub due_ms: u64,
    pub task: T,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            pending: Vec::new(),
        }
    }

    /// Schedules `task` to fire `delay_ms` after the current clock.
    pub fn schedule_in(&mut self, delay_ms: u64, task: T) {
        self.schedule_at(self.now_ms + delay_ms, task);
    }

    /// Schedules `task` at an absolute deadline. A deadline at or before
    /// the current clock fires on the next `pop_due`.
    pub fn schedule_at(&mut self, due_ms: u64, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Entry { due_ms, seq, task });
    }

    pub fn advance(&mut self, dt_ms: u64) {
        self.now_ms += dt_ms;
    }

    /// Removes and returns the earliest due task, FIFO among equal
    /// deadlines. `None` once nothing is due yet.
    pub fn pop_due(&mut self) -> Option<Fired<T>> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= self.now_ms)
            .min_by_key(|(_, e)| (e.due_ms, e.seq))
            .map(|(i, _)| i)?;
        let entry = self.pending.swap_remove(idx);
        Some(Fired {
            due_ms: entry.due_ms,
            task: entry.task,
        })
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_fires_before_its_deadline() {
        let mut s = Scheduler::new();
        s.schedule_in(100, "a");
        s.advance(99);
        assert!(s.pop_due().is_none());
        s.advance(1);
        assert_eq!(s.pop_due().map(|f| f.task), Some("a"));
        assert!(s.pop_due().is_none());
    }

    #[test]
    fn fires_in_deadline_order() {
        let mut s = Scheduler::new();
        s.schedule_in(300, "late");
        s.schedule_in(100, "early");
        s.schedule_in(200, "mid");
        s.advance(300);
        assert_eq!(s.pop_due().map(|f| f.task), Some("early"));
        assert_eq!(s.pop_due().map(|f| f.task), Some("mid"));
        assert_eq!(s.pop_due().map(|f| f.task), Some("late"));
    }

    #[test]
    fn equal_deadlines_fire_fifo() {
        let mut s = Scheduler::new();
        s.schedule_in(50, 1);
        s.schedule_in(50, 2);
        s.schedule_in(50, 3);
        s.advance(50);
        assert_eq!(s.pop_due().map(|f| f.task), Some(1));
        assert_eq!(s.pop_due().map(|f| f.task), Some(2));
        assert_eq!(s.pop_due().map(|f| f.task), Some(3));
    }

    #[test]
    fn fired_carries_its_deadline() {
        let mut s = Scheduler::new();
        s.schedule_in(100, ());
        s.advance(250);
        let fired = s.pop_due().unwrap();
        assert_eq!(fired.due_ms, 100);
        assert_eq!(s.now_ms, 250);
    }

    #[test]
    fn past_deadline_fires_on_next_pop() {
        let mut s = Scheduler::new();
        s.advance(500);
        s.schedule_at(200, "stale");
        assert_eq!(s.pop_due().map(|f| f.task), Some("stale"));
    }

    #[test]
    fn cancel_all_drops_everything() {
        let mut s = Scheduler::new();
        s.schedule_in(10, ());
        s.schedule_in(20, ());
        s.cancel_all();
        assert!(s.pending.is_empty());
        s.advance(100);
        assert!(s.pop_due().is_none());
    }
}
