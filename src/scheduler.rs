use crate::cue::Cue;

use std::time::Duration;

/// Outcome of one scheduling check.
#[derive(Debug, PartialEq)]
pub enum Tick<'a> {
    /// The next cue is not due yet, or no cues are left.
    Unchanged,
    /// The given cue became due and should be shown.
    Display(&'a Cue),
}

/// Clock-driven cue dispatcher.
///
/// Holds the parsed sequence and a cursor that only moves forward. The caller
/// owns the clock: elapsed time since playback started is passed into every
/// `tick`, so the machine never reads a timer and can be driven directly in
/// tests. The sequence is trusted to be in non-decreasing timestamp order and
/// is never reordered here.
pub struct Scheduler {
    cues: Vec<Cue>,
    cursor: usize,
}

impl Scheduler {
    pub fn new(cues: Vec<Cue>) -> Self {
        Self { cues, cursor: 0 }
    }

    /// Fires the next cue if its time has arrived.
    ///
    /// At most one cue fires per call, however far the clock has run ahead;
    /// each overdue cue waits for its own tick.
    pub fn tick(&mut self, elapsed: Duration) -> Tick<'_> {
        match self.cues.get(self.cursor) {
            Some(cue) if elapsed >= cue.show_at => {
                self.cursor += 1;
                Tick::Display(cue)
            }
            _ => Tick::Unchanged,
        }
    }

    pub fn is_done(&self) -> bool {
        self.cursor == self.cues.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cue(show_at: u64, text: &str) -> Cue {
        Cue {
            show_at: Duration::from_millis(show_at),
            primary: text.to_string(),
            secondary: text.to_uppercase(),
        }
    }

    #[test]
    fn fires_each_cue_exactly_once_in_order() {
        let mut scheduler = Scheduler::new(vec![cue(1000, "a"), cue(2000, "b"), cue(3000, "c")]);

        let mut fired = Vec::new();
        for elapsed in (0..=3000u64).step_by(100) {
            if let Tick::Display(cue) = scheduler.tick(Duration::from_millis(elapsed)) {
                fired.push(cue.primary.clone());
            }
        }

        assert_eq!(fired, vec!["a", "b", "c"]);
        assert!(scheduler.is_done());
    }

    #[test]
    fn waits_until_a_cue_is_due() {
        let mut scheduler = Scheduler::new(vec![cue(500, "a")]);

        assert_eq!(scheduler.tick(Duration::from_millis(0)), Tick::Unchanged);
        assert_eq!(scheduler.tick(Duration::from_millis(499)), Tick::Unchanged);
        assert!(!scheduler.is_done());
    }

    #[test]
    fn overdue_cues_fire_one_per_tick() {
        let mut scheduler = Scheduler::new(vec![cue(100, "a"), cue(110, "b"), cue(120, "c")]);
        let elapsed = Duration::from_millis(1000);

        let first = match scheduler.tick(elapsed) {
            Tick::Display(cue) => cue.primary.clone(),
            Tick::Unchanged => panic!("expected a cue to fire"),
        };
        let second = match scheduler.tick(elapsed) {
            Tick::Display(cue) => cue.primary.clone(),
            Tick::Unchanged => panic!("expected a cue to fire"),
        };

        assert_eq!(first, "a");
        assert_eq!(second, "b");
        assert!(!scheduler.is_done());
    }

    #[test]
    fn close_cues_fire_on_consecutive_ticks() {
        // Two cues 50ms apart, checked at 100ms granularity: the second fires
        // a full tick after the first, past its own timestamp, and the first
        // stays visible for only one tick.
        let mut scheduler = Scheduler::new(vec![cue(1000, "a"), cue(1050, "b")]);

        let mut fired = Vec::new();
        for elapsed in (0..=1200u64).step_by(100) {
            if let Tick::Display(cue) = scheduler.tick(Duration::from_millis(elapsed)) {
                fired.push((elapsed, cue.primary.clone()));
            }
        }

        assert_eq!(
            fired,
            vec![(1000, "a".to_string()), (1100, "b".to_string())]
        );
    }

    #[test]
    fn ticks_after_the_last_cue_are_no_ops() {
        let mut scheduler = Scheduler::new(vec![cue(0, "a")]);

        assert_ne!(scheduler.tick(Duration::from_millis(0)), Tick::Unchanged);
        assert!(scheduler.is_done());
        assert_eq!(scheduler.tick(Duration::from_millis(10_000)), Tick::Unchanged);
        assert_eq!(scheduler.tick(Duration::from_millis(20_000)), Tick::Unchanged);
        assert!(scheduler.is_done());
    }

    #[test]
    fn empty_sequence_is_done_immediately() {
        let mut scheduler = Scheduler::new(Vec::new());

        assert!(scheduler.is_done());
        assert_eq!(scheduler.tick(Duration::from_millis(0)), Tick::Unchanged);
    }
}
