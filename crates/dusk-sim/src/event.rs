//! Simulation event types and the event log.
//!
//! The simulation never prints; it records what happened here and the
//! frontend renders it however it likes.

use dusk_core::Weather;

/// What kind of simulation event occurred.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEventKind {
    /// A survival resource dropped below its critical threshold.
    NeedCritical {
        /// Which resource ("hunger", "thirst", "sleep", "stamina").
        need: &'static str,
    },
    /// A survival resource hit zero.
    NeedDepleted {
        /// Which resource.
        need: &'static str,
    },
    /// The player lost health outside combat.
    HealthLost {
        /// Amount lost.
        amount: u32,
        /// What caused it ("starvation", "bleeding", ...).
        cause: &'static str,
    },
    /// A status condition started.
    StatusGained {
        /// The condition name.
        status: &'static str,
    },
    /// A status condition ended.
    StatusCleared {
        /// The condition name.
        status: &'static str,
    },
    /// High insanity produced a hallucination. Flavor only; no mechanical
    /// effect.
    Hallucination,
    /// The weather changed.
    WeatherChanged {
        /// Previous weather.
        from: Weather,
        /// New weather.
        to: Weather,
    },
    /// A new day of survival began.
    DaySurvived {
        /// The day count just reached.
        day: u32,
    },
    /// The player died.
    PlayerDied {
        /// Cause of death.
        cause: String,
    },
    /// The player gained a level.
    LevelUp {
        /// The level just reached.
        level: u32,
    },
    /// A free-form message from a subsystem.
    Note {
        /// The message text.
        text: String,
    },
}

/// A record of something that happened during simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimEvent {
    /// Elapsed in-game hours when this happened.
    pub at_hours: f64,
    /// What happened.
    pub kind: SimEventKind,
}

/// Accumulates events during a run.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<SimEvent>,
    max_events: usize,
}

impl EventLog {
    /// Create an event log with the given capacity (0 = unlimited).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    /// Append an event, dropping the oldest when over capacity.
    pub fn emit(&mut self, at_hours: f64, kind: SimEventKind) {
        self.events.push(SimEvent { at_hours, kind });
        if self.max_events > 0 && self.events.len() > self.max_events {
            let drain = self.events.len() - self.max_events;
            self.events.drain(..drain);
        }
    }

    /// All recorded events.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_and_drain() {
        let mut log = EventLog::new(0);
        log.emit(1.0, SimEventKind::NeedCritical { need: "hunger" });
        log.emit(2.0, SimEventKind::Hallucination);
        assert_eq!(log.len(), 2);
        let drained = log.drain();
        assert_eq!(drained.len(), 2);
        assert!(log.is_empty());
    }

    #[test]
    fn capacity_drops_oldest() {
        let mut log = EventLog::new(2);
        for day in 1..=5 {
            log.emit(f64::from(day) * 24.0, SimEventKind::DaySurvived { day });
        }
        assert_eq!(log.len(), 2);
        assert_eq!(log.events()[0].kind, SimEventKind::DaySurvived { day: 4 });
        assert_eq!(log.events()[1].kind, SimEventKind::DaySurvived { day: 5 });
    }
}
