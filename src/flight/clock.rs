use rand::Rng;
use tracing::{debug, info};

use crate::aircraft::AircraftProfile;
use crate::flight::physics::{self, StepResult};
use crate::flight::state::{SimulationState, FLIGHT_DISTANCE};

/// One-shot outcome callbacks. At most one of them ever runs.
pub struct FlightHandlers {
    on_complete: Box<dyn FnOnce(u32)>,
    on_crash: Box<dyn FnOnce()>,
}

impl FlightHandlers {
    pub fn new(on_complete: impl FnOnce(u32) + 'static, on_crash: impl FnOnce() + 'static) -> Self {
        Self {
            on_complete: Box::new(on_complete),
            on_crash: Box::new(on_crash),
        }
    }
}

struct ActiveFlight {
    state: SimulationState,
    profile: &'static AircraftProfile,
    handlers: FlightHandlers,
    ticks: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickStatus {
    /// No flight is armed.
    Idle,
    Running,
    Ended,
}

/// Drives one flight per host tick. The state lives only while the flight
/// is armed, so nothing can update it after a crash, completion or stop.
pub struct SimulationClock {
    active: Option<ActiveFlight>,
    flight_distance: f64,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::with_distance(FLIGHT_DISTANCE)
    }

    pub fn with_distance(flight_distance: f64) -> Self {
        Self {
            active: None,
            flight_distance,
        }
    }

    pub fn start<R: Rng + ?Sized>(
        &mut self,
        profile: &'static AircraftProfile,
        initial_altitude: f64,
        handlers: FlightHandlers,
        rng: &mut R,
    ) {
        if self.active.is_some() {
            debug!("replacing active flight");
            self.stop();
        }
        info!(aircraft = profile.id, "flight started");
        self.active = Some(ActiveFlight {
            state: SimulationState::new(initial_altitude, rng),
            profile,
            handlers,
            ticks: 0,
        });
    }

    pub fn tick(&mut self) -> TickStatus {
        let Some(flight) = self.active.as_mut() else {
            return TickStatus::Idle;
        };

        flight.ticks += 1;
        let result = physics::step(&mut flight.state, flight.profile, self.flight_distance);
        if !result.is_terminal() {
            return TickStatus::Running;
        }

        // Disarm before notifying so a handler can never observe a live flight.
        let Some(flight) = self.active.take() else {
            return TickStatus::Idle;
        };
        match result {
            StepResult::Crashed => {
                info!(aircraft = flight.profile.id, ticks = flight.ticks, "flight crashed");
                (flight.handlers.on_crash)();
            }
            StepResult::Completed { score } => {
                info!(aircraft = flight.profile.id, ticks = flight.ticks, score, "flight completed");
                (flight.handlers.on_complete)(score);
            }
            StepResult::Flying | StepResult::Halted => {}
        }
        TickStatus::Ended
    }

    /// Cancel the flight without firing any handler. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if let Some(flight) = self.active.take() {
            info!(aircraft = flight.profile.id, ticks = flight.ticks, "flight cancelled");
        }
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn state(&self) -> Option<&SimulationState> {
        self.active.as_ref().map(|f| &f.state)
    }

    pub fn state_mut(&mut self) -> Option<&mut SimulationState> {
        self.active.as_mut().map(|f| &mut f.state)
    }

    pub fn profile(&self) -> Option<&'static AircraftProfile> {
        self.active.as_ref().map(|f| f.profile)
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::CATALOG;
    use crate::flight::state::START_ALTITUDE;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Default)]
    struct Outcomes {
        completed: Cell<u32>,
        crashed: Cell<u32>,
        score: RefCell<Option<u32>>,
    }

    fn armed_clock(outcomes: &Rc<Outcomes>) -> SimulationClock {
        let mut clock = SimulationClock::new();
        let done = Rc::clone(outcomes);
        let crash = Rc::clone(outcomes);
        let handlers = FlightHandlers::new(
            move |score| {
                done.completed.set(done.completed.get() + 1);
                *done.score.borrow_mut() = Some(score);
            },
            move || crash.crashed.set(crash.crashed.get() + 1),
        );
        let mut rng = StdRng::seed_from_u64(1);
        clock.start(&CATALOG[0], START_ALTITUDE, handlers, &mut rng);
        clock
    }

    #[test]
    fn level_flight_completes_once_after_1000_ticks() {
        let outcomes = Rc::new(Outcomes::default());
        let mut clock = armed_clock(&outcomes);

        let mut ticks = 0;
        while clock.tick() == TickStatus::Running {
            ticks += 1;
        }
        ticks += 1;
        assert_eq!(ticks, 1000);

        for _ in 0..50 {
            assert_eq!(clock.tick(), TickStatus::Idle);
        }
        assert_eq!(outcomes.completed.get(), 1);
        assert_eq!(outcomes.crashed.get(), 0);
        assert_eq!(*outcomes.score.borrow(), Some(100));
        assert!(clock.state().is_none());
    }

    #[test]
    fn full_dive_crashes_once_after_53_ticks() {
        let outcomes = Rc::new(Outcomes::default());
        let mut clock = armed_clock(&outcomes);
        if let Some(state) = clock.state_mut() {
            state.pitch = 45.0;
        }

        let mut ticks = 0;
        loop {
            ticks += 1;
            if clock.tick() == TickStatus::Ended {
                break;
            }
        }
        assert_eq!(ticks, 53);
        clock.tick();
        assert_eq!(outcomes.crashed.get(), 1);
        assert_eq!(outcomes.completed.get(), 0);
    }

    #[test]
    fn stop_is_idempotent_and_silences_handlers() {
        let outcomes = Rc::new(Outcomes::default());
        let mut clock = armed_clock(&outcomes);
        assert_eq!(clock.tick(), TickStatus::Running);

        clock.stop();
        clock.stop();
        assert!(!clock.is_running());
        for _ in 0..2000 {
            assert_eq!(clock.tick(), TickStatus::Idle);
        }
        assert_eq!(outcomes.completed.get(), 0);
        assert_eq!(outcomes.crashed.get(), 0);
    }

    #[test]
    fn restarting_discards_the_previous_flight_silently() {
        let first = Rc::new(Outcomes::default());
        let mut clock = armed_clock(&first);
        for _ in 0..10 {
            clock.tick();
        }

        let second = Rc::new(Outcomes::default());
        let done = Rc::clone(&second);
        let mut rng = StdRng::seed_from_u64(2);
        clock.start(
            &CATALOG[3],
            START_ALTITUDE,
            FlightHandlers::new(move |_| done.completed.set(done.completed.get() + 1), || {}),
            &mut rng,
        );
        assert_eq!(clock.state().map(|s| s.distance), Some(0.0));
        assert_eq!(clock.profile().map(|p| p.id), Some("p4"));

        while clock.tick() == TickStatus::Running {}
        assert_eq!(first.completed.get(), 0);
        assert_eq!(second.completed.get(), 1);
    }

    #[test]
    fn distance_never_decreases_across_ticks() {
        let outcomes = Rc::new(Outcomes::default());
        let mut clock = armed_clock(&outcomes);
        let mut last = 0.0;
        while let Some(distance) = clock.state().map(|s| s.distance) {
            assert!(distance >= last);
            last = distance;
            clock.tick();
        }
    }
}
