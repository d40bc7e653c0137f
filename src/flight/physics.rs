use crate::aircraft::AircraftProfile;
use crate::flight::input::MAX_PITCH;
use crate::flight::state::SimulationState;

pub const CEILING: f64 = 20.0;
pub const CRASH_ALTITUDE: f64 = 460.0;
/// Score reported with every completed flight.
pub const COMPLETION_SCORE: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepResult {
    Flying,
    Crashed,
    Completed { score: u32 },
    /// The state was already terminal; nothing moved.
    Halted,
}

impl StepResult {
    pub fn is_terminal(self) -> bool {
        !matches!(self, StepResult::Flying)
    }
}

pub fn vertical_speed(pitch: f64, turn_rate: f64) -> f64 {
    (pitch / MAX_PITCH) * (turn_rate * 2.0)
}

/// Advance the state by one tick. A terminal state is left untouched.
pub fn step(state: &mut SimulationState, profile: &AircraftProfile, flight_distance: f64) -> StepResult {
    if state.terminal {
        return StepResult::Halted;
    }

    state.altitude += vertical_speed(state.pitch, profile.turn_rate);
    state.distance += profile.speed.max(0.0);

    if state.altitude < CEILING {
        state.altitude = CEILING;
    }

    // Crash is checked first so it wins a same-tick tie with completion.
    if state.altitude > CRASH_ALTITUDE {
        state.terminal = true;
        return StepResult::Crashed;
    }

    if state.distance >= flight_distance {
        state.terminal = true;
        return StepResult::Completed { score: COMPLETION_SCORE };
    }

    StepResult::Flying
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::CATALOG;
    use crate::flight::state::{FLIGHT_DISTANCE, START_ALTITUDE};
    use approx::assert_relative_eq;

    fn step_default(state: &mut SimulationState, profile: &AircraftProfile) -> StepResult {
        step(state, profile, FLIGHT_DISTANCE)
    }

    fn level_state() -> SimulationState {
        SimulationState {
            distance: 0.0,
            altitude: START_ALTITUDE,
            pitch: 0.0,
            clouds: Vec::new(),
            terminal: false,
        }
    }

    fn cessna() -> &'static AircraftProfile {
        &CATALOG[0]
    }

    #[test]
    fn vertical_speed_scales_with_pitch_and_turn_rate() {
        assert_relative_eq!(vertical_speed(45.0, 2.0), 4.0);
        assert_relative_eq!(vertical_speed(-45.0, 2.0), -4.0);
        assert_relative_eq!(vertical_speed(22.5, 1.5), 1.5);
        assert_relative_eq!(vertical_speed(0.0, 5.0), 0.0);
    }

    #[test]
    fn level_flight_holds_altitude_and_completes_after_1000_ticks() {
        let mut state = level_state();
        let mut completions = 0;
        let mut ticks = 0;
        loop {
            let before = state.distance;
            let result = step_default(&mut state, cessna());
            ticks += 1;
            assert!(state.distance >= before);
            assert_eq!(state.altitude, START_ALTITUDE);
            match result {
                StepResult::Flying => {}
                StepResult::Completed { score } => {
                    assert_eq!(score, 100);
                    completions += 1;
                    break;
                }
                other => panic!("unexpected step result {:?}", other),
            }
            assert!(ticks < 5000);
        }
        assert_eq!(ticks, 1000);
        assert_eq!(completions, 1);
        assert!(state.terminal);
    }

    #[test]
    fn sustained_dive_crashes_after_53_ticks() {
        let mut state = level_state();
        state.pitch = 45.0;
        let mut ticks = 0;
        let mut previous = state.altitude;
        let result = loop {
            let result = step_default(&mut state, cessna());
            ticks += 1;
            if result.is_terminal() {
                break result;
            }
            assert!(state.altitude > previous);
            previous = state.altitude;
        };
        assert_eq!(result, StepResult::Crashed);
        assert_eq!(ticks, 53);
        assert_relative_eq!(state.altitude, 462.0);
    }

    #[test]
    fn sustained_climb_pins_at_ceiling() {
        let mut state = level_state();
        state.pitch = -45.0;
        for _ in 0..200 {
            step(&mut state, cessna(), f64::MAX);
            assert!(state.altitude >= CEILING);
        }
        assert_eq!(state.altitude, 20.0);
    }

    #[test]
    fn crash_wins_a_tie_with_completion() {
        let mut state = level_state();
        state.altitude = 459.0;
        state.pitch = 45.0;
        state.distance = FLIGHT_DISTANCE - 1.0;
        assert_eq!(step_default(&mut state, cessna()), StepResult::Crashed);
    }

    #[test]
    fn terminal_state_is_frozen() {
        let mut state = level_state();
        state.terminal = true;
        let snapshot = (state.distance, state.altitude);
        assert_eq!(step_default(&mut state, cessna()), StepResult::Halted);
        assert_eq!((state.distance, state.altitude), snapshot);
    }

    #[test]
    fn exact_crash_threshold_is_still_flying() {
        let mut state = level_state();
        state.altitude = 456.0;
        state.pitch = 45.0;
        assert_eq!(step_default(&mut state, cessna()), StepResult::Flying);
        assert_relative_eq!(state.altitude, 460.0);
    }
}
