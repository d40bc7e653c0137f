use rand::Rng;

/// Logical scene size the simulation and renderer agree on.
pub const SCENE_WIDTH: f64 = 800.0;
pub const SCENE_HEIGHT: f64 = 500.0;

/// Distance that counts as a completed flight.
pub const FLIGHT_DISTANCE: f64 = 5000.0;
pub const START_ALTITUDE: f64 = 250.0;

const CLOUD_COUNT: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cloud {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

/// Mutable per-flight state. `altitude` is a screen-space coordinate, so a
/// smaller value means the aircraft is higher up.
#[derive(Clone, Debug)]
pub struct SimulationState {
    pub distance: f64,
    pub altitude: f64,
    pub pitch: f64,
    pub clouds: Vec<Cloud>,
    pub terminal: bool,
}

impl SimulationState {
    pub fn new<R: Rng + ?Sized>(initial_altitude: f64, rng: &mut R) -> Self {
        let clouds = (0..CLOUD_COUNT)
            .map(|_| Cloud {
                x: rng.gen_range(0.0..FLIGHT_DISTANCE) + 400.0,
                y: rng.gen_range(0.0..400.0) + 50.0,
                scale: rng.gen_range(0.0..0.5) + 0.5,
            })
            .collect();

        Self {
            distance: 0.0,
            altitude: initial_altitude,
            pitch: 0.0,
            clouds,
            terminal: false,
        }
    }

    /// Altitude as shown to the pilot (bigger is higher).
    pub fn display_altitude(&self) -> i64 {
        (SCENE_HEIGHT - self.altitude).floor() as i64
    }
}
