use crossterm::event::{KeyCode, KeyEvent};

pub const MAX_PITCH: f64 = 45.0;
const KEY_STEP: f64 = 5.0;
const TAP_STEP: f64 = 15.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PitchCommand {
    Climb,
    Dive,
}

impl PitchCommand {
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        match key.code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Some(PitchCommand::Climb),
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Some(PitchCommand::Dive),
            _ => None,
        }
    }

    /// Upper half of the viewport climbs, lower half dives.
    pub fn from_tap(row: u16, viewport_top: u16, viewport_height: u16) -> Self {
        let rel = row.saturating_sub(viewport_top);
        if (rel as u32) * 2 < viewport_height as u32 {
            PitchCommand::Climb
        } else {
            PitchCommand::Dive
        }
    }

    fn sign(self) -> f64 {
        // Negative pitch noses up.
        match self {
            PitchCommand::Climb => -1.0,
            PitchCommand::Dive => 1.0,
        }
    }
}

pub fn clamp_pitch(pitch: f64) -> f64 {
    pitch.clamp(-MAX_PITCH, MAX_PITCH)
}

/// One key press (or terminal key repeat) moves the nose by 5 degrees.
pub fn apply_key(pitch: f64, cmd: PitchCommand) -> f64 {
    clamp_pitch(pitch + cmd.sign() * KEY_STEP)
}

/// A tap moves the nose by 15 degrees.
pub fn apply_tap(pitch: f64, cmd: PitchCommand) -> f64 {
    clamp_pitch(pitch + cmd.sign() * TAP_STEP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn arrow_keys_map_to_climb_and_dive() {
        let up = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        let other = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(PitchCommand::from_key(&up), Some(PitchCommand::Climb));
        assert_eq!(PitchCommand::from_key(&down), Some(PitchCommand::Dive));
        assert_eq!(PitchCommand::from_key(&other), None);
    }

    #[test]
    fn climb_lowers_pitch_and_dive_raises_it() {
        assert_eq!(apply_key(0.0, PitchCommand::Climb), -5.0);
        assert_eq!(apply_key(0.0, PitchCommand::Dive), 5.0);
        assert_eq!(apply_tap(0.0, PitchCommand::Climb), -15.0);
        assert_eq!(apply_tap(0.0, PitchCommand::Dive), 15.0);
    }

    #[test]
    fn pitch_saturates_at_both_limits() {
        let mut pitch = 0.0;
        for _ in 0..50 {
            pitch = apply_key(pitch, PitchCommand::Dive);
            assert!((-MAX_PITCH..=MAX_PITCH).contains(&pitch));
        }
        assert_eq!(pitch, 45.0);

        for _ in 0..20 {
            pitch = apply_tap(pitch, PitchCommand::Climb);
            assert!((-MAX_PITCH..=MAX_PITCH).contains(&pitch));
        }
        assert_eq!(pitch, -45.0);

        // 40 + 15 saturates instead of overshooting.
        assert_eq!(apply_tap(40.0, PitchCommand::Dive), 45.0);
    }

    #[test]
    fn mixed_inputs_never_leave_range() {
        let mut pitch = 0.0;
        let pattern = [
            PitchCommand::Dive,
            PitchCommand::Dive,
            PitchCommand::Climb,
            PitchCommand::Dive,
        ];
        for i in 0..200 {
            let cmd = pattern[i % pattern.len()];
            pitch = if i % 3 == 0 { apply_tap(pitch, cmd) } else { apply_key(pitch, cmd) };
            assert!((-MAX_PITCH..=MAX_PITCH).contains(&pitch));
        }
    }

    #[test]
    fn tap_direction_follows_viewport_half() {
        // Viewport spans rows 2..22.
        assert_eq!(PitchCommand::from_tap(2, 2, 20), PitchCommand::Climb);
        assert_eq!(PitchCommand::from_tap(11, 2, 20), PitchCommand::Climb);
        assert_eq!(PitchCommand::from_tap(12, 2, 20), PitchCommand::Dive);
        assert_eq!(PitchCommand::from_tap(21, 2, 20), PitchCommand::Dive);
    }
}
