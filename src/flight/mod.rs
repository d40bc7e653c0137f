pub mod clock;
pub mod input;
pub mod physics;
pub mod render;
pub mod state;

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::aircraft::AircraftProfile;
use clock::{FlightHandlers, SimulationClock, TickStatus};
use input::PitchCommand;
use state::START_ALTITUDE;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlightOutcome {
    Completed { score: u32 },
    Crashed,
}

/// The flight screen: owns the clock while a flight is on, and routes pitch
/// input to it. Input is only honoured while a flight is armed.
pub struct FlightView {
    clock: SimulationClock,
    viewport: Rect,
}

impl FlightView {
    pub fn new() -> Self {
        Self {
            clock: SimulationClock::new(),
            viewport: Rect::default(),
        }
    }

    pub fn start_flight(
        &mut self,
        profile: &'static AircraftProfile,
        on_complete: impl FnOnce(u32) + 'static,
        on_crash: impl FnOnce() + 'static,
    ) {
        let mut rng = rand::thread_rng();
        self.clock.start(
            profile,
            START_ALTITUDE,
            FlightHandlers::new(on_complete, on_crash),
            &mut rng,
        );
    }

    /// Teardown: cancels the pending tick and detaches input in one step.
    pub fn leave(&mut self) {
        self.clock.stop();
        self.viewport = Rect::default();
    }

    pub fn is_active(&self) -> bool {
        self.clock.is_running()
    }

    pub fn update(&mut self) -> TickStatus {
        self.clock.tick()
    }

    pub fn handle_input(&mut self, key: KeyEvent) {
        let Some(cmd) = PitchCommand::from_key(&key) else {
            return;
        };
        if let Some(state) = self.clock.state_mut() {
            state.pitch = input::apply_key(state.pitch, cmd);
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left)
            || !self.viewport.contains(Position::new(mouse.column, mouse.row))
        {
            return;
        }
        let cmd = PitchCommand::from_tap(mouse.row, self.viewport.y, self.viewport.height);
        if let Some(state) = self.clock.state_mut() {
            state.pitch = input::apply_tap(state.pitch, cmd);
        }
    }

    pub fn state(&self) -> Option<&state::SimulationState> {
        self.clock.state()
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (Some(state), Some(profile)) = (self.clock.state(), self.clock.profile()) else {
            self.viewport = Rect::default();
            return;
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(255, 255, 255)))
            .title(format!(" {} {} ", profile.glyph, profile.name))
            .title_style(
                Style::default()
                    .fg(Color::Rgb(120, 200, 255))
                    .add_modifier(Modifier::BOLD),
            )
            .title_bottom(Line::from(Span::styled(
                " ↑/↓ or click upper/lower half · Esc abort ",
                Style::default().fg(Color::DarkGray),
            )));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.viewport = inner;
        render::render_flight(frame, inner, state, profile);
    }
}

impl Default for FlightView {
    fn default() -> Self {
        Self::new()
    }
}
