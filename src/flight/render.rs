use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::aircraft::AircraftProfile;
use crate::flight::state::{Cloud, SimulationState, FLIGHT_DISTANCE, SCENE_HEIGHT, SCENE_WIDTH};

/// Screen x (logical units) the aircraft is pinned to.
pub const AIRCRAFT_X: f64 = 100.0;
const CLOUD_LEAD: f64 = 100.0;
const CULL_MARGIN: f64 = 100.0;
const GROUND_TOP: f64 = 480.0;
const GROUND_COLOR: Color = Color::Rgb(34, 197, 94);
const BAR_HALF_LEN: i32 = 3;
const BAR_SPACING: f64 = 14.0;

pub const CAPTION: &str = "ARROW UP to Climb | DOWN to Dive";

type Cell = (&'static str, Style);

/// Darker near the ground, brighter blue up high.
pub fn sky_color(altitude: f64) -> (u8, u8, u8) {
    let f = (1.0 - altitude / SCENE_HEIGHT).clamp(0.0, 1.0);
    (
        (70.0 * f) as u8,
        (130.0 * f) as u8,
        (200.0 + 50.0 * (1.0 - f)) as u8,
    )
}

pub fn cloud_screen_x(cloud: &Cloud, distance: f64) -> f64 {
    cloud.x - distance + CLOUD_LEAD
}

pub fn cloud_visible(draw_x: f64) -> bool {
    draw_x > -CULL_MARGIN && draw_x < SCENE_WIDTH + CULL_MARGIN
}

fn blend(base: (u8, u8, u8), top: (u8, u8, u8), alpha: f64) -> Color {
    let mix = |a: u8, b: u8| (a as f64 * (1.0 - alpha) + b as f64 * alpha).round() as u8;
    Color::Rgb(mix(base.0, top.0), mix(base.1, top.1), mix(base.2, top.2))
}

/// Terminal columns the glyph occupies. Emoji with a text default (🛩, ✈)
/// are one column, wide emoji (🛫, 🚀) two.
fn glyph_width(glyph: &str) -> usize {
    Span::raw(glyph).width()
}

struct Viewport {
    cols: usize,
    rows: usize,
}

impl Viewport {
    fn unit_w(&self) -> f64 {
        SCENE_WIDTH / self.cols as f64
    }

    fn unit_h(&self) -> f64 {
        SCENE_HEIGHT / self.rows as f64
    }

    fn col(&self, x: f64) -> Option<usize> {
        let c = (x / self.unit_w()).floor();
        (c >= 0.0 && (c as usize) < self.cols).then_some(c as usize)
    }

    fn row(&self, y: f64) -> Option<usize> {
        let r = (y / self.unit_h()).floor();
        (r >= 0.0 && (r as usize) < self.rows).then_some(r as usize)
    }

    fn center(&self, col: usize, row: usize) -> (f64, f64) {
        ((col as f64 + 0.5) * self.unit_w(), (row as f64 + 0.5) * self.unit_h())
    }
}

/// Rasterize the 800x500 scene into `cols` x `rows` terminal cells.
/// Returns no lines for an empty surface.
pub fn render_scene(
    state: &SimulationState,
    profile: &AircraftProfile,
    cols: usize,
    rows: usize,
) -> Vec<Line<'static>> {
    if cols == 0 || rows == 0 {
        return Vec::new();
    }
    let vp = Viewport { cols, rows };

    let sky = sky_color(state.altitude);
    let sky_style = Style::default().bg(Color::Rgb(sky.0, sky.1, sky.2));
    let mut grid: Vec<Vec<Cell>> = vec![vec![(" ", sky_style); cols]; rows];

    // Clouds: three overlapping puffs each, 70% white over the sky.
    let cloud_bg = blend(sky, (255, 255, 255), 0.7);
    for cloud in &state.clouds {
        let draw_x = cloud_screen_x(cloud, state.distance);
        if !cloud_visible(draw_x) {
            continue;
        }
        let puffs = [
            (draw_x, cloud.y, 30.0 * cloud.scale),
            (draw_x + 20.0, cloud.y - 10.0, 35.0 * cloud.scale),
            (draw_x + 40.0, cloud.y, 30.0 * cloud.scale),
        ];
        for (row, line) in grid.iter_mut().enumerate() {
            for (col, cell) in line.iter_mut().enumerate() {
                let (cx, cy) = vp.center(col, row);
                let inside = puffs.iter().any(|&(px, py, r)| {
                    let dx = cx - px;
                    let dy = cy - py;
                    dx * dx + dy * dy <= r * r
                });
                if inside {
                    *cell = (" ", Style::default().bg(cloud_bg));
                }
            }
        }
    }

    // Ground band.
    for (row, line) in grid.iter_mut().enumerate() {
        let (_, cy) = vp.center(0, row);
        if cy >= GROUND_TOP {
            for cell in line.iter_mut() {
                *cell = ("▀", Style::default().fg(Color::Rgb(22, 163, 74)).bg(GROUND_COLOR));
            }
        }
    }

    draw_aircraft(&mut grid, &vp, state, profile);

    grid.into_iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .into_iter()
                .map(|(ch, style)| Span::styled(ch, style))
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Heading bar through the aircraft, rotated by pitch, with the glyph on top.
fn draw_aircraft(grid: &mut [Vec<Cell>], vp: &Viewport, state: &SimulationState, profile: &AircraftProfile) {
    let angle = state.pitch.to_radians();
    let (sin, cos) = angle.sin_cos();
    let bar = if state.pitch.abs() < 12.0 {
        "─"
    } else if state.pitch > 0.0 {
        "╲"
    } else {
        "╱"
    };
    let bar_style = Style::default().fg(Color::Rgb(240, 240, 250)).add_modifier(Modifier::BOLD);

    for i in -BAR_HALF_LEN..=BAR_HALF_LEN {
        if i == 0 {
            continue;
        }
        let x = AIRCRAFT_X + i as f64 * BAR_SPACING * cos;
        let y = state.altitude + i as f64 * BAR_SPACING * sin;
        if let (Some(c), Some(r)) = (vp.col(x), vp.row(y)) {
            let style = grid[r][c].1.patch(bar_style);
            grid[r][c] = (bar, style);
        }
    }

    if let (Some(c), Some(r)) = (vp.col(AIRCRAFT_X), vp.row(state.altitude)) {
        let wide = glyph_width(profile.glyph) == 2;
        // A wide glyph needs the neighbouring column too.
        if wide && c + 1 >= grid[r].len() {
            return;
        }
        let style = grid[r][c].1.add_modifier(Modifier::BOLD);
        grid[r][c] = (profile.glyph, style);
        if wide {
            grid[r][c + 1].0 = "";
        }
    }
}

pub fn hud_lines(state: &SimulationState) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    vec![
        Line::from(Span::styled(format!("ALTITUDE: {} ft", state.display_altitude()), label)),
        Line::from(Span::styled(
            format!("DIST: {} / {}", state.distance.floor() as i64, FLIGHT_DISTANCE as i64),
            label,
        )),
        // The HUD reports nose-up as positive.
        Line::from(Span::styled(format!("PITCH: {}°", -state.pitch + 0.0), label)),
    ]
}

/// Paint one frame of the flight into `area`. A zero-sized area is skipped.
pub fn render_flight(frame: &mut Frame, area: Rect, state: &SimulationState, profile: &AircraftProfile) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let lines = render_scene(state, profile, area.width as usize, area.height as usize);
    frame.render_widget(Paragraph::new(lines), area);

    let hud_area = Rect::new(area.x + 1, area.y + 1, 26u16.min(area.width.saturating_sub(1)), 3u16.min(area.height.saturating_sub(1)));
    frame.render_widget(Paragraph::new(hud_lines(state)), hud_area);

    let caption_w = (CAPTION.chars().count() as u16 + 4).min(area.width);
    let caption_area = Rect::new(area.x + (area.width - caption_w) / 2, area.y, caption_w, 1);
    let caption = Paragraph::new(Line::from(Span::styled(
        CAPTION,
        Style::default().fg(Color::White).bg(Color::Rgb(20, 20, 30)).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .style(Style::default().bg(Color::Rgb(20, 20, 30)));
    frame.render_widget(caption, caption_area);
}
