use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::aircraft::{self, format_price, AircraftProfile};
use crate::app::{App, Tab};
use crate::store::{AccountRecord, AccountRepository};
use crate::ui::{admin, tabs};

const KEY: Color = Color::Rgb(80, 200, 255);
const DIM: Color = Color::Rgb(120, 120, 140);

pub fn render_dashboard<R: AccountRepository>(frame: &mut Frame, area: Rect, app: &App<R>) {
    let Some(user) = app.user() else {
        return;
    };

    let warnings_h = if user.warnings.is_empty() { 0 } else { user.warnings.len() as u16 + 3 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),          // Header
            Constraint::Length(warnings_h), // Warnings
            Constraint::Length(5),          // Flight deck
            Constraint::Length(3),          // Tabs
            Constraint::Min(6),             // Content
            Constraint::Length(1),          // Footer
        ])
        .split(area);

    render_header(frame, chunks[0], &user);
    if warnings_h > 0 {
        render_warnings(frame, chunks[1], &user);
    }
    render_flight_deck(frame, chunks[2], &user);
    tabs::render_tabs(frame, app.tab, user.is_admin(), chunks[3]);

    match app.tab {
        Tab::Hangar => render_hangar(frame, chunks[4], &user, &app.hangar(), app.hangar_selected),
        Tab::Dealership => render_shop(frame, chunks[4], &user, app.shop_selected),
        Tab::Admin => admin::render_admin(frame, chunks[4], app),
    }

    let footer = Paragraph::new(Line::from(vec![
        Span::styled(" F", Style::default().fg(KEY).add_modifier(Modifier::BOLD)),
        Span::styled(" Take off  ", Style::default().fg(DIM)),
        Span::styled("↑↓", Style::default().fg(KEY).add_modifier(Modifier::BOLD)),
        Span::styled(" Select  ", Style::default().fg(DIM)),
        Span::styled("Enter", Style::default().fg(KEY).add_modifier(Modifier::BOLD)),
        Span::styled(" Choose / Buy  ", Style::default().fg(DIM)),
        Span::styled("L", Style::default().fg(KEY).add_modifier(Modifier::BOLD)),
        Span::styled(" Log out  ", Style::default().fg(DIM)),
        Span::styled("Q", Style::default().fg(KEY).add_modifier(Modifier::BOLD)),
        Span::styled(" Quit", Style::default().fg(DIM)),
    ]));
    frame.render_widget(footer, chunks[5]);
}

fn render_header(frame: &mut Frame, area: Rect, user: &AccountRecord) {
    let name_style = if user.is_admin() {
        Style::default().fg(Color::Rgb(250, 204, 21)).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Rgb(200, 200, 220))
    };
    let mut spans = vec![
        Span::styled(" 👤 ", Style::default()),
        Span::styled(user.username.clone(), name_style),
    ];
    if user.is_admin() {
        spans.push(Span::styled(" (CEO)", name_style));
    }
    spans.push(Span::styled("   │   ", Style::default().fg(Color::Rgb(60, 60, 80))));
    spans.push(Span::styled("🪙 ", Style::default()));
    spans.push(Span::styled(
        format!("{} AZ", user.balance.display()),
        Style::default().fg(Color::Rgb(250, 204, 21)).add_modifier(Modifier::BOLD),
    ));

    let p = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
            .title(" ✈ SkyDeck Airlines ")
            .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(p, area);
}

fn render_warnings(frame: &mut Frame, area: Rect, user: &AccountRecord) {
    let red = Color::Rgb(248, 113, 113);
    let mut lines: Vec<Line> = user
        .warnings
        .iter()
        .map(|w| Line::from(Span::styled(format!(" • {}", w), Style::default().fg(Color::Rgb(254, 202, 202)))))
        .collect();
    lines.push(Line::from(vec![
        Span::styled(" C", Style::default().fg(red).add_modifier(Modifier::BOLD)),
        Span::styled(" acknowledge & clear", Style::default().fg(DIM)),
    ]));

    let p = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(red))
            .title(" ⚠ CEO WARNINGS ")
            .title_style(Style::default().fg(red).add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK)),
    );
    frame.render_widget(p, area);
}

fn render_flight_deck(frame: &mut Frame, area: Rect, user: &AccountRecord) {
    let active = user.active_plane.as_deref().and_then(aircraft::find);
    let lines = match active {
        Some(plane) => vec![
            Line::from(vec![
                Span::styled(format!(" {}  ", plane.glyph), Style::default()),
                Span::styled(
                    format!("Pre-flight checks complete for {}", plane.name),
                    Style::default().fg(Color::Rgb(224, 231, 255)),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled(" ▶ Press ", Style::default().fg(DIM)),
                Span::styled("F", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
                Span::styled(" to take off", Style::default().fg(DIM)),
            ]),
        ],
        None => vec![
            Line::from(Span::styled(
                " Select an aircraft from the Hangar",
                Style::default().fg(Color::Rgb(100, 100, 130)),
            )),
        ],
    };

    let p = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(99, 102, 241)))
            .title(" 🛫 Flight Deck ")
            .title_style(Style::default().fg(Color::Rgb(129, 140, 248)).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(p, area);
}

fn content_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(50, 100, 140)))
        .title(title)
        .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD))
}

fn render_hangar(frame: &mut Frame, area: Rect, user: &AccountRecord, owned: &[&'static AircraftProfile], selected: usize) {
    let block = content_block(" 🏠 Hangar ");
    if owned.is_empty() {
        let p = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No aircraft found. Visit the dealership.",
                Style::default().fg(Color::Rgb(100, 100, 120)),
            )),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(p, area);
        return;
    }

    let items: Vec<ListItem> = owned
        .iter()
        .map(|plane| {
            let active = user.active_plane.as_deref() == Some(plane.id);
            let mut spans = vec![
                Span::styled(format!(" {}  ", plane.glyph), Style::default()),
                Span::styled(format!("{:<18}", plane.name), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
                Span::styled(format!(" {:<10}", plane.rarity.label()), Style::default().fg(plane.rarity.color())),
                Span::styled(
                    format!(" spd {:>4}  turn {:>4}  {}", plane.speed, plane.turn_rate, plane.capacity),
                    Style::default().fg(DIM),
                ),
            ];
            if active {
                spans.push(Span::styled(
                    "  SELECTED",
                    Style::default().fg(Color::Rgb(34, 197, 94)).add_modifier(Modifier::BOLD),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Rgb(40, 40, 70)))
        .highlight_symbol("▶");
    let mut state = ListState::default().with_selected(Some(selected.min(owned.len() - 1)));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_shop(frame: &mut Frame, area: Rect, user: &AccountRecord, selected: usize) {
    let listing = aircraft::shop_listing(user.is_admin());

    let items: Vec<ListItem> = listing
        .iter()
        .map(|plane| {
            let owned = user.owns(plane.id);
            let affordable = user.balance.can_afford(plane.price);
            let (tag, tag_color) = if owned {
                ("Owned", Color::Rgb(100, 100, 120))
            } else if affordable {
                ("Purchase", Color::Rgb(255, 255, 255))
            } else {
                ("Can't afford", Color::Rgb(100, 100, 120))
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {}  ", plane.glyph), Style::default()),
                Span::styled(format!("{:<18}", plane.name), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!(" {:>16}", format_price(plane.price)),
                    Style::default().fg(Color::Rgb(250, 204, 21)),
                ),
                Span::styled(format!("   [{}]", tag), Style::default().fg(tag_color).add_modifier(Modifier::BOLD)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(content_block(" 🏪 Dealership "))
        .highlight_style(Style::default().bg(Color::Rgb(40, 40, 70)))
        .highlight_symbol("▶");
    let mut state = ListState::default().with_selected(Some(selected.min(listing.len().saturating_sub(1))));
    frame.render_stateful_widget(list, area, &mut state);
}
