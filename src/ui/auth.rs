use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Field, Screen};
use crate::store::AccountRepository;
use crate::ui::centered;

const BANNER: &str = r#"
 ███████╗██╗  ██╗██╗   ██╗██████╗ ███████╗ ██████╗██╗  ██╗
 ██╔════╝██║ ██╔╝╚██╗ ██╔╝██╔══██╗██╔════╝██╔════╝██║ ██╔╝
 ███████╗█████╔╝  ╚████╔╝ ██║  ██║█████╗  ██║     █████╔╝
 ╚════██║██╔═██╗   ╚██╔╝  ██║  ██║██╔══╝  ██║     ██╔═██╗
 ███████║██║  ██╗   ██║   ██████╔╝███████╗╚██████╗██║  ██╗
 ╚══════╝╚═╝  ╚═╝   ╚═╝   ╚═════╝ ╚══════╝ ╚═════╝╚═╝  ╚═╝"#;

fn input_line(label: &str, value: String, focused: bool) -> Vec<Line<'static>> {
    let border = if focused { Color::Rgb(99, 102, 241) } else { Color::Rgb(60, 60, 80) };
    let cursor = if focused { "▏" } else { "" };
    vec![
        Line::from(Span::styled(
            format!("  {}", label),
            Style::default().fg(Color::Rgb(148, 163, 184)).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  [ ", Style::default().fg(border)),
            Span::styled(format!("{:<24}", format!("{}{}", value, cursor)), Style::default().fg(Color::White)),
            Span::styled(" ]", Style::default().fg(border)),
        ]),
    ]
}

pub fn render_auth<R: AccountRepository>(frame: &mut Frame, area: Rect, app: &App<R>) {
    let signup = app.screen == Screen::Signup;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Banner
            Constraint::Length(2), // Subtitle
            Constraint::Min(14),   // Form
            Constraint::Length(2), // Footer
        ])
        .split(area);

    let banner = Paragraph::new(BANNER)
        .style(Style::default().fg(Color::Rgb(99, 102, 241)))
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    let subtitle = Paragraph::new(Line::from(Span::styled(
        "  ✈ Flight Simulator ✈  ",
        Style::default()
            .fg(Color::Rgb(255, 220, 80))
            .add_modifier(Modifier::BOLD | Modifier::ITALIC),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(subtitle, chunks[1]);

    let form_area = centered(chunks[2], 40, 12);
    let title = if signup { " 🛫 New Pilot " } else { " 🔑 Enter Cockpit " };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(title)
        .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD));
    let inner = block.inner(form_area);
    frame.render_widget(block, form_area);

    let masked = "•".repeat(app.auth.password.chars().count());
    let mut lines = vec![Line::from("")];
    lines.extend(input_line("Callsign", app.auth.username.clone(), app.auth.focus == Field::Username));
    lines.push(Line::from(""));
    lines.extend(input_line("Security Code", masked, app.auth.focus == Field::Password));
    lines.push(Line::from(""));
    let action = if signup { "Sign Up (+25,000 AZ)" } else { "Take your seat" };
    lines.push(Line::from(vec![
        Span::styled("  Enter ", Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD)),
        Span::styled(action, Style::default().fg(Color::Rgb(140, 140, 140))),
    ]));
    frame.render_widget(Paragraph::new(lines), inner);

    let mut footer = vec![
        Span::styled("Tab", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        Span::styled(" switch field  │  ", Style::default().fg(Color::Rgb(100, 100, 130))),
        Span::styled("F2", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        Span::styled(
            if signup { " back to login  │  " } else { " new pilot  │  " },
            Style::default().fg(Color::Rgb(100, 100, 130)),
        ),
    ];
    if !signup {
        footer.push(Span::styled("F5", Style::default().fg(Color::Rgb(239, 68, 68)).add_modifier(Modifier::BOLD)));
        footer.push(Span::styled(" reset saved data  │  ", Style::default().fg(Color::Rgb(100, 100, 130))));
    }
    footer.push(Span::styled("Esc", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)));
    footer.push(Span::styled(
        if signup { " back" } else { " quit" },
        Style::default().fg(Color::Rgb(100, 100, 130)),
    ));
    frame.render_widget(Paragraph::new(Line::from(footer)).alignment(Alignment::Center), chunks[3]);
}
