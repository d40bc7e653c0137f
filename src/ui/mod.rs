pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod tabs;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, NoticeKind, Screen};
use crate::store::AccountRepository;

pub fn render<R: AccountRepository>(frame: &mut Frame, app: &mut App<R>) {
    let area = frame.area();
    match app.screen {
        Screen::Login | Screen::Signup => auth::render_auth(frame, area, app),
        Screen::Dashboard => dashboard::render_dashboard(frame, area, app),
        Screen::Flying => app.flight.render(frame, area),
    }

    if app.screen == Screen::Login && app.auth.confirm_reset {
        render_reset_confirm(frame, area);
    }

    // Toasts render on top of everything
    if let Some(n) = &app.notification {
        render_notification(frame, area, &n.msg, n.kind);
    }
}

pub fn centered(area: Rect, w: u16, h: u16) -> Rect {
    let w = w.min(area.width.saturating_sub(4));
    let h = h.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

fn render_notification(frame: &mut Frame, area: Rect, msg: &str, kind: NoticeKind) {
    let (icon, color) = match kind {
        NoticeKind::Success => ("✔", Color::Rgb(34, 197, 94)),
        NoticeKind::Error => ("⚠", Color::Rgb(239, 68, 68)),
        NoticeKind::Admin => ("🛡", Color::Rgb(202, 138, 4)),
    };
    let w = (msg.chars().count() as u16 + 8).min(area.width);
    let toast_area = Rect::new(area.x + area.width.saturating_sub(w + 1), area.y + 1, w, 3.min(area.height));
    frame.render_widget(Clear, toast_area);

    let p = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {} ", icon), Style::default().fg(Color::White)),
        Span::styled(msg.to_string(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color)),
    )
    .style(Style::default().bg(color));
    frame.render_widget(p, toast_area);
}

fn render_reset_confirm(frame: &mut Frame, area: Rect) {
    let overlay_area = centered(area, 48, 7);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Rgb(239, 68, 68)))
        .title(" ⟲ Reset Saved Data ")
        .title_style(Style::default().fg(Color::Rgb(239, 68, 68)).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  This deletes ALL accounts and progress.",
            Style::default().fg(Color::Rgb(220, 220, 230)),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Y", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
            Span::styled(" confirm  ", Style::default().fg(Color::Rgb(100, 100, 130))),
            Span::styled("any key", Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD)),
            Span::styled(" cancel", Style::default().fg(Color::Rgb(100, 100, 130))),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
