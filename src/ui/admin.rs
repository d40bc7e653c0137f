use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::aircraft::{group_thousands, CATALOG};
use crate::app::{App, AMOUNT_STEP};
use crate::store::AccountRepository;

const GOLD: Color = Color::Rgb(234, 179, 8);
const KEY: Color = Color::Rgb(80, 200, 255);
const DIM: Color = Color::Rgb(140, 140, 140);

fn control(key: &'static str, label: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("    {:<8}", key), Style::default().fg(KEY)),
        Span::styled(label, Style::default().fg(DIM)),
    ])
}

pub fn render_admin<R: AccountRepository>(frame: &mut Frame, area: Rect, app: &App<R>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(161, 98, 7)))
        .title(" 🛡 CEO CONTROL PANEL ")
        .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(inner);

    let targets = app.admin_targets();
    if targets.is_empty() {
        let p = Paragraph::new(Line::from(Span::styled(
            "  No other pilots registered yet",
            Style::default().fg(Color::Rgb(100, 100, 120)),
        )));
        frame.render_widget(p, inner);
        return;
    }

    // Left: pilot roster
    let items: Vec<ListItem> = targets
        .iter()
        .map(|name| {
            let rec = app.accounts.get(name);
            let banned = rec.as_ref().is_some_and(|r| r.banned);
            let admin = rec.as_ref().is_some_and(|r| r.is_admin());
            let mut spans = vec![Span::styled(format!(" {}", name), Style::default().fg(Color::White))];
            if admin {
                spans.push(Span::styled(" ★", Style::default().fg(GOLD)));
            }
            if banned {
                spans.push(Span::styled(" BANNED", Style::default().fg(Color::Rgb(239, 68, 68)).add_modifier(Modifier::BOLD)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();
    let selected = app.admin.selected.min(targets.len() - 1);
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::RIGHT)
                .border_style(Style::default().fg(Color::Rgb(60, 60, 80)))
                .title(" Pilots ")
                .title_style(Style::default().fg(Color::Rgb(203, 213, 225)).add_modifier(Modifier::BOLD)),
        )
        .highlight_style(Style::default().bg(Color::Rgb(60, 45, 10)))
        .highlight_symbol("▶");
    let mut state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, cols[0], &mut state);

    // Right: selected pilot and actions
    let Some(target) = app.accounts.get(&targets[selected]) else {
        return;
    };
    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("  {} ", target.username), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            Span::styled(format!("{} AZ", target.balance.display()), Style::default().fg(GOLD)),
            Span::styled(format!("  {} aircraft", target.inventory.len()), Style::default().fg(DIM)),
        ]),
        Line::from(""),
        Line::from(Span::styled("  Economy", Style::default().fg(Color::Rgb(203, 213, 225)).add_modifier(Modifier::BOLD))),
        control("+ / -", format!("Amount: {} AZ (step {})", group_thousands(app.admin.amount), group_thousands(AMOUNT_STEP))),
        control("G / T / S", "Give / Take / Set".to_string()),
        Line::from(""),
        Line::from(Span::styled("  Discipline", Style::default().fg(Color::Rgb(203, 213, 225)).add_modifier(Modifier::BOLD))),
        control("W", "Send warning".to_string()),
        control("B / X", "Perma ban / 24h ban".to_string()),
        control("U", "Unban".to_string()),
        control("R", "Toggle CEO role".to_string()),
        Line::from(""),
        Line::from(Span::styled("  Aircraft (toggle)", Style::default().fg(Color::Rgb(203, 213, 225)).add_modifier(Modifier::BOLD))),
    ];
    for (i, plane) in CATALOG.iter().enumerate() {
        let owned = target.owns(plane.id);
        lines.push(Line::from(vec![
            Span::styled(format!("    {}       ", i + 1), Style::default().fg(KEY)),
            Span::styled(
                format!("{} {}", plane.name, if owned { "✔" } else { "" }),
                Style::default().fg(if owned { Color::Rgb(34, 197, 94) } else { DIM }),
            ),
        ]));
    }

    if let Some(buffer) = &app.admin.warning {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("  Warning: ", Style::default().fg(Color::Rgb(249, 115, 22)).add_modifier(Modifier::BOLD)),
            Span::styled(format!("{}▏", buffer), Style::default().fg(Color::White)),
        ]));
        lines.push(Line::from(Span::styled(
            "  Enter send · Esc cancel",
            Style::default().fg(Color::Rgb(100, 100, 130)),
        )));
    }

    frame.render_widget(Paragraph::new(lines), cols[1]);
}
