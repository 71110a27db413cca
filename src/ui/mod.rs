//! Terminal presentation: draws a session snapshot plus the event log.

pub mod event_log;
mod prestige_confirm;
mod shop_panel;
mod stats_panel;

use event_log::EventLog;
use luck_roller::session::SessionView;
use luck_roller::utils::{BUILD_COMMIT, BUILD_DATE};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Main UI drawing function
pub fn draw_ui(
    frame: &mut Frame,
    view: &SessionView,
    log: &EventLog,
    player_name: &str,
    confirm_prestige: bool,
) {
    let size = frame.size();

    // Split vertically: main content, footer
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(size);

    // Split horizontally: stats | shop + log
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(v_chunks[0]);

    stats_panel::draw_stats_panel(frame, h_chunks[0], view, log);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(12), Constraint::Min(0)])
        .split(h_chunks[1]);
    shop_panel::draw_shop_panel(frame, right[0], &view.state);
    draw_log(frame, right[1], log);

    draw_footer(frame, v_chunks[1], view, player_name);

    if confirm_prestige {
        prestige_confirm::draw_prestige_confirm(frame, &view.state);
    }
}

fn draw_log(frame: &mut Frame, area: Rect, log: &EventLog) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = log
        .entries()
        .take(visible)
        .map(|entry| {
            Line::from(Span::styled(
                entry.message.clone(),
                Style::default().fg(entry.color),
            ))
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Activity ")),
        area,
    );
}

fn draw_footer(frame: &mut Frame, area: Rect, view: &SessionView, player_name: &str) {
    let auto = if view.auto_roll {
        Span::styled(
            "AUTO ON ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("AUTO OFF", Style::default().fg(Color::DarkGray))
    };
    let controls = Line::from(vec![
        auto,
        Span::raw("  [Space] Roll  [A] Auto  [L] Potion  [1-5] Shop  [Z/X/C] Void  [P] Prestige  [Q] Quit"),
    ]);
    let paragraph = Paragraph::new(controls)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " {player_name} | luck-roller {BUILD_DATE} ({BUILD_COMMIT}) "
        )));
    frame.render_widget(paragraph, area);
}
