use super::event_log::{tier_color, EventLog};
use luck_roller::achievements::next_locked;
use luck_roller::core::economy::{
    achievement_luck_bonus, effective_luck, max_potion_stacks, next_roll_ceiling,
    permanent_luck_bonus,
};
use luck_roller::core::prestige::prestige_progress;
use luck_roller::session::SessionView;
use luck_roller::utils::{format_number, RollTier};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Draws the left column: last roll, luck breakdown and prestige progress
pub fn draw_stats_panel(frame: &mut Frame, area: Rect, view: &SessionView, log: &EventLog) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),  // Last roll
            Constraint::Length(10), // Luck breakdown
            Constraint::Length(3),  // Prestige gauge
            Constraint::Min(0),     // Progress
        ])
        .split(area);

    draw_last_roll(frame, chunks[0], view, log);
    draw_luck(frame, chunks[1], view);
    draw_prestige_gauge(frame, chunks[2], view);
    draw_progress(frame, chunks[3], view);
}

fn draw_last_roll(frame: &mut Frame, area: Rect, view: &SessionView, log: &EventLog) {
    let line = if view.rolling {
        Line::from(Span::styled(
            "Rolling...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        ))
    } else if let Some((result, is_rare, was_super)) = log.last_roll {
        let tier = RollTier::from_value(result);
        let mut spans = vec![Span::styled(
            format_number(result),
            Style::default()
                .fg(tier_color(tier))
                .add_modifier(Modifier::BOLD),
        )];
        if was_super {
            spans.push(Span::styled("  SUPER", Style::default().fg(Color::LightRed)));
        }
        if is_rare {
            spans.push(Span::styled("  RARE", Style::default().fg(Color::Magenta)));
        }
        Line::from(spans)
    } else {
        Line::from("Press [Space] to roll")
    };

    let super_line = if view.state.is_super_roll_armed {
        Line::from(Span::styled(
            "Next roll is a SUPER roll",
            Style::default().fg(Color::LightRed),
        ))
    } else {
        Line::from(format!(
            "Super roll in {} roll(s)",
            view.state.rolls_until_super
        ))
    };

    let paragraph = Paragraph::new(vec![line, super_line])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Roll "));
    frame.render_widget(paragraph, area);
}

fn draw_luck(frame: &mut Frame, area: Rect, view: &SessionView) {
    let state = &view.state;
    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::Cyan);

    let row = |name: &str, amount: String| {
        Line::from(vec![
            Span::styled(format!("  {name:<14}"), label),
            Span::styled(amount, value),
        ])
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("  Luck          ", label),
            Span::styled(
                format!("{:.2}", effective_luck(state)),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        row("Base", format!("{:.2}", state.base_luck)),
        row("Shop", format!("+{:.2}", permanent_luck_bonus(state))),
        row("Achievements", format!("+{:.2}", achievement_luck_bonus(state))),
        row(
            "Potions",
            format!(
                "{}/{} ({}s)",
                state.potion_stack_count,
                max_potion_stacks(state),
                state.potion_time_remaining
            ),
        ),
        row("Ceiling", format_number(next_roll_ceiling(state))),
        row("Highest", format_number(state.highest_roll)),
        row("Currency", format_number(state.currency)),
    ];

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Luck "));
    frame.render_widget(paragraph, area);
}

fn draw_prestige_gauge(frame: &mut Frame, area: Rect, view: &SessionView) {
    let progress = prestige_progress(&view.state);
    let color = if progress >= 1.0 {
        Color::LightMagenta
    } else {
        Color::Magenta
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Prestige "))
        .gauge_style(Style::default().fg(color))
        .ratio(progress.clamp(0.0, 1.0))
        .label(format!("{:.1}%", progress * 100.0));
    frame.render_widget(gauge, area);
}

fn draw_progress(frame: &mut Frame, area: Rect, view: &SessionView) {
    let state = &view.state;
    let unlocked = &state.unlocked_achievements;
    let next = match next_locked(unlocked) {
        Some(def) => format!("{} {} at {}", def.icon, def.name, format_number(def.threshold)),
        None => "All achievements unlocked".to_string(),
    };
    let lines = vec![
        Line::from(format!("  Rolls          {}", state.roll_count)),
        Line::from(format!("  Prestige       {}", state.prestige_count)),
        Line::from(format!("  Void points    {}", state.void_points)),
        Line::from(format!(
            "  Achievements   {}/{}",
            unlocked.unlocked_count(),
            unlocked.total_count()
        )),
        Line::from(format!("  Next: {next}")),
    ];
    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Progress "));
    frame.render_widget(paragraph, area);
}
