use luck_roller::core::ProgressionState;
use luck_roller::utils::format_number;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Draws the prestige confirmation dialog as an overlay
pub fn draw_prestige_confirm(frame: &mut Frame, state: &ProgressionState) {
    let size = frame.size();

    // Calculate dialog size and position (centered)
    let dialog_width = 50.min(size.width.saturating_sub(4));
    let dialog_height = 15.min(size.height.saturating_sub(4));

    let x = (size.width.saturating_sub(dialog_width)) / 2;
    let y = (size.height.saturating_sub(dialog_height)) / 2;

    let dialog_area = Rect::new(x, y, dialog_width, dialog_height);

    // Clear the area behind the dialog
    frame.render_widget(Clear, dialog_area);

    let title = Line::from(vec![Span::styled(
        " Confirm Prestige ",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )]);

    let highlight = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Prestiging will reset:",
            Style::default().fg(Color::Red),
        )),
        Line::from(format!(
            "  - Luck, rolls and highest roll ({})",
            format_number(state.highest_roll)
        )),
        Line::from(format!("  - Currency ({})", format_number(state.currency))),
        Line::from("  - Shop upgrades and potions"),
        Line::from(""),
        Line::from(Span::styled(
            "You will gain:",
            Style::default().fg(Color::Green),
        )),
        Line::from(vec![
            Span::raw("  - Void points: "),
            Span::styled(
                state.void_points.to_string(),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(" -> "),
            Span::styled((state.void_points + 1).to_string(), highlight),
        ]),
        Line::from("  - Achievements and void upgrades are kept"),
        Line::from(""),
        Line::from(vec![
            Span::raw("      "),
            Span::styled(
                "[Y] Yes, Prestige",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled(
                "[N] Cancel",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(title)
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, dialog_area);
}
