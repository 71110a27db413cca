use luck_roller::core::economy::{next_shop_cost, next_void_cost};
use luck_roller::core::ProgressionState;
use luck_roller::shop::{
    can_afford_shop_item, can_afford_void_item, shop_item, void_item, ShopItemId, VoidItemId,
};
use luck_roller::utils::format_number;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draws the shop and the void shop stacked vertically
pub fn draw_shop_panel(frame: &mut Frame, area: Rect, state: &ProgressionState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(ShopItemId::ALL.len() as u16 + 2),
            Constraint::Length(VoidItemId::ALL.len() as u16 + 2),
        ])
        .split(area);

    let shop_lines: Vec<Line> = ShopItemId::ALL
        .iter()
        .map(|&id| {
            let item = shop_item(id);
            item_line(
                id.key(),
                item.name,
                state.upgrade_level(id),
                item.max_level,
                next_shop_cost(state, id),
                can_afford_shop_item(state, id),
            )
        })
        .collect();
    frame.render_widget(
        Paragraph::new(shop_lines).block(Block::default().borders(Borders::ALL).title(" Shop ")),
        chunks[0],
    );

    let void_lines: Vec<Line> = VoidItemId::ALL
        .iter()
        .map(|&id| {
            let item = void_item(id);
            item_line(
                id.key(),
                item.name,
                state.void_level(id),
                item.max_level,
                next_void_cost(state, id),
                can_afford_void_item(state, id),
            )
        })
        .collect();
    frame.render_widget(
        Paragraph::new(void_lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta))
                .title(" Void Shop "),
        ),
        chunks[1],
    );
}

fn item_line(
    key: char,
    name: &str,
    level: u32,
    max_level: u32,
    cost: u64,
    affordable: bool,
) -> Line<'static> {
    let price = if level >= max_level {
        Span::styled("MAX", Style::default().fg(Color::DarkGray))
    } else if affordable {
        Span::styled(format_number(cost), Style::default().fg(Color::Green))
    } else {
        Span::styled(format_number(cost), Style::default().fg(Color::Red))
    };
    Line::from(vec![
        Span::styled(format!(" [{key}] "), Style::default().fg(Color::Yellow)),
        Span::raw(format!("{name:<16} {level:>2}/{max_level:<2} ")),
        price,
    ])
}
