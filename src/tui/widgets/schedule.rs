use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
};

use crate::schedule::ScheduleCell;
use crate::tui::theme;

/// The events still ahead: the rest of today, spilling into tomorrow's
/// Fajr and Sunrise when the day is nearly over.
pub fn render(frame: &mut Frame, area: Rect, cells: &[ScheduleCell]) {
    let block = Block::default()
        .title(Span::styled(" Upcoming ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(ratatui::style::Style::default().fg(theme::BORDER))
        .style(theme::surface());

    if cells.is_empty() {
        let items = vec![
            ListItem::new(Line::from("")),
            ListItem::new(Line::from(Span::styled(
                "  Nothing more today",
                theme::dim(),
            ))),
        ];
        frame.render_widget(List::new(items).block(block), area);
        return;
    }

    let items: Vec<ListItem> = cells
        .iter()
        .map(|cell| {
            let line = Line::from(vec![
                Span::styled(format!("  {:<9}", cell.label), theme::bold()),
                Span::styled(cell.time.clone(), theme::dim()),
            ]);
            ListItem::new(line)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
