use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::schedule::GridView;
use crate::tui::theme;
use crate::utils::format::fit_width;

/// All six events in a 2-wide grid with the active one marked. The
/// summary line turns urgent inside the final hour.
pub fn render(frame: &mut Frame, area: Rect, grid: Option<&GridView>) {
    let block = Block::default()
        .title(Span::styled(" Today ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(ratatui::style::Style::default().fg(theme::BORDER))
        .style(theme::surface());

    let Some(grid) = grid else {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled("  No data for today", theme::dim())),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), area);
        return;
    };

    let mut lines = vec![Line::from("")];
    for pair in grid.cells.chunks(2) {
        let mut spans = Vec::new();
        for cell in pair {
            let (marker, name_style, time_style) = if cell.active {
                ("▸ ", theme::gold().add_modifier(Modifier::BOLD), theme::gold())
            } else {
                ("  ", theme::dim(), theme::bold())
            };
            spans.push(Span::styled(marker, theme::gold()));
            spans.push(Span::styled(fit_width(cell.label, 8), name_style));
            spans.push(Span::styled(format!("{:<7}", cell.time), time_style));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    if let Some(summary) = &grid.summary {
        let style = if grid.urgent {
            theme::red().add_modifier(Modifier::BOLD)
        } else {
            theme::amber()
        };
        lines.push(Line::from(Span::styled(format!("  {}", summary), style)));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
