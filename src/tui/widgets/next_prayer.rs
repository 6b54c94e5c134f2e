use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tui_big_text::{BigText, PixelSize};

use crate::schedule::ScheduleView;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, view: Option<&ScheduleView>) {
    let block = Block::default()
        .title(Span::styled(" Next Prayer ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(ratatui::style::Style::default().fg(theme::BORDER))
        .style(theme::surface());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(view) = view else {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled("  No data for today", theme::dim())),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // name
            Constraint::Length(4), // big time
            Constraint::Min(0),    // countdown
        ])
        .split(inner);

    let name = Paragraph::new(Line::from(Span::styled(
        format!("  {}", view.next_label.to_uppercase()),
        theme::gold().add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(name, chunks[0]);

    // The headline time, rendered large. Indented two cells to line up
    // with the pane text.
    let big_area = Rect {
        x: chunks[1].x.saturating_add(2),
        width: chunks[1].width.saturating_sub(2),
        ..chunks[1]
    };
    let big = BigText::builder()
        .pixel_size(PixelSize::Quadrant)
        .style(theme::bold())
        .lines(vec![view.next_time.clone().into()])
        .build();
    frame.render_widget(big, big_area);

    let countdown = match &view.countdown {
        Some(text) => Line::from(Span::styled(
            format!("  {}", text),
            theme::amber().add_modifier(Modifier::BOLD),
        )),
        None => Line::from(""),
    };
    frame.render_widget(Paragraph::new(vec![Line::from(""), countdown]), chunks[2]);
}
