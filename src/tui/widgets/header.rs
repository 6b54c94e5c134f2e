use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::tui::theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    city: Option<&str>,
    hijri: Option<&str>,
    gregorian: Option<&str>,
) {
    let title_line = Line::from(vec![
        Span::styled("  مِحْرَاب  ", theme::gold().add_modifier(Modifier::BOLD)),
        Span::styled("mihrab", theme::gold()),
    ]);

    let date_line = match (city, hijri, gregorian) {
        (Some(city), Some(hijri), Some(gregorian)) => Line::from(vec![
            Span::styled(city.to_string(), theme::gold()),
            Span::styled("  ·  ", theme::dim()),
            Span::styled(hijri.to_string(), theme::amber()),
            Span::styled("  ·  ", theme::dim()),
            Span::styled(gregorian.to_string(), theme::dim()),
        ]),
        (Some(city), _, _) => Line::from(Span::styled(city.to_string(), theme::gold())),
        _ => Line::from(Span::styled("No location yet", theme::dim())),
    };

    let text = vec![title_line, Line::from(""), date_line];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::gold().add_modifier(Modifier::BOLD))
        .style(theme::base());

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
