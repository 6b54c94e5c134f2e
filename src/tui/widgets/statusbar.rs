use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// One line at the bottom: a transient status message when something
/// is happening, otherwise the key hints.
pub fn render(frame: &mut Frame, area: Rect, status: Option<(&str, StatusKind)>) {
    if let Some((message, kind)) = status {
        let style = match kind {
            StatusKind::Info => theme::amber(),
            StatusKind::Success => theme::green(),
            StatusKind::Error => theme::red(),
        };
        let line = Line::from(Span::styled(message.to_string(), style));
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
        return;
    }

    let hints = [
        ("[1]", " times  "),
        ("[2]", " qibla  "),
        ("[3]", " cities  "),
        ("[l]", " locate  "),
        ("[r]", " refresh  "),
        ("[a]", " add city  "),
        ("[?]", " help  "),
        ("[Esc]", " quit"),
    ];

    let mut spans = Vec::new();
    for (key, label) in &hints {
        spans.push(Span::styled(*key, theme::gold()));
        spans.push(Span::styled(*label, theme::dim()));
    }

    let line = Line::from(spans);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
