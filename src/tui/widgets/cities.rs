use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
};

use crate::models::Location;
use crate::tui::theme;
use crate::utils::format::{coord_label, fit_width};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    cities: &[Location],
    active: Option<&str>,
    focus_idx: usize,
    focused: bool,
) {
    let block = Block::default()
        .title(Span::styled(" Cities ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            theme::gold()
        } else {
            ratatui::style::Style::default().fg(theme::BORDER)
        })
        .style(theme::surface());

    if cities.is_empty() {
        let items = vec![
            ListItem::new(Line::from("")),
            ListItem::new(Line::from(Span::styled("  No saved cities.", theme::dim()))),
            ListItem::new(Line::from(Span::styled(
                "  [a] add a city · [l] detect location",
                theme::dim(),
            ))),
        ];
        frame.render_widget(List::new(items).block(block), area);
        return;
    }

    let items: Vec<ListItem> = cities
        .iter()
        .enumerate()
        .map(|(i, city)| {
            let is_active = marks_active(active, city);
            let is_focused = focused && i == focus_idx;

            let check = if is_active { "✓" } else { " " };
            let pointer = if is_focused { "▸" } else { " " };

            let name_style = if is_active {
                theme::gold().add_modifier(Modifier::BOLD)
            } else if is_focused {
                theme::bold()
            } else {
                ratatui::style::Style::default().fg(theme::TEXT)
            };

            let line = Line::from(vec![
                Span::styled(format!("  {} ", pointer), theme::gold()),
                Span::styled(format!("{} ", check), theme::green()),
                Span::styled(fit_width(&format!("{}, {}", city.city, city.country), 24), name_style),
                Span::styled(
                    format!("  {}", coord_label(city.latitude, city.longitude)),
                    theme::dim(),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// Checkmark match; saved names can differ in case from what the
/// search service returned.
fn marks_active(active: Option<&str>, city: &Location) -> bool {
    active.is_some_and(|name| name.eq_ignore_ascii_case(&city.city))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_checkmark_ignores_case() {
        let lahore = Location::new("Lahore", "Pakistan", 31.5497, 74.3436);
        assert!(marks_active(Some("lahore"), &lahore));
        assert!(marks_active(Some("LAHORE"), &lahore));
        assert!(!marks_active(Some("Istanbul"), &lahore));
        assert!(!marks_active(None, &lahore));
    }
}
