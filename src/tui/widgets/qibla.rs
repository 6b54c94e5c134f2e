use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::models::Location;
use crate::qibla::{CALIBRATION_PROMPT, CompassState, QiblaFrame};
use crate::tui::theme;

const ARROWS: [&str; 8] = ["↑", "↗", "→", "↘", "↓", "↙", "←", "↖"];

/// The virtual canvas the engine positions the dot on; the widget
/// scales those coordinates down to terminal cells.
pub const CANVAS: f64 = 480.0;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    location: Option<&Location>,
    bearing: f64,
    direction: &str,
    state: &CompassState,
) {
    let block = Block::default()
        .title(Span::styled(" Qibla Compass ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(ratatui::style::Style::default().fg(theme::BORDER))
        .style(theme::surface());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(location) = location else {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled("  No location data.", theme::red())),
            Line::from(Span::styled(
                "  Press [l] to detect your location first.",
                theme::dim(),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
        return;
    };

    let CompassState::Tracking(qibla_frame) = state else {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled("  Calibrating...", theme::amber())),
            Line::from(""),
            Line::from(Span::styled(format!("  {}", CALIBRATION_PROMPT), theme::dim())),
            Line::from(""),
            Line::from(Span::styled("  [c] toggle calibration", theme::dim())),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // readout
            Constraint::Min(5),    // orbit box
            Constraint::Length(3), // facing + hints
        ])
        .split(inner);

    let heading = (360.0 - qibla_frame.ring_angle).rem_euclid(360.0);
    let readout = Line::from(vec![
        Span::styled(
            format!("  {}  ·  {}° {}", location.city, bearing.round() as i64, direction),
            theme::gold().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("   heading {}°", heading.round() as i64), theme::dim()),
    ]);
    frame.render_widget(Paragraph::new(vec![readout]), chunks[0]);

    frame.render_widget(Paragraph::new(orbit_lines(qibla_frame, chunks[1])), chunks[1]);

    let arrow = ARROWS[(qibla_frame.arrow_angle / 45.0).round() as usize % 8];
    let facing_line = if qibla_frame.facing {
        Line::from(Span::styled(
            "  ✓ Facing qibla",
            theme::green().add_modifier(Modifier::BOLD),
        ))
    } else {
        let (side, degrees) = if qibla_frame.arrow_angle <= 180.0 {
            ("right", qibla_frame.arrow_angle)
        } else {
            ("left", 360.0 - qibla_frame.arrow_angle)
        };
        Line::from(vec![
            Span::styled(format!("  {} ", arrow), theme::amber().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("turn {} {}°", side, degrees.round() as i64),
                theme::dim(),
            ),
        ])
    };
    let footer = vec![
        facing_line,
        Line::from(Span::styled(
            "  [←][→] turn · [c] toggle calibration",
            theme::dim(),
        )),
    ];
    frame.render_widget(Paragraph::new(footer), chunks[2]);
}

/// Plot the orbiting dot and the wearer marker on a cell grid scaled
/// down from the engine's canvas.
fn orbit_lines(qibla_frame: &QiblaFrame, area: Rect) -> Vec<Line<'static>> {
    let width = area.width.max(3) as i32;
    let height = area.height.max(3) as i32;

    let scale = |value: i32, cells: i32| -> i32 {
        ((value as f64 / CANVAS) * (cells - 1) as f64).round() as i32
    };
    let dot_col = scale(qibla_frame.dot_x, width).clamp(0, width - 1);
    let dot_row = scale(qibla_frame.dot_y, height).clamp(0, height - 1);
    let center_col = width / 2;
    let center_row = height / 2;

    let mut lines = Vec::with_capacity(height as usize);
    for row in 0..height {
        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut run = String::new();
        for col in 0..width {
            let (glyph, style) = if row == dot_row && col == dot_col {
                ("●", theme::gold().add_modifier(Modifier::BOLD))
            } else if row == center_row && col == center_col {
                ("+", theme::dim())
            } else {
                (" ", Style::default())
            };
            if glyph == " " {
                run.push(' ');
            } else {
                if !run.is_empty() {
                    spans.push(Span::raw(std::mem::take(&mut run)));
                }
                spans.push(Span::styled(glyph.to_string(), style));
            }
        }
        if !run.is_empty() {
            spans.push(Span::raw(run));
        }
        lines.push(Line::from(spans));
    }
    lines
}
