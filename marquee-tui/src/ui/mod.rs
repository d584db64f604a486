//! UI rendering
//!
//! Render functions draw the current [`AppState`] and nothing else. Which
//! blocks are visible and which sections are open comes from the latest
//! engine snapshot.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::AppState;

const CURSOR: &str = "▌";

/// Render the application UI
pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Title and typed headline
            Constraint::Min(3),    // Page body
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], state);
    render_body(frame, chunks[1], state);
    render_status_bar(frame, chunks[2], state);

    if state.help_visible {
        render_help_overlay(frame, area, state);
    }

    if let Some(ref error) = state.error {
        render_error_overlay(frame, area, error, state);
    }
}

/// Apply `style` only when colors are enabled
fn styled(state: &AppState, style: Style) -> Style {
    if state.config.colors_enabled {
        style
    } else {
        Style::default()
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let running = state.snapshot.as_ref().map(|s| s.running).unwrap_or(false);

    let mut headline = vec![
        Span::raw("> "),
        Span::styled(
            state.headline(),
            styled(state, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        ),
    ];
    if running {
        headline.push(Span::styled(CURSOR, styled(state, Style::default().fg(Color::Yellow))));
    }

    let header = Paragraph::new(vec![Line::from(headline)])
        .block(
            Block::default()
                .title(format!(" {} ", state.page.title))
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .border_style(styled(state, Style::default().fg(Color::Cyan))),
        )
        .alignment(Alignment::Center);

    frame.render_widget(header, area);
}

fn render_body(frame: &mut Frame, area: Rect, state: &AppState) {
    let body = Paragraph::new(body_lines(state))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false });

    frame.render_widget(body, area);
}

fn body_lines(state: &AppState) -> Vec<Line<'_>> {
    let page = &state.page;
    let dim = styled(state, Style::default().fg(Color::DarkGray));
    let mut lines = Vec::new();

    if !page.tagline.is_empty() {
        lines.push(Line::from(page.tagline.as_str()));
        lines.push(Line::from(""));
    }

    if let Some(ref highlight) = page.highlight {
        lines.push(Line::from(Span::styled(
            format!("\u{201c}{}\u{201d}", highlight.text),
            styled(state, Style::default().add_modifier(Modifier::ITALIC)),
        )));
        if let Some(ref note) = highlight.note {
            lines.push(Line::from(Span::styled(note.as_str(), dim)));
        }
        lines.push(Line::from(""));
    }

    // Hidden blocks keep their line so revealing does not shift the page
    let revealed = state.revealed_blocks();
    for (index, block) in page.blocks.iter().enumerate() {
        if index < revealed {
            lines.push(Line::from(vec![
                Span::raw(format!("{} ", block.icon)),
                Span::styled(block.text.as_str(), styled(state, Style::default().fg(Color::Green))),
            ]));
        } else {
            lines.push(Line::from(""));
        }
    }
    if !page.blocks.is_empty() {
        lines.push(Line::from(""));
    }

    for (index, section) in page.sections.iter().enumerate() {
        let open = state.is_section_open(&section.id);
        let selected = index == state.selected_section;
        let marker = if selected { "› " } else { "  " };
        let arrow = if open { "▾ " } else { "▸ " };
        let title_style = if selected {
            styled(state, Style::default().fg(Color::Cyan)).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::raw(arrow),
            Span::styled(section.title.as_str(), title_style),
        ]));
        if open {
            lines.push(Line::from(format!("    {}", section.body)));
        }
    }
    if !page.sections.is_empty() {
        lines.push(Line::from(""));
    }

    for link in &page.downloads {
        if link.enabled {
            lines.push(Line::from(vec![
                Span::styled(link.label.as_str(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled(
                    link.url.as_str(),
                    styled(state, Style::default().fg(Color::Blue)).add_modifier(Modifier::UNDERLINED),
                ),
            ]));
        } else {
            let note = link.note.as_deref().unwrap_or("unavailable");
            lines.push(Line::from(Span::styled(format!("{} ({})", link.label, note), dim)));
        }
    }

    if let Some(ref footer) = page.footer {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(footer.as_str(), dim)));
    }

    lines
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let hints = if state.page.sections.is_empty() {
        "?: Help | q: Quit"
    } else {
        "j/k: Select | Enter: Open/Close | ?: Help | q: Quit"
    };

    let mut spans = Vec::new();
    if let Some(ref message) = state.status {
        spans.push(Span::styled(message.as_str(), styled(state, Style::default().fg(Color::Green))));
        spans.push(Span::raw(" | "));
    }
    if let Some(ref snapshot) = state.snapshot {
        spans.push(Span::raw(format!(
            "{}/{} shown",
            snapshot.reveal.revealed_count, snapshot.reveal.block_count
        )));
        spans.push(Span::raw(" | "));
    }
    spans.push(Span::styled(hints, styled(state, Style::default().fg(Color::Gray))));

    let status = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect, state: &AppState) {
    let popup_area = centered_rect(60, 60, area);

    let help_text = vec![
        Line::from(Span::styled("Keyboard Shortcuts", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from("  q, Ctrl+C    - Quit"),
        Line::from("  F1, ?        - Toggle help"),
        Line::from("  j, Down      - Next section"),
        Line::from("  k, Up        - Previous section"),
        Line::from("  Enter, Space - Open or close section"),
        Line::from("  Esc          - Dismiss overlays"),
        Line::from(""),
        Line::from("Press Esc or F1 to close"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(styled(state, Style::default().fg(Color::Cyan))),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup_area);
    frame.render_widget(help, popup_area);
}

fn render_error_overlay(frame: &mut Frame, area: Rect, error: &str, state: &AppState) {
    let popup_area = centered_rect(70, 30, area);

    let error_text = vec![
        Line::from(Span::styled(
            "Error",
            styled(state, Style::default().fg(Color::Red)).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(error),
        Line::from(""),
        Line::from("Press Esc to dismiss"),
    ];

    let error_widget = Paragraph::new(error_text)
        .block(
            Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .border_style(styled(state, Style::default().fg(Color::Red))),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Center);

    frame.render_widget(Clear, popup_area);
    frame.render_widget(error_widget, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use libmarquee::presets;

    fn text_of(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_hidden_blocks_keep_their_lines() {
        let page = presets::preset("birdeye").unwrap().page;
        let state = AppState::new(page);

        let text = text_of(&body_lines(&state));
        assert!(!text.contains("Study with Depth"));

        let with_blocks = body_lines(&state).len();
        let mut empty = state.clone();
        empty.page.blocks.clear();
        assert_eq!(with_blocks, body_lines(&empty).len() + 4);
    }

    #[test]
    fn test_disabled_download_shows_note() {
        let state = AppState::new(presets::preset("minimal").unwrap().page);
        let text = text_of(&body_lines(&state));

        assert!(text.contains("Download for Android  https://"));
        assert!(text.contains("Download for iOS (iOS version coming soon)"));
        assert!(!text.contains("testflight"));
    }
}
