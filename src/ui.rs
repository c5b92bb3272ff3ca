use crate::animation::ItemPhase;
use crate::app::{App, Focus};
use crate::theme::Palette;
use chrono::Datelike;
use color_eyre::Result;
use crossterm::{
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io::{stdout, Stdout};
use unicode_width::UnicodeWidthChar;

const PLACEHOLDER: &str = "What is on your mind, King?";

/// Terminal guard: raw mode and the alternate screen are released on drop,
/// including on the error path.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui {
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Tui { terminal })
    }

    pub fn draw(&mut self, app: &App) -> Result<()> {
        self.terminal.draw(|f| draw(f, app))?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

/// Stateless render of the current application state into one frame.
pub fn draw(f: &mut Frame, app: &App) {
    let palette = app.theme.palette();

    f.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
        f.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(6),
                Constraint::Length(8),
                Constraint::Min(0),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.area());

    draw_header(f, app, &palette, chunks[0]);
    draw_compose(f, app, &palette, chunks[1]);
    draw_feed(f, app, &palette, chunks[2]);
    draw_footer(f, app, &palette, chunks[3]);
}

fn draw_header(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let count = app.store.len();
    let badge = format!(
        "{} {} recorded",
        count,
        if count == 1 { "chronicle" } else { "chronicles" }
    );

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "The Legacy",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            app.today.to_uppercase(),
            Style::default().fg(palette.accent_dim),
        )),
        Line::from(Span::styled(
            badge.to_uppercase(),
            Style::default().fg(palette.text_dim),
        )),
        Line::default(),
        Line::from(Span::styled(
            format!("\u{201c}{}\u{201d}", app.quote),
            Style::default()
                .fg(palette.text_dim)
                .add_modifier(Modifier::ITALIC),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(header, area);
}

fn draw_compose(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let focused = app.focus == Focus::Compose;
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)].as_ref())
        .split(area);

    let border = if focused {
        Style::default().fg(palette.accent_dim)
    } else {
        Style::default().fg(palette.border)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(" Compose ");

    let body = if app.compose.text().is_empty() {
        let mut spans = Vec::new();
        if focused {
            spans.push(Span::styled("\u{258e}", Style::default().fg(palette.accent)));
        }
        spans.push(Span::styled(
            PLACEHOLDER,
            Style::default()
                .fg(palette.text_dim)
                .add_modifier(Modifier::ITALIC),
        ));
        Paragraph::new(Line::from(spans))
    } else {
        let mut text = app.compose.text().to_string();
        if focused {
            text.insert(app.compose.cursor(), '\u{258e}');
        }
        Paragraph::new(text)
    };
    f.render_widget(body.block(block).wrap(Wrap { trim: false }), parts[0]);

    let save_style = if app.compose.is_blank() {
        Style::default().fg(palette.text_dim)
    } else {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    };
    let status = Paragraph::new(Line::from(vec![
        Span::styled(
            "Eternalize this moment",
            Style::default()
                .fg(palette.text_dim)
                .add_modifier(Modifier::ITALIC),
        ),
        Span::raw("   "),
        Span::styled("Ctrl+S Save Entry", save_style),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(status, parts[1]);
}

fn draw_feed(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    if app.store.is_empty() {
        let empty = Paragraph::new(vec![
            Line::default(),
            Line::default(),
            Line::from(Span::styled(
                "The Pages are Empty",
                Style::default()
                    .fg(palette.accent_dim)
                    .add_modifier(Modifier::ITALIC),
            )),
            Line::from(Span::styled(
                "BEGIN YOUR LEGACY TODAY",
                Style::default().fg(palette.text_dim),
            )),
        ])
        .alignment(Alignment::Center);
        f.render_widget(empty, area);
        return;
    }

    let preview_width = area.width.saturating_sub(6) as usize;
    let items: Vec<ListItem> = app
        .store
        .entries()
        .iter()
        .map(|entry| {
            let phase = app.effects.phase(&entry.id);
            if phase == ItemPhase::Exiting {
                // collapsed while animating out; the store still holds it
                let preview = truncate_to_width(
                    entry.content.lines().next().unwrap_or(""),
                    preview_width,
                );
                return ListItem::new(vec![
                    Line::from(Span::styled(
                        preview,
                        Style::default()
                            .fg(palette.danger)
                            .add_modifier(Modifier::DIM | Modifier::CROSSED_OUT),
                    )),
                    Line::default(),
                ]);
            }

            let body_style = match phase {
                ItemPhase::Entering => Style::default()
                    .fg(palette.text)
                    .add_modifier(Modifier::DIM),
                _ => Style::default().fg(palette.text),
            };

            let mut lines = vec![timestamp_line(entry, palette)];
            for text_line in entry.content.lines() {
                lines.push(Line::from(Span::styled(text_line.to_string(), body_style)));
            }
            lines.push(Line::default());
            ListItem::new(lines)
        })
        .collect();

    let feed_focused = app.focus == Focus::Feed;
    let border = if feed_focused {
        Style::default().fg(palette.accent_dim)
    } else {
        Style::default().fg(palette.border)
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(" Chronicles "),
        )
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("\u{2503} ");

    let selected = feed_focused.then_some(app.selected);
    f.render_stateful_widget(
        list,
        area,
        &mut ListState::default().with_selected(selected),
    );
}

fn timestamp_line(entry: &crate::diary_entry::DiaryEntry, palette: &Palette) -> Line<'static> {
    match entry.local_time() {
        Some(dt) => Line::from(vec![
            Span::styled(
                dt.day().to_string(),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                dt.format("%B").to_string().to_uppercase(),
                Style::default().fg(palette.accent_dim),
            ),
            Span::raw(" "),
            Span::styled(dt.year().to_string(), Style::default().fg(palette.text_dim)),
            Span::raw("  "),
            Span::styled(
                dt.format("%H:%M").to_string(),
                Style::default().fg(palette.text_dim),
            ),
        ]),
        None => Line::from(Span::styled(
            "UNDATED",
            Style::default().fg(palette.text_dim),
        )),
    }
}

fn draw_footer(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let key_style = Style::default()
        .fg(palette.text)
        .add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(palette.text_dim);
    let spans = match app.focus {
        Focus::Compose => vec![
            Span::styled("Ctrl+S", key_style),
            Span::styled(" save  ", dim),
            Span::styled("Tab", key_style),
            Span::styled(" feed  ", dim),
            Span::styled("Ctrl+T", key_style),
            Span::styled(" theme  ", dim),
            Span::styled("Ctrl+Q", key_style),
            Span::styled(" quit", dim),
        ],
        Focus::Feed => vec![
            Span::styled("j/k", key_style),
            Span::styled(" navigate  ", dim),
            Span::styled("d", key_style),
            Span::styled(" delete  ", dim),
            Span::styled("t", key_style),
            Span::styled(" theme  ", dim),
            Span::styled("Tab", key_style),
            Span::styled(" compose  ", dim),
            Span::styled("q", key_style),
            Span::styled(" quit", dim),
        ],
    };
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

/// Truncates to a display width, appending an ellipsis when shortened.
fn truncate_to_width(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let mut width = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max.saturating_sub(1) {
            out.push('\u{2026}');
            return out;
        }
        width += w;
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::truncate_to_width;

    #[test]
    fn short_strings_pass_through() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
    }

    #[test]
    fn long_strings_are_cut_with_an_ellipsis() {
        assert_eq!(truncate_to_width("hello world", 6), "hello\u{2026}");
    }

    #[test]
    fn wide_chars_count_their_display_width() {
        // each ideograph is two columns wide
        let cut = truncate_to_width("\u{65e5}\u{8a18}\u{5e33}", 5);
        assert_eq!(cut, "\u{65e5}\u{8a18}\u{2026}");
    }

    #[test]
    fn zero_width_budget_yields_nothing() {
        assert_eq!(truncate_to_width("anything", 0), "");
    }
}
