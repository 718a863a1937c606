//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).  Everything shown is read from the
//! feed's [`FeedView`](crate::sync::FeedView); rendering never touches the
//! sync state directly.
//!
//! ## For contributors
//!
//! * The layout is a four-row split: a one-line search bar, the scrollable
//!   article list, a detail pane for the selected article (summary and
//!   link), and a one-line status bar.
//! * Colours and styles are defined inline.
//! * [`ratatui`] is the TUI framework; see its docs for widget details.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, InputMode};

/// Draw the complete UI for one frame.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let [search_area, main_area, detail_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(5),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_search_bar(app, frame, search_area);
    draw_article_list(app, frame, main_area);
    draw_detail(app, frame, detail_area);
    draw_status_bar(app, frame, status_area);
}

fn draw_search_bar(app: &App, frame: &mut Frame, area: Rect) {
    let (prompt_style, text) = match app.mode {
        InputMode::Search => (
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            format!("{}▏", app.query_input),
        ),
        InputMode::Normal if app.query_input.is_empty() => (
            Style::default().fg(Color::DarkGray),
            "press / to search".to_string(),
        ),
        InputMode::Normal => (Style::default().fg(Color::DarkGray), app.query_input.clone()),
    };

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(" Search: ", prompt_style),
        Span::raw(text),
    ]));
    frame.render_widget(bar, area);
}

/// Render the scrollable article list, or the empty-state message.
fn draw_article_list(app: &mut App, frame: &mut Frame, area: Rect) {
    let view = app.feed.view();
    let title = match view.search_query() {
        Some(query) => format!(" Results for \"{query}\" "),
        None => format!(" {} Articles ", app.feed.source_name()),
    };
    let block = Block::default().title(title).borders(Borders::ALL);

    if let Some(message) = view.empty_message() {
        let empty = Paragraph::new(Span::styled(message, Style::default().fg(Color::DarkGray)))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let list_items: Vec<ListItem> = view
        .displayed()
        .iter()
        .map(|article| {
            let line = Line::from(vec![
                Span::styled(
                    format!("{:<11}", article.date_label()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(article.title.as_str(), Style::default().fg(Color::White)),
                Span::raw("  "),
                Span::styled(
                    format!("[{}]", article.source_label),
                    Style::default().fg(Color::Cyan),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(list_items)
        .block(block)
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

/// Render the summary and link of the selected article.
fn draw_detail(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default().title(" Details ").borders(Borders::ALL);
    let selected = app
        .list_state
        .selected()
        .and_then(|i| app.feed.view().displayed().get(i));

    let lines = match selected {
        Some(article) => {
            let summary = if article.summary.is_empty() {
                Span::styled("(no summary)", Style::default().fg(Color::DarkGray))
            } else {
                Span::raw(article.summary.as_str())
            };
            vec![
                Line::from(summary),
                Line::from(Span::styled(
                    article.link.as_str(),
                    Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
                )),
            ]
        }
        None => vec![Line::from(Span::styled(
            "Select an article to see its summary",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let detail = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(detail, area);
}

/// Render the bottom status bar.
fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let view = app.feed.view();

    let status = if let Some(error) = view.last_error() {
        Span::styled(format!("Error: {error} (r to retry)"), Style::default().fg(Color::Red))
    } else if view.is_loading() {
        Span::styled("Loading…", Style::default().fg(Color::Yellow))
    } else if view.search_query().is_none() && !view.can_load_more() {
        Span::styled("End of feed", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw("")
    };

    let help = match app.mode {
        InputMode::Search => "  Enter/Esc: done  ↑/↓: scroll",
        InputMode::Normal => "  q: quit  /: search  ↑/↓: scroll  r: retry  R: refresh",
    };

    let bar = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        status,
        Span::raw("  "),
        Span::styled(
            format!("{} items", view.displayed().len()),
            Style::default().fg(Color::Green),
        ),
        Span::raw(help),
    ]));
    frame.render_widget(bar, area);
}
