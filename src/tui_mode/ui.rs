use super::app::App;
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::time::Duration;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use super::app::HistoryEntry;
use super::helpers::{highlight_expression, wrap_text};
use crate::render_help::render_help;

const MIN_TERMINAL_WIDTH: u16 = 50;
const MIN_TERMINAL_HEIGHT: u16 = 10;

pub fn run_ui_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App<'_>,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            if app.show_help {
                render_help(f, app);
            } else {
                ui(f, app);
            }
        })?;

        if app.should_quit {
            break;
        }

        if crossterm::event::poll(Duration::from_millis(50))? {
            match crossterm::event::read()? {
                Event::Key(KeyEvent { code, modifiers, kind, .. }) if kind == KeyEventKind::Press => {
                    handle_key_event(app, code, modifiers);
                }
                Event::Mouse(event) => {
                    handle_mouse_event(app, event);
                }
                _ => {}
            }
        }
    }
    Ok(())
}

fn handle_key_event(app: &mut App<'_>, code: KeyCode, modifiers: KeyModifiers) {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);

    if app.show_help {
        match code {
            KeyCode::Down => scroll_help(app, 1),
            KeyCode::Up => scroll_help(app, -1),
            KeyCode::PageDown => scroll_help(app, 10),
            KeyCode::PageUp => scroll_help(app, -10),
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q') => {
                app.show_help = false;
                app.help_scroll = 0;
            }
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Char('c') | KeyCode::Char('d') if ctrl => app.should_quit = true,
        KeyCode::Char('u') | KeyCode::Char('U') if ctrl => app.clear_input(),
        KeyCode::Char(c) if !ctrl && !modifiers.contains(KeyModifiers::ALT) => app.insert_char(c),
        KeyCode::Backspace => app.delete_before_cursor(),
        KeyCode::Delete => app.delete_at_cursor(),
        KeyCode::Left if ctrl => app.move_cursor_by_words(-1),
        KeyCode::Right if ctrl => app.move_cursor_by_words(1),
        KeyCode::Left => app.move_cursor(-1),
        KeyCode::Right => app.move_cursor(1),
        KeyCode::Home => app.cursor_position = 0,
        KeyCode::End => app.cursor_position = app.input.graphemes(true).count(),
        KeyCode::Up => app.navigate_history(-1),
        KeyCode::Down => app.navigate_history(1),
        KeyCode::PageUp => app.scroll_history(-1),
        KeyCode::PageDown => app.scroll_history(1),
        KeyCode::Enter => app.submit(),
        KeyCode::F(1) => {
            app.show_help = true;
            app.help_scroll = 0;
        }
        _ => {}
    }
}

fn scroll_help(app: &mut App<'_>, delta: isize) {
    app.help_scroll = app.help_scroll.saturating_add_signed(delta);
}

fn handle_mouse_event(app: &mut App<'_>, event: MouseEvent) {
    let delta = match event.kind {
        MouseEventKind::ScrollDown => 3,
        MouseEventKind::ScrollUp => -3,
        _ => return,
    };
    if app.show_help {
        scroll_help(app, delta);
    } else {
        app.history_scroll = app.history_scroll.saturating_add_signed(delta);
    }
}

fn ui(frame: &mut Frame, app: &mut App<'_>) {
    let area = frame.size();

    app.terminal_too_small = area.width < MIN_TERMINAL_WIDTH || area.height < MIN_TERMINAL_HEIGHT;
    if app.terminal_too_small {
        let message = Paragraph::new(vec![
            Line::from(Span::styled(
                format!(
                    "Need at least {}x{}, have {}x{}",
                    MIN_TERMINAL_WIDTH, MIN_TERMINAL_HEIGHT, area.width, area.height
                ),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("Resize the terminal to continue", Style::default().fg(Color::Yellow))),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Terminal too small ")
                .title_alignment(Alignment::Center),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(message, area);
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    render_input(frame, app, layout[0]);
    render_preview(frame, app, layout[1]);
    render_history(frame, app, layout[2]);
    render_status(frame, layout[3]);
    app.list_height = layout[2].height as usize;
}

/// Result of the expression being typed, updated on every key.
fn render_preview(frame: &mut Frame, app: &App<'_>, area: Rect) {
    let line = match app.preview() {
        None => Line::from(""),
        Some((_, Ok(value))) => Line::from(vec![
            Span::styled("  = ", Style::default().fg(Color::Gray)),
            Span::styled(value, Style::default().fg(Color::LightMagenta)),
        ]),
        Some((start, Err(e))) => {
            // Line the caret up with the input text, which starts after "│> ".
            let caret = match e.offset() {
                Some(at) => {
                    let column = (start + at).saturating_sub(app.input_scroll);
                    format!("   {}^ ", " ".repeat(column))
                }
                None => "   ".to_string(),
            };
            Line::from(Span::styled(
                format!("{}{}", caret, e),
                Style::default().fg(Color::Red),
            ))
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_history(frame: &mut Frame, app: &mut App<'_>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" History ")
        .title_alignment(Alignment::Center);

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    if app.history.is_empty() {
        let empty_msg = Paragraph::new("No calculations yet. Try 1km + 200m or 0 degC -> degF.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty_msg, inner_area);
        return;
    }

    let mut items = Vec::new();
    app.item_start_indices.clear();

    let wrap_width = inner_area.width.saturating_sub(4) as usize;
    let registry = app.calc.registry();

    for (i, entry) in app.history.iter().enumerate() {
        app.item_start_indices.push(items.len());

        let is_selected = i == app.cursor_history;
        let base_style = Style::default()
            .fg(if is_selected { Color::Yellow } else { Color::Cyan });

        match entry {
            HistoryEntry::Calculation { outcome, .. } => {
                let input = match &outcome.display_unit {
                    Some(unit) => format!("{} -> {}", outcome.expression, unit),
                    None => outcome.expression.clone(),
                };

                for (line_idx, line) in wrap_text(&input, wrap_width).into_iter().enumerate() {
                    let prefix = if line_idx == 0 { "> " } else { "  " };
                    let mut spans = vec![Span::styled(prefix, Style::default().fg(Color::Green))];
                    spans.extend(highlight_expression(&line, registry, base_style));

                    if line_idx == 0 {
                        spans.push(Span::styled(" = ", Style::default().fg(Color::Gray)));
                        match &outcome.result {
                            Ok(value) => {
                                spans.push(Span::styled(
                                    value.clone(),
                                    Style::default().fg(Color::LightMagenta).add_modifier(Modifier::BOLD),
                                ));
                                if let Some(favorite) = &outcome.favorite {
                                    spans.push(Span::styled(
                                        format!(" ({})", favorite),
                                        Style::default().fg(Color::Magenta),
                                    ));
                                }
                            }
                            Err(e) => spans.push(Span::styled(
                                format!("Error: {}", e),
                                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                            )),
                        }
                    }

                    items.push(ListItem::new(Line::from(spans)));
                }

                if outcome.detailed {
                    for (j, step) in outcome.steps.iter().enumerate() {
                        let step_text = format!("Step {}: {} = {}", j + 1, step.operation, step.result);
                        push_indented(&mut items, &step_text, wrap_width, Color::DarkGray);
                    }
                    let time_text = format!("Time: {:.6} ms", outcome.duration.as_secs_f64() * 1000.0);
                    push_indented(&mut items, &time_text, wrap_width, Color::Magenta);
                }
            }
            HistoryEntry::Message { input, lines } => {
                items.push(ListItem::new(Line::from(vec![
                    Span::styled("> ", Style::default().fg(Color::Green)),
                    Span::styled(input.clone(), base_style),
                ])));
                for line in lines {
                    push_indented(&mut items, line, wrap_width, Color::Gray);
                }
            }
        }

        if i < app.history.len() - 1 {
            let separator = Span::styled(
                "-".repeat(inner_area.width as usize),
                Style::default().fg(Color::DarkGray)
            );
            items.push(ListItem::new(Line::from(separator)));
        }
    }

    if app.scroll_to_bottom {
        app.history_scroll = items.len().saturating_sub(inner_area.height as usize);
        app.scroll_to_bottom = false;
    }

    let selected_index = app.item_start_indices.get(app.cursor_history).copied();

    let list = List::new(items)
        .block(Block::default())
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let mut state = ListState::default()
        .with_selected(selected_index)
        .with_offset(app.history_scroll);

    frame.render_stateful_widget(list, inner_area, &mut state);
}

/// Wrapped detail lines under a history entry.
fn push_indented(items: &mut Vec<ListItem<'static>>, text: &str, width: usize, color: Color) {
    for (idx, line) in wrap_text(text, width.saturating_sub(6)).into_iter().enumerate() {
        let prefix = if idx == 0 { "    - " } else { "      " };
        items.push(ListItem::new(Line::from(Span::styled(
            format!("{}{}", prefix, line),
            Style::default().fg(color),
        ))));
    }
}

fn render_status(frame: &mut Frame, area: Rect) {
    const KEYS: [(&str, &str); 5] = [
        ("Enter", "Calculate"),
        ("->", "Convert"),
        ("Up/Down", "History"),
        ("F1", "Help"),
        ("Ctrl+C", "Quit"),
    ];

    let spans: Vec<Span> = KEYS
        .iter()
        .flat_map(|(key, desc)| {
            [
                Span::styled(*key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                Span::styled(format!(" {}  ", desc), Style::default().fg(Color::DarkGray)),
            ]
        })
        .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_input(frame: &mut Frame, app: &mut App<'_>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Expression ")
        .title_alignment(Alignment::Center);

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let visible_width = (inner_area.width.saturating_sub(2)) as usize;
    let total = app.input.graphemes(true).count();
    app.adjust_input_scroll(visible_width);

    let visible_input: String = app.input
        .graphemes(true)
        .skip(app.input_scroll)
        .take(visible_width)
        .collect();

    let mut spans = vec![Span::raw("> ")];
    spans.extend(highlight_expression(&visible_input, app.calc.registry(), Style::default()));
    frame.render_widget(Paragraph::new(Line::from(spans)), inner_area);

    let visible_cursor = app.cursor_position.saturating_sub(app.input_scroll);
    let visible_prefix: String = visible_input.graphemes(true).take(visible_cursor).collect();
    let cursor_x = inner_area.x + 2 + visible_prefix.width() as u16;
    let cursor_y = inner_area.y;
    frame.set_cursor(cursor_x, cursor_y);

    let scroll_indicator_style = Style::default().fg(Color::DarkGray);

    if app.input_scroll > 0 {
        let left_indicator = Paragraph::new("<").style(scroll_indicator_style);
        frame.render_widget(left_indicator, Rect::new(inner_area.x, inner_area.y, 1, 1));
    }

    if total > app.input_scroll + visible_width {
        let right_indicator = Paragraph::new(">").style(scroll_indicator_style);
        frame.render_widget(
            right_indicator,
            Rect::new(inner_area.x + inner_area.width - 1, inner_area.y, 1, 1),
        );
    }
}


