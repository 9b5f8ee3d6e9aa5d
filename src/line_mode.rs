use std::io::{stdin, stdout, Write};

use anyhow::{Context, Result};
use termion::{
    clear::CurrentLine as ClearLine,
    cursor::{DetectCursorPos, Goto},
    event::Key,
    input::TermRead,
    raw::IntoRawMode,
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use dimcalc::calc_engine::Calculator;

use crate::session::{self, Request};

const PROMPT: &str = "Expression: ";

/// Byte offset of the grapheme at `index`, or the end of `s`.
fn grapheme_to_byte_index(s: &str, index: usize) -> usize {
    s.grapheme_indices(true)
        .nth(index)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}

fn remove_grapheme(s: &mut String, index: usize) {
    let start = grapheme_to_byte_index(s, index);
    let end = grapheme_to_byte_index(s, index + 1);
    s.drain(start..end);
}

pub fn run_line(calc: Calculator<'_>) -> Result<()> {
    println!("dimcalc: expressions with physical units");
    println!("Operators: + - * / ^ ( )   Units: 1km, 3 m/s^2, 20 degC");
    println!("Convert with '->', e.g. 0 degC -> degF");
    println!("Navigation: ←/→, Backspace/Delete, Home/End, ↑/↓ for history");
    println!("Commands: 'units', 'clear', 'quit'");
    println!("\rAdd 'details' before an expression for step-by-step evaluation\n");

    let mut stdout = stdout()
        .into_raw_mode()
        .context("failed to switch the terminal to raw mode")?;
    let mut history: Vec<String> = Vec::new();
    let mut history_index = 0;

    loop {
        write!(stdout, "{}{}", ClearLine, PROMPT)?;
        stdout.flush()?;

        let mut expression = String::new();
        // Cursor position in graphemes.
        let mut cursor_pos = 0;
        let (_, initial_y) = stdout.cursor_pos()?;

        let stdin = stdin();
        let mut keys = stdin.keys();

        loop {
            write!(stdout, "{}{}{}{}", Goto(1, initial_y), ClearLine, PROMPT, expression)?;

            let byte_pos = grapheme_to_byte_index(&expression, cursor_pos);
            let column = PROMPT.len() + expression[..byte_pos].width() + 1;
            write!(stdout, "{}", Goto(column as u16, initial_y))?;
            stdout.flush()?;

            let key = match keys.next() {
                Some(key) => key?,
                None => return Ok(()),
            };
            match key {
                Key::Char('\n') => break,
                Key::Ctrl('c') | Key::Ctrl('d') => {
                    write!(stdout, "\r\n")?;
                    return Ok(());
                }
                Key::Ctrl('u') => {
                    expression.clear();
                    cursor_pos = 0;
                }
                Key::Char(c) => {
                    let byte_idx = grapheme_to_byte_index(&expression, cursor_pos);
                    expression.insert(byte_idx, c);
                    cursor_pos = grapheme_count(&expression[..byte_idx + c.len_utf8()]);
                }
                Key::Backspace if cursor_pos > 0 => {
                    cursor_pos -= 1;
                    remove_grapheme(&mut expression, cursor_pos);
                }
                Key::Delete if cursor_pos < grapheme_count(&expression) => {
                    remove_grapheme(&mut expression, cursor_pos);
                }
                Key::Left if cursor_pos > 0 => cursor_pos -= 1,
                Key::Right if cursor_pos < grapheme_count(&expression) => cursor_pos += 1,
                Key::Home => cursor_pos = 0,
                Key::End => cursor_pos = grapheme_count(&expression),
                Key::Up => {
                    if history_index > 0 {
                        history_index -= 1;
                        expression = history[history_index].clone();
                        cursor_pos = grapheme_count(&expression);
                    }
                }
                Key::Down => {
                    if history_index < history.len().saturating_sub(1) {
                        history_index += 1;
                        expression = history[history_index].clone();
                        cursor_pos = grapheme_count(&expression);
                    } else {
                        history_index = history.len();
                        expression.clear();
                        cursor_pos = 0;
                    }
                }
                _ => {}
            }
        }

        let request = match session::parse_request(&expression) {
            Some(request) => request,
            None => {
                write!(stdout, "\r\n")?;
                continue;
            }
        };

        match request {
            Request::Quit => {
                write!(stdout, "\r\nGoodbye!\r\n")?;
                return Ok(());
            }
            Request::Clear => {
                history.clear();
                history_index = 0;
                write!(stdout, "\r\nHistory cleared\r\n\r\n")?;
            }
            Request::Help => {
                write!(stdout, "\r\nEnter an expression such as 2 km / 30 min -> km/h\r\n\r\n")?;
            }
            Request::Units => {
                write!(stdout, "\r\n")?;
                for line in session::unit_listing(calc.registry()) {
                    write!(stdout, "  {}\r\n", line)?;
                }
                write!(stdout, "\r\n")?;
            }
            Request::MissingExpression => {
                write!(stdout, "\r\nPlease enter a valid expression after 'details'\r\n\r\n")?;
            }
            Request::Evaluate {
                expression: text,
                display_unit,
                detailed,
            } => {
                let outcome = session::run(&calc, text, display_unit, detailed);
                history.push(expression.trim().to_string());
                history_index = history.len();

                write!(stdout, "\r\n  {}\r\n", outcome.summary())?;
                if outcome.detailed && !outcome.steps.is_empty() {
                    write!(stdout, "\r\n  Step-by-step evaluation:\r\n")?;
                    for (i, step) in outcome.steps.iter().enumerate() {
                        write!(stdout, "  Step {}: {} = {}\r\n", i + 1, step.operation, step.result)?;
                    }
                    write!(
                        stdout,
                        "  Time: {:.6} ms\r\n",
                        outcome.duration.as_secs_f64() * 1000.0
                    )?;
                }
                write!(stdout, "\r\n")?;
            }
        }
    }
}
