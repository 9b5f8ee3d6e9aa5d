use unicode_segmentation::UnicodeSegmentation;

use dimcalc::calc_engine::{CalcError, Calculator};

use crate::session::{self, Outcome, Request};

pub enum HistoryEntry {
    Calculation {
        /// The line as typed, recalled by history navigation.
        input: String,
        outcome: Outcome,
    },
    Message {
        input: String,
        lines: Vec<String>,
    },
}

impl HistoryEntry {
    pub fn input(&self) -> &str {
        match self {
            HistoryEntry::Calculation { input, .. } | HistoryEntry::Message { input, .. } => input,
        }
    }
}

pub struct App<'r> {
    pub calc: Calculator<'r>,
    pub input: String,
    /// Cursor position in graphemes.
    pub cursor_position: usize,
    pub input_scroll: usize,
    pub history: Vec<HistoryEntry>,
    pub cursor_history: usize,
    pub should_quit: bool,
    pub show_help: bool,
    pub help_scroll: usize,
    pub list_height: usize,
    pub item_start_indices: Vec<usize>,
    pub history_scroll: usize,
    pub scroll_to_bottom: bool,
    pub terminal_too_small: bool,
}

impl<'r> App<'r> {
    pub fn new(calc: Calculator<'r>) -> Self {
        App {
            calc,
            input: String::new(),
            cursor_position: 0,
            input_scroll: 0,
            history: Vec::new(),
            cursor_history: 0,
            should_quit: false,
            show_help: false,
            help_scroll: 0,
            list_height: 5,
            item_start_indices: Vec::new(),
            history_scroll: 0,
            scroll_to_bottom: false,
            terminal_too_small: false,
        }
    }

    fn input_len(&self) -> usize {
        self.input.graphemes(true).count()
    }

    /// Byte offset of the grapheme at `index`, or the end of `s`.
    pub fn grapheme_to_byte_index(s: &str, index: usize) -> usize {
        s.grapheme_indices(true)
            .nth(index)
            .map(|(i, _)| i)
            .unwrap_or(s.len())
    }

    pub fn adjust_input_scroll(&mut self, visible_width: usize) {
        let total = self.input_len();

        if self.cursor_position < self.input_scroll {
            self.input_scroll = self.cursor_position;
        } else if self.cursor_position >= self.input_scroll + visible_width {
            self.input_scroll = self.cursor_position + 1 - visible_width;
        }

        self.input_scroll = self.input_scroll.min(total.saturating_sub(visible_width));
    }

    pub fn submit(&mut self) {
        let line = self.input.trim().to_string();
        let request = match session::parse_request(&line) {
            Some(request) => request,
            None => return,
        };

        match request {
            Request::Quit => {
                self.should_quit = true;
                return;
            }
            Request::Clear => {
                self.history.clear();
                self.cursor_history = 0;
                self.history_scroll = 0;
                self.clear_input();
                return;
            }
            Request::Help => {
                self.show_help = true;
                self.help_scroll = 0;
                self.clear_input();
                return;
            }
            Request::Units => {
                let lines = session::unit_listing(self.calc.registry());
                self.history.push(HistoryEntry::Message {
                    input: line.clone(),
                    lines,
                });
            }
            Request::MissingExpression => {
                self.history.push(HistoryEntry::Message {
                    input: line.clone(),
                    lines: vec!["Please enter a valid expression after 'details'".to_string()],
                });
            }
            Request::Evaluate {
                expression,
                display_unit,
                detailed,
            } => {
                let outcome = session::run(&self.calc, expression, display_unit, detailed);
                self.history.push(HistoryEntry::Calculation {
                    input: line.clone(),
                    outcome,
                });
            }
        }

        self.cursor_history = self.history.len().saturating_sub(1);
        self.clear_input();
        self.scroll_to_bottom = true;
    }

    /// Evaluates the current input as it would be submitted. Returns the
    /// position of the expression within the input with the outcome; `None`
    /// for blank input and commands.
    pub fn preview(&self) -> Option<(usize, Result<String, CalcError>)> {
        match session::parse_request(&self.input)? {
            Request::Evaluate {
                expression,
                display_unit,
                ..
            } => {
                // `expression` borrows from `self.input`.
                let start = expression.as_ptr() as usize - self.input.as_ptr() as usize;
                let result = self
                    .calc
                    .evaluate_value(expression)
                    .and_then(|value| self.calc.render(&value, display_unit));
                Some((self.input[..start].graphemes(true).count(), result))
            }
            _ => None,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        let byte_idx = Self::grapheme_to_byte_index(&self.input, self.cursor_position);
        self.input.insert(byte_idx, c);
        // A combining mark joins the grapheme before it.
        self.cursor_position = self.input[..byte_idx + c.len_utf8()].graphemes(true).count();
    }

    pub fn delete_before_cursor(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            self.delete_at_cursor();
        }
    }

    pub fn delete_at_cursor(&mut self) {
        let start = Self::grapheme_to_byte_index(&self.input, self.cursor_position);
        let end = Self::grapheme_to_byte_index(&self.input, self.cursor_position + 1);
        self.input.drain(start..end);
    }

    pub fn move_cursor(&mut self, direction: i32) {
        match direction {
            -1 => self.cursor_position = self.cursor_position.saturating_sub(1),
            1 => self.cursor_position = (self.cursor_position + 1).min(self.input_len()),
            _ => {}
        }
    }

    /// Jumps to the previous or next word start, words as in UAX #29.
    pub fn move_cursor_by_words(&mut self, direction: i32) {
        let byte_pos = Self::grapheme_to_byte_index(&self.input, self.cursor_position);
        let starts: Vec<usize> = self
            .input
            .split_word_bound_indices()
            .filter(|(_, word)| !word.trim().is_empty())
            .map(|(i, _)| i)
            .collect();

        let target = if direction < 0 {
            starts.iter().rev().find(|&&i| i < byte_pos).copied().unwrap_or(0)
        } else {
            starts
                .iter()
                .find(|&&i| i > byte_pos)
                .copied()
                .unwrap_or(self.input.len())
        };
        self.cursor_position = self.input[..target].graphemes(true).count();
    }

    pub fn navigate_history(&mut self, direction: i32) {
        if direction < 0 && self.cursor_history > 0 {
            self.cursor_history -= 1;
        } else if direction > 0 && self.cursor_history < self.history.len().saturating_sub(1) {
            self.cursor_history += 1;
        }
        self.recall_selected();
    }

    pub fn scroll_history(&mut self, direction: i32) {
        let step = self.list_height.saturating_sub(1);
        if direction < 0 {
            self.cursor_history = self.cursor_history.saturating_sub(step);
        } else {
            self.cursor_history = self
                .cursor_history
                .saturating_add(step)
                .min(self.history.len().saturating_sub(1));
        }
        self.recall_selected();
    }

    fn recall_selected(&mut self) {
        match self.history.get(self.cursor_history) {
            Some(entry) => self.input = entry.input().to_string(),
            None => self.input.clear(),
        }
        self.cursor_position = self.input_len();
        self.input_scroll = 0;
        self.scroll_to_bottom = false;
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor_position = 0;
        self.input_scroll = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App<'static> {
        App::new(Calculator::default())
    }

    fn type_text(app: &mut App<'_>, text: &str) {
        for c in text.chars() {
            app.insert_char(c);
        }
    }

    #[test]
    fn submit_records_calculation() {
        let mut app = app();
        type_text(&mut app, "1km + 200m -> km");
        app.submit();

        assert!(app.input.is_empty());
        assert_eq!(app.history.len(), 1);
        match &app.history[0] {
            HistoryEntry::Calculation { input, outcome } => {
                assert_eq!(input, "1km + 200m -> km");
                assert_eq!(outcome.result.as_deref(), Ok("1.2 km"));
            }
            HistoryEntry::Message { .. } => panic!("expected a calculation"),
        }
    }

    #[test]
    fn commands_do_not_calculate() {
        let mut app = app();
        type_text(&mut app, "help");
        app.submit();
        assert!(app.show_help);
        assert!(app.history.is_empty());

        type_text(&mut app, "units");
        app.submit();
        assert!(matches!(app.history[0], HistoryEntry::Message { .. }));

        type_text(&mut app, "clear");
        app.submit();
        assert!(app.history.is_empty());

        type_text(&mut app, "quit");
        app.submit();
        assert!(app.should_quit);
    }

    #[test]
    fn history_recalls_input() {
        let mut app = app();
        for line in ["1+1", "2*3"] {
            type_text(&mut app, line);
            app.submit();
        }
        app.navigate_history(-1);
        assert_eq!(app.input, "1+1");
        assert_eq!(app.cursor_position, 3);
        app.navigate_history(1);
        assert_eq!(app.input, "2*3");
    }

    #[test]
    fn preview_locates_errors_in_the_input() {
        let mut app = app();
        assert!(app.preview().is_none());

        type_text(&mut app, "details 2 ^ 9");
        assert_eq!(app.preview(), Some((8, Ok("512".to_string()))));

        app.clear_input();
        type_text(&mut app, "  1 + )");
        assert_eq!(
            app.preview(),
            Some((2, Err(CalcError::UnmatchedRightParenthesis(4))))
        );

        app.clear_input();
        type_text(&mut app, "units");
        assert!(app.preview().is_none());
    }

    #[test]
    fn editing_works_on_graphemes() {
        let mut app = app();
        type_text(&mut app, "20 °C");
        assert_eq!(app.cursor_position, 5);
        app.move_cursor(-1);
        app.delete_before_cursor();
        assert_eq!(app.input, "20 C");
        app.delete_at_cursor();
        assert_eq!(app.input, "20 ");
    }

    #[test]
    fn word_movement() {
        let mut app = app();
        type_text(&mut app, "12 km + 3 m");
        app.move_cursor_by_words(-1);
        assert_eq!(app.cursor_position, 10);
        app.move_cursor_by_words(-1);
        assert_eq!(app.cursor_position, 8);
        app.cursor_position = 0;
        app.move_cursor_by_words(1);
        assert_eq!(app.cursor_position, 3);
    }
}
