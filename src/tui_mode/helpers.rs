use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use dimcalc::calc_engine::lexer::tokenize;
use dimcalc::calc_engine::Token;
use dimcalc::units::UnitRegistry;

/// Greedy word wrap by display width; words wider than `width` are split
/// between graphemes.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() { 0 } else { 1 } + word.width();
        if current.width() + needed <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if word.width() <= width {
            current.push_str(word);
            continue;
        }

        for grapheme in word.graphemes(true) {
            if current.width() + grapheme.width() > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current.push_str(grapheme);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Colours numbers, units and operators of an expression. Text that does not
/// lex is shown in `base_style`.
pub fn highlight_expression(
    expr: &str,
    registry: &UnitRegistry,
    base_style: Style,
) -> Vec<Span<'static>> {
    let tokens = match tokenize(expr, registry) {
        Ok(tokens) => tokens,
        Err(_) => return vec![Span::styled(expr.to_string(), base_style)],
    };

    let number_style = Style::default().fg(Color::LightGreen);
    let unit_style = Style::default()
        .fg(Color::LightBlue)
        .add_modifier(Modifier::BOLD);
    let operator_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let ends = tokens
        .iter()
        .skip(1)
        .map(Token::offset)
        .chain(std::iter::once(expr.len()));

    tokens
        .iter()
        .zip(ends)
        .map(|(token, end)| {
            let text = expr[token.offset()..end].to_string();
            match token {
                Token::Whitespace(..) => Span::raw(text),
                Token::Numeric(..) | Token::Physical(..) => Span::styled(text, number_style),
                Token::Unit(..) => Span::styled(text, unit_style),
                Token::Operator(op, _) if op.is_paren() => Span::styled(text, base_style),
                Token::Operator(..) => Span::styled(text, operator_style),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_words() {
        assert_eq!(wrap_text("1 km + 200 m", 6), vec!["1 km +", "200 m"]);
        assert_eq!(wrap_text("", 6), Vec::<String>::new());
        assert_eq!(wrap_text("abc", 0), vec![""]);
    }

    #[test]
    fn splits_long_words() {
        assert_eq!(wrap_text("abcdefg h", 3), vec!["abc", "def", "g h"]);
    }

    #[test]
    fn highlights_each_token() {
        let spans = highlight_expression("2 km*3", UnitRegistry::builtin(), Style::default());
        let texts: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(texts, vec!["2", " ", "km", "*", "3"]);
        assert_eq!(spans[2].style.fg, Some(Color::LightBlue));

        let spans = highlight_expression("2 % 3", UnitRegistry::builtin(), Style::default());
        assert_eq!(spans.len(), 1);
    }
}
