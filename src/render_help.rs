use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use dimcalc::calc_engine::Operator;

use crate::session::unit_listing;
use crate::tui_mode::app::App;

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::UNDERLINED),
    ))
}

pub fn render_help(frame: &mut Frame, app: &mut App<'_>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" dimcalc Help ")
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));

    let mut help_text = vec![
        Line::from(Span::styled(
            "dimcalc - Calculator for expressions with physical units",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        heading("Operators:"),
    ];
    help_text.extend(
        Operator::ALL
            .iter()
            .map(|op| Line::from(format!("  {} : {}", op.symbol(), op.describe()))),
    );
    help_text.extend([
        Line::from("  ^ binds tightest, then * /, then + -; equal operators group left to right"),
        Line::from(""),
        heading("Quantities:"),
        Line::from("  A number followed by a unit: 1km, 200 m, 3 m/s^2, 20 degC"),
        Line::from("  A unit after an operator means one of it: 2 * m"),
        Line::from("  A unit after parentheses applies to the group: (3-1) m"),
        Line::from("  Only quantities of the same dimension add up: 1m + 1s is an error"),
        Line::from("  Results are in base units; the favourite unit is shown in parentheses"),
        Line::from(""),
        heading("Commands:"),
        Line::from("  <expression> -> <unit> : Show the result in a unit (0 degC -> degF)"),
        Line::from("  details <expression> : Show step-by-step evaluation with time"),
        Line::from("  units : List known units"),
        Line::from("  clear : Clear calculation history"),
        Line::from("  Ctrl+U : Clear current input"),
        Line::from("  help : Show this help screen"),
        Line::from("  quit : Exit the calculator"),
        Line::from(""),
        heading("Navigation:"),
        Line::from("  ← → : Move cursor left/right"),
        Line::from("  Ctrl+←/→ : Move cursor by words"),
        Line::from("  Home/End : Move to start/end of line"),
        Line::from("  ↑ ↓ : Navigate calculation history"),
        Line::from("  PgUp/PgDn : Page through history"),
        Line::from("  Mouse wheel : Scroll through history"),
        Line::from(""),
        heading("Units (* = favourite):"),
    ]);
    help_text.extend(
        unit_listing(app.calc.registry())
            .into_iter()
            .map(|line| Line::from(format!("  {}", line))),
    );

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true })
        .scroll((app.help_scroll as u16, 0));

    frame.render_widget(Clear, frame.size());
    frame.render_widget(paragraph, frame.size());
}
