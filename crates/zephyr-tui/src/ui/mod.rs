use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use zephyr_core::SignupField;

use crate::app::{App, Focus};

const FOOTER_HINT: &str =
    "tab next  shift+tab prev  left/right division  enter sign up  ctrl+u clear  esc quit";

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let size = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(12),
            Constraint::Length(4),
        ])
        .split(size);

    render_header(frame, chunks[0]);
    render_form(frame, centered_rect(70, 90, chunks[1]), app);
    render_footer(frame, chunks[2], app);
}

fn render_header(frame: &mut Frame<'_>, area: Rect) {
    let title = Line::from(Span::styled(
        "Coach Signup",
        Style::default().add_modifier(Modifier::BOLD),
    ));
    let paragraph = Paragraph::new(title)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Zephyr"));
    frame.render_widget(paragraph, area);
}

fn render_form(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let focus = app.focus();
    let mut lines: Vec<Line> = SignupField::REQUIRED
        .iter()
        .map(|field| {
            field_line(
                field.label(),
                app.form.field_value(*field),
                focus == Focus::Field(*field),
            )
        })
        .collect();

    let division = format!("< {} >", app.form.division().display_name());
    lines.push(field_line("UIL Division", &division, focus == Focus::Division));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Sign Up]",
        button_style(app.form.is_valid(), focus == Focus::SignUp),
    )));

    let block = Block::default().borders(Borders::ALL).title("Sign up");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_footer(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let mut lines = vec![Line::from(Span::styled(
        FOOTER_HINT,
        Style::default().fg(Color::DarkGray),
    ))];

    if let Some(status) = &app.status {
        lines.push(Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Green),
        )));
    }
    if let Some(err) = &app.error {
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn button_style(enabled: bool, focused: bool) -> Style {
    match (enabled, focused) {
        (false, _) => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM),
        (true, true) => Style::default().fg(Color::Black).bg(Color::LightGreen),
        (true, false) => Style::default().fg(Color::Green),
    }
}

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(
            format!("{}: ", label),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(value.to_string(), style),
    ])
}

fn centered_rect(percent_x: u16, percent_y: u16, rect: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(rect);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
