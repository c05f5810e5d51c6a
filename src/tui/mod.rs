//! Ratatui-based terminal form.
//!
//! The form shows one control per attribute on the left and the latest
//! prediction on the right. Each submission runs synchronously; keys pressed
//! while it runs are ignored.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::pipeline::Predictor;
use crate::error::{AppError, EXIT_RUNTIME};
use crate::report::OutcomeKind;

pub mod form;

use form::{Control, Form, FormAction, Phase};

/// Start the form. Returns when the user quits.
pub fn run(predictor: &Predictor<'_>, model_summary: String) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(predictor, model_summary);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(EXIT_RUNTIME, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App<'a> {
    form: Form,
    predictor: &'a Predictor<'a>,
    model_summary: String,
}

impl<'a> App<'a> {
    fn new(predictor: &'a Predictor<'a>, model_summary: String) -> Self {
        Self {
            form: Form::new(predictor.encoder().registry()),
            predictor,
            model_summary,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                self.redraw(terminal)?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(EXIT_RUNTIME, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match self.form.handle_key(key.code) {
                        FormAction::Quit => break,
                        FormAction::Submit => {
                            // Show the Submitted state before the synchronous call.
                            self.redraw(terminal)?;
                            self.form.submit(self.predictor);
                        }
                        FormAction::None => {}
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn redraw<B: ratatui::backend::Backend>(&self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        terminal
            .draw(|f| self.draw(f))
            .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Terminal draw error: {e}")))?;
        Ok(())
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                "Salary Prediction App",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Enter details to predict if the person earns more than $50K/year.",
                Style::default().fg(Color::Gray),
            )),
        ];
        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        self.draw_form(frame, chunks[0]);
        self.draw_result(frame, chunks[1]);
    }

    fn draw_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = self
            .form
            .controls()
            .iter()
            .enumerate()
            .map(|(idx, control)| {
                let value = match self.form.edit_buffer() {
                    Some(buffer) if idx == self.form.selected() => format!("{buffer}▏"),
                    _ => control.value_text(),
                };
                let hint = match control {
                    Control::Numeric { attr, .. } => {
                        let b = attr.bounds();
                        format!("  [{}..{}]", b.min, b.max)
                    }
                    Control::Choice { .. } => String::new(),
                };
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{:<17}", control.attribute().display_name())),
                    Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(hint, Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Details").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.form.selected()));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_result(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        match (self.form.phase(), self.form.outcome()) {
            (Phase::Submitted, _) => {
                lines.push(Line::from(Span::styled("Predicting…", Style::default().fg(Color::Yellow))));
            }
            (_, Some(outcome)) => {
                let color = match outcome.kind {
                    OutcomeKind::Success => Color::Green,
                    OutcomeKind::Error => Color::Red,
                };
                lines.push(Line::from(Span::styled(
                    outcome.text.clone(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )));
            }
            (_, None) => {
                lines.push(Line::from(Span::styled(
                    "Press Enter to predict.",
                    Style::default().fg(Color::Gray),
                )));
            }
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            self.model_summary.clone(),
            Style::default().fg(Color::DarkGray),
        )));

        let p = Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Prediction").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  PgUp/PgDn ×10  0-9 type  Enter predict  r reset  q quit";
        let phase = match self.form.phase() {
            Phase::Idle => "idle",
            Phase::Collecting => "editing",
            Phase::Submitted => "predicting",
            Phase::RenderedSuccess => "done",
            Phase::RenderedError => "failed",
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(phase, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::app::pipeline::test_support::FixedClassifier;
    use crate::encoding::{CategoryRegistry, FeatureEncoder};

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn renders_controls_and_prediction() {
        let encoder = FeatureEncoder::new(CategoryRegistry::census());
        let model = FixedClassifier {
            width: encoder.width(),
            class: 1,
        };
        let predictor = Predictor::new(&encoder, &model);
        let mut app = App::new(&predictor, "model: test".to_string());
        let mut terminal = Terminal::new(TestBackend::new(140, 30)).unwrap();

        app.redraw(&mut terminal).unwrap();
        let before = screen(&terminal);
        assert!(before.contains("Salary Prediction App"));
        assert!(before.contains("Native Country"));
        assert!(before.contains("United-States"));
        assert!(before.contains("Press Enter to predict."));

        assert_eq!(app.form.handle_key(KeyCode::Enter), FormAction::Submit);
        app.redraw(&mut terminal).unwrap();
        assert!(screen(&terminal).contains("Predicting"));

        app.form.submit(app.predictor);
        app.redraw(&mut terminal).unwrap();
        let after = screen(&terminal);
        assert!(after.contains("The predicted salary for the provided details is: >50K"));
        assert!(after.contains("model: test"));
    }

    #[test]
    fn renders_error_message() {
        let encoder = FeatureEncoder::new(CategoryRegistry::census());
        let model = FixedClassifier { width: 1, class: 0 };
        let predictor = Predictor::new(&encoder, &model);
        let mut app = App::new(&predictor, String::new());
        let mut terminal = Terminal::new(TestBackend::new(140, 30)).unwrap();

        app.form.handle_key(KeyCode::Enter);
        app.form.submit(app.predictor);
        app.redraw(&mut terminal).unwrap();
        let text = screen(&terminal);
        assert!(text.contains("Prediction failed"));
        assert!(text.contains("failed"));
    }
}
