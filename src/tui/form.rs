//! Form state and key handling, independent of the terminal.
//!
//! Submission cycle:
//!
//! ```text
//! Idle -> Collecting -> Submitted -> RenderedSuccess | RenderedError -> (edit) Collecting
//! ```

use crossterm::event::KeyCode;

use crate::app::pipeline::Predictor;
use crate::domain::{Attribute, AttributeRecord, CategoricalAttribute, NumericAttribute};
use crate::encoding::CategoryRegistry;
use crate::report::{OutcomeKind, RenderedOutcome};

/// Longest digit string accepted while typing a number.
const MAX_DIGITS: usize = 7;
/// Multiplier applied to a control's step by PgUp/PgDn.
const PAGE_STEPS: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Collecting,
    Submitted,
    RenderedSuccess,
    RenderedError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Numeric {
        attr: NumericAttribute,
        value: i64,
    },
    Choice {
        attr: CategoricalAttribute,
        choices: Vec<&'static str>,
        index: usize,
    },
}

impl Control {
    pub fn attribute(&self) -> Attribute {
        match self {
            Control::Numeric { attr, .. } => Attribute::Numeric(*attr),
            Control::Choice { attr, .. } => Attribute::Categorical(*attr),
        }
    }

    pub fn value_text(&self) -> String {
        match self {
            Control::Numeric { value, .. } => value.to_string(),
            Control::Choice { choices, index, .. } => choices.get(*index).copied().unwrap_or("").to_string(),
        }
    }

    fn adjust(&mut self, steps: i64) {
        match self {
            Control::Numeric { attr, value } => {
                let b = attr.bounds();
                *value = b.clamp(value.saturating_add(steps.saturating_mul(b.step)));
            }
            Control::Choice { choices, index, .. } => {
                let n = choices.len() as i64;
                if n == 0 {
                    return;
                }
                *index = if steps.abs() == 1 {
                    (*index as i64 + steps).rem_euclid(n) as usize
                } else {
                    (*index as i64 + steps).clamp(0, n - 1) as usize
                };
            }
        }
    }

    fn jump_to_default(&mut self) {
        match self {
            Control::Numeric { attr, value } => *value = attr.bounds().default,
            Control::Choice { index, .. } => *index = 0,
        }
    }

    fn jump_to_end(&mut self, last: bool) {
        match self {
            Control::Numeric { attr, value } => {
                let b = attr.bounds();
                *value = if last { b.max } else { b.min };
            }
            Control::Choice { choices, index, .. } => {
                *index = if last { choices.len().saturating_sub(1) } else { 0 };
            }
        }
    }
}

/// What the caller should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
    Quit,
}

#[derive(Debug, Clone)]
pub struct Form {
    controls: Vec<Control>,
    selected: usize,
    /// Digits typed into the selected numeric control, not yet committed.
    edit_buffer: Option<String>,
    phase: Phase,
    outcome: Option<RenderedOutcome>,
}

impl Form {
    pub fn new(registry: &CategoryRegistry) -> Self {
        let controls = Attribute::FORM_ORDER
            .iter()
            .map(|attr| match *attr {
                Attribute::Numeric(attr) => Control::Numeric {
                    attr,
                    value: attr.bounds().default,
                },
                Attribute::Categorical(attr) => Control::Choice {
                    attr,
                    choices: registry.values(attr).to_vec(),
                    index: 0,
                },
            })
            .collect();
        Self {
            controls,
            selected: 0,
            edit_buffer: None,
            phase: Phase::Idle,
            outcome: None,
        }
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn edit_buffer(&self) -> Option<&str> {
        self.edit_buffer.as_deref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Option<&RenderedOutcome> {
        self.outcome.as_ref()
    }

    pub fn handle_key(&mut self, code: KeyCode) -> FormAction {
        if self.phase == Phase::Submitted {
            // Input is blocked until the submission is rendered.
            return FormAction::None;
        }

        match code {
            KeyCode::Char('q') => return FormAction::Quit,
            KeyCode::Enter => {
                self.commit_edit();
                self.phase = Phase::Submitted;
                return FormAction::Submit;
            }
            KeyCode::Char('r') => {
                for control in &mut self.controls {
                    control.jump_to_default();
                }
                self.edit_buffer = None;
                self.outcome = None;
                self.phase = Phase::Idle;
                return FormAction::None;
            }
            KeyCode::Up => {
                self.commit_edit();
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down => {
                self.commit_edit();
                if self.selected + 1 < self.controls.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Left => self.adjust(-1),
            KeyCode::Right => self.adjust(1),
            KeyCode::PageDown => self.adjust(-PAGE_STEPS),
            KeyCode::PageUp => self.adjust(PAGE_STEPS),
            KeyCode::Home => {
                self.commit_edit();
                self.controls[self.selected].jump_to_end(false);
            }
            KeyCode::End => {
                self.commit_edit();
                self.controls[self.selected].jump_to_end(true);
            }
            KeyCode::Esc => {
                self.edit_buffer = None;
            }
            KeyCode::Backspace => {
                if let Control::Numeric { value, .. } = &self.controls[self.selected] {
                    let current = value.to_string();
                    let buffer = self.edit_buffer.get_or_insert(current);
                    buffer.pop();
                }
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if matches!(self.controls[self.selected], Control::Numeric { .. }) {
                    let buffer = self.edit_buffer.get_or_insert_with(String::new);
                    if buffer.len() < MAX_DIGITS {
                        buffer.push(c);
                    }
                }
            }
            _ => return FormAction::None,
        }

        self.phase = Phase::Collecting;
        FormAction::None
    }

    /// Current control values as a record.
    pub fn record(&self, registry: &CategoryRegistry) -> AttributeRecord {
        let mut record = registry.default_record();
        for control in &self.controls {
            match control {
                Control::Numeric { attr, value } => record.set_numeric(*attr, *value as f64),
                Control::Choice { attr, choices, index } => {
                    record.set_categorical(*attr, choices.get(*index).copied().unwrap_or(""))
                }
            }
        }
        record
    }

    /// Run the pending submission and store the rendered outcome.
    pub fn submit(&mut self, predictor: &Predictor<'_>) -> &RenderedOutcome {
        self.commit_edit();
        self.phase = Phase::Submitted;
        let record = self.record(predictor.encoder().registry());
        let rendered = predictor.run(&record).render();
        self.phase = match rendered.kind {
            OutcomeKind::Success => Phase::RenderedSuccess,
            OutcomeKind::Error => Phase::RenderedError,
        };
        self.outcome.insert(rendered)
    }

    fn adjust(&mut self, steps: i64) {
        self.commit_edit();
        self.controls[self.selected].adjust(steps);
    }

    /// Apply typed digits to the selected control, clamped to its bounds.
    fn commit_edit(&mut self) {
        let Some(buffer) = self.edit_buffer.take() else {
            return;
        };
        if let Control::Numeric { attr, value } = &mut self.controls[self.selected] {
            if let Ok(parsed) = buffer.parse::<i64>() {
                *value = attr.bounds().clamp(parsed);
            }
        }
    }
}
