use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use zephyr_core::{FormState, SignupField};

use crate::actions::Action;

/// Focusable widgets, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(SignupField),
    Division,
    SignUp,
}

impl Focus {
    pub const ORDER: [Focus; 7] = [
        Focus::Field(SignupField::FirstName),
        Focus::Field(SignupField::LastName),
        Focus::Field(SignupField::PhoneNumber),
        Focus::Field(SignupField::Email),
        Focus::Field(SignupField::School),
        Focus::Division,
        Focus::SignUp,
    ];
}

#[derive(Debug, Default)]
pub struct App {
    pub form: FormState,
    pub should_quit: bool,
    pub status: Option<String>,
    pub error: Option<String>,
    focus: usize,
    actions: VecDeque<Action>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> Focus {
        Focus::ORDER[self.focus]
    }

    pub fn enqueue(&mut self, action: Action) {
        self.actions.push_back(action);
    }

    pub fn next_action(&mut self) -> Option<Action> {
        self.actions.pop_front()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status = None;
        self.error = Some(message.into());
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.error = None;
        self.status = Some(message.into());
    }

    pub fn focus_first(&mut self) {
        self.focus = 0;
    }

    fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % Focus::ORDER.len();
    }

    fn focus_prev(&mut self) {
        if self.focus == 0 {
            self.focus = Focus::ORDER.len() - 1;
        } else {
            self.focus -= 1;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press && key.kind != KeyEventKind::Repeat {
            return;
        }

        if matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        ) || key.code == KeyCode::Esc
        {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Tab => {
                self.focus_next();
                return;
            }
            KeyCode::BackTab => {
                self.focus_prev();
                return;
            }
            _ => {}
        }

        match self.focus() {
            Focus::Field(field) => self.handle_field_key(field, key),
            Focus::Division => self.handle_division_key(key),
            Focus::SignUp => {
                if key.code == KeyCode::Enter && self.form.is_valid() {
                    self.enqueue(Action::Submit);
                }
            }
        }
    }

    fn handle_field_key(&mut self, field: SignupField, key: KeyEvent) {
        if key.code == KeyCode::Enter {
            self.focus_next();
            return;
        }
        let mut value = self.form.field_value(field).to_string();
        if apply_text_input(&mut value, key) {
            self.form.update_field(field, &value);
        }
    }

    fn handle_division_key(&mut self, key: KeyEvent) {
        let current = self.form.division();
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.form.update_division(current.prev()),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
                self.form.update_division(current.next())
            }
            KeyCode::Enter => self.focus_next(),
            _ => {}
        }
    }
}

/// Applies an editing key to `target`; returns whether the key was an edit.
fn apply_text_input(target: &mut String, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            target.clear();
            true
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            delete_last_word(target);
            true
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            target.push(ch);
            true
        }
        KeyCode::Backspace => {
            target.pop();
            true
        }
        _ => false,
    }
}

fn delete_last_word(value: &mut String) {
    while value.ends_with(|ch: char| ch.is_whitespace()) {
        value.pop();
    }
    while value.ends_with(|ch: char| !ch.is_whitespace()) {
        value.pop();
    }
}
