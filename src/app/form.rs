use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

const RECEIVER_MAX: usize = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Amount,
    Receiver,
    Send,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Field::Amount => Field::Receiver,
            Field::Receiver => Field::Send,
            Field::Send => Field::Amount,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::Amount => Field::Send,
            Field::Receiver => Field::Amount,
            Field::Send => Field::Receiver,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Submit,
    Refresh,
    Quit,
}

/// The amount / receiver inputs and which widget has focus.
#[derive(Debug, Default)]
pub struct TransferForm {
    pub amount: String,
    pub receiver: String,
    pub focus: Field,
}

impl TransferForm {
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => Action::Quit,
            KeyCode::Char('r') if ctrl => Action::Refresh,
            KeyCode::Esc => Action::Quit,
            KeyCode::F(5) => Action::Refresh,
            KeyCode::Enter => Action::Submit,
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                Action::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                Action::None
            }
            KeyCode::Backspace => {
                if let Some(buf) = self.focused_buffer() {
                    buf.pop();
                }
                Action::None
            }
            KeyCode::Char(c) if !ctrl => {
                match self.focus {
                    Field::Amount if c.is_ascii_digit() => self.amount.push(c),
                    Field::Receiver
                        if (c.is_ascii_hexdigit() || c == 'x' || c == 'X')
                            && self.receiver.len() < RECEIVER_MAX =>
                    {
                        self.receiver.push(c)
                    }
                    _ => {}
                }
                Action::None
            }
            _ => Action::None,
        }
    }

    fn focused_buffer(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Amount => Some(&mut self.amount),
            Field::Receiver => Some(&mut self.receiver),
            Field::Send => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_str(form: &mut TransferForm, s: &str) {
        for c in s.chars() {
            form.handle_key(press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn amount_takes_digits_only() {
        let mut f = TransferForm::default();
        type_str(&mut f, "1a2.3-");
        assert_eq!(f.amount, "123");
        f.handle_key(press(KeyCode::Backspace));
        assert_eq!(f.amount, "12");
    }

    #[test]
    fn receiver_takes_hex_and_caps_length() {
        let mut f = TransferForm::default();
        f.handle_key(press(KeyCode::Tab));
        assert_eq!(f.focus, Field::Receiver);
        type_str(&mut f, "0xZZab");
        assert_eq!(f.receiver, "0xab");
        type_str(&mut f, &"f".repeat(60));
        assert_eq!(f.receiver.len(), RECEIVER_MAX);
    }

    #[test]
    fn focus_cycles_both_ways() {
        let mut f = TransferForm::default();
        f.handle_key(press(KeyCode::Tab));
        f.handle_key(press(KeyCode::Tab));
        assert_eq!(f.focus, Field::Send);
        f.handle_key(press(KeyCode::Tab));
        assert_eq!(f.focus, Field::Amount);
        f.handle_key(press(KeyCode::BackTab));
        assert_eq!(f.focus, Field::Send);
        // typing on the button does nothing
        type_str(&mut f, "42");
        assert!(f.amount.is_empty() && f.receiver.is_empty());
    }

    #[test]
    fn actions() {
        let mut f = TransferForm::default();
        assert_eq!(f.handle_key(press(KeyCode::Enter)), Action::Submit);
        assert_eq!(f.handle_key(press(KeyCode::F(5))), Action::Refresh);
        assert_eq!(f.handle_key(ctrl('r')), Action::Refresh);
        assert_eq!(f.handle_key(ctrl('c')), Action::Quit);
        assert_eq!(f.handle_key(press(KeyCode::Esc)), Action::Quit);
        assert!(f.amount.is_empty());
    }

    #[test]
    fn releases_are_ignored() {
        let mut f = TransferForm::default();
        let mut ev = press(KeyCode::Char('7'));
        ev.kind = KeyEventKind::Release;
        assert_eq!(f.handle_key(ev), Action::None);
        assert!(f.amount.is_empty());
    }
}
