use crossterm::event::KeyCode;

/// Longest pid the dialog accepts, in digits. `u32::MAX` has ten.
pub const MAX_INPUT_DIGITS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOutcome {
    /// Still collecting digits.
    Pending,
    Confirmed(u32),
    Cancelled,
    /// Enter pressed on an empty or unparseable buffer.
    Invalid,
}

/// Numeric entry state for the "terminate process" dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KillPrompt {
    buffer: String,
}

impl KillPrompt {
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Feeds one key. Any outcome other than `Pending` leaves the buffer empty.
    pub fn handle_key(&mut self, code: KeyCode) -> PromptOutcome {
        match code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if self.buffer.len() < MAX_INPUT_DIGITS {
                    self.buffer.push(c);
                }
                PromptOutcome::Pending
            }
            KeyCode::Backspace => {
                self.buffer.pop();
                PromptOutcome::Pending
            }
            KeyCode::Esc => {
                self.reset();
                PromptOutcome::Cancelled
            }
            KeyCode::Enter => {
                let outcome = match self.buffer.parse::<u32>() {
                    Ok(pid) if pid > 0 => PromptOutcome::Confirmed(pid),
                    _ => PromptOutcome::Invalid,
                };
                self.reset();
                outcome
            }
            _ => PromptOutcome::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(prompt: &mut KillPrompt, input: &str) -> PromptOutcome {
        let mut outcome = PromptOutcome::Pending;
        for c in input.chars() {
            let code = if c == '\n' {
                KeyCode::Enter
            } else {
                KeyCode::Char(c)
            };
            outcome = prompt.handle_key(code);
        }
        outcome
    }

    #[test]
    fn non_digits_are_ignored() {
        let mut prompt = KillPrompt::default();
        assert_eq!(feed(&mut prompt, "12a3\n"), PromptOutcome::Confirmed(123));
        assert_eq!(prompt.buffer(), "");
    }

    #[test]
    fn empty_buffer_confirm_is_invalid() {
        let mut prompt = KillPrompt::default();
        assert_eq!(prompt.handle_key(KeyCode::Enter), PromptOutcome::Invalid);
    }

    #[test]
    fn zero_is_not_a_valid_pid() {
        let mut prompt = KillPrompt::default();
        assert_eq!(feed(&mut prompt, "000\n"), PromptOutcome::Invalid);
    }

    #[test]
    fn full_buffer_drops_extra_digits() {
        let mut prompt = KillPrompt::default();
        feed(&mut prompt, "123456789012345");
        assert_eq!(prompt.buffer(), "1234567890");
        // 1234567890 still fits in u32
        assert_eq!(
            prompt.handle_key(KeyCode::Enter),
            PromptOutcome::Confirmed(1_234_567_890)
        );
    }

    #[test]
    fn out_of_range_number_is_invalid() {
        let mut prompt = KillPrompt::default();
        assert_eq!(feed(&mut prompt, "9999999999\n"), PromptOutcome::Invalid);
    }

    #[test]
    fn backspace_removes_last_digit_and_tolerates_empty() {
        let mut prompt = KillPrompt::default();
        feed(&mut prompt, "42");
        prompt.handle_key(KeyCode::Backspace);
        assert_eq!(prompt.buffer(), "4");
        prompt.handle_key(KeyCode::Backspace);
        prompt.handle_key(KeyCode::Backspace);
        assert_eq!(prompt.buffer(), "");
    }

    #[test]
    fn escape_discards_buffer() {
        let mut prompt = KillPrompt::default();
        feed(&mut prompt, "99");
        assert_eq!(prompt.handle_key(KeyCode::Esc), PromptOutcome::Cancelled);
        assert_eq!(prompt.buffer(), "");
    }
}
