//! Teardown confirmation gate.
//!
//! ```text
//! AwaitingConfirmation --"y"--> Deleting --> Done
//! AwaitingConfirmation --else-> Aborted
//! ```

use serde::Serialize;

/// The only answer that allows deletion.
pub const CONFIRM_ANSWER: &str = "y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TeardownState {
    AwaitingConfirmation,
    Deleting,
    Done,
    Aborted,
}

impl TeardownState {
    /// Apply the operator's answer. `None` means end of input.
    ///
    /// Only the line terminator is stripped; `"Y"`, `"yes"` and `" y"` abort.
    pub fn answer(self, line: Option<&str>) -> TeardownState {
        match self {
            TeardownState::AwaitingConfirmation => match line.map(strip_line_ending) {
                Some(CONFIRM_ANSWER) => TeardownState::Deleting,
                _ => TeardownState::Aborted,
            },
            other => other,
        }
    }

    /// Deletion finished.
    pub fn deleted(self) -> TeardownState {
        match self {
            TeardownState::Deleting => TeardownState::Done,
            other => other,
        }
    }
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_y_moves_to_deleting() {
        let state = TeardownState::AwaitingConfirmation.answer(Some("y\n"));
        assert_eq!(state, TeardownState::Deleting);
        assert_eq!(state.deleted(), TeardownState::Done);
    }

    #[test]
    fn crlf_terminated_y_is_accepted() {
        let state = TeardownState::AwaitingConfirmation.answer(Some("y\r\n"));
        assert_eq!(state, TeardownState::Deleting);
    }

    #[test]
    fn other_answers_abort() {
        for answer in ["Y\n", "yes\n", "\n", "n\n", " y\n", "y \n", ""] {
            let state = TeardownState::AwaitingConfirmation.answer(Some(answer));
            assert_eq!(state, TeardownState::Aborted, "answer {answer:?}");
        }
    }

    #[test]
    fn end_of_input_aborts() {
        let state = TeardownState::AwaitingConfirmation.answer(None);
        assert_eq!(state, TeardownState::Aborted);
    }

    #[test]
    fn aborted_never_reaches_done() {
        assert_eq!(TeardownState::Aborted.deleted(), TeardownState::Aborted);
        assert_eq!(
            TeardownState::Aborted.answer(Some("y\n")),
            TeardownState::Aborted
        );
    }
}
