//! Booking dialogue module for handling conversation state with guests.

use serde::{Deserialize, Serialize};

use crate::profile::UserProfile;

/// The step the conversation is waiting on
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogStep {
    /// No dialog is active
    #[default]
    Idle,
    AwaitingName {
        draft: UserProfile,
    },
    AwaitingAge {
        draft: UserProfile,
    },
    AwaitingRoomType {
        draft: UserProfile,
    },
    AwaitingPaymentType {
        draft: UserProfile,
    },
    /// Review dialog, waiting on the Yes/No answer
    AwaitingConfirmation {
        profile: UserProfile,
    },
}

/// Identifies the dialog on top of the stack
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogId {
    Booking,
    Review,
    Hold,
}

/// Persisted per conversation. Hold is never nested, so it is a flag over
/// whatever step sits beneath it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogState {
    pub step: DialogStep,
    #[serde(default)]
    pub on_hold: bool,
}

impl DialogState {
    /// The dialog that receives the next message, if any
    pub fn active_dialog(&self) -> Option<DialogId> {
        if self.on_hold {
            return Some(DialogId::Hold);
        }
        match self.step {
            DialogStep::Idle => None,
            DialogStep::AwaitingConfirmation { .. } => Some(DialogId::Review),
            _ => Some(DialogId::Booking),
        }
    }

    /// Drop every dialog, including a pending hold
    pub fn clear(&mut self) {
        *self = DialogState::default();
    }
}

impl DialogStep {
    /// Short name used in log fields
    pub fn name(&self) -> &'static str {
        match self {
            DialogStep::Idle => "idle",
            DialogStep::AwaitingName { .. } => "name",
            DialogStep::AwaitingAge { .. } => "age",
            DialogStep::AwaitingRoomType { .. } => "room_type",
            DialogStep::AwaitingPaymentType { .. } => "payment_type",
            DialogStep::AwaitingConfirmation { .. } => "confirmation",
        }
    }
}

/// Validates a free-text answer such as the guest name
pub fn validate_text_answer(input: &str) -> Result<String, &'static str> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err("empty");
    }

    Ok(trimmed.to_string())
}

/// Parses an age answer. Accepts a bare integer or the first integer token
/// in a sentence ("I am 25").
pub fn parse_age(input: &str) -> Option<i32> {
    let trimmed = input.trim();
    if let Ok(age) = trimmed.parse::<i32>() {
        return Some(age);
    }

    trimmed
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| !c.is_ascii_digit() && c != '-'))
        .find_map(|token| token.parse::<i32>().ok())
}

/// Matches an answer against a list of option labels.
///
/// Returns the index of the chosen option. An answer is accepted when it is
/// the label itself (any case), the 1-based position of the option, or a set
/// of words found in exactly one label.
pub fn recognize_choice<S: AsRef<str>>(input: &str, options: &[S]) -> Option<usize> {
    let answer = input.trim().to_lowercase();
    if answer.is_empty() {
        return None;
    }

    if let Some(index) = options
        .iter()
        .position(|option| option.as_ref().to_lowercase() == answer)
    {
        return Some(index);
    }

    if let Ok(ordinal) = answer.parse::<usize>() {
        return (1..=options.len()).contains(&ordinal).then(|| ordinal - 1);
    }

    let words: Vec<&str> = answer.split_whitespace().collect();
    let mut candidates = options.iter().enumerate().filter(|(_, option)| {
        let label = option.as_ref().to_lowercase();
        let label_words: Vec<&str> = label.split_whitespace().collect();
        words.iter().all(|word| label_words.contains(word))
    });

    match (candidates.next(), candidates.next()) {
        (Some((index, _)), None) => Some(index),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_answer_validation() {
        assert_eq!(validate_text_answer("  Ada Lovelace ").unwrap(), "Ada Lovelace");
        assert!(validate_text_answer("").is_err());
        assert!(validate_text_answer("   ").is_err());
    }

    #[test]
    fn test_age_parsing() {
        assert_eq!(parse_age("25"), Some(25));
        assert_eq!(parse_age(" 17 "), Some(17));
        assert_eq!(parse_age("I am 42 years old"), Some(42));
        assert_eq!(parse_age("-3"), Some(-3));
        assert_eq!(parse_age("twenty"), None);
        assert_eq!(parse_age(""), None);
    }

    #[test]
    fn test_choice_recognition() {
        let rooms = ["Single", "Double", "Triple", "King"];
        assert_eq!(recognize_choice("king", &rooms), Some(3));
        assert_eq!(recognize_choice("DOUBLE", &rooms), Some(1));
        assert_eq!(recognize_choice("1", &rooms), Some(0));
        assert_eq!(recognize_choice("5", &rooms), None);
        assert_eq!(recognize_choice("0", &rooms), None);
        assert_eq!(recognize_choice("suite", &rooms), None);
        assert_eq!(recognize_choice("", &rooms), None);

        let payments = ["Money", "Credit card"];
        assert_eq!(recognize_choice("credit card", &payments), Some(1));
        assert_eq!(recognize_choice("card", &payments), Some(1));
        assert_eq!(recognize_choice("cash", &payments), None);
    }

    #[test]
    fn test_ambiguous_words_are_rejected() {
        let options = ["Credit card", "Debit card"];
        assert_eq!(recognize_choice("card", &options), None);
        assert_eq!(recognize_choice("debit", &options), Some(1));
    }

    #[test]
    fn test_active_dialog() {
        let mut state = DialogState::default();
        assert_eq!(state.active_dialog(), None);

        state.step = DialogStep::AwaitingAge {
            draft: UserProfile::default(),
        };
        assert_eq!(state.active_dialog(), Some(DialogId::Booking));

        state.on_hold = true;
        assert_eq!(state.active_dialog(), Some(DialogId::Hold));

        state.clear();
        assert_eq!(state, DialogState::default());
    }
}
