//! Inbound turns and outbound replies, independent of the chat transport.

use crate::localization::{t_args_lang, t_lang};

/// What happened in the conversation this turn
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Activity {
    /// A guest message; `None` for messages without text
    Message { text: Option<String> },
    /// New participants joined the conversation
    MembersAdded,
}

/// One inbound event for a conversation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub conversation_id: String,
    pub user_id: String,
    pub language_code: Option<String>,
    pub activity: Activity,
}

impl Turn {
    pub fn message(conversation_id: &str, user_id: &str, text: &str) -> Self {
        Self {
            conversation_id: conversation_id.to_string(),
            user_id: user_id.to_string(),
            language_code: None,
            activity: Activity::Message {
                text: Some(text.to_string()),
            },
        }
    }

    pub fn members_added(conversation_id: &str, user_id: &str) -> Self {
        Self {
            conversation_id: conversation_id.to_string(),
            user_id: user_id.to_string(),
            language_code: None,
            activity: Activity::MembersAdded,
        }
    }

    pub fn with_language(mut self, language_code: Option<&str>) -> Self {
        self.language_code = language_code.map(|s| s.to_string());
        self
    }

    /// Trimmed message text, empty for non-message activities
    pub fn text(&self) -> &str {
        match &self.activity {
            Activity::Message { text: Some(text) } => text.trim(),
            _ => "",
        }
    }
}

/// One outbound message
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    /// A prompt with a fixed set of selectable option labels
    Choice { prompt: String, options: Vec<String> },
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Text(text) => text,
            Reply::Choice { prompt, .. } => prompt,
        }
    }
}

/// Per-turn scratch space: the inbound turn and the replies produced so far
pub struct TurnContext<'a> {
    pub turn: &'a Turn,
    replies: Vec<Reply>,
}

impl<'a> TurnContext<'a> {
    pub fn new(turn: &'a Turn) -> Self {
        Self {
            turn,
            replies: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        self.turn.text()
    }

    pub fn language_code(&self) -> Option<&str> {
        self.turn.language_code.as_deref()
    }

    pub fn conversation_id(&self) -> &str {
        &self.turn.conversation_id
    }

    pub fn user_id(&self) -> &str {
        &self.turn.user_id
    }

    /// Localized message for this turn's language
    pub fn t(&self, key: &str) -> String {
        t_lang(key, self.language_code())
    }

    pub fn t_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        t_args_lang(key, args, self.language_code())
    }

    pub fn send(&mut self, reply: Reply) {
        self.replies.push(reply);
    }

    pub fn send_text(&mut self, text: impl Into<String>) {
        self.replies.push(Reply::Text(text.into()));
    }

    pub fn into_replies(self) -> Vec<Reply> {
        self.replies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_text_is_trimmed() {
        let turn = Turn::message("c1", "u1", "  Wait \n");
        assert_eq!(turn.text(), "Wait");

        let turn = Turn::members_added("c1", "u1");
        assert_eq!(turn.text(), "");
    }

    #[test]
    fn test_context_collects_replies_in_order() {
        let turn = Turn::message("c1", "u1", "hello");
        let mut ctx = TurnContext::new(&turn);
        ctx.send_text("first");
        ctx.send(Reply::Choice {
            prompt: "second".to_string(),
            options: vec!["A".to_string()],
        });

        let replies = ctx.into_replies();
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0].text(), "first");
        assert_eq!(replies[1].text(), "second");
    }
}
