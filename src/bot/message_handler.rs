//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::debug;

use crate::turn::{Activity, Reply, Turn};

use super::hotel_bot::HotelBot;
use super::ui_builder::create_choice_keyboard;

/// Build a turn from a Telegram message. Conversations are keyed by chat,
/// users by Telegram user id (falling back to the chat for anonymous senders).
pub fn turn_from_message(msg: &Message, activity: Activity) -> Turn {
    let user_id = msg
        .from
        .as_ref()
        .map(|user| user.id.to_string())
        .unwrap_or_else(|| msg.chat.id.to_string());

    // Extract user's language code from Telegram
    let language_code = msg
        .from
        .as_ref()
        .and_then(|user| user.language_code.as_deref());

    Turn {
        conversation_id: msg.chat.id.to_string(),
        user_id,
        language_code: None,
        activity,
    }
    .with_language(language_code)
}

/// Send the replies produced for a turn, in order
pub async fn send_replies(bot: &Bot, chat_id: ChatId, replies: Vec<Reply>) -> Result<()> {
    for reply in replies {
        match reply {
            Reply::Text(text) => {
                bot.send_message(chat_id, text).await?;
            }
            Reply::Choice { prompt, options } => {
                bot.send_message(chat_id, prompt)
                    .reply_markup(create_choice_keyboard(&options))
                    .await?;
            }
        }
    }
    Ok(())
}

pub async fn message_handler(bot: Bot, msg: Message, hotel_bot: Arc<HotelBot>) -> Result<()> {
    debug!(
        user_id = %msg.chat.id,
        has_text = msg.text().is_some(),
        "Received message from user"
    );

    let turn = turn_from_message(
        &msg,
        Activity::Message {
            text: msg.text().map(|s| s.to_string()),
        },
    );
    let replies = hotel_bot.on_turn(&turn).await;
    send_replies(&bot, msg.chat.id, replies).await
}

pub async fn members_added_handler(bot: Bot, msg: Message, hotel_bot: Arc<HotelBot>) -> Result<()> {
    debug!(user_id = %msg.chat.id, "New members joined the chat");

    let turn = turn_from_message(&msg, Activity::MembersAdded);
    let replies = hotel_bot.on_turn(&turn).await;
    send_replies(&bot, msg.chat.id, replies).await
}
