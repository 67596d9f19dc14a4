//! Callback Handler module for processing inline keyboard callback queries

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, warn};

use crate::turn::{Activity, Turn};

use super::hotel_bot::HotelBot;
use super::message_handler::send_replies;

/// Handle a tap on a choice button. The callback data is the option label and
/// is fed to the bot as if the guest had typed it.
pub async fn callback_handler(
    bot: Bot,
    q: teloxide::types::CallbackQuery,
    hotel_bot: Arc<HotelBot>,
) -> Result<()> {
    debug!(user_id = %q.from.id, "Received callback query from user");

    match (&q.message, q.data.as_deref()) {
        (Some(msg), Some(data)) => {
            let chat_id = msg.chat().id;

            // The keyboard is single-use; stale buttons would answer a later prompt
            if let Err(e) = bot.edit_message_reply_markup(chat_id, msg.id()).await {
                warn!(user_id = %q.from.id, error = %e, "Failed to remove choice keyboard");
            }

            let turn = Turn {
                conversation_id: chat_id.to_string(),
                user_id: q.from.id.to_string(),
                language_code: None,
                activity: Activity::Message {
                    text: Some(data.to_string()),
                },
            }
            .with_language(q.from.language_code.as_deref());

            let replies = hotel_bot.on_turn(&turn).await;
            send_replies(&bot, chat_id, replies).await?;
        }
        _ => {
            // Ignore callbacks without a message or payload
            debug!(user_id = %q.from.id, "Callback query without message or data ignored");
        }
    }

    // Answer the callback query to remove the loading state
    bot.answer_callback_query(q.id).await?;

    Ok(())
}
