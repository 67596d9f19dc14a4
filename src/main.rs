use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hotel_booking_bot::bot::{self, HotelBot};
use hotel_booking_bot::config::{BotConfig, LogFormat};
use hotel_booking_bot::localization::init_localization;
use hotel_booking_bot::storage::{MemoryStore, StateStore};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = BotConfig::from_env()?;

    // Initialize logging
    init_tracing(config.log_format);

    info!("Starting Hotel Booking Telegram Bot");

    init_localization()?;

    // Conversation and user state live in memory for the lifetime of the process
    let store: Arc<dyn StateStore> = Arc::new(MemoryStore::new());
    let hotel_bot = Arc::new(HotelBot::new(store, config.flow.clone()));

    info!(minimum_age = config.flow.minimum_age, "Booking flow configured");

    let bot = Bot::new(config.telegram_bot_token);

    info!("Bot initialized, starting dispatcher");

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .branch(
                    dptree::filter(|msg: Message| msg.new_chat_members().is_some())
                        .endpoint(bot::members_added_handler),
                )
                .branch(dptree::endpoint(bot::message_handler)),
        )
        .branch(Update::filter_callback_query().endpoint(bot::callback_handler));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![hotel_bot])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
