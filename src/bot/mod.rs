//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `hotel_bot`: Routes each turn through interrupts and the booking dialogs
//! - `interrupts`: Global commands checked before the active dialog
//! - `dialogue_manager`: Dialog step transitions and prompts
//! - `message_handler`: Handles incoming messages and new chat members
//! - `callback_handler`: Handles inline keyboard callback queries
//! - `ui_builder`: Creates keyboards and formats messages

pub mod callback_handler;
pub mod dialogue_manager;
pub mod hotel_bot;
pub mod interrupts;
pub mod message_handler;
pub mod ui_builder;

// Re-export main handler functions for use in main.rs
pub use callback_handler::callback_handler;
pub use message_handler::{members_added_handler, message_handler};

pub use hotel_bot::{BotAccessors, HotelBot};
