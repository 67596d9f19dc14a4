//! # Hotel Booking Telegram Bot
//!
//! A Telegram bot that books a hotel room through a short conversation:
//! name, age, room type and payment type, followed by a review step.
//! Guests can put the conversation on hold with `wait`, resume it with
//! `continue`, or drop it with `cancel` at any point.

pub mod bot;
pub mod config;
pub mod dialogue;
pub mod error;
pub mod localization;
pub mod profile;
pub mod storage;
pub mod turn;
