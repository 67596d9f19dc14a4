//! UI Builder module for creating keyboards and formatting messages

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::config::{CANCEL_COMMAND, CONTINUE_COMMAND, WAIT_COMMAND};
use crate::localization::{t_args_lang, t_lang};
use crate::profile::UserProfile;

/// Options per keyboard row
const BUTTONS_PER_ROW: usize = 2;

/// Help text listing the hold, resume and cancel commands
pub fn format_help_text(language_code: Option<&str>) -> String {
    [
        t_lang("help-intro", language_code),
        t_args_lang("help-wait", &[("command", WAIT_COMMAND)], language_code),
        t_args_lang("help-continue", &[("command", CONTINUE_COMMAND)], language_code),
        t_args_lang("help-cancel", &[("command", CANCEL_COMMAND)], language_code),
    ]
    .join("\n\n")
}

/// Welcome shown when someone joins the conversation
pub fn format_welcome_text(language_code: Option<&str>) -> String {
    format!(
        "{}\n\n{}",
        format_help_text(language_code),
        t_lang("get-started", language_code)
    )
}

pub fn format_hold_reminder(language_code: Option<&str>) -> String {
    format!(
        "{}\n\n{}",
        t_lang("on-hold", language_code),
        t_args_lang("on-hold-resume", &[("command", CONTINUE_COMMAND)], language_code)
    )
}

/// Human-readable summary of the stored booking answers
pub fn format_booking_summary(profile: &UserProfile, language_code: Option<&str>) -> String {
    let age = profile.age.to_string();
    let room_type = profile.room_type.map(|r| r.label()).unwrap_or_default();
    let payment_type = profile.payment_type.map(|p| p.label()).unwrap_or_default();

    [
        t_args_lang("summary-name", &[("name", profile.name.as_str())], language_code),
        t_args_lang("summary-age", &[("age", age.as_str())], language_code),
        t_args_lang("summary-room-type", &[("room_type", room_type)], language_code),
        t_args_lang(
            "summary-payment-type",
            &[("payment_type", payment_type)],
            language_code,
        ),
    ]
    .join("\n\n")
}

/// Yes/No labels for the review prompt, "yes" first
pub fn confirm_options(language_code: Option<&str>) -> Vec<String> {
    vec![
        t_lang("confirm-yes", language_code),
        t_lang("confirm-no", language_code),
    ]
}

/// Create an inline keyboard for a choice prompt. Each button's callback data
/// is the option label, so a tap answers the prompt exactly like typing it.
pub fn create_choice_keyboard(options: &[String]) -> InlineKeyboardMarkup {
    let buttons: Vec<Vec<InlineKeyboardButton>> = options
        .chunks(BUTTONS_PER_ROW)
        .map(|row| {
            row.iter()
                .map(|option| InlineKeyboardButton::callback(option.clone(), option.clone()))
                .collect()
        })
        .collect();

    InlineKeyboardMarkup::new(buttons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{PaymentType, RoomType};
    use teloxide::types::InlineKeyboardButtonKind;

    #[test]
    fn test_summary_contains_values_verbatim() {
        let profile = UserProfile {
            name: "Grace Hopper".to_string(),
            age: 85,
            room_type: Some(RoomType::Triple),
            payment_type: Some(PaymentType::CreditCard),
            form_completed: false,
        };

        let summary = format_booking_summary(&profile, None);
        assert_eq!(
            summary,
            "**Name**: Grace Hopper\n\n**Age**: 85\n\n**Room Type**: Triple\n\n**Payment Type**: Credit card"
        );
    }

    #[test]
    fn test_help_text_mentions_commands() {
        let help = format_help_text(None);
        assert!(help.starts_with("This bot helps you to booking a room."));
        assert!(help.contains("`wait`"));
        assert!(help.contains("`continue`"));
        assert!(help.contains("`cancel`"));
    }

    #[test]
    fn test_choice_keyboard_layout() {
        let options = vec![
            "Single".to_string(),
            "Double".to_string(),
            "Triple".to_string(),
            "King".to_string(),
        ];
        let keyboard = create_choice_keyboard(&options);

        assert_eq!(keyboard.inline_keyboard.len(), 2);
        let first = &keyboard.inline_keyboard[0][0];
        assert_eq!(first.text, "Single");
        assert!(matches!(
            &first.kind,
            InlineKeyboardButtonKind::CallbackData(data) if data == "Single"
        ));
    }
}
