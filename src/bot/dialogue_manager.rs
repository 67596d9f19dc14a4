//! Dialogue Manager module for handling dialog step transitions

use tracing::{debug, info};

use crate::config::{is_command, FlowConfig, CONTINUE_COMMAND};
use crate::dialogue::{parse_age, recognize_choice, validate_text_answer, DialogState, DialogStep};
use crate::error::BotError;
use crate::profile::{PaymentType, RoomType, UserProfile};
use crate::storage::StateAccessor;
use crate::turn::{Reply, TurnContext};

use super::ui_builder::{confirm_options, format_booking_summary, format_hold_reminder};

/// What the dialog stack reported after consuming a turn
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DialogOutcome {
    /// A prompt is pending, the conversation waits for the next turn
    Waiting,
    /// The active dialog ended and returned a profile
    Complete(UserProfile),
    /// All dialogs were cancelled by a step
    Cancelled,
    /// No dialog was active
    Empty,
}

enum StepResult {
    Next(DialogStep),
    End(UserProfile),
    CancelAll,
}

/// The prompt a step is waiting on, used for first asks, retries and
/// resuming after a hold
pub fn prompt_for(step: &DialogStep, ctx: &TurnContext) -> Option<Reply> {
    match step {
        DialogStep::Idle => None,
        DialogStep::AwaitingName { .. } => Some(Reply::Text(ctx.t("prompt-name"))),
        DialogStep::AwaitingAge { .. } => Some(Reply::Text(ctx.t("prompt-age"))),
        DialogStep::AwaitingRoomType { .. } => Some(Reply::Choice {
            prompt: ctx.t("prompt-room-type"),
            options: RoomType::labels(),
        }),
        DialogStep::AwaitingPaymentType { .. } => Some(Reply::Choice {
            prompt: ctx.t("prompt-payment-type"),
            options: PaymentType::labels(),
        }),
        DialogStep::AwaitingConfirmation { profile } => Some(Reply::Choice {
            prompt: format!(
                "{}\n\n{}",
                format_booking_summary(profile, ctx.language_code()),
                ctx.t("confirm-question")
            ),
            options: confirm_options(ctx.language_code()),
        }),
    }
}

fn enter(ctx: &mut TurnContext, state: &mut DialogState, step: DialogStep) {
    if let Some(prompt) = prompt_for(&step, ctx) {
        ctx.send(prompt);
    }
    state.step = step;
}

/// Start the booking dialog with a fresh draft profile
pub fn begin_booking(ctx: &mut TurnContext, state: &mut DialogState) {
    info!(conversation_id = %ctx.conversation_id(), "Starting booking dialog");
    enter(
        ctx,
        state,
        DialogStep::AwaitingName {
            draft: UserProfile::default(),
        },
    );
}

/// Start the review dialog from the profile held in the user store
pub async fn begin_review(
    ctx: &mut TurnContext<'_>,
    state: &mut DialogState,
    profiles: &StateAccessor<UserProfile>,
) -> Result<(), BotError> {
    let profile = profiles.get(ctx.user_id()).await?.value;
    info!(conversation_id = %ctx.conversation_id(), "Starting review dialog");
    enter(ctx, state, DialogStep::AwaitingConfirmation { profile });
    Ok(())
}

/// Suspend whatever is active; the step beneath is left untouched
pub fn begin_hold(ctx: &mut TurnContext, state: &mut DialogState) {
    info!(
        conversation_id = %ctx.conversation_id(),
        step = state.step.name(),
        "Conversation put on hold"
    );
    state.on_hold = true;
    ctx.send_text(format_hold_reminder(ctx.language_code()));
}

/// Feed this turn's text to the active dialog
pub fn continue_dialog(
    ctx: &mut TurnContext,
    state: &mut DialogState,
    config: &FlowConfig,
) -> DialogOutcome {
    if state.on_hold {
        return continue_hold(ctx, state);
    }

    let step = std::mem::take(&mut state.step);
    debug!(
        conversation_id = %ctx.conversation_id(),
        step = step.name(),
        "Continuing dialog"
    );

    let answer = ctx.text().to_string();
    let result = match step {
        DialogStep::Idle => return DialogOutcome::Empty,
        DialogStep::AwaitingName { draft } => name_answered(ctx, draft, &answer),
        DialogStep::AwaitingAge { draft } => age_answered(ctx, draft, &answer, config),
        DialogStep::AwaitingRoomType { draft } => room_type_answered(ctx, draft, &answer),
        DialogStep::AwaitingPaymentType { draft } => payment_type_answered(ctx, draft, &answer),
        DialogStep::AwaitingConfirmation { profile } => confirmation_answered(ctx, profile, &answer),
    };

    match result {
        StepResult::Next(next) => {
            enter(ctx, state, next);
            DialogOutcome::Waiting
        }
        StepResult::End(profile) => {
            state.step = DialogStep::Idle;
            DialogOutcome::Complete(profile)
        }
        StepResult::CancelAll => {
            state.clear();
            DialogOutcome::Cancelled
        }
    }
}

fn continue_hold(ctx: &mut TurnContext, state: &mut DialogState) -> DialogOutcome {
    if !is_command(ctx.text(), CONTINUE_COMMAND) {
        ctx.send_text(format_hold_reminder(ctx.language_code()));
        return DialogOutcome::Waiting;
    }

    state.on_hold = false;
    info!(
        conversation_id = %ctx.conversation_id(),
        step = state.step.name(),
        "Conversation resumed"
    );

    // The dialog beneath re-issues its pending prompt
    match prompt_for(&state.step, ctx) {
        Some(prompt) => {
            ctx.send(prompt);
            DialogOutcome::Waiting
        }
        None => DialogOutcome::Empty,
    }
}

fn name_answered(ctx: &TurnContext, mut draft: UserProfile, answer: &str) -> StepResult {
    match validate_text_answer(answer) {
        Ok(name) => {
            draft.name = name;
            StepResult::Next(DialogStep::AwaitingAge { draft })
        }
        Err(reason) => {
            debug!(conversation_id = %ctx.conversation_id(), reason, "Name rejected");
            StepResult::Next(DialogStep::AwaitingName { draft })
        }
    }
}

fn age_answered(
    ctx: &mut TurnContext,
    mut draft: UserProfile,
    answer: &str,
    config: &FlowConfig,
) -> StepResult {
    let Some(age) = parse_age(answer) else {
        debug!(conversation_id = %ctx.conversation_id(), "Age rejected");
        return StepResult::Next(DialogStep::AwaitingAge { draft });
    };

    draft.age = age;

    if age < config.minimum_age {
        info!(
            conversation_id = %ctx.conversation_id(),
            age,
            minimum_age = config.minimum_age,
            "Guest below minimum age, cancelling booking"
        );
        let minimum_age = config.minimum_age.to_string();
        let rejection = ctx.t_args("age-rejected", &[("minimum_age", minimum_age.as_str())]);
        ctx.send_text(rejection);
        return StepResult::CancelAll;
    }

    StepResult::Next(DialogStep::AwaitingRoomType { draft })
}

fn room_type_answered(ctx: &TurnContext, mut draft: UserProfile, answer: &str) -> StepResult {
    match recognize_choice(answer, &RoomType::labels()) {
        Some(index) => {
            draft.room_type = Some(RoomType::ALL[index]);
            StepResult::Next(DialogStep::AwaitingPaymentType { draft })
        }
        None => {
            debug!(conversation_id = %ctx.conversation_id(), "Room type not recognized");
            StepResult::Next(DialogStep::AwaitingRoomType { draft })
        }
    }
}

fn payment_type_answered(ctx: &TurnContext, mut draft: UserProfile, answer: &str) -> StepResult {
    match recognize_choice(answer, &PaymentType::labels()) {
        Some(index) => {
            draft.payment_type = Some(PaymentType::ALL[index]);
            info!(conversation_id = %ctx.conversation_id(), "Booking form filled in");
            StepResult::End(draft)
        }
        None => {
            debug!(conversation_id = %ctx.conversation_id(), "Payment type not recognized");
            StepResult::Next(DialogStep::AwaitingPaymentType { draft })
        }
    }
}

fn confirmation_answered(ctx: &mut TurnContext, mut profile: UserProfile, answer: &str) -> StepResult {
    // English Yes/No are understood whatever the guest's language
    let Some(index) = recognize_choice(answer, &confirm_options(ctx.language_code()))
        .or_else(|| recognize_choice(answer, &confirm_options(None)))
    else {
        debug!(conversation_id = %ctx.conversation_id(), "Confirmation not recognized");
        return StepResult::Next(DialogStep::AwaitingConfirmation { profile });
    };

    let confirmed = index == 0;
    let message = if confirmed {
        ctx.t("booking-completed")
    } else {
        ctx.t("booking-declined")
    };
    ctx.send_text(message);

    info!(conversation_id = %ctx.conversation_id(), confirmed, "Review finished");

    // Marked complete whatever the answer; a declined booking is only
    // distinguishable by the message the guest saw
    profile.form_completed = true;
    StepResult::End(profile)
}
