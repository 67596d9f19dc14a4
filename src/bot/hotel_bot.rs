//! Turn router for the booking conversation.

use std::sync::Arc;
use tracing::{debug, error, info};

use crate::config::{FlowConfig, DIALOG_STATE_PROPERTY, USER_PROFILE_PROPERTY};
use crate::dialogue::DialogState;
use crate::error::BotError;
use crate::profile::UserProfile;
use crate::storage::{StateAccessor, StateScope, StateStore};
use crate::turn::{Activity, Reply, Turn, TurnContext};

use super::dialogue_manager::{begin_booking, begin_hold, begin_review, continue_dialog, DialogOutcome};
use super::interrupts::{detect_interrupt, Interrupt};
use super::ui_builder::{format_help_text, format_welcome_text};

/// Typed accessors for the two state records the bot owns
pub struct BotAccessors {
    /// Conversation-scoped dialog position
    pub dialog_state: StateAccessor<DialogState>,
    /// User-scoped booking answers
    pub user_profile: StateAccessor<UserProfile>,
}

impl BotAccessors {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self {
            dialog_state: StateAccessor::new(
                Arc::clone(&store),
                StateScope::Conversation,
                DIALOG_STATE_PROPERTY,
            ),
            user_profile: StateAccessor::new(store, StateScope::User, USER_PROFILE_PROPERTY),
        }
    }
}

/// The hotel booking bot. One instance serves every conversation; all
/// per-conversation data lives in the state store.
pub struct HotelBot {
    accessors: BotAccessors,
    config: FlowConfig,
}

impl HotelBot {
    pub fn new(store: Arc<dyn StateStore>, config: FlowConfig) -> Self {
        Self {
            accessors: BotAccessors::new(store),
            config,
        }
    }

    pub fn accessors(&self) -> &BotAccessors {
        &self.accessors
    }

    /// Handle one turn and return the replies to send, in order.
    ///
    /// Faults are logged and answered with a generic apology after whatever
    /// was produced before the fault.
    pub async fn on_turn(&self, turn: &Turn) -> Vec<Reply> {
        let mut ctx = TurnContext::new(turn);

        if let Err(e) = self.handle_turn(&mut ctx).await {
            error!(
                conversation_id = %turn.conversation_id,
                user_id = %turn.user_id,
                error = %e,
                "Turn processing failed"
            );
            let apology = ctx.t("error-generic");
            ctx.send_text(apology);
        }

        ctx.into_replies()
    }

    async fn handle_turn(&self, ctx: &mut TurnContext<'_>) -> Result<(), BotError> {
        match ctx.turn.activity {
            Activity::Message { .. } => self.handle_message(ctx).await,
            Activity::MembersAdded => {
                debug!(conversation_id = %ctx.conversation_id(), "Members added");
                ctx.send_text(format_welcome_text(ctx.language_code()));
                Ok(())
            }
        }
    }

    async fn handle_message(&self, ctx: &mut TurnContext<'_>) -> Result<(), BotError> {
        let conversation_id = ctx.conversation_id().to_string();
        let mut dialog = self.accessors.dialog_state.get(&conversation_id).await?;

        self.route(ctx, &mut dialog.value).await?;

        // Saved once per turn, on every path
        self.accessors
            .dialog_state
            .set(&conversation_id, &dialog.value, Some(dialog.version))
            .await?;

        Ok(())
    }

    async fn route(&self, ctx: &mut TurnContext<'_>, state: &mut DialogState) -> Result<(), BotError> {
        if let Some(interrupt) = detect_interrupt(ctx.text(), state) {
            self.apply_interrupt(ctx, state, interrupt);
            return Ok(());
        }

        match continue_dialog(ctx, state, &self.config) {
            DialogOutcome::Waiting => {}
            DialogOutcome::Cancelled | DialogOutcome::Empty => {
                self.accessors
                    .user_profile
                    .set(ctx.user_id(), &UserProfile::default(), None)
                    .await?;
                begin_booking(ctx, state);
            }
            DialogOutcome::Complete(profile) => {
                self.accessors
                    .user_profile
                    .set(ctx.user_id(), &profile, None)
                    .await?;
                if !profile.form_completed {
                    begin_review(ctx, state, &self.accessors.user_profile).await?;
                } else {
                    info!(
                        conversation_id = %ctx.conversation_id(),
                        user_id = %ctx.user_id(),
                        "Booking form completed"
                    );
                }
            }
        }

        Ok(())
    }

    fn apply_interrupt(&self, ctx: &mut TurnContext<'_>, state: &mut DialogState, interrupt: Interrupt) {
        debug!(
            conversation_id = %ctx.conversation_id(),
            command = interrupt.command(),
            "Interrupt received"
        );

        match interrupt {
            Interrupt::Help => ctx.send_text(format_help_text(ctx.language_code())),
            Interrupt::Wait => begin_hold(ctx, state),
            Interrupt::Cancel => {
                info!(conversation_id = %ctx.conversation_id(), "Booking cancelled by guest");
                state.clear();
                let notice = ctx.t("booking-cancelled");
                ctx.send_text(notice);
            }
        }
    }
}
