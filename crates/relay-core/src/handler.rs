//! Policy & translation handler.
//!
//! Split in two halves so the decision logic stays testable without any I/O:
//! - [`plan`] maps an update to what should happen (pure)
//! - [`Handler::handle`] carries the plan out against the ports and reports the
//!   outbound calls it attempted

use std::sync::Arc;

use crate::{
    domain::{ChatId, MessageId},
    messaging::{
        port::MessagingPort,
        types::{InboundUpdate, IncomingMessage, MembershipChange, OutboundCall, OutboundReply},
    },
    model::{client::TextModel, prompt::translation_prompt},
    policy::{message_access, should_leave, Access, Policy},
};

pub const PRIVATE_REJECTION: &str =
    "Sorry, I can only be used in groups or by my owner in a private chat.";
pub const ADD_REJECTION: &str = "Sorry, I can only be added to groups by my owner.";
pub const TRANSLATION_FAILED: &str = "Sorry, there was an error processing your message.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Plan {
    Ignore,
    Reply(OutboundReply),
    Translate {
        chat_id: ChatId,
        reply_to: MessageId,
        prompt: String,
    },
    /// Say why, then leave the chat.
    Eject { notice: OutboundReply },
}

pub fn plan(update: &InboundUpdate, policy: &Policy) -> Plan {
    match update {
        InboundUpdate::Message(msg) => plan_message(msg, policy),
        InboundUpdate::MembershipChange(change) => plan_membership(change, policy),
    }
}

fn plan_message(msg: &IncomingMessage, policy: &Policy) -> Plan {
    let Some(text) = msg.text() else {
        return Plan::Ignore;
    };

    match message_access(&msg.chat_kind, msg.sender, &policy.owner) {
        Access::Allowed => Plan::Translate {
            chat_id: msg.chat_id,
            reply_to: msg.message_id,
            prompt: translation_prompt(&policy.languages, text),
        },
        Access::RejectPrivate => Plan::Reply(OutboundReply::new(msg.chat_id, PRIVATE_REJECTION)),
        Access::Ignore => Plan::Ignore,
    }
}

fn plan_membership(change: &MembershipChange, policy: &Policy) -> Plan {
    if should_leave(change, &policy.owner) {
        Plan::Eject {
            notice: OutboundReply::new(change.chat_id, ADD_REJECTION),
        }
    } else {
        Plan::Ignore
    }
}

/// Executes plans against the translation model and the messenger.
///
/// Holds no mutable state; one instance is shared by every concurrent update.
pub struct Handler {
    policy: Policy,
    model: Arc<dyn TextModel>,
    messenger: Arc<dyn MessagingPort>,
}

impl Handler {
    pub fn new(
        policy: Policy,
        model: Arc<dyn TextModel>,
        messenger: Arc<dyn MessagingPort>,
    ) -> Self {
        Self {
            policy,
            model,
            messenger,
        }
    }

    /// Handle one update to completion. Never fails: every error is logged and
    /// recovered locally. Returns the outbound calls attempted, in order.
    pub async fn handle(&self, update: InboundUpdate) -> Vec<OutboundCall> {
        let mut calls = Vec::new();

        match plan(&update, &self.policy) {
            Plan::Ignore => {}
            Plan::Reply(reply) => {
                tracing::debug!(chat_id = reply.chat_id.0, "rejecting private chat");
                self.send(reply, &mut calls).await;
            }
            Plan::Translate {
                chat_id,
                reply_to,
                prompt,
            } => {
                let text = match self.model.generate_text(&prompt).await {
                    Ok(translation) => translation,
                    Err(e) => {
                        tracing::error!(chat_id = chat_id.0, error = %e, "translation failed");
                        TRANSLATION_FAILED.to_string()
                    }
                };
                self.send(OutboundReply::new(chat_id, text).in_reply_to(reply_to), &mut calls)
                    .await;
            }
            Plan::Eject { notice } => {
                let chat_id = notice.chat_id;
                tracing::info!(chat_id = chat_id.0, "added by a non-owner, leaving chat");
                self.send(notice, &mut calls).await;

                calls.push(OutboundCall::LeaveChat(chat_id));
                if let Err(e) = self.messenger.leave_chat(chat_id).await {
                    tracing::warn!(chat_id = chat_id.0, error = %e, "leave chat failed");
                }
            }
        }

        calls
    }

    async fn send(&self, reply: OutboundReply, calls: &mut Vec<OutboundCall>) {
        if let Err(e) = self.messenger.send_message(&reply).await {
            tracing::warn!(chat_id = reply.chat_id.0, error = %e, "send message failed");
        }
        calls.push(OutboundCall::SendMessage(reply));
    }
}
