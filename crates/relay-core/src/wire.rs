//! Raw Telegram `Update` JSON as delivered to the webhook.
//!
//! Only the fields the relay reads are modelled; everything else is ignored so
//! schema additions on the Telegram side never break parsing.

use serde::Deserialize;

use crate::{
    domain::{ChatId, MessageId, UserId},
    messaging::types::{ChatKind, InboundUpdate, IncomingMessage, MemberStatus, MembershipChange},
    Result,
};

#[derive(Clone, Debug, Deserialize)]
pub struct WireUpdate {
    #[serde(default)]
    pub update_id: Option<i64>,
    #[serde(default)]
    pub message: Option<WireMessage>,
    #[serde(default)]
    pub my_chat_member: Option<WireChatMemberUpdated>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct WireMessage {
    pub message_id: i32,
    pub chat: WireChat,
    #[serde(default)]
    pub from: Option<WireUser>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct WireChat {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct WireUser {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct WireChatMemberUpdated {
    pub chat: WireChat,
    pub from: WireUser,
    pub new_chat_member: WireChatMember,
}

#[derive(Clone, Debug, Deserialize)]
pub struct WireChatMember {
    pub status: String,
    pub user: WireUser,
}

impl WireUpdate {
    /// Normalize into an [`InboundUpdate`]; `None` for update kinds the relay does not handle.
    pub fn into_inbound(self) -> Option<InboundUpdate> {
        if let Some(msg) = self.message {
            return Some(InboundUpdate::Message(IncomingMessage {
                chat_id: ChatId(msg.chat.id),
                chat_kind: ChatKind::parse(msg.chat.kind.as_deref().unwrap_or_default()),
                sender: msg.from.map(|u| UserId(u.id)),
                message_id: MessageId(msg.message_id),
                text: msg.text,
            }));
        }

        let member = self.my_chat_member?;
        Some(InboundUpdate::MembershipChange(MembershipChange {
            chat_id: ChatId(member.chat.id),
            actor: UserId(member.from.id),
            new_status: MemberStatus::parse(&member.new_chat_member.status),
            subject_is_bot: member.new_chat_member.user.is_bot,
        }))
    }
}

/// Parse a webhook body. Malformed JSON is an error; irrelevant updates are `Ok(None)`.
pub fn parse_update(body: &[u8]) -> Result<Option<InboundUpdate>> {
    let update: WireUpdate = serde_json::from_slice(body)?;
    let update_id = update.update_id;
    let inbound = update.into_inbound();
    tracing::debug!(
        update_id = ?update_id,
        handled = inbound.is_some(),
        "webhook update parsed"
    );
    Ok(inbound)
}
