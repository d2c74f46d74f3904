use crate::domain::{ChatId, MessageId, UserId};

/// Normalized inbound update.
///
/// Telegram-specific shapes (teloxide types, raw webhook JSON) are converted into
/// this in the adapter / wire layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InboundUpdate {
    Message(IncomingMessage),
    MembershipChange(MembershipChange),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncomingMessage {
    pub chat_id: ChatId,
    pub chat_kind: ChatKind,
    /// `None` for messages sent on behalf of a chat (no `from`).
    pub sender: Option<UserId>,
    pub message_id: MessageId,
    pub text: Option<String>,
}

impl IncomingMessage {
    /// Message text, treating an empty string the same as no text.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}

/// A change of the bot's own membership in a chat (`my_chat_member`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MembershipChange {
    pub chat_id: ChatId,
    /// Who made the change.
    pub actor: UserId,
    pub new_status: MemberStatus,
    pub subject_is_bot: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
    Other(String),
}

impl ChatKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "private" => ChatKind::Private,
            "group" => ChatKind::Group,
            "supergroup" => ChatKind::Supergroup,
            "channel" => ChatKind::Channel,
            other => ChatKind::Other(other.to_string()),
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, ChatKind::Group | ChatKind::Supergroup)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemberStatus {
    Creator,
    Administrator,
    Member,
    Restricted,
    Left,
    Kicked,
    Other(String),
}

impl MemberStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "creator" => MemberStatus::Creator,
            "administrator" => MemberStatus::Administrator,
            "member" => MemberStatus::Member,
            "restricted" => MemberStatus::Restricted,
            "left" => MemberStatus::Left,
            "kicked" => MemberStatus::Kicked,
            other => MemberStatus::Other(other.to_string()),
        }
    }
}

/// A message to deliver back to a chat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundReply {
    pub chat_id: ChatId,
    pub text: String,
    pub reply_to: Option<MessageId>,
}

impl OutboundReply {
    pub fn new(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            reply_to: None,
        }
    }

    pub fn in_reply_to(mut self, message_id: MessageId) -> Self {
        self.reply_to = Some(message_id);
        self
    }
}

/// One outbound platform call, as attempted by the handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutboundCall {
    SendMessage(OutboundReply),
    LeaveChat(ChatId),
}
