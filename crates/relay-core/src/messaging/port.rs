use async_trait::async_trait;

use crate::{
    domain::ChatId,
    messaging::types::OutboundReply,
    Result,
};

/// Outbound side of the messaging platform.
///
/// Every call is a single best-effort attempt; callers log failures and move on.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    async fn send_message(&self, reply: &OutboundReply) -> Result<()>;
    async fn leave_chat(&self, chat_id: ChatId) -> Result<()>;
}
