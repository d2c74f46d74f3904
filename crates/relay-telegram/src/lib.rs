//! Telegram adapter (teloxide + axum).
//!
//! This crate implements the `relay-core` MessagingPort over the Telegram Bot API
//! and the two ways of receiving updates: long polling and a webhook endpoint.

use async_trait::async_trait;

use teloxide::prelude::*;

pub mod convert;
pub mod router;
pub mod webhook;

use relay_core::{
    domain::{ChatId, MessageId},
    errors::Error,
    messaging::{port::MessagingPort, types::OutboundReply},
    Result,
};

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn tg_msg_id(message_id: MessageId) -> teloxide::types::MessageId {
        teloxide::types::MessageId(message_id.0)
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::External(format!("telegram error: {e}"))
    }
}

/// Build a `Bot`, optionally pointed at a non-default Bot API server.
pub fn build_bot(token: &str, api_url: Option<&str>) -> Result<Bot> {
    let bot = Bot::new(token);
    let Some(raw) = api_url else {
        return Ok(bot);
    };
    let url = reqwest::Url::parse(raw)
        .map_err(|e| Error::Config(format!("TELEGRAM_API_URL is not a valid url: {e}")))?;
    Ok(bot.set_api_url(url))
}

#[async_trait]
impl MessagingPort for TelegramMessenger {
    async fn send_message(&self, reply: &OutboundReply) -> Result<()> {
        let mut req = self
            .bot
            .send_message(Self::tg_chat(reply.chat_id), reply.text.clone());
        if let Some(id) = reply.reply_to {
            req = req.reply_to_message_id(Self::tg_msg_id(id));
        }
        req.await.map_err(Self::map_err)?;
        Ok(())
    }

    async fn leave_chat(&self, chat_id: ChatId) -> Result<()> {
        self.bot
            .leave_chat(Self::tg_chat(chat_id))
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_api_url_is_kept_without_override() {
        let bot = build_bot("123:abc", None).unwrap();
        assert_eq!(bot.api_url().as_str(), "https://api.telegram.org/");
    }

    #[test]
    fn api_url_override_is_applied() {
        let bot = build_bot("123:abc", Some("http://127.0.0.1:8081/")).unwrap();
        assert_eq!(bot.api_url().as_str(), "http://127.0.0.1:8081/");
    }

    #[test]
    fn invalid_api_url_is_a_config_error() {
        assert!(matches!(
            build_bot("123:abc", Some("not a url")),
            Err(Error::Config(_))
        ));
    }
}
