/// Telegram user id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Telegram message id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub i32);

/// The single user allowed to talk to the bot privately and to add it to groups.
///
/// Kept as the externally supplied string; user ids are compared through their
/// decimal rendering so large ids never go through a lossy numeric parse.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OwnerId(pub String);

impl OwnerId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    pub fn matches(&self, user_id: UserId) -> bool {
        user_id.0.to_string() == self.0
    }
}

/// The two languages translated between; direction is auto-detected per message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguagePair {
    pub a: String,
    pub b: String,
}

impl Default for LanguagePair {
    fn default() -> Self {
        Self {
            a: "English".to_string(),
            b: "Cantonese".to_string(),
        }
    }
}
