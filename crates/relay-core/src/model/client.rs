use async_trait::async_trait;

use crate::Result;

/// Model client interface used by the handler.
///
/// One prompt in, one complete text out. Implementations return an error for
/// anything that is not usable text (including an empty answer).
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<String>;
}
