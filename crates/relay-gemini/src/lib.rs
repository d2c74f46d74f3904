//! Gemini adapter (text generation).
//!
//! Uses the non-streaming `models/{model}:generateContent` endpoint: one prompt,
//! one complete answer.

use async_trait::async_trait;

use relay_core::{errors::Error, model::client::TextModel, Result};

#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    http: reqwest::Client,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// `base_url` is the API host, e.g. `https://generativelanguage.googleapis.com`.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::External(format!("gemini client build error: {e}")))?;
        Ok(Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// reqwest errors render the request URL, which carries the key.
    fn redact(&self, e: reqwest::Error) -> String {
        e.to_string().replace(&self.api_key, "***")
    }

    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": prompt}],
            }],
        });

        let resp = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::External(format!("gemini request error: {}", self.redact(e))))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::External(format!(
                "gemini generateContent failed: {status} {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let v: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| Error::External(format!("gemini json error: {}", self.redact(e))))?;

        extract_text(&v)
    }
}

#[async_trait]
impl TextModel for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String> {
        let text = self.generate(prompt).await?;
        tracing::debug!(model = %self.model, chars = text.chars().count(), "gemini answered");
        Ok(text)
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(v: &serde_json::Value) -> Result<String> {
    if let Some(reason) = v["promptFeedback"]["blockReason"].as_str() {
        return Err(Error::Translation(format!("prompt blocked: {reason}")));
    }

    let text = v["candidates"][0]["content"]["parts"]
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p["text"].as_str())
                .collect::<String>()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        let finish = v["candidates"][0]["finishReason"]
            .as_str()
            .unwrap_or("none");
        return Err(Error::Translation(format!(
            "gemini returned empty text (finishReason: {finish})"
        )));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL: &str = "gemini-2.5-flash";
    const ENDPOINT: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

    fn client(server: &MockServer) -> GeminiClient {
        GeminiClient::new("test-key", MODEL, server.uri()).unwrap()
    }

    #[test]
    fn joins_text_parts_of_first_candidate() {
        let v = json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "你"}, {"text": "好"}]}},
                {"content": {"role": "model", "parts": [{"text": "ignored"}]}}
            ]
        });
        assert_eq!(extract_text(&v).unwrap(), "你好");
    }

    #[test]
    fn blocked_or_empty_output_is_an_error() {
        let blocked = json!({"promptFeedback": {"blockReason": "SAFETY"}});
        assert!(matches!(extract_text(&blocked), Err(Error::Translation(_))));

        let empty = json!({
            "candidates": [{"content": {"parts": [{"text": "  "}]}, "finishReason": "STOP"}]
        });
        assert!(matches!(extract_text(&empty), Err(Error::Translation(_))));

        assert!(extract_text(&json!({})).is_err());
    }

    #[tokio::test]
    async fn posts_prompt_and_returns_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .and(query_param("key", "test-key"))
            .and(body_partial_json(json!({
                "contents": [{"role": "user", "parts": [{"text": "translate Hello"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"role": "model", "parts": [{"text": "你好"}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client(&server).generate_text("translate Hello").await.unwrap();
        assert_eq!(text, "你好");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client(&server).generate_text("x").await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("429"), "{msg}");
        assert!(msg.contains("quota exceeded"), "{msg}");
    }

    #[tokio::test]
    async fn malformed_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        assert!(client(&server).generate_text("x").await.is_err());
    }

    #[tokio::test]
    async fn transport_errors_do_not_leak_the_api_key() {
        // Accept then immediately drop every connection.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                drop(stream);
            }
        });

        let client = GeminiClient::new("test-key", MODEL, format!("http://{addr}")).unwrap();
        let msg = client.generate_text("x").await.unwrap_err().to_string();
        assert!(msg.starts_with("gemini request error"), "{msg}");
        assert!(!msg.contains("test-key"), "{msg}");
    }
}
