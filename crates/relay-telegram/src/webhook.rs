//! Webhook mode: Telegram POSTs each update to a single HTTP endpoint.
//!
//! The request is acknowledged as soon as the body parses; handling continues on
//! a tracked background task so shutdown can wait for in-flight replies.

use std::{future::Future, sync::Arc};

use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    routing::any,
    Router,
};
use teloxide::{prelude::*, types::AllowedUpdate};
use tokio_util::task::TaskTracker;

use relay_core::{config::WebhookConfig, handler::Handler, wire::parse_update};

/// Webhook server state
#[derive(Clone)]
pub struct WebhookState {
    pub handler: Arc<Handler>,
    pub tasks: TaskTracker,
}

/// Create webhook router
pub fn create_webhook_router(state: WebhookState, path: &str) -> Router {
    Router::new()
        .route(path, any(receive_update))
        .with_state(Arc::new(state))
}

async fn receive_update(
    State(state): State<Arc<WebhookState>>,
    method: Method,
    body: Bytes,
) -> (StatusCode, &'static str) {
    // Health checks and browsers.
    if method != Method::POST {
        return (StatusCode::OK, "OK");
    }

    let update = match parse_update(&body) {
        Ok(update) => update,
        Err(e) => {
            tracing::error!(error = %e, "failed to parse webhook body");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Error");
        }
    };

    if let Some(update) = update {
        let handler = state.handler.clone();
        state.tasks.spawn(async move {
            handler.handle(update).await;
        });
    }

    (StatusCode::OK, "OK")
}

/// Register the public URL with Telegram. Best effort: failures are logged.
pub async fn register_webhook(bot: &Bot, public_url: &str) {
    let url = match reqwest::Url::parse(public_url) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(
                error = %e,
                "WEBHOOK_PUBLIC_URL is not a valid url; skipping setWebhook"
            );
            return;
        }
    };

    match bot
        .set_webhook(url)
        .allowed_updates(vec![AllowedUpdate::Message, AllowedUpdate::MyChatMember])
        .await
    {
        Ok(_) => tracing::info!("webhook registered"),
        Err(e) => tracing::warn!(error = %e, "setWebhook failed"),
    }
}

/// Start webhook server; returns after `shutdown` resolves and in-flight updates finish.
pub async fn run_webhook(
    bot: Bot,
    handler: Arc<Handler>,
    cfg: &WebhookConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    if let Some(public_url) = &cfg.public_url {
        register_webhook(&bot, public_url).await;
    }

    let tasks = TaskTracker::new();
    let app = create_webhook_router(
        WebhookState {
            handler,
            tasks: tasks.clone(),
        },
        &cfg.path,
    );

    let listener = tokio::net::TcpListener::bind(cfg.addr).await?;
    tracing::info!(addr = %cfg.addr, path = %cfg.path, "relay started (webhook)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    tasks.close();
    tracing::info!(pending = tasks.len(), "waiting for in-flight updates");
    tasks.wait().await;

    Ok(())
}
