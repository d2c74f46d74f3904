use std::sync::Arc;

use relay_core::{
    config::{Config, DeliveryMode},
    handler::Handler,
};
use relay_gemini::GeminiClient;
use relay_telegram::{build_bot, router::run_polling, webhook::run_webhook, TelegramMessenger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    relay_core::logging::init("relay")?;

    let cfg = Config::load()?;
    tracing::debug!(?cfg, "configuration loaded");

    let bot = build_bot(&cfg.telegram_bot_token, cfg.telegram_api_url.as_deref())?;
    let model = Arc::new(GeminiClient::new(
        cfg.gemini_api_key.clone(),
        cfg.gemini_model.clone(),
        cfg.gemini_api_base.clone(),
    )?);
    let messenger = Arc::new(TelegramMessenger::new(bot.clone()));
    let handler = Arc::new(Handler::new(cfg.policy(), model, messenger));

    tracing::info!(
        model = %cfg.gemini_model,
        languages = %format!("{} <-> {}", cfg.languages.a, cfg.languages.b),
        "translation relay configured"
    );

    match &cfg.mode {
        DeliveryMode::Polling => run_polling(bot, handler).await?,
        DeliveryMode::Webhook(webhook) => {
            run_webhook(bot, handler, webhook, shutdown_signal()).await?
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
