//! Polling mode: teloxide dispatcher feeding the shared handler.

use std::sync::Arc;

use teloxide::{
    dispatching::Dispatcher,
    dptree,
    prelude::*,
    types::{ChatMemberUpdated, Message},
};

use relay_core::handler::Handler;

use crate::convert;

pub async fn run_polling(bot: Bot, handler: Arc<Handler>) -> anyhow::Result<()> {
    match bot.get_me().await {
        Ok(me) => tracing::info!(username = %me.username(), "relay started (polling)"),
        Err(e) => tracing::warn!(error = %e, "getMe failed; starting polling anyway"),
    }

    let schema = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_my_chat_member().endpoint(on_my_chat_member));

    Dispatcher::builder(bot, schema)
        .dependencies(dptree::deps![handler])
        // Everything else (edits, callbacks, channel posts, ...) is not ours to handle.
        .default_handler(|_| async {})
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    tracing::info!("dispatcher stopped");
    Ok(())
}

async fn on_message(msg: Message, handler: Arc<Handler>) -> ResponseResult<()> {
    handler.handle(convert::from_message(&msg)).await;
    Ok(())
}

async fn on_my_chat_member(upd: ChatMemberUpdated, handler: Arc<Handler>) -> ResponseResult<()> {
    handler.handle(convert::from_member_update(&upd)).await;
    Ok(())
}
