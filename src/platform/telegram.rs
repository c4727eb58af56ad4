use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InputFile};
use tracing::{error, info, warn};
use url::Url;

use crate::handler::MessageHandler;
use crate::platform::IncomingMessage;
use crate::reply::ReplySegment;

/// Run the Telegram bot platform
pub async fn run(handler: Arc<MessageHandler>, bot_token: &str) -> Result<()> {
    let bot = Bot::new(bot_token);

    info!("Starting Telegram platform...");

    let dispatch_handler = Update::filter_message().endpoint(handle_message);

    Dispatcher::builder(bot, dispatch_handler)
        .dependencies(dptree::deps![handler])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd.id);
        })
        .error_handler(LoggingErrorHandler::with_custom_text("telegram"))
        .build()
        .dispatch()
        .await;

    Ok(())
}

async fn handle_message(
    bot: Bot,
    msg: Message,
    handler: Arc<MessageHandler>,
) -> ResponseResult<()> {
    let user = match msg.from.as_ref() {
        Some(user) => user,
        None => return Ok(()),
    };

    let text = match msg.text() {
        Some(t) => t.to_string(),
        None => return Ok(()),
    };

    let group_id = if msg.chat.is_private() {
        None
    } else {
        Some(msg.chat.id.0.to_string())
    };

    let incoming = IncomingMessage {
        platform: "telegram".to_string(),
        user_id: user.id.0.to_string(),
        chat_id: msg.chat.id.0.to_string(),
        group_id,
        user_name: user.first_name.clone(),
        text,
    };

    let segments = handler.handle_message(&incoming).await;

    // Deliver in order; one failed segment doesn't stop the rest.
    for segment in &segments {
        if let Err(e) = send_segment(&bot, msg.chat.id, segment).await {
            error!("Failed to deliver reply segment: {:#}", e);
        }
    }

    Ok(())
}

async fn send_segment(bot: &Bot, chat_id: ChatId, segment: &ReplySegment) -> Result<()> {
    match segment {
        ReplySegment::Text(text) => {
            bot.send_message(chat_id, text).await?;
        }
        ReplySegment::Video { url } => {
            bot.send_video(chat_id, InputFile::url(Url::parse(url)?))
                .await?;
        }
        ReplySegment::Image { url } => {
            bot.send_photo(chat_id, InputFile::url(Url::parse(url)?))
                .await?;
        }
    }
    Ok(())
}
