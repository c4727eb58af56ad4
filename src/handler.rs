use std::sync::Arc;

use tracing::{error, info};

use crate::config::Config;
use crate::extract;
use crate::platform::IncomingMessage;
use crate::reply::{self, ReplySegment};
use crate::resolver::LinkResolver;

/// The core handler that turns incoming messages into reply segments.
/// Platform-agnostic — receives an IncomingMessage, returns zero or more
/// segments for the platform to deliver in order.
pub struct MessageHandler {
    config: Config,
    resolver: Arc<dyn LinkResolver>,
}

impl MessageHandler {
    pub fn new(config: Config, resolver: Arc<dyn LinkResolver>) -> Self {
        Self { config, resolver }
    }

    /// Whether messages from this chat may trigger resolution.
    fn allowed(&self, incoming: &IncomingMessage) -> bool {
        match &incoming.group_id {
            Some(group_id) => {
                let whitelist = &self.config.access.group_whitelist;
                whitelist.is_empty() || whitelist.contains(group_id)
            }
            None => self.config.access.enable_in_private,
        }
    }

    /// Process one incoming message. An empty result means stay silent.
    /// Resolution failures never escape; at most they yield one notice.
    pub async fn handle_message(&self, incoming: &IncomingMessage) -> Vec<ReplySegment> {
        if !self.allowed(incoming) {
            return Vec::new();
        }

        let link = match extract::find_share_link(&incoming.text) {
            Some(link) => link,
            None => return Vec::new(),
        };

        info!("Detected douyin share link: {}", link);

        match self.resolver.resolve(link).await {
            Ok(media) => reply::format_reply(&media),
            Err(e) => {
                error!("Failed to resolve {}: {:#}", link, e);
                if self.config.resolver.send_failure_notice {
                    vec![ReplySegment::Text(format!("抖音解析失败: {}", e))]
                } else {
                    Vec::new()
                }
            }
        }
    }
}
