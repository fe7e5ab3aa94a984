use dioxus::prelude::*;
use tracing::{debug, warn};

use crate::services::chat::{send, ChatSession};
use crate::{API_CLIENT, APP_CONFIG};

#[derive(Clone, Copy)]
pub struct ChatHandle {
    pub session: Signal<ChatSession>,
    pub input: Signal<String>,
}

impl ChatHandle {
    pub fn submit(&self) {
        let session = self.session;
        let mut input = self.input;

        let raw = input.read().clone();
        if raw.trim().is_empty() {
            return;
        }
        if session.read().is_waiting() {
            debug!("chat send ignored while a reply is pending");
            return;
        }
        let Some(client) = API_CLIENT.get().cloned() else {
            warn!("chat unavailable: API client is not initialised");
            return;
        };
        input.set(String::new());

        spawn(async move {
            if let Err(rejected) = send(session, &client, &raw).await {
                debug!(%rejected, "chat send rejected");
            }
        });
    }
}

pub fn use_chat_session() -> ChatHandle {
    let session = use_signal(|| {
        let policy = APP_CONFIG
            .get()
            .map(|config| config.chat_failure_policy)
            .unwrap_or_default();
        ChatSession::new(policy)
    });
    let input = use_signal(String::new);
    ChatHandle { session, input }
}
