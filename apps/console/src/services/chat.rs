//! Chatbot session: transcript, typing indicator and serialized sends.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use uuid::Uuid;

use crate::services::StateCell;

pub const APOLOGY: &str = "Sorry, I am having trouble connecting. Please try again later.";
pub const TYPING: &str = "Typing...";

#[allow(async_fn_in_trait)]
pub trait ChatTransport {
    type Error: Display;

    async fn ask(&self, request: &ChatRequest) -> Result<ChatReply, Self::Error>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Bot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Reply,
    Apology,
}

/// Whether apology entries are sent back to the server as history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatFailurePolicy {
    Record,
    #[default]
    Omit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: ChatRole,
    pub content: String,
    pub source: Option<String>,
    pub kind: MessageKind,
}

impl ChatMessage {
    fn new(role: ChatRole, content: impl Into<String>, kind: MessageKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            source: None,
            kind,
        }
    }

    /// Content split on embedded newlines, for rendering with line breaks.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.split('\n').map(|line| line.trim_end_matches('\r'))
    }

    pub fn source_label(&self) -> Option<String> {
        self.source
            .as_deref()
            .map(str::trim)
            .filter(|source| !source.is_empty())
            .map(|source| format!("Source: {source}"))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub history: Vec<HistoryEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SendRejected {
    #[error("message is empty")]
    Empty,
    #[error("a reply is still pending")]
    Busy,
}

/// A send that has been accepted and is waiting for its reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingTurn {
    pub seq: u64,
    pub request: ChatRequest,
}

/// What the chat window shows: transcript entries plus the typing indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatEntry<'a> {
    Message(&'a ChatMessage),
    Typing,
}

#[derive(Clone, Debug, Default)]
pub struct ChatSession {
    transcript: Vec<ChatMessage>,
    policy: ChatFailurePolicy,
    in_flight: Option<u64>,
    next_seq: u64,
}

impl ChatSession {
    pub fn new(policy: ChatFailurePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    #[cfg(test)]
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn is_waiting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn entries(&self) -> impl Iterator<Item = ChatEntry<'_>> {
        self.transcript
            .iter()
            .map(ChatEntry::Message)
            .chain(self.is_waiting().then_some(ChatEntry::Typing))
    }

    /// History the server sees, per the failure policy.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.transcript
            .iter()
            .filter(|message| {
                self.policy == ChatFailurePolicy::Record || message.kind != MessageKind::Apology
            })
            .map(|message| HistoryEntry {
                role: message.role,
                content: message.content.clone(),
            })
            .collect()
    }

    /// Accepts a user message and records it; the caller sends `request`.
    pub fn begin(&mut self, raw: &str) -> Result<PendingTurn, SendRejected> {
        let message = raw.trim();
        if message.is_empty() {
            return Err(SendRejected::Empty);
        }
        if self.in_flight.is_some() {
            return Err(SendRejected::Busy);
        }

        self.transcript
            .push(ChatMessage::new(ChatRole::User, message, MessageKind::Reply));
        let request = ChatRequest {
            message: message.to_string(),
            history: self.history(),
        };

        self.next_seq += 1;
        self.in_flight = Some(self.next_seq);

        Ok(PendingTurn {
            seq: self.next_seq,
            request,
        })
    }

    /// Settles the pending turn. Returns `false` for a completion that is not the pending one.
    pub fn finish<E: Display>(&mut self, seq: u64, result: Result<ChatReply, E>) -> bool {
        if self.in_flight != Some(seq) {
            warn!(seq, pending = ?self.in_flight, "ignoring chat reply for a settled turn");
            return false;
        }
        self.in_flight = None;

        let message = match result {
            Ok(reply) => {
                let mut message = ChatMessage::new(ChatRole::Bot, reply.response, MessageKind::Reply);
                message.source = reply.source;
                message
            }
            Err(err) => {
                error!("chatbot request failed: {err}");
                ChatMessage::new(ChatRole::Bot, APOLOGY, MessageKind::Apology)
            }
        };
        self.transcript.push(message);
        true
    }
}

/// Full turn against `transport`.
pub async fn send<C, T>(mut session: C, transport: &T, raw: &str) -> Result<(), SendRejected>
where
    C: StateCell<ChatSession>,
    T: ChatTransport,
{
    let turn = session.update(|session| session.begin(raw))?;
    let result = transport.ask(&turn.request).await;
    session.update(|session| session.finish(turn.seq, result));
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use futures::executor::block_on;

    use super::*;

    struct ScriptedBot {
        replies: RefCell<Vec<Result<ChatReply, String>>>,
        requests: RefCell<Vec<ChatRequest>>,
    }

    impl ScriptedBot {
        fn new(replies: Vec<Result<ChatReply, String>>) -> Self {
            Self {
                replies: RefCell::new(replies),
                requests: RefCell::default(),
            }
        }
    }

    impl ChatTransport for ScriptedBot {
        type Error = String;

        async fn ask(&self, request: &ChatRequest) -> Result<ChatReply, String> {
            self.requests.borrow_mut().push(request.clone());
            self.replies.borrow_mut().remove(0)
        }
    }

    fn reply(text: &str, source: Option<&str>) -> Result<ChatReply, String> {
        Ok(ChatReply {
            response: text.to_string(),
            source: source.map(str::to_string),
        })
    }

    #[test]
    fn blank_input_changes_nothing() {
        let bot = ScriptedBot::new(Vec::new());
        let mut session = ChatSession::default();

        assert_eq!(block_on(send(&mut session, &bot, "   \n")), Err(SendRejected::Empty));
        assert!(session.transcript().is_empty());
        assert!(bot.requests.borrow().is_empty());
    }

    #[test]
    fn hello_round_trip_with_source() {
        let bot = ScriptedBot::new(vec![reply("hi", Some("FAQ"))]);
        let mut session = ChatSession::default();

        block_on(send(&mut session, &bot, "hello")).unwrap();

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!((transcript[0].role, transcript[0].content.as_str()), (ChatRole::User, "hello"));
        assert_eq!((transcript[1].role, transcript[1].content.as_str()), (ChatRole::Bot, "hi"));
        assert_eq!(transcript[1].source_label().as_deref(), Some("Source: FAQ"));
        assert!(!session.is_waiting());
        assert!(session.entries().all(|entry| entry != ChatEntry::Typing));
    }

    #[test]
    fn typing_shows_only_while_pending() {
        let mut session = ChatSession::default();
        let turn = session.begin("when is my appointment?").unwrap();

        assert_eq!(session.entries().last(), Some(ChatEntry::Typing));
        assert_eq!(
            turn.request.history,
            vec![HistoryEntry { role: ChatRole::User, content: "when is my appointment?".into() }]
        );
        assert_eq!(session.transcript().len(), 1);

        session.finish::<String>(turn.seq, reply("Tuesday", None));
        assert_eq!(session.entries().count(), 2);
        assert!(session.transcript().iter().all(|m| m.content != TYPING));
    }

    #[test]
    fn first_turn_history_holds_the_new_message() {
        let bot = ScriptedBot::new(vec![reply("hi", None)]);
        let mut session = ChatSession::default();
        block_on(send(&mut session, &bot, "  hello ")).unwrap();

        let first = &bot.requests.borrow()[0];
        assert_eq!(first.message, "hello");
        assert_eq!(
            first.history,
            vec![HistoryEntry { role: ChatRole::User, content: "hello".into() }]
        );
    }

    #[test]
    fn second_send_is_rejected_while_pending() {
        let mut session = ChatSession::default();
        let first = session.begin("first").unwrap();
        assert_eq!(session.begin("second"), Err(SendRejected::Busy));

        assert!(!session.finish::<String>(first.seq + 1, reply("stray", None)));
        assert!(session.finish::<String>(first.seq, reply("one", None)));
        assert!(session.begin("second").is_ok());
    }

    #[test]
    fn history_carries_transcript_including_new_message() {
        let bot = ScriptedBot::new(vec![reply("hi", None), reply("fine", None)]);
        let mut session = ChatSession::default();
        block_on(send(&mut session, &bot, "hello")).unwrap();
        block_on(send(&mut session, &bot, "how are you")).unwrap();

        let second = &bot.requests.borrow()[1];
        assert_eq!(second.message, "how are you");
        assert_eq!(
            second.history,
            vec![
                HistoryEntry { role: ChatRole::User, content: "hello".into() },
                HistoryEntry { role: ChatRole::Bot, content: "hi".into() },
                HistoryEntry { role: ChatRole::User, content: "how are you".into() },
            ]
        );
    }

    #[test]
    fn failure_appends_apology_and_policy_controls_history() {
        for (policy, expected_history) in [(ChatFailurePolicy::Omit, 2), (ChatFailurePolicy::Record, 3)] {
            let bot = ScriptedBot::new(vec![Err("offline".into()), reply("ok", None)]);
            let mut session = ChatSession::new(policy);

            block_on(send(&mut session, &bot, "anyone there?")).unwrap();
            assert_eq!(session.transcript()[1].content, APOLOGY);
            assert_eq!(session.transcript()[1].kind, MessageKind::Apology);

            block_on(send(&mut session, &bot, "retry")).unwrap();
            assert_eq!(bot.requests.borrow()[1].history.len(), expected_history);
        }
    }

    #[test]
    fn multi_line_replies_split_into_lines() {
        let mut session = ChatSession::default();
        let turn = session.begin("symptoms?").unwrap();
        session.finish::<String>(turn.seq, reply("Fever\r\nHeadache", Some("  ")));

        let bot = &session.transcript()[1];
        assert_eq!(bot.lines().collect::<Vec<_>>(), vec!["Fever", "Headache"]);
        assert_eq!(bot.source_label(), None);
    }

    #[test]
    fn request_serializes_roles_lowercase() {
        let request = ChatRequest {
            message: "hi".into(),
            history: vec![HistoryEntry { role: ChatRole::Bot, content: "hello".into() }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["history"][0]["role"], "bot");
    }
}
