//! The scripted conversational companion.
//!
//! There is no model behind this: replies come from an ordered keyword table
//! with a randomized generic fallback, behind the [`Responder`] trait so a
//! real inference backend could be dropped in without touching the
//! conversation state machine. A jittered delay imitates thinking time.

use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use log::debug;
use rand::Rng;

use crate::{MmError, Result};

/// The companion's opening message.
pub const GREETING: &str = "Hello! I'm your AI therapeutic companion. I'm here to listen \
     and support you in a safe, non-judgmental space. How are you feeling today?";

/// Reply strategy. `respond` must be synchronous and total: every input gets
/// some reply.
pub trait Responder {
    fn respond(&self, input: &str) -> String;
}

/// Keyword-rule responder with a randomized generic fallback.
///
/// Keyword matches are deterministic regardless of randomness; only the
/// fallback draws from the generic pool.
pub struct ScriptedResponder;

/// (keywords, fixed reply) pairs, checked in order; first hit wins.
const KEYWORD_REPLIES: &[(&[&str], &str)] = &[
    (
        &["anxious", "anxiety"],
        "Anxiety can feel overwhelming. Try focusing on your breathing - take slow, \
         deep breaths. Remember, you're safe right now. What specific thoughts are \
         making you feel anxious?",
    ),
    (
        &["sad", "depression", "depressed"],
        "I understand you're going through a difficult time. It's okay to feel sad - \
         your emotions are valid. Would you like to talk about what's contributing to \
         these feelings?",
    ),
    (
        &["stress", "overwhelmed"],
        "Feeling overwhelmed is a sign that you're dealing with a lot right now. Let's \
         break things down together. What feels most manageable to focus on first?",
    ),
    (
        &["angry", "frustrated"],
        "Anger often signals that something important to us isn't being honored. Can \
         you help me understand what's underneath that anger?",
    ),
];

const GENERIC_REPLIES: &[&str] = &[
    "I hear you sharing that with me. Can you tell me more about how that made you feel?",
    "That sounds like it was really challenging for you. You're being very brave by talking about it.",
    "It's completely normal to feel that way. Many people experience similar emotions in situations like this.",
    "I appreciate you opening up to me. What do you think might help you feel better about this situation?",
    "Your feelings are valid. Have you noticed any patterns in when you feel this way?",
    "That takes a lot of courage to share. What kind of support do you feel would be most helpful right now?",
    "I can sense this is important to you. How long have you been feeling this way?",
    "Thank you for trusting me with this. What would you like to focus on in our conversation today?",
    "I'm here to listen. Sometimes just expressing these thoughts can help us understand them better.",
    "You're taking positive steps by reflecting on this. What small action could you take today that might help?",
];

impl Responder for ScriptedResponder {
    fn respond(&self, input: &str) -> String {
        let lower = input.to_lowercase();

        for (keywords, reply) in KEYWORD_REPLIES {
            if keywords.iter().any(|k| lower.contains(k)) {
                return (*reply).to_string();
            }
        }

        let index = rand::thread_rng().gen_range(0..GENERIC_REPLIES.len());
        GENERIC_REPLIES[index].to_string()
    }
}

/// Who said a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Companion,
}

/// One message in a conversation.
#[derive(Debug, Clone)]
pub struct Message {
    pub speaker: Speaker,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn now(speaker: Speaker, content: String) -> Self {
        Message {
            speaker,
            content,
            timestamp: Utc::now(),
        }
    }
}

/// Conversation states. Input is accepted only while idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    Idle,
    AwaitingReply,
}

/// A single conversation thread: message log plus the idle/awaiting state
/// machine. At most one exchange is ever in flight.
pub struct Conversation<R: Responder> {
    responder: R,
    messages: Vec<Message>,
    state: ConversationState,
    /// Simulated thinking time in milliseconds; `None` disables the delay
    thinking_delay_ms: Option<RangeInclusive<u64>>,
}

impl<R: Responder> Conversation<R> {
    /// Opens a conversation with the standard greeting and thinking delay.
    pub fn new(responder: R) -> Self {
        Conversation {
            responder,
            messages: vec![Message::now(Speaker::Companion, GREETING.to_string())],
            state: ConversationState::Idle,
            thinking_delay_ms: Some(1500..=2500),
        }
    }

    /// Opens a conversation that replies immediately.
    pub fn without_delay(responder: R) -> Self {
        let mut conversation = Self::new(responder);
        conversation.thinking_delay_ms = None;
        conversation
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Sends a user message and resolves the companion's reply.
    ///
    /// Rejected while a reply is already pending; the caller is expected to
    /// disable input until the previous `send` resolves.
    pub async fn send(&mut self, input: &str) -> Result<&Message> {
        if self.state == ConversationState::AwaitingReply {
            return Err(MmError::InvalidInput {
                message: "a reply is already pending".to_string(),
            });
        }

        self.messages
            .push(Message::now(Speaker::User, input.to_string()));
        self.state = ConversationState::AwaitingReply;

        if let Some(range) = &self.thinking_delay_ms {
            let millis = rand::thread_rng().gen_range(range.clone());
            debug!("Simulating thinking for {} ms", millis);
            tokio::time::sleep(std::time::Duration::from_millis(millis)).await;
        }

        let reply = self.responder.respond(input);
        self.messages
            .push(Message::now(Speaker::Companion, reply));
        self.state = ConversationState::Idle;

        Ok(&self.messages[self.messages.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anxious_keyword_reply_is_deterministic() {
        let responder = ScriptedResponder;
        for input in ["I feel anxious", "ANXIOUS again", "my Anxiety is back"] {
            for _ in 0..20 {
                assert!(responder.respond(input).starts_with("Anxiety can feel overwhelming"));
            }
        }
    }

    #[test]
    fn each_keyword_group_maps_to_its_fixed_reply() {
        let responder = ScriptedResponder;
        assert!(responder.respond("so sad today").contains("okay to feel sad"));
        assert!(responder.respond("work stress").contains("break things down"));
        assert!(responder.respond("I'm frustrated").contains("underneath that anger"));
    }

    #[test]
    fn earlier_keyword_rules_win_on_mixed_input() {
        let responder = ScriptedResponder;
        let reply = responder.respond("anxious and sad at the same time");
        assert!(reply.starts_with("Anxiety can feel overwhelming"));
    }

    #[test]
    fn fallback_replies_come_from_the_generic_pool() {
        let responder = ScriptedResponder;
        for _ in 0..20 {
            let reply = responder.respond("the weather was nice");
            assert!(GENERIC_REPLIES.contains(&reply.as_str()));
        }
    }

    #[tokio::test]
    async fn conversation_opens_with_the_greeting() {
        let conversation = Conversation::without_delay(ScriptedResponder);
        assert_eq!(conversation.messages().len(), 1);
        assert_eq!(conversation.messages()[0].speaker, Speaker::Companion);
        assert_eq!(conversation.messages()[0].content, GREETING);
        assert_eq!(conversation.state(), ConversationState::Idle);
    }

    #[tokio::test]
    async fn send_appends_both_sides_and_returns_to_idle() {
        let mut conversation = Conversation::without_delay(ScriptedResponder);

        let reply = conversation.send("feeling anxious").await.unwrap();
        assert_eq!(reply.speaker, Speaker::Companion);
        assert!(reply.content.starts_with("Anxiety can feel overwhelming"));

        assert_eq!(conversation.messages().len(), 3);
        assert_eq!(conversation.messages()[1].speaker, Speaker::User);
        assert_eq!(conversation.state(), ConversationState::Idle);

        // The thread is reusable once the reply has resolved
        conversation.send("still anxious").await.unwrap();
        assert_eq!(conversation.messages().len(), 5);
    }

    struct Echo;
    impl Responder for Echo {
        fn respond(&self, input: &str) -> String {
            format!("echo: {}", input)
        }
    }

    #[tokio::test]
    async fn responder_strategy_is_swappable() {
        let mut conversation = Conversation::without_delay(Echo);
        let reply = conversation.send("hi").await.unwrap();
        assert_eq!(reply.content, "echo: hi");
    }
}
