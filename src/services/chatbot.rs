use crate::message::ChatResponse;
use crate::services::knowledge::{KnowledgeBase, keywords};

/// Matches under this confidence are not worth showing.
pub const MIN_CONFIDENCE: f64 = 0.1;

const GREETINGS: &[&str] = &[
    "hi", "hello", "hey", "bonjour", "hola", "good", "morning", "afternoon", "evening",
    "greetings",
];

#[derive(Debug, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Question,
}

/// How a reply was produced. Only `Retrieved` replies count towards analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    Greeting,
    Retrieved,
    NoAnswer,
}

/// A message is a greeting only when it carries nothing besides greeting words.
pub fn detect_intent(msg: &str) -> Intent {
    let msg_lower = msg.to_lowercase();
    let greets = msg_lower
        .split(|c: char| !c.is_alphanumeric())
        .any(|w| GREETINGS.contains(&w));
    let has_topic = keywords(msg)
        .iter()
        .any(|w| !GREETINGS.contains(&w.as_str()));

    if greets && !has_topic {
        Intent::Greeting
    } else {
        Intent::Question
    }
}

pub async fn generate_reply(
    kb: &KnowledgeBase,
    company_id: &str,
    user_msg: &str,
) -> (ChatResponse, ReplyKind) {
    if !kb.has_company(company_id).await {
        return (
            reply(
                "I don't have any information about this company yet.",
                0.0,
                "",
                "none",
            ),
            ReplyKind::NoAnswer,
        );
    }

    if detect_intent(user_msg) == Intent::Greeting {
        return (
            reply("Hello! How can I help you today?", 1.0, "", "greeting"),
            ReplyKind::Greeting,
        );
    }

    match kb.best_match(company_id, user_msg).await {
        Some(m) if m.confidence >= MIN_CONFIDENCE => (
            ChatResponse {
                response: Some(m.passage.text.clone()),
                confidence: Some(m.confidence),
                context: Some(m.passage.text),
                source: Some(m.passage.source),
            },
            ReplyKind::Retrieved,
        ),
        other => (
            reply(
                "I couldn't find an answer to that. Could you rephrase your question?",
                other.map_or(0.0, |m| m.confidence),
                "",
                "none",
            ),
            ReplyKind::NoAnswer,
        ),
    }
}

fn reply(text: &str, confidence: f64, context: &str, source: &str) -> ChatResponse {
    ChatResponse {
        response: Some(text.to_string()),
        confidence: Some(confidence),
        context: Some(context.to_string()),
        source: Some(source.to_string()),
    }
}
