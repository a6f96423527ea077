//! Keyword-matching chatbot.
//!
//! A static rule table of case-insensitive patterns; the first matching
//! rule wins. Anything unmatched gets the fallback reply pointing the
//! user at ticket creation.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::ChatReply;

const FALLBACK_REPLY: &str =
    "I could not find an answer for that. You can raise a ticket and a support agent will help you.";

lazy_static! {
    static ref RULES: Vec<(Regex, &'static str)> = vec![
        (
            Regex::new(r"(?i)\b(hello|hi|hey)\b").unwrap(),
            "Hello! Ask me about tickets, vehicle status, or override codes.",
        ),
        (
            Regex::new(r"(?i)ticket.*(status|progress)|status.*ticket").unwrap(),
            "You can check a ticket's status under Tickets; filter by open or in-progress.",
        ),
        (
            Regex::new(r"(?i)\b(offline|not (connecting|online)|no signal)\b").unwrap(),
            "A vehicle shows offline when no telemetry has arrived within the configured threshold. Check its power and network coverage first.",
        ),
        (
            Regex::new(r"(?i)(master|override) code").unwrap(),
            "Master override codes are managed per vehicle; the vehicle detail view lists current holders.",
        ),
        (
            Regex::new(r"(?i)blacklist").unwrap(),
            "Blacklisted drivers cannot authenticate on the affected vehicle. Site managers can amend the blacklist.",
        ),
        (
            Regex::new(r"(?i)\b(preop|pre-op|checklist)\b").unwrap(),
            "Pre-operational checklist results are part of each vehicle's telemetry; failures appear in its detail view.",
        ),
        (
            Regex::new(r"(?i)\b(export|csv|report)\b").unwrap(),
            "Tickets can be exported as CSV from the ticket list; snapshot comparisons are available under reporting.",
        ),
    ];
}

/// Produce a reply for an incoming message.
pub fn reply(message: &str) -> ChatReply {
    for (pattern, answer) in RULES.iter() {
        if pattern.is_match(message) {
            return ChatReply {
                reply: (*answer).to_string(),
                matched: true,
            };
        }
    }
    ChatReply {
        reply: FALLBACK_REPLY.to_string(),
        matched: false,
    }
}
