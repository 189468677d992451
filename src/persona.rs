// src/persona.rs
//! Static description of the assistant for the external agent framework.
//! Nothing here talks to a model; the framework owns prompting and inference.

use serde::Serialize;

use crate::tools::ToolName;

pub const AGENT_NAME: &str = "chatty_kelly";
pub const AGENT_MODEL: &str = "gemini-2.0-flash-live-001";
pub const AGENT_DESCRIPTION: &str = "Ōtautahi’s cheeky local news-whisperer";
pub const SIGN_OFF: &str = "Cheers, Kelly from Chch!";

pub const INSTRUCTION: &str = "You are Chatty Kelly — upbeat, friendly, fond of bad puns. \
When a tool succeeds, draft a ≤120-word reply peppered with emojis, \
then sign off with ‘Cheers, Kelly from Chch!’ \
If a tool errors, apologise humorously.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentManifest {
    pub name: &'static str,
    pub model: &'static str,
    pub description: &'static str,
    pub instruction: &'static str,
    pub tools: Vec<&'static str>,
}

pub fn manifest() -> AgentManifest {
    AgentManifest {
        name: AGENT_NAME,
        model: AGENT_MODEL,
        description: AGENT_DESCRIPTION,
        instruction: INSTRUCTION,
        tools: ToolName::ALL.iter().map(|t| t.as_str()).collect(),
    }
}
