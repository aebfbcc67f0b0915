//! Boundary to the remote generative-AI text service.
//!
//! # Responsibility
//! - Define the opaque client contract the UI shell plugs a transport into.
//! - Assemble prompts for the symptom-check, diagnosis-assist and chat
//!   flows, and absorb client failures behind fixed advisory strings.
//!
//! # Invariants
//! - The service is stateless from the store's perspective; nothing here
//!   reads or writes entity-store state.
//! - A failed or empty response never reaches a caller; the fixed
//!   fallback text is substituted instead.

mod prompts;

pub use prompts::{diagnosis_assist_prompt, symptom_check_prompt, system_instruction};

use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Advisory shown when the symptom checker cannot be reached.
pub const SYMPTOM_CHECK_FALLBACK: &str = "I'm sorry, I'm having trouble analyzing the symptoms right now. Please consult a physical veterinarian immediately if this is an emergency.";
/// Advisory shown when diagnosis assistance cannot be reached.
pub const DIAGNOSIS_ASSIST_FALLBACK: &str =
    "Unable to provide diagnosis assistance at this moment.";
/// Advisory shown when the chat assistant cannot be reached.
pub const ASSISTANT_FALLBACK: &str = "I'm having a little trouble connecting to my pet health database. Please try again or contact a human vet if this is urgent.";

/// Conversation mode selecting the assistant's system instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatMode {
    /// Friendly pet-care helper.
    General,
    /// Symptom triage with urgency assessment.
    Triage,
}

impl ChatMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "GENERAL",
            Self::Triage => "TRIAGE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "GENERAL" => Some(Self::General),
            "TRIAGE" => Some(Self::Triage),
            _ => None,
        }
    }
}

impl Display for ChatMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Originator of one prior chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Model,
}

/// One prior turn of an assistant conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

pub type AssistantResult<T> = Result<T, AssistantError>;

/// Failure surfaced by an assistant transport.
#[derive(Debug)]
pub enum AssistantError {
    /// Network or service failure, carried as a human-readable message.
    Transport(String),
    /// The service answered with no usable text.
    EmptyResponse,
}

impl Display for AssistantError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "assistant transport failure: {message}"),
            Self::EmptyResponse => write!(f, "assistant returned an empty response"),
        }
    }
}

impl Error for AssistantError {}

/// Opaque request/response contract to the remote text service.
///
/// The core ships no transport; the UI shell provides one. Implementations
/// may block, but cancelling a call must not touch store state.
pub trait AssistantClient {
    /// Single-shot prose generation for an assembled prompt.
    fn generate(&self, prompt: &str) -> AssistantResult<String>;
    /// Conversational reply given prior turns and a mode.
    fn chat(&self, history: &[ChatTurn], message: &str, mode: ChatMode)
        -> AssistantResult<String>;
}

/// Owner-facing symptom check. Never fails; substitutes the fixed
/// advisory when the service does.
pub fn check_symptoms(client: &impl AssistantClient, pet_info: &str, symptoms: &str) -> String {
    recover(
        "check_symptoms",
        client.generate(&symptom_check_prompt(pet_info, symptoms)),
        SYMPTOM_CHECK_FALLBACK,
    )
}

/// Vet-facing diagnosis assistance. Never fails; substitutes the fixed
/// advisory when the service does.
pub fn assist_diagnosis(
    client: &impl AssistantClient,
    patient_history: &str,
    current_condition: &str,
) -> String {
    recover(
        "assist_diagnosis",
        client.generate(&diagnosis_assist_prompt(patient_history, current_condition)),
        DIAGNOSIS_ASSIST_FALLBACK,
    )
}

/// Chat assistant reply. Never fails; substitutes the fixed advisory when
/// the service does.
pub fn assistant_reply(
    client: &impl AssistantClient,
    history: &[ChatTurn],
    message: &str,
    mode: ChatMode,
) -> String {
    recover(
        "assistant_reply",
        client.chat(history, message, mode),
        ASSISTANT_FALLBACK,
    )
}

fn recover(operation: &str, result: AssistantResult<String>, fallback: &str) -> String {
    match result {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            warn!("event=assistant_call module=assistant status=error op={operation} error=empty_response");
            fallback.to_string()
        }
        Err(err) => {
            warn!("event=assistant_call module=assistant status=error op={operation} error={err}");
            fallback.to_string()
        }
    }
}
