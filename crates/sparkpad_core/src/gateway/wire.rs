//! Wire-level request building and response extraction.
//!
//! # Responsibility
//! - Build the chat-completions request bodies, including the function
//!   schema that constrains the service's structured output.
//! - Extract and decode the forced tool call from a response body.
//!
//! # Invariants
//! - `tool_choice` always forces the declared function; the service is
//!   never allowed to answer free-form.
//! - Extraction reads exactly `choices[0].message.tool_calls[0]`.

use crate::gateway::types::NoteDigest;
use crate::gateway::GatewayError;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

const ERROR_BODY_SNIPPET_CHARS: usize = 200;

const NOTE_SYSTEM_PROMPT: &str = "You are a helpful AI assistant that analyzes notes to \
extract tags and identify actionable tasks. Return your response as JSON.";

const BRAIN_SYSTEM_PROMPT: &str = "You are an intelligent neural network that analyzes notes \
to find patterns, connections, and insights. Your goal is to help users understand \
relationships between their ideas and provide actionable insights. Analyze the notes and \
identify key themes, connections between different notes, emerging ideas, and actionable \
recommendations. Use the analyze_brain function to return your analysis.";

/// Builds the per-note extraction request body.
pub(crate) fn analyze_note_request(model: &str, content: &str) -> Value {
    let user_prompt = format!(
        "Analyze this note and provide:\n\
         1. Up to 5 relevant tags (single words or short phrases)\n\
         2. List of actionable tasks found in the note (if any)\n\n\
         Note: \"{content}\""
    );

    json!({
        "model": model,
        "messages": [
            { "role": "system", "content": NOTE_SYSTEM_PROMPT },
            { "role": "user", "content": user_prompt }
        ],
        "tools": [{
            "type": "function",
            "function": {
                "name": "analyze_note",
                "description": "Analyze a note to extract tags and tasks",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "tags": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "List of relevant tags (max 5)"
                        },
                        "tasks": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "title": { "type": "string" },
                                    "description": { "type": "string" },
                                    "priority": {
                                        "type": "string",
                                        "enum": ["low", "medium", "high"]
                                    }
                                },
                                "required": ["title", "priority"]
                            }
                        },
                        "has_tasks": {
                            "type": "boolean",
                            "description": "Whether the note contains actionable tasks"
                        }
                    },
                    "required": ["tags", "tasks", "has_tasks"],
                    "additionalProperties": false
                }
            }
        }],
        "tool_choice": { "type": "function", "function": { "name": "analyze_note" } }
    })
}

/// Builds the cross-note insight request body over the full collection.
pub(crate) fn analyze_brain_request(model: &str, notes: &[NoteDigest]) -> Value {
    let digest = render_note_digest(notes);
    let user_prompt =
        format!("Analyze these notes and find meaningful connections and insights:\n\n{digest}");

    json!({
        "model": model,
        "messages": [
            { "role": "system", "content": BRAIN_SYSTEM_PROMPT },
            { "role": "user", "content": user_prompt }
        ],
        "tools": [{
            "type": "function",
            "function": {
                "name": "analyze_brain",
                "description": "Analyze notes to find connections and generate insights",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "themes": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "name": { "type": "string" },
                                    "noteIndices": {
                                        "type": "array",
                                        "items": { "type": "number" }
                                    },
                                    "description": { "type": "string" }
                                },
                                "required": ["name", "noteIndices", "description"]
                            },
                            "description": "Key themes found in the notes"
                        },
                        "connections": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "noteIndices": {
                                        "type": "array",
                                        "items": { "type": "number" }
                                    },
                                    "relationship": { "type": "string" }
                                },
                                "required": ["noteIndices", "relationship"]
                            },
                            "description": "Connections between different notes"
                        },
                        "insights": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "title": { "type": "string" },
                                    "description": { "type": "string" },
                                    "priority": {
                                        "type": "string",
                                        "enum": ["low", "medium", "high"]
                                    }
                                },
                                "required": ["title", "description", "priority"]
                            },
                            "description": "Actionable insights and recommendations"
                        },
                        "summary": {
                            "type": "string",
                            "description": "Overall summary of the analysis"
                        }
                    },
                    "required": ["themes", "connections", "insights", "summary"]
                }
            }
        }],
        "tool_choice": { "type": "function", "function": { "name": "analyze_brain" } }
    })
}

/// Renders the note collection into the prompt digest, one block per
/// note with its tags, separated by blank lines.
pub(crate) fn render_note_digest(notes: &[NoteDigest]) -> String {
    notes
        .iter()
        .enumerate()
        .map(|(idx, note)| {
            format!(
                "Note {}: {}\nTags: {}",
                idx + 1,
                note.content,
                note.tags.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Maps a non-success upstream status to the gateway error taxonomy.
pub(crate) fn error_for_status(status: u16, body: &str) -> GatewayError {
    match status {
        429 => GatewayError::RateLimited,
        402 => GatewayError::QuotaExceeded,
        _ => {
            let snippet: String = body.chars().take(ERROR_BODY_SNIPPET_CHARS).collect();
            GatewayError::Transport(format!("HTTP {status}: {snippet}"))
        }
    }
}

/// Extracts the forced tool call's arguments from a response body and
/// decodes them into the expected payload type.
pub(crate) fn extract_tool_payload<T: DeserializeOwned>(body: &Value) -> Result<T, GatewayError> {
    let arguments = body
        .pointer("/choices/0/message/tool_calls/0/function/arguments")
        .and_then(Value::as_str)
        .ok_or_else(|| GatewayError::MalformedResponse("no tool call in response".to_string()))?;

    serde_json::from_str(arguments).map_err(|err| {
        GatewayError::MalformedResponse(format!("tool arguments did not match schema: {err}"))
    })
}
