use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::room::ParticipantSummary;
use crate::error::{AppError, Result};

/// Raw frame as sent by clients: `{"event": "...", "data": {...}}`
#[derive(Debug, Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    data: Value,
}

/// Events a client may send once its connection is authenticated.
///
/// Field extraction is permissive: missing or mistyped fields become `None`
/// and the coordinator applies defaults.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    JoinInterview {
        interview_id: Option<String>,
        username: Option<String>,
    },
    InterviewMessage {
        interview_id: Option<String>,
        payload: Map<String, Value>,
    },
    CodeChange {
        interview_id: Option<String>,
        code: Option<String>,
    },
}

impl ClientEvent {
    pub fn parse(text: &str) -> Result<Self> {
        let envelope: Envelope = serde_json::from_str(text)?;
        let data = match envelope.data {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(AppError::validation(format!(
                    "Event '{}' carries non-object data: {}",
                    envelope.event, other
                )))
            }
        };

        match envelope.event.as_str() {
            "join-interview" => Ok(ClientEvent::JoinInterview {
                interview_id: interview_id_field(&data),
                username: string_field(&data, "username"),
            }),
            "interview-message" => Ok(ClientEvent::InterviewMessage {
                interview_id: interview_id_field(&data),
                payload: data,
            }),
            "code-change" => Ok(ClientEvent::CodeChange {
                interview_id: interview_id_field(&data),
                code: string_field(&data, "code"),
            }),
            other => Err(AppError::validation(format!("Unknown event '{}'", other))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::JoinInterview { .. } => "join-interview",
            ClientEvent::InterviewMessage { .. } => "interview-message",
            ClientEvent::CodeChange { .. } => "code-change",
        }
    }
}

fn interview_id_field(data: &Map<String, Value>) -> Option<String> {
    string_field(data, "interviewId").or_else(|| string_field(data, "sessionId"))
}

fn string_field(data: &Map<String, Value>, key: &str) -> Option<String> {
    match data.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Events pushed to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    UserJoined(PresenceNotice),
    ParticipantsUpdate(ParticipantsUpdate),
    InterviewJoined(InterviewJoined),
    InterviewMessage(Map<String, Value>),
    CodeChange(CodeChange),
    UserLeft(PresenceNotice),
    ConnectError(ConnectError),
}

impl ServerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::UserJoined(_) => "user-joined",
            ServerEvent::ParticipantsUpdate(_) => "participants-update",
            ServerEvent::InterviewJoined(_) => "interview-joined",
            ServerEvent::InterviewMessage(_) => "interview-message",
            ServerEvent::CodeChange(_) => "code-change",
            ServerEvent::UserLeft(_) => "user-left",
            ServerEvent::ConnectError(_) => "connect-error",
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceNotice {
    pub user_id: String,
    pub username: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantsUpdate {
    pub count: usize,
    pub participants: Vec<ParticipantSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewJoined {
    pub interview_id: String,
    pub participant_count: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeChange {
    pub interview_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectError {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_join() {
        let event = ClientEvent::parse(
            r#"{"event":"join-interview","data":{"interviewId":"room1","username":"Alice"}}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            ClientEvent::JoinInterview {
                interview_id: Some("room1".to_string()),
                username: Some("Alice".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_join_accepts_session_id_alias() {
        let event =
            ClientEvent::parse(r#"{"event":"join-interview","data":{"sessionId":"room9"}}"#)
                .unwrap();
        assert_eq!(
            event,
            ClientEvent::JoinInterview {
                interview_id: Some("room9".to_string()),
                username: None,
            }
        );
    }

    #[test]
    fn test_parse_join_tolerates_bad_field_types() {
        let event = ClientEvent::parse(
            r#"{"event":"join-interview","data":{"interviewId":42,"username":["x"]}}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            ClientEvent::JoinInterview {
                interview_id: Some("42".to_string()),
                username: None,
            }
        );
    }

    #[test]
    fn test_parse_message_keeps_whole_payload() {
        let event = ClientEvent::parse(
            r#"{"event":"interview-message","data":{"interviewId":"room1","user":"Bob","message":"hi","extra":true}}"#,
        )
        .unwrap();
        match event {
            ClientEvent::InterviewMessage { interview_id, payload } => {
                assert_eq!(interview_id.as_deref(), Some("room1"));
                assert_eq!(payload["message"], "hi");
                assert_eq!(payload["extra"], true);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_event() {
        let err = ClientEvent::parse(r#"{"event":"dance","data":{}}"#).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = ClientEvent::parse("not json").unwrap_err();
        assert!(matches!(err, AppError::SerializationFailed(_)));
    }

    #[test]
    fn test_server_event_wire_format() {
        let event = ServerEvent::InterviewJoined(InterviewJoined {
            interview_id: "room1".to_string(),
            participant_count: 1,
            message: "Successfully joined interview room1".to_string(),
        });
        let json: Value = serde_json::from_str(&event.to_json().unwrap()).unwrap();
        assert_eq!(json["event"], "interview-joined");
        assert_eq!(json["data"]["interviewId"], "room1");
        assert_eq!(json["data"]["participantCount"], 1);
    }
}
