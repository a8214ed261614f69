use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use super::events::{
    ClientEvent, CodeChange, InterviewJoined, ParticipantsUpdate, PresenceNotice, ServerEvent,
};
use super::room::{ConnectionId, Departure, RoomRegistry, SweepReport, DEFAULT_USERNAME};
use crate::error::{AppError, Result};

/// One outbound frame addressed to one connection
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub to: ConnectionId,
    pub event: ServerEvent,
}

impl Delivery {
    fn new(to: impl Into<ConnectionId>, event: ServerEvent) -> Self {
        Self {
            to: to.into(),
            event,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinatorStats {
    pub active_interviews: usize,
    pub participants: usize,
}

/// Room state machine for mock interviews.
///
/// Every operation takes the current state plus one event and returns the
/// frames to deliver; nothing here touches the network.
#[derive(Debug, Default)]
pub struct InterviewCoordinator {
    rooms: RoomRegistry,
}

impl InterviewCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only presence of a token is enforced; its content belongs to the
    /// token issuer.
    pub fn authenticate(token: Option<&str>) -> Result<()> {
        match token.map(str::trim) {
            Some(t) if !t.is_empty() => Ok(()),
            _ => Err(AppError::Authentication("No token provided".to_string())),
        }
    }

    pub fn rooms(&self) -> &RoomRegistry {
        &self.rooms
    }

    pub fn stats(&self) -> CoordinatorStats {
        CoordinatorStats {
            active_interviews: self.rooms.room_count(),
            participants: self.rooms.participant_count(),
        }
    }

    /// Apply one client event
    pub fn handle(
        &mut self,
        connection_id: &str,
        event: ClientEvent,
        now: DateTime<Utc>,
    ) -> Vec<Delivery> {
        match event {
            ClientEvent::JoinInterview {
                interview_id,
                username,
            } => match non_blank(interview_id) {
                Some(interview_id) => self.join(connection_id, &interview_id, username, now),
                None => {
                    tracing::warn!(
                        connection_id = %connection_id,
                        "join-interview without interviewId, ignoring"
                    );
                    Vec::new()
                }
            },
            ClientEvent::InterviewMessage {
                interview_id,
                payload,
            } => match non_blank(interview_id) {
                Some(interview_id) => self.relay_message(connection_id, &interview_id, payload, now),
                None => {
                    tracing::warn!(
                        connection_id = %connection_id,
                        "interview-message without interviewId, dropping"
                    );
                    Vec::new()
                }
            },
            ClientEvent::CodeChange { interview_id, code } => match non_blank(interview_id) {
                Some(interview_id) => self.relay_code_change(connection_id, &interview_id, code, now),
                None => {
                    tracing::warn!(
                        connection_id = %connection_id,
                        "code-change without interviewId, dropping"
                    );
                    Vec::new()
                }
            },
        }
    }

    pub fn join(
        &mut self,
        connection_id: &str,
        interview_id: &str,
        username: Option<String>,
        now: DateTime<Utc>,
    ) -> Vec<Delivery> {
        let username = non_blank(username).unwrap_or_else(|| DEFAULT_USERNAME.to_string());

        tracing::info!(
            connection_id = %connection_id,
            interview_id = %interview_id,
            username = %username,
            "User joining interview"
        );

        let mut deliveries = Vec::new();

        // Re-joining, even the same room, is a leave followed by a join.
        if let Some(departure) = self.rooms.remove(connection_id) {
            tracing::info!(
                connection_id = %connection_id,
                previous = %departure.interview_id,
                "Left previous interview"
            );
            deliveries.extend(self.departure_notices(&departure, now));
        }
        self.rooms.insert(interview_id, connection_id, &username, now);

        let notice = ServerEvent::UserJoined(PresenceNotice {
            user_id: connection_id.to_string(),
            username: username.clone(),
            timestamp: now,
        });
        for member in self.rooms.member_ids(interview_id) {
            if member != connection_id {
                deliveries.push(Delivery::new(member, notice.clone()));
            }
        }

        let update = self.participants_update(interview_id);
        for member in self.rooms.member_ids(interview_id) {
            deliveries.push(Delivery::new(member, update.clone()));
        }

        let participant_count = self.rooms.count(interview_id);
        tracing::info!(
            interview_id = %interview_id,
            count = participant_count,
            "Interview participants updated"
        );

        deliveries.push(Delivery::new(
            connection_id,
            ServerEvent::InterviewJoined(InterviewJoined {
                interview_id: interview_id.to_string(),
                participant_count,
                message: format!("Successfully joined interview {}", interview_id),
            }),
        ));

        deliveries
    }

    /// Forward a chat payload to everyone else in the room. The sender need
    /// not be a member.
    pub fn relay_message(
        &self,
        connection_id: &str,
        interview_id: &str,
        mut payload: Map<String, Value>,
        now: DateTime<Utc>,
    ) -> Vec<Delivery> {
        let preview: String = payload
            .get("message")
            .and_then(Value::as_str)
            .map(|m| {
                let head: String = m.chars().take(50).collect();
                if m.chars().count() > 50 {
                    format!("{}...", head)
                } else {
                    head
                }
            })
            .unwrap_or_default();

        tracing::info!(
            interview_id = %interview_id,
            from = ?payload.get("user"),
            message = %preview,
            "Message in interview"
        );

        payload.insert(
            "timestamp".to_string(),
            serde_json::to_value(now).unwrap_or_default(),
        );
        let event = ServerEvent::InterviewMessage(payload);

        self.to_others(connection_id, interview_id, event)
    }

    pub fn relay_code_change(
        &self,
        connection_id: &str,
        interview_id: &str,
        code: Option<String>,
        now: DateTime<Utc>,
    ) -> Vec<Delivery> {
        tracing::debug!(
            interview_id = %interview_id,
            code_length = code.as_ref().map_or(0, String::len),
            "Code change in interview"
        );

        let event = ServerEvent::CodeChange(CodeChange {
            interview_id: interview_id.to_string(),
            code,
            timestamp: now,
        });

        self.to_others(connection_id, interview_id, event)
    }

    /// Connection went away; no-op if it was not in a room
    pub fn leave(&mut self, connection_id: &str, reason: &str, now: DateTime<Utc>) -> Vec<Delivery> {
        tracing::info!(connection_id = %connection_id, reason = %reason, "User disconnected");

        match self.rooms.remove(connection_id) {
            Some(departure) => {
                tracing::info!(
                    interview_id = %departure.interview_id,
                    username = %departure.participant.username,
                    remaining = self.rooms.count(&departure.interview_id),
                    "Removed participant from interview"
                );
                if departure.room_closed {
                    tracing::info!(interview_id = %departure.interview_id, "Cleaning up empty interview room");
                }
                self.departure_notices(&departure, now)
            }
            None => Vec::new(),
        }
    }

    pub fn sweep_stale(&mut self, now: DateTime<Utc>, max_age: Duration) -> SweepReport {
        let report = self.rooms.sweep(now, max_age);

        for (interview_id, participant) in &report.removed {
            tracing::info!(
                interview_id = %interview_id,
                username = %participant.username,
                "Cleaned up stale participant"
            );
        }
        if !report.closed_rooms.is_empty() {
            tracing::info!(
                rooms = report.closed_rooms.len(),
                "Periodic cleanup removed empty interview rooms"
            );
        }

        report
    }

    fn departure_notices(&self, departure: &Departure, now: DateTime<Utc>) -> Vec<Delivery> {
        let remaining = self.rooms.member_ids(&departure.interview_id);
        if remaining.is_empty() {
            return Vec::new();
        }

        let notice = ServerEvent::UserLeft(PresenceNotice {
            user_id: departure.participant.connection_id.clone(),
            username: departure.participant.username.clone(),
            timestamp: now,
        });
        let update = self.participants_update(&departure.interview_id);

        let mut deliveries = Vec::with_capacity(remaining.len() * 2);
        for member in &remaining {
            deliveries.push(Delivery::new(member.clone(), notice.clone()));
        }
        for member in remaining {
            deliveries.push(Delivery::new(member, update.clone()));
        }
        deliveries
    }

    fn participants_update(&self, interview_id: &str) -> ServerEvent {
        let participants = self.rooms.summaries(interview_id);
        ServerEvent::ParticipantsUpdate(ParticipantsUpdate {
            count: participants.len(),
            participants,
        })
    }

    fn to_others(&self, sender: &str, interview_id: &str, event: ServerEvent) -> Vec<Delivery> {
        self.rooms
            .member_ids(interview_id)
            .into_iter()
            .filter(|member| member != sender)
            .map(|member| Delivery::new(member, event.clone()))
            .collect()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
