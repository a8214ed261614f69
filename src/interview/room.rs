use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub type ConnectionId = String;

pub const DEFAULT_USERNAME: &str = "Anonymous";

/// One live connection inside an interview room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub connection_id: ConnectionId,
    pub username: String,
    pub joined_at: DateTime<Utc>,
    /// Join order, used to list participants deterministically
    seq: u64,
}

/// Public view of a participant sent in `participants-update`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantSummary {
    pub username: String,
    pub joined_at: DateTime<Utc>,
}

impl From<&Participant> for ParticipantSummary {
    fn from(p: &Participant) -> Self {
        Self {
            username: p.username.clone(),
            joined_at: p.joined_at,
        }
    }
}

/// A participant removed from a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub interview_id: String,
    pub participant: Participant,
    pub room_closed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub removed: Vec<(String, Participant)>,
    pub closed_rooms: Vec<String>,
}

/// Interview id -> connection id -> participant.
///
/// A connection is in at most one room and empty rooms are never kept.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<String, HashMap<ConnectionId, Participant>>,
    next_seq: u64,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a connection in a room. The connection must not be in any room;
    /// callers `remove` it first so the old room can be notified.
    pub fn insert(
        &mut self,
        interview_id: &str,
        connection_id: &str,
        username: &str,
        now: DateTime<Utc>,
    ) {
        debug_assert!(self.room_of(connection_id).is_none());

        let seq = self.next_seq;
        self.next_seq += 1;

        self.rooms
            .entry(interview_id.to_string())
            .or_default()
            .insert(
                connection_id.to_string(),
                Participant {
                    connection_id: connection_id.to_string(),
                    username: username.to_string(),
                    joined_at: now,
                    seq,
                },
            );
    }

    /// Remove a connection from the room containing it
    pub fn remove(&mut self, connection_id: &str) -> Option<Departure> {
        let interview_id = self.room_of(connection_id)?.to_string();
        let room = self.rooms.get_mut(&interview_id)?;
        let participant = room.remove(connection_id)?;

        let room_closed = room.is_empty();
        if room_closed {
            self.rooms.remove(&interview_id);
        }

        Some(Departure {
            interview_id,
            participant,
            room_closed,
        })
    }

    pub fn room_of(&self, connection_id: &str) -> Option<&str> {
        self.rooms
            .iter()
            .find(|(_, members)| members.contains_key(connection_id))
            .map(|(id, _)| id.as_str())
    }

    /// Participants of a room in join order
    pub fn participants(&self, interview_id: &str) -> Vec<&Participant> {
        let mut list: Vec<&Participant> = self
            .rooms
            .get(interview_id)
            .map(|members| members.values().collect())
            .unwrap_or_default();
        list.sort_by_key(|p| p.seq);
        list
    }

    pub fn summaries(&self, interview_id: &str) -> Vec<ParticipantSummary> {
        self.participants(interview_id)
            .into_iter()
            .map(ParticipantSummary::from)
            .collect()
    }

    pub fn member_ids(&self, interview_id: &str) -> Vec<ConnectionId> {
        self.participants(interview_id)
            .into_iter()
            .map(|p| p.connection_id.clone())
            .collect()
    }

    pub fn get(&self, interview_id: &str, connection_id: &str) -> Option<&Participant> {
        self.rooms.get(interview_id)?.get(connection_id)
    }

    pub fn count(&self, interview_id: &str) -> usize {
        self.rooms.get(interview_id).map_or(0, HashMap::len)
    }

    pub fn contains_room(&self, interview_id: &str) -> bool {
        self.rooms.contains_key(interview_id)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn participant_count(&self) -> usize {
        self.rooms.values().map(HashMap::len).sum()
    }

    /// Drop participants whose join age exceeds `max_age`, then empty rooms.
    /// Age counts from join time, not from last activity.
    pub fn sweep(&mut self, now: DateTime<Utc>, max_age: Duration) -> SweepReport {
        let mut report = SweepReport::default();

        for (interview_id, members) in self.rooms.iter_mut() {
            let stale: Vec<ConnectionId> = members
                .values()
                .filter(|p| now - p.joined_at > max_age)
                .map(|p| p.connection_id.clone())
                .collect();

            for connection_id in stale {
                if let Some(participant) = members.remove(&connection_id) {
                    report.removed.push((interview_id.clone(), participant));
                }
            }

            if members.is_empty() {
                report.closed_rooms.push(interview_id.clone());
            }
        }

        for interview_id in &report.closed_rooms {
            self.rooms.remove(interview_id);
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_join_creates_room() {
        let mut rooms = RoomRegistry::new();
        rooms.insert("room1", "conn-a", "Alice", t0());

        assert!(rooms.contains_room("room1"));
        assert_eq!(rooms.count("room1"), 1);
        assert_eq!(rooms.room_of("conn-a"), Some("room1"));
    }

    #[test]
    fn test_join_moves_connection_between_rooms() {
        let mut rooms = RoomRegistry::new();
        rooms.insert("room1", "conn-a", "Alice", t0());
        rooms.insert("room1", "conn-b", "Bob", t0());

        let departure = rooms.remove("conn-a").unwrap();
        assert_eq!(departure.interview_id, "room1");
        assert!(!departure.room_closed);
        rooms.insert("room2", "conn-a", "Alice", t0());

        assert_eq!(rooms.room_of("conn-a"), Some("room2"));
        assert_eq!(rooms.count("room1"), 1);
        assert_eq!(rooms.participant_count(), 2);
    }

    #[test]
    fn test_last_departure_closes_room() {
        let mut rooms = RoomRegistry::new();
        rooms.insert("room1", "conn-a", "Alice", t0());

        let departure = rooms.remove("conn-a").unwrap();
        assert!(departure.room_closed);
        assert!(!rooms.contains_room("room1"));
        assert_eq!(rooms.room_count(), 0);
    }

    #[test]
    fn test_remove_unknown_connection() {
        let mut rooms = RoomRegistry::new();
        assert!(rooms.remove("nobody").is_none());
    }

    #[test]
    fn test_participants_in_join_order() {
        let mut rooms = RoomRegistry::new();
        for (conn, name) in [("c1", "Alice"), ("c2", "Bob"), ("c3", "Carol")] {
            rooms.insert("room1", conn, name, t0());
        }

        let names: Vec<String> = rooms
            .summaries("room1")
            .into_iter()
            .map(|s| s.username)
            .collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_rejoin_same_room_refreshes_entry() {
        let mut rooms = RoomRegistry::new();
        rooms.insert("room1", "conn-a", "Alice", t0());
        let later = t0() + Duration::minutes(10);
        rooms.remove("conn-a");
        rooms.insert("room1", "conn-a", "Alicia", later);

        assert_eq!(rooms.count("room1"), 1);
        let p = rooms.get("room1", "conn-a").unwrap();
        assert_eq!(p.username, "Alicia");
        assert_eq!(p.joined_at, later);
    }

    #[test]
    fn test_sweep_removes_only_stale() {
        let mut rooms = RoomRegistry::new();
        rooms.insert("room1", "old", "Old", t0());
        rooms.insert("room1", "new", "New", t0() + Duration::minutes(90));
        rooms.insert("room2", "solo", "Solo", t0());

        let report = rooms.sweep(t0() + Duration::hours(2), Duration::hours(1));

        assert_eq!(report.removed.len(), 2);
        assert_eq!(report.closed_rooms, vec!["room2".to_string()]);
        assert_eq!(rooms.member_ids("room1"), vec!["new".to_string()]);
        assert!(!rooms.contains_room("room2"));
    }

    #[test]
    fn test_sweep_boundary_is_exclusive() {
        let mut rooms = RoomRegistry::new();
        rooms.insert("room1", "conn-a", "Alice", t0());

        let report = rooms.sweep(t0() + Duration::hours(1), Duration::hours(1));
        assert!(report.removed.is_empty());
        assert!(rooms.contains_room("room1"));
    }
}
