//! Real-time mock interview rooms.
//!
//! - `room`: membership registry (one room per connection, no empty rooms)
//! - `events`: wire format of client and server frames
//! - `coordinator`: pure transition function from events to deliveries
//! - `hub`: the single task that owns the coordinator and fans frames out

mod coordinator;
mod events;
mod hub;
mod room;

pub use coordinator::{CoordinatorStats, Delivery, InterviewCoordinator};
pub use events::{
    ClientEvent, CodeChange, ConnectError, InterviewJoined, ParticipantsUpdate, PresenceNotice,
    ServerEvent,
};
pub use hub::InterviewHub;
pub use room::{
    ConnectionId, Departure, Participant, ParticipantSummary, RoomRegistry, SweepReport,
    DEFAULT_USERNAME,
};
