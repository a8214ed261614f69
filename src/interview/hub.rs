use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use warp::ws::Message;

use super::coordinator::{CoordinatorStats, Delivery, InterviewCoordinator};
use super::events::ClientEvent;
use super::room::ConnectionId;
use crate::config::InterviewConfig;
use crate::error::{AppError, Result};

enum HubCommand {
    Connect {
        connection_id: ConnectionId,
        sender: mpsc::UnboundedSender<Message>,
    },
    Event {
        connection_id: ConnectionId,
        event: ClientEvent,
    },
    Disconnect {
        connection_id: ConnectionId,
        reason: String,
    },
    Sweep,
    Stats {
        reply: oneshot::Sender<CoordinatorStats>,
    },
}

/// Handle to the task that owns the interview rooms.
///
/// All room mutations, timer ticks included, are applied by that one task in
/// arrival order, so the registry never needs a lock.
#[derive(Clone)]
pub struct InterviewHub {
    commands: mpsc::UnboundedSender<HubCommand>,
}

impl InterviewHub {
    /// Spawns the hub task on the current runtime
    pub fn spawn(config: InterviewConfig) -> Self {
        let (commands, receiver) = mpsc::unbounded_channel();
        tokio::spawn(run(receiver, config));
        Self { commands }
    }

    /// Registers an authenticated connection and its outbound channel
    pub fn connect(&self, connection_id: ConnectionId, sender: mpsc::UnboundedSender<Message>) {
        self.send(HubCommand::Connect {
            connection_id,
            sender,
        });
    }

    pub fn dispatch(&self, connection_id: ConnectionId, event: ClientEvent) {
        self.send(HubCommand::Event {
            connection_id,
            event,
        });
    }

    pub fn disconnect(&self, connection_id: ConnectionId, reason: impl Into<String>) {
        self.send(HubCommand::Disconnect {
            connection_id,
            reason: reason.into(),
        });
    }

    /// Runs a stale sweep now instead of waiting for the timer
    pub fn sweep_now(&self) {
        self.send(HubCommand::Sweep);
    }

    pub async fn stats(&self) -> Result<CoordinatorStats> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(HubCommand::Stats { reply })
            .map_err(|_| AppError::internal("Interview hub is not running"))?;
        response
            .await
            .map_err(|_| AppError::internal("Interview hub dropped stats request"))
    }

    fn send(&self, command: HubCommand) {
        if self.commands.send(command).is_err() {
            tracing::error!("Interview hub is not running, command dropped");
        }
    }
}

struct HubState {
    coordinator: InterviewCoordinator,
    connections: HashMap<ConnectionId, mpsc::UnboundedSender<Message>>,
    max_age: chrono::Duration,
}

impl HubState {
    fn apply(&mut self, command: HubCommand) {
        match command {
            HubCommand::Connect {
                connection_id,
                sender,
            } => {
                tracing::info!(connection_id = %connection_id, "User connected for mock interview");
                self.connections.insert(connection_id, sender);
            }
            HubCommand::Event {
                connection_id,
                event,
            } => {
                if !self.connections.contains_key(&connection_id) {
                    tracing::warn!(
                        connection_id = %connection_id,
                        event = event.name(),
                        "Event from unregistered connection, dropping"
                    );
                    return;
                }
                let deliveries = self.coordinator.handle(&connection_id, event, Utc::now());
                self.deliver(deliveries);
            }
            HubCommand::Disconnect {
                connection_id,
                reason,
            } => {
                let deliveries = self.coordinator.leave(&connection_id, &reason, Utc::now());
                self.connections.remove(&connection_id);
                self.deliver(deliveries);
            }
            HubCommand::Sweep => {
                self.coordinator.sweep_stale(Utc::now(), self.max_age);
            }
            HubCommand::Stats { reply } => {
                let _ = reply.send(self.coordinator.stats());
            }
        }
    }

    /// Fire-and-forget: failures are logged and the frame dropped
    fn deliver(&self, deliveries: Vec<Delivery>) {
        for delivery in deliveries {
            if let Err(e) = self.deliver_one(&delivery) {
                tracing::warn!(
                    connection_id = %delivery.to,
                    event = delivery.event.name(),
                    error = %e,
                    "Failed to deliver interview event"
                );
            }
        }
    }

    fn deliver_one(&self, delivery: &Delivery) -> Result<()> {
        let sender = self
            .connections
            .get(&delivery.to)
            .ok_or_else(|| AppError::Transport(format!("connection {} is gone", delivery.to)))?;
        let text = delivery.event.to_json()?;
        sender
            .send(Message::text(text))
            .map_err(|e| AppError::Transport(e.to_string()))
    }

    fn log_stats(&self) {
        let stats = self.coordinator.stats();
        tracing::info!(
            active_interviews = stats.active_interviews,
            participants = stats.participants,
            connections = self.connections.len(),
            "Interview server statistics"
        );
    }
}

async fn run(mut receiver: mpsc::UnboundedReceiver<HubCommand>, config: InterviewConfig) {
    let max_age = chrono::Duration::from_std(config.participant_max_age)
        .unwrap_or_else(|_| chrono::Duration::hours(1));

    let mut state = HubState {
        coordinator: InterviewCoordinator::new(),
        connections: HashMap::new(),
        max_age,
    };

    let sweep_period = non_zero(config.sweep_interval);
    let stats_period = non_zero(config.stats_interval);
    let mut sweep_timer = interval_at(Instant::now() + sweep_period, sweep_period);
    let mut stats_timer = interval_at(Instant::now() + stats_period, stats_period);
    sweep_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    stats_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tracing::info!(
        sweep_interval_secs = sweep_period.as_secs(),
        max_age_secs = config.participant_max_age.as_secs(),
        "Interview hub started"
    );

    loop {
        tokio::select! {
            command = receiver.recv() => match command {
                Some(command) => state.apply(command),
                None => break,
            },
            _ = sweep_timer.tick() => state.apply(HubCommand::Sweep),
            _ = stats_timer.tick() => state.log_stats(),
        }
    }

    tracing::info!("Interview hub stopped");
}

fn non_zero(period: Duration) -> Duration {
    if period.is_zero() {
        Duration::from_secs(1)
    } else {
        period
    }
}
