use crate::protocol::ServerMessage;
use crate::state::AppState;
use crate::types::PresenceCounts;
use tokio::sync::broadcast;

impl AppState {
    /// Send a message to every connected client
    pub fn broadcast_to_all(&self, msg: ServerMessage) {
        // Ignore send errors (no receivers connected is fine)
        let _ = self.broadcast.send(msg);
    }

    /// Broadcast the current presence counts
    pub fn broadcast_presence(&self, counts: PresenceCounts) {
        self.broadcast_to_all(counts.into());
    }

    /// Tick callback for the discussion countdown: publishes every tick
    /// without touching the engine.
    pub fn countdown_ticker(&self) -> impl Fn(u32) + Send + 'static {
        let tx: broadcast::Sender<ServerMessage> = self.broadcast.clone();
        move |remaining| {
            if remaining % 60 == 0 {
                tracing::debug!("Countdown at {}s", remaining);
            }
            let _ = tx.send(ServerMessage::CountdownUpdate { remaining });
        }
    }
}
