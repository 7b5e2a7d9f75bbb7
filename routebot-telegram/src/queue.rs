//! Per-user serial queues in front of the handler chain.
//!
//! Every inbound event of one user goes through one unbounded channel consumed by one worker task,
//! so a user's session is never mutated by two events at once. Different users run concurrently.

use handler_chain::HandlerChain;
use routebot_core::Message;
use tokio::sync::mpsc;
use tracing::{error, info};

type QueueSender = mpsc::UnboundedSender<Message>;

/// Destination of converted inbound events (polling and webhook both submit here).
pub trait InboundSink: Send + Sync {
    fn submit(&self, message: Message);
}

pub struct UserQueues {
    chain: HandlerChain,
    message_queues: dashmap::DashMap<i64, QueueSender>,
}

impl UserQueues {
    pub fn new(chain: HandlerChain) -> Self {
        Self {
            chain,
            message_queues: dashmap::DashMap::new(),
        }
    }

    /// Number of users with a live worker.
    pub fn active_users(&self) -> usize {
        self.message_queues.len()
    }

    fn spawn_queue(&self, user_id: i64) -> QueueSender {
        let (tx, rx) = mpsc::unbounded_channel::<Message>();
        tokio::spawn(Self::process_queue_loop(rx, self.chain.clone(), user_id));
        tx
    }

    async fn process_queue_loop(
        mut rx: mpsc::UnboundedReceiver<Message>,
        chain: HandlerChain,
        user_id: i64,
    ) {
        while let Some(message) = rx.recv().await {
            info!(
                user_id,
                chat_id = message.chat.id,
                message_id = %message.id,
                "step: processing message (handler chain started)"
            );
            if let Err(e) = chain.handle(&message).await {
                error!(error = %e, user_id, "Handler chain failed");
            }
        }
    }
}

impl InboundSink for UserQueues {
    fn submit(&self, message: Message) {
        let user_id = message.user.id;
        let tx = self
            .message_queues
            .entry(user_id)
            .or_insert_with(|| self.spawn_queue(user_id))
            .clone();

        if let Err(mpsc::error::SendError(message)) = tx.send(message) {
            // Worker gone (runtime shutting down or it panicked); start a fresh one.
            error!(user_id, "User queue closed, restarting worker");
            let tx = self.spawn_queue(user_id);
            let _ = tx.send(message);
            self.message_queues.insert(user_id, tx);
        }
    }
}
