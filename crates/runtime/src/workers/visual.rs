//! Visual worker that plays transition requests and reports completions.
//!
//! Each request is played on its own task so simultaneous mob actions
//! animate together. Completions go back to the simulation worker over the
//! command channel, through a weak sender so the worker never keeps the
//! simulation alive on its own.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::simulation::Command;
use crate::api::VisualDriver;
use crate::events::VisualEvent;

pub struct VisualWorker {
    driver: Arc<dyn VisualDriver>,
    visual_rx: mpsc::UnboundedReceiver<VisualEvent>,
    command_tx: mpsc::WeakSender<Command>,
}

impl VisualWorker {
    pub fn new(
        driver: Arc<dyn VisualDriver>,
        visual_rx: mpsc::UnboundedReceiver<VisualEvent>,
        command_tx: mpsc::WeakSender<Command>,
    ) -> Self {
        Self {
            driver,
            visual_rx,
            command_tx,
        }
    }

    /// Main worker loop. Ends when the simulation worker drops its sender.
    pub async fn run(mut self) {
        while let Some(event) = self.visual_rx.recv().await {
            let driver = Arc::clone(&self.driver);
            let command_tx = self.command_tx.clone();

            tokio::spawn(async move {
                trace!(
                    target: "runtime::visual",
                    id = %event.request.id,
                    kind = event.request.kind.as_str(),
                    actor = %event.request.actor,
                    "playing"
                );
                driver.play(&event.request).await;

                let Some(command_tx) = command_tx.upgrade() else {
                    return;
                };
                let completion = Command::CompleteTransition {
                    session: event.session,
                    id: event.request.id,
                };
                if command_tx.send(completion).await.is_err() {
                    debug!(target: "runtime::visual", "simulation worker gone; completion dropped");
                }
            });
        }

        debug!(target: "runtime::visual", "visual worker stopped");
    }
}
