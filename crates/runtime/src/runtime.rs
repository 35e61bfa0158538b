//! High-level runtime orchestrator.
//!
//! The runtime owns background workers, wires up command/event channels, and
//! exposes a builder-based API for clients to drive the simulation.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;

use game_core::{GameConfig, Observables};

use crate::api::{InstantDriver, Result, RuntimeError, RuntimeHandle, VisualDriver};
use crate::events::{Event, EventBus, Topic};
use crate::workers::{Command, SimulationWorker, VisualWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Seed of the session started at build time.
    pub seed: u64,
    /// How often the session clock advances.
    pub clock_interval: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            event_buffer_size: 256,
            command_buffer_size: 32,
            seed: 0,
            clock_interval: Duration::from_millis(100),
        }
    }
}

/// Main runtime that hosts one crypt session at a time.
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    sim_worker_handle: JoinHandle<()>,
    visual_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to events of one topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Shutdown the runtime gracefully
    ///
    /// Workers stop once every clone of the handle has been dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;
        self.visual_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    driver: Option<Arc<dyn VisualDriver>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            driver: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed of the first session
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Set the visual driver (default: [`InstantDriver`])
    pub fn driver(mut self, driver: impl VisualDriver + 'static) -> Self {
        self.driver = Some(Arc::new(driver));
        self
    }

    /// Build the runtime and start its workers.
    ///
    /// Must be called from within a tokio runtime.
    pub fn build(self) -> Runtime {
        let RuntimeConfig {
            game_config,
            event_buffer_size,
            command_buffer_size,
            seed,
            clock_interval,
        } = self.config;

        let (command_tx, command_rx) = mpsc::channel::<Command>(command_buffer_size.max(1));
        let (visual_tx, visual_rx) = mpsc::unbounded_channel();
        let event_bus = EventBus::with_capacity(event_buffer_size);
        let (observables_tx, observables_rx) = watch::channel(Observables::default());

        let sim_worker = SimulationWorker::new(
            game_config,
            seed,
            command_rx,
            visual_tx,
            event_bus.clone(),
            observables_tx,
            clock_interval,
        );

        let driver = self
            .driver
            .unwrap_or_else(|| Arc::new(InstantDriver) as Arc<dyn VisualDriver>);
        let visual_worker = VisualWorker::new(driver, visual_rx, command_tx.downgrade());

        let handle = RuntimeHandle::new(command_tx, event_bus, observables_rx);

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });
        let visual_worker_handle = tokio::spawn(async move {
            visual_worker.run().await;
        });

        Runtime {
            handle,
            sim_worker_handle,
            visual_worker_handle,
        }
    }
}
