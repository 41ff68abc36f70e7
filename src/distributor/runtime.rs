//! Composition root.
//!
//! One [`FeedRuntime`] per process hands out the single [`EventDistributor`].
//! Construction is lazy: nothing touches the transport until the first
//! [`get_instance`](FeedRuntime::get_instance).

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::classifier::{OtherEventRouter, TrackedIdentities};
use crate::config::FeedConfig;
use crate::error::FeedResult;
use crate::store::{ChatEventStore, OtherEventStore, StatsEventStore};
use crate::transport::Transport;

use super::callbacks::CallbackSet;
use super::manager::EventDistributor;

/// Reference stores sized from [`FeedConfig::queues`].
#[allow(missing_docs)]
#[derive(Debug, Clone)]
pub struct FeedStores {
    pub chat: Arc<ChatEventStore>,
    pub other: Arc<OtherEventStore>,
    pub stats: Arc<StatsEventStore>,
}

impl FeedStores {
    /// A callback set feeding these stores.
    #[must_use]
    pub fn callbacks(&self) -> CallbackSet {
        CallbackSet::from_stores(
            Arc::clone(&self.chat),
            Arc::clone(&self.other),
            Arc::clone(&self.stats),
        )
    }
}

/// Owns configuration, the transport and the lazily-built distributor.
pub struct FeedRuntime {
    config: FeedConfig,
    transport: Arc<dyn Transport>,
    tracked: TrackedIdentities,
    instance: OnceLock<Arc<EventDistributor>>,
}

impl FeedRuntime {
    /// Validate `config` and prepare the runtime.
    ///
    /// # Errors
    /// `FeedError::Config` if validation fails.
    pub fn new(config: FeedConfig, transport: Arc<dyn Transport>) -> FeedResult<Self> {
        config.validate()?;
        let tracked = TrackedIdentities::from_iter(config.tracked_users.iter().cloned());
        Ok(Self {
            config,
            transport,
            tracked,
            instance: OnceLock::new(),
        })
    }

    /// The process-wide distributor. Every call returns the same instance.
    #[must_use]
    pub fn get_instance(&self) -> Arc<EventDistributor> {
        let instance = self.instance.get_or_init(|| {
            tracing::debug!("constructing event distributor");
            let router = OtherEventRouter::with_conditions(self.config.routing.clone(), self.tracked.clone());
            Arc::new(EventDistributor::new(
                Arc::clone(&self.transport),
                self.config.channels.clone(),
                router,
            ))
        });
        Arc::clone(instance)
    }

    /// The tracked-identity set shared with the router.
    #[must_use]
    pub const fn tracked_identities(&self) -> &TrackedIdentities {
        &self.tracked
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Fresh reference stores sized from the config.
    #[must_use]
    pub fn build_stores(&self) -> FeedStores {
        let q = &self.config.queues;
        FeedStores {
            chat: Arc::new(ChatEventStore::new(q.chat_capacity)),
            other: Arc::new(OtherEventStore::new(q.other_capacity)),
            stats: Arc::new(StatsEventStore::new(q.series_capacity)),
        }
    }
}

impl fmt::Debug for FeedRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedRuntime")
            .field("config", &self.config)
            .field("tracked", &self.tracked.len())
            .field("constructed", &self.instance.get().is_some())
            .finish_non_exhaustive()
    }
}
