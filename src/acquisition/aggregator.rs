use super::getter::EntityMetricGetter;
use crate::backend::QueryExecutor;
use crate::datamodel::EntityMetric;
use crate::error::MetricError;
use futures::future::join_all;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error};

/// Registry of entity getters, queried together.
#[derive(Debug)]
pub struct Aggregator {
    executor: Arc<dyn QueryExecutor>,
    getters: BTreeMap<String, Box<dyn EntityMetricGetter>>,
}

impl Aggregator {
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self {
            executor,
            getters: BTreeMap::new(),
        }
    }

    /// Registers `getter` under its name. A second getter with the same
    /// name is refused.
    pub fn add_getter(&mut self, getter: Box<dyn EntityMetricGetter>) -> bool {
        let name = getter.name().to_string();
        if self.getters.contains_key(&name) {
            error!("Entity getter {} is already registered", name);
            return false;
        }
        debug!("Registered entity getter {} ({})", name, getter.category());
        self.getters.insert(name, getter);
        true
    }

    pub fn getter_names(&self) -> Vec<&str> {
        self.getters.keys().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.getters.is_empty()
    }

    /// Entities of every getter, in getter name order. Getters run
    /// concurrently.
    ///
    /// A failing getter is logged and skipped. The call fails only when
    /// every getter fails.
    pub async fn entity_metrics(&self) -> Result<Vec<EntityMetric>, MetricError> {
        let results = join_all(self.getters.iter().map(|(name, getter)| async move {
            (name, getter.fetch(self.executor.as_ref()).await)
        }))
        .await;

        let mut entities = Vec::new();
        let mut failures = Vec::new();
        for (name, result) in results {
            match result {
                Ok(mut fetched) => entities.append(&mut fetched),
                Err(err) => {
                    error!("Failed to get entities from {}: {}", name, err);
                    failures.push(name.as_str());
                }
            }
        }

        if !self.getters.is_empty() && failures.len() == self.getters.len() {
            return Err(MetricError::AllFetchesFailed(failures.join(", ")));
        }
        Ok(entities)
    }
}
