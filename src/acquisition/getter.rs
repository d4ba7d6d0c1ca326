use super::acquirer::fetch_scope_series;
use crate::aggregation::EntityMerger;
use crate::backend::QueryExecutor;
use crate::datamodel::{EntityMetric, EntityType, Scope};
use crate::error::MetricError;
use crate::query::MetricQuery;
use async_trait::async_trait;
use std::fmt::Debug;
use tracing::debug;

pub const CATEGORY_APPLICATION: &str = "Istio.Application";
pub const CATEGORY_VIRTUAL_APPLICATION: &str = "Istio.VirtualApplication";

/// A named source of [`EntityMetric`]s.
#[async_trait]
pub trait EntityMetricGetter: Send + Sync + Debug {
    async fn fetch(&self, executor: &dyn QueryExecutor) -> Result<Vec<EntityMetric>, MetricError>;

    fn name(&self) -> &str;

    fn category(&self) -> &str;
}

/// Istio mesh entities of one scope: pods are applications, services are
/// virtual applications.
#[derive(Debug, Clone)]
pub struct IstioEntityGetter {
    name: String,
    scope: Scope,
    query: MetricQuery,
    merger: EntityMerger,
}

impl IstioEntityGetter {
    pub fn new(name: impl Into<String>, scope: Scope, query: MetricQuery) -> Self {
        let (entity_type, category) = match scope {
            Scope::Pod => (EntityType::Application, CATEGORY_APPLICATION),
            Scope::Service => (EntityType::VirtualApplication, CATEGORY_VIRTUAL_APPLICATION),
        };
        Self {
            name: name.into(),
            scope,
            query,
            merger: EntityMerger::new(scope, entity_type, category),
        }
    }

    pub fn pods(name: impl Into<String>, query: MetricQuery) -> Self {
        Self::new(name, Scope::Pod, query)
    }

    pub fn services(name: impl Into<String>, query: MetricQuery) -> Self {
        Self::new(name, Scope::Service, query)
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }
}

#[async_trait]
impl EntityMetricGetter for IstioEntityGetter {
    async fn fetch(&self, executor: &dyn QueryExecutor) -> Result<Vec<EntityMetric>, MetricError> {
        let (tps, latency) = fetch_scope_series(executor, &self.query, self.scope).await?;
        let entities = self.merger.merge(tps, latency);
        debug!("{}: {} entities", self.name, entities.len());
        Ok(entities)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> &str {
        match self.scope {
            Scope::Pod => CATEGORY_APPLICATION,
            Scope::Service => CATEGORY_VIRTUAL_APPLICATION,
        }
    }
}
