use super::getter::{EntityMetricGetter, IstioEntityGetter};
use crate::datamodel::Scope;
use crate::query::MetricQuery;
use anyhow::{Result, bail};

pub const ISTIO_PODS: &str = "Istio";
pub const ISTIO_SERVICES: &str = "Istio.VApp";

/// Creates entity getters from their configured category.
#[derive(Debug, Clone, Default)]
pub struct GetterFactory {
    query: MetricQuery,
}

impl GetterFactory {
    pub fn new(query: MetricQuery) -> Self {
        Self { query }
    }

    pub fn create(&self, category: &str, name: &str) -> Result<Box<dyn EntityMetricGetter>> {
        Ok(match category {
            ISTIO_PODS => Box::new(IstioEntityGetter::new(name, Scope::Pod, self.query.clone())),
            ISTIO_SERVICES => Box::new(IstioEntityGetter::new(
                name,
                Scope::Service,
                self.query.clone(),
            )),
            other => bail!("Unknown entity getter category: {}", other),
        })
    }
}
