use crate::datamodel::entity_metric::{
    LABEL_CATEGORY, LABEL_IP, LABEL_NAME, METRIC_LATENCY, METRIC_TPS,
};
use crate::datamodel::{EntityMetric, EntityType, RawSeries, Scope};
use crate::parsing::destination_ip::parse_destination_ip;
use crate::parsing::uid::normalize_uid;
use std::collections::BTreeMap;
use tracing::{debug, trace};

pub const DESTINATION_IP: &str = "destination_ip";

/// Builds [`EntityMetric`]s from throughput and latency series of one scope.
///
/// Unlike the [`MetricSet`](crate::datamodel::MetricSet) path, a repeated
/// identifier overwrites the previous value.
#[derive(Debug, Clone)]
pub struct EntityMerger {
    scope: Scope,
    entity_type: EntityType,
    category: String,
}

impl EntityMerger {
    pub fn new(scope: Scope, entity_type: EntityType, category: impl Into<String>) -> Self {
        Self {
            scope,
            entity_type,
            category: category.into(),
        }
    }

    /// Throughput series create entities, latency series are merged into
    /// them. Latency-only entities are kept.
    pub fn merge(
        &self,
        tps: impl IntoIterator<Item = RawSeries>,
        latency: impl IntoIterator<Item = RawSeries>,
    ) -> Vec<EntityMetric> {
        let mut entities: BTreeMap<String, EntityMetric> = BTreeMap::new();

        for series in tps {
            let Some(uid) = self.canonical_uid(&series) else {
                continue;
            };
            let mut entity = self.new_entity(&uid, &series);
            entity.set_metric(METRIC_TPS, series.value);
            trace!("uid={}, {:?}", uid, entity);
            entities.insert(uid, entity);
        }

        for series in latency {
            let Some(uid) = self.canonical_uid(&series) else {
                continue;
            };
            let entity = entities.entry(uid).or_insert_with_key(|uid| {
                debug!("Some entity does not have TPS metric: {}", uid);
                self.new_entity(uid, &series)
            });
            entity.set_metric(METRIC_LATENCY, series.value);
        }

        debug!("{} {} entities merged", entities.len(), self.scope);
        entities.into_values().collect()
    }

    fn canonical_uid(&self, series: &RawSeries) -> Option<String> {
        match normalize_uid(self.scope, &series.identifier) {
            Ok(uid) => Some(uid),
            Err(err) => {
                debug!("Failed to parse UID({}): {}", series.identifier, err);
                None
            }
        }
    }

    fn new_entity(&self, uid: &str, series: &RawSeries) -> EntityMetric {
        let mut entity = EntityMetric::new(uid, self.entity_type);
        for (name, value) in &series.labels {
            entity.set_label(name, value);
        }
        entity.set_label(LABEL_NAME, uid);

        if let Some(raw) = series.labels.get(DESTINATION_IP) {
            match parse_destination_ip(raw) {
                Ok(ip) => entity.set_label(LABEL_IP, ip),
                Err(err) => debug!("Failed to parse IP({}): {}", raw, err),
            }
        }

        entity.set_label(LABEL_CATEGORY, self.category.as_str());
        entity
    }
}
