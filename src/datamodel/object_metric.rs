use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::hash_map;
use std::fmt;

/// Latency and request rate of one pod or service.
///
/// Both fields start at zero. The merge rules only ever raise them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectMetric {
    #[serde(rename = "response_time", default)]
    pub latency: f64,
    #[serde(rename = "req_per_second", default)]
    pub requests_per_second: f64,
}

impl ObjectMetric {
    pub fn new(latency: f64, requests_per_second: f64) -> Self {
        Self {
            latency,
            requests_per_second,
        }
    }
}

impl fmt::Display for ObjectMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "latency={:.5}, rps={:.5}",
            self.latency, self.requests_per_second
        )
    }
}

/// Identifier to metric mapping, serialized as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricSet(HashMap<String, ObjectMetric>);

impl MetricSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the entry for `uid`.
    pub fn add_metric(&mut self, uid: impl Into<String>, latency: f64, rps: f64) {
        self.0.insert(uid.into(), ObjectMetric::new(latency, rps));
    }

    /// Creates the entry with `rps = 0` or raises its latency to `latency`.
    pub fn add_or_set_latency(&mut self, uid: &str, latency: f64) {
        match self.0.get_mut(uid) {
            Some(obj) => {
                if obj.latency < latency {
                    obj.latency = latency;
                }
            }
            None => self.add_metric(uid, latency, 0.0),
        }
    }

    /// Creates the entry with `latency = 0` or raises its request rate to `rps`.
    pub fn add_or_set_rps(&mut self, uid: &str, rps: f64) {
        match self.0.get_mut(uid) {
            Some(obj) => {
                if obj.requests_per_second < rps {
                    obj.requests_per_second = rps;
                }
            }
            None => self.add_metric(uid, 0.0, rps),
        }
    }

    pub fn get(&self, uid: &str) -> Option<&ObjectMetric> {
        self.0.get(uid)
    }

    pub fn contains(&self, uid: &str) -> bool {
        self.0.contains_key(uid)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, ObjectMetric> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl IntoIterator for MetricSet {
    type Item = (String, ObjectMetric);
    type IntoIter = hash_map::IntoIter<String, ObjectMetric>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, ObjectMetric)> for MetricSet {
    fn from_iter<T: IntoIterator<Item = (String, ObjectMetric)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for MetricSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "size = {}", self.0.len())?;
        for (uid, metric) in &self.0 {
            writeln!(f, "{}, uid={}", metric, uid)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_keeps_maximum() {
        let mut set = MetricSet::new();
        set.add_or_set_latency("a", 0.1);
        set.add_or_set_latency("a", 0.05);
        assert_eq!(set.get("a").unwrap().latency, 0.1);
        assert_eq!(set.get("a").unwrap().requests_per_second, 0.0);

        set.add_or_set_latency("a", 0.3);
        assert_eq!(set.get("a").unwrap().latency, 0.3);
    }

    #[test]
    fn test_replayed_value_is_idempotent() {
        let mut set = MetricSet::new();
        set.add_or_set_rps("a", 12.5);
        set.add_or_set_rps("a", 12.5);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("a").unwrap().requests_per_second, 12.5);
    }

    #[test]
    fn test_latency_and_rps_share_entry() {
        let mut set = MetricSet::new();
        set.add_or_set_rps("a", 3.0);
        set.add_or_set_latency("a", 0.2);
        assert_eq!(set.get("a"), Some(&ObjectMetric::new(0.2, 3.0)));
    }

    #[test]
    fn test_json_round_trip() {
        let mut set = MetricSet::new();
        set.add_metric("o1", 0.1, 10.0);
        set.add_metric("o2", 0.01, 12.5);

        let json = serde_json::to_string(&set).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["o1"]["response_time"], 0.1);
        assert_eq!(value["o2"]["req_per_second"], 12.5);

        let decoded: MetricSet = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, set);
    }

    #[test]
    fn test_non_finite_values_do_not_round_trip() {
        // Only finite values may reach a served set.
        let mut set = MetricSet::new();
        set.add_metric("default/a", f64::INFINITY, 1.0);

        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"default/a":{"response_time":null,"req_per_second":1.0}}"#);
        assert!(serde_json::from_str::<MetricSet>(&json).is_err());
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let decoded: MetricSet =
            serde_json::from_str(r#"{"default/a":{"req_per_second":4.0}}"#).unwrap();
        assert_eq!(decoded.get("default/a"), Some(&ObjectMetric::new(0.0, 4.0)));
    }

    #[test]
    fn test_display() {
        let mut set = MetricSet::new();
        set.add_metric("default/a", 0.5, 2.0);
        assert_eq!(
            set.to_string(),
            "size = 1\nlatency=0.50000, rps=2.00000, uid=default/a\n"
        );
    }
}
