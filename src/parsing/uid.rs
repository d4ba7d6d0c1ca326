//! Canonical `<namespace>/<name>` keys from backend identifiers.
//!
//! Pods are reported as container runtime URIs (`kubernetes://<pod>.<namespace>`),
//! services as DNS names (`<service>.<namespace>.svc.cluster.local`).

use crate::datamodel::Scope;
use crate::error::MetricError;
use tracing::{debug, warn};

pub const K8S_PREFIX: &str = "kubernetes://";
pub const UNKNOWN_SERVICE: &str = "unknown";

/// Normalizes `uid` with the grammar of the given scope.
pub fn normalize_uid(scope: Scope, uid: &str) -> Result<String, MetricError> {
    match scope {
        Scope::Pod => convert_pod_uid(uid),
        Scope::Service => convert_service_uid(uid),
    }
}

/// `"kubernetes://video-671194421-vpxkh.default"` becomes `"default/video-671194421-vpxkh"`.
pub fn convert_pod_uid(uid: &str) -> Result<String, MetricError> {
    let rest = uid
        .strip_prefix(K8S_PREFIX)
        .ok_or_else(|| MetricError::malformed(uid, format!("Not start with {}", K8S_PREFIX)))?;

    let items: Vec<&str> = rest.split('.').collect();
    if items.len() < 2 {
        return Err(MetricError::malformed(
            uid,
            format!("Not enough fields: {}", rest),
        ));
    }
    if items.len() > 2 {
        warn!("expected 2, got {} for: {}", items.len(), rest);
    }

    let name = items[0].trim();
    let namespace = items[1].trim();
    if name.is_empty() || namespace.is_empty() {
        return Err(MetricError::malformed(
            uid,
            format!("Invalid fields: {}/{}", name, namespace),
        ));
    }

    Ok(format!("{}/{}", namespace, name))
}

/// `"productpage.default.svc.cluster.local"` becomes `"default/productpage"`.
///
/// The backend reports requests to an unresolved destination as `"unknown"`,
/// either alone or as the service name.
pub fn convert_service_uid(uid: &str) -> Result<String, MetricError> {
    if uid == UNKNOWN_SERVICE {
        return Err(MetricError::UnknownIdentifier);
    }

    let items: Vec<&str> = uid.split('.').map(str::trim).collect();
    if items.len() < 3 {
        let err = MetricError::malformed(
            uid,
            format!("Not enough fields {} Vs. 3", items.len()),
        );
        debug!("{}", err);
        return Err(err);
    }

    if items[2] != "svc" {
        let err = MetricError::malformed(uid, format!("fields[2] should be [svc]: [{}]", items[2]));
        debug!("{}", err);
        return Err(err);
    }

    let (name, namespace) = (items[0], items[1]);
    if name.is_empty() || namespace.is_empty() {
        let err = MetricError::malformed(uid, format!("Invalid fields: {}/{}", name, namespace));
        debug!("{}", err);
        return Err(err);
    }
    if name == UNKNOWN_SERVICE {
        return Err(MetricError::UnknownIdentifier);
    }

    Ok(format!("{}/{}", namespace, name))
}
