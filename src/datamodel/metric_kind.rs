use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Which family of entities a query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    Pod,
    Service,
}

impl Scope {
    pub fn throughput(self) -> MetricKind {
        match self {
            Scope::Pod => MetricKind::PodThroughput,
            Scope::Service => MetricKind::ServiceThroughput,
        }
    }

    pub fn latency(self) -> MetricKind {
        match self {
            Scope::Pod => MetricKind::PodLatency,
            Scope::Service => MetricKind::ServiceLatency,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Scope::Pod => "pod",
            Scope::Service => "service",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pod" => Ok(Scope::Pod),
            "service" | "svc" => Ok(Scope::Service),
            _ => Err(format!("Unknown scope: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    PodThroughput,
    PodLatency,
    ServiceThroughput,
    ServiceLatency,
}

impl MetricKind {
    pub const ALL: [MetricKind; 4] = [
        MetricKind::PodThroughput,
        MetricKind::PodLatency,
        MetricKind::ServiceThroughput,
        MetricKind::ServiceLatency,
    ];

    pub fn scope(self) -> Scope {
        match self {
            MetricKind::PodThroughput | MetricKind::PodLatency => Scope::Pod,
            MetricKind::ServiceThroughput | MetricKind::ServiceLatency => Scope::Service,
        }
    }

    pub fn is_throughput(self) -> bool {
        matches!(
            self,
            MetricKind::PodThroughput | MetricKind::ServiceThroughput
        )
    }

    pub fn is_latency(self) -> bool {
        !self.is_throughput()
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MetricKind::PodThroughput => "Pod QPS",
            MetricKind::PodLatency => "Pod Latency",
            MetricKind::ServiceThroughput => "Service QPS",
            MetricKind::ServiceLatency => "Service Latency",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_kinds() {
        assert_eq!(Scope::Pod.throughput(), MetricKind::PodThroughput);
        assert_eq!(Scope::Pod.latency(), MetricKind::PodLatency);
        assert_eq!(Scope::Service.throughput(), MetricKind::ServiceThroughput);
        assert_eq!(Scope::Service.latency(), MetricKind::ServiceLatency);

        for kind in MetricKind::ALL {
            let scope = kind.scope();
            if kind.is_throughput() {
                assert_eq!(scope.throughput(), kind);
            } else {
                assert_eq!(scope.latency(), kind);
            }
        }
    }

    #[test]
    fn test_scope_from_str() {
        assert_eq!("pod".parse::<Scope>().unwrap(), Scope::Pod);
        assert_eq!("Service".parse::<Scope>().unwrap(), Scope::Service);
        assert_eq!("svc".parse::<Scope>().unwrap(), Scope::Service);
        assert!("node".parse::<Scope>().is_err());
    }
}
