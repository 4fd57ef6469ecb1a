//! Typed resource records returned by the API layer.

use std::fmt;

use chrono::{DateTime, Utc};

/// Kind of resource a [`ResourceRef`] points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Instance,
    Cluster,
    NodePool,
}

impl ResourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Instance => "instance",
            ResourceKind::Cluster => "cluster",
            ResourceKind::NodePool => "node pool",
        }
    }
}

/// Reference to a single resource, enough to address it in an API call.
///
/// Node pools live inside a cluster, so their `parent` carries the cluster id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRef {
    pub kind: ResourceKind,
    pub id: String,
    pub name: String,
    pub parent: Option<String>,
}

impl ResourceRef {
    pub fn new(kind: ResourceKind, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            name: name.into(),
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.label(), self.name)
    }
}

/// Power actions the API can run against an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceAction {
    Reboot,
    Stop,
    Start,
}

impl ResourceAction {
    pub fn label(&self) -> &'static str {
        match self {
            ResourceAction::Reboot => "Reboot",
            ResourceAction::Stop => "Stop",
            ResourceAction::Start => "Start",
        }
    }

    /// Identifier used on the wire
    pub fn id(&self) -> &'static str {
        match self {
            ResourceAction::Reboot => "reboot",
            ResourceAction::Stop => "stop",
            ResourceAction::Start => "start",
        }
    }
}

/// How a cluster picks up new Kubernetes releases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UpdatePolicy {
    Automatic,
    #[default]
    Manual,
    MaintenanceWindow,
}

impl UpdatePolicy {
    pub const ALL: [UpdatePolicy; 3] = [
        UpdatePolicy::Automatic,
        UpdatePolicy::Manual,
        UpdatePolicy::MaintenanceWindow,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            UpdatePolicy::Automatic => "Automatic",
            UpdatePolicy::Manual => "Manual",
            UpdatePolicy::MaintenanceWindow => "Maintenance window",
        }
    }
}

impl fmt::Display for UpdatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Node counts submitted when scaling a node pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleRequest {
    pub desired: u32,
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub id: String,
    pub name: String,
    /// Flavor / machine size, e.g. `g3.small`
    pub size: String,
    pub region: String,
    pub status: String,
    pub public_ip: Option<String>,
    pub private_ip: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Instance {
    pub fn resource_ref(&self) -> ResourceRef {
        ResourceRef::new(ResourceKind::Instance, &self.id, &self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub id: String,
    pub name: String,
    pub region: String,
    /// Kubernetes version currently running
    pub version: String,
    pub status: String,
    pub node_count: u32,
    pub update_policy: UpdatePolicy,
    pub created_at: DateTime<Utc>,
}

impl Cluster {
    pub fn resource_ref(&self) -> ResourceRef {
        ResourceRef::new(ResourceKind::Cluster, &self.id, &self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodePool {
    pub id: String,
    pub cluster_id: String,
    pub name: String,
    pub size: String,
    pub node_count: u32,
    pub min_nodes: u32,
    pub max_nodes: u32,
    pub autoscaling: bool,
    pub status: String,
}

impl NodePool {
    pub fn resource_ref(&self) -> ResourceRef {
        ResourceRef::new(ResourceKind::NodePool, &self.id, &self.name)
            .with_parent(&self.cluster_id)
    }
}

/// Compare dotted version strings numerically (`1.29.10` > `1.29.9`).
///
/// A leading `v` and any pre-release / build suffix are ignored.
pub fn version_is_newer(candidate: &str, current: &str) -> bool {
    fn parts(v: &str) -> Vec<u64> {
        v.trim_start_matches('v')
            .split(['-', '+'])
            .next()
            .unwrap_or_default()
            .split('.')
            .map(|p| p.parse().unwrap_or(0))
            .collect()
    }
    let (mut a, mut b) = (parts(candidate), parts(current));
    // "1.30" and "1.30.0" are the same release
    let len = a.len().max(b.len());
    a.resize(len, 0);
    b.resize(len, 0);
    a > b
}
