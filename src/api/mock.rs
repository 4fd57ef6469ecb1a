//! Mock cloud backend
//!
//! Keeps every resource in memory and applies mutations to it, so the
//! browser behaves like it would against a real provider. Used by the demo
//! binary and by tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use parking_lot::Mutex;

use super::{
    ApiError, ApiResult, CloudApi, Cluster, Instance, NodePool, ResourceAction, ResourceKind,
    ResourceRef, ScaleRequest, UpdatePolicy,
};

#[derive(Debug, Default)]
struct MockState {
    instances: Vec<Instance>,
    clusters: Vec<Cluster>,
    node_pools: HashMap<String, Vec<NodePool>>,
    versions: Vec<String>,
    /// Every call made, as `method:argument` (for assertions)
    calls: Vec<String>,
    /// Error returned by the next call, then cleared
    fail_next: Option<ApiError>,
}

/// In-memory [`CloudApi`] implementation
#[derive(Clone, Default)]
pub struct MockCloud {
    state: Arc<Mutex<MockState>>,
    latency: Duration,
}

impl MockCloud {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend seeded with a handful of instances, two clusters and their pools
    pub fn demo() -> Self {
        let created = Utc
            .with_ymd_and_hms(2024, 3, 14, 9, 30, 0)
            .single()
            .unwrap_or_else(Utc::now);

        let instances = vec![
            demo_instance("i-7f3a", "web-1", "g3.small", "LON1", "ACTIVE", created),
            demo_instance("i-8c1d", "web-2", "g3.small", "LON1", "ACTIVE", created),
            demo_instance("i-9e42", "db-primary", "g3.large", "NYC1", "ACTIVE", created),
            demo_instance("i-a0b7", "batch-worker", "g3.xlarge", "FRA1", "SHUTOFF", created),
            demo_instance("i-b5c9", "bastion", "g3.xsmall", "LON1", "ACTIVE", created),
        ];

        let clusters = vec![
            Cluster {
                id: "k8s-prod".into(),
                name: "production".into(),
                region: "LON1".into(),
                version: "1.28.7".into(),
                status: "ACTIVE".into(),
                node_count: 5,
                update_policy: UpdatePolicy::MaintenanceWindow,
                created_at: created,
            },
            Cluster {
                id: "k8s-stage".into(),
                name: "staging".into(),
                region: "FRA1".into(),
                version: "1.30.2".into(),
                status: "ACTIVE".into(),
                node_count: 2,
                update_policy: UpdatePolicy::Automatic,
                created_at: created,
            },
        ];

        let mut node_pools = HashMap::new();
        node_pools.insert(
            "k8s-prod".to_string(),
            vec![
                demo_pool("np-a1", "k8s-prod", "general", "g4s.kube.medium", 3, 1, 6),
                demo_pool("np-a2", "k8s-prod", "highmem", "g4m.kube.large", 2, 2, 4),
            ],
        );
        node_pools.insert(
            "k8s-stage".to_string(),
            vec![demo_pool("np-b1", "k8s-stage", "general", "g4s.kube.small", 2, 1, 3)],
        );

        let versions = ["1.28.7", "1.29.5", "1.30.2"]
            .into_iter()
            .map(String::from)
            .collect();

        Self::new().with_state(instances, clusters, node_pools, versions)
    }

    fn with_state(
        self,
        instances: Vec<Instance>,
        clusters: Vec<Cluster>,
        node_pools: HashMap<String, Vec<NodePool>>,
        versions: Vec<String>,
    ) -> Self {
        {
            let mut state = self.state.lock();
            state.instances = instances;
            state.clusters = clusters;
            state.node_pools = node_pools;
            state.versions = versions;
        }
        self
    }

    /// Delay every call by `latency`, to make loading states visible
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn set_instances(&self, instances: Vec<Instance>) {
        self.state.lock().instances = instances;
    }

    pub fn set_versions(&self, versions: Vec<String>) {
        self.state.lock().versions = versions;
    }

    /// Make the next call fail with `error`
    pub fn fail_next(&self, error: ApiError) {
        self.state.lock().fail_next = Some(error);
    }

    /// All calls made so far, oldest first
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().calls.clone()
    }

    pub fn last_call(&self) -> Option<String> {
        self.state.lock().calls.last().cloned()
    }

    async fn begin(&self, call: String) -> ApiResult<()> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let mut state = self.state.lock();
        state.calls.push(call);
        match state.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn demo_instance(
    id: &str,
    name: &str,
    size: &str,
    region: &str,
    status: &str,
    created_at: chrono::DateTime<Utc>,
) -> Instance {
    Instance {
        id: id.into(),
        name: name.into(),
        size: size.into(),
        region: region.into(),
        status: status.into(),
        public_ip: (status == "ACTIVE").then(|| format!("74.220.{}.{}", name.len(), id.len() * 7)),
        private_ip: Some(format!("192.168.1.{}", name.len() + 10)),
        created_at,
    }
}

fn demo_pool(
    id: &str,
    cluster_id: &str,
    name: &str,
    size: &str,
    nodes: u32,
    min: u32,
    max: u32,
) -> NodePool {
    NodePool {
        id: id.into(),
        cluster_id: cluster_id.into(),
        name: name.into(),
        size: size.into(),
        node_count: nodes,
        min_nodes: min,
        max_nodes: max,
        autoscaling: min != max,
        status: "ACTIVE".into(),
    }
}

fn not_found(resource: &ResourceRef) -> ApiError {
    ApiError::NotFound {
        kind: resource.kind.label(),
        id: resource.id.clone(),
    }
}

#[async_trait]
impl CloudApi for MockCloud {
    fn name(&self) -> &str {
        "mock"
    }

    async fn list_instances(&self) -> ApiResult<Vec<Instance>> {
        self.begin("list_instances".into()).await?;
        Ok(self.state.lock().instances.clone())
    }

    async fn list_clusters(&self) -> ApiResult<Vec<Cluster>> {
        self.begin("list_clusters".into()).await?;
        Ok(self.state.lock().clusters.clone())
    }

    async fn list_node_pools(&self, cluster_id: &str) -> ApiResult<Vec<NodePool>> {
        self.begin(format!("list_node_pools:{}", cluster_id)).await?;
        let state = self.state.lock();
        if !state.clusters.iter().any(|c| c.id == cluster_id) {
            return Err(ApiError::NotFound {
                kind: ResourceKind::Cluster.label(),
                id: cluster_id.to_string(),
            });
        }
        Ok(state.node_pools.get(cluster_id).cloned().unwrap_or_default())
    }

    async fn list_versions(&self, cluster_id: &str) -> ApiResult<Vec<String>> {
        self.begin(format!("list_versions:{}", cluster_id)).await?;
        Ok(self.state.lock().versions.clone())
    }

    async fn execute_action(
        &self,
        resource: &ResourceRef,
        action: ResourceAction,
    ) -> ApiResult<()> {
        self.begin(format!("{}:{}", action.id(), resource.id)).await?;
        let mut state = self.state.lock();
        let instance = state
            .instances
            .iter_mut()
            .find(|i| i.id == resource.id)
            .ok_or_else(|| not_found(resource))?;
        match action {
            ResourceAction::Reboot | ResourceAction::Start => instance.status = "ACTIVE".into(),
            ResourceAction::Stop => instance.status = "SHUTOFF".into(),
        }
        Ok(())
    }

    async fn scale_node_pool(&self, pool: &ResourceRef, request: ScaleRequest) -> ApiResult<()> {
        self.begin(format!(
            "scale:{}:{}/{}/{}",
            pool.id, request.desired, request.min, request.max
        ))
        .await?;
        if request.min > request.max || request.desired < request.min || request.desired > request.max
        {
            return Err(ApiError::Rejected {
                reason: "node counts out of range".into(),
            });
        }
        let mut state = self.state.lock();
        let cluster_id = pool.parent.clone().unwrap_or_default();
        let target = state
            .node_pools
            .get_mut(&cluster_id)
            .and_then(|pools| pools.iter_mut().find(|p| p.id == pool.id))
            .ok_or_else(|| not_found(pool))?;
        target.node_count = request.desired;
        target.min_nodes = request.min;
        target.max_nodes = request.max;
        target.autoscaling = request.min != request.max;

        let total: u32 = state
            .node_pools
            .get(&cluster_id)
            .map(|pools| pools.iter().map(|p| p.node_count).sum())
            .unwrap_or(0);
        if let Some(cluster) = state.clusters.iter_mut().find(|c| c.id == cluster_id) {
            cluster.node_count = total;
        }
        Ok(())
    }

    async fn set_update_policy(
        &self,
        cluster: &ResourceRef,
        policy: UpdatePolicy,
    ) -> ApiResult<()> {
        self.begin(format!("policy:{}:{}", cluster.id, policy.label()))
            .await?;
        let mut state = self.state.lock();
        let target = state
            .clusters
            .iter_mut()
            .find(|c| c.id == cluster.id)
            .ok_or_else(|| not_found(cluster))?;
        target.update_policy = policy;
        Ok(())
    }

    async fn upgrade_cluster(&self, cluster: &ResourceRef, version: &str) -> ApiResult<()> {
        self.begin(format!("upgrade:{}:{}", cluster.id, version))
            .await?;
        let mut state = self.state.lock();
        if !state.versions.iter().any(|v| v == version) {
            return Err(ApiError::Rejected {
                reason: format!("unknown version {}", version),
            });
        }
        let target = state
            .clusters
            .iter_mut()
            .find(|c| c.id == cluster.id)
            .ok_or_else(|| not_found(cluster))?;
        target.version = version.to_string();
        Ok(())
    }

    async fn delete(&self, resource: &ResourceRef) -> ApiResult<()> {
        self.begin(format!("delete:{}", resource.id)).await?;
        let mut state = self.state.lock();
        let removed = match resource.kind {
            ResourceKind::Instance => {
                let before = state.instances.len();
                state.instances.retain(|i| i.id != resource.id);
                state.instances.len() != before
            }
            ResourceKind::Cluster => {
                let before = state.clusters.len();
                state.clusters.retain(|c| c.id != resource.id);
                state.node_pools.remove(&resource.id);
                state.clusters.len() != before
            }
            ResourceKind::NodePool => {
                let cluster_id = resource.parent.clone().unwrap_or_default();
                match state.node_pools.get_mut(&cluster_id) {
                    Some(pools) => {
                        let before = pools.len();
                        pools.retain(|p| p.id != resource.id);
                        pools.len() != before
                    }
                    None => false,
                }
            }
        };
        if removed {
            Ok(())
        } else {
            Err(not_found(resource))
        }
    }
}
