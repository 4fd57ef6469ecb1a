//! # API Abstraction Layer
//!
//! The browser never talks to the network from inside a view. Views emit
//! effects, the runtime turns them into calls on a [`CloudApi`], and the
//! results come back as messages.
//!
//! - [`CloudApi`] - Core trait for listing and mutating resources
//! - [`MockCloud`] - In-memory implementation with demo data and
//!   failure injection
//!
//! ```rust,no_run
//! use cloudnav::api::{CloudApi, MockCloud};
//!
//! #[tokio::main]
//! async fn main() {
//!     let api = MockCloud::demo();
//!     let instances = api.list_instances().await.unwrap();
//!     assert!(!instances.is_empty());
//! }
//! ```

mod mock;
mod types;

pub use mock::MockCloud;
pub use types::{
    version_is_newer, Cluster, Instance, NodePool, ResourceAction, ResourceKind, ResourceRef,
    ScaleRequest, UpdatePolicy,
};

use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by an API backend.
///
/// Only the display string crosses into the view layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("request rejected: {reason}")]
    Rejected { reason: String },

    #[error("service unavailable: {reason}")]
    Unavailable { reason: String },
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Capabilities the browser needs from a cloud provider
#[async_trait]
pub trait CloudApi: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &str;

    async fn list_instances(&self) -> ApiResult<Vec<Instance>>;

    async fn list_clusters(&self) -> ApiResult<Vec<Cluster>>;

    async fn list_node_pools(&self, cluster_id: &str) -> ApiResult<Vec<NodePool>>;

    /// Kubernetes versions the cluster could run, in any order
    async fn list_versions(&self, cluster_id: &str) -> ApiResult<Vec<String>>;

    /// Run a power action against a resource
    async fn execute_action(&self, resource: &ResourceRef, action: ResourceAction)
        -> ApiResult<()>;

    async fn scale_node_pool(&self, pool: &ResourceRef, request: ScaleRequest) -> ApiResult<()>;

    async fn set_update_policy(&self, cluster: &ResourceRef, policy: UpdatePolicy)
        -> ApiResult<()>;

    async fn upgrade_cluster(&self, cluster: &ResourceRef, version: &str) -> ApiResult<()>;

    async fn delete(&self, resource: &ResourceRef) -> ApiResult<()>;
}
