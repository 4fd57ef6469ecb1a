//! Effect Runtime - Connector Layer
//!
//! Runs the effects views emit against a [`CloudApi`] and sends each result
//! back as a [`Message`]. Every effect runs in its own task; nothing here
//! knows which view will be active when the result lands.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use super::views::{Effect, FetchRequest, Message};
use crate::api::{ApiError, CloudApi};

/// Spawns effects and forwards their results to the event loop
#[derive(Clone)]
pub struct EffectRunner {
    api: Arc<dyn CloudApi>,
    tx: UnboundedSender<Message>,
}

impl EffectRunner {
    pub fn new(api: Arc<dyn CloudApi>, tx: UnboundedSender<Message>) -> Self {
        Self { api, tx }
    }

    /// Start `effect` in the background
    pub fn dispatch(&self, effect: Effect) {
        tracing::debug!(backend = self.api.name(), effect = effect.label(), "dispatch");
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let msg = execute(api.as_ref(), effect).await;
            if tx.send(msg).is_err() {
                tracing::debug!("event loop gone, dropping effect result");
            }
        });
    }
}

fn report(op: &str, err: ApiError) -> String {
    tracing::warn!(op, error = %err, "effect failed");
    err.to_string()
}

/// Run one effect to completion
pub async fn execute(api: &dyn CloudApi, effect: Effect) -> Message {
    match effect {
        Effect::Fetch(FetchRequest::Instances) => Message::InstancesLoaded(
            api.list_instances()
                .await
                .map_err(|e| report("list_instances", e)),
        ),
        Effect::Fetch(FetchRequest::Clusters) => Message::ClustersLoaded(
            api.list_clusters()
                .await
                .map_err(|e| report("list_clusters", e)),
        ),
        Effect::Fetch(FetchRequest::NodePools { cluster }) => {
            let result = api
                .list_node_pools(&cluster.id)
                .await
                .map_err(|e| report("list_node_pools", e));
            Message::NodePoolsLoaded { cluster, result }
        }
        Effect::Fetch(FetchRequest::Versions { cluster }) => {
            let result = api
                .list_versions(&cluster.id)
                .await
                .map_err(|e| report("list_versions", e));
            Message::VersionsLoaded { cluster, result }
        }
        Effect::ExecuteAction { resource, action } => {
            let result = api
                .execute_action(&resource, action)
                .await
                .map_err(|e| report(action.id(), e));
            Message::ActionCompleted {
                resource,
                action,
                result,
            }
        }
        Effect::SubmitScale { pool, request } => {
            let result = api
                .scale_node_pool(&pool, request)
                .await
                .map_err(|e| report("scale", e));
            Message::Scaled {
                pool,
                request,
                result,
            }
        }
        Effect::SubmitPolicy { cluster, policy } => {
            let result = api
                .set_update_policy(&cluster, policy)
                .await
                .map_err(|e| report("set_update_policy", e));
            Message::PolicyUpdated {
                cluster,
                policy,
                result,
            }
        }
        Effect::SubmitUpgrade { cluster, version } => {
            let result = api
                .upgrade_cluster(&cluster, &version)
                .await
                .map_err(|e| report("upgrade", e));
            Message::UpgradeStarted {
                cluster,
                version,
                result,
            }
        }
        Effect::ConfirmDelete { resource } => {
            let result = api
                .delete(&resource)
                .await
                .map_err(|e| report("delete", e));
            tracing::info!(resource = %resource, ok = result.is_ok(), "delete finished");
            Message::Deleted { resource, result }
        }
    }
}
