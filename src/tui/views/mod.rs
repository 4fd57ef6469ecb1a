//! TUI Views Module
//!
//! Every screen is a [`View`] living on the navigation stack. Views never
//! swap themselves out: they answer each key or message with a
//! [`ViewResponse`] and the shell applies it.
//!
//! # Navigation
//!
//! ```text
//!   HOME ──Enter──► INSTANCES ◄──Tab──► CLUSTERS
//!                      │                   │
//!                    Enter               Enter
//!                      ▼                   ▼
//!               INSTANCE DETAIL      CLUSTER DETAIL ──► UPGRADE / POLICY
//!                                          │
//!                                      Node pools
//!                                          ▼
//!                                     NODE POOLS ──Enter──► NODE POOL DETAIL ──► SCALE
//! ```
//!
//! Forward is always a Push, Esc is always a Pop, `Tab` between the two
//! resource lists is a Replace.

mod cluster;
mod detail;
mod home;
mod instance;
mod list;
mod node_pool;
mod policy;
mod scale;
mod trait_view;
mod upgrade;

use std::fmt;

pub use cluster::ClusterAction;
pub use detail::{DetailResource, DetailView};
pub use home::{HomeView, Section};
pub use instance::InstanceAction;
pub use list::{Column, ListResource, ListView};
pub use node_pool::{NodePoolAction, PoolScope};
pub use policy::PolicyView;
pub use scale::ScaleView;
pub use trait_view::View;
pub use upgrade::UpgradeView;

use crate::api::{
    Cluster, Instance, NodePool, ResourceAction, ResourceRef, ScaleRequest, UpdatePolicy,
};

/// Instances table
pub type InstanceListView = ListView<Instance>;
/// Kubernetes clusters table
pub type ClusterListView = ListView<Cluster>;
/// Node pools of one cluster
pub type NodePoolListView = ListView<NodePool>;
pub type InstanceDetailView = DetailView<Instance>;
pub type ClusterDetailView = DetailView<Cluster>;
pub type NodePoolDetailView = DetailView<NodePool>;

/// Data a view asks the runtime to (re)load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    Instances,
    Clusters,
    NodePools { cluster: ResourceRef },
    Versions { cluster: ResourceRef },
}

/// Work to run outside the view; its result comes back as a [`Message`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch(FetchRequest),
    ExecuteAction {
        resource: ResourceRef,
        action: ResourceAction,
    },
    SubmitScale {
        pool: ResourceRef,
        request: ScaleRequest,
    },
    SubmitPolicy {
        cluster: ResourceRef,
        policy: UpdatePolicy,
    },
    SubmitUpgrade {
        cluster: ResourceRef,
        version: String,
    },
    ConfirmDelete {
        resource: ResourceRef,
    },
}

impl Effect {
    /// Short name for logs
    pub fn label(&self) -> &'static str {
        match self {
            Effect::Fetch(_) => "fetch",
            Effect::ExecuteAction { .. } => "execute-action",
            Effect::SubmitScale { .. } => "submit-scale",
            Effect::SubmitPolicy { .. } => "submit-policy",
            Effect::SubmitUpgrade { .. } => "submit-upgrade",
            Effect::ConfirmDelete { .. } => "confirm-delete",
        }
    }
}

/// Result of an [`Effect`], delivered to whichever view is active
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    InstancesLoaded(Result<Vec<Instance>, String>),
    ClustersLoaded(Result<Vec<Cluster>, String>),
    NodePoolsLoaded {
        cluster: ResourceRef,
        result: Result<Vec<NodePool>, String>,
    },
    VersionsLoaded {
        cluster: ResourceRef,
        result: Result<Vec<String>, String>,
    },
    ActionCompleted {
        resource: ResourceRef,
        action: ResourceAction,
        result: Result<(), String>,
    },
    Scaled {
        pool: ResourceRef,
        request: ScaleRequest,
        result: Result<(), String>,
    },
    PolicyUpdated {
        cluster: ResourceRef,
        policy: UpdatePolicy,
        result: Result<(), String>,
    },
    UpgradeStarted {
        cluster: ResourceRef,
        version: String,
        result: Result<(), String>,
    },
    Deleted {
        resource: ResourceRef,
        result: Result<(), String>,
    },
}

/// Stack instruction returned by a view
pub enum Transition {
    /// Put a new view on top; the current one goes dormant
    Push(Box<dyn View>),
    /// Swap the top view for another at the same depth
    Replace(Box<dyn View>),
    /// Go back to the view below (no-op on the root)
    Pop,
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Push(view) => write!(f, "Push({})", view.title()),
            Transition::Replace(view) => write!(f, "Replace({})", view.title()),
            Transition::Pop => write!(f, "Pop"),
        }
    }
}

/// What a view wants done after handling a key or message
#[derive(Debug, Default)]
pub struct ViewResponse {
    pub effect: Option<Effect>,
    pub transition: Option<Transition>,
}

impl ViewResponse {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn effect(effect: Effect) -> Self {
        Self {
            effect: Some(effect),
            transition: None,
        }
    }

    pub fn push(view: impl View + 'static) -> Self {
        Self {
            effect: None,
            transition: Some(Transition::Push(Box::new(view))),
        }
    }

    pub fn replace(view: impl View + 'static) -> Self {
        Self {
            effect: None,
            transition: Some(Transition::Replace(Box::new(view))),
        }
    }

    pub fn pop() -> Self {
        Self {
            effect: None,
            transition: Some(Transition::Pop),
        }
    }

    /// Attach an effect to a transition response
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = Some(effect);
        self
    }

    pub fn is_none(&self) -> bool {
        self.effect.is_none() && self.transition.is_none()
    }
}
