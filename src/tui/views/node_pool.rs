//! Node pools of a Kubernetes cluster

use super::{
    Column, DetailResource, Effect, FetchRequest, ListResource, Message, ScaleView, ViewResponse,
};
use crate::api::{NodePool, ResourceKind, ResourceRef};
use crate::tui::action_menu::MenuAction;
use crate::tui::filter::Searchable;

/// The cluster a node pool list or detail belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolScope {
    pub cluster: ResourceRef,
}

impl PoolScope {
    pub fn new(cluster: ResourceRef) -> Self {
        Self { cluster }
    }

    pub fn fetch(&self) -> FetchRequest {
        FetchRequest::NodePools {
            cluster: self.cluster.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodePoolAction {
    Scale,
    Delete,
}

const COLUMNS: &[Column] = &[
    Column::new("NAME", 16),
    Column::new("SIZE", 16),
    Column::new("NODES", 6),
    Column::new("MIN-MAX", 8),
    Column::new("STATUS", 10),
];

impl Searchable for NodePool {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.size.as_str()]
    }
}

impl DetailResource for NodePool {
    type Scope = PoolScope;
    type Action = NodePoolAction;

    fn kind() -> ResourceKind {
        ResourceKind::NodePool
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn resource_ref(&self) -> ResourceRef {
        NodePool::resource_ref(self)
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.clone()),
            ("Name", self.name.clone()),
            ("Size", self.size.clone()),
            ("Status", self.status.clone()),
            ("Nodes", self.node_count.to_string()),
            ("Minimum nodes", self.min_nodes.to_string()),
            ("Maximum nodes", self.max_nodes.to_string()),
            (
                "Autoscaling",
                if self.autoscaling { "on" } else { "off" }.to_string(),
            ),
        ]
    }

    fn actions() -> Vec<MenuAction<NodePoolAction>> {
        vec![
            MenuAction::new(NodePoolAction::Scale, "Scale"),
            MenuAction::confirmed(NodePoolAction::Delete, "Delete"),
        ]
    }

    fn activate(&self, scope: &PoolScope, action: NodePoolAction) -> ViewResponse {
        match action {
            NodePoolAction::Scale => ViewResponse::push(ScaleView::new(scope.clone(), self)),
            NodePoolAction::Delete => ViewResponse::effect(Effect::ConfirmDelete {
                resource: self.resource_ref(),
            }),
        }
    }

    fn fetch(scope: &PoolScope) -> FetchRequest {
        scope.fetch()
    }

    fn loaded<'m>(scope: &PoolScope, msg: &'m Message) -> Option<&'m Result<Vec<Self>, String>> {
        match msg {
            Message::NodePoolsLoaded { cluster, result } if cluster.id == scope.cluster.id => {
                Some(result)
            }
            _ => None,
        }
    }
}

impl ListResource for NodePool {
    fn section_title(scope: &PoolScope) -> String {
        format!("{} node pools", scope.cluster.name)
    }

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.size.clone(),
            self.node_count.to_string(),
            format!("{}-{}", self.min_nodes, self.max_nodes),
            self.status.clone(),
        ]
    }

    fn status(&self) -> &str {
        &self.status
    }
}
