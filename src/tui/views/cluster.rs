//! Kubernetes clusters

use super::{
    Column, DetailResource, Effect, FetchRequest, InstanceListView, ListResource, Message,
    NodePoolListView, PolicyView, PoolScope, UpgradeView, View, ViewResponse,
};
use crate::api::{Cluster, ResourceKind, ResourceRef};
use crate::tui::action_menu::MenuAction;
use crate::tui::filter::Searchable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterAction {
    NodePools,
    Upgrade,
    UpdatePolicy,
    Delete,
}

const COLUMNS: &[Column] = &[
    Column::new("NAME", 18),
    Column::new("REGION", 10),
    Column::new("VERSION", 10),
    Column::new("NODES", 6),
    Column::new("STATUS", 10),
];

impl Searchable for Cluster {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.region.as_str(), self.version.as_str()]
    }
}

impl DetailResource for Cluster {
    type Scope = ();
    type Action = ClusterAction;

    fn kind() -> ResourceKind {
        ResourceKind::Cluster
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn resource_ref(&self) -> ResourceRef {
        Cluster::resource_ref(self)
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.clone()),
            ("Name", self.name.clone()),
            ("Region", self.region.clone()),
            ("Version", self.version.clone()),
            ("Status", self.status.clone()),
            ("Nodes", self.node_count.to_string()),
            ("Update policy", self.update_policy.to_string()),
            (
                "Created",
                self.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            ),
        ]
    }

    fn actions() -> Vec<MenuAction<ClusterAction>> {
        vec![
            MenuAction::new(ClusterAction::NodePools, "Node pools"),
            MenuAction::new(ClusterAction::Upgrade, "Upgrade"),
            MenuAction::new(ClusterAction::UpdatePolicy, "Update policy"),
            MenuAction::confirmed(ClusterAction::Delete, "Delete"),
        ]
    }

    fn activate(&self, _scope: &(), action: ClusterAction) -> ViewResponse {
        let cluster = self.resource_ref();
        match action {
            ClusterAction::NodePools => {
                let (view, fetch) = NodePoolListView::open(PoolScope::new(cluster));
                ViewResponse::push(view).with_effect(fetch)
            }
            ClusterAction::Upgrade => {
                let (view, fetch) = UpgradeView::open(cluster, &self.version);
                ViewResponse::push(view).with_effect(fetch)
            }
            ClusterAction::UpdatePolicy => {
                ViewResponse::push(PolicyView::new(cluster, self.update_policy))
            }
            ClusterAction::Delete => {
                ViewResponse::effect(Effect::ConfirmDelete { resource: cluster })
            }
        }
    }

    fn fetch(_scope: &()) -> FetchRequest {
        FetchRequest::Clusters
    }

    fn loaded<'m>(_scope: &(), msg: &'m Message) -> Option<&'m Result<Vec<Self>, String>> {
        match msg {
            Message::ClustersLoaded(result) => Some(result),
            _ => None,
        }
    }
}

impl ListResource for Cluster {
    fn section_title(_scope: &()) -> String {
        "Kubernetes clusters".to_string()
    }

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.region.clone(),
            self.version.clone(),
            self.node_count.to_string(),
            self.status.clone(),
        ]
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn sibling(_scope: &()) -> Option<(Box<dyn View>, FetchRequest)> {
        Some((Box::new(InstanceListView::new(())), FetchRequest::Instances))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::UpdatePolicy;
    use crate::tui::context::Context;
    use crate::tui::views::{ClusterDetailView, Transition};
    use chrono::Utc;
    use crossterm::event::{KeyCode, KeyEvent};

    fn cluster() -> Cluster {
        Cluster {
            id: "k8s-1".into(),
            name: "prod".into(),
            region: "GRA7".into(),
            version: "1.29.5".into(),
            status: "READY".into(),
            node_count: 6,
            update_policy: UpdatePolicy::Manual,
            created_at: Utc::now(),
        }
    }

    fn run(view: &mut ClusterDetailView, steps_right: usize) -> ViewResponse {
        let mut ctx = Context::new("p", "p");
        for _ in 0..steps_right {
            view.handle_key(KeyEvent::from(KeyCode::Right), &mut ctx);
        }
        view.handle_key(KeyEvent::from(KeyCode::Enter), &mut ctx)
    }

    #[test]
    fn test_node_pools_pushes_list_with_fetch() {
        let mut view = ClusterDetailView::new((), cluster());
        let r = run(&mut view, 0);
        assert!(matches!(r.transition, Some(Transition::Push(_))));
        assert_eq!(
            r.effect,
            Some(Effect::Fetch(FetchRequest::NodePools {
                cluster: cluster().resource_ref()
            }))
        );
    }

    #[test]
    fn test_upgrade_pushes_with_version_fetch() {
        let mut view = ClusterDetailView::new((), cluster());
        let r = run(&mut view, 1);
        match r.transition {
            Some(Transition::Push(v)) => assert_eq!(v.title(), "Upgrade"),
            other => panic!("expected push, got {:?}", other),
        }
        assert_eq!(
            r.effect,
            Some(Effect::Fetch(FetchRequest::Versions {
                cluster: cluster().resource_ref()
            }))
        );
    }

    #[test]
    fn test_update_policy_pushes_picker_without_effect() {
        let mut view = ClusterDetailView::new((), cluster());
        let r = run(&mut view, 2);
        assert!(matches!(r.transition, Some(Transition::Push(ref v)) if v.title() == "Update policy"));
        assert!(r.effect.is_none());
    }

    #[test]
    fn test_delete_is_gated() {
        let mut view = ClusterDetailView::new((), cluster());
        assert!(run(&mut view, 3).is_none());
        let r = run(&mut view, 0);
        assert_eq!(
            r.effect,
            Some(Effect::ConfirmDelete {
                resource: cluster().resource_ref()
            })
        );
    }

    #[test]
    fn test_cluster_search_fields() {
        let c = cluster();
        assert!(c.matches("1.29"));
        assert!(c.matches("gra"));
        assert!(!c.matches("bhs"));
    }
}
