//! Compute instances: table columns, detail fields and power actions

use super::{
    ClusterListView, Column, DetailResource, Effect, FetchRequest, ListResource, Message, View,
    ViewResponse,
};
use crate::api::{Instance, ResourceAction, ResourceKind, ResourceRef};
use crate::tui::action_menu::MenuAction;
use crate::tui::filter::Searchable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceAction {
    Power(ResourceAction),
    Delete,
}

const COLUMNS: &[Column] = &[
    Column::new("NAME", 18),
    Column::new("SIZE", 12),
    Column::new("REGION", 10),
    Column::new("PUBLIC IP", 16),
    Column::new("STATUS", 10),
];

impl Searchable for Instance {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.size.as_str(), self.region.as_str()]
    }
}

impl DetailResource for Instance {
    type Scope = ();
    type Action = InstanceAction;

    fn kind() -> ResourceKind {
        ResourceKind::Instance
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn resource_ref(&self) -> ResourceRef {
        Instance::resource_ref(self)
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.clone()),
            ("Name", self.name.clone()),
            ("Size", self.size.clone()),
            ("Region", self.region.clone()),
            ("Status", self.status.clone()),
            ("Public IP", or_dash(self.public_ip.as_deref())),
            ("Private IP", or_dash(self.private_ip.as_deref())),
            (
                "Created",
                self.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            ),
        ]
    }

    fn actions() -> Vec<MenuAction<InstanceAction>> {
        vec![
            MenuAction::confirmed(InstanceAction::Power(ResourceAction::Reboot), "Reboot"),
            MenuAction::confirmed(InstanceAction::Power(ResourceAction::Stop), "Stop"),
            MenuAction::new(InstanceAction::Power(ResourceAction::Start), "Start"),
            MenuAction::confirmed(InstanceAction::Delete, "Delete"),
        ]
    }

    fn activate(&self, _scope: &(), action: InstanceAction) -> ViewResponse {
        let resource = self.resource_ref();
        match action {
            InstanceAction::Power(action) => {
                ViewResponse::effect(Effect::ExecuteAction { resource, action })
            }
            InstanceAction::Delete => ViewResponse::effect(Effect::ConfirmDelete { resource }),
        }
    }

    fn fetch(_scope: &()) -> FetchRequest {
        FetchRequest::Instances
    }

    fn loaded<'m>(_scope: &(), msg: &'m Message) -> Option<&'m Result<Vec<Self>, String>> {
        match msg {
            Message::InstancesLoaded(result) => Some(result),
            _ => None,
        }
    }
}

impl ListResource for Instance {
    fn section_title(_scope: &()) -> String {
        "Instances".to_string()
    }

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.size.clone(),
            self.region.clone(),
            or_dash(self.public_ip.as_deref()),
            self.status.clone(),
        ]
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn sibling(_scope: &()) -> Option<(Box<dyn View>, FetchRequest)> {
        Some((Box::new(ClusterListView::new(())), FetchRequest::Clusters))
    }
}

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}
