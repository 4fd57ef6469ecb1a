//! Kubernetes version upgrade picker
//!
//! Opens empty and waits for the version list of its cluster. Only versions
//! newer than the running one are offered; none at all means the cluster is
//! up to date and the screen only needs acknowledging.

use std::cmp::Ordering;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{Effect, FetchRequest, Message, View, ViewResponse};
use crate::api::{version_is_newer, ResourceRef};
use crate::tui::context::Context;
use crate::tui::keymap::{help_line, Keybinding};
use crate::tui::picker::{Choice, PickerOutcome, SelectionList};
use crate::tui::theme::Theme;
use crate::tui::widgets::{choice_list, panel, placeholder};

const KEYS: &[Keybinding] = &[
    Keybinding::new(KeyCode::Up, "up"),
    Keybinding::new(KeyCode::Down, "down"),
    Keybinding::new(KeyCode::Enter, "upgrade"),
    Keybinding::new(KeyCode::Esc, "back"),
];

const ACK_KEYS: &[Keybinding] = &[
    Keybinding::new(KeyCode::Enter, "ok"),
    Keybinding::new(KeyCode::Esc, "back"),
];

enum Versions {
    Loading,
    Failed,
    Ready(SelectionList<String>),
}

pub struct UpgradeView {
    cluster: ResourceRef,
    current: String,
    versions: Versions,
    /// Version this view asked for, if any
    pending: Option<String>,
}

impl UpgradeView {
    pub fn new(cluster: ResourceRef, current: impl Into<String>) -> Self {
        Self {
            cluster,
            current: current.into(),
            versions: Versions::Loading,
            pending: None,
        }
    }

    /// New view plus the version fetch it waits for
    pub fn open(cluster: ResourceRef, current: &str) -> (Self, Effect) {
        let fetch = Effect::Fetch(FetchRequest::Versions {
            cluster: cluster.clone(),
        });
        (Self::new(cluster, current), fetch)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.versions, Versions::Loading)
    }

    /// Versions offered for upgrade, oldest first
    pub fn offered(&self) -> Vec<&str> {
        match &self.versions {
            Versions::Ready(list) => list.choices().iter().map(|c| c.value.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    fn load(&mut self, all: &[String]) {
        let mut newer: Vec<&String> = all
            .iter()
            .filter(|v| version_is_newer(v, &self.current))
            .collect();
        newer.sort_by(|a, b| {
            if version_is_newer(a, b) {
                Ordering::Greater
            } else if version_is_newer(b, a) {
                Ordering::Less
            } else {
                Ordering::Equal
            }
        });
        let choices = newer
            .into_iter()
            .map(|v| Choice::new(v.clone(), v.clone()))
            .collect();
        self.versions = Versions::Ready(SelectionList::new(choices));
    }

    fn is_acknowledgement(&self) -> bool {
        match &self.versions {
            Versions::Failed => true,
            Versions::Ready(list) => list.is_empty(),
            Versions::Loading => false,
        }
    }
}

impl View for UpgradeView {
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = panel(format!("Upgrade · {}", self.cluster.name), theme, true);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(1)])
            .split(inner);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Running: ", theme.text_secondary_style()),
                Span::styled(self.current.clone(), theme.text_style()),
            ])),
            chunks[0],
        );

        match &self.versions {
            Versions::Loading => placeholder(frame, chunks[1], "Loading versions", theme),
            Versions::Failed => placeholder(frame, chunks[1], "No data available", theme),
            Versions::Ready(list) if list.is_empty() => placeholder(
                frame,
                chunks[1],
                "Already on the latest version. Press Enter to go back",
                theme,
            ),
            Versions::Ready(list) => {
                let (widget, mut state) = choice_list(list.choices(), list.selected_index(), theme);
                frame.render_stateful_widget(widget, chunks[1], &mut state);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &mut Context) -> ViewResponse {
        let loading = self.is_loading();
        let Versions::Ready(list) = &mut self.versions else {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('q') => ViewResponse::pop(),
                KeyCode::Enter if !loading => ViewResponse::pop(),
                _ => ViewResponse::none(),
            };
        };

        match list.handle_key(key) {
            PickerOutcome::Submitted(version) => {
                self.pending = Some(version.clone());
                ViewResponse::effect(Effect::SubmitUpgrade {
                    cluster: self.cluster.clone(),
                    version,
                })
            }
            PickerOutcome::Dismissed => ViewResponse::pop(),
            PickerOutcome::None => ViewResponse::none(),
        }
    }

    fn handle_message(&mut self, msg: &Message, ctx: &mut Context) -> ViewResponse {
        match msg {
            Message::VersionsLoaded { cluster, result } if cluster.id == self.cluster.id => {
                match result {
                    Ok(all) => self.load(all),
                    Err(e) => {
                        ctx.notify_error(format!("Could not load versions: {}", e));
                        self.versions = Versions::Failed;
                    }
                }
                ViewResponse::none()
            }
            Message::UpgradeStarted {
                cluster,
                version,
                result,
            } if cluster.id == self.cluster.id
                && self.pending.as_deref() == Some(version.as_str()) =>
            {
                self.pending = None;
                match result {
                    Ok(()) => {
                        ctx.notify(format!("Upgrading {} to {}", cluster.name, version));
                        ViewResponse::pop().with_effect(Effect::Fetch(FetchRequest::Clusters))
                    }
                    Err(e) => {
                        ctx.notify_error(format!("Upgrade failed: {}", e));
                        ViewResponse::none()
                    }
                }
            }
            _ => ViewResponse::none(),
        }
    }

    fn title(&self) -> String {
        "Upgrade".to_string()
    }

    fn help_text(&self) -> String {
        if self.is_acknowledgement() {
            help_line(ACK_KEYS)
        } else {
            help_line(KEYS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ResourceKind;
    use crate::tui::views::Transition;
    use pretty_assertions::assert_eq;

    fn cluster() -> ResourceRef {
        ResourceRef::new(ResourceKind::Cluster, "k8s-1", "prod")
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn loaded(versions: &[&str]) -> (UpgradeView, Context) {
        let mut ctx = Context::new("p", "p");
        let mut view = UpgradeView::new(cluster(), "1.29.5");
        view.handle_message(
            &Message::VersionsLoaded {
                cluster: cluster(),
                result: Ok(versions.iter().map(|v| v.to_string()).collect()),
            },
            &mut ctx,
        );
        (view, ctx)
    }

    #[test]
    fn test_open_requests_versions() {
        let (view, effect) = UpgradeView::open(cluster(), "1.29.5");
        assert!(view.is_loading());
        assert_eq!(
            effect,
            Effect::Fetch(FetchRequest::Versions { cluster: cluster() })
        );
    }

    #[test]
    fn test_only_newer_versions_offered() {
        let (view, _) = loaded(&["1.30.2", "1.28.9", "1.29.5", "1.29.10"]);
        assert_eq!(view.offered(), vec!["1.29.10", "1.30.2"]);
    }

    #[test]
    fn test_versions_for_other_cluster_ignored() {
        let mut ctx = Context::new("p", "p");
        let mut view = UpgradeView::new(cluster(), "1.29.5");
        let other = ResourceRef::new(ResourceKind::Cluster, "k8s-2", "stage");
        view.handle_message(
            &Message::VersionsLoaded {
                cluster: other,
                result: Ok(vec!["1.31.0".into()]),
            },
            &mut ctx,
        );
        assert!(view.is_loading());
    }

    #[test]
    fn test_submit_emits_selected_version() {
        let (mut view, mut ctx) = loaded(&["1.29.10", "1.30.2"]);
        view.handle_key(key(KeyCode::Down), &mut ctx);
        let r = view.handle_key(key(KeyCode::Enter), &mut ctx);
        assert_eq!(
            r.effect,
            Some(Effect::SubmitUpgrade {
                cluster: cluster(),
                version: "1.30.2".into()
            })
        );
    }

    #[test]
    fn test_up_to_date_is_acknowledgement_screen() {
        for code in [KeyCode::Enter, KeyCode::Esc, KeyCode::Char('q')] {
            let (mut view, mut ctx) = loaded(&["1.28.9", "1.29.5"]);
            assert!(view.offered().is_empty());
            let r = view.handle_key(key(code), &mut ctx);
            assert!(matches!(r.transition, Some(Transition::Pop)));
            assert!(r.effect.is_none());
        }
    }

    #[test]
    fn test_enter_while_loading_does_nothing() {
        let mut ctx = Context::new("p", "p");
        let mut view = UpgradeView::new(cluster(), "1.29.5");
        assert!(view.handle_key(key(KeyCode::Enter), &mut ctx).is_none());
        let r = view.handle_key(key(KeyCode::Esc), &mut ctx);
        assert!(matches!(r.transition, Some(Transition::Pop)));
    }

    #[test]
    fn test_failed_load_can_be_dismissed() {
        let mut ctx = Context::new("p", "p");
        let mut view = UpgradeView::new(cluster(), "1.29.5");
        view.handle_message(
            &Message::VersionsLoaded {
                cluster: cluster(),
                result: Err("unavailable".into()),
            },
            &mut ctx,
        );
        let r = view.handle_key(key(KeyCode::Enter), &mut ctx);
        assert!(matches!(r.transition, Some(Transition::Pop)));
    }

    #[test]
    fn test_started_pops_and_refreshes_clusters() {
        let (mut view, mut ctx) = loaded(&["1.30.2"]);
        view.handle_key(key(KeyCode::Enter), &mut ctx);
        let r = view.handle_message(
            &Message::UpgradeStarted {
                cluster: cluster(),
                version: "1.30.2".into(),
                result: Ok(()),
            },
            &mut ctx,
        );
        assert!(matches!(r.transition, Some(Transition::Pop)));
        assert_eq!(r.effect, Some(Effect::Fetch(FetchRequest::Clusters)));
    }

    #[test]
    fn test_unrequested_upgrade_result_is_ignored() {
        let (mut view, mut ctx) = loaded(&["1.29.10", "1.30.2"]);
        let late = Message::UpgradeStarted {
            cluster: cluster(),
            version: "1.30.2".into(),
            result: Ok(()),
        };
        assert!(view.handle_message(&late, &mut ctx).is_none());

        // Picking a different version does not claim the old result either
        view.handle_key(key(KeyCode::Enter), &mut ctx);
        assert!(view.handle_message(&late, &mut ctx).is_none());

        let mine = Message::UpgradeStarted {
            cluster: cluster(),
            version: "1.29.10".into(),
            result: Ok(()),
        };
        let r = view.handle_message(&mine, &mut ctx);
        assert!(matches!(r.transition, Some(Transition::Pop)));
    }
}
