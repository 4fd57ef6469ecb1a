//! Node pool scaling form

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{Effect, Message, PoolScope, View, ViewResponse};
use crate::api::{NodePool, ResourceRef, ScaleRequest};
use crate::tui::context::Context;
use crate::tui::field_editor::{EditorCancel, FieldEditor};
use crate::tui::keymap::{help_line, Keybinding};
use crate::tui::mode::InputMode;
use crate::tui::theme::Theme;
use crate::tui::unicode::pad_to_width;
use crate::tui::widgets::panel;

/// Hard limits for every node count field
pub const NODE_FLOOR: u32 = 0;
pub const NODE_CEILING: u32 = 100;

const KEYS: &[Keybinding] = &[
    Keybinding::new(KeyCode::Up, "prev field"),
    Keybinding::new(KeyCode::Down, "next field"),
    Keybinding::new(KeyCode::Left, "-1"),
    Keybinding::new(KeyCode::Right, "+1"),
    Keybinding::new(KeyCode::Enter, "apply"),
    Keybinding::new(KeyCode::Esc, "cancel"),
];

pub struct ScaleView {
    scope: PoolScope,
    pool: ResourceRef,
    editor: FieldEditor,
    /// Last request sent; only its result is acted on
    pending: Option<ScaleRequest>,
}

impl ScaleView {
    pub fn new(scope: PoolScope, pool: &NodePool) -> Self {
        // Opening the form must not clamp counts the pool already has
        let ceiling = NODE_CEILING
            .max(pool.node_count)
            .max(pool.min_nodes)
            .max(pool.max_nodes);
        Self {
            scope,
            pool: pool.resource_ref(),
            editor: FieldEditor::scaling(
                pool.node_count,
                pool.min_nodes,
                pool.max_nodes,
                NODE_FLOOR,
                ceiling,
            ),
            pending: None,
        }
    }

    pub fn editor(&self) -> &FieldEditor {
        &self.editor
    }

    fn submit(&mut self) -> ViewResponse {
        match self.editor.submit() {
            Ok(request) => {
                self.pending = Some(request);
                ViewResponse::effect(Effect::SubmitScale {
                    pool: self.pool.clone(),
                    request,
                })
            }
            Err(e) => {
                tracing::debug!("scale form rejected: {}", e);
                ViewResponse::none()
            }
        }
    }
}

impl View for ScaleView {
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = panel(self.title(), theme, true);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(inner);

        let lines: Vec<Line> = self
            .editor
            .fields()
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let selected = i == self.editor.selected_index();
                let (lo, hi) = field.bounds();
                let marker = if selected { "▶ " } else { "  " };
                let value_style = if selected {
                    theme.highlight_style()
                } else {
                    theme.text_style()
                };
                Line::from(vec![
                    Span::styled(marker, theme.highlight_style()),
                    Span::styled(pad_to_width(field.label, 16), theme.text_secondary_style()),
                    Span::styled(format!("◀ {:>3} ▶", field.value()), value_style),
                    Span::styled(format!("  ({}-{})", lo, hi), theme.text_muted_style()),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), chunks[0]);

        if let Some(error) = self.editor.error() {
            frame.render_widget(
                Paragraph::new(Line::styled(error.to_string(), theme.danger_style())),
                chunks[1],
            );
        }
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &mut Context) -> ViewResponse {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.editor.select_prev(),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => self.editor.select_next(),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => self.editor.decrement(),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') => self.editor.increment(),
            KeyCode::Enter => return self.submit(),
            KeyCode::Esc | KeyCode::Char('q') => {
                return match self.editor.cancel() {
                    EditorCancel::ClearedError => ViewResponse::none(),
                    EditorCancel::Leave => ViewResponse::pop(),
                }
            }
            _ => {}
        }
        ViewResponse::none()
    }

    fn handle_message(&mut self, msg: &Message, ctx: &mut Context) -> ViewResponse {
        match msg {
            Message::Scaled {
                pool,
                request,
                result,
            } if pool.id == self.pool.id && self.pending == Some(*request) => match result {
                Ok(()) => {
                    self.pending = None;
                    ctx.notify(format!(
                        "Scaling {} to {} nodes ({}-{})",
                        pool.name, request.desired, request.min, request.max
                    ));
                    ViewResponse::pop().with_effect(Effect::Fetch(self.scope.fetch()))
                }
                Err(e) => {
                    self.pending = None;
                    ctx.notify_error(format!("Scale failed: {}", e));
                    ViewResponse::none()
                }
            },
            _ => ViewResponse::none(),
        }
    }

    fn title(&self) -> String {
        format!("Scale {}", self.pool.name)
    }

    fn help_text(&self) -> String {
        help_line(KEYS)
    }

    fn input_mode(&self) -> InputMode {
        InputMode::Edit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ResourceKind;
    use crate::tui::field_editor::{FieldRole, ScaleError};
    use crate::tui::views::{FetchRequest, Transition};
    use pretty_assertions::assert_eq;
    use std::time::Instant;

    fn scope() -> PoolScope {
        PoolScope::new(ResourceRef::new(ResourceKind::Cluster, "k8s-1", "prod"))
    }

    fn pool(desired: u32, min: u32, max: u32) -> NodePool {
        NodePool {
            id: "np-1".into(),
            cluster_id: "k8s-1".into(),
            name: "general".into(),
            size: "b3-8".into(),
            node_count: desired,
            min_nodes: min,
            max_nodes: max,
            autoscaling: false,
            status: "READY".into(),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_min_above_max_blocks_submit() {
        let mut ctx = Context::new("p", "p");
        let mut view = ScaleView::new(scope(), &pool(4, 5, 3));
        let r = view.handle_key(key(KeyCode::Enter), &mut ctx);
        assert!(r.is_none());
        assert_eq!(view.editor().error(), Some(ScaleError::MinAboveMax));
    }

    #[test]
    fn test_desired_out_of_range_blocks_submit() {
        let mut ctx = Context::new("p", "p");
        let mut view = ScaleView::new(scope(), &pool(15, 0, 10));
        assert!(view.handle_key(key(KeyCode::Enter), &mut ctx).is_none());
        assert_eq!(view.editor().error(), Some(ScaleError::DesiredOutOfRange));
    }

    #[test]
    fn test_valid_form_submits_all_three_values() {
        let mut ctx = Context::new("p", "p");
        let mut view = ScaleView::new(scope(), &pool(5, 2, 10));
        let r = view.handle_key(key(KeyCode::Enter), &mut ctx);
        assert_eq!(
            r.effect,
            Some(Effect::SubmitScale {
                pool: pool(5, 2, 10).resource_ref(),
                request: ScaleRequest {
                    desired: 5,
                    min: 2,
                    max: 10
                },
            })
        );
        assert!(r.transition.is_none());
    }

    #[test]
    fn test_arrows_edit_selected_field() {
        let mut ctx = Context::new("p", "p");
        let mut view = ScaleView::new(scope(), &pool(3, 1, 5));
        view.handle_key(key(KeyCode::Right), &mut ctx);
        view.handle_key(key(KeyCode::Down), &mut ctx);
        view.handle_key(key(KeyCode::Left), &mut ctx);
        assert_eq!(view.editor().value(FieldRole::Desired), Some(4));
        assert_eq!(view.editor().value(FieldRole::Minimum), Some(0));
        view.handle_key(key(KeyCode::Left), &mut ctx);
        assert_eq!(view.editor().value(FieldRole::Minimum), Some(0));
    }

    #[test]
    fn test_esc_clears_error_before_leaving() {
        let mut ctx = Context::new("p", "p");
        let mut view = ScaleView::new(scope(), &pool(4, 5, 3));
        view.handle_key(key(KeyCode::Enter), &mut ctx);
        assert!(view.handle_key(key(KeyCode::Esc), &mut ctx).is_none());
        assert_eq!(view.editor().error(), None);
        let r = view.handle_key(key(KeyCode::Esc), &mut ctx);
        assert!(matches!(r.transition, Some(Transition::Pop)));
    }

    #[test]
    fn test_edit_clears_error() {
        let mut ctx = Context::new("p", "p");
        let mut view = ScaleView::new(scope(), &pool(4, 5, 3));
        view.handle_key(key(KeyCode::Enter), &mut ctx);
        view.handle_key(key(KeyCode::Right), &mut ctx);
        assert_eq!(view.editor().error(), None);
    }

    #[test]
    fn test_success_pops_and_refreshes_pools() {
        let mut ctx = Context::new("p", "p");
        let mut view = ScaleView::new(scope(), &pool(5, 2, 10));
        view.handle_key(key(KeyCode::Enter), &mut ctx);
        let request = ScaleRequest {
            desired: 5,
            min: 2,
            max: 10,
        };
        let r = view.handle_message(
            &Message::Scaled {
                pool: pool(5, 2, 10).resource_ref(),
                request,
                result: Ok(()),
            },
            &mut ctx,
        );
        assert!(matches!(r.transition, Some(Transition::Pop)));
        assert_eq!(
            r.effect,
            Some(Effect::Fetch(FetchRequest::NodePools {
                cluster: scope().cluster
            }))
        );
        assert!(ctx.notification(Instant::now()).is_some());
    }

    #[test]
    fn test_failure_stays_on_form() {
        let mut ctx = Context::new("p", "p");
        let mut view = ScaleView::new(scope(), &pool(5, 2, 10));
        view.handle_key(key(KeyCode::Enter), &mut ctx);
        let r = view.handle_message(
            &Message::Scaled {
                pool: pool(5, 2, 10).resource_ref(),
                request: ScaleRequest {
                    desired: 5,
                    min: 2,
                    max: 10,
                },
                result: Err("quota".into()),
            },
            &mut ctx,
        );
        assert!(r.is_none());
        assert_eq!(
            ctx.notification(Instant::now()).map(|n| n.text.as_str()),
            Some("Scale failed: quota")
        );
    }

    #[test]
    fn test_untouched_form_keeps_counts_above_default_ceiling() {
        let mut ctx = Context::new("p", "p");
        let mut view = ScaleView::new(scope(), &pool(120, 50, 200));
        let r = view.handle_key(key(KeyCode::Enter), &mut ctx);
        assert_eq!(
            r.effect,
            Some(Effect::SubmitScale {
                pool: pool(120, 50, 200).resource_ref(),
                request: ScaleRequest {
                    desired: 120,
                    min: 50,
                    max: 200
                },
            })
        );

        // Raising is still capped at the widened limit
        view.handle_key(key(KeyCode::Tab), &mut ctx);
        view.handle_key(key(KeyCode::Tab), &mut ctx);
        view.handle_key(key(KeyCode::Right), &mut ctx);
        assert_eq!(view.editor().value(FieldRole::Maximum), Some(200));
    }

    #[test]
    fn test_result_of_earlier_form_is_ignored() {
        let mut ctx = Context::new("p", "p");
        let mut view = ScaleView::new(scope(), &pool(5, 2, 10));
        let late = Message::Scaled {
            pool: pool(5, 2, 10).resource_ref(),
            request: ScaleRequest {
                desired: 7,
                min: 2,
                max: 10,
            },
            result: Ok(()),
        };
        assert!(view.handle_message(&late, &mut ctx).is_none());

        // Still ignored after this form submits something else
        view.handle_key(key(KeyCode::Enter), &mut ctx);
        assert!(view.handle_message(&late, &mut ctx).is_none());
        assert!(ctx.notification(Instant::now()).is_none());
    }
}
