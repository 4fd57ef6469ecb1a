//! # Navigation Tests
//!
//! Drive the shell end to end: scripted keys go in, effects run against the
//! in-memory backend, and their messages are fed back the same way the app
//! loop does it.

use std::time::Instant;

use cloudnav::api::{ApiError, MockCloud};
use cloudnav::tui::runtime::execute;
use cloudnav::tui::views::{Effect, HomeView};
use cloudnav::tui::{Context, Shell, Theme};
use crossterm::event::{KeyCode, KeyEvent};
use pretty_assertions::assert_eq;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

// ============================================================================
// TEST HELPERS
// ============================================================================

fn shell() -> Shell {
    Shell::new(Box::new(HomeView::new()), Context::new("p-1", "Demo"))
}

/// Run effects until the chain settles, delivering every result
async fn settle(shell: &mut Shell, api: &MockCloud, effect: Option<Effect>) {
    let mut next = effect;
    while let Some(effect) = next.take() {
        let msg = execute(api, effect).await;
        next = shell.handle_message(msg);
    }
}

async fn press(shell: &mut Shell, api: &MockCloud, code: KeyCode) {
    let effect = shell.handle_key(KeyEvent::from(code));
    settle(shell, api, effect).await;
}

async fn press_all(shell: &mut Shell, api: &MockCloud, codes: &[KeyCode]) {
    for code in codes {
        press(shell, api, *code).await;
    }
}

fn screen(shell: &Shell) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
    let theme = Theme::default();
    terminal
        .draw(|frame| shell.render(frame, &theme, Instant::now()))
        .unwrap();
    terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|c| c.symbol())
        .collect()
}

fn notification(shell: &Shell) -> Option<String> {
    shell
        .context()
        .notification(Instant::now())
        .map(|n| n.text.clone())
}

// ============================================================================
// STACK
// ============================================================================

#[tokio::test]
async fn test_back_on_root_never_empties_stack() {
    let api = MockCloud::demo();
    let mut s = shell();
    press_all(&mut s, &api, &[KeyCode::Enter, KeyCode::Enter]).await;
    assert_eq!(s.depth(), 3);

    press_all(&mut s, &api, &[KeyCode::Esc; 6]).await;
    assert_eq!(s.depth(), 1);
    assert_eq!(s.breadcrumb(), vec!["Home"]);
    assert!(!s.should_quit());
}

#[tokio::test]
async fn test_list_cursor_survives_detail_round_trip() {
    let api = MockCloud::demo();
    let mut s = shell();
    press_all(&mut s, &api, &[KeyCode::Enter, KeyCode::Down, KeyCode::Down]).await;
    press(&mut s, &api, KeyCode::Enter).await;
    assert_eq!(s.active_title(), "db-primary");

    press(&mut s, &api, KeyCode::Esc).await;
    press(&mut s, &api, KeyCode::Enter).await;
    assert_eq!(s.active_title(), "db-primary");
}

#[tokio::test]
async fn test_tab_swaps_sections_in_place() {
    let api = MockCloud::demo();
    let mut s = shell();
    press(&mut s, &api, KeyCode::Enter).await;
    press(&mut s, &api, KeyCode::Tab).await;
    assert_eq!(s.breadcrumb(), vec!["Home", "Kubernetes clusters"]);
    assert!(screen(&s).contains("Kubernetes clusters (2)"));

    press(&mut s, &api, KeyCode::Tab).await;
    assert_eq!(s.breadcrumb(), vec!["Home", "Instances"]);
    assert!(screen(&s).contains("Instances (5)"));
}

// ============================================================================
// CONFIRMATION GATE
// ============================================================================

#[tokio::test]
async fn test_reboot_runs_only_after_second_enter() {
    let api = MockCloud::demo();
    let mut s = shell();
    press_all(&mut s, &api, &[KeyCode::Enter, KeyCode::Enter]).await;
    let calls_before = api.calls().len();

    press(&mut s, &api, KeyCode::Enter).await;
    assert_eq!(api.calls().len(), calls_before);
    assert!(screen(&s).contains("CONFIRM"));

    press(&mut s, &api, KeyCode::Enter).await;
    assert!(api.calls().contains(&"reboot:i-7f3a".to_string()));
    assert_eq!(api.last_call().as_deref(), Some("list_instances"));
    assert_eq!(
        notification(&s).as_deref(),
        Some("Reboot requested for instance web-1")
    );
    assert_eq!(s.depth(), 3);
}

#[tokio::test]
async fn test_moving_between_actions_disarms() {
    let api = MockCloud::demo();
    let mut s = shell();
    press_all(
        &mut s,
        &api,
        &[
            KeyCode::Enter,
            KeyCode::Enter,
            KeyCode::Enter,
            KeyCode::Right,
            KeyCode::Left,
            KeyCode::Enter,
        ],
    )
    .await;
    assert!(!api.calls().iter().any(|c| c.starts_with("reboot")));
}

#[tokio::test]
async fn test_delete_pops_back_to_refreshed_list() {
    let api = MockCloud::demo();
    let mut s = shell();
    press_all(&mut s, &api, &[KeyCode::Enter, KeyCode::Enter]).await;
    press_all(
        &mut s,
        &api,
        &[KeyCode::Right, KeyCode::Right, KeyCode::Right, KeyCode::Enter],
    )
    .await;
    assert_eq!(s.depth(), 3);

    press(&mut s, &api, KeyCode::Enter).await;
    assert!(api.calls().contains(&"delete:i-7f3a".to_string()));
    assert_eq!(s.depth(), 2);
    assert!(screen(&s).contains("Instances (4)"));
    assert_eq!(notification(&s).as_deref(), Some("Deleted instance web-1"));
}

#[tokio::test]
async fn test_action_failure_keeps_view_and_notifies() {
    let api = MockCloud::demo();
    let mut s = shell();
    press_all(&mut s, &api, &[KeyCode::Enter, KeyCode::Enter, KeyCode::Right]).await;
    press(&mut s, &api, KeyCode::Right).await;
    api.fail_next(ApiError::Rejected {
        reason: "instance locked".into(),
    });
    press(&mut s, &api, KeyCode::Enter).await;

    assert_eq!(s.depth(), 3);
    assert_eq!(
        notification(&s).as_deref(),
        Some("Start failed: request rejected: instance locked")
    );
    assert!(screen(&s).contains("Start failed"));
}

// ============================================================================
// EDITOR AND PICKERS
// ============================================================================

async fn open_scale(s: &mut Shell, api: &MockCloud) {
    // Home > clusters > production > node pools > general > scale
    press_all(
        s,
        api,
        &[
            KeyCode::Down,
            KeyCode::Enter,
            KeyCode::Enter,
            KeyCode::Enter,
            KeyCode::Enter,
            KeyCode::Enter,
        ],
    )
    .await;
    assert_eq!(s.active_title(), "Scale general");
}

#[tokio::test]
async fn test_scale_submits_and_returns_to_pool() {
    let api = MockCloud::demo();
    let mut s = shell();
    open_scale(&mut s, &api).await;
    assert_eq!(s.depth(), 6);

    press_all(&mut s, &api, &[KeyCode::Right, KeyCode::Enter]).await;
    assert!(api.calls().contains(&"scale:np-a1:4/1/6".to_string()));
    assert_eq!(s.depth(), 5);
    assert_eq!(s.active_title(), "general");
    assert_eq!(
        notification(&s).as_deref(),
        Some("Scaling general to 4 nodes (1-6)")
    );
}

#[tokio::test]
async fn test_scale_rejects_minimum_above_maximum() {
    let api = MockCloud::demo();
    let mut s = shell();
    open_scale(&mut s, &api).await;

    press(&mut s, &api, KeyCode::Down).await;
    press_all(&mut s, &api, &[KeyCode::Right; 6]).await;
    let calls_before = api.calls().len();
    press(&mut s, &api, KeyCode::Enter).await;

    assert_eq!(api.calls().len(), calls_before);
    assert!(screen(&s).contains("Minimum nodes cannot exceed maximum nodes"));

    // First Esc only clears the message
    press(&mut s, &api, KeyCode::Esc).await;
    assert_eq!(s.depth(), 6);
    press(&mut s, &api, KeyCode::Esc).await;
    assert_eq!(s.depth(), 5);
}

#[tokio::test]
async fn test_upgrade_on_latest_version_is_acknowledged_with_one_pop() {
    let api = MockCloud::demo();
    let mut s = shell();
    // Home > clusters > staging (1.30.2) > upgrade
    press_all(
        &mut s,
        &api,
        &[KeyCode::Down, KeyCode::Enter, KeyCode::Down, KeyCode::Enter],
    )
    .await;
    assert_eq!(s.active_title(), "staging");
    press_all(&mut s, &api, &[KeyCode::Right, KeyCode::Enter]).await;
    assert_eq!(s.active_title(), "Upgrade");
    assert!(screen(&s).contains("Already on the latest version"));

    let effect = s.handle_key(KeyEvent::from(KeyCode::Enter));
    assert!(effect.is_none());
    assert_eq!(s.active_title(), "staging");
    assert_eq!(s.depth(), 3);
}

#[tokio::test]
async fn test_policy_change_round_trip() {
    let api = MockCloud::demo();
    let mut s = shell();
    press_all(&mut s, &api, &[KeyCode::Down, KeyCode::Enter, KeyCode::Enter]).await;
    press_all(&mut s, &api, &[KeyCode::Right, KeyCode::Right, KeyCode::Enter]).await;
    assert_eq!(s.active_title(), "Update policy");

    // production starts on Maintenance window; Up twice reaches Automatic
    press_all(&mut s, &api, &[KeyCode::Up, KeyCode::Up, KeyCode::Enter]).await;
    assert!(api.calls().contains(&"policy:k8s-prod:Automatic".to_string()));
    assert_eq!(s.active_title(), "production");
    assert!(screen(&s).contains("Automatic"));
}

// ============================================================================
// STALE RESULTS
// ============================================================================

#[tokio::test]
async fn test_result_after_navigating_away_is_ignored() {
    let api = MockCloud::demo();
    let mut s = shell();
    press_all(&mut s, &api, &[KeyCode::Down, KeyCode::Enter, KeyCode::Enter]).await;
    s.handle_key(KeyEvent::from(KeyCode::Right));

    // Open the upgrade screen but leave before its versions arrive
    let fetch = s.handle_key(KeyEvent::from(KeyCode::Enter));
    assert!(fetch.is_some());
    assert_eq!(s.active_title(), "Upgrade");
    s.handle_key(KeyEvent::from(KeyCode::Esc));
    assert_eq!(s.active_title(), "production");

    let msg = execute(&api, fetch.unwrap()).await;
    let follow_up = s.handle_message(msg);
    assert!(follow_up.is_none());
    assert_eq!(s.depth(), 3);
    assert_eq!(s.active_title(), "production");
}

#[tokio::test]
async fn test_failed_list_load_shows_no_data() {
    let api = MockCloud::demo();
    api.fail_next(ApiError::Unavailable {
        reason: "maintenance".into(),
    });
    let mut s = shell();
    press(&mut s, &api, KeyCode::Enter).await;

    assert_eq!(s.depth(), 2);
    let shown = screen(&s);
    assert!(shown.contains("No data available"));
    assert!(shown.contains("maintenance"));

    // A later refresh recovers
    press(&mut s, &api, KeyCode::Char('r')).await;
    assert!(screen(&s).contains("Instances (5)"));
}
