//! TUI Module - keyboard-driven resource browser
//!
//! Architecture:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      VIEW LAYER (views/, widgets/)                  │
//! │  Screens on a navigation stack. Keys in, ViewResponse out.          │
//! └─────────────────────────────────────────────────────────────────────┘
//!                               ▲  │
//!                  Key, Message │  │ Transition + Effect
//!                               │  ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        SHELL (shell.rs, stack.rs)                   │
//! │  Applies transitions, owns the Context, renders header / footer.    │
//! └─────────────────────────────────────────────────────────────────────┘
//!                               ▲  │
//!                       Message │  │ Effect
//!                               │  ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    CONNECTOR LAYER (runtime/)                       │
//! │  EffectRunner spawns CloudApi calls, results return over mpsc.      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

mod app;
mod events;

pub mod action_menu;
pub mod context;
pub mod cursor;
pub mod field_editor;
pub mod filter;
pub mod keymap;
pub mod mode;
pub mod picker;
pub mod runtime;
pub mod shell;
pub mod stack;
pub mod theme;
pub mod unicode;
pub mod views;
pub mod widgets;

use std::sync::Arc;
use std::time::Duration;

pub use app::{App, MIN_HEIGHT, MIN_WIDTH};
pub use context::Context;
pub use shell::Shell;
pub use theme::Theme;

use crate::api::CloudApi;
use crate::error::Result;

/// Run the browser until the user quits
pub async fn run(api: Arc<dyn CloudApi>, context: Context, tick_rate: Duration) -> Result<()> {
    App::new(api, context, tick_rate).run().await
}
