//! Generic filterable resource list
//!
//! Normal mode navigates and opens records, filter mode (`/`) sends typed
//! characters to the filter. The rows stay whatever the last successful
//! load returned; a failed reload keeps them and only raises a notification.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{DetailResource, DetailView, Effect, FetchRequest, Message, View, ViewResponse};
use crate::tui::context::Context;
use crate::tui::filter::{FilterableList, Searchable};
use crate::tui::keymap::{help_line, Keybinding};
use crate::tui::mode::InputMode;
use crate::tui::theme::Theme;
use crate::tui::widgets::{panel, placeholder, resource_table, TableRow};

const KEYS: &[Keybinding] = &[
    Keybinding::new(KeyCode::Down, "down"),
    Keybinding::new(KeyCode::Up, "up"),
    Keybinding::new(KeyCode::Enter, "open"),
    Keybinding::new(KeyCode::Char('/'), "filter"),
    Keybinding::new(KeyCode::Char('r'), "refresh"),
    Keybinding::new(KeyCode::Esc, "back"),
];

const SIBLING_KEY: Keybinding = Keybinding::new(KeyCode::Tab, "switch section");

const FILTER_KEYS: &[Keybinding] = &[
    Keybinding::new(KeyCode::Enter, "keep filter"),
    Keybinding::new(KeyCode::Esc, "clear filter"),
];

/// Table column
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub header: &'static str,
    pub width: u16,
}

impl Column {
    pub const fn new(header: &'static str, width: u16) -> Self {
        Self { header, width }
    }
}

/// A record that can be listed in a [`ListView`].
///
/// The last column is expected to be the status; it is colored by
/// [`ListResource::status`].
pub trait ListResource: DetailResource + Searchable {
    fn section_title(scope: &Self::Scope) -> String;
    fn columns() -> &'static [Column];
    fn cells(&self) -> Vec<String>;
    fn status(&self) -> &str;

    /// View (and its initial fetch) that `Tab` swaps in at the same depth
    fn sibling(_scope: &Self::Scope) -> Option<(Box<dyn View>, FetchRequest)> {
        None
    }
}

/// Whether the rows have been loaded yet
#[derive(Debug, Clone, PartialEq, Eq)]
enum LoadState {
    Loading,
    Loaded,
    Failed,
}

pub struct ListView<R: ListResource> {
    scope: R::Scope,
    rows: FilterableList<R>,
    load: LoadState,
    filtering: bool,
}

impl<R: ListResource> ListView<R> {
    /// Empty list waiting for its first load
    pub fn new(scope: R::Scope) -> Self {
        Self {
            scope,
            rows: FilterableList::default(),
            load: LoadState::Loading,
            filtering: false,
        }
    }

    /// Empty list plus the fetch that fills it
    pub fn open(scope: R::Scope) -> (Self, Effect) {
        let fetch = Effect::Fetch(R::fetch(&scope));
        (Self::new(scope), fetch)
    }

    pub fn rows(&self) -> &FilterableList<R> {
        &self.rows
    }

    pub fn is_loading(&self) -> bool {
        self.load == LoadState::Loading
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> ViewResponse {
        match key.code {
            KeyCode::Esc => {
                self.rows.clear_filter();
                self.filtering = false;
            }
            KeyCode::Enter => self.filtering = false,
            KeyCode::Backspace => self.rows.backspace_filter(),
            KeyCode::Char(c) => self.rows.push_filter_char(c),
            KeyCode::Down => self.rows.select_next(),
            KeyCode::Up => self.rows.select_prev(),
            _ => {}
        }
        ViewResponse::none()
    }

    fn open_selected(&self) -> ViewResponse {
        match self.rows.selected() {
            Some(item) => ViewResponse::push(DetailView::new(self.scope.clone(), item.clone())),
            None => ViewResponse::none(),
        }
    }

    fn render_body(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if self.load == LoadState::Failed && self.rows.backing().is_empty() {
            placeholder(frame, area, "No data available", theme);
            return;
        }
        if self.is_loading() {
            placeholder(frame, area, "Loading…", theme);
            return;
        }
        if self.rows.is_empty() {
            let text = if self.rows.filter().is_empty() {
                "Nothing here yet"
            } else {
                "No matches"
            };
            placeholder(frame, area, text, theme);
            return;
        }

        let columns = R::columns();
        let headers: Vec<&str> = columns.iter().map(|c| c.header).collect();
        let widths: Vec<u16> = columns.iter().map(|c| c.width).collect();
        let rows: Vec<TableRow> = self
            .rows
            .visible()
            .map(|r| TableRow {
                cells: r.cells(),
                status: r.status().to_string(),
            })
            .collect();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(area);

        let (header, list, mut state) =
            resource_table(&headers, &widths, &rows, self.rows.selected_index(), theme);
        // Indent the header by the width of the highlight symbol
        let header = Line::from(
            std::iter::once(Span::raw("  "))
                .chain(header.spans)
                .collect::<Vec<_>>(),
        );
        frame.render_widget(Paragraph::new(header), chunks[0]);
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }
}

impl<R: ListResource> View for ListView<R> {
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut title = format!(
            "{} ({})",
            R::section_title(&self.scope),
            self.rows.visible_len()
        );
        if self.filtering || !self.rows.filter().is_empty() {
            title.push_str(&format!(" /{}", self.rows.filter()));
        }
        let block = panel(title, theme, true);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.render_body(frame, inner, theme);
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &mut Context) -> ViewResponse {
        if self.filtering {
            return self.handle_filter_key(key);
        }

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.rows.select_next();
                ViewResponse::none()
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.rows.select_prev();
                ViewResponse::none()
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.rows.select_first();
                ViewResponse::none()
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.rows.select_last();
                ViewResponse::none()
            }
            KeyCode::Char('/') => {
                self.filtering = true;
                ViewResponse::none()
            }
            KeyCode::Enter => self.open_selected(),
            KeyCode::Char('r') => {
                if self.rows.backing().is_empty() {
                    self.load = LoadState::Loading;
                }
                ViewResponse::effect(Effect::Fetch(R::fetch(&self.scope)))
            }
            KeyCode::Tab => match R::sibling(&self.scope) {
                Some((view, fetch)) => ViewResponse {
                    effect: Some(Effect::Fetch(fetch)),
                    transition: Some(super::Transition::Replace(view)),
                },
                None => ViewResponse::none(),
            },
            KeyCode::Esc | KeyCode::Char('q') => ViewResponse::pop(),
            _ => ViewResponse::none(),
        }
    }

    fn handle_message(&mut self, msg: &Message, ctx: &mut Context) -> ViewResponse {
        let Some(result) = R::loaded(&self.scope, msg) else {
            return ViewResponse::none();
        };
        match result {
            Ok(items) => {
                self.rows.set_backing(items.clone());
                self.load = LoadState::Loaded;
            }
            Err(e) => {
                tracing::warn!("{} load failed: {}", R::section_title(&self.scope), e);
                ctx.notify_error(format!(
                    "Could not load {}: {}",
                    R::section_title(&self.scope),
                    e
                ));
                self.load = LoadState::Failed;
            }
        }
        ViewResponse::none()
    }

    fn title(&self) -> String {
        R::section_title(&self.scope)
    }

    fn help_text(&self) -> String {
        if self.filtering {
            return help_line(FILTER_KEYS);
        }
        let mut keys = KEYS.to_vec();
        if R::sibling(&self.scope).is_some() {
            keys.push(SIBLING_KEY);
        }
        help_line(&keys)
    }

    fn input_mode(&self) -> InputMode {
        if self.filtering {
            InputMode::Filter
        } else {
            InputMode::Normal
        }
    }
}
