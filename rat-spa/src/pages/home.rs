//! Home view: greets the user and shows what the backend returned.
//!
//! Each activation creates a fresh `HomeState` entity in `Loading` and starts
//! exactly one fetch. Deactivation aborts the fetch and drops the entity; the
//! fetch task only holds a weak handle, so a result that arrives late is
//! discarded instead of leaking into a later activation.

use crate::api::{DataSource, FetchError};
use crate::model::HomeState;
use rat_nexus::{Component, Context, Entity, TaskTracker, WeakEntity};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const LOADING_TEXT: &str = "Loading data from backend...";

/// Store a fetch outcome in the activation it was started for. Returns false
/// when that activation is gone or already settled.
fn deliver(state: &WeakEntity<HomeState>, outcome: Result<Value, FetchError>) -> bool {
    if let Err(err) = &outcome {
        warn!(error = %err, "home fetch failed");
    }
    match state.update(|s| s.complete(outcome)) {
        Some(Ok(true)) => {
            info!("home view updated");
            true
        }
        Some(Ok(false)) => {
            debug!("home view already settled");
            false
        }
        Some(Err(err)) => {
            warn!(error = %err, "failed to store home fetch result");
            false
        }
        None => {
            debug!("home view deactivated, discarding fetch result");
            false
        }
    }
}

pub struct HomePage {
    source: Arc<dyn DataSource>,
    state: Option<Entity<HomeState>>,
    tasks: TaskTracker,
}

impl HomePage {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            state: None,
            tasks: TaskTracker::new(),
        }
    }

    /// Snapshot of the current activation's state, if active.
    pub fn state(&self) -> Option<HomeState> {
        self.state.as_ref().and_then(|s| s.snapshot().ok())
    }

    fn deactivate(&mut self) {
        let aborted = self.tasks.abort_all();
        if aborted > 0 {
            debug!(aborted, "cancelled outstanding home fetch");
        }
        self.state = None;
    }
}

impl Component for HomePage {
    fn on_enter(&mut self, cx: &mut Context<Self>) {
        // A reload re-enters without an exit in between.
        self.deactivate();

        let state = cx.app.new_entity(HomeState::Loading);
        cx.subscribe(&state);

        let weak = state.downgrade();
        let source = Arc::clone(&self.source);
        let handle = cx.spawn(async move {
            deliver(&weak, source.fetch_data().await);
        });
        self.tasks.track(handle);
        self.state = Some(state);
    }

    fn on_exit(&mut self, _cx: &mut Context<Self>) {
        self.deactivate();
    }

    fn on_shutdown(&mut self, _cx: &mut Context<Self>) {
        self.deactivate();
    }

    fn render(&mut self, frame: &mut ratatui::Frame, cx: &mut Context<Self>) {
        let state = self.state().unwrap_or(HomeState::Loading);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(cx.area);

        let intro = vec![
            Line::from(""),
            Line::styled(
                "Welcome to Rat SPA",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Line::styled(
                "This is a simple terminal single-page application.",
                Style::default().fg(Color::DarkGray),
            ),
        ];
        frame.render_widget(Paragraph::new(intro).alignment(Alignment::Center), chunks[0]);

        let (body, color) = match &state {
            HomeState::Loading => (LOADING_TEXT.to_string(), Color::Yellow),
            HomeState::Loaded(value) => (
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
                Color::Green,
            ),
            HomeState::Errored(message) => (format!("Error: {message}"), Color::Red),
        };

        let panel = Paragraph::new(body)
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(" Backend ")
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(color)),
            );
        frame.render_widget(panel, chunks[1]);
    }
}
