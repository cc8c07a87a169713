//! Shared test helpers.

use crate::api::{DataSource, FetchError};
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rat_nexus::Event;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::{Frame, Terminal};
use reqwest::StatusCode;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// URL of a local port nothing listens on.
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

pub fn draw<F>(width: u16, height: u16, f: F) -> Buffer
where
    F: FnOnce(&mut Frame),
{
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(f).unwrap();
    terminal.backend().buffer().clone()
}

/// Buffer contents, one line per row.
pub fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

pub fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

pub fn ctrl(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

pub enum Reply {
    Payload(Value),
    Failure(StatusCode),
}

/// Scripted `DataSource`. When gated, every call waits for one
/// `Notify::notify_one` before replying.
pub struct FakeSource {
    reply: Reply,
    gate: Option<Arc<Notify>>,
    calls: AtomicUsize,
}

impl FakeSource {
    pub fn payload(value: Value) -> Self {
        Self { reply: Reply::Payload(value), gate: None, calls: AtomicUsize::new(0) }
    }

    pub fn failure(status: StatusCode) -> Self {
        Self { reply: Reply::Failure(status), gate: None, calls: AtomicUsize::new(0) }
    }

    pub fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataSource for FakeSource {
    async fn fetch_data(&self) -> Result<Value, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.reply {
            Reply::Payload(value) => Ok(value.clone()),
            Reply::Failure(status) => Err(FetchError::Status {
                status: *status,
                body: String::new(),
            }),
        }
    }
}
