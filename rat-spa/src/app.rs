//! Root component: navbar on top, the routed view below, a status line at the
//! bottom.

use crate::api::DataSource;
use crate::model::ViewId;
use crate::navbar::NavBar;
use crate::pages::{AboutPage, HomePage};
use crossterm::event::{KeyCode, KeyModifiers};
use rat_nexus::{Action, Component, Context, Event, EventContext, RouteTable, Router};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
};
use std::sync::Arc;
use tracing::info;

/// The application's route table: `/` and `/about`, everything else
/// redirected to `/`.
pub fn routes() -> rat_nexus::Result<RouteTable<ViewId>> {
    RouteTable::builder()
        .route("/", "Home", ViewId::Home)
        .route("/about", "About", ViewId::About)
        .fallback("/")
        .build()
}

pub struct Shell {
    routes: RouteTable<ViewId>,
    router: Router<String>,
    home: HomePage,
    about: AboutPage,
    /// Path typed into the goto prompt, while it is open.
    prompt: Option<String>,
}

impl Shell {
    pub fn new(source: Arc<dyn DataSource>, initial_path: &str) -> rat_nexus::Result<Self> {
        let routes = routes()?;
        let start = routes.resolve(initial_path);
        if start.redirected {
            info!(requested = initial_path, path = %start.path, "initial path redirected");
        }
        Ok(Self {
            router: Router::new(start.path),
            routes,
            home: HomePage::new(source),
            about: AboutPage,
            prompt: None,
        })
    }

    pub fn current_path(&self) -> &str {
        self.router.current()
    }

    pub fn current_view(&self) -> ViewId {
        self.routes.resolve(self.router.current()).view
    }

    pub fn home(&self) -> &HomePage {
        &self.home
    }

    fn enter_view(&mut self, view: ViewId, cx: &mut Context<Self>) {
        match view {
            ViewId::Home => self.home.on_enter(&mut cx.cast()),
            ViewId::About => self.about.on_enter(&mut cx.cast()),
        }
    }

    fn exit_view(&mut self, view: ViewId, cx: &mut Context<Self>) {
        match view {
            ViewId::Home => self.home.on_exit(&mut cx.cast()),
            ViewId::About => self.about.on_exit(&mut cx.cast()),
        }
    }

    /// Resolve `path` and switch views. Navigating to the displayed path is
    /// a no-op.
    pub fn navigate(&mut self, path: &str, cx: &mut Context<Self>) {
        let resolved = self.routes.resolve(path);
        if resolved.redirected {
            info!(requested = path, path = %resolved.path, "no route matched, redirecting");
        }
        if resolved.path == *self.router.current() {
            return;
        }

        let previous = self.current_view();
        self.exit_view(previous, cx);
        self.router.navigate(resolved.path);
        info!(path = %self.router.current(), view = ?resolved.view, "navigated");
        self.enter_view(resolved.view, cx);
    }

    pub fn go_back(&mut self, cx: &mut Context<Self>) {
        if !self.router.can_go_back() {
            return;
        }
        let previous = self.current_view();
        self.exit_view(previous, cx);
        self.router.go_back();
        info!(path = %self.router.current(), "navigated back");
        self.enter_view(self.current_view(), cx);
    }

    /// Re-activate the current view.
    pub fn reload(&mut self, cx: &mut Context<Self>) {
        let view = self.current_view();
        self.exit_view(view, cx);
        self.enter_view(view, cx);
    }

    /// The link `offset` places away from the active one.
    fn cycle_link(&self, offset: isize) -> Action {
        let paths: Vec<&str> = self.routes.paths().collect();
        let len = paths.len() as isize;
        let current = paths
            .iter()
            .position(|p| self.routes.is_active(p, self.router.current()))
            .unwrap_or(0) as isize;
        let next = (current + offset).rem_euclid(len) as usize;
        Action::Navigate(paths[next].to_string())
    }

    /// Edit the goto prompt. Enter turns the typed path into a navigation.
    fn prompt_key(&mut self, code: KeyCode) -> Option<Action> {
        let input = self.prompt.as_mut()?;
        match code {
            KeyCode::Char(c) => input.push(c),
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Esc => self.prompt = None,
            KeyCode::Enter => return self.prompt.take().map(Action::Navigate),
            _ => {}
        }
        None
    }

    fn key_action(&mut self, code: KeyCode, cx: &mut Context<Self>) -> Option<Action> {
        match code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('g') | KeyCode::Char(':') => {
                self.prompt = Some("/".to_string());
                None
            }
            KeyCode::Char('r') => {
                self.reload(cx);
                None
            }
            KeyCode::Tab | KeyCode::Right => Some(self.cycle_link(1)),
            KeyCode::BackTab | KeyCode::Left => Some(self.cycle_link(-1)),
            KeyCode::Esc | KeyCode::Backspace => Some(Action::Back),
            _ => None,
        }
    }

    /// Carry out a navigation action. Only `Quit` is passed up to the loop.
    fn apply(&mut self, action: Action, cx: &mut Context<Self>) -> Option<Action> {
        match action {
            Action::Navigate(path) => {
                self.navigate(&path, cx);
                None
            }
            Action::Back => {
                self.go_back(cx);
                None
            }
            Action::Quit => Some(Action::Quit),
        }
    }
}

impl Component for Shell {
    fn on_mount(&mut self, cx: &mut Context<Self>) {
        self.home.on_mount(&mut cx.cast());
        self.about.on_mount(&mut cx.cast());
    }

    fn on_enter(&mut self, cx: &mut Context<Self>) {
        self.enter_view(self.current_view(), cx);
    }

    fn on_exit(&mut self, cx: &mut Context<Self>) {
        self.exit_view(self.current_view(), cx);
    }

    fn on_shutdown(&mut self, cx: &mut Context<Self>) {
        self.home.on_shutdown(&mut cx.cast());
        self.about.on_shutdown(&mut cx.cast());
    }

    fn render(&mut self, frame: &mut ratatui::Frame, cx: &mut Context<Self>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
            .split(cx.area);

        frame.render_widget(NavBar::new(&self.routes, self.router.current()), chunks[0]);

        match self.current_view() {
            ViewId::Home => self.home.render(frame, &mut cx.cast().with_area(chunks[1])),
            ViewId::About => self.about.render(frame, &mut cx.cast().with_area(chunks[1])),
        }

        let status = match &self.prompt {
            Some(input) => Paragraph::new(format!(" Go to: {input}_"))
                .style(Style::default().bg(Color::Yellow).fg(Color::Black)),
            None => Paragraph::new(format!(
                " {} │ Tab Next │ g Go to │ r Reload │ Esc Back │ q Quit",
                self.router.current()
            ))
            .style(Style::default().bg(Color::Cyan).fg(Color::Black)),
        };
        frame.render_widget(status, chunks[2]);
    }

    fn handle_event(&mut self, event: Event, cx: &mut EventContext<Self>) -> Option<Action> {
        let action = match event {
            Event::Key(key) if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') => {
                Some(Action::Quit)
            }
            Event::Key(key) if self.prompt.is_some() => self.prompt_key(key.code),
            Event::Key(key) => self.key_action(key.code, cx),
            Event::Paste(text) => {
                if let Some(input) = self.prompt.as_mut() {
                    input.push_str(text.trim());
                }
                None
            }
            Event::Resize(..) => None,
        };
        action.and_then(|action| self.apply(action, cx))
    }
}
