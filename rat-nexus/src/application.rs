//! Application loop and the contexts handed to components.

use crate::component::traits::{Action, AnyComponent, Component, Event};
use crate::error::{RuntimeSnafu, TerminalSnafu};
use crate::state::Entity;
use crate::task::TaskHandle;
use crossterm::{
    event::{
        DisableBracketedPaste, EnableBracketedPaste, Event as CrosstermEvent, EventStream,
        KeyEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use snafu::ResultExt;
use std::future::Future;
use std::io::{self, stdout};
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::{debug, info};

type SharedRoot = Arc<Mutex<dyn AnyComponent>>;

/// Application context providing access to global services.
#[derive(Clone)]
pub struct AppContext {
    root: Arc<Mutex<Option<SharedRoot>>>,
    re_render_tx: mpsc::UnboundedSender<()>,
}

impl AppContext {
    /// Create a context together with the receiving end of its re-render
    /// channel. `Application::run` drives the receiver; tests may hold it
    /// directly.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<()>) {
        let (re_render_tx, re_render_rx) = mpsc::unbounded_channel();
        let cx = Self {
            root: Arc::new(Mutex::new(None)),
            re_render_tx,
        };
        (cx, re_render_rx)
    }

    pub fn new_entity<T>(&self, value: T) -> Entity<T>
    where
        T: Send + Sync + 'static,
    {
        Entity::new(value)
    }

    /// Spawn a future on the runtime. The returned handle can abort it.
    pub fn spawn<Fut>(&self, future: Fut) -> TaskHandle
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        TaskHandle::spawn(future)
    }

    /// Set the root component of the application.
    pub fn set_root<C: Component>(&self, root: C) -> crate::Result<()> {
        let root: SharedRoot = Arc::new(Mutex::new(root));
        let mut guard = self.root.lock().map_err(|_| crate::Error::LockPoisoned)?;
        *guard = Some(root);
        drop(guard);
        self.refresh();
        Ok(())
    }

    fn take_root(&self) -> crate::Result<Option<SharedRoot>> {
        let guard = self.root.lock().map_err(|_| crate::Error::LockPoisoned)?;
        Ok(guard.clone())
    }

    /// Request a re-render.
    pub fn refresh(&self) {
        let _ = self.re_render_tx.send(());
    }
}

/// Context passed to component methods, typed by the component it is lent to.
pub struct Context<V: ?Sized> {
    pub app: AppContext,
    pub area: Rect,
    view: PhantomData<fn(&V)>,
}

impl<V: ?Sized> Context<V> {
    pub fn new(app: AppContext, area: Rect) -> Self {
        Self {
            app,
            area,
            view: PhantomData,
        }
    }

    /// Lend this context to a child component.
    pub fn cast<U: ?Sized>(&self) -> Context<U> {
        Context::new(self.app.clone(), self.area)
    }

    /// The same context restricted to a sub-area.
    pub fn with_area(mut self, area: Rect) -> Self {
        self.area = area;
        self
    }

    /// Re-render whenever `entity` changes. The forwarding task ends once the
    /// entity and every weak handle to it are gone.
    pub fn subscribe<T>(&self, entity: &Entity<T>)
    where
        T: Send + Sync + 'static,
    {
        let mut rx = entity.subscribe();
        let tx = self.app.re_render_tx.clone();
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                if tx.send(()).is_err() {
                    break;
                }
            }
        });
    }

    pub fn spawn<Fut>(&self, future: Fut) -> TaskHandle
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.app.spawn(future)
    }
}

/// Event handling shares the render context type.
pub type EventContext<V> = Context<V>;

/// Main application handle.
#[derive(Default)]
pub struct Application;

impl Application {
    pub fn new() -> Self {
        Self
    }

    /// Build the component tree with `setup`, then drive it until a component
    /// returns `Action::Quit` or the input stream ends.
    pub fn run<F>(self, setup: F) -> anyhow::Result<()>
    where
        F: FnOnce(&AppContext) -> anyhow::Result<()>,
    {
        let rt = Runtime::new().context(RuntimeSnafu)?;
        let (app, re_render_rx) = AppContext::new();

        {
            let _guard = rt.enter();
            setup(&app)?;
        }

        let root: SharedRoot = match app.take_root()? {
            Some(root) => root,
            None => Arc::new(Mutex::new(EmptyView)),
        };

        rt.block_on(async move { self.run_loop(app, root, re_render_rx).await })
    }

    async fn run_loop(
        &self,
        app: AppContext,
        root: SharedRoot,
        re_render_rx: mpsc::UnboundedReceiver<()>,
    ) -> anyhow::Result<()> {
        enable_raw_mode().context(TerminalSnafu)?;
        let mut out = stdout();
        execute!(out, EnterAlternateScreen, EnableBracketedPaste).context(TerminalSnafu)?;
        let backend = CrosstermBackend::new(out);
        let mut terminal = Terminal::new(backend).context(TerminalSnafu)?;

        let result = self.run_app_loop(app, &mut terminal, root, re_render_rx).await;

        disable_raw_mode().context(TerminalSnafu)?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        )
        .context(TerminalSnafu)?;
        terminal.show_cursor().context(TerminalSnafu)?;

        result
    }

    async fn run_app_loop(
        &self,
        app: AppContext,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        root: SharedRoot,
        mut re_render_rx: mpsc::UnboundedReceiver<()>,
    ) -> anyhow::Result<()> {
        {
            let size = terminal.size().context(TerminalSnafu)?;
            let area = Rect::new(0, 0, size.width, size.height);
            let mut cx = Context::<dyn AnyComponent>::new(app.clone(), area);
            let mut guard = root.lock().map_err(|_| crate::Error::LockPoisoned)?;
            guard.on_mount_any(&mut cx);
            guard.on_enter_any(&mut cx);
        }
        info!("application started");

        let mut events = EventStream::new();
        app.refresh();

        loop {
            tokio::select! {
                Some(()) = re_render_rx.recv() => {
                    // Collapse queued requests into one frame.
                    while re_render_rx.try_recv().is_ok() {}

                    let mut guard = root.lock().map_err(|_| crate::Error::LockPoisoned)?;
                    terminal
                        .draw(|frame| {
                            let mut cx = Context::<dyn AnyComponent>::new(app.clone(), frame.area());
                            guard.render_any(frame, &mut cx);
                        })
                        .context(TerminalSnafu)?;
                }
                next = events.next() => {
                    let crossterm_event = match next {
                        Some(event) => event.context(TerminalSnafu)?,
                        None => {
                            debug!("input stream closed");
                            let size = terminal.size().context(TerminalSnafu)?;
                            let mut cx = Context::new(app.clone(), Rect::new(0, 0, size.width, size.height));
                            shut_down(&root, &mut cx)?;
                            return Ok(());
                        }
                    };
                    let Some(event) = translate(crossterm_event) else {
                        continue;
                    };

                    let size = terminal.size().context(TerminalSnafu)?;
                    let area = Rect::new(0, 0, size.width, size.height);
                    let mut cx = Context::<dyn AnyComponent>::new(app.clone(), area);
                    let action = {
                        let mut guard = root.lock().map_err(|_| crate::Error::LockPoisoned)?;
                        guard.handle_event_any(event, &mut cx)
                    };
                    app.refresh();

                    if let Some(Action::Quit) = action {
                        shut_down(&root, &mut cx)?;
                        return Ok(());
                    }
                }
            }
        }
    }
}

/// Deactivate and shut down the root. Both loop exits end here.
fn shut_down(root: &SharedRoot, cx: &mut Context<dyn AnyComponent>) -> crate::Result<()> {
    let mut guard = root.lock().map_err(|_| crate::Error::LockPoisoned)?;
    guard.on_exit_any(cx);
    guard.on_shutdown_any(cx);
    info!("application shutting down");
    Ok(())
}

fn translate(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
        CrosstermEvent::Paste(s) => Some(Event::Paste(s)),
        _ => None,
    }
}

struct EmptyView;

impl Component for EmptyView {
    fn render(&mut self, frame: &mut ratatui::Frame, cx: &mut Context<Self>) {
        let paragraph = ratatui::widgets::Paragraph::new("No component set")
            .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(paragraph, cx.area);
    }
}
