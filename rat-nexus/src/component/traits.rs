use crate::application::{Context, EventContext};
use std::any::Any;

/// Input delivered to components.
#[derive(Debug, Clone)]
pub enum Event {
    Key(crossterm::event::KeyEvent),
    Resize(u16, u16),
    /// Bracketed paste.
    Paste(String),
}

/// Action that a component can return after handling an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Navigate to a path; the router resolves it.
    Navigate(String),
    Back,
    Quit,
}

/// The core Component trait.
///
/// Lifecycle, in order: `on_mount` once when the tree is built, then
/// `on_enter`/`on_exit` around every activation, then `on_shutdown` once.
pub trait Component: Send + Sync + 'static {
    fn on_mount(&mut self, cx: &mut Context<Self>) {
        let _ = cx;
    }

    /// Called each time the component becomes the active view.
    fn on_enter(&mut self, cx: &mut Context<Self>) {
        let _ = cx;
    }

    /// Called when the component stops being the active view.
    fn on_exit(&mut self, cx: &mut Context<Self>) {
        let _ = cx;
    }

    fn on_shutdown(&mut self, cx: &mut Context<Self>) {
        let _ = cx;
    }

    /// Render the component into `cx.area`.
    fn render(&mut self, frame: &mut ratatui::Frame, cx: &mut Context<Self>);

    fn handle_event(&mut self, event: Event, cx: &mut EventContext<Self>) -> Option<Action> {
        let _ = event;
        let _ = cx;
        None
    }
}

/// A dyn-compatible version of the Component trait.
pub trait AnyComponent: Any + Send + Sync + 'static {
    fn on_mount_any(&mut self, cx: &mut Context<dyn AnyComponent>);
    fn on_enter_any(&mut self, cx: &mut Context<dyn AnyComponent>);
    fn on_exit_any(&mut self, cx: &mut Context<dyn AnyComponent>);
    fn on_shutdown_any(&mut self, cx: &mut Context<dyn AnyComponent>);
    fn render_any(&mut self, frame: &mut ratatui::Frame, cx: &mut Context<dyn AnyComponent>);
    fn handle_event_any(&mut self, event: Event, cx: &mut EventContext<dyn AnyComponent>) -> Option<Action>;
}

impl<T: Component> AnyComponent for T {
    fn on_mount_any(&mut self, cx: &mut Context<dyn AnyComponent>) {
        self.on_mount(&mut cx.cast());
    }

    fn on_enter_any(&mut self, cx: &mut Context<dyn AnyComponent>) {
        self.on_enter(&mut cx.cast());
    }

    fn on_exit_any(&mut self, cx: &mut Context<dyn AnyComponent>) {
        self.on_exit(&mut cx.cast());
    }

    fn on_shutdown_any(&mut self, cx: &mut Context<dyn AnyComponent>) {
        self.on_shutdown(&mut cx.cast());
    }

    fn render_any(&mut self, frame: &mut ratatui::Frame, cx: &mut Context<dyn AnyComponent>) {
        self.render(frame, &mut cx.cast());
    }

    fn handle_event_any(&mut self, event: Event, cx: &mut EventContext<dyn AnyComponent>) -> Option<Action> {
        self.handle_event(event, &mut cx.cast())
    }
}
