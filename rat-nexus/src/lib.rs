//! Reactive TUI runtime: an application loop, routed components, observable
//! state and tracked background tasks.

pub mod application;
pub mod component;
pub mod state;
pub mod router;
pub mod task;
pub mod error;

pub use error::{Error, Result};

// Re-export common types for convenience
pub use application::{Application, AppContext, Context, EventContext};
pub use component::{Component, traits::{Event, Action, AnyComponent}};
pub use state::{Entity, WeakEntity};
pub use router::{Resolved, RouteTable, RouteTableBuilder, Router};
pub use task::{TaskHandle, TaskTracker};
