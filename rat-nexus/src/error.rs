use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Failed to lock state: poisoned"))]
    LockPoisoned,

    #[snafu(display("Terminal error: {source}"))]
    Terminal { source: std::io::Error },

    #[snafu(display("Failed to start async runtime: {source}"))]
    Runtime { source: std::io::Error },

    #[snafu(display("Route table has no routes"))]
    EmptyRouteTable,

    #[snafu(display("Route '{path}' is registered twice"))]
    DuplicateRoute { path: String },

    #[snafu(display("Fallback '{path}' does not name a registered route"))]
    UnknownFallback { path: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
