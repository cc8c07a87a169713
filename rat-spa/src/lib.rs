//! A terminal single-page application: a navbar, two routed views, and a Home
//! view that renders the JSON returned by one backend request.

pub mod api;
pub mod app;
pub mod config;
pub mod logging;
pub mod model;
pub mod navbar;
pub mod pages;

#[cfg(test)]
mod testing;

pub use api::{ApiClient, DataSource, FetchError};
pub use app::Shell;
pub use config::Config;
