//! Router module.
//!
//! `RouteTable` maps paths to views with a wildcard fallback; `Router` keeps the
//! current path and the back history.

pub mod history;
pub mod table;

pub use history::Router;
pub use table::{normalize, Resolved, RouteEntry, RouteTable, RouteTableBuilder};
