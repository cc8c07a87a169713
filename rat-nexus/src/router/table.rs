//! Path-based route tables.
//!
//! A table is built once at startup and never changes. Resolution is total:
//! any path that matches no entry is redirected to the fallback route.

use snafu::prelude::*;

use crate::error::{DuplicateRouteSnafu, EmptyRouteTableSnafu, UnknownFallbackSnafu};

/// A single route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry<V> {
    pub path: String,
    pub label: String,
    pub view: V,
}

/// Outcome of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<V> {
    /// Canonical path the router should hold. For redirects this is the
    /// fallback route's path, not the requested one.
    pub path: String,
    pub view: V,
    pub redirected: bool,
}

#[derive(Debug, Clone)]
pub struct RouteTable<V> {
    entries: Vec<RouteEntry<V>>,
    fallback: usize,
}

#[derive(Debug)]
pub struct RouteTableBuilder<V> {
    entries: Vec<RouteEntry<V>>,
    fallback: Option<String>,
}

impl<V> RouteTableBuilder<V> {
    pub fn route(mut self, path: &str, label: impl Into<String>, view: V) -> Self {
        self.entries.push(RouteEntry {
            path: normalize(path),
            label: label.into(),
            view,
        });
        self
    }

    /// Route that unmatched paths redirect to. Defaults to the first route.
    pub fn fallback(mut self, path: &str) -> Self {
        self.fallback = Some(path.to_string());
        self
    }

    pub fn build(self) -> crate::Result<RouteTable<V>> {
        ensure!(!self.entries.is_empty(), EmptyRouteTableSnafu);

        for (i, entry) in self.entries.iter().enumerate() {
            let seen = self.entries[..i].iter().any(|e| e.path == entry.path);
            ensure!(!seen, DuplicateRouteSnafu { path: entry.path.clone() });
        }

        let fallback = match self.fallback {
            Some(path) => {
                let target = normalize(&path);
                self.entries
                    .iter()
                    .position(|e| e.path == target)
                    .context(UnknownFallbackSnafu { path })?
            }
            None => 0,
        };

        Ok(RouteTable {
            entries: self.entries,
            fallback,
        })
    }
}

impl<V> RouteTable<V> {
    pub fn builder() -> RouteTableBuilder<V> {
        RouteTableBuilder {
            entries: Vec::new(),
            fallback: None,
        }
    }

    /// Navigable routes in declaration order.
    pub fn links(&self) -> impl Iterator<Item = &RouteEntry<V>> {
        self.entries.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.path.as_str())
    }

    /// Path of the route unmatched paths redirect to.
    pub fn default_path(&self) -> &str {
        &self.entries[self.fallback].path
    }

    /// Whether the link for `link` should be marked active while `current`
    /// is displayed. The default route and `/` only match exactly; any other
    /// route also matches paths nested below it.
    pub fn is_active(&self, link: &str, current: &str) -> bool {
        let link = normalize(link);
        let current = normalize(current);
        if link == "/" || link == self.default_path() {
            return current == link;
        }
        current == link
            || current
                .strip_prefix(link.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl<V: Clone> RouteTable<V> {
    pub fn resolve(&self, path: &str) -> Resolved<V> {
        let path = normalize(path);
        match self.entries.iter().find(|e| e.path == path) {
            Some(entry) => Resolved {
                path,
                view: entry.view.clone(),
                redirected: false,
            },
            None => {
                let entry = &self.entries[self.fallback];
                Resolved {
                    path: entry.path.clone(),
                    view: entry.view.clone(),
                    redirected: true,
                }
            }
        }
    }
}

/// Canonical form of a path: leading `/`, no empty segments, no trailing
/// `/`, query and fragment dropped.
pub fn normalize(path: &str) -> String {
    let path = path.trim();
    let end = path.find(|c| c == '?' || c == '#').unwrap_or(path.len());
    let segments: Vec<&str> = path[..end].split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum View {
        Home,
        About,
        Docs,
    }

    fn table() -> RouteTable<View> {
        RouteTable::builder()
            .route("/", "Home", View::Home)
            .route("/about", "About", View::About)
            .fallback("/")
            .build()
            .unwrap()
    }

    #[test]
    fn normalize_canonicalizes_paths() {
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("about"), "/about");
        assert_eq!(normalize("/about/"), "/about");
        assert_eq!(normalize("//about//team/"), "/about/team");
        assert_eq!(normalize("/about?tab=1#top"), "/about");
        assert_eq!(normalize("  /about "), "/about");
    }

    #[test]
    fn resolves_registered_paths_exactly() {
        let table = table();
        let home = table.resolve("/");
        assert_eq!(home, Resolved { path: "/".into(), view: View::Home, redirected: false });

        let about = table.resolve("/about/");
        assert_eq!(about, Resolved { path: "/about".into(), view: View::About, redirected: false });
    }

    #[test]
    fn unmatched_paths_redirect_to_fallback() {
        let table = table();
        for path in ["/nonexistent", "/about/team", "/ABOUT", "/**"] {
            let resolved = table.resolve(path);
            assert_eq!(resolved.view, View::Home, "{path}");
            assert_eq!(resolved.path, "/");
            assert!(resolved.redirected);
        }
    }

    #[test]
    fn fallback_defaults_to_first_route() {
        let table = RouteTable::builder()
            .route("/docs", "Docs", View::Docs)
            .route("/about", "About", View::About)
            .build()
            .unwrap();
        assert_eq!(table.default_path(), "/docs");
        assert_eq!(table.resolve("/missing").view, View::Docs);
    }

    #[test]
    fn links_cover_every_non_wildcard_path() {
        let configs: Vec<Vec<(&str, View)>> = vec![
            vec![("/", View::Home)],
            vec![("/", View::Home), ("/about", View::About)],
            vec![("/docs", View::Docs), ("/", View::Home), ("/about/team", View::About)],
        ];

        for routes in configs {
            let mut builder = RouteTable::builder();
            for (path, view) in &routes {
                builder = builder.route(path, format!("{view:?}"), *view);
            }
            let table = builder.build().unwrap();

            let mut links: Vec<&str> = table.links().map(|e| e.path.as_str()).collect();
            let mut expected: Vec<&str> = routes.iter().map(|(p, _)| *p).collect();
            links.sort_unstable();
            expected.sort_unstable();
            assert_eq!(links, expected);
        }
    }

    #[test]
    fn default_route_is_active_only_on_exact_match() {
        let table = table();
        assert!(table.is_active("/", "/"));
        assert!(!table.is_active("/", "/about"));
        assert!(table.is_active("/about", "/about"));
        assert!(table.is_active("/about", "/about/team"));
        assert!(!table.is_active("/about", "/aboutus"));
        assert!(!table.is_active("/about", "/"));
    }

    #[test]
    fn build_rejects_invalid_tables() {
        let empty = RouteTable::<View>::builder().build();
        assert!(matches!(empty, Err(crate::Error::EmptyRouteTable)));

        let duplicate = RouteTable::builder()
            .route("/about", "About", View::About)
            .route("/about/", "Again", View::Docs)
            .build();
        assert!(matches!(duplicate, Err(crate::Error::DuplicateRoute { path }) if path == "/about"));

        let unknown = RouteTable::builder()
            .route("/", "Home", View::Home)
            .fallback("/missing")
            .build();
        assert!(matches!(unknown, Err(crate::Error::UnknownFallback { .. })));
    }
}
