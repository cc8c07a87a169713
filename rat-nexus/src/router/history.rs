//! Navigation history.

/// Tracks the current route and the routes visited before it.
///
/// # Example
/// ```
/// use rat_nexus::Router;
///
/// let mut router = Router::new("/".to_string());
/// router.navigate("/about".to_string());
/// assert_eq!(router.current(), "/about");
/// router.go_back();
/// assert_eq!(router.current(), "/");
/// ```
#[derive(Debug, Clone)]
pub struct Router<R: Clone + PartialEq> {
    current: R,
    history: Vec<R>,
}

impl<R: Clone + PartialEq> Router<R> {
    pub fn new(initial: R) -> Self {
        Self {
            current: initial,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> &R {
        &self.current
    }

    /// Navigate to a new route. The current route is pushed to history.
    /// Returns false when `route` is already current.
    pub fn navigate(&mut self, route: R) -> bool {
        if self.current == route {
            return false;
        }
        let previous = std::mem::replace(&mut self.current, route);
        self.history.push(previous);
        true
    }

    /// Go back to the previous route. Returns true if successful.
    pub fn go_back(&mut self) -> bool {
        if let Some(prev) = self.history.pop() {
            self.current = prev;
            true
        } else {
            false
        }
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}
