//! Hard-navigation seam used when the session is torn down mid-request.

#[cfg(test)]
#[path = "navigator_test.rs"]
mod tests;

use std::sync::{Mutex, PoisonError};

use tracing::warn;

/// Forces a full navigation that discards in-flight application state.
pub trait Navigator: Send + Sync {
    fn hard_redirect(&self, path: &str);
}

/// Logs each forced redirect and remembers it until taken.
///
/// A terminal front end has no page to reload, so the caller polls
/// [`TracingNavigator::take_redirect`] after a failed request and acts on it.
#[derive(Debug, Default)]
pub struct TracingNavigator {
    redirects: Mutex<Vec<String>>,
}

impl TracingNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent pending redirect, clearing all pending ones.
    pub fn take_redirect(&self) -> Option<String> {
        let mut redirects = self.redirects.lock().unwrap_or_else(PoisonError::into_inner);
        let last = redirects.pop();
        redirects.clear();
        last
    }

    /// Every redirect recorded since the last take, oldest first.
    #[must_use]
    pub fn pending(&self) -> Vec<String> {
        self.redirects.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Navigator for TracingNavigator {
    fn hard_redirect(&self, path: &str) {
        warn!(target_path = path, "forcing redirect");
        self.redirects.lock().unwrap_or_else(PoisonError::into_inner).push(path.to_owned());
    }
}
