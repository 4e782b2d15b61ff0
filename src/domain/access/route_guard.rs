//! Session-presence based redirects.
//!
//! The guard only knows whether a request carries a valid session. It never
//! looks at the subscription.

/// Outcome of evaluating a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Protected path without a session.
    RedirectToLogin,
    /// Sign-in page while already signed in.
    RedirectToHome,
}

/// Path rules for the guard.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    protected_prefixes: Vec<String>,
    auth_prefix: String,
    auth_exempt: Vec<String>,
    login_path: String,
    home_path: String,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self {
            protected_prefixes: vec!["/dashboard".to_string(), "/subscription".to_string()],
            auth_prefix: "/auth".to_string(),
            auth_exempt: vec![
                "/auth/callback".to_string(),
                "/auth/signout".to_string(),
                "/auth/session".to_string(),
            ],
            login_path: "/auth/login".to_string(),
            home_path: "/dashboard".to_string(),
        }
    }
}

impl RouteGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds another protected prefix.
    pub fn protect(mut self, prefix: impl Into<String>) -> Self {
        self.protected_prefixes.push(prefix.into());
        self
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn home_path(&self) -> &str {
        &self.home_path
    }

    pub fn is_protected(&self, path: &str) -> bool {
        self.protected_prefixes
            .iter()
            .any(|prefix| matches_prefix(path, prefix))
    }

    pub fn is_auth_page(&self, path: &str) -> bool {
        matches_prefix(path, &self.auth_prefix)
            && !self.auth_exempt.iter().any(|exempt| matches_prefix(path, exempt))
    }

    pub fn decide(&self, path: &str, has_session: bool) -> GuardDecision {
        if !has_session && self.is_protected(path) {
            return GuardDecision::RedirectToLogin;
        }
        if has_session && self.is_auth_page(path) {
            return GuardDecision::RedirectToHome;
        }
        GuardDecision::Allow
    }
}

/// Segment-aware prefix match: `/dashboard` matches `/dashboard` and
/// `/dashboard/x` but not `/dashboards`.
fn matches_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
