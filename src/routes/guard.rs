//! Route guard: gates shell pages behind an authenticated session.

use super::{match_path, Layout, Page, LOGIN_PATH};
use crate::session::SessionContext;

/// What the console should do for a requested path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Show `page` inside `layout`; `None` for the bare not-found page
    Render { page: Page, layout: Option<Layout> },
    Redirect { to: &'static str },
}

#[cfg(test)]
impl Resolution {
    pub fn page(&self) -> Option<Page> {
        match self {
            Resolution::Render { page, .. } => Some(*page),
            Resolution::Redirect { .. } => None,
        }
    }
}

pub struct RouteGuard<'a> {
    session: &'a SessionContext,
}

impl<'a> RouteGuard<'a> {
    pub fn new(session: &'a SessionContext) -> Self {
        Self { session }
    }

    /// Resolve `path`. The session is read on every call.
    pub fn resolve(&self, path: &str) -> Resolution {
        let Some(entry) = match_path(path) else {
            return Resolution::Render {
                page: Page::NotFound,
                layout: None,
            };
        };

        if entry.layout == Layout::Shell && !self.session.is_authenticated() {
            tracing::debug!("No session for {}, redirecting to {}", path, LOGIN_PATH);
            return Resolution::Redirect { to: LOGIN_PATH };
        }

        Resolution::Render {
            page: entry.page,
            layout: Some(entry.layout),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::routes::ROUTES;
    use crate::session::MemorySessionStore;

    fn context() -> SessionContext {
        SessionContext::load(Arc::new(MemorySessionStore::default())).unwrap()
    }

    #[test]
    fn test_every_shell_path_redirects_without_session() {
        let session = context();
        let guard = RouteGuard::new(&session);

        for entry in ROUTES.iter().filter(|r| r.layout == Layout::Shell) {
            assert_eq!(
                guard.resolve(entry.path),
                Resolution::Redirect { to: "/auth/login" },
                "{} should be guarded",
                entry.path
            );
        }
    }

    #[test]
    fn test_public_pages_render_without_session() {
        let session = context();
        let guard = RouteGuard::new(&session);

        assert_eq!(guard.resolve("/auth/login").page(), Some(Page::Login));
        assert_eq!(
            guard.resolve("/auth/forgot-password").page(),
            Some(Page::ForgotPassword)
        );
        assert_eq!(guard.resolve("/nope").page(), Some(Page::NotFound));
    }

    #[test]
    fn test_guard_follows_session_transitions() {
        let session = context();
        let guard = RouteGuard::new(&session);
        assert!(matches!(guard.resolve("/team"), Resolution::Redirect { .. }));

        session.sign_in("tok123").unwrap();
        assert_eq!(
            guard.resolve("/team"),
            Resolution::Render {
                page: Page::Team,
                layout: Some(Layout::Shell)
            }
        );

        session.sign_out().unwrap();
        assert!(matches!(guard.resolve("/team"), Resolution::Redirect { .. }));
    }
}
