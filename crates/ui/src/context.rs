use std::sync::Arc;

use bounce_core::model::CourseCatalog;
use services::api::{AuthClient, CommentClient};
use services::{IdentityService, ProgressStore, ReviewBoard, SessionDeps};

/// What the UI needs from the composition root.
pub trait UiApp: Send + Sync {
    fn session_deps(&self) -> SessionDeps;
    fn identity(&self) -> IdentityService;
    fn reviews(&self) -> ReviewBoard;
    fn comments(&self) -> Arc<CommentClient>;
    fn auth(&self) -> Arc<AuthClient>;
}

#[derive(Clone)]
pub struct AppContext {
    session_deps: SessionDeps,
    identity: IdentityService,
    reviews: ReviewBoard,
    comments: Arc<CommentClient>,
    auth: Arc<AuthClient>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            session_deps: app.session_deps(),
            identity: app.identity(),
            reviews: app.reviews(),
            comments: app.comments(),
            auth: app.auth(),
        }
    }

    #[must_use]
    pub fn session_deps(&self) -> SessionDeps {
        self.session_deps.clone()
    }

    #[must_use]
    pub fn progress(&self) -> ProgressStore {
        self.session_deps.store.clone()
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CourseCatalog> {
        Arc::clone(&self.session_deps.catalog)
    }

    #[must_use]
    pub fn identity(&self) -> IdentityService {
        self.identity.clone()
    }

    #[must_use]
    pub fn reviews(&self) -> ReviewBoard {
        self.reviews.clone()
    }

    #[must_use]
    pub fn comments(&self) -> Arc<CommentClient> {
        Arc::clone(&self.comments)
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthClient> {
        Arc::clone(&self.auth)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
