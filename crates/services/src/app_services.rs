use std::sync::Arc;

use bounce_core::model::{ApiSettings, CourseCatalog};
use bounce_core::TrackRegistry;
use storage::repository::Storage;

use crate::api::{ApiTransport, AuthClient, CommentClient};
use crate::error::AppServicesError;
use crate::identity::IdentityService;
use crate::progress_store::ProgressStore;
use crate::review_board::ReviewBoard;
use crate::sessions::SessionDeps;
use crate::Clock;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    catalog: Arc<CourseCatalog>,
    progress: ProgressStore,
    identity: IdentityService,
    reviews: ReviewBoard,
    comments: Arc<CommentClient>,
    auth: Arc<AuthClient>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or catalog loading fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        api: ApiSettings,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(storage, clock, api).await
    }

    /// Build services over a throwaway in-memory store.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the built-in catalog is invalid.
    pub async fn in_memory(clock: Clock) -> Result<Self, AppServicesError> {
        Self::from_storage(Storage::in_memory(), clock, ApiSettings::default()).await
    }

    /// # Errors
    ///
    /// Returns `AppServicesError` if the built-in catalog is invalid.
    pub async fn from_storage(
        storage: Storage,
        clock: Clock,
        api: ApiSettings,
    ) -> Result<Self, AppServicesError> {
        let catalog = Arc::new(CourseCatalog::builtin()?);
        let registry = Arc::new(TrackRegistry::builtin());
        let progress = ProgressStore::new(Arc::clone(&storage.kv), registry);
        let identity = IdentityService::load(Arc::clone(&storage.kv)).await;
        let reviews = ReviewBoard::new(Arc::clone(&storage.kv), clock);
        let transport = ApiTransport::new(api);
        let comments = Arc::new(CommentClient::new(transport.clone()));
        let auth = Arc::new(AuthClient::new(transport));

        Ok(Self {
            clock,
            catalog,
            progress,
            identity,
            reviews,
            comments,
            auth,
        })
    }

    /// Collaborators for a course screen.
    #[must_use]
    pub fn session_deps(&self) -> SessionDeps {
        SessionDeps {
            store: self.progress.clone(),
            catalog: Arc::clone(&self.catalog),
            clock: self.clock,
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CourseCatalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn progress(&self) -> ProgressStore {
        self.progress.clone()
    }

    #[must_use]
    pub fn registry(&self) -> &TrackRegistry {
        self.progress.registry()
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
