#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod error;
pub mod identity;
pub mod level_resolver;
pub mod progress_store;
pub mod review_board;
pub mod sessions;

pub use bounce_core::Clock;

pub use app_services::AppServices;
pub use error::{
    ApiError, AppServicesError, IdentityError, ProgressStoreError, ReviewBoardError, SessionError,
};
pub use identity::IdentityService;
pub use level_resolver::{LevelSource, ResolvedLevel, resolve_initial_level};
pub use progress_store::ProgressStore;
pub use review_board::{Review, ReviewBoard, ReviewDraft};

pub use sessions::{
    CompletionStep, CourseMode, CourseProgress, MountOutcome, Overlay, SessionController,
    SessionDeps, TickOutcome,
};
