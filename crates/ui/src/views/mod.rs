mod completion;
mod course;
mod home;
mod intro;
mod reviews;
mod state;
mod user;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use completion::CourseCompleteView;
pub use course::{CourseLevelView, CourseShell, CourseView};
pub use home::HomeView;
pub use intro::IntroView;
pub use reviews::ReviewsView;
pub use state::{ViewError, ViewState, view_state_from_resource};
