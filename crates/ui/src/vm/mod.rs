mod auth_flow;
mod course_vm;
mod home_vm;
mod keys;
mod review_vm;
mod time_fmt;

pub use auth_flow::{
    AuthStep, step_after_rejection, validate_email, validate_new_password, validate_otp,
    validate_registration,
};
pub use course_vm::{CourseScreenVm, RoadmapEntryVm, map_course_screen};
pub use home_vm::{TrackCardVm, map_track_cards};
pub use keys::{Direction, apply_key};
pub use review_vm::{ReviewCardVm, map_review_cards};
