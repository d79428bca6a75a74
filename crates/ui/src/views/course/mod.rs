mod account;
mod handle;
mod level;
mod overlays;
mod playground;
mod shell;
mod slot;

pub use level::CourseLevelView;
pub use playground::CourseView;
pub use shell::CourseShell;
