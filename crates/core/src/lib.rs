#![forbid(unsafe_code)]

pub mod model;
pub mod playground;
pub mod registry;
pub mod route;
pub mod time;

pub use registry::TrackRegistry;
pub use time::Clock;
