//! Client-side URL surface.
//!
//! Paths are parsed leniently: unknown shapes fall back to the intro screen,
//! and the course screens keep their raw segments so the session controller
//! can decide how to redirect.

use std::fmt;

use crate::model::{LevelId, TrackId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppRoute {
    Intro,
    Home,
    /// `/course/:track`, raw segment as typed.
    Course { track: String },
    /// `/course/:track/level/:levelId`, raw segments as typed.
    CourseLevel { track: String, level: String },
    CourseComplete { track: TrackId },
    Reviews,
}

impl AppRoute {
    #[must_use]
    pub fn course(track: TrackId) -> Self {
        Self::Course {
            track: track.as_str().to_string(),
        }
    }

    #[must_use]
    pub fn course_level(track: TrackId, level: LevelId) -> Self {
        Self::CourseLevel {
            track: track.as_str().to_string(),
            level: level.as_str().to_string(),
        }
    }

    /// Parse a path. Anything unrecognised lands on the intro screen.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["home"] => Self::Home,
            ["reviews"] => Self::Reviews,
            ["course", track] => Self::Course {
                track: (*track).to_string(),
            },
            ["course", track, "level", level] => Self::CourseLevel {
                track: (*track).to_string(),
                level: (*level).to_string(),
            },
            ["course-complete", track] => track
                .parse()
                .map_or(Self::Home, |track| Self::CourseComplete { track }),
            _ => Self::Intro,
        }
    }

    #[must_use]
    pub fn to_path(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AppRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppRoute::Intro => f.write_str("/intro"),
            AppRoute::Home => f.write_str("/home"),
            AppRoute::Course { track } => write!(f, "/course/{track}"),
            AppRoute::CourseLevel { track, level } => write!(f, "/course/{track}/level/{level}"),
            AppRoute::CourseComplete { track } => write!(f, "/course-complete/{track}"),
            AppRoute::Reviews => f.write_str("/reviews"),
        }
    }
}

/// A navigation the UI should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub route: AppRoute,
    /// Replace the current history entry instead of pushing.
    pub replace: bool,
}

impl Navigation {
    #[must_use]
    pub fn push(route: AppRoute) -> Self {
        Self {
            route,
            replace: false,
        }
    }

    #[must_use]
    pub fn replace(route: AppRoute) -> Self {
        Self {
            route,
            replace: true,
        }
    }
}
