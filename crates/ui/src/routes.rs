use std::sync::{Arc, Mutex};

use bounce_core::route::{AppRoute, Navigation};
use dioxus::prelude::*;
use dioxus_router::{Link, Navigator, Outlet, Routable, use_navigator};

use crate::views::{
    CourseCompleteView, CourseLevelView, CourseShell, CourseView, HomeView, IntroView,
    ReviewsView,
};

#[derive(Clone, Debug, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[redirect("/", || Route::Intro {})]
    #[route("/intro", IntroView)] Intro {},
    #[layout(Layout)]
        #[route("/home", HomeView)] Home {},
        #[nest("/course/:track")]
            #[layout(CourseShell)]
                #[route("/", CourseView)] Course { track: String },
                #[route("/level/:level_id", CourseLevelView)] CourseLevel { track: String, level_id: String },
            #[end_layout]
        #[end_nest]
        #[route("/course-complete/:track", CourseCompleteView)] CourseComplete { track: String },
        #[route("/reviews", ReviewsView)] Reviews {},
    #[end_layout]
    #[route("/:..segments")] NotFound { segments: Vec<String> },
}

impl From<AppRoute> for Route {
    fn from(route: AppRoute) -> Self {
        match route {
            AppRoute::Intro => Route::Intro {},
            AppRoute::Home => Route::Home {},
            AppRoute::Course { track } => Route::Course { track },
            AppRoute::CourseLevel { track, level } => Route::CourseLevel {
                track,
                level_id: level,
            },
            AppRoute::CourseComplete { track } => Route::CourseComplete {
                track: track.as_str().to_string(),
            },
            AppRoute::Reviews => Route::Reviews {},
        }
    }
}

/// Path handed in by the launcher, opened once by the first screen.
#[derive(Clone, Default)]
pub struct StartRoute(Arc<Mutex<Option<AppRoute>>>);

impl StartRoute {
    #[must_use]
    pub fn new(path: &str) -> Self {
        Self(Arc::new(Mutex::new(Some(AppRoute::parse(path)))))
    }

    /// Yields the parsed route the first time only.
    pub fn take(&self) -> Option<Route> {
        let route = self.0.lock().ok()?.take()?;
        Some(Route::from(route))
    }
}

/// Apply a navigation requested by the services layer.
pub fn navigate(navigator: Navigator, navigation: Navigation) {
    tracing::debug!(
        path = %navigation.route.to_path(),
        replace = navigation.replace,
        "navigate"
    );
    let route = Route::from(navigation.route);
    if navigation.replace {
        navigator.replace(route);
    } else {
        navigator.push(route);
    }
}

/// Unknown paths land on the intro screen.
#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let navigator = use_navigator();
    use_effect(move || {
        tracing::debug!(?segments, "unknown path, showing intro");
        navigator.replace(Route::Intro {});
    });
    rsx! {}
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Header {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Header() -> Element {
    rsx! {
        nav { class: "header",
            Link { class: "brand", to: Route::Intro {}, "Bounce" }
            ul {
                li { Link { to: Route::Home {}, "Tracks" } }
                li { Link { to: Route::Reviews {}, "Reviews" } }
            }
        }
    }
}
