use std::sync::Arc;

use bounce_core::time::fixed_clock;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::api::{AuthClient, CommentClient};
use services::{AppServices, IdentityService, ReviewBoard, SessionDeps};

use crate::context::{UiApp, build_app_context};
use crate::views::{CourseCompleteView, HomeView, IntroView, ReviewsView};

struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn session_deps(&self) -> SessionDeps {
        self.services.session_deps()
    }

    fn identity(&self) -> IdentityService {
        self.services.identity()
    }

    fn reviews(&self) -> ReviewBoard {
        self.services.reviews()
    }

    fn comments(&self) -> Arc<CommentClient> {
        self.services.comments()
    }

    fn auth(&self) -> Arc<AuthClient> {
        self.services.auth()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Intro,
    Home,
    Reviews,
    Completion(&'static str),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Intro => rsx! { IntroView {} },
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Reviews => rsx! { ReviewsView {} },
        ViewKind::Completion(track) => rsx! { CourseCompleteView { track: track.to_string() } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: AppServices,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild and let pending resources settle.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..3 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let services = AppServices::in_memory(fixed_clock())
        .await
        .expect("in-memory services");
    let app = Arc::new(TestApp {
        services: services.clone(),
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness { dom, services }
}
