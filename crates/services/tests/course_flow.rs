use chrono::Duration;

use bounce_core::model::{LevelId, SectionProgress, TrackId};
use bounce_core::playground::{HeldKeys, Viewport};
use bounce_core::route::{AppRoute, Navigation};
use bounce_core::time::fixed_now;
use services::sessions::{retry_track, start_track};
use services::{
    AppServices, Clock, CompletionStep, CourseMode, MountOutcome, Overlay, SessionController,
    TickOutcome,
};

async fn services() -> AppServices {
    AppServices::in_memory(Clock::fixed(fixed_now()))
        .await
        .unwrap()
}

async fn mount(
    services: &AppServices,
    track: &str,
    level: Option<&str>,
) -> (Box<SessionController>, Option<Navigation>) {
    match SessionController::mount(services.session_deps(), Some(track), level)
        .await
        .unwrap()
    {
        MountOutcome::Ready(controller, navigation) => (controller, navigation),
        MountOutcome::Redirect(navigation) => panic!("unexpected redirect to {}", navigation.route),
    }
}

#[tokio::test]
async fn unknown_track_redirects_home() {
    let services = services().await;
    let outcome = SessionController::mount(services.session_deps(), Some("not-a-real-track"), None)
        .await
        .unwrap();
    let MountOutcome::Redirect(navigation) = outcome else {
        panic!("expected a redirect");
    };
    assert_eq!(navigation, Navigation::replace(AppRoute::Home));
}

#[tokio::test]
async fn track_progress_never_leaks_across_tracks() {
    let services = services().await;
    let store = services.progress();
    store
        .persist_progress(TrackId::GameDev, LevelId::GameArch, None)
        .await
        .unwrap();

    assert_eq!(
        store.load_track_progress(TrackId::SystemDesign).await,
        Some(LevelId::BackendLanguages)
    );
    assert_eq!(
        store.load_track_progress(TrackId::GameDev).await,
        Some(LevelId::GameArch)
    );
}

#[tokio::test]
async fn full_reset_only_touches_its_track() {
    let services = services().await;
    let store = services.progress();
    for level in [LevelId::BackendLanguages, LevelId::ClientServer, LevelId::GameIntro] {
        store.mark_level_complete(level).await.unwrap();
    }
    store.mark_level_complete(LevelId::GameIntro).await.unwrap();
    store
        .persist_progress(TrackId::SystemDesign, LevelId::Caching, None)
        .await
        .unwrap();

    store.full_reset_track(TrackId::SystemDesign).await.unwrap();

    assert_eq!(store.read_completed_levels().await.as_slice(), &[LevelId::GameIntro]);
    let record = store.load_stored_progress().await.unwrap();
    assert_eq!(record.track(), TrackId::SystemDesign);
    assert_eq!(record.level(), LevelId::BackendLanguages);
}

#[tokio::test]
async fn deep_link_beats_stored_progress() {
    let services = services().await;
    services
        .progress()
        .persist_progress(TrackId::SystemDesign, LevelId::Docker, None)
        .await
        .unwrap();

    let (controller, navigation) = mount(&services, "system-design", Some("LEVEL_CACHING")).await;
    assert_eq!(navigation, None);
    assert_eq!(controller.level(), LevelId::Caching);
    assert_eq!(controller.mode(), CourseMode::InLevel(LevelId::Caching));
    assert_eq!(
        services.progress().load_stored_progress().await.unwrap().level(),
        LevelId::Caching
    );
}

#[tokio::test]
async fn stored_progress_resumes_in_playground() {
    let services = services().await;
    services
        .progress()
        .persist_progress(
            TrackId::GameDev,
            LevelId::GamePhysics,
            Some(SectionProgress::new(2, 4)),
        )
        .await
        .unwrap();

    let (controller, navigation) = mount(&services, "game-dev", None).await;
    assert_eq!(navigation, None);
    assert_eq!(controller.level(), LevelId::GamePhysics);
    assert_eq!(controller.level_index(), 3);
    assert!(controller.mode().is_playground());
    assert_eq!(controller.section(), Some(SectionProgress::new(2, 4)));
    assert_eq!(controller.progress().percent(), 58);
}

#[tokio::test]
async fn alias_and_invalid_level_are_rewritten() {
    let services = services().await;
    let (controller, navigation) = mount(&services, "game", Some("CASE_UBER")).await;
    assert_eq!(
        navigation,
        Some(Navigation::replace(AppRoute::course(TrackId::GameDev)))
    );
    assert_eq!(controller.level(), LevelId::GameIntro);
    assert!(controller.mode().is_playground());
}

#[tokio::test]
async fn route_change_to_foreign_level_returns_to_playground() {
    let services = services().await;
    let (mut controller, _) = mount(&services, "cybersecurity", Some("LEVEL_CYBER_AES")).await;
    assert!(controller.open_overlay(Overlay::CodeViewer));

    let navigation = controller.apply_route(Some("LEVEL_DOCKER")).await.unwrap();
    assert_eq!(
        navigation,
        Some(Navigation::replace(AppRoute::course(TrackId::Cybersecurity)))
    );
    assert!(controller.mode().is_playground());
    assert_eq!(controller.overlay(), None);
    assert_eq!(controller.level(), LevelId::CyberAes);

    assert_eq!(controller.apply_route(Some("LEVEL_CYBER_RSA")).await.unwrap(), None);
    assert_eq!(controller.mode(), CourseMode::InLevel(LevelId::CyberRsa));
}

#[tokio::test]
async fn quiz_is_shown_before_advancing() {
    let services = services().await;
    let (mut controller, _) =
        mount(&services, "system-design", Some("LEVEL_CLIENT_SERVER")).await;

    let step = controller.complete_level().await.unwrap();
    assert_eq!(step, CompletionStep::QuizShown);
    assert_eq!(controller.overlay(), Some(Overlay::Quiz));
    assert!(controller.completed().contains(LevelId::ClientServer));
    assert_eq!(
        controller.complete_level().await.unwrap(),
        CompletionStep::Ignored
    );

    let step = controller.close_quiz().await.unwrap();
    assert_eq!(
        step,
        CompletionStep::Advanced {
            next: LevelId::LoadBalancer,
            navigation: Navigation::push(AppRoute::course(TrackId::SystemDesign)),
        }
    );
    assert!(controller.mode().is_playground());
    assert_eq!(controller.overlay(), None);
    assert_eq!(
        services.progress().load_stored_progress().await.unwrap().level(),
        LevelId::LoadBalancer
    );
}

#[tokio::test]
async fn finishing_last_level_completes_course() {
    let services = services().await;
    let (mut controller, _) = mount(&services, "case-studies", None).await;

    assert_eq!(controller.jump_to_level(4).await.unwrap(), None);
    assert_eq!(controller.level(), LevelId::CaseUrlShortener);

    let navigation = controller.jump_to_level(3).await.unwrap();
    assert_eq!(
        navigation,
        Some(Navigation::push(AppRoute::course_level(
            TrackId::CaseStudies,
            LevelId::QuadtreeDeepDive
        )))
    );

    let step = controller.complete_level().await.unwrap();
    assert_eq!(
        step,
        CompletionStep::CourseComplete(Navigation::push(AppRoute::CourseComplete {
            track: TrackId::CaseStudies
        }))
    );
    assert_eq!(controller.progress().completed_in_track, 1);
}

#[tokio::test]
async fn playground_walks_into_level_and_suspends_under_overlays() {
    let services = services().await;
    let (mut controller, _) = mount(&services, "game-dev", None).await;
    let viewport = Viewport::default();

    assert!(!controller.open_overlay(Overlay::Quiz));
    assert!(controller.open_overlay(Overlay::Roadmap));
    let right = HeldKeys {
        right: true,
        ..HeldKeys::default()
    };
    assert_eq!(
        controller.tick(right, viewport).await.unwrap(),
        TickOutcome::Suspended
    );
    controller.close_overlay();

    let down = HeldKeys {
        down: true,
        ..HeldKeys::default()
    };
    for _ in 0..40 {
        controller.tick(down, viewport).await.unwrap();
    }

    let mut entered = None;
    for _ in 0..200 {
        if let TickOutcome::EnteredLevel(navigation) = controller.tick(right, viewport).await.unwrap() {
            entered = Some(navigation);
            break;
        }
    }
    assert_eq!(
        entered,
        Some(Navigation::push(AppRoute::course_level(
            TrackId::GameDev,
            LevelId::GameIntro
        )))
    );
    assert_eq!(controller.mode(), CourseMode::InLevel(LevelId::GameIntro));
    assert_eq!(
        controller.tick(right, viewport).await.unwrap(),
        TickOutcome::Suspended
    );
}

#[tokio::test]
async fn section_progress_is_debounced() {
    let services = services().await;
    let (mut controller, _) = mount(&services, "game-dev", Some("LEVEL_GAME_LOOP")).await;

    controller.record_section_progress(SectionProgress::new(1, 5));
    controller.clock_mut().advance(Duration::milliseconds(400));
    controller.record_section_progress(SectionProgress::new(2, 5));
    controller.clock_mut().advance(Duration::milliseconds(900));
    assert!(!controller.flush_section_progress().await.unwrap());

    controller.clock_mut().advance(Duration::milliseconds(100));
    assert!(controller.flush_section_progress().await.unwrap());
    assert_eq!(
        services
            .progress()
            .load_section_index(TrackId::GameDev, LevelId::GameLoop)
            .await,
        Some(2)
    );
}

#[tokio::test]
async fn level_change_drops_pending_section() {
    let services = services().await;
    let (mut controller, _) = mount(&services, "game-dev", Some("LEVEL_GAME_LOOP")).await;

    controller.record_section_progress(SectionProgress::new(4, 5));
    controller.jump_to_level(0).await.unwrap();
    assert!(!controller.has_pending_section());

    controller.clock_mut().advance(Duration::seconds(5));
    assert!(!controller.flush_section_progress().await.unwrap());
    let record = services.progress().load_stored_progress().await.unwrap();
    assert_eq!(record.level(), LevelId::GameIntro);
    assert_eq!(record.section_index(), None);
}

#[tokio::test]
async fn retry_restarts_without_forgetting_completions() {
    let services = services().await;
    let store = services.progress();
    store.mark_level_complete(LevelId::CyberAes).await.unwrap();
    store
        .persist_progress(TrackId::Cybersecurity, LevelId::CyberBcrypt, None)
        .await
        .unwrap();

    let navigation = retry_track(&store, TrackId::Cybersecurity).await.unwrap();
    assert_eq!(
        navigation,
        Some(Navigation::push(AppRoute::course(TrackId::Cybersecurity)))
    );
    assert_eq!(
        store.load_track_progress(TrackId::Cybersecurity).await,
        Some(LevelId::CyberEncryption)
    );
    assert!(store.read_completed_levels().await.contains(LevelId::CyberAes));
}

#[tokio::test]
async fn start_track_keeps_section_of_resumed_level() {
    let services = services().await;
    let store = services.progress();
    store
        .persist_progress(
            TrackId::SystemDesign,
            LevelId::Docker,
            Some(SectionProgress::new(3, 6)),
        )
        .await
        .unwrap();

    start_track(&store, TrackId::SystemDesign).await.unwrap();
    assert_eq!(
        store
            .load_section_index(TrackId::SystemDesign, LevelId::Docker)
            .await,
        Some(3)
    );

    start_track(&store, TrackId::GameDev).await.unwrap();
    let record = store.load_stored_progress().await.unwrap();
    assert_eq!(record.track(), TrackId::GameDev);
    assert_eq!(record.level(), LevelId::GameIntro);
}
