use bounce_core::model::{LevelId, TrackId, UserProfile};
use services::ReviewDraft;

use super::test_harness::{ViewKind, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn intro_view_smoke_links_to_tracks() {
    let mut harness = setup_view_harness(ViewKind::Intro).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Choose a track"), "missing link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_cards_and_resume_point() {
    let mut harness = setup_view_harness(ViewKind::Home).await;
    let progress = harness.services.progress();
    progress
        .persist_progress(TrackId::GameDev, LevelId::GameLoop, None)
        .await
        .expect("persist progress");
    progress
        .mark_level_complete(LevelId::GameIntro)
        .await
        .expect("mark complete");

    harness.settle().await;
    let html = harness.render();
    for track in TrackId::ALL {
        assert!(html.contains(track.label()), "missing {} in {html}", track.label());
    }
    let resume = format!("Resume at {}", harness.services.catalog().title(LevelId::GameLoop));
    assert!(html.contains(&resume), "missing {resume} in {html}");
    assert!(html.contains("Continue"), "missing resume button in {html}");
    assert!(html.contains("1 of "), "missing completion count in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn reviews_view_smoke_lists_posted_reviews() {
    let mut harness = setup_view_harness(ViewKind::Reviews).await;
    let author = UserProfile {
        id: 7,
        name: "Sam Rivera".into(),
        email: "sam@example.com".into(),
        avatar: None,
    };
    harness
        .services
        .reviews()
        .submit(
            &author,
            ReviewDraft {
                rating: 3,
                text: "Great playground".into(),
                suggestions: None,
            },
        )
        .await
        .expect("submit review");

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Sam Rivera"), "missing author in {html}");
    assert!(html.contains("★★★☆☆"), "missing stars in {html}");
    assert!(html.contains("Sign in from a course profile"), "missing sign-in hint in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn completion_view_smoke_offers_retry() {
    let mut harness = setup_view_harness(ViewKind::Completion("game-dev")).await;
    harness.rebuild();
    let html = harness.render();
    let level_count = harness.services.registry().level_count(TrackId::GameDev);
    let expected = format!("You finished all {level_count} levels of Game Engineering.");
    assert!(html.contains(&expected), "missing {expected} in {html}");
    assert!(html.contains("Retry track"), "missing retry in {html}");
    assert!(html.contains("Choose another track"), "missing exit in {html}");
}
