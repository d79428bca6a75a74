use storage::keys;
use storage::repository::{KeyValueRepository, Storage};
use storage::sqlite::SqliteRepository;

#[tokio::test]
async fn sqlite_roundtrip_overwrites_value() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert_eq!(repo.get(keys::PROGRESS).await.unwrap(), None);

    repo.set(
        keys::PROGRESS,
        r#"{"track":"game-dev","levelId":"LEVEL_GAME_INTRO"}"#,
    )
    .await
    .unwrap();
    repo.set(
        keys::PROGRESS,
        r#"{"track":"game-dev","levelId":"LEVEL_GAME_LOOP"}"#,
    )
    .await
    .unwrap();

    let stored = repo.get(keys::PROGRESS).await.unwrap().expect("stored");
    assert!(stored.contains("LEVEL_GAME_LOOP"), "unexpected value {stored}");
}

#[tokio::test]
async fn sqlite_remove_is_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_remove?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.set(keys::COMPLETED_LEVELS, "[]").await.unwrap();
    repo.remove(keys::COMPLETED_LEVELS).await.unwrap();
    repo.remove(keys::COMPLETED_LEVELS).await.unwrap();
    assert_eq!(repo.get(keys::COMPLETED_LEVELS).await.unwrap(), None);
}

#[tokio::test]
async fn migrations_can_run_twice() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");
}

#[tokio::test]
async fn storage_facade_uses_sqlite_backend() {
    let storage = Storage::sqlite("sqlite:file:memdb_kv_facade?mode=memory&cache=shared")
        .await
        .expect("storage");
    storage.kv.set(keys::USER, r#"{"id":1}"#).await.unwrap();
    assert_eq!(
        storage.kv.get(keys::USER).await.unwrap().as_deref(),
        Some(r#"{"id":1}"#)
    );
}
