//! Behaviour shared by every `LeaderboardStore` implementation.
//!
//! Each check starts from a freshly created, empty table.

use assert_matches::assert_matches;
use valboard_core::leaderboard::Player;
use valboard_core::record::RecordField;
use valboard_db::{LeaderboardStore, Projection, StoreError};

pub fn player(id: Option<&str>, name: &str, rank: i64) -> Player {
    Player {
        player_id: id.map(String::from),
        display_name: name.to_string(),
        tag: "1234".to_string(),
        rank,
        rating: 1000 - rank,
        wins: 20 - rank,
    }
}

/// Drop (if present) and recreate the table.
pub async fn reset<S: LeaderboardStore>(store: &S) {
    match store.drop_table().await {
        Ok(()) | Err(StoreError::TableNotFound(_)) => {}
        Err(e) => panic!("drop_table failed: {e}"),
    }
    store.create_table().await.expect("create_table should succeed");
}

pub async fn written_player_reads_back<S: LeaderboardStore>(store: &S) {
    reset(store).await;

    let id = store
        .add_leaderboard_item("A1", &player(Some("p-1"), "Foo", 1))
        .await
        .unwrap();
    assert_eq!(id, "p-1");

    let rows = store.find_all("A1", &Projection::summary()).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].act_id, "A1");
    assert_eq!(rows[0].player_id, "p-1");
    assert_eq!(rows[0].display_name, "Foo");
    assert_eq!(rows[0].rank, 1);
    assert_eq!(rows[0].wins, 19);
    // Not part of the summary projection.
    assert_eq!(rows[0].tag, "");
    assert_eq!(rows[0].rating, 0);
}

pub async fn anonymous_player_uses_sentinel<S: LeaderboardStore>(store: &S) {
    reset(store).await;

    let anonymous = Player {
        player_id: Some(String::new()),
        display_name: "Foo".into(),
        tag: "1234".into(),
        rank: 1,
        rating: 999,
        wins: 10,
    };
    let id = store.add_leaderboard_item("A1", &anonymous).await.unwrap();
    assert_eq!(id, "NOT-AVAILABLE");

    let rows = store.find_all("A1", &Projection::summary()).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].player_id, "NOT-AVAILABLE");
    assert_eq!(rows[0].display_name, "Foo");
    assert_eq!(rows[0].rank, 1);
    assert_eq!(rows[0].wins, 10);
}

pub async fn full_projection_returns_every_field<S: LeaderboardStore>(store: &S) {
    reset(store).await;

    store
        .add_leaderboard_item("A1", &player(Some("p-1"), "Foo", 3))
        .await
        .unwrap();

    let rows = store.find_all("A1", &Projection::all()).await.unwrap();
    assert_eq!(rows[0].tag, "1234");
    assert_eq!(rows[0].rating, 997);

    let rating_only = store
        .find_all("A1", &Projection::fields([RecordField::Rating]))
        .await
        .unwrap();
    assert_eq!(rating_only[0].rating, 997);
    assert_eq!(rating_only[0].display_name, "");
}

pub async fn writes_overwrite_and_acts_are_isolated<S: LeaderboardStore>(store: &S) {
    reset(store).await;

    store
        .add_leaderboard_item("A1", &player(Some("p-1"), "Old", 5))
        .await
        .unwrap();
    store
        .add_leaderboard_item("A1", &player(Some("p-1"), "New", 2))
        .await
        .unwrap();
    store
        .add_leaderboard_item("A2", &player(Some("p-1"), "Other", 1))
        .await
        .unwrap();

    let rows = store.find_all("A1", &Projection::summary()).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].display_name, "New");
    assert_eq!(rows[0].rank, 2);

    assert!(store
        .find_all("A3", &Projection::summary())
        .await
        .unwrap()
        .is_empty());
}

pub async fn drop_then_create_leaves_empty_table<S: LeaderboardStore>(store: &S) {
    reset(store).await;
    store
        .add_leaderboard_item("A1", &player(Some("p-1"), "Foo", 1))
        .await
        .unwrap();

    store.drop_table().await.unwrap();
    store.create_table().await.unwrap();

    let rows = store.find_all("A1", &Projection::summary()).await.unwrap();
    assert!(rows.is_empty());
}

pub async fn missing_table_is_reported<S: LeaderboardStore>(store: &S) {
    reset(store).await;
    store.drop_table().await.unwrap();

    assert_matches!(
        store.find_all("A1", &Projection::summary()).await,
        Err(StoreError::TableNotFound(_))
    );
    assert_matches!(store.drop_table().await, Err(StoreError::TableNotFound(_)));

    let err = store
        .add_leaderboard_item("A1", &player(None, "Foo", 1))
        .await
        .unwrap_err();
    assert_eq!(err.player_id, "NOT-AVAILABLE");
    assert_matches!(err.source, StoreError::TableNotFound(_));

    store.create_table().await.unwrap();
    assert_matches!(store.create_table().await, Err(StoreError::TableExists(_)));
}

pub async fn empty_act_id_is_rejected<S: LeaderboardStore>(store: &S) {
    reset(store).await;

    let err = store
        .add_leaderboard_item("", &player(Some("p-1"), "Foo", 1))
        .await
        .unwrap_err();
    assert_eq!(err.player_id, "p-1");
    assert_matches!(err.source, StoreError::InvalidKey(_));
}
