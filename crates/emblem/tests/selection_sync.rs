//! End-to-end selection synchronization scenarios
//!
//! Players and the arbiter share one process-local bus; each test drains the
//! bus into the arbiter's `handle_message` to simulate delivery.

// Integration tests have relaxed clippy settings for test ergonomics.
// Production code (src/) must use strict zero-unwrap/panic patterns.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::too_many_lines
)]

use std::sync::Arc;

use emblem::core::{ArtifactIndex, ClientId, EntityId, SelectionMessage, TagKey, TagSlot};
use emblem::{BroadcastBus, LocalBus, SyncConfig, SyncProtocol};
use tokio::sync::broadcast;

fn key(artifact: ArtifactIndex, slot: TagSlot) -> TagKey {
    TagKey::new(artifact, slot)
}

fn player(id: &str, bus: &Arc<LocalBus>) -> SyncProtocol {
    let bus: Arc<dyn BroadcastBus> = bus.clone();
    SyncProtocol::new(SyncConfig::new(ClientId::new(id)), bus)
}

fn arbiter(bus: &Arc<LocalBus>) -> SyncProtocol {
    let bus: Arc<dyn BroadcastBus> = bus.clone();
    SyncProtocol::new(SyncConfig::new(ClientId::new("gm")).with_arbiter(), bus)
}

/// Deliver every message currently buffered on the receiver.
async fn deliver_all(
    receiver: &mut broadcast::Receiver<SelectionMessage>,
    target: &SyncProtocol,
) {
    loop {
        match receiver.try_recv() {
            Ok(message) => target.handle_message(&message.encode()).await,
            Err(broadcast::error::TryRecvError::Empty) => break,
            Err(err) => panic!("bus receiver failed: {err}"),
        }
    }
}

#[tokio::test]
async fn toggle_publish_aggregate_round_trip() {
    let bus = Arc::new(LocalBus::default());
    let mut wire = bus.subscribe();
    let player_x = player("x", &bus);
    let gm = arbiter(&bus);
    let entity = EntityId::new("e1");
    let k = key(ArtifactIndex::First, TagSlot::Power0);

    assert!(player_x.toggle(&entity, k).await);
    deliver_all(&mut wire, &gm).await;
    assert!(gm.merged_view(&entity).await.contains(&k));

    // Toggling off empties X's row, and the merged view with it.
    assert!(!player_x.toggle(&entity, k).await);
    deliver_all(&mut wire, &gm).await;
    assert!(gm.merged_view(&entity).await.is_empty());
}

#[tokio::test]
async fn merged_view_unions_multiple_players() {
    let bus = Arc::new(LocalBus::default());
    let mut wire = bus.subscribe();
    let player_x = player("x", &bus);
    let player_y = player("y", &bus);
    let gm = arbiter(&bus);
    let entity = EntityId::new("e1");

    player_x.toggle(&entity, key(ArtifactIndex::First, TagSlot::Power0)).await;
    player_y.toggle(&entity, key(ArtifactIndex::First, TagSlot::Power0)).await;
    player_y.toggle(&entity, key(ArtifactIndex::Second, TagSlot::Weakness)).await;
    gm.toggle(&entity, key(ArtifactIndex::First, TagSlot::Power1)).await;
    deliver_all(&mut wire, &gm).await;

    let merged = gm.merged_view(&entity).await;
    assert_eq!(merged.len(), 3);
    assert!(merged.contains(&key(ArtifactIndex::First, TagSlot::Power0)));
    assert!(merged.contains(&key(ArtifactIndex::First, TagSlot::Power1)));
    assert!(merged.contains(&key(ArtifactIndex::Second, TagSlot::Weakness)));

    // One player dropping a key does not disturb the other's copy of it.
    player_y.toggle(&entity, key(ArtifactIndex::First, TagSlot::Power0)).await;
    deliver_all(&mut wire, &gm).await;
    assert!(gm
        .merged_view(&entity)
        .await
        .contains(&key(ArtifactIndex::First, TagSlot::Power0)));
}

#[tokio::test]
async fn announce_publishes_current_snapshot_after_load() {
    let bus = Arc::new(LocalBus::default());
    let mut wire = bus.subscribe();
    let player_x = player("x", &bus);
    let gm = arbiter(&bus);
    let entity = EntityId::new("e1");
    let k = key(ArtifactIndex::Second, TagSlot::Power1);

    player_x.toggle(&entity, k).await;
    // The arbiter joined late and missed the toggle.
    while wire.try_recv().is_ok() {}

    player_x.announce(&entity).await;
    deliver_all(&mut wire, &gm).await;
    assert!(gm.merged_view(&entity).await.contains(&k));
}

#[tokio::test]
async fn snapshots_replace_rows_regardless_of_arrival_order() {
    let bus = Arc::new(LocalBus::default());
    let gm = arbiter(&bus);
    let entity = EntityId::new("e1");

    let older = SelectionMessage::snapshot(
        entity.clone(),
        ClientId::new("x"),
        &[key(ArtifactIndex::First, TagSlot::Power0)].into(),
    );
    let newer = SelectionMessage::snapshot(
        entity.clone(),
        ClientId::new("x"),
        &emblem::core::SelectionSet::new(),
    );

    // Last-arrived wins per client; there are no sequence numbers.
    gm.handle_message(&older.encode()).await;
    gm.handle_message(&newer.encode()).await;
    assert!(gm.merged_view(&entity).await.is_empty());

    gm.handle_message(&newer.encode()).await;
    gm.handle_message(&older.encode()).await;
    assert_eq!(gm.merged_view(&entity).await.len(), 1);
}

#[tokio::test]
async fn clear_after_approval_propagates_to_arbiter() {
    let bus = Arc::new(LocalBus::default());
    let mut wire = bus.subscribe();
    let player_x = player("x", &bus);
    let gm = arbiter(&bus);
    let entity = EntityId::new("e1");

    player_x.toggle(&entity, key(ArtifactIndex::First, TagSlot::Power0)).await;
    deliver_all(&mut wire, &gm).await;
    assert!(!gm.merged_view(&entity).await.is_empty());

    player_x.clear_after_approval(&entity).await;
    deliver_all(&mut wire, &gm).await;
    assert!(gm.merged_view(&entity).await.is_empty());
    assert!(player_x.local_view(&entity).await.is_empty());
}

#[tokio::test]
async fn entities_are_isolated() {
    let bus = Arc::new(LocalBus::default());
    let mut wire = bus.subscribe();
    let player_x = player("x", &bus);
    let gm = arbiter(&bus);
    let k = key(ArtifactIndex::First, TagSlot::Power0);

    player_x.toggle(&EntityId::new("e1"), k).await;
    deliver_all(&mut wire, &gm).await;

    assert!(gm.merged_view(&EntityId::new("e1")).await.contains(&k));
    assert!(gm.merged_view(&EntityId::new("e2")).await.is_empty());
}
