//! Field edit scenarios across the persistence and sync layers

// Integration tests have relaxed clippy settings for test ergonomics.
// Production code (src/) must use strict zero-unwrap/panic patterns.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::too_many_lines
)]

use std::sync::Arc;

use emblem::core::{
    build_view, ArtifactField, ArtifactIndex, ClientId, EntityId, FieldRef, TagKey, TagSlot,
};
use emblem::{
    BroadcastBus, FieldEditController, FieldStore, LocalBus, MemoryAttributeStore, SyncConfig,
    SyncProtocol,
};

struct Rig {
    store: Arc<MemoryAttributeStore>,
    sync: Arc<SyncProtocol>,
    bus: Arc<LocalBus>,
    entity: EntityId,
}

impl Rig {
    fn new() -> Self {
        let bus = Arc::new(LocalBus::default());
        let transport: Arc<dyn BroadcastBus> = bus.clone();
        Self {
            store: Arc::new(MemoryAttributeStore::new()),
            sync: Arc::new(SyncProtocol::new(SyncConfig::new(ClientId::new("x")), transport)),
            bus,
            entity: EntityId::new("e1"),
        }
    }

    fn fields(&self) -> FieldStore {
        FieldStore::new(self.store.clone())
    }

    async fn editor(&self, field: FieldRef) -> FieldEditController {
        let mut controller = FieldEditController::open(
            self.entity.clone(),
            field,
            self.fields(),
            self.sync.clone(),
        )
        .await
        .unwrap();
        controller.set_editable(true);
        controller
    }
}

fn power0() -> FieldRef {
    FieldRef::new(ArtifactIndex::First, ArtifactField::Power0)
}

#[tokio::test]
async fn commit_then_build_view_shows_the_new_label() {
    let rig = Rig::new();
    let key = TagKey::new(ArtifactIndex::First, TagSlot::Power0);

    let mut editor = rig.editor(power0()).await;
    editor.begin_edit().unwrap();
    editor.commit("Ember Blade").await.unwrap().unwrap();

    rig.sync.toggle(&rig.entity, key).await;

    let pair = rig.fields().read(&rig.entity).await.unwrap();
    let view = build_view(&pair, &rig.sync.local_view(&rig.entity).await);
    assert_eq!(view.len(), 1);
    assert_eq!(view.entries()[0].label, "Ember Blade");
    assert_eq!(view.entries()[0].modifier, 1);
    assert_eq!(view.total_modifier(), 1);
}

#[tokio::test]
async fn empty_commit_republishes_without_the_cleared_key() {
    let rig = Rig::new();
    let mut wire = rig.bus.subscribe();
    let key = TagKey::new(ArtifactIndex::First, TagSlot::Power0);

    // Arbiter listening on the same bus.
    let transport: Arc<dyn BroadcastBus> = rig.bus.clone();
    let gm = SyncProtocol::new(SyncConfig::new(ClientId::new("gm")).with_arbiter(), transport);

    // Name the tag, select it, let the arbiter see it.
    let mut editor = rig.editor(power0()).await;
    editor.begin_edit().unwrap();
    editor.commit("Ember Blade").await.unwrap().unwrap();
    rig.sync.toggle(&rig.entity, key).await;
    while let Ok(message) = wire.try_recv() {
        gm.handle_message(&message.encode()).await;
    }
    assert!(gm.merged_view(&rig.entity).await.contains(&key));

    // Blanking the field unselects the key and republishes.
    editor.begin_edit().unwrap();
    let receipt = editor.commit("   ").await.unwrap().unwrap();
    assert!(receipt.cleared_selection);
    while let Ok(message) = wire.try_recv() {
        gm.handle_message(&message.encode()).await;
    }
    assert!(!gm.merged_view(&rig.entity).await.contains(&key));
}

#[tokio::test]
async fn concurrent_edits_to_different_fields_both_survive() {
    let rig = Rig::new();

    let mut power_editor = rig.editor(power0()).await;
    let mut weakness_editor = rig
        .editor(FieldRef::new(ArtifactIndex::First, ArtifactField::Weakness))
        .await;

    // Both sessions open before either commit lands; each commit re-reads
    // the persisted pair, so neither clobbers the other.
    power_editor.begin_edit().unwrap();
    weakness_editor.begin_edit().unwrap();
    power_editor.commit("Ember Blade").await.unwrap();
    weakness_editor.commit("Brittle").await.unwrap();

    let pair = rig.fields().read(&rig.entity).await.unwrap();
    assert_eq!(pair.field(power0()), "Ember Blade");
    assert_eq!(
        pair.field(FieldRef::new(ArtifactIndex::First, ArtifactField::Weakness)),
        "Brittle"
    );
}

#[tokio::test]
async fn cancel_discards_typed_input() {
    let rig = Rig::new();
    let mut editor = rig.editor(power0()).await;

    editor.begin_edit().unwrap();
    editor.commit("Old").await.unwrap();

    editor.begin_edit().unwrap();
    // "New" was typed on the surface but never committed.
    assert!(editor.cancel().await);
    assert_eq!(editor.display(), "Old");
    assert_eq!(rig.fields().read(&rig.entity).await.unwrap().field(power0()), "Old");
}

#[tokio::test]
async fn blur_commits_the_current_input() {
    let rig = Rig::new();
    let mut editor = rig.editor(power0()).await;

    editor.begin_edit().unwrap();
    let receipt = editor.blur("Ember Blade").await.unwrap().unwrap();
    assert_eq!(receipt.value, "Ember Blade");
    assert_eq!(
        rig.fields().read(&rig.entity).await.unwrap().field(power0()),
        "Ember Blade"
    );
}

#[tokio::test]
async fn image_field_edits_persist_like_any_other() {
    let rig = Rig::new();
    let image = FieldRef::new(ArtifactIndex::Second, ArtifactField::Image);
    let mut editor = rig.editor(image).await;

    editor.begin_edit().unwrap();
    editor.commit("icons/lantern.webp").await.unwrap().unwrap();

    let pair = rig.fields().read(&rig.entity).await.unwrap();
    assert_eq!(pair.field(image), "icons/lantern.webp");
    assert_eq!(pair.artifact(ArtifactIndex::Second).image, "icons/lantern.webp");
}
