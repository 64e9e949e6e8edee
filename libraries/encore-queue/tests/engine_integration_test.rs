//! Engine integration tests
//!
//! Real-world flows: tapping items in the library, the play/shuffle buttons
//! on a collection screen, the now-playing controls and player feedback.

mod common;

use common::{ids, init_tracing, tracks, Directive, RecordingBridge, ScriptedResolver};
use encore_core::{ItemKind, LibraryItem, SourceKind, TrackId};
use encore_queue::{
    BridgeEvent, MutationOutcome, PlaybackState, PressOutcome, QueueEngine, ReplaceOptions, Route,
    SheetAction,
};
use std::sync::Arc;
use std::time::Duration;

// ===== Test Helpers =====

fn setup() -> (QueueEngine, Arc<RecordingBridge>, Arc<ScriptedResolver>) {
    init_tracing();
    let resolver = ScriptedResolver::new();
    let bridge = RecordingBridge::new();
    let engine = QueueEngine::new(resolver.clone(), bridge.clone());
    (engine, bridge, resolver)
}

fn strings(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

// ===== Library dispatch =====

#[tokio::test]
async fn test_tapping_tracks_builds_adhoc_queue() {
    let (engine, bridge, _) = setup();

    let first = LibraryItem::new(ItemKind::Track, "a", "A");
    let second = LibraryItem::new(ItemKind::Track, "b", "B");

    engine.press(&first).await.unwrap();
    engine.press(&second).await.unwrap();

    let snapshot = engine.snapshot();
    assert_eq!(ids(&snapshot.entries), vec!["a", "b"]);
    assert_eq!(snapshot.position, Some(1));
    assert!(snapshot.source.unwrap().is_adhoc());
    assert_eq!(
        bridge.take(),
        vec![
            Directive::Load { tracks: strings(&["a"]), start: 0 },
            Directive::Load { tracks: strings(&["a", "b"]), start: 1 },
        ]
    );
}

#[tokio::test]
async fn test_tapping_queued_track_jumps_without_resolving() {
    let (engine, bridge, resolver) = setup();
    engine
        .replace(tracks(&["a", "b", "c"]), ReplaceOptions::adhoc())
        .await
        .unwrap();
    bridge.take();

    // A scripted gate that is never released would hang if the catalog were asked
    let _gate = resolver.script_track("c");

    let outcome = engine
        .press(&LibraryItem::new(ItemKind::Track, "c", "C"))
        .await
        .unwrap();

    assert_eq!(outcome, PressOutcome::Played(MutationOutcome::Applied));
    assert_eq!(engine.snapshot().position, Some(2));
    assert_eq!(bridge.take(), vec![Directive::PlayAt(2)]);
}

#[tokio::test]
async fn test_collection_items_navigate() {
    let (engine, bridge, _) = setup();

    let outcome = engine
        .press(&LibraryItem::new(ItemKind::Artist, "ar-1", "Artist"))
        .await
        .unwrap();

    assert_eq!(outcome, PressOutcome::Navigate(Route::Artist("ar-1".into())));
    assert!(bridge.take().is_empty());
}

#[tokio::test]
async fn test_sheet_actions_refresh_lookahead() {
    let (engine, bridge, _) = setup();
    engine
        .replace(tracks(&["a", "b"]), ReplaceOptions::adhoc())
        .await
        .unwrap();
    bridge.take();

    engine
        .sheet_action(&TrackId::new("n"), SheetAction::PlayNext)
        .await
        .unwrap();

    assert_eq!(
        bridge.take(),
        vec![Directive::UpdateQueue { tracks: strings(&["a", "n", "b"]), current: 0 }]
    );
}

// ===== Collection screens =====

#[tokio::test]
async fn test_shuffle_button_starts_on_first_track() {
    let (engine, _bridge, resolver) = setup();
    let gate = resolver.script_collection("pl-1");
    gate.release(Ok(tracks(&["p1", "p2", "p3", "p4", "p5"])));

    engine
        .play_collection(SourceKind::Playlist, "pl-1", "Road Trip", true)
        .await
        .unwrap();

    let snapshot = engine.snapshot();
    assert!(snapshot.shuffled);
    assert_eq!(snapshot.position, Some(0));
    assert_eq!(snapshot.now_playing.unwrap().id.as_str(), "p1");
    let source = snapshot.source.unwrap();
    assert_eq!(source.kind, SourceKind::Playlist);
    assert_eq!(source.source_name, "Road Trip");
}

#[tokio::test]
async fn test_shuffle_toggle_keeps_current_track() {
    let (engine, bridge, _) = setup();
    engine
        .replace(tracks(&["a", "b", "c", "d"]), ReplaceOptions::adhoc())
        .await
        .unwrap();
    engine.skip_forward().await;
    bridge.take();

    engine.set_shuffle(true).await.unwrap();
    let shuffled = engine.snapshot();
    assert_eq!(shuffled.position, Some(0));
    assert_eq!(shuffled.now_playing.as_ref().unwrap().id.as_str(), "b");

    engine.set_shuffle(false).await.unwrap();
    let restored = engine.snapshot();
    assert_eq!(ids(&restored.entries), vec!["a", "b", "c", "d"]);
    assert_eq!(restored.position, Some(1));

    // Both toggles only refresh lookahead, playback is never interrupted
    assert!(bridge
        .take()
        .iter()
        .all(|d| matches!(d, Directive::UpdateQueue { .. })));
}

// ===== Now-playing controls =====

#[tokio::test]
async fn test_remove_current_plays_following_entry() {
    let (engine, bridge, _) = setup();
    engine
        .replace(tracks(&["a", "b", "c"]), ReplaceOptions::adhoc())
        .await
        .unwrap();
    engine.skip_forward().await;
    bridge.take();

    let current = engine.snapshot().now_playing_entry.unwrap();
    engine.remove(current).await.unwrap();

    let snapshot = engine.snapshot();
    assert_eq!(ids(&snapshot.entries), vec!["a", "c"]);
    assert_eq!(snapshot.now_playing.unwrap().id.as_str(), "c");
    assert_eq!(
        bridge.take(),
        vec![Directive::Load { tracks: strings(&["a", "c"]), start: 1 }]
    );
}

#[tokio::test]
async fn test_jump_to_queue_row() {
    let (engine, bridge, _) = setup();
    engine
        .replace(tracks(&["a", "b", "c"]), ReplaceOptions::adhoc())
        .await
        .unwrap();
    bridge.take();

    let target = engine.snapshot().entries[2].entry_id;
    engine.jump_to(target).await.unwrap();

    assert_eq!(engine.snapshot().position, Some(2));
    assert_eq!(bridge.take(), vec![Directive::PlayAt(2)]);
}

#[tokio::test]
async fn test_transport_passthrough() {
    let (engine, bridge, _) = setup();
    engine
        .replace(tracks(&["a"]), ReplaceOptions::adhoc())
        .await
        .unwrap();
    bridge.take();

    engine.pause().await;
    engine.resume().await;
    engine.seek_to(Duration::from_secs(42)).await;

    assert_eq!(
        bridge.take(),
        vec![
            Directive::Pause,
            Directive::Resume,
            Directive::SeekTo(Duration::from_secs(42)),
        ]
    );
}

// ===== Player feedback =====

#[tokio::test]
async fn test_bridge_events_update_status_only() {
    let (engine, bridge, _) = setup();
    engine
        .replace(tracks(&["a", "b"]), ReplaceOptions::adhoc())
        .await
        .unwrap();
    bridge.take();

    let before = engine.snapshot();
    let entry = before.now_playing_entry.unwrap();
    let mut status = engine.subscribe_playback();
    let events = engine.bridge_event_channel();

    events
        .send(BridgeEvent::StateChanged(PlaybackState::Playing))
        .await
        .unwrap();
    events
        .send(BridgeEvent::Progress {
            position: Duration::from_secs(30),
            duration: Duration::from_secs(200),
        })
        .await
        .unwrap();
    events.send(BridgeEvent::TrackEnded { entry_id: entry }).await.unwrap();
    drop(events);

    while status.borrow_and_update().state != PlaybackState::Ended {
        status.changed().await.unwrap();
    }

    let playback = engine.playback();
    assert_eq!(playback.duration, Duration::from_secs(200));
    assert_eq!(playback.position, Duration::from_secs(200));

    // End of track never advances the queue
    assert_eq!(engine.snapshot(), before);
    assert!(bridge.take().is_empty());
}

#[tokio::test]
async fn test_bridge_error_keeps_user_on_failed_entry() {
    let (engine, _bridge, _) = setup();
    engine
        .replace(tracks(&["a", "b"]), ReplaceOptions::adhoc())
        .await
        .unwrap();

    let entry = engine.snapshot().now_playing_entry.unwrap();
    let mut status = engine.subscribe_playback();
    let (tx, rx) = tokio::sync::mpsc::channel(4);
    let pump = engine.attach_bridge_events(rx);

    tx.send(BridgeEvent::Error {
        entry_id: entry,
        message: "HTTP 503".to_string(),
    })
    .await
    .unwrap();
    drop(tx);
    pump.await.unwrap();

    let failure = status.borrow_and_update().last_error.clone().unwrap();
    assert_eq!(failure.entry_id, entry);
    assert_eq!(failure.message, "HTTP 503");
    assert_eq!(engine.snapshot().now_playing_entry, Some(entry));
    assert_eq!(engine.snapshot().len(), 2);
}
