//! End-to-end timelines through the public engine API.

use std::sync::Arc;

use boundary_engine::mocks::RecordingPresenter;
use boundary_engine::{
    AppId, BoundaryEngine, Clock, Decision, EngineConfig, ForegroundEvent, InterventionDispatcher,
    ManualClock, SuppressReason,
};
use chrono::Duration;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("boundary_engine=debug")
        .with_test_writer()
        .try_init();
}

fn engine_with(
    cooldown_ms: u64,
) -> (BoundaryEngine, Arc<ManualClock>, Arc<RecordingPresenter>) {
    init_tracing();
    let clock = Arc::new(ManualClock::at_epoch());
    let presenter = Arc::new(RecordingPresenter::new());
    let config = EngineConfig {
        cooldown_window_ms: cooldown_ms,
        ..EngineConfig::for_host("com.idleman.app")
    };
    let engine = BoundaryEngine::new(
        config,
        InterventionDispatcher::new(presenter.clone(), presenter.clone()),
    )
    .with_clock(clock.clone());
    (engine, clock, presenter)
}

#[test]
fn social_app_timeline() {
    let (engine, clock, presenter) = engine_with(3_000);
    let start = clock.now();
    let social = AppId::new("social.app");
    let event = ForegroundEvent::window_changed("social.app");
    engine.replace_boundary_set([social.clone()]);

    // t = 0
    assert!(engine.decide(&event).is_intervene());

    // t = 1s
    clock.set(start + Duration::seconds(1));
    assert_eq!(
        engine.decide(&event),
        Decision::suppress(SuppressReason::Cooldown)
    );
    let expiry = engine.grant_temporary_access(&social, Some(Duration::minutes(5)));
    assert_eq!(expiry, start + Duration::seconds(1) + Duration::minutes(5));

    // t = 10s
    clock.set(start + Duration::seconds(10));
    assert_eq!(
        engine.decide(&event),
        Decision::suppress(SuppressReason::ActiveGrant)
    );

    // t = 5min + 10s
    clock.set(start + Duration::minutes(5) + Duration::seconds(10));
    assert!(engine.decide(&event).is_intervene());

    assert_eq!(presenter.overlays().len(), 2);
    assert_eq!(engine.list_active_grants().count(), 0);
}

#[test]
fn grant_covers_half_open_interval() {
    let (engine, clock, _) = engine_with(0);
    let app = AppId::new("video.app");
    let event = ForegroundEvent::window_changed("video.app");
    engine.replace_boundary_set([app.clone()]);

    let granted_at = clock.now();
    engine.grant_temporary_access(&app, None);
    let duration = Duration::minutes(5);

    for offset in [Duration::zero(), Duration::minutes(2), duration - Duration::milliseconds(1)] {
        clock.set(granted_at + offset);
        assert_eq!(
            engine.decide(&event),
            Decision::suppress(SuppressReason::ActiveGrant),
            "expected grant to hold at +{offset}"
        );
    }

    clock.set(granted_at + duration);
    assert!(engine.decide(&event).is_intervene());
}

#[test]
fn lazily_expired_grant_disappears_from_listing() {
    let (engine, clock, _) = engine_with(3_000);
    let app = AppId::new("video.app");
    engine.replace_boundary_set([app.clone()]);
    engine.grant_temporary_access(&app, Some(Duration::seconds(5)));
    assert_eq!(engine.list_active_grants().count(), 1);

    clock.advance(Duration::seconds(6));
    engine.decide(&ForegroundEvent::window_changed("video.app"));
    assert_eq!(engine.list_active_grants().count(), 0);
}

#[test]
fn grants_from_another_thread_are_seen_by_decide() {
    let (engine, _, _) = engine_with(3_000);
    let engine = Arc::new(engine);
    let app = AppId::new("social.app");
    engine.replace_boundary_set([app.clone()]);

    let granter = {
        let engine = Arc::clone(&engine);
        let app = app.clone();
        std::thread::spawn(move || engine.grant_temporary_access(&app, None))
    };
    granter.join().expect("grant thread panicked");

    assert_eq!(
        engine.decide(&ForegroundEvent::window_changed("social.app")),
        Decision::suppress(SuppressReason::ActiveGrant)
    );
}
