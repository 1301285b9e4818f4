mod common;

use common::*;
use place_core::*;

type State = SessionState<Space, Source>;
type Event = SessionEvent<Space, Source>;

fn run(events: Vec<Event>) -> (State, Vec<Option<Status>>) {
    let mut state = State::Idle;
    let mut statuses = Vec::new();
    for ev in events {
        let (next, status) = transition(state, ev);
        state = next;
        statuses.push(status);
    }
    (state, statuses)
}

#[test]
fn happy_path_reaches_active_with_hit_test() {
    let (state, statuses) = run(vec![
        Event::StartRequested(XrMode::ImmersiveAr),
        Event::Started,
        Event::ResourcesReady(full_resources()),
    ]);
    assert!(state.is_active());
    assert!(state.resources().and_then(|r| r.hit_test()).is_some());
    assert_eq!(statuses[0], Some(Status::Starting(XrMode::ImmersiveAr)));
    assert_eq!(statuses[1], Some(Status::Aiming(XrMode::ImmersiveAr)));
    assert_eq!(statuses[2], None);
}

#[test]
fn rejection_returns_to_idle_with_a_reason() {
    let (state, statuses) = run(vec![
        Event::StartRequested(XrMode::ImmersiveAr),
        Event::Rejected(PlacementError::SessionRejected("NotSupportedError".into())),
    ]);
    assert!(matches!(state, SessionState::Idle));
    let status = statuses[1].clone().unwrap();
    assert_eq!(
        status,
        Status::Unavailable {
            mode: XrMode::ImmersiveAr,
            reason: "NotSupportedError".into()
        }
    );
    assert_eq!(status.to_string(), "AR not supported: NotSupportedError");
}

#[test]
fn setup_failure_keeps_session_active_without_hit_test() {
    let partial = SessionResources {
        local_space: Some("local"),
        viewer_space: Some("viewer"),
        hit_test_source: None,
    };
    let (state, statuses) = run(vec![
        Event::StartRequested(XrMode::ImmersiveAr),
        Event::Started,
        Event::ResourcesFailed {
            partial,
            error: PlacementError::ResourceAcquisition {
                what: "hit-test source",
                reason: "unsupported".into(),
            },
        },
    ]);
    assert!(state.is_active());
    assert!(state.resources().and_then(|r| r.hit_test()).is_none());
    assert_eq!(statuses[2], Some(Status::SetupFailed));
}

#[test]
fn end_drops_resources_and_allows_restart() {
    let (state, statuses) = run(vec![
        Event::StartRequested(XrMode::ImmersiveAr),
        Event::Started,
        Event::ResourcesReady(full_resources()),
        Event::Ended,
    ]);
    assert!(matches!(state, SessionState::Ended { mode: XrMode::ImmersiveAr }));
    assert!(state.resources().is_none());
    assert_eq!(
        statuses[3].as_ref().map(|s| s.to_string()),
        Some("Session ended. Tap AR to start again.".to_string())
    );

    let (state, _) = transition(state, Event::StartRequested(XrMode::ImmersiveAr));
    assert!(matches!(state, SessionState::Starting { .. }));
    let (state, _) = transition(state, Event::Started);
    assert!(state.is_active());
    assert!(state.resources().is_none());
}

#[test]
fn late_resources_for_an_ended_session_are_discarded() {
    let (state, _) = run(vec![
        Event::StartRequested(XrMode::ImmersiveAr),
        Event::Started,
        Event::Ended,
    ]);
    let (state, status) = transition(state, Event::ResourcesReady(full_resources()));
    assert!(matches!(state, SessionState::Ended { .. }));
    assert!(state.resources().is_none());
    assert_eq!(status, None);
}

#[test]
fn out_of_order_events_are_ignored() {
    let (state, status) = transition(State::Idle, Event::Ended);
    assert!(matches!(state, SessionState::Idle));
    assert_eq!(status, None);

    let (state, status) = transition(State::Idle, Event::Started);
    assert!(matches!(state, SessionState::Idle));
    assert_eq!(status, None);

    let (state, _) = run(vec![Event::StartRequested(XrMode::ImmersiveVr), Event::Started]);
    let (state, status) = transition(state, Event::StartRequested(XrMode::ImmersiveVr));
    assert!(state.is_active());
    assert_eq!(status, None);
}

#[test]
fn hit_test_needs_both_source_and_local_space() {
    let only_source: SessionResources<Space, Source> = SessionResources {
        local_space: None,
        viewer_space: Some("viewer"),
        hit_test_source: Some(1),
    };
    assert!(only_source.hit_test().is_none());
    assert!(SessionResources::<Space, Source>::default().hit_test().is_none());
    assert_eq!(full_resources().hit_test(), Some((&7, &"local")));
}

#[test]
fn viewer_mode_prefers_ar_then_vr_then_desktop() {
    assert_eq!(ViewerMode::select(true, true), ViewerMode::Ar);
    assert_eq!(ViewerMode::select(false, true), ViewerMode::Vr);
    assert_eq!(ViewerMode::select(false, false), ViewerMode::Desktop);
    assert_eq!(ViewerMode::Desktop.xr_mode(), None);
    assert_eq!(ViewerMode::Ar.xr_mode(), Some(XrMode::ImmersiveAr));
    assert!(!ViewerMode::Ar.shows_floor_grid());
    assert!(ViewerMode::Vr.shows_floor_grid());
}

#[test]
fn ar_sessions_require_hit_test() {
    assert_eq!(XrMode::ImmersiveAr.as_str(), "immersive-ar");
    assert_eq!(XrMode::ImmersiveAr.required_features(), &["hit-test"]);
    assert!(XrMode::ImmersiveAr.uses_hit_test());
    assert!(!XrMode::ImmersiveVr.uses_hit_test());
}

#[test]
fn tracker_without_resources_never_queries_the_platform() {
    let mut tracker = SurfaceTracker::new();
    let frame = ScriptedFrame::with_hit(glam::Vec3::ONE);
    let pose = tracker.update(Some(&frame), None);
    assert!(!pose.found);
    assert!(!tracker.reticle().visible);
    assert_eq!(frame.queries.get(), 0);
}

#[test]
fn tracker_uses_only_the_first_result() {
    let mut tracker = SurfaceTracker::new();
    let frame = ScriptedFrame {
        hits: vec![
            Some(Pose::new(glam::Vec3::new(1.0, 0.0, -2.0), glam::Quat::IDENTITY)),
            Some(Pose::new(glam::Vec3::new(9.0, 9.0, 9.0), glam::Quat::IDENTITY)),
        ],
        queries: Default::default(),
    };
    let resources = full_resources();
    let pose = tracker.update(Some(&frame), Some(&resources));
    assert!(pose.found);
    assert_eq!(pose.position, glam::Vec3::new(1.0, 0.0, -2.0));
    assert!(tracker.reticle().visible);
    assert_eq!(frame.queries.get(), 1);
}

#[test]
fn tracker_hides_reticle_when_results_vanish_or_lack_a_pose() {
    let mut tracker = SurfaceTracker::new();
    let resources = full_resources();
    tracker.update(Some(&ScriptedFrame::with_hit(glam::Vec3::X)), Some(&resources));
    assert!(tracker.reticle().visible);

    let pose = tracker.update(Some(&ScriptedFrame::empty()), Some(&resources));
    assert!(!pose.found);
    assert!(!tracker.reticle().visible);

    tracker.update(Some(&ScriptedFrame::with_hit(glam::Vec3::X)), Some(&resources));
    let no_pose = ScriptedFrame {
        hits: vec![None],
        queries: Default::default(),
    };
    let pose = tracker.update(Some(&no_pose), Some(&resources));
    assert!(!pose.found);
    assert!(!tracker.reticle().visible);
}

#[test]
fn only_idle_or_ended_sessions_accept_a_new_request() {
    let mut state = State::Idle;
    assert!(state.can_start());
    state = transition(state, Event::StartRequested(XrMode::ImmersiveVr)).0;
    assert!(!state.can_start());
    state = transition(state, Event::Started).0;
    assert!(!state.can_start());
    state = transition(state, Event::Ended).0;
    assert!(state.can_start());
}

#[test]
fn rejection_while_idle_changes_nothing() {
    let (state, statuses) = run(vec![Event::Rejected(PlacementError::Unsupported(
        XrMode::ImmersiveAr,
    ))]);
    assert!(matches!(state, SessionState::Idle));
    assert_eq!(statuses[0], None);
}
