use proptest::prelude::*;
use scenegen_graph::SceneId;
use scenegen_session::{allowed_transitions, validate_transition, ChangeDetector, SyncPhase};

fn phase() -> impl Strategy<Value = SyncPhase> {
    prop_oneof![
        Just(SyncPhase::Idle),
        Just(SyncPhase::Synced),
        Just(SyncPhase::Dirty),
    ]
}

#[test]
fn idle_only_syncs() {
    assert!(validate_transition(SyncPhase::Idle, SyncPhase::Synced).is_ok());
    assert!(validate_transition(SyncPhase::Idle, SyncPhase::Dirty).is_err());
}

#[test]
fn synced_goes_dirty_or_idle() {
    assert!(validate_transition(SyncPhase::Synced, SyncPhase::Dirty).is_ok());
    assert!(validate_transition(SyncPhase::Synced, SyncPhase::Idle).is_ok());
    assert!(validate_transition(SyncPhase::Synced, SyncPhase::Synced).is_err());
}

#[test]
fn superseded_cycle_stays_dirty() {
    let scene = SceneId::new();
    let mut detector = ChangeDetector::new();
    detector.observe(Some(scene), 0);
    assert_eq!(detector.observe(Some(scene), 1), SyncPhase::Dirty);
    let first = detector.pending().unwrap();

    assert_eq!(detector.observe(Some(scene), 2), SyncPhase::Dirty);
    assert!(!detector.complete(first));
    assert_eq!(detector.pending().unwrap().revision, 2);

    let second = detector.pending().unwrap();
    assert!(detector.complete(second));
    assert_eq!(detector.phase(), SyncPhase::Synced);
}

#[test]
fn new_scene_is_a_change() {
    let mut detector = ChangeDetector::new();
    detector.observe(Some(SceneId::new()), 3);
    assert_eq!(detector.observe(Some(SceneId::new()), 3), SyncPhase::Dirty);
    assert_eq!(detector.observe(None, 0), SyncPhase::Idle);
}

proptest! {
    #[test]
    fn prop_validate_agrees_with_allowed(from in phase(), to in phase()) {
        let allowed = allowed_transitions(from);
        prop_assert_eq!(validate_transition(from, to).is_ok(), allowed.contains(&to));
    }

    #[test]
    fn prop_observed_phases_follow_table(steps in prop::collection::vec((0u8..3, 0u64..4, any::<bool>()), 1..40)) {
        let scenes = [SceneId::new(), SceneId::new()];
        let mut detector = ChangeDetector::new();
        for (scene, revision, complete) in steps {
            let from = detector.phase();
            let observed = if scene == 2 { None } else { Some(scenes[usize::from(scene)]) };
            let to = detector.observe(observed, revision);
            if from != to {
                prop_assert!(validate_transition(from, to).is_ok(), "{} -> {}", from, to);
            }
            if complete {
                if let Some(point) = detector.pending() {
                    prop_assert!(detector.complete(point));
                    prop_assert_eq!(detector.phase(), SyncPhase::Synced);
                }
            }
        }
    }
}
