//! Change detection
//!
//! The reconciliation loop's state machine. [`ChangeDetector`] compares what
//! was last synced (scene identity, snapshot revision) with what the UI holds
//! now and says when a patch-and-regenerate cycle is due.

use scenegen_graph::SceneId;
use scenegen_props::Revision;
use std::fmt::{self, Display, Formatter};

/// Detector phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncPhase {
    /// No scene loaded
    Idle,
    /// Scene and snapshot match the last sync
    Synced,
    /// A sync is due
    Dirty,
}

impl Display for SyncPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Synced => "synced",
            Self::Dirty => "dirty",
        };
        f.write_str(name)
    }
}

/// Phase transition outside the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("illegal sync transition {from} -> {to}")]
pub struct IllegalTransition {
    /// Phase left
    pub from: SyncPhase,
    /// Phase entered
    pub to: SyncPhase,
}

/// Phases reachable from `from`
#[must_use]
pub fn allowed_transitions(from: SyncPhase) -> Vec<SyncPhase> {
    use SyncPhase::{Dirty, Idle, Synced};
    match from {
        Idle => vec![Synced],
        Synced => vec![Dirty, Idle],
        Dirty => vec![Synced, Dirty, Idle],
    }
}

/// Validate a phase transition
///
/// # Errors
/// Returns [`IllegalTransition`] when `to` is not reachable from `from`.
pub fn validate_transition(from: SyncPhase, to: SyncPhase) -> Result<(), IllegalTransition> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(IllegalTransition { from, to })
    }
}

/// What was observed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SyncPoint {
    /// Scene identity
    pub scene: SceneId,
    /// Snapshot revision
    pub revision: Revision,
}

/// Tracks the last synced point against the latest observation
#[derive(Debug, Clone, Default)]
pub struct ChangeDetector {
    synced: Option<SyncPoint>,
    pending: Option<SyncPoint>,
}

impl ChangeDetector {
    /// Create idle detector
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase
    #[must_use]
    pub fn phase(&self) -> SyncPhase {
        match (self.synced, self.pending) {
            (_, Some(_)) => SyncPhase::Dirty,
            (Some(_), None) => SyncPhase::Synced,
            (None, None) => SyncPhase::Idle,
        }
    }

    /// Point awaiting sync, when dirty
    #[inline]
    #[must_use]
    pub fn pending(&self) -> Option<SyncPoint> {
        self.pending
    }

    /// Last synced point
    #[inline]
    #[must_use]
    pub fn synced(&self) -> Option<SyncPoint> {
        self.synced
    }

    /// Record what the session holds now
    ///
    /// A first scene syncs immediately. A different scene id or snapshot
    /// revision than the last sync marks the detector dirty; a newer
    /// observation while dirty replaces the pending point. Losing the scene
    /// goes back to idle. Returns the phase entered.
    pub fn observe(&mut self, scene: Option<SceneId>, revision: Revision) -> SyncPhase {
        let from = self.phase();
        let Some(scene) = scene else {
            self.synced = None;
            self.pending = None;
            return self.enter(from);
        };

        let point = SyncPoint { scene, revision };
        match self.synced {
            None => {
                self.synced = Some(point);
                self.pending = None;
            }
            Some(synced) if synced == point => self.pending = None,
            Some(_) => self.pending = Some(point),
        }
        self.enter(from)
    }

    /// Finish the cycle started for `point`
    ///
    /// Returns `true` when the detector is synced afterwards. Completing a
    /// point that a later observation superseded records it as synced but
    /// leaves the newer point pending.
    pub fn complete(&mut self, point: SyncPoint) -> bool {
        let from = self.phase();
        self.synced = Some(point);
        if self.pending == Some(point) {
            self.pending = None;
        }
        self.enter(from) == SyncPhase::Synced
    }

    fn enter(&self, from: SyncPhase) -> SyncPhase {
        let to = self.phase();
        if from != to {
            if let Err(err) = validate_transition(from, to) {
                tracing::warn!(%err, "unexpected sync transition");
            } else {
                tracing::debug!(%from, %to, "sync phase changed");
            }
        }
        to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_table() {
        assert!(validate_transition(SyncPhase::Idle, SyncPhase::Synced).is_ok());
        assert!(validate_transition(SyncPhase::Synced, SyncPhase::Dirty).is_ok());
        assert!(validate_transition(SyncPhase::Dirty, SyncPhase::Synced).is_ok());
        assert!(validate_transition(SyncPhase::Idle, SyncPhase::Dirty).is_err());
    }

    #[test]
    fn first_scene_syncs() {
        let mut detector = ChangeDetector::new();
        assert_eq!(detector.phase(), SyncPhase::Idle);
        assert_eq!(detector.observe(Some(SceneId::new()), 0), SyncPhase::Synced);
    }

    #[test]
    fn new_revision_or_scene_dirties() {
        let scene = SceneId::new();
        let mut detector = ChangeDetector::new();
        detector.observe(Some(scene), 0);
        assert_eq!(detector.observe(Some(scene), 0), SyncPhase::Synced);
        assert_eq!(detector.observe(Some(scene), 1), SyncPhase::Dirty);

        let point = detector.pending().unwrap();
        assert!(detector.complete(point));
        assert_eq!(detector.observe(Some(SceneId::new()), 1), SyncPhase::Dirty);
    }

    #[test]
    fn superseded_completion_stays_dirty() {
        let scene = SceneId::new();
        let mut detector = ChangeDetector::new();
        detector.observe(Some(scene), 0);
        detector.observe(Some(scene), 1);
        let first = detector.pending().unwrap();
        detector.observe(Some(scene), 2);

        assert!(!detector.complete(first));
        assert_eq!(detector.phase(), SyncPhase::Dirty);
        assert_eq!(detector.pending().map(|p| p.revision), Some(2));
    }

    #[test]
    fn losing_scene_goes_idle() {
        let mut detector = ChangeDetector::new();
        detector.observe(Some(SceneId::new()), 0);
        assert_eq!(detector.observe(None, 0), SyncPhase::Idle);
        assert_eq!(detector.synced(), None);
    }
}
