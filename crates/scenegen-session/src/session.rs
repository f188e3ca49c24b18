//! Session state
//!
//! Provides [`Session`], the state of one editing session, changed only
//! through [`Session::apply`] with a [`SessionDelta`].
//!
//! # Invariants
//! - Loading a file resets everything else and starts a new epoch
//! - The scene is set by the first regeneration of an epoch and afterwards
//!   only mutated in place
//! - A regeneration result is applied only if its token is the latest issued

use crate::file::ModelFile;
use scenegen_graph::SceneGraph;
use serde::Serialize;
use std::fmt::{self, Display, Formatter};

/// Identifies one regeneration request
///
/// `epoch` counts loaded files, `seq` counts requests within the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RegenToken {
    /// File load counter
    pub epoch: u64,
    /// Request counter
    pub seq: u64,
}

impl Display for RegenToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.epoch, self.seq)
    }
}

/// State change
#[derive(Debug, Clone)]
pub enum SessionDelta {
    /// A new file replaces everything
    Loaded(ModelFile),
    /// A regeneration finished
    Regenerated {
        /// Request this answers
        token: RegenToken,
        /// Generated (formatted when possible) source
        code: String,
        /// Whether the parse carried animations
        animations: bool,
        /// Freshly parsed scene, kept only if none is held yet
        scene: Option<SceneGraph>,
    },
    /// Drop the file and everything derived from it
    Cleared,
}

/// Result of applying a delta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// State changed
    Applied,
    /// Token was superseded; state untouched
    Stale,
}

/// One editing session
#[derive(Debug, Clone, Default)]
pub struct Session {
    file: Option<ModelFile>,
    scene: Option<SceneGraph>,
    code: Option<String>,
    animations: bool,
    epoch: u64,
    seq: u64,
    latest: Option<RegenToken>,
}

impl Session {
    /// Create empty session
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a delta
    pub fn apply(&mut self, delta: SessionDelta) -> ApplyOutcome {
        match delta {
            SessionDelta::Loaded(file) => {
                self.epoch += 1;
                self.latest = None;
                self.scene = None;
                self.code = None;
                self.animations = false;
                tracing::info!(file = %file.name(), epoch = self.epoch, "session reset for new file");
                self.file = Some(file);
                ApplyOutcome::Applied
            }
            SessionDelta::Regenerated {
                token,
                code,
                animations,
                scene,
            } => {
                if self.latest != Some(token) {
                    tracing::debug!(%token, latest = ?self.latest, "dropping stale regeneration");
                    return ApplyOutcome::Stale;
                }
                self.code = Some(code);
                self.animations = animations;
                if self.scene.is_none() {
                    self.scene = scene;
                }
                ApplyOutcome::Applied
            }
            SessionDelta::Cleared => {
                self.epoch += 1;
                self.latest = None;
                self.file = None;
                self.scene = None;
                self.code = None;
                self.animations = false;
                ApplyOutcome::Applied
            }
        }
    }

    /// Issue the token for a new regeneration, superseding older ones
    pub fn issue_token(&mut self) -> RegenToken {
        self.seq += 1;
        let token = RegenToken {
            epoch: self.epoch,
            seq: self.seq,
        };
        self.latest = Some(token);
        token
    }

    /// Whether `token` is still the latest issued
    #[inline]
    #[must_use]
    pub fn is_current(&self, token: RegenToken) -> bool {
        self.latest == Some(token)
    }

    /// Loaded file
    #[inline]
    #[must_use]
    pub fn file(&self) -> Option<&ModelFile> {
        self.file.as_ref()
    }

    /// Live scene
    #[inline]
    #[must_use]
    pub fn scene(&self) -> Option<&SceneGraph> {
        self.scene.as_ref()
    }

    /// Live scene for in-place edits
    #[inline]
    pub fn scene_mut(&mut self) -> Option<&mut SceneGraph> {
        self.scene.as_mut()
    }

    /// Generated source
    #[inline]
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Whether the last parse carried animations
    #[inline]
    #[must_use]
    pub fn animations(&self) -> bool {
        self.animations
    }

    /// Current epoch
    #[inline]
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenegen_graph::{NodeKind, SceneNode};

    fn file() -> ModelFile {
        ModelFile::new("a.glb", Vec::<u8>::new()).unwrap()
    }

    fn regenerated(token: RegenToken, code: &str) -> SessionDelta {
        SessionDelta::Regenerated {
            token,
            code: code.to_string(),
            animations: false,
            scene: Some(SceneGraph::new(SceneNode::new(NodeKind::Group))),
        }
    }

    #[test]
    fn loading_resets_and_bumps_epoch() {
        let mut session = Session::new();
        session.apply(SessionDelta::Loaded(file()));
        let token = session.issue_token();
        session.apply(regenerated(token, "a"));
        assert!(session.scene().is_some());

        session.apply(SessionDelta::Loaded(file()));
        assert_eq!(session.epoch(), 2);
        assert!(session.scene().is_none());
        assert!(session.code().is_none());
    }

    #[test]
    fn first_scene_wins() {
        let mut session = Session::new();
        session.apply(SessionDelta::Loaded(file()));
        let first = session.issue_token();
        session.apply(regenerated(first, "a"));
        let id = session.scene().unwrap().id();

        let second = session.issue_token();
        assert_eq!(session.apply(regenerated(second, "b")), ApplyOutcome::Applied);
        assert_eq!(session.scene().unwrap().id(), id);
        assert_eq!(session.code(), Some("b"));
    }

    #[test]
    fn stale_tokens_are_dropped() {
        let mut session = Session::new();
        session.apply(SessionDelta::Loaded(file()));
        let old = session.issue_token();
        let new = session.issue_token();
        assert!(!session.is_current(old));

        assert_eq!(session.apply(regenerated(old, "old")), ApplyOutcome::Stale);
        assert_eq!(session.code(), None);
        assert_eq!(session.apply(regenerated(new, "new")), ApplyOutcome::Applied);

        let before_reload = session.issue_token();
        session.apply(SessionDelta::Loaded(file()));
        assert_eq!(session.apply(regenerated(before_reload, "x")), ApplyOutcome::Stale);
    }
}
