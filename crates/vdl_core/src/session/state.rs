//! Session phases.

use crate::models::ClipId;
use crate::orchestrator::{RunAction, RunReport};

/// Where the session is. Each variant carries exactly the data valid in it.
#[derive(Debug, Clone, Default)]
pub enum Phase {
    /// No valid URL entered.
    #[default]
    Idle,
    /// URL is valid; the clip id lookup is in flight.
    Checking,
    /// Clip resolved and nothing on disk conflicts: download is possible.
    Ready { clip: ClipId },
    /// The output or the clip's video stream already exists: combine is possible.
    Conflict { clip: ClipId },
    /// A worker is downloading and/or combining.
    Running { action: RunAction, clip: ClipId },
    /// The run succeeded; the completion dialog is showing.
    Completed { report: RunReport },
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Checking => "checking",
            Phase::Ready { .. } => "ready",
            Phase::Conflict { .. } => "conflict",
            Phase::Running { .. } => "running",
            Phase::Completed { .. } => "completed",
        }
    }

    /// Resolved clip, if the phase has one.
    pub fn clip(&self) -> Option<&ClipId> {
        match self {
            Phase::Ready { clip } | Phase::Conflict { clip } | Phase::Running { clip, .. } => {
                Some(clip)
            }
            Phase::Completed { report } => Some(&report.clip),
            Phase::Idle | Phase::Checking => None,
        }
    }

    pub fn can_download(&self) -> bool {
        matches!(self, Phase::Ready { .. })
    }

    pub fn can_combine(&self) -> bool {
        matches!(self, Phase::Conflict { .. })
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Phase::Running { .. })
    }

    /// Form fields are editable (no run in progress, no dialog).
    pub fn accepts_input(&self) -> bool {
        !matches!(self, Phase::Running { .. } | Phase::Completed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip() -> ClipId {
        ClipId::new("abc").unwrap()
    }

    #[test]
    fn buttons_follow_phase() {
        let cases = [
            (Phase::Idle, false, false),
            (Phase::Checking, false, false),
            (Phase::Ready { clip: clip() }, true, false),
            (Phase::Conflict { clip: clip() }, false, true),
            (
                Phase::Running {
                    action: RunAction::Download,
                    clip: clip(),
                },
                false,
                false,
            ),
        ];

        for (phase, download, combine) in cases {
            assert_eq!(phase.can_download(), download, "{}", phase.name());
            assert_eq!(phase.can_combine(), combine, "{}", phase.name());
        }
    }

    #[test]
    fn input_locked_while_running() {
        assert!(Phase::Idle.accepts_input());
        assert!(Phase::Conflict { clip: clip() }.accepts_input());
        assert!(!Phase::Running {
            action: RunAction::Combine,
            clip: clip()
        }
        .accepts_input());
    }
}
