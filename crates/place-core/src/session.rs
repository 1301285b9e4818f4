//! XR session lifecycle as explicit transitions.
//!
//! `Idle -> Starting -> Active -> Ended`, with `Ended -> Starting` always
//! allowed. Reference spaces and the hit-test source only exist inside
//! `Active`; leaving it drops them.

use std::fmt;

use crate::error::PlacementError;
use crate::status::Status;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum XrMode {
    ImmersiveAr,
    ImmersiveVr,
}

impl XrMode {
    /// Session mode string understood by `navigator.xr`.
    pub fn as_str(&self) -> &'static str {
        match self {
            XrMode::ImmersiveAr => "immersive-ar",
            XrMode::ImmersiveVr => "immersive-vr",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            XrMode::ImmersiveAr => "AR",
            XrMode::ImmersiveVr => "VR",
        }
    }

    pub fn required_features(&self) -> &'static [&'static str] {
        match self {
            XrMode::ImmersiveAr => &["hit-test"],
            XrMode::ImmersiveVr => &[],
        }
    }

    pub fn optional_features(&self) -> &'static [&'static str] {
        match self {
            XrMode::ImmersiveAr => &["dom-overlay"],
            XrMode::ImmersiveVr => &["local-floor"],
        }
    }

    pub fn uses_hit_test(&self) -> bool {
        matches!(self, XrMode::ImmersiveAr)
    }
}

impl fmt::Display for XrMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How this viewer will present, chosen once from platform support.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewerMode {
    Ar,
    Vr,
    Desktop,
}

impl ViewerMode {
    /// AR if available, else VR, else the desktop preview.
    pub fn select(ar_supported: bool, vr_supported: bool) -> Self {
        if ar_supported {
            ViewerMode::Ar
        } else if vr_supported {
            ViewerMode::Vr
        } else {
            ViewerMode::Desktop
        }
    }

    pub fn xr_mode(&self) -> Option<XrMode> {
        match self {
            ViewerMode::Ar => Some(XrMode::ImmersiveAr),
            ViewerMode::Vr => Some(XrMode::ImmersiveVr),
            ViewerMode::Desktop => None,
        }
    }

    /// Whether the virtual floor grid should be drawn.
    pub fn shows_floor_grid(&self) -> bool {
        !matches!(self, ViewerMode::Ar)
    }
}

/// Platform handles acquired after a session starts. Acquisition happens in
/// order (local space, viewer space, hit-test source) and may stop partway.
#[derive(Debug)]
pub struct SessionResources<Sp, Src> {
    pub local_space: Option<Sp>,
    pub viewer_space: Option<Sp>,
    pub hit_test_source: Option<Src>,
}

impl<Sp, Src> Default for SessionResources<Sp, Src> {
    fn default() -> Self {
        Self {
            local_space: None,
            viewer_space: None,
            hit_test_source: None,
        }
    }
}

impl<Sp, Src> SessionResources<Sp, Src> {
    /// Hit-test source with the space its results are resolved in, when both
    /// were acquired.
    pub fn hit_test(&self) -> Option<(&Src, &Sp)> {
        match (&self.hit_test_source, &self.local_space) {
            (Some(src), Some(space)) => Some((src, space)),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum SessionState<Sp, Src> {
    Idle,
    Starting {
        mode: XrMode,
    },
    Active {
        mode: XrMode,
        resources: Option<SessionResources<Sp, Src>>,
    },
    Ended {
        mode: XrMode,
    },
}

impl<Sp, Src> Default for SessionState<Sp, Src> {
    fn default() -> Self {
        SessionState::Idle
    }
}

impl<Sp, Src> SessionState<Sp, Src> {
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Active { .. })
    }

    /// A new session may be requested only when none is pending or running.
    pub fn can_start(&self) -> bool {
        matches!(self, SessionState::Idle | SessionState::Ended { .. })
    }

    pub fn mode(&self) -> Option<XrMode> {
        match self {
            SessionState::Idle => None,
            SessionState::Starting { mode }
            | SessionState::Active { mode, .. }
            | SessionState::Ended { mode } => Some(*mode),
        }
    }

    pub fn resources(&self) -> Option<&SessionResources<Sp, Src>> {
        match self {
            SessionState::Active { resources, .. } => resources.as_ref(),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Starting { .. } => "starting",
            SessionState::Active { .. } => "active",
            SessionState::Ended { .. } => "ended",
        }
    }
}

#[derive(Debug)]
pub enum SessionEvent<Sp, Src> {
    /// User asked for an immersive session.
    StartRequested(XrMode),
    /// Platform refused the request or does not support the mode.
    Rejected(PlacementError),
    /// Platform reported the session running.
    Started,
    ResourcesReady(SessionResources<Sp, Src>),
    /// Setup stopped partway; whatever was acquired is still handed over.
    ResourcesFailed {
        partial: SessionResources<Sp, Src>,
        error: PlacementError,
    },
    /// Platform ended the session (user exit or programmatic close).
    Ended,
}

impl<Sp, Src> SessionEvent<Sp, Src> {
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::StartRequested(_) => "start-requested",
            SessionEvent::Rejected(_) => "rejected",
            SessionEvent::Started => "started",
            SessionEvent::ResourcesReady(_) => "resources-ready",
            SessionEvent::ResourcesFailed { .. } => "resources-failed",
            SessionEvent::Ended => "ended",
        }
    }
}

/// Apply one event. Returns the next state and, when the transition should
/// change what the user sees, the new status line. Events that make no sense
/// in the current state leave it untouched.
pub fn transition<Sp, Src>(
    state: SessionState<Sp, Src>,
    event: SessionEvent<Sp, Src>,
) -> (SessionState<Sp, Src>, Option<Status>) {
    use SessionEvent as E;
    use SessionState as S;

    let from = state.name();
    let event_name = event.name();
    let (next, status) = match (state, event) {
        (S::Idle | S::Ended { .. }, E::StartRequested(mode)) => {
            (S::Starting { mode }, Some(Status::Starting(mode)))
        }
        (S::Starting { mode }, E::Rejected(error)) => {
            log::warn!("[session] {} request failed: {}", mode, error);
            let reason = match error {
                PlacementError::Unsupported(_) => "no compatible device".to_string(),
                PlacementError::SessionRejected(reason) => reason,
                other => other.to_string(),
            };
            (S::Idle, Some(Status::Unavailable { mode, reason }))
        }
        (S::Starting { mode }, E::Started) => (
            S::Active {
                mode,
                resources: None,
            },
            Some(Status::Aiming(mode)),
        ),
        (S::Active { mode, .. }, E::ResourcesReady(resources)) => (
            S::Active {
                mode,
                resources: Some(resources),
            },
            None,
        ),
        (S::Active { mode, .. }, E::ResourcesFailed { partial, error }) => {
            log::warn!("[session] setup degraded, hit-testing disabled: {}", error);
            (
                S::Active {
                    mode,
                    resources: Some(partial),
                },
                Some(Status::SetupFailed),
            )
        }
        (S::Starting { mode } | S::Active { mode, .. }, E::Ended) => {
            (S::Ended { mode }, Some(Status::Ended(mode)))
        }
        (state, _) => {
            log::debug!("[session] ignoring {} while {}", event_name, from);
            return (state, None);
        }
    };
    log::info!("[session] {} --{}--> {}", from, event_name, next.name());
    (next, status)
}
