use std::fmt;

use crate::session::{ViewerMode, XrMode};

/// Status line shown to the user. Updated on every session transition.
#[derive(Clone, Debug, PartialEq)]
pub enum Status {
    /// Idle, before any session, for the chosen viewer mode.
    Ready(ViewerMode),
    Starting(XrMode),
    Unavailable { mode: XrMode, reason: String },
    Aiming(XrMode),
    SetupFailed,
    Ended(XrMode),
    ModelLoaded,
    Reset,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ready(ViewerMode::Ar) => write!(f, "Aim at floor. Trigger to place/drag."),
            Status::Ready(ViewerMode::Vr) => {
                write!(f, "VR fallback: Trigger to place/drag on floor grid.")
            }
            Status::Ready(ViewerMode::Desktop) => {
                write!(f, "Desktop preview: left-drag places/moves model.")
            }
            Status::Starting(mode) => write!(f, "Starting {}...", mode.short_name()),
            Status::Unavailable { mode, reason } => {
                write!(f, "{} not supported: {}", mode.short_name(), reason)
            }
            Status::Aiming(XrMode::ImmersiveAr) => {
                write!(f, "Move controller to aim. Trigger to place or drag.")
            }
            Status::Aiming(XrMode::ImmersiveVr) => write!(f, "VR: trigger to place/drag on floor grid."),
            Status::SetupFailed => write!(f, "AR setup failed. Placement on detected surfaces is disabled."),
            Status::Ended(mode) => {
                write!(f, "Session ended. Tap {} to start again.", mode.short_name())
            }
            Status::ModelLoaded => write!(f, "Model loaded."),
            Status::Reset => write!(f, "Model removed. Trigger or click to place again."),
        }
    }
}
