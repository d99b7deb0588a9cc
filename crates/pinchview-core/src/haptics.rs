/// Strength of a haptic impact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImpactStrength {
    Light,
    Medium,
    Heavy,
}

impl std::fmt::Display for ImpactStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Medium => write!(f, "medium"),
            Self::Heavy => write!(f, "heavy"),
        }
    }
}

/// Fire-and-forget haptic feedback owned by the host.
///
/// Only invoked when a zoom scale is clamped back into range.
pub trait HapticsSink: Send + Sync {
    fn impact(&self, _strength: ImpactStrength) {}
}

/// Sink that discards every impact.
pub struct NoHaptics;
impl HapticsSink for NoHaptics {}
