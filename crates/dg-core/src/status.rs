//! Local simulation status enumeration.
//!
//! A deliberate simplification of the richer state set reported by the
//! job service: everything between submission and a terminal state
//! collapses to `Incomplete`. The mapping itself lives next to the remote
//! status type in dg-cloud.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimStatus {
    NotStarted,
    Incomplete,
    Complete,
    Failed,
    Cancelled,
}

impl SimStatus {
    /// True once the job can no longer change state on its own.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SimStatus::Complete | SimStatus::Failed | SimStatus::Cancelled
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            SimStatus::NotStarted => "not started",
            SimStatus::Incomplete => "incomplete",
            SimStatus::Complete => "complete",
            SimStatus::Failed => "failed",
            SimStatus::Cancelled => "cancelled",
        }
    }
}

impl core::fmt::Display for SimStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(!SimStatus::NotStarted.is_terminal());
        assert!(!SimStatus::Incomplete.is_terminal());
        assert!(SimStatus::Complete.is_terminal());
        assert!(SimStatus::Failed.is_terminal());
        assert!(SimStatus::Cancelled.is_terminal());
    }
}
