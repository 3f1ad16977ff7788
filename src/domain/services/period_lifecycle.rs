//! Pure transition validation for the pay-period lifecycle:
//! `OPEN -> CLOSED -> PUBLISHED -> PAID`, with a privileged out-of-band
//! reopen from CLOSED back to OPEN. No storage concerns here; callers feed
//! in the surrounding facts and apply the outcome with a conditional update.

use crate::domain::models::period::PeriodStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodAction {
    Close,
    Open,
    /// Out-of-sequence open, asserted by the caller only after an elevated
    /// capability check. Logged as a privileged action.
    Reopen,
    Publish,
    Unpublish,
    MarkPaid,
}

/// Chronological predecessor of the period being opened, reduced to the one
/// fact the sequential rule cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredecessorState {
    /// No earlier period exists for the tenant.
    Absent,
    /// The predecessor went through a real close (status past OPEN and
    /// `closed_at` set).
    Closed,
    /// The predecessor is open, or was created and never worked through.
    NotClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Apply(PeriodStatus),
    /// Repeated terminal calls (e.g. paying a paid period) are no-ops.
    Noop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Denial {
    WrongState { action: &'static str, current: PeriodStatus },
    AnotherPeriodOpen,
    OutOfSequence,
}

impl Denial {
    pub fn reason(&self) -> String {
        match self {
            Denial::WrongState { action, current } => {
                format!("Cannot {} a period in status {}", action, current.as_str())
            }
            Denial::AnotherPeriodOpen => {
                "Another period is already open for this tenant".to_string()
            }
            Denial::OutOfSequence => {
                "The previous period has not been closed yet".to_string()
            }
        }
    }
}

pub fn validate_transition(
    current: PeriodStatus,
    action: PeriodAction,
    predecessor: PredecessorState,
    another_open: bool,
) -> Result<Transition, Denial> {
    match action {
        PeriodAction::Close => match current {
            PeriodStatus::Open => Ok(Transition::Apply(PeriodStatus::Closed)),
            other => Err(Denial::WrongState { action: "close", current: other }),
        },
        PeriodAction::Open => {
            if current != PeriodStatus::Closed {
                return Err(Denial::WrongState { action: "open", current });
            }
            if another_open {
                return Err(Denial::AnotherPeriodOpen);
            }
            if predecessor == PredecessorState::NotClosed {
                return Err(Denial::OutOfSequence);
            }
            Ok(Transition::Apply(PeriodStatus::Open))
        }
        PeriodAction::Reopen => {
            if current != PeriodStatus::Closed {
                return Err(Denial::WrongState { action: "reopen", current });
            }
            // Even the privileged path never yields two open periods.
            if another_open {
                return Err(Denial::AnotherPeriodOpen);
            }
            Ok(Transition::Apply(PeriodStatus::Open))
        }
        PeriodAction::Publish => match current {
            PeriodStatus::Closed => Ok(Transition::Apply(PeriodStatus::Published)),
            PeriodStatus::Published => Ok(Transition::Noop),
            other => Err(Denial::WrongState { action: "publish", current: other }),
        },
        PeriodAction::Unpublish => match current {
            PeriodStatus::Published => Ok(Transition::Apply(PeriodStatus::Closed)),
            other => Err(Denial::WrongState { action: "unpublish", current: other }),
        },
        PeriodAction::MarkPaid => match current {
            PeriodStatus::Closed | PeriodStatus::Published => {
                Ok(Transition::Apply(PeriodStatus::Paid))
            }
            PeriodStatus::Paid => Ok(Transition::Noop),
            other => Err(Denial::WrongState { action: "pay", current: other }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PeriodStatus::*;
    use PredecessorState::{Absent, NotClosed};

    #[test]
    fn test_close_only_from_open() {
        assert_eq!(
            validate_transition(Open, PeriodAction::Close, Absent, false),
            Ok(Transition::Apply(Closed))
        );
        assert!(validate_transition(Closed, PeriodAction::Close, Absent, false).is_err());
        assert!(validate_transition(Paid, PeriodAction::Close, Absent, false).is_err());
    }

    #[test]
    fn test_sequential_open() {
        assert_eq!(
            validate_transition(Closed, PeriodAction::Open, Absent, false),
            Ok(Transition::Apply(Open))
        );
        assert_eq!(
            validate_transition(Closed, PeriodAction::Open, PredecessorState::Closed, false),
            Ok(Transition::Apply(Open))
        );
        assert_eq!(
            validate_transition(Closed, PeriodAction::Open, NotClosed, false),
            Err(Denial::OutOfSequence)
        );
        assert_eq!(
            validate_transition(Closed, PeriodAction::Open, PredecessorState::Closed, true),
            Err(Denial::AnotherPeriodOpen)
        );
        assert!(validate_transition(Open, PeriodAction::Open, Absent, false).is_err());
    }

    #[test]
    fn test_reopen_skips_sequence_but_not_single_open_rule() {
        assert_eq!(
            validate_transition(Closed, PeriodAction::Reopen, NotClosed, false),
            Ok(Transition::Apply(Open))
        );
        assert_eq!(
            validate_transition(Closed, PeriodAction::Reopen, NotClosed, true),
            Err(Denial::AnotherPeriodOpen)
        );
        assert!(validate_transition(Published, PeriodAction::Reopen, Absent, false).is_err());
    }

    #[test]
    fn test_publish_unpublish() {
        assert_eq!(
            validate_transition(Closed, PeriodAction::Publish, Absent, false),
            Ok(Transition::Apply(Published))
        );
        assert_eq!(
            validate_transition(Published, PeriodAction::Publish, Absent, false),
            Ok(Transition::Noop)
        );
        assert!(validate_transition(Open, PeriodAction::Publish, Absent, false).is_err());
        assert_eq!(
            validate_transition(Published, PeriodAction::Unpublish, Absent, false),
            Ok(Transition::Apply(Closed))
        );
        assert!(validate_transition(Paid, PeriodAction::Unpublish, Absent, false).is_err());
    }

    #[test]
    fn test_mark_paid_idempotent_and_terminal() {
        assert_eq!(
            validate_transition(Closed, PeriodAction::MarkPaid, Absent, false),
            Ok(Transition::Apply(Paid))
        );
        assert_eq!(
            validate_transition(Published, PeriodAction::MarkPaid, Absent, false),
            Ok(Transition::Apply(Paid))
        );
        assert_eq!(
            validate_transition(Paid, PeriodAction::MarkPaid, Absent, false),
            Ok(Transition::Noop)
        );
        assert!(validate_transition(Open, PeriodAction::MarkPaid, Absent, false).is_err());
        // No way back out of PAID.
        assert!(validate_transition(Paid, PeriodAction::Reopen, Absent, false).is_err());
    }
}
