use crate::pomodoro::{Adjustment, Session};

/// represents a user-input event, independent of the UI
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Quit,
    ToggleTimer,
    ResetTimer,
    AdjustDuration(Session, Adjustment),
    ToggleInfo,
    CloseInfo,
    Redraw,
}

pub struct EventConversionUndefinedError;
