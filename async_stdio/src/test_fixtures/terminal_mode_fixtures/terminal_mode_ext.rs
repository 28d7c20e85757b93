// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ModeTransitionLog, TerminalModeController};

pub trait TerminalModeControllerExt {
    /// A controller that records transitions in the returned log instead of changing
    /// any terminal attributes.
    fn new_mock() -> (TerminalModeController, ModeTransitionLog);
}

impl TerminalModeControllerExt for TerminalModeController {
    fn new_mock() -> (TerminalModeController, ModeTransitionLog) {
        let log = ModeTransitionLog::default();
        (TerminalModeController::from_transition_log(log.clone()), log)
    }
}
