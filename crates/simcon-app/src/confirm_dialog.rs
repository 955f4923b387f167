//! Confirm dialog state.
//!
//! Data model for confirmation dialogs. The rendering widget lives in
//! simcon-tui. A reset can only be dispatched with a [`ConfirmedReset`],
//! and the only code able to build one is the reset dialog defined here.

use crate::action_lock::ActionKind;
use crate::message::Message;

/// Which reset the operator asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetKind {
    /// Clear the simulator state only
    State,
    /// Clear the state and all generated data
    WithData,
}

impl ResetKind {
    pub fn action_kind(&self) -> ActionKind {
        match self {
            ResetKind::State => ActionKind::ResetState,
            ResetKind::WithData => ActionKind::ResetWithData,
        }
    }
}

/// A reset the operator explicitly confirmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedReset {
    kind: ResetKind,
}

impl ConfirmedReset {
    pub fn kind(&self) -> ResetKind {
        self.kind
    }

    pub fn clear_data(&self) -> bool {
        self.kind == ResetKind::WithData
    }
}

#[derive(Debug, Clone)]
pub struct ConfirmDialogState {
    pub title: String,
    pub message: String,
    pub options: Vec<(String, Message)>,
    pub selected: usize,
    /// Rendered with the warning palette
    pub destructive: bool,
}

impl ConfirmDialogState {
    /// Create a generic confirmation dialog
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        options: Vec<(&str, Message)>,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            options: options
                .into_iter()
                .map(|(label, msg)| (label.to_string(), msg))
                .collect(),
            selected: 0,
            destructive: false,
        }
    }

    /// Confirmation for a reset. The cancel option is preselected.
    pub fn reset(kind: ResetKind) -> Self {
        let confirm = Message::ConfirmReset(ConfirmedReset { kind });
        let mut dialog = match kind {
            ResetKind::State => Self::new(
                "Reset simulator?",
                "Are you sure you want to reset the simulator? This will clear the state.",
                vec![("Reset", confirm), ("Cancel", Message::CancelDialog)],
            ),
            ResetKind::WithData => {
                let mut dialog = Self::new(
                    "Reset simulator and clear data?",
                    "Are you sure? This will CLEAR ALL GENERATED DATA. This cannot be undone.",
                    vec![("Clear all data", confirm), ("Cancel", Message::CancelDialog)],
                );
                dialog.destructive = true;
                dialog
            }
        };
        dialog.selected = 1;
        dialog
    }

    pub fn select_next(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + 1) % self.options.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + self.options.len() - 1) % self.options.len();
        }
    }

    /// Message of the highlighted option
    pub fn selected_message(&self) -> Option<Message> {
        self.options.get(self.selected).map(|(_, msg)| msg.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_dialogs_have_distinct_text() {
        let state = ConfirmDialogState::reset(ResetKind::State);
        let data = ConfirmDialogState::reset(ResetKind::WithData);

        assert!(state.message.contains("This will clear the state."));
        assert!(data.message.contains("CLEAR ALL GENERATED DATA"));
        assert_ne!(state.message, data.message);
        assert!(data.destructive);
        assert!(!state.destructive);
    }

    #[test]
    fn test_reset_dialog_defaults_to_cancel() {
        let dialog = ConfirmDialogState::reset(ResetKind::WithData);
        assert!(matches!(
            dialog.selected_message(),
            Some(Message::CancelDialog)
        ));
    }

    #[test]
    fn test_confirm_option_carries_kind() {
        let mut dialog = ConfirmDialogState::reset(ResetKind::WithData);
        dialog.select_previous();
        match dialog.selected_message() {
            Some(Message::ConfirmReset(confirmed)) => {
                assert_eq!(confirmed.kind(), ResetKind::WithData);
                assert!(confirmed.clear_data());
            }
            other => panic!("expected ConfirmReset, got {:?}", other),
        }
    }

    #[test]
    fn test_selection_wraps() {
        let mut dialog = ConfirmDialogState::reset(ResetKind::State);
        dialog.select_next();
        assert_eq!(dialog.selected, 0);
        dialog.select_previous();
        assert_eq!(dialog.selected, 1);
    }
}
