//! Shared state types for the egui UI.

use egui::Color32;

use crate::present::UNKNOWN_LABEL;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    /// Status badge + text shown in the footer.
    pub status: StatusBarState,
    /// Label currently shown as the recognition result.
    pub result_label: String,
    /// Whether the Recognize action is currently offered.
    pub recognize_enabled: bool,
    /// Whether the Clear action is currently offered.
    pub clear_enabled: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: StatusBarState::idle(),
            result_label: UNKNOWN_LABEL.to_string(),
            recognize_enabled: false,
            clear_enabled: false,
        }
    }
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    /// Status message.
    pub text: String,
    /// Short badge label, e.g. "Idle".
    pub badge_label: String,
    /// Badge fill color.
    pub badge_color: Color32,
}

impl StatusBarState {
    /// Initial footer state before any interaction.
    pub fn idle() -> Self {
        Self {
            text: "Draw a digit to get started".into(),
            badge_label: "Idle".into(),
            badge_color: Color32::from_rgb(42, 42, 42),
        }
    }
}
