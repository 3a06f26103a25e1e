use roster_model::UserId;

use super::form::FormField;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiMessage {
    ToggleViewMode,
    SearchChanged(String),
    SelectNext,
    SelectPrevious,

    // Editor modal
    OpenCreate,
    OpenEdit(UserId),
    EditorFieldChanged(FormField, String),
    EditorFocusNext,
    EditorFocusPrevious,
    EditorSubmit,
    EditorCancel,

    // Delete dialog
    DeleteRequested(UserId),
    DeleteConfirmed,
    DeleteCancelled,

    DismissToast(u64),
    Tick,
}

impl UiMessage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ToggleViewMode => "UI::ToggleViewMode",
            Self::SearchChanged(_) => "UI::SearchChanged",
            Self::SelectNext => "UI::SelectNext",
            Self::SelectPrevious => "UI::SelectPrevious",
            Self::OpenCreate => "UI::OpenCreate",
            Self::OpenEdit(_) => "UI::OpenEdit",
            Self::EditorFieldChanged(..) => "UI::EditorFieldChanged",
            Self::EditorFocusNext => "UI::EditorFocusNext",
            Self::EditorFocusPrevious => "UI::EditorFocusPrevious",
            Self::EditorSubmit => "UI::EditorSubmit",
            Self::EditorCancel => "UI::EditorCancel",
            Self::DeleteRequested(_) => "UI::DeleteRequested",
            Self::DeleteConfirmed => "UI::DeleteConfirmed",
            Self::DeleteCancelled => "UI::DeleteCancelled",
            Self::DismissToast(_) => "UI::DismissToast",
            Self::Tick => "UI::Tick",
        }
    }
}
