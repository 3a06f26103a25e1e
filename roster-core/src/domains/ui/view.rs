//! View-layer state for the users page: display mode, search text, the
//! editor modal and the delete dialog.

use roster_model::{User, UserId};

use crate::domains::users::search::filter_users;

use super::confirm::DeleteConfirmation;
use super::form::{FormField, LoginForm, UserForm, ValidationError};

/// Placeholder rows/cards drawn while the list is loading.
pub const SKELETON_ROWS: usize = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Table,
    Card,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Table => Self::Card,
            Self::Card => Self::Table,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Table => "Table",
            Self::Card => "Card",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(UserId),
}

pub const EDITOR_FIELDS: [FormField; 4] = [
    FormField::FirstName,
    FormField::LastName,
    FormField::Email,
    FormField::Avatar,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEditor {
    pub mode: EditorMode,
    pub form: UserForm,
    pub errors: ValidationError,
    pub focus: FormField,
}

impl UserEditor {
    pub fn create() -> Self {
        Self {
            mode: EditorMode::Create,
            form: UserForm::default(),
            errors: ValidationError::default(),
            focus: FormField::FirstName,
        }
    }

    pub fn edit(user: &User) -> Self {
        Self {
            mode: EditorMode::Edit(user.id),
            form: UserForm::from_user(user),
            errors: ValidationError::default(),
            focus: FormField::FirstName,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            EditorMode::Create => "Create New User",
            EditorMode::Edit(_) => "Edit User",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            EditorMode::Create => "Submit",
            EditorMode::Edit(_) => "Update",
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = cycle(self.focus, 1);
    }

    pub fn focus_previous(&mut self) {
        self.focus = cycle(self.focus, EDITOR_FIELDS.len() - 1);
    }
}

fn cycle(current: FormField, step: usize) -> FormField {
    let index = EDITOR_FIELDS
        .iter()
        .position(|f| *f == current)
        .unwrap_or(0);
    EDITOR_FIELDS[(index + step) % EDITOR_FIELDS.len()]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginView {
    pub form: LoginForm,
    pub errors: ValidationError,
    pub focus: FormField,
}

impl Default for LoginView {
    fn default() -> Self {
        Self {
            form: LoginForm::default(),
            errors: ValidationError::default(),
            focus: FormField::Email,
        }
    }
}

impl LoginView {
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Email => FormField::Password,
            _ => FormField::Email,
        };
    }
}

#[derive(Debug, Clone, Default)]
pub struct UsersView {
    pub mode: ViewMode,
    pub search: String,
    pub searching: bool,
    pub selected: usize,
    pub editor: Option<UserEditor>,
    pub delete: DeleteConfirmation,
}

impl UsersView {
    /// Loaded users after applying the search text.
    pub fn visible<'a>(&self, users: &'a [User]) -> Vec<&'a User> {
        filter_users(users, &self.search)
    }

    pub fn selected_user<'a>(&self, users: &'a [User]) -> Option<&'a User> {
        self.visible(users).get(self.selected).copied()
    }

    pub fn move_selection(&mut self, users: &[User], delta: isize) {
        let count = self.visible(users).len();
        if count == 0 {
            self.selected = 0;
            return;
        }
        let next = self.selected as isize + delta;
        self.selected = next.clamp(0, count as isize - 1) as usize;
    }

    /// Keep the selection inside the visible list after it changes.
    pub fn clamp_selection(&mut self, users: &[User]) {
        let count = self.visible(users).len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    pub fn is_modal_open(&self) -> bool {
        self.editor.is_some() || self.delete.show
    }
}
