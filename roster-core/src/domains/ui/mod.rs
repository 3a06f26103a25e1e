//! View-layer state that is independent of any terminal: forms, toasts, the
//! delete dialog and the users page layout.

pub mod confirm;
pub mod feedback;
pub mod form;
pub mod messages;
pub mod update;
pub mod view;

pub use confirm::DeleteConfirmation;
pub use feedback::{Toast, ToastKind, Toaster};
pub use form::{FormField, LoginForm, UserForm, ValidationError};
pub use view::{EditorMode, LoginView, UserEditor, UsersView, ViewMode};
