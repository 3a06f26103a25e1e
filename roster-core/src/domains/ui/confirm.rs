use roster_model::UserId;

pub const DELETE_TITLE: &str = "Delete User";
pub const DELETE_MESSAGE: &str =
    "Are you sure you want to delete this user? This action cannot be undone.";

/// Pending delete, shown as a modal until confirmed or cancelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pub show: bool,
    pub target_id: Option<UserId>,
}

impl DeleteConfirmation {
    pub fn request(&mut self, id: UserId) {
        self.show = true;
        self.target_id = Some(id);
    }

    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    /// Close the dialog and hand back the target, if any.
    pub fn take(&mut self) -> Option<UserId> {
        let target = if self.show { self.target_id } else { None };
        *self = Self::default();
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_then_take_clears_state() {
        let mut confirm = DeleteConfirmation::default();
        confirm.request(UserId(7));
        assert_eq!(
            confirm,
            DeleteConfirmation {
                show: true,
                target_id: Some(UserId(7))
            }
        );
        assert_eq!(confirm.take(), Some(UserId(7)));
        assert_eq!(confirm, DeleteConfirmation::default());
        assert_eq!(confirm.take(), None);
    }

    #[test]
    fn cancel_forgets_target() {
        let mut confirm = DeleteConfirmation::default();
        confirm.request(UserId(2));
        confirm.cancel();
        assert_eq!(confirm.take(), None);
    }
}
