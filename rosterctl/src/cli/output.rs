//! Plain-text rendering for one-shot commands.

use std::io::{self, Write};

use roster_core::UserCollectionStore;
use roster_model::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListLayout {
    Table,
    Cards,
}

pub fn write_users(
    out: &mut impl Write,
    users: &[&User],
    layout: ListLayout,
) -> io::Result<()> {
    if users.is_empty() {
        return writeln!(out, "No users found");
    }
    match layout {
        ListLayout::Table => write_table(out, users),
        ListLayout::Cards => write_cards(out, users),
    }
}

fn write_table(out: &mut impl Write, users: &[&User]) -> io::Result<()> {
    let name_width = users
        .iter()
        .map(|u| u.full_name().len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());
    let email_width = users
        .iter()
        .map(|u| u.email.len())
        .max()
        .unwrap_or(0)
        .max("EMAIL".len());

    writeln!(
        out,
        "{:>4}  {:<name_width$}  {:<email_width$}  AVATAR",
        "ID", "NAME", "EMAIL"
    )?;
    for user in users {
        writeln!(
            out,
            "{:>4}  {:<name_width$}  {:<email_width$}  {}",
            user.id.get(),
            user.full_name(),
            user.email,
            user.avatar
        )?;
    }
    Ok(())
}

fn write_cards(out: &mut impl Write, users: &[&User]) -> io::Result<()> {
    for (idx, user) in users.iter().enumerate() {
        if idx > 0 {
            writeln!(out)?;
        }
        writeln!(out, "#{} {}", user.id, user.full_name())?;
        writeln!(out, "   {}", user.mailto())?;
        writeln!(out, "   {}", user.avatar)?;
    }
    Ok(())
}

pub fn write_pagination(
    out: &mut impl Write,
    store: &UserCollectionStore,
) -> io::Result<()> {
    writeln!(
        out,
        "\nPage {} of {} ({} users)",
        store.current_page(),
        store.total_pages(),
        store.total()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_model::UserId;

    fn eve() -> User {
        User {
            id: UserId(4),
            email: "eve.holt@reqres.in".into(),
            first_name: "Eve".into(),
            last_name: "Holt".into(),
            avatar: "https://reqres.in/img/faces/4-image.jpg".into(),
        }
    }

    #[test]
    fn table_has_header_and_aligned_row() {
        let user = eve();
        let mut buf = Vec::new();
        write_users(&mut buf, &[&user], ListLayout::Table).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("  ID  NAME"));
        assert!(lines.next().unwrap().starts_with("   4  Eve Holt  eve.holt@reqres.in"));
    }

    #[test]
    fn cards_show_mail_link() {
        let user = eve();
        let mut buf = Vec::new();
        write_users(&mut buf, &[&user], ListLayout::Cards).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("#4 Eve Holt"));
        assert!(text.contains("mailto:eve.holt@reqres.in"));
    }

    #[test]
    fn empty_list_says_so() {
        let mut buf = Vec::new();
        write_users(&mut buf, &[], ListLayout::Cards).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "No users found\n");
    }
}
