use roster_model::User;

/// Case-insensitive substring match over first name, last name and email.
/// A blank query keeps every user. Order is preserved.
pub fn filter_users<'a>(users: &'a [User], query: &str) -> Vec<&'a User> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return users.iter().collect();
    }
    users
        .iter()
        .filter(|user| matches_user(user, &needle))
        .collect()
}

fn matches_user(user: &User, needle: &str) -> bool {
    [&user.first_name, &user.last_name, &user.email]
        .into_iter()
        .any(|field| field.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::demo_page;

    fn names(users: &[&User]) -> Vec<String> {
        users.iter().map(|u| u.full_name()).collect()
    }

    #[test]
    fn matches_last_name_regardless_of_case() {
        let page = demo_page(1);
        let hits = filter_users(&page.data, "HOL");
        assert_eq!(names(&hits), vec!["Eve Holt"]);
    }

    #[test]
    fn no_match_yields_empty() {
        let page = demo_page(1);
        assert!(filter_users(&page.data, "zzz").is_empty());
    }

    #[test]
    fn blank_query_returns_everything_in_order() {
        let page = demo_page(1);
        let all = filter_users(&page.data, "   ");
        assert_eq!(all.len(), page.data.len());
        assert!(all.iter().zip(&page.data).all(|(a, b)| *a == b));
    }

    #[test]
    fn matches_email_and_first_name() {
        let page = demo_page(1);
        assert_eq!(names(&filter_users(&page.data, "janet.w")), vec!["Janet Weaver"]);
        // "George" appears once on the first page
        assert_eq!(filter_users(&page.data, "george").len(), 1);
    }
}
