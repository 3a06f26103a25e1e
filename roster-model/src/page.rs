use crate::user::User;

/// One server-paginated slice of users plus its pagination metadata.
///
/// Extra fields in the response body (the demo API adds a `support` blurb)
/// are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserPage {
    pub data: Vec<User>,
    pub page: u32,
    pub per_page: u32,
    pub total: u32,
    pub total_pages: u32,
}

/// A broken pagination invariant reported by [`UserPage::violations`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageViolation {
    /// `data.len() > per_page`
    Overfull { len: usize, per_page: u32 },
    /// `page` outside `[1, total_pages]`
    PageOutOfRange { page: u32, total_pages: u32 },
}

impl std::fmt::Display for PageViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageViolation::Overfull { len, per_page } => {
                write!(f, "page holds {len} records but per_page is {per_page}")
            }
            PageViolation::PageOutOfRange { page, total_pages } => {
                write!(f, "page {page} is outside 1..={total_pages}")
            }
        }
    }
}

impl UserPage {
    pub fn empty(page: u32) -> Self {
        Self {
            data: Vec::new(),
            page,
            per_page: 0,
            total: 0,
            total_pages: 0,
        }
    }

    /// Checks the invariants the server is expected to uphold.
    ///
    /// An empty collection (`total_pages == 0`) is allowed to report any page.
    pub fn violations(&self) -> Vec<PageViolation> {
        let mut out = Vec::new();
        if self.data.len() > self.per_page as usize {
            out.push(PageViolation::Overfull {
                len: self.data.len(),
                per_page: self.per_page,
            });
        }
        if self.total_pages > 0
            && (self.page < 1 || self.page > self.total_pages)
        {
            out.push(PageViolation::PageOutOfRange {
                page: self.page,
                total_pages: self.total_pages,
            });
        }
        out
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "page": 2,
        "per_page": 6,
        "total": 12,
        "total_pages": 2,
        "data": [
            {"id": 7, "email": "michael.lawson@reqres.in", "first_name": "Michael",
             "last_name": "Lawson", "avatar": "https://reqres.in/img/faces/7-image.jpg"},
            {"id": 8, "email": "lindsay.ferguson@reqres.in", "first_name": "Lindsay",
             "last_name": "Ferguson", "avatar": "https://reqres.in/img/faces/8-image.jpg"}
        ],
        "support": {"url": "https://contentcaddy.io", "text": "Tired of writing endless social media content?"}
    }"#;

    #[test]
    fn decodes_demo_api_page_and_ignores_support_block() {
        let page: UserPage = serde_json::from_str(BODY).unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].first_name, "Michael");
        assert_eq!(page.data[1].id.get(), 8);
        assert!(page.violations().is_empty());
    }

    #[test]
    fn reports_overfull_and_out_of_range_pages() {
        let mut page: UserPage = serde_json::from_str(BODY).unwrap();
        page.per_page = 1;
        page.page = 3;
        let violations = page.violations();
        assert_eq!(violations.len(), 2);
        assert!(matches!(violations[0], PageViolation::Overfull { len: 2, .. }));
        assert!(matches!(
            violations[1],
            PageViolation::PageOutOfRange { page: 3, total_pages: 2 }
        ));
    }

    #[test]
    fn empty_page_has_no_violations() {
        assert!(UserPage::empty(1).violations().is_empty());
    }
}
