//! The Collection Store: the current page of users and its pagination
//! metadata.
//!
//! Operations come in two phases so the console can run the request on a
//! task and apply the response later. `begin_*` marks the store loading and
//! `finish_*` applies the outcome. Every fetch is stamped with a
//! [`FetchTicket`]; only the most recently issued ticket may replace the
//! page.

use roster_model::{
    RegisterRequest, UpdateUserRequest, User, UserId, UserPage,
};
use tracing::{debug, info, warn};

use crate::error::ApiResult;
use crate::infrastructure::services::UserAdminService;

pub const FETCH_FAILED: &str = "Failed to fetch users";

/// What happens to the visible page after a successful mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RefreshPolicy {
    /// Re-fetch the current page after every create, update and delete.
    #[default]
    RefetchCurrentPage,
    /// Leave the page as is; callers refresh explicitly.
    Manual,
}

impl std::str::FromStr for RefreshPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "refetch" | "refetch-current-page" => Ok(Self::RefetchCurrentPage),
            "manual" => Ok(Self::Manual),
            other => Err(format!("unknown refresh policy '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    pub fn fallback_message(self) -> &'static str {
        match self {
            Self::Create => "Failed to create user",
            Self::Update => "Failed to update user",
            Self::Delete => "Failed to delete user",
        }
    }
}

/// Identifies one dispatched fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub page: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// A newer fetch was issued after this one; the response was dropped.
    Stale,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct UserCollectionStore {
    users: Vec<User>,
    current_page: u32,
    per_page: u32,
    total: u32,
    total_pages: u32,
    in_flight: usize,
    latest_fetch: u64,
    last_error: Option<String>,
    policy: RefreshPolicy,
}

impl Default for UserCollectionStore {
    fn default() -> Self {
        Self::new(RefreshPolicy::default())
    }
}

impl UserCollectionStore {
    pub fn new(policy: RefreshPolicy) -> Self {
        Self {
            users: Vec::new(),
            current_page: 1,
            per_page: 0,
            total: 0,
            total_pages: 0,
            in_flight: 0,
            latest_fetch: 0,
            last_error: None,
            policy,
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn policy(&self) -> RefreshPolicy {
        self.policy
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Page buttons to render, `1..=total_pages`.
    pub fn page_numbers(&self) -> std::ops::RangeInclusive<u32> {
        1..=self.total_pages
    }

    /// Forget the loaded page, e.g. after logout. Sequence numbers and the
    /// in-flight count carry over so responses still on the wire stay stale
    /// and keep the loading flag honest.
    pub fn reset(&mut self) {
        *self = Self {
            in_flight: self.in_flight,
            latest_fetch: self.latest_fetch,
            ..Self::new(self.policy)
        };
    }

    /// Settle a response that arrived after its session ended without
    /// applying it.
    pub fn abandon(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    pub fn begin_fetch(&mut self, page: u32) -> FetchTicket {
        self.in_flight += 1;
        self.latest_fetch += 1;
        let ticket = FetchTicket {
            seq: self.latest_fetch,
            page: page.max(1),
        };
        debug!(page = ticket.page, seq = ticket.seq, "fetching users");
        ticket
    }

    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        outcome: ApiResult<UserPage>,
    ) -> FetchOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);

        if ticket.seq != self.latest_fetch {
            debug!(
                page = ticket.page,
                seq = ticket.seq,
                latest = self.latest_fetch,
                "dropping stale users page"
            );
            return FetchOutcome::Stale;
        }

        match outcome {
            Ok(page) => {
                for violation in page.violations() {
                    warn!(page = ticket.page, %violation, "server page violates pagination bounds");
                }
                if page.page != ticket.page {
                    warn!(
                        requested = ticket.page,
                        returned = page.page,
                        "server answered a different page"
                    );
                }
                self.current_page = ticket.page;
                self.per_page = page.per_page;
                self.total = page.total;
                self.total_pages = page.total_pages;
                self.users = page.data;
                self.last_error = None;
                info!(page = ticket.page, count = self.users.len(), "users page loaded");
                FetchOutcome::Applied
            }
            Err(err) => {
                let message = err.normalized(FETCH_FAILED);
                warn!(page = ticket.page, status = ?err.status(), %message, "users fetch failed");
                self.last_error = Some(message.clone());
                FetchOutcome::Failed(message)
            }
        }
    }

    pub fn begin_mutation(&mut self, kind: MutationKind) {
        self.in_flight += 1;
        debug!(?kind, "submitting user mutation");
    }

    /// Apply a mutation outcome. The server's echo is never merged into the
    /// page; on success under [`RefreshPolicy::RefetchCurrentPage`] a fetch
    /// of the current page is issued and its ticket returned.
    pub fn finish_mutation<T>(
        &mut self,
        kind: MutationKind,
        outcome: ApiResult<T>,
    ) -> Result<Option<FetchTicket>, String> {
        self.in_flight = self.in_flight.saturating_sub(1);
        match outcome {
            Ok(_) => {
                info!(?kind, "user mutation accepted");
                self.last_error = None;
                match self.policy {
                    RefreshPolicy::RefetchCurrentPage => {
                        Ok(Some(self.begin_fetch(self.current_page)))
                    }
                    RefreshPolicy::Manual => Ok(None),
                }
            }
            Err(err) => {
                let message = err.normalized(kind.fallback_message());
                warn!(?kind, status = ?err.status(), %message, "user mutation failed");
                self.last_error = Some(message.clone());
                Err(message)
            }
        }
    }

    pub async fn fetch(
        &mut self,
        service: &dyn UserAdminService,
        page: u32,
    ) -> Result<(), String> {
        let ticket = self.begin_fetch(page);
        let outcome = service.list_users(ticket.page).await;
        match self.finish_fetch(ticket, outcome) {
            FetchOutcome::Failed(message) => Err(message),
            FetchOutcome::Applied | FetchOutcome::Stale => Ok(()),
        }
    }

    pub async fn create(
        &mut self,
        service: &dyn UserAdminService,
        request: &RegisterRequest,
    ) -> Result<(), String> {
        self.begin_mutation(MutationKind::Create);
        let outcome = service.create_user(request).await;
        let refetch = self.finish_mutation(MutationKind::Create, outcome)?;
        self.run_refetch(service, refetch).await;
        Ok(())
    }

    pub async fn update(
        &mut self,
        service: &dyn UserAdminService,
        user_id: UserId,
        request: &UpdateUserRequest,
    ) -> Result<(), String> {
        self.begin_mutation(MutationKind::Update);
        let outcome = service.update_user(user_id, request).await;
        let refetch = self.finish_mutation(MutationKind::Update, outcome)?;
        self.run_refetch(service, refetch).await;
        Ok(())
    }

    pub async fn delete(
        &mut self,
        service: &dyn UserAdminService,
        user_id: UserId,
    ) -> Result<(), String> {
        self.begin_mutation(MutationKind::Delete);
        let outcome = service.delete_user(user_id).await;
        let refetch = self.finish_mutation(MutationKind::Delete, outcome)?;
        self.run_refetch(service, refetch).await;
        Ok(())
    }

    // A failed refresh leaves the error on the store; the mutation itself
    // still succeeded.
    async fn run_refetch(
        &mut self,
        service: &dyn UserAdminService,
        ticket: Option<FetchTicket>,
    ) {
        if let Some(ticket) = ticket {
            let outcome = service.list_users(ticket.page).await;
            self.finish_fetch(ticket, outcome);
        }
    }
}
