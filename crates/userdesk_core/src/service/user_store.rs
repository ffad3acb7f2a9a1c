//! User record store.
//!
//! # Responsibility
//! - Seed user records from a [`UserSource`] and keep load state.
//! - Apply local create/update/delete on top of the fetched records.
//!
//! # Invariants
//! - Record ids are unique; local ids are `max(existing, 0) + 1`.
//! - Every locally created or edited record passed form validation.
//! - Only the result of the latest load may change store state.
//! - Failed loads keep the previous records.

use crate::model::user::{UserId, UserRecord};
use crate::model::user_form::{validate_user_input, FieldErrors, UserInput};
use crate::search::filter::filter_users;
use crate::source::payload::RemoteUser;
use crate::source::{SourceResult, UserSource};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Message stored in [`UserStore::error`] when a load fails.
pub const LOAD_ERROR_MESSAGE: &str = "Could not load users. Please try again later.";

/// Rejection of a create or update call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserStoreError {
    /// Input failed form validation; carries every failing field.
    Validation(FieldErrors),
    /// No record has the requested id.
    NotFound(UserId),
    /// The next local id would overflow.
    IdExhausted,
}

impl Display for UserStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(errors) => write!(f, "invalid user input: {errors}"),
            Self::NotFound(id) => write!(f, "user not found: {id}"),
            Self::IdExhausted => write!(f, "no user id left to assign"),
        }
    }
}

impl Error for UserStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(errors) => Some(errors),
            Self::NotFound(_) | Self::IdExhausted => None,
        }
    }
}

impl From<FieldErrors> for UserStoreError {
    fn from(value: FieldErrors) -> Self {
        Self::Validation(value)
    }
}

/// Handle for one in-flight load, issued by [`UserStore::begin_load`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "pass the ticket to `finish_load`"]
pub struct LoadTicket {
    seq: u64,
}

/// What a finished load did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Records were replaced with `count` fetched users.
    Loaded { count: usize },
    /// The fetch failed; `error` is set and records are unchanged.
    Failed,
    /// A newer load was started; this result was dropped.
    Superseded,
}

/// In-memory user records seeded from a remote source.
pub struct UserStore<S: UserSource> {
    source: S,
    records: Vec<UserRecord>,
    loading: bool,
    error: Option<String>,
    latest_load: u64,
}

impl<S: UserSource> UserStore<S> {
    /// Creates an empty, idle store. Call [`Self::load`] to seed it.
    pub fn new(source: S) -> Self {
        Self {
            source,
            records: Vec::new(),
            loading: false,
            error: None,
            latest_load: 0,
        }
    }

    /// Creates a store and runs its initial load.
    pub fn open(source: S) -> Self {
        let mut store = Self::new(source);
        store.load();
        store
    }

    /// Fetches users and replaces the collection on success.
    ///
    /// Also serves as the retry action after a failed load.
    pub fn load(&mut self) -> LoadOutcome {
        let ticket = self.begin_load();
        let result = self.source.fetch_users();
        self.finish_load(ticket, result)
    }

    /// Marks a load as started and supersedes every earlier ticket.
    ///
    /// Sets `loading` and clears `error`.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_load += 1;
        self.loading = true;
        self.error = None;
        info!(
            "event=users_load module=user_store status=start seq={}",
            self.latest_load
        );
        LoadTicket {
            seq: self.latest_load,
        }
    }

    /// Applies the result for `ticket` unless a newer load has begun.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: SourceResult<Vec<RemoteUser>>,
    ) -> LoadOutcome {
        if ticket.seq != self.latest_load {
            debug!(
                "event=users_load module=user_store status=superseded seq={} latest={}",
                ticket.seq, self.latest_load
            );
            return LoadOutcome::Superseded;
        }

        self.loading = false;
        match result {
            Ok(users) => {
                self.records = users.into_iter().map(UserRecord::from).collect();
                info!(
                    "event=users_load module=user_store status=ok seq={} count={}",
                    ticket.seq,
                    self.records.len()
                );
                LoadOutcome::Loaded {
                    count: self.records.len(),
                }
            }
            Err(err) => {
                error!(
                    "event=users_load module=user_store status=error seq={} error={}",
                    ticket.seq, err
                );
                self.error = Some(LOAD_ERROR_MESSAGE.to_string());
                LoadOutcome::Failed
            }
        }
    }

    /// Appends a new record with the next local id.
    ///
    /// # Errors
    /// - `Validation` with every failing field; the store is unchanged.
    /// - `IdExhausted` when `max + 1` overflows.
    pub fn create(&mut self, input: &UserInput) -> Result<UserRecord, UserStoreError> {
        let errors = validate_user_input(input);
        if !errors.is_empty() {
            return Err(errors.into());
        }

        let id = self.next_id().ok_or(UserStoreError::IdExhausted)?;
        let record = UserRecord::from_input(id, input);
        self.records.push(record.clone());
        info!(
            "event=user_create module=user_store status=ok id={} count={}",
            id,
            self.records.len()
        );
        Ok(record)
    }

    /// Replaces the editable fields of record `id`, keeping its position.
    ///
    /// Existence is checked before validation, so a missing id reports
    /// `NotFound` even when the input is also invalid.
    ///
    /// # Errors
    /// - `NotFound(id)` when no record matches.
    /// - `Validation` with every failing field.
    pub fn update(&mut self, id: UserId, input: &UserInput) -> Result<UserRecord, UserStoreError> {
        let index = self
            .records
            .iter()
            .position(|record| record.id == id)
            .ok_or(UserStoreError::NotFound(id))?;

        let errors = validate_user_input(input);
        if !errors.is_empty() {
            return Err(errors.into());
        }

        let record = &mut self.records[index];
        record.apply_input(input);
        info!("event=user_update module=user_store status=ok id={id}");
        Ok(record.clone())
    }

    /// Removes record `id`. Returns `false` (and changes nothing) when absent.
    pub fn delete(&mut self, id: UserId) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        let removed = self.records.len() != before;
        debug!("event=user_delete module=user_store status=ok id={id} removed={removed}");
        removed
    }

    /// Records whose name, email or company contains `term`, ignoring case.
    pub fn search(&self, term: &str) -> Vec<&UserRecord> {
        filter_users(&self.records, term)
    }

    pub fn get(&self, id: UserId) -> Option<&UserRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// User-facing message of the last failed load, cleared by the next load.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn next_id(&self) -> Option<UserId> {
        self.records
            .iter()
            .map(|record| record.id)
            .fold(0, UserId::max)
            .checked_add(1)
    }
}

#[cfg(test)]
mod tests {
    use super::{LoadOutcome, UserStore, UserStoreError};
    use crate::model::user_form::UserInput;
    use crate::source::payload::RemoteUser;
    use crate::source::{SourceError, SourceResult, UserSource};

    struct EmptySource;

    impl UserSource for EmptySource {
        fn fetch_users(&self) -> SourceResult<Vec<RemoteUser>> {
            Ok(Vec::new())
        }
    }

    struct DownSource;

    impl UserSource for DownSource {
        fn fetch_users(&self) -> SourceResult<Vec<RemoteUser>> {
            Err(SourceError::Status(503))
        }
    }

    fn input(name: &str) -> UserInput {
        UserInput {
            name: name.to_string(),
            email: "someone@example.com".to_string(),
            phone: "555-0100".to_string(),
            company: "Acme".to_string(),
            city: "Porto".to_string(),
        }
    }

    #[test]
    fn first_created_id_is_one() {
        let mut store = UserStore::open(EmptySource);
        let created = store.create(&input("Ana")).unwrap();
        assert_eq!(created.id, 1);
        assert!(created.website.is_none());
    }

    #[test]
    fn negative_remote_ids_do_not_pull_next_id_below_one() {
        let mut store = UserStore::new(EmptySource);
        store.records.push(crate::UserRecord {
            id: -5,
            ..store_record()
        });
        assert_eq!(store.create(&input("Ana")).unwrap().id, 1);
    }

    #[test]
    fn id_overflow_is_reported() {
        let mut store = UserStore::new(EmptySource);
        store.records.push(crate::UserRecord {
            id: i64::MAX,
            ..store_record()
        });
        assert_eq!(
            store.create(&input("Ana")).unwrap_err(),
            UserStoreError::IdExhausted
        );
        assert_eq!(store.records().len(), 1);
    }

    #[test]
    fn failed_initial_load_sets_message_and_clears_loading() {
        let store = UserStore::open(DownSource);
        assert!(!store.is_loading());
        assert_eq!(store.error(), Some(super::LOAD_ERROR_MESSAGE));
        assert!(store.records().is_empty());
    }

    #[test]
    fn stale_ticket_is_superseded() {
        let mut store = UserStore::new(EmptySource);
        let stale = store.begin_load();
        let fresh = store.begin_load();

        assert_eq!(
            store.finish_load(stale, Err(SourceError::Status(500))),
            LoadOutcome::Superseded
        );
        assert!(store.is_loading());
        assert!(store.error().is_none());

        assert_eq!(
            store.finish_load(fresh, Ok(Vec::new())),
            LoadOutcome::Loaded { count: 0 }
        );
        assert!(!store.is_loading());
    }

    fn store_record() -> crate::UserRecord {
        crate::UserRecord::from_input(0, &input("Seed"))
    }
}
