//! User management screen: list, create, edit, delete.
//!
//! State transitions are synchronous methods. The request sequences (load,
//! save then refetch, confirm then delete) are written once against
//! [`DirectoryCell`], so `&mut self` callers and reactive UIs share them.

use std::cell::RefCell;

use riskdesk_auth::palette::{role_color, status_color};
use riskdesk_auth::{User, UserPayload};
use riskdesk_client::{AdminApi, ClientError};
use riskdesk_core::{remove_by_id, DomainError, RecordId};

use crate::confirm::Confirm;
use crate::editor::{SubmitError, SubmitOutcome, UserEditor};

pub const LOADING_MESSAGE: &str = "Loading users...";
pub const EMPTY_MESSAGE: &str = "No users found";
pub const LOAD_FAILED: &str = "Failed to load users";
pub const DELETE_FAILED: &str = "Failed to delete user.";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this user?";

/// A coloured label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub color: &'static str,
}

/// One rendered user row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub id: RecordId,
    pub username: String,
    pub email: String,
    pub role: Badge,
    pub status: Badge,
    pub last_login: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: Badge {
                label: user.role_name().to_string(),
                color: role_color(user.role),
            },
            status: Badge {
                label: user.status.to_string(),
                color: status_color(user.status),
            },
            last_login: user.last_login_label(),
        }
    }
}

/// What the list area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryView {
    Loading,
    Empty,
    Table(Vec<UserRow>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The operator declined; nothing was sent.
    Cancelled,
    Deleted,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDirectory {
    users: Vec<User>,
    loading: bool,
    error: Option<String>,
    editor: Option<UserEditor>,
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl UserDirectory {
    /// A freshly mounted directory: loading until the first fetch lands.
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            loading: true,
            error: None,
            editor: None,
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn editor(&self) -> Option<&UserEditor> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut UserEditor> {
        self.editor.as_mut()
    }

    pub fn view(&self) -> DirectoryView {
        if self.loading {
            DirectoryView::Loading
        } else if self.users.is_empty() {
            DirectoryView::Empty
        } else {
            DirectoryView::Table(self.users.iter().map(UserRow::from).collect())
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    pub fn finish_load(&mut self, result: Result<Vec<User>, ClientError>) {
        self.loading = false;
        match result {
            Ok(users) => {
                tracing::debug!(count = users.len(), "users loaded");
                self.users = users;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "loading users failed");
                self.users.clear();
                self.error = Some(LOAD_FAILED.to_string());
            }
        }
    }

    pub fn open_create(&mut self) {
        self.editor = Some(UserEditor::create());
    }

    pub fn open_edit(&mut self, id: &RecordId) -> Result<(), DomainError> {
        let user = self
            .users
            .iter()
            .find(|u| &u.id == id)
            .ok_or_else(DomainError::not_found)?;
        self.editor = Some(UserEditor::edit(user));
        Ok(())
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    /// Start saving the open form.
    pub fn begin_submit(&mut self) -> Result<UserPayload, SubmitError> {
        match self.editor.as_mut() {
            Some(editor) => editor.begin_submit(),
            None => Err(SubmitError::Invalid("no form is open".to_string())),
        }
    }

    /// Record the save result; a successful save closes the form.
    pub fn finish_submit(&mut self, result: Result<(), ClientError>) -> SubmitOutcome {
        let Some(editor) = self.editor.as_mut() else {
            return SubmitOutcome::Closed;
        };
        let outcome = editor.finish_submit(result);
        if outcome == SubmitOutcome::Closed {
            self.editor = None;
        }
        outcome
    }

    /// Record the result of a confirmed delete.
    ///
    /// The row only leaves the list once the backend acknowledged it.
    pub fn finish_delete(&mut self, id: &RecordId, result: Result<(), ClientError>) -> DeleteOutcome {
        match result {
            Ok(()) => {
                remove_by_id(&mut self.users, id);
                DeleteOutcome::Deleted
            }
            Err(err) => {
                tracing::warn!(user_id = %id, error = %err, "deleting user failed");
                self.error = Some(DELETE_FAILED.to_string());
                DeleteOutcome::Failed
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Orchestration
    // ─────────────────────────────────────────────────────────────────────

    /// Fetch the full list, replacing local state.
    pub async fn refresh<A: AdminApi>(&mut self, api: &A) {
        reload(&RefCell::new(self), api).await
    }

    /// Save the open form, then refetch before reporting completion.
    pub async fn submit<A: AdminApi>(&mut self, api: &A) -> Result<SubmitOutcome, SubmitError> {
        submit_open_form(&RefCell::new(self), api).await
    }

    /// Delete after the operator confirms.
    pub async fn delete<A, C>(&mut self, api: &A, id: &RecordId, confirm: &C) -> DeleteOutcome
    where
        A: AdminApi,
        C: Confirm + ?Sized,
    {
        confirm_and_delete(&RefCell::new(self), api, id, confirm).await
    }
}

/// Shared handle to a [`UserDirectory`] for sequences that suspend.
///
/// Reactive UIs cannot lend `&mut` across a request; they implement this and
/// run the same sequences as the `async` methods above.
pub trait DirectoryCell {
    /// Apply `f`, or `None` once the directory has been torn down.
    fn with_mut<R>(&self, f: impl FnOnce(&mut UserDirectory) -> R) -> Option<R>;
}

impl DirectoryCell for RefCell<&mut UserDirectory> {
    fn with_mut<R>(&self, f: impl FnOnce(&mut UserDirectory) -> R) -> Option<R> {
        Some(f(&mut **self.borrow_mut()))
    }
}

pub async fn reload<D, A>(cell: &D, api: &A)
where
    D: DirectoryCell + ?Sized,
    A: AdminApi,
{
    cell.with_mut(UserDirectory::begin_load);
    let result = api.list_users().await;
    cell.with_mut(|d| d.finish_load(result));
}

/// Save the open form; on success the list is refetched before the form
/// closes.
pub async fn submit_open_form<D, A>(cell: &D, api: &A) -> Result<SubmitOutcome, SubmitError>
where
    D: DirectoryCell + ?Sized,
    A: AdminApi,
{
    let payload = cell
        .with_mut(UserDirectory::begin_submit)
        .unwrap_or_else(|| Err(SubmitError::Invalid("no form is open".to_string())))?;

    let result = save(api, &payload).await;
    if result.is_ok() {
        reload(cell, api).await;
    }
    Ok(cell
        .with_mut(|d| d.finish_submit(result))
        .unwrap_or(SubmitOutcome::Closed))
}

/// Ask, then delete. A directory torn down mid-request reports `Cancelled`.
pub async fn confirm_and_delete<D, A, C>(
    cell: &D,
    api: &A,
    id: &RecordId,
    confirm: &C,
) -> DeleteOutcome
where
    D: DirectoryCell + ?Sized,
    A: AdminApi,
    C: Confirm + ?Sized,
{
    if !confirm.confirm(DELETE_PROMPT) {
        return DeleteOutcome::Cancelled;
    }
    let result = api.delete_user(id).await;
    cell.with_mut(|d| d.finish_delete(id, result))
        .unwrap_or(DeleteOutcome::Cancelled)
}

/// Send a form payload to the matching endpoint.
pub async fn save<A: AdminApi>(api: &A, payload: &UserPayload) -> Result<(), ClientError> {
    match payload {
        UserPayload::Create(new_user) => api.create_user(new_user).await,
        UserPayload::Update { id, changes } => api.update_user(id, changes).await,
    }
}
