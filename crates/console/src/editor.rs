//! The create/edit user form.
//!
//! One form serves both modes. In edit mode the username is locked and the
//! password field does not exist: whatever is typed into it never reaches
//! the payload.

use core::fmt;

use thiserror::Error;

use riskdesk_auth::{NewUser, Role, User, UserChanges, UserPayload, UserStatus};
use riskdesk_client::ClientError;
use riskdesk_core::{DomainError, RecordId};

/// Shown when a save fails without a server-provided message.
pub const SAVE_FAILED: &str = "Failed to save user";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit { id: RecordId },
}

/// Form fields addressable by name, as the inputs are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Username,
    Email,
    Password,
    Role,
    Status,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Email => "email",
            Field::Password => "password",
            Field::Role => "role",
            Field::Status => "status",
        }
    }
}

/// Current field values.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct UserForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub status: UserStatus,
}

impl fmt::Debug for UserForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .field("status", &self.status)
            .finish()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("a save is already in progress")]
    AlreadySaving,
    #[error("{0}")]
    Invalid(String),
}

/// What happened to the form after a save attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Closed,
    KeptOpen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEditor {
    mode: EditorMode,
    form: UserForm,
    saving: bool,
    error: Option<String>,
}

impl UserEditor {
    pub fn create() -> Self {
        Self {
            mode: EditorMode::Create,
            form: UserForm::default(),
            saving: false,
            error: None,
        }
    }

    pub fn edit(user: &User) -> Self {
        Self {
            mode: EditorMode::Edit {
                id: user.id.clone(),
            },
            form: UserForm {
                username: user.username.clone(),
                email: user.email.clone(),
                password: String::new(),
                role: user.role,
                status: user.status,
            },
            saving: false,
            error: None,
        }
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn form(&self) -> &UserForm {
        &self.form
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, EditorMode::Edit { .. })
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing() { "Edit User" } else { "Create User" }
    }

    pub fn username_locked(&self) -> bool {
        self.is_editing()
    }

    pub fn shows_password_field(&self) -> bool {
        !self.is_editing()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn submit_label(&self) -> &'static str {
        if self.saving { "Saving..." } else { "Save" }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Apply an input change. Any edit clears the inline error.
    ///
    /// Writes to the locked username or the absent password field are
    /// ignored in edit mode.
    pub fn set_field(&mut self, field: Field, value: &str) -> Result<(), DomainError> {
        match field {
            Field::Username if self.username_locked() => {}
            Field::Username => self.form.username = value.to_string(),
            Field::Email => self.form.email = value.to_string(),
            Field::Password if !self.shows_password_field() => {}
            Field::Password => self.form.password = value.to_string(),
            Field::Role => self.form.role = value.parse()?,
            Field::Status => self.form.status = value.parse()?,
        }
        self.error = None;
        Ok(())
    }

    /// Payload for the current field values.
    pub fn payload(&self) -> UserPayload {
        match &self.mode {
            EditorMode::Create => UserPayload::Create(NewUser {
                username: self.form.username.clone(),
                email: self.form.email.clone(),
                password: self.form.password.clone(),
                role: self.form.role,
                status: self.form.status,
            }),
            EditorMode::Edit { id } => UserPayload::Update {
                id: id.clone(),
                changes: UserChanges {
                    email: self.form.email.clone(),
                    role: self.form.role,
                    status: self.form.status,
                },
            },
        }
    }

    /// Validate and lock the form for a save.
    ///
    /// Rejected while a previous save is in flight. A validation failure is
    /// shown inline and nothing is returned to send.
    pub fn begin_submit(&mut self) -> Result<UserPayload, SubmitError> {
        if self.saving {
            return Err(SubmitError::AlreadySaving);
        }

        let payload = self.payload();
        if let Err(err) = payload.validate() {
            let message = err.user_message();
            self.error = Some(message.clone());
            return Err(SubmitError::Invalid(message));
        }

        self.saving = true;
        self.error = None;
        Ok(payload)
    }

    /// Record the result of the save started by [`Self::begin_submit`].
    pub fn finish_submit(&mut self, result: Result<(), ClientError>) -> SubmitOutcome {
        self.saving = false;
        match result {
            Ok(()) => SubmitOutcome::Closed,
            Err(err) => {
                tracing::warn!(error = %err, "saving user failed");
                self.error = Some(
                    err.server_message()
                        .map(str::to_string)
                        .unwrap_or_else(|| SAVE_FAILED.to_string()),
                );
                SubmitOutcome::KeptOpen
            }
        }
    }
}
