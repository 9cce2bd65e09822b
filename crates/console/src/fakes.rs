//! In-memory collaborators for component tests.

use std::cell::RefCell;

use async_trait::async_trait;

use riskdesk_auth::{NewUser, Role, User, UserChanges, UserStatus};
use riskdesk_client::{AdminApi, ClientError, ReinsuranceApi};
use riskdesk_core::{PolicyId, RecordId};
use riskdesk_reinsurance::RiskAllocationRecord;

pub fn user(id: &str, username: &str) -> User {
    User {
        id: RecordId::parse(id).unwrap(),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        role: Role::Underwriter,
        unrecognized_role: None,
        status: UserStatus::Active,
        last_login_at: None,
    }
}

pub fn server_error() -> ClientError {
    ClientError::Api {
        status: 500,
        message: String::new(),
    }
}

/// Backend double that keeps users in memory and logs every call.
#[derive(Default)]
pub struct FakeAdminApi {
    pub users: RefCell<Vec<User>>,
    pub calls: RefCell<Vec<String>>,
    pub fail_list: RefCell<bool>,
    pub fail_save: RefCell<Option<ClientError>>,
    pub fail_delete: RefCell<bool>,
    pub sent_creates: RefCell<Vec<NewUser>>,
    pub sent_updates: RefCell<Vec<(RecordId, UserChanges)>>,
}

impl FakeAdminApi {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: RefCell::new(users),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn log(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }
}

#[async_trait(?Send)]
impl AdminApi for FakeAdminApi {
    async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        self.log("list");
        if *self.fail_list.borrow() {
            return Err(ClientError::Network("connection refused".to_string()));
        }
        Ok(self.users.borrow().clone())
    }

    async fn create_user(&self, new_user: &NewUser) -> Result<(), ClientError> {
        self.log(format!("create {}", new_user.username));
        if let Some(err) = self.fail_save.borrow().clone() {
            return Err(err);
        }
        self.sent_creates.borrow_mut().push(new_user.clone());
        let id = format!("u{}", self.users.borrow().len() + 100);
        let mut created = user(&id, &new_user.username);
        created.email = new_user.email.clone();
        created.role = new_user.role;
        created.status = new_user.status;
        self.users.borrow_mut().push(created);
        Ok(())
    }

    async fn update_user(&self, id: &RecordId, changes: &UserChanges) -> Result<(), ClientError> {
        self.log(format!("update {id}"));
        if let Some(err) = self.fail_save.borrow().clone() {
            return Err(err);
        }
        self.sent_updates.borrow_mut().push((id.clone(), changes.clone()));
        let mut users = self.users.borrow_mut();
        let existing = users
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or(ClientError::Api {
                status: 404,
                message: "User not found".to_string(),
            })?;
        existing.email = changes.email.clone();
        existing.role = changes.role;
        existing.status = changes.status;
        Ok(())
    }

    async fn delete_user(&self, id: &RecordId) -> Result<(), ClientError> {
        self.log(format!("delete {id}"));
        if *self.fail_delete.borrow() {
            return Err(server_error());
        }
        self.users.borrow_mut().retain(|u| &u.id != id);
        Ok(())
    }
}

/// Allocation backend double returning canned records.
#[derive(Default)]
pub struct FakeReinsuranceApi {
    pub records: RefCell<Vec<RiskAllocationRecord>>,
    pub fail: RefCell<bool>,
    pub requested: RefCell<Vec<PolicyId>>,
}

impl FakeReinsuranceApi {
    pub fn with_records(records: Vec<RiskAllocationRecord>) -> Self {
        Self {
            records: RefCell::new(records),
            ..Self::default()
        }
    }
}

#[async_trait(?Send)]
impl ReinsuranceApi for FakeReinsuranceApi {
    async fn risk_allocations(
        &self,
        policy_id: &PolicyId,
    ) -> Result<Vec<RiskAllocationRecord>, ClientError> {
        self.requested.borrow_mut().push(policy_id.clone());
        if *self.fail.borrow() {
            return Err(server_error());
        }
        Ok(self.records.borrow().clone())
    }
}
