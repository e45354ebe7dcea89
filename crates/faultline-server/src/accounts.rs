use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use faultline_core::Error;
use faultline_http::{Failure, ValidJson};
use faultline_validate::{FieldNames, Rules};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;
use validator::Validate;

use crate::state::AppState;

/// Sign-up payload
#[derive(Debug, Deserialize, Validate)]
#[validate(context = Rules)]
pub struct SignUp {
    #[validate(custom(function = "faultline_validate::email", use_context))]
    pub email: String,
    #[serde(rename = "phone_number")]
    #[validate(custom(function = "faultline_validate::telephone", use_context))]
    pub phone: String,
    #[validate(custom(function = "faultline_validate::password", use_context))]
    pub password: String,
    #[serde(rename = "name")]
    #[validate(length(min = 2, max = 64))]
    pub display_name: String,
}

impl FieldNames for SignUp {
    const SERIALIZED_NAMES: &'static [(&'static str, &'static str)] =
        &[("phone", "phone_number"), ("display_name", "name")];
}

/// Registered account as returned to clients
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub phone_number: String,
    pub name: String,
}

/// In-memory account registry keyed by id
#[derive(Debug, Clone, Default)]
pub struct AccountStore {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl AccountStore {
    /// Register a new account; emails are unique
    pub async fn insert(&self, signup: SignUp) -> Result<Account, Error> {
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|a| a.email == signup.email) {
            return Err(Error::resource_conflict("account already exists").with(["what", signup.email.as_str()]));
        }

        let account = Account {
            id: Uuid::new_v4(),
            email: signup.email,
            phone_number: signup.phone,
            name: signup.display_name,
        };
        accounts.insert(account.id, account.clone());

        tracing::info!(account_id = %account.id, "account registered");
        Ok(account)
    }

    pub async fn get(&self, id: Uuid) -> Option<Account> {
        self.accounts.read().await.get(&id).cloned()
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/accounts", post(create_account))
        .route("/accounts/{id}", get(get_account))
}

async fn create_account(
    State(store): State<AccountStore>,
    ValidJson(signup): ValidJson<SignUp>,
) -> Result<(StatusCode, Json<Account>), Failure> {
    let account = store.insert(signup).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

async fn get_account(
    State(store): State<AccountStore>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Account>, Failure> {
    let Path(id) = id?;

    store
        .get(id)
        .await
        .map(Json)
        .ok_or_else(|| Error::not_found(format!("account {id} not found")).into())
}

#[cfg(test)]
mod tests {
    use faultline_core::Kind;

    use super::*;

    fn signup(email: &str) -> SignUp {
        SignUp {
            email: email.to_string(),
            phone: "+4915112345678".to_string(),
            password: "Sup3r$ecret".to_string(),
            display_name: "Jane".to_string(),
        }
    }

    #[test]
    fn violations_use_wire_names() {
        let validator = faultline_validate::Validator::default();
        let input = SignUp {
            phone: "555".to_string(),
            display_name: "J".to_string(),
            ..signup("jane@example.com")
        };

        let error = validator.check(&input).unwrap_err();
        let fields = error.fields().unwrap();
        assert_eq!(fields.keys().map(String::as_str).collect::<Vec<_>>(), ["name", "phone_number"]);
        assert_eq!(fields["name"], "name must be between 2 and 64 characters in length");
    }

    #[tokio::test]
    async fn insert_then_get() {
        let store = AccountStore::default();
        let account = store.insert(signup("jane@example.com")).await.unwrap();

        let found = store.get(account.id).await.unwrap();
        assert_eq!(found.email, "jane@example.com");
        assert_eq!(found.name, "Jane");
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let store = AccountStore::default();
        store.insert(signup("jane@example.com")).await.unwrap();

        let error = store.insert(signup("jane@example.com")).await.unwrap_err();
        assert_eq!(error.kind(), Kind::ResourceConflict);
        assert_eq!(error.message(), "account already exists, jane@example.com");
    }

    #[tokio::test]
    async fn unknown_id_is_absent() {
        let store = AccountStore::default();
        assert!(store.get(Uuid::new_v4()).await.is_none());
    }
}
