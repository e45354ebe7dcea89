use std::sync::Arc;

use axum::extract::FromRef;
use faultline_validate::Validator;

use crate::accounts::AccountStore;

/// Shared handler state
#[derive(Debug, Clone, FromRef)]
pub struct AppState {
    pub validator: Arc<Validator>,
    pub accounts: AccountStore,
}
