use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use chatlift_persist::Repository;
use chatlift_types::Account;

use crate::{error::ApiResult, state::AppState};

#[derive(Debug, Serialize)]
pub struct ListAccountsResponse {
    pub accounts: Vec<Account>,
}

/// List the sender accounts created by imports, oldest first
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ListAccountsResponse>> {
    let accounts = state.persist.accounts().find_all().await?;
    Ok(Json(ListAccountsResponse { accounts }))
}
