//! Group handlers: view, create, join, pass the coin, kick, disband.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use coinhub_core::error::AppError;
use coinhub_core::result::AppResult;
use coinhub_entity::{Group, GroupDetails};

use crate::dto::response::{ApiResponse, CoinPassedResponse, GroupCreatedResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, GroupRef};
use crate::state::AppState;

/// Load the group named by the `ID` header or fail with 404.
async fn target_group(state: &AppState, group: &GroupRef) -> AppResult<Group> {
    let id: Uuid = group.id()?;
    state
        .groups
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Group not found"))
}

/// Fail with 403 unless `username` created `group`.
fn require_creator(group: &Group, username: &str) -> AppResult<()> {
    if group.creator != username {
        return Err(AppError::authorization("Only the group creator may do this"));
    }
    Ok(())
}

/// GET /api/group/{user}
pub async fn get_group(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(user): Path<String>,
) -> Result<Json<ApiResponse<GroupDetails>>, ApiError> {
    state.validator.validate_username(&user)?;

    let details = state
        .groups
        .find_for_member(&user)
        .await?
        .ok_or_else(|| AppError::not_found("User is not in a group"))?;

    Ok(Json(ApiResponse::ok(details)))
}

/// POST /api/group/create
pub async fn create_group(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<(StatusCode, Json<ApiResponse<GroupCreatedResponse>>), ApiError> {
    let id = state
        .groups
        .create(&auth.username)
        .await?
        .ok_or_else(|| AppError::authorization("User already created a group"))?;

    tracing::info!(group_id = %id, creator = %auth.username, "Group created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(GroupCreatedResponse { id })),
    ))
}

/// POST /api/group/join
pub async fn join_group(
    State(state): State<AppState>,
    group_ref: GroupRef,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let group = target_group(&state, &group_ref).await?;

    if !state.groups.add_member(group.id, &auth.username).await? {
        return Err(AppError::validation("Already a member of this group").into());
    }

    tracing::info!(group_id = %group.id, username = %auth.username, "Member joined");
    Ok(Json(ApiResponse::ok(MessageResponse::new("Joined group"))))
}

/// POST /api/group/coin
pub async fn pass_coin(
    State(state): State<AppState>,
    group_ref: GroupRef,
    auth: AuthUser,
) -> Result<(StatusCode, Json<ApiResponse<CoinPassedResponse>>), ApiError> {
    let group = target_group(&state, &group_ref).await?;

    let coin_holder = state
        .groups
        .pass_coin(group.id, &auth.username)
        .await?
        .ok_or_else(|| AppError::authorization("Only the coin holder may pass the coin"))?;

    tracing::info!(
        group_id = %group.id,
        from = %auth.username,
        to = %coin_holder,
        "Coin passed"
    );
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(CoinPassedResponse { coin_holder })),
    ))
}

/// DELETE /api/group/kick/{user}
///
/// Checks, after the `ID` header and the session: kicked user exists,
/// group exists, user is a member (404 each), caller created the group
/// (403), caller is not kicking themselves (400).
pub async fn kick_member(
    State(state): State<AppState>,
    group_ref: GroupRef,
    auth: AuthUser,
    Path(user): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.validator.validate_username(&user)?;
    if !state.users.exists(&user).await? {
        return Err(AppError::not_found("User not found").into());
    }

    let group = target_group(&state, &group_ref).await?;
    if !state.groups.is_member(group.id, &user).await? {
        return Err(AppError::not_found("User is not in this group").into());
    }
    require_creator(&group, &auth.username)?;

    if user == auth.username {
        return Err(AppError::validation("The creator cannot kick themselves").into());
    }

    if !state.groups.remove_member(group.id, &user).await? {
        return Err(AppError::not_found("User is not in this group").into());
    }

    tracing::info!(group_id = %group.id, username = %user, "Member kicked");
    Ok(Json(ApiResponse::ok(MessageResponse::new("Member kicked"))))
}

/// DELETE /api/group/disband
pub async fn disband_group(
    State(state): State<AppState>,
    group_ref: GroupRef,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let group = target_group(&state, &group_ref).await?;
    require_creator(&group, &auth.username)?;

    state.groups.delete(group.id).await?;

    tracing::info!(group_id = %group.id, creator = %auth.username, "Group disbanded");
    Ok(Json(ApiResponse::ok(MessageResponse::new("Group disbanded"))))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use coinhub_core::error::ErrorKind;

    use super::*;

    fn group(creator: &str) -> Group {
        Group {
            id: Uuid::new_v4(),
            coin: 1,
            creator: creator.to_string(),
            coin_holder: creator.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_require_creator() {
        let group = group("alice");
        assert!(require_creator(&group, "alice").is_ok());
        assert_eq!(
            require_creator(&group, "bob").unwrap_err().kind,
            ErrorKind::Authorization
        );
    }
}
