//! Business functions. The adapter owns binding and envelopes; these only
//! see the typed request and decide between data and `BizError`.

use std::sync::Arc;

use anyhow::anyhow;
use apikit::{BizError, RequestContext};

use crate::domain::{DomainError, Store};
use crate::dto::{
    CreateUserReq, DeletedDto, GetUserReq, ListUsersQuery, RegisterReq, RegisterResp,
    UpdateUserReq, UserDto, UserListDto,
};

pub async fn register(_ctx: RequestContext, req: RegisterReq) -> Result<RegisterResp, anyhow::Error> {
    let username = req.username.unwrap_or_default();
    Ok(RegisterResp {
        user_id: 12345,
        message: format!("user {username} registered"),
    })
}

pub async fn create_user(ctx: RequestContext, req: CreateUserReq) -> Result<UserDto, anyhow::Error> {
    let store = store(&ctx)?;
    let user = store
        .create(
            req.email.unwrap_or_default(),
            req.display_name.unwrap_or_default(),
        )
        .map_err(to_biz)?;
    tracing::info!(id = user.id, "user created");
    Ok(user.into())
}

pub async fn get_user(ctx: RequestContext, req: GetUserReq) -> Result<UserDto, anyhow::Error> {
    let store = store(&ctx)?;
    Ok(store.get(req.id).map_err(to_biz)?.into())
}

pub async fn update_user(ctx: RequestContext, req: UpdateUserReq) -> Result<UserDto, anyhow::Error> {
    let store = store(&ctx)?;
    let user = store
        .update(req.id, req.email, req.display_name)
        .map_err(to_biz)?;
    Ok(user.into())
}

pub async fn delete_user(ctx: RequestContext, req: GetUserReq) -> Result<DeletedDto, anyhow::Error> {
    let store = store(&ctx)?;
    let user = store.remove(req.id).map_err(to_biz)?;
    Ok(DeletedDto {
        id: user.id,
        deleted: true,
    })
}

pub async fn list_users(ctx: RequestContext, req: ListUsersQuery) -> Result<UserListDto, anyhow::Error> {
    let store = store(&ctx)?;
    let limit = req.limit.unwrap_or(50);
    let offset = req.offset.unwrap_or(0);
    let (users, total) = store.list(limit as usize, offset as usize);
    Ok(UserListDto {
        users: users.into_iter().map(UserDto::from).collect(),
        total,
        limit,
        offset,
    })
}

fn store(ctx: &RequestContext) -> Result<Arc<Store>, anyhow::Error> {
    // Missing extension is a wiring bug, so it surfaces as a plain 500.
    ctx.extension::<Arc<Store>>()
        .ok_or_else(|| anyhow!("user store not configured"))
}

fn to_biz(err: DomainError) -> anyhow::Error {
    let biz = match &err {
        DomainError::NotFound { .. } => BizError::not_found(40401, err.to_string()),
        DomainError::EmailTaken { .. } => BizError::conflict(40901, err.to_string()),
    };
    biz.into()
}
