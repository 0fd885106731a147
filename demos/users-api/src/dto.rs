//! REST DTOs. Path-bound fields carry `#[serde(default)]` so the
//! query/body pass tolerates their absence; the path pass fills them in.

use apikit::BindPath;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::User;

#[derive(Debug, Clone, Deserialize, Validate, BindPath)]
pub struct RegisterReq {
    #[validate(required, length(min = 3, max = 20))]
    pub username: Option<String>,
    #[validate(required, email)]
    pub email: Option<String>,
    #[validate(required, range(min = 18, max = 100))]
    pub age: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterResp {
    pub user_id: i64,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, Validate, BindPath)]
pub struct CreateUserReq {
    #[validate(required, email)]
    pub email: Option<String>,
    #[validate(required, length(min = 1, max = 256))]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, BindPath)]
pub struct GetUserReq {
    #[serde(default)]
    #[path_param("id")]
    pub id: u64,
}

#[derive(Debug, Clone, Deserialize, Validate, BindPath)]
pub struct UpdateUserReq {
    #[serde(default)]
    #[path_param("id")]
    pub id: u64,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 256))]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, BindPath)]
pub struct ListUsersQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub id: u64,
    pub email: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserListDto {
    pub users: Vec<UserDto>,
    pub total: usize,
    pub limit: u32,
    pub offset: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeletedDto {
    pub id: u64,
    pub deleted: bool,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            created_at: user.created_at,
        }
    }
}
