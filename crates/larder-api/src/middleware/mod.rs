//! 中间件模块
//!
//! 提供认证与角色检查中间件

mod auth;
mod permission;

pub use auth::{ACCESS_TOKEN_COOKIE, auth_middleware, is_public_path};
pub use permission::require_role;
