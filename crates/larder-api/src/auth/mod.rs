//! 认证模块
//!
//! 提供 access / refresh 双 Token 的签发、验证以及密码哈希

mod jwt;
mod password;

pub use jwt::{Claims, IssuedToken, JwtConfig, JwtManager, TokenKind};
pub use password::{hash_password, verify_dummy_password, verify_password};
