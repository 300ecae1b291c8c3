//! 家庭食材与菜谱管理服务
//!
//! 提供角色、用户、存储类型、存储位置、存储提示、计量单位、步骤与菜谱的 REST API，
//! 以及基于双 Token（access + refresh）的 JWT 认证。
//!
//! ## 模块结构
//!
//! - `auth`: JWT 签发校验与密码哈希
//! - `dto`: 请求和响应的数据传输对象
//! - `models`: 数据库实体模型
//! - `repository`: 数据访问层（PostgreSQL）
//! - `service`: 业务逻辑层
//! - `handlers`: HTTP 请求处理器
//! - `middleware`: 认证与角色检查
//! - `routes`: 路由配置
//! - `state`: 应用状态
//!
//! ## 技术栈
//!
//! - Web 框架：Axum
//! - 数据库：sqlx (PostgreSQL)
//! - 数据验证：validator
//! - 序列化：serde (camelCase)

pub mod auth;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

pub use error::{ApiError, Result};
pub use state::AppState;
