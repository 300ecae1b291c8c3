//! JWT Token 处理
//!
//! access token 与 refresh token 各由一个 `JwtManager` 负责，
//! 两者使用不同的密钥与有效期，载荷中的 `kind` 字段再做一次区分。

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};
use larder_shared::config::AuthConfig;

/// Token 类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT 配置
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// 签名密钥
    pub secret: String,
    /// Token 过期时间（秒）
    pub expires_in_secs: i64,
    /// Token 签发者
    pub issuer: String,
    pub kind: TokenKind,
}

impl JwtConfig {
    /// access token 配置
    pub fn access(auth: &AuthConfig) -> Self {
        Self {
            secret: auth.access_token_secret.clone(),
            expires_in_secs: auth.access_token_expires_secs,
            issuer: auth.issuer.clone(),
            kind: TokenKind::Access,
        }
    }

    /// refresh token 配置
    pub fn refresh(auth: &AuthConfig) -> Self {
        Self {
            secret: auth.refresh_token_secret.clone(),
            expires_in_secs: auth.refresh_token_expires_secs,
            issuer: auth.issuer.clone(),
            kind: TokenKind::Refresh,
        }
    }
}

/// JWT Claims（Token 载荷）
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// 用户 ID
    pub sub: String,
    /// 用户名
    pub name: String,
    /// 角色名列表
    pub roles: Vec<String>,
    pub kind: TokenKind,
    /// 签发时间
    pub iat: i64,
    /// 过期时间
    pub exp: i64,
    /// 签发者
    pub iss: String,
}

impl Claims {
    /// 解析用户 ID
    pub fn user_id(&self) -> Result<i64> {
        self.sub
            .parse()
            .map_err(|_| ApiError::Unauthorized("Token 中的用户 ID 无效".to_string()))
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// 已签发的 Token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    /// 过期时间（Unix 秒）
    pub expires_at: i64,
}

/// JWT 管理器
#[derive(Clone)]
pub struct JwtManager {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    /// 创建 JWT 管理器
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// 生成 JWT Token
    pub fn generate_token(
        &self,
        user_id: i64,
        name: &str,
        roles: Vec<String>,
    ) -> Result<IssuedToken> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.config.expires_in_secs);

        let claims = Claims {
            sub: user_id.to_string(),
            name: name.to_string(),
            roles,
            kind: self.config.kind,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: self.config.issuer.clone(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ApiError::Internal(format!("JWT 生成失败: {}", e)))?;

        Ok(IssuedToken {
            token,
            expires_at: exp.timestamp(),
        })
    }

    /// 验证并解析 JWT Token
    ///
    /// 签名、签发者、过期时间和 Token 类型都必须匹配
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)?.claims;

        if claims.kind != self.config.kind {
            return Err(ApiError::Unauthorized("Token 类型不匹配".to_string()));
        }

        Ok(claims)
    }

    /// 用已有载荷重新签发本类型的 Token
    pub fn reissue(&self, claims: &Claims) -> Result<IssuedToken> {
        self.generate_token(claims.user_id()?, &claims.name, claims.roles.clone())
    }

    /// 获取 Token 过期时间（秒）
    pub fn expires_in_secs(&self) -> i64 {
        self.config.expires_in_secs
    }

    pub fn kind(&self) -> TokenKind {
        self.config.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn managers() -> (JwtManager, JwtManager) {
        let auth = AuthConfig::default();
        (
            JwtManager::new(JwtConfig::access(&auth)),
            JwtManager::new(JwtConfig::refresh(&auth)),
        )
    }

    #[test]
    fn test_generate_and_verify_token() {
        let (access, _) = managers();

        let issued = access
            .generate_token(1, "alice", vec!["admin".to_string()])
            .unwrap();

        let claims = access.verify_token(&issued.token).unwrap();
        assert_eq!(claims.sub, "1");
        assert_eq!(claims.user_id().unwrap(), 1);
        assert_eq!(claims.name, "alice");
        assert_eq!(claims.roles, vec!["admin"]);
        assert_eq!(claims.kind, TokenKind::Access);
        assert_eq!(claims.iss, "larder-api");
        assert_eq!(claims.exp, issued.expires_at);
        assert_eq!(claims.exp - claims.iat, access.expires_in_secs());
    }

    #[test]
    fn test_invalid_token() {
        let (access, _) = managers();
        let err = access.verify_token("invalid.token.here").unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let manager = JwtManager::new(JwtConfig {
            expires_in_secs: -3600,
            ..JwtConfig::access(&AuthConfig::default())
        });

        let issued = manager.generate_token(1, "alice", vec![]).unwrap();
        let err = manager.verify_token(&issued.token).unwrap_err();
        assert!(err.to_string().contains("过期"));
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let (access, refresh) = managers();

        let refresh_token = refresh.generate_token(1, "alice", vec![]).unwrap();
        assert!(access.verify_token(&refresh_token.token).is_err());
        assert!(refresh.verify_token(&refresh_token.token).is_ok());

        let access_token = access.generate_token(1, "alice", vec![]).unwrap();
        assert!(refresh.verify_token(&access_token.token).is_err());
    }

    #[test]
    fn test_kind_checked_even_with_shared_secret() {
        let auth = AuthConfig {
            refresh_token_secret: AuthConfig::default().access_token_secret,
            ..Default::default()
        };
        let access = JwtManager::new(JwtConfig::access(&auth));
        let refresh = JwtManager::new(JwtConfig::refresh(&auth));

        let refresh_token = refresh.generate_token(1, "alice", vec![]).unwrap();
        let err = access.verify_token(&refresh_token.token).unwrap_err();
        assert!(err.to_string().contains("类型"));
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let auth = AuthConfig::default();
        let other = JwtManager::new(JwtConfig {
            issuer: "someone-else".to_string(),
            ..JwtConfig::access(&auth)
        });
        let access = JwtManager::new(JwtConfig::access(&auth));

        let issued = other.generate_token(1, "alice", vec![]).unwrap();
        assert!(access.verify_token(&issued.token).is_err());
    }

    #[test]
    fn test_reissue_keeps_payload() {
        let (access, refresh) = managers();

        let refresh_token = refresh
            .generate_token(7, "bob", vec!["user".to_string()])
            .unwrap();
        let claims = refresh.verify_token(&refresh_token.token).unwrap();

        let new_access = access.reissue(&claims).unwrap();
        let access_claims = access.verify_token(&new_access.token).unwrap();
        assert_eq!(access_claims.sub, "7");
        assert_eq!(access_claims.name, "bob");
        assert_eq!(access_claims.roles, vec!["user"]);
        assert_eq!(access_claims.kind, TokenKind::Access);
    }
}
