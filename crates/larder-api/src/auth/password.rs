//! 密码处理
//!
//! bcrypt 哈希，盐值内嵌在哈希串中

use std::sync::LazyLock;

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::error::Result;

/// 与真实密码同 cost 的占位哈希，首次使用时生成
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash("larder-placeholder-password", DEFAULT_COST).ok());

/// 对密码进行哈希处理
pub fn hash_password(password: &str) -> Result<String> {
    Ok(hash(password, DEFAULT_COST)?)
}

/// 验证明文密码与存储的哈希值是否匹配
///
/// 哈希串格式非法时返回错误，而不是 `false`
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    Ok(verify(password, hash)?)
}

/// 用户不存在时调用，执行一次与 `verify_password` 相同开销的校验，结果丢弃
pub fn verify_dummy_password(password: &str) {
    if let Some(dummy) = DUMMY_HASH.as_deref() {
        let _ = verify(password, dummy);
    }
}
