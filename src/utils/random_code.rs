use rand::Rng;

const TOKEN_CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnpqrstuvwxyz23456789";

/// 生成邀请 token
///
/// 字符集剔除了易混淆的 0/O/1/l/I。32 位长度下碰撞概率可以忽略，
/// 数据库的唯一约束兜底。
pub fn generate_invitation_token() -> String {
    random_code(32)
}

pub fn random_code(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| {
            let idx = rng.random_range(0..TOKEN_CHARSET.len());
            TOKEN_CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_length_and_charset() {
        let token = generate_invitation_token();
        assert_eq!(token.len(), 32);
        assert!(token.bytes().all(|b| TOKEN_CHARSET.contains(&b)));
    }

    #[test]
    fn test_tokens_differ() {
        assert_ne!(generate_invitation_token(), generate_invitation_token());
    }
}
