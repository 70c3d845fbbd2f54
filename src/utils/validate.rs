use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 分数必须落在 [0, 100]
pub fn validate_score(score: f64) -> Result<(), &'static str> {
    if !(0.0..=100.0).contains(&score) || score.is_nan() {
        return Err("Score must be between 0 and 100");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        assert!(validate_email("student@vocademy.example").is_ok());
        assert!(validate_email("a.b+c@sub.domain.org").is_ok());
    }

    #[test]
    fn test_invalid_email() {
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
    }

    #[test]
    fn test_score_range() {
        assert!(validate_score(0.0).is_ok());
        assert!(validate_score(100.0).is_ok());
        assert!(validate_score(87.5).is_ok());
        assert!(validate_score(-0.1).is_err());
        assert!(validate_score(100.1).is_err());
        assert!(validate_score(f64::NAN).is_err());
    }
}
