use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use std::env;

use super::token_hasher::hash_token;

pub const OTP_DIGITS: usize = 4;

#[derive(Debug, Clone)]
pub struct OtpConfig {
    pub ttl_seconds: i64,
    /// Wrong guesses allowed before the pending code is dropped.
    pub max_attempts: u16,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 600,
            max_attempts: 5,
        }
    }
}

impl OtpConfig {
    pub fn from_env() -> Self {
        let ttl_seconds = env::var("OTP_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(600);

        let max_attempts = env::var("OTP_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(5);

        Self {
            ttl_seconds,
            max_attempts,
        }
    }

    pub fn expires_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + Duration::seconds(self.ttl_seconds)
    }
}

/// A freshly generated numeric reset code.
#[derive(Debug, Clone)]
pub struct OneTimeCode {
    pub code: String,
    pub code_hash: String,
}

pub fn generate_otp() -> OneTimeCode {
    let value: u32 = rand::thread_rng().gen_range(0..10u32.pow(OTP_DIGITS as u32));
    let code = format!("{:0width$}", value, width = OTP_DIGITS);
    let code_hash = hash_token(&code);
    OneTimeCode { code, code_hash }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtpCheck {
    Valid,
    Missing,
    Mismatch,
    Expired,
}

/// Compare a submitted code against the stored hash and expiry.
pub fn check_otp(
    submitted: &str,
    stored_hash: Option<&str>,
    expires_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> OtpCheck {
    let (Some(stored_hash), Some(expires_at)) = (stored_hash, expires_at) else {
        return OtpCheck::Missing;
    };

    if hash_token(submitted.trim()) != stored_hash {
        return OtpCheck::Mismatch;
    }

    if now > expires_at {
        return OtpCheck::Expired;
    }

    OtpCheck::Valid
}

/// `jonathan@example.com` -> `j***than@example.com`
pub fn mask_email(email: &str) -> String {
    let Some((name, domain)) = email.split_once('@') else {
        return email.to_string();
    };

    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= 2 {
        return email.to_string();
    }

    let stars = "*".repeat(chars.len().saturating_sub(5));
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();

    format!("{}{}{}@{}", chars[0], stars, tail, domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_otp_is_four_digits() {
        for _ in 0..50 {
            let otp = generate_otp();
            assert_eq!(otp.code.len(), OTP_DIGITS);
            assert!(otp.code.chars().all(|c| c.is_ascii_digit()));
            assert_eq!(otp.code_hash, hash_token(&otp.code));
        }
    }

    #[test]
    fn test_check_otp_valid_before_expiry() {
        let now = Utc::now();
        let hash = hash_token("1234");
        let result = check_otp("1234", Some(&hash), Some(now + Duration::minutes(5)), now);
        assert_eq!(result, OtpCheck::Valid);
    }

    #[test]
    fn test_check_otp_trims_submitted_code() {
        let now = Utc::now();
        let hash = hash_token("1234");
        let result = check_otp(" 1234 ", Some(&hash), Some(now + Duration::minutes(5)), now);
        assert_eq!(result, OtpCheck::Valid);
    }

    #[test]
    fn test_check_otp_expired() {
        let now = Utc::now();
        let hash = hash_token("1234");
        let result = check_otp("1234", Some(&hash), Some(now - Duration::seconds(1)), now);
        assert_eq!(result, OtpCheck::Expired);
    }

    #[test]
    fn test_check_otp_mismatch_reported_before_expiry() {
        let now = Utc::now();
        let hash = hash_token("1234");
        let result = check_otp("9999", Some(&hash), Some(now - Duration::minutes(1)), now);
        assert_eq!(result, OtpCheck::Mismatch);
    }

    #[test]
    fn test_check_otp_missing() {
        let now = Utc::now();
        assert_eq!(check_otp("1234", None, None, now), OtpCheck::Missing);
        assert_eq!(
            check_otp("1234", Some("hash"), None, now),
            OtpCheck::Missing
        );
    }

    #[test]
    fn test_mask_email_long_name() {
        assert_eq!(mask_email("jonathan@example.com"), "j***than@example.com");
    }

    #[test]
    fn test_mask_email_short_name_unchanged() {
        assert_eq!(mask_email("jo@example.com"), "jo@example.com");
    }

    #[test]
    fn test_mask_email_medium_name_has_no_stars() {
        assert_eq!(mask_email("alice@example.com"), "alice@example.com");
        assert_eq!(mask_email("alicia@example.com"), "a*icia@example.com");
    }

    #[test]
    fn test_otp_config_expiry() {
        let now = Utc::now();
        let config = OtpConfig {
            ttl_seconds: 60,
            ..Default::default()
        };
        assert_eq!(config.expires_at(now), now + Duration::seconds(60));
    }
}
