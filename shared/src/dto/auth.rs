use serde::{Deserialize, Serialize};

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Forgot-password and resend-code requests only carry the account email.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailRequest {
    pub email: String,
}

/// One-time-code verification request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub email: String,
    /// Sent as a number, the way the verification form submits it.
    pub one_time_code: u32,
}

/// Password change request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Payload of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    #[serde(alias = "access_token", alias = "token")]
    pub access_token: String,
    #[serde(default, alias = "refresh_token", skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_otp_wire_format() {
        let request = VerifyOtpRequest {
            email: "admin@sparkle.com".to_string(),
            one_time_code: 482193,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({ "email": "admin@sparkle.com", "oneTimeCode": 482193 })
        );
    }

    #[test]
    fn test_login_data_accepts_token_spellings() {
        let camel: LoginData = serde_json::from_str(r#"{"accessToken":"abc"}"#).unwrap();
        let snake: LoginData = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(camel, snake);
        assert!(camel.refresh_token.is_none());
    }
}
