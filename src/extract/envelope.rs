use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Error body both services return for a rejected key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(rename = "statusCode")]
    pub status_code: i64,
    pub error: String,
    pub message: String,
}

impl ErrorEnvelope {
    pub fn forbidden() -> Self {
        Self {
            status_code: 403,
            error: "Forbidden".to_string(),
            message: "Invalid api key".to_string(),
        }
    }
}

/// Compare a body against the forbidden envelope, field by field.
/// The first mismatch (a missing field counts) is returned as the error.
pub fn check_forbidden(body: &Value) -> Result<(), String> {
    let expected = ErrorEnvelope::forbidden();
    let checks = [
        ("statusCode", json!(expected.status_code)),
        ("error", json!(expected.error)),
        ("message", json!(expected.message)),
    ];

    for (field, want) in checks {
        match body.get(field) {
            Some(got) if same_value(got, &want) => {}
            Some(got) => return Err(format!("Expected {} {}, got {}", field, want, got)),
            None => return Err(format!("Expected {} {}, got nothing", field, want)),
        }
    }
    Ok(())
}

/// Numbers compare by value, so `403` and `403.0` are the same status
fn same_value(got: &Value, want: &Value) -> bool {
    match (got.as_f64(), want.as_f64()) {
        (Some(got), Some(want)) => got == want,
        _ => got == want,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_envelope_passes() {
        let body = json!({"statusCode": 403, "error": "Forbidden", "message": "Invalid api key"});
        assert_eq!(check_forbidden(&body), Ok(()));
        assert_eq!(serde_json::from_value::<ErrorEnvelope>(body).unwrap(), ErrorEnvelope::forbidden());
    }

    #[test]
    fn test_first_mismatch_is_reported() {
        let body = json!({"statusCode": 401, "error": "Unauthorized", "message": "Invalid api key"});
        assert_eq!(check_forbidden(&body).unwrap_err(), "Expected statusCode 403, got 401");

        let body = json!({"statusCode": 403, "error": "Forbidden", "message": "Key expired"});
        assert_eq!(
            check_forbidden(&body).unwrap_err(),
            "Expected message \"Invalid api key\", got \"Key expired\""
        );
    }

    #[test]
    fn test_float_status_code_matches() {
        let body = json!({"statusCode": 403.0, "error": "Forbidden", "message": "Invalid api key"});
        assert_eq!(check_forbidden(&body), Ok(()));

        let body = json!({"statusCode": 403.5, "error": "Forbidden", "message": "Invalid api key"});
        assert!(check_forbidden(&body).is_err());

        let body = json!({"statusCode": "403", "error": "Forbidden", "message": "Invalid api key"});
        assert!(check_forbidden(&body).is_err());
    }

    #[test]
    fn test_missing_field_is_mismatch() {
        let body = json!({"statusCode": 403, "message": "Invalid api key"});
        assert_eq!(check_forbidden(&body).unwrap_err(), "Expected error \"Forbidden\", got nothing");
        assert!(check_forbidden(&json!({"response": {}})).is_err());
    }
}
