use super::*;

// =============================================================================
// detail
// =============================================================================

#[test]
fn detail_reads_backend_detail_field() {
    let err = ApiError::Status { status: 400, body: r#"{"detail":"account and positive points required"}"#.into() };
    assert_eq!(err.detail().as_deref(), Some("account and positive points required"));
}

#[test]
fn detail_flattens_field_errors() {
    let err = ApiError::Status { status: 400, body: r#"{"name":["This field is required."]}"#.into() };
    assert_eq!(err.detail().as_deref(), Some("name: This field is required."));
}

#[test]
fn detail_is_none_for_non_json_body() {
    let err = ApiError::Status { status: 502, body: "<html>Bad Gateway</html>".into() };
    assert_eq!(err.detail(), None);
}

#[test]
fn detail_reads_unauthorized_body() {
    let err = ApiError::Unauthorized { body: r#"{"detail":"Given token not valid for any token type"}"#.into() };
    assert_eq!(err.detail().as_deref(), Some("Given token not valid for any token type"));
}

#[test]
fn detail_is_none_for_transport_errors() {
    assert_eq!(ApiError::Transport("connection refused".into()).detail(), None);
}

// =============================================================================
// classification
// =============================================================================

#[test]
fn retryable_covers_transport_and_server_errors() {
    assert!(ApiError::Transport("timeout".into()).retryable());
    assert!(ApiError::Status { status: 503, body: String::new() }.retryable());
    assert!(ApiError::Status { status: 429, body: String::new() }.retryable());
    assert!(!ApiError::Status { status: 404, body: String::new() }.retryable());
    assert!(!ApiError::Unauthorized { body: String::new() }.retryable());
}

#[test]
fn auth_failures_are_flagged() {
    assert!(ApiError::Unauthorized { body: String::new() }.is_auth_failure());
    assert!(ApiError::SessionExpired("refresh rejected".into()).is_auth_failure());
    assert!(!ApiError::Status { status: 403, body: String::new() }.is_auth_failure());
}

#[test]
fn status_reports_http_code() {
    assert_eq!(ApiError::Unauthorized { body: String::new() }.status(), Some(401));
    assert_eq!(ApiError::Status { status: 409, body: String::new() }.status(), Some(409));
    assert_eq!(ApiError::Decode("eof".into()).status(), None);
}

#[test]
fn error_codes_are_stable() {
    assert_eq!(ApiError::SessionExpired(String::new()).error_code(), "E_SESSION_EXPIRED");
    assert_eq!(ApiError::Transport(String::new()).error_code(), "E_TRANSPORT");
}
