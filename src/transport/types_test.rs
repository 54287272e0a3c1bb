use super::*;

#[test]
fn service_message_only_from_status_errors() {
    let err = TransportError::Status { status: 500, message: Some("model overloaded".into()) };
    assert_eq!(err.service_message(), Some("model overloaded"));

    let err = TransportError::Status { status: 502, message: None };
    assert_eq!(err.service_message(), None);

    assert_eq!(TransportError::Request("refused".into()).service_message(), None);
    assert_eq!(TransportError::Parse("no reply".into()).service_message(), None);
}

#[test]
fn error_codes_are_distinct() {
    let codes = [
        TransportError::Request(String::new()).error_code(),
        TransportError::Status { status: 400, message: None }.error_code(),
        TransportError::Parse(String::new()).error_code(),
        TransportError::HttpClientBuild(String::new()).error_code(),
    ];
    for (i, a) in codes.iter().enumerate() {
        for b in &codes[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn display_includes_status() {
    let err = TransportError::Status { status: 503, message: None };
    assert_eq!(err.to_string(), "service responded with status 503");
}

#[test]
fn request_body_shape() {
    let body = serde_json::to_value(ChatRequest { message: "hello" }).unwrap();
    assert_eq!(body, serde_json::json!({ "message": "hello" }));
}

#[test]
fn reply_body_tolerates_missing_field() {
    let parsed: ChatReply = serde_json::from_str("{}").unwrap();
    assert!(parsed.reply.is_none());
}
