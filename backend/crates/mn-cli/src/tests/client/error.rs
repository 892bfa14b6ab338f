use crate::ClientError;

#[test]
fn given_api_error_when_summarized_then_code_and_message_without_location() {
    let error = ClientError::api_error("NOT_RUNNING", "user service is not running");

    assert_eq!(error.summary(), "NOT_RUNNING: user service is not running");
    assert!(error.to_string().contains("(code: NOT_RUNNING)"));
}

#[test]
fn given_passthrough_status_when_summarized_then_status_and_body() {
    let error = ClientError::status(404, r#"{"detail":"User not found"}"#);

    assert_eq!(error.summary(), r#"HTTP 404: {"detail":"User not found"}"#);
}
