use crate::Client;

#[test]
fn given_trailing_slash_when_client_created_then_base_url_trimmed() {
    let client = Client::new("http://localhost:8000/", None, None);
    assert_eq!(client.base_url, "http://localhost:8000");
}

#[test]
fn given_no_trailing_slash_when_client_created_then_base_url_kept() {
    let client = Client::new("http://localhost:8000", None, None);
    assert_eq!(client.base_url, "http://localhost:8000");
}

#[test]
fn given_role_and_token_when_client_created_then_both_stored() {
    let client = Client::new("http://localhost:8000", Some("manager"), Some("abc"));
    assert_eq!(client.role, Some("manager".to_string()));
    assert_eq!(client.token, Some("abc".to_string()));
}

#[test]
fn given_no_identity_when_client_created_then_none_stored() {
    let client = Client::new("http://localhost:8000", None, None);
    assert!(client.role.is_none());
    assert!(client.token.is_none());
}
