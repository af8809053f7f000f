use super::*;

#[test]
fn email_requires_local_and_domain() {
    assert!(email("a@b.com").is_ok());
    assert!(email("a@").is_err());
    assert!(email("@b.com").is_err());
    assert!(email("plain").is_err());
    assert!(email("").is_err());
}

#[test]
fn password_enforces_minimum_length() {
    assert!(password("abcdef").is_ok());
    assert!(matches!(password("abcde"), Err(AuthError::Validation(_))));
    assert!(password("").is_err());
}

#[test]
fn password_pair_reports_mismatch_before_length() {
    let err = password_pair("abc", "abd").expect_err("mismatch");
    let AuthError::Validation(message) = err else {
        panic!("expected validation error");
    };
    assert!(message.contains("no coinciden"));
}

#[test]
fn password_pair_checks_length_when_matching() {
    assert!(password_pair("abc", "abc").is_err());
    assert!(password_pair("abcdef", "abcdef").is_ok());
}

#[test]
fn username_rejects_blank() {
    assert!(username("rex").is_ok());
    assert!(username("   ").is_err());
    assert!(username("").is_err());
}
