//! Validation tests for user domain values.

use crate::user::domain::{EmailAddress, User, UserDomainError, UserProfile, Username};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[case("alice")]
#[case("  bob.smith+dm@example  ")]
#[case("carol_99-x")]
fn username_accepts_django_style_names(#[case] raw: &str) {
    let username = Username::new(raw).expect("username should be valid");
    assert_eq!(username.as_str(), raw.trim());
}

#[rstest]
#[case("", UserDomainError::EmptyUsername)]
#[case("   ", UserDomainError::EmptyUsername)]
#[case("with space", UserDomainError::InvalidUsername("with space".to_owned()))]
#[case("semi;colon", UserDomainError::InvalidUsername("semi;colon".to_owned()))]
fn username_rejects_invalid_values(#[case] raw: &str, #[case] expected: UserDomainError) {
    assert_eq!(Username::new(raw), Err(expected));
}

#[rstest]
fn username_rejects_overlong_values() {
    let raw = "a".repeat(151);
    assert!(matches!(
        Username::new(raw),
        Err(UserDomainError::UsernameTooLong(_))
    ));
}

#[rstest]
#[case("")]
#[case("no-at-sign")]
#[case("two@@example.com")]
#[case("@example.com")]
#[case("alice@")]
#[case("ali ce@example.com")]
fn email_rejects_malformed_addresses(#[case] raw: &str) {
    assert!(EmailAddress::new(raw).is_err());
}

#[rstest]
fn profile_requires_both_names() {
    let result = UserProfile::new("alice", "alice@example.com", "Alice", "  ");
    assert_eq!(result, Err(UserDomainError::EmptyName("last name")));
}

#[rstest]
#[case("x".repeat(151), "Smith", UserDomainError::NameTooLong("first name"))]
#[case("Alice".to_owned(), "é".repeat(151), UserDomainError::NameTooLong("last name"))]
fn profile_rejects_names_wider_than_their_column(
    #[case] first: String,
    #[case] last: String,
    #[case] expected: UserDomainError,
) {
    let result = UserProfile::new("alice", "alice@example.com", first, last);
    assert_eq!(result, Err(expected));
}

#[rstest]
fn profile_accepts_names_at_the_column_limit() {
    let profile = UserProfile::new("alice", "alice@example.com", "é".repeat(150), "Smith")
        .expect("150 characters should fit");
    let user = User::register(profile, &DefaultClock);
    assert_eq!(user.first_name().chars().count(), 150);
}

#[rstest]
fn registered_user_exposes_profile_fields() {
    let profile = UserProfile::new("alice", "Alice@Example.com", " Alice ", "Liddell")
        .expect("valid profile");
    let user = User::register(profile, &DefaultClock);

    assert_eq!(user.username().as_str(), "alice");
    assert_eq!(user.full_name(), "Alice Liddell");
    assert!(user.matches_search("example"));
    assert!(user.matches_search("LIDD"));
    assert!(!user.matches_search("bob"));
}
