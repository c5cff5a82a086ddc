//! Unit tests for user entities

use crate::domain::entities::user::{Identity, Role, User};

#[test]
fn test_identity_parsing() {
    assert_eq!("42".parse::<Identity>().unwrap(), Identity(42));
    assert!("abc".parse::<Identity>().is_err());
    assert_eq!(Identity(42).to_string(), "42");
}

#[test]
fn test_role_parsing() {
    assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
    assert_eq!("user".parse::<Role>().unwrap(), Role::User);
    assert!("root".parse::<Role>().is_err());
    assert!(Role::Admin.is_admin());
    assert!(!Role::default().is_admin());
}

#[test]
fn test_user_profile() {
    let user = User::new(Identity(3), "bob", "IIN9").with_role(Role::Admin);
    let profile = user.profile();
    assert_eq!(profile.username, "bob");
    assert_eq!(profile.external_id, "IIN9");
    assert!(profile.role.is_admin());
}
