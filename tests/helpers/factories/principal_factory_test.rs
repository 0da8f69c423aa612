use crate::engine::filter::AccessScope;
use crate::test_helpers::factories::PrincipalFactory;

#[test]
fn defaults_to_unrestricted_alice() {
    let principal = PrincipalFactory::new().create();

    assert_eq!(principal.user_name, "alice");
    assert_eq!(principal.user_groups, vec!["unicef".to_string()]);
    assert_eq!(principal.scope, AccessScope::All);
}

#[test]
fn overrides_apply() {
    let principal = PrincipalFactory::new()
        .with_user("bob")
        .with_groups(&[])
        .with_scope(AccessScope::Group)
        .create();

    assert_eq!(principal.user_name, "bob");
    assert!(principal.user_groups.is_empty());
    assert_eq!(principal.scope, AccessScope::Group);
}
