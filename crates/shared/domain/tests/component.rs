use moitt_domain::component::{Component, Operation};
use moitt_domain::users::TestUser;
use std::str::FromStr;
use strum::IntoEnumIterator;

#[test]
fn components_use_cli_spelling() {
    let names: Vec<String> = Component::iter().map(|c| c.to_string()).collect();
    assert_eq!(names, ["ocp", "registry-puller", "istio"]);
    assert_eq!(Component::from_str("registry-puller").ok(), Some(Component::RegistryPuller));
    assert!(Component::from_str("kiali").is_err());
}

#[test]
fn operation_helpers() {
    assert!(Operation::Install.is_install());
    assert!(!Operation::Uninstall.is_install());
    assert_eq!(Operation::Uninstall.as_ref(), "uninstall");
}

#[test]
fn test_user_debug_hides_password() {
    let user = TestUser::new("ike", "very-secret");
    let rendered = format!("{user:?}");
    assert!(rendered.contains("ike"));
    assert!(!rendered.contains("very-secret"));
}
