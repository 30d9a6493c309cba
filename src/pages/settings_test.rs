use super::*;
use crate::net::types::PlanType;
use crate::testing::sample_user;

fn user() -> User {
    User {
        phone: Some("11987654321".to_owned()),
        business_name: Some("Padaria".to_owned()),
        business_sector: Some("restaurant".to_owned()),
        ..sample_user(PlanType::Basic, 2)
    }
}

#[test]
fn form_starts_from_user_with_formatted_phone() {
    let form = ProfileForm::from_user(&user());
    assert_eq!(form.full_name, "João");
    assert_eq!(form.phone, "(11) 98765-4321");
    assert_eq!(form.business_sector, "restaurant");
}

#[test]
fn unchanged_form_produces_empty_patch() {
    let u = user();
    assert!(ProfileForm::from_user(&u).patch_against(&u).is_empty());
}

#[test]
fn patch_contains_only_changed_fields() {
    let u = user();
    let mut form = ProfileForm::from_user(&u);
    form.business_name = "  Padaria Nova ".to_owned();
    let patch = form.patch_against(&u);
    assert_eq!(patch, UserPatch { business_name: Some("Padaria Nova".to_owned()), ..UserPatch::default() });
}

#[test]
fn validate_requires_name_and_full_phone() {
    let mut form = ProfileForm::from_user(&user());
    assert_eq!(form.validate(), Ok(()));
    form.phone = "9876".to_owned();
    assert_eq!(form.validate(), Err("Invalid phone number"));
    form.phone = String::new();
    form.full_name = "Jo".to_owned();
    assert_eq!(form.validate(), Err("Name must be at least 3 characters"));
}
