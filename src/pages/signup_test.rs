use super::*;

fn complete_form() -> SignupForm {
    SignupForm {
        full_name: "João Silva".to_owned(),
        cpf_cnpj: "123.456.789-09".to_owned(),
        email: "joao@padaria.com".to_owned(),
        business_name: "Padaria".to_owned(),
        phone: "(11) 98765-4321".to_owned(),
        business_sector: "restaurant".to_owned(),
        password: "Secret123".to_owned(),
        confirm_password: "Secret123".to_owned(),
    }
}

fn fields(errors: &[FieldError]) -> Vec<&'static str> {
    errors.iter().map(|e| e.field).collect()
}

// =============================================================
// Field validators
// =============================================================

#[test]
fn email_requires_local_part_and_dotted_domain() {
    assert!(is_valid_email("a@b.co"));
    assert!(!is_valid_email("a@b"));
    assert!(!is_valid_email("@b.co"));
    assert!(!is_valid_email("a b@c.co"));
    assert!(!is_valid_email("a@b@c.co"));
    assert!(!is_valid_email("a@.co"));
}

#[test]
fn cpf_cnpj_accepts_11_or_14_digits() {
    assert!(is_valid_cpf_cnpj("123.456.789-09"));
    assert!(is_valid_cpf_cnpj("12.345.678/0001-95"));
    assert!(!is_valid_cpf_cnpj("1234567890"));
    assert!(!is_valid_cpf_cnpj("111.111.111-11"));
}

#[test]
fn password_rules_report_first_problem() {
    assert_eq!(password_problem("Ab1"), Some("Password must be at least 8 characters"));
    assert_eq!(password_problem("secret123"), Some("Password must contain an uppercase letter"));
    assert_eq!(password_problem("SecretPass"), Some("Password must contain a number"));
    assert_eq!(password_problem("Secret123"), None);
}

// =============================================================
// Step validation
// =============================================================

#[test]
fn complete_form_passes_every_step() {
    let form = complete_form();
    for step in SignupStep::ALL {
        assert!(form.validate_step(step).is_empty(), "{step:?}");
    }
}

#[test]
fn personal_step_reports_each_bad_field() {
    let form = SignupForm { full_name: "Jo".to_owned(), cpf_cnpj: "1".to_owned(), email: "x".to_owned(), ..complete_form() };
    assert_eq!(fields(&form.validate_step(SignupStep::Personal)), vec!["full_name", "cpf_cnpj", "email"]);
}

#[test]
fn business_step_rejects_unknown_sector_and_short_phone() {
    let form = SignupForm { phone: "11 9876".to_owned(), business_sector: "casino".to_owned(), ..complete_form() };
    assert_eq!(fields(&form.validate_step(SignupStep::Business)), vec!["phone", "business_sector"]);
}

#[test]
fn security_step_requires_matching_confirmation() {
    let form = SignupForm { confirm_password: "Secret124".to_owned(), ..complete_form() };
    let errors = form.validate_step(SignupStep::Security);
    assert_eq!(errors, vec![FieldError { field: "confirm_password", message: "Passwords do not match" }]);
}

#[test]
fn default_sector_is_restaurant() {
    assert_eq!(SignupForm::default().business_sector, "restaurant");
}

// =============================================================
// Wizard transitions
// =============================================================

#[test]
fn advance_blocks_on_invalid_step() {
    let mut wizard = SignupWizard::default();
    assert!(!wizard.advance());
    assert_eq!(wizard.step, SignupStep::Personal);
    assert_eq!(wizard.error_for("email"), Some("Invalid email"));
}

#[test]
fn advance_only_checks_current_step() {
    let mut wizard = SignupWizard {
        form: SignupForm { password: String::new(), confirm_password: String::new(), ..complete_form() },
        ..SignupWizard::default()
    };
    assert!(wizard.advance());
    assert!(wizard.advance());
    assert_eq!(wizard.step, SignupStep::Security);
    assert!(!wizard.advance());
}

#[test]
fn back_is_always_allowed_and_clears_errors() {
    let mut wizard = SignupWizard { step: SignupStep::Security, ..SignupWizard::default() };
    wizard.advance();
    assert!(!wizard.errors.is_empty());
    wizard.back();
    assert_eq!(wizard.step, SignupStep::Business);
    assert!(wizard.errors.is_empty());
    wizard.back();
    wizard.back();
    assert_eq!(wizard.step, SignupStep::Personal);
}

#[test]
fn submission_jumps_to_first_failing_step() {
    let mut wizard = SignupWizard {
        step: SignupStep::Security,
        form: SignupForm { business_name: String::new(), ..complete_form() },
        ..SignupWizard::default()
    };
    assert_eq!(wizard.submission(), None);
    assert_eq!(wizard.step, SignupStep::Business);
    assert_eq!(wizard.error_for("business_name"), Some("Invalid business name"));
}

#[test]
fn submission_normalizes_payload() {
    let mut wizard = SignupWizard { form: complete_form(), ..SignupWizard::default() };
    let data = wizard.submission().unwrap();
    assert_eq!(data.cpf_cnpj, "12345678909");
    assert_eq!(data.phone, "11987654321");
    assert_eq!(data.email, "joao@padaria.com");
    assert_eq!(data.business_sector, "restaurant");
}
