use std::sync::LazyLock;

use regex::Regex;

use crate::routes::auth::model::LoginRequest;
use crate::routes::user::model::{RegisterUserRequest, UpdateUserRequest};

pub const NAME_MAX_LENGTH: usize = 50;
pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PASSWORD_MAX_LENGTH: usize = 16;
pub const PASSWORD_SPECIAL_CHARS: &str = "!?*.";

// The regex crate has no lookahead, so the no-consecutive-dots rule is a
// separate check in validate_email.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email pattern")
});

// Letters (including accented Latin) and spaces.
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-zÀ-ÿ ]+$").expect("valid name pattern"));

/// Collects every violation of the registration rules; an empty list means
/// the payload is valid.
pub fn validate_registration(req: &RegisterUserRequest, name_min_length: usize) -> Vec<String> {
    let mut errors = Vec::new();
    validate_person_name("name", &req.name, name_min_length, &mut errors);
    validate_person_name("last name", &req.last_name, name_min_length, &mut errors);
    validate_email(&req.email, &mut errors);
    validate_password_strength(&req.password, &mut errors);
    errors
}

/// Update payloads follow the registration rules, except that the password
/// rules only apply when a replacement password is actually supplied.
pub fn validate_update(req: &UpdateUserRequest, name_min_length: usize) -> Vec<String> {
    let mut errors = Vec::new();
    validate_person_name("name", &req.name, name_min_length, &mut errors);
    validate_person_name("last name", &req.last_name, name_min_length, &mut errors);
    validate_email(&req.email, &mut errors);
    if let Some(password) = req.password.as_deref() {
        if !password.trim().is_empty() {
            validate_password_strength(password, &mut errors);
        }
    }
    errors
}

/// Login payloads only get presence checks; the strength rules do not
/// re-apply to credentials that already exist.
pub fn validate_login(req: &LoginRequest) -> Vec<String> {
    let mut errors = Vec::new();
    if req.email.trim().is_empty() {
        errors.push("email is required".to_string());
    }
    if req.password.trim().is_empty() {
        errors.push("password is required".to_string());
    }
    errors
}

pub fn validate_email(email: &str, errors: &mut Vec<String>) {
    if email.trim().is_empty() {
        errors.push("email is required".to_string());
        return;
    }
    if email.contains("..") || !EMAIL_RE.is_match(email) {
        errors.push("email format is invalid".to_string());
    }
}

/// Name rules only apply when the field is non-blank.
pub fn validate_person_name(label: &str, value: &str, min_length: usize, errors: &mut Vec<String>) {
    if value.trim().is_empty() {
        return;
    }
    if !NAME_RE.is_match(value) {
        errors.push(format!("{label} contains invalid characters"));
    }
    let length = value.chars().count();
    if length < min_length {
        errors.push(format!("{label} must have at least {min_length} characters"));
    }
    if length > NAME_MAX_LENGTH {
        errors.push(format!("{label} must have at most {NAME_MAX_LENGTH} characters"));
    }
}

pub fn validate_password_strength(password: &str, errors: &mut Vec<String>) {
    let length = password.chars().count();
    if length < PASSWORD_MIN_LENGTH || length > PASSWORD_MAX_LENGTH {
        errors.push(format!(
            "password must be between {PASSWORD_MIN_LENGTH} and {PASSWORD_MAX_LENGTH} characters"
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("password must contain at least one uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("password must contain at least one lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("password must contain at least one digit".to_string());
    }
    if !password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c)) {
        errors.push(format!(
            "password must contain at least one special character ({PASSWORD_SPECIAL_CHARS})"
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email_errors(email: &str) -> Vec<String> {
        let mut errors = Vec::new();
        validate_email(email, &mut errors);
        errors
    }

    fn password_errors(password: &str) -> Vec<String> {
        let mut errors = Vec::new();
        validate_password_strength(password, &mut errors);
        errors
    }

    #[test]
    fn accepts_well_formed_emails() {
        assert!(email_errors("ana.li@example.com").is_empty());
        assert!(email_errors("a+tag@sub.domain.org").is_empty());
        assert!(email_errors("x_1%2@mail.co").is_empty());
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(!email_errors("").is_empty());
        assert!(!email_errors("no-at-sign.com").is_empty());
        assert!(!email_errors("a@b").is_empty());
        assert!(!email_errors("a@b.c").is_empty());
        assert!(!email_errors("spaces in@mail.com").is_empty());
    }

    #[test]
    fn rejects_consecutive_dots() {
        assert!(!email_errors("ana..li@example.com").is_empty());
        assert!(!email_errors("ana@example..com").is_empty());
    }

    #[test]
    fn name_rules_only_apply_when_present() {
        let mut errors = Vec::new();
        validate_person_name("name", "", 2, &mut errors);
        validate_person_name("name", "   ", 2, &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn name_charset_allows_accented_letters() {
        let mut errors = Vec::new();
        validate_person_name("name", "María José", 2, &mut errors);
        validate_person_name("last name", "Muñoz Ibáñez", 2, &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn name_charset_rejects_digits_and_symbols() {
        let mut errors = Vec::new();
        validate_person_name("name", "Ana3", 2, &mut errors);
        assert_eq!(errors, vec!["name contains invalid characters".to_string()]);
    }

    #[test]
    fn name_length_bounds_are_enforced() {
        let mut errors = Vec::new();
        validate_person_name("name", "A", 2, &mut errors);
        assert_eq!(errors.len(), 1);

        let mut errors = Vec::new();
        validate_person_name("name", &"a".repeat(51), 2, &mut errors);
        assert_eq!(errors.len(), 1);

        // The minimum is configurable.
        let mut errors = Vec::new();
        validate_person_name("name", "Al", 3, &mut errors);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn password_rules_cover_every_character_class() {
        assert!(password_errors("Ab3!xxxx").is_empty());
        assert!(!password_errors("ab3!xxxx").is_empty(), "missing uppercase");
        assert!(!password_errors("AB3!XXXX").is_empty(), "missing lowercase");
        assert!(!password_errors("Abc!xxxx").is_empty(), "missing digit");
        assert!(!password_errors("Ab3xxxxx").is_empty(), "missing special");
        assert!(!password_errors("Ab3!xxx").is_empty(), "too short");
        assert!(!password_errors("Ab3!xxxxxxxxxxxxx").is_empty(), "too long");
    }

    #[test]
    fn special_set_is_exactly_the_four_characters() {
        assert!(password_errors("Ab3?xxxx").is_empty());
        assert!(password_errors("Ab3*xxxx").is_empty());
        assert!(password_errors("Ab3.xxxx").is_empty());
        assert!(!password_errors("Ab3#xxxx").is_empty());
    }

    #[test]
    fn violations_are_collected_not_short_circuited() {
        let req = RegisterUserRequest {
            name: "A1".to_string(),
            last_name: "B".to_string(),
            phone_number: String::new(),
            email: "bad-email".to_string(),
            password: "weak".to_string(),
            department_id: 1,
            role: "agent".to_string(),
        };
        let errors = validate_registration(&req, 2);
        // name charset, last-name minimum, email format, and several
        // password classes all reported in one pass.
        assert!(errors.len() >= 5, "got: {errors:?}");
        assert!(errors.iter().any(|e| e.contains("email")));
        assert!(errors.iter().any(|e| e.contains("password")));
    }

    #[test]
    fn login_validation_is_presence_only() {
        let valid = LoginRequest {
            email: "not-even-an-email".to_string(),
            password: "short".to_string(),
        };
        assert!(validate_login(&valid).is_empty());

        let blank = LoginRequest {
            email: "  ".to_string(),
            password: String::new(),
        };
        let errors = validate_login(&blank);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn update_skips_password_rules_when_blank() {
        let req = UpdateUserRequest {
            name: "Ana".to_string(),
            last_name: "Li".to_string(),
            phone_number: String::new(),
            email: "ana@example.com".to_string(),
            department_id: 1,
            role: "agent".to_string(),
            password: Some(String::new()),
        };
        assert!(validate_update(&req, 2).is_empty());

        let req = UpdateUserRequest {
            password: Some("weak".to_string()),
            ..req
        };
        assert!(!validate_update(&req, 2).is_empty());
    }
}
