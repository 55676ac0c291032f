//! Static field rules for user payloads
//!
//! Rules are evaluated in declaration order and every failing rule is
//! reported; nothing short-circuits. A field may fail more than one rule
//! (an empty password is both blank and missing the required characters).

use std::borrow::Cow;

use validator::{Validate, ValidationError, ValidationErrors};

use super::UserPayload;

pub const NOT_BLANK_MESSAGE: &str = "may not be empty";
pub const PASSWORD_PATTERN_MESSAGE: &str =
    "value should contain at least 1 Uppercase Alphabet and 1 Number";

/// Fields covered by the static rules, in declaration order.
pub const VALIDATED_FIELDS: [&str; 3] = ["name", "login", "password"];

struct FieldRule {
    field: &'static str,
    code: &'static str,
    message: &'static str,
    /// Returns `true` when the payload satisfies the rule.
    check: fn(&UserPayload) -> bool,
}

const FIELD_RULES: &[FieldRule] = &[
    FieldRule {
        field: "name",
        code: "not_blank",
        message: NOT_BLANK_MESSAGE,
        check: name_not_blank,
    },
    FieldRule {
        field: "login",
        code: "not_blank",
        message: NOT_BLANK_MESSAGE,
        check: login_not_blank,
    },
    FieldRule {
        field: "password",
        code: "not_blank",
        message: NOT_BLANK_MESSAGE,
        check: password_not_blank,
    },
    FieldRule {
        field: "password",
        code: "pattern",
        message: PASSWORD_PATTERN_MESSAGE,
        check: password_matches_pattern,
    },
];

/// Blank means nothing left after stripping ASCII control characters and
/// spaces from both ends. Other Unicode whitespace such as U+00A0 counts as
/// content.
fn is_not_blank(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim_matches(|c: char| c <= ' ').is_empty())
}

fn name_not_blank(user: &UserPayload) -> bool {
    is_not_blank(user.name.as_deref())
}

fn login_not_blank(user: &UserPayload) -> bool {
    is_not_blank(user.login.as_deref())
}

fn password_not_blank(user: &UserPayload) -> bool {
    is_not_blank(user.password.as_deref())
}

/// A missing password is left to the not-blank rule.
fn password_matches_pattern(user: &UserPayload) -> bool {
    user.password.as_deref().map_or(true, has_uppercase_and_digit)
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{0085}' | '\u{2028}' | '\u{2029}')
}

/// At least one ASCII uppercase letter and one ASCII digit, anywhere, on a
/// single line. Any line terminator fails the rule.
pub fn has_uppercase_and_digit(value: &str) -> bool {
    !value.chars().any(is_line_terminator)
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
}

impl Validate for UserPayload {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for rule in FIELD_RULES {
            if !(rule.check)(self) {
                let mut error = ValidationError::new(rule.code);
                error.message = Some(Cow::Borrowed(rule.message));
                errors.add(rule.field, error);
            }
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
