//! Validation outcome types returned by `UserService`

use std::fmt;

use validator::ValidationErrors;

use crate::domain::user::VALIDATED_FIELDS;

/// A single rejected rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl Violation {
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn role_not_exist(role_id: i64) -> Self {
        Self::new(
            "roles",
            "role.not.exist",
            format!("Role with id {} does not exist", role_id),
        )
    }

    pub fn user_exists() -> Self {
        Self::new("id", "user.exist", "This user exist")
    }

    pub fn user_not_exists() -> Self {
        Self::new("id", "user.exist", "This user is not exist")
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Flatten field errors into violations, ordered by field declaration and
/// then by rule declaration within a field.
pub fn field_violations(errors: &ValidationErrors) -> Vec<Violation> {
    let by_field = errors.field_errors();
    VALIDATED_FIELDS
        .iter()
        .filter_map(|field| by_field.get(*field).map(|errs| (*field, errs)))
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                Violation::new(field, e.code.to_string(), message)
            })
        })
        .collect()
}

/// Outcome of a create or update request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageResult {
    pub success: bool,
    /// One `"<field>: <message>"` entry per violation.
    pub errors: Vec<String>,
}

impl MessageResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            errors: Vec::new(),
        }
    }

    pub fn rejected(violations: &[Violation]) -> Self {
        Self {
            success: false,
            errors: violations.iter().map(Violation::to_string).collect(),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserPayload;
    use validator::Validate;

    #[test]
    fn violation_formats_field_and_message() {
        assert_eq!(
            Violation::role_not_exist(4).to_string(),
            "roles: Role with id 4 does not exist"
        );
        assert_eq!(Violation::user_exists().to_string(), "id: This user exist");
        assert_eq!(
            Violation::user_not_exists().to_string(),
            "id: This user is not exist"
        );
    }

    #[test]
    fn field_violations_follow_declaration_order() {
        let errors = UserPayload {
            password: Some(" ".into()),
            ..UserPayload::default()
        }
        .validate()
        .unwrap_err();

        let rendered: Vec<String> = field_violations(&errors)
            .iter()
            .map(Violation::to_string)
            .collect();
        assert_eq!(
            rendered,
            vec![
                "name: may not be empty",
                "login: may not be empty",
                "password: may not be empty",
                "password: value should contain at least 1 Uppercase Alphabet and 1 Number",
            ]
        );
    }

    #[test]
    fn rejected_result_keeps_violation_order() {
        let result = MessageResult::rejected(&[Violation::role_not_exist(2), Violation::user_exists()]);
        assert!(!result.success);
        assert_eq!(
            result.errors,
            vec!["roles: Role with id 2 does not exist", "id: This user exist"]
        );
        assert!(MessageResult::ok().errors.is_empty());
    }
}
