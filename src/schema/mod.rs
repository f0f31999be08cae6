// Application form schema - the single source of truth for field rules.
//
// Both tiers consume this module: the form renderer runs `validate` for
// field-level feedback, and the submit handler checks `required_fields`
// before touching the sheet. Keeping one definition stops the two lists
// from drifting apart.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

/// Allowed values for the `year` field.
pub const YEAR_OPTIONS: &[&str] = &["FY"];

/// Allowed values for the preference fields.
pub const PREFERENCE_OPTIONS: &[&str] = &["tech", "design", "content", "marketing", "events"];

/// Digits plus the separators people actually type into phone fields.
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9+\s\-()]+$").expect("phone pattern is valid"));

const FIELDS_WITH_PHONE: &[&str] = &[
    "name",
    "phone",
    "college",
    "year",
    "preference1",
    "preference2",
    "aboutYourself",
    "whyJoin",
    "resumeLink",
];

const FIELDS_WITHOUT_PHONE: &[&str] = &[
    "name",
    "college",
    "year",
    "preference1",
    "preference2",
    "aboutYourself",
    "whyJoin",
    "resumeLink",
];

/// One applicant's form payload. JSON keys match the form renderer's wire
/// format exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub college: String,
    pub year: String,
    pub preference1: String,
    pub preference2: String,
    pub about_yourself: String,
    pub why_join: String,
    pub resume_link: String,
}

/// A field-level validation failure: field path plus a human-readable
/// message, surfaced to the submitter and never logged as a server fault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

/// Declarative rule set for one revision of the form. The only knob is
/// whether the phone column is collected (the later, 10-column revision).
#[derive(Debug, Clone, Copy)]
pub struct FormSchema {
    collect_phone: bool,
}

impl FormSchema {
    pub fn new(collect_phone: bool) -> Self {
        Self { collect_phone }
    }

    pub fn collect_phone(&self) -> bool {
        self.collect_phone
    }

    /// Field names the submit handler requires to be present and non-empty.
    pub fn required_fields(&self) -> &'static [&'static str] {
        if self.collect_phone {
            FIELDS_WITH_PHONE
        } else {
            FIELDS_WITHOUT_PHONE
        }
    }

    /// Check a candidate submission against every field rule, then the
    /// cross-field preference rule. Pure and synchronous; expected failures
    /// come back as a list of `FieldError`s, never a panic.
    pub fn validate(&self, submission: &Submission) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if submission.name.chars().count() < 2 {
            errors.push(FieldError::new("name", "Name must be at least 2 characters long."));
        }

        if self.collect_phone {
            match &submission.phone {
                Some(phone) if phone.chars().count() >= 10 => {
                    if !PHONE_PATTERN.is_match(phone) {
                        errors.push(FieldError::new(
                            "phone",
                            "Phone number may only contain digits, spaces, +, - and parentheses.",
                        ));
                    }
                }
                Some(_) => {
                    errors.push(FieldError::new(
                        "phone",
                        "Phone number must be at least 10 characters long.",
                    ));
                }
                None => {
                    errors.push(FieldError::new("phone", "Please enter your phone number."));
                }
            }
        }

        if submission.college.chars().count() < 3 {
            errors.push(FieldError::new(
                "college",
                "College name must be at least 3 characters long.",
            ));
        }

        if !YEAR_OPTIONS.contains(&submission.year.as_str()) {
            errors.push(FieldError::new("year", "Please select your year."));
        }

        if !PREFERENCE_OPTIONS.contains(&submission.preference1.as_str()) {
            errors.push(FieldError::new("preference1", "Please select preference 1."));
        }

        if !PREFERENCE_OPTIONS.contains(&submission.preference2.as_str()) {
            errors.push(FieldError::new("preference2", "Please select preference 2."));
        }

        let about_len = submission.about_yourself.chars().count();
        if about_len < 10 {
            errors.push(FieldError::new(
                "aboutYourself",
                "Please tell us a bit more about yourself.",
            ));
        } else if about_len > 500 {
            errors.push(FieldError::new(
                "aboutYourself",
                "Please keep it under 500 characters.",
            ));
        }

        let why_len = submission.why_join.chars().count();
        if why_len < 10 {
            errors.push(FieldError::new("whyJoin", "Please explain why you want to join."));
        } else if why_len > 500 {
            errors.push(FieldError::new("whyJoin", "Please keep it under 500 characters."));
        }

        if Url::parse(&submission.resume_link).is_err() {
            errors.push(FieldError::new(
                "resumeLink",
                "Please enter a valid URL for your resume.",
            ));
        }

        // Cross-field rule: the two preferences must be distinct. The
        // violation is attached to preference1, matching the form's error
        // placement.
        if submission.preference1 == submission.preference2 {
            errors.push(FieldError::new("preference1", "Preferences must be unique."));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
