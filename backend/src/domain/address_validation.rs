//! Field rules for address input.
//!
//! Every rule runs independently so a client sees all violations in one
//! round trip. Violations keep rule order: fields in declaration order, and
//! within a field "required", then length, then format. Length and format
//! only judge values that are present, so an absent zip code is reported as
//! required alone while an empty one also fails the format.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::domain::AddressInput;

/// Maximum length of `street`, in characters.
pub const STREET_MAX: usize = 200;
/// Maximum length of `city`, `state` and `country`, in characters.
pub const REGION_MAX: usize = 100;
/// Maximum length of `zipCode`, in characters.
pub const ZIP_CODE_MAX: usize = 20;

static ZIP_CODE_RE: OnceLock<Regex> = OnceLock::new();

fn zip_code_regex() -> &'static Regex {
    ZIP_CODE_RE.get_or_init(|| {
        Regex::new(r"^\d{5}(-\d{4})?$")
            .unwrap_or_else(|error| panic!("zip code regex failed to compile: {error}"))
    })
}

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Wire name of the offending field.
    pub field: &'static str,
    pub message: String,
}

/// Ordered outcome of validating one input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<FieldViolation>,
}

impl ValidationReport {
    /// `true` when no rule was violated.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Group messages per field, preserving rule order within each field.
    ///
    /// # Examples
    /// ```
    /// use address_api::domain::{AddressInput, AddressInputValidator, Validator};
    ///
    /// let report = AddressInputValidator.validate(&AddressInput::default());
    /// let errors = report.to_error_map();
    /// assert_eq!(errors["street"][0], "Street is required.");
    /// ```
    #[must_use]
    pub fn to_error_map(&self) -> Value {
        let mut map = Map::new();
        for violation in &self.violations {
            let entry = map
                .entry(violation.field)
                .or_insert_with(|| Value::Array(Vec::new()));
            if let Value::Array(messages) = entry {
                messages.push(json!(violation.message));
            }
        }
        Value::Object(map)
    }

    fn push(&mut self, field: &'static str, message: String) {
        self.violations.push(FieldViolation { field, message });
    }
}

/// A validator producing an ordered violation list for some input.
pub trait Validator<T: ?Sized>: Send + Sync {
    /// Check every rule against `input`.
    fn validate(&self, input: &T) -> ValidationReport;
}

/// Rules shared by create and update address input.
#[derive(Debug, Default, Clone, Copy)]
pub struct AddressInputValidator;

struct TextRule {
    field: &'static str,
    label: &'static str,
    max: usize,
}

impl TextRule {
    fn apply(&self, value: Option<&str>, report: &mut ValidationReport) {
        if value.is_none_or(|text| text.trim().is_empty()) {
            report.push(self.field, format!("{} is required.", self.label));
        }
        if value.is_some_and(|text| text.chars().count() > self.max) {
            report.push(
                self.field,
                format!("{} must not exceed {} characters.", self.label, self.max),
            );
        }
    }
}

impl Validator<AddressInput> for AddressInputValidator {
    fn validate(&self, input: &AddressInput) -> ValidationReport {
        let mut report = ValidationReport::default();
        let rules = [
            (&input.street, TextRule { field: "street", label: "Street", max: STREET_MAX }),
            (&input.city, TextRule { field: "city", label: "City", max: REGION_MAX }),
            (&input.state, TextRule { field: "state", label: "State", max: REGION_MAX }),
            (&input.zip_code, TextRule { field: "zipCode", label: "ZipCode", max: ZIP_CODE_MAX }),
        ];
        for (value, rule) in rules {
            rule.apply(value.as_deref(), &mut report);
        }
        if input
            .zip_code
            .as_deref()
            .is_some_and(|zip| !zip_code_regex().is_match(zip))
        {
            report.push(
                "zipCode",
                "ZipCode must be in valid US format (12345 or 12345-6789).".to_owned(),
            );
        }
        TextRule { field: "country", label: "Country", max: REGION_MAX }
            .apply(input.country.as_deref(), &mut report);
        report
    }
}
