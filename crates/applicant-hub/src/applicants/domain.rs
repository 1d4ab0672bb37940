use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::documents::DocumentSet;

/// Identifier assigned to an applicant record at creation. Time-based and
/// immutable; uniqueness is guaranteed by the issuing generator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ApplicantId(pub i64);

impl fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Field identifier to value mapping. Standard and custom fields share the
/// same namespace; documents are tracked separately.
pub type FieldMap = BTreeMap<String, String>;

/// One tracked job applicant and every captured attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    pub id: ApplicantId,
    pub fields: FieldMap,
    #[serde(default)]
    pub documents: DocumentSet,
}

impl ApplicantRecord {
    pub fn field(&self, id: &str) -> Option<&str> {
        self.fields.get(id).map(String::as_str)
    }

    /// "First Last" rendering used in prompts and log lines.
    pub fn display_name(&self) -> String {
        let first = self.field("first_name").unwrap_or_default();
        let last = self.field("last_name").unwrap_or_default();
        format!("{first} {last}").trim().to_string()
    }
}

/// Input widget backing a field. Custom fields pick one of these at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Number,
    Date,
    Textarea,
}

impl FieldKind {
    pub const fn label(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Tel => "tel",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            FieldKind::Textarea => "textarea",
        }
    }
}

/// A user-defined attribute layered onto every applicant record's schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    pub id: String,
    pub label: String,
    pub kind: FieldKind,
}

impl CustomField {
    /// Builds a definition whose id is derived from the label.
    pub fn from_label(label: &str, kind: FieldKind) -> Self {
        Self {
            id: custom_field_id(label),
            label: label.to_string(),
            kind,
        }
    }
}

/// Derives a field id from a display label: lowercase, each run of
/// whitespace collapsed to a single underscore. The derivation is purely
/// lexical, so "Passport No" and "Passport No." yield distinct ids.
pub fn custom_field_id(label: &str) -> String {
    let mut id = String::with_capacity(label.len());
    let mut in_whitespace = false;
    for ch in label.to_lowercase().chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                id.push('_');
                in_whitespace = true;
            }
        } else {
            id.push(ch);
            in_whitespace = false;
        }
    }
    id
}

/// One entry of the fixed schema every applicant record starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardField {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const fn field(id: &'static str, label: &'static str, kind: FieldKind, required: bool) -> StandardField {
    StandardField {
        id,
        label,
        kind,
        required,
    }
}

/// The registration form's standard fields, in section order: job,
/// personal, contact, address, emergency contact, work experience, remarks.
pub const STANDARD_FIELDS: &[StandardField] = &[
    field("job_applied_for", "Job Applied For", FieldKind::Text, true),
    field("country_of_destination", "Country of Destination", FieldKind::Text, true),
    field("first_name", "First Name", FieldKind::Text, true),
    field("middle_name", "Middle Name", FieldKind::Text, false),
    field("last_name", "Last Name", FieldKind::Text, true),
    field("gender", "Gender", FieldKind::Text, true),
    field("date_of_birth", "Date of Birth", FieldKind::Date, true),
    field("age", "Age", FieldKind::Number, false),
    field("nationality", "Nationality", FieldKind::Text, true),
    field("civil_status", "Civil Status", FieldKind::Text, true),
    field("contact_number_1", "Contact Number 1", FieldKind::Tel, true),
    field("contact_number_2", "Contact Number 2", FieldKind::Tel, false),
    field("email", "Email", FieldKind::Email, true),
    field("social_media_fb", "Facebook", FieldKind::Text, false),
    field("social_media_tiktok", "TikTok", FieldKind::Text, false),
    field("social_media_ig", "Instagram", FieldKind::Text, false),
    field("street_address", "Street Address", FieldKind::Text, true),
    field("barangay", "Barangay", FieldKind::Text, true),
    field("city", "City", FieldKind::Text, true),
    field("province", "Province", FieldKind::Text, true),
    field("postal_code", "Postal Code", FieldKind::Text, false),
    field("emergency_contact_name", "Emergency Contact Name", FieldKind::Text, true),
    field("emergency_contact_number", "Emergency Contact Number", FieldKind::Tel, true),
    field("emergency_contact_fb", "Emergency Contact Facebook", FieldKind::Text, false),
    field("emergency_contact_tiktok", "Emergency Contact TikTok", FieldKind::Text, false),
    field("emergency_contact_ig", "Emergency Contact Instagram", FieldKind::Text, false),
    field("emergency_contact_street", "Emergency Contact Street", FieldKind::Text, false),
    field("emergency_contact_barangay", "Emergency Contact Barangay", FieldKind::Text, false),
    field("emergency_contact_city", "Emergency Contact City", FieldKind::Text, false),
    field("emergency_contact_province", "Emergency Contact Province", FieldKind::Text, false),
    field("emergency_contact_postal", "Emergency Contact Postal Code", FieldKind::Text, false),
    field("work_country", "Work Country", FieldKind::Text, true),
    field("years_of_experience", "Years of Experience", FieldKind::Number, true),
    field("job_position", "Job Position", FieldKind::Text, true),
    field("remarks", "Remarks", FieldKind::Textarea, false),
];

pub fn standard_field(id: &str) -> Option<&'static StandardField> {
    STANDARD_FIELDS.iter().find(|entry| entry.id == id)
}

pub fn is_standard_field(id: &str) -> bool {
    standard_field(id).is_some()
}

/// Whole calendar years between `date_of_birth` and `today`: the year
/// difference, minus one when today's month/day precedes the birth month/day.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

/// Renders the derived `age` field for a raw `date_of_birth` value. A blank
/// or unparseable date yields an empty string, clearing the field.
pub fn computed_age(date_of_birth: &str, today: NaiveDate) -> String {
    match NaiveDate::parse_from_str(date_of_birth.trim(), "%Y-%m-%d") {
        Ok(dob) => age_on(dob, today).to_string(),
        Err(_) => String::new(),
    }
}
