//! Form state of the redemption editor
//!
//! Holds the raw field values as the operator entered them, the derived
//! field visibility and the per-field validation rules.

use chrono::{DateTime, Utc};
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

use crate::i18n::{Localizer, Message};
use crate::models::RedemptionRecord;

pub const DEFAULT_QUOTA: i64 = 100_000;
pub const DEFAULT_COUNT: i64 = 1;

/// Grid columns of a full-width row
pub const FULL_SPAN: u8 = 24;
pub const HALF_SPAN: u8 = 12;

/// Quick quota choices offered next to the quota input
pub const QUOTA_PRESETS: [(i64, &str); 6] = [
    (500_000, "1$"),
    (5_000_000, "10$"),
    (25_000_000, "50$"),
    (50_000_000, "100$"),
    (250_000_000, "500$"),
    (500_000_000, "1000$"),
];

/// Quota of the preset whose label is `label` (`"10$"`, case and
/// surrounding whitespace ignored)
pub fn quota_preset(label: &str) -> Option<i64> {
    let label = label.trim();
    QUOTA_PRESETS
        .iter()
        .find(|(_, preset)| preset.eq_ignore_ascii_case(label))
        .map(|(quota, _)| *quota)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: i64 },
}

/// Raw field values
///
/// `quota` and `count` keep the entered text; they are parsed only when
/// validating and normalizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    pub name: String,
    pub quota: String,
    pub plan_id: Option<i64>,
    pub count: String,
    pub expired_time: Option<DateTime<Utc>>,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            name: String::new(),
            quota: DEFAULT_QUOTA.to_string(),
            plan_id: None,
            count: DEFAULT_COUNT.to_string(),
            expired_time: None,
        }
    }
}

impl FormValues {
    /// Values of a loaded record merged over the defaults
    pub fn from_record(record: &RedemptionRecord) -> Self {
        Self {
            name: record.name.clone(),
            quota: record.quota.to_string(),
            plan_id: Some(record.plan_id).filter(|id| *id > 0),
            count: record.count.to_string(),
            expired_time: record.expires_at(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormState {
    mode: FormMode,
    values: FormValues,
    retained_status: Option<i32>,
}

impl FormState {
    pub fn new(mode: FormMode) -> Self {
        Self {
            mode,
            values: FormValues::default(),
            retained_status: None,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    pub fn editing_id(&self) -> Option<i64> {
        match self.mode {
            FormMode::Edit { id } => Some(id),
            FormMode::Create => None,
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Bulk replacement of every field
    pub fn set_values(&mut self, values: FormValues) {
        self.values = values;
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.values.name = name.into();
    }

    pub fn set_quota(&mut self, quota: impl Into<String>) {
        self.values.quota = quota.into();
    }

    /// Sets the quota from operator input: a preset label picks the
    /// preset quota, anything else is kept as entered
    pub fn set_quota_input(&mut self, input: &str) {
        match quota_preset(input) {
            Some(quota) => self.values.quota = quota.to_string(),
            None => self.values.quota = input.to_string(),
        }
    }

    pub fn set_plan(&mut self, plan_id: Option<i64>) {
        self.values.plan_id = plan_id;
    }

    pub fn set_count(&mut self, count: impl Into<String>) {
        self.values.count = count.into();
    }

    pub fn set_expired_time(&mut self, expired_time: Option<DateTime<Utc>>) {
        self.values.expired_time = expired_time;
    }

    /// Back to the create defaults
    pub fn reset(&mut self) {
        self.values = FormValues::default();
        self.retained_status = None;
    }

    pub fn load_record(&mut self, record: &RedemptionRecord) {
        self.values = FormValues::from_record(record);
        self.retained_status = Some(record.status);
    }

    /// Status of the loaded record, sent back unchanged on update
    pub fn retained_status(&self) -> Option<i32> {
        self.retained_status
    }

    /// Selected plan, if it is a real one
    pub fn active_plan_id(&self) -> Option<i64> {
        self.values.plan_id.filter(|id| *id > 0)
    }

    pub fn quota_visible(&self) -> bool {
        self.active_plan_id().is_none()
    }

    pub fn count_visible(&self) -> bool {
        !self.is_edit()
    }

    /// Column span of the count input
    pub fn count_span(&self) -> u8 {
        if self.quota_visible() {
            HALF_SPAN
        } else {
            FULL_SPAN
        }
    }

    /// Runs the rules of every visible field
    pub fn validate(&self, localizer: &dyn Localizer) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.is_edit() && self.values.name.trim().is_empty() {
            errors.add("name", field_error("required", localizer.text(Message::NameRequired)));
        }

        if self.quota_visible() {
            if let Some(error) = positive_integer_rule(
                &self.values.quota,
                localizer.text(Message::QuotaRequired),
                localizer.text(Message::QuotaMustBePositive),
            ) {
                errors.add("quota", error);
            }
        }

        if self.count_visible() {
            if let Some(error) = positive_integer_rule(
                &self.values.count,
                localizer.text(Message::CountRequired),
                localizer.text(Message::CountMustBePositive),
            ) {
                errors.add("count", error);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn field_error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

fn positive_integer_rule(
    value: &str,
    required_message: String,
    positive_message: String,
) -> Option<ValidationError> {
    if value.trim().is_empty() {
        return Some(field_error("required", required_message));
    }
    match parse_int(value) {
        Some(number) if number > 0 => None,
        _ => Some(field_error("positive", positive_message)),
    }
}

/// Lenient integer parsing: leading whitespace, optional sign, then the
/// leading run of decimal digits (`"42abc"` is 42, `"3.9"` is 3).
/// Digit runs beyond the `i64` range saturate.
pub fn parse_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let digits = &rest[..digits_len];
    let number = if negative {
        format!("-{}", digits).parse().unwrap_or(i64::MIN)
    } else {
        digits.parse().unwrap_or(i64::MAX)
    };
    Some(number)
}

/// Flattens validation errors into `(field, message)` pairs, sorted by field
pub fn field_messages(errors: &ValidationErrors) -> Vec<(String, String)> {
    let mut messages: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, list)| {
            let field = field.to_string();
            list.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                (field.clone(), message)
            })
        })
        .collect();
    messages.sort();
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Catalog;

    fn create_form() -> FormState {
        FormState::new(FormMode::Create)
    }

    #[test]
    fn test_defaults() {
        let form = create_form();
        let values = form.values();
        assert_eq!(values.name, "");
        assert_eq!(values.quota, "100000");
        assert_eq!(values.plan_id, None);
        assert_eq!(values.count, "1");
        assert_eq!(values.expired_time, None);
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("  42abc"), Some(42));
        assert_eq!(parse_int("3.9"), Some(3));
        assert_eq!(parse_int("-5"), Some(-5));
        assert_eq!(parse_int("+7"), Some(7));
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int("-"), None);
    }

    #[test]
    fn test_parse_int_saturates() {
        assert_eq!(parse_int("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_int("-99999999999999999999"), Some(i64::MIN));
        assert_eq!(parse_int("-9223372036854775808"), Some(i64::MIN));

        let mut form = create_form();
        form.set_quota("99999999999999999999");
        assert!(form.validate(&Catalog::English).is_ok());
    }

    #[test]
    fn test_quota_preset_lookup() {
        assert_eq!(quota_preset("1$"), Some(500_000));
        assert_eq!(quota_preset(" 100$ "), Some(50_000_000));
        assert_eq!(quota_preset("1000$"), Some(500_000_000));
        assert_eq!(quota_preset("2$"), None);
        assert_eq!(quota_preset("500000"), None);
    }

    #[test]
    fn test_set_quota_input() {
        let mut form = create_form();
        form.set_quota_input("10$");
        assert_eq!(form.values().quota, "5000000");

        form.set_quota_input("1234");
        assert_eq!(form.values().quota, "1234");

        form.set_quota_input("12x");
        assert_eq!(form.values().quota, "12x");
    }

    #[test]
    fn test_load_record_normalizes_fields() {
        let record = RedemptionRecord {
            id: 5,
            name: "gift".to_string(),
            quota: 250_000,
            plan_id: -1,
            expired_time: 0,
            status: 2,
            ..Default::default()
        };
        let mut form = FormState::new(FormMode::Edit { id: 5 });
        form.load_record(&record);

        assert_eq!(form.values().plan_id, None);
        assert_eq!(form.values().expired_time, None);
        assert_eq!(form.values().quota, "250000");
        assert_eq!(form.retained_status(), Some(2));
    }

    #[test]
    fn test_load_record_converts_expiry() {
        let record = RedemptionRecord {
            plan_id: 4,
            expired_time: 1_735_689_600,
            ..Default::default()
        };
        let mut form = FormState::new(FormMode::Edit { id: 1 });
        form.load_record(&record);

        assert_eq!(form.values().plan_id, Some(4));
        assert_eq!(form.values().expired_time.unwrap().timestamp(), 1_735_689_600);
    }

    #[test]
    fn test_visibility() {
        let mut form = create_form();
        assert!(form.quota_visible());
        assert!(form.count_visible());
        assert_eq!(form.count_span(), HALF_SPAN);

        form.set_plan(Some(3));
        assert!(!form.quota_visible());
        assert_eq!(form.count_span(), FULL_SPAN);

        form.set_plan(Some(0));
        assert!(form.quota_visible());

        let edit = FormState::new(FormMode::Edit { id: 1 });
        assert!(!edit.count_visible());
    }

    #[test]
    fn test_quota_zero_rejected_one_accepted() {
        let catalog = Catalog::English;
        let mut form = create_form();

        form.set_quota("0");
        let errors = form.validate(&catalog).unwrap_err();
        assert_eq!(
            field_messages(&errors),
            vec![("quota".to_string(), "Quota must be greater than 0".to_string())]
        );

        form.set_quota("1");
        assert!(form.validate(&catalog).is_ok());
    }

    #[test]
    fn test_hidden_quota_not_validated() {
        let mut form = create_form();
        form.set_quota("");
        form.set_plan(Some(2));
        assert!(form.validate(&Catalog::English).is_ok());
    }

    #[test]
    fn test_required_messages() {
        let mut form = create_form();
        form.set_quota("");
        form.set_count("  ");

        let errors = form.validate(&Catalog::English).unwrap_err();
        assert_eq!(
            field_messages(&errors),
            vec![
                ("count".to_string(), "Please enter the number of codes".to_string()),
                ("quota".to_string(), "Please enter a quota".to_string()),
            ]
        );
    }

    #[test]
    fn test_name_required_only_in_edit_mode() {
        let catalog = Catalog::English;
        assert!(create_form().validate(&catalog).is_ok());

        let mut edit = FormState::new(FormMode::Edit { id: 9 });
        let errors = edit.validate(&catalog).unwrap_err();
        assert_eq!(field_messages(&errors)[0].0, "name");

        edit.set_name("renamed");
        assert!(edit.validate(&catalog).is_ok());
    }

    #[test]
    fn test_set_values_replaces_every_field() {
        let catalog = Catalog::English;
        let mut form = create_form();
        form.set_values(FormValues {
            name: "Bulk".to_string(),
            quota: "0".to_string(),
            plan_id: Some(3),
            count: "5".to_string(),
            expired_time: None,
        });

        assert_eq!(form.values().name, "Bulk");
        assert_eq!(form.active_plan_id(), Some(3));
        assert!(!form.quota_visible());
        assert_eq!(form.count_span(), FULL_SPAN);
        assert!(form.validate(&catalog).is_ok());

        form.set_values(FormValues {
            plan_id: None,
            count: "0".to_string(),
            ..form.values().clone()
        });
        assert!(form.quota_visible());
        assert_eq!(form.count_span(), HALF_SPAN);
        let errors = form.validate(&catalog).unwrap_err();
        let fields: Vec<String> = field_messages(&errors).into_iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["count".to_string(), "quota".to_string()]);
    }

    #[test]
    fn test_reset() {
        let mut form = create_form();
        form.set_name("temp");
        form.set_plan(Some(1));
        form.reset();
        assert_eq!(form.values(), &FormValues::default());
    }
}
