//! Form State Holder - the editable draft of a prediction request
//!
//! Every field holds its raw text exactly as entered. No cross-field
//! validation happens here; typed conversion is the job of
//! [`crate::request::normalize`].

use crate::field::FormField;
use std::num::IntErrorKind;
use thiserror::Error;

/// Errors raised while editing a form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The field name does not match any form field
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// The field cannot be adjusted by increments
    #[error("Field '{0}' is not a counter")]
    NotACounter(FormField),
}

/// Raw values of the twelve prediction fields
///
/// # Examples
///
/// ```
/// use roadrisk_domain::{FormField, FormInput};
///
/// let mut form = FormInput::new();
/// assert!(!form.is_complete());
///
/// form.set_field(FormField::RoadType, "rural");
/// assert_eq!(form.get(FormField::RoadType), "rural");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormInput {
    values: [String; FormField::COUNT],
}

impl FormInput {
    /// Create a form with every field empty
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a form pre-filled with the usual starting values
    ///
    /// Two lanes, curvature 0.5, speed limit 60 and no reported accidents;
    /// every choice and flag field stays empty.
    pub fn with_defaults() -> Self {
        let mut form = Self::new();
        form.set_field(FormField::NumLanes, "2");
        form.set_field(FormField::Curvature, "0.5");
        form.set_field(FormField::SpeedLimit, "60");
        form.set_field(FormField::NumReportedAccidents, "0");
        form
    }

    /// Raw value of a field
    pub fn get(&self, field: FormField) -> &str {
        &self.values[field.index()]
    }

    /// Replace one field's raw value
    pub fn set_field(&mut self, field: FormField, raw: impl Into<String>) {
        self.values[field.index()] = raw.into();
    }

    /// Replace one field's raw value, looking the field up by name
    pub fn set_named(&mut self, name: &str, raw: impl Into<String>) -> Result<FormField, FormError> {
        let field = FormField::parse(name).ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        self.set_field(field, raw);
        Ok(field)
    }

    /// Empty one field
    pub fn clear(&mut self, field: FormField) {
        self.values[field.index()].clear();
    }

    /// Empty every field
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Apply `delta` to a counter field, clamping at the field minimum
    ///
    /// An empty or non-numeric current value counts as the minimum, and one
    /// too large for `u32` counts as `u32::MAX`. Returns the new value.
    pub fn adjust_counter(&mut self, field: FormField, delta: i64) -> Result<u32, FormError> {
        let min = field.counter_min().ok_or(FormError::NotACounter(field))?;
        let current = match self.get(field).trim().parse::<u32>() {
            Ok(value) => value,
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => u32::MAX,
            Err(_) => min,
        };
        let next = i64::from(current).saturating_add(delta);
        let next = u32::try_from(next.max(i64::from(min))).unwrap_or(u32::MAX);
        self.set_field(field, next.to_string());
        Ok(next)
    }

    /// Adjust a counter field looked up by name
    pub fn adjust_named(&mut self, name: &str, delta: i64) -> Result<u32, FormError> {
        let field = FormField::parse(name).ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        self.adjust_counter(field, delta)
    }

    /// True iff every field holds a non-empty value
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(|v| !v.is_empty())
    }

    /// Fields that are still empty, in declaration order
    pub fn missing_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|f| self.get(*f).is_empty())
            .collect()
    }

    /// Iterate over `(field, raw value)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> + '_ {
        FormField::ALL.into_iter().map(move |f| (f, self.get(f)))
    }
}
