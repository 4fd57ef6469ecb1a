//! Bounded numeric field editor
//!
//! Each field is an integer clamped to its own `[min, max]`. On submit the
//! editor checks the node-count rules across fields, in order:
//!
//! 1. minimum must not exceed maximum
//! 2. desired must lie within `[minimum, maximum]`
//!
//! The first failing rule is kept as the inline error.

use thiserror::Error;

use crate::api::ScaleRequest;

/// What a field means to the cross-field rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    Desired,
    Minimum,
    Maximum,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedField {
    pub label: &'static str,
    pub role: FieldRole,
    value: u32,
    min: u32,
    max: u32,
}

impl BoundedField {
    /// New field; `value` is clamped into `[min, max]`
    pub fn new(label: &'static str, role: FieldRole, value: u32, min: u32, max: u32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            label,
            role,
            value: value.clamp(min, max),
            min,
            max,
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn bounds(&self) -> (u32, u32) {
        (self.min, self.max)
    }

    pub fn set(&mut self, value: u32) {
        self.value = value.clamp(self.min, self.max);
    }

    pub fn increment(&mut self) {
        self.set(self.value.saturating_add(1));
    }

    pub fn decrement(&mut self) {
        self.set(self.value.saturating_sub(1));
    }
}

/// Validation failures, shown inline under the fields
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleError {
    #[error("Minimum nodes cannot exceed maximum nodes")]
    MinAboveMax,

    #[error("Desired nodes must be between minimum and maximum")]
    DesiredOutOfRange,

    #[error("Field {0:?} is missing")]
    MissingField(FieldRole),
}

/// Result of a cancel request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCancel {
    /// An error message was showing and has been dismissed
    ClearedError,
    /// Nothing to dismiss; the caller should leave the view
    Leave,
}

#[derive(Debug, Clone)]
pub struct FieldEditor {
    fields: Vec<BoundedField>,
    selected: usize,
    error: Option<ScaleError>,
}

impl FieldEditor {
    pub fn new(fields: Vec<BoundedField>) -> Self {
        Self {
            fields,
            selected: 0,
            error: None,
        }
    }

    /// Desired / Minimum / Maximum node count editor, every field limited
    /// to `[floor, ceiling]`
    pub fn scaling(desired: u32, min: u32, max: u32, floor: u32, ceiling: u32) -> Self {
        Self::new(vec![
            BoundedField::new("Desired nodes", FieldRole::Desired, desired, floor, ceiling),
            BoundedField::new("Minimum nodes", FieldRole::Minimum, min, floor, ceiling),
            BoundedField::new("Maximum nodes", FieldRole::Maximum, max, floor, ceiling),
        ])
    }

    pub fn fields(&self) -> &[BoundedField] {
        &self.fields
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn error(&self) -> Option<ScaleError> {
        self.error
    }

    pub fn value(&self, role: FieldRole) -> Option<u32> {
        self.fields
            .iter()
            .find(|f| f.role == role)
            .map(BoundedField::value)
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.fields.len() {
            self.selected += 1;
        }
    }

    pub fn increment(&mut self) {
        if let Some(field) = self.fields.get_mut(self.selected) {
            field.increment();
            self.error = None;
        }
    }

    pub fn decrement(&mut self) {
        if let Some(field) = self.fields.get_mut(self.selected) {
            field.decrement();
            self.error = None;
        }
    }

    /// Set a field by role (clamped)
    pub fn set(&mut self, role: FieldRole, value: u32) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.role == role) {
            field.set(value);
            self.error = None;
        }
    }

    /// Check the cross-field rules without touching the inline error
    pub fn validate(&self) -> Result<ScaleRequest, ScaleError> {
        let value = |role| self.value(role).ok_or(ScaleError::MissingField(role));
        let desired = value(FieldRole::Desired)?;
        let min = value(FieldRole::Minimum)?;
        let max = value(FieldRole::Maximum)?;

        if min > max {
            return Err(ScaleError::MinAboveMax);
        }
        if desired < min || desired > max {
            return Err(ScaleError::DesiredOutOfRange);
        }
        Ok(ScaleRequest { desired, min, max })
    }

    /// Validate and keep the first failing rule as the inline error
    pub fn submit(&mut self) -> Result<ScaleRequest, ScaleError> {
        let result = self.validate();
        self.error = result.err();
        result
    }

    pub fn cancel(&mut self) -> EditorCancel {
        if self.error.take().is_some() {
            EditorCancel::ClearedError
        } else {
            EditorCancel::Leave
        }
    }
}
