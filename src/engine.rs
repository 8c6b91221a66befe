//! The default-fill engine.
//!
//! [`DefaultBox`] borrows a record mutably, looks up the annotation under its
//! tag key for every exported field and coerces the text into the field. The
//! plain [`DefaultBox::fill`] is best effort: fields whose annotation cannot be
//! applied keep their value and nothing is reported. [`DefaultBox::fill_report`]
//! and [`DefaultBox::fill_strict`] run the same fill but expose what happened.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::datatype::{Coercion, FieldValue, Kind};
use crate::error::{DefaultBoxError, Result};
use crate::grammar::Brackets;
use crate::record::{FieldDescriptor, Record};
use crate::settings::Settings;

pub const DEFAULT_TAG_KEY: &str = "default";

lazy_static! {
    static ref TAG_KEY: Regex = Regex::new(r#"^[^\s":]+$"#).unwrap();
}

/// What happened to one field during a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOutcome {
    Filled,
    /// A collection was installed but `rejected` items fell back to zero values or were dropped.
    Partial { rejected: usize },
    NotExported,
    NoAnnotation,
    /// The field type cannot take a default.
    Unsupported,
    /// The annotation did not parse; the field kept its value.
    Malformed,
}

impl FieldOutcome {
    /// Annotated, exported fields whose default was not cleanly applied.
    pub fn is_unresolved(self) -> bool {
        matches!(
            self,
            FieldOutcome::Partial { .. } | FieldOutcome::Unsupported | FieldOutcome::Malformed
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReport {
    pub field: &'static str,
    pub outcome: FieldOutcome,
}

/// Per-field outcomes of one fill, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillReport {
    pub record: &'static str,
    pub fields: Vec<FieldReport>,
}

impl FillReport {
    pub fn outcome(&self, field: &str) -> Option<FieldOutcome> {
        self.fields.iter().find(|r| r.field == field).map(|r| r.outcome)
    }
    pub fn filled(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields
            .iter()
            .filter(|r| matches!(r.outcome, FieldOutcome::Filled | FieldOutcome::Partial { .. }))
            .map(|r| r.field)
    }
    pub fn unresolved(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields
            .iter()
            .filter(|r| r.outcome.is_unresolved())
            .map(|r| r.field)
    }
    pub fn is_clean(&self) -> bool {
        self.unresolved().next().is_none()
    }
    pub fn into_result(self) -> Result<()> {
        let fields: Vec<String> = self.unresolved().map(str::to_string).collect();
        if fields.is_empty() {
            Ok(())
        } else {
            Err(DefaultBoxError::Unresolved { record: self.record, fields })
        }
    }
}

pub struct DefaultBox<'a, R: Record> {
    record: &'a mut R,
    tag_key: String,
    brackets: Brackets,
}

impl<'a, R: Record> DefaultBox<'a, R> {
    pub fn new(record: &'a mut R) -> Self {
        Self {
            record,
            tag_key: DEFAULT_TAG_KEY.to_string(),
            brackets: Brackets::default(),
        }
    }

    pub fn with_settings(record: &'a mut R, settings: &Settings) -> Result<Self> {
        Ok(Self::new(record)
            .with_tag_key(settings.tag_key.clone())?
            .brackets(settings.brackets))
    }

    /// Reads annotations under `key` instead of `default`.
    pub fn with_tag_key(mut self, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(DefaultBoxError::InvalidTagKey { key, reason: "empty" });
        }
        if !TAG_KEY.is_match(&key) {
            return Err(DefaultBoxError::InvalidTagKey {
                key,
                reason: "whitespace, quotes and colons are not allowed",
            });
        }
        self.tag_key = key;
        Ok(self)
    }

    pub fn brackets(mut self, brackets: Brackets) -> Self {
        self.brackets = brackets;
        self
    }

    pub fn tag_key(&self) -> &str {
        &self.tag_key
    }

    /// Annotation text under the configured key for `field`, exported or not.
    pub fn tag(&self, field: &str) -> Option<&'static str> {
        R::field(field)?.annotation(&self.tag_key)
    }

    pub fn fill(&mut self) -> &mut Self {
        self.fill_report();
        self
    }

    /// Same as [`DefaultBox::fill`], then fails if any annotated field was not
    /// cleanly applied. Fields that could be filled are filled either way.
    pub fn fill_strict(&mut self) -> Result<&mut Self> {
        self.fill_report().into_result()?;
        Ok(self)
    }

    pub fn fill_report(&mut self) -> FillReport {
        let tag_key = self.tag_key.as_str();
        let brackets = self.brackets;
        let mut fields = Vec::with_capacity(R::FIELDS.len());
        self.record.visit_fields_mut(&mut |descriptor, slot| {
            let outcome = fill_field(descriptor, slot, tag_key, brackets);
            match outcome {
                FieldOutcome::NotExported | FieldOutcome::NoAnnotation => {
                    trace!(record = R::TYPE_NAME, field = descriptor.name, ?outcome, "field skipped");
                }
                _ => {
                    debug!(
                        record = R::TYPE_NAME,
                        field = descriptor.name,
                        ty = descriptor.type_name,
                        ?outcome,
                        "default evaluated"
                    );
                }
            }
            fields.push(FieldReport { field: descriptor.name, outcome });
        });
        FillReport { record: R::TYPE_NAME, fields }
    }

    pub fn record(&mut self) -> &mut R {
        self.record
    }

    pub fn into_inner(self) -> &'a mut R {
        self.record
    }
}

fn fill_field(
    descriptor: &FieldDescriptor,
    slot: &mut dyn FieldValue,
    tag_key: &str,
    brackets: Brackets,
) -> FieldOutcome {
    if !descriptor.is_exported() {
        return FieldOutcome::NotExported;
    }
    let Some(text) = descriptor.annotation(tag_key) else {
        return FieldOutcome::NoAnnotation;
    };
    // basic types: string, bool, integers, floats, temporal, decimal
    if slot.set_scalar(text) {
        return FieldOutcome::Filled;
    }
    // complex types: sequences, mappings
    let coercion = match slot.kind() {
        Kind::Sequence => slot.set_sequence(text, brackets),
        Kind::Mapping => slot.set_mapping(text, brackets),
        kind if kind.is_scalar() => return FieldOutcome::Malformed,
        _ => return FieldOutcome::Unsupported,
    };
    match coercion {
        Coercion::Applied => FieldOutcome::Filled,
        Coercion::Partial { rejected } => FieldOutcome::Partial { rejected },
        Coercion::Rejected => FieldOutcome::Malformed,
    }
}
