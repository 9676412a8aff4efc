//! Annotated instances and the instance factory.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use gloss_core::{CoreError, FieldValue, MetaInfo, Record};

use crate::error::AnnotationError;
use crate::export::{ExportedDocument, export};
use crate::synth::AnnotatedType;

impl<R: Record> AnnotatedType<R> {
    /// Create a zero-initialized instance using `R::default()`.
    #[must_use]
    pub fn create(self: &Arc<Self>) -> AnnotatedInstance<R> {
        self.wrap(R::default())
    }

    /// Annotate an existing source record.
    #[must_use]
    pub fn wrap(self: &Arc<Self>, record: R) -> AnnotatedInstance<R> {
        AnnotatedInstance {
            ty: Arc::clone(self),
            inner: record,
        }
    }
}

/// A source record paired with its annotated type.
///
/// Derefs to the source record, so it can be passed anywhere a `&R` or
/// `&mut R` is expected. Dynamic field access goes through the type's
/// forwarding accessors.
pub struct AnnotatedInstance<R: Record> {
    ty: Arc<AnnotatedType<R>>,
    inner: R,
}

impl<R: Record> AnnotatedInstance<R> {
    /// The executing annotated type.
    #[must_use]
    pub const fn annotated_type(&self) -> &Arc<AnnotatedType<R>> {
        &self.ty
    }

    #[must_use]
    pub const fn record(&self) -> &R {
        &self.inner
    }

    #[must_use]
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Read `field` through its forwarding accessor.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownField` if the type exposes no such field.
    pub fn get(&self, field: &str) -> Result<Option<FieldValue>, CoreError> {
        Ok(self.ty.accessor(field)?.read(&self.inner))
    }

    /// Write `field` through its forwarding accessor.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownField`, `CoreError::ReadOnly`, or whatever
    /// the source record's setter rejects the value with.
    pub fn set(&mut self, field: &str, value: Option<FieldValue>) -> Result<(), CoreError> {
        self.ty.accessor(field)?.write(&mut self.inner, value)
    }

    /// Metadata attached to the accessor for `field` on the executing type.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownField` if the type exposes no such field.
    pub fn meta(&self, field: &str) -> Result<&MetaInfo, CoreError> {
        self.ty.meta(field)
    }

    /// Shorthand for [`export`].
    ///
    /// # Errors
    ///
    /// See [`export`].
    pub fn export(&self) -> Result<ExportedDocument, AnnotationError> {
        export(self)
    }
}

impl<R: Record> Deref for AnnotatedInstance<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.inner
    }
}

impl<R: Record> DerefMut for AnnotatedInstance<R> {
    fn deref_mut(&mut self) -> &mut R {
        &mut self.inner
    }
}

impl<R: Record> AsRef<R> for AnnotatedInstance<R> {
    fn as_ref(&self) -> &R {
        &self.inner
    }
}

impl<R: Record> AsMut<R> for AnnotatedInstance<R> {
    fn as_mut(&mut self) -> &mut R {
        &mut self.inner
    }
}

impl<R: Record + Clone> Clone for AnnotatedInstance<R> {
    fn clone(&self) -> Self {
        Self {
            ty: Arc::clone(&self.ty),
            inner: self.inner.clone(),
        }
    }
}

impl<R: Record + fmt::Debug> fmt::Debug for AnnotatedInstance<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotatedInstance")
            .field("type", &self.ty.name())
            .field("inner", &self.inner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::synthesize;
    use chrono::{NaiveDate, NaiveDateTime};
    use gloss_core::Action;
    use gloss_core::catalog::action_catalog;

    fn annotated() -> Arc<AnnotatedType<Action>> {
        Arc::new(synthesize::<Action>(&action_catalog()).unwrap())
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn takes_source(action: &Action) -> i32 {
        action.id()
    }

    #[test]
    fn created_instance_is_zero_initialized() {
        let instance = annotated().create();
        assert_eq!(instance.record(), &Action::default());
    }

    #[test]
    fn instance_substitutes_for_source_record() {
        let mut instance = annotated().create();
        instance.set_id(1234);
        assert_eq!(takes_source(&instance), 1234);
        assert_eq!(instance.get("ID").unwrap(), Some(FieldValue::Int(1234)));
    }

    #[test]
    fn forwarded_write_reads_back_unchanged() {
        let mut instance = annotated().create();
        let value = FieldValue::Timestamp(day(2020, 2, 29));
        instance.set("Scheduled", Some(value.clone())).unwrap();
        assert_eq!(instance.get("Scheduled").unwrap(), Some(value));
        assert_eq!(instance.scheduled(), Some(day(2020, 2, 29)));

        instance.set("Scheduled", None).unwrap();
        assert_eq!(instance.get("Scheduled").unwrap(), None);
    }

    #[test]
    fn derived_field_rejects_writes() {
        let mut instance = annotated().create();
        let err = instance
            .set("HoursRemaining", Some(FieldValue::Real(1.0)))
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::ReadOnly {
                field: "HoursRemaining".into()
            }
        );
    }

    #[test]
    fn rejected_write_leaves_record_untouched() {
        let mut instance = annotated().create();
        instance.set_comment("N/A");
        let err = instance.set("Comment", None).unwrap_err();
        assert!(matches!(err, CoreError::Required { .. }));
        assert_eq!(instance.comment(), "N/A");
    }

    #[test]
    fn metadata_comes_from_executing_type() {
        let instance = annotated().create();
        let meta = instance.meta("Scheduled").unwrap();
        assert_eq!(meta.public_id, 5_000_002);
        assert_eq!(meta.description, "The scheduled date of the action.");
    }

    #[test]
    fn wrap_keeps_existing_values() {
        let mut action = Action::default();
        action.set_comment("kept");
        let instance = annotated().wrap(action.clone());
        assert_eq!(instance.into_inner(), action);
    }
}
