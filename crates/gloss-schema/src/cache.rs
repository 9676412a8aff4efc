//! At-most-once synthesis per (record type, catalog).
//!
//! `synthesize` itself is independent per call. Callers that may ask for the
//! same annotated type repeatedly share one `SynthesisCache`; construction
//! runs under its lock, so a pair is never synthesized twice.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use gloss_core::{Catalog, Record};

use crate::error::AnnotationError;
use crate::synth::{AnnotatedType, synthesize};

type CacheKey = (TypeId, u64);

struct CachedType {
    catalog: Catalog,
    annotated: Arc<dyn Any + Send + Sync>,
}

/// Shared store of synthesized annotated types.
#[derive(Default)]
pub struct SynthesisCache {
    types: Mutex<HashMap<CacheKey, Vec<CachedType>>>,
}

impl SynthesisCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the annotated type for `R` and `catalog`, synthesizing it on
    /// first use. Failed syntheses are not cached.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`synthesize`].
    pub fn get_or_synthesize<R: Record>(
        &self,
        catalog: &Catalog,
    ) -> Result<Arc<AnnotatedType<R>>, AnnotationError> {
        let key = (TypeId::of::<R>(), catalog.fingerprint());
        let mut types = self.types.lock().unwrap_or_else(PoisonError::into_inner);

        let hit = types
            .get(&key)
            .and_then(|bucket| bucket.iter().find(|c| c.catalog == *catalog))
            .and_then(|cached| Arc::clone(&cached.annotated).downcast::<AnnotatedType<R>>().ok());
        if let Some(annotated) = hit {
            tracing::debug!(source = R::TYPE_NAME, "synthesis cache hit");
            return Ok(annotated);
        }

        tracing::debug!(source = R::TYPE_NAME, "synthesis cache miss");
        let annotated = Arc::new(synthesize::<R>(catalog)?);
        types.entry(key).or_default().push(CachedType {
            catalog: catalog.clone(),
            annotated: Arc::clone(&annotated) as Arc<dyn Any + Send + Sync>,
        });
        Ok(annotated)
    }

    /// Number of cached annotated types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(Vec::len)
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[cfg(test)]
    fn bucket_count(&self) -> usize {
        self.types.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}
