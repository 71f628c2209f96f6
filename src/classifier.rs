//! Advisory classifier
//!
//! Maps a reading to its severity bucket and advisory message. Classification
//! is pure: it reads only the threshold tables and the catalog it was built
//! with, so a `Classifier` can be shared freely across threads.

use std::sync::OnceLock;

use crate::catalog::MessageCatalog;
use crate::error::{AdvisoryError, AdvisoryResult};
use crate::models::{Advisory, MetricKind, Reading};
use crate::thresholds;

/// Classifier bound to a message catalog
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    catalog: MessageCatalog,
}

impl Classifier {
    pub fn new(catalog: MessageCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    /// Classify a value of the given kind.
    ///
    /// Every finite value resolves to exactly one bucket. NaN and infinities
    /// are rejected with [`AdvisoryError::NonFiniteValue`].
    pub fn classify(&self, kind: MetricKind, value: f64) -> AdvisoryResult<Advisory> {
        if !value.is_finite() {
            return Err(AdvisoryError::NonFiniteValue { kind, value });
        }

        let table = thresholds::table_for(kind);
        let level = table.ordinal(value);
        let bucket = table.buckets[level];

        // Catalogs are validated for completeness on construction
        let message = self
            .catalog
            .message(kind, bucket)
            .ok_or(AdvisoryError::MissingMessage { kind, bucket })?;

        Ok(Advisory {
            kind,
            bucket,
            level,
            message: message.to_string(),
        })
    }

    /// Classify a value given the metric kind's string tag
    pub fn classify_tag(&self, tag: &str, value: f64) -> AdvisoryResult<Advisory> {
        let kind: MetricKind = tag.parse()?;
        self.classify(kind, value)
    }

    pub fn classify_reading(&self, reading: &Reading) -> AdvisoryResult<Advisory> {
        self.classify(reading.kind, reading.value)
    }
}

fn builtin_classifier() -> &'static Classifier {
    static BUILTIN: OnceLock<Classifier> = OnceLock::new();
    BUILTIN.get_or_init(Classifier::default)
}

/// Classify with the built-in catalog
pub fn classify(kind: MetricKind, value: f64) -> AdvisoryResult<Advisory> {
    builtin_classifier().classify(kind, value)
}

/// Classify a tagged value with the built-in catalog
pub fn classify_tag(tag: &str, value: f64) -> AdvisoryResult<Advisory> {
    builtin_classifier().classify_tag(tag, value)
}
