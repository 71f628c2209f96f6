//! Raphi advisory engine
//!
//! Classifies weather readings (temperature, humidity, wind, pressure, solar
//! radiation, cloud cover) into severity buckets with health and activity
//! guidance, and builds the dashboard and map view models that display them.
//!
//! ⚠️ DISCLAIMER:
//! Advisories are general guidance, not medical advice.

pub mod catalog;
pub mod classifier;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod fake_sensor;
pub mod map;
pub mod models;
pub mod thresholds;
pub mod validation;

pub use catalog::MessageCatalog;
pub use classifier::{classify, classify_tag, Classifier};
pub use error::{AdvisoryError, AdvisoryResult};
pub use models::{Advisory, MetricKind, Reading, SeverityBucket};
