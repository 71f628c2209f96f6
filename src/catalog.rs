//! Advisory message catalog
//!
//! Advisory text is kept apart from the threshold logic in a table keyed by
//! `(MetricKind, SeverityBucket)`. The built-in catalog carries the Spanish
//! guidance shipped with the product; other locales are loaded from JSON.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{AdvisoryError, AdvisoryResult};
use crate::models::{MetricKind, SeverityBucket};

/// Locale tag of the built-in catalog
pub const BUILTIN_LOCALE: &str = "es";

/// Localized labels and advisory messages
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    locale: String,
    labels: HashMap<MetricKind, String>,
    messages: HashMap<(MetricKind, SeverityBucket), String>,
}

/// On-disk JSON form of a catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub locale: String,
    #[serde(default)]
    pub labels: BTreeMap<MetricKind, String>,
    pub messages: BTreeMap<MetricKind, HashMap<SeverityBucket, String>>,
}

impl MessageCatalog {
    /// The Spanish catalog bundled with the crate
    pub fn builtin() -> Self {
        let labels = MetricKind::ALL
            .iter()
            .map(|kind| (*kind, builtin_label(*kind).to_string()))
            .collect();

        let messages = MetricKind::ALL
            .iter()
            .flat_map(|kind| {
                builtin_messages(*kind)
                    .iter()
                    .map(move |(bucket, text)| ((*kind, *bucket), text.to_string()))
            })
            .collect();

        Self {
            locale: BUILTIN_LOCALE.to_string(),
            labels,
            messages,
        }
    }

    /// Build a catalog from a parsed document, checking it covers every bucket
    pub fn from_document(document: CatalogDocument) -> AdvisoryResult<Self> {
        let mut messages = HashMap::new();

        for (kind, by_bucket) in document.messages {
            for (bucket, text) in by_bucket {
                if kind.ordinal_of(bucket).is_none() {
                    warn!(kind = %kind, bucket = %bucket, "Catalog bucket not used by kind");
                    return Err(AdvisoryError::UnexpectedBucket { kind, bucket });
                }
                messages.insert((kind, bucket), text);
            }
        }

        for kind in MetricKind::ALL {
            for bucket in kind.buckets() {
                if !messages.contains_key(&(kind, *bucket)) {
                    warn!(kind = %kind, bucket = %bucket, "Catalog is missing a message");
                    return Err(AdvisoryError::MissingMessage {
                        kind,
                        bucket: *bucket,
                    });
                }
            }
        }

        let labels = MetricKind::ALL
            .iter()
            .map(|kind| {
                let label = document
                    .labels
                    .get(kind)
                    .cloned()
                    .unwrap_or_else(|| builtin_label(*kind).to_string());
                (*kind, label)
            })
            .collect();

        debug!(locale = %document.locale, entries = messages.len(), "Catalog validated");

        Ok(Self {
            locale: document.locale,
            labels,
            messages,
        })
    }

    /// Parse and validate a catalog from a JSON string
    pub fn from_json(json: &str) -> AdvisoryResult<Self> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// Load and validate a catalog from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> AdvisoryResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;

        info!(
            path = %path.display(),
            locale = %catalog.locale,
            "Loaded advisory catalog"
        );

        Ok(catalog)
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Display label of a metric kind
    pub fn label(&self, kind: MetricKind) -> &str {
        self.labels
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| builtin_label(kind))
    }

    /// Advisory text for a bucket of a kind
    pub fn message(&self, kind: MetricKind, bucket: SeverityBucket) -> Option<&str> {
        self.messages.get(&(kind, bucket)).map(String::as_str)
    }

    /// Export the catalog in its JSON document form, e.g. as a translation template
    pub fn to_document(&self) -> CatalogDocument {
        let mut messages: BTreeMap<MetricKind, HashMap<SeverityBucket, String>> = BTreeMap::new();
        for ((kind, bucket), text) in &self.messages {
            messages.entry(*kind).or_default().insert(*bucket, text.clone());
        }

        CatalogDocument {
            locale: self.locale.clone(),
            labels: self.labels.iter().map(|(k, v)| (*k, v.clone())).collect(),
            messages,
        }
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_label(kind: MetricKind) -> &'static str {
    match kind {
        MetricKind::Temperature => "Temperatura",
        MetricKind::Humidity => "Humedad",
        MetricKind::WindSpeed => "Viento",
        MetricKind::Pressure => "Presión",
        MetricKind::SolarRadiation => "Radiación Solar",
        MetricKind::CloudCover => "Nubosidad",
    }
}

/// Built-in advice for each of the kind's buckets, lowest intensity first
fn builtin_messages(kind: MetricKind) -> &'static [(SeverityBucket, &'static str)] {
    use SeverityBucket as B;

    match kind {
        MetricKind::Temperature => &[
            (B::Low, "Temperatura baja. Usa ropa abrigada y protege las extremidades del frío."),
            (B::Mild, "Temperatura fresca. Se recomienda ropa ligera de manga larga."),
            (B::Comfortable, "Temperatura agradable. Perfecto para actividades al aire libre."),
            (B::Warm, "Temperatura cálida. Usa protector solar y mantente hidratado."),
            (
                B::Hot,
                "Temperatura alta. Evita exposición prolongada al sol, usa protector solar SPF 50+ y bebe mucha agua.",
            ),
        ],
        MetricKind::Humidity => &[
            (B::Low, "Humedad baja. Hidrata tu piel y bebe suficiente agua."),
            (
                B::Comfortable,
                "Humedad confortable. Condiciones ideales para la mayoría de actividades.",
            ),
            (
                B::ModerateHigh,
                "Humedad moderada-alta. Puede sentirse más caluroso de lo que indica la temperatura.",
            ),
            (B::High, "Humedad alta. Evita ejercicio intenso, la sensación térmica será mayor."),
        ],
        MetricKind::WindSpeed => &[
            (B::Soft, "Viento suave. Condiciones tranquilas para actividades al aire libre."),
            (B::Moderate, "Viento moderado. Puede dificultar algunas actividades al aire libre."),
            (B::Strong, "Viento fuerte. Ten precaución con objetos sueltos y paraguas."),
            (
                B::VeryStrong,
                "Viento muy fuerte. Evita actividades al aire libre y asegura objetos.",
            ),
        ],
        MetricKind::Pressure => &[
            (B::Low, "Presión baja. Posible clima inestable, prepárate para cambios."),
            (B::NormalLow, "Presión normal-baja. Condiciones meteorológicas estables."),
            (B::Normal, "Presión normal. Clima estable y agradable."),
            (B::High, "Presión alta. Cielos despejados y clima estable esperado."),
        ],
        MetricKind::SolarRadiation => &[
            (B::Low, "Radiación baja. Puedes estar al aire libre sin mucha protección."),
            (
                B::Moderate,
                "Radiación moderada. Usa protector solar si estarás expuesto más de 30 minutos.",
            ),
            (B::High, "Radiación alta. Usa protector solar SPF 30+, sombrero y gafas de sol."),
            (
                B::VeryHigh,
                "Radiación muy alta. Protección máxima: protector solar SPF 50+, sombrero, gafas y busca sombra.",
            ),
        ],
        MetricKind::CloudCover => &[
            (B::Clear, "Cielo despejado. Excelente visibilidad, usa protección solar."),
            (
                B::PartlyCloudy,
                "Parcialmente nublado. Buenas condiciones, pero sigue usando protección solar.",
            ),
            (B::MostlyCloudy, "Mayormente nublado. Protección solar moderada aún recomendada."),
            (B::Overcast, "Muy nublado. Poca radiación solar directa, puede haber precipitación."),
        ],
    }
}
