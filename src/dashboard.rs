//! Climate dashboard cards
//!
//! Pairs each reading with its 24h change and the advisory returned by the
//! classifier, producing the text a dashboard card displays.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::MessageCatalog;
use crate::classifier::Classifier;
use crate::error::{AdvisoryError, AdvisoryResult};
use crate::map::{MapState, PollutantReading};
use crate::models::{Advisory, MetricKind, Reading};

/// Window the change figures refer to
pub const CHANGE_WINDOW: &str = "24h";

/// A reading together with its change over the last window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendReading {
    pub reading: Reading,
    pub delta: f64,
}

impl TrendReading {
    pub fn new(kind: MetricKind, value: f64, delta: f64) -> Self {
        Self {
            reading: Reading::new(kind, value),
            delta,
        }
    }
}

/// Direction of a reading's change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Steady,
}

impl Trend {
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            Trend::Up
        } else if delta < 0.0 {
            Trend::Down
        } else {
            Trend::Steady
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
            Trend::Steady => "→",
        }
    }
}

/// Metric plotted by the 24h history chart
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartTab {
    #[default]
    #[serde(rename = "temperatura")]
    Temperature,
    #[serde(rename = "humedad")]
    Humidity,
    #[serde(rename = "viento")]
    Wind,
}

impl ChartTab {
    pub const ALL: [ChartTab; 3] = [ChartTab::Temperature, ChartTab::Humidity, ChartTab::Wind];

    pub fn kind(&self) -> MetricKind {
        match self {
            ChartTab::Temperature => MetricKind::Temperature,
            ChartTab::Humidity => MetricKind::Humidity,
            ChartTab::Wind => MetricKind::WindSpeed,
        }
    }

    /// Tab showing `kind`, if the chart offers one
    pub fn for_kind(kind: MetricKind) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.kind() == kind)
    }

    /// Chart heading, e.g. `Temperatura (Últimas 24h)`
    pub fn title(&self, catalog: &MessageCatalog) -> String {
        format!("{} (Últimas {})", catalog.label(self.kind()), CHANGE_WINDOW)
    }
}

/// Everything one dashboard card renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCard {
    pub kind: MetricKind,
    pub label: String,
    pub value_text: String,
    pub change_text: String,
    pub trend: Trend,
    pub advisory: Advisory,
}

impl MetricCard {
    pub fn build(classifier: &Classifier, input: &TrendReading) -> AdvisoryResult<Self> {
        let reading = input.reading;
        let advisory = classifier.classify_reading(&reading)?;

        if !input.delta.is_finite() {
            return Err(AdvisoryError::NonFiniteDelta {
                kind: reading.kind,
                delta: input.delta,
            });
        }

        Ok(Self {
            kind: reading.kind,
            label: classifier.catalog().label(reading.kind).to_string(),
            value_text: reading.kind.format_value(reading.value),
            change_text: change_text(reading.kind, input.delta),
            trend: Trend::from_delta(input.delta),
            advisory,
        })
    }
}

/// Signed change with unit and window, e.g. `+2°C (24h)`
pub fn change_text(kind: MetricKind, delta: f64) -> String {
    let signed = if delta == 0.0 {
        "±0".to_string()
    } else {
        format!("{:+}", delta)
    };

    match kind {
        MetricKind::Temperature | MetricKind::Humidity | MetricKind::CloudCover => {
            format!("{}{} ({})", signed, kind.unit(), CHANGE_WINDOW)
        }
        _ => format!("{} {} ({})", signed, kind.unit(), CHANGE_WINDOW),
    }
}

/// Build one card per reading, failing on the first unclassifiable one
pub fn build_cards(
    classifier: &Classifier,
    readings: &[TrendReading],
) -> AdvisoryResult<Vec<MetricCard>> {
    let cards = readings
        .iter()
        .map(|reading| MetricCard::build(classifier, reading))
        .collect::<AdvisoryResult<Vec<_>>>()?;

    debug!(cards = cards.len(), "Dashboard cards built");
    Ok(cards)
}

/// Complete view model handed to the presentation shell
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub locale: String,
    pub cards: Vec<MetricCard>,
    pub chart: ChartTab,
    pub chart_title: String,
    pub map: MapState,
    pub pollutants: Vec<PollutantReading>,
}

impl DashboardSnapshot {
    pub fn build(
        classifier: &Classifier,
        readings: &[TrendReading],
        map: MapState,
        pollutants: Vec<PollutantReading>,
    ) -> AdvisoryResult<Self> {
        let cards = build_cards(classifier, readings)?;
        let snapshot = Self {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            locale: classifier.catalog().locale().to_string(),
            cards,
            chart: ChartTab::default(),
            chart_title: ChartTab::default().title(classifier.catalog()),
            map,
            pollutants,
        };

        info!(
            snapshot_id = %snapshot.id,
            locale = %snapshot.locale,
            cards = snapshot.cards.len(),
            "Dashboard snapshot generated"
        );

        Ok(snapshot)
    }

    /// Switch the history chart to another tab
    pub fn select_chart(&mut self, catalog: &MessageCatalog, tab: ChartTab) {
        debug!(snapshot_id = %self.id, tab = ?tab, "Chart tab selected");
        self.chart = tab;
        self.chart_title = tab.title(catalog);
    }

    /// Card of the metric the chart currently plots
    pub fn chart_card(&self) -> Option<&MetricCard> {
        self.cards.iter().find(|card| card.kind == self.chart.kind())
    }

    /// Cards whose advisory sits in the top bucket of their kind
    pub fn top_severity_cards(&self) -> Vec<&MetricCard> {
        self.cards
            .iter()
            .filter(|card| card.advisory.level + 1 == card.kind.buckets().len())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake_sensor::static_readings;
    use crate::map::sidebar_readings;
    use crate::models::SeverityBucket;

    #[test]
    fn test_trend_from_delta() {
        assert_eq!(Trend::from_delta(2.0), Trend::Up);
        assert_eq!(Trend::from_delta(-0.1), Trend::Down);
        assert_eq!(Trend::from_delta(0.0), Trend::Steady);
        assert_eq!(Trend::Down.arrow(), "↓");
    }

    #[test]
    fn test_change_text() {
        assert_eq!(change_text(MetricKind::Temperature, 2.0), "+2°C (24h)");
        assert_eq!(change_text(MetricKind::Humidity, -5.0), "-5% (24h)");
        assert_eq!(change_text(MetricKind::WindSpeed, 3.0), "+3 km/h (24h)");
        assert_eq!(change_text(MetricKind::SolarRadiation, 50.0), "+50 W/m² (24h)");
        assert_eq!(change_text(MetricKind::Pressure, 0.0), "±0 hPa (24h)");
    }

    #[test]
    fn test_static_dashboard_cards() {
        let classifier = Classifier::default();
        let cards = build_cards(&classifier, &static_readings()).unwrap();

        assert_eq!(cards.len(), 6);

        let temperature = &cards[0];
        assert_eq!(temperature.label, "Temperatura");
        assert_eq!(temperature.value_text, "25°C");
        assert_eq!(temperature.change_text, "+2°C (24h)");
        assert_eq!(temperature.trend, Trend::Up);
        assert_eq!(temperature.advisory.bucket, SeverityBucket::Warm);

        let pressure = &cards[3];
        assert_eq!(pressure.value_text, "1012 hPa");
        assert_eq!(pressure.trend, Trend::Down);
        assert_eq!(
            pressure.advisory.message,
            "Presión normal-baja. Condiciones meteorológicas estables."
        );
    }

    #[test]
    fn test_build_cards_fails_fast() {
        let classifier = Classifier::default();
        let readings = [
            TrendReading::new(MetricKind::Temperature, 21.0, 0.0),
            TrendReading::new(MetricKind::Humidity, f64::NAN, 1.0),
        ];

        let result = build_cards(&classifier, &readings);
        assert!(matches!(result, Err(AdvisoryError::NonFiniteValue { .. })));
    }

    #[test]
    fn test_non_finite_delta_rejected() {
        let classifier = Classifier::default();

        for delta in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let readings = [TrendReading::new(MetricKind::Temperature, 21.0, delta)];
            let result = build_cards(&classifier, &readings);
            assert!(matches!(
                result,
                Err(AdvisoryError::NonFiniteDelta { kind: MetricKind::Temperature, .. })
            ));
        }
    }

    #[test]
    fn test_snapshot() {
        let classifier = Classifier::default();
        let snapshot = DashboardSnapshot::build(
            &classifier,
            &static_readings(),
            MapState::default(),
            sidebar_readings(),
        )
        .unwrap();

        assert_eq!(snapshot.locale, "es");
        assert_eq!(snapshot.cards.len(), 6);
        assert_eq!(snapshot.pollutants.len(), 6);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["cards"][1]["advisory"]["bucket"], "moderateHigh");
        assert_eq!(json["cards"][2]["kind"], "wind");
        assert_eq!(json["map"]["pollutant"], "NO2");
    }

    #[test]
    fn test_chart_tabs() {
        let catalog = MessageCatalog::builtin();
        let titles: Vec<String> = ChartTab::ALL.iter().map(|tab| tab.title(&catalog)).collect();

        assert_eq!(
            titles,
            vec![
                "Temperatura (Últimas 24h)",
                "Humedad (Últimas 24h)",
                "Viento (Últimas 24h)",
            ]
        );
        assert_eq!(ChartTab::for_kind(MetricKind::WindSpeed), Some(ChartTab::Wind));
        assert_eq!(ChartTab::for_kind(MetricKind::Pressure), None);
        assert_eq!(serde_json::to_string(&ChartTab::Humidity).unwrap(), "\"humedad\"");
    }

    #[test]
    fn test_snapshot_chart_selection() {
        let classifier = Classifier::default();
        let mut snapshot = DashboardSnapshot::build(
            &classifier,
            &static_readings(),
            MapState::default(),
            Vec::new(),
        )
        .unwrap();

        assert_eq!(snapshot.chart, ChartTab::Temperature);
        assert_eq!(snapshot.chart_title, "Temperatura (Últimas 24h)");
        assert_eq!(snapshot.chart_card().unwrap().value_text, "25°C");

        snapshot.select_chart(classifier.catalog(), ChartTab::Wind);
        assert_eq!(snapshot.chart_title, "Viento (Últimas 24h)");
        assert_eq!(snapshot.chart_card().unwrap().value_text, "15 km/h");

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["chart"], "viento");
    }

    #[test]
    fn test_top_severity_cards() {
        let classifier = Classifier::default();
        let readings = [
            TrendReading::new(MetricKind::Temperature, 35.0, 1.0),
            TrendReading::new(MetricKind::WindSpeed, 5.0, 0.0),
            TrendReading::new(MetricKind::CloudCover, 90.0, -3.0),
        ];
        let snapshot =
            DashboardSnapshot::build(&classifier, &readings, MapState::default(), Vec::new())
                .unwrap();

        let top: Vec<MetricKind> = snapshot.top_severity_cards().iter().map(|c| c.kind).collect();
        assert_eq!(top, vec![MetricKind::Temperature, MetricKind::CloudCover]);
    }
}
