//! Chart canvases for the risk and staffing bar charts.
//!
//! A canvas holds at most one chart instance. Drawing always destroys the
//! instance bound to the canvas before creating its replacement, so repeated
//! draws never stack overlays.

use crate::domain::Staffing;

/// One bar of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: &'static str,
    pub value: f64,
}

/// A rendered bar chart instance.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    /// Unique per instance; a redraw always yields a new id
    pub id: u64,
    pub series: &'static str,
    pub bars: Vec<Bar>,
    /// Fixed y-axis ceiling, or `None` to fit the data
    pub y_max: Option<f64>,
}

/// Slot a chart is drawn into.
#[derive(Debug, Default)]
pub struct ChartCanvas {
    instance: Option<BarChart>,
}

impl ChartCanvas {
    #[must_use]
    pub fn chart(&self) -> Option<&BarChart> {
        self.instance.as_ref()
    }

    fn replace(&mut self, name: &str, chart: Option<BarChart>) {
        if let Some(old) = self.instance.take() {
            tracing::trace!(canvas = name, id = old.id, "Destroying chart");
        }
        self.instance = chart;
    }
}

/// The two canvases of the result panel.
#[derive(Debug, Default)]
pub struct ChartBoard {
    next_id: u64,
    risk: ChartCanvas,
    staffing: ChartCanvas,
}

impl ChartBoard {
    /// Redraw the single-bar readmission risk chart (y-axis 0 to 1).
    pub fn draw_risk(&mut self, probability: f64) {
        let chart = BarChart {
            id: self.allocate_id(),
            series: "Probability",
            bars: vec![Bar {
                label: "Readmission Risk",
                value: probability,
            }],
            y_max: Some(1.0),
        };
        self.risk.replace("risk", Some(chart));
    }

    /// Redraw the staffing chart. With no data the old chart is removed and
    /// nothing replaces it.
    pub fn draw_staffing(&mut self, staffing: Option<&Staffing>) {
        let chart = staffing.map(|s| BarChart {
            id: self.allocate_id(),
            series: "Suggested",
            bars: vec![
                Bar {
                    label: "Beds",
                    value: s.suggested_beds,
                },
                Bar {
                    label: "Nurses",
                    value: s.suggested_nurses,
                },
                Bar {
                    label: "Doctors",
                    value: s.suggested_doctors,
                },
            ],
            y_max: None,
        });
        self.staffing.replace("staffing", chart);
    }

    #[must_use]
    pub fn risk(&self) -> &ChartCanvas {
        &self.risk
    }

    #[must_use]
    pub fn staffing(&self) -> &ChartCanvas {
        &self.staffing
    }

    /// Number of live chart instances across both canvases.
    #[must_use]
    pub fn active_instances(&self) -> usize {
        usize::from(self.risk.instance.is_some()) + usize::from(self.staffing.instance.is_some())
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}
