//! Chart specification value objects
//!
//! A ChartSpec is a declarative, renderer-agnostic description of one chart.
//! It carries plain data (points, bins, slices, grid counts) plus the active
//! theme; it never holds rendering-library objects.

use serde::{Deserialize, Serialize};

use super::record::{AnyField, CategoricalField, NumericField};

/// The closed set of chart kinds the dashboard knows how to describe.
/// Unknown kinds are unrepresentable here; a request carrying an unknown
/// tag is rejected at deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Scatter,
    Histogram,
    Pie,
    Heatmap,
    Bar,
}

/// Dark or light rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    Dark,
    Light,
}

/// Visual theme applied uniformly to every chart in a dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub mode: ThemeMode,
    pub background: String,
    pub paper: String,
    pub text: String,
    pub accent: String,
}

impl Theme {
    /// Dark theme used by the exploration dashboard.
    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            background: "#111111".to_string(),
            paper: "#222222".to_string(),
            text: "#ffffff".to_string(),
            accent: "#aaaaaa".to_string(),
        }
    }

    /// Blue-green light theme used by the prediction dashboard.
    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            background: "#E0F7FA".to_string(),
            paper: "#FFFFFF".to_string(),
            text: "#01579B".to_string(),
            accent: "#00796B".to_string(),
        }
    }
}

/// One hover column: extra values shown on point inspection, not used for
/// layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverSeries {
    pub field: AnyField,
    pub label: String,
    pub values: Vec<String>,
}

/// Histogram counts for one color group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinGroup {
    pub name: String,
    pub counts: Vec<u64>,
}

/// Box-plot style summary attached to histogram specs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// One pie slice: a distinct category value and its row count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub name: String,
    pub count: u64,
}

/// Pre-aggregated bar data, supplied directly by the caller (used for the
/// feature-importance chart).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// The data payload of a chart, tagged by shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartData {
    Points {
        x: Vec<f64>,
        y: Vec<f64>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        color: Option<Vec<String>>,
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        hover: Vec<HoverSeries>,
    },
    Bins {
        edges: Vec<f64>,
        groups: Vec<BinGroup>,
        #[serde(skip_serializing_if = "Option::is_none")]
        box_summary: Option<BoxSummary>,
    },
    Slices {
        slices: Vec<PieSlice>,
    },
    Grid {
        x_edges: Vec<f64>,
        y_edges: Vec<f64>,
        /// counts[yi][xi], row-major by y bucket
        counts: Vec<Vec<u64>>,
    },
    Bars {
        labels: Vec<String>,
        values: Vec<f64>,
    },
}

/// Extra per-chart options (bin count, continuous color scale).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bins: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_scale: Option<String>,
}

/// A fully parameterized chart, ready for any renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub x_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub y_label: Option<String>,
    #[serde(default)]
    pub options: ChartOptions,
    pub theme: Theme,
    pub data: ChartData,
}

/// Field bindings handed to the chart builder. Which entries are required
/// depends on the chart kind.
#[derive(Debug, Clone, Default)]
pub struct FieldBindings {
    pub title: String,
    pub x: Option<NumericField>,
    pub y: Option<NumericField>,
    /// Categorical field sliced by the pie chart.
    pub category: Option<CategoricalField>,
    /// Categorical color encoding for scatter and histogram grouping.
    pub color: Option<CategoricalField>,
    /// Extra columns surfaced on hover.
    pub hover: Vec<AnyField>,
    /// Pre-aggregated data for bar charts.
    pub bars: Option<BarSeries>,
    pub color_scale: Option<String>,
}

impl FieldBindings {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}
