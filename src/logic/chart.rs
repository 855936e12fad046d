//! Chart spec builder
//!
//! Turns a filtered view plus field bindings into a declarative ChartSpec.
//! One build arm per chart kind; the kind set is a closed enum so the
//! dispatch is checked exhaustively at compile time. Builders never fail on
//! well-typed input: an empty view produces an empty (but valid) spec.

use thiserror::Error;

use crate::logic::filter::FilteredView;
use crate::models::{
    AnyField, BarSeries, BinGroup, BoxSummary, CategoricalField, ChartData, ChartKind,
    ChartOptions, ChartSpec, FieldBindings, HoverSeries, NumericField, PieSlice, Theme,
};

/// Fixed bin count for histograms.
pub const HISTOGRAM_BINS: usize = 20;
/// Bin count per axis for density heatmaps.
pub const HEATMAP_BINS: usize = 20;

/// Raised when a chart kind is requested without the bindings it needs.
/// This is a wiring bug, not a data condition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChartError {
    #[error("{kind:?} chart requires a {binding} binding")]
    MissingBinding {
        kind: ChartKind,
        binding: &'static str,
    },
}

/// Build a fully parameterized chart spec for `kind` over `view`.
pub fn build(
    kind: ChartKind,
    view: &FilteredView<'_>,
    bindings: &FieldBindings,
    theme: &Theme,
) -> Result<ChartSpec, ChartError> {
    let data = match kind {
        ChartKind::Scatter => build_scatter(view, bindings)?,
        ChartKind::Histogram => build_histogram(view, bindings)?,
        ChartKind::Pie => build_pie(view, bindings)?,
        ChartKind::Heatmap => build_heatmap(view, bindings)?,
        ChartKind::Bar => build_bar(bindings)?,
    };

    let (x_label, y_label) = axis_labels(kind, bindings);
    let bins = match kind {
        ChartKind::Histogram => Some(HISTOGRAM_BINS),
        ChartKind::Heatmap => Some(HEATMAP_BINS),
        _ => None,
    };

    Ok(ChartSpec {
        kind,
        title: bindings.title.clone(),
        x_label,
        y_label,
        options: ChartOptions {
            bins,
            color_scale: bindings.color_scale.clone(),
        },
        theme: theme.clone(),
        data,
    })
}

fn axis_labels(kind: ChartKind, bindings: &FieldBindings) -> (Option<String>, Option<String>) {
    match kind {
        ChartKind::Pie | ChartKind::Bar => (None, None),
        _ => (
            bindings.x.map(|f| f.label().to_string()),
            bindings.y.map(|f| f.label().to_string()),
        ),
    }
}

fn require<T: Copy>(
    value: Option<T>,
    kind: ChartKind,
    binding: &'static str,
) -> Result<T, ChartError> {
    value.ok_or(ChartError::MissingBinding { kind, binding })
}

fn build_scatter(
    view: &FilteredView<'_>,
    bindings: &FieldBindings,
) -> Result<ChartData, ChartError> {
    let x_field = require(bindings.x, ChartKind::Scatter, "x")?;
    let y_field = require(bindings.y, ChartKind::Scatter, "y")?;

    let x = view.iter().map(|r| r.numeric(x_field)).collect();
    let y = view.iter().map(|r| r.numeric(y_field)).collect();
    let color = bindings
        .color
        .map(|field| view.iter().map(|r| r.categorical(field)).collect());
    let hover = bindings
        .hover
        .iter()
        .map(|&field| HoverSeries {
            field,
            label: field.label().to_string(),
            values: view.iter().map(|r| r.display(field)).collect(),
        })
        .collect();

    Ok(ChartData::Points { x, y, color, hover })
}

fn build_histogram(
    view: &FilteredView<'_>,
    bindings: &FieldBindings,
) -> Result<ChartData, ChartError> {
    let x_field = require(bindings.x, ChartKind::Histogram, "x")?;

    let values: Vec<f64> = view.iter().map(|r| r.numeric(x_field)).collect();
    if values.is_empty() {
        return Ok(ChartData::Bins {
            edges: Vec::new(),
            groups: Vec::new(),
            box_summary: None,
        });
    }

    let (min, max) = min_max(&values);
    let edges = bin_edges(min, max, HISTOGRAM_BINS);

    // shared edges, one count row per color group (or a single "all" group)
    let groups = match bindings.color {
        Some(color_field) => grouped_counts(view, x_field, color_field, min, max),
        None => {
            let mut counts = vec![0u64; HISTOGRAM_BINS];
            for &v in &values {
                counts[bin_index(v, min, max, HISTOGRAM_BINS)] += 1;
            }
            vec![BinGroup {
                name: "all".to_string(),
                counts,
            }]
        }
    };

    Ok(ChartData::Bins {
        edges,
        groups,
        box_summary: Some(box_summary(values)),
    })
}

fn grouped_counts(
    view: &FilteredView<'_>,
    x_field: NumericField,
    color_field: CategoricalField,
    min: f64,
    max: f64,
) -> Vec<BinGroup> {
    let mut groups: Vec<BinGroup> = Vec::new();
    for record in view.iter() {
        let name = record.categorical(color_field);
        let idx = bin_index(record.numeric(x_field), min, max, HISTOGRAM_BINS);
        match groups.iter_mut().find(|g| g.name == name) {
            Some(group) => group.counts[idx] += 1,
            None => {
                let mut counts = vec![0u64; HISTOGRAM_BINS];
                counts[idx] += 1;
                groups.push(BinGroup { name, counts });
            }
        }
    }
    groups
}

fn build_pie(view: &FilteredView<'_>, bindings: &FieldBindings) -> Result<ChartData, ChartError> {
    let field = require(bindings.category, ChartKind::Pie, "category")?;

    let mut slices: Vec<PieSlice> = Vec::new();
    for record in view.iter() {
        let name = record.categorical(field);
        match slices.iter_mut().find(|s| s.name == name) {
            Some(slice) => slice.count += 1,
            None => slices.push(PieSlice { name, count: 1 }),
        }
    }

    Ok(ChartData::Slices { slices })
}

fn build_heatmap(
    view: &FilteredView<'_>,
    bindings: &FieldBindings,
) -> Result<ChartData, ChartError> {
    let x_field = require(bindings.x, ChartKind::Heatmap, "x")?;
    let y_field = require(bindings.y, ChartKind::Heatmap, "y")?;

    if view.is_empty() {
        return Ok(ChartData::Grid {
            x_edges: Vec::new(),
            y_edges: Vec::new(),
            counts: Vec::new(),
        });
    }

    let xs: Vec<f64> = view.iter().map(|r| r.numeric(x_field)).collect();
    let ys: Vec<f64> = view.iter().map(|r| r.numeric(y_field)).collect();
    let (x_min, x_max) = min_max(&xs);
    let (y_min, y_max) = min_max(&ys);

    let mut counts = vec![vec![0u64; HEATMAP_BINS]; HEATMAP_BINS];
    for (&x, &y) in xs.iter().zip(&ys) {
        let xi = bin_index(x, x_min, x_max, HEATMAP_BINS);
        let yi = bin_index(y, y_min, y_max, HEATMAP_BINS);
        counts[yi][xi] += 1;
    }

    Ok(ChartData::Grid {
        x_edges: bin_edges(x_min, x_max, HEATMAP_BINS),
        y_edges: bin_edges(y_min, y_max, HEATMAP_BINS),
        counts,
    })
}

fn build_bar(bindings: &FieldBindings) -> Result<ChartData, ChartError> {
    let series = bindings
        .bars
        .as_ref()
        .ok_or(ChartError::MissingBinding {
            kind: ChartKind::Bar,
            binding: "bars",
        })?;
    Ok(ChartData::Bars {
        labels: series.labels.clone(),
        values: series.values.clone(),
    })
}

fn min_max(values: &[f64]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }
    (min, max)
}

fn bin_edges(min: f64, max: f64, bins: usize) -> Vec<f64> {
    let width = (max - min) / bins as f64;
    (0..=bins).map(|i| min + width * i as f64).collect()
}

/// Map a value into [0, bins). Values at the upper bound land in the last
/// bin; a degenerate range puts everything in bin 0.
fn bin_index(value: f64, min: f64, max: f64, bins: usize) -> usize {
    let width = (max - min) / bins as f64;
    if width <= 0.0 {
        return 0;
    }
    (((value - min) / width) as usize).min(bins - 1)
}

fn box_summary(mut values: Vec<f64>) -> BoxSummary {
    values.sort_by(|a, b| a.total_cmp(b));
    BoxSummary {
        min: values[0],
        q1: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q3: quantile(&values, 0.75),
        max: values[values.len() - 1],
    }
}

/// Linear-interpolated quantile over sorted values.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// The five exploration-dashboard charts, built from one filtered view.
pub fn explore_charts(
    view: &FilteredView<'_>,
    theme: &Theme,
) -> Result<Vec<ChartSpec>, ChartError> {
    let hover = vec![
        AnyField::Categorical(CategoricalField::LoanStatus),
        AnyField::Numeric(NumericField::LoanAmount),
    ];

    let age = FieldBindings {
        x: Some(NumericField::Age),
        y: Some(NumericField::InterestRate),
        color: Some(CategoricalField::LoanGrade),
        hover: hover.clone(),
        ..FieldBindings::titled("Loan Interest Rate by Age")
    };

    let income = FieldBindings {
        x: Some(NumericField::Income),
        y: Some(NumericField::InterestRate),
        color: Some(CategoricalField::LoanGrade),
        hover,
        ..FieldBindings::titled("Loan Interest Rate by Income")
    };

    let credit = FieldBindings {
        x: Some(NumericField::CreditHistoryLength),
        y: Some(NumericField::InterestRate),
        color: Some(CategoricalField::LoanStatus),
        ..FieldBindings::titled("Interest Rate vs Credit History Length")
    };

    let heatmap = FieldBindings {
        x: Some(NumericField::Income),
        y: Some(NumericField::LoanAmount),
        color_scale: Some("Viridis".to_string()),
        ..FieldBindings::titled("Loan Amount vs Income Heatmap")
    };

    let pie = FieldBindings {
        category: Some(CategoricalField::LoanStatus),
        color_scale: Some("RdBu".to_string()),
        ..FieldBindings::titled("Loan Status Distribution")
    };

    Ok(vec![
        build(ChartKind::Scatter, view, &age, theme)?,
        build(ChartKind::Scatter, view, &income, theme)?,
        build(ChartKind::Scatter, view, &credit, theme)?,
        build(ChartKind::Heatmap, view, &heatmap, theme)?,
        build(ChartKind::Pie, view, &pie, theme)?,
    ])
}

/// Bar chart of permutation-importance scores.
pub fn importance_chart(series: BarSeries, theme: &Theme) -> Result<ChartSpec, ChartError> {
    let bindings = FieldBindings {
        bars: Some(series),
        ..FieldBindings::titled("Feature Importance")
    };
    // bar kind never touches the view
    let empty = FilteredView::empty();
    build(ChartKind::Bar, &empty, &bindings, theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::dataset::Dataset;
    use crate::logic::filter;
    use crate::models::{FilterCriteria, Record};

    fn record(income: f64, rate: f64, status: u8, grade: &str) -> Record {
        Record {
            age: 30,
            income,
            home_ownership: "RENT".to_string(),
            loan_intent: "PERSONAL".to_string(),
            grade: grade.to_string(),
            loan_amount: 12_000.0,
            interest_rate: rate,
            credit_history_length: 4,
            loan_status: status,
        }
    }

    fn view_of(records: Vec<Record>) -> (Dataset, Theme) {
        (
            Dataset::from_records(records, "test").unwrap(),
            Theme::dark(),
        )
    }

    #[test]
    fn pie_slice_counts_sum_to_view_length() {
        let (ds, theme) = view_of(vec![
            record(40_000.0, 10.0, 0, "A"),
            record(50_000.0, 11.0, 1, "B"),
            record(60_000.0, 12.0, 0, "A"),
            record(70_000.0, 13.0, 1, "C"),
            record(80_000.0, 14.0, 1, "B"),
        ]);
        let view = filter::apply(&ds, &FilterCriteria::new());
        let bindings = FieldBindings {
            category: Some(CategoricalField::LoanStatus),
            ..FieldBindings::titled("Loan Status Distribution")
        };

        let spec = build(ChartKind::Pie, &view, &bindings, &theme).unwrap();
        let ChartData::Slices { slices } = spec.data else {
            panic!("expected slices");
        };
        let total: u64 = slices.iter().map(|s| s.count).sum();
        assert_eq!(total as usize, view.len());
        assert_eq!(slices.len(), 2);
    }

    #[test]
    fn heatmap_identical_points_share_one_cell() {
        let (ds, theme) = view_of(vec![
            record(50_000.0, 10.0, 0, "A"),
            record(50_000.0, 10.0, 0, "A"),
        ]);
        let view = filter::apply(&ds, &FilterCriteria::new());
        let bindings = FieldBindings {
            x: Some(NumericField::Income),
            y: Some(NumericField::LoanAmount),
            ..FieldBindings::titled("density")
        };

        let spec = build(ChartKind::Heatmap, &view, &bindings, &theme).unwrap();
        let ChartData::Grid { counts, .. } = spec.data else {
            panic!("expected grid");
        };

        let mut nonzero = Vec::new();
        for row in &counts {
            for &c in row {
                if c > 0 {
                    nonzero.push(c);
                }
            }
        }
        assert_eq!(nonzero, vec![2]);
    }

    #[test]
    fn histogram_has_fixed_bins_and_box_summary() {
        let records = (0..100)
            .map(|i| record(10_000.0 + 1_000.0 * i as f64, 10.0, 0, "A"))
            .collect();
        let (ds, theme) = view_of(records);
        let view = filter::apply(&ds, &FilterCriteria::new());
        let bindings = FieldBindings {
            x: Some(NumericField::Income),
            ..FieldBindings::titled("Income Distribution")
        };

        let spec = build(ChartKind::Histogram, &view, &bindings, &theme).unwrap();
        assert_eq!(spec.options.bins, Some(HISTOGRAM_BINS));
        let ChartData::Bins {
            edges,
            groups,
            box_summary,
        } = spec.data
        else {
            panic!("expected bins");
        };

        assert_eq!(edges.len(), HISTOGRAM_BINS + 1);
        assert_eq!(groups.len(), 1);
        let total: u64 = groups[0].counts.iter().sum();
        assert_eq!(total as usize, view.len());

        let summary = box_summary.unwrap();
        assert_eq!(summary.min, 10_000.0);
        assert_eq!(summary.max, 109_000.0);
        assert_eq!(summary.median, 59_500.0);
    }

    #[test]
    fn histogram_groups_by_color_field() {
        let (ds, theme) = view_of(vec![
            record(40_000.0, 10.0, 0, "A"),
            record(50_000.0, 11.0, 1, "B"),
            record(60_000.0, 12.0, 0, "A"),
        ]);
        let view = filter::apply(&ds, &FilterCriteria::new());
        let bindings = FieldBindings {
            x: Some(NumericField::Income),
            color: Some(CategoricalField::LoanGrade),
            ..FieldBindings::titled("by grade")
        };

        let spec = build(ChartKind::Histogram, &view, &bindings, &theme).unwrap();
        let ChartData::Bins { groups, .. } = spec.data else {
            panic!("expected bins");
        };
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        let total: u64 = groups.iter().flat_map(|g| &g.counts).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn scatter_requires_both_axes() {
        let (ds, theme) = view_of(vec![record(40_000.0, 10.0, 0, "A")]);
        let view = filter::apply(&ds, &FilterCriteria::new());
        let bindings = FieldBindings {
            x: Some(NumericField::Income),
            ..FieldBindings::titled("incomplete")
        };

        let err = build(ChartKind::Scatter, &view, &bindings, &theme).unwrap_err();
        assert_eq!(
            err,
            ChartError::MissingBinding {
                kind: ChartKind::Scatter,
                binding: "y"
            }
        );
    }

    #[test]
    fn scatter_carries_color_and_hover() {
        let (ds, theme) = view_of(vec![
            record(40_000.0, 10.0, 0, "A"),
            record(50_000.0, 11.0, 1, "B"),
        ]);
        let view = filter::apply(&ds, &FilterCriteria::new());
        let bindings = FieldBindings {
            x: Some(NumericField::Income),
            y: Some(NumericField::InterestRate),
            color: Some(CategoricalField::LoanGrade),
            hover: vec![AnyField::Categorical(CategoricalField::LoanStatus)],
            ..FieldBindings::titled("scatter")
        };

        let spec = build(ChartKind::Scatter, &view, &bindings, &theme).unwrap();
        let ChartData::Points { x, color, hover, .. } = spec.data else {
            panic!("expected points");
        };
        assert_eq!(x, vec![40_000.0, 50_000.0]);
        assert_eq!(color.unwrap(), vec!["A", "B"]);
        assert_eq!(hover.len(), 1);
        assert_eq!(hover[0].values, vec!["0", "1"]);
    }

    #[test]
    fn empty_view_builds_empty_specs() {
        let (ds, theme) = view_of(vec![record(40_000.0, 10.0, 0, "A")]);
        let criteria = FilterCriteria::new().range(NumericField::Income, 1.0, 0.0);
        let view = filter::apply(&ds, &criteria);

        for kind in [ChartKind::Scatter, ChartKind::Histogram, ChartKind::Heatmap] {
            let bindings = FieldBindings {
                x: Some(NumericField::Income),
                y: Some(NumericField::InterestRate),
                ..FieldBindings::titled("empty")
            };
            // empty results are valid data, never an error
            build(kind, &view, &bindings, &theme).unwrap();
        }
    }

    #[test]
    fn explore_dashboard_builds_five_charts() {
        let (ds, theme) = view_of(vec![
            record(40_000.0, 10.0, 0, "A"),
            record(50_000.0, 11.0, 1, "B"),
        ]);
        let view = filter::apply(&ds, &FilterCriteria::new());

        let charts = explore_charts(&view, &theme).unwrap();
        let kinds: Vec<ChartKind> = charts.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ChartKind::Scatter,
                ChartKind::Scatter,
                ChartKind::Scatter,
                ChartKind::Heatmap,
                ChartKind::Pie,
            ]
        );
        assert_eq!(charts[0].title, "Loan Interest Rate by Age");
        assert_eq!(charts[4].title, "Loan Status Distribution");
    }
}
