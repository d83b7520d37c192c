// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The presentation facade: builds plot specifications from an already
//! aggregated result and hands them to an external rendering backend.
//!
//! No computation or mutation happens here; the facade only reshapes the
//! result's rows into a serializable [`PlotSpec`].

use crate::result::{StatisticResult, StatisticValue};
use crate::Error;
use serde::{Deserialize, Serialize};

/// The kind of chart a [`PlotSpec`] describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlotKind {
    Bar,
    Area,
    Line,
}

/// One named sequence of values in a [`PlotSpec`].
///
/// Undefined values are `None`, so the spec survives serialization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlotSeries {
    pub label: String,
    pub values: Vec<Option<f64>>,
}

/// A backend-independent description of one chart.
///
/// For reduced results the x axis carries the group labels and there is one
/// series of values; for results with a retained time axis the x axis
/// carries the snapshots and there is one series per row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlotSpec {
    pub kind: PlotKind,
    pub interactive: bool,
    pub title: String,
    pub value_label: String,
    pub x_labels: Vec<String>,
    pub series: Vec<PlotSeries>,
}

impl PlotSpec {
    /// Hands the spec to the given rendering backend.
    pub fn render_with<R: Renderer>(&self, renderer: &mut R) -> Result<(), Error> {
        renderer.render(self)
    }
}

/// The seam to the rendering backend, which is outside this library.
pub trait Renderer {
    /// Renders the given plot specification.
    fn render(&mut self, spec: &PlotSpec) -> Result<(), Error>;
}

/// A plot builder borrowed from a [`StatisticResult`].
///
/// Obtained via [`StatisticResult::plot`] or [`StatisticResult::iplot`];
/// the latter marks the produced specs as interactive.
pub struct PlotAccessor<'a> {
    result: &'a StatisticResult,
    interactive: bool,
}

impl<'a> PlotAccessor<'a> {
    pub(crate) fn new(result: &'a StatisticResult, interactive: bool) -> Self {
        Self {
            result,
            interactive,
        }
    }

    /// Builds a bar chart spec from the result.
    pub fn bar(&self) -> PlotSpec {
        self.build(PlotKind::Bar, self.result)
    }

    /// Builds an area chart spec from the result.
    pub fn area(&self) -> PlotSpec {
        self.build(PlotKind::Area, self.result)
    }

    /// Builds a line chart spec from the result.
    pub fn line(&self) -> PlotSpec {
        self.build(PlotKind::Line, self.result)
    }

    /// Builds a bar chart spec after collapsing the result onto the given
    /// index level.
    pub fn bar_by(&self, level: &str) -> Result<PlotSpec, Error> {
        Ok(self.build(PlotKind::Bar, &self.result.regrouped(level)?))
    }

    /// Builds an area chart spec after collapsing the result onto the given
    /// index level.
    pub fn area_by(&self, level: &str) -> Result<PlotSpec, Error> {
        Ok(self.build(PlotKind::Area, &self.result.regrouped(level)?))
    }

    fn row_label(key: &crate::ResultKey) -> String {
        let mut parts: Vec<String> = vec![];
        if let Some(kind) = key.kind {
            parts.push(kind.to_string());
        }
        parts.extend(key.labels.iter().cloned());
        parts.join("/")
    }

    fn build(&self, kind: PlotKind, result: &StatisticResult) -> PlotSpec {
        let (x_labels, series) = match result.snapshots() {
            // Time axis retained: one series per row, snapshots on the x
            // axis.
            Some(snapshots) => (
                snapshots.to_vec(),
                result
                    .iter()
                    .map(|(key, value)| PlotSeries {
                        label: Self::row_label(key),
                        values: match value {
                            StatisticValue::Series(values) => values
                                .iter()
                                .map(|v| if v.is_nan() { None } else { Some(*v) })
                                .collect(),
                            StatisticValue::Scalar(value) => vec![*value],
                        },
                    })
                    .collect(),
            ),
            // Reduced result: group labels on the x axis, one series.
            None => (
                result.iter().map(|(key, _)| Self::row_label(key)).collect(),
                vec![PlotSeries {
                    label: result.metric().to_string(),
                    values: result
                        .iter()
                        .map(|(_, value)| value.as_scalar())
                        .collect(),
                }],
            ),
        };

        PlotSpec {
            kind,
            interactive: self.interactive,
            title: result.metric().to_string(),
            value_label: result.unit().to_string(),
            x_labels,
            series,
        }
    }
}
