// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The labeled result of a statistic computation.

use crate::plot::PlotAccessor;
use crate::{ComponentKind, Error};
use serde::{Deserialize, Serialize};

/// The index key of one result row: the component kind and one label per
/// grouping level.
///
/// The kind is `None` only after the component level has been collapsed
/// away by [`StatisticResult::regrouped`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResultKey {
    pub kind: Option<ComponentKind>,
    pub labels: Vec<String>,
}

/// The value of one result row.
///
/// `Scalar(None)` is a defined group whose value is undefined (for example a
/// ratio with a zero denominator).  Series values may contain NaN entries
/// for the same reason.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StatisticValue {
    Scalar(Option<f64>),
    Series(Vec<f64>),
}

impl StatisticValue {
    /// Returns the scalar value, if this is a defined scalar.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            StatisticValue::Scalar(value) => *value,
            StatisticValue::Series(_) => None,
        }
    }

    /// Returns the series values, if this is a series.
    pub fn as_series(&self) -> Option<&[f64]> {
        match self {
            StatisticValue::Scalar(_) => None,
            StatisticValue::Series(values) => Some(values),
        }
    }
}

/// The labeled result of one statistic computation.
///
/// Rows are indexed by (component kind, grouping labels).  When the time
/// axis was not reduced, every row holds one value per snapshot and
/// [`snapshots`][StatisticResult::snapshots] carries the axis labels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatisticResult {
    metric: String,
    unit: String,
    level_names: Vec<String>,
    snapshots: Option<Vec<String>>,
    rows: Vec<(ResultKey, StatisticValue)>,
}

impl StatisticResult {
    pub(crate) fn new(
        metric: impl Into<String>,
        unit: impl Into<String>,
        level_names: Vec<String>,
        snapshots: Option<Vec<String>>,
        rows: Vec<(ResultKey, StatisticValue)>,
    ) -> Self {
        Self {
            metric: metric.into(),
            unit: unit.into(),
            level_names,
            snapshots,
            rows,
        }
    }

    /// Returns the name of the metric the result was computed for.
    pub fn metric(&self) -> &str {
        &self.metric
    }

    /// Returns the unit of the result values.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Returns the index level names, outermost first.  The first level is
    /// always `component`; the remaining levels carry the grouper names.
    pub fn level_names(&self) -> &[String] {
        &self.level_names
    }

    /// Returns the name of the innermost index level.
    pub fn innermost_level(&self) -> &str {
        self.level_names
            .last()
            .map(String::as_str)
            .unwrap_or("component")
    }

    /// Returns the snapshot axis, if the time dimension was retained.
    pub fn snapshots(&self) -> Option<&[String]> {
        self.snapshots.as_deref()
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the result has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns an iterator over the rows, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&ResultKey, &StatisticValue)> {
        self.rows.iter().map(|(key, value)| (key, value))
    }

    /// Returns the value of the row with the given key, if it exists.
    pub fn get(&self, kind: ComponentKind, labels: &[&str]) -> Option<&StatisticValue> {
        self.rows
            .iter()
            .find(|(key, _)| key.kind == Some(kind) && key.labels == labels)
            .map(|(_, value)| value)
    }

    /// Returns the defined scalar value of the row with the given key.
    pub fn scalar(&self, kind: ComponentKind, labels: &[&str]) -> Option<f64> {
        self.get(kind, labels).and_then(StatisticValue::as_scalar)
    }

    /// Returns the sum of all defined values in the result.
    pub fn total(&self) -> f64 {
        self.rows
            .iter()
            .map(|(_, value)| match value {
                StatisticValue::Scalar(value) => value.unwrap_or(0.0),
                StatisticValue::Series(values) => {
                    values.iter().filter(|v| !v.is_nan()).sum()
                }
            })
            .sum()
    }

    /// Adds another scalar result to this one, aligning rows by key and
    /// treating rows absent on either side as zero.
    ///
    /// The results must have the same index levels and no retained time
    /// axis.
    pub fn add_aligned(&self, other: &Self, metric: impl Into<String>) -> Result<Self, Error> {
        if self.level_names != other.level_names {
            return Err(Error::internal(format!(
                "Can't align results grouped by {:?} and {:?}.",
                self.level_names, other.level_names
            )));
        }
        if self.snapshots.is_some() || other.snapshots.is_some() {
            return Err(Error::internal(
                "Can't align results with a retained time axis.",
            ));
        }

        let mut rows: std::collections::BTreeMap<ResultKey, Option<f64>> =
            std::collections::BTreeMap::new();
        for (key, value) in self.rows.iter().chain(&other.rows) {
            let entry = rows.entry(key.clone()).or_insert(None);
            if let Some(value) = value.as_scalar() {
                *entry = Some(entry.unwrap_or(0.0) + value);
            }
        }

        Ok(Self {
            metric: metric.into(),
            unit: self.unit.clone(),
            level_names: self.level_names.clone(),
            snapshots: None,
            rows: rows
                .into_iter()
                .map(|(key, value)| (key, StatisticValue::Scalar(value)))
                .collect(),
        })
    }

    /// Collapses the result onto the single named index level, summing the
    /// values of all rows that share a label on that level.
    ///
    /// This is the re-aggregation step of the presentation facade.
    pub fn regrouped(&self, level: &str) -> Result<Self, Error> {
        let Some(position) = self.level_names.iter().position(|n| n == level) else {
            return Err(Error::unknown_grouper(format!(
                "The result has no index level named {}.",
                level
            )));
        };
        if position == 0 {
            return Err(Error::unknown_grouper(
                "Can't regroup on the component level.",
            ));
        }

        let mut groups: std::collections::BTreeMap<String, StatisticValue> =
            std::collections::BTreeMap::new();
        for (key, value) in &self.rows {
            let label = key.labels[position - 1].clone();
            match groups.entry(label) {
                std::collections::btree_map::Entry::Vacant(entry) => {
                    entry.insert(value.clone());
                }
                std::collections::btree_map::Entry::Occupied(mut entry) => {
                    match (entry.get_mut(), value) {
                        (StatisticValue::Scalar(acc), StatisticValue::Scalar(value)) => {
                            if let Some(value) = value {
                                *acc = Some(acc.unwrap_or(0.0) + value);
                            }
                        }
                        (StatisticValue::Series(acc), StatisticValue::Series(values)) => {
                            for (acc, value) in acc.iter_mut().zip(values) {
                                *acc += value;
                            }
                        }
                        _ => {
                            return Err(Error::internal(
                                "Mixed scalar and series rows in one result.",
                            ));
                        }
                    }
                }
            }
        }

        Ok(Self {
            metric: self.metric.clone(),
            unit: self.unit.clone(),
            level_names: vec![level.to_string()],
            snapshots: self.snapshots.clone(),
            rows: groups
                .into_iter()
                .map(|(label, value)| {
                    (
                        ResultKey {
                            kind: None,
                            labels: vec![label],
                        },
                        value,
                    )
                })
                .collect(),
        })
    }

    /// Returns the static-plot facade for the result.
    pub fn plot(&self) -> PlotAccessor<'_> {
        PlotAccessor::new(self, false)
    }

    /// Returns the interactive-plot facade for the result.
    pub fn iplot(&self) -> PlotAccessor<'_> {
        PlotAccessor::new(self, true)
    }
}
