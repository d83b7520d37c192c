// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The aggregation pipeline shared by all metrics.
//!
//! A metric provides an extractor closure that maps one asset (and port) to
//! a value; the pipeline handles everything around it uniformly: kind and
//! carrier filtering, grouping, the missing-attribute policy, time
//! reduction and assembly of the labeled result.
//!
//! Extractors return `Ok(None)` to skip an asset (not meaningful for the
//! metric) and an error to abort the whole computation.

use std::collections::BTreeMap;

use crate::config::MissingAttributePolicy;
use crate::groupers::ResolvedGroupBy;
use crate::network_traits::Port;
use crate::result::{ResultKey, StatisticValue};
use crate::statistics::{StatisticOptions, TimeAggregation};
use crate::{
    Component, ComponentKind, Error, GrouperRegistry, NetworkView, StatisticResult,
};

/// How values of assets sharing one group key are combined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GroupReduce {
    Sum,
    Mean,
}

/// The denominator of a ratio metric, per asset.
pub(crate) enum RatioDenominator {
    /// A time-independent value, such as a capacity.
    Constant(f64),
    /// A per-snapshot series, reduced alongside the numerator.
    Series(Vec<f64>),
}

/// One metric computation: the view, the resolved grouping and the scope
/// after kind and carrier filters.
pub(crate) struct Aggregator<'a, C>
where
    C: Component,
{
    view: &'a NetworkView<C>,
    metric: &'static str,
    unit: &'static str,
    kinds: Vec<ComponentKind>,
    opts: &'a StatisticOptions<C>,
    groupby: ResolvedGroupBy<C>,
}

impl<'a, C> Aggregator<'a, C>
where
    C: Component,
{
    /// Sets up a computation: intersects the metric's domain with the
    /// requested kinds and resolves the grouping against the registry.
    ///
    /// Requesting a kind that is not present in the network is an
    /// `UnknownComponent` error; requesting a kind outside the metric's
    /// domain silently yields no rows for it.
    pub(crate) fn try_new(
        view: &'a NetworkView<C>,
        registry: &'a GrouperRegistry<C>,
        metric: &'static str,
        unit: &'static str,
        domain: impl Fn(ComponentKind) -> bool,
        opts: &'a StatisticOptions<C>,
    ) -> Result<Self, Error> {
        let present = view.kinds();
        let kinds = match &opts.components {
            Some(requested) => {
                for kind in requested {
                    if !present.contains(kind) {
                        return Err(Error::unknown_component(format!(
                            "No {} components in the network.",
                            kind
                        )));
                    }
                }
                present
                    .into_iter()
                    .filter(|kind| requested.contains(kind) && domain(*kind))
                    .collect()
            }
            None => present.into_iter().filter(|kind| domain(*kind)).collect(),
        };

        let groupby = registry.resolve(&opts.groupby)?;

        Ok(Self {
            view,
            metric,
            unit,
            kinds,
            opts,
            groupby,
        })
    }

    fn in_carrier_scope(&self, component: &C) -> bool {
        match &self.opts.carrier {
            None => true,
            Some(carriers) => component
                .carrier()
                .is_some_and(|c| carriers.iter().any(|wanted| wanted == c)),
        }
    }

    /// The ports of an asset a per-port metric looks at, after the port
    /// filter.
    fn ports_of(&self, kind: ComponentKind, per_port: bool) -> Vec<Port> {
        if per_port {
            (0..kind.ports().max(1))
                .map(Port)
                .filter(|port| self.opts.at_port.map_or(true, |wanted| wanted == *port))
                .collect()
        } else {
            vec![self.opts.at_port.unwrap_or(Port(0))]
        }
    }

    /// Applies the grouping to one asset, honoring the missing-attribute
    /// policy: `Ok(None)` means the asset is excluded from the result.
    fn group_key(&self, component: &C, port: Port) -> Result<Option<Vec<String>>, Error> {
        match self.groupby.key(self.view, component, port) {
            Ok(labels) => Ok(Some(labels)),
            Err(error) if error.is_missing_attribute() => {
                match self.view.config().missing_attribute {
                    MissingAttributePolicy::Exclude => {
                        tracing::warn!(
                            "Excluding {}:{} from {}: {}",
                            component.kind(),
                            component.name(),
                            self.metric,
                            error
                        );
                        Ok(None)
                    }
                    MissingAttributePolicy::Fail => Err(error),
                }
            }
            Err(error) => Err(error),
        }
    }

    fn level_names(&self) -> Vec<String> {
        let mut names = vec!["component".to_string()];
        names.extend(self.groupby.level_names().iter().cloned());
        names
    }

    /// Reduces a per-snapshot series according to the time aggregation.
    /// Returns a one-element vector for the reducing variants.
    fn reduce_time(&self, series: &[f64], time: TimeAggregation) -> Vec<f64> {
        match time {
            TimeAggregation::Sum => {
                let weights = self.view.snapshots().weights();
                vec![series.iter().zip(weights).map(|(v, w)| v * w).sum()]
            }
            TimeAggregation::Mean => {
                vec![series.iter().sum::<f64>() / series.len() as f64]
            }
            TimeAggregation::PerSnapshot => series.to_vec(),
        }
    }

    fn assemble(
        self,
        time_retained: bool,
        rows: Vec<(ResultKey, StatisticValue)>,
    ) -> StatisticResult {
        let level_names = self.level_names();
        let snapshots = time_retained.then(|| self.view.snapshots().labels().to_vec());
        StatisticResult::new(self.metric, self.unit, level_names, snapshots, rows)
    }

    /// Computes a time-independent metric: one scalar per asset, summed
    /// within each group.
    pub(crate) fn scalars(
        self,
        extract: impl Fn(&NetworkView<C>, &C, Port) -> Result<Option<f64>, Error>,
    ) -> Result<StatisticResult, Error> {
        let port = self.opts.at_port.unwrap_or(Port(0));
        let mut groups: BTreeMap<ResultKey, f64> = BTreeMap::new();

        for kind in &self.kinds {
            for component in self.view.components_of_kind(*kind) {
                if !self.in_carrier_scope(component) {
                    continue;
                }
                let Some(value) = extract(self.view, component, port)? else {
                    continue;
                };
                let Some(labels) = self.group_key(component, port)? else {
                    continue;
                };
                *groups
                    .entry(ResultKey {
                        kind: Some(*kind),
                        labels,
                    })
                    .or_insert(0.0) += value;
            }
        }

        let rows = groups
            .into_iter()
            .map(|(key, value)| (key, StatisticValue::Scalar(Some(value))))
            .collect();
        Ok(self.assemble(false, rows))
    }

    /// Computes a time-dependent metric: one series per asset and port,
    /// reduced over time and combined within each group.
    pub(crate) fn series(
        self,
        default_time: TimeAggregation,
        per_port: bool,
        reduce: GroupReduce,
        extract: impl Fn(&NetworkView<C>, &C, Port) -> Result<Option<Vec<f64>>, Error>,
    ) -> Result<StatisticResult, Error> {
        let time = self.opts.groupby_time.unwrap_or(default_time);
        let mut groups: BTreeMap<ResultKey, (Vec<f64>, usize)> = BTreeMap::new();

        for kind in &self.kinds {
            for component in self.view.components_of_kind(*kind) {
                if !self.in_carrier_scope(component) {
                    continue;
                }
                for port in self.ports_of(*kind, per_port) {
                    let Some(series) = extract(self.view, component, port)? else {
                        continue;
                    };
                    let Some(labels) = self.group_key(component, port)? else {
                        continue;
                    };
                    let reduced = self.reduce_time(&series, time);
                    let key = ResultKey {
                        kind: Some(*kind),
                        labels,
                    };
                    let (acc, count) = groups
                        .entry(key)
                        .or_insert_with(|| (vec![0.0; reduced.len()], 0));
                    for (acc, value) in acc.iter_mut().zip(&reduced) {
                        *acc += value;
                    }
                    *count += 1;
                }
            }
        }

        let time_retained = time == TimeAggregation::PerSnapshot;
        let rows = groups
            .into_iter()
            .map(|(key, (mut values, count))| {
                if reduce == GroupReduce::Mean {
                    for value in &mut values {
                        *value /= count as f64;
                    }
                }
                let value = if time_retained {
                    StatisticValue::Series(values)
                } else {
                    StatisticValue::Scalar(values.first().copied())
                };
                (key, value)
            })
            .collect();
        Ok(self.assemble(time_retained, rows))
    }

    /// Computes a ratio metric: numerator and denominator are accumulated
    /// per group and divided only at the end, so the result is the ratio of
    /// the group totals rather than a mean of per-asset ratios.
    ///
    /// A group whose denominator is zero yields an undefined value.
    pub(crate) fn ratio(
        self,
        default_time: TimeAggregation,
        per_port: bool,
        numerator: impl Fn(&NetworkView<C>, &C, Port) -> Result<Option<Vec<f64>>, Error>,
        denominator: impl Fn(&NetworkView<C>, &C, Port) -> Result<Option<RatioDenominator>, Error>,
    ) -> Result<StatisticResult, Error> {
        let time = self.opts.groupby_time.unwrap_or(default_time);
        let time_retained = time == TimeAggregation::PerSnapshot;
        let width = if time_retained {
            self.view.snapshots().len()
        } else {
            1
        };
        let mut groups: BTreeMap<ResultKey, (Vec<f64>, Vec<f64>)> = BTreeMap::new();

        for kind in &self.kinds {
            for component in self.view.components_of_kind(*kind) {
                if !self.in_carrier_scope(component) {
                    continue;
                }
                for port in self.ports_of(*kind, per_port) {
                    let Some(num) = numerator(self.view, component, port)? else {
                        continue;
                    };
                    let Some(den) = denominator(self.view, component, port)? else {
                        continue;
                    };
                    let Some(labels) = self.group_key(component, port)? else {
                        continue;
                    };

                    let num = self.reduce_time(&num, time);
                    let den = match den {
                        // A constant denominator is not a power series, so
                        // time reduction does not apply to it.
                        RatioDenominator::Constant(value) => vec![value; width],
                        RatioDenominator::Series(series) => self.reduce_time(&series, time),
                    };

                    let key = ResultKey {
                        kind: Some(*kind),
                        labels,
                    };
                    let (num_acc, den_acc) = groups
                        .entry(key)
                        .or_insert_with(|| (vec![0.0; width], vec![0.0; width]));
                    for (acc, value) in num_acc.iter_mut().zip(&num) {
                        *acc += value;
                    }
                    for (acc, value) in den_acc.iter_mut().zip(&den) {
                        *acc += value;
                    }
                }
            }
        }

        let rows = groups
            .into_iter()
            .map(|(key, (num, den))| {
                let value = if time_retained {
                    StatisticValue::Series(
                        num.iter()
                            .zip(&den)
                            .map(|(n, d)| if *d == 0.0 { f64::NAN } else { n / d })
                            .collect(),
                    )
                } else {
                    let ratio = (den[0] != 0.0).then(|| num[0] / den[0]);
                    StatisticValue::Scalar(ratio)
                };
                (key, value)
            })
            .collect();
        Ok(self.assemble(time_retained, rows))
    }
}
