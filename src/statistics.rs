// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for computing standardized techno-economic statistics over a
//! [`NetworkView`].
//!
//! Every metric accepts the same [`StatisticOptions`]: which component kinds
//! to include, how to group assets, how to reduce the time axis, and
//! carrier/port filters.  The heavy lifting happens in the aggregation
//! pipeline; the per-metric modules only describe where the values come
//! from and which sign they carry.

pub(crate) mod aggregation;
mod metrics;

use crate::groupers::GroupBy;
use crate::network_traits::Port;
use crate::{Component, ComponentKind, Error, GrouperRegistry, NetworkView, StatisticResult};
use serde::{Deserialize, Serialize};

/// How the snapshot axis of a time-dependent metric is reduced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeAggregation {
    /// Sum over snapshots, scaled by the snapshot weights (power becomes
    /// energy).
    Sum,
    /// Unweighted arithmetic mean over snapshots.
    Mean,
    /// No reduction: the result keeps one value per snapshot.
    PerSnapshot,
}

/// Parameters of a statistic computation, uniform across all metrics.
pub struct StatisticOptions<C>
where
    C: Component,
{
    /// The component kinds to include.  `None` means every kind that is
    /// meaningful for the metric.
    pub components: Option<Vec<ComponentKind>>,

    /// How to partition assets before reduction.
    pub groupby: GroupBy<C>,

    /// How to reduce the snapshot axis.  `None` means the metric's own
    /// default; capacity-like metrics ignore this parameter.
    pub groupby_time: Option<TimeAggregation>,

    /// Restrict to assets whose carrier is one of the given values.
    pub carrier: Option<Vec<String>>,

    /// Restrict flow-sensitive metrics to a single port role.
    pub at_port: Option<Port>,
}

impl<C: Component> Default for StatisticOptions<C> {
    fn default() -> Self {
        Self {
            components: None,
            groupby: GroupBy::default(),
            groupby_time: None,
            carrier: None,
            at_port: None,
        }
    }
}

impl<C: Component> Clone for StatisticOptions<C> {
    fn clone(&self) -> Self {
        Self {
            components: self.components.clone(),
            groupby: self.groupby.clone(),
            groupby_time: self.groupby_time,
            carrier: self.carrier.clone(),
            at_port: self.at_port,
        }
    }
}

impl<C: Component> StatisticOptions<C> {
    /// Creates options with all defaults: every meaningful kind, grouped by
    /// carrier, the metric's own time aggregation, no filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the computation to the given component kinds.
    pub fn with_components(mut self, kinds: impl IntoIterator<Item = ComponentKind>) -> Self {
        self.components = Some(kinds.into_iter().collect());
        self
    }

    /// Sets how assets are partitioned before reduction.
    pub fn with_groupby(mut self, groupby: GroupBy<C>) -> Self {
        self.groupby = groupby;
        self
    }

    /// Sets how the snapshot axis is reduced.
    pub fn with_groupby_time(mut self, time: TimeAggregation) -> Self {
        self.groupby_time = Some(time);
        self
    }

    /// Restricts the computation to assets with one of the given carriers.
    pub fn with_carrier(mut self, carriers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.carrier = Some(carriers.into_iter().map(Into::into).collect());
        self
    }

    /// Restricts flow-sensitive metrics to the given port role.
    pub fn with_port(mut self, port: Port) -> Self {
        self.at_port = Some(port);
        self
    }
}

/// The statistics accessor for a [`NetworkView`].
///
/// Borrows the view and a grouper registry; every method is a pure function
/// over the two and returns a fresh [`StatisticResult`].
pub struct Statistics<'a, C>
where
    C: Component,
{
    pub(crate) view: &'a NetworkView<C>,
    pub(crate) registry: &'a GrouperRegistry<C>,
}

impl<'a, C> Statistics<'a, C>
where
    C: Component,
{
    /// Creates a statistics accessor over the given view and registry.
    pub fn new(view: &'a NetworkView<C>, registry: &'a GrouperRegistry<C>) -> Self {
        Self { view, registry }
    }

    /// Nameplate capacity.
    pub fn installed_capacity(
        &self,
        opts: &StatisticOptions<C>,
    ) -> Result<StatisticResult, Error> {
        metrics::capacity::installed_capacity(self, opts)
    }

    /// Capacity added by the optimization on top of the nameplate capacity.
    pub fn expanded_capacity(&self, opts: &StatisticOptions<C>) -> Result<StatisticResult, Error> {
        metrics::capacity::expanded_capacity(self, opts)
    }

    /// Capacity after optimization.
    pub fn optimal_capacity(&self, opts: &StatisticOptions<C>) -> Result<StatisticResult, Error> {
        metrics::capacity::optimal_capacity(self, opts)
    }

    /// Capital expenditure on the nameplate capacity.
    pub fn installed_capex(&self, opts: &StatisticOptions<C>) -> Result<StatisticResult, Error> {
        metrics::cost::installed_capex(self, opts)
    }

    /// Capital expenditure on the expanded capacity.
    pub fn expanded_capex(&self, opts: &StatisticOptions<C>) -> Result<StatisticResult, Error> {
        metrics::cost::expanded_capex(self, opts)
    }

    /// Total capital expenditure (installed plus expanded).
    pub fn capex(&self, opts: &StatisticOptions<C>) -> Result<StatisticResult, Error> {
        metrics::cost::capex(self, opts)
    }

    /// Operating expenditure: dispatched energy times marginal cost.
    pub fn opex(&self, opts: &StatisticOptions<C>) -> Result<StatisticResult, Error> {
        metrics::cost::opex(self, opts)
    }

    /// Total system cost: capex plus opex, aligned by group.
    pub fn system_cost(&self, opts: &StatisticOptions<C>) -> Result<StatisticResult, Error> {
        metrics::cost::system_cost(self, opts)
    }

    /// Energy supplied to buses (positive dispatch at each port).
    pub fn supply(&self, opts: &StatisticOptions<C>) -> Result<StatisticResult, Error> {
        metrics::dispatch::supply(self, opts)
    }

    /// Energy withdrawn from buses, as a positive magnitude.
    pub fn withdrawal(&self, opts: &StatisticOptions<C>) -> Result<StatisticResult, Error> {
        metrics::dispatch::withdrawal(self, opts)
    }

    /// Signed energy balance: supply minus withdrawal.
    pub fn energy_balance(&self, opts: &StatisticOptions<C>) -> Result<StatisticResult, Error> {
        metrics::dispatch::energy_balance(self, opts)
    }

    /// Signed flow on transmission assets, measured at a port.
    pub fn transmission(&self, opts: &StatisticOptions<C>) -> Result<StatisticResult, Error> {
        metrics::dispatch::transmission(self, opts)
    }

    /// Mean dispatch relative to optimal capacity.
    pub fn capacity_factor(&self, opts: &StatisticOptions<C>) -> Result<StatisticResult, Error> {
        metrics::dispatch::capacity_factor(self, opts)
    }

    /// Available but unused output of variable-output assets.
    pub fn curtailment(&self, opts: &StatisticOptions<C>) -> Result<StatisticResult, Error> {
        metrics::dispatch::curtailment(self, opts)
    }

    /// Marginal (shadow) price at buses.
    pub fn prices(&self, opts: &StatisticOptions<C>) -> Result<StatisticResult, Error> {
        metrics::market::prices(self, opts)
    }

    /// Dispatch valued at the price of the connected bus.
    pub fn revenue(&self, opts: &StatisticOptions<C>) -> Result<StatisticResult, Error> {
        metrics::market::revenue(self, opts)
    }

    /// Revenue per unit of energy supplied.
    pub fn market_value(&self, opts: &StatisticOptions<C>) -> Result<StatisticResult, Error> {
        metrics::market::market_value(self, opts)
    }

    /// Computes the standard set of metrics with default options.
    ///
    /// The network must be solved, since the set includes dispatch and
    /// price based metrics.
    pub fn overview(&self) -> Result<Vec<(&'static str, StatisticResult)>, Error> {
        let opts = StatisticOptions::default();
        let metrics: [(&'static str, fn(&Self, &StatisticOptions<C>) -> Result<StatisticResult, Error>); 15] = [
            ("installed_capacity", Self::installed_capacity),
            ("expanded_capacity", Self::expanded_capacity),
            ("optimal_capacity", Self::optimal_capacity),
            ("installed_capex", Self::installed_capex),
            ("expanded_capex", Self::expanded_capex),
            ("capex", Self::capex),
            ("opex", Self::opex),
            ("system_cost", Self::system_cost),
            ("supply", Self::supply),
            ("withdrawal", Self::withdrawal),
            ("energy_balance", Self::energy_balance),
            ("capacity_factor", Self::capacity_factor),
            ("curtailment", Self::curtailment),
            ("revenue", Self::revenue),
            ("market_value", Self::market_value),
        ];

        let mut results = vec![];
        for (name, f) in metrics {
            results.push((name, f(self, &opts)?));
        }
        Ok(results)
    }
}
