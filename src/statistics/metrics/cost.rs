// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Cost metrics: capital expenditure from the static capacity attributes,
//! operating expenditure from dispatch, and their sum.

use super::{capital_cost, dispatch_series, marginal_cost, nameplate, optimal};
use crate::statistics::aggregation::{Aggregator, GroupReduce};
use crate::statistics::{StatisticOptions, Statistics, TimeAggregation};
use crate::{Component, ComponentKind, Error, StatisticResult};

pub(crate) fn installed_capex<C: Component>(
    stats: &Statistics<C>,
    opts: &StatisticOptions<C>,
) -> Result<StatisticResult, Error> {
    Aggregator::try_new(
        stats.view,
        stats.registry,
        "installed_capex",
        "EUR",
        |kind| kind.has_capacity(),
        opts,
    )?
    .scalars(|_, component, _| Ok(Some(nameplate(component) * capital_cost(component))))
}

pub(crate) fn expanded_capex<C: Component>(
    stats: &Statistics<C>,
    opts: &StatisticOptions<C>,
) -> Result<StatisticResult, Error> {
    Aggregator::try_new(
        stats.view,
        stats.registry,
        "expanded_capex",
        "EUR",
        |kind| kind.has_capacity(),
        opts,
    )?
    .scalars(|_, component, _| {
        Ok(Some(
            (optimal(component) - nameplate(component)) * capital_cost(component),
        ))
    })
}

pub(crate) fn capex<C: Component>(
    stats: &Statistics<C>,
    opts: &StatisticOptions<C>,
) -> Result<StatisticResult, Error> {
    Aggregator::try_new(
        stats.view,
        stats.registry,
        "capex",
        "EUR",
        |kind| kind.has_capacity(),
        opts,
    )?
    .scalars(|_, component, _| Ok(Some(optimal(component) * capital_cost(component))))
}

pub(crate) fn opex<C: Component>(
    stats: &Statistics<C>,
    opts: &StatisticOptions<C>,
) -> Result<StatisticResult, Error> {
    Aggregator::try_new(
        stats.view,
        stats.registry,
        "opex",
        "EUR",
        |kind| kind.has_dispatch() && kind != ComponentKind::Load,
        opts,
    )?
    .series(
        TimeAggregation::Sum,
        false,
        GroupReduce::Sum,
        |_, component, port| {
            let Some(dispatch) = dispatch_series(component, port)? else {
                return Ok(None);
            };
            let cost = marginal_cost(component);
            Ok(Some(dispatch.iter().map(|v| v * cost).collect()))
        },
    )
}

/// Total system cost: capex plus opex, aligned by group.
///
/// The opex side is always reduced with the weighted sum so that the two
/// summands share a unit.
pub(crate) fn system_cost<C: Component>(
    stats: &Statistics<C>,
    opts: &StatisticOptions<C>,
) -> Result<StatisticResult, Error> {
    let mut opex_opts = opts.clone();
    opex_opts.groupby_time = Some(TimeAggregation::Sum);

    let capex = capex(stats, opts)?;
    let opex = opex(stats, &opex_opts)?;
    capex.add_aligned(&opex, "system_cost")
}
