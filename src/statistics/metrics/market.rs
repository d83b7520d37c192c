// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Market metrics: bus prices, revenue and market value.

use super::dispatch_series;
use crate::network_traits::{Port, SeriesAttribute};
use crate::statistics::aggregation::{Aggregator, GroupReduce, RatioDenominator};
use crate::statistics::{StatisticOptions, Statistics, TimeAggregation};
use crate::{Component, ComponentKind, Error, NetworkView, StatisticResult};

fn price_series<'a, C: Component>(bus: &'a C) -> Result<&'a [f64], Error> {
    bus.series(SeriesAttribute::MarginalPrice).ok_or_else(|| {
        Error::missing_solution(format!(
            "Bus:{} has no marginal price series. Has the network been solved?",
            bus.name()
        ))
    })
}

/// Marginal prices at buses.  Prices are averaged within a group rather
/// than summed, since summing prices over buses is meaningless.
pub(crate) fn prices<C: Component>(
    stats: &Statistics<C>,
    opts: &StatisticOptions<C>,
) -> Result<StatisticResult, Error> {
    Aggregator::try_new(
        stats.view,
        stats.registry,
        "prices",
        "EUR/MWh",
        |kind| kind == ComponentKind::Bus,
        opts,
    )?
    .series(
        TimeAggregation::Mean,
        false,
        GroupReduce::Mean,
        |_, bus, _| Ok(Some(price_series(bus)?.to_vec())),
    )
}

fn revenue_series<C: Component>(
    view: &NetworkView<C>,
    component: &C,
    port: Port,
) -> Result<Option<Vec<f64>>, Error> {
    let Some(dispatch) = dispatch_series(component, port)? else {
        return Ok(None);
    };
    let bus = view.bus_at(component.name(), port)?;
    let prices = price_series(bus)?;
    Ok(Some(
        dispatch.iter().zip(prices).map(|(d, p)| d * p).collect(),
    ))
}

/// Dispatch valued at the marginal price of the connected bus, signed:
/// positive for suppliers, negative for consumers.
pub(crate) fn revenue<C: Component>(
    stats: &Statistics<C>,
    opts: &StatisticOptions<C>,
) -> Result<StatisticResult, Error> {
    Aggregator::try_new(
        stats.view,
        stats.registry,
        "revenue",
        "EUR",
        |kind| kind.has_dispatch(),
        opts,
    )?
    .series(TimeAggregation::Sum, true, GroupReduce::Sum, revenue_series)
}

/// Revenue per unit of energy supplied, recomputed at the group level.
/// Undefined for groups that supply nothing.
pub(crate) fn market_value<C: Component>(
    stats: &Statistics<C>,
    opts: &StatisticOptions<C>,
) -> Result<StatisticResult, Error> {
    Aggregator::try_new(
        stats.view,
        stats.registry,
        "market_value",
        "EUR/MWh",
        |kind| kind.has_dispatch(),
        opts,
    )?
    .ratio(TimeAggregation::Sum, true, revenue_series, |_, component, port| {
        let Some(dispatch) = dispatch_series(component, port)? else {
            return Ok(None);
        };
        Ok(Some(RatioDenominator::Series(
            dispatch.iter().map(|v| v.max(0.0)).collect(),
        )))
    })
}
