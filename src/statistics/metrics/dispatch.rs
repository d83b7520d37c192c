// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Dispatch metrics: supply, withdrawal, balance, flows, capacity factor
//! and curtailment.
//!
//! Dispatch is signed as the power injected into the bus at a port, so
//! positive values are supply and negative values are withdrawal.

use super::{dispatch_series, optimal};
use crate::network_traits::SeriesAttribute;
use crate::statistics::aggregation::{Aggregator, GroupReduce, RatioDenominator};
use crate::statistics::{StatisticOptions, Statistics, TimeAggregation};
use crate::{Component, ComponentKind, Error, StatisticResult};

pub(crate) fn supply<C: Component>(
    stats: &Statistics<C>,
    opts: &StatisticOptions<C>,
) -> Result<StatisticResult, Error> {
    Aggregator::try_new(
        stats.view,
        stats.registry,
        "supply",
        "MWh",
        |kind| kind.has_dispatch(),
        opts,
    )?
    .series(
        TimeAggregation::Sum,
        true,
        GroupReduce::Sum,
        |_, component, port| {
            let Some(dispatch) = dispatch_series(component, port)? else {
                return Ok(None);
            };
            Ok(Some(dispatch.iter().map(|v| v.max(0.0)).collect()))
        },
    )
}

pub(crate) fn withdrawal<C: Component>(
    stats: &Statistics<C>,
    opts: &StatisticOptions<C>,
) -> Result<StatisticResult, Error> {
    Aggregator::try_new(
        stats.view,
        stats.registry,
        "withdrawal",
        "MWh",
        |kind| kind.has_dispatch(),
        opts,
    )?
    .series(
        TimeAggregation::Sum,
        true,
        GroupReduce::Sum,
        |_, component, port| {
            let Some(dispatch) = dispatch_series(component, port)? else {
                return Ok(None);
            };
            Ok(Some(dispatch.iter().map(|v| -v.min(0.0)).collect()))
        },
    )
}

pub(crate) fn energy_balance<C: Component>(
    stats: &Statistics<C>,
    opts: &StatisticOptions<C>,
) -> Result<StatisticResult, Error> {
    Aggregator::try_new(
        stats.view,
        stats.registry,
        "energy_balance",
        "MWh",
        |kind| kind.has_dispatch(),
        opts,
    )?
    .series(
        TimeAggregation::Sum,
        true,
        GroupReduce::Sum,
        |_, component, port| Ok(dispatch_series(component, port)?.map(|d| d.to_vec())),
    )
}

pub(crate) fn transmission<C: Component>(
    stats: &Statistics<C>,
    opts: &StatisticOptions<C>,
) -> Result<StatisticResult, Error> {
    Aggregator::try_new(
        stats.view,
        stats.registry,
        "transmission",
        "MWh",
        |kind| kind.is_transmission(),
        opts,
    )?
    .series(
        TimeAggregation::Sum,
        false,
        GroupReduce::Sum,
        |_, component, port| Ok(dispatch_series(component, port)?.map(|d| d.to_vec())),
    )
}

/// Dispatch relative to optimal capacity, recomputed at the group level:
/// the ratio of the summed dispatch to the summed capacity, not a mean of
/// per-asset ratios.
pub(crate) fn capacity_factor<C: Component>(
    stats: &Statistics<C>,
    opts: &StatisticOptions<C>,
) -> Result<StatisticResult, Error> {
    Aggregator::try_new(
        stats.view,
        stats.registry,
        "capacity_factor",
        "p.u.",
        |kind| {
            matches!(
                kind,
                ComponentKind::Generator | ComponentKind::StorageUnit | ComponentKind::Store
            )
        },
        opts,
    )?
    .ratio(
        TimeAggregation::Mean,
        false,
        |_, component, port| Ok(dispatch_series(component, port)?.map(|d| d.to_vec())),
        |_, component, _| Ok(Some(RatioDenominator::Constant(optimal(component)))),
    )
}

/// Available but undispatched output.  Assets without an availability
/// series are skipped rather than treated as fully dispatchable.
pub(crate) fn curtailment<C: Component>(
    stats: &Statistics<C>,
    opts: &StatisticOptions<C>,
) -> Result<StatisticResult, Error> {
    Aggregator::try_new(
        stats.view,
        stats.registry,
        "curtailment",
        "MWh",
        |kind| matches!(kind, ComponentKind::Generator | ComponentKind::StorageUnit),
        opts,
    )?
    .series(
        TimeAggregation::Sum,
        false,
        GroupReduce::Sum,
        |_, component, port| {
            let Some(available) = component.series(SeriesAttribute::Available) else {
                return Ok(None);
            };
            let Some(dispatch) = dispatch_series(component, port)? else {
                return Ok(None);
            };
            Ok(Some(
                available
                    .iter()
                    .zip(dispatch)
                    .map(|(a, d)| (a - d).max(0.0))
                    .collect(),
            ))
        },
    )
}

#[cfg(test)]
mod tests {
    use crate::network::test_utils::solved_two_bus_network;
    use crate::network_traits::Port;
    use crate::statistics::{StatisticOptions, TimeAggregation};
    use crate::{ComponentKind, Error, GrouperRegistry};

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.unwrap();
        assert!(
            (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
            "{actual} != {expected}"
        );
    }

    #[test]
    fn test_supply_and_withdrawal() -> Result<(), Error> {
        let view = solved_two_bus_network()?;
        let registry = GrouperRegistry::new();
        let stats = view.statistics(&registry);
        let opts = StatisticOptions::default();

        let supply = stats.supply(&opts)?;
        assert_close(supply.scalar(ComponentKind::Generator, &["solar"]), 180.0);
        assert_close(supply.scalar(ComponentKind::Generator, &["coal"]), 290.0);
        // Both line ports contribute their positive half.
        assert_close(supply.scalar(ComponentKind::Line, &["AC"]), 200.0);
        assert_close(supply.scalar(ComponentKind::Load, &["electricity"]), 0.0);

        let withdrawal = stats.withdrawal(&opts)?;
        assert_close(
            withdrawal.scalar(ComponentKind::Load, &["electricity"]),
            470.0,
        );
        assert_close(withdrawal.scalar(ComponentKind::Line, &["AC"]), 200.0);

        Ok(())
    }

    #[test]
    fn test_energy_balance_sums_to_zero() -> Result<(), Error> {
        let view = solved_two_bus_network()?;
        let registry = GrouperRegistry::new();
        let stats = view.statistics(&registry);
        let opts = StatisticOptions::default();

        let balance = stats.energy_balance(&opts)?;
        assert_close(balance.scalar(ComponentKind::Generator, &["solar"]), 180.0);
        assert_close(
            balance.scalar(ComponentKind::Load, &["electricity"]),
            -470.0,
        );
        assert_close(balance.scalar(ComponentKind::Line, &["AC"]), 0.0);

        let gross = stats.supply(&opts)?.total();
        assert!(balance.total().abs() < 0.01 * gross);

        Ok(())
    }

    #[test]
    fn test_time_aggregation() -> Result<(), Error> {
        let view = solved_two_bus_network()?;
        let registry = GrouperRegistry::new();
        let stats = view.statistics(&registry);

        // Keeping the snapshot axis yields one raw value per snapshot.
        let per_snapshot = stats.supply(
            &StatisticOptions::default().with_groupby_time(TimeAggregation::PerSnapshot),
        )?;
        assert_eq!(
            per_snapshot.snapshots(),
            Some(&["t0".to_string(), "t1".into(), "t2".into(), "t3".into()][..])
        );
        let solar = per_snapshot
            .get(ComponentKind::Generator, &["solar"])
            .and_then(|v| v.as_series());
        assert_eq!(solar, Some(&[40.0, 60.0, 20.0, 0.0][..]));

        // The unweighted mean differs from the weighted sum.
        let mean = stats
            .supply(&StatisticOptions::default().with_groupby_time(TimeAggregation::Mean))?;
        assert_close(mean.scalar(ComponentKind::Generator, &["solar"]), 30.0);
        let sum = stats.supply(&StatisticOptions::default())?;
        assert!(
            sum.scalar(ComponentKind::Generator, &["solar"])
                != mean.scalar(ComponentKind::Generator, &["solar"])
        );

        Ok(())
    }

    #[test]
    fn test_transmission() -> Result<(), Error> {
        let view = solved_two_bus_network()?;
        let registry = GrouperRegistry::new();
        let stats = view.statistics(&registry);

        let transmission = stats.transmission(&StatisticOptions::default())?;
        assert_eq!(transmission.len(), 1);
        assert_close(transmission.scalar(ComponentKind::Line, &["AC"]), 60.0);

        Ok(())
    }

    #[test]
    fn test_capacity_factor() -> Result<(), Error> {
        let view = solved_two_bus_network()?;
        let registry = GrouperRegistry::new();
        let stats = view.statistics(&registry);
        let opts = StatisticOptions::default();

        let cf = stats.capacity_factor(&opts)?;
        assert_close(cf.scalar(ComponentKind::Generator, &["solar"]), 0.375);
        assert_close(cf.scalar(ComponentKind::Generator, &["coal"]), 0.475);
        for (_, value) in cf.iter() {
            let value = value.as_scalar().unwrap();
            assert!((0.0..=1.0).contains(&value));
        }

        // The carrier filter leaves a single row.
        let cf = stats.capacity_factor(&StatisticOptions::default().with_carrier(["solar"]))?;
        assert_eq!(cf.len(), 1);

        Ok(())
    }

    #[test]
    fn test_curtailment() -> Result<(), Error> {
        let view = solved_two_bus_network()?;
        let registry = GrouperRegistry::new();
        let stats = view.statistics(&registry);

        let curtailment = stats.curtailment(&StatisticOptions::default())?;
        // Only the solar generator has an availability series.
        assert_eq!(curtailment.len(), 1);
        assert_close(
            curtailment.scalar(ComponentKind::Generator, &["solar"]),
            80.0,
        );

        Ok(())
    }

    #[test]
    fn test_port_filter() -> Result<(), Error> {
        let view = solved_two_bus_network()?;
        let registry = GrouperRegistry::new();
        let stats = view.statistics(&registry);

        // Only the line has a second port.
        let supply = stats.supply(&StatisticOptions::default().with_port(Port(1)))?;
        assert_eq!(supply.len(), 1);
        assert_close(supply.scalar(ComponentKind::Line, &["AC"]), 70.0);

        Ok(())
    }
}
