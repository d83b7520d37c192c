// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Capacity metrics: time-independent, derived from the static capacity
//! attributes of each asset.

use super::{nameplate, optimal};
use crate::statistics::aggregation::Aggregator;
use crate::statistics::{StatisticOptions, Statistics};
use crate::{Component, Error, StatisticResult};

pub(crate) fn installed_capacity<C: Component>(
    stats: &Statistics<C>,
    opts: &StatisticOptions<C>,
) -> Result<StatisticResult, Error> {
    Aggregator::try_new(
        stats.view,
        stats.registry,
        "installed_capacity",
        "MW",
        |kind| kind.has_capacity(),
        opts,
    )?
    .scalars(|_, component, _| Ok(Some(nameplate(component))))
}

pub(crate) fn expanded_capacity<C: Component>(
    stats: &Statistics<C>,
    opts: &StatisticOptions<C>,
) -> Result<StatisticResult, Error> {
    Aggregator::try_new(
        stats.view,
        stats.registry,
        "expanded_capacity",
        "MW",
        |kind| kind.has_capacity(),
        opts,
    )?
    .scalars(|_, component, _| Ok(Some(optimal(component) - nameplate(component))))
}

pub(crate) fn optimal_capacity<C: Component>(
    stats: &Statistics<C>,
    opts: &StatisticOptions<C>,
) -> Result<StatisticResult, Error> {
    Aggregator::try_new(
        stats.view,
        stats.registry,
        "optimal_capacity",
        "MW",
        |kind| kind.has_capacity(),
        opts,
    )?
    .scalars(|_, component, _| Ok(Some(optimal(component))))
}

#[cfg(test)]
mod tests {
    use crate::network::test_utils::solved_two_bus_network;
    use crate::statistics::StatisticOptions;
    use crate::{ComponentKind, Error, GrouperRegistry};

    #[test]
    fn test_capacities_by_carrier() -> Result<(), Error> {
        let view = solved_two_bus_network()?;
        let registry = GrouperRegistry::new();
        let stats = view.statistics(&registry);
        let opts = StatisticOptions::default();

        let installed = stats.installed_capacity(&opts)?;
        assert_eq!(installed.scalar(ComponentKind::Generator, &["solar"]), Some(50.0));
        assert_eq!(installed.scalar(ComponentKind::Generator, &["coal"]), Some(100.0));
        assert_eq!(installed.scalar(ComponentKind::Line, &["AC"]), Some(60.0));
        // The carrier-less storage unit is excluded under the default
        // policy.
        assert_eq!(installed.len(), 3);

        let optimal = stats.optimal_capacity(&opts)?;
        assert_eq!(optimal.scalar(ComponentKind::Generator, &["solar"]), Some(80.0));
        assert_eq!(optimal.scalar(ComponentKind::Line, &["AC"]), Some(70.0));

        let expanded = stats.expanded_capacity(&opts)?;
        assert_eq!(expanded.scalar(ComponentKind::Generator, &["solar"]), Some(30.0));
        assert_eq!(expanded.scalar(ComponentKind::Generator, &["coal"]), Some(0.0));
        assert_eq!(expanded.scalar(ComponentKind::Line, &["AC"]), Some(10.0));

        // Optimal capacity decomposes into installed plus expanded.
        for (key, value) in optimal.iter() {
            let kind = key.kind.ok_or_else(|| Error::internal("kind missing"))?;
            let labels: Vec<&str> = key.labels.iter().map(String::as_str).collect();
            let total = installed.scalar(kind, &labels).unwrap_or(0.0)
                + expanded.scalar(kind, &labels).unwrap_or(0.0);
            assert!((value.as_scalar().unwrap() - total).abs() < 1e-9);
        }

        Ok(())
    }

    #[test]
    fn test_metadata() -> Result<(), Error> {
        let view = solved_two_bus_network()?;
        let registry = GrouperRegistry::new();
        let stats = view.statistics(&registry);

        let result = stats.installed_capacity(&StatisticOptions::default())?;
        assert_eq!(result.metric(), "installed_capacity");
        assert_eq!(result.unit(), "MW");
        assert_eq!(result.level_names(), ["component", "carrier"]);
        assert_eq!(result.innermost_level(), "carrier");
        assert_eq!(result.snapshots(), None);

        Ok(())
    }
}
