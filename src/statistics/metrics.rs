// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The per-metric extractors, organized by theme.

pub(crate) mod capacity;
pub(crate) mod cost;
pub(crate) mod dispatch;
pub(crate) mod market;

use crate::network_traits::{Port, SeriesAttribute, StaticAttribute};
use crate::{Component, Error};

/// Nameplate capacity, treating an absent value as zero.
fn nameplate<C: Component>(component: &C) -> f64 {
    component
        .static_value(StaticAttribute::NameplateCapacity)
        .unwrap_or(0.0)
}

/// Capacity after optimization.  Falls back to the nameplate capacity when
/// the network has not been solved with capacity expansion.
fn optimal<C: Component>(component: &C) -> f64 {
    component
        .static_value(StaticAttribute::OptimalCapacity)
        .unwrap_or_else(|| nameplate(component))
}

fn marginal_cost<C: Component>(component: &C) -> f64 {
    component
        .static_value(StaticAttribute::MarginalCost)
        .unwrap_or(0.0)
}

fn capital_cost<C: Component>(component: &C) -> f64 {
    component
        .static_value(StaticAttribute::CapitalCost)
        .unwrap_or(0.0)
}

/// The dispatch series of an asset at a port.
///
/// Returns `Ok(None)` for a port with no bus binding (possible when unbound
/// ports are allowed), and a `MissingSolution` error when the port is bound
/// but the network carries no dispatch for it.
fn dispatch_series<C: Component>(component: &C, port: Port) -> Result<Option<&[f64]>, Error> {
    if component.bus(port).is_none() {
        return Ok(None);
    }
    match component.series(SeriesAttribute::Dispatch(port)) {
        Some(series) => Ok(Some(series)),
        None => Err(Error::missing_solution(format!(
            "{}:{} has no dispatch series at port {}. Has the network been solved?",
            component.kind(),
            component.name(),
            port
        ))),
    }
}
