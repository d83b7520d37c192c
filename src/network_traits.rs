// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the trait that needs to be implemented by the type
//! that represents a component of the network model, along with the selector
//! types for its attributes.

use crate::component_kind::ComponentKind;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A port role through which an asset attaches to a bus.
///
/// One-port assets (generators, loads, storage) only use port 0; branch
/// assets (lines, links, transformers) use ports 0 and 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Port(pub u32);

impl Display for Port {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// Numeric static attributes of an asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StaticAttribute {
    /// Nameplate (installed) capacity.
    NameplateCapacity,
    /// Capacity after optimization.
    OptimalCapacity,
    /// Capital cost per unit of capacity.
    CapitalCost,
    /// Operating cost per unit of dispatched energy.
    MarginalCost,
    /// Conversion efficiency.
    Efficiency,
}

impl Display for StaticAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StaticAttribute::NameplateCapacity => write!(f, "nameplate_capacity"),
            StaticAttribute::OptimalCapacity => write!(f, "optimal_capacity"),
            StaticAttribute::CapitalCost => write!(f, "capital_cost"),
            StaticAttribute::MarginalCost => write!(f, "marginal_cost"),
            StaticAttribute::Efficiency => write!(f, "efficiency"),
        }
    }
}

/// Textual static attributes of an asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAttribute {
    /// The country an asset (usually a bus) is located in.
    Country,
    /// The unit the asset's quantities are measured in.
    Unit,
}

impl Display for TextAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextAttribute::Country => write!(f, "country"),
            TextAttribute::Unit => write!(f, "unit"),
        }
    }
}

/// Per-snapshot series attributes of an asset.
///
/// These are only populated once the network has been solved; a `None` series
/// for a metric that needs it surfaces as a `MissingSolution` error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeriesAttribute {
    /// Power injected into the bus at the given port.  Positive values are
    /// supply to the bus, negative values are withdrawal from it.
    Dispatch(Port),
    /// Available output of a variable-output asset (potential dispatch).
    Available,
    /// Marginal (shadow) price at a bus.
    MarginalPrice,
}

impl Display for SeriesAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesAttribute::Dispatch(port) => write!(f, "dispatch_{}", port),
            SeriesAttribute::Available => write!(f, "available"),
            SeriesAttribute::MarginalPrice => write!(f, "marginal_price"),
        }
    }
}

/**
This trait needs to be implemented by the type that represents a component of
the network model.

The statistics engine is an independent library and doesn't know about the
tables the network model stores its components in.  It instead accesses every
component kind through this one uniform contract: static attributes, the
port-to-bus mapping, and per-snapshot series.

<details>
<summary>Example implementation for a plain record type:</summary>

```ignore
impl power_network_statistics::Component for MyAssetRow {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ComponentKind {
        self.kind
    }

    fn carrier(&self) -> Option<&str> {
        self.carrier.as_deref()
    }

    fn static_value(&self, attr: StaticAttribute) -> Option<f64> {
        match attr {
            StaticAttribute::NameplateCapacity => self.p_nom,
            StaticAttribute::OptimalCapacity => self.p_nom_opt,
            StaticAttribute::CapitalCost => self.capital_cost,
            StaticAttribute::MarginalCost => self.marginal_cost,
            StaticAttribute::Efficiency => self.efficiency,
        }
    }

    fn static_text(&self, attr: TextAttribute) -> Option<&str> {
        match attr {
            TextAttribute::Country => self.country.as_deref(),
            TextAttribute::Unit => self.unit.as_deref(),
        }
    }

    fn bus(&self, port: Port) -> Option<&str> {
        self.buses.get(port.0 as usize).map(String::as_str)
    }

    fn series(&self, attr: SeriesAttribute) -> Option<&[f64]> {
        self.solution.as_ref()?.series(attr)
    }
}
```

</details>
*/
pub trait Component: 'static {
    /// Returns the unique name of the asset within its kind.
    fn name(&self) -> &str;
    /// Returns the kind of the asset.
    fn kind(&self) -> ComponentKind;
    /// Returns the carrier assigned to the asset, if any.
    fn carrier(&self) -> Option<&str>;
    /// Returns the given numeric static attribute, if the asset has it.
    fn static_value(&self, attr: StaticAttribute) -> Option<f64>;
    /// Returns the given textual static attribute, if the asset has it.
    fn static_text(&self, attr: TextAttribute) -> Option<&str>;
    /// Returns the name of the bus the asset attaches to at the given port.
    fn bus(&self, port: Port) -> Option<&str>;
    /// Returns the given per-snapshot series, if it is populated.
    ///
    /// The returned slice must have one value per snapshot of the network.
    fn series(&self, attr: SeriesAttribute) -> Option<&[f64]>;
}
