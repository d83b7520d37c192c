// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Utilities for creating network views in tests.

use std::collections::HashMap;

use crate::network_traits::{Port, SeriesAttribute, StaticAttribute, TextAttribute};
use crate::{Component, ComponentKind, Error, NetworkView, NetworkViewConfig, Snapshots};

/// A builder-style [`Component`] implementation for tests.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TestAsset {
    name: String,
    kind: ComponentKind,
    carrier: Option<String>,
    country: Option<String>,
    unit: Option<String>,
    nameplate: Option<f64>,
    optimal: Option<f64>,
    capital_cost: Option<f64>,
    marginal_cost: Option<f64>,
    efficiency: Option<f64>,
    buses: HashMap<u32, String>,
    dispatch: HashMap<u32, Vec<f64>>,
    available: Option<Vec<f64>>,
    price: Option<Vec<f64>>,
}

impl TestAsset {
    pub(crate) fn new(name: &str, kind: ComponentKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            carrier: None,
            country: None,
            unit: None,
            nameplate: None,
            optimal: None,
            capital_cost: None,
            marginal_cost: None,
            efficiency: None,
            buses: HashMap::new(),
            dispatch: HashMap::new(),
            available: None,
            price: None,
        }
    }

    pub(crate) fn bus(name: &str) -> Self {
        Self::new(name, ComponentKind::Bus)
    }

    pub(crate) fn carrier(mut self, carrier: &str) -> Self {
        self.carrier = Some(carrier.to_string());
        self
    }

    pub(crate) fn country(mut self, country: &str) -> Self {
        self.country = Some(country.to_string());
        self
    }

    pub(crate) fn unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    pub(crate) fn nameplate(mut self, value: f64) -> Self {
        self.nameplate = Some(value);
        self
    }

    pub(crate) fn optimal(mut self, value: f64) -> Self {
        self.optimal = Some(value);
        self
    }

    pub(crate) fn capital_cost(mut self, value: f64) -> Self {
        self.capital_cost = Some(value);
        self
    }

    pub(crate) fn marginal_cost(mut self, value: f64) -> Self {
        self.marginal_cost = Some(value);
        self
    }

    /// Binds the given port to the named bus.
    pub(crate) fn attach(mut self, port: u32, bus: &str) -> Self {
        self.buses.insert(port, bus.to_string());
        self
    }

    pub(crate) fn dispatch(mut self, port: u32, values: impl Into<Vec<f64>>) -> Self {
        self.dispatch.insert(port, values.into());
        self
    }

    pub(crate) fn available(mut self, values: impl Into<Vec<f64>>) -> Self {
        self.available = Some(values.into());
        self
    }

    pub(crate) fn price(mut self, values: impl Into<Vec<f64>>) -> Self {
        self.price = Some(values.into());
        self
    }
}

impl Component for TestAsset {
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
            StaticAttribute::NameplateCapacity => self.nameplate,
            StaticAttribute::OptimalCapacity => self.optimal,
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
        self.buses.get(&port.0).map(String::as_str)
    }

    fn series(&self, attr: SeriesAttribute) -> Option<&[f64]> {
        match attr {
            SeriesAttribute::Dispatch(port) => self.dispatch.get(&port.0).map(Vec::as_slice),
            SeriesAttribute::Available => self.available.as_deref(),
            SeriesAttribute::MarginalPrice => self.price.as_deref(),
        }
    }
}

/// Collects [`TestAsset`]s and builds a [`NetworkView`] out of them.
pub(crate) struct NetworkBuilder {
    assets: Vec<TestAsset>,
    snapshots: Snapshots,
}

impl NetworkBuilder {
    pub(crate) fn new<const N: usize>(labels: [&str; N], weights: [f64; N]) -> Self {
        Self {
            assets: vec![],
            snapshots: Snapshots::try_new(labels, weights.to_vec())
                .expect("valid snapshot axis"),
        }
    }

    pub(crate) fn add(&mut self, asset: TestAsset) -> &mut Self {
        self.assets.push(asset);
        self
    }

    pub(crate) fn build(&self) -> Result<NetworkView<TestAsset>, Error> {
        self.build_with_config(NetworkViewConfig::default())
    }

    pub(crate) fn build_with_config(
        &self,
        config: NetworkViewConfig,
    ) -> Result<NetworkView<TestAsset>, Error> {
        NetworkView::try_new(self.assets.clone(), self.snapshots.clone(), config)
    }
}

/// A solved two-bus network used by most statistics tests.
///
/// Four snapshots with weights `[1, 2, 1, 2]`.  Bus `b1` (DE) hosts a solar
/// generator and a load, bus `b2` (FR) hosts a coal generator, a load and a
/// storage unit, and a line connects the two.  Dispatch values balance to
/// zero at both buses in every snapshot.  The storage unit deliberately has
/// no carrier.
pub(crate) fn solved_two_bus_network() -> Result<NetworkView<TestAsset>, Error> {
    let mut builder = NetworkBuilder::new(["t0", "t1", "t2", "t3"], [1.0, 2.0, 1.0, 2.0]);
    builder
        .add(
            TestAsset::bus("b1")
                .carrier("AC")
                .country("DE")
                .unit("MWh")
                .price([20.0, 30.0, 10.0, 40.0]),
        )
        .add(
            TestAsset::bus("b2")
                .carrier("AC")
                .country("FR")
                .unit("MWh")
                .price([25.0, 35.0, 15.0, 45.0]),
        )
        .add(
            TestAsset::new("solar1", ComponentKind::Generator)
                .carrier("solar")
                .attach(0, "b1")
                .nameplate(50.0)
                .optimal(80.0)
                .capital_cost(100.0)
                .marginal_cost(1.0)
                .dispatch(0, [40.0, 60.0, 20.0, 0.0])
                .available([60.0, 80.0, 40.0, 0.0]),
        )
        .add(
            TestAsset::new("coal1", ComponentKind::Generator)
                .carrier("coal")
                .attach(0, "b2")
                .nameplate(100.0)
                .optimal(100.0)
                .capital_cost(50.0)
                .marginal_cost(20.0)
                .dispatch(0, [30.0, 20.0, 60.0, 80.0]),
        )
        .add(
            TestAsset::new("load1", ComponentKind::Load)
                .carrier("electricity")
                .attach(0, "b1")
                .dispatch(0, [-30.0, -30.0, -50.0, -50.0]),
        )
        .add(
            TestAsset::new("load2", ComponentKind::Load)
                .carrier("electricity")
                .attach(0, "b2")
                .dispatch(0, [-40.0, -50.0, -30.0, -30.0]),
        )
        .add(
            TestAsset::new("batt1", ComponentKind::StorageUnit)
                .attach(0, "b2")
                .nameplate(10.0)
                .optimal(10.0)
                .capital_cost(30.0)
                .marginal_cost(0.0)
                .dispatch(0, [0.0, 0.0, 0.0, 0.0]),
        )
        .add(
            TestAsset::new("line1", ComponentKind::Line)
                .carrier("AC")
                .attach(0, "b1")
                .attach(1, "b2")
                .nameplate(60.0)
                .optimal(70.0)
                .capital_cost(10.0)
                .dispatch(0, [-10.0, -30.0, 30.0, 50.0])
                .dispatch(1, [10.0, 30.0, -30.0, -50.0]),
        );
    builder.build()
}
