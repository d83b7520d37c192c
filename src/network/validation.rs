// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for validating a [`NetworkView`].

use crate::network_traits::{Port, SeriesAttribute};
use crate::{Component, Error, NetworkView};

impl<C> NetworkView<C>
where
    C: Component,
{
    /// Checks that every populated series of every component is aligned to
    /// the snapshot axis.
    pub(super) fn validate(&self) -> Result<(), Error> {
        for component in self.components() {
            let mut attrs = vec![SeriesAttribute::Available, SeriesAttribute::MarginalPrice];
            for port in 0..component.kind().ports().max(1) {
                attrs.push(SeriesAttribute::Dispatch(Port(port)));
            }

            for attr in attrs {
                let Some(series) = component.series(attr) else {
                    continue;
                };
                if series.len() != self.snapshots.len() {
                    return Err(Error::invalid_network(format!(
                        "{}:{} has {} values for {} but the network has {} snapshots.",
                        component.kind(),
                        component.name(),
                        series.len(),
                        attr,
                        self.snapshots.len()
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::network::test_utils::{NetworkBuilder, TestAsset};
    use crate::{ComponentKind, Error};

    #[test]
    fn test_series_alignment() {
        let mut builder = NetworkBuilder::new(["t0", "t1"], [1.0, 1.0]);
        builder.add(TestAsset::bus("b1").carrier("AC"));
        builder.add(
            TestAsset::new("gen1", ComponentKind::Generator)
                .carrier("solar")
                .attach(0, "b1")
                .dispatch(0, [1.0, 2.0, 3.0]),
        );

        assert!(builder.build().is_err_and(|e| e
            == Error::invalid_network(
                "Generator:gen1 has 3 values for dispatch_p0 but the network has 2 snapshots."
            )));
    }

    #[test]
    fn test_price_alignment() {
        let mut builder = NetworkBuilder::new(["t0", "t1"], [1.0, 1.0]);
        builder.add(TestAsset::bus("b1").carrier("AC").price([5.0]));

        assert!(builder.build().is_err_and(|e| e
            == Error::invalid_network(
                "Bus:b1 has 1 values for marginal_price but the network has 2 snapshots."
            )));
    }
}
