// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module defines the `Snapshots` type, the time discretization of the
//! network model.

use crate::Error;
use serde::{Deserialize, Serialize};

/// The ordered sequence of time steps of the network model.
///
/// Each snapshot carries a non-negative weight, used to convert per-snapshot
/// power values into energy when summing over time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshots {
    labels: Vec<String>,
    weights: Vec<f64>,
}

impl Snapshots {
    /// Creates a new `Snapshots` from the given labels and weights.
    ///
    /// Returns an error if the two are not aligned, if no snapshots are
    /// given, or if any weight is negative or not finite.
    pub fn try_new(
        labels: impl IntoIterator<Item = impl Into<String>>,
        weights: impl IntoIterator<Item = f64>,
    ) -> Result<Self, Error> {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let weights: Vec<f64> = weights.into_iter().collect();

        if labels.is_empty() {
            return Err(Error::invalid_network("No snapshots given."));
        }
        if labels.len() != weights.len() {
            return Err(Error::invalid_network(format!(
                "Got {} snapshots but {} weights.",
                labels.len(),
                weights.len()
            )));
        }
        for (label, weight) in labels.iter().zip(&weights) {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(Error::invalid_network(format!(
                    "Snapshot {} has invalid weight {}.",
                    label, weight
                )));
            }
        }

        Ok(Self { labels, weights })
    }

    /// Creates a new `Snapshots` where every snapshot has weight `1.0`.
    pub fn with_unit_weights(
        labels: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, Error> {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let weights = vec![1.0; labels.len()];
        Self::try_new(labels, weights)
    }

    /// Returns the number of snapshots.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if there are no snapshots.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the snapshot labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the snapshot weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

#[cfg(test)]
mod tests {
    use super::Snapshots;
    use crate::Error;

    #[test]
    fn test_creation() -> Result<(), Error> {
        let snapshots = Snapshots::try_new(["t0", "t1", "t2"], [1.0, 2.0, 1.0])?;
        assert_eq!(snapshots.len(), 3);
        assert_eq!(snapshots.labels(), ["t0", "t1", "t2"]);
        assert_eq!(snapshots.weights(), [1.0, 2.0, 1.0]);
        Ok(())
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            Snapshots::try_new(Vec::<String>::new(), []),
            Err(Error::invalid_network("No snapshots given."))
        );
        assert_eq!(
            Snapshots::try_new(["t0", "t1"], [1.0]),
            Err(Error::invalid_network("Got 2 snapshots but 1 weights."))
        );
        assert_eq!(
            Snapshots::try_new(["t0"], [-1.0]),
            Err(Error::invalid_network("Snapshot t0 has invalid weight -1."))
        );
    }

    #[test]
    fn test_unit_weights() -> Result<(), Error> {
        let snapshots = Snapshots::with_unit_weights(["t0", "t1"])?;
        assert_eq!(snapshots.weights(), [1.0, 1.0]);
        Ok(())
    }
}
