// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! A read-only view of the components of a power network model, indexed for
//! statistic computations.

mod creation;
mod retrieval;
mod validation;

pub mod iterators;

#[cfg(test)]
pub(crate) mod test_utils;

use crate::network_traits::Port;
use crate::{Component, NetworkViewConfig, Snapshots};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Components stored in a `DiGraph` instance can be addressed with
/// `NodeIndex`es.
///
/// `NodeIndexMap` stores the corresponding `NodeIndex` for any component
/// name, so that components in the `DiGraph` can be retrieved from their
/// names.
pub(crate) type NodeIndexMap = HashMap<String, NodeIndex>;

/// A read-only view of the components of a power network model.
///
/// Every component is a node of the graph; each non-bus asset has one edge
/// per port, pointing at the bus the port is bound to and labeled with the
/// port role.  The view also carries the snapshot axis the model's series
/// are aligned to.
pub struct NetworkView<C>
where
    C: Component,
{
    graph: DiGraph<C, Port>,
    node_indices: NodeIndexMap,
    snapshots: Snapshots,
    config: NetworkViewConfig,
}
