// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for creating [`NetworkView`] instances from the components of a
//! network model.

use petgraph::graph::{DiGraph, NodeIndex};

use crate::component_kind::KindPredicates;
use crate::network_traits::Port;
use crate::{Component, Error, NetworkViewConfig, Snapshots};

use super::{NetworkView, NodeIndexMap};

/// `NetworkView` instantiation.
impl<C> NetworkView<C>
where
    C: Component,
{
    /// Creates a new [`NetworkView`] from the given components and snapshot
    /// axis.
    ///
    /// Returns an error if the model is inconsistent: duplicate names,
    /// references to unknown buses, ports left unbound (unless allowed by
    /// the config), or series not aligned to the snapshot axis.
    pub fn try_new<ComponentIterator: IntoIterator<Item = C>>(
        components: ComponentIterator,
        snapshots: Snapshots,
        config: NetworkViewConfig,
    ) -> Result<Self, Error> {
        let (graph, indices) = Self::create_nodes(components)?;

        let mut view = Self {
            graph,
            node_indices: indices,
            snapshots,
            config,
        };
        view.bind_ports()?;

        view.validate()?;

        Ok(view)
    }

    fn create_nodes(
        components: impl IntoIterator<Item = C>,
    ) -> Result<(DiGraph<C, Port>, NodeIndexMap), Error> {
        let mut graph = DiGraph::new();
        let mut indices = NodeIndexMap::new();

        for component in components {
            let name = component.name().to_string();

            if indices.contains_key(&name) {
                return Err(Error::invalid_network(format!(
                    "Duplicate component name found: {name}"
                )));
            }

            let idx = graph.add_node(component);
            indices.insert(name, idx);
        }

        Ok((graph, indices))
    }

    fn bind_ports(&mut self) -> Result<(), Error> {
        let mut bindings: Vec<(NodeIndex, NodeIndex, Port)> = vec![];

        for idx in self.graph.node_indices() {
            let component = &self.graph[idx];
            if component.is_bus() {
                continue;
            }

            for port in 0..component.kind().ports() {
                let port = Port(port);
                let Some(bus_name) = component.bus(port) else {
                    if self.config.allow_unbound_ports {
                        continue;
                    }
                    return Err(Error::invalid_network(format!(
                        "{}:{} has no bus at port {}.",
                        component.kind(),
                        component.name(),
                        port
                    )));
                };

                let Some(&bus_idx) = self.node_indices.get(bus_name) else {
                    return Err(Error::invalid_network(format!(
                        "{}:{} references unknown bus {} at port {}.",
                        component.kind(),
                        component.name(),
                        bus_name,
                        port
                    )));
                };
                if !self.graph[bus_idx].is_bus() {
                    return Err(Error::invalid_network(format!(
                        "{}:{} references {} at port {}, which is not a bus.",
                        component.kind(),
                        component.name(),
                        bus_name,
                        port
                    )));
                }

                bindings.push((idx, bus_idx, port));
            }
        }

        for (source, target, port) in bindings {
            self.graph.add_edge(source, target, port);
        }

        Ok(())
    }
}
