// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for retrieving components from a [`NetworkView`].

use petgraph::visit::EdgeRef;

use crate::network::iterators::{Components, ComponentsOfKind, PortBindings};
use crate::network_traits::Port;
use crate::{
    Component, ComponentKind, Error, GrouperRegistry, NetworkView, NetworkViewConfig, Snapshots,
    Statistics,
};

/// Component retrieval.
impl<C> NetworkView<C>
where
    C: Component,
{
    /// Returns the component with the given name, if it exists.
    pub fn component(&self, name: &str) -> Result<&C, Error> {
        self.node_indices
            .get(name)
            .map(|i| &self.graph[*i])
            .ok_or_else(|| {
                Error::unknown_component(format!("Component with name {} not found.", name))
            })
    }

    /// Returns an iterator over the components in the view.
    pub fn components(&self) -> Components<'_, C> {
        Components {
            iter: self.graph.raw_nodes().iter(),
        }
    }

    /// Returns an iterator over the components of the given kind.
    pub fn components_of_kind(&self, kind: ComponentKind) -> ComponentsOfKind<'_, C> {
        ComponentsOfKind {
            iter: self.graph.raw_nodes().iter(),
            kind,
        }
    }

    /// Returns the component kinds present in the view, in canonical order.
    pub fn kinds(&self) -> Vec<ComponentKind> {
        ComponentKind::all()
            .into_iter()
            .filter(|kind| self.components().any(|c| c.kind() == *kind))
            .collect()
    }

    /// Returns the bus the component with the given name attaches to at the
    /// given port.
    ///
    /// Returns an error if the component does not exist, or a
    /// `MissingAttribute` error if it has no binding at that port.
    pub fn bus_at(&self, name: &str, port: Port) -> Result<&C, Error> {
        let index = self.node_indices.get(name).ok_or_else(|| {
            Error::unknown_component(format!("Component with name {} not found.", name))
        })?;

        self.graph
            .edges(*index)
            .find(|e| *e.weight() == port)
            .map(|e| &self.graph[e.target()])
            .ok_or_else(|| {
                Error::missing_attribute(format!("{} has no bus at port {}.", name, port))
            })
    }

    /// Returns an iterator over the port-to-bus bindings of the component
    /// with the given name.
    ///
    /// Returns an error if the given name does not exist.
    pub fn port_bindings(&self, name: &str) -> Result<PortBindings<'_, C>, Error> {
        self.node_indices
            .get(name)
            .map(|&index| PortBindings {
                graph: &self.graph,
                iter: self.graph.edges(index),
            })
            .ok_or_else(|| {
                Error::unknown_component(format!("Component with name {} not found.", name))
            })
    }

    /// Returns the snapshot axis of the view.
    pub fn snapshots(&self) -> &Snapshots {
        &self.snapshots
    }

    /// Returns the configuration of the view.
    pub fn config(&self) -> &NetworkViewConfig {
        &self.config
    }

    /// Returns the statistics accessor for the view, computing metrics with
    /// the groupers in the given registry.
    pub fn statistics<'a>(&'a self, registry: &'a GrouperRegistry<C>) -> Statistics<'a, C> {
        Statistics::new(self, registry)
    }
}

#[cfg(test)]
mod tests {
    use crate::network::test_utils::solved_two_bus_network;
    use crate::network_traits::Port;
    use crate::{Component, ComponentKind, Error};

    #[test]
    fn test_component() -> Result<(), Error> {
        let view = solved_two_bus_network()?;

        assert_eq!(view.component("solar1")?.name(), "solar1");
        assert_eq!(view.component("b2")?.kind(), ComponentKind::Bus);
        assert_eq!(
            view.component("nope"),
            Err(Error::unknown_component(
                "Component with name nope not found."
            ))
        );

        Ok(())
    }

    #[test]
    fn test_components_of_kind() -> Result<(), Error> {
        let view = solved_two_bus_network()?;

        let generators: Vec<_> = view
            .components_of_kind(ComponentKind::Generator)
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(generators, ["solar1", "coal1"]);

        assert_eq!(view.components_of_kind(ComponentKind::Link).count(), 0);

        Ok(())
    }

    #[test]
    fn test_kinds() -> Result<(), Error> {
        let view = solved_two_bus_network()?;

        assert_eq!(
            view.kinds(),
            [
                ComponentKind::Bus,
                ComponentKind::Generator,
                ComponentKind::Load,
                ComponentKind::StorageUnit,
                ComponentKind::Line,
            ]
        );

        Ok(())
    }

    #[test]
    fn test_bus_at() -> Result<(), Error> {
        let view = solved_two_bus_network()?;

        assert_eq!(view.bus_at("solar1", Port(0))?.name(), "b1");
        assert_eq!(view.bus_at("line1", Port(0))?.name(), "b1");
        assert_eq!(view.bus_at("line1", Port(1))?.name(), "b2");
        assert_eq!(
            view.bus_at("solar1", Port(1)),
            Err(Error::missing_attribute("solar1 has no bus at port p1."))
        );
        assert_eq!(
            view.bus_at("nope", Port(0)),
            Err(Error::unknown_component(
                "Component with name nope not found."
            ))
        );

        Ok(())
    }

    #[test]
    fn test_port_bindings() -> Result<(), Error> {
        let view = solved_two_bus_network()?;

        let mut bindings: Vec<_> = view
            .port_bindings("line1")?
            .map(|(port, bus)| (port, bus.name().to_string()))
            .collect();
        bindings.sort();
        assert_eq!(
            bindings,
            [(Port(0), "b1".to_string()), (Port(1), "b2".to_string())]
        );

        assert_eq!(view.port_bindings("b1")?.count(), 0);

        Ok(())
    }
}
