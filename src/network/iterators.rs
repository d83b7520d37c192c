// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Iterators over the components in a `NetworkView`.

use crate::network_traits::Port;
use crate::{Component, ComponentKind};

/// An iterator over the components in a `NetworkView`.
pub struct Components<'a, C>
where
    C: Component,
{
    pub(crate) iter: std::slice::Iter<'a, petgraph::graph::Node<C>>,
}

impl<'a, C> Iterator for Components<'a, C>
where
    C: Component,
{
    type Item = &'a C;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|n| &n.weight)
    }
}

/// An iterator over the components of one kind in a `NetworkView`.
pub struct ComponentsOfKind<'a, C>
where
    C: Component,
{
    pub(crate) iter: std::slice::Iter<'a, petgraph::graph::Node<C>>,
    pub(crate) kind: ComponentKind,
}

impl<'a, C> Iterator for ComponentsOfKind<'a, C>
where
    C: Component,
{
    type Item = &'a C;

    fn next(&mut self) -> Option<Self::Item> {
        for node in self.iter.by_ref() {
            if node.weight.kind() == self.kind {
                return Some(&node.weight);
            }
        }
        None
    }
}

/// An iterator over the port-to-bus bindings of one component in a
/// `NetworkView`.
pub struct PortBindings<'a, C>
where
    C: Component,
{
    pub(crate) graph: &'a petgraph::graph::DiGraph<C, Port>,
    pub(crate) iter: petgraph::graph::Edges<'a, Port, petgraph::Directed>,
}

impl<'a, C> Iterator for PortBindings<'a, C>
where
    C: Component,
{
    type Item = (Port, &'a C);

    fn next(&mut self) -> Option<Self::Item> {
        use petgraph::visit::EdgeRef;

        self.iter
            .next()
            .map(|e| (*e.weight(), &self.graph[e.target()]))
    }
}
