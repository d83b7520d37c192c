// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module defines the `ComponentKind` enum, which represents the class
//! of a network component.

use crate::network_traits::Component;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Represents the class of a network component.
///
/// Every asset in the model belongs to exactly one kind, and each kind has a
/// fixed number of port roles through which its assets attach to buses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Bus,
    Generator,
    Load,
    StorageUnit,
    Store,
    Line,
    Link,
    Transformer,
}

impl Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentKind::Bus => write!(f, "Bus"),
            ComponentKind::Generator => write!(f, "Generator"),
            ComponentKind::Load => write!(f, "Load"),
            ComponentKind::StorageUnit => write!(f, "StorageUnit"),
            ComponentKind::Store => write!(f, "Store"),
            ComponentKind::Line => write!(f, "Line"),
            ComponentKind::Link => write!(f, "Link"),
            ComponentKind::Transformer => write!(f, "Transformer"),
        }
    }
}

impl ComponentKind {
    /// All component kinds, in their canonical reporting order.
    pub fn all() -> [ComponentKind; 8] {
        [
            ComponentKind::Bus,
            ComponentKind::Generator,
            ComponentKind::Load,
            ComponentKind::StorageUnit,
            ComponentKind::Store,
            ComponentKind::Line,
            ComponentKind::Link,
            ComponentKind::Transformer,
        ]
    }

    /// The number of port roles assets of this kind attach to buses with.
    pub fn ports(&self) -> u32 {
        match self {
            ComponentKind::Bus => 0,
            ComponentKind::Generator
            | ComponentKind::Load
            | ComponentKind::StorageUnit
            | ComponentKind::Store => 1,
            ComponentKind::Line | ComponentKind::Link | ComponentKind::Transformer => 2,
        }
    }

    /// Whether assets of this kind carry nameplate/optimal capacity and
    /// capital cost attributes.
    pub fn has_capacity(&self) -> bool {
        matches!(
            self,
            ComponentKind::Generator
                | ComponentKind::StorageUnit
                | ComponentKind::Store
                | ComponentKind::Line
                | ComponentKind::Link
                | ComponentKind::Transformer
        )
    }

    /// Whether assets of this kind have a per-snapshot dispatch series at
    /// their ports.
    pub fn has_dispatch(&self) -> bool {
        *self != ComponentKind::Bus
    }

    /// Whether this kind transports power between two buses.
    pub fn is_transmission(&self) -> bool {
        matches!(
            self,
            ComponentKind::Line | ComponentKind::Link | ComponentKind::Transformer
        )
    }
}

/// Predicates for checking the component kind of a [`Component`].
pub(crate) trait KindPredicates: Component {
    fn is_bus(&self) -> bool {
        self.kind() == ComponentKind::Bus
    }
}

/// Implement the `KindPredicates` trait for all types that implement the
/// `Component` trait.
impl<T: Component> KindPredicates for T {}
