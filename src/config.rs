// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the configuration options for the `NetworkView`.

/// What the aggregation engine does with an asset that lacks an attribute a
/// grouper needs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MissingAttributePolicy {
    /// Exclude the asset from the result and emit a warning.
    #[default]
    Exclude,
    /// Fail the whole computation with a `MissingAttribute` error.
    Fail,
}

/// Configuration options for the `NetworkView`.
#[derive(Clone, Debug, Default)]
pub struct NetworkViewConfig {
    /// Whether to allow assets whose declared ports are not all bound to a
    /// bus.  When this is `true`, unbound ports are simply skipped during
    /// aggregation.
    pub allow_unbound_ports: bool,

    /// What to do with assets that lack an attribute requested by a grouper.
    pub missing_attribute: MissingAttributePolicy,
}
