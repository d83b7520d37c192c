// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The grouper registry: named functions that derive a grouping label for
//! every asset, used to partition assets before reduction.

use std::collections::HashMap;
use std::sync::Arc;

use crate::component_kind::KindPredicates;
use crate::network_traits::{Port, TextAttribute};
use crate::{Component, Error, NetworkView};

/// A grouper derives one grouping label for an asset, optionally looking at
/// the bus the asset attaches to at the given port.
pub type GrouperFn<C> = Arc<dyn Fn(&NetworkView<C>, &C, Port) -> Result<String, Error>>;

/// How the aggregation engine partitions assets before reduction.
///
/// Resolved against a [`GrouperRegistry`] once at call entry.
pub enum GroupBy<C>
where
    C: Component,
{
    /// A single registered grouper, by name.
    Grouper(String),
    /// A composite key of registered groupers, applied in the given order.
    /// The last name becomes the innermost index level.
    Multi(Vec<String>),
    /// A caller-supplied grouper that is not in the registry.
    Custom { name: String, f: GrouperFn<C> },
    /// No grouping: assets are aggregated per component kind only.
    None,
}

impl<C: Component> Clone for GroupBy<C> {
    fn clone(&self) -> Self {
        match self {
            GroupBy::Grouper(name) => GroupBy::Grouper(name.clone()),
            GroupBy::Multi(names) => GroupBy::Multi(names.clone()),
            GroupBy::Custom { name, f } => GroupBy::Custom {
                name: name.clone(),
                f: Arc::clone(f),
            },
            GroupBy::None => GroupBy::None,
        }
    }
}

impl<C: Component> Default for GroupBy<C> {
    fn default() -> Self {
        GroupBy::Grouper("carrier".to_string())
    }
}

impl<C: Component> GroupBy<C> {
    /// A single registered grouper, by name.
    pub fn grouper(name: impl Into<String>) -> Self {
        GroupBy::Grouper(name.into())
    }

    /// A composite key of registered groupers, applied in the given order.
    pub fn multi(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        GroupBy::Multi(names.into_iter().map(Into::into).collect())
    }

    /// A caller-supplied grouper function, labeled with the given name.
    pub fn custom(
        name: impl Into<String>,
        f: impl Fn(&NetworkView<C>, &C, Port) -> Result<String, Error> + 'static,
    ) -> Self {
        GroupBy::Custom {
            name: name.into(),
            f: Arc::new(f),
        }
    }
}

/// A [`GroupBy`] resolved against a registry: the index level names and the
/// grouper functions producing the key parts, in order.
pub(crate) struct ResolvedGroupBy<C>
where
    C: Component,
{
    level_names: Vec<String>,
    fns: Vec<GrouperFn<C>>,
}

impl<C: Component> ResolvedGroupBy<C> {
    /// Returns the index level names, outermost first.
    pub(crate) fn level_names(&self) -> &[String] {
        &self.level_names
    }

    /// Returns the grouping key parts for the given asset and port.
    pub(crate) fn key(
        &self,
        view: &NetworkView<C>,
        component: &C,
        port: Port,
    ) -> Result<Vec<String>, Error> {
        self.fns
            .iter()
            .map(|f| f(view, component, port))
            .collect()
    }
}

/// A registry of named groupers.
///
/// Default-constructed with the built-in groupers `carrier`, `bus_carrier`,
/// `country`, `name` and `unit`.  The registry is plain mutable state owned
/// by the caller; registration is not synchronized with concurrent lookups.
pub struct GrouperRegistry<C>
where
    C: Component,
{
    groupers: HashMap<String, GrouperFn<C>>,
}

impl<C: Component> Default for GrouperRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Component> GrouperRegistry<C> {
    /// Creates a new registry holding the built-in groupers.
    pub fn new() -> Self {
        let mut registry = Self {
            groupers: HashMap::new(),
        };
        registry.add_grouper("carrier", carrier_grouper);
        registry.add_grouper("bus_carrier", bus_carrier_grouper);
        registry.add_grouper("country", country_grouper);
        registry.add_grouper("name", name_grouper);
        registry.add_grouper("unit", unit_grouper);
        registry
    }

    /// Registers a grouper under the given name, overwriting any existing
    /// grouper with that name.
    pub fn add_grouper(
        &mut self,
        name: impl Into<String>,
        f: impl Fn(&NetworkView<C>, &C, Port) -> Result<String, Error> + 'static,
    ) {
        self.groupers.insert(name.into(), Arc::new(f));
    }

    /// Registers a grouper under the given name, failing with a
    /// `NameConflict` error if a grouper with that name already exists.
    pub fn add_grouper_strict(
        &mut self,
        name: impl Into<String>,
        f: impl Fn(&NetworkView<C>, &C, Port) -> Result<String, Error> + 'static,
    ) -> Result<(), Error> {
        let name = name.into();
        if self.groupers.contains_key(&name) {
            return Err(Error::name_conflict(format!(
                "A grouper named {} is already registered.",
                name
            )));
        }
        self.groupers.insert(name, Arc::new(f));
        Ok(())
    }

    /// Returns the grouper registered under the given name.
    pub fn get(&self, name: &str) -> Result<&GrouperFn<C>, Error> {
        self.groupers.get(name).ok_or_else(|| {
            Error::unknown_grouper(format!("No grouper named {} is registered.", name))
        })
    }

    /// Resolves the given `GroupBy` into level names and grouper functions.
    pub(crate) fn resolve(&self, groupby: &GroupBy<C>) -> Result<ResolvedGroupBy<C>, Error> {
        match groupby {
            GroupBy::Grouper(name) => Ok(ResolvedGroupBy {
                level_names: vec![name.clone()],
                fns: vec![Arc::clone(self.get(name)?)],
            }),
            GroupBy::Multi(names) => {
                if names.is_empty() {
                    return Err(Error::unknown_grouper(
                        "An empty list of groupers was given.",
                    ));
                }
                let mut fns = vec![];
                for name in names {
                    fns.push(Arc::clone(self.get(name)?));
                }
                Ok(ResolvedGroupBy {
                    level_names: names.clone(),
                    fns,
                })
            }
            GroupBy::Custom { name, f } => Ok(ResolvedGroupBy {
                level_names: vec![name.clone()],
                fns: vec![Arc::clone(f)],
            }),
            GroupBy::None => Ok(ResolvedGroupBy {
                level_names: vec![],
                fns: vec![],
            }),
        }
    }
}

/// Returns the bus an asset attaches to at the given port, or the asset
/// itself if it is a bus.
fn port_bus<'a, C: Component>(
    view: &'a NetworkView<C>,
    component: &'a C,
    port: Port,
) -> Result<&'a C, Error> {
    if component.is_bus() {
        Ok(component)
    } else {
        view.bus_at(component.name(), port)
    }
}

fn carrier_grouper<C: Component>(
    _view: &NetworkView<C>,
    component: &C,
    _port: Port,
) -> Result<String, Error> {
    component.carrier().map(str::to_string).ok_or_else(|| {
        Error::missing_attribute(format!(
            "{}:{} has no carrier.",
            component.kind(),
            component.name()
        ))
    })
}

fn bus_carrier_grouper<C: Component>(
    view: &NetworkView<C>,
    component: &C,
    port: Port,
) -> Result<String, Error> {
    let bus = port_bus(view, component, port)?;
    bus.carrier().map(str::to_string).ok_or_else(|| {
        Error::missing_attribute(format!("Bus:{} has no carrier.", bus.name()))
    })
}

fn country_grouper<C: Component>(
    view: &NetworkView<C>,
    component: &C,
    port: Port,
) -> Result<String, Error> {
    let bus = port_bus(view, component, port)?;
    bus.static_text(TextAttribute::Country)
        .map(str::to_string)
        .ok_or_else(|| Error::missing_attribute(format!("Bus:{} has no country.", bus.name())))
}

fn name_grouper<C: Component>(
    _view: &NetworkView<C>,
    component: &C,
    _port: Port,
) -> Result<String, Error> {
    Ok(component.name().to_string())
}

fn unit_grouper<C: Component>(
    view: &NetworkView<C>,
    component: &C,
    port: Port,
) -> Result<String, Error> {
    let bus = port_bus(view, component, port)?;
    bus.static_text(TextAttribute::Unit)
        .map(str::to_string)
        .ok_or_else(|| Error::missing_attribute(format!("Bus:{} has no unit.", bus.name())))
}
