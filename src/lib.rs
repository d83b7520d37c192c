// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

/*!
# Power Network Statistics

This is a library for computing standardized techno-economic statistics over
a power network model: capacities, costs, dispatched energy, curtailment,
prices, revenue and related metrics, aggregated over flexible groupings of
the network's assets.

## The `Component` trait

The main struct is [`NetworkView`], instances of which can be created by
passing an iterator of components and a snapshot axis to the
[`try_new`][NetworkView::try_new] method.

But because this is an independent library, it doesn't know about the
caller's component types and instead uses a trait to interact with them.
Therefore, to be usable with this library, the component type must implement
the [`Component`] trait.  Check out the documentation of the trait for a
sample implementation.

## Validation

The [`try_new`][NetworkView::try_new] method performs several checks on the
model, including checking that:

- All component names are unique.
- All port bindings point to existing buses.
- No port is left unbound, unless the configuration allows it.
- All time series are aligned to the snapshot axis.

If any of the validation steps fail, the method will return an [`Error`],
and a [`NetworkView`] instance otherwise.

## Statistics

The [`statistics`][NetworkView::statistics] accessor computes the metrics.
Every metric takes the same [`StatisticOptions`]: the component kinds to
include, a [`GroupBy`] resolved against a [`GrouperRegistry`], a
[`TimeAggregation`] and optional carrier and port filters.  The computed
[`StatisticResult`] carries labeled rows and feeds the plotting facade via
[`plot`][StatisticResult::plot] and [`iplot`][StatisticResult::iplot].
*/

mod component_kind;
pub use component_kind::ComponentKind;

mod network_traits;
pub use network_traits::{Component, Port, SeriesAttribute, StaticAttribute, TextAttribute};

mod snapshots;
pub use snapshots::Snapshots;

mod config;
pub use config::{MissingAttributePolicy, NetworkViewConfig};

mod network;
pub use network::{iterators, NetworkView};

mod groupers;
pub use groupers::{GroupBy, GrouperFn, GrouperRegistry};

mod statistics;
pub use statistics::{StatisticOptions, Statistics, TimeAggregation};

mod result;
pub use result::{ResultKey, StatisticResult, StatisticValue};

mod plot;
pub use plot::{PlotAccessor, PlotKind, PlotSeries, PlotSpec, Renderer};

mod error;
pub use error::Error;
