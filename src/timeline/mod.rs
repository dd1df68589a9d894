//! The event model consumed by the sequence-diagram renderer.
//!
//! # Structure
//!
//! - `verdict` - test verdicts
//! - `event` - [`Event`], [`EventKind`] and per-kind [`Counters`]
//! - `component` - test components and the lifecycle registry
//! - `filter` - [`FilterConfiguration`] and indexing [`Preferences`]
//! - `factory` - [`EventFactory`], classified record to event

pub mod component;
mod event;
mod factory;
mod filter;
mod verdict;

pub use component::{ComponentRegistry, TestComponent};
pub use event::{Counters, Event, EventKind};
pub use factory::EventFactory;
pub use filter::{FilterConfiguration, PortVisibility, Preferences, VerdictVisibility};
pub use verdict::Verdict;
