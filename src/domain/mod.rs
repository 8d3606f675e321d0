//! Domain layer: chain values, decoded events, entities, and the event bus.
//!
//! This module contains the typed event model for both contracts, the
//! stored entity types derived from them, the ID scheme that ties the two
//! together, and the bus that broadcasts entity writes.

pub mod aggregates;
pub mod deployment;
pub mod entity;
pub mod entity_change;
pub mod event;
pub mod event_bus;
pub mod ids;
pub mod params;
pub mod primitives;
pub mod svsn;
pub mod vsn;

pub use aggregates::{
    BurnContext, CumulativeSupplyStats, MintContext, SupplyChange, SupplySide, SupplySnapshot,
    YieldSnapshot,
};
pub use deployment::Deployment;
pub use entity::{Entity, EntityKey, EventEntity};
pub use entity_change::EntityChange;
pub use event::{DecodedEvent, EventContext, RawEvent};
pub use event_bus::EventBus;
pub use ids::EventId;
pub use primitives::{Address, Bytes32};
pub use svsn::SvsnEvent;
pub use vsn::VsnEvent;
