//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters translate between domain types and wire representations. They
//! contain no allocation or scheduling logic.

pub mod bonusly;
