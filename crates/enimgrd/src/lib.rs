//! enimgrd - ENI lifecycle manager.
//!
//! Manages cloud network interfaces (ENIs) by translating lifecycle intents
//! into provider API requests: create, attach, detach, delete, attribute
//! patches, and secondary IPv4/IPv6 address management. All durable state
//! lives on the provider; the manager is a stateless request-shaping and
//! error-normalizing layer over an injected [`eni_provider::ProviderClient`].

pub mod eni_mgr;
pub mod error;
pub mod requests;
pub mod types;

// Re-export commonly used items at crate root
pub use eni_mgr::EniMgr;
pub use error::{EniError, EniResult};
pub use types::{EniAttributePatch, EniConfig, IpAllocation};
