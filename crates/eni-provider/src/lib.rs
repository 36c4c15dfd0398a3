//! Typed client surface for the ENI provisioning API.
//!
//! This crate is the substrate the interface manager is built on: the
//! request/response wire model, the [`ProviderClient`] capability trait
//! (one async method per remote operation), and the provider error type.
//! All durable interface and attachment state lives on the provider side;
//! nothing here caches or retries.
//!
//! # Architecture
//!
//! - [`types`]: request/response shapes and provider-owned resource models
//! - [`client`]: the [`ProviderClient`] trait consumed by the manager
//! - [`error`]: [`ProviderError`] and the [`ProviderResult`] alias
//! - [`fake`]: [`InMemoryProvider`], a stateful simulation of the remote
//!   interface store used by the demo binary and integration tests
//! - [`testing`]: scripted doubles ([`testing::RecordingClient`],
//!   [`testing::FailingClient`]) for request-shape and error-path tests

pub mod client;
pub mod error;
pub mod fake;
pub mod testing;
pub mod types;

// Re-export commonly used items at crate root
pub use client::ProviderClient;
pub use error::{ProviderError, ProviderResult};
pub use fake::InMemoryProvider;
pub use types::{
    AssignIpv6AddressesRequest, AssignIpv6AddressesResponse, AssignPrivateIpsRequest,
    AssignPrivateIpsResponse, AttachInterfaceRequest, AttachInterfaceResponse,
    CreateInterfaceRequest, CreateInterfaceResponse, DeleteInterfaceRequest,
    DescribeInterfacesRequest, DescribeInterfacesResponse, DescribeSubnetsRequest,
    DescribeSubnetsResponse, DetachInterfaceRequest, Filter, InterfaceAttachment,
    InterfaceStatus, ModifyInterfaceAttributeRequest, NetworkInterface, Subnet, Tag,
    UnassignIpv6AddressesRequest, UnassignPrivateIpsRequest,
};
