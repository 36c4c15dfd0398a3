//! The provider capability trait.

use async_trait::async_trait;

use crate::error::ProviderResult;
use crate::types::{
    AssignIpv6AddressesRequest, AssignIpv6AddressesResponse, AssignPrivateIpsRequest,
    AssignPrivateIpsResponse, AttachInterfaceRequest, AttachInterfaceResponse,
    CreateInterfaceRequest, CreateInterfaceResponse, DeleteInterfaceRequest,
    DescribeInterfacesRequest, DescribeInterfacesResponse, DescribeSubnetsRequest,
    DescribeSubnetsResponse, DetachInterfaceRequest, ModifyInterfaceAttributeRequest,
    UnassignIpv6AddressesRequest, UnassignPrivateIpsRequest,
};

/// Remote provisioning API surface consumed by the interface manager.
///
/// One method per remote operation. Implementations are expected to be thin
/// transport bindings: no retries, no caching, no request rewriting. The
/// manager is constructed over this trait so tests can substitute a double
/// that records requests and returns scripted responses.
///
/// # Cancellation
///
/// Each method maps to exactly one outbound request. Dropping the returned
/// future abandons the call; callers wanting a deadline wrap the call in
/// `tokio::time::timeout`. Nothing runs after the future is dropped.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Creates a network interface.
    async fn create_interface(
        &self,
        request: CreateInterfaceRequest,
    ) -> ProviderResult<CreateInterfaceResponse>;

    /// Attaches an interface to an instance.
    async fn attach_interface(
        &self,
        request: AttachInterfaceRequest,
    ) -> ProviderResult<AttachInterfaceResponse>;

    /// Detaches an interface by attachment id.
    async fn detach_interface(&self, request: DetachInterfaceRequest) -> ProviderResult<()>;

    /// Deletes an interface. The provider rejects interfaces still attached.
    async fn delete_interface(&self, request: DeleteInterfaceRequest) -> ProviderResult<()>;

    /// Modifies interface attributes; only populated fields change.
    async fn modify_interface_attribute(
        &self,
        request: ModifyInterfaceAttributeRequest,
    ) -> ProviderResult<()>;

    /// Assigns secondary private IPv4 addresses.
    async fn assign_private_ips(
        &self,
        request: AssignPrivateIpsRequest,
    ) -> ProviderResult<AssignPrivateIpsResponse>;

    /// Unassigns secondary private IPv4 addresses.
    async fn unassign_private_ips(&self, request: UnassignPrivateIpsRequest)
        -> ProviderResult<()>;

    /// Assigns IPv6 addresses.
    async fn assign_ipv6_addresses(
        &self,
        request: AssignIpv6AddressesRequest,
    ) -> ProviderResult<AssignIpv6AddressesResponse>;

    /// Unassigns IPv6 addresses.
    async fn unassign_ipv6_addresses(
        &self,
        request: UnassignIpv6AddressesRequest,
    ) -> ProviderResult<()>;

    /// Lists interfaces matching the ANDed filters.
    async fn describe_interfaces(
        &self,
        request: DescribeInterfacesRequest,
    ) -> ProviderResult<DescribeInterfacesResponse>;

    /// Looks up subnet metadata by id.
    async fn describe_subnets(
        &self,
        request: DescribeSubnetsRequest,
    ) -> ProviderResult<DescribeSubnetsResponse>;
}
