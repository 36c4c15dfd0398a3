//! Scripted provider doubles for tests.
//!
//! [`RecordingClient`] captures every outbound request and answers with
//! canned responses, so tests can assert on the exact request shape the
//! manager produced. [`FailingClient`] fails every call with a fixed error,
//! for exercising error translation paths.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::client::ProviderClient;
use crate::error::{ProviderError, ProviderResult};
use crate::types::{
    AssignIpv6AddressesRequest, AssignIpv6AddressesResponse, AssignPrivateIpsRequest,
    AssignPrivateIpsResponse, AttachInterfaceRequest, AttachInterfaceResponse,
    CreateInterfaceRequest, CreateInterfaceResponse, DeleteInterfaceRequest,
    DescribeInterfacesRequest, DescribeInterfacesResponse, DescribeSubnetsRequest,
    DescribeSubnetsResponse, DetachInterfaceRequest, ModifyInterfaceAttributeRequest,
    NetworkInterface, Subnet, UnassignIpv6AddressesRequest, UnassignPrivateIpsRequest,
};

/// A request captured by [`RecordingClient`], in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum CapturedRequest {
    Create(CreateInterfaceRequest),
    Attach(AttachInterfaceRequest),
    Detach(DetachInterfaceRequest),
    Delete(DeleteInterfaceRequest),
    Modify(ModifyInterfaceAttributeRequest),
    AssignPrivateIps(AssignPrivateIpsRequest),
    UnassignPrivateIps(UnassignPrivateIpsRequest),
    AssignIpv6(AssignIpv6AddressesRequest),
    UnassignIpv6(UnassignIpv6AddressesRequest),
    DescribeInterfaces(DescribeInterfacesRequest),
    DescribeSubnets(DescribeSubnetsRequest),
}

#[derive(Default)]
struct CannedResponses {
    interface: Option<NetworkInterface>,
    attachment_id: Option<String>,
    assigned_private_ips: Vec<String>,
    assigned_ipv6_addresses: Vec<String>,
    interfaces: Vec<NetworkInterface>,
    subnets: Vec<Subnet>,
}

/// Provider double that records requests and returns canned responses.
#[derive(Default)]
pub struct RecordingClient {
    requests: Mutex<Vec<CapturedRequest>>,
    canned: Mutex<CannedResponses>,
}

impl RecordingClient {
    /// Creates a client whose responses are all empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the interface returned from create.
    pub fn with_interface(self, interface: NetworkInterface) -> Self {
        self.canned().interface = Some(interface);
        self
    }

    /// Sets the attachment id returned from attach.
    pub fn with_attachment_id(self, attachment_id: impl Into<String>) -> Self {
        self.canned().attachment_id = Some(attachment_id.into());
        self
    }

    /// Sets the addresses reported assigned by assign-private-ips.
    pub fn with_assigned_private_ips<S: Into<String>>(
        self,
        addresses: impl IntoIterator<Item = S>,
    ) -> Self {
        self.canned().assigned_private_ips = addresses.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the addresses reported assigned by assign-ipv6-addresses.
    pub fn with_assigned_ipv6_addresses<S: Into<String>>(
        self,
        addresses: impl IntoIterator<Item = S>,
    ) -> Self {
        self.canned().assigned_ipv6_addresses = addresses.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the interface list returned from describe-interfaces.
    pub fn with_interfaces(self, interfaces: impl IntoIterator<Item = NetworkInterface>) -> Self {
        self.canned().interfaces = interfaces.into_iter().collect();
        self
    }

    /// Sets the subnet list returned from describe-subnets.
    pub fn with_subnets(self, subnets: impl IntoIterator<Item = Subnet>) -> Self {
        self.canned().subnets = subnets.into_iter().collect();
        self
    }

    /// All requests seen so far, in call order.
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, request: CapturedRequest) {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
    }

    fn canned(&self) -> MutexGuard<'_, CannedResponses> {
        self.canned.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ProviderClient for RecordingClient {
    async fn create_interface(
        &self,
        request: CreateInterfaceRequest,
    ) -> ProviderResult<CreateInterfaceResponse> {
        self.record(CapturedRequest::Create(request));
        Ok(CreateInterfaceResponse {
            interface: self.canned().interface.clone(),
        })
    }

    async fn attach_interface(
        &self,
        request: AttachInterfaceRequest,
    ) -> ProviderResult<AttachInterfaceResponse> {
        self.record(CapturedRequest::Attach(request));
        Ok(AttachInterfaceResponse {
            attachment_id: self.canned().attachment_id.clone(),
        })
    }

    async fn detach_interface(&self, request: DetachInterfaceRequest) -> ProviderResult<()> {
        self.record(CapturedRequest::Detach(request));
        Ok(())
    }

    async fn delete_interface(&self, request: DeleteInterfaceRequest) -> ProviderResult<()> {
        self.record(CapturedRequest::Delete(request));
        Ok(())
    }

    async fn modify_interface_attribute(
        &self,
        request: ModifyInterfaceAttributeRequest,
    ) -> ProviderResult<()> {
        self.record(CapturedRequest::Modify(request));
        Ok(())
    }

    async fn assign_private_ips(
        &self,
        request: AssignPrivateIpsRequest,
    ) -> ProviderResult<AssignPrivateIpsResponse> {
        self.record(CapturedRequest::AssignPrivateIps(request));
        Ok(AssignPrivateIpsResponse {
            assigned_private_ip_addresses: self.canned().assigned_private_ips.clone(),
        })
    }

    async fn unassign_private_ips(
        &self,
        request: UnassignPrivateIpsRequest,
    ) -> ProviderResult<()> {
        self.record(CapturedRequest::UnassignPrivateIps(request));
        Ok(())
    }

    async fn assign_ipv6_addresses(
        &self,
        request: AssignIpv6AddressesRequest,
    ) -> ProviderResult<AssignIpv6AddressesResponse> {
        self.record(CapturedRequest::AssignIpv6(request));
        Ok(AssignIpv6AddressesResponse {
            assigned_ipv6_addresses: self.canned().assigned_ipv6_addresses.clone(),
        })
    }

    async fn unassign_ipv6_addresses(
        &self,
        request: UnassignIpv6AddressesRequest,
    ) -> ProviderResult<()> {
        self.record(CapturedRequest::UnassignIpv6(request));
        Ok(())
    }

    async fn describe_interfaces(
        &self,
        request: DescribeInterfacesRequest,
    ) -> ProviderResult<DescribeInterfacesResponse> {
        self.record(CapturedRequest::DescribeInterfaces(request));
        Ok(DescribeInterfacesResponse {
            network_interfaces: self.canned().interfaces.clone(),
        })
    }

    async fn describe_subnets(
        &self,
        request: DescribeSubnetsRequest,
    ) -> ProviderResult<DescribeSubnetsResponse> {
        self.record(CapturedRequest::DescribeSubnets(request));
        Ok(DescribeSubnetsResponse {
            subnets: self.canned().subnets.clone(),
        })
    }
}

/// Provider double that fails every call with a clone of one error.
pub struct FailingClient {
    error: ProviderError,
}

impl FailingClient {
    /// Creates a client failing with the given error.
    pub fn new(error: ProviderError) -> Self {
        Self { error }
    }

    fn fail<T>(&self) -> ProviderResult<T> {
        Err(self.error.clone())
    }
}

#[async_trait]
impl ProviderClient for FailingClient {
    async fn create_interface(
        &self,
        _request: CreateInterfaceRequest,
    ) -> ProviderResult<CreateInterfaceResponse> {
        self.fail()
    }

    async fn attach_interface(
        &self,
        _request: AttachInterfaceRequest,
    ) -> ProviderResult<AttachInterfaceResponse> {
        self.fail()
    }

    async fn detach_interface(&self, _request: DetachInterfaceRequest) -> ProviderResult<()> {
        self.fail()
    }

    async fn delete_interface(&self, _request: DeleteInterfaceRequest) -> ProviderResult<()> {
        self.fail()
    }

    async fn modify_interface_attribute(
        &self,
        _request: ModifyInterfaceAttributeRequest,
    ) -> ProviderResult<()> {
        self.fail()
    }

    async fn assign_private_ips(
        &self,
        _request: AssignPrivateIpsRequest,
    ) -> ProviderResult<AssignPrivateIpsResponse> {
        self.fail()
    }

    async fn unassign_private_ips(
        &self,
        _request: UnassignPrivateIpsRequest,
    ) -> ProviderResult<()> {
        self.fail()
    }

    async fn assign_ipv6_addresses(
        &self,
        _request: AssignIpv6AddressesRequest,
    ) -> ProviderResult<AssignIpv6AddressesResponse> {
        self.fail()
    }

    async fn unassign_ipv6_addresses(
        &self,
        _request: UnassignIpv6AddressesRequest,
    ) -> ProviderResult<()> {
        self.fail()
    }

    async fn describe_interfaces(
        &self,
        _request: DescribeInterfacesRequest,
    ) -> ProviderResult<DescribeInterfacesResponse> {
        self.fail()
    }

    async fn describe_subnets(
        &self,
        _request: DescribeSubnetsRequest,
    ) -> ProviderResult<DescribeSubnetsResponse> {
        self.fail()
    }
}
