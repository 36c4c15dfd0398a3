//! In-memory provider simulation.
//!
//! [`InMemoryProvider`] implements [`ProviderClient`] over an in-process
//! store and enforces the provider-side lifecycle rules: attach requires an
//! available interface, delete rejects an attached one, detach is addressed
//! by attachment id. The simulation backs the demo binary and integration
//! tests; stored state is observable through [`InMemoryProvider::interface`]
//! and [`InMemoryProvider::was_force_detached`].
//!
//! The simulation is permissive about subnet ids on create: only
//! describe-subnets consults the seeded subnet set.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use rand::Rng;
use tracing::debug;

use crate::client::ProviderClient;
use crate::error::{ProviderError, ProviderResult};
use crate::types::{
    AssignIpv6AddressesRequest, AssignIpv6AddressesResponse, AssignPrivateIpsRequest,
    AssignPrivateIpsResponse, AttachInterfaceRequest, AttachInterfaceResponse,
    CreateInterfaceRequest, CreateInterfaceResponse, DeleteInterfaceRequest,
    DescribeInterfacesRequest, DescribeInterfacesResponse, DescribeSubnetsRequest,
    DescribeSubnetsResponse, DetachInterfaceRequest, Filter, InterfaceAttachment,
    InterfaceStatus, ModifyInterfaceAttributeRequest, NetworkInterface, Subnet,
    UnassignIpv6AddressesRequest, UnassignPrivateIpsRequest,
};

/// Code reported when an interface id does not resolve.
pub const ERR_INTERFACE_NOT_FOUND: &str = "InvalidNetworkInterfaceID.NotFound";

/// Code reported when an operation requires a detached interface.
pub const ERR_INTERFACE_IN_USE: &str = "InvalidNetworkInterface.InUse";

/// Code reported when an attachment id does not resolve.
pub const ERR_ATTACHMENT_NOT_FOUND: &str = "InvalidAttachmentID.NotFound";

/// Code reported when an address operation references an unassigned address.
pub const ERR_ADDRESS_NOT_FOUND: &str = "InvalidParameterValue";

#[derive(Default)]
struct ProviderState {
    interfaces: HashMap<String, NetworkInterface>,
    /// attachment id -> interface id
    attachments: HashMap<String, String>,
    subnets: HashMap<String, Subnet>,
    /// Attachment ids detached with the force flag set.
    forced_detaches: Vec<String>,
    next_host: u32,
}

impl ProviderState {
    fn next_private_ip(&mut self) -> String {
        let host = self.next_host;
        self.next_host += 1;
        format!("10.0.{}.{}", (host >> 8) & 0xff, host & 0xff)
    }

    fn next_ipv6(&mut self) -> String {
        let host = self.next_host;
        self.next_host += 1;
        format!("2001:db8::{:x}", host)
    }

    fn interface_mut(&mut self, id: &str) -> ProviderResult<&mut NetworkInterface> {
        self.interfaces.get_mut(id).ok_or_else(|| {
            ProviderError::api(
                ERR_INTERFACE_NOT_FOUND,
                format!("network interface '{}' does not exist", id),
            )
        })
    }
}

fn random_id(prefix: &str) -> String {
    format!("{}-{:08x}", prefix, rand::thread_rng().gen::<u32>())
}

fn matches_filter(interface: &NetworkInterface, filter: &Filter) -> bool {
    let field = match filter.name.as_str() {
        "network-interface-id" => Some(interface.network_interface_id.as_str()),
        "subnet-id" => Some(interface.subnet_id.as_str()),
        "status" => Some(interface.status.as_str()),
        // Unknown filter names match nothing.
        _ => None,
    };
    match field {
        Some(value) => filter.values.iter().any(|v| v == value),
        None => false,
    }
}

/// Stateful provider double simulating the remote interface store.
pub struct InMemoryProvider {
    state: Mutex<ProviderState>,
}

impl InMemoryProvider {
    /// Creates an empty provider.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ProviderState {
                next_host: 10,
                ..ProviderState::default()
            }),
        }
    }

    /// Seeds subnet metadata served by describe-subnets.
    pub fn with_subnet(self, subnet: Subnet) -> Self {
        {
            let mut state = self.state();
            state.subnets.insert(subnet.subnet_id.clone(), subnet);
        }
        self
    }

    /// Snapshot of a stored interface, if it still exists.
    pub fn interface(&self, interface_id: &str) -> Option<NetworkInterface> {
        self.state().interfaces.get(interface_id).cloned()
    }

    /// True when the attachment was detached with the force flag set.
    pub fn was_force_detached(&self, attachment_id: &str) -> bool {
        self.state().forced_detaches.iter().any(|id| id == attachment_id)
    }

    fn state(&self) -> MutexGuard<'_, ProviderState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderClient for InMemoryProvider {
    async fn create_interface(
        &self,
        request: CreateInterfaceRequest,
    ) -> ProviderResult<CreateInterfaceResponse> {
        let mut state = self.state();
        let id = random_id("eni");
        let primary = state.next_private_ip();
        let secondary = (0..request.secondary_private_ip_count.unwrap_or(0))
            .map(|_| state.next_private_ip())
            .collect();
        let ipv6 = (0..request.ipv6_address_count.unwrap_or(0))
            .map(|_| state.next_ipv6())
            .collect();

        let interface = NetworkInterface {
            network_interface_id: id.clone(),
            subnet_id: request.subnet_id,
            description: request.description,
            groups: request.groups,
            status: InterfaceStatus::Available,
            private_ip_address: Some(primary),
            secondary_private_ips: secondary,
            ipv6_addresses: ipv6,
            tags: request.tags.unwrap_or_default(),
            attachment: None,
        };
        state.interfaces.insert(id.clone(), interface.clone());
        debug!(interface = %id, "simulated interface created");

        Ok(CreateInterfaceResponse {
            interface: Some(interface),
        })
    }

    async fn attach_interface(
        &self,
        request: AttachInterfaceRequest,
    ) -> ProviderResult<AttachInterfaceResponse> {
        let mut state = self.state();
        let attachment_id = random_id("eni-attach");

        let interface = state.interface_mut(&request.network_interface_id)?;
        if interface.status != InterfaceStatus::Available {
            return Err(ProviderError::api(
                ERR_INTERFACE_IN_USE,
                format!(
                    "network interface '{}' is currently in use",
                    request.network_interface_id
                ),
            ));
        }
        interface.status = InterfaceStatus::InUse;
        interface.attachment = Some(InterfaceAttachment {
            attachment_id: attachment_id.clone(),
            instance_id: request.instance_id.clone(),
            device_index: request.device_index,
        });

        state
            .attachments
            .insert(attachment_id.clone(), request.network_interface_id.clone());
        debug!(
            interface = %request.network_interface_id,
            attachment = %attachment_id,
            "simulated interface attached"
        );

        Ok(AttachInterfaceResponse {
            attachment_id: Some(attachment_id),
        })
    }

    async fn detach_interface(&self, request: DetachInterfaceRequest) -> ProviderResult<()> {
        let mut state = self.state();
        let interface_id = state
            .attachments
            .remove(&request.attachment_id)
            .ok_or_else(|| {
                ProviderError::api(
                    ERR_ATTACHMENT_NOT_FOUND,
                    format!("attachment '{}' does not exist", request.attachment_id),
                )
            })?;

        if let Some(interface) = state.interfaces.get_mut(&interface_id) {
            interface.status = InterfaceStatus::Available;
            interface.attachment = None;
        }
        if request.force {
            state.forced_detaches.push(request.attachment_id.clone());
        }
        debug!(
            attachment = %request.attachment_id,
            force = request.force,
            "simulated interface detached"
        );

        Ok(())
    }

    async fn delete_interface(&self, request: DeleteInterfaceRequest) -> ProviderResult<()> {
        let mut state = self.state();
        let interface = state.interface_mut(&request.network_interface_id)?;
        if interface.status == InterfaceStatus::InUse {
            return Err(ProviderError::api(
                ERR_INTERFACE_IN_USE,
                format!(
                    "network interface '{}' is still attached",
                    request.network_interface_id
                ),
            ));
        }
        state.interfaces.remove(&request.network_interface_id);
        debug!(interface = %request.network_interface_id, "simulated interface deleted");
        Ok(())
    }

    async fn modify_interface_attribute(
        &self,
        request: ModifyInterfaceAttributeRequest,
    ) -> ProviderResult<()> {
        let mut state = self.state();
        let interface = state.interface_mut(&request.network_interface_id)?;
        if let Some(description) = request.description {
            interface.description = Some(description);
        }
        if let Some(groups) = request.groups {
            interface.groups = groups;
        }
        Ok(())
    }

    async fn assign_private_ips(
        &self,
        request: AssignPrivateIpsRequest,
    ) -> ProviderResult<AssignPrivateIpsResponse> {
        let mut state = self.state();
        state.interface_mut(&request.network_interface_id)?;

        let assigned: Vec<String> = if !request.private_ip_addresses.is_empty() {
            request.private_ip_addresses.clone()
        } else {
            (0..request.secondary_private_ip_count.unwrap_or(0))
                .map(|_| state.next_private_ip())
                .collect()
        };

        let interface = state.interface_mut(&request.network_interface_id)?;
        interface.secondary_private_ips.extend(assigned.iter().cloned());

        Ok(AssignPrivateIpsResponse {
            assigned_private_ip_addresses: assigned,
        })
    }

    async fn unassign_private_ips(
        &self,
        request: UnassignPrivateIpsRequest,
    ) -> ProviderResult<()> {
        let mut state = self.state();
        let interface = state.interface_mut(&request.network_interface_id)?;
        for address in &request.private_ip_addresses {
            match interface
                .secondary_private_ips
                .iter()
                .position(|a| a == address)
            {
                Some(pos) => {
                    interface.secondary_private_ips.remove(pos);
                }
                None => {
                    return Err(ProviderError::api(
                        ERR_ADDRESS_NOT_FOUND,
                        format!(
                            "address '{}' is not assigned to '{}'",
                            address, request.network_interface_id
                        ),
                    ));
                }
            }
        }
        Ok(())
    }

    async fn assign_ipv6_addresses(
        &self,
        request: AssignIpv6AddressesRequest,
    ) -> ProviderResult<AssignIpv6AddressesResponse> {
        let mut state = self.state();
        state.interface_mut(&request.network_interface_id)?;

        let assigned: Vec<String> = if !request.ipv6_addresses.is_empty() {
            request.ipv6_addresses.clone()
        } else {
            (0..request.ipv6_address_count.unwrap_or(0))
                .map(|_| state.next_ipv6())
                .collect()
        };

        let interface = state.interface_mut(&request.network_interface_id)?;
        interface.ipv6_addresses.extend(assigned.iter().cloned());

        Ok(AssignIpv6AddressesResponse {
            assigned_ipv6_addresses: assigned,
        })
    }

    async fn unassign_ipv6_addresses(
        &self,
        request: UnassignIpv6AddressesRequest,
    ) -> ProviderResult<()> {
        let mut state = self.state();
        let interface = state.interface_mut(&request.network_interface_id)?;
        for address in &request.ipv6_addresses {
            match interface.ipv6_addresses.iter().position(|a| a == address) {
                Some(pos) => {
                    interface.ipv6_addresses.remove(pos);
                }
                None => {
                    return Err(ProviderError::api(
                        ERR_ADDRESS_NOT_FOUND,
                        format!(
                            "address '{}' is not assigned to '{}'",
                            address, request.network_interface_id
                        ),
                    ));
                }
            }
        }
        Ok(())
    }

    async fn describe_interfaces(
        &self,
        request: DescribeInterfacesRequest,
    ) -> ProviderResult<DescribeInterfacesResponse> {
        let state = self.state();
        let network_interfaces = state
            .interfaces
            .values()
            .filter(|interface| request.filters.iter().all(|f| matches_filter(interface, f)))
            .cloned()
            .collect();
        Ok(DescribeInterfacesResponse { network_interfaces })
    }

    async fn describe_subnets(
        &self,
        request: DescribeSubnetsRequest,
    ) -> ProviderResult<DescribeSubnetsResponse> {
        let state = self.state();
        let subnets = request
            .subnet_ids
            .iter()
            .filter_map(|id| state.subnets.get(id).cloned())
            .collect();
        Ok(DescribeSubnetsResponse { subnets })
    }
}
