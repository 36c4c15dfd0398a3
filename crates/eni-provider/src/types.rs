//! Wire model for the provisioning API.
//!
//! Request and response types for every remote operation, plus the
//! provider-owned resource shapes ([`NetworkInterface`], [`Subnet`]).
//! `Option` fields carry omission semantics: `None` means the field is left
//! out of the outbound request entirely, which providers treat differently
//! from an explicit zero or an empty list.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A key/value resource tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    /// Creates a tag.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A describe-query predicate: the interface matches when its `name` field
/// equals any of `values`. Multiple filters are ANDed by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub name: String,
    pub values: Vec<String>,
}

impl Filter {
    /// Creates a filter.
    pub fn new<V: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Provider-side lifecycle state of a network interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterfaceStatus {
    /// Created and not attached to any instance.
    #[default]
    Available,
    /// Attach requested, not yet settled.
    Attaching,
    /// Attached to an instance.
    InUse,
    /// Detach requested, not yet settled.
    Detaching,
    /// Delete requested, not yet settled.
    Deleting,
}

impl InterfaceStatus {
    /// Wire representation of the status.
    pub fn as_str(&self) -> &str {
        match self {
            InterfaceStatus::Available => "available",
            InterfaceStatus::Attaching => "attaching",
            InterfaceStatus::InUse => "in-use",
            InterfaceStatus::Detaching => "detaching",
            InterfaceStatus::Deleting => "deleting",
        }
    }
}

impl FromStr for InterfaceStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(InterfaceStatus::Available),
            "attaching" => Ok(InterfaceStatus::Attaching),
            "in-use" => Ok(InterfaceStatus::InUse),
            "detaching" => Ok(InterfaceStatus::Detaching),
            "deleting" => Ok(InterfaceStatus::Deleting),
            _ => Err(()),
        }
    }
}

/// The attachment record binding an interface to an instance.
///
/// Identified by its own id, distinct from the interface id; detach is
/// addressed by attachment id, not interface id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceAttachment {
    pub attachment_id: String,
    pub instance_id: String,
    pub device_index: u32,
}

/// A provider-owned network interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInterface {
    pub network_interface_id: String,
    pub subnet_id: String,
    pub description: Option<String>,
    /// Security group identifiers.
    pub groups: Vec<String>,
    pub status: InterfaceStatus,
    /// Primary private IPv4 address.
    pub private_ip_address: Option<String>,
    /// Secondary private IPv4 addresses.
    pub secondary_private_ips: Vec<String>,
    pub ipv6_addresses: Vec<String>,
    pub tags: Vec<Tag>,
    /// Present while the interface is (being) attached.
    pub attachment: Option<InterfaceAttachment>,
}

/// Provider-owned subnet metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subnet {
    pub subnet_id: String,
    pub cidr_block: String,
    pub ipv6_cidr_block: Option<String>,
    pub availability_zone: String,
    pub available_ip_address_count: u32,
}

/// Create a network interface in a subnet.
///
/// `tags: None` means no tag-specification block is sent at all; providers
/// reject an empty tag list as invalid. The count fields are omitted unless
/// the caller actually wants extra addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateInterfaceRequest {
    pub subnet_id: String,
    pub description: Option<String>,
    /// Security group identifiers.
    pub groups: Vec<String>,
    pub secondary_private_ip_count: Option<u32>,
    pub ipv6_address_count: Option<u32>,
    pub tags: Option<Vec<Tag>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateInterfaceResponse {
    pub interface: Option<NetworkInterface>,
}

/// Attach an interface to an instance at a device slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachInterfaceRequest {
    pub network_interface_id: String,
    pub instance_id: String,
    pub device_index: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachInterfaceResponse {
    pub attachment_id: Option<String>,
}

/// Detach by attachment id. `force` instructs the provider to skip
/// orderly-shutdown preconditions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetachInterfaceRequest {
    pub attachment_id: String,
    pub force: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteInterfaceRequest {
    pub network_interface_id: String,
}

/// Sparse attribute patch: only populated fields are changed server-side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifyInterfaceAttributeRequest {
    pub network_interface_id: String,
    pub description: Option<String>,
    /// Replacement security group set.
    pub groups: Option<Vec<String>>,
}

/// Assign secondary private IPv4 addresses, either explicitly or by count.
/// A populated address list and a count are never sent together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignPrivateIpsRequest {
    pub network_interface_id: String,
    pub private_ip_addresses: Vec<String>,
    pub secondary_private_ip_count: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignPrivateIpsResponse {
    pub assigned_private_ip_addresses: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnassignPrivateIpsRequest {
    pub network_interface_id: String,
    pub private_ip_addresses: Vec<String>,
}

/// Assign IPv6 addresses, either explicitly or by count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignIpv6AddressesRequest {
    pub network_interface_id: String,
    pub ipv6_addresses: Vec<String>,
    pub ipv6_address_count: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignIpv6AddressesResponse {
    pub assigned_ipv6_addresses: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnassignIpv6AddressesRequest {
    pub network_interface_id: String,
    pub ipv6_addresses: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribeInterfacesRequest {
    pub filters: Vec<Filter>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribeInterfacesResponse {
    pub network_interfaces: Vec<NetworkInterface>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribeSubnetsRequest {
    pub subnet_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribeSubnetsResponse {
    pub subnets: Vec<Subnet>,
}
