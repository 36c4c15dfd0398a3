//! Request builders for provider calls.
//!
//! Every conditional-field rule lives here, in pure functions the manager
//! calls before invoking the client: omitted-when-empty tag blocks,
//! omitted-unless-positive address counts, the explicit-vs-count address
//! shaping, and the sparse modify patch.

use eni_provider::types::{
    AssignIpv6AddressesRequest, AssignPrivateIpsRequest, AttachInterfaceRequest,
    CreateInterfaceRequest, DeleteInterfaceRequest, DescribeInterfacesRequest,
    DescribeSubnetsRequest, DetachInterfaceRequest, Filter, ModifyInterfaceAttributeRequest,
    Tag, UnassignIpv6AddressesRequest, UnassignPrivateIpsRequest,
};

use crate::types::{EniAttributePatch, EniConfig, IpAllocation};

/// Builds the create request from a config.
///
/// The tag block is omitted entirely when no tags are configured, since an
/// empty tag specification is rejected by the provider. The address-count
/// fields are included only when strictly positive: zero means "do not
/// request", not "request zero". An empty description is omitted.
pub fn build_create_request(config: &EniConfig) -> CreateInterfaceRequest {
    let tags = if config.tags.is_empty() {
        None
    } else {
        Some(
            config
                .tags
                .iter()
                .map(|(key, value)| Tag::new(key, value))
                .collect(),
        )
    };

    CreateInterfaceRequest {
        subnet_id: config.subnet_id.clone(),
        description: if config.description.is_empty() {
            None
        } else {
            Some(config.description.clone())
        },
        groups: config.security_group_ids.clone(),
        secondary_private_ip_count: (config.private_ip_count > 0)
            .then_some(config.private_ip_count),
        ipv6_address_count: (config.ipv6_address_count > 0).then_some(config.ipv6_address_count),
        tags,
    }
}

/// Builds the attach request.
pub fn build_attach_request(
    interface_id: &str,
    instance_id: &str,
    device_index: u32,
) -> AttachInterfaceRequest {
    AttachInterfaceRequest {
        network_interface_id: interface_id.to_string(),
        instance_id: instance_id.to_string(),
        device_index,
    }
}

/// Builds the detach request; the force flag is copied verbatim.
pub fn build_detach_request(attachment_id: &str, force: bool) -> DetachInterfaceRequest {
    DetachInterfaceRequest {
        attachment_id: attachment_id.to_string(),
        force,
    }
}

/// Builds the delete request.
pub fn build_delete_request(interface_id: &str) -> DeleteInterfaceRequest {
    DeleteInterfaceRequest {
        network_interface_id: interface_id.to_string(),
    }
}

/// Builds the modify request from a sparse patch.
///
/// Only non-absent patch fields populate the request; an empty replacement
/// group list counts as absent.
pub fn build_modify_request(
    interface_id: &str,
    patch: &EniAttributePatch,
) -> ModifyInterfaceAttributeRequest {
    ModifyInterfaceAttributeRequest {
        network_interface_id: interface_id.to_string(),
        description: patch.description.clone(),
        groups: patch
            .security_group_ids
            .as_ref()
            .filter(|groups| !groups.is_empty())
            .cloned(),
    }
}

/// Builds the private IPv4 assign request from an allocation choice.
pub fn build_assign_private_ips_request(
    interface_id: &str,
    allocation: &IpAllocation,
) -> AssignPrivateIpsRequest {
    AssignPrivateIpsRequest {
        network_interface_id: interface_id.to_string(),
        private_ip_addresses: allocation.addresses().map(|a| a.to_vec()).unwrap_or_default(),
        secondary_private_ip_count: allocation.count(),
    }
}

/// Builds the private IPv4 unassign request.
pub fn build_unassign_private_ips_request(
    interface_id: &str,
    addresses: &[String],
) -> UnassignPrivateIpsRequest {
    UnassignPrivateIpsRequest {
        network_interface_id: interface_id.to_string(),
        private_ip_addresses: addresses.to_vec(),
    }
}

/// Builds the IPv6 assign request from an allocation choice.
pub fn build_assign_ipv6_request(
    interface_id: &str,
    allocation: &IpAllocation,
) -> AssignIpv6AddressesRequest {
    AssignIpv6AddressesRequest {
        network_interface_id: interface_id.to_string(),
        ipv6_addresses: allocation.addresses().map(|a| a.to_vec()).unwrap_or_default(),
        ipv6_address_count: allocation.count(),
    }
}

/// Builds the IPv6 unassign request.
pub fn build_unassign_ipv6_request(
    interface_id: &str,
    addresses: &[String],
) -> UnassignIpv6AddressesRequest {
    UnassignIpv6AddressesRequest {
        network_interface_id: interface_id.to_string(),
        ipv6_addresses: addresses.to_vec(),
    }
}

/// Builds the describe-interfaces request.
pub fn build_describe_interfaces_request(filters: &[Filter]) -> DescribeInterfacesRequest {
    DescribeInterfacesRequest {
        filters: filters.to_vec(),
    }
}

/// Builds the describe-subnets request for exactly one subnet id.
pub fn build_describe_subnets_request(subnet_id: &str) -> DescribeSubnetsRequest {
    DescribeSubnetsRequest {
        subnet_ids: vec![subnet_id.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_with_empty_tags_omits_tag_block() {
        let config = EniConfig::new("subnet-12345678");
        let request = build_create_request(&config);
        assert_eq!(request.tags, None);
    }

    #[test]
    fn test_create_tags_are_sent_sorted_by_key() {
        let mut config = EniConfig::new("subnet-12345678");
        config.tags.insert("Name".to_string(), "test-eni".to_string());
        config.tags.insert("Env".to_string(), "test".to_string());

        let request = build_create_request(&config);
        assert_eq!(
            request.tags,
            Some(vec![Tag::new("Env", "test"), Tag::new("Name", "test-eni")])
        );
    }

    #[test]
    fn test_create_zero_counts_are_omitted() {
        let config = EniConfig::new("subnet-12345678");
        let request = build_create_request(&config);
        assert_eq!(request.secondary_private_ip_count, None);
        assert_eq!(request.ipv6_address_count, None);
    }

    #[test]
    fn test_create_positive_counts_are_sent_exactly() {
        let mut config = EniConfig::new("subnet-12345678");
        config.private_ip_count = 2;
        config.ipv6_address_count = 1;

        let request = build_create_request(&config);
        assert_eq!(request.secondary_private_ip_count, Some(2));
        assert_eq!(request.ipv6_address_count, Some(1));
    }

    #[test]
    fn test_create_empty_description_is_omitted() {
        let mut config = EniConfig::new("subnet-12345678");
        assert_eq!(build_create_request(&config).description, None);

        config.description = "Test ENI".to_string();
        assert_eq!(
            build_create_request(&config).description,
            Some("Test ENI".to_string())
        );
    }

    #[test]
    fn test_minimal_create_populates_only_subnet() {
        let request = build_create_request(&EniConfig::new("subnet-12345678"));
        assert_eq!(
            request,
            CreateInterfaceRequest {
                subnet_id: "subnet-12345678".to_string(),
                ..CreateInterfaceRequest::default()
            }
        );
    }

    #[test]
    fn test_detach_force_flag_is_verbatim() {
        assert!(build_detach_request("eni-attach-12345678", true).force);
        assert!(!build_detach_request("eni-attach-12345678", false).force);
    }

    #[test]
    fn test_assign_explicit_addresses_carry_no_count() {
        let allocation = IpAllocation::explicit(["10.0.0.10", "10.0.0.11"]);
        let request = build_assign_private_ips_request("eni-12345678", &allocation);
        assert_eq!(
            request.private_ip_addresses,
            vec!["10.0.0.10".to_string(), "10.0.0.11".to_string()]
        );
        assert_eq!(request.secondary_private_ip_count, None);
    }

    #[test]
    fn test_assign_by_count_carries_no_addresses() {
        let request =
            build_assign_private_ips_request("eni-12345678", &IpAllocation::ByCount(2));
        assert!(request.private_ip_addresses.is_empty());
        assert_eq!(request.secondary_private_ip_count, Some(2));
    }

    #[test]
    fn test_assign_unspecified_sends_neither_field() {
        let request =
            build_assign_private_ips_request("eni-12345678", &IpAllocation::Unspecified);
        assert!(request.private_ip_addresses.is_empty());
        assert_eq!(request.secondary_private_ip_count, None);

        let request = build_assign_ipv6_request("eni-12345678", &IpAllocation::Unspecified);
        assert!(request.ipv6_addresses.is_empty());
        assert_eq!(request.ipv6_address_count, None);
    }

    #[test]
    fn test_assign_ipv6_count_zero_is_sent() {
        let request = build_assign_ipv6_request("eni-12345678", &IpAllocation::ByCount(0));
        assert_eq!(request.ipv6_address_count, Some(0));
    }

    #[test]
    fn test_modify_patch_is_sparse() {
        let patch = EniAttributePatch::new().with_description("Updated description");
        let request = build_modify_request("eni-12345678", &patch);
        assert_eq!(request.description, Some("Updated description".to_string()));
        assert_eq!(request.groups, None);

        // An empty replacement group set is treated as absent.
        let patch = EniAttributePatch::new().with_security_groups(Vec::<String>::new());
        let request = build_modify_request("eni-12345678", &patch);
        assert_eq!(request.groups, None);

        let patch = EniAttributePatch::new().with_security_groups(["sg-12345678"]);
        let request = build_modify_request("eni-12345678", &patch);
        assert_eq!(request.groups, Some(vec!["sg-12345678".to_string()]));
    }

    #[test]
    fn test_describe_subnets_targets_one_id() {
        let request = build_describe_subnets_request("subnet-12345678");
        assert_eq!(request.subnet_ids, vec!["subnet-12345678".to_string()]);
    }
}
