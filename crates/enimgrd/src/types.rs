//! Value types for ENI lifecycle requests.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for creating a network interface.
///
/// Consumed by [`EniMgr::create`](crate::EniMgr::create); never retained by
/// the manager. The zero counts mean "do not request additional addresses",
/// and an empty tag map means no tag block is sent at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EniConfig {
    /// Subnet hosting the interface (required, opaque to this layer).
    pub subnet_id: String,
    /// Free-text description; empty means none.
    pub description: String,
    /// Security group identifiers, in request order.
    pub security_group_ids: Vec<String>,
    /// Number of additional private IPv4 addresses to request.
    pub private_ip_count: u32,
    /// Number of IPv6 addresses to request.
    pub ipv6_address_count: u32,
    /// Resource tags; the sorted map keeps outbound tag order deterministic.
    pub tags: BTreeMap<String, String>,
}

impl EniConfig {
    /// Creates a config targeting the given subnet, everything else unset.
    pub fn new(subnet_id: impl Into<String>) -> Self {
        Self {
            subnet_id: subnet_id.into(),
            ..Self::default()
        }
    }
}

/// Sparse attribute patch for an existing interface.
///
/// `None` means "no change"; absence never clears a field server-side. An
/// empty replacement group list is also treated as "no change", since an
/// interface cannot be left without a security group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EniAttributePatch {
    pub description: Option<String>,
    pub security_group_ids: Option<Vec<String>>,
}

impl EniAttributePatch {
    /// Creates an empty patch (changes nothing).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a replacement security group set.
    pub fn with_security_groups<S: Into<String>>(
        mut self,
        groups: impl IntoIterator<Item = S>,
    ) -> Self {
        self.security_group_ids = Some(groups.into_iter().map(Into::into).collect());
        self
    }

    /// True when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self
                .security_group_ids
                .as_ref()
                .map_or(true, |groups| groups.is_empty())
    }
}

/// How additional addresses are requested on an interface.
///
/// A tagged choice instead of two independently-optional fields: a request
/// can carry explicit addresses or a count, never both, so the
/// explicit-wins precedence rule holds by construction. `Unspecified` sends
/// neither field and leaves the no-op request to the provider to accept or
/// reject. `ByCount(0)` is legal and sent verbatim, for callers that
/// explicitly want a count of zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IpAllocation {
    /// Assign exactly these addresses.
    Explicit(Vec<String>),
    /// Let the provider pick this many addresses.
    ByCount(u32),
    /// Send neither addresses nor a count.
    #[default]
    Unspecified,
}

impl IpAllocation {
    /// Creates an explicit allocation from anything string-like.
    pub fn explicit<S: Into<String>>(addresses: impl IntoIterator<Item = S>) -> Self {
        IpAllocation::Explicit(addresses.into_iter().map(Into::into).collect())
    }

    /// Addresses to send, if any. An empty explicit list carries no
    /// addresses and degrades to an unspecified request.
    pub fn addresses(&self) -> Option<&[String]> {
        match self {
            IpAllocation::Explicit(addresses) if !addresses.is_empty() => Some(addresses),
            _ => None,
        }
    }

    /// Count to send, if any.
    pub fn count(&self) -> Option<u32> {
        match self {
            IpAllocation::ByCount(count) => Some(*count),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eni_config_new() {
        let config = EniConfig::new("subnet-12345678");
        assert_eq!(config.subnet_id, "subnet-12345678");
        assert!(config.description.is_empty());
        assert!(config.security_group_ids.is_empty());
        assert_eq!(config.private_ip_count, 0);
        assert_eq!(config.ipv6_address_count, 0);
        assert!(config.tags.is_empty());
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(EniAttributePatch::new().is_empty());
        assert!(!EniAttributePatch::new()
            .with_description("updated")
            .is_empty());
        assert!(!EniAttributePatch::new()
            .with_security_groups(["sg-12345678"])
            .is_empty());
        // An empty replacement set changes nothing.
        assert!(EniAttributePatch::new()
            .with_security_groups(Vec::<String>::new())
            .is_empty());
    }

    #[test]
    fn test_allocation_is_mutually_exclusive() {
        let explicit = IpAllocation::explicit(["10.0.0.10", "10.0.0.11"]);
        assert_eq!(
            explicit.addresses(),
            Some(&["10.0.0.10".to_string(), "10.0.0.11".to_string()][..])
        );
        assert_eq!(explicit.count(), None);

        let by_count = IpAllocation::ByCount(2);
        assert_eq!(by_count.addresses(), None);
        assert_eq!(by_count.count(), Some(2));

        assert_eq!(IpAllocation::Unspecified.addresses(), None);
        assert_eq!(IpAllocation::Unspecified.count(), None);
    }

    #[test]
    fn test_empty_explicit_degrades_to_unspecified() {
        let empty = IpAllocation::explicit(Vec::<String>::new());
        assert_eq!(empty.addresses(), None);
        assert_eq!(empty.count(), None);
    }

    #[test]
    fn test_by_count_zero_is_preserved() {
        assert_eq!(IpAllocation::ByCount(0).count(), Some(0));
    }
}
