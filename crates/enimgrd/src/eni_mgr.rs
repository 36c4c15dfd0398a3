//! ENI lifecycle manager - core implementation.

use tracing::{debug, info, instrument};

use eni_provider::types::{Filter, NetworkInterface, Subnet};
use eni_provider::{CreateInterfaceResponse, ProviderClient};

use crate::error::{EniError, EniResult};
use crate::requests;
use crate::types::{EniAttributePatch, EniConfig, IpAllocation};

/// Network interface lifecycle manager.
///
/// Translates lifecycle intents (create, attach, detach, delete, attribute
/// and address changes) into provider requests and normalizes results and
/// errors. The manager holds nothing but the injected client: every
/// operation is a single remote call, no state survives between calls, and
/// no call is retried. Sequencing related calls (letting an attach settle
/// before assigning addresses, detaching before deleting) is the caller's
/// job; the provider, not this layer, rejects out-of-order transitions.
///
/// All methods take `&self`, so one manager can be shared across tasks
/// without locking.
pub struct EniMgr<C> {
    client: C,
}

impl<C: ProviderClient> EniMgr<C> {
    /// Creates a manager over the given provider client.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Creates a network interface in the configured subnet.
    ///
    /// Returns the full creation response; the embedded interface id is
    /// verified non-empty. Tag and address-count fields are omitted from
    /// the request when unset (see [`requests::build_create_request`]).
    pub async fn create(&self, config: &EniConfig) -> EniResult<CreateInterfaceResponse> {
        let request = requests::build_create_request(config);
        let response = self.client.create_interface(request).await?;

        let id = response
            .interface
            .as_ref()
            .map(|interface| interface.network_interface_id.as_str())
            .unwrap_or_default();
        if id.is_empty() {
            return Err(EniError::missing_field("create", "network interface id"));
        }
        info!(interface = %id, subnet = %config.subnet_id, "created ENI");

        Ok(response)
    }

    /// Attaches an interface to an instance at the given device slot.
    ///
    /// Returns the attachment id, which the caller must keep to detach
    /// later; the manager does not retain it.
    #[instrument(skip(self))]
    pub async fn attach(
        &self,
        interface_id: &str,
        instance_id: &str,
        device_index: u32,
    ) -> EniResult<String> {
        let request = requests::build_attach_request(interface_id, instance_id, device_index);
        let response = self
            .client
            .attach_interface(request)
            .await
            .map_err(|err| EniError::operation("attach ENI", err))?;

        let attachment_id = response
            .attachment_id
            .filter(|id| !id.is_empty())
            .ok_or(EniError::missing_field("attach", "attachment id"))?;
        info!(attachment = %attachment_id, "attached ENI");

        Ok(attachment_id)
    }

    /// Detaches an interface by attachment id.
    ///
    /// With `force` the provider is told to skip orderly-shutdown
    /// preconditions; the escape hatch for an unresponsive instance.
    #[instrument(skip(self))]
    pub async fn detach(&self, attachment_id: &str, force: bool) -> EniResult<()> {
        let request = requests::build_detach_request(attachment_id, force);
        self.client
            .detach_interface(request)
            .await
            .map_err(|err| EniError::operation("detach ENI", err))?;
        info!("detached ENI");
        Ok(())
    }

    /// Deletes an interface.
    ///
    /// The interface must already be detached; no local precondition check
    /// is made and a provider-side "still attached" rejection is surfaced
    /// as-is inside the wrapped error.
    pub async fn delete(&self, interface_id: &str) -> EniResult<()> {
        let request = requests::build_delete_request(interface_id);
        self.client
            .delete_interface(request)
            .await
            .map_err(|err| EniError::operation("delete ENI", err))?;
        info!(interface = %interface_id, "deleted ENI");
        Ok(())
    }

    /// Applies the non-absent fields of the patch to an interface.
    pub async fn modify_attribute(
        &self,
        interface_id: &str,
        patch: &EniAttributePatch,
    ) -> EniResult<()> {
        if patch.is_empty() {
            debug!(interface = %interface_id, "empty attribute patch, nothing to modify");
        }
        let request = requests::build_modify_request(interface_id, patch);
        self.client
            .modify_interface_attribute(request)
            .await
            .map_err(|err| EniError::operation("modify ENI attribute", err))?;
        info!(interface = %interface_id, "modified ENI attribute");
        Ok(())
    }

    /// Assigns additional private IPv4 addresses, explicitly or by count.
    ///
    /// Returns the addresses the provider reports as assigned.
    pub async fn assign_private_ips(
        &self,
        interface_id: &str,
        allocation: &IpAllocation,
    ) -> EniResult<Vec<String>> {
        let request = requests::build_assign_private_ips_request(interface_id, allocation);
        let response = self
            .client
            .assign_private_ips(request)
            .await
            .map_err(|err| EniError::operation("assign private IPs", err))?;
        info!(
            interface = %interface_id,
            count = response.assigned_private_ip_addresses.len(),
            "assigned private IPs"
        );
        Ok(response.assigned_private_ip_addresses)
    }

    /// Unassigns secondary private IPv4 addresses.
    ///
    /// An empty address list is passed through; whether that is acceptable
    /// is the provider's call.
    pub async fn unassign_private_ips(
        &self,
        interface_id: &str,
        addresses: &[String],
    ) -> EniResult<()> {
        let request = requests::build_unassign_private_ips_request(interface_id, addresses);
        self.client
            .unassign_private_ips(request)
            .await
            .map_err(|err| EniError::operation("unassign private IPs", err))?;
        Ok(())
    }

    /// Assigns IPv6 addresses, explicitly or by count.
    ///
    /// Returns the addresses the provider reports as assigned.
    pub async fn assign_ipv6_addresses(
        &self,
        interface_id: &str,
        allocation: &IpAllocation,
    ) -> EniResult<Vec<String>> {
        let request = requests::build_assign_ipv6_request(interface_id, allocation);
        let response = self
            .client
            .assign_ipv6_addresses(request)
            .await
            .map_err(|err| EniError::operation("assign IPv6 addresses", err))?;
        info!(
            interface = %interface_id,
            count = response.assigned_ipv6_addresses.len(),
            "assigned IPv6 addresses"
        );
        Ok(response.assigned_ipv6_addresses)
    }

    /// Unassigns IPv6 addresses.
    pub async fn unassign_ipv6_addresses(
        &self,
        interface_id: &str,
        addresses: &[String],
    ) -> EniResult<()> {
        let request = requests::build_unassign_ipv6_request(interface_id, addresses);
        self.client
            .unassign_ipv6_addresses(request)
            .await
            .map_err(|err| EniError::operation("unassign IPv6 addresses", err))?;
        Ok(())
    }

    /// Lists interfaces matching the ANDed filters, verbatim from the
    /// provider. A read query: provider failures surface unwrapped.
    pub async fn describe_interfaces(
        &self,
        filters: &[Filter],
    ) -> EniResult<Vec<NetworkInterface>> {
        let request = requests::build_describe_interfaces_request(filters);
        let response = self.client.describe_interfaces(request).await?;
        Ok(response.network_interfaces)
    }

    /// Looks up metadata for exactly one subnet.
    pub async fn describe_subnet(&self, subnet_id: &str) -> EniResult<Subnet> {
        let request = requests::build_describe_subnets_request(subnet_id);
        let response = self.client.describe_subnets(request).await?;
        response
            .subnets
            .into_iter()
            .next()
            .ok_or_else(|| EniError::SubnetNotFound {
                subnet_id: subnet_id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eni_provider::testing::{CapturedRequest, FailingClient, RecordingClient};
    use eni_provider::types::{
        AttachInterfaceRequest, CreateInterfaceRequest, DetachInterfaceRequest,
    };
    use eni_provider::ProviderError;
    use pretty_assertions::assert_eq;
    use std::error::Error;

    fn interface(id: &str, subnet_id: &str) -> NetworkInterface {
        NetworkInterface {
            network_interface_id: id.to_string(),
            subnet_id: subnet_id.to_string(),
            ..NetworkInterface::default()
        }
    }

    #[tokio::test]
    async fn test_create_minimal_config_sends_only_subnet() {
        let client =
            RecordingClient::new().with_interface(interface("eni-12345678", "subnet-12345678"));
        let manager = EniMgr::new(client);

        let response = manager
            .create(&EniConfig::new("subnet-12345678"))
            .await
            .unwrap();
        assert_eq!(
            response.interface.unwrap().network_interface_id,
            "eni-12345678"
        );

        // The outbound request has only the subnet id populated.
        assert_eq!(
            manager.client.requests(),
            vec![CapturedRequest::Create(CreateInterfaceRequest {
                subnet_id: "subnet-12345678".to_string(),
                ..CreateInterfaceRequest::default()
            })]
        );
    }

    #[tokio::test]
    async fn test_create_without_interface_id_is_an_error() {
        let manager = EniMgr::new(RecordingClient::new());
        let err = manager
            .create(&EniConfig::new("subnet-12345678"))
            .await
            .unwrap_err();
        assert!(matches!(err, EniError::MissingField { .. }));
    }

    #[tokio::test]
    async fn test_attach_returns_provider_attachment_id() {
        let client = RecordingClient::new().with_attachment_id("eni-attach-12345678");
        let manager = EniMgr::new(client);

        let attachment_id = manager
            .attach("eni-12345678", "i-12345678", 1)
            .await
            .unwrap();
        assert_eq!(attachment_id, "eni-attach-12345678");
        assert_eq!(
            manager.client.requests(),
            vec![CapturedRequest::Attach(AttachInterfaceRequest {
                network_interface_id: "eni-12345678".to_string(),
                instance_id: "i-12345678".to_string(),
                device_index: 1,
            })]
        );
    }

    #[tokio::test]
    async fn test_attach_without_attachment_id_is_an_error() {
        let manager = EniMgr::new(RecordingClient::new());
        let err = manager
            .attach("eni-12345678", "i-12345678", 1)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EniError::MissingField {
                operation: "attach",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_detach_forwards_force_flag() {
        let manager = EniMgr::new(RecordingClient::new());
        manager.detach("eni-attach-12345678", true).await.unwrap();
        manager.detach("eni-attach-12345678", false).await.unwrap();

        assert_eq!(
            manager.client.requests(),
            vec![
                CapturedRequest::Detach(DetachInterfaceRequest {
                    attachment_id: "eni-attach-12345678".to_string(),
                    force: true,
                }),
                CapturedRequest::Detach(DetachInterfaceRequest {
                    attachment_id: "eni-attach-12345678".to_string(),
                    force: false,
                }),
            ]
        );
    }

    #[tokio::test]
    async fn test_describe_interfaces_returns_list_verbatim() {
        let listed = vec![interface("eni-12345678", "subnet-12345678")];
        let client = RecordingClient::new().with_interfaces(listed.clone());
        let manager = EniMgr::new(client);

        let filters = [Filter::new("subnet-id", ["subnet-12345678"])];
        let interfaces = manager.describe_interfaces(&filters).await.unwrap();
        assert_eq!(interfaces, listed);
    }

    #[tokio::test]
    async fn test_describe_subnet_missing_is_not_found() {
        let manager = EniMgr::new(RecordingClient::new());
        let err = manager.describe_subnet("subnet-12345678").await.unwrap_err();
        assert_eq!(err.to_string(), "subnet 'subnet-12345678' not found");
    }

    #[tokio::test]
    async fn test_mutating_failures_carry_stage_prefixes() {
        let manager = EniMgr::new(FailingClient::new(ProviderError::api(
            "UnauthorizedOperation",
            "not allowed",
        )));
        let addresses = vec!["10.0.0.10".to_string()];

        let cases: Vec<(EniError, &str)> = vec![
            (
                manager.attach("eni-1", "i-1", 1).await.unwrap_err(),
                "failed to attach ENI",
            ),
            (
                manager.detach("eni-attach-1", false).await.unwrap_err(),
                "failed to detach ENI",
            ),
            (
                manager.delete("eni-1").await.unwrap_err(),
                "failed to delete ENI",
            ),
            (
                manager
                    .modify_attribute("eni-1", &EniAttributePatch::new())
                    .await
                    .unwrap_err(),
                "failed to modify ENI attribute",
            ),
            (
                manager
                    .assign_private_ips("eni-1", &IpAllocation::ByCount(1))
                    .await
                    .unwrap_err(),
                "failed to assign private IPs",
            ),
            (
                manager
                    .unassign_private_ips("eni-1", &addresses)
                    .await
                    .unwrap_err(),
                "failed to unassign private IPs",
            ),
            (
                manager
                    .assign_ipv6_addresses("eni-1", &IpAllocation::ByCount(1))
                    .await
                    .unwrap_err(),
                "failed to assign IPv6 addresses",
            ),
            (
                manager
                    .unassign_ipv6_addresses("eni-1", &addresses)
                    .await
                    .unwrap_err(),
                "failed to unassign IPv6 addresses",
            ),
        ];

        for (err, prefix) in cases {
            assert!(
                err.to_string().starts_with(prefix),
                "expected '{}' to start with '{}'",
                err,
                prefix
            );
            // The provider error stays reachable as the cause.
            let source = err.source().expect("source");
            assert!(source.to_string().contains("UnauthorizedOperation"));
        }
    }

    #[tokio::test]
    async fn test_read_failures_surface_unwrapped() {
        let manager = EniMgr::new(FailingClient::new(ProviderError::transport(
            "connection reset",
        )));

        let err = manager.describe_interfaces(&[]).await.unwrap_err();
        assert_eq!(err.to_string(), "transport error: connection reset");

        let err = manager.create(&EniConfig::new("subnet-1")).await.unwrap_err();
        assert_eq!(err.to_string(), "transport error: connection reset");
    }
}
