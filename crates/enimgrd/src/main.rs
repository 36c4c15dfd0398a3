//! enimgrd - ENI Lifecycle Manager Daemon
//!
//! Drives the full interface lifecycle against the in-memory provider
//! simulation: describe subnet → create → attach → assign addresses →
//! describe → modify → detach → delete. Sequencing and settle delays live
//! here; the manager itself never waits or retries.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use eni_provider::types::{Filter, Subnet};
use eni_provider::InMemoryProvider;
use enimgrd::{EniAttributePatch, EniConfig, EniMgr, IpAllocation};

#[derive(Debug, Parser)]
#[command(name = "enimgrd", about = "ENI lifecycle manager demo driver")]
struct Args {
    /// Subnet hosting the interface
    #[arg(long, default_value = "subnet-0a7bd03887dc3cbd5")]
    subnet_id: String,

    /// Instance the interface is attached to
    #[arg(long, default_value = "i-04890aa7cd8cf81f3")]
    instance_id: String,

    /// Security group applied to the interface
    #[arg(long, default_value = "sg-0f9acdf364ab834f2")]
    security_group_id: String,

    /// Device slot index on the target instance
    #[arg(long, default_value_t = 1)]
    device_index: u32,

    /// Seconds to wait for provider-side convergence after detach
    #[arg(long, default_value_t = 1)]
    settle_secs: u64,
}

/// Initializes tracing/logging subsystem
fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

async fn run(args: Args) -> anyhow::Result<()> {
    let provider = InMemoryProvider::new().with_subnet(Subnet {
        subnet_id: args.subnet_id.clone(),
        cidr_block: "10.0.0.0/24".to_string(),
        availability_zone: "us-east-1a".to_string(),
        available_ip_address_count: 250,
        ..Subnet::default()
    });
    let manager = EniMgr::new(provider);

    let subnet = manager.describe_subnet(&args.subnet_id).await?;
    info!(subnet = %subnet.subnet_id, cidr = %subnet.cidr_block, "target subnet");

    let mut config = EniConfig::new(&args.subnet_id);
    config.description = "Example ENI".to_string();
    config.security_group_ids = vec![args.security_group_id.clone()];
    config.private_ip_count = 2;
    config
        .tags
        .insert("Name".to_string(), "example-eni".to_string());
    config
        .tags
        .insert("Environment".to_string(), "development".to_string());

    info!("creating ENI");
    let created = manager.create(&config).await?;
    let eni_id = created
        .interface
        .map(|interface| interface.network_interface_id)
        .unwrap_or_default();
    info!(interface = %eni_id, "created ENI");

    info!(instance = %args.instance_id, "attaching ENI");
    let attachment_id = manager
        .attach(&eni_id, &args.instance_id, args.device_index)
        .await?;
    info!(attachment = %attachment_id, "attached ENI");

    info!("assigning additional private IPs");
    let assigned = manager
        .assign_private_ips(&eni_id, &IpAllocation::ByCount(2))
        .await?;
    info!(?assigned, "assigned private IPs");

    info!("describing ENIs in subnet");
    let filters = [Filter::new("subnet-id", [args.subnet_id.as_str()])];
    let interfaces = manager.describe_interfaces(&filters).await?;
    println!("{}", serde_json::to_string_pretty(&interfaces)?);

    info!("modifying ENI attributes");
    let patch = EniAttributePatch::new().with_description("Updated description");
    manager.modify_attribute(&eni_id, &patch).await?;

    info!("detaching ENI");
    manager.detach(&attachment_id, true).await?;

    info!(secs = args.settle_secs, "waiting for detachment to settle");
    tokio::time::sleep(Duration::from_secs(args.settle_secs)).await;

    info!("deleting ENI");
    manager.delete(&eni_id).await?;

    info!("ENI lifecycle complete");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    info!("--- Starting enimgrd ---");
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("ENI lifecycle failed: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
