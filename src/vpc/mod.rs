/// Backup policies, plans and jobs.
pub mod backup_policies;
/// Bare metal servers, disks and network interfaces.
pub mod bare_metal_servers;
/// Endpoint gateways to IBM Cloud services.
pub mod endpoint_gateways;
pub mod floating_ips;
/// Images and export jobs.
pub mod images;
/// Instance groups, managers, policies, actions and memberships.
pub mod instance_groups;
pub mod instance_templates;
/// Virtual server instances and their interfaces, attachments and profiles.
pub mod instances;
pub mod keys;
/// Load balancers and everything beneath them.
pub mod load_balancers;
pub mod network_acls;
/// Walks paginated list operations.
pub mod pager;
pub mod public_gateways;
/// Identity and reference shapes shared across resources.
pub mod references;
pub mod regions;
pub mod routing_tables;
pub mod security_groups;
/// The service client and its options.
pub mod serviceclient;
pub mod snapshots;
/// Subnets and reserved IPs.
pub mod subnets;
pub mod volumes;
pub mod vpcs;
/// Site-to-site VPN gateways and IKE/IPsec policies.
pub mod vpn_gateways;
/// Client-to-site VPN servers.
pub mod vpn_servers;

pub use pager::{ListOptions, Pager};
pub use serviceclient::{VpcService, VpcServiceOptions};
