use ibmcloud_vpc_client::VpcService;
use ibmcloud_vpc_client::vpc::regions::ListRegionsOptions;
use ibmcloud_vpc_client::vpc::security_groups::{ListSecurityGroupsOptions, SecurityGroupRule};
use ibmcloud_vpc_client::vpc::vpcs::ListVpcsOptions;

use crate::config::TourSettings;

/// Print regions, VPCs and their security group rules. Returns the toured VPC ids.
pub async fn run(service: &VpcService, settings: &TourSettings) -> Result<Vec<String>, String> {
    let regions = service
        .list_regions(&ListRegionsOptions::new())
        .await
        .map_err(|e| e.to_string())?
        .into_result();
    for region in &regions.regions {
        println!("region {} ({})", region.name, region.status);
    }

    let mut pager = service.pager(ListVpcsOptions::new().with_limit(settings.page_size));
    let mut vpc_ids = Vec::new();
    while let Some(page) = pager.next_page().await.map_err(|e| e.to_string())? {
        for vpc in page {
            let wanted = settings
                .vpc_name_prefix
                .as_deref()
                .is_none_or(|prefix| vpc.name.starts_with(prefix));
            if wanted {
                println!("vpc {} [{}] {}", vpc.name, vpc.id, vpc.status);
                vpc_ids.push(vpc.id);
            }
        }
    }
    println!("{} VPC page(s) fetched", pager.pages_fetched());

    for vpc_id in &vpc_ids {
        let groups = service
            .pager(ListSecurityGroupsOptions::new().with_vpc_id(vpc_id.as_str()))
            .get_all()
            .await
            .map_err(|e| e.to_string())?;

        for group in groups {
            println!("  security group {}", group.name);
            for rule in &group.rules {
                println!("    {}", describe_rule(rule));
            }
        }
    }

    Ok(vpc_ids)
}

fn describe_rule(rule: &SecurityGroupRule) -> String {
    let common = rule.common();
    let ports = match rule {
        SecurityGroupRule::All(_) => "all traffic".to_string(),
        SecurityGroupRule::TcpUdp(rule) => match (rule.port_min, rule.port_max) {
            (Some(min), Some(max)) if min == max => format!("{:?} port {min}", common.protocol),
            (Some(min), Some(max)) => format!("{:?} ports {min}-{max}", common.protocol),
            _ => format!("{:?} any port", common.protocol),
        },
        SecurityGroupRule::Icmp(rule) => format!("icmp type {:?}", rule.icmp_type),
    };
    let remote = common
        .remote
        .as_ref()
        .and_then(|remote| {
            remote
                .cidr_block
                .clone()
                .or_else(|| remote.address.clone())
                .or_else(|| remote.name.clone())
        })
        .unwrap_or_else(|| "anywhere".to_string());
    format!("{} {} from {}", common.direction, ports, remote)
}
