use ibmcloud_vpc_client::VpcService;
use ibmcloud_vpc_client::vpc::backup_policies::{BackupPolicy, ListBackupPoliciesOptions};
use ibmcloud_vpc_client::vpc::instances::ListInstancesOptions;

use crate::config::TourSettings;

pub async fn run(
    service: &VpcService,
    settings: &TourSettings,
    vpc_ids: &[String],
) -> Result<(), String> {
    for vpc_id in vpc_ids {
        let options = ListInstancesOptions::new()
            .with_vpc_id(vpc_id.as_str())
            .with_limit(settings.page_size);
        let instances = service
            .pager(options)
            .get_all()
            .await
            .map_err(|e| e.to_string())?;

        println!("vpc {vpc_id}: {} instance(s)", instances.len());
        for instance in instances {
            let profile = instance
                .profile
                .as_ref()
                .map(|profile| profile.name.as_str())
                .unwrap_or("unknown profile");
            println!("  {} {} ({})", instance.name, instance.status, profile);
        }
    }

    let policies = service
        .pager(ListBackupPoliciesOptions::new().with_limit(settings.page_size))
        .get_all()
        .await
        .map_err(|e| e.to_string())?;

    for policy in policies {
        let common = policy.common();
        match &policy {
            BackupPolicy::Volume(_) => println!(
                "backup policy {} backs up volumes tagged {:?}",
                common.name, common.match_user_tags
            ),
            BackupPolicy::Instance(instance) => println!(
                "backup policy {} backs up instances tagged {:?} ({:?})",
                common.name, common.match_user_tags, instance.included_content
            ),
        }
    }

    Ok(())
}
