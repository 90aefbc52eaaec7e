//! The discovery document a chaos host asks extensions for.
use chaoscf_core::{
    extension::{DiscoveredActivity, ExtensionInfo},
    ActivityType, Discovery,
};

use crate::{actions, probes};

/// Name of the extension
pub const EXTENSION_NAME: &str = "chaostoolkit-cloud-foundry";

/// The system this extension targets
pub const TARGET: &str = "cloud-foundry";

/// Describe every exported activity
pub fn activities() -> Vec<DiscoveredActivity> {
    let actions = actions::EXPORTS
        .iter()
        .map(|spec| spec.describe(ActivityType::Action, actions::MODULE));
    let probes = probes::EXPORTS
        .iter()
        .map(|spec| spec.describe(ActivityType::Probe, probes::MODULE));
    actions.chain(probes).collect()
}

/// Discover the activities exported by this extension
///
/// Nothing is called, the document only reflects what the crate exports.
pub fn discover() -> Discovery {
    tracing::info!("Discovering capabilities from {}", EXTENSION_NAME);
    Discovery {
        target: TARGET.to_owned(),
        discovery_date: chrono::Utc::now().to_rfc3339(),
        extension: ExtensionInfo {
            name: EXTENSION_NAME.to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
        },
        activities: activities(),
        system: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chaoscf_core::extension::DiscoveredArgument;

    #[test]
    fn discovery_lists_every_export() {
        let discovery = discover();
        assert_eq!(discovery.extension.name, "chaostoolkit-cloud-foundry");
        assert_eq!(discovery.extension.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(discovery.target, "cloud-foundry");
        assert!(chrono::DateTime::parse_from_rfc3339(&discovery.discovery_date).is_ok());
        assert_eq!(
            discovery.activities.len(),
            actions::EXPORTS.len() + probes::EXPORTS.len()
        );

        let names: Vec<_> = discovery.activities.iter().map(|a| a.name.as_str()).collect();
        for name in ["delete_app", "terminate_some_random_instance", "list_apps", "get_app_stats"] {
            assert!(names.contains(&name), "{name} is not advertised");
        }
    }

    #[test]
    fn activity_descriptors() {
        let activities = activities();
        let terminate = activities
            .iter()
            .find(|a| a.name == "terminate_app_instance")
            .unwrap();
        assert_eq!(terminate.activity_type, ActivityType::Action);
        assert_eq!(terminate.module, "chaoscf.actions");
        let index: &DiscoveredArgument = &terminate.arguments[1];
        assert_eq!(index.name, "instance_index");
        assert!(index.default.is_none());
        assert_eq!(terminate.arguments[2].default, Some(serde_json::Value::Null));

        let list_apps = activities.iter().find(|a| a.name == "list_apps").unwrap();
        assert_eq!(list_apps.activity_type, ActivityType::Probe);
        assert!(list_apps.arguments.is_empty());
    }
}
