//! Instances of a started application.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Instances of an app keyed by their index
///
/// The API keys the mapping by the index rendered as a string.
pub type Instances = BTreeMap<u32, InstanceInfo>;

/// State of a single app instance
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct InstanceInfo {
    /// `RUNNING`, `STARTING`, `CRASHED` or `DOWN`
    pub state: String,
    /// Seconds since the instance started
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
    /// Unix timestamp of the instance start
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<f64>,
    /// Remaining fields reported for the instance
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn instances_are_keyed_by_index() {
        let instances: Instances = serde_json::from_value(json!({
            "0": {"state": "RUNNING", "uptime": 92660, "since": 1515413624},
            "2": {"state": "CRASHED", "details": "oom"}
        }))
        .unwrap();
        assert_eq!(instances.keys().copied().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(instances[&0].uptime, Some(92660));
        assert_eq!(instances[&2].other["details"], "oom");
    }
}
