//! Types shared with the chaos host: configuration maps and the discovery document.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Configuration mapping handed over by the host
pub type Configuration = Map<String, Value>;

/// Secrets mapping handed over by the host
pub type Secrets = Map<String, Value>;

/// The kind of an activity
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    /// Changes the state of the system
    Action,
    /// Reads the state of the system
    Probe,
}

/// Type of an activity argument as advertised to the host
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentType {
    /// A string
    String,
    /// An integer
    Integer,
}

/// Static description of an argument of an exported activity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArgumentSpec {
    /// Argument name
    pub name: &'static str,
    /// Argument type
    pub ty: ArgumentType,
    /// Whether the argument may be left out (defaults to `null`)
    pub optional: bool,
}

impl ArgumentSpec {
    /// A mandatory string argument
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            ty: ArgumentType::String,
            optional: false,
        }
    }

    /// An optional string argument
    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            ty: ArgumentType::String,
            optional: true,
        }
    }

    /// A mandatory integer argument
    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            ty: ArgumentType::Integer,
            optional: false,
        }
    }
}

/// Static description of an exported activity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivitySpec {
    /// Function name the host calls
    pub name: &'static str,
    /// Human readable documentation
    pub doc: &'static str,
    /// Arguments besides configuration and secrets
    pub arguments: &'static [ArgumentSpec],
}

impl ActivitySpec {
    /// Render the descriptor advertised in the discovery document
    pub fn describe(&self, activity_type: ActivityType, module: &str) -> DiscoveredActivity {
        DiscoveredActivity {
            activity_type,
            name: self.name.to_owned(),
            module: module.to_owned(),
            doc: self.doc.to_owned(),
            arguments: self
                .arguments
                .iter()
                .map(|arg| DiscoveredArgument {
                    name: arg.name.to_owned(),
                    ty: arg.ty,
                    default: arg.optional.then_some(Value::Null),
                })
                .collect(),
        }
    }
}

/// An argument as advertised to the host
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct DiscoveredArgument {
    /// Argument name
    pub name: String,
    /// Argument type
    #[serde(rename = "type")]
    pub ty: ArgumentType,
    /// Default value of an optional argument
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// An activity as advertised to the host
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct DiscoveredActivity {
    /// Action or probe
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    /// Function name
    pub name: String,
    /// Module exporting the function
    #[serde(rename = "mod")]
    pub module: String,
    /// Documentation
    pub doc: String,
    /// Arguments besides configuration and secrets
    pub arguments: Vec<DiscoveredArgument>,
}

/// Name and version of the extension
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ExtensionInfo {
    /// Extension name
    pub name: String,
    /// Extension version
    pub version: String,
}

/// The discovery document of the extension
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Discovery {
    /// Target system, `cloud-foundry`
    pub target: String,
    /// RFC 3339 date of the discovery
    pub discovery_date: String,
    /// The extension
    pub extension: ExtensionInfo,
    /// Every exported action and probe
    pub activities: Vec<DiscoveredActivity>,
    /// System information, when it was collected
    #[serde(default)]
    pub system: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    const DELETE_APP: ActivitySpec = ActivitySpec {
        name: "delete_app",
        doc: "Delete application.",
        arguments: &[ArgumentSpec::required("app_name"), ArgumentSpec::optional("org_name")],
    };

    #[test]
    fn optional_arguments_default_to_null() {
        let described = DELETE_APP.describe(ActivityType::Action, "chaoscf.actions");
        assert_json_eq!(
            serde_json::to_value(described).unwrap(),
            json!({
                "type": "action",
                "name": "delete_app",
                "mod": "chaoscf.actions",
                "doc": "Delete application.",
                "arguments": [
                    {"name": "app_name", "type": "string"},
                    {"name": "org_name", "type": "string", "default": null}
                ]
            })
        );
    }
}
