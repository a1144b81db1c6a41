//! Identity and reference shapes shared by every resource family.

use serde::{Deserialize, Serialize};

/// Identifies an existing resource in a request body.
///
/// The service accepts any one of the identifying fields; which ones are valid
/// depends on the resource (zones and profiles by name, most others by id, crn
/// or href).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identity {
    Id { id: String },
    Crn { crn: String },
    Href { href: String },
    Name { name: String },
}

impl Identity {
    pub fn id(id: impl Into<String>) -> Self {
        Identity::Id { id: id.into() }
    }

    pub fn crn(crn: impl Into<String>) -> Self {
        Identity::Crn { crn: crn.into() }
    }

    pub fn href(href: impl Into<String>) -> Self {
        Identity::Href { href: href.into() }
    }

    pub fn name(name: impl Into<String>) -> Self {
        Identity::Name { name: name.into() }
    }
}

/// Present on a reference when the referenced resource has been deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted {
    pub more_info: String,
}

/// A reference to another resource, as embedded in responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceReference {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crn: Option<String>,
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<Deleted>,
}

/// A reference to a zone or profile, which are identified by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameReference {
    pub name: String,
    pub href: String,
}

pub type ZoneReference = NameReference;

/// A reserved IP bound to an interface or gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservedIpReference {
    pub address: String,
    pub href: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
}

/// A resource group reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGroupReference {
    pub id: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A profile property: either a fixed value, a discrete set, a range, or
/// dependent on other properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileValue<T = i64> {
    /// `fixed`, `enum`, `range` or `dependent`.
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Option<T>,
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
    pub default: Option<T>,
    pub min: Option<T>,
    pub max: Option<T>,
    pub step: Option<T>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn identity_serializes_single_field() {
        assert_eq!(
            serde_json::to_value(Identity::name("us-south-1")).unwrap(),
            json!({"name": "us-south-1"})
        );
        assert_eq!(
            serde_json::to_value(Identity::id("r006-1")).unwrap(),
            json!({"id": "r006-1"})
        );
    }

    #[test]
    fn reference_tolerates_deleted_resource() {
        let reference: ResourceReference = serde_json::from_value(json!({
            "crn": "crn:v1:bluemix:public:is:us-south:a/123::vpc:r006-1",
            "deleted": {"more_info": "https://cloud.ibm.com/apidocs/vpc#deleted-resources"},
            "href": "https://us-south.iaas.cloud.ibm.com/v1/vpcs/r006-1",
            "id": "r006-1",
            "name": "my-vpc",
            "resource_type": "vpc"
        }))
        .unwrap();

        assert!(reference.deleted.is_some());
        assert_eq!(reference.id.as_deref(), Some("r006-1"));
    }

    #[test]
    fn profile_value_reads_ranges_and_fixed_values() {
        let range: ProfileValue = serde_json::from_value(json!({
            "type": "range", "min": 10, "max": 16000, "step": 1, "default": 10
        }))
        .unwrap();
        assert_eq!(range.max, Some(16000));
        assert!(range.values.is_empty());

        let fixed: ProfileValue<String> =
            serde_json::from_value(json!({"type": "fixed", "value": "amd64"})).unwrap();
        assert_eq!(fixed.value.as_deref(), Some("amd64"));
    }
}
