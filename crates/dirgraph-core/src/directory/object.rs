//! Polymorphic directory objects.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "id")]
    pub object_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub user_principal_name: Option<String>,
    #[serde(default)]
    pub mail: Option<String>,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub account_enabled: Option<bool>,
}

/// A security or mail-enabled group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(alias = "id")]
    pub object_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub mail_enabled: Option<bool>,
    #[serde(default)]
    pub security_enabled: Option<bool>,
}

/// An organizational contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(alias = "id")]
    pub object_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub mail: Option<String>,
}

/// An activated directory role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryRole {
    #[serde(alias = "id")]
    pub object_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub role_template_id: Option<String>,
}

/// An entry of a mixed-type listing such as group members or memberships.
///
/// The variant is chosen from the payload's type annotation: `objectType`
/// (`"User"`), `odata.type` (`"Microsoft.DirectoryServices.User"`) or
/// `@odata.type` (`"#microsoft.graph.user"`), falling back to the `kind` tag
/// this type serializes with. Kinds outside the closed set are kept as
/// [`DirectoryObject::Other`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DirectoryObject {
    User(User),
    Group(Group),
    Contact(Contact),
    DirectoryRole(DirectoryRole),
    #[serde(rename_all = "camelCase")]
    Other {
        object_type: String,
        object_id: Option<String>,
    },
}

impl DirectoryObject {
    /// The object's id, if the payload carried one.
    pub fn object_id(&self) -> Option<&str> {
        match self {
            DirectoryObject::User(u) => Some(&u.object_id),
            DirectoryObject::Group(g) => Some(&g.object_id),
            DirectoryObject::Contact(c) => Some(&c.object_id),
            DirectoryObject::DirectoryRole(r) => Some(&r.object_id),
            DirectoryObject::Other { object_id, .. } => object_id.as_deref(),
        }
    }

    /// The object's display name, if any.
    pub fn display_name(&self) -> Option<&str> {
        match self {
            DirectoryObject::User(u) => u.display_name.as_deref(),
            DirectoryObject::Group(g) => g.display_name.as_deref(),
            DirectoryObject::Contact(c) => c.display_name.as_deref(),
            DirectoryObject::DirectoryRole(r) => r.display_name.as_deref(),
            DirectoryObject::Other { .. } => None,
        }
    }
}

/// Extract the lower-case kind name from whichever annotation is present.
fn object_kind(value: &Value) -> Option<String> {
    if let Some(kind) = value.get("objectType").and_then(Value::as_str) {
        return Some(kind.to_ascii_lowercase());
    }

    let annotated = value
        .get("odata.type")
        .or_else(|| value.get("@odata.type"))
        .and_then(Value::as_str)
        .and_then(|t| t.rsplit('.').next());

    annotated
        .or_else(|| value.get("kind").and_then(Value::as_str))
        .map(|k| k.to_ascii_lowercase())
}

fn object_id(value: &Value) -> Option<String> {
    value
        .get("objectId")
        .or_else(|| value.get("id"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

impl<'de> Deserialize<'de> for DirectoryObject {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let kind = object_kind(&value);

        let object = match kind.as_deref() {
            Some("user") => DirectoryObject::User(User::deserialize(value).map_err(de::Error::custom)?),
            Some("group") => {
                DirectoryObject::Group(Group::deserialize(value).map_err(de::Error::custom)?)
            }
            Some("contact") | Some("orgcontact") => {
                DirectoryObject::Contact(Contact::deserialize(value).map_err(de::Error::custom)?)
            }
            Some("directoryrole") | Some("role") => DirectoryObject::DirectoryRole(
                DirectoryRole::deserialize(value).map_err(de::Error::custom)?,
            ),
            other => DirectoryObject::Other {
                object_type: other.unwrap_or("unknown").to_string(),
                object_id: object_id(&value),
            },
        };

        Ok(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legacy_annotations_select_variant() {
        let user: DirectoryObject = serde_json::from_value(json!({
            "odata.type": "Microsoft.DirectoryServices.User",
            "objectType": "User",
            "objectId": "u1",
            "displayName": "Adele Vance",
            "userPrincipalName": "adele@contoso.com"
        }))
        .unwrap();
        assert!(matches!(&user, DirectoryObject::User(u) if u.user_principal_name.as_deref() == Some("adele@contoso.com")));

        let role: DirectoryObject = serde_json::from_value(json!({
            "odata.type": "Microsoft.DirectoryServices.DirectoryRole",
            "objectId": "r1",
            "displayName": "Global Administrator"
        }))
        .unwrap();
        assert!(matches!(role, DirectoryObject::DirectoryRole(_)));
    }

    #[test]
    fn graph_annotations_select_variant() {
        let group: DirectoryObject = serde_json::from_value(json!({
            "@odata.type": "#microsoft.graph.group",
            "id": "g1",
            "displayName": "Engineering"
        }))
        .unwrap();
        assert_eq!(group.object_id(), Some("g1"));
        assert_eq!(group.display_name(), Some("Engineering"));

        let contact: DirectoryObject = serde_json::from_value(json!({
            "@odata.type": "#microsoft.graph.orgContact",
            "id": "c1"
        }))
        .unwrap();
        assert!(matches!(contact, DirectoryObject::Contact(_)));
    }

    #[test]
    fn unknown_kind_is_other() {
        let device: DirectoryObject = serde_json::from_value(json!({
            "objectType": "Device",
            "objectId": "d1"
        }))
        .unwrap();
        assert_eq!(
            device,
            DirectoryObject::Other {
                object_type: "device".to_string(),
                object_id: Some("d1".to_string()),
            }
        );

        let bare: DirectoryObject = serde_json::from_value(json!({"id": "x"})).unwrap();
        assert!(matches!(bare, DirectoryObject::Other { ref object_type, .. } if object_type == "unknown"));
    }

    #[test]
    fn missing_id_on_known_kind_is_an_error() {
        let result: Result<DirectoryObject, _> = serde_json::from_value(json!({
            "objectType": "User",
            "displayName": "No Id"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn serializes_with_kind_tag() {
        let object = DirectoryObject::Contact(Contact {
            object_id: "c1".into(),
            display_name: Some("Vendor".into()),
            mail: None,
        });
        let json = serde_json::to_value(&object).unwrap();
        assert_eq!(json["kind"], "contact");
        assert_eq!(json["objectId"], "c1");
    }

    #[test]
    fn serialized_output_reads_back() {
        let objects = vec![
            DirectoryObject::User(User {
                object_id: "u1".into(),
                display_name: Some("Adele Vance".into()),
                user_principal_name: Some("adele@contoso.com".into()),
                mail: None,
                given_name: None,
                surname: None,
                account_enabled: Some(true),
            }),
            DirectoryObject::DirectoryRole(DirectoryRole {
                object_id: "r1".into(),
                display_name: Some("Global Administrator".into()),
                description: None,
                role_template_id: None,
            }),
            DirectoryObject::Other {
                object_type: "device".into(),
                object_id: Some("d1".into()),
            },
        ];

        for object in objects {
            let json = serde_json::to_string(&object).unwrap();
            let back: DirectoryObject = serde_json::from_str(&json).unwrap();
            assert_eq!(back, object, "json: {}", json);
        }
    }
}
