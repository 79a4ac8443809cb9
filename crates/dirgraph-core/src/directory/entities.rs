//! Single-type directory entities.

use serde::{Deserialize, Serialize};

/// An application registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(alias = "id")]
    pub object_id: String,
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// The tenant-local instance of an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePrincipal {
    #[serde(alias = "id")]
    pub object_id: String,
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub service_principal_names: Vec<String>,
}

/// A domain registered with the tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    #[serde(alias = "id")]
    pub name: String,
    #[serde(default)]
    pub is_verified: Option<bool>,
    #[serde(default)]
    pub is_default: Option<bool>,
}

/// A registered device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    #[serde(alias = "id")]
    pub object_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default, rename = "deviceOSType", alias = "operatingSystem")]
    pub operating_system: Option<String>,
}

/// A delegated permission consented for a client on a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuth2PermissionGrant {
    #[serde(alias = "id")]
    pub object_id: String,
    pub client_id: String,
    #[serde(default)]
    pub consent_type: Option<String>,
    #[serde(default)]
    pub resource_id: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// A license SKU the tenant has purchased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribedSku {
    pub sku_id: String,
    #[serde(default)]
    pub sku_part_number: Option<String>,
    #[serde(default)]
    pub consumed_units: Option<i64>,
}

/// The tenant's organization record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantDetail {
    #[serde(alias = "id")]
    pub object_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub verified_domains: Vec<VerifiedDomain>,
    #[serde(default)]
    pub technical_notification_mails: Vec<String>,
}

impl TenantDetail {
    /// The `*.onmicrosoft.com` domain the tenant was created with.
    pub fn initial_domain(&self) -> Option<&VerifiedDomain> {
        self.verified_domains.iter().find(|d| d.is_initial == Some(true))
    }

    pub fn default_domain(&self) -> Option<&VerifiedDomain> {
        self.verified_domains.iter().find(|d| d.is_default == Some(true))
    }
}

/// A verified domain as listed on [`TenantDetail`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedDomain {
    pub name: String,
    #[serde(default, alias = "initial")]
    pub is_initial: Option<bool>,
    #[serde(default, alias = "default")]
    pub is_default: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn domain_accepts_both_name_fields() {
        let legacy: Domain =
            serde_json::from_value(json!({"name": "contoso.com", "isVerified": true})).unwrap();
        let graph: Domain = serde_json::from_value(json!({"id": "contoso.com"})).unwrap();
        assert_eq!(legacy.name, graph.name);
        assert_eq!(legacy.is_verified, Some(true));
    }

    #[test]
    fn device_operating_system_aliases() {
        let legacy: Device =
            serde_json::from_value(json!({"objectId": "d1", "deviceOSType": "Windows"})).unwrap();
        let graph: Device =
            serde_json::from_value(json!({"id": "d1", "operatingSystem": "Windows"})).unwrap();
        assert_eq!(legacy, graph);
    }

    #[test]
    fn permission_grant_fields() {
        let grant: OAuth2PermissionGrant = serde_json::from_value(json!({
            "objectId": "p1",
            "clientId": "sp1",
            "consentType": "AllPrincipals",
            "resourceId": "sp2",
            "scope": "User.Read"
        }))
        .unwrap();
        assert_eq!(grant.scope.as_deref(), Some("User.Read"));
    }

    #[test]
    fn tenant_detail_picks_initial_and_default_domains() {
        let tenant: TenantDetail = serde_json::from_value(json!({
            "objectId": "72f988bf-86f1-41af-91ab-2d7cd011db47",
            "displayName": "Contoso",
            "verifiedDomains": [
                {"name": "contoso.com", "initial": false, "default": true},
                {"name": "contoso.onmicrosoft.com", "initial": true, "default": false}
            ],
            "technicalNotificationMails": ["admin@contoso.com"]
        }))
        .unwrap();

        assert_eq!(tenant.initial_domain().unwrap().name, "contoso.onmicrosoft.com");
        assert_eq!(tenant.default_domain().unwrap().name, "contoso.com");
        assert_eq!(tenant.technical_notification_mails, ["admin@contoso.com"]);
    }

    #[test]
    fn tenant_detail_without_domains() {
        let tenant: TenantDetail = serde_json::from_value(json!({"id": "t1"})).unwrap();
        assert!(tenant.initial_domain().is_none());
        assert!(tenant.technical_notification_mails.is_empty());
    }
}
