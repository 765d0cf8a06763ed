//! Backend payloads
//!
//! Response types are lenient: every field the UI can live without has a
//! default, so a backend that omits one still renders.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{self, Display};
use voucherify_core::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default = "default_register_role")]
    pub role: Role,
}

fn default_register_role() -> Role {
    Role::Customer
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CampaignStatus {
    #[default]
    Active,
    Inactive,
    Scheduled,
}

impl CampaignStatus {
    pub const ALL: [Self; 3] = [Self::Active, Self::Inactive, Self::Scheduled];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Scheduled => "SCHEDULED",
        }
    }

    /// Parse the wire value, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value))
    }
}

impl Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VoucherKind {
    #[default]
    Percentage,
    Amount,
}

impl VoucherKind {
    pub const ALL: [Self; 2] = [Self::Percentage, Self::Amount];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "PERCENTAGE",
            Self::Amount => "AMOUNT",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value))
    }
}

impl Display for VoucherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Campaign as returned by `GET /campaigns`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    /// Kept as sent so unknown states still display
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vouchers: Vec<Voucher>,
}

impl Campaign {
    /// Form values for editing this campaign
    pub fn to_form(&self) -> CampaignForm {
        CampaignForm {
            name: self.name.clone(),
            description: self.description.clone(),
            start_date: self.start_date.as_deref().map(form_datetime).unwrap_or_default(),
            end_date: self.end_date.as_deref().map(form_datetime).unwrap_or_default(),
            status: CampaignStatus::parse(&self.status).unwrap_or_default(),
        }
    }
}

/// Body of `POST /campaigns` and `PUT /campaigns/:id`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignForm {
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub status: CampaignStatus,
}

/// Voucher summary as returned inside campaigns and by best-voucher search
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: f64,
    #[serde(default)]
    pub max_limit: Option<f64>,
    #[serde(default)]
    pub max_discount: Option<f64>,
    #[serde(default)]
    pub max_usage_per_user: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_usages: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_usage: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default)]
    pub expiration_date: Option<String>,
    #[serde(default)]
    pub campaign_id: Option<String>,
}

impl Voucher {
    pub fn is_percentage(&self) -> bool {
        VoucherKind::parse(&self.kind) == Some(VoucherKind::Percentage)
    }

    /// "10% off" or "$10 off"
    pub fn display_value(&self) -> String {
        if self.is_percentage() {
            format!("{}% off", self.value)
        } else {
            format!("${} off", self.value)
        }
    }

    /// Redemptions remaining, never negative
    pub fn uses_left(&self) -> i64 {
        self.total_usages.saturating_sub(self.current_usage).max(0)
    }
}

/// Body of `POST /vouchers`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVoucher {
    pub campaign_id: String,
    pub code: String,
    #[serde(rename = "type")]
    pub kind: VoucherKind,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_discount: Option<f64>,
    pub max_usage_per_user: u32,
    pub total_usages: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
}

impl NewVoucher {
    pub const DEFAULT_MAX_USAGE_PER_USER: u32 = 1;
    pub const DEFAULT_TOTAL_USAGES: u32 = 10;

    /// Voucher with the default usage limits
    pub fn new(campaign_id: impl Into<String>, code: impl Into<String>, kind: VoucherKind, value: f64) -> Self {
        Self {
            campaign_id: campaign_id.into(),
            code: code.into(),
            kind,
            value,
            max_limit: None,
            max_discount: None,
            max_usage_per_user: Self::DEFAULT_MAX_USAGE_PER_USER,
            total_usages: Self::DEFAULT_TOTAL_USAGES,
            expiration_date: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BestVouchersRequest {
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedeemRequest {
    pub code: String,
}

/// Read an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Truncate a backend timestamp to a `datetime-local` value (`YYYY-MM-DDTHH:MM`)
pub fn form_datetime(value: &str) -> String {
    value.chars().take(16).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_campaign_from_backend() {
        let campaign: Campaign = serde_json::from_value(json!({
            "_id": "c1",
            "name": "Summer",
            "description": "Sale",
            "startDate": "2024-06-01T09:30:00.000Z",
            "endDate": "2024-06-30T18:00:00.000Z",
            "status": "ACTIVE",
            "vouchers": [{ "_id": "v1", "code": "SUN10", "type": "PERCENTAGE", "value": 10 }]
        }))
        .unwrap();

        assert_eq!(campaign.id, "c1");
        assert_eq!(campaign.vouchers.len(), 1);

        let form = campaign.to_form();
        assert_eq!(form.start_date, "2024-06-01T09:30");
        assert_eq!(form.end_date, "2024-06-30T18:00");
        assert_eq!(form.status, CampaignStatus::Active);
    }

    #[test]
    fn test_campaign_tolerates_missing_fields() {
        let campaign: Campaign = serde_json::from_value(json!({ "_id": "c2" })).unwrap();
        assert!(campaign.vouchers.is_empty());

        let form = campaign.to_form();
        assert_eq!(form.start_date, "");
        assert_eq!(form.status, CampaignStatus::Active);
    }

    #[test]
    fn test_explicit_nulls_read_as_defaults() {
        let campaigns: Vec<Campaign> = serde_json::from_value(json!([{
            "_id": "c1",
            "name": "Summer",
            "description": null,
            "startDate": null,
            "status": null,
            "vouchers": [{
                "_id": "v1",
                "code": "SUN10",
                "type": null,
                "value": null,
                "totalUsages": null,
                "currentUsage": null,
                "status": null
            }]
        }, {
            "_id": "c2",
            "name": "Winter",
            "vouchers": null
        }]))
        .unwrap();

        assert_eq!(campaigns.len(), 2);
        assert_eq!(campaigns[0].description, "");
        assert_eq!(campaigns[0].status, "");
        assert_eq!(campaigns[0].start_date, None);

        let voucher = &campaigns[0].vouchers[0];
        assert_eq!(voucher.code, "SUN10");
        assert_eq!(voucher.value, 0.0);
        assert_eq!(voucher.uses_left(), 0);
        assert!(campaigns[1].vouchers.is_empty());
    }

    #[test]
    fn test_campaign_form_wire_format() {
        let form = CampaignForm {
            name: "Winter".into(),
            description: String::new(),
            start_date: "2024-12-01T00:00".into(),
            end_date: "2024-12-31T23:59".into(),
            status: CampaignStatus::Scheduled,
        };
        assert_eq!(
            serde_json::to_value(&form).unwrap(),
            json!({
                "name": "Winter",
                "description": "",
                "startDate": "2024-12-01T00:00",
                "endDate": "2024-12-31T23:59",
                "status": "SCHEDULED"
            })
        );
    }

    #[test]
    fn test_voucher_display() {
        let mut voucher = Voucher {
            kind: "PERCENTAGE".into(),
            value: 15.0,
            total_usages: 10,
            current_usage: 3,
            ..Voucher::default()
        };
        assert_eq!(voucher.display_value(), "15% off");
        assert_eq!(voucher.uses_left(), 7);

        voucher.kind = "AMOUNT".into();
        voucher.value = 2.5;
        voucher.current_usage = 12;
        assert_eq!(voucher.display_value(), "$2.5 off");
        assert_eq!(voucher.uses_left(), 0);
    }

    #[test]
    fn test_new_voucher_wire_format() {
        let mut voucher = NewVoucher::new("c1", "SAVE5", VoucherKind::Amount, 5.0);
        voucher.max_discount = Some(20.0);

        assert_eq!(
            serde_json::to_value(&voucher).unwrap(),
            json!({
                "campaignId": "c1",
                "code": "SAVE5",
                "type": "AMOUNT",
                "value": 5.0,
                "maxDiscount": 20.0,
                "maxUsagePerUser": 1,
                "totalUsages": 10
            })
        );
    }

    #[test]
    fn test_register_request_defaults_to_customer() {
        let request: RegisterRequest =
            serde_json::from_value(json!({ "email": "a@b.c", "password": "pw" })).unwrap();
        assert_eq!(request.role, Role::Customer);
        assert_eq!(serde_json::to_value(&request).unwrap()["role"], "CUSTOMER");
    }

    #[test]
    fn test_login_response_without_token() {
        let response: LoginResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.access_token.is_none());

        let response: LoginResponse =
            serde_json::from_value(json!({ "accessToken": "abc" })).unwrap();
        assert_eq!(response.access_token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(CampaignStatus::parse("inactive"), Some(CampaignStatus::Inactive));
        assert_eq!(CampaignStatus::parse("ARCHIVED"), None);
        assert_eq!(VoucherKind::parse("amount"), Some(VoucherKind::Amount));
    }
}
