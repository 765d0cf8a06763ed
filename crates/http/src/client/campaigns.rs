//! Campaign endpoints (admin)

use super::{ApiGateway, ApiRequest, ClientError};
use crate::types::{Campaign, CampaignForm};
use voucherify_core::{Notifier, TokenStore};

impl<S: TokenStore, N: Notifier> ApiGateway<S, N> {
    /// List campaigns with their vouchers
    pub async fn list_campaigns(&self) -> Result<Vec<Campaign>, ClientError> {
        let campaigns: Option<Vec<Campaign>> = self.send(ApiRequest::get("/campaigns")).await?;
        Ok(campaigns.unwrap_or_default())
    }

    pub async fn create_campaign(&self, form: &CampaignForm) -> Result<(), ClientError> {
        self.send_unit(ApiRequest::post("/campaigns").json(form)?).await
    }

    pub async fn update_campaign(&self, id: &str, form: &CampaignForm) -> Result<(), ClientError> {
        self.send_unit(ApiRequest::put(format!("/campaigns/{id}")).json(form)?).await
    }

    pub async fn delete_campaign(&self, id: &str) -> Result<(), ClientError> {
        self.send_unit(ApiRequest::delete(format!("/campaigns/{id}"))).await
    }
}
