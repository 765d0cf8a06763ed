//! Voucher endpoints

use super::{ApiGateway, ApiRequest, ClientError};
use crate::types::{BestVouchersRequest, NewVoucher, RedeemRequest, Voucher};
use voucherify_core::{Notifier, TokenStore};

impl<S: TokenStore, N: Notifier> ApiGateway<S, N> {
    /// Add a voucher to a campaign (admin)
    pub async fn create_voucher(&self, voucher: &NewVoucher) -> Result<(), ClientError> {
        self.send_unit(ApiRequest::post("/vouchers").json(voucher)?).await
    }

    /// Remove a voucher (admin)
    pub async fn delete_voucher(&self, id: &str) -> Result<(), ClientError> {
        self.send_unit(ApiRequest::delete(format!("/vouchers/{id}"))).await
    }

    /// Vouchers applicable to a purchase of `amount`, best first
    pub async fn best_vouchers(&self, amount: f64) -> Result<Vec<Voucher>, ClientError> {
        let vouchers: Option<Vec<Voucher>> = self
            .send(ApiRequest::post("/vouchers/best-vouchers").json(&BestVouchersRequest { amount })?)
            .await?;
        Ok(vouchers.unwrap_or_default())
    }

    /// Redeem a voucher by code (customer)
    pub async fn redeem_voucher(&self, code: impl Into<String>) -> Result<(), ClientError> {
        let body = RedeemRequest { code: code.into() };
        self.send_unit(ApiRequest::post("/redeem-voucher").json(&body)?).await
    }
}
