//! Customer dashboard: find the best vouchers for a purchase and redeem one

use super::{bind_input, logout_callback};
use crate::client::gateway;
use crate::components::{LoadingSpinner, VoucherCard};
use crate::toast::toast;
use std::rc::Rc;
use tracing::warn;
use voucherify_core::Notification;
use voucherify_http::ClientError;
use voucherify_http::types::Voucher;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

const FETCH_FAILED: &str = "Failed to fetch vouchers";
const REDEEM_SUCCESS: &str = "Voucher redeemed successfully!";
const REDEEM_FAILED: &str = "Failed to redeem voucher";
const INVALID_AMOUNT: &str = "Please enter a valid amount";

/// Parse a purchase amount typed by the user
fn parse_amount(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount >= 0.0)
}

/// Vouchers currently offered to the customer
#[derive(Clone, Debug, Default, PartialEq)]
struct VoucherList {
    vouchers: Vec<Voucher>,
}

enum VoucherAction {
    Replace(Vec<Voucher>),
    /// Drop every voucher with this code
    Remove(String),
}

impl Reducible for VoucherList {
    type Action = VoucherAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let vouchers = match action {
            VoucherAction::Replace(vouchers) => vouchers,
            VoucherAction::Remove(code) => self
                .vouchers
                .iter()
                .filter(|v| v.code != code)
                .cloned()
                .collect(),
        };
        Rc::new(Self { vouchers })
    }
}

async fn find_vouchers(amount: f64) -> Result<Vec<Voucher>, ClientError> {
    gateway()?.best_vouchers(amount).await
}

async fn redeem(code: String) -> Result<(), ClientError> {
    gateway()?.redeem_voucher(code).await
}

#[function_component(CustomerDashboard)]
pub fn customer_dashboard() -> Html {
    let navigator = use_navigator();
    let amount = use_state(String::new);
    let vouchers = use_reducer(VoucherList::default);
    let loading = use_state(|| false);

    let onsubmit = {
        let amount = amount.clone();
        let vouchers = vouchers.clone();
        let loading = loading.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(value) = parse_amount(&amount) else {
                toast(Notification::error(INVALID_AMOUNT));
                return;
            };

            let vouchers = vouchers.clone();
            let loading = loading.clone();
            loading.set(true);
            spawn_local(async move {
                match find_vouchers(value).await {
                    Ok(found) => vouchers.dispatch(VoucherAction::Replace(found)),
                    Err(e) => {
                        warn!(error = %e, "Failed to fetch vouchers");
                        toast(Notification::error(FETCH_FAILED));
                    }
                }
                loading.set(false);
            });
        })
    };

    let on_select = {
        let vouchers = vouchers.clone();
        Callback::from(move |voucher: Voucher| {
            let vouchers = vouchers.clone();
            spawn_local(async move {
                match redeem(voucher.code.clone()).await {
                    Ok(()) => {
                        toast(Notification::success(REDEEM_SUCCESS));
                        vouchers.dispatch(VoucherAction::Remove(voucher.code));
                    }
                    Err(e) => {
                        warn!(error = %e, code = %voucher.code, "Failed to redeem voucher");
                        toast(Notification::error(REDEEM_FAILED));
                    }
                }
            });
        })
    };

    html! {
        <div class="max-w-6xl mx-auto p-6">
            <div class="flex justify-between items-center mb-8">
                <h1 class="text-3xl font-bold">{"Find Best Vouchers"}</h1>
                <button
                    onclick={logout_callback(navigator)}
                    class="px-4 py-2 bg-red-600 text-white rounded hover:bg-red-700"
                >
                    {"Logout"}
                </button>
            </div>

            <form {onsubmit} class="max-w-sm mx-auto mb-8">
                <div class="flex gap-2">
                    <input
                        type="number"
                        placeholder="Enter amount"
                        class="flex-1 px-4 py-2 border rounded-lg"
                        min="0"
                        step="0.01"
                        value={(*amount).clone()}
                        oninput={bind_input(&amount)}
                        required=true
                    />
                    <button type="submit" class="px-6 py-2 bg-blue-600 text-white rounded-lg hover:bg-blue-700">
                        {"Find Vouchers"}
                    </button>
                </div>
            </form>

            if *loading {
                <LoadingSpinner text={Some("Loading vouchers...".to_string())} />
            } else if vouchers.vouchers.is_empty() {
                <div class="text-center text-gray-500">
                    {"No vouchers found. Try searching with a different amount."}
                </div>
            } else {
                <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                    { for vouchers.vouchers.iter().map(|voucher| html! {
                        <VoucherCard key={voucher.code.clone()} voucher={voucher.clone()} on_select={on_select.clone()} />
                    }) }
                </div>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voucher(code: &str) -> Voucher {
        Voucher {
            code: code.into(),
            ..Voucher::default()
        }
    }

    #[test]
    fn test_removals_apply_to_latest_list() {
        let list = Rc::new(VoucherList::default())
            .reduce(VoucherAction::Replace(vec![voucher("A"), voucher("B"), voucher("C")]));

        // Two redemptions finishing back to back both stick
        let list = list.reduce(VoucherAction::Remove("A".into()));
        let list = list.reduce(VoucherAction::Remove("B".into()));

        let codes: Vec<_> = list.vouchers.iter().map(|v| v.code.as_str()).collect();
        assert_eq!(codes, ["C"]);

        let list = list.reduce(VoucherAction::Remove("missing".into()));
        assert_eq!(list.vouchers.len(), 1);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("120.50"), Some(120.5));
        assert_eq!(parse_amount(" 0 "), Some(0.0));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("-3"), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("NaN"), None);
    }
}
