//! Voucher creation form

use crate::pages::select_value;
use std::fmt::{self, Display};
use voucherify_http::types::{NewVoucher, VoucherKind};
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Raw form values, as typed
#[derive(Clone, Debug, PartialEq)]
pub struct VoucherDraft {
    pub code: String,
    pub kind: VoucherKind,
    pub value: String,
    pub max_limit: String,
    pub max_discount: String,
    pub max_usage_per_user: String,
    pub total_usages: String,
    pub expiration_date: String,
}

impl Default for VoucherDraft {
    fn default() -> Self {
        Self {
            code: String::new(),
            kind: VoucherKind::Percentage,
            value: String::new(),
            max_limit: String::new(),
            max_discount: String::new(),
            max_usage_per_user: NewVoucher::DEFAULT_MAX_USAGE_PER_USER.to_string(),
            total_usages: NewVoucher::DEFAULT_TOTAL_USAGES.to_string(),
            expiration_date: String::new(),
        }
    }
}

/// A draft field that cannot be sent
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DraftError {
    MissingCode,
    InvalidNumber(&'static str),
}

impl Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCode => write!(f, "Voucher code is required"),
            Self::InvalidNumber(field) => write!(f, "{field} must be a valid number"),
        }
    }
}

fn optional_amount(input: &str, field: &'static str) -> Result<Option<f64>, DraftError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    input
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(Some)
        .ok_or(DraftError::InvalidNumber(field))
}

fn count_or(input: &str, default: u32, field: &'static str) -> Result<u32, DraftError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(default);
    }
    input.parse().map_err(|_| DraftError::InvalidNumber(field))
}

impl VoucherDraft {
    /// Validate the draft into a request body for `campaign_id`
    pub fn to_new_voucher(&self, campaign_id: &str) -> Result<NewVoucher, DraftError> {
        let code = self.code.trim();
        if code.is_empty() {
            return Err(DraftError::MissingCode);
        }

        let value = optional_amount(&self.value, "Value")?.ok_or(DraftError::InvalidNumber("Value"))?;

        let mut voucher = NewVoucher::new(campaign_id, code, self.kind, value);
        voucher.max_limit = optional_amount(&self.max_limit, "Max limit")?;
        voucher.max_discount = optional_amount(&self.max_discount, "Max discount")?;
        voucher.max_usage_per_user = count_or(
            &self.max_usage_per_user,
            NewVoucher::DEFAULT_MAX_USAGE_PER_USER,
            "Max usage per user",
        )?;
        voucher.total_usages = count_or(
            &self.total_usages,
            NewVoucher::DEFAULT_TOTAL_USAGES,
            "Total usages",
        )?;
        voucher.expiration_date = Some(self.expiration_date.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Ok(voucher)
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct VoucherFormProps {
    pub draft: VoucherDraft,
    pub on_change: Callback<VoucherDraft>,
    pub on_submit: Callback<()>,
    pub on_cancel: Callback<()>,
}

/// Input callback writing one field of the draft
fn field(props: &VoucherFormProps, set: fn(&mut VoucherDraft, String)) -> Callback<InputEvent> {
    let draft = props.draft.clone();
    let on_change = props.on_change.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let mut draft = draft.clone();
        set(&mut draft, input.value());
        on_change.emit(draft);
    })
}

#[function_component(VoucherForm)]
pub fn voucher_form(props: &VoucherFormProps) -> Html {
    let draft = &props.draft;

    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let on_kind_change = {
        let draft = draft.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let mut draft = draft.clone();
            draft.kind = VoucherKind::parse(&select_value(&e)).unwrap_or_default();
            on_change.emit(draft);
        })
    };

    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_| on_cancel.emit(()))
    };

    html! {
        <div class="bg-gray-50 rounded-lg p-4 mb-4">
            <h5 class="text-lg font-semibold mb-4">{"Create New Voucher"}</h5>
            <form {onsubmit} class="space-y-4">
                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    <input
                        type="text"
                        placeholder="Voucher Code"
                        class="px-4 py-2 border rounded-lg"
                        value={draft.code.clone()}
                        oninput={field(props, |d, v| d.code = v)}
                        required=true
                    />
                    <select class="px-4 py-2 border rounded-lg" onchange={on_kind_change}>
                        <option value="PERCENTAGE" selected={draft.kind == VoucherKind::Percentage}>{"Percentage"}</option>
                        <option value="AMOUNT" selected={draft.kind == VoucherKind::Amount}>{"Fixed Amount"}</option>
                    </select>
                    <input
                        type="number"
                        placeholder="Value"
                        class="px-4 py-2 border rounded-lg"
                        value={draft.value.clone()}
                        oninput={field(props, |d, v| d.value = v)}
                        required=true
                    />
                    <input
                        type="number"
                        placeholder="Max Limit"
                        class="px-4 py-2 border rounded-lg"
                        value={draft.max_limit.clone()}
                        oninput={field(props, |d, v| d.max_limit = v)}
                    />
                    <input
                        type="number"
                        placeholder="Max Discount"
                        class="px-4 py-2 border rounded-lg"
                        value={draft.max_discount.clone()}
                        oninput={field(props, |d, v| d.max_discount = v)}
                    />
                    <input
                        type="number"
                        placeholder="Max Usage Per User"
                        class="px-4 py-2 border rounded-lg"
                        value={draft.max_usage_per_user.clone()}
                        oninput={field(props, |d, v| d.max_usage_per_user = v)}
                    />
                    <input
                        type="number"
                        placeholder="Total Usages"
                        class="px-4 py-2 border rounded-lg"
                        value={draft.total_usages.clone()}
                        oninput={field(props, |d, v| d.total_usages = v)}
                    />
                    <input
                        type="datetime-local"
                        class="px-4 py-2 border rounded-lg"
                        value={draft.expiration_date.clone()}
                        oninput={field(props, |d, v| d.expiration_date = v)}
                    />
                </div>
                <div class="flex gap-2">
                    <button type="submit" class="px-6 py-2 bg-blue-600 text-white rounded-lg hover:bg-blue-700">
                        {"Create Voucher"}
                    </button>
                    <button type="button" onclick={on_cancel} class="px-6 py-2 bg-gray-600 text-white rounded-lg hover:bg-gray-700">
                        {"Cancel"}
                    </button>
                </div>
            </form>
        </div>
    }
}
