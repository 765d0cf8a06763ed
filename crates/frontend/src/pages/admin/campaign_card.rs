use voucherify_http::types::{Campaign, Voucher, form_datetime};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct CampaignCardProps {
    pub campaign: Campaign,
    pub expanded: bool,
    pub on_edit: Callback<Campaign>,
    pub on_delete: Callback<String>,
    pub on_toggle: Callback<String>,
    pub on_add_voucher: Callback<String>,
    pub on_delete_voucher: Callback<String>,
    /// Voucher form, rendered inside the expanded card
    #[prop_or_default]
    pub children: Html,
}

fn display_datetime(value: Option<&str>) -> String {
    value
        .map(|v| form_datetime(v).replace('T', " "))
        .unwrap_or_else(|| "-".to_string())
}

fn voucher_item(voucher: &Voucher, on_delete: &Callback<String>) -> Html {
    let onclick = {
        let id = voucher.id.clone();
        let on_delete = on_delete.clone();
        Callback::from(move |_| on_delete.emit(id.clone()))
    };

    html! {
        <div key={voucher.id.clone()} class="border rounded-lg p-4">
            <div class="flex justify-between items-start mb-2">
                <h5 class="font-semibold">{&voucher.code}</h5>
                <button {onclick} class="text-red-600 hover:bg-red-50 p-1 rounded">{"Delete"}</button>
            </div>
            <p class="text-sm text-gray-600">{voucher.display_value()}</p>
            <p class="text-sm text-gray-600">
                {format!("Uses: {} / {}", voucher.current_usage, voucher.total_usages)}
            </p>
            if let Some(max_discount) = voucher.max_discount.filter(|d| *d > 0.0) {
                <p class="text-sm text-gray-600">{format!("Max Discount: ${max_discount}")}</p>
            }
            <p class="text-sm text-gray-600">{format!("Status: {}", voucher.status)}</p>
            if let Some(expires) = voucher.expiration_date.as_deref() {
                <p class="text-sm text-gray-600">{format!("Expires: {}", expires.chars().take(10).collect::<String>())}</p>
            }
        </div>
    }
}

#[function_component(CampaignCard)]
pub fn campaign_card(props: &CampaignCardProps) -> Html {
    let campaign = &props.campaign;

    let on_edit = {
        let campaign = campaign.clone();
        let on_edit = props.on_edit.clone();
        Callback::from(move |_| on_edit.emit(campaign.clone()))
    };
    let on_delete = {
        let id = campaign.id.clone();
        let on_delete = props.on_delete.clone();
        Callback::from(move |_| on_delete.emit(id.clone()))
    };
    let on_toggle = {
        let id = campaign.id.clone();
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |_| on_toggle.emit(id.clone()))
    };
    let on_add_voucher = {
        let id = campaign.id.clone();
        let on_add_voucher = props.on_add_voucher.clone();
        Callback::from(move |_| on_add_voucher.emit(id.clone()))
    };

    html! {
        <div class="bg-white rounded-lg shadow-md p-6">
            <div class="flex justify-between items-start mb-4">
                <div>
                    <h3 class="text-xl font-semibold">{&campaign.name}</h3>
                    <p class="text-gray-600">{&campaign.description}</p>
                    <div class="mt-2 text-sm text-gray-500">
                        <p>{format!("Start: {}", display_datetime(campaign.start_date.as_deref()))}</p>
                        <p>{format!("End: {}", display_datetime(campaign.end_date.as_deref()))}</p>
                        <p>{format!("Status: {}", campaign.status)}</p>
                    </div>
                </div>
                <div class="flex gap-2">
                    <button onclick={on_edit} class="p-2 text-blue-600 hover:bg-blue-50 rounded">{"Edit"}</button>
                    <button onclick={on_delete} class="p-2 text-red-600 hover:bg-red-50 rounded">{"Delete"}</button>
                    <button onclick={on_toggle} class="p-2 text-gray-600 hover:bg-gray-50 rounded">
                        {if props.expanded { "▲" } else { "▼" }}
                    </button>
                </div>
            </div>

            if props.expanded {
                <div class="mt-4">
                    <div class="flex justify-between items-center mb-4">
                        <h4 class="text-lg font-semibold">{"Vouchers"}</h4>
                        <button
                            onclick={on_add_voucher}
                            class="flex items-center gap-2 px-4 py-2 bg-green-600 text-white rounded-lg hover:bg-green-700"
                        >
                            {"+ Add Voucher"}
                        </button>
                    </div>
                    { props.children.clone() }
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        { for campaign.vouchers.iter().map(|v| voucher_item(v, &props.on_delete_voucher)) }
                    </div>
                </div>
            }
        </div>
    }
}
