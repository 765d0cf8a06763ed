//! Voucher summary card shown to customers

use voucherify_http::types::Voucher;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct VoucherCardProps {
    pub voucher: Voucher,
    pub on_select: Callback<Voucher>,
}

#[function_component(VoucherCard)]
pub fn voucher_card(props: &VoucherCardProps) -> Html {
    let voucher = &props.voucher;
    let onclick = {
        let voucher = voucher.clone();
        let on_select = props.on_select.clone();
        Callback::from(move |_| on_select.emit(voucher.clone()))
    };

    html! {
        <div class="border rounded-lg p-4 hover:shadow-lg transition-shadow">
            <div class="flex justify-between items-start mb-2">
                <h3 class="text-lg font-semibold">{voucher.display_value()}</h3>
                <span class="text-sm bg-green-100 text-green-800 px-2 py-1 rounded">
                    {&voucher.status}
                </span>
            </div>
            <p class="text-sm text-gray-600 mb-2">{format!("Code: {}", voucher.code)}</p>
            if let Some(max_discount) = voucher.max_discount.filter(|d| *d > 0.0) {
                <p class="text-sm text-gray-500 mb-2">{format!("Max discount: ${max_discount}")}</p>
            }
            <p class="text-sm text-gray-500 mb-4">{format!("Uses left: {}", voucher.uses_left())}</p>
            <button
                {onclick}
                class="w-full bg-blue-600 text-white py-2 rounded hover:bg-blue-700 transition-colors"
            >
                {"Select Voucher"}
            </button>
        </div>
    }
}
