use crate::pages::select_value;
use voucherify_http::types::{CampaignForm, CampaignStatus};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct CampaignFormProps {
    pub form: CampaignForm,
    /// Editing an existing campaign rather than creating one
    pub editing: bool,
    pub on_change: Callback<CampaignForm>,
    pub on_submit: Callback<()>,
    pub on_cancel: Callback<()>,
}

fn field(props: &CampaignFormProps, set: fn(&mut CampaignForm, String)) -> Callback<InputEvent> {
    let form = props.form.clone();
    let on_change = props.on_change.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let mut form = form.clone();
        set(&mut form, input.value());
        on_change.emit(form);
    })
}

fn status_label(status: CampaignStatus) -> &'static str {
    match status {
        CampaignStatus::Active => "Active",
        CampaignStatus::Inactive => "Inactive",
        CampaignStatus::Scheduled => "Scheduled",
    }
}

#[function_component(CampaignFormView)]
pub fn campaign_form_view(props: &CampaignFormProps) -> Html {
    let form = &props.form;

    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let on_status_change = {
        let form = form.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let mut form = form.clone();
            form.status = CampaignStatus::parse(&select_value(&e)).unwrap_or_default();
            on_change.emit(form);
        })
    };

    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_| on_cancel.emit(()))
    };

    html! {
        <div class="bg-white rounded-lg shadow-md p-6 mb-8">
            <h2 class="text-xl font-semibold mb-4">
                {if props.editing { "Edit Campaign" } else { "Create New Campaign" }}
            </h2>
            <form {onsubmit} class="space-y-4">
                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    <input
                        type="text"
                        placeholder="Campaign Name"
                        class="px-4 py-2 border rounded-lg"
                        value={form.name.clone()}
                        oninput={field(props, |f, v| f.name = v)}
                        required=true
                    />
                    <input
                        type="text"
                        placeholder="Description"
                        class="px-4 py-2 border rounded-lg"
                        value={form.description.clone()}
                        oninput={field(props, |f, v| f.description = v)}
                        required=true
                    />
                    <input
                        type="datetime-local"
                        class="px-4 py-2 border rounded-lg"
                        value={form.start_date.clone()}
                        oninput={field(props, |f, v| f.start_date = v)}
                        required=true
                    />
                    <input
                        type="datetime-local"
                        class="px-4 py-2 border rounded-lg"
                        value={form.end_date.clone()}
                        oninput={field(props, |f, v| f.end_date = v)}
                        required=true
                    />
                    <select class="px-4 py-2 border rounded-lg" onchange={on_status_change}>
                        { for CampaignStatus::ALL.into_iter().map(|status| html! {
                            <option value={status.as_str()} selected={form.status == status}>
                                {status_label(status)}
                            </option>
                        }) }
                    </select>
                </div>
                <div class="flex gap-2">
                    <button type="submit" class="px-6 py-2 bg-blue-600 text-white rounded-lg hover:bg-blue-700">
                        {if props.editing { "Update Campaign" } else { "Create Campaign" }}
                    </button>
                    if props.editing {
                        <button type="button" onclick={on_cancel} class="px-6 py-2 bg-gray-600 text-white rounded-lg hover:bg-gray-700">
                            {"Cancel"}
                        </button>
                    }
                </div>
            </form>
        </div>
    }
}
