//! Admin dashboard: campaign and voucher management

mod campaign_card;
mod campaign_form;
mod voucher_form;

pub use voucher_form::{DraftError, VoucherDraft};

use super::{confirm, logout_callback};
use crate::client::{gateway, session};
use crate::components::LoadingSpinner;
use crate::toast::toast;
use campaign_card::CampaignCard;
use campaign_form::CampaignFormView;
use tracing::warn;
use voucher_form::VoucherForm;
use voucherify_core::Notification;
use voucherify_http::{ClientError, SESSION_EXPIRED_MESSAGE};
use voucherify_http::types::{Campaign, CampaignForm, NewVoucher};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

const FETCH_FAILED: &str = "Failed to fetch campaigns";
const CAMPAIGN_CREATED: &str = "Campaign created successfully";
const CAMPAIGN_UPDATED: &str = "Campaign updated successfully";
const CREATE_FAILED: &str = "Failed to create campaign";
const UPDATE_FAILED: &str = "Failed to update campaign";
const CAMPAIGN_DELETED: &str = "Campaign deleted successfully";
const CAMPAIGN_DELETE_FAILED: &str = "Failed to delete campaign";
const CONFIRM_DELETE_CAMPAIGN: &str = "Are you sure you want to delete this campaign?";
const TOKEN_NOT_FOUND: &str = "Authentication token not found";
const VOUCHER_CREATED: &str = "Voucher created successfully";
const VOUCHER_CREATE_FAILED: &str = "Failed to create voucher";
const VOUCHER_DELETED: &str = "Voucher deleted successfully";
const VOUCHER_DELETE_FAILED: &str = "Failed to delete voucher";
const CONFIRM_DELETE_VOUCHER: &str = "Are you sure you want to delete this voucher?";

async fn save_campaign(editing: Option<String>, form: CampaignForm) -> Result<(), ClientError> {
    let gateway = gateway()?;
    match editing {
        Some(id) => gateway.update_campaign(&id, &form).await,
        None => gateway.create_campaign(&form).await,
    }
}

/// Message shown when creating a voucher fails
fn voucher_error_message(error: &ClientError) -> String {
    if error.is_auth_failure() {
        SESSION_EXPIRED_MESSAGE.to_string()
    } else {
        error.user_message(VOUCHER_CREATE_FAILED)
    }
}

async fn create_voucher(voucher: NewVoucher) -> Result<(), ClientError> {
    gateway()?.create_voucher(&voucher).await
}

#[function_component(AdminDashboard)]
pub fn admin_dashboard() -> Html {
    let navigator = use_navigator();
    let campaigns = use_state(Vec::<Campaign>::new);
    let loading = use_state(|| false);

    let form = use_state(CampaignForm::default);
    let editing = use_state(|| Option::<String>::None);
    let expanded = use_state(|| Option::<String>::None);
    let voucher_target = use_state(|| Option::<String>::None);
    let draft = use_state(VoucherDraft::default);

    let fetch_campaigns = {
        let campaigns = campaigns.clone();
        let loading = loading.clone();
        Callback::from(move |_: ()| {
            let campaigns = campaigns.clone();
            let loading = loading.clone();
            loading.set(true);
            spawn_local(async move {
                let result = match gateway() {
                    Ok(gateway) => gateway.list_campaigns().await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(list) => campaigns.set(list),
                    Err(e) => {
                        warn!(error = %e, "Failed to fetch campaigns");
                        toast(Notification::error(FETCH_FAILED));
                    }
                }
                loading.set(false);
            });
        })
    };

    // Load campaigns on mount
    {
        let fetch_campaigns = fetch_campaigns.clone();
        use_effect_with((), move |_| {
            fetch_campaigns.emit(());
        });
    }

    let reset_campaign_form = {
        let form = form.clone();
        let editing = editing.clone();
        Callback::from(move |_: ()| {
            form.set(CampaignForm::default());
            editing.set(None);
        })
    };

    let on_campaign_change = {
        let form = form.clone();
        Callback::from(move |updated: CampaignForm| form.set(updated))
    };

    let on_campaign_submit = {
        let form = form.clone();
        let editing = editing.clone();
        let fetch_campaigns = fetch_campaigns.clone();
        let reset = reset_campaign_form.clone();
        Callback::from(move |_: ()| {
            let target = (*editing).clone();
            let body = (*form).clone();
            let fetch_campaigns = fetch_campaigns.clone();
            let reset = reset.clone();
            spawn_local(async move {
                let is_update = target.is_some();
                match save_campaign(target, body).await {
                    Ok(()) => {
                        toast(Notification::success(if is_update {
                            CAMPAIGN_UPDATED
                        } else {
                            CAMPAIGN_CREATED
                        }));
                        fetch_campaigns.emit(());
                        reset.emit(());
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to save campaign");
                        toast(Notification::error(if is_update {
                            UPDATE_FAILED
                        } else {
                            CREATE_FAILED
                        }));
                    }
                }
            });
        })
    };

    let on_edit = {
        let form = form.clone();
        let editing = editing.clone();
        Callback::from(move |campaign: Campaign| {
            form.set(campaign.to_form());
            editing.set(Some(campaign.id));
        })
    };

    let on_delete_campaign = {
        let fetch_campaigns = fetch_campaigns.clone();
        Callback::from(move |id: String| {
            if !confirm(CONFIRM_DELETE_CAMPAIGN) {
                return;
            }
            let fetch_campaigns = fetch_campaigns.clone();
            spawn_local(async move {
                let result = match gateway() {
                    Ok(gateway) => gateway.delete_campaign(&id).await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(()) => {
                        toast(Notification::success(CAMPAIGN_DELETED));
                        fetch_campaigns.emit(());
                    }
                    Err(e) => {
                        warn!(error = %e, campaign = %id, "Failed to delete campaign");
                        toast(Notification::error(CAMPAIGN_DELETE_FAILED));
                    }
                }
            });
        })
    };

    let on_toggle = {
        let expanded = expanded.clone();
        Callback::from(move |id: String| {
            if expanded.as_deref() == Some(id.as_str()) {
                expanded.set(None);
            } else {
                expanded.set(Some(id));
            }
        })
    };

    let on_add_voucher = {
        let voucher_target = voucher_target.clone();
        Callback::from(move |id: String| voucher_target.set(Some(id)))
    };

    let reset_voucher_form = {
        let draft = draft.clone();
        let voucher_target = voucher_target.clone();
        Callback::from(move |_: ()| {
            draft.set(VoucherDraft::default());
            voucher_target.set(None);
        })
    };

    let on_draft_change = {
        let draft = draft.clone();
        Callback::from(move |updated: VoucherDraft| draft.set(updated))
    };

    let on_voucher_submit = {
        let draft = draft.clone();
        let voucher_target = voucher_target.clone();
        let fetch_campaigns = fetch_campaigns.clone();
        let reset = reset_voucher_form.clone();
        Callback::from(move |_: ()| {
            if !session().is_authenticated() {
                toast(Notification::error(TOKEN_NOT_FOUND));
                return;
            }
            let Some(campaign_id) = (*voucher_target).clone() else {
                return;
            };
            let voucher = match draft.to_new_voucher(&campaign_id) {
                Ok(voucher) => voucher,
                Err(e) => {
                    toast(Notification::error(e.to_string()));
                    return;
                }
            };

            let fetch_campaigns = fetch_campaigns.clone();
            let reset = reset.clone();
            spawn_local(async move {
                match create_voucher(voucher).await {
                    Ok(()) => {
                        toast(Notification::success(VOUCHER_CREATED));
                        fetch_campaigns.emit(());
                        reset.emit(());
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to create voucher");
                        toast(Notification::error(voucher_error_message(&e)));
                    }
                }
            });
        })
    };

    let on_delete_voucher = {
        let fetch_campaigns = fetch_campaigns.clone();
        Callback::from(move |id: String| {
            if !confirm(CONFIRM_DELETE_VOUCHER) {
                return;
            }
            let fetch_campaigns = fetch_campaigns.clone();
            spawn_local(async move {
                let result = match gateway() {
                    Ok(gateway) => gateway.delete_voucher(&id).await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(()) => {
                        toast(Notification::success(VOUCHER_DELETED));
                        fetch_campaigns.emit(());
                    }
                    Err(e) => {
                        warn!(error = %e, voucher = %id, "Failed to delete voucher");
                        toast(Notification::error(VOUCHER_DELETE_FAILED));
                    }
                }
            });
        })
    };

    html! {
        <div class="min-h-screen bg-gray-50 p-6">
            <div class="max-w-7xl mx-auto">
                <div class="flex justify-between items-center mb-8">
                    <h1 class="text-3xl font-bold text-gray-900">{"Campaign Management"}</h1>
                    <button
                        onclick={logout_callback(navigator)}
                        class="px-4 py-2 bg-red-600 text-white rounded-lg hover:bg-red-700"
                    >
                        {"Logout"}
                    </button>
                </div>

                <CampaignFormView
                    form={(*form).clone()}
                    editing={editing.is_some()}
                    on_change={on_campaign_change}
                    on_submit={on_campaign_submit}
                    on_cancel={reset_campaign_form}
                />

                <div class="space-y-4">
                    if *loading {
                        <LoadingSpinner text={Some("Loading campaigns...".to_string())} />
                    } else {
                        { for campaigns.iter().map(|campaign| {
                            let is_expanded = expanded.as_deref() == Some(campaign.id.as_str());
                            let show_form = voucher_target.as_deref() == Some(campaign.id.as_str());
                            html! {
                                <CampaignCard
                                    key={campaign.id.clone()}
                                    campaign={campaign.clone()}
                                    expanded={is_expanded}
                                    on_edit={on_edit.clone()}
                                    on_delete={on_delete_campaign.clone()}
                                    on_toggle={on_toggle.clone()}
                                    on_add_voucher={on_add_voucher.clone()}
                                    on_delete_voucher={on_delete_voucher.clone()}
                                >
                                    if show_form {
                                        <VoucherForm
                                            draft={(*draft).clone()}
                                            on_change={on_draft_change.clone()}
                                            on_submit={on_voucher_submit.clone()}
                                            on_cancel={reset_voucher_form.clone()}
                                        />
                                    }
                                </CampaignCard>
                            }
                        }) }
                    }
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voucher_error_message() {
        let expired = ClientError::AuthenticationFailed {
            message: "Unauthorized".into(),
            request: None,
        };
        assert_eq!(voucher_error_message(&expired), SESSION_EXPIRED_MESSAGE);

        let duplicate = ClientError::BadRequest(r#"{"message":"Voucher code already exists"}"#.into());
        assert_eq!(voucher_error_message(&duplicate), "Voucher code already exists");

        let server = ClientError::ServerError {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(voucher_error_message(&server), VOUCHER_CREATE_FAILED);
    }
}
