//! Toast notifications
//!
//! A single [`ToastContainer`] mounted at the app root registers itself as
//! the global sink; [`ToastNotifier`] and [`toast`] push into it from
//! anywhere, including the API gateway.

use crate::config::ToastConfig;
use gloo::timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, warn};
use voucherify_core::{LogNotifier, Notification, NotificationKind, Notifier};
use yew::prelude::*;

thread_local! {
    /// Callback of the mounted toast container
    static TOAST_SINK: RefCell<Option<Callback<Notification>>> = const { RefCell::new(None) };
}

fn set_toast_sink(callback: Callback<Notification>) {
    TOAST_SINK.with(|sink| {
        *sink.borrow_mut() = Some(callback);
    });
}

fn clear_toast_sink() {
    TOAST_SINK.with(|sink| {
        *sink.borrow_mut() = None;
    });
}

/// Show a notification
pub fn toast(notification: Notification) {
    ToastNotifier.notify(notification);
}

/// Notifier that renders toasts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToastNotifier;

impl Notifier for ToastNotifier {
    fn notify(&self, notification: Notification) {
        LogNotifier.notify(notification.clone());

        let sink = TOAST_SINK.with(|sink| sink.borrow().clone());
        match sink {
            Some(callback) => callback.emit(notification),
            None => warn!("No toast container mounted, notification dropped"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Toast {
    id: u32,
    notification: Notification,
}

#[derive(Clone, Debug, Default, PartialEq)]
struct ToastList {
    toasts: Vec<Toast>,
}

enum ToastAction {
    Push(Toast),
    Dismiss(u32),
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut toasts = self.toasts.clone();
        match action {
            ToastAction::Push(toast) => toasts.push(toast),
            ToastAction::Dismiss(id) => toasts.retain(|t| t.id != id),
        }
        Rc::new(Self { toasts })
    }
}

fn toast_classes(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "bg-green-600 text-white",
        NotificationKind::Error => "bg-red-600 text-white",
        NotificationKind::Info => "bg-gray-800 text-white",
    }
}

#[function_component(ToastContainer)]
pub fn toast_container() -> Html {
    let list = use_reducer(ToastList::default);
    let next_id = use_mut_ref(|| 0u32);

    {
        let list = list.clone();
        use_effect_with((), move |_| {
            set_toast_sink(Callback::from(move |notification: Notification| {
                let id = {
                    let mut next_id = next_id.borrow_mut();
                    *next_id = next_id.wrapping_add(1);
                    *next_id
                };
                debug!(id, "Showing toast");
                list.dispatch(ToastAction::Push(Toast { id, notification }));

                let list = list.clone();
                Timeout::new(ToastConfig::DURATION_MS, move || {
                    list.dispatch(ToastAction::Dismiss(id));
                })
                .forget();
            }));

            clear_toast_sink
        });
    }

    html! {
        <div class="fixed top-4 right-4 z-50 flex flex-col gap-2 w-80">
            { for list.toasts.iter().map(|toast| {
                let id = toast.id;
                let on_dismiss = {
                    let list = list.clone();
                    Callback::from(move |_| list.dispatch(ToastAction::Dismiss(id)))
                };
                html! {
                    <div
                        key={id}
                        class={classes!("px-4", "py-3", "rounded-lg", "shadow-lg", "cursor-pointer", "text-sm", toast_classes(toast.notification.kind))}
                        onclick={on_dismiss}
                    >
                        {&toast.notification.message}
                    </div>
                }
            }) }
        </div>
    }
}
