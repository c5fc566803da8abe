//! トースト通知コンポーネント
//!
//! 表示は常に1件。新しい通知は前の通知を置き換え、
//! 3秒後のタイマーは自分のIDの通知だけを消す。

use carimbo_common::{Notification, Notifier, Severity, NOTIFICATION_DURATION};
use gloo::timers::callback::Timeout;
use leptos::prelude::*;

/// 通知の共有ハンドル
#[derive(Clone, Copy)]
pub struct Toasts(RwSignal<Notifier>);

impl Toasts {
    pub fn new() -> Self {
        Self(RwSignal::new(Notifier::new()))
    }

    pub fn current(&self) -> Option<Notification> {
        self.0.with(|n| n.current().cloned())
    }

    pub fn show(&self, message: impl Into<String>, severity: Severity) {
        let Some(id) = self.0.try_update(|n| n.show(message, severity)) else {
            return;
        };

        let notifier = self.0;
        Timeout::new(NOTIFICATION_DURATION.as_millis() as u32, move || {
            notifier.update(|n| {
                n.expire(id);
            });
        })
        .forget();
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message, Severity::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message, Severity::Error);
    }

    pub fn dismiss(&self) {
        self.0.update(Notifier::dismiss);
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

pub fn toast_class(severity: Severity) -> String {
    format!("toast toast-{}", severity.as_str())
}

#[component]
pub fn Toast(toasts: Toasts) -> impl IntoView {
    move || {
        toasts.current().map(|notification| {
            view! {
                <div
                    class=toast_class(notification.severity)
                    role="alert"
                    on:click=move |_| toasts.dismiss()
                >
                    {notification.message}
                </div>
            }
        })
    }
}
