//! メインアプリケーションコンポーネント

use crate::components::{
    image_converter::ImageConverter,
    stamp_form::StampFormCard,
    toast::{Toast, Toasts},
};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // 2枚のカードで共有する通知
    let toasts = Toasts::new();

    view! {
        <div class="app">
            <main class="container">
                <StampFormCard toasts=toasts />
                <ImageConverter toasts=toasts />
            </main>
            <Toast toasts=toasts />
        </div>
    }
}
