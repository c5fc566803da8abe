//! カードコンポーネント（見出し付きの枠）

use leptos::prelude::*;

#[component]
pub fn Card(title: &'static str, icon: &'static str, children: Children) -> impl IntoView {
    view! {
        <section class="card">
            <h1 class="card-title">
                <span class="card-icon">{icon}</span>
                <span>{title}</span>
            </h1>
            {children()}
        </section>
    }
}
