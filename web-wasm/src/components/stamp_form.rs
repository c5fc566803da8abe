//! carimbo フォームカード

use crate::browser;
use crate::components::card::Card;
use crate::components::form_field::{FormField, RadioGroup};
use crate::components::toast::Toasts;
use carimbo_common::report::{OFFICIAL_BADGE, REPORT_TITLE, TIMESTAMP_LABEL};
use carimbo_common::{messages, StampField, StampForm, StampReport, AUTHOR_SIGNATURE};
use gloo::timers::callback::Timeout;
use leptos::html::Div;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

const DISTANCE_HINT: &str =
    "💡 Dica: Preencha dois campos de medição para calcular o terceiro automaticamente.";

#[component]
pub fn StampFormCard(toasts: Toasts) -> impl IntoView {
    let form = RwSignal::new(StampForm::new());
    let result_ref = NodeRef::<Div>::new();

    let on_generate = move |_| {
        let now = browser::local_now();
        match form.try_update(|f| f.generate(now).map(|_| ())) {
            Some(Ok(())) => {
                toasts.success(messages::STAMP_GENERATED);
                // 描画後に結果までスクロール
                Timeout::new(100, move || {
                    if let Some(el) = result_ref.get_untracked() {
                        el.scroll_into_view();
                    }
                })
                .forget();
            }
            Some(Err(e)) => toasts.error(e.to_string()),
            None => {}
        }
    };

    let on_clear = move |_| {
        let cleared = form
            .try_update(|f| f.clear(gloo::dialogs::confirm))
            .unwrap_or(false);
        if cleared {
            toasts.success(messages::FORM_CLEARED);
        }
    };

    let on_copy = move |_| match form.with_untracked(StampForm::copy_text) {
        Ok(text) => spawn_local(async move {
            match browser::copy_to_clipboard(&text).await {
                Ok(()) => toasts.success(messages::STAMP_COPIED),
                Err(e) => {
                    leptos::logging::warn!("{:?}", e);
                    toasts.error(e.to_string());
                }
            }
        }),
        Err(e) => toasts.error(e.to_string()),
    };

    let fields = StampField::ALL
        .into_iter()
        .map(|field| {
            if field.is_flag() {
                view! { <RadioGroup field=field form=form /> }.into_any()
            } else if field == StampField::TotalDistance {
                view! {
                    <FormField field=field form=form>
                        <div class="hint">{DISTANCE_HINT}</div>
                    </FormField>
                }
                .into_any()
            } else {
                view! { <FormField field=field form=form /> }.into_any()
            }
        })
        .collect_view();

    view! {
        <Card title="CARIMBO DE REDE EXTERNA" icon="🔧">
            <div class="form-grid">{fields}</div>

            <div class="actions">
                <button class="btn btn-primary" on:click=on_generate>"🔧 Gerar Carimbo"</button>
                <button class="btn btn-dark" on:click=on_clear>"🗑️ Limpar"</button>
                <button class="btn btn-success" on:click=on_copy>"📋 Copiar Carimbo"</button>
            </div>

            <div class="stamp-output" node_ref=result_ref>
                {move || form.with(|f| f.report().cloned()).map(|report| view! { <StampResult report=report /> })}
            </div>
        </Card>
    }
}

/// 生成済みレポートの表示
#[component]
fn StampResult(report: StampReport) -> impl IntoView {
    view! {
        <div class="stamp-result">
            <span class="stamp-badge">{OFFICIAL_BADGE}</span>
            <h3 class="stamp-title">{REPORT_TITLE}</h3>
            <div class="stamp-body">
                <p>
                    <strong>{TIMESTAMP_LABEL}":"</strong>
                    " "
                    {report.timestamp}
                </p>
                {report
                    .lines
                    .into_iter()
                    .map(|line| {
                        view! {
                            <p>
                                <strong>{line.label}":"</strong>
                                " "
                                {line.value}
                            </p>
                        }
                    })
                    .collect_view()}
            </div>
            <p class="stamp-signature">{AUTHOR_SIGNATURE}</p>
        </div>
    }
}
