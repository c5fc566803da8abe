//! フォーム入力コンポーネント
//!
//! どちらも `StampForm::input` を通して更新するので、
//! 距離の自動計算と必須エラーの解除はフォーム側で行われる。

use carimbo_common::{StampField, StampForm};
use leptos::prelude::*;

/// 入力欄の type 属性
pub fn input_type(field: StampField) -> &'static str {
    if field.is_numeric() {
        "number"
    } else {
        "text"
    }
}

fn apply_input(form: RwSignal<StampForm>, field: StampField, value: &str) {
    form.update(|f| {
        if let Err(e) = f.input(field, value) {
            leptos::logging::warn!("{}: {}", field, e);
        }
    });
}

/// テキスト/数値の入力欄
#[component]
pub fn FormField(
    field: StampField,
    form: RwSignal<StampForm>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    let id = field.key();
    let error = move || form.with(|f| f.error(field));

    view! {
        <div class="form-group">
            <label for=id>
                {field.label()}
                {field.is_required().then(|| view! { <span class="required">" *"</span> })}
            </label>
            <input
                type=input_type(field)
                id=id
                name=id
                class=move || if error().is_some() { "input has-error" } else { "input" }
                prop:value=move || form.with(|f| f.record().get(field).to_string())
                on:input=move |ev| apply_input(form, field, &event_target_value(&ev))
            />
            {move || error().map(|message| view! { <p class="field-error">{message}</p> })}
            {children.map(|children| children())}
        </div>
    }
}

/// 2値フラグのラジオ選択
#[component]
pub fn RadioGroup(field: StampField, form: RwSignal<StampForm>) -> impl IntoView {
    let name = field.key();

    view! {
        <div class="form-group">
            <span class="group-label">{field.label()}</span>
            <div class="radio-group">
                {field
                    .options()
                    .iter()
                    .map(|&option| {
                        let id = format!("{}-{}", name, option);
                        view! {
                            <label for=id.clone() class="radio">
                                <input
                                    type="radio"
                                    id=id.clone()
                                    name=name
                                    value=option
                                    prop:checked=move || form.with(|f| f.record().get(field) == option)
                                    on:change=move |_| apply_input(form, field, option)
                                />
                                <span>{option}</span>
                            </label>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_type() {
        assert_eq!(input_type(StampField::TotalDistance), "number");
        assert_eq!(input_type(StampField::CableCapacity), "number");
        assert_eq!(input_type(StampField::Technician), "text");
        assert_eq!(input_type(StampField::Queue), "text");
    }
}
