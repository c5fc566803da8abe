//! BMP 変換カード

use crate::browser::BrowserFile;
use crate::components::card::Card;
use crate::components::toast::Toasts;
use carimbo_common::{convert_file, messages, ConverterSession, Error, OutputFormat, SelectedFile};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;

/// ダウンロードボタンの文言
pub fn download_label(file_name: &str) -> String {
    format!("📥 Baixar {}", file_name.to_uppercase())
}

pub fn convert_button_label(converting: bool) -> &'static str {
    if converting {
        "Convertendo..."
    } else {
        "✨ Converter Imagem"
    }
}

#[component]
pub fn ImageConverter(toasts: Toasts) -> impl IntoView {
    let session = RwSignal::new(ConverterSession::new(OutputFormat::default()));
    // File は Send ではないのでセッションとは別に持つ
    let file = StoredValue::new_local(None::<web_sys::File>);

    let on_file_change = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(selected) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        let meta = SelectedFile::new(selected.name(), selected.type_());
        match session.try_update(|s| s.select_file(meta)) {
            Some(Ok(())) => file.set_value(Some(selected)),
            Some(Err(e)) => toasts.error(e.to_string()),
            None => {}
        }
    };

    let on_convert = move |_| {
        let Some(selected) = file.get_value() else {
            toasts.error(Error::NoFileSelected.to_string());
            return;
        };
        let job = match session.try_update(|s| s.begin()) {
            Some(Ok(job)) => job,
            Some(Err(e)) => {
                toasts.error(e.to_string());
                return;
            }
            None => return,
        };

        let source = BrowserFile::new(selected);
        spawn_local(async move {
            let result = convert_file(&source, &job).await;
            match session.try_update(|s| s.finish(result).map(|_| ())) {
                Some(Ok(())) => toasts.success(messages::IMAGE_CONVERTED),
                Some(Err(e)) => toasts.error(e.to_string()),
                None => {}
            }
        });
    };

    // 変換結果が変わったときだけ data URI を作り直す
    let output_version = Memo::new(move |_| session.with(|s| s.output().map(|img| img.version)));
    let output = Memo::new(move |_| {
        output_version.track();
        session.with_untracked(|s| s.output().map(|img| (img.data_uri(), img.file_name.clone())))
    });

    let format_options = OutputFormat::ALL
        .into_iter()
        .map(|format| {
            let id = format!("format-{}", format.extension());
            view! {
                <label for=id.clone() class="radio">
                    <input
                        type="radio"
                        id=id.clone()
                        name="outputFormat"
                        value=format.extension()
                        prop:checked=move || session.with(|s| s.format() == format)
                        on:change=move |_| session.update(|s| s.set_format(format))
                    />
                    <span>{format.extension().to_uppercase()}</span>
                </label>
            }
        })
        .collect_view();

    view! {
        <Card title="CONVERSOR DE IMAGEM (BMP para PNG/JPEG)" icon="🖼️">
            <div class="form-group">
                <label for="bmpUploader">"1. Selecione a imagem BMP:"</label>
                <input
                    type="file"
                    id="bmpUploader"
                    accept=".bmp,image/bmp"
                    on:change=on_file_change
                />
            </div>

            <div class="form-group">
                <span class="group-label">"2. Escolha o formato de saída:"</span>
                <div class="radio-group">{format_options}</div>
            </div>

            <div class="actions">
                <button
                    class="btn btn-primary"
                    disabled=move || !session.with(|s| s.can_convert())
                    on:click=on_convert
                >
                    {move || convert_button_label(session.with(|s| s.is_converting()))}
                </button>
            </div>

            {move || {
                output
                    .get()
                    .map(|(uri, name)| {
                        view! {
                            <div class="conversion-result">
                                <h3>"Conversão Concluída!"</h3>
                                <p class="preview-label">"Pré-visualização:"</p>
                                <img src=uri.clone() alt="Imagem convertida" class="preview" />
                                <a href=uri download=name.clone() class="btn btn-success">
                                    {download_label(&name)}
                                </a>
                            </div>
                        }
                    })
            }}
        </Card>
    }
}
