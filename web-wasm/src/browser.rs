//! ブラウザAPI（クリップボード・現在時刻・ファイル読み込み）

use carimbo_common::{Error, FileSource, Result};
use chrono::{NaiveDate, NaiveDateTime};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["navigator", "clipboard"], js_name = "writeText", catch)]
    async fn write_text_js(text: &str) -> std::result::Result<JsValue, JsValue>;
}

pub async fn copy_to_clipboard(text: &str) -> Result<()> {
    write_text_js(text)
        .await
        .map(|_| ())
        .map_err(|e| Error::Clipboard(format!("{:?}", e)))
}

/// 端末のローカル日時
pub fn local_now() -> NaiveDateTime {
    let now = js_sys::Date::new_0();
    naive_from_parts(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
        now.get_hours(),
        now.get_minutes(),
        now.get_seconds(),
    )
    .unwrap_or_default()
}

/// 月は 1 始まり
pub fn naive_from_parts(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
}

/// `<input type="file">` で選ばれたファイル
pub struct BrowserFile(gloo::file::File);

impl BrowserFile {
    pub fn new(file: web_sys::File) -> Self {
        Self(gloo::file::File::from(file))
    }
}

impl FileSource for BrowserFile {
    async fn read_bytes(&self) -> Result<Vec<u8>> {
        gloo::file::futures::read_as_bytes(&self.0)
            .await
            .map_err(|e| Error::Read(e.to_string()))
    }
}


#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_local_now_is_current_year() {
        let now = local_now();
        let year = js_sys::Date::new_0().get_full_year() as i32;
        assert_eq!(chrono::Datelike::year(&now), year);
    }
}
