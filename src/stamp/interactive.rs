//! 対話式 carimbo 入力
//!
//! 全フィールドを順に入力したあと、メニューで
//! 生成 / コピー / 修正 / クリア / 保存 / 終了 を選ぶ。

use crate::clipboard;
use crate::error::Result;
use crate::stamp::{print_missing, save_record};
use carimbo_common::messages;
use carimbo_common::{Notification, Notifier, Severity, StampField, StampForm};
use chrono::NaiveDateTime;
use dialoguer::{Confirm, Input, Select};
use std::path::{Path, PathBuf};

/// メニューの操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// carimbo を生成
    Generate,
    /// 本文をコピー
    Copy,
    /// 1フィールドを修正
    Edit,
    /// 全項目をクリア
    Clear,
    /// フォームデータを保存
    Save,
    /// 終了
    Quit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 6] = [
        MenuAction::Generate,
        MenuAction::Copy,
        MenuAction::Edit,
        MenuAction::Clear,
        MenuAction::Save,
        MenuAction::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::Generate => "Gerar Carimbo",
            MenuAction::Copy => "Copiar Carimbo",
            MenuAction::Edit => "Editar campo",
            MenuAction::Clear => "Limpar Formulário",
            MenuAction::Save => "Salvar dados (JSON)",
            MenuAction::Quit => "Sair",
        }
    }
}

/// 入力プロンプトの文言（必須には `*` を付ける）
pub fn field_prompt(field: StampField) -> String {
    if field.is_required() {
        format!("{} *", field.label())
    } else {
        field.label().to_string()
    }
}

/// 2値フィールドの選択肢と現在値の位置
pub fn flag_options(field: StampField, current: &str) -> (&'static [&'static str], usize) {
    let options = field.options();
    let index = options.iter().position(|o| *o == current).unwrap_or(0);
    (options, index)
}

/// 通知を1行で表示
pub fn announce(notification: &Notification) {
    match notification.severity {
        Severity::Success => println!("✔ {}", notification.message),
        Severity::Error => println!("✖ {}", notification.message),
    }
}

/// 対話セッションを実行
pub fn run_interactive(
    mut form: StampForm,
    save_path: Option<&Path>,
    copy_after_generate: bool,
) -> Result<()> {
    let mut notifier = Notifier::new();

    println!("入力してください（* は必須、Enterで現在値のまま）");
    println!("---\n");

    for field in StampField::ALL {
        prompt_field(&mut form, field)?;
    }

    let mut save_path: Option<PathBuf> = save_path.map(Path::to_path_buf);

    loop {
        println!();
        let labels: Vec<&str> = MenuAction::ALL.iter().map(MenuAction::label).collect();
        let selection = Select::new()
            .with_prompt("Ação")
            .items(&labels)
            .default(0)
            .interact()?;

        match MenuAction::ALL[selection] {
            MenuAction::Generate => {
                let now = chrono::Local::now().naive_local();
                generate_step(
                    &mut form,
                    &mut notifier,
                    now,
                    copy_after_generate,
                    clipboard::copy_text,
                );
            }
            MenuAction::Copy => copy_report(&form, &mut notifier, clipboard::copy_text),
            MenuAction::Edit => {
                let labels: Vec<String> = StampField::ALL
                    .iter()
                    .map(|f| format!("{}: {}", f.label(), form.record().get(*f)))
                    .collect();
                let index = Select::new()
                    .with_prompt("Campo")
                    .items(&labels)
                    .default(0)
                    .interact()?;
                prompt_field(&mut form, StampField::ALL[index])?;
            }
            MenuAction::Clear => clear_step(&mut form, &mut notifier, confirm_prompt),
            MenuAction::Save => {
                let path = match &save_path {
                    Some(path) => path.clone(),
                    None => {
                        let input: String = Input::new()
                            .with_prompt("Arquivo")
                            .default("carimbo.json".to_string())
                            .interact_text()?;
                        PathBuf::from(input)
                    }
                };
                save_record(form.record(), &path)?;
                println!("✔ 保存しました: {}", path.display());
                save_path = Some(path);
            }
            MenuAction::Quit => break,
        }

        if let Some(notification) = notifier.current() {
            announce(notification);
        }
        notifier.dismiss();
    }

    Ok(())
}

/// 生成し、成功したときだけ自動コピーする
///
/// 検証に失敗したときは以前のレポートが残っていてもコピーしない。
fn generate_step<C>(
    form: &mut StampForm,
    notifier: &mut Notifier,
    now: NaiveDateTime,
    copy_after_generate: bool,
    copy: C,
) where
    C: FnOnce(&str) -> Result<()>,
{
    match form.generate(now) {
        Ok(report) => {
            println!("\n{}\n", report.render());
            notifier.success(messages::STAMP_GENERATED);
            if copy_after_generate {
                copy_report(form, notifier, copy);
            }
        }
        Err(e) => {
            print_missing(form);
            notifier.error(e.to_string());
        }
    }
}

/// 確認のうえ全項目をクリア
fn clear_step<F>(form: &mut StampForm, notifier: &mut Notifier, confirm: F)
where
    F: FnOnce(&str) -> bool,
{
    if form.clear(confirm) {
        notifier.success(messages::FORM_CLEARED);
    }
}

/// はい/いいえの確認（端末が使えなければ「いいえ」）
fn confirm_prompt(message: &str) -> bool {
    Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .unwrap_or_else(|e| {
            tracing::warn!(error = ?e, "confirm prompt failed");
            false
        })
}

fn copy_report<C>(form: &StampForm, notifier: &mut Notifier, copy: C)
where
    C: FnOnce(&str) -> Result<()>,
{
    let result = form
        .copy_text()
        .map_err(crate::error::CarimboError::from)
        .and_then(|text| copy(&text));

    match result {
        Ok(()) => {
            notifier.success(messages::STAMP_COPIED);
        }
        Err(e) => {
            tracing::warn!(error = ?e, "copy failed");
            notifier.error(e.to_string());
        }
    }
}

/// 1フィールドを入力
fn prompt_field(form: &mut StampForm, field: StampField) -> Result<()> {
    let current = form.record().get(field).to_string();

    let value = if field.is_flag() {
        let (options, index) = flag_options(field, &current);
        let selected = Select::new()
            .with_prompt(field.label())
            .items(options)
            .default(index)
            .interact()?;
        options[selected].to_string()
    } else {
        Input::<String>::new()
            .with_prompt(field_prompt(field))
            .with_initial_text(current)
            .allow_empty(true)
            .interact_text()?
    };

    if let Some(derived) = form.input(field, &value)? {
        println!("  → {}: {}", derived.label(), form.record().get(derived));
    }
    Ok(())
}
