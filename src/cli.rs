use carimbo_common::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "carimbo")]
#[command(about = "Carimbo de rede externa e conversor BMP para PNG/JPEG", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// carimbo を生成して表示
    Stamp {
        /// 入力JSONファイル（carimboのフォームデータ）
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// フィールドを設定（campo=valor、複数指定可、指定順に適用）
        #[arg(short, long = "set", value_name = "CAMPO=VALOR")]
        set: Vec<String>,

        /// 出力テキストファイル
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 本文をクリップボードにコピー
        #[arg(short, long)]
        copy: bool,

        /// 計算後のフォームデータをJSONで保存
        #[arg(long)]
        save_record: Option<PathBuf>,
    },

    /// 対話的にフォームを入力
    Interactive {
        /// 入力JSONファイル（途中から再開）
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// 空のフォームデータ（JSON）を出力
    Template {
        /// 出力ファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// BMPをPNG/JPEGに変換（透かし付き）
    Convert {
        /// BMPファイルまたはフォルダ
        #[arg(required = true)]
        path: PathBuf,

        /// 出力形式 (png/jpeg)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// 出力フォルダ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,

        /// ファイルを書かずに data URI を表示（1ファイルのみ）
        #[arg(long)]
        data_uri: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 技術者名（Nome/TEL）の初期値を設定
        #[arg(long)]
        set_technician: Option<String>,

        /// 既定の出力形式を設定 (png/jpeg)
        #[arg(long)]
        set_format: Option<OutputFormat>,

        /// 既定の出力フォルダを設定
        #[arg(long)]
        set_output_dir: Option<PathBuf>,

        /// 生成後に自動でクリップボードへコピー (true/false)
        #[arg(long)]
        copy_to_clipboard: Option<bool>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stamp_with_assignments() {
        let cli = Cli::try_parse_from([
            "carimbo", "stamp", "--set", "tecnico=Maria", "-s", "cliente=ACME", "--copy",
        ])
        .expect("パース失敗");

        match cli.command {
            Commands::Stamp { set, copy, .. } => {
                assert_eq!(set, vec!["tecnico=Maria", "cliente=ACME"]);
                assert!(copy);
            }
            _ => panic!("Stamp を期待"),
        }
    }

    #[test]
    fn test_parse_convert_format() {
        let cli = Cli::try_parse_from(["carimbo", "-v", "convert", "splice.bmp", "-f", "jpeg"])
            .expect("パース失敗");
        assert!(cli.verbose);

        match cli.command {
            Commands::Convert { path, format, .. } => {
                assert_eq!(path, PathBuf::from("splice.bmp"));
                assert_eq!(format, Some(OutputFormat::Jpeg));
            }
            _ => panic!("Convert を期待"),
        }
    }

    #[test]
    fn test_parse_convert_rejects_unknown_format() {
        let result = Cli::try_parse_from(["carimbo", "convert", "a.bmp", "-f", "gif"]);
        assert!(result.is_err());
    }
}
