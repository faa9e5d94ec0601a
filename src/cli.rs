use clap::{Parser, Subcommand};
use resume_score_common::{Endpoint, ResponseSchema};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-score")]
#[command(about = "Score a resume against a job description", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 履歴書をアップロードしてマッチスコアを表示
    Analyze {
        /// 履歴書ファイル（PDF/DOC/DOCX）
        #[arg(required = true)]
        file: PathBuf,

        /// 職種名（省略時は対話入力）
        #[arg(short, long)]
        title: Option<String>,

        /// 求人内容
        #[arg(short, long, conflicts_with = "description_file")]
        description: Option<String>,

        /// 求人内容をファイルから読み込む
        #[arg(long)]
        description_file: Option<PathBuf>,

        /// 解析APIのURL
        #[arg(long)]
        endpoint: Option<Endpoint>,

        /// レスポンス形式 (auto/boolean-map/matched-field)
        #[arg(long)]
        schema: Option<ResponseSchema>,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,

        /// 色を付けない
        #[arg(long)]
        no_color: bool,

        /// 対話入力をしない
        #[arg(long)]
        no_input: bool,
    },

    /// 保存済みの解析結果JSONを表示
    Render {
        /// 入力JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// レスポンス形式 (auto/boolean-map/matched-field)
        #[arg(long)]
        schema: Option<ResponseSchema>,

        /// 色を付けない
        #[arg(long)]
        no_color: bool,
    },

    /// 設定の表示・変更
    Config {
        /// 解析APIのURLを保存
        #[arg(long)]
        set_endpoint: Option<Endpoint>,

        /// レスポンス形式を保存
        #[arg(long)]
        set_schema: Option<ResponseSchema>,

        /// 設定を既定値に戻す
        #[arg(long)]
        reset: bool,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}
