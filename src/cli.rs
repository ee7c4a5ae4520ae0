use clap::{Parser, Subcommand};
use crate::ai_provider::AiProvider;
use photo_verdict_common::PromptVersion;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "photo-verdict")]
#[command(about = "写真メタデータからAI真正性判定（9問）を生成・記録するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// AIプロバイダ（省略時は設定ファイルの値）
    #[arg(long, global = true)]
    pub ai_provider: Option<AiProvider>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 写真を判定してレコードを保存
    Submit {
        /// 写真ファイル
        #[arg(required = true)]
        photo: PathBuf,

        /// アップロード済み写真のURL
        #[arg(long)]
        url: Option<String>,

        /// プロンプト版 (narrative/json/tagged)
        #[arg(long)]
        prompt_version: Option<PromptVersion>,

        /// 保存せずに結果だけ表示（メモリ上のストアを使う）
        #[arg(long)]
        dry_run: bool,
    },

    /// モデルに送る指示文を表示
    Prompt {
        /// 写真ファイル
        #[arg(required = true)]
        photo: PathBuf,

        /// プロンプト版 (narrative/json/tagged)
        #[arg(long)]
        prompt_version: Option<PromptVersion>,
    },

    /// 保存済みのモデルレスポンスをパース
    Parse {
        /// レスポンスのテキストファイル
        #[arg(required = true)]
        input: PathBuf,

        /// プロンプト版 (narrative/json/tagged)
        #[arg(long)]
        prompt_version: Option<PromptVersion>,
    },

    /// 写真のメタデータを表示
    Metadata {
        /// 写真ファイル
        #[arg(required = true)]
        photo: PathBuf,
    },

    /// 保存済みレコード数を表示
    Count {
        /// キーのプレフィックス
        #[arg(short, long, default_value = "logs/")]
        prefix: String,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// プロンプト版を設定
        #[arg(long)]
        set_prompt_version: Option<PromptVersion>,

        /// レコードストアのディレクトリを設定
        #[arg(long)]
        set_store_root: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
