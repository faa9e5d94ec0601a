use clap::Parser;
use resume_score::{analyzer, cli, config, document, error, report};
use analyzer::{AnalysisClient, Controller};
use cli::{Cli, Commands};
use config::{Config, LoadedConfig};
use error::{Result, ScoreError};
use resume_score_common::{parse_analysis_response, JobInput, RequestState, ResultView};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 標準出力はレポート用なのでログは標準エラーへ
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("✘ {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            file,
            title,
            description,
            description_file,
            endpoint,
            schema,
            json,
            no_color,
            no_input,
        } => {
            let interactive = !no_input && std::io::stdin().is_terminal();
            let color = !no_color && std::io::stdout().is_terminal();

            let config = LoadedConfig::load()?;
            let endpoint = config.resolve_endpoint(endpoint)?;
            let schema = config.schema(schema)?;

            let resume = document::load_document(&file)?;
            let job = read_job_input(title, description, description_file, interactive)?;

            let client = AnalysisClient::new(endpoint, schema)?;
            tracing::info!(endpoint = %client.endpoint(), %schema, "submitting resume");

            let mut controller = Controller::new(client).with_progress(std::io::stderr().is_terminal());

            match controller.submit(Some(&resume), &job).await {
                RequestState::Succeeded(result) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(result)?);
                    } else {
                        let view = ResultView::from_result(result, &config.thresholds()?);
                        print!("{}", report::render_report(&view, color));
                    }
                }
                RequestState::Failed(message) => {
                    return Err(ScoreError::Analysis(message.clone()));
                }
                other => {
                    return Err(ScoreError::Analysis(format!(
                        "analysis did not complete (state: {})",
                        other.as_str()
                    )));
                }
            }
        }

        Commands::Render { input, schema, no_color } => {
            let config = LoadedConfig::load()?;
            let content = document::read_text_file(&input)?;
            let result = parse_analysis_response(&content, config.schema(schema)?)?;
            let view = ResultView::from_result(&result, &config.thresholds()?);
            let color = !no_color && std::io::stdout().is_terminal();
            print!("{}", report::render_report(&view, color));
        }

        Commands::Config { set_endpoint, set_schema, reset, show } => {
            // 壊れた設定ファイルでも初期化できるよう、リセット時は読み込まない
            let mut config = if reset {
                let config = Config::reset()?;
                println!("✔ 設定を既定値に戻しました");
                config
            } else {
                Config::load()?
            };

            if let Some(endpoint) = set_endpoint {
                config.set_endpoint(endpoint)?;
                println!("✔ エンドポイントを設定しました");
            }

            if let Some(schema) = set_schema {
                config.set_schema(schema)?;
                println!("✔ レスポンス形式を設定しました");
            }

            if show {
                println!("設定:");
                println!("  エンドポイント: {}", config.resolve_endpoint(None)?);
                println!("  レスポンス形式: {}", config.schema);
                println!(
                    "  スコア色分け: {}以上=良好 / {}以上=注意",
                    config.high_threshold, config.mid_threshold
                );
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}

/// 引数で足りない項目は対話入力で補う（空欄はそのまま検証に回す）
fn read_job_input(
    title: Option<String>,
    description: Option<String>,
    description_file: Option<PathBuf>,
    interactive: bool,
) -> Result<JobInput> {
    let title = match title {
        Some(title) => title,
        None if interactive => dialoguer::Input::<String>::new()
            .with_prompt("Job Title")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| ScoreError::Prompt(e.to_string()))?,
        None => String::new(),
    };

    let description = match (description, description_file) {
        (Some(text), _) => text,
        (None, Some(path)) => document::read_text_file(&path)?,
        (None, None) if interactive => dialoguer::Input::<String>::new()
            .with_prompt("Job Description (Optional)")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| ScoreError::Prompt(e.to_string()))?,
        (None, None) => String::new(),
    };

    Ok(JobInput::new(title, description))
}
