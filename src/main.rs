use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use toon_compare::core::tokenizer::detect_token_counter;
use toon_compare::utils::{logger, validation::Validate};
use toon_compare::{AppError, AppState, CliConfig, ComparisonEngine, Dataset, GeminiClient};

fn fail(stage: &str, e: &AppError) -> ! {
    tracing::error!(
        "❌ {} failed: {} (Category: {:?})",
        stage,
        e,
        e.category()
    );
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("{}", failure_notice(stage, e));
    std::process::exit(1);
}

/// 給終端使用者看的錯誤訊息與建議
fn failure_notice(stage: &str, e: &AppError) -> String {
    format!(
        "❌ {}: {}\n💡 Suggestion: {}",
        stage,
        e.user_friendly_message(),
        e.recovery_suggestion()
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_logger(cli.verbose);
    }

    tracing::info!("Starting toon-compare");

    let settings = cli
        .load_settings()
        .and_then(|settings| settings.validate().map(|_| settings))
        .unwrap_or_else(|e| fail("Configuration", &e));
    tracing::debug!("Settings: {:?}", settings);

    // 沒有資料集就無法提供服務
    let dataset =
        Dataset::from_csv_file(&settings.dataset.path).unwrap_or_else(|e| fail("Dataset load", &e));
    tracing::info!(
        "📁 Loaded {} rows × {} columns from {}",
        dataset.len(),
        dataset.columns.len(),
        dataset.path.display()
    );

    let tokenizer = detect_token_counter();

    let llm = GeminiClient::new(&settings.llm).unwrap_or_else(|e| fail("LLM client setup", &e));
    if llm.has_credentials() {
        tracing::info!("LLM calls enabled ({})", settings.llm.model);
    } else {
        tracing::warn!(
            "⚠️ No API key configured, /api/compare will return mock responses"
        );
    }

    let engine = ComparisonEngine::new(tokenizer, Arc::new(llm), settings.pricing);
    let state = AppState::new(dataset, engine, settings.cors.clone())
        .unwrap_or_else(|e| fail("Dataset encoding", &e));

    let addr = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("🚀 Listening on http://{}", addr);

    toon_compare::serve(listener, Arc::new(state), async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await?;

    Ok(())
}
