//! ipcsense
//!
//! Predicts applicable Indian Penal Code sections for case descriptions,
//! combining a statistical classifier with ordered keyword overrides, and
//! fronts a locally hosted legal language model.

use anyhow::Result;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use tokio::io::BufReader;
use tracing::info;

use ipcsense_cli::ask;
use ipcsense_cli::display::render_report;
use ipcsense_classifiers::KeywordClassifier;
use ipcsense_cli::{run_server, AppConfig, AppState, CaseAnalyzer, Cli, Commands};
use ipcsense_llm::LlmClient;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = AppConfig::load(&cli.config, &cli)?;

    match &cli.command {
        Commands::Analyze { file, json, text } => {
            let case_text = Commands::case_text(file.as_ref(), text).await?;
            let analyzer = CaseAnalyzer::from_config(&config)?;

            let outcome = analyzer.analyze(&case_text).await;
            if !json {
                print!("{}", render_report(&outcome));
            }
            println!("{}", serde_json::to_string(&outcome)?);
        }

        Commands::Ask {
            query,
            output,
            words,
        } => {
            let client = LlmClient::new(&config.llm)?;
            let query = query
                .clone()
                .or_else(|| (!words.is_empty()).then(|| words.join(" ")));

            match query {
                Some(query) => {
                    println!("Analyzing...\n");
                    let result = client.ask(&query).await;
                    println!("{}", result);

                    if let Some(path) = output {
                        match ask::save_result(path, &query, &result).await {
                            Ok(()) => println!("\nAnalysis saved to {}", path.display()),
                            Err(e) => println!("Error saving to file: {}", e),
                        }
                    }
                }
                None => {
                    let stdin = BufReader::new(tokio::io::stdin());
                    ask::run_repl(&client, stdin, tokio::io::stdout()).await?;
                }
            }
        }

        Commands::Serve { .. } => {
            info!("Starting ipcsense API");

            let metrics_handle = init_metrics()?;
            let analyzer = CaseAnalyzer::from_config(&config)?;
            info!("Classifier: {}", analyzer.classifier_name());
            info!("Model server: {} ({})", config.llm.base_url, config.llm.model);

            let llm = LlmClient::new(&config.llm)?;
            let suggester = KeywordClassifier::with_default_table()?;
            let state = AppState::new(analyzer, llm, suggester, Some(metrics_handle));

            let addr: SocketAddr =
                format!("{}:{}", config.server.listen, config.server.port).parse()?;
            run_server(state, addr).await?;
        }
    }

    Ok(())
}

/// Initialize tracing/logging on stderr so stdout stays machine-readable
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("ipcsense=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ipcsense=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!("ipcsense_analyses_total", "Total number of case analyses");
    metrics::describe_counter!(
        "ipcsense_overrides_total",
        "Total number of override rule firings by rule"
    );
    metrics::describe_counter!(
        "ipcsense_analysis_errors_total",
        "Total number of failure-shaped analysis results"
    );
    metrics::describe_counter!(
        "ipcsense_suggestions_total",
        "Total number of keyword section suggestion requests"
    );
    metrics::describe_histogram!(
        "ipcsense_classify_latency_us",
        metrics::Unit::Microseconds,
        "Statistical classifier latency in microseconds"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
