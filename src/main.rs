use analyzer::MarketAnalyzer;
use anyhow::Context;
use api_client::{LlmProvider, OpenAiClient, YahooFinanceClient};
use calculators::{catalog, CalculatorCategory};
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use configuration::{init_tracing, load_config, CliOverrides, Config};
use core_types::{AnalyzeRequest, Locale, Market, PriceLevels};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

/// The main entry point for the Infinity Algo application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Secrets such as OPENAI_API_KEY may live in a .env file; it is optional.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(overrides) => handle_serve(overrides).await,
        Commands::Catalog(args) => handle_catalog(args),
        Commands::Calc(args) => handle_calc(args),
        Commands::Analyze(args) => handle_analyze(args).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Trading calculators and AI market analysis for the Infinity Algo platform.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server.
    Serve(CliOverrides),
    /// List the calculator catalogue.
    Catalog(CatalogArgs),
    /// Run one calculator on JSON input and print the result.
    Calc(CalcArgs),
    /// Analyse a symbol from the command line, the same way the API does.
    Analyze(AnalyzeArgs),
}

#[derive(Parser)]
struct CatalogArgs {
    /// Only list one category (e.g., "risk-management" or "Technical Analysis").
    #[arg(long)]
    category: Option<CalculatorCategory>,

    /// Only list featured calculators.
    #[arg(long)]
    featured: bool,
}

#[derive(Parser)]
struct CalcArgs {
    /// The calculator slug (e.g., "position-size").
    slug: String,

    /// The calculator inputs as a JSON object, e.g. '{"accountBalance": 10000, ...}'.
    #[arg(long, default_value = "{}")]
    input: String,
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// The symbol to analyse (e.g., "XAUUSD", "EUR/USD", "BTC").
    symbol: String,

    /// The question to answer about the symbol.
    #[arg(long)]
    prompt: String,

    /// forex, crypto, commodities, indices or stocks.
    #[arg(long, default_value = "stocks")]
    market: String,

    #[arg(long, default_value = "H4")]
    timeframe: String,

    /// Optional swing high/low/close used when no live price is available.
    #[arg(long)]
    high: Option<String>,
    #[arg(long)]
    low: Option<String>,
    #[arg(long)]
    close: Option<String>,

    /// Language of the answer: "ar" or "en". Overrides the configured locale.
    #[arg(long)]
    locale: Option<Locale>,

    /// Path to the TOML configuration file.
    #[arg(long, short)]
    config: Option<PathBuf>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn load(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    load_config(path).context("Failed to load configuration")
}

async fn handle_serve(overrides: CliOverrides) -> anyhow::Result<()> {
    let mut config = load(overrides.config.as_deref())?;
    overrides.apply(&mut config);
    // Keep the guard alive so file logs are flushed on shutdown.
    let _guard = init_tracing(&config.logging)?;

    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        "Starting Infinity Algo API"
    );
    web_server::run_server(config).await
}

fn handle_catalog(args: CatalogArgs) -> anyhow::Result<()> {
    let entries: Vec<_> = catalog::all()
        .iter()
        .filter(|entry| args.category.is_none_or(|category| entry.category == category))
        .filter(|entry| !args.featured || entry.featured)
        .collect();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Slug", "Name", "Category", "Flags", "Description"]);

    for entry in &entries {
        let mut flags = Vec::new();
        if entry.featured {
            flags.push("featured");
        }
        if entry.is_new {
            flags.push("new");
        }
        if !entry.is_implemented {
            flags.push("planned");
        }
        table.add_row(vec![
            entry.slug.to_string(),
            entry.name.to_string(),
            entry.category.to_string(),
            flags.join(", "),
            entry.short_description.to_string(),
        ]);
    }

    println!("{table}");
    println!("{} calculator(s)", entries.len());
    Ok(())
}

fn handle_calc(args: CalcArgs) -> anyhow::Result<()> {
    let input: Value = serde_json::from_str(&args.input).context("--input must be a JSON object")?;
    let output = calculators::evaluate(&args.slug, input)?;

    match &output {
        Value::Object(fields) => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["Field", "Value"]);
            for (field, value) in fields {
                let rendered = match value {
                    Value::String(text) => text.clone(),
                    Value::Array(_) | Value::Object(_) => serde_json::to_string_pretty(value)?,
                    other => other.to_string(),
                };
                table.add_row(vec![field.clone(), rendered]);
            }
            println!("{table}");
        }
        other => println!("{}", serde_json::to_string_pretty(other)?),
    }
    Ok(())
}

async fn handle_analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let mut config = load(args.config.as_deref())?;
    if let Some(locale) = args.locale {
        config.locale = locale;
    }
    let _guard = init_tracing(&config.logging)?;

    let quotes = Arc::new(YahooFinanceClient::new(&config.providers.quotes)?);
    let llm: Option<Arc<dyn LlmProvider>> = if config.providers.llm.is_configured() {
        Some(Arc::new(OpenAiClient::new(&config.providers.llm)?))
    } else {
        None
    };
    let analyzer = MarketAnalyzer::new(quotes, llm, &config);

    let has_levels = args.high.is_some() || args.low.is_some() || args.close.is_some();
    let request = AnalyzeRequest {
        market: Market::from(args.market),
        symbol: args.symbol,
        timeframe: args.timeframe,
        levels: has_levels.then(|| PriceLevels {
            high: args.high,
            low: args.low,
            close: args.close,
        }),
        user_prompt: args.prompt,
    };

    let response = analyzer.analyze(&request).await?;

    println!("Bias:          {:?}", response.bias);
    if let Some(price) = &response.current_price {
        println!("Current price: {}", price);
    }
    if let Some(change) = &response.price_change {
        println!("Change:        {}", change);
    }

    let mut levels = Table::new();
    levels
        .load_preset(UTF8_FULL)
        .set_header(vec!["Level", "Price", "Note"]);
    for level in &response.key_levels {
        levels.add_row(vec![level.kind.as_str(), level.price.as_str(), level.note.as_str()]);
    }
    println!("{levels}");

    if !response.scenarios.is_empty() {
        let mut scenarios = Table::new();
        scenarios
            .load_preset(UTF8_FULL)
            .set_header(vec!["Condition", "Action", "Target"]);
        for scenario in &response.scenarios {
            scenarios.add_row(vec![
                scenario.condition.as_str(),
                scenario.action.as_str(),
                scenario.target.as_str(),
            ]);
        }
        println!("{scenarios}");
    }

    println!("\n{}\n\n{}", response.raw_text, response.risk_note);
    Ok(())
}
