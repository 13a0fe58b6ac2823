//! SQL Assistant: main entry point

use anyhow::Context;
use clap::Parser;
use sql_assistant::cli::{render_presets, render_range, render_result, resolve_preset, Cli, Commands};
use sql_assistant::config::AssistantConfig;
use sql_assistant::filter::DateFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AssistantConfig::load_optional(cli.config.as_deref())
        .context("failed to load configuration")?;
    let filter = DateFilter::from_config(&config);

    match cli.command {
        Commands::Presets => {
            if cli.json {
                let presets: Vec<_> = sql_assistant::core::TimeRangePreset::ALL
                    .iter()
                    .map(|p| serde_json::json!({"token": p.token(), "tier": p.tier(), "label": p.label()}))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&presets)?);
            } else {
                println!("{}", render_presets());
            }
        }
        Commands::Resolve { preset, now, shift } => {
            let range =
                resolve_preset(&preset, now.as_deref(), &shift, &config, filter.resolver())
                    .with_context(|| format!("cannot resolve preset '{preset}'"))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&range)?);
            } else {
                println!("{}", render_range(&range));
            }
        }
        Commands::Generate(args) => {
            let request = args.to_request(&config, filter.resolver())?;
            let query = filter.generate(&request);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&query)?);
            } else {
                println!("{query}");
            }
        }
        Commands::Execute(args) => {
            let request = args.to_request(&config, filter.resolver())?;
            let result = filter.run(&request).await.context("query execution failed")?;
            if cli.json {
                let chart = result.chart();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({"result": result, "chart": chart}))?
                );
            } else {
                println!("{}", render_result(&result));
            }
        }
    }

    Ok(())
}
