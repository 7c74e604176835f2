use anyhow::Result;
use clap::Parser;
use crewforge_cli::collect_inputs;

mod app;

#[derive(Parser)]
#[command(name = "crewforge")]
#[command(about = "Crewforge - design and run an AI agent crew for a goal")]
#[command(version)]
struct Cli {
    /// What the crew should accomplish
    goal: String,

    /// Run-time input as key=value (repeatable; JSON values allowed)
    #[arg(short, long = "input", value_name = "KEY=VALUE")]
    inputs: Vec<String>,

    /// LLM model to use
    #[arg(short, long)]
    model: Option<String>,

    /// Print the bound crew as JSON and exit without running it
    #[arg(long)]
    plan_only: bool,

    /// Log pipeline progress
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    let mut settings = crewforge_core::Settings::load();
    if let Some(ref model) = cli.model {
        settings.llm.model = model.clone();
    }

    let inputs = collect_inputs(&cli.inputs)?;

    if cli.plan_only {
        app::run_plan_only(&settings, &cli.goal).await?;
    } else {
        app::run(&settings, &cli.goal, inputs).await?;
    }

    Ok(())
}
