//! Demo launcher
//!
//! # Usage
//!
//! ```bash
//! # Local OpenAI-compatible server (LM Studio, Ollama's /v1 endpoint, ...)
//! export OPENAI_API_BASE="http://localhost:11434/v1"
//!
//! cargo run --bin adk-demo -- team
//! cargo run --bin adk-demo -- --model openai/qwen3:8b stock-advisor
//! ```

use agent_demos::demos::{self, sessions};
use agent_demos::repl::Prompter;
use agent_demos::{DemoConfig, DemoEnv};
use agent_utils::AppConfig;
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "adk-demo")]
#[command(about = "Weather, time and stock advisor agent demos", long_about = None)]
struct Args {
    /// Model string used for every agent, e.g. `openai/qwen3:8b`
    #[arg(long, global = true, env = agent_demos::config::MODEL_ENV)]
    model: Option<String>,

    /// DuckDuckGo HTML endpoint root
    #[arg(long, global = true, env = agent_demos::config::SEARCH_BASE_URL_ENV)]
    search_base_url: Option<String>,

    #[command(subcommand)]
    demo: Demo,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Demo {
    /// Ask the weather/time agent one question
    WeatherTime,
    /// Chat with the single weather agent until `exit`
    Weather,
    /// Chat with the weather team (greeting and farewell delegation) until `exit`
    Team,
    /// Run the state demonstration: one query, a unit switch, two scripted turns
    StatefulTeam,
    /// Ask the stock advisor workflow about a company
    StockAdvisor {
        /// Wait for the summarizer's report instead of printing the first final answer
        #[arg(long)]
        summary_only: bool,
    },
    /// Look up the weather for a city without any agent
    Lookup,
}

impl Demo {
    fn session(self) -> AppConfig {
        match self {
            Self::WeatherTime => sessions::weather_time(),
            Self::Weather | Self::Lookup => sessions::weather(),
            Self::Team => sessions::team(),
            Self::StatefulTeam => sessions::stateful_team(),
            Self::StockAdvisor { .. } => sessions::stock_advisor(),
        }
        .with_env_overrides()
    }
}

fn demo_config(args: &Args) -> agent_demos::Result<DemoConfig> {
    // flags were already merged with their env vars by clap
    let mut builder = DemoConfig::builder();
    if let Some(model) = &args.model {
        builder = builder.model(model);
    }
    if let Some(url) = &args.search_base_url {
        builder = builder.search_base_url(url);
    }
    if let Demo::StockAdvisor { summary_only } = args.demo {
        builder = builder.stock_summary_only(summary_only);
    }
    builder.build()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    agent_utils::init_tracing();

    let args = Args::parse();
    let config = demo_config(&args)?;
    info!(
        demo = ?args.demo,
        weather_time_model = %config.weather_time_model,
        team_model = %config.team_model,
        stock_model = %config.stock_model,
        "Starting demo"
    );

    let env = DemoEnv::live(config)?;
    let app = args.demo.session();
    let mut prompter = Prompter::stdio();

    match args.demo {
        Demo::WeatherTime => {
            demos::run_weather_time(&env, &app, &mut prompter).await?;
        }
        Demo::Weather => demos::run_weather(&env, &app, &mut prompter).await?,
        Demo::Team => demos::run_team(&env, &app, &mut prompter).await?,
        Demo::StatefulTeam => {
            demos::run_stateful_team(&env, &app, &mut prompter).await?;
        }
        Demo::StockAdvisor { .. } => {
            demos::run_stock_advisor(&env, &app, &mut prompter).await?;
        }
        Demo::Lookup => demos::run_lookup(&env, &mut prompter).await?,
    }

    Ok(())
}
