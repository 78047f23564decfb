mod fetch;
mod parser;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use fetch::FetchConfig;
use parser::locate::BOARD_HEADING;

#[derive(Parser)]
#[command(
    name = "board_scraper",
    about = "List board members from a company governance page"
)]
struct Cli {
    /// Governance page to fetch
    #[arg(default_value = fetch::DEFAULT_URL)]
    url: String,
    /// Request timeout in seconds
    #[arg(short, long, default_value_t = fetch::DEFAULT_TIMEOUT_SECS)]
    timeout: u64,
    /// User-Agent header sent with the request
    #[arg(short = 'A', long, default_value = fetch::DEFAULT_USER_AGENT)]
    user_agent: String,
    /// Extra attempts on 429/5xx or connection errors
    #[arg(short, long, default_value_t = 0)]
    retries: u32,
    /// Parse a saved HTML file instead of fetching the URL
    #[arg(short, long)]
    file: Option<PathBuf>,
    /// Print lines and names as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.timeout),
            retries: self.retries,
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let html = match load_page(&cli).await {
        Ok(html) => html,
        Err(e) => {
            // Fetch failures are reported, not propagated: exit status stays 0.
            println!("Error: {:#}", e);
            return Ok(());
        }
    };

    let report = parser::build_report(&cli.url, &html, BOARD_HEADING);
    tracing::debug!(
        "{} lines, {} names in {:.2}s",
        report.lines.len(),
        report.names.len(),
        t0.elapsed().as_secs_f64()
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_names(&report.names));
    }
    Ok(())
}

async fn load_page(cli: &Cli) -> anyhow::Result<String> {
    if let Some(path) = &cli.file {
        return fetch::read_page(path);
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Fetching {}", cli.url));
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = fetch::fetch_page(&cli.url, cli.fetch_config()).await;
    pb.finish_and_clear();
    result
}

fn render_names(names: &[String]) -> String {
    if names.is_empty() {
        return "No names found using the heuristic.\n".to_string();
    }
    let mut out = String::from("Found names:\n");
    for name in names {
        out.push_str(&format!("-  {}\n", name));
    }
    out
}
