use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use host_summarizer::ClientError;
use host_summarizer::spinner::Spinner;
use host_summarizer::upload::backend::{DEFAULT_API_URL, DEFAULT_TIMEOUT};
use host_summarizer::upload::{BackendClient, LoadedDocument, render};
use url::Url;

#[derive(Parser)]
#[command(
    name = "summarizer-upload",
    version,
    about = "Send a Censys-style host dataset to the summarizer API"
)]
struct Cli {
    /// JSON file to upload
    file: PathBuf,

    /// Summarize endpoint of the relay service
    #[arg(long, env = "SUMMARIZER_API_URL", default_value = DEFAULT_API_URL)]
    api_url: Url,

    /// Seconds to wait for the backend
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,

    /// Send without asking for confirmation
    #[arg(short, long, default_value_t = false)]
    yes: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    host_summarizer::setup_logging_with_default("off");

    let document = match LoadedDocument::load(&cli.file) {
        Ok(document) => document,
        Err(e) => return fail(&e),
    };
    print!("{}", render::loaded(&document));

    if !cli.yes && !confirm("Generate summary for dataset? [y/N] ") {
        println!("Nothing sent.");
        return ExitCode::SUCCESS;
    }

    let client = match BackendClient::new(cli.api_url, Duration::from_secs(cli.timeout)) {
        Ok(client) => client,
        Err(e) => return fail(&e),
    };

    let spinner = Spinner::start("Please wait, summarizing dataset...");
    let result = client.summarize(&document.data).await;
    spinner.stop().await;

    match result {
        Ok(outcome) => {
            print!("{}", render::outcome(&outcome));
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

fn confirm(prompt: &str) -> bool {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn fail(error: &ClientError) -> ExitCode {
    eprintln!("{error}");
    ExitCode::FAILURE
}
