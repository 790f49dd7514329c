use appsheet_client::cli::{
    self, CheckOptions, CheckResult, CliError, FindOptions, RenderOptions,
};
use clap::{Parser as ClapParser, Subcommand};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "appsheet")]
#[command(about = "AppSheet API client - compile, check and run table selectors")]
#[command(version)]
struct Cli {
    /// Log requests and response details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a JSON query or condition expression into a formula
    Render {
        /// The JSON expression (reads from stdin if not provided)
        expression: Option<String>,
    },

    /// Check that the brackets of a selector formula balance
    Check {
        /// The selector formula
        selector: String,
    },

    /// Read rows from a table (APPSHEET_APP_ID and APPSHEET_ACCESS_KEY must be set)
    Find {
        /// Table name
        table: String,

        /// Selector formula
        #[arg(short, long)]
        selector: Option<String>,

        /// JSON query or condition expression
        #[arg(short, long)]
        query: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Render { expression } => run_render(expression),
        Commands::Check { selector } => match cli::execute_check(&CheckOptions { selector }) {
            Ok(CheckResult::Valid) => {
                println!("Selector is valid");
                Ok(())
            }
            Err(e) => Err(e),
        },
        Commands::Find {
            table,
            selector,
            query,
            pretty,
        } => run_find(table, selector, query, pretty).await,
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("appsheet_client=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run_render(expression: Option<String>) -> Result<(), CliError> {
    let input = match expression {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let formula = cli::execute_render(&RenderOptions { input })?;
    println!("{}", formula);
    Ok(())
}

async fn run_find(
    table: String,
    selector: Option<String>,
    query: Option<String>,
    pretty: bool,
) -> Result<(), CliError> {
    let options = FindOptions {
        table,
        selector,
        query,
    };

    let rows = serde_json::Value::Array(cli::execute_find(&options).await?);
    let json = if pretty {
        serde_json::to_string_pretty(&rows)
    } else {
        serde_json::to_string(&rows)
    }?;
    println!("{}", json);
    Ok(())
}
