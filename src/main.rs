use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use cep2addr::{enrich, netcheck, sample};
use cep2addr::{EnrichConfig, HttpConfig, Provider, Result};

#[derive(Parser, Debug)]
#[command(name = "cep2addr")]
#[command(version, about = "Enrich CEP spreadsheets with addresses from ViaCEP or BrasilAPI")]
struct Cli {
    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Enrich a spreadsheet of CEPs, resuming prior progress from the output file
    Enrich {
        /// Input spreadsheet (.xlsx or .csv)
        input: PathBuf,

        /// Output spreadsheet (.xlsx or .csv); doubles as the resume record
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        lookup: LookupArgs,

        /// Rows accumulated before each autosave
        #[arg(long, default_value_t = 100)]
        flush_size: usize,

        /// Pause between requests, in milliseconds
        #[arg(long, default_value_t = 50)]
        delay_ms: u64,
    },

    /// Look up the first rows of a spreadsheet and print the results
    Sample {
        /// Input spreadsheet (.xlsx or .csv)
        input: PathBuf,

        #[command(flatten)]
        lookup: LookupArgs,

        /// Number of rows to sample
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,

        /// Pause between requests, in milliseconds
        #[arg(long, default_value_t = 50)]
        delay_ms: u64,
    },

    /// Probe general network reachability (distinguishes firewall trouble from provider trouble)
    Netcheck {
        /// Number of sequential attempts
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,

        /// Target base URL
        #[arg(long, default_value = netcheck::DEFAULT_TARGET)]
        base_url: String,

        /// Request timeout, in seconds
        #[arg(long, default_value_t = 5)]
        timeout: u64,

        /// Pause between attempts, in milliseconds
        #[arg(long, default_value_t = 500)]
        delay_ms: u64,
    },
}

#[derive(Args, Debug)]
struct LookupArgs {
    /// Lookup service
    #[arg(short, long, value_enum, default_value_t = Provider::Viacep)]
    provider: Provider,

    /// Column holding the CEP values
    #[arg(short, long, default_value = "CEP")]
    column: String,

    /// Override the provider base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout, in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// HTTP(S) proxy URL
    #[arg(long)]
    proxy: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long)]
    insecure: bool,
}

impl LookupArgs {
    fn http_config(&self) -> HttpConfig {
        HttpConfig {
            timeout: Duration::from_secs(self.timeout),
            proxy_url: self.proxy.clone(),
            verify_tls: !self.insecure,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Enrich {
            input,
            output,
            lookup,
            flush_size,
            delay_ms,
        } => {
            let mut config = EnrichConfig::new(input, output);
            config.cep_column = lookup.column.clone();
            config.flush_size = flush_size;
            config.delay = Duration::from_millis(delay_ms);
            config.http = lookup.http_config();

            enrich::run(lookup.provider, lookup.base_url, &config).await?;
        }
        Command::Sample {
            input,
            lookup,
            count,
            delay_ms,
        } => {
            sample::run(
                lookup.provider,
                lookup.base_url.clone(),
                &input,
                &lookup.column,
                count,
                &lookup.http_config(),
                Duration::from_millis(delay_ms),
            )
            .await?;
        }
        Command::Netcheck {
            count,
            base_url,
            timeout,
            delay_ms,
        } => {
            let http = HttpConfig {
                timeout: Duration::from_secs(timeout),
                ..Default::default()
            };
            netcheck::run(&base_url, count, &http, Duration::from_millis(delay_ms)).await?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "cep2addr=debug" } else { "cep2addr=warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
