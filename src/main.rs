use clap::{ArgGroup, Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use moip_payments::application::payments::PaymentService;
use moip_payments::domain::parent::{Multiorder, Order};
use moip_payments::domain::payment::{InstallmentCount, Payment};
use moip_payments::infrastructure::reqwest::ReqwestTransport;
use moip_payments::interfaces::json::funding_reader::FundingReader;
use moip_payments::interfaces::json::payment_writer::PaymentWriter;
use moip_payments::settings::{DEFAULT_CONFIG_FILE, Settings};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (TOML). Missing files are ignored.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a payment for an order or a multiorder
    Create(CreateArgs),
    /// Fetch a payment by id
    Get {
        /// Server id of the payment
        payment_id: String,
    },
}

#[derive(Args)]
#[command(group(ArgGroup::new("parent").required(true).args(["order", "multiorder"])))]
struct CreateArgs {
    /// Id of the order being paid
    #[arg(long)]
    order: Option<String>,

    /// Id of the multiorder being paid
    #[arg(long)]
    multiorder: Option<String>,

    /// JSON file holding the funding instrument
    #[arg(long)]
    funding: PathBuf,

    /// Number of installments
    #[arg(long, default_value_t = 1)]
    installments: u32,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_payment(args: CreateArgs) -> Result<Payment> {
    let mut payment = match (args.order, args.multiorder) {
        (Some(order), None) => Payment::for_order(Order::new(order)),
        (None, Some(multiorder)) => Payment::for_multiorder(Multiorder::new(multiorder)),
        _ => miette::bail!("Exactly one of --order or --multiorder is required"),
    };

    let file = File::open(&args.funding).into_diagnostic()?;
    let funding_instrument = FundingReader::new(file).read().into_diagnostic()?;
    let installments = InstallmentCount::new(args.installments).into_diagnostic()?;

    payment
        .set_installment_count(installments)
        .set_funding_instrument(funding_instrument);
    Ok(payment)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(&cli.config).into_diagnostic()?;
    init_tracing(&settings.log.level);

    let transport = ReqwestTransport::from_settings(&settings.api).into_diagnostic()?;
    let service = PaymentService::new(Box::new(transport));

    let payment = match cli.command {
        Command::Create(args) => {
            let payment = build_payment(args)?;
            service.execute(&payment).await.into_diagnostic()?
        }
        Command::Get { payment_id } => service.get(&payment_id).await.into_diagnostic()?,
    };

    let stdout = io::stdout();
    let mut writer = PaymentWriter::new(stdout.lock());
    writer.write_payment(&payment).into_diagnostic()?;

    Ok(())
}
