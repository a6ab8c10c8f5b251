use clap::{Parser, Subcommand};
use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;
use memolookup::prelude::*;

/// Read-only record lookup against a hosted tables API
#[derive(Parser, Debug)]
#[command(name = "memolookup")]
#[command(about = "Look up and verify records in a hosted tables API", long_about = None)]
struct Args {
    /// Base URL of the tables API project
    #[arg(long, env = "MEMOLOOKUP_ENDPOINT")]
    endpoint: String,

    /// Publishable access key
    #[arg(long, env = "MEMOLOOKUP_ACCESS_KEY", hide_env_values = true)]
    access_key: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Report format: text or json
    #[arg(long, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Whether a missing target record fails the run: warn or error
    #[arg(long, default_value_t = NotFoundSeverity::Warn)]
    not_found_severity: NotFoundSeverity,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan a memorial collection for a target by name, id or access code
    FindMemorial {
        #[arg(long, default_value = "Memorial")]
        collection: String,

        /// Case-insensitive substring of the name (repeatable)
        #[arg(long)]
        name: Vec<String>,

        /// Exact id (repeatable)
        #[arg(long)]
        id: Vec<String>,

        /// Exact access code (repeatable)
        #[arg(long)]
        access_code: Vec<String>,
    },

    /// Fetch a single order by order number or payment id
    FindOrder {
        #[arg(long, default_value = "Order")]
        collection: String,

        #[arg(long, required_unless_present = "payment_id", conflicts_with = "payment_id")]
        order_number: Option<String>,

        #[arg(long)]
        payment_id: Option<String>,

        /// Related collection to embed
        #[arg(long, default_value = "Memorial")]
        related: String,

        /// Do not embed the related collection
        #[arg(long)]
        no_related: bool,
    },

    /// List the display field of every row in a collection
    List {
        collection: String,

        #[arg(long, default_value = "name")]
        display_field: String,
    },

    /// Show the field names observed across a collection
    Describe {
        collection: String,
    },
}

/// Criterion for the memorial lookup; falls back to the demo memorial when
/// no rule was given on the command line.
fn memorial_criterion(names: &[String], ids: &[String], access_codes: &[String]) -> Criterion {
    if names.is_empty() && ids.is_empty() && access_codes.is_empty() {
        return Criterion::none()
            .or_contains("name", "demo")
            .or_equals("id", "demo-memorial")
            .or_equals("access_code", "demo");
    }

    let names = names.iter().map(|n| MatchRule::contains("name", n.as_str()));
    let ids = ids.iter().map(|i| MatchRule::equals("id", i.as_str()));
    let codes = access_codes
        .iter()
        .map(|c| MatchRule::equals("access_code", c.as_str()));
    names.chain(ids).chain(codes).collect()
}

/// Fields a found order must carry to count as verified.
const REQUIRED_ORDER_FIELDS: &[&str] = &["id", "order_number"];

/// Column and value to filter orders on; the order number wins when both are given.
fn order_filter<'a>(
    order_number: &'a Option<String>,
    payment_id: &'a Option<String>,
) -> Result<(&'static str, &'a str)> {
    match (order_number, payment_id) {
        (Some(number), _) => Ok(("order_number", number.as_str())),
        (None, Some(payment)) => Ok(("stripe_payment_id", payment.as_str())),
        (None, None) => Err(Error::InvalidConfig(
            "an order number or payment id is required".to_string(),
        )),
    }
}

fn related_collection(related: &str, no_related: bool) -> Option<&str> {
    (!no_related).then_some(related)
}

/// Turn a single-row fetch into a lookup outcome. A missing row is an
/// ordinary `NotFound`; every other failure, including a row without its
/// required fields, stays an error.
fn order_outcome(fetched: Result<Record>) -> Result<LookupOutcome> {
    match fetched {
        Ok(record) => {
            for field in REQUIRED_ORDER_FIELDS {
                record.require_str(field)?;
            }
            Ok(LookupOutcome::Found { record })
        }
        Err(Error::NotFound { .. }) => Ok(LookupOutcome::NotFound { considered: Vec::new() }),
        Err(e) => Err(e),
    }
}

async fn run<W: Write>(client: &RemoteRecordClient, args: &Args, out: &mut W) -> bool {
    match &args.command {
        Command::FindMemorial { collection, name, id, access_code } => {
            let reporter = LookupReporter::new(args.format, ["id", "name", "access_code"]);
            let rows = match client.fetch_all(collection).await {
                Ok(rows) => rows,
                Err(e) => {
                    reporter.report_error(out, "find-memorial", &e);
                    return false;
                }
            };

            let criterion = memorial_criterion(name, id, access_code);
            debug!("Matching {} row(s) against {:?}", rows.len(), criterion);
            let outcome = RecordFinder::new("name").find(&rows, &criterion);
            reporter.report(out, &outcome);
            !args.not_found_severity.fails(&outcome)
        }
        Command::FindOrder { collection, order_number, payment_id, related, no_related } => {
            let mut reporter = LookupReporter::new(
                args.format,
                ["id", "order_number", "stripe_payment_id", "memorial_id"],
            );
            let related = related_collection(related, *no_related);
            if let Some(related) = related {
                reporter = reporter.with_related(related, ["id", "name"]);
            }

            let (field, value) = match order_filter(order_number, payment_id) {
                Ok(filter) => filter,
                Err(e) => {
                    reporter.report_error(out, "find-order", &e);
                    return false;
                }
            };

            let fetched = client.fetch_one(collection, field, value, related).await;
            let outcome = match order_outcome(fetched) {
                Ok(outcome) => outcome,
                Err(e) => {
                    reporter.report_error(out, "find-order", &e);
                    return false;
                }
            };
            reporter.report(out, &outcome);
            !args.not_found_severity.fails(&outcome)
        }
        Command::List { collection, display_field } => {
            let reporter = LookupReporter::new(args.format, [display_field.as_str()]);
            match client.fetch_all(collection).await {
                Ok(rows) => {
                    let summary = RecordFinder::new(display_field.as_str()).summarize(&rows);
                    reporter.report_list(out, &format!("Records in {}", collection), &summary);
                    true
                }
                Err(e) => {
                    reporter.report_error(out, "list", &e);
                    false
                }
            }
        }
        Command::Describe { collection } => {
            let reporter = LookupReporter::new(args.format, Vec::<String>::new());
            match client.describe(collection).await {
                Ok(fields) => {
                    reporter.report_list(out, &format!("Fields in {}", collection), &fields);
                    true
                }
                Err(e) => {
                    reporter.report_error(out, "describe", &e);
                    false
                }
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting memolookup v{}", env!("CARGO_PKG_VERSION"));
    info!("Endpoint: {}", args.endpoint);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let config = ClientConfig::new(&args.endpoint, &args.access_key)
        .with_timeout(Duration::from_secs(args.timeout_secs));
    let client = match RemoteRecordClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            LookupReporter::new(args.format, Vec::<String>::new()).report_error(&mut out, "connect", &e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let succeeded = run(&client, &args, &mut out).await;
    out.flush()?;

    Ok(if succeeded { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
