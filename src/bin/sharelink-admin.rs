use anyhow::Result;
use clap::{Parser, Subcommand};
use sharelink::config::{DatabaseConfig, ShortLinkConfig};
use sharelink::connect_mapping_store;
use sharelink::models::ShareRecord;
use sharelink::storage::MappingStore;
use sharelink::shortcode::{is_well_formed, ShortLinks};

#[derive(Parser)]
#[command(name = "sharelink-admin")]
#[command(about = "Sharelink mapping store management CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the mapping table and indexes
    Init,
    /// Show the record a short code redirects through
    Resolve {
        /// Short code, e.g. ABC1D
        code: String,
    },
    /// List the most recently created records
    List {
        #[arg(long, default_value_t = 20)]
        limit: i64,
    },
}

fn format_created_at(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| millis.to_string())
}

fn print_record(record: &ShareRecord) {
    println!(
        "{:<8} {:<20} {}",
        record.id,
        format_created_at(record.created_at),
        record.short_url
    );
    println!("         -> {}", record.original_url);
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let database = DatabaseConfig::from_env()?;
    let links = ShortLinks::new(ShortLinkConfig::from_env().base_url);

    // Connecting also makes sure the schema exists
    let storage = connect_mapping_store(&database).await?;

    match cli.command {
        Commands::Init => {
            println!("✓ Mapping store initialized");
        }
        Commands::Resolve { code } => {
            if !is_well_formed(&code) {
                println!("⚠ '{}' does not look like a generated short code", code);
            }
            match storage.find_one_by_short_url(&links.link_for(&code)).await? {
                Some(record) => print_record(&record),
                None => println!("No record found for '{}'", code),
            }
        }
        Commands::List { limit } => {
            let records = storage.list_recent(limit).await?;
            if records.is_empty() {
                println!("No records found.");
            } else {
                println!("{:<8} {:<20} {}", "ID", "Created", "Short URL");
                println!("{}", "-".repeat(80));
                for record in &records {
                    print_record(record);
                }
            }
        }
    }

    Ok(())
}
