//! Address book CLI

use addrbook_cli::{format_address, format_page, load_config, run_shell, AddressForm, AppContext};
use addrbook_core::{AddressId, AddressMutator, AddressProvider, AddressUpdate, SortOrder};
use addrbook_query::{run_query, AddressQuery, PageRequest, SearchTerm};
use clap::{Parser, Subcommand, ValueEnum};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "addrbook")]
#[command(about = "Address book - search, sort and page through stored addresses")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Snapshot file to load from and save changes to
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    /// Log level (overrides RUST_LOG and the config file)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Newest,
    Oldest,
    None,
}

impl From<SortArg> for Option<SortOrder> {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Newest => Some(SortOrder::Newest),
            SortArg::Oldest => Some(SortOrder::Oldest),
            SortArg::None => None,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List addresses
    List {
        /// Case-insensitive search over street, city, state, country and postal code
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// Sort by creation time (defaults to the configured order)
        #[arg(long, value_enum)]
        sort: Option<SortArg>,

        /// Page number, starting at 1
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Page size (defaults to the configured size)
        #[arg(long)]
        size: Option<usize>,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add an address
    Add {
        #[arg(long)]
        street: String,

        /// Second address line (not stored)
        #[arg(long)]
        line2: Option<String>,

        #[arg(long)]
        city: String,

        /// State or province
        #[arg(long)]
        state: String,

        #[arg(long)]
        country: String,

        #[arg(long)]
        postal_code: String,
    },

    /// Remove an address by id
    Remove {
        id: String,
    },

    /// Change fields of an address
    Update {
        id: String,

        #[arg(long)]
        street: Option<String>,

        #[arg(long)]
        city: Option<String>,

        #[arg(long)]
        state: Option<String>,

        #[arg(long)]
        country: Option<String>,

        #[arg(long)]
        postal_code: Option<String>,
    },

    /// Write all addresses to a snapshot file
    Export {
        output: PathBuf,
    },

    /// Interactive session
    Shell,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;

    let level = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| config.log_level.clone());
    init_logging(&level);

    let context = AppContext::open(config, cli.snapshot)?;
    if let Some(path) = context.snapshot_path() {
        info!("Snapshot file: {}", path.display());
    }

    match cli.command {
        Commands::List {
            search,
            sort,
            page,
            size,
            json,
        } => {
            let size = size.unwrap_or(context.config.query.default_page_size);
            let Some(size) = NonZeroUsize::new(size) else {
                anyhow::bail!("Page size must be greater than zero");
            };
            let sort = match sort {
                Some(arg) => arg.into(),
                None => context.config.query.default_sort,
            };

            let query = AddressQuery::new(
                SearchTerm::new(search.as_deref().unwrap_or_default()),
                sort,
                PageRequest::new(page.saturating_sub(1), size),
            );
            let result = run_query(&context.store.list(), &query);

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", format_page(&result));
            }
        }

        Commands::Add {
            street,
            line2,
            city,
            state,
            country,
            postal_code,
        } => {
            let form = AddressForm {
                street,
                address_line2: line2.unwrap_or_default(),
                city,
                state_province: state,
                country,
                postal_code,
            };

            let errors = form.validate();
            if !errors.is_empty() {
                for error in &errors {
                    eprintln!("❌ {}", error);
                }
                std::process::exit(1);
            }

            let address = context.store.add(form.into_request()?);
            context.persist()?;

            println!("✅ Address added!");
            print!("{}", format_address(&address));
        }

        Commands::Remove { id } => {
            let id = AddressId::new(id);
            let existed = context.store.contains(&id);
            context.store.remove(&id);

            if existed {
                context.persist()?;
                println!("✅ Address {} removed. {} remaining.", id, context.store.len());
            } else {
                println!("No address with id {}; nothing changed.", id);
            }
        }

        Commands::Update {
            id,
            street,
            city,
            state,
            country,
            postal_code,
        } => {
            let id = AddressId::new(id);
            let update = AddressUpdate {
                street,
                city,
                state_province: state,
                country,
                postal_code,
            };
            if update.is_empty() {
                anyhow::bail!("Nothing to update; pass at least one field");
            }

            let before = context.store.version();
            context.store.update(&id, update);

            match context.store.get(&id) {
                Some(address) if context.store.version() != before => {
                    context.persist()?;
                    println!("✅ Address updated!");
                    print!("{}", format_address(&address));
                }
                Some(_) => println!("Address {} already has those values.", id),
                None => println!("No address with id {}; nothing changed.", id),
            }
        }

        Commands::Export { output } => {
            let count = context.export(&output)?;
            println!("Saved {} addresses to: {}", count, output.display());
        }

        Commands::Shell => {
            run_shell(&context)?;
        }
    }

    Ok(())
}
