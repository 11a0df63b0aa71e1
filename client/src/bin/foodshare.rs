use std::sync::Arc;

use anyhow::{bail, Context};
use chrono::{DateTime, TimeDelta, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use foodshare_client::HttpListingRepository;
use foodshare_common::display::{expiry_label, EXPIRY_PATTERN};
use foodshare_common::listing::{DonationForm, ListingId};
use foodshare_common::location::{GeoLocation, NAIROBI};
use foodshare_common::marketplace::{Marketplace, DEFAULT_RADIUS_KM};
use foodshare_common::notify::TracingNotifier;
use foodshare_common::query::QueryState;
use foodshare_common::repository::{ClaimOutcome, ListingRepository};
use foodshare_common::role::{Role, RoleState, Screen};
use foodshare_common::store::{InMemoryListingStore, StoreConfig};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoleArg {
    Donor,
    Receiver,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Donor => Role::Donor,
            RoleArg::Receiver => Role::Receiver,
        }
    }
}

#[derive(Parser)]
#[command(name = "foodshare", about = "Browse, donate and claim surplus food")]
struct Cli {
    /// Node to talk to.
    #[arg(long, env = "FOODSHARE_NODE_URL", default_value = "http://localhost:3020")]
    node_url: String,

    /// Use a local in-memory store seeded with demo listings instead of a node.
    #[arg(long)]
    offline: bool,

    #[arg(long, value_enum, default_value = "receiver")]
    role: RoleArg,

    #[arg(long, default_value_t = NAIROBI.latitude, allow_hyphen_values = true)]
    lat: f64,

    #[arg(long, default_value_t = NAIROBI.longitude, allow_hyphen_values = true)]
    lon: f64,

    #[arg(long, default_value_t = DEFAULT_RADIUS_KM)]
    radius_km: f64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List available food nearby.
    List,
    /// Print map pins for nearby listings.
    Markers,
    /// Show which screens the current role sees.
    Screens,
    /// Post a donation (donor role only).
    Donate {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        donor: String,
        #[arg(long)]
        image_url: Option<String>,
        /// Hours until the food should be collected.
        #[arg(long, default_value_t = 6)]
        expires_in_hours: i64,
    },
    /// Request pickup of a listing.
    Claim { id: String },
}

fn print_listings(state: &QueryState) {
    match state {
        QueryState::Loading => println!("Loading..."),
        QueryState::Failed(e) => println!("Error: {e}"),
        QueryState::Loaded(xs) if xs.is_empty() => println!("No food available nearby."),
        QueryState::Loaded(xs) => {
            for l in xs {
                println!("[{}] {} - {}", l.id, l.title, l.donor);
                println!("    {}", l.description);
                println!("    {}", expiry_label(&l.expires_at, EXPIRY_PATTERN));
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,foodshare=info")),
        )
        .init();

    let cli = Cli::parse();
    let repo: Arc<dyn ListingRepository> = if cli.offline {
        Arc::new(InMemoryListingStore::new(StoreConfig::default()))
    } else {
        Arc::new(
            HttpListingRepository::new(&cli.node_url)
                .with_context(|| format!("connecting to {}", cli.node_url))?,
        )
    };
    let origin = GeoLocation::new(cli.lat, cli.lon);
    let mut market = Marketplace::new(repo, TracingNotifier)
        .with_area(origin, cli.radius_km)
        .with_role(RoleState::new(cli.role.into()));

    match cli.command {
        Command::List => {
            print_listings(market.refresh().await);
        }
        Command::Markers => {
            market.refresh().await;
            for m in market.markers() {
                println!(
                    "{}\t{:.4},{:.4}\t{}",
                    m.id, m.location.latitude, m.location.longitude, m.title
                );
            }
        }
        Command::Screens => {
            let names: Vec<String> = market.screens().iter().map(|s| format!("{s:?}")).collect();
            println!("{}: {}", market.role().label(), names.join(", "));
        }
        Command::Donate {
            title,
            description,
            donor,
            image_url,
            expires_in_hours,
        } => {
            if !market.screens().contains(&Screen::Donate) {
                bail!("donating needs the donor role (--role donor)");
            }
            let form = DonationForm {
                title,
                description,
                image_url,
                expires_at: expiry_from_now(expires_in_hours)?,
                location: origin,
                donor,
            };
            let id = market.donate(form).await?;
            println!("Posted listing {id}");
            print_listings(market.query());
        }
        Command::Claim { id } => match market.claim(&ListingId(id.clone())).await? {
            ClaimOutcome::Claimed => println!("Pickup requested for {id}"),
            ClaimOutcome::AlreadyClaimed => bail!("listing {id} was already claimed"),
            ClaimOutcome::NotFound => bail!("listing {id} does not exist"),
        },
    }
    Ok(())
}

fn expiry_from_now(hours: i64) -> anyhow::Result<DateTime<Utc>> {
    TimeDelta::try_hours(hours)
        .and_then(|delta| Utc::now().checked_add_signed(delta))
        .with_context(|| format!("--expires-in-hours {hours} is out of range"))
}
