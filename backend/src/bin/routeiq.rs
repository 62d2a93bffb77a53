use std::path::PathBuf;

use clap::{Parser, Subcommand};
use routeiq::{
    cities::CityTable,
    delay::DelayScorer,
    demand,
    models::ShipmentFeatures,
    random::DEFAULT_SEED,
    savings::{DEFAULT_DIESEL_INR_PER_L, DEFAULT_FUEL_L_PER_KM, SavingsConfig, optimize_and_compare},
};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Sequence delivery stops and run the demand and delay scorers"
)]
struct Args {
    /// JSON city table replacing the built-in hubs
    #[arg(long, env = "ROUTEIQ_CITIES", global = true)]
    cities: Option<PathBuf>,

    /// Diesel consumption in litres per km
    #[arg(long, env = "ROUTEIQ_FUEL_L_PER_KM", default_value_t = DEFAULT_FUEL_L_PER_KM, global = true)]
    fuel_l_per_km: f64,

    /// Diesel price in rupees per litre
    #[arg(long, env = "ROUTEIQ_DIESEL_INR_PER_L", default_value_t = DEFAULT_DIESEL_INR_PER_L, global = true)]
    diesel_inr_per_l: f64,

    /// Seed for the synthetic scorers
    #[arg(long, env = "ROUTEIQ_SEED", default_value_t = DEFAULT_SEED, global = true)]
    seed: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the known cities
    Cities,
    /// Sequence stops with the nearest-neighbor heuristic and report savings
    Optimize {
        /// Starting warehouse; defaults to the first stop
        #[arg(long)]
        start: Option<String>,
        #[arg(required = true)]
        stops: Vec<String>,
    },
    /// Score the delay risk of one shipment
    Delay {
        #[arg(long)]
        distance_km: f64,
        #[arg(long)]
        weight_g: f64,
        /// 0 = Monday .. 6 = Sunday
        #[arg(long)]
        dow: u8,
        #[arg(long)]
        month: u8,
        #[arg(long, default_value_t = 150.0)]
        freight_value: f64,
        #[arg(long, default_value_t = 1)]
        items: u32,
        #[arg(long, default_value = "Chennai")]
        seller: String,
        #[arg(long, default_value = "Bangalore")]
        customer: String,
    },
    /// Forecast daily demand for a zone
    Forecast {
        zone: String,
        #[arg(long, default_value_t = 7)]
        days: usize,
    },
    /// Today's demand across all zones
    Zones,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let table = match &args.cities {
        Some(path) => {
            tracing::info!("loading cities from {:?}", path);
            CityTable::from_file(path)?
        }
        None => CityTable::builtin().clone(),
    };
    let today = chrono::Local::now().date_naive();

    match args.command {
        Command::Cities => print_json(table.cities()),
        Command::Optimize { start, stops } => {
            let config = SavingsConfig {
                fuel_l_per_km: args.fuel_l_per_km,
                price_inr_per_litre: args.diesel_inr_per_l,
            };
            let comparison = optimize_and_compare(&table, &stops, start.as_deref(), &config)?;
            print_json(&comparison)
        }
        Command::Delay {
            distance_km,
            weight_g,
            dow,
            month,
            freight_value,
            items,
            seller,
            customer,
        } => {
            let features = ShipmentFeatures {
                distance_km,
                weight_g,
                order_dow: dow,
                order_month: month,
                freight_value,
                item_count: items,
                seller_city: seller,
                customer_city: customer,
            };
            print_json(&DelayScorer::new(args.seed).score(&features)?)
        }
        Command::Forecast { zone, days } => {
            print_json(&demand::forecast_demand(&zone, days, today, args.seed)?)
        }
        Command::Zones => print_json(&demand::zones_summary(today, args.seed)),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
