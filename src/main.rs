use anyhow::Result;
use clap::Parser;
use tracing::warn;

mod cli;
mod db;

use cli::{AddArgs, CalendarArgs, Cli, Commands};
use db::PlantStore;
use smarttani::calendar::{CareProjection, MonthCursor};
use smarttani::models::{NewPlant, Plant, PlantDocument, PlantType};
use smarttani::notify::{dispatch, due_notifications};
use smarttani::schedule::{compute_status, today, DashboardSummary};
use smarttani::render;

/// Days between planting and the default harvest date.
const DEFAULT_GROWING_DAYS: u64 = 60;

/// Converts stored plants, skipping the ones with unreadable dates.
fn readable_plants(documents: &[PlantDocument]) -> Vec<Plant> {
    documents
        .iter()
        .filter_map(|doc| match Plant::try_from(doc) {
            Ok(plant) => Some(plant),
            Err(e) => {
                warn!(id = doc.id, error = %e, "skipping plant with invalid data");
                eprintln!("Data tanaman ID {} tidak valid: {}", doc.id, e);
                None
            }
        })
        .collect()
}

/// Converts stored plants, failing on the first unreadable one.
fn all_plants(documents: &[PlantDocument]) -> Result<Vec<Plant>> {
    Ok(documents
        .iter()
        .map(Plant::try_from)
        .collect::<smarttani::Result<Vec<_>>>()?)
}

fn new_plant(user_id: i64, args: AddArgs) -> Result<NewPlant> {
    let planting_date = args.planting_date.unwrap_or_else(today);
    let harvest_date = match args.harvest_date {
        Some(date) => date,
        None => planting_date
            .checked_add_days(chrono::Days::new(DEFAULT_GROWING_DAYS))
            .ok_or_else(|| anyhow::anyhow!("Tanggal panen di luar jangkauan"))?,
    };
    Ok(NewPlant {
        user_id,
        name: args.name,
        plant_type: PlantType::from(args.plant_type.trim().to_lowercase().as_str()),
        planting_date,
        harvest_date,
        watering_schedule: args.watering_schedule,
        fertilizing_schedule: args.fertilizing_schedule,
        notes: args.notes,
    })
}

fn resolve_month(args: &CalendarArgs) -> Result<MonthCursor> {
    let current = MonthCursor::current(today());
    let year = args.year.unwrap_or(current.year);
    let month0 = args.month.map_or(current.month0, |month| month - 1);
    Ok(MonthCursor::new(year, month0)?.shifted(args.shift)?)
}

fn report(found: bool, id: i64, done: &str) {
    if found {
        println!("Tanaman ID {} {}", id, done);
    } else {
        println!("Tidak ditemukan tanaman aktif dengan ID {}", id);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let store: PlantStore = db::connect(&cli.mongo_uri, &cli.database).await?;
    let user = cli.user;

    match cli.command {
        Commands::List { ids } => {
            let documents = store.active_plants(user).await?;
            if documents.is_empty() {
                println!("Belum ada tanaman");
                return Ok(());
            }

            if ids {
                for doc in &documents {
                    println!("{}, '{}'", doc.id, doc.name);
                }
                return Ok(());
            }

            let now = today();
            let plants = readable_plants(&documents);
            for plant in &plants {
                println!("{}", render::plant_card(plant, &compute_status(plant, now)));
            }
            println!("{}", render::summary(&DashboardSummary::from_plants(&plants, now)));
        }
        Commands::Add(args) => {
            let name = args.name.clone();
            let document = store.add_plant(new_plant(user, args)?).await?;
            println!("Tanaman {} berhasil ditambahkan, ID: {}", name, document.id);
        }
        Commands::Update(args) => {
            if db::edit_update(&args).is_none() {
                println!("Tidak ada perubahan yang diberikan");
                return Ok(());
            }
            let found = store.update_plant(user, &args).await?;
            report(found, args.id, "diperbarui");
        }
        Commands::Water { id } => {
            let found = store.mark_watered(id, user, today()).await?;
            report(found, id, "ditandai sudah disiram");
        }
        Commands::Fertilize { id } => {
            let found = store.mark_fertilized(id, user, today()).await?;
            report(found, id, "ditandai sudah dipupuk");
        }
        Commands::Remove { id } => {
            let found = store.remove_plant(id, user).await?;
            report(found, id, "dihapus");
        }
        Commands::Calendar(args) => {
            let cursor = resolve_month(&args)?;
            let plants = all_plants(&store.active_plants(user).await?)?;
            let projection = CareProjection::project(&plants, today())?;
            let weeks = cursor.build(&projection)?;
            print!("{}", render::month(&cursor, &weeks));
        }
        Commands::Notify { no_delay } => {
            let now = today();
            let plants = readable_plants(&store.active_plants(user).await?);
            let notifications = due_notifications(&plants, now);
            if notifications.is_empty() {
                println!("Tidak ada pengingat untuk {}", render::long_date(now));
                return Ok(());
            }
            dispatch(notifications, !no_delay, |notification| {
                println!("[{:?}] {}", notification.level, notification.message);
            })
            .await;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        return Err(e);
    }
    Ok(())
}
