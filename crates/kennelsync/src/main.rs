use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kennelsync::cli::{
    BookingsAction, Cli, Commands, KennelsAction, PetsAction, PrefsAction, RecordsAction,
    SettingsAction,
};
use kennelsync::{AppContext, CachedRepository, Config};
use kennelsync_core::models::{Collection, Entity, NewBooking, NewPet};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays pipeable JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kennelsync=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = cli.apply(Config::from_env());
    let ctx = AppContext::from_config(&config).await?;

    let result = run(cli.command, &ctx).await;
    ctx.shutdown().await?;
    result
}

async fn run(command: Commands, ctx: &AppContext) -> Result<()> {
    match command {
        Commands::Pets(PetsAction::List { owner }) => print_json(&ctx.pets.read(&owner).await?),
        Commands::Pets(PetsAction::Add {
            owner,
            name,
            species,
            breed,
            birth_date,
        }) => {
            let mut draft = NewPet::new(owner, name, species);
            if let Some(breed) = breed {
                draft = draft.with_breed(breed);
            }
            if let Some(birth_date) = birth_date {
                draft = draft.with_birth_date(birth_date);
            }
            print_json(&ctx.pets.create(&draft).await?)
        }
        Commands::Bookings(BookingsAction::List { user }) => {
            print_json(&ctx.bookings.read(&user).await?)
        }
        Commands::Bookings(BookingsAction::Add {
            user,
            kennel,
            check_in,
            check_out,
            pets,
        }) => {
            let draft = pets.into_iter().fold(
                NewBooking::new(user, kennel, check_in, check_out),
                |draft, pet| draft.with_pet(pet),
            );
            print_json(&ctx.bookings.create(&draft).await?)
        }
        Commands::Records {
            collection,
            action: RecordsAction::List { owner },
        } => list_collection(ctx, collection, &owner).await,
        Commands::Kennels(KennelsAction::Search { query }) => {
            print_json(&ctx.boarding.search_kennels(&query).await?)
        }
        Commands::CheckIns { kennel_id, date } => {
            let date = date.unwrap_or_else(today);
            print_json(&ctx.boarding.today_check_ins(&kennel_id, date).await?)
        }
        Commands::Active { kennel_id, date } => {
            let date = date.unwrap_or_else(today);
            print_json(&ctx.boarding.active_bookings(&kennel_id, date).await?)
        }
        Commands::Settings(SettingsAction::Get { key }) => {
            let value: Option<serde_json::Value> = ctx.settings.get(&key).await?;
            print_json(&value)
        }
        Commands::Settings(SettingsAction::Set { key, value }) => {
            let value = serde_json::from_str::<serde_json::Value>(&value)
                .unwrap_or(serde_json::Value::String(value));
            ctx.settings.set(&key, &value).await?;
            print_json(&value)
        }
        Commands::Prefs(PrefsAction::Show) => print_json(&ctx.settings.load_preferences().await?),
        Commands::Prefs(PrefsAction::Set {
            theme,
            default_kennel,
            notifications,
        }) => {
            let mut prefs = ctx.settings.load_preferences().await?;
            if let Some(theme) = theme {
                prefs.theme = theme;
            }
            if let Some(kennel_id) = default_kennel {
                prefs.default_kennel_id = Some(kennel_id);
            }
            if let Some(enabled) = notifications {
                prefs.notifications_enabled = enabled;
            }
            ctx.settings.save_preferences(&prefs).await?;
            print_json(&prefs)
        }
    }
}

async fn list_collection(ctx: &AppContext, collection: Collection, owner: &str) -> Result<()> {
    match collection {
        Collection::Users => list(&ctx.users, owner).await,
        Collection::Pets => list(&ctx.pets, owner).await,
        Collection::Bookings => list(&ctx.bookings, owner).await,
        Collection::MedicalRecords => list(&ctx.medical_records, owner).await,
        Collection::Vaccines => list(&ctx.vaccines, owner).await,
        Collection::Kennels => list(&ctx.kennels, owner).await,
        Collection::KennelRuns => list(&ctx.kennel_runs, owner).await,
        Collection::StayUpdates => list(&ctx.stay_updates, owner).await,
        Collection::Invoices => list(&ctx.invoices, owner).await,
    }
}

async fn list<E: Entity>(repository: &CachedRepository<E>, owner: &str) -> Result<()> {
    print_json(&repository.read(owner).await?)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
