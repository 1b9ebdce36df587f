use anyhow::Context;
use bitewise_core::Merchant;
use clap::{Parser, Subcommand};
use sqlx::PgPool;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "bitewise-cli")]
#[command(about = "Bitewise merchant catalog command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Merchant directory
    Merchants {
        #[command(subcommand)]
        command: MerchantCommands,
    },
    /// Live catalog reads against Clover
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    Ping,
    Migrate,
}

#[derive(Debug, Subcommand)]
enum MerchantCommands {
    List,
}

#[derive(Debug, Subcommand)]
enum CatalogCommands {
    /// Print a merchant's categories with their variations as JSON
    Categories {
        /// Clover merchant id
        merchant_id: String,
    },
    /// Print a merchant's modifier groups as JSON
    ModifierGroups {
        /// Clover merchant id
        merchant_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("bitewise-cli ready; run with --help for commands");
        return Ok(());
    };

    let config = bitewise_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let pool = bitewise_db::connect_pool(
        &config.database_url,
        bitewise_db::PoolConfig::from_app_config(&config),
    )
    .await
    .context("failed to connect to database")?;

    match command {
        Commands::Db { command } => run_db(&pool, command).await,
        Commands::Merchants {
            command: MerchantCommands::List,
        } => list_merchants(&pool).await,
        Commands::Catalog { command } => {
            let clover = bitewise_clover::CloverClient::new(&config.clover)?;
            run_catalog(&pool, &clover, command).await
        }
    }
}

async fn run_db(pool: &PgPool, command: DbCommands) -> anyhow::Result<()> {
    match command {
        DbCommands::Ping => {
            bitewise_db::ping(pool).await?;
            println!("database ok");
        }
        DbCommands::Migrate => {
            let applied = bitewise_db::run_migrations(pool).await?;
            println!("applied {applied} migration(s)");
        }
    }
    Ok(())
}

async fn list_merchants(pool: &PgPool) -> anyhow::Result<()> {
    let merchants: Vec<Merchant> = bitewise_db::list_merchants(pool)
        .await?
        .into_iter()
        .map(Merchant::from)
        .collect();
    println!("{}", serde_json::to_string_pretty(&merchants)?);
    Ok(())
}

async fn run_catalog(
    pool: &PgPool,
    clover: &bitewise_clover::CloverClient,
    command: CatalogCommands,
) -> anyhow::Result<()> {
    match command {
        CatalogCommands::Categories { merchant_id } => {
            let token = merchant_token(pool, &merchant_id).await?;
            let categories = clover.fetch_category_catalog(&merchant_id, &token).await?;
            println!("{}", serde_json::to_string_pretty(&categories)?);
        }
        CatalogCommands::ModifierGroups { merchant_id } => {
            let token = merchant_token(pool, &merchant_id).await?;
            let groups = clover.fetch_modifier_groups(&merchant_id, &token).await?;
            for group in &groups {
                println!(
                    "{}\t{}\t{} modifier(s)",
                    group.id,
                    group.name,
                    group.modifiers.len()
                );
            }
        }
    }
    Ok(())
}

async fn merchant_token(pool: &PgPool, merchant_id: &str) -> anyhow::Result<String> {
    bitewise_db::get_merchant_credential(pool, merchant_id)
        .await?
        .with_context(|| format!("merchant {merchant_id} is not registered"))?
        .usable_token()
        .map(str::to_owned)
        .with_context(|| format!("merchant {merchant_id} has no Clover access token"))
}
