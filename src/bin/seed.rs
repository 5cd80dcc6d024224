//! Database seeding tool for bookshelf.
//!
//! Inserts sample catalog and user rows for local development, or clears
//! previously seeded data.
//!
//! # Usage
//!
//! ```bash
//! # Seed 20 books and 10 users (the defaults)
//! cargo run --bin seed -- run
//!
//! # Seed a custom amount
//! cargo run --bin seed -- run --books 50 --users 5
//!
//! # Remove all rows from both tables
//! cargo run --bin seed -- clear
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//!
//! Seeded users all share the password `password123`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sqlx::PgPool;
use std::sync::Arc;

use bookshelf::domain::entities::{NewBook, NewUser};
use bookshelf::domain::repositories::{BookRepository, UserRepository};
use bookshelf::infrastructure::persistence::{PgBookRepository, PgUserRepository};

const SEED_PASSWORD: &str = "password123";

const SAMPLE_BOOKS: &[(&str, &str)] = &[
    ("Dune", "Frank Herbert"),
    ("Neuromancer", "William Gibson"),
    ("The Left Hand of Darkness", "Ursula K. Le Guin"),
    ("Foundation", "Isaac Asimov"),
    ("Snow Crash", "Neal Stephenson"),
    ("Hyperion", "Dan Simmons"),
    ("The Dispossessed", "Ursula K. Le Guin"),
    ("Solaris", "Stanislaw Lem"),
    ("Roadside Picnic", "Arkady Strugatsky"),
    ("A Canticle for Leibowitz", "Walter M. Miller Jr."),
];

const SAMPLE_USERNAMES: &[&str] = &[
    "avid_reader", "bookworm", "page_turner", "night_owl", "librarian",
    "archivist", "bibliophile", "proofreader", "collector", "browser",
];

/// CLI tool for seeding the bookshelf database.
#[derive(Parser)]
#[command(name = "seed")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert sample books and users
    Run {
        /// Number of books to insert
        #[arg(long, default_value_t = 20)]
        books: usize,

        /// Number of users to insert
        #[arg(long, default_value_t = 10)]
        users: usize,
    },

    /// Delete all rows from the books and users tables
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().init();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = Arc::new(PgPool::connect(&database_url).await?);

    match cli.command {
        Commands::Run { books, users } => {
            seed_users(&pool, users).await?;
            seed_books(&pool, books).await?;
            tracing::info!("Database seeding completed");
        }
        Commands::Clear => {
            clear(&pool).await?;
            tracing::info!("All seeded data cleared");
        }
    }

    Ok(())
}

async fn seed_books(pool: &Arc<PgPool>, count: usize) -> Result<()> {
    let repository = PgBookRepository::new(pool.clone());

    for i in 0..count {
        let (title, author) = SAMPLE_BOOKS[i % SAMPLE_BOOKS.len()];
        // Suffix repeats so titles stay distinguishable past one cycle.
        let title = if i < SAMPLE_BOOKS.len() {
            title.to_string()
        } else {
            format!("{} (vol. {})", title, i / SAMPLE_BOOKS.len() + 1)
        };

        repository
            .create(NewBook {
                title,
                author: author.to_string(),
            })
            .await
            .map_err(|e| anyhow::anyhow!("failed to seed book: {e:?}"))?;
    }

    tracing::info!("Seeded {} books", count);
    Ok(())
}

async fn seed_users(pool: &Arc<PgPool>, count: usize) -> Result<()> {
    let repository = PgUserRepository::new(pool.clone());
    let password_hash = bcrypt::hash(SEED_PASSWORD, bcrypt::DEFAULT_COST)?;

    for i in 0..count {
        let base = SAMPLE_USERNAMES[i % SAMPLE_USERNAMES.len()];
        let username = if i < SAMPLE_USERNAMES.len() {
            base.to_string()
        } else {
            format!("{}{}", base, i / SAMPLE_USERNAMES.len() + 1)
        };

        repository
            .create(NewUser {
                username,
                password_hash: password_hash.clone(),
            })
            .await
            .map_err(|e| anyhow::anyhow!("failed to seed user: {e:?}"))?;
    }

    tracing::info!("Seeded {} users", count);
    Ok(())
}

async fn clear(pool: &Arc<PgPool>) -> Result<()> {
    sqlx::query("DELETE FROM books").execute(pool.as_ref()).await?;
    sqlx::query("DELETE FROM users").execute(pool.as_ref()).await?;
    Ok(())
}
