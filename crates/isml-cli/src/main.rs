use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Select};
use dotenvy::dotenv;
use isml_auth::issue_token_with_expiry;
use isml_config::{DatabaseConfig, JwtConfig};

/// Roles offered when `--role` is omitted.
const KNOWN_ROLES: [&str; 3] = ["academic", "manager", "student"];

#[derive(Parser)]
#[command(name = "isml-cli")]
#[command(about = "ISML CLI - Operator tools for the ISML academics API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a signed bearer token
    IssueToken {
        /// Role carried by the token (chosen interactively if not provided)
        #[arg(short = 'r', long)]
        role: Option<String>,

        /// Subject (user identifier)
        #[arg(short = 's', long)]
        subject: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Lifetime in seconds (defaults to JWT_ACCESS_EXPIRY)
        #[arg(long)]
        expiry: Option<i64>,
    },
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::IssueToken {
            role,
            subject,
            email,
            expiry,
        } => handle_issue_token(role, subject, email, expiry),
        Commands::Migrate => handle_migrate().await,
    };

    if let Err(e) = result {
        eprintln!("\n❌ {:#}", e);
        std::process::exit(1);
    }
}

fn handle_issue_token(
    role: Option<String>,
    subject: Option<String>,
    email: Option<String>,
    expiry: Option<i64>,
) -> Result<()> {
    let jwt_config = JwtConfig::from_env()?;

    let role = match role {
        Some(role) => role,
        None => {
            let selection = Select::new()
                .with_prompt("Role")
                .items(&KNOWN_ROLES)
                .default(0)
                .interact()
                .context("Failed to read role")?;
            KNOWN_ROLES[selection].to_string()
        }
    };

    let subject = match subject {
        Some(subject) => subject,
        None => Input::new()
            .with_prompt("Subject")
            .default("operator".to_string())
            .interact_text()
            .context("Failed to read subject")?,
    };

    let expiry = expiry.unwrap_or(jwt_config.access_token_expiry);
    let token = issue_token_with_expiry(&subject, &role, email.as_deref(), expiry, &jwt_config)
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    eprintln!("✅ Token issued for '{}' with role '{}' ({}s)", subject, role, expiry);
    println!("{}", token);
    Ok(())
}

async fn handle_migrate() -> Result<()> {
    let config = DatabaseConfig::from_env()?;
    let pool = isml_db::init_db_pool(&config)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .context("Failed to apply migrations")?;

    println!("✅ Migrations applied");
    Ok(())
}
