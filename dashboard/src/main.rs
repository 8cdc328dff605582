//! # Dashboard CLI
//!
//! Drives the API binding layer from the command line.
//!
//! ```bash
//! dashboard login --email admin@sparkle.test
//! dashboard stats
//! dashboard contacts --page 2 --status "In Progress"
//! dashboard delete-contact 665f1c
//! dashboard logout
//! ```

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

use dashboard::config::init_config;
use dashboard::core::error::{AppError, Result};
use dashboard::services::api::resources::ContactFilter;
use dashboard::services::api::{Api, ApiClient};
use dashboard::services::session::{AuthContext, FileTokenStore};
use shared::dto::contact::{Contact, ContactStatus};

#[derive(Parser)]
#[command(name = "dashboard")]
#[command(about = "Cleaning-services admin dashboard client", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the access token
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "DASHBOARD_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Dashboard statistics
    Stats,

    /// List contact requests
    Contacts {
        #[arg(long)]
        page: Option<u32>,

        #[arg(long)]
        limit: Option<u32>,

        /// Pending, In Progress, Completed, Cancelled, Approved or Rejected
        #[arg(long)]
        status: Option<String>,

        /// Print the raw page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a contact request
    DeleteContact {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// List FAQs
    Faqs,

    /// List services
    Services {
        #[arg(long)]
        category: Option<String>,
    },

    /// List blog posts
    Blogs,

    /// Forget the stored access token
    Logout,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let _log_guard = dashboard::debug::init_logger();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Api(e)) if e.is_unauthorized() => {
            error!(error = %e, "Request was not authorized");
            eprintln!("Session expired or missing. Run `dashboard login` first.");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = init_config()?;
    let store = Arc::new(FileTokenStore::new(&config.token_file));
    let client = ApiClient::from_config(config, AuthContext::new(store.clone()));
    let api = Api::new(Arc::new(client))?;

    match cli.command {
        Commands::Login { email, password } => {
            lib_utils::validate_email(&email).map_err(AppError::Validation)?;
            lib_utils::validate_not_empty(&password, "password").map_err(AppError::Validation)?;

            let tokens = api.auth.login(&email, &password).await?;
            store.save(&tokens.access_token).await?;
            info!(path = %store.path().display(), "Stored access token");
            println!("Logged in as {email}");
        }
        Commands::Stats => print_json(&api.payment.fetch_statistics().await?)?,
        Commands::Contacts { page, limit, status, json } => {
            let status = status
                .map(|s| s.parse::<ContactStatus>())
                .transpose()
                .map_err(AppError::Validation)?;
            let filter = ContactFilter { page, limit, status };
            let contacts = api.contact.fetch_contacts(&filter).await?;

            if json {
                print_json(&contacts)?;
            } else {
                for contact in &contacts.items {
                    println!("{}", contact_row(contact));
                }
                let pages = contacts.total_pages();
                let window: Vec<String> = dashboard::utils::page_window(contacts.meta.page, pages, 5)
                    .into_iter()
                    .map(|p| if p == contacts.meta.page { format!("[{p}]") } else { p.to_string() })
                    .collect();
                println!("{} contacts, page {} of {pages}: {}", contacts.meta.total, contacts.meta.page, window.join(" "));
            }
        }
        Commands::DeleteContact { id } => print_json(&api.contact.delete_contact(&id).await?)?,
        Commands::Faqs => print_json(&api.faq.fetch_faqs().await?)?,
        Commands::Services { category } => {
            print_json(&api.service.fetch_services(category.as_deref()).await?)?
        }
        Commands::Blogs => {
            let mut blogs = api.blog.fetch_blogs().await?;
            for blog in &mut blogs.items {
                blog.image = blog.image.as_deref().and_then(|path| config.image_link(path));
            }
            print_json(&blogs)?;
        }
        Commands::Logout => {
            store.clear().await?;
            println!("Logged out");
        }
    }

    Ok(())
}

fn contact_row(contact: &Contact) -> String {
    let date = contact
        .created_at
        .as_deref()
        .and_then(|moment| lib_utils::parse_utc(moment).ok())
        .map(lib_utils::format_display_date)
        .unwrap_or_default();
    format!(
        "{}\t{}\t{}\t{}\t{}",
        contact.id,
        date,
        contact.status,
        contact.name,
        dashboard::utils::truncate_text(&contact.message, 40)
    )
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
