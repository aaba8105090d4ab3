use anyhow::{bail, Context, Result};
use assets_manager_client::{
    export::export_title_table,
    periods::{Period, StatsRange},
    render,
    title_table::{build_title_rows, sort_rows, SortColumn, SortDirection, SortState},
    views::{
        ComparisonController, DashboardController, Notice, ParticularsController, ParticularsForm,
        SettingsController, StatisticsController, ViewState,
    },
    AccountStore, ApiClient, ClientConfig, EntryStore, Session,
};
use chrono::Utc;
use clap::{Parser, Subcommand};
use shared::{Month, SignInRequest, SignUpRequest};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "assets", version, about = "Track cash and investments month by month")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account (password is read from stdin)
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        username: String,
    },

    /// Sign in and remember the session
    Signin {
        #[arg(long)]
        email: String,
    },

    /// Invalidate the current session
    Signout,

    /// Show the signed-in user
    Me,

    /// Add a particular
    Add {
        #[arg(long)]
        category: String,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long)]
        cash: Option<f64>,
        #[arg(long)]
        investment: Option<f64>,
        #[arg(long)]
        current_value: Option<f64>,
        /// Month name, e.g. "March" or "Mar" (default: current month)
        #[arg(long)]
        month: Option<String>,
        #[arg(long)]
        year: Option<i32>,
    },

    /// Edit a particular; omitted fields keep their stored value
    Edit {
        id: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        cash: Option<f64>,
        #[arg(long)]
        investment: Option<f64>,
        #[arg(long)]
        current_value: Option<f64>,
        #[arg(long)]
        month: Option<String>,
        #[arg(long)]
        year: Option<i32>,
    },

    /// Delete one particular
    Delete { id: String },

    /// List every particular
    List,

    /// Previously used titles, optionally filtered
    Titles { filter: Option<String> },

    /// Delete every particular but keep the account
    Clear {
        #[arg(long)]
        yes: bool,
    },

    /// Latest month overview
    Dashboard {
        /// title, category, cash, investment, current-value or gain-loss
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        desc: bool,
    },

    /// Trends over a range: 1month, 3months, 6months or 1year
    Statistics {
        #[arg(long, default_value = "6months")]
        range: String,
    },

    /// Compare two periods, e.g. q2-2024 q1-2024, 2024 2023 or Mar-2024 Feb-2024
    Compare {
        current: Option<String>,
        baseline: Option<String>,
    },

    /// Write the latest month's particulars to CSV
    Export {
        #[arg(long, default_value = "particulars.csv")]
        out: PathBuf,
    },

    /// Show the profile, or update it when a field is given
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        username: Option<String>,
    },

    /// Delete the account together with all particulars
    DeleteAccount {
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::load();
    debug!("Using store at {}", config.api_base_url);
    let client = ApiClient::with_base_url(config.api_base_url.clone());

    match cli.command {
        Command::Signup { email, name, username } => {
            let password = read_password()?;
            let user = client
                .sign_up(&SignUpRequest {
                    email,
                    password,
                    name,
                    username,
                })
                .await?;
            println!("Account created for {}. Run `assets signin --email {}`.", user.email, user.email);
        }

        Command::Signin { email } => {
            let password = read_password()?;
            let session = client.sign_in(&SignInRequest { email, password }).await?;
            session.save(&config.session_file)?;
            println!("Signed in as {}", session.email);
        }

        Command::Signout => {
            if let Some(session) = Session::load(&config.session_file)? {
                if let Err(e) = client.sign_out(&session).await {
                    debug!("Sign-out request failed: {}", e);
                }
            }
            Session::clear(&config.session_file)?;
            println!("Signed out");
        }

        Command::Me => {
            let session = require_session(&config)?;
            let user = client.current_user(&session).await?;
            let (name, username) = match &user.profile {
                Some(profile) => (profile.name.clone(), profile.username.clone()),
                None => ("-".to_string(), "-".to_string()),
            };
            println!(
                "{}",
                render::pretty_table(
                    &["Email", "Name", "Username", "Member Since"],
                    vec![vec![user.email, name, username, user.created_at.format("%d %b %Y").to_string()]],
                )
            );
        }

        Command::Add {
            category,
            title,
            cash,
            investment,
            current_value,
            month,
            year,
        } => {
            let session = require_session(&config)?;
            let mut controller = ParticularsController::new(client, session);
            let month = match month {
                Some(month) => Month::from_name(&month)?,
                None => controller.form.month,
            };
            controller.form = ParticularsForm {
                category,
                title,
                cash,
                investment,
                current_value,
                month,
                year: year.unwrap_or(controller.form.year),
            };
            let saved = controller.submit().await;
            finish(&config, controller.notice.as_ref(), saved.is_some())?;
            if let Some(entry) = saved {
                println!("{}", render::entries_table(&[entry]));
            }
        }

        Command::Edit {
            id,
            category,
            title,
            cash,
            investment,
            current_value,
            month,
            year,
        } => {
            let session = require_session(&config)?;
            let mut controller = ParticularsController::new(client, session);
            let loaded = controller.edit(&id).await;
            finish(&config, controller.notice.as_ref(), loaded)?;

            let form = &mut controller.form;
            if let Some(category) = category {
                form.category = category;
            }
            if let Some(title) = title {
                form.title = title;
            }
            if cash.is_some() {
                form.cash = cash;
            }
            if investment.is_some() {
                form.investment = investment;
            }
            if current_value.is_some() {
                form.current_value = current_value;
            }
            if let Some(month) = month {
                form.month = Month::from_name(&month)?;
            }
            if let Some(year) = year {
                form.year = year;
            }

            let saved = controller.submit().await;
            finish(&config, controller.notice.as_ref(), saved.is_some())?;
            if let Some(entry) = saved {
                println!("{}", render::entries_table(&[entry]));
            }
        }

        Command::Delete { id } => {
            let session = require_session(&config)?;
            let mut controller = DashboardController::new(client, session);
            let deleted = controller.delete_entry(&id).await;
            finish(&config, controller.notice.as_ref(), deleted)?;
        }

        Command::List => {
            let session = require_session(&config)?;
            let mut entries = client.list(&session).await?;
            entries.sort_by(|a, b| b.key().cmp(&a.key()).then_with(|| a.title().cmp(b.title())));
            if entries.is_empty() {
                println!("No particulars yet. Add one with `assets add`.");
            } else {
                println!("{}", render::entries_table(&entries));
            }
        }

        Command::Titles { filter } => {
            let session = require_session(&config)?;
            let mut controller = ParticularsController::new(client, session);
            controller.load_titles().await;
            finish(&config, controller.notice.as_ref(), controller.notice.is_none())?;
            let titles: Vec<&str> = match &filter {
                Some(filter) => controller.suggestions(filter),
                None => controller.titles.iter().map(String::as_str).collect(),
            };
            for title in titles {
                println!("{}", title);
            }
        }

        Command::Clear { yes } => {
            confirm(yes, "This deletes every particular.")?;
            let session = require_session(&config)?;
            let mut controller = SettingsController::new(client, session);
            let cleared = controller.clear_all_data().await;
            finish(&config, controller.notice.as_ref(), cleared.is_some())?;
        }

        Command::Dashboard { sort, desc } => {
            let session = require_session(&config)?;
            let mut controller = DashboardController::new(client, session);
            if let Some(column) = sort.as_deref() {
                let column = SortColumn::parse(column).with_context(|| format!("unknown column {}", column))?;
                controller.sort = SortState {
                    column,
                    direction: if desc {
                        SortDirection::Descending
                    } else {
                        SortDirection::Ascending
                    },
                };
            }
            controller.refresh().await;
            finish(&config, controller.notice.as_ref(), controller.notice.is_none())?;

            match &controller.state {
                ViewState::Ready(view) => {
                    println!("{}", render::summary_table(&view.summary));
                    println!("{}", render::breakdown_table(&view.summary));
                    println!("{}", render::trend_table(&view.summary));
                    println!("{}", render::title_table(&view.rows));
                    println!(
                        "{} particulars on record, {} in total",
                        view.stats.total_entries,
                        assets_manager_client::presentation::format_currency(view.stats.total_amount)
                    );
                }
                _ => println!("No particulars yet. Add one with `assets add`."),
            }
        }

        Command::Statistics { range } => {
            let range = StatsRange::parse(&range).with_context(|| format!("unknown range {}", range))?;
            let session = require_session(&config)?;
            let mut controller = StatisticsController::new(client, session);
            controller.refresh().await;
            controller.select_range(range);
            finish(&config, controller.notice.as_ref(), controller.notice.is_none())?;

            match &controller.state {
                ViewState::Ready(view) => {
                    println!("{} ({} to {})", range.label(), view.from.short_label(), view.to.short_label());
                    for table in render::statistics_tables(view) {
                        println!("{}", table);
                    }
                }
                _ => println!("No particulars yet. Add one with `assets add`."),
            }
        }

        Command::Compare { current, baseline } => {
            let session = require_session(&config)?;
            let mut controller = ComparisonController::new(client, session);
            if let Some(current) = current.as_deref() {
                let current = Period::parse(current).with_context(|| format!("unknown period {}", current))?;
                let baseline = match baseline.as_deref() {
                    Some(baseline) => {
                        Period::parse(baseline).with_context(|| format!("unknown period {}", baseline))?
                    }
                    None => current.previous(),
                };
                controller.selection = Some((current, baseline));
            }
            controller.refresh().await;
            finish(&config, controller.notice.as_ref(), controller.notice.is_none())?;

            match &controller.state {
                ViewState::Ready(report) => {
                    println!("{}", render::comparison_table(report));
                    if let Some(best) = &report.best_performer {
                        println!(
                            "Best performer: {} ({})",
                            best.category,
                            assets_manager_client::presentation::format_percent(best.growth_percent)
                        );
                    }
                }
                _ => println!("Nothing to compare for the selected periods."),
            }
        }

        Command::Export { out } => {
            let session = require_session(&config)?;
            let entries = client.list(&session).await?;
            let mut rows = build_title_rows(&entries);
            sort_rows(&mut rows, SortState::default());
            let written = export_title_table(&rows, &out).with_context(|| format!("write {}", out.display()))?;
            println!("Exported {} particulars to {}", written, out.display());
        }

        Command::Profile { name, username } => {
            let session = require_session(&config)?;
            let mut controller = SettingsController::new(client, session);
            if name.is_some() || username.is_some() {
                let updated = controller.update_profile(name, username).await;
                finish(&config, controller.notice.as_ref(), updated)?;
            } else {
                controller.load().await;
                finish(&config, controller.notice.as_ref(), controller.notice.is_none())?;
            }
            if let ViewState::Ready(profile) = &controller.state {
                println!(
                    "{}",
                    render::pretty_table(
                        &["Name", "Username", "Updated"],
                        vec![vec![
                            profile.name.clone(),
                            profile.username.clone(),
                            profile.updated_at.format("%d %b %Y").to_string(),
                        ]],
                    )
                );
            }
        }

        Command::DeleteAccount { yes } => {
            confirm(yes, "This deletes the account and every particular.")?;
            let session = require_session(&config)?;
            let mut controller = SettingsController::new(client, session);
            let deleted = controller.delete_account().await;
            if controller.signed_out {
                Session::clear(&config.session_file)?;
            }
            finish(&config, controller.notice.as_ref(), deleted)?;
        }
    }

    Ok(())
}

fn require_session(config: &ClientConfig) -> Result<Session> {
    match Session::load(&config.session_file)? {
        Some(session) if !session.is_expired(Utc::now()) => Ok(session),
        Some(_) => {
            Session::clear(&config.session_file)?;
            bail!("Session expired. Run `assets signin --email <email>`.")
        }
        None => bail!("Not signed in. Run `assets signin --email <email>`."),
    }
}

/// Print a view's notice and turn failures into an error exit
fn finish(config: &ClientConfig, notice: Option<&Notice>, succeeded: bool) -> Result<()> {
    match notice {
        Some(Notice::SignIn(message)) => {
            Session::clear(&config.session_file)?;
            if succeeded {
                println!("{}", message);
                Ok(())
            } else {
                bail!("{}. Run `assets signin --email <email>`.", message)
            }
        }
        Some(Notice::Field { field, message }) if !succeeded => bail!("{}: {}", field, message),
        Some(notice) if !succeeded => bail!("{}", notice.message()),
        Some(notice) => {
            println!("{}", notice.message());
            Ok(())
        }
        None if !succeeded => bail!("Request failed"),
        None => Ok(()),
    }
}

fn confirm(yes: bool, warning: &str) -> Result<()> {
    if yes {
        return Ok(());
    }
    print!("{} Type 'yes' to continue: ", warning);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    if answer.trim() != "yes" {
        bail!("Cancelled");
    }
    Ok(())
}

fn read_password() -> Result<String> {
    eprint!("Password: ");
    io::stderr().flush()?;
    let mut password = String::new();
    io::stdin().lock().read_line(&mut password)?;
    let password = password.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        bail!("Password is required");
    }
    Ok(password)
}
