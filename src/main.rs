use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use time::Date;

use kitchen_client::auth::services::{login, restore_session, signup};
use kitchen_client::auth::User;
use kitchen_client::date::{parse_calendar_date, today};
use kitchen_client::ingredients::expiry::{expiry_status, NEAR_EXPIRY_MESSAGE};
use kitchen_client::ingredients::notification::TITLE;
use kitchen_client::ingredients::{ExpiryNotification, InventoryView, SortMode};
use kitchen_client::meals::planner::weekday_label;
use kitchen_client::meals::{DayPlanner, NutrientGoals};
use kitchen_client::AppState;

#[derive(Parser)]
#[command(name = "kitchen", about = "Fridge inventory and meal-plan client")]
struct Cli {
    /// Log in with these credentials instead of the refresh cookie.
    #[arg(long, global = true, env = "KITCHEN_EMAIL")]
    email: Option<String>,
    #[arg(long, global = true, env = "KITCHEN_PASSWORD", hide_env_values = true)]
    password: Option<String>,
    /// Register the account when the email is not known yet.
    #[arg(long, global = true)]
    signup: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Owned ingredients grouped by category.
    Inventory {
        #[arg(long, value_enum, default_value_t = Sort::Expiration)]
        sort: Sort,
        #[arg(long)]
        keyword: Option<String>,
    },
    /// Ingredients close to their expiry date.
    Expiring,
    /// Meals and nutrient progress of a day.
    Meals {
        /// YYYY-MM-DD, defaults to today.
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Sort {
    Expiration,
    Registered,
    Name,
}

impl From<Sort> for SortMode {
    fn from(s: Sort) -> Self {
        match s {
            Sort::Expiration => SortMode::Expiration,
            Sort::Registered => SortMode::Registered,
            Sort::Name => SortMode::Name,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "kitchen_client=debug,kitchen=info,reqwest=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();
    let state = AppState::init()?;
    let user = authenticate(
        &state,
        cli.email.as_deref(),
        cli.password.as_deref(),
        cli.signup,
    )
    .await?;
    tracing::info!(user_no = user.user_no, "session ready");

    match cli.command {
        Command::Inventory { sort, keyword } => {
            print_inventory(&state, sort.into(), keyword.as_deref()).await
        }
        Command::Expiring => print_expiring(&state).await,
        Command::Meals { date } => {
            let date = match date {
                Some(raw) => parse_calendar_date(&raw).with_context(|| format!("invalid date: {raw}"))?,
                None => today(),
            };
            print_meals(&state, date).await
        }
    }
}

async fn authenticate(
    state: &AppState,
    email: Option<&str>,
    password: Option<&str>,
    allow_signup: bool,
) -> anyhow::Result<User> {
    if let (Some(email), Some(password)) = (email, password) {
        return match login(&state.api, email, password).await {
            Ok(user) => Ok(user),
            Err(e) if e.is_not_found() && allow_signup => signup(&state.api, email, password, None)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message())),
            Err(e) if e.is_not_found() => {
                anyhow::bail!("등록된 계정이 없습니다. --signup 으로 회원가입할 수 있습니다.")
            }
            Err(e) => Err(anyhow::anyhow!(e.user_message())),
        };
    }
    restore_session(&state.api)
        .await
        .context("not logged in; pass --email and --password")
}

fn inventory_view(state: &AppState) -> anyhow::Result<InventoryView> {
    Ok(InventoryView::for_session(
        state.api.clone(),
        state.config.near_expiry_days,
    )?)
}

async fn print_inventory(
    state: &AppState,
    sort: SortMode,
    keyword: Option<&str>,
) -> anyhow::Result<()> {
    let view = inventory_view(state)?;
    view.set_sort(sort).await?;
    if let Some(k) = keyword {
        view.search(k).await?;
    }
    let inventory = view.inventory().await;
    if inventory.is_empty() {
        println!("등록된 식재료가 없습니다.");
        return Ok(());
    }
    let now = today();
    println!("[{}]", sort.label());
    for group in &inventory.groups {
        println!("{} ({})", group.name, group.items.len());
        for item in &group.items {
            let status = expiry_status(item, now, state.config.near_expiry_days);
            let dday = status.map(|s| s.dday.label()).unwrap_or_default();
            let icon = status.and_then(|s| s.warning_icon()).unwrap_or(" ");
            println!("  {icon} {:<16} {:<8} {dday}", item.ing_name, item.quantity);
        }
    }
    Ok(())
}

async fn print_expiring(state: &AppState) -> anyhow::Result<()> {
    let view = inventory_view(state)?;
    view.refresh().await?;
    let mut popup = ExpiryNotification::new(view.near_expiry(today()).await, false);
    if popup.show() {
        println!("{TITLE}");
        println!("{NEAR_EXPIRY_MESSAGE}");
        println!("{}", popup.message());
    } else {
        println!("소비기한이 임박한 식재료가 없습니다.");
    }
    Ok(())
}

async fn print_meals(state: &AppState, date: Date) -> anyhow::Result<()> {
    let mut planner = DayPlanner::for_session(state.api.clone(), today())?;
    planner.select(date);
    planner.load_day().await?;
    planner.load_stats().await?;

    let strip: Vec<String> = planner
        .week_strip()
        .iter()
        .map(|d| {
            let mark = if *d == date { "*" } else { "" };
            format!("{}{}{mark}", weekday_label(*d), d.day())
        })
        .collect();
    println!("{}", strip.join("  "));

    for section in planner.sections() {
        println!(
            "{} - {}개 항목 / {} 칼로리",
            section.slot.name(),
            section.items.len(),
            section.energy().round()
        );
        for item in &section.items {
            let grams = item.quantity.unwrap_or(100.0);
            println!("    {} ({grams}g)", item.food_name);
        }
    }
    for bar in planner.progress(&NutrientGoals::default()) {
        let filled = (bar.percent / 5.0).round() as usize;
        println!("{:<28} [{:<20}] {:>3.0}%", bar.label(), "#".repeat(filled), bar.percent);
    }
    Ok(())
}
