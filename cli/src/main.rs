//! `famplus`: command-line front end for the family finance backend.
//!
//! Every subcommand goes through the library's authenticated client, so
//! commands share the persisted session and its refresh-and-retry behavior.
//! Results are printed as pretty JSON on stdout; logs go to stderr.

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use client::net::api;
use client::net::types::{AccountType, EndMode, Id, NewAccount, NewChore, NewInvitation, NewOrder, OrderSide};
use client::resources::{assets, chores, exchange, families, ledger, notifications};
use client::state::auth::should_redirect_unauth;
use client::{ApiClient, ApiError, ClientConfig, Role, SessionEvent};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("{0}")]
    Login(String),
    #[error("invalid JSON output: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl CliError {
    fn code(&self) -> &'static str {
        match self {
            Self::Api(err) => err.error_code(),
            Self::Login(_) => "E_LOGIN",
            Self::InvalidJson(_) => "E_JSON",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "famplus", about = "Family chores, ledger and exchange CLI")]
struct Cli {
    #[arg(long, env = "FAMPLUS_API_URL")]
    api_url: Option<String>,

    #[arg(long, env = "FAMPLUS_SESSION_FILE")]
    session_file: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Obtain and store a token pair.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "FAMPLUS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored tokens.
    Logout,
    /// Show whether a session is stored.
    Status,
    /// Renew the access token now.
    Refresh,
    Chores(ChoresCommand),
    Entries(EntriesCommand),
    /// Convert chore points into money on an account.
    ExchangePoints {
        #[arg(long)]
        account: Id,
        #[arg(long)]
        points: u32,
    },
    Transactions(TransactionsCommand),
    Categories,
    Accounts(AccountsCommand),
    Assets(AssetsCommand),
    Exchange(ExchangeCommand),
    Families(FamiliesCommand),
    Notifications(NotificationsCommand),
}

#[derive(Args, Debug)]
struct ChoresCommand {
    #[command(subcommand)]
    command: ChoresSubcommand,
}

#[derive(Subcommand, Debug)]
enum ChoresSubcommand {
    List {
        #[arg(long)]
        assigned_to: Option<Id>,
    },
    Create {
        name: String,
        #[arg(long, default_value_t = 1)]
        points: i64,
        #[arg(long)]
        assigned_to: Option<Id>,
        #[arg(long, help = "Cron expression, e.g. \"0 8 * * *\"")]
        schedule: String,
        #[arg(long)]
        start_date: String,
        #[arg(long, default_value = "never")]
        end_mode: EndMode,
        #[arg(long)]
        end_date: Option<String>,
        #[arg(long)]
        end_after: Option<u32>,
    },
    Delete {
        id: Id,
    },
}

#[derive(Args, Debug)]
struct EntriesCommand {
    #[command(subcommand)]
    command: EntriesSubcommand,
}

#[derive(Subcommand, Debug)]
enum EntriesSubcommand {
    List,
    Complete { id: Id },
    Approve { id: Id },
    Reject { id: Id },
}

#[derive(Args, Debug)]
struct TransactionsCommand {
    #[command(subcommand)]
    command: TransactionsSubcommand,
}

#[derive(Subcommand, Debug)]
enum TransactionsSubcommand {
    List {
        #[arg(long)]
        category: Option<Id>,
    },
    /// Set a transaction's category; omit `--category` to clear it.
    Categorize {
        id: Id,
        #[arg(long)]
        category: Option<Id>,
    },
}

#[derive(Args, Debug)]
struct AccountsCommand {
    #[command(subcommand)]
    command: AccountsSubcommand,
}

#[derive(Subcommand, Debug)]
enum AccountsSubcommand {
    List {
        #[arg(long)]
        owner: Option<Id>,
    },
    Create {
        name: String,
        #[arg(long = "type")]
        kind: AccountType,
        #[arg(long, help = "Owning member; omit for a family account")]
        owner: Option<Id>,
    },
    Delete {
        id: Id,
    },
}

#[derive(Args, Debug)]
struct AssetsCommand {
    #[command(subcommand)]
    command: AssetsSubcommand,
}

#[derive(Subcommand, Debug)]
enum AssetsSubcommand {
    List,
    Prices { asset: Id },
}

#[derive(Args, Debug)]
struct ExchangeCommand {
    #[command(subcommand)]
    command: ExchangeSubcommand,
}

#[derive(Subcommand, Debug)]
enum ExchangeSubcommand {
    Orders { asset: Id },
    Book { asset: Id },
    Trades { asset: Id },
    Place {
        asset: Id,
        side: OrderSide,
        #[arg(long)]
        quantity: String,
        #[arg(long)]
        price: String,
    },
    Cancel { id: Id },
}

#[derive(Args, Debug)]
struct FamiliesCommand {
    #[command(subcommand)]
    command: FamiliesSubcommand,
}

#[derive(Subcommand, Debug)]
enum FamiliesSubcommand {
    List,
    Create { name: String },
    Rename { id: Id, name: String },
    Delete { id: Id },
    Members,
    Invitations,
    Invite {
        family: Id,
        email: String,
        #[arg(long, default_value = "child")]
        role: Role,
    },
}

#[derive(Args, Debug)]
struct NotificationsCommand {
    #[command(subcommand)]
    command: NotificationsSubcommand,
}

#[derive(Subcommand, Debug)]
enum NotificationsSubcommand {
    List,
    Read {
        #[arg(required = true)]
        ids: Vec<Id>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error [{}]: {err}", err.code());
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.api_url, cli.session_file)?;
    debug!(api_url = %config.api_url, session_file = %config.session_file.display(), "config loaded");

    let client = ApiClient::from_config(&config)?;
    let mut events = client.subscribe();
    let result = dispatch(&client, cli.command).await;
    report_session_events(&mut events);
    result
}

/// Flag values win over the environment; everything else falls back to it.
fn load_config(api_url: Option<String>, session_file: Option<String>) -> Result<ClientConfig, ApiError> {
    ClientConfig::from_lookup(|key| match key {
        "FAMPLUS_API_URL" if api_url.is_some() => api_url.clone(),
        "FAMPLUS_SESSION_FILE" if session_file.is_some() => session_file.clone(),
        _ => std::env::var(key).ok(),
    })
}

fn report_session_events(events: &mut broadcast::Receiver<SessionEvent>) {
    while let Ok(event) = events.try_recv() {
        match event {
            SessionEvent::Invalidated { redirect_to } => {
                warn!(%redirect_to, "session invalidated");
                eprintln!("session expired; run `famplus login`");
            }
            other => debug!(event = ?other, "session event"),
        }
    }
}

async fn dispatch(client: &ApiClient, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { email, password } => {
            api::login(client, &email, &password)
                .await
                .map_err(|err| CliError::Login(api::login_error_message(&err)))?;
            eprintln!("logged in");
            Ok(())
        }
        Command::Logout => {
            api::logout(client)?;
            eprintln!("logged out");
            Ok(())
        }
        Command::Status => {
            let state = api::auth_state(client)?;
            print_json(&serde_json::json!({
                "api_url": client.base_url(),
                "authenticated": state.authenticated,
                "needs_login": should_redirect_unauth(&state),
            }))
        }
        Command::Refresh => {
            client.refresh().await?;
            eprintln!("access token renewed");
            Ok(())
        }
        Command::Chores(chores) => run_chores(client, chores).await,
        Command::Entries(entries) => run_entries(client, entries).await,
        Command::ExchangePoints { account, points } => {
            print_json(&chores::exchange_points(client, account, points).await?)
        }
        Command::Transactions(transactions) => run_transactions(client, transactions).await,
        Command::Categories => print_json(&ledger::list_categories(client).await?),
        Command::Accounts(accounts) => run_accounts(client, accounts).await,
        Command::Assets(assets) => run_assets(client, assets).await,
        Command::Exchange(exchange) => run_exchange(client, exchange).await,
        Command::Families(families) => run_families(client, families).await,
        Command::Notifications(notifications) => run_notifications(client, notifications).await,
    }
}

async fn run_chores(client: &ApiClient, chores: ChoresCommand) -> Result<(), CliError> {
    match chores.command {
        ChoresSubcommand::List { assigned_to } => print_json(&chores::list_chores(client, assigned_to).await?),
        ChoresSubcommand::Create {
            name,
            points,
            assigned_to,
            schedule,
            start_date,
            end_mode,
            end_date,
            end_after,
        } => {
            let chore = NewChore { name, points, assigned_to, schedule, start_date, end_mode, end_date, end_after };
            print_json(&chores::create_chore(client, &chore).await?)
        }
        ChoresSubcommand::Delete { id } => {
            chores::delete_chore(client, id).await?;
            eprintln!("deleted chore {id}");
            Ok(())
        }
    }
}

async fn run_entries(client: &ApiClient, entries: EntriesCommand) -> Result<(), CliError> {
    match entries.command {
        EntriesSubcommand::List => print_json(&chores::list_entries(client).await?),
        EntriesSubcommand::Complete { id } => print_json(&chores::complete_entry(client, id).await?),
        EntriesSubcommand::Approve { id } => print_json(&chores::approve_entry(client, id).await?),
        EntriesSubcommand::Reject { id } => print_json(&chores::reject_entry(client, id).await?),
    }
}

async fn run_transactions(client: &ApiClient, transactions: TransactionsCommand) -> Result<(), CliError> {
    match transactions.command {
        TransactionsSubcommand::List { category } => print_json(&ledger::list_transactions(client, category).await?),
        TransactionsSubcommand::Categorize { id, category } => {
            print_json(&ledger::set_transaction_category(client, id, category).await?)
        }
    }
}

async fn run_accounts(client: &ApiClient, accounts: AccountsCommand) -> Result<(), CliError> {
    match accounts.command {
        AccountsSubcommand::List { owner } => print_json(&ledger::list_accounts(client, owner).await?),
        AccountsSubcommand::Create { name, kind, owner } => {
            print_json(&ledger::create_account(client, &NewAccount { name, kind, owner }).await?)
        }
        AccountsSubcommand::Delete { id } => {
            ledger::delete_account(client, id).await?;
            eprintln!("deleted account {id}");
            Ok(())
        }
    }
}

async fn run_assets(client: &ApiClient, command: AssetsCommand) -> Result<(), CliError> {
    match command.command {
        AssetsSubcommand::List => print_json(&assets::list_assets(client).await?),
        AssetsSubcommand::Prices { asset } => print_json(&assets::list_prices(client, asset).await?),
    }
}

async fn run_exchange(client: &ApiClient, command: ExchangeCommand) -> Result<(), CliError> {
    match command.command {
        ExchangeSubcommand::Orders { asset } => print_json(&exchange::list_orders(client, asset).await?),
        ExchangeSubcommand::Book { asset } => print_json(&exchange::order_book(client, asset).await?),
        ExchangeSubcommand::Trades { asset } => print_json(&exchange::list_trades(client, asset).await?),
        ExchangeSubcommand::Place { asset, side, quantity, price } => {
            let order = NewOrder { asset, side, quantity, price };
            print_json(&exchange::place_order(client, &order).await?)
        }
        ExchangeSubcommand::Cancel { id } => print_json(&exchange::cancel_order(client, id).await?),
    }
}

async fn run_families(client: &ApiClient, command: FamiliesCommand) -> Result<(), CliError> {
    match command.command {
        FamiliesSubcommand::List => print_json(&families::list_families(client).await?),
        FamiliesSubcommand::Create { name } => print_json(&families::create_family(client, &name).await?),
        FamiliesSubcommand::Rename { id, name } => print_json(&families::rename_family(client, id, &name).await?),
        FamiliesSubcommand::Delete { id } => {
            families::delete_family(client, id).await?;
            eprintln!("deleted family {id}");
            Ok(())
        }
        FamiliesSubcommand::Members => print_json(&families::list_memberships(client).await?),
        FamiliesSubcommand::Invitations => print_json(&families::list_invitations(client).await?),
        FamiliesSubcommand::Invite { family, email, role } => {
            let invitation = NewInvitation { email, family, role };
            print_json(&families::create_invitation(client, &invitation).await?)
        }
    }
}

async fn run_notifications(client: &ApiClient, command: NotificationsCommand) -> Result<(), CliError> {
    match command.command {
        NotificationsSubcommand::List => print_json(&notifications::list_notifications(client).await?),
        NotificationsSubcommand::Read { ids } => print_json(&notifications::mark_read(client, &ids).await?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
