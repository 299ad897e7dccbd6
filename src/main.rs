use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

use finance_tracker::cli::{
    handle_budget_command, handle_history_command, handle_record_command, handle_register_command,
    handle_report_command, handle_user_command, password_or_prompt, BudgetCommands, CliContext,
    RecordCommands, ReportCommands, UserCommands,
};
use finance_tracker::config::{FinancePaths, Settings};
use finance_tracker::logging::init_tracing;
use finance_tracker::models::RecordKind;

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Personal finance tracker",
    long_about = "fintrack records expenses and income, tracks budgets with alert \
                  thresholds and writes category, budget and trend reports. Each \
                  user's data lives in its own files under the data directory."
)]
struct Cli {
    /// User to act as
    #[arg(short, long, global = true, env = "FINTRACK_USER")]
    user: Option<String>,

    /// Password; prompted for when not given
    #[arg(long, global = true, env = "FINTRACK_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user account
    Register {
        username: String,
        email: String,
    },

    /// Expense commands
    #[command(subcommand, alias = "exp")]
    Expense(RecordCommands),

    /// Income commands
    #[command(subcommand, alias = "inc")]
    Income(RecordCommands),

    /// Budget commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Reports and report files
    #[command(subcommand)]
    Report(ReportCommands),

    /// Profile commands
    #[command(subcommand)]
    User(UserCommands),

    /// Show recent changes to your data
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = FinancePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings.log_filter);

    let ctx = CliContext::open(paths, settings)?;

    let Some(command) = cli.command else {
        println!("fintrack - personal finance tracker");
        println!();
        println!("Run 'fintrack register <username> <email>' to create an account.");
        println!("Run 'fintrack --help' for usage information.");
        return Ok(());
    };

    match command {
        Commands::Register { username, email } => {
            handle_register_command(&ctx, &username, &email, cli.password)?;
        }
        Commands::Config => print_config(&ctx),
        command => {
            let user = cli
                .user
                .ok_or_else(|| anyhow!("No user given. Pass --user or set FINTRACK_USER"))?;
            let password = password_or_prompt(cli.password, &format!("Password for {}: ", user))?;
            ctx.authenticate(&user, &password)?;

            run_as(&ctx, &user, command)?;
        }
    }

    Ok(())
}

/// Run a command that needs an authenticated user
fn run_as(ctx: &CliContext, user: &str, command: Commands) -> Result<()> {
    match command {
        Commands::Expense(cmd) => handle_record_command(ctx, RecordKind::Expense, user, cmd)?,
        Commands::Income(cmd) => handle_record_command(ctx, RecordKind::Income, user, cmd)?,
        Commands::Budget(cmd) => handle_budget_command(ctx, user, cmd)?,
        Commands::Report(cmd) => handle_report_command(ctx, user, cmd)?,
        Commands::User(cmd) => handle_user_command(ctx, user, cmd)?,
        Commands::History { limit } => handle_history_command(ctx, user, limit)?,
        // Handled before login
        Commands::Register { .. } | Commands::Config => {}
    }
    Ok(())
}

fn print_config(ctx: &CliContext) {
    let settings = &ctx.settings;

    println!("fintrack Configuration");
    println!("======================");
    println!("Base directory:   {}", ctx.paths.base_dir().display());
    println!("Data directory:   {}", ctx.paths.data_dir().display());
    println!("Reports:          {}", ctx.paths.reports_root().display());
    println!("Audit log:        {}", ctx.paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol:  {}", settings.currency_symbol);
    println!("  Default period:   {}", settings.default_period);
    println!("  Alert threshold:  {}", settings.default_alert_threshold);
    println!("  Trend months:     {}", settings.trend_months);
    println!("  Report format:    {}", settings.report_format);
    println!("  Log filter:       {}", settings.log_filter);
}
