//! CLI commands

use anyhow::{Context as _, Result, bail};
use chrono::{NaiveDateTime, Utc};
use clap::{Args, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use voucherify_core::{
    Access, ClientConfig, FileTokenStore, Identity, Notification, NotificationKind, Notifier, Role,
    SessionStore, TokenStore, authorize, dashboard_for,
};
use voucherify_http::types::{Campaign, CampaignForm, CampaignStatus, NewVoucher, RegisterRequest, VoucherKind};
use voucherify_http::{ApiGateway, ApiGatewayBuilder, ClientError};

use crate::config::{self, StateDir};

type Gateway = ApiGateway<FileTokenStore, ConsoleNotifier>;

const USER_AGENT: &str = concat!("voucherify-cli/", env!("CARGO_PKG_VERSION"));

/// Prints notifications to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    fn render(notification: &Notification) -> String {
        let prefix = match notification.kind {
            NotificationKind::Success => "ok",
            NotificationKind::Error => "error",
            NotificationKind::Info => "info",
        };
        format!("[{prefix}] {}", notification.message)
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        eprintln!("{}", Self::render(&notification));
    }
}

/// Resolved settings every command runs with
pub struct Context {
    pub state: StateDir,
    pub config: ClientConfig,
}

impl Context {
    fn gateway(&self) -> Result<Gateway> {
        let mut builder = ApiGatewayBuilder::new()
            .base_url(&self.config.base_url)
            .user_agent(USER_AGENT);
        if let Some(secs) = self.config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(builder.build(self.state.token_store(&self.config), ConsoleNotifier)?)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the access token
    Login {
        email: String,

        #[arg(long, env = "VOUCHERIFY_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account
    Register {
        email: String,

        #[arg(long, env = "VOUCHERIFY_PASSWORD", hide_env_values = true)]
        password: String,

        /// Account role (ADMIN or CUSTOMER)
        #[arg(long, default_value = "CUSTOMER")]
        role: Role,
    },

    /// Forget the stored access token
    Logout,

    /// Show the identity in the stored token
    Whoami,

    /// Manage campaigns (admin)
    Campaigns {
        #[command(subcommand)]
        command: CampaignCommands,
    },

    /// Manage vouchers (admin)
    Vouchers {
        #[command(subcommand)]
        command: VoucherCommands,
    },

    /// Find the best vouchers for a purchase amount (customer)
    BestVouchers {
        amount: f64,

        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },

    /// Redeem a voucher by code (customer)
    Redeem { code: String },

    /// Inspect or generate configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum CampaignCommands {
    /// List campaigns with their vouchers
    List {
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a campaign
    Create {
        #[command(flatten)]
        campaign: CampaignArgs,
    },

    /// Update a campaign; omitted fields keep their current value
    Update {
        id: String,

        #[command(flatten)]
        changes: CampaignChanges,
    },

    /// Delete a campaign
    Delete { id: String },
}

#[derive(Args)]
pub struct CampaignArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    description: String,

    /// Start, as YYYY-MM-DDTHH:MM
    #[arg(long, value_parser = parse_datetime)]
    start: String,

    /// End, as YYYY-MM-DDTHH:MM
    #[arg(long, value_parser = parse_datetime)]
    end: String,

    #[arg(long, value_parser = parse_status, default_value = "ACTIVE")]
    status: CampaignStatus,
}

impl From<CampaignArgs> for CampaignForm {
    fn from(args: CampaignArgs) -> Self {
        Self {
            name: args.name,
            description: args.description,
            start_date: args.start,
            end_date: args.end,
            status: args.status,
        }
    }
}

#[derive(Args, Default)]
pub struct CampaignChanges {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    description: Option<String>,

    #[arg(long, value_parser = parse_datetime)]
    start: Option<String>,

    #[arg(long, value_parser = parse_datetime)]
    end: Option<String>,

    #[arg(long, value_parser = parse_status)]
    status: Option<CampaignStatus>,
}

impl CampaignChanges {
    fn apply(self, mut form: CampaignForm) -> CampaignForm {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(start) = self.start {
            form.start_date = start;
        }
        if let Some(end) = self.end {
            form.end_date = end;
        }
        if let Some(status) = self.status {
            form.status = status;
        }
        form
    }
}

#[derive(Subcommand)]
pub enum VoucherCommands {
    /// Add a voucher to a campaign
    Create {
        #[arg(long)]
        campaign: String,

        #[arg(long)]
        code: String,

        /// PERCENTAGE or AMOUNT
        #[arg(long, value_parser = parse_kind, default_value = "PERCENTAGE")]
        kind: VoucherKind,

        #[arg(long)]
        value: f64,

        #[arg(long)]
        max_limit: Option<f64>,

        #[arg(long)]
        max_discount: Option<f64>,

        #[arg(long, default_value_t = NewVoucher::DEFAULT_MAX_USAGE_PER_USER)]
        max_usage_per_user: u32,

        #[arg(long, default_value_t = NewVoucher::DEFAULT_TOTAL_USAGES)]
        total_usages: u32,

        /// Expiry, as YYYY-MM-DDTHH:MM
        #[arg(long, value_parser = parse_datetime)]
        expires: Option<String>,
    },

    /// Delete a voucher
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Output file path (defaults to the config directory)
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn parse_datetime(value: &str) -> Result<String, String> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .map(|_| value.to_string())
        .map_err(|e| format!("expected YYYY-MM-DDTHH:MM: {e}"))
}

fn parse_status(value: &str) -> Result<CampaignStatus, String> {
    CampaignStatus::parse(value).ok_or_else(|| format!("unknown campaign status '{value}'"))
}

fn parse_kind(value: &str) -> Result<VoucherKind, String> {
    VoucherKind::parse(value).ok_or_else(|| format!("unknown voucher type '{value}'"))
}

/// Check the stored session may run a command open to `allowed`
fn require_role<S: TokenStore>(session: &SessionStore<S>, allowed: &[Role]) -> Result<Identity> {
    match authorize(session.read().as_deref(), allowed) {
        Access::Allow { identity } => {
            if identity.is_expired_at(Utc::now().timestamp()) {
                warn!(role = %identity.role, "Access token has expired; the backend may reject it");
            }
            Ok(identity)
        }
        Access::Redirect { reason, .. } => {
            bail!("Not allowed: {reason}. Run `voucherify login` with a suitable account")
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_campaign(campaign: &Campaign) {
    println!("{}  {} [{}]", campaign.id, campaign.name, campaign.status);
    if !campaign.description.is_empty() {
        println!("    {}", campaign.description);
    }
    println!(
        "    {} -> {}",
        campaign.start_date.as_deref().unwrap_or("-"),
        campaign.end_date.as_deref().unwrap_or("-")
    );
    for voucher in &campaign.vouchers {
        println!(
            "    - {} {} ({}) uses {}/{} id={}",
            voucher.code,
            voucher.display_value(),
            voucher.status,
            voucher.current_usage,
            voucher.total_usages,
            voucher.id
        );
    }
}

/// Turn an API error into a command failure, adding `what` as context
fn failed(e: ClientError, what: &'static str) -> anyhow::Error {
    let message = e.user_message(what);
    anyhow::Error::new(e).context(message)
}

impl Commands {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        match self {
            Commands::Login { email, password } => login(ctx, email, password).await,
            Commands::Register {
                email,
                password,
                role,
            } => {
                let gateway = ctx.gateway()?;
                let request = RegisterRequest {
                    email,
                    password,
                    role,
                };
                gateway
                    .register(&request)
                    .await
                    .map_err(|e| failed(e, "Registration failed. Please try again."))?;
                println!("Registration successful. Please login.");
                Ok(())
            }
            Commands::Logout => {
                ctx.gateway()?.session().remove();
                println!("Logged out");
                Ok(())
            }
            Commands::Whoami => whoami(ctx),
            Commands::Campaigns { command } => command.execute(ctx).await,
            Commands::Vouchers { command } => command.execute(ctx).await,
            Commands::BestVouchers { amount, json } => {
                if !amount.is_finite() || amount < 0.0 {
                    bail!("Please enter a valid amount");
                }
                let gateway = ctx.gateway()?;
                require_role(gateway.session(), &[Role::Customer])?;

                let vouchers = gateway
                    .best_vouchers(amount)
                    .await
                    .map_err(|e| failed(e, "Failed to fetch vouchers"))?;

                if json {
                    return print_json(&vouchers);
                }
                if vouchers.is_empty() {
                    println!("No vouchers found. Try searching with a different amount.");
                }
                for voucher in &vouchers {
                    let max_discount = voucher
                        .max_discount
                        .filter(|d| *d > 0.0)
                        .map(|d| format!(", max ${d}"))
                        .unwrap_or_default();
                    println!(
                        "{}  {}{} [{}] {} uses left",
                        voucher.code,
                        voucher.display_value(),
                        max_discount,
                        voucher.status,
                        voucher.uses_left()
                    );
                }
                Ok(())
            }
            Commands::Redeem { code } => {
                let gateway = ctx.gateway()?;
                require_role(gateway.session(), &[Role::Customer])?;
                gateway
                    .redeem_voucher(code)
                    .await
                    .map_err(|e| failed(e, "Failed to redeem voucher"))?;
                println!("Voucher redeemed successfully!");
                Ok(())
            }
            Commands::Config { command } => command.execute(ctx),
        }
    }
}

async fn login(ctx: &Context, email: String, password: String) -> Result<()> {
    let gateway = ctx.gateway()?;
    let response = gateway
        .login(email, password)
        .await
        .map_err(|e| failed(e, "Login failed. Please check your credentials."))?;

    let Some(token) = response.access_token.filter(|t| !t.is_empty()) else {
        bail!("Login failed. No access token received.");
    };

    let session = gateway.session();
    session.save(&token);
    let Some(identity) = session.decode(&token) else {
        bail!("Invalid token received.");
    };

    info!(role = %identity.role, "Logged in");
    println!("Login successful!");
    println!("Role: {}", identity.role);
    println!("Dashboard: {}", dashboard_for(&identity.role));
    Ok(())
}

fn whoami(ctx: &Context) -> Result<()> {
    let store = ctx.state.token_store(&ctx.config);
    let session = SessionStore::new(store);

    if !session.is_authenticated() {
        println!("Not logged in");
        return Ok(());
    }
    let Some(identity) = session.identity() else {
        bail!("Stored access token could not be decoded; run `voucherify logout`");
    };

    println!("Role: {}", identity.role);
    if let Some(email) = &identity.email {
        println!("Email: {email}");
    }
    if let Some(sub) = &identity.sub {
        println!("Subject: {sub}");
    }
    if let Some(expires) = identity.expires_at() {
        let expired = identity.is_expired_at(Utc::now().timestamp());
        println!(
            "Expires: {}{}",
            expires.to_rfc3339(),
            if expired { " (expired)" } else { "" }
        );
    }
    Ok(())
}

impl CampaignCommands {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        let gateway = ctx.gateway()?;
        require_role(gateway.session(), &[Role::Admin])?;

        match self {
            CampaignCommands::List { json } => {
                let campaigns = gateway
                    .list_campaigns()
                    .await
                    .map_err(|e| failed(e, "Failed to fetch campaigns"))?;
                if json {
                    return print_json(&campaigns);
                }
                if campaigns.is_empty() {
                    println!("No campaigns");
                }
                campaigns.iter().for_each(print_campaign);
                Ok(())
            }
            CampaignCommands::Create { campaign } => {
                gateway
                    .create_campaign(&campaign.into())
                    .await
                    .map_err(|e| failed(e, "Failed to create campaign"))?;
                println!("Campaign created successfully");
                Ok(())
            }
            CampaignCommands::Update { id, changes } => {
                let campaigns = gateway
                    .list_campaigns()
                    .await
                    .map_err(|e| failed(e, "Failed to fetch campaigns"))?;
                let current = campaigns
                    .iter()
                    .find(|c| c.id == id)
                    .with_context(|| format!("No campaign with id {id}"))?;

                let form = changes.apply(current.to_form());
                gateway
                    .update_campaign(&id, &form)
                    .await
                    .map_err(|e| failed(e, "Failed to update campaign"))?;
                println!("Campaign updated successfully");
                Ok(())
            }
            CampaignCommands::Delete { id } => {
                gateway
                    .delete_campaign(&id)
                    .await
                    .map_err(|e| failed(e, "Failed to delete campaign"))?;
                println!("Campaign deleted successfully");
                Ok(())
            }
        }
    }
}

impl VoucherCommands {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        let gateway = ctx.gateway()?;
        require_role(gateway.session(), &[Role::Admin])?;

        match self {
            VoucherCommands::Create {
                campaign,
                code,
                kind,
                value,
                max_limit,
                max_discount,
                max_usage_per_user,
                total_usages,
                expires,
            } => {
                let mut voucher = NewVoucher::new(campaign, code, kind, value);
                voucher.max_limit = max_limit;
                voucher.max_discount = max_discount;
                voucher.max_usage_per_user = max_usage_per_user;
                voucher.total_usages = total_usages;
                voucher.expiration_date = expires;

                gateway
                    .create_voucher(&voucher)
                    .await
                    .map_err(|e| failed(e, "Failed to create voucher"))?;
                println!("Voucher created successfully");
                Ok(())
            }
            VoucherCommands::Delete { id } => {
                gateway
                    .delete_voucher(&id)
                    .await
                    .map_err(|e| failed(e, "Failed to delete voucher"))?;
                println!("Voucher deleted successfully");
                Ok(())
            }
        }
    }
}

impl ConfigCommands {
    pub fn execute(self, ctx: &Context) -> Result<()> {
        match self {
            ConfigCommands::Show => {
                print_json(&ctx.config)?;
                let store = ctx.state.token_store(&ctx.config);
                println!("Config file: {}", ctx.state.config_file().display());
                println!("Token file: {}", store.path().display());
                Ok(())
            }
            ConfigCommands::Init { output, force } => {
                let path = output.unwrap_or_else(|| ctx.state.config_file());
                if path.exists() && !force {
                    bail!("{} already exists; pass --force to overwrite", path.display());
                }
                config::generate_default_config(&path)?;
                println!("Generated configuration at: {}", path.display());
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use voucherify_core::MemoryTokenStore;
    use voucherify_core::tests::encode_token;

    fn session_with(token: Option<String>) -> SessionStore<MemoryTokenStore> {
        let session = SessionStore::new(MemoryTokenStore::new());
        if let Some(token) = token {
            session.save(&token);
        }
        session
    }

    #[test]
    fn test_require_role_without_session() {
        let err = require_role(&session_with(None), &[Role::Admin]).unwrap_err();
        assert!(err.to_string().contains("no access token"));
        assert!(err.to_string().contains("voucherify login"));
    }

    #[test]
    fn test_require_role_checks_role() {
        let customer = session_with(Some(encode_token(&json!({ "role": "CUSTOMER" }))));
        assert!(require_role(&customer, &[Role::Admin]).is_err());

        let identity = require_role(&customer, &[Role::Customer]).unwrap();
        assert_eq!(identity.role, Role::Customer);
    }

    #[test]
    fn test_require_role_admits_expired_token() {
        let admin = session_with(Some(encode_token(&json!({ "role": "ADMIN", "exp": 1 }))));
        assert!(require_role(&admin, &[Role::Admin]).is_ok());
    }

    #[test]
    fn test_gateway_uses_resolved_config() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let ctx = Context {
            state: StateDir::with_override(temp_dir.path()),
            config: ClientConfig::with_base_url("http://localhost:4000/"),
        };

        let gateway = ctx.gateway().unwrap();
        assert_eq!(gateway.base_url(), "http://localhost:4000");
        assert!(!gateway.session().is_authenticated());
        assert!(USER_AGENT.starts_with("voucherify-cli/"));
    }

    #[test]
    fn test_campaign_changes_keep_unset_fields() {
        let current = CampaignForm {
            name: "Summer".into(),
            description: "Sale".into(),
            start_date: "2024-06-01T09:30".into(),
            end_date: "2024-06-30T18:00".into(),
            status: CampaignStatus::Active,
        };
        let changes = CampaignChanges {
            name: Some("Winter".into()),
            status: Some(CampaignStatus::Scheduled),
            ..CampaignChanges::default()
        };

        let updated = changes.apply(current.clone());
        assert_eq!(updated.name, "Winter");
        assert_eq!(updated.status, CampaignStatus::Scheduled);
        assert_eq!(updated.description, current.description);
        assert_eq!(updated.start_date, current.start_date);
        assert_eq!(updated.end_date, current.end_date);
    }

    #[test]
    fn test_value_parsers() {
        assert_eq!(parse_datetime("2024-12-31T23:59").unwrap(), "2024-12-31T23:59");
        assert!(parse_datetime("31/12/2024").is_err());
        assert_eq!(parse_status("inactive"), Ok(CampaignStatus::Inactive));
        assert!(parse_status("PAUSED").is_err());
        assert_eq!(parse_kind("amount"), Ok(VoucherKind::Amount));
    }

    #[test]
    fn test_console_notifier_render() {
        assert_eq!(
            ConsoleNotifier::render(&Notification::error("Session expired. Please refresh the page")),
            "[error] Session expired. Please refresh the page"
        );
        assert_eq!(ConsoleNotifier::render(&Notification::success("done")), "[ok] done");
    }
}
