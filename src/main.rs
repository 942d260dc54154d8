// src/main.rs
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use redemption_console::api::{ApiClient, RedemptionApi};
use redemption_console::editor::{field_messages, QUOTA_PRESETS};
use redemption_console::i18n::Catalog;
use redemption_console::quota::QuotaFormatter;
use redemption_console::{AppConfig, RedemptionEditor, SubmitOutcome};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod terminal;

use terminal::{parse_expiry, TerminalHost};

#[derive(Debug, Parser)]
#[command(name = "redemption-console", version, about = "Create and edit redemption codes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List selectable subscription plans
    Plans,
    /// List the quota presets accepted by `--quota`
    Quotas,
    /// Generate new redemption codes
    Create(CreateArgs),
    /// Update an existing redemption code
    Edit(EditArgs),
}

#[derive(Debug, Args)]
struct CreateArgs {
    /// Redemption name; derived from the plan or quota when omitted
    #[arg(long)]
    name: Option<String>,

    /// Quota granted per code, or a preset label such as "10$" (ignored
    /// when a plan is set)
    #[arg(long)]
    quota: Option<String>,

    /// Subscription plan id granted instead of quota
    #[arg(long)]
    plan: Option<i64>,

    /// Number of codes to generate
    #[arg(long)]
    count: Option<String>,

    /// Expiry time (RFC 3339, "YYYY-MM-DD HH:MM:SS" or "YYYY-MM-DD", UTC)
    #[arg(long)]
    expires: Option<String>,

    /// Save the generated codes without asking
    #[arg(long, short = 'y')]
    yes: bool,
}

#[derive(Debug, Args)]
struct EditArgs {
    /// Redemption id
    id: i64,

    #[arg(long)]
    name: Option<String>,

    /// Quota or preset label
    #[arg(long)]
    quota: Option<String>,

    #[arg(long, conflicts_with = "clear_plan")]
    plan: Option<i64>,

    /// Switch the code back to quota
    #[arg(long)]
    clear_plan: bool,

    #[arg(long, conflicts_with = "never_expires")]
    expires: Option<String>,

    /// Remove the expiry time
    #[arg(long)]
    never_expires: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load().context("Failed to load configuration")?;
    info!("Backend: {}", config.api.base_url);

    let api: Arc<dyn RedemptionApi> =
        Arc::new(ApiClient::from_config(&config.api).context("Failed to create API client")?);

    let auto_confirm = matches!(&cli.command, Commands::Create(args) if args.yes);
    let host = TerminalHost::new(config.export.directory.clone(), auto_confirm);

    let formatter = QuotaFormatter::from_config(&config.display);
    let mut editor = RedemptionEditor::new(api, host)
        .with_localizer(Box::new(Catalog::from_locale(&config.display.locale)))
        .with_formatter(formatter);

    match cli.command {
        Commands::Quotas => {
            for (quota, label) in QUOTA_PRESETS {
                println!("{:>6}  {:>12}  {}", label, quota, formatter.render(quota));
            }
            Ok(())
        }
        Commands::Plans => {
            editor.reload_plans().await;
            if editor.host().error_count() > 0 {
                bail!("could not load plans");
            }
            for option in editor.plan_options() {
                println!("{:>6}  {}", option.value, option.label);
            }
            Ok(())
        }
        Commands::Create(args) => {
            editor.open(None).await;
            apply_create_args(&mut editor, args)?;
            show_quota_hint(&editor);
            submit(&mut editor).await
        }
        Commands::Edit(args) => {
            // A failed plan load only empties the selector; a failed record load aborts
            if !editor.open(Some(args.id)).await {
                bail!("could not load redemption {}", args.id);
            }
            apply_edit_args(&mut editor, args)?;
            show_quota_hint(&editor);
            submit(&mut editor).await
        }
    }
}

fn apply_create_args(
    editor: &mut RedemptionEditor<TerminalHost>,
    args: CreateArgs,
) -> Result<()> {
    let form = editor.form_mut();
    if let Some(name) = args.name {
        form.set_name(name);
    }
    if let Some(quota) = args.quota {
        form.set_quota_input(&quota);
    }
    if let Some(plan) = args.plan {
        form.set_plan(Some(plan));
    }
    if let Some(count) = args.count {
        form.set_count(count);
    }
    if let Some(expires) = args.expires {
        form.set_expired_time(Some(parse_expiry(&expires)?));
    }
    Ok(())
}

fn apply_edit_args(editor: &mut RedemptionEditor<TerminalHost>, args: EditArgs) -> Result<()> {
    let form = editor.form_mut();
    if let Some(name) = args.name {
        form.set_name(name);
    }
    if let Some(quota) = args.quota {
        form.set_quota_input(&quota);
    }
    if args.clear_plan {
        form.set_plan(None);
    } else if let Some(plan) = args.plan {
        form.set_plan(Some(plan));
    }
    if args.never_expires {
        form.set_expired_time(None);
    } else if let Some(expires) = args.expires {
        form.set_expired_time(Some(parse_expiry(&expires)?));
    }
    Ok(())
}

fn show_quota_hint(editor: &RedemptionEditor<TerminalHost>) {
    if !editor.form().quota_visible() {
        return;
    }
    let hint = editor.quota_hint();
    if !hint.is_empty() {
        eprintln!("{}", hint);
    }
}

async fn submit(editor: &mut RedemptionEditor<TerminalHost>) -> Result<()> {
    let outcome = match editor.submit().await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(code = e.error_code(), "Submission failed: {}", e);
            return Err(e.into());
        }
    };

    match outcome {
        SubmitOutcome::Invalid(errors) => {
            for (field, message) in field_messages(&errors) {
                eprintln!("{}: {}", field, message);
            }
            bail!("invalid redemption fields");
        }
        SubmitOutcome::Rejected { message } => bail!("{}", message),
        SubmitOutcome::Updated => Ok(()),
        SubmitOutcome::Created { name, codes, exported } => {
            info!(
                "Created {} code(s) for \"{}\", exported={}",
                codes.len(),
                name,
                exported
            );
            if !exported {
                for code in &codes {
                    println!("{}", code);
                }
            }
            Ok(())
        }
    }
}
