//! CLI argument parsing for the storefront toolkit.
//!
//! Each subcommand owns a small args struct; `main` routes on [`Command`].
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default scope for `config:show` when `--scope` is omitted.
pub const DEFAULT_SCOPE: &str = "default";

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "sft",
    version,
    about = "Storefront maintenance toolkit",
    after_help = "Commands:\n  config:show [PATH] --root <dir>        Show resolved configuration values\n  validate:name --lastname <name>        Check customer names for allowed characters\n  validate:phone <value>                 Check a telephone number\n  bundle --source <dir>                  Collect AMD scripts into bundle files\n\nExamples:\n  sft config:show web/secure/base_url --scope websites --scope-code base\n  sft validate:name --firstname John --lastname \"O'Doe\"\n  sft validate:phone \"+1 (555) 010-0000\"\n  sft bundle --source pub/static --config bundle.json",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Emit debug logging to stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(name = "config:show")]
    ConfigShow(ConfigShowArgs),
    #[command(name = "validate:name")]
    ValidateName(ValidateNameArgs),
    #[command(name = "validate:phone")]
    ValidatePhone(ValidatePhoneArgs),
    Bundle(BundleArgs),
}

/// Inputs for resolving a configuration path.
#[derive(Parser, Debug)]
#[command(about = "Show configuration values for a path, scope, and scope code")]
pub struct ConfigShowArgs {
    /// Configuration path, e.g. web/secure/base_url (empty shows everything)
    #[arg(value_name = "PATH", default_value = "")]
    pub path: String,

    /// Scope: default, websites, or stores
    #[arg(long, default_value = DEFAULT_SCOPE)]
    pub scope: String,

    /// Website or store code for non-default scopes
    #[arg(long = "scope-code", value_name = "CODE")]
    pub scope_code: Option<String>,

    /// Store root containing app/etc and db
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,
}

/// Inputs for the customer name check.
#[derive(Parser, Debug)]
#[command(about = "Validate customer first, middle, and last names")]
pub struct ValidateNameArgs {
    #[arg(long)]
    pub firstname: Option<String>,

    #[arg(long)]
    pub middlename: Option<String>,

    #[arg(long)]
    pub lastname: Option<String>,

    /// JSON file with firstname/middlename/lastname fields
    #[arg(
        long,
        value_name = "PATH",
        conflicts_with_all = ["firstname", "middlename", "lastname"]
    )]
    pub customer: Option<PathBuf>,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

/// Inputs for the telephone check.
#[derive(Parser, Debug)]
#[command(about = "Validate a telephone number")]
pub struct ValidatePhoneArgs {
    /// Telephone value to check (omitted means no value)
    #[arg(value_name = "VALUE", conflicts_with = "payload")]
    pub value: Option<String>,

    /// JSON file holding the raw value (string, number, null, ...)
    #[arg(long, value_name = "PATH")]
    pub payload: Option<PathBuf>,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

/// Inputs for static asset bundling.
#[derive(Parser, Debug)]
#[command(about = "Collect AMD scripts from a static tree into bundle files")]
pub struct BundleArgs {
    /// Deployed static tree laid out as <area>/<vendor>/<theme>/<locale>/...
    #[arg(long, value_name = "DIR")]
    pub source: PathBuf,

    /// Output directory for bundle files (defaults to --source)
    #[arg(long, value_name = "DIR")]
    pub target: Option<PathBuf>,

    /// Bundle config JSON (part size and exclusions)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
