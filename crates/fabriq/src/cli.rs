//! Clap derive structures for the `fabriq` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// fabriq -- read-only CLI for multi-site fabric orchestrators
#[derive(Debug, Parser)]
#[command(
    name = "fabriq",
    version,
    about = "Inspect multi-site fabric orchestrator schemas from the command line",
    long_about = "A read-only CLI for multi-site network fabric orchestrators.\n\n\
        Walks the schema tree (templates, ANPs, VRFs, bridge domains, EPGs,\n\
        static ports) and flattens it into tabular or JSON records.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Orchestrator base URL
    #[arg(long, short = 'c', env = "FABRIQ_CONTROLLER", global = true)]
    pub controller: Option<String>,

    /// Username to authenticate with
    #[arg(long, short = 'u', env = "FABRIQ_USER", global = true)]
    pub user: Option<String>,

    /// Password to authenticate with
    #[arg(long, env = "FABRIQ_PASSWORD", global = true, hide_env = true)]
    pub password: Option<String>,

    /// Login domain
    #[arg(long, env = "FABRIQ_LOGIN_DOMAIN", global = true)]
    pub login_domain: Option<String>,

    /// Orchestrator platform variant
    #[arg(long, env = "FABRIQ_PLATFORM", global = true, value_enum)]
    pub platform: Option<PlatformArg>,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "FABRIQ_INSECURE", global = true)]
    pub insecure: bool,

    /// HTTP(S) forward proxy URL
    #[arg(long, env = "FABRIQ_PROXY", global = true)]
    pub proxy: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "FABRIQ_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "FABRIQ_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Platform Enums ──────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PlatformArg {
    /// Nexus Dashboard hosted orchestrator
    Nd,
    /// Standalone orchestrator (legacy login flow)
    Mso,
}

impl From<PlatformArg> for fabriq_api::Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Nd => Self::Nd,
            PlatformArg::Mso => Self::Mso,
        }
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List templates across all schemas
    #[command(alias = "tpl")]
    Templates,

    /// List application network profiles
    Anps,

    /// List VRFs
    Vrfs,

    /// List bridge domains
    Bds,

    /// List endpoint groups
    Epgs,

    /// List static port bindings under site-local EPGs
    #[command(alias = "ports")]
    StaticPorts,
}
