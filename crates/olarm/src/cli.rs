use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "olarm",
    version,
    about = "Poll and control Olarm alarm panels from the command line"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Olarm API key (or set `api_key` in the config file).
    #[arg(long, global = true, env = "OLARM_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Override the API base URL.
    #[arg(long, global = true, hide = true)]
    pub base_url: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the devices visible to this API key.
    Devices,

    /// Verify that the configured API key works.
    Check,

    /// Fetch and print one decoded state snapshot.
    Status { device_id: String },

    /// Poll a device on a fixed cadence and print state changes.
    Watch {
        device_id: String,

        /// Seconds between poll cycles (floor: 60 -- the API rate-limits
        /// aggressively).
        #[arg(long, default_value_t = 60)]
        interval: u64,
    },

    /// Arm an area (away).
    Arm {
        device_id: String,
        #[arg(long, default_value_t = 1)]
        area: u32,
    },

    /// Arm an area in stay mode.
    Stay {
        device_id: String,
        #[arg(long, default_value_t = 1)]
        area: u32,
    },

    /// Arm an area in sleep mode.
    Sleep {
        device_id: String,
        #[arg(long, default_value_t = 1)]
        area: u32,
    },

    /// Disarm an area.
    Disarm {
        device_id: String,
        #[arg(long, default_value_t = 1)]
        area: u32,
    },

    /// Bypass a zone.
    Bypass {
        device_id: String,
        #[arg(long)]
        zone: u32,
    },

    /// Drive a programmable output.
    Pgm {
        device_id: String,
        #[arg(long)]
        num: u32,
        verb: PgmVerb,
    },

    /// Activate a utility key.
    Ukey {
        device_id: String,
        #[arg(long)]
        num: u32,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PgmVerb {
    Open,
    Close,
    Pulse,
}
