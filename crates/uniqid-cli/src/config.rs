use anyhow::bail;
use clap::{Parser, Subcommand};
use std::time::Duration;
use uniqid::ClientConfig;

/// Command-line arguments for the `uniqid-cli` binary.
///
/// Connection settings fall back to environment variables (also read from a
/// `.env` file), so scripts can export them once and issue many calls.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "uniqid-cli",
    version,
    about = "Fetch labels, sequences and unique IDs from UDP agents"
)]
pub struct CliArgs {
    /// Comma-separated agent addresses, e.g. `10.0.0.1:6200,10.0.0.2:6200`.
    ///
    /// Environment variable: `UNIQID_AGENTS`
    #[arg(long, env = "UNIQID_AGENTS")]
    pub agents: String,

    /// How long to wait for each reply, in milliseconds.
    ///
    /// Environment variable: `UNIQID_TIMEOUT_MS`
    #[arg(long, env = "UNIQID_TIMEOUT_MS", default_value_t = 200)]
    pub timeout_ms: u64,

    /// Attempts per request before giving up on transport failures.
    ///
    /// Environment variable: `UNIQID_MAX_ATTEMPTS`
    #[arg(long, env = "UNIQID_MAX_ATTEMPTS", default_value_t = 3)]
    pub max_attempts: u8,

    /// Number of times to repeat the command.
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: u32,

    /// Print labels in uppercase hex.
    #[arg(long, default_value_t = false)]
    pub uppercase: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Ask an agent for its label.
    Label,
    /// Ask an agent for a sequence value.
    Seq,
    /// Ask an agent for a label and a sequence value in one round trip.
    LabelSeq,
    /// Ask an agent to compose a unique ID.
    Id {
        /// Caller tag stored in the top byte.
        #[arg(long, default_value_t = 0)]
        user: u8,
        /// Epoch seconds to stamp; 0 means now.
        #[arg(long, default_value_t = 0)]
        seconds: u64,
    },
    /// Fetch a label and sequence, then compose the ID locally.
    LocalId {
        #[arg(long, default_value_t = 0)]
        user: u8,
        #[arg(long, default_value_t = 0)]
        seconds: u64,
    },
    /// Print the fields of a raw 64-bit ID without contacting any agent.
    Decode { id: u64 },
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub client: ClientConfig,
    pub count: u32,
    pub uppercase: bool,
    pub command: Command,
}

impl TryFrom<CliArgs> for RunConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.count == 0 {
            bail!("--count must be greater than 0");
        }

        let client = ClientConfig::new(
            &args.agents,
            Duration::from_millis(args.timeout_ms),
            args.max_attempts,
        )?;

        Ok(Self {
            client,
            count: args.count,
            uppercase: args.uppercase,
            command: args.command,
        })
    }
}
