mod config;
mod telemetry;

use anyhow::Context;
use clap::Parser;
use config::{CliArgs, Command, RunConfig};
use telemetry::init_telemetry;
use uniqid::{UniqIdClient, UniqueId, label_to_hex};

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = RunConfig::try_from(args)?;

    init_telemetry()?;

    tracing::debug!("Starting with config: {config:#?}");
    // Decoding is offline; skip binding a socket for it.
    let client = match config.command {
        Command::Decode { .. } => None,
        _ => Some(UniqIdClient::connect(&config.client)?),
    };
    for _ in 0..config.count {
        run_once(client.as_ref(), &config)?;
    }
    Ok(())
}

fn run_once(client: Option<&UniqIdClient>, config: &RunConfig) -> anyhow::Result<()> {
    let client = || client.context("no agent connection for this command");
    match config.command {
        Command::Label => {
            let label = client()?.get_label()?;
            println!("{}", label_to_hex(label, config.uppercase));
        }
        Command::Seq => println!("{}", client()?.get_sequence()?),
        Command::LabelSeq => {
            let (label, seq) = client()?.get_label_and_sequence()?;
            println!("{} {seq}", label_to_hex(label, config.uppercase));
        }
        Command::Id { user, seconds } => {
            print_id(client()?.get_unique_id(user, seconds)?, config.uppercase);
        }
        Command::LocalId { user, seconds } => {
            print_id(client()?.get_local_unique_id(user, seconds)?, config.uppercase);
        }
        Command::Decode { id } => print_id(UniqueId::from_raw(id), config.uppercase),
    }
    Ok(())
}

fn print_id(id: UniqueId, uppercase: bool) {
    println!(
        "{id} user={} label={} time={:04}-{:02}-{:02}T{:02} seq={}",
        id.user(),
        label_to_hex(id.label(), uppercase),
        id.year(),
        id.month(),
        id.day(),
        id.hour(),
        id.sequence()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(args: &[&str]) -> RunConfig {
        let args = CliArgs::try_parse_from(args).unwrap();
        RunConfig::try_from(args).unwrap()
    }

    #[test]
    fn decode_runs_without_a_client() {
        let config = config(&["uniqid-cli", "--agents", "127.0.0.1:6200", "decode", "42"]);
        run_once(None, &config).unwrap();
    }

    #[test]
    fn agent_commands_need_a_client() {
        let config = config(&["uniqid-cli", "--agents", "127.0.0.1:6200", "label"]);
        let err = run_once(None, &config).unwrap_err();
        assert!(err.to_string().contains("no agent connection"), "{err}");
    }
}
