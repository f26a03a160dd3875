//! Command-line arguments and command execution.

use std::io::{BufRead, Write};

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use coin_address::{
    diagnose, hrp_for, prefixes_for, priority, CanonicalAddress, Family, Hrp, NetworkId, PrefixSet,
};
use serde::Serialize;

use crate::config::CliConfig;
use crate::error::CliError;

/// Classify cryptocurrency addresses and print one JSON object per input.
#[derive(Debug, Parser)]
#[command(name = "coin-address", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List every network with its prefixes, HRP and codec order.
    Networks,
    /// Classify addresses, or each stdin line when none are given.
    ///
    /// The network may be left out when COIN_ADDRESS_NETWORK is set.
    Check {
        /// Network identifier, e.g. `bitcoin` or `xrp`.
        network: Option<String>,
        /// Addresses to classify.
        addresses: Vec<String>,
    },
}

/// A command with its network resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Networks,
    Check {
        network: NetworkId,
        addresses: Vec<String>,
    },
}

impl Command {
    /// Resolve the `check` network against the configured default.
    ///
    /// A first argument that is not a network name is taken as an address of
    /// the default network, unless it is a bare word that the default network
    /// rejects, which is reported as an unknown network.
    pub fn resolve(self, config: &CliConfig) -> Result<Action, clap::Error> {
        let (first, mut addresses) = match self {
            Command::Networks => return Ok(Action::Networks),
            Command::Check { network, addresses } => (network, addresses),
        };

        let Some(first) = first else {
            return match config.default_network {
                Some(network) => Ok(Action::Check { network, addresses }),
                None => Err(missing_network()),
            };
        };

        if let Ok(network) = first.parse::<NetworkId>() {
            return Ok(Action::Check { network, addresses });
        }

        let Some(network) = config.default_network else {
            return Err(Cli::command().error(
                ErrorKind::InvalidValue,
                format!("unknown network '{}'", first),
            ));
        };

        let bare_word = !first.is_empty() && first.bytes().all(|b| b.is_ascii_alphabetic());
        if bare_word && !network.is_valid_address(&first) {
            return Err(Cli::command().error(
                ErrorKind::InvalidValue,
                format!(
                    "unknown network '{}' (not a {} address either)",
                    first, network
                ),
            ));
        }

        addresses.insert(0, first);
        Ok(Action::Check { network, addresses })
    }
}

fn missing_network() -> clap::Error {
    Cli::command().error(
        ErrorKind::MissingRequiredArgument,
        "no network given and COIN_ADDRESS_NETWORK is not set",
    )
}

/// One line of `networks` output.
#[derive(Debug, Serialize)]
struct NetworkReport {
    network: NetworkId,
    prefixes: PrefixSet,
    hrp: Hrp,
    priority: Vec<Family>,
}

/// One line of `check` output.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub network: NetworkId,
    pub input: String,
    pub valid: bool,
    pub canonical: Option<String>,
    pub address: Option<CanonicalAddress>,
    pub error: Option<String>,
}

impl CheckReport {
    pub fn new(network: NetworkId, input: &str) -> Self {
        match diagnose(network, input) {
            Ok(address) => Self {
                network,
                input: input.to_string(),
                valid: true,
                canonical: Some(address.to_string()),
                address: Some(address),
                error: None,
            },
            Err(e) => Self::rejected(network, input, e.to_string()),
        }
    }

    fn rejected(network: NetworkId, input: &str, error: String) -> Self {
        Self {
            network,
            input: input.to_string(),
            valid: false,
            canonical: None,
            address: None,
            error: Some(error),
        }
    }
}

/// Run `action`, writing JSON lines to `out`. Returns whether every
/// checked input was valid.
pub fn run<R: BufRead, W: Write>(
    action: &Action,
    config: &CliConfig,
    mut input: R,
    mut out: W,
) -> Result<bool, CliError> {
    match action {
        Action::Networks => {
            for &network in NetworkId::ALL {
                let report = NetworkReport {
                    network,
                    prefixes: prefixes_for(network),
                    hrp: hrp_for(network),
                    priority: priority(network),
                };
                write_line(&mut out, &report)?;
            }
            Ok(true)
        }
        Action::Check { network, addresses } => {
            let network = *network;
            let mut all_valid = true;
            let mut emit = |report: CheckReport, out: &mut W| -> Result<(), CliError> {
                if !report.valid {
                    log::info!("{}: invalid address {:?}", network, report.input);
                    all_valid = false;
                }
                write_line(out, &report)
            };
            let prepare = |raw: &str| -> String {
                if config.trim {
                    raw.trim().to_string()
                } else {
                    raw.to_string()
                }
            };

            if addresses.is_empty() {
                let mut buf = Vec::new();
                loop {
                    buf.clear();
                    if input.read_until(b'\n', &mut buf)? == 0 {
                        break;
                    }
                    let line = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
                    let line = line.strip_suffix(b"\r").unwrap_or(line);
                    let entry = match std::str::from_utf8(line) {
                        Ok(text) if text.trim().is_empty() => continue,
                        Ok(text) => CheckReport::new(network, &prepare(text)),
                        Err(_) => CheckReport::rejected(
                            network,
                            &prepare(&String::from_utf8_lossy(line)),
                            "input is not valid UTF-8".to_string(),
                        ),
                    };
                    emit(entry, &mut out)?;
                }
            } else {
                for address in addresses {
                    emit(CheckReport::new(network, &prepare(address)), &mut out)?;
                }
            }
            Ok(all_valid)
        }
    }
}

fn write_line<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<(), CliError> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
