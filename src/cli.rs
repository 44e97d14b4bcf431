use clap::Parser;

use crate::error::{DeauthError, Result};
use crate::mac::MacAddress;
use crate::rawsocks::validate_interface_name;

#[derive(Parser, Debug)]
#[command(name = "DeauthOxide")]
#[command(author = "Ryan Butler (Ragnt)")]
#[command(about = "Deauth Attack", long_about = None)]
#[command(version)]
pub struct Arguments {
    #[arg(short, long)]
    /// Target MAC.
    pub target: Option<String>,

    #[arg(short, long)]
    /// BSSID.
    pub bssid: Option<String>,

    #[arg(short, long)]
    /// Interface.
    pub iface: Option<String>,

    #[arg(short, long)]
    /// Print the timestamped status log.
    pub verbose: bool,
}

/// Validated run parameters.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub target: MacAddress,
    pub bssid: MacAddress,
    pub iface: String,
}

impl Arguments {
    /// Checks and converts the raw option strings. Consumes the arguments so
    /// nothing but the typed values outlives this call.
    pub fn into_config(self) -> Result<Config> {
        let mut missing = Vec::new();
        if self.target.is_none() {
            missing.push("--target");
        }
        if self.bssid.is_none() {
            missing.push("--bssid");
        }
        if self.iface.is_none() {
            missing.push("--iface");
        }

        let (Some(target), Some(bssid), Some(iface)) = (self.target, self.bssid, self.iface) else {
            return Err(DeauthError::MissingArguments(missing));
        };

        let target: MacAddress = target.parse()?;
        let bssid: MacAddress = bssid.parse()?;
        validate_interface_name(&iface)?;

        Ok(Config {
            target,
            bssid,
            iface,
        })
    }
}

impl Config {
    pub fn exec_info(&self) -> String {
        format!(
            "IFACE....: {}\nTARGET...: {}\nBSSID....: {}",
            self.iface, self.target, self.bssid
        )
    }
}
