use std::path::PathBuf;

use clap::Parser;
use passphrase2pgp::errors::{Error, Result};
use passphrase2pgp::types::Timestamp;

/// Generate a deterministic OpenPGP key from a passphrase
#[derive(Parser, Debug)]
#[command(name = "passphrase2pgp", version, about)]
pub struct Args {
    /// Output a detached signature of standard input
    #[arg(short = 'S', long, conflicts_with = "keygen")]
    pub sign: bool,

    /// Output a key (default mode)
    #[arg(short = 'K', long)]
    pub keygen: bool,

    /// Encode the output with ASCII armor
    #[arg(short, long)]
    pub armor: bool,

    /// Key creation date in seconds since the epoch
    #[arg(short, long, value_name = "SECS", default_value_t = 0)]
    pub time: u32,

    /// Print the key fingerprint on standard error
    #[arg(short, long)]
    pub fingerprint: bool,

    /// Read the passphrase from the first line of a file
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Load the key from a file instead of deriving it
    #[arg(short, long, value_name = "FILE")]
    pub load: Option<PathBuf>,

    /// Use the current time as creation date
    #[arg(short, long, conflicts_with = "time")]
    pub now: bool,

    /// Double the key derivation cost
    #[arg(short = 'x', long)]
    pub paranoid: bool,

    /// Only output the public key
    #[arg(short, long)]
    pub public: bool,

    /// Number of passphrase confirmations
    #[arg(short, long, value_name = "N", default_value_t = 1)]
    pub repeat: u32,

    /// Also derive an encryption subkey
    #[arg(short, long, conflicts_with = "load")]
    pub subkey: bool,

    /// User id, defaults to "$REALNAME <$EMAIL>"
    #[arg(short, long, value_name = "ID")]
    pub uid: Option<String>,
}

/// What the run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Keygen,
    Sign,
}

impl Args {
    /// Key generation unless `-S` was given.
    pub fn mode(&self) -> Mode {
        if self.sign && !self.keygen {
            Mode::Sign
        } else {
            Mode::Keygen
        }
    }

    pub fn difficulty(&self) -> u32 {
        if self.paranoid {
            2
        } else {
            1
        }
    }

    pub fn created(&self) -> Result<Timestamp> {
        if self.now {
            Timestamp::now().map_err(|err| Error::Input {
                message: err.to_string(),
            })
        } else {
            Ok(Timestamp::from_secs(self.time))
        }
    }

    /// The identity to derive from, looked up in the environment when not given.
    pub fn user_id<F>(&self, env: F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(ref uid) = self.uid {
            return Ok(uid.clone());
        }

        let realname = env("REALNAME").filter(|v| !v.is_empty());
        let email = env("EMAIL").filter(|v| !v.is_empty());
        match (realname, email) {
            (Some(realname), Some(email)) => Ok(format!("{realname} <{email}>")),
            _ => Err(Error::Input {
                message: "must have either -u or -l option".into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use passphrase2pgp::ErrorKind;

    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("passphrase2pgp").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn verify_command() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let args = parse(&[]);
        assert_eq!(args.mode(), Mode::Keygen);
        assert_eq!(args.repeat, 1);
        assert_eq!(args.difficulty(), 1);
        assert_eq!(args.created().unwrap(), Timestamp::from_secs(0));
    }

    #[test]
    fn short_flags() {
        let args = parse(&["-Sa", "-x", "-t", "1700000000", "-u", "A <a@b.c>"]);
        assert_eq!(args.mode(), Mode::Sign);
        assert!(args.armor);
        assert_eq!(args.difficulty(), 2);
        assert_eq!(args.created().unwrap(), Timestamp::from_secs(1_700_000_000));
        assert_eq!(args.uid.as_deref(), Some("A <a@b.c>"));
    }

    #[test]
    fn explicit_keygen() {
        let args = parse(&["-K", "-p"]);
        assert_eq!(args.mode(), Mode::Keygen);
        assert!(args.public);
    }

    #[test]
    fn conflicts() {
        let cli = |args: &[&str]| {
            Args::try_parse_from(std::iter::once("passphrase2pgp").chain(args.iter().copied()))
        };
        assert!(cli(&["-S", "-K"]).is_err());
        assert!(cli(&["-n", "-t", "5"]).is_err());
        assert!(cli(&["-s", "-l", "key.pgp"]).is_err());
    }

    #[test]
    fn user_id_from_environment() {
        let args = parse(&[]);
        let env = |name: &str| match name {
            "REALNAME" => Some("Real Name".to_string()),
            "EMAIL" => Some("real@example.org".to_string()),
            _ => None,
        };
        assert_eq!(args.user_id(env).unwrap(), "Real Name <real@example.org>");

        let explicit = parse(&["--uid", "Other <o@example.org>"]);
        assert_eq!(explicit.user_id(env).unwrap(), "Other <o@example.org>");
    }

    #[test]
    fn missing_user_id() {
        let args = parse(&[]);
        let err = args
            .user_id(|name| (name == "EMAIL").then(|| "a@b.c".to_string()))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);

        let empty = args.user_id(|_| Some(String::new())).unwrap_err();
        assert_eq!(empty.to_string(), "must have either -u or -l option");
    }
}
