use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use log::debug;
use passphrase2pgp::armor;
use passphrase2pgp::errors::Result;
use passphrase2pgp::{Certificate, Error, KeyParamsBuilder};

mod cli;
mod passphrase;

use cli::{Args, Mode};

fn main() -> ExitCode {
    pretty_env_logger::init();
    let args = Args::parse();

    match run(&args).and_then(|output| emit(&output)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!("aborting with {}", err.kind());
            eprintln!("passphrase2pgp: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Runs the whole pipeline and returns what goes to standard output.
fn run(args: &Args) -> Result<Vec<u8>> {
    let cert = match args.load {
        Some(ref path) => load(path)?,
        None => derive(args)?,
    };

    if args.fingerprint {
        eprintln!("{:X}", cert.key().fingerprint());
    }

    let output = match args.mode() {
        Mode::Sign => {
            debug!("signing standard input");
            cert.sign(io::stdin().lock())?
        }
        Mode::Keygen if args.public => cert.public_bytes()?,
        Mode::Keygen => cert.secret_bytes()?,
    };

    if args.armor {
        Ok(armor::to_armored_string(&output)?.into_bytes())
    } else {
        Ok(output)
    }
}

fn load(path: &Path) -> Result<Certificate> {
    let file = File::open(path).map_err(|err| Error::Input {
        message: format!("open {}: {err}", path.display()),
    })?;
    debug!("loading key from {}", path.display());

    Certificate::from_key_file(&mut BufReader::new(file))
}

fn derive(args: &Args) -> Result<Certificate> {
    let user_id = args.user_id(|name| std::env::var(name).ok())?;
    let passphrase = match args.input {
        Some(ref path) => passphrase::from_file(path)?,
        None => passphrase::prompt(args.repeat)?,
    };

    KeyParamsBuilder::default()
        .user_id(user_id)
        .passphrase(passphrase)
        .difficulty(args.difficulty())
        .created(args.created()?)
        .subkey(args.subkey)
        .build()
        .map_err(|err| Error::Input {
            message: err.to_string(),
        })?
        .generate()
}

fn emit(output: &[u8]) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(output)?;
    stdout.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use passphrase2pgp::ErrorKind;

    use super::*;

    #[test]
    fn missing_key_file_names_the_path() {
        let err = load(Path::new("/nonexistent/key.pgp")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
        assert!(
            err.to_string().starts_with("open /nonexistent/key.pgp: "),
            "{err}"
        );
    }

    #[test]
    fn loads_a_key_file() {
        let cert = load(Path::new(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/key.pgp"
        )))
        .unwrap();
        assert_eq!(cert.user_id().id(), b"Example User <user@example.org>");
    }
}
