//! Simple command that prints one or '-n count' UUIDv6 strings, decodes one, or prints the
//! synthetic sequence from the reform epoch

use std::{env, io, io::Write, process::ExitCode};

use tracing_subscriber::EnvFilter;
use uuid6::{Strategy, SyntheticSequence, Uuid};

const USAGE: &str = "[-n count] [--strategy v6|v1|v4] | --decode <uuid> | --sequence [-n count]";

const DEFAULT_SEQUENCE_LENGTH: usize = 21;

fn main() -> io::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let opts = {
        let mut args = env::args();
        let program = args.next();
        match parse_args(args) {
            Ok(opts) => opts,
            Err(message) => {
                eprintln!("Error: {}", message);
                eprintln!(
                    "Usage: {} {}",
                    program.as_deref().unwrap_or("uuid6"),
                    USAGE
                );
                return Ok(ExitCode::FAILURE);
            }
        }
    };

    let mut buf = io::BufWriter::new(io::stdout());
    let result = match opts.mode {
        Mode::Generate(strategy) => {
            let mut result = Ok(());
            for _ in 0..opts.count.unwrap_or(1) {
                match uuid6::uuid_with(strategy) {
                    Ok(uuid) => writeln!(buf, "{}", uuid)?,
                    Err(err) => {
                        result = Err(err);
                        break;
                    }
                }
            }
            result
        }
        Mode::Decode(uuid) => match uuid6::decode(&uuid) {
            Ok(instant) => {
                writeln!(buf, "uuid:      {}", uuid)?;
                writeln!(buf, "ticks:     {}", uuid6::extract_raw_timestamp(&uuid))?;
                writeln!(buf, "timestamp: {}", instant.to_rfc3339())?;
                Ok(())
            }
            Err(err) => Err(err),
        },
        Mode::Sequence => {
            let count = opts.count.unwrap_or(DEFAULT_SEQUENCE_LENGTH);
            let mut result = Ok(());
            for uuid in SyntheticSequence::from_epoch(1).take(count) {
                match uuid6::decode(&uuid) {
                    Ok(instant) => writeln!(buf, "{}  {}", uuid, instant.to_rfc3339())?,
                    Err(err) => {
                        result = Err(err);
                        break;
                    }
                }
            }
            result
        }
    };
    buf.flush()?;

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            eprintln!("Error: {}", err);
            Ok(ExitCode::FAILURE)
        }
    }
}

#[derive(Debug, PartialEq)]
enum Mode {
    Generate(Strategy),
    Decode(Uuid),
    Sequence,
}

#[derive(Debug, PartialEq)]
struct Options {
    count: Option<usize>,
    mode: Mode,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut count = None;
    let mut strategy = None;
    let mut decode = None;
    let mut sequence = false;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-n" => {
                if count.is_some() {
                    return Err("option 'n' given more than once".to_owned());
                }
                let Some(n_arg) = args.next() else {
                    return Err("argument to option 'n' missing".to_owned());
                };
                let Ok(c) = n_arg.parse() else {
                    return Err(format!("invalid argument to option 'n': '{}'", n_arg));
                };
                count.replace(c);
            }
            "--strategy" => {
                if strategy.is_some() {
                    return Err("option 'strategy' given more than once".to_owned());
                }
                let Some(s_arg) = args.next() else {
                    return Err("argument to option 'strategy' missing".to_owned());
                };
                let Ok(s) = s_arg.parse::<Strategy>() else {
                    return Err(format!("invalid argument to option 'strategy': '{}'", s_arg));
                };
                strategy.replace(s);
            }
            "--decode" => {
                if decode.is_some() {
                    return Err("option 'decode' given more than once".to_owned());
                }
                let Some(d_arg) = args.next() else {
                    return Err("argument to option 'decode' missing".to_owned());
                };
                let Ok(uuid) = d_arg.parse::<Uuid>() else {
                    return Err(format!("invalid argument to option 'decode': '{}'", d_arg));
                };
                decode.replace(uuid);
            }
            "--sequence" => sequence = true,
            _ => return Err(format!("unrecognized argument '{}'", arg)),
        }
    }

    let mode = match (decode, sequence) {
        (Some(_), true) => return Err("options 'decode' and 'sequence' are exclusive".to_owned()),
        (Some(_), _) | (_, true) if strategy.is_some() => {
            return Err("option 'strategy' applies to generation only".to_owned())
        }
        (Some(uuid), false) => {
            if count.is_some() {
                return Err("option 'n' does not apply to 'decode'".to_owned());
            }
            Mode::Decode(uuid)
        }
        (None, true) => Mode::Sequence,
        (None, false) => Mode::Generate(strategy.unwrap_or_default()),
    };
    Ok(Options { count, mode })
}
