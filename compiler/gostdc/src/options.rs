//! Command-line options.

use std::path::PathBuf;

use crate::DriverError;

pub const USAGE: &str = "\
Usage: gostdc --manifest <path> [options...]

Options:
  --manifest <path>   # Declaration manifest (JSON) from the discovery pass; '-' reads stdin
  --empty             # Treat packages with no usable functions as emitted
  --summary           # Print summary of #s of types, functions, and ABENDs
  --verbose, -v       # Print types and every generated function
  --help, -h          # Print this message
";

/// Settings for one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// Manifest path; `None` reads standard input.
    pub manifest: Option<PathBuf>,
    pub generate_empty: bool,
    pub summary: bool,
    pub verbose: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Run(Options),
    Help,
}

fn not_option(arg: &str) -> bool {
    arg == "-" || !arg.starts_with('-')
}

/// Parse arguments, not including the program name.
pub fn parse_args(args: &[String]) -> Result<Command, DriverError> {
    let mut options = Options::default();
    let mut manifest_given = false;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--manifest" => {
                let Some(path) = args.get(i + 1).filter(|arg| not_option(arg)) else {
                    return Err(DriverError::Usage("--manifest needs a path".to_string()));
                };
                if path != "-" {
                    options.manifest = Some(PathBuf::from(path));
                }
                manifest_given = true;
                i += 2;
                continue;
            }
            "--empty" => options.generate_empty = true,
            "--summary" => options.summary = true,
            "--verbose" | "-v" => options.verbose = true,
            "--help" | "-h" => return Ok(Command::Help),
            other => return Err(DriverError::Usage(format!("unrecognized argument: {other}"))),
        }
        i += 1;
    }
    if !manifest_given {
        return Err(DriverError::Usage("missing --manifest".to_string()));
    }
    Ok(Command::Run(options))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn parses_flags() {
        let command = parse_args(&args(&["--manifest", "decls.json", "--summary", "-v", "--empty"]));
        assert!(matches!(
            command,
            Ok(Command::Run(Options {
                manifest: Some(_),
                generate_empty: true,
                summary: true,
                verbose: true,
            }))
        ));
    }

    #[test]
    fn dash_reads_stdin() {
        let command = parse_args(&args(&["--manifest", "-"]));
        assert!(matches!(command, Ok(Command::Run(Options { manifest: None, .. }))));
    }

    #[test]
    fn manifest_is_required() {
        assert!(matches!(parse_args(&args(&["--summary"])), Err(DriverError::Usage(_))));
        assert!(matches!(
            parse_args(&args(&["--manifest", "--summary"])),
            Err(DriverError::Usage(_))
        ));
    }

    #[test]
    fn help_stops_parsing() {
        assert!(matches!(parse_args(&args(&["--bogus-free", "-h"])), Err(_)));
        assert!(matches!(parse_args(&args(&["-h", "--bogus"])), Ok(Command::Help)));
    }

    #[test]
    fn unknown_flags_are_rejected() {
        let Err(DriverError::Usage(message)) = parse_args(&args(&["--manifest", "x", "--replace"])) else {
            panic!("expected a usage error");
        };
        assert_eq!(message, "unrecognized argument: --replace");
    }
}
