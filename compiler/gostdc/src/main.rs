//! gostdc: generate dynamic-runtime bindings for host packages.

use gostdc::{load_manifest, parse_args, run, Command, DriverError, Options, USAGE};

fn main() {
    gostdc::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Help) => {
            print!("{USAGE}");
            return;
        }
        Err(err) => {
            eprintln!("error: {err}");
            eprint!("{USAGE}");
            std::process::exit(2);
        }
    };

    if let Err(err) = execute(&options) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn execute(options: &Options) -> Result<(), DriverError> {
    let declarations = load_manifest(options.manifest.as_deref())?;
    let output = run(options, declarations)?;
    for note in &output.notes {
        eprintln!("{note}");
    }
    print!("{}", output.listing);
    if let Some(summary) = &output.summary {
        println!("{summary}");
    }
    Ok(())
}
