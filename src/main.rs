use std::process::ExitCode;

use envstation::app::{self, App, LogLevel, Logger};
use envstation::cli::{self, Command};

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("envstation: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> envstation::Result<()> {
    match cli::parse(std::env::args().skip(1))? {
        Command::Run(options) => App::new(options).run(),
        Command::SetIntervals(options) => {
            let logger = Logger::new(LogLevel::default(), None);
            app::set_intervals(&options, &logger)
        }
        Command::ShowHelp => {
            println!("{}", cli::USAGE);
            Ok(())
        }
        Command::ShowVersion => {
            println!("envstation {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
