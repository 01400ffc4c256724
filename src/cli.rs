//! Hand-rolled argument parsing for the `envstation` binary.

use std::str::FromStr;
use std::time::Duration;

use crate::app::{LogLevel, DEFAULT_BASE_URL, DEFAULT_OUT_DIR};
use crate::{Error, Result};

pub const USAGE: &str = "\
envstation - environmental station dashboard

USAGE:
    envstation [run] [OPTIONS]
    envstation set-intervals [OPTIONS]

COMMANDS:
    run              Poll the station and render charts (default)
    set-intervals    Push new polling intervals to the station

RUN OPTIONS:
    --url <URL>                Station base URL [default: http://envstation.local]
    --out-dir <DIR>            Directory for chart SVGs [default: charts]
    --once                     Poll once, render, then exit
    --sensor-interval <DUR>    Override the sensor poll interval locally (e.g. 5s)
    --graph-interval <DUR>     Override the chart poll interval locally (e.g. 30s)
    --log-level <LEVEL>        error, warn, info or debug [default: info]
    --log-file <PATH>          Append log lines to this file as well as stderr

SET-INTERVALS OPTIONS:
    --url <URL>                Station base URL [default: http://envstation.local]
    --sensor <DUR>             New sensor poll interval
    --graph <DUR>              New chart poll interval
    --log <DUR>                New on-station log retention interval

    At least one of --sensor, --graph or --log is required.

GENERAL:
    -h, --help                 Show this help
    -V, --version              Show the version";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(RunOptions),
    SetIntervals(IntervalOptions),
    ShowHelp,
    ShowVersion,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub url: String,
    pub out_dir: String,
    pub once: bool,
    pub sensor_interval: Option<Duration>,
    pub graph_interval: Option<Duration>,
    pub log_level: LogLevel,
    pub log_file: Option<String>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            url: DEFAULT_BASE_URL.to_string(),
            out_dir: DEFAULT_OUT_DIR.to_string(),
            once: false,
            sensor_interval: None,
            graph_interval: None,
            log_level: LogLevel::default(),
            log_file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntervalOptions {
    pub url: String,
    pub sensor: Option<Duration>,
    pub graph: Option<Duration>,
    pub log: Option<Duration>,
}

impl Default for IntervalOptions {
    fn default() -> Self {
        Self {
            url: DEFAULT_BASE_URL.to_string(),
            sensor: None,
            graph: None,
            log: None,
        }
    }
}

/// Parse command-line arguments (program name already stripped).
pub fn parse<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter().peekable();
    match args.peek().map(String::as_str) {
        Some("-h") | Some("--help") | Some("help") => return Ok(Command::ShowHelp),
        Some("-V") | Some("--version") | Some("version") => return Ok(Command::ShowVersion),
        Some("set-intervals") => {
            args.next();
            return parse_set_intervals(args);
        }
        Some("run") => {
            args.next();
        }
        _ => {}
    }
    parse_run(args)
}

fn parse_run<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut options = RunOptions::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--url" => options.url = flag_value(&arg, &mut args)?,
            "--out-dir" => options.out_dir = flag_value(&arg, &mut args)?,
            "--once" => options.once = true,
            "--sensor-interval" => {
                options.sensor_interval = Some(duration_value(&arg, &mut args)?);
            }
            "--graph-interval" => {
                options.graph_interval = Some(duration_value(&arg, &mut args)?);
            }
            "--log-level" => {
                let raw = flag_value(&arg, &mut args)?;
                options.log_level = LogLevel::from_str(&raw)
                    .map_err(|()| Error::InvalidArgs(format!("unknown log level '{raw}'")))?;
            }
            "--log-file" => options.log_file = Some(flag_value(&arg, &mut args)?),
            "-h" | "--help" => return Ok(Command::ShowHelp),
            other => {
                return Err(Error::InvalidArgs(format!("unknown argument '{other}'")));
            }
        }
    }
    Ok(Command::Run(options))
}

fn parse_set_intervals<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut options = IntervalOptions::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--url" => options.url = flag_value(&arg, &mut args)?,
            "--sensor" => options.sensor = Some(duration_value(&arg, &mut args)?),
            "--graph" => options.graph = Some(duration_value(&arg, &mut args)?),
            "--log" => options.log = Some(duration_value(&arg, &mut args)?),
            "-h" | "--help" => return Ok(Command::ShowHelp),
            other => {
                return Err(Error::InvalidArgs(format!("unknown argument '{other}'")));
            }
        }
    }
    if options.sensor.is_none() && options.graph.is_none() && options.log.is_none() {
        return Err(Error::InvalidArgs(
            "set-intervals needs at least one of --sensor, --graph or --log".to_string(),
        ));
    }
    Ok(Command::SetIntervals(options))
}

fn flag_value(flag: &str, args: &mut impl Iterator<Item = String>) -> Result<String> {
    args.next()
        .ok_or_else(|| Error::InvalidArgs(format!("{flag} needs a value")))
}

fn duration_value(flag: &str, args: &mut impl Iterator<Item = String>) -> Result<Duration> {
    let raw = flag_value(flag, args)?;
    humantime::parse_duration(&raw)
        .map_err(|e| Error::InvalidArgs(format!("{flag}: bad duration '{raw}': {e}")))
}
