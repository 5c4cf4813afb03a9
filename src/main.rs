// Tue Jan 13 2026 - Alex

use clap::{Parser, Subcommand};
use colored::Colorize;
use cor::{
    config::Config,
    error::{CError, ErrorTracer, Trace},
    symbol::{demangle, try_demangle},
    traced_bail,
    tuple::{convert, FieldId, Json, JsonRow, Record, Text, TextRow},
    utils::logging,
};

cor::record! {
    struct Sample: SampleField {
        Id: u32 => "id",
        Position: (f64, f64) => "pos",
        Name: String => "name",
        Active: bool => "active",
    }
}

#[derive(Parser, Debug)]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Traced errors and named tuples", long_about = None)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Read settings from a JSON file instead of COR_* variables
    #[arg(long, global = true)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a sample record and convert it between storages
    Record {
        /// Comma separated fields: id,x,y,name,active
        #[arg(long)]
        row: Option<String>,
    },
    /// Demangle symbol names
    Demangle {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Raise a traced error and report it
    Trace {
        /// Raise a C error with this return code
        #[arg(long)]
        rc: Option<i64>,
    },
    /// Print the current call stack
    Backtrace,
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Config::from_json(&text)?
        }
        None => Config::from_env()?,
    };
    Ok(config)
}

fn main() {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{} Invalid configuration: {}", "[!]".red(), e);
            std::process::exit(2);
        }
    };

    if !config.color {
        colored::control::set_override(false);
    }
    logging::init_logger(args.verbose, &config);
    log::debug!("configuration: {:?}", config);

    let tracer = ErrorTracer::from_config(&config);

    let code = match args.command {
        Command::Record { row } => run_record(&tracer, row.as_deref()),
        Command::Demangle { names } => run_demangle(&names),
        Command::Trace { rc } => run_trace(&tracer, rc),
        Command::Backtrace => {
            print!("{}", Trace::capture());
            0
        }
    };

    std::process::exit(code);
}

fn run_record(tracer: &ErrorTracer, row: Option<&str>) -> i32 {
    let result = tracer.trace_msg("record: ", || -> anyhow::Result<()> {
        let value = match row {
            Some(line) => {
                let mut text = TextRow::parse(line, ',');
                let value = Sample::load::<Text, _>(&mut text)?;
                if text.remaining() > 0 {
                    traced_bail!("{} unused fields in {:?}", text.remaining(), line);
                }
                value
            }
            None => (12, (0.5, -3.25), "probe".to_string(), true),
        };

        log::debug!(
            "record {} at {:?}",
            Sample::get(&value, Sample::Id),
            Sample::get(&value, Sample::Position)
        );
        println!("{} {}", "[+]".green(), Sample::printable(&value));
        let names: Vec<String> = SampleField::all().map(|id| id.to_string()).collect();
        println!("{} fields: {}", "[*]".blue(), names.join(", "));

        let mut text = TextRow::new();
        Sample::store::<Text, _>(&mut text, &value)?;
        println!("{} text: {}", "[*]".blue(), text);

        let mut json = JsonRow::new();
        convert::<Text, Json, _, _, <Sample as Record>::Value>(&mut text, &mut json)?;
        println!("{} json: {}", "[*]".blue(), json.to_json());
        Ok(())
    });

    if result.is_ok() {
        0
    } else {
        1
    }
}

fn run_demangle(names: &[String]) -> i32 {
    let mut failed = 0;
    for name in names {
        match demangle(name) {
            Some(plain) => println!("{} {} -> {}", "[+]".green(), name, plain.bold()),
            None => {
                failed += 1;
                println!("{} {} -> {}", "[-]".yellow(), name, try_demangle(name).dimmed());
            }
        }
    }
    log::info!("demangled {}/{} names", names.len() - failed, names.len());
    if failed == names.len() {
        1
    } else {
        0
    }
}

fn run_trace(tracer: &ErrorTracer, rc: Option<i64>) -> i32 {
    let outcome = tracer.trace_nothrow(|| -> anyhow::Result<()> {
        match rc {
            Some(rc) => Err(CError::new(rc, format!("call failed with {}", rc)).into()),
            None => traced_bail!("demonstration error raised from {}", module_path!()),
        }
    });
    if outcome.is_some() {
        0
    } else {
        1
    }
}
