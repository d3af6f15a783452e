use cardwallet::application::processor::WalletProcessor;
use cardwallet::domain::balance::{Balance, MAX_BALANCE};
use cardwallet::infrastructure::in_memory::ScriptedChannel;
use cardwallet::interfaces::csv::command_reader::CommandReader;
use cardwallet::interfaces::csv::response_writer::{
    ResponseFormat, ResponseRecord, ResponseWriter,
};
use clap::{ArgAction, Parser};
use env_logger::Env;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Command script (CSV with columns cla,ins,p1,p2,p3,data in hex)
    script: PathBuf,

    /// Balance the wallet holds when the session starts.
    #[arg(
        long,
        default_value_t = 0,
        value_parser = clap::value_parser!(i16).range(0..=i64::from(MAX_BALANCE))
    )]
    initial_balance: i16,

    /// Output format for the responses.
    #[arg(long, value_enum, default_value_t = ResponseFormat::Csv)]
    format: ResponseFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let mut builder =
        env_logger::Builder::from_env(Env::default().default_filter_or(default_level));
    builder.format_timestamp_millis();
    let _ = builder.try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let balance = Balance::new(cli.initial_balance).ok_or_else(|| {
        miette::miette!("initial balance {} is out of range", cli.initial_balance)
    })?;
    let mut wallet = WalletProcessor::with_balance(balance);

    let file = File::open(&cli.script).into_diagnostic()?;
    let reader = CommandReader::new(file);
    let mut records = Vec::new();
    for command in reader.commands() {
        match command {
            Ok(command) => {
                let mut channel = ScriptedChannel::new(command);
                let status = wallet.handle(&mut channel);
                let header = *channel.command().header();
                let response = channel.into_response(status);
                records.push(ResponseRecord::new(&header, &response));
            }
            Err(e) => {
                eprintln!("Error reading command: {}", e);
            }
        }
    }

    let stdout = io::stdout();
    let mut writer = ResponseWriter::new(stdout.lock(), cli.format);
    writer.write_responses(&records).into_diagnostic()?;

    eprintln!("Final balance: {}", wallet.balance());

    Ok(())
}
