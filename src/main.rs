use clap::{arg, command};

use totp::cmd::{at, now, CommandType};
use totp::writer::ConsoleWriter;
use totp::Clock;

fn main() {
    let matches = command!()
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(arg!(--debug "Log debug output to stderr").required(false))
        .subcommand(now::subcommand())
        .subcommand(at::subcommand())
        .get_matches();

    init_console_logger(matches.is_present("debug"));

    let mut writer = ConsoleWriter::new();

    match matches.subcommand() {
        Some((cmd, now_args)) if cmd == CommandType::Now.as_str() => {
            now::run_now(now_args, &Clock::new(), &mut writer)
        }
        Some((cmd, at_args)) if cmd == CommandType::At.as_str() => at::run_at(at_args, &mut writer),
        _ => unreachable!("clap enforces a known subcommand"),
    }
}

fn init_console_logger(debug: bool) {
    let mut log_builder = env_logger::Builder::from_default_env();

    if debug {
        log_builder.filter(None, log::LevelFilter::Debug);
    } else {
        log_builder.filter(None, log::LevelFilter::Info);
    }
    log_builder.target(env_logger::Target::Stderr);
    log_builder.init();
}
