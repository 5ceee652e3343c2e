use clap::{arg, command, ArgMatches, Command};

use super::{code_from_args, generator_args, CommandType, When};
use crate::clock::GetTime;
use crate::writer::OutErr;

pub fn subcommand() -> Command<'static> {
    command!(CommandType::Now.as_str())
        .about("Print the one-time password for the current time")
        .args(generator_args())
        .arg(
            arg!(-o --offset <SECONDS> "Shift the current time, negative for past codes")
                .required(false)
                .allow_hyphen_values(true),
        )
}

pub fn run_now<C, W>(now_args: &ArgMatches, clock: &C, writer: &mut W)
where
    C: GetTime,
    W: OutErr,
{
    let offset = match now_args.value_of("offset").map(str::parse::<i64>) {
        None => 0,
        Some(Ok(offset)) => offset,
        Some(Err(err)) => {
            writer.write_err(&format!("Unable to parse offset: {}\n", err));
            return;
        }
    };

    match code_from_args(now_args, &When::Offset(offset), clock) {
        Ok(code) => writer.write(&format!("{}\n", code)),
        Err(err) => writer.write_err(&format!("{}\n", err)),
    }
}
