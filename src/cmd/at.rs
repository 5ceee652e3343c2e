use clap::{arg, command, ArgMatches, Command};

use super::{code_from_args, generator_args, CommandType, When};
use crate::clock::Clock;
use crate::config::unix_time;
use crate::writer::OutErr;

pub fn subcommand() -> Command<'static> {
    command!(CommandType::At.as_str())
        .about("Print the one-time password for a given Unix time")
        .args(generator_args())
        .arg(
            arg!(-t --time <UNIX_SECONDS> "Unix time to compute the code for")
                .required(true)
                .allow_hyphen_values(true),
        )
}

pub fn run_at<W>(at_args: &ArgMatches, writer: &mut W)
where
    W: OutErr,
{
    let time = match at_args.value_of("time").map(str::parse::<i64>) {
        Some(Ok(secs)) => secs,
        Some(Err(err)) => {
            writer.write_err(&format!("Unable to parse time: {}\n", err));
            return;
        }
        None => {
            writer.write_err("Time is required\n");
            return;
        }
    };

    let result = unix_time(time)
        .and_then(|t| code_from_args(at_args, &When::At(t), &Clock::new()));

    match result {
        Ok(code) => writer.write(&format!("{}\n", code)),
        Err(err) => writer.write_err(&format!("{}\n", err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::CommandType::At;
    use crate::tests::constants::*;
    use crate::tests::mocks::MockOtpWriter;
    use crate::tests::utils::get_cmd_args;

    #[test]
    fn prints_code_at_time() {
        let mut writer = MockOtpWriter::new();

        let arg_vec = vec!["totp", At.as_str(), "-k", SHA1_KEY_BASE32, "-t", "59"];
        let at_args = get_cmd_args(At.as_str(), subcommand(), &arg_vec).unwrap();

        run_at(&at_args, &mut writer);

        assert_eq!(writer.out_str(), "287082\n");
        assert_eq!(writer.err, Vec::new());
    }

    #[test]
    fn honours_algorithm_and_digits_flags() {
        let mut writer = MockOtpWriter::new();

        // Base32 of the 32 byte RFC 6238 SHA-256 seed
        let key = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQGEZA";
        let arg_vec = vec![
            "totp",
            At.as_str(),
            "-k",
            key,
            "-a",
            "sha256",
            "-d",
            "8",
            "-t",
            "1111111109",
        ];
        let at_args = get_cmd_args(At.as_str(), subcommand(), &arg_vec).unwrap();

        run_at(&at_args, &mut writer);

        assert_eq!(writer.out_str(), "68084774\n");
    }

    #[test]
    fn accepts_times_before_the_epoch() {
        let mut writer = MockOtpWriter::new();

        let arg_vec = vec!["totp", At.as_str(), "-k", SHA1_KEY_BASE32, "-t", "-1"];
        let at_args = get_cmd_args(At.as_str(), subcommand(), &arg_vec).unwrap();

        run_at(&at_args, &mut writer);

        // truncation toward zero puts the last second before the epoch in step 0
        assert_eq!(writer.out_str(), "755224\n");
    }

    #[test]
    fn reports_unparsable_time() {
        let mut writer = MockOtpWriter::new();

        let arg_vec = vec!["totp", At.as_str(), "-k", SHA1_KEY_BASE32, "-t", "noon"];
        let at_args = get_cmd_args(At.as_str(), subcommand(), &arg_vec).unwrap();

        run_at(&at_args, &mut writer);

        assert_eq!(writer.out, Vec::new());
        assert!(writer.err_str().starts_with("Unable to parse time"));
    }

    #[test]
    fn reports_missing_config_file() {
        let mut writer = MockOtpWriter::new();

        let arg_vec = vec![
            "totp",
            At.as_str(),
            "-k",
            SHA1_KEY_BASE32,
            "-t",
            "59",
            "-c",
            "/nonexistent/totp.toml",
        ];
        let at_args = get_cmd_args(At.as_str(), subcommand(), &arg_vec).unwrap();

        run_at(&at_args, &mut writer);

        assert_eq!(writer.out, Vec::new());
        assert!(writer.err_str().starts_with("Unable to read /nonexistent/totp.toml"));
    }
}
