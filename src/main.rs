mod report;

use chrono::{NaiveDateTime, TimeDelta};
use password_rules::{Clock, Context, ManualClock, Options, Session, SystemClock};
use report::Reporter;
use std::io::{self, BufRead, IsTerminal};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "PASSWORD_RULES_LOG";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_tracing();

    let mut options = match Options::from_env() {
        Ok(options) => options,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };
    if config.instant {
        options = Options { tick_interval: options.tick_interval, ..Options::instant() };
    }

    let reporter = Reporter::new(config.color);

    if config.catalogue {
        let ctx = config.reference_time.map(Context::at).unwrap_or_default();
        reporter.print_catalogue(&password_rules::catalogue().info(&ctx));
        return;
    }

    let result = match config.reference_time {
        Some(reference) => {
            let mut session = Session::with_clock(ManualClock::new(reference), options);
            play(&mut session, &config.input, &reporter, |clock: &ManualClock, due| clock.set(due))
        }
        None => {
            let mut session = Session::with_clock(SystemClock, options);
            play(&mut session, &config.input, &reporter, |clock: &SystemClock, due| {
                if let Ok(wait) = (due - clock.now()).to_std() {
                    std::thread::sleep(wait);
                }
            })
        }
    };

    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

/// Drive `session` with one edit per password: tick if due, apply the edit,
/// then wait out and fire whatever it scheduled.
fn play<C: Clock>(
    session: &mut Session<C>,
    input: &Input,
    reporter: &Reporter,
    wait_until: impl Fn(&C, NaiveDateTime),
) -> Result<(), String> {
    let total = session.catalogue().len();
    let tick_every = TimeDelta::from_std(session.tick_interval()).unwrap_or(TimeDelta::MAX);
    let mut last_tick = session.clock().now();
    let mut last = session.evaluate();

    let mut handle = |password: String| {
        if session.clock().now() - last_tick >= tick_every {
            last_tick = session.clock().now();
            if let Some(ticked) = session.on_periodic_tick() {
                let flipped: Vec<(u32, bool)> = ticked
                    .statuses
                    .iter()
                    .filter(|s| last.passed(s.id).is_some_and(|before| before != s.passed))
                    .map(|s| (s.id, s.passed))
                    .collect();
                reporter.print_tick(&flipped);
            }
        }

        session.on_password_change(password);

        let mut transitions = Vec::new();
        while let Some(due) = session.next_deadline() {
            wait_until(session.clock(), due);
            transitions.extend(session.poll());
        }

        last = session.evaluate();
        reporter.print_edit(session.password(), &last, &transitions, total);
    };

    match input {
        Input::Single(password) => handle(password.clone()),
        Input::Stdin => {
            for line in io::stdin().lock().lines() {
                let line = line.map_err(|err| format!("error: failed to read stdin: {err}"))?;
                handle(line);
            }
        }
    }

    reporter.print_summary(session.is_won(), session.active_count(), total);
    Ok(())
}

enum Input {
    Single(String),
    Stdin,
}

struct CliConfig {
    input: Input,
    reference_time: Option<NaiveDateTime>,
    instant: bool,
    catalogue: bool,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut config = CliConfig {
        input: Input::Stdin,
        reference_time: None,
        instant: false,
        catalogue: false,
        color: io::stdout().is_terminal(),
    };
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        // `--flag=value` and `--flag value` are both accepted for valued flags.
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };
        match flag.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("password-rules {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => config.color = true,
            "--no-color" => config.color = false,
            "--instant" => config.instant = true,
            "--catalogue" => config.catalogue = true,
            "--reference" => config.reference_time = Some(parse_reference(&take_value(&flag, inline, &mut args)?)?),
            "-i" | "--input" => config.set_password(take_value(&flag, inline, &mut args)?)?,
            "--" => {
                let rest = args.by_ref().collect::<Vec<_>>().join(" ");
                if !rest.is_empty() {
                    config.set_password(rest)?;
                }
            }
            _ if flag.starts_with('-') => return Err(format!("error: unknown option '{arg}'")),
            _ => {
                let rest = std::iter::once(arg).chain(args.by_ref()).collect::<Vec<_>>().join(" ");
                config.set_password(rest)?;
            }
        }
    }

    Ok(config)
}

fn take_value(flag: &str, inline: Option<String>, args: &mut impl Iterator<Item = String>) -> Result<String, String> {
    inline.or_else(|| args.next()).ok_or_else(|| format!("error: {flag} expects a value"))
}

impl CliConfig {
    fn set_password(&mut self, password: String) -> Result<(), String> {
        if let Input::Single(_) = self.input {
            return Err("error: password provided multiple times".to_string());
        }
        self.input = Input::Single(password);
        Ok(())
    }
}

fn parse_reference(value: &str) -> Result<NaiveDateTime, String> {
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| format!("error: --reference '{value}' is not a YYYY-MM-DDTHH:MM[:SS] timestamp"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "password-rules {version}

Play the password game from a terminal. Every line read is treated as the
full new contents of the password field.

Usage:
  password-rules [OPTIONS] [--] <password...>
  password-rules [OPTIONS] --input <password>
  password-rules [OPTIONS] < edits.txt

Options:
  -i, --input <password>     Evaluate a single password instead of reading stdin.
  --reference <timestamp>    Freeze the clock at YYYY-MM-DDTHH:MM[:SS]. Scheduled
                             reveals fire without waiting.
  --instant                  Reveal rules and declare wins without delay.
  --catalogue                List every rule and exit.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  {log_env}                  Log filter (tracing EnvFilter syntax). Default: warn.
  PASSWORD_RULES_REVEAL_DELAY_MS     Delay before the next rule appears (500).
  PASSWORD_RULES_WIN_DELAY_MS        Delay before the win is declared (1000).
  PASSWORD_RULES_TICK_INTERVAL_MS    Dynamic rule refresh interval (5000).

Exit codes:
  0  Success.
  1  Internal error.
  2  Invalid arguments or configuration.
",
        version = env!("CARGO_PKG_VERSION"),
        log_env = LOG_ENV,
    )
}
