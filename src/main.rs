mod debug_report;

use chrono::NaiveDateTime;
use propstring::providers::{dates, paths, urls};
use propstring::{Context, ParserRef, Replacement, RuleInput, Strings};
use std::io::{self, IsTerminal, Read};

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let mut strings = Strings::new().strict(config.strict);
    for provider in &config.providers {
        match provider.as_str() {
            "paths" => strings.parser("paths", paths::parser(Default::default())),
            "urls" => strings.parser("urls", urls::parser(Default::default())),
            "dates" => strings.parser("dates", dates::parser(Default::default())),
            // parse_args has already rejected anything else
            _ => unreachable!(),
        };
    }

    let mut refs: Vec<ParserRef> =
        config.providers.iter().map(|name| ParserRef::named(name.clone())).collect();
    if !config.rules.is_empty() {
        let pairs = config
            .rules
            .iter()
            .map(|(token, value)| (token.clone(), Replacement::from(value.clone())))
            .collect();
        refs.push(ParserRef::Inline(RuleInput::Map(pairs)));
    }
    let parsers = if refs.is_empty() { ParserRef::All } else { ParserRef::List(refs) };

    let mut ctx = Context::new();
    for (name, value) in &config.context {
        ctx.set(name.clone(), value.as_str());
    }
    if let Some(date) = config.date {
        ctx.set("date", date);
    }

    if config.verbose {
        match strings.process_verbose(&config.template, Some(parsers), Some(&ctx)) {
            Ok(details) => debug_report::print_run(&config.template, &details, config.color),
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        }
    } else {
        match strings.process(&config.template, Some(parsers), Some(&ctx)) {
            Ok(output) => println!("{output}"),
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        }
    }
}

struct CliConfig {
    template: String,
    rules: Vec<(String, String)>,
    context: Vec<(String, String)>,
    providers: Vec<String>,
    date: Option<NaiveDateTime>,
    strict: bool,
    verbose: bool,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut template: Option<String> = None;
    let mut rules = Vec::new();
    let mut context = Vec::new();
    let mut providers: Vec<String> = Vec::new();
    let mut date = None;
    let mut strict = false;
    let mut verbose = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("propstring {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--strict" => strict = true,
            "--verbose" => verbose = true,
            "--rule" | "-r" => {
                let value = args.next().ok_or_else(|| "error: --rule expects token=value".to_string())?;
                rules.push(parse_pair(&value, "--rule")?);
            }
            "--context" | "-c" => {
                let value = args.next().ok_or_else(|| "error: --context expects key=value".to_string())?;
                context.push(parse_pair(&value, "--context")?);
            }
            "--parser" => {
                let value = args.next().ok_or_else(|| "error: --parser expects a name".to_string())?;
                providers.push(parse_provider(&value)?);
            }
            "--date" => {
                let value = args.next().ok_or_else(|| "error: --date expects a value".to_string())?;
                date = Some(parse_date(&value)?);
            }
            "--template" | "-t" => {
                let value = args.next().ok_or_else(|| "error: --template expects a value".to_string())?;
                if template.is_some() {
                    return Err("error: template provided multiple times".to_string());
                }
                template = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if template.is_some() {
                        return Err("error: template provided multiple times".to_string());
                    }
                    template = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--rule=") => {
                rules.push(parse_pair(arg.trim_start_matches("--rule="), "--rule")?);
            }
            _ if arg.starts_with("--context=") => {
                context.push(parse_pair(arg.trim_start_matches("--context="), "--context")?);
            }
            _ if arg.starts_with("--parser=") => {
                providers.push(parse_provider(arg.trim_start_matches("--parser="))?);
            }
            _ if arg.starts_with("--date=") => {
                date = Some(parse_date(arg.trim_start_matches("--date="))?);
            }
            _ if arg.starts_with("--template=") => {
                if template.is_some() {
                    return Err("error: template provided multiple times".to_string());
                }
                template = Some(arg.trim_start_matches("--template=").to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if template.is_some() {
                    return Err("error: template provided multiple times".to_string());
                }
                template = Some(rest);
                break;
            }
        }
    }

    let template = match template {
        Some(value) => value,
        None => read_stdin_template()?,
    };

    if template.trim().is_empty() {
        return Err(format!("error: no template provided\n\n{}", help_text()));
    }

    Ok(CliConfig { template, rules, context, providers, date, strict, verbose, color })
}

fn read_stdin_template() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer.trim_end_matches('\n').to_string())
}

fn parse_pair(value: &str, flag: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((key, val)) if !key.is_empty() => Ok((key.to_string(), val.to_string())),
        _ => Err(format!("error: {flag} expects key=value, got '{value}'")),
    }
}

fn parse_provider(value: &str) -> Result<String, String> {
    match value {
        "paths" | "urls" | "dates" => Ok(value.to_string()),
        _ => Err(format!("error: unknown parser '{value}' (expected paths, urls or dates)")),
    }
}

fn parse_date(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| {
            chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map(|d| d.and_hms_opt(0, 0, 0).unwrap())
        })
        .map_err(|_| format!("error: invalid --date '{value}' (expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "propstring {version}

Named-template substitution CLI.

Usage:
  propstring [OPTIONS] [--] <template...>
  propstring [OPTIONS] --template <text>

Options:
  -t, --template <text>      Template text to process. If omitted, reads
                             remaining args or stdin when no args are given.
  -r, --rule <token=value>   Ad-hoc replacement rule (repeatable).
  -c, --context <key=value>  Context entry read by computed rules (repeatable).
  --parser <name>            Use a built-in provider parser: paths, urls, dates
                             (repeatable; reads filepath/url/date from context).
  --date <value>             Set the `date` context field.
                             YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS.
  --strict                   Error on unregistered propstring names instead of
                             treating them as literal template text.
  --verbose                  Print the per-rule trace.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Exit codes:
  0  Success.
  1  Processing error.
  2  Invalid arguments or missing template.
",
        version = env!("CARGO_PKG_VERSION")
    )
}
