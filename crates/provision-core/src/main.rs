//! `provision` command line

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, Command};
use provision_core::{init_tracing, run_demo, Demo, LogFormat, ProvisionConfig, Provisioner};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let cli = Command::new("provision")
        .version(provision_core::VERSION)
        .about("Object provisioning: registries, builders, prototypes, singletons, adapters")
        .arg(
            Arg::new("config")
                .long("config")
                .value_parser(value_parser!(PathBuf))
                .help("Path to a TOML configuration file"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("demo")
                .about("Run provisioning scenarios")
                .arg(
                    Arg::new("scenario")
                        .default_value("all")
                        .value_parser(Demo::NAMES.to_vec())
                        .help("Scenario to run"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output report as JSON"),
                ),
        )
        .subcommand(Command::new("config").about("Print the effective configuration as TOML"));

    let matches = cli.get_matches();

    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => ProvisionConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ProvisionConfig::default(),
    };

    let format = if matches.get_flag("log-json") {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    init_tracing(&config.log_filter, format)?;

    match matches.subcommand() {
        Some(("demo", args)) => {
            let demo: Demo = args
                .get_one::<String>("scenario")
                .map_or(Ok(Demo::All), |name| name.parse())?;

            let provisioner = Provisioner::new(config)?;
            let report = run_demo(&provisioner, demo);

            if args.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.generate_text());
            }

            std::process::exit(if report.passed() { 0 } else { 1 });
        }
        Some(("config", _)) => {
            print!("{}", toml::to_string_pretty(&config)?);
        }
        _ => {}
    }

    Ok(())
}
