use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use binder_cli::{handle_command, BinderCommand, ConsoleSink, OutputSink, ResolveRequest};
use binder_core::{init_tracing, BindingKind, NamingRole, ResolveMode, ResolveOptions};
use clap::{Arg, ArgAction, ArgMatches, Command};

fn main() -> ExitCode {
    // Initialize logging
    init_tracing();

    let sink = ConsoleSink;
    let matches = cli().get_matches();

    match parse_command(&matches).and_then(handle_command) {
        Ok(outcome) if outcome.is_success() => {
            sink.on_output(outcome.text());
            ExitCode::SUCCESS
        }
        Ok(outcome) => {
            sink.on_error(outcome.text());
            ExitCode::FAILURE
        }
        Err(e) => {
            sink.on_error(&format!("Error: {e:#}"));
            ExitCode::from(2)
        }
    }
}

fn cli() -> Command {
    let role = |name: &'static str, help: &'static str| {
        Arg::new(name)
            .long(name)
            .value_name("ROLE")
            .help(help)
            .required(true)
            .value_parser(NamingRole::ALL.map(|role| role.key()))
    };

    Command::new("binder")
        .version(binder_core::VERSION)
        .about("Resolve MVVM member bindings from type snapshots")
        .subcommand_required(true)
        .subcommand(
            Command::new("resolve")
                .about("Resolve the bindings of a type snapshot")
                .arg(
                    Arg::new("snapshot")
                        .value_name("SNAPSHOT")
                        .help("Type snapshot JSON file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .value_name("KIND")
                        .help("Binding configuration to run")
                        .value_parser(["property", "command", "dependency"])
                        .default_value("property"),
                )
                .arg(
                    Arg::new("mode")
                        .long("mode")
                        .value_name("MODE")
                        .help("Patch every compatible member or only marked ones")
                        .value_parser(["all", "selectively"])
                        .default_value("all"),
                )
                .arg(
                    Arg::new("skip-invalid-names")
                        .long("skip-invalid-names")
                        .help("Skip members whose names break their convention")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("prefer-explicit")
                        .long("prefer-explicit")
                        .help("Skip name search when an explicit link exists")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print bindings as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a member name between naming roles")
                .arg(Arg::new("name").value_name("NAME").required(true).index(1))
                .arg(role("from", "Role the name currently follows"))
                .arg(role("to", "Role to convert the name to")),
        )
}

fn parse_command(matches: &ArgMatches) -> Result<BinderCommand> {
    match matches.subcommand() {
        Some(("resolve", args)) => {
            let request = ResolveRequest {
                snapshot: PathBuf::from(required(args, "snapshot")?),
                kind: required(args, "kind")?.parse::<BindingKind>().map_err(|e| anyhow!(e))?,
                mode: required(args, "mode")?.parse::<ResolveMode>().map_err(|e| anyhow!(e))?,
                options: ResolveOptions::default()
                    .with_skip_invalid_names(args.get_flag("skip-invalid-names"))
                    .with_prefer_explicit(args.get_flag("prefer-explicit")),
                json: args.get_flag("json"),
            };
            Ok(BinderCommand::Resolve(request))
        }
        Some(("convert", args)) => Ok(BinderCommand::Convert {
            name: required(args, "name")?.to_string(),
            from: required(args, "from")?.parse::<NamingRole>().map_err(|e| anyhow!(e))?,
            to: required(args, "to")?.parse::<NamingRole>().map_err(|e| anyhow!(e))?,
        }),
        _ => Err(anyhow!("Unknown command")),
    }
}

fn required<'m>(args: &'m ArgMatches, name: &str) -> Result<&'m str> {
    args.get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("Missing argument: {}", name))
}
