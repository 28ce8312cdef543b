#![forbid(unsafe_code)]

mod edit;
mod logger;
mod show;
mod stdout;

use clap::{App, AppSettings, Arg, SubCommand};
use logger::PedanticLogger;
use std::process;

fn main() {
    let matches = App::new("id3tags")
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .global(true)
                .help("Also log skipped frames"),
        )
        .subcommand(
            SubCommand::with_name("show")
                .about("Show the tags of files")
                .arg(
                    Arg::with_name("tags")
                        .short("t")
                        .long("tags")
                        .value_name("TAG")
                        .multiple(true)
                        .number_of_values(1)
                        .help("Only show these tags, as aliases or frame IDs"),
                )
                .arg(
                    Arg::with_name("paths")
                        .value_name("FILES")
                        .required(true)
                        .multiple(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("write")
                .about("Write tags to a file")
                .arg(
                    Arg::with_name("replace")
                        .short("r")
                        .long("replace")
                        .help("Replace the existing tag instead of merging into it"),
                )
                .arg(Arg::with_name("path").value_name("FILE").required(true))
                .arg(
                    Arg::with_name("pairs")
                        .value_name("KEY=VALUE")
                        .required(true)
                        .multiple(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("strip")
                .about("Remove the tags from files")
                .arg(
                    Arg::with_name("paths")
                        .value_name("FILES")
                        .required(true)
                        .multiple(true),
                ),
        )
        .get_matches();

    let verbose = matches.is_present("verbose")
        || matches
            .subcommand()
            .1
            .map_or(false, |args| args.is_present("verbose"));

    if let Err(err) = PedanticLogger::setup(verbose) {
        errorln!("{}", err);
    }

    let ok = match matches.subcommand() {
        ("show", Some(args)) => {
            let filter: Vec<&str> = args.values_of("tags").into_iter().flatten().collect();
            show::show(args.values_of("paths").into_iter().flatten(), &filter)
        }

        ("write", Some(args)) => {
            let path = args.value_of("path").unwrap_or_default();
            let pairs = args.values_of("pairs").into_iter().flatten();

            match edit::write(path, pairs, args.is_present("replace")) {
                Ok(()) => true,
                Err(err) => {
                    errorln!("{}: {}", path, err);
                    false
                }
            }
        }

        ("strip", Some(args)) => edit::strip(args.values_of("paths").into_iter().flatten()),

        _ => false,
    };

    if !ok {
        process::exit(1);
    }
}
