use anyhow::{Context, Result};
use blogsmith::build::build_site;
use blogsmith::config::Config;
use clap::{App, Arg, ArgMatches};
use log::{error, info, LevelFilter};
use simple_logger::SimpleLogger;
use std::path::{Path, PathBuf};

fn main() {
    let matches = App::new("blogsmith")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Builds a static blog from a directory of markdown posts")
        .arg(
            Arg::with_name("project")
                .long("project")
                .short("p")
                .value_name("DIR")
                .takes_value(true)
                .help("Directory to search (with its parents) for blog.yaml [default: .]"),
        )
        .arg(
            Arg::with_name("output")
                .long("output")
                .short("o")
                .value_name("DIR")
                .takes_value(true)
                .help("Overrides the configured output directory"),
        )
        .arg(
            Arg::with_name("verbose")
                .long("verbose")
                .short("v")
                .help("Logs every file read and written"),
        )
        .get_matches();

    let level = match matches.is_present("verbose") {
        true => LevelFilter::Debug,
        false => LevelFilter::Info,
    };
    if let Err(e) = SimpleLogger::new().with_level(level).init() {
        eprintln!("Initializing logger: {}", e);
    }

    if let Err(e) = run(&matches) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    let project = match matches.value_of("project") {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir().context("Getting current directory")?,
    };

    let mut config = Config::from_directory(&project)?;
    if let Some(output) = matches.value_of("output") {
        config = config.with_output_directory(Path::new(output));
    }

    let summary = build_site(&config).context("Building site")?;
    info!("Build complete");
    for line in summary.to_string().lines() {
        info!("{}", line);
    }
    Ok(())
}
