use clap::{Arg, ArgAction, ArgMatches, Command};
use futures::executor::block_on;
use log::LevelFilter;
use std::path::{Path, PathBuf};
use stitch_core::{
    compose, fetch_all, generate_error_report, load_runtime_library, GameList, HttpProjectSource, HttpPublisher,
    LocalProjectSource, ProjectSource, Publisher, StitchConfig, StitchResult,
};

mod logger;
mod output;

fn main() {
    let cli = Command::new("stitch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Stitches game jam entries into one shared project");

    let cli = setup_cli(cli);
    let matches = cli.get_matches();

    let level = match (matches.get_flag("quiet"), matches.get_count("verbose")) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Info,
        (false, _) => LevelFilter::Debug,
    };
    if let Err(e) = logger::init(level) {
        eprintln!("logger already installed: {}", e);
    }

    if let Err(e) = dispatch_commands(&matches) {
        output::print_error(&generate_error_report(e.as_ref()));
        std::process::exit(1);
    }
}

/// Sets up the CLI with its subcommands and arguments.
fn setup_cli(cli: Command) -> Command {
    cli.arg(
        Arg::new("verbose")
            .help("More log output (repeat for debug)")
            .short('v')
            .long("verbose")
            .action(ArgAction::Count)
            .global(true),
    )
    .arg(
        Arg::new("quiet")
            .help("Only log errors")
            .short('q')
            .long("quiet")
            .action(ArgAction::SetTrue)
            .global(true),
    )
    .subcommand(
        Command::new("build")
            .about("Fetch every game in the list, stitch them together and publish the result")
            .arg(
                Arg::new("games")
                    .help("JSON game list ({\"games\": [{\"url\", \"author\"}]})")
                    .required(true)
                    .index(1),
            )
            .arg(
                Arg::new("config")
                    .help("Config file (defaults to $STITCH_CONFIG, then built-in defaults)")
                    .short('c')
                    .long("config")
                    .value_parser(clap::value_parser!(String))
                    .value_name("FILE"),
            )
            .arg(
                Arg::new("local")
                    .help("Read games from <DIR>/<project id>/ instead of the network")
                    .short('l')
                    .long("local")
                    .value_parser(clap::value_parser!(String))
                    .value_name("DIR"),
            )
            .arg(
                Arg::new("out")
                    .help("Also write the bundle files into this directory")
                    .short('o')
                    .long("out")
                    .value_parser(clap::value_parser!(String))
                    .value_name("DIR"),
            )
            .arg(
                Arg::new("runtime-lib")
                    .help("Runtime library copied into the bundle")
                    .long("runtime-lib")
                    .value_parser(clap::value_parser!(String))
                    .value_name("FILE"),
            )
            .arg(
                Arg::new("no-publish")
                    .help("Stop after composing; do not upload")
                    .long("no-publish")
                    .action(ArgAction::SetTrue),
            ),
    )
}

/// Dispatches the command based on the parsed arguments.
fn dispatch_commands(matches: &ArgMatches) -> StitchResult<()> {
    match matches.subcommand() {
        Some(("build", sub_m)) => run_build(sub_m),
        _ => {
            println!("No valid subcommand was used. Use --help for more information.");
            Ok(())
        }
    }
}

fn run_build(sub_m: &ArgMatches) -> StitchResult<()> {
    let games_path = sub_m.get_one::<String>("games").map(PathBuf::from).unwrap_or_default();

    let mut config = StitchConfig::resolve(sub_m.get_one::<String>("config").map(Path::new))?;
    if let Some(lib) = sub_m.get_one::<String>("runtime-lib") {
        config.runtime_library = PathBuf::from(lib);
    }

    let games = GameList::load_from_file(&games_path)?;
    let source: Box<dyn ProjectSource> = match sub_m.get_one::<String>("local") {
        Some(dir) => Box::new(LocalProjectSource::new(PathBuf::from(dir), &config)),
        None => Box::new(HttpProjectSource::new(&config)),
    };

    let spinner = output::spinner(format!("fetching {} games", games.games.len()));
    let projects = block_on(fetch_all(source.as_ref(), &games.games));
    spinner.finish_and_clear();
    let projects = projects?;

    let runtime_library = load_runtime_library(&config.runtime_library)?;
    let bundle = compose(&projects, &runtime_library, &config)?;
    output::print_summary(&bundle);

    if let Some(out) = sub_m.get_one::<String>("out") {
        bundle.write_to_dir(out)?;
        output::print_status("written", out);
    }

    if sub_m.get_flag("no-publish") {
        return Ok(());
    }

    let spinner = output::spinner("publishing bundle".to_string());
    let published = block_on(HttpPublisher::new(&config).publish(&bundle));
    spinner.finish_and_clear();
    output::print_status("published", &published?);
    Ok(())
}
