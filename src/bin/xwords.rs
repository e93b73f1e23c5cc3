use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use log::info;
use xwords::{
    crossword::Crossword, wordlist::load_words, BacktrackingFiller, Filler, FillerConfig, Puzzle,
};

fn command() -> Command {
    Command::new("xwords")
        .about("Fills a crossword structure from a word list")
        .arg(
            Arg::new("structure")
                .short('s')
                .long("structure")
                .value_name("FILE")
                .help("Crossword structure: '_' for open cells, '#' for blocked cells")
                .required(true),
        )
        .arg(
            Arg::new("words")
                .short('w')
                .long("words")
                .value_name("FILE")
                .help("Word list: one word per line, or a JSON array")
                .required(true),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Also write the filled grid to this file as text"),
        )
        .arg(
            Arg::new("no-arc-consistency")
                .long("no-arc-consistency")
                .help("Skip AC-3 pruning and rely on search alone")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stats")
                .long("stats")
                .help("Print search statistics")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("profile")
                .short('p')
                .long("profile")
                .help("Write flamegraph.svg (requires the `profile` feature)")
                .action(ArgAction::SetTrue),
        )
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = command().get_matches();

    let structure = matches
        .get_one::<String>("structure")
        .context("--structure is required")?;
    let contents = std::fs::read_to_string(structure)
        .with_context(|| format!("Failed to read structure {}", structure))?;
    let crossword = Crossword::parse(&contents)
        .with_context(|| format!("Failed to parse structure {}", structure))?;

    let words_path = matches
        .get_one::<String>("words")
        .context("--words is required")?;
    let words = load_words(words_path)
        .with_context(|| format!("Failed to load words from {}", words_path))?;

    let puzzle = Puzzle::from_crossword(&crossword, words)?;
    info!(
        "{}x{} grid with {} slots and {} candidate words",
        crossword.width(),
        crossword.height(),
        puzzle.slot_count(),
        puzzle.words().len()
    );

    let config = FillerConfig {
        enforce_arc_consistency: !matches.get_flag("no-arc-consistency"),
        ..FillerConfig::default()
    };
    let mut filler = BacktrackingFiller::new(config);

    #[cfg(feature = "profile")]
    let guard = if matches.get_flag("profile") {
        Some(pprof::ProfilerGuard::new(100)?)
    } else {
        None
    };
    #[cfg(not(feature = "profile"))]
    {
        if matches.get_flag("profile") {
            log::warn!("Built without the `profile` feature, ignoring --profile");
        }
    }

    let solution = filler.fill(&puzzle);

    #[cfg(feature = "profile")]
    {
        if let Some(guard) = guard {
            let report = guard.report().build()?;
            let file = std::fs::File::create("flamegraph.svg")?;
            report.flamegraph(file)?;
            info!("Wrote flamegraph.svg");
        }
    }

    match solution {
        Some(solution) => {
            let filled = crossword.with_solution(&puzzle, &solution)?;
            println!("{}", filled);

            if let Some(output) = matches.get_one::<String>("output") {
                std::fs::write(output, filled.to_string())
                    .with_context(|| format!("Failed to write {}", output))?;
                info!("Wrote {}", output);
            }
        }
        None => println!("No solution."),
    }

    if matches.get_flag("stats") {
        println!("{}", filler.statistics());
    }

    Ok(())
}
