use xwords::crossword::Crossword;
use xwords::fill::backtracking::BacktrackingFiller;
use xwords::fill::{Filler, FillerConfig};
use xwords::puzzle::Puzzle;
use xwords::wordlist::parse_words;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let structure = Crossword::parse(include_str!("data/structure0.txt")).unwrap();
    // No five letter word, so the long down slot can never be filled.
    let words = parse_words("one\ntwo\nsix\nten\nfour\nfive\nnine\n");
    let puzzle = Puzzle::from_crossword(&structure, words).unwrap();

    for enforce_arc_consistency in [true, false] {
        let mut filler = BacktrackingFiller::new(FillerConfig {
            enforce_arc_consistency,
            ..FillerConfig::default()
        });
        assert!(filler.fill(&puzzle).is_none());

        println!("arc consistency: {}", enforce_arc_consistency);
        println!("{}\n", filler.statistics());
    }
}
