use std::time::Instant;
use xwords::crossword::Crossword;
use xwords::fill::backtracking::BacktrackingFiller;
use xwords::fill::Filler;
use xwords::puzzle::Puzzle;
use xwords::wordlist::parse_words;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    let now = Instant::now();

    let structure = Crossword::parse(include_str!("data/structure0.txt")).unwrap();
    let words = parse_words(include_str!("data/words0.txt"));
    println!("{}", structure);

    let puzzle = Puzzle::from_crossword(&structure, words).unwrap();
    let mut filler = BacktrackingFiller::default();
    let solution = filler.fill(&puzzle).unwrap();

    println!("Filled in {}ms.", now.elapsed().as_millis());
    println!("{}", structure.with_solution(&puzzle, &solution).unwrap());
    println!("{}", filler.statistics());
}
