//! Loading candidate words from disk.

use crate::error::{Error, Result};
use log::debug;
use rustc_hash::FxHashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One word per line. Blank lines and `#` comments are skipped, words are upper-cased and
/// only the first occurrence of each is kept.
pub fn parse_words(text: &str) -> Vec<String> {
    normalize(text.lines())
}

/// Reads a word list. `.json` files hold either an array of words or an object keyed by word;
/// anything else goes through `parse_words`.
pub fn load_words<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .map_or(false, |extension| extension.eq_ignore_ascii_case("json"));

    let words = if is_json {
        let file = File::open(path)?;
        let json: serde_json::Value = serde_json::from_reader(BufReader::new(file))?;
        words_from_json(&json)?
    } else {
        parse_words(&std::fs::read_to_string(path)?)
    };

    debug!("Loaded {} words from {}", words.len(), path.display());
    Ok(words)
}

fn words_from_json(json: &serde_json::Value) -> Result<Vec<String>> {
    match json {
        serde_json::Value::Array(entries) => {
            let words: Vec<&str> = entries
                .iter()
                .map(|entry| entry.as_str().ok_or(Error::UnexpectedJson))
                .collect::<Result<_>>()?;
            Ok(normalize(words))
        }
        serde_json::Value::Object(entries) => Ok(normalize(entries.keys().map(String::as_str))),
        _ => Err(Error::UnexpectedJson),
    }
}

fn normalize<'a, I: IntoIterator<Item = &'a str>>(lines: I) -> Vec<String> {
    let mut seen = FxHashSet::default();
    lines
        .into_iter()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_uppercase)
        .filter(|word| seen.insert(word.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{load_words, parse_words};
    use crate::error::Error;
    use std::io::Write;

    #[test]
    fn parse_words_works() {
        let words = parse_words("cat\n  dog \n\n# animals\nCat\nbird\n");
        assert_eq!(vec!["CAT", "DOG", "BIRD"], words);
    }

    #[test]
    fn load_text_works() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "one\ntwo\nONE").unwrap();

        assert_eq!(vec!["ONE", "TWO"], load_words(file.path()).unwrap());
    }

    #[test]
    fn load_json_array_works() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"["cat", " art", "CAT", ""]"#).unwrap();

        assert_eq!(vec!["CAT", "ART"], load_words(file.path()).unwrap());
    }

    #[test]
    fn load_json_object_works() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"cat": 50, "art": 40}}"#).unwrap();

        let mut words = load_words(file.path()).unwrap();
        words.sort();
        assert_eq!(vec!["ART", "CAT"], words);
    }

    #[test]
    fn load_rejects_bad_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "[1, 2").unwrap();
        assert!(matches!(load_words(file.path()), Err(Error::Json(_))));

        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "[1, 2]").unwrap();
        assert!(matches!(load_words(file.path()), Err(Error::UnexpectedJson)));
    }

    #[test]
    fn load_missing_file_fails() {
        assert!(matches!(
            load_words("no/such/words.txt"),
            Err(Error::Io(_))
        ));
    }
}
