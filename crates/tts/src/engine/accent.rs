use std::{collections::HashMap, path::Path, process::Command};

use super::{Accentizer, display_program, run_captured};
use crate::error::EngineError;

/// Stress mark placed before the stressed vowel
const STRESS_MARK: char = '+';

/// Leaves text untouched
pub struct Passthrough;

impl Accentizer for Passthrough {
    fn accentize(&self, text: &str) -> Result<String, EngineError> {
        Ok(text.to_string())
    }

    fn name(&self) -> &str {
        "none"
    }
}

/// Word-level stress dictionary
///
/// Each non-comment line holds either an accented word (`мол+око`) or a
/// `word<TAB>accented` pair. Lookups are case-insensitive and the original
/// capitalization is carried over to the annotated word. Words that already
/// carry a stress mark are left alone.
#[derive(Debug, Default)]
pub struct DictionaryAccentizer {
    entries: HashMap<String, String>,
}

impl DictionaryAccentizer {
    /// Load a dictionary file
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let raw = std::fs::read_to_string(path)?;
        let mut dictionary = Self::default();

        for (index, line) in raw.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let (word, accented) = match line.split_once('\t') {
                Some((word, accented)) => (word.trim().to_string(), accented.trim()),
                None => (trimmed.replace(STRESS_MARK, ""), trimmed),
            };

            if word.is_empty() || accented.is_empty() {
                return Err(EngineError::Dictionary {
                    path: path.to_path_buf(),
                    line: index + 1,
                    reason: "expected `word<TAB>accented` or an accented word".to_string(),
                });
            }

            dictionary.insert(&word, accented);
        }

        tracing::info!(
            path = %path.display(),
            entries = dictionary.entries.len(),
            "stress dictionary loaded"
        );

        Ok(dictionary)
    }

    /// Build a dictionary from accented words
    pub fn from_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        let mut dictionary = Self::default();
        for accented in words {
            dictionary.insert(&accented.replace(STRESS_MARK, ""), accented);
        }
        dictionary
    }

    /// Number of lookup keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, word: &str, accented: &str) {
        let key = word.to_lowercase();

        // Text rarely spells out `ё`, so index the `е` spelling as well
        if key.contains('ё') {
            self.entries
                .entry(key.replace('ё', "е"))
                .or_insert_with(|| accented.to_string());
        }

        self.entries.insert(key, accented.to_string());
    }

    fn annotate(&self, word: &str, out: &mut String) {
        let accented = (!word.contains(STRESS_MARK))
            .then(|| self.entries.get(&word.to_lowercase()))
            .flatten();

        match accented {
            Some(accented) => out.push_str(&carry_case(word, accented)),
            None => out.push_str(word),
        }
    }
}

impl Accentizer for DictionaryAccentizer {
    fn accentize(&self, text: &str) -> Result<String, EngineError> {
        let mut out = String::with_capacity(text.len() + 8);
        let mut word = String::new();

        for c in text.chars() {
            if c.is_alphabetic() || c == STRESS_MARK {
                word.push(c);
            } else {
                self.annotate(&word, &mut out);
                word.clear();
                out.push(c);
            }
        }
        self.annotate(&word, &mut out);

        Ok(out)
    }

    fn name(&self) -> &str {
        "dictionary"
    }
}

/// Copy the capitalization of `original` onto the dictionary form
fn carry_case(original: &str, accented: &str) -> String {
    let letters = accented.chars().filter(|c| *c != STRESS_MARK).count();
    if letters != original.chars().count() {
        return accented.to_string();
    }

    let mut source = original.chars();
    let mut out = String::with_capacity(accented.len());

    for c in accented.chars() {
        if c == STRESS_MARK {
            out.push(c);
        } else if source.next().is_some_and(char::is_uppercase) {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
    }

    out
}

/// External accentizer process
///
/// The program receives the text on stdin and prints the annotated text.
pub struct CommandAccentizer {
    program: String,
    args: Vec<String>,
    name: String,
}

impl CommandAccentizer {
    pub fn new(program: String, args: Vec<String>) -> Self {
        let name = display_program(program.as_ref());
        Self { program, args, name }
    }
}

impl Accentizer for CommandAccentizer {
    fn accentize(&self, text: &str) -> Result<String, EngineError> {
        let mut command = Command::new(&self.program);
        command.args(&self.args);

        let output = run_captured(command, Some(text.as_bytes()))?;
        let annotated = String::from_utf8_lossy(&output.stdout);

        Ok(annotated.trim_end_matches(['\r', '\n']).to_string())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
