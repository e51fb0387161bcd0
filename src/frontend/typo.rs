//! In-place typo fixing
//!
//! When a type name does not resolve, close registered names are offered as
//! replacements. Closeness compares letter counts: the score of two strings
//! is the sum, over every letter, of the difference of its occurrences
//! (case-folded). An accepted replacement is written back into the source
//! file on the line where the typo was found.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::utils::{Error, Result};

/// Share of the target length allowed as length difference and score
const MAX_DISTANCE_RATIO: f64 = 0.25;
/// Floor for the allowed distance, so short names still get candidates
const MIN_DISTANCE: f64 = 3.0;

/// Letter multiset of a string, case-folded
pub fn letter_counts(s: &str) -> BTreeMap<char, usize> {
    let mut result = BTreeMap::new();
    for c in s.chars().flat_map(char::to_lowercase) {
        *result.entry(c).or_insert(0) += 1;
    }
    result
}

/// Sum of per-letter count differences between `a` and `b`
pub fn score(a: &str, b: &str) -> usize {
    let a = letter_counts(a);
    let b = letter_counts(b);

    a.keys()
        .chain(b.keys())
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .map(|k| a.get(k).copied().unwrap_or(0).abs_diff(b.get(k).copied().unwrap_or(0)))
        .sum()
}

/// Maximum length difference and score for candidates of `target`
pub fn max_distance(target: &str) -> f64 {
    (target.chars().count() as f64 * MAX_DISTANCE_RATIO).max(MIN_DISTANCE)
}

/// Candidates close enough to `target`, best first. Equal scores keep pool
/// order.
pub fn find_closest(target: &str, pool: &[String]) -> Vec<String> {
    let target_len = target.chars().count() as f64;
    let max = max_distance(target);

    let mut scored: Vec<(&String, usize)> = pool
        .iter()
        .filter(|c| (c.chars().count() as f64 - target_len).abs() <= max)
        .map(|c| (c, score(target, c)))
        .filter(|(_, s)| *s as f64 <= max)
        .collect();

    scored.sort_by_key(|(_, s)| *s);
    scored.into_iter().map(|(c, _)| c.clone()).collect()
}

/// What the resolver is asked to decide
#[derive(Debug, Clone)]
pub struct CorrectionRequest<'a> {
    /// What kind of name failed to resolve ("type", ...)
    pub group: &'a str,
    pub target: &'a str,
    /// Candidates, best first; never empty
    pub candidates: &'a [String],
    /// Rendered cursor pointing at the unresolved name
    pub cursor: &'a str,
}

/// Decides whether an unresolved name should be replaced
pub trait CorrectionResolver {
    /// Return the chosen candidate, or `None` to decline
    fn resolve(&mut self, request: &CorrectionRequest<'_>) -> Option<String>;
}

/// Declines every correction
#[derive(Debug, Default, Clone, Copy)]
pub struct Decline;

impl CorrectionResolver for Decline {
    fn resolve(&mut self, _request: &CorrectionRequest<'_>) -> Option<String> {
        None
    }
}

/// Always takes the best candidate
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptBest;

impl CorrectionResolver for AcceptBest {
    fn resolve(&mut self, request: &CorrectionRequest<'_>) -> Option<String> {
        request.candidates.first().cloned()
    }
}

/// Asks on the terminal: candidates are numbered, `-1` cancels
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl ConsolePrompt<io::StdinLock<'static>, io::Stderr> {
    pub fn stdio() -> Self {
        Self {
            input: io::stdin().lock(),
            output: io::stderr(),
        }
    }
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn prompt(&self, request: &CorrectionRequest<'_>) -> String {
        let mut prompt = format!(
            "{}\n[?] Unknown {} \"{}\".\nClosest candidates are:\n",
            request.cursor, request.group, request.target
        );
        for (i, candidate) in request.candidates.iter().enumerate() {
            prompt.push_str(&format!("{}. {}\n", i, candidate));
        }
        prompt.push_str(&format!(
            "\nEnter number of the candidate to replace \"{}\" with, or -1 to cancel: ",
            request.target
        ));
        prompt
    }
}

impl<R: BufRead, W: Write> CorrectionResolver for ConsolePrompt<R, W> {
    fn resolve(&mut self, request: &CorrectionRequest<'_>) -> Option<String> {
        let prompt = self.prompt(request);
        let mut prefix = String::new();

        loop {
            write!(self.output, "{}{}", prefix, prompt).ok()?;
            self.output.flush().ok()?;

            let mut line = String::new();
            if self.input.read_line(&mut line).ok()? == 0 {
                return None;
            }

            match line.trim().parse::<i64>() {
                Ok(-1) => return None,
                Ok(choice) if choice >= 0 && (choice as usize) < request.candidates.len() => {
                    return Some(request.candidates[choice as usize].clone());
                }
                _ => prefix = format!("\"{}\" is out of range.\n", line.trim()),
            }
        }
    }
}

/// Candidate search plus a per-session memo of decisions
pub struct TypoCorrector {
    resolver: Box<dyn CorrectionResolver>,
    decisions: HashMap<String, Option<String>>,
}

impl TypoCorrector {
    pub fn new(resolver: Box<dyn CorrectionResolver>) -> Self {
        Self {
            resolver,
            decisions: HashMap::new(),
        }
    }

    /// Propose a replacement for `target`. Each target is decided at most
    /// once; later occurrences reuse the decision without asking.
    pub fn propose(&mut self, group: &str, target: &str, pool: &[String], cursor: &str) -> Option<String> {
        if let Some(decision) = self.decisions.get(target) {
            return decision.clone();
        }

        let candidates = find_closest(target, pool);
        if candidates.is_empty() {
            return None;
        }

        let request = CorrectionRequest {
            group,
            target,
            candidates: &candidates,
            cursor,
        };
        let decision = self
            .resolver
            .resolve(&request)
            .filter(|choice| candidates.contains(choice));

        log::debug!("typo decision for {:?}: {:?}", target, decision);
        self.decisions.insert(target.to_string(), decision.clone());
        decision
    }

    /// Decision already taken for `target`, if any
    pub fn decision(&self, target: &str) -> Option<&Option<String>> {
        self.decisions.get(target)
    }
}

impl Default for TypoCorrector {
    fn default() -> Self {
        Self::new(Box::new(Decline))
    }
}

/// Replace the first occurrence of `target` on one-based `line` of `path`.
/// Returns the new file contents.
pub fn apply_fix(path: &Path, line: usize, target: &str, replacement: &str) -> Result<String> {
    let data = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let mut lines: Vec<String> = data.split_inclusive('\n').map(str::to_string).collect();

    let found = line
        .checked_sub(1)
        .and_then(|i| lines.get_mut(i))
        .filter(|l| l.contains(target));

    let Some(text) = found else {
        return Err(Error::Io {
            path: path.to_path_buf(),
            message: format!("line {} does not contain \"{}\"", line, target),
        });
    };
    *text = text.replacen(target, replacement, 1);

    let updated = lines.concat();
    fs::write(path, &updated).map_err(|e| Error::io(path, e))?;
    Ok(updated)
}
