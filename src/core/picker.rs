use log::debug;

use super::candidate::{Candidate, RankedCandidate};
use super::filter::FuzzyFilter;
use super::query::QueryInput;

/// What a move-down past the last row wraps against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum WrapPolicy {
    /// Wrap against the total bookmark count, then clamp into the filtered
    /// list. Only wraps back to the top while nothing is filtered out.
    #[default]
    Unfiltered,
    /// Wrap against the filtered list, same as move-up.
    Filtered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Browsing,
    Confirmed,
    Cancelled,
}

/// Events the picker reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Insert(char),
    Backspace,
    Delete,
    DeleteWord,
    ClearQuery,
    CaretLeft,
    CaretRight,
    CaretHome,
    CaretEnd,
    MoveUp,
    MoveDown,
    Accept,
    Cancel,
}

/// Selection state for one picker session.
///
/// Owns the bookmark list, the query, the ranked view for that query and
/// the cursor into it. `cursor < max(1, ranked.len())` holds after every
/// call to [`Picker::handle`].
#[derive(Debug)]
pub struct Picker {
    candidates: Vec<Candidate>,
    ranked: Vec<RankedCandidate>,
    query: QueryInput,
    cursor: usize,
    phase: Phase,
    wrap: WrapPolicy,
    filter: FuzzyFilter,
}

impl Picker {
    pub fn new(candidates: Vec<Candidate>, query: &str, wrap: WrapPolicy) -> Self {
        let mut filter = FuzzyFilter::new();
        let ranked = filter.filter(&candidates, query);
        Picker {
            candidates,
            ranked,
            query: QueryInput::new(query),
            cursor: 0,
            phase: Phase::Browsing,
            wrap,
            filter,
        }
    }

    pub fn query(&self) -> &QueryInput {
        &self.query
    }

    pub fn ranked(&self) -> &[RankedCandidate] {
        &self.ranked
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_exited(&self) -> bool {
        self.phase != Phase::Browsing
    }

    pub fn is_confirmed(&self) -> bool {
        self.phase == Phase::Confirmed
    }

    pub fn total(&self) -> usize {
        self.candidates.len()
    }

    /// The only remaining match, if the current query narrowed to one.
    pub fn sole_match(&self) -> Option<&Candidate> {
        match self.ranked.as_slice() {
            [only] => Some(&only.candidate),
            _ => None,
        }
    }

    /// The accepted candidate. `None` unless confirmed with a non-empty list.
    pub fn selection(&self) -> Option<&Candidate> {
        if !self.is_confirmed() {
            return None;
        }
        self.ranked.get(self.cursor).map(|r| &r.candidate)
    }

    pub fn handle(&mut self, input: Input) {
        if self.is_exited() {
            return;
        }

        match input {
            Input::Accept => self.phase = Phase::Confirmed,
            Input::Cancel => self.phase = Phase::Cancelled,
            Input::MoveUp => self.move_up(),
            Input::MoveDown => self.move_down(),
            Input::CaretLeft => self.query.left(),
            Input::CaretRight => self.query.right(),
            Input::CaretHome => self.query.home(),
            Input::CaretEnd => self.query.end(),
            Input::Insert(c) => self.edit(|q| q.insert(c)),
            Input::Backspace => self.edit(QueryInput::backspace),
            Input::Delete => self.edit(QueryInput::delete),
            Input::DeleteWord => self.edit(QueryInput::delete_word),
            Input::ClearQuery => self.edit(QueryInput::clear),
        }
    }

    fn edit(&mut self, f: impl FnOnce(&mut QueryInput)) {
        let before = self.query.as_str().to_owned();
        f(&mut self.query);
        if self.query.as_str() == before {
            return;
        }

        self.ranked = self.filter.filter(&self.candidates, self.query.as_str());
        self.cursor = 0;
        debug!(
            "query {:?} matched {}/{}",
            self.query.as_str(),
            self.ranked.len(),
            self.candidates.len()
        );
    }

    fn move_down(&mut self) {
        let modulus = match self.wrap {
            WrapPolicy::Unfiltered => self.candidates.len(),
            WrapPolicy::Filtered => self.ranked.len(),
        };
        if modulus == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = ((self.cursor + 1) % modulus).min(self.last());
    }

    fn move_up(&mut self) {
        self.cursor = if self.cursor > 0 {
            self.cursor - 1
        } else {
            self.last()
        };
    }

    fn last(&self) -> usize {
        self.ranked.len().saturating_sub(1)
    }
}
