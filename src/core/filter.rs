use nucleo_matcher::pattern::{Atom, AtomKind, CaseMatching, Normalization};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use super::candidate::{Candidate, RankedCandidate};

/// Rank given to every candidate when the query is empty.
pub const NEUTRAL_RANK: u32 = 1;

/// Fuzzy ranker over candidate names.
///
/// The query has to appear as a case-insensitive subsequence of a name for
/// that candidate to be kept. Tighter matches score higher.
pub struct FuzzyFilter {
    matcher: Matcher,
    buf: Vec<char>,
}

impl Default for FuzzyFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FuzzyFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuzzyFilter").finish_non_exhaustive()
    }
}

impl FuzzyFilter {
    pub fn new() -> Self {
        FuzzyFilter {
            matcher: Matcher::new(Config::DEFAULT),
            buf: Vec::new(),
        }
    }

    pub fn filter(&mut self, candidates: &[Candidate], query: &str) -> Vec<RankedCandidate> {
        if query.is_empty() {
            return candidates
                .iter()
                .map(|candidate| RankedCandidate {
                    candidate: candidate.clone(),
                    rank: NEUTRAL_RANK,
                })
                .collect();
        }

        // both sides are lowered up front, so the atom can match case-sensitively
        let needle = query.to_lowercase();
        let atom = Atom::new(
            &needle,
            CaseMatching::Respect,
            Normalization::Never,
            AtomKind::Fuzzy,
            false,
        );

        let mut ranked: Vec<RankedCandidate> = candidates
            .iter()
            .filter_map(|candidate| {
                let name = candidate.name.to_lowercase();
                let haystack = Utf32Str::new(&name, &mut self.buf);
                atom.score(haystack, &mut self.matcher)
                    .map(|score| RankedCandidate {
                        candidate: candidate.clone(),
                        rank: u32::from(score),
                    })
            })
            .collect();

        // stable: equal ranks keep bookmark order
        ranked.sort_by(|a, b| b.rank.cmp(&a.rank));
        ranked
    }
}

/// One-shot convenience over [`FuzzyFilter::filter`].
pub fn filter(candidates: &[Candidate], query: &str) -> Vec<RankedCandidate> {
    FuzzyFilter::new().filter(candidates, query)
}
