/// A bookmarked directory as shown in the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub path: String,
}

impl Candidate {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Candidate {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// A candidate scored against one query. Higher ranks are better matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedCandidate {
    pub candidate: Candidate,
    pub rank: u32,
}
