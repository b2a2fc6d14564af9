/// State produced by matching a rule or a token at a subject position
///
/// `far` is the farthest subject offset reached by any token attempt along the path, kept even
/// for failed attempts so that diagnostics point at the deepest progress instead of the last
/// alternative tried.
#[derive(Debug, Clone)]
pub(crate) enum MatchState<V> {
    /// The attempt matched, ending (exclusively) at `end` with the values it produced
    Matched {
        end: usize,
        far: usize,
        vals: Vec<V>,
    },

    /// The attempt failed
    Failed { far: usize },
}

impl<V> MatchState<V> {
    /// Farthest subject offset reached by the attempt
    pub(crate) fn far(&self) -> usize {
        match self {
            MatchState::Matched { far, .. } => *far,
            MatchState::Failed { far } => *far,
        }
    }
}
