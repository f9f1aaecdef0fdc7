use std::fmt;

/// Columns played so far, in commit order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MoveLog(Vec<usize>);

impl MoveLog {
    pub fn new() -> Self {
        MoveLog(Vec::new())
    }

    pub fn push(&mut self, column: usize) {
        self.0.push(column);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Most recent column, i.e. the suggested move in a service reply
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    /// True if `self` begins with every move of `other`, in order.
    pub fn starts_with(&self, other: &MoveLog) -> bool {
        self.0.starts_with(&other.0)
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl From<Vec<usize>> for MoveLog {
    fn from(moves: Vec<usize>) -> Self {
        MoveLog(moves)
    }
}

impl FromIterator<usize> for MoveLog {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        MoveLog(iter.into_iter().collect())
    }
}

/// Renders as `[c0,c1,...]`, the form the move service expects.
impl fmt::Display for MoveLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, column) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", column)?;
        }
        f.write_str("]")
    }
}
