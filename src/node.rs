#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle {
    pub(crate) index: usize,
}

impl NodeHandle {
    pub fn index(&self) -> usize {
        self.index
    }
}
