pub trait RandomSource: Send {
    /// Returns an index drawn uniformly from `0..=max`.
    fn index_up_to(&mut self, max: usize) -> usize;
}
