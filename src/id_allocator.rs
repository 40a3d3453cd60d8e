/// Hands out entry ids. Ids are never reused for the lifetime of the allocator,
/// including ids of entries that have since been removed.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next_id: usize,
}

impl IdAllocator {
    pub fn new() -> Self {
        IdAllocator { next_id: 0 }
    }

    pub fn next(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The id the next call to [`IdAllocator::next`] will return.
    pub fn peek(&self) -> usize {
        self.next_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero_and_is_monotonic() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.peek(), 0);
        let taken: Vec<usize> = (0..4).map(|_| ids.next()).collect();
        assert_eq!(taken, vec![0, 1, 2, 3]);
        assert_eq!(ids.peek(), 4);
    }
}
