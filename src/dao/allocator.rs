/**
 * Monotonic identifier allocator for one entity collection.
 *
 * Issues strictly increasing integers starting at 1. Identifiers are never
 * reused, so gaps in a collection only ever come from deletions. Each
 * collection owns exactly one allocator and mutates it under the same lock
 * that guards the collection itself.
 */
#[derive(Debug)]
pub struct IdentityAllocator {
    /**
     * The next identifier to issue.
     */
    next_id: i64,
}

impl IdentityAllocator {
    /**
     * Creates a new allocator starting at 1.
     */
    pub fn new() -> Self {
        IdentityAllocator { next_id: 1 }
    }

    /**
     * Issues the next identifier.
     */
    pub fn next(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_allocator_starts_at_one() {
        let mut allocator = IdentityAllocator::new();
        assert_eq!(allocator.next(), 1);
    }

    #[test]
    fn test_allocator_is_strictly_increasing_without_gaps() {
        let mut allocator = IdentityAllocator::new();
        let ids: Vec<i64> = (0..100).map(|_| allocator.next()).collect();
        for (index, id) in ids.iter().enumerate() {
            assert_eq!(*id, i64::try_from(index).unwrap() + 1);
        }
    }

    #[test]
    fn test_allocators_are_independent() {
        let mut first = IdentityAllocator::new();
        let mut second = IdentityAllocator::new();
        first.next();
        first.next();
        assert_eq!(second.next(), 1);
    }
}
