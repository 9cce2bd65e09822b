//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Remove every entity whose identifier matches `id`, returning how many went.
pub fn remove_by_id<E: Entity>(items: &mut Vec<E>, id: &E::Id) -> usize {
    let before = items.len();
    items.retain(|item| item.id() != id);
    before - items.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Row {
        id: u32,
    }

    impl Entity for Row {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.id
        }
    }

    #[test]
    fn remove_by_id_keeps_other_rows_in_order() {
        let mut rows = vec![Row { id: 1 }, Row { id: 2 }, Row { id: 3 }];
        assert_eq!(remove_by_id(&mut rows, &2), 1);
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(remove_by_id(&mut rows, &42), 0);
    }
}
