//! Stock predicates for [`Collection::filter_by`](crate::Collection::filter_by)
//!
//! `even`/`odd` look at where the element sits among its parent's element
//! children; `simple_even`/`simple_odd` only look at the index inside the
//! collection being filtered. Positions are zero-based: `even` keeps the
//! first, third, fifth... element.

use crate::element::Element;

pub fn even(element: &Element<'_>, _index: usize) -> bool {
    element
        .index_in_parent()
        .map(|position| position % 2 == 0)
        .unwrap_or(false)
}

pub fn odd(element: &Element<'_>, _index: usize) -> bool {
    element
        .index_in_parent()
        .map(|position| position % 2 == 1)
        .unwrap_or(false)
}

pub fn simple_even(_element: &Element<'_>, index: usize) -> bool {
    index % 2 == 0
}

pub fn simple_odd(_element: &Element<'_>, index: usize) -> bool {
    index % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom::DomArena;

    #[test]
    fn test_position_ignores_text_nodes() {
        let mut arena = DomArena::new();
        let ul = arena.create_element("ul");
        let mut items = Vec::new();
        for _ in 0..3 {
            let ws = arena.create_text("\n");
            arena.append_child(ul, ws).unwrap();
            let li = arena.create_element("li");
            arena.append_child(ul, li).unwrap();
            items.push(li);
        }

        let flags: Vec<bool> = items
            .iter()
            .map(|&id| even(&Element::new(&arena, id), 99))
            .collect();
        assert_eq!(flags, vec![true, false, true]);
        assert!(odd(&Element::new(&arena, items[1]), 0));
    }

    #[test]
    fn test_detached_element_is_neither() {
        let mut arena = DomArena::new();
        let lone = arena.create_element("p");
        let element = Element::new(&arena, lone);
        assert!(!even(&element, 0));
        assert!(!odd(&element, 0));
        assert!(simple_even(&element, 0));
        assert!(simple_odd(&element, 3));
    }
}
