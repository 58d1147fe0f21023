//! Sibling renumbering
//!
//! When a dragged item passes over a sibling, the dragged item takes the
//! sibling's position and everything in between slides one slot toward the
//! gap it left behind:
//!
//! ```text
//! drag 3 over 1 (upward)        drag 0 over 2 (downward)
//! before: A0 B1 C2 D3           before: A0 B1 C2 D3
//! after:  A0 D1 B2 C3           after:  B0 C1 A2 D3
//! ```
//!
//! The positions of the sibling set stay exactly `0..N-1` after every call,
//! which is what lets hover events fire repeatedly during one gesture.

/// Something ranked among its siblings
pub trait Ordered {
    fn order(&self) -> usize;
    fn set_order(&mut self, order: usize);
}

/// Maps one sibling's old position to its new one
///
/// `dragged` and `hovered` are the old positions of the dragged item and
/// the item it is hovering over.
pub fn shifted(position: usize, dragged: usize, hovered: usize) -> usize {
    if position == dragged {
        hovered
    } else if dragged > hovered && (hovered..dragged).contains(&position) {
        position + 1
    } else if dragged < hovered && position > dragged && position <= hovered {
        position - 1
    } else {
        position
    }
}

/// Applies the drag of the item at `dragged` onto the item at `hovered`
///
/// Returns the siblings unchanged when the two positions are equal or when
/// either is outside `0..N-1`.
pub fn renumber<T: Ordered + Clone>(siblings: &[T], dragged: usize, hovered: usize) -> Vec<T> {
    let len = siblings.len();
    if dragged == hovered || dragged >= len || hovered >= len {
        return siblings.to_vec();
    }

    siblings
        .iter()
        .map(|sibling| {
            let mut sibling = sibling.clone();
            let order = shifted(sibling.order(), dragged, hovered);
            sibling.set_order(order);
            sibling
        })
        .collect()
}
