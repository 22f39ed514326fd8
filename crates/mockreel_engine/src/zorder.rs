// SPDX-License-Identifier: MIT OR Apache-2.0
//! Z-order operations over the combined layer stack.

use crate::composition::Composition;
use crate::layer::LayerId;
use serde::{Deserialize, Serialize};

/// Direction for a single-step or jump reorder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReorderDirection {
    /// Above every other layer
    Front,
    /// Below every other layer
    Back,
    /// Swap with the next layer up
    Forward,
    /// Swap with the next layer down
    Backward,
}

impl Composition {
    /// Layer ids with their z-index, ascending by z (ties keep insertion order)
    fn stack_ascending(&self) -> Vec<(LayerId, i32)> {
        let mut stack: Vec<(LayerId, i32)> = self.layers().map(|l| (l.id, l.z_index)).collect();
        stack.sort_by_key(|&(_, z)| z);
        stack
    }

    /// Layer ids from topmost to bottommost
    pub fn stack_descending(&self) -> Vec<LayerId> {
        let mut stack: Vec<(LayerId, i32)> = self.layers().map(|l| (l.id, l.z_index)).collect();
        stack.sort_by(|a, b| b.1.cmp(&a.1));
        stack.into_iter().map(|(id, _)| id).collect()
    }

    fn set_z_index(&mut self, id: LayerId, z_index: i32) {
        if let Some(layer) = self.layer_mut(id) {
            layer.z_index = z_index;
        }
    }

    /// Move a layer to the front/back or one step up/down; unknown ids are ignored
    pub fn reorder(&mut self, id: LayerId, direction: ReorderDirection) {
        let stack = self.stack_ascending();
        let Some(index) = stack.iter().position(|&(layer_id, _)| layer_id == id) else {
            return;
        };
        let current = stack[index].1;

        match direction {
            ReorderDirection::Front => {
                let max = stack.last().map_or(current, |&(_, z)| z);
                self.set_z_index(id, max + 1);
            }
            ReorderDirection::Back => {
                let min = stack.first().map_or(current, |&(_, z)| z);
                self.set_z_index(id, min - 1);
            }
            ReorderDirection::Forward => {
                if let Some(&(above, above_z)) = stack.get(index + 1) {
                    self.set_z_index(id, above_z);
                    self.set_z_index(above, current);
                }
            }
            ReorderDirection::Backward => {
                if let Some(&(below, below_z)) = index.checked_sub(1).and_then(|i| stack.get(i)) {
                    self.set_z_index(id, below_z);
                    self.set_z_index(below, current);
                }
            }
        }

        tracing::debug!("Reordered layer {:?} {:?}", id, direction);
    }

    /// Drag-to-reorder: put `dragged` at `target`'s place in the top-down list,
    /// then renumber every layer densely (topmost gets the layer count, bottom 1).
    pub fn move_to(&mut self, dragged: LayerId, target: LayerId) {
        let mut stack = self.stack_descending();
        let from = stack.iter().position(|&id| id == dragged);
        let to = stack.iter().position(|&id| id == target);
        let (Some(from), Some(to)) = (from, to) else {
            return;
        };
        if from == to {
            return;
        }

        let item = stack.remove(from);
        stack.insert(to, item);

        let count = stack.len() as i32;
        for (position, id) in stack.into_iter().enumerate() {
            self.set_z_index(id, count - position as i32);
        }

        tracing::debug!("Moved layer {:?} to position {}", dragged, to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{DeviceType, OverlayKind};
    use std::collections::BTreeSet;

    fn three_layers() -> (Composition, [LayerId; 3]) {
        let mut composition = Composition::new();
        let a = composition.add_frame(DeviceType::Iphone15);
        let b = composition.add_overlay(OverlayKind::Text, None);
        let c = composition.add_frame(DeviceType::MacbookAir);
        (composition, [a, b, c])
    }

    fn z(composition: &Composition, id: LayerId) -> i32 {
        composition.layer(id).map(|l| l.z_index).expect("layer exists")
    }

    #[test]
    fn test_front_scenario() {
        let (mut composition, [a, b, c]) = three_layers();
        composition.reorder(b, ReorderDirection::Front);
        assert_eq!(z(&composition, b), 4);
        assert_eq!(z(&composition, a), 1);
        assert_eq!(z(&composition, c), 3);
    }

    #[test]
    fn test_back() {
        let (mut composition, [a, b, c]) = three_layers();
        composition.reorder(c, ReorderDirection::Back);
        assert_eq!(z(&composition, c), 0);
        assert_eq!(composition.stack_descending(), vec![b, a, c]);
    }

    #[test]
    fn test_forward_and_backward_swap() {
        let (mut composition, [a, b, c]) = three_layers();
        composition.reorder(a, ReorderDirection::Forward);
        assert_eq!((z(&composition, a), z(&composition, b)), (2, 1));

        composition.reorder(c, ReorderDirection::Backward);
        assert_eq!((z(&composition, c), z(&composition, a)), (2, 3));
        assert_eq!(composition.stack_descending(), vec![a, c, b]);
    }

    #[test]
    fn test_boundary_steps_are_noops() {
        let (mut composition, [a, _, c]) = three_layers();
        composition.reorder(c, ReorderDirection::Forward);
        assert_eq!(z(&composition, c), 3);
        composition.reorder(a, ReorderDirection::Backward);
        assert_eq!(z(&composition, a), 1);
        composition.reorder(LayerId::new(), ReorderDirection::Front);
        assert_eq!(composition.next_z_index(), 4);
    }

    #[test]
    fn test_move_to_renumbers_densely() {
        let (mut composition, [a, b, c]) = three_layers();
        composition.reorder(b, ReorderDirection::Front);
        composition.reorder(a, ReorderDirection::Back);
        let d = composition.add_overlay(OverlayKind::Emoji, None);
        // Stack top-down is now d(5), b(4), c(3), a(0)

        composition.move_to(a, b);
        assert_eq!(composition.stack_descending(), vec![d, a, b, c]);

        let zs: BTreeSet<i32> = composition.layers().map(|l| l.z_index).collect();
        assert_eq!(zs, (1..=4).collect::<BTreeSet<i32>>());
        assert_eq!(z(&composition, d), 4);
        assert_eq!(z(&composition, c), 1);
    }

    #[test]
    fn test_move_to_downwards() {
        let (mut composition, [a, b, c]) = three_layers();
        composition.move_to(c, a);
        assert_eq!(composition.stack_descending(), vec![b, a, c]);
    }

    #[test]
    fn test_move_to_unknown_or_same_is_noop() {
        let (mut composition, [a, b, _]) = three_layers();
        composition.reorder(b, ReorderDirection::Front);
        composition.move_to(a, a);
        composition.move_to(a, LayerId::new());
        assert_eq!(z(&composition, b), 4);
    }
}
