// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines the ray-tree and forest structures the scheduler draws.
//!
//! A [`RayNode`] is one ray plus its recursively branching descendants; a
//! [`Forest`] is the ordered collection of per-pixel trees for one rendered
//! screen, indexed row-major (`x + width * y`). Forests are replaced
//! wholesale whenever the tracer re-renders; nothing mutates them in place.

use crate::ray::Ray;

/// A stable identifier for one node within its forest.
///
/// Assigned in DFS pre-order when the forest is built, so it is unique per
/// forest and survives unchanged for the forest's lifetime. The scheduler
/// uses it for one-shot "node started animating" notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// One node of a ray tree: a ray and its ordered children.
#[derive(Debug, Clone, PartialEq)]
pub struct RayNode {
    /// The identifier of this node within its forest.
    ///
    /// Meaningful only after the node has been handed to [`Forest::new`];
    /// freshly built nodes all carry a placeholder id.
    pub id: NodeId,
    /// The ray this node represents.
    pub ray: Ray,
    /// The ordered child rays spawned by this ray (reflections, refractions,
    /// shadow feelers, light samples).
    pub children: Vec<RayNode>,
}

impl RayNode {
    /// Creates a leaf node for the given ray.
    pub fn new(ray: Ray) -> Self {
        Self {
            id: NodeId(0),
            ray,
            children: Vec::new(),
        }
    }

    /// Creates a node with the given children attached in order.
    pub fn with_children(ray: Ray, children: Vec<RayNode>) -> Self {
        Self {
            id: NodeId(0),
            ray,
            children,
        }
    }

    /// Returns `true` when this node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Counts this node and every descendant.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(RayNode::subtree_len)
            .sum::<usize>()
    }

    fn assign_ids(&mut self, next: &mut u32) {
        self.id = NodeId(*next);
        *next += 1;
        for child in &mut self.children {
            child.assign_ids(next);
        }
    }
}

/// The ordered collection of all per-pixel ray trees for one rendered screen.
///
/// Index `i` corresponds to pixel `(i % width, i / width)` of the screen the
/// tracer rendered; the scheduler validates coordinates against the viewport
/// before indexing. Each root is the zero-length camera origin and is never
/// drawn; only its descendants are.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forest {
    roots: Vec<RayNode>,
}

impl Forest {
    /// Builds a forest from per-pixel root nodes, assigning every node a
    /// forest-unique [`NodeId`] in DFS pre-order.
    pub fn new(mut roots: Vec<RayNode>) -> Self {
        let mut next = 0u32;
        for root in &mut roots {
            root.assign_ids(&mut next);
        }
        Self { roots }
    }

    /// The number of trees (pixels) in the forest.
    #[inline]
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Returns `true` when the forest holds no trees.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Returns the tree at the given linear pixel index.
    #[inline]
    pub fn tree(&self, index: usize) -> Option<&RayNode> {
        self.roots.get(index)
    }

    /// Iterates over the per-pixel trees in forest order.
    #[inline]
    pub fn trees(&self) -> impl Iterator<Item = &RayNode> {
        self.roots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{LinearRgba, Vec3};
    use crate::ray::RayKind;

    fn ray(len: f32) -> Ray {
        Ray::new(
            RayKind::Normal,
            1.0,
            LinearRgba::WHITE,
            Vec3::ZERO,
            Vec3::Z,
            len,
        )
    }

    #[test]
    fn forest_assigns_preorder_ids() {
        let tree_a = RayNode::with_children(
            ray(0.0),
            vec![RayNode::with_children(ray(1.0), vec![RayNode::new(ray(2.0))]), RayNode::new(ray(3.0))],
        );
        let tree_b = RayNode::with_children(ray(0.0), vec![RayNode::new(ray(4.0))]);

        let forest = Forest::new(vec![tree_a, tree_b]);

        let a = forest.tree(0).unwrap();
        assert_eq!(a.id, NodeId(0));
        assert_eq!(a.children[0].id, NodeId(1));
        assert_eq!(a.children[0].children[0].id, NodeId(2));
        assert_eq!(a.children[1].id, NodeId(3));

        let b = forest.tree(1).unwrap();
        assert_eq!(b.id, NodeId(4));
        assert_eq!(b.children[0].id, NodeId(5));
    }

    #[test]
    fn subtree_len_counts_every_node() {
        let tree = RayNode::with_children(
            ray(0.0),
            vec![
                RayNode::with_children(ray(1.0), vec![RayNode::new(ray(2.0))]),
                RayNode::new(ray(3.0)),
            ],
        );
        assert_eq!(tree.subtree_len(), 4);
        assert!(!tree.is_leaf());
        assert!(tree.children[1].is_leaf());
    }

    #[test]
    fn empty_forest() {
        let forest = Forest::default();
        assert!(forest.is_empty());
        assert_eq!(forest.len(), 0);
        assert!(forest.tree(0).is_none());
    }
}
