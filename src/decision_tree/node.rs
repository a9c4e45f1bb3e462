//! Defines the inner representation
//! of the Decision Tree class.
use serde::{Serialize, Deserialize};

use super::split_rule::*;


/// Enumeration of `BranchNode` and `LeafNode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// A node that have two childrens.
    Branch(BranchNode),


    /// A node that have no child.
    Leaf(LeafNode),
}


/// Represents the branch nodes of decision tree.
/// Each `BranchNode` must have two childrens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchNode {
    pub(super) rule: Splitter,
    pub(super) left: Box<Node>,
    pub(super) right: Box<Node>,
}


/// Represents the leaf nodes of decision tree.
/// A leaf holds the class distribution of the examples reaching it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafNode {
    pub(super) distribution: Vec<f64>,
}


impl Node {
    /// Construct a leaf node from the class weights on it.
    #[inline]
    pub(super) fn leaf(mut weights: Vec<f64>) -> Self {
        let total = weights.iter().sum::<f64>();
        if total > 0f64 {
            weights.iter_mut().for_each(|w| { *w /= total; });
        } else {
            let n_class = weights.len() as f64;
            weights.iter_mut().for_each(|w| { *w = 1f64 / n_class; });
        }
        Node::Leaf(LeafNode { distribution: weights })
    }


    /// Construct a branch node from the arguments.
    #[inline]
    pub(super) fn branch(rule: Splitter, left: Box<Node>, right: Box<Node>)
        -> Self
    {
        Node::Branch(BranchNode { rule, left, right })
    }


    /// Returns the class distribution of the leaf `x` falls into.
    #[inline]
    pub(super) fn distribution(&self, x: &[f64]) -> &[f64] {
        let mut node = self;
        loop {
            match node {
                Node::Branch(branch) => {
                    node = match branch.rule.split(x) {
                        LR::Left => &branch.left,
                        LR::Right => &branch.right,
                    };
                },
                Node::Leaf(leaf) => {
                    return &leaf.distribution[..];
                },
            }
        }
    }


    /// Returns the depth of this sub-tree.
    /// A single leaf has depth `0`.
    pub(super) fn depth(&self) -> usize {
        match self {
            Node::Branch(branch) => {
                1 + branch.left.depth().max(branch.right.depth())
            },
            Node::Leaf(_) => 0,
        }
    }


    /// Returns the number of leaves of this sub-tree.
    pub(super) fn leaves(&self) -> usize {
        match self {
            Node::Branch(branch) => {
                branch.left.leaves() + branch.right.leaves()
            },
            Node::Leaf(_) => 1,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn stump() -> Node {
        let rule = Splitter::new(0, Threshold::from(1.0));
        let left = Box::new(Node::leaf(vec![3.0, 1.0]));
        let right = Box::new(Node::leaf(vec![0.0, 2.0]));
        Node::branch(rule, left, right)
    }


    #[test]
    fn leaves_are_normalized() {
        let node = stump();
        assert_eq!(node.distribution(&[0.0]), &[0.75, 0.25]);
        assert_eq!(node.distribution(&[5.0]), &[0.0, 1.0]);
    }


    #[test]
    fn empty_leaf_is_uniform() {
        let leaf = Node::leaf(vec![0.0; 4]);
        assert_eq!(leaf.distribution(&[]), &[0.25; 4]);
    }


    #[test]
    fn depth_and_leaves() {
        let node = stump();
        assert_eq!(node.depth(), 1);
        assert_eq!(node.leaves(), 2);

        let rule = Splitter::new(0, Threshold::from(0.0));
        let deeper = Node::branch(
            rule, Box::new(Node::leaf(vec![1.0, 0.0])), Box::new(node)
        );
        assert_eq!(deeper.depth(), 2);
        assert_eq!(deeper.leaves(), 3);
    }
}
