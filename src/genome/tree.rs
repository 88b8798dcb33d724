//! Tree genomes for genetic programming
//!
//! This module provides the program-tree representation consumed by the
//! selection and variation operators: depth and size queries, uniform
//! random node access, structural swaps between trees, and growth-based
//! random construction.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A node in a GP tree
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum TreeNode<T: Terminal, F: Function> {
    /// Terminal node (leaf)
    Terminal(T),
    /// Function node (internal)
    Function(F, Vec<TreeNode<T, F>>),
}

impl<T: Terminal, F: Function> TreeNode<T, F> {
    /// Create a new terminal node
    pub fn terminal(value: T) -> Self {
        Self::Terminal(value)
    }

    /// Create a new function node
    pub fn function(func: F, children: Vec<Self>) -> Self {
        Self::Function(func, children)
    }

    /// Check if this is a terminal node
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal(_))
    }

    /// Check if this is a function node
    pub fn is_function(&self) -> bool {
        matches!(self, Self::Function(_, _))
    }

    /// Get the depth of this subtree
    pub fn depth(&self) -> usize {
        match self {
            Self::Terminal(_) => 1,
            Self::Function(_, children) => {
                1 + children.iter().map(|c| c.depth()).max().unwrap_or(0)
            }
        }
    }

    /// Get the number of nodes in this subtree
    pub fn size(&self) -> usize {
        match self {
            Self::Terminal(_) => 1,
            Self::Function(_, children) => 1 + children.iter().map(|c| c.size()).sum::<usize>(),
        }
    }

    /// Get all node positions (preorder traversal paths)
    pub fn positions(&self) -> Vec<Vec<usize>> {
        let mut positions = Vec::new();
        self.collect_positions(&[], &mut positions);
        positions
    }

    fn collect_positions(&self, path: &[usize], positions: &mut Vec<Vec<usize>>) {
        positions.push(path.to_vec());
        if let Self::Function(_, children) = self {
            for (i, child) in children.iter().enumerate() {
                let mut child_path = path.to_vec();
                child_path.push(i);
                child.collect_positions(&child_path, positions);
            }
        }
    }

    /// Get a subtree at the given path
    pub fn get_subtree(&self, path: &[usize]) -> Option<&Self> {
        if path.is_empty() {
            return Some(self);
        }

        if let Self::Function(_, children) = self {
            let idx = path[0];
            if idx < children.len() {
                children[idx].get_subtree(&path[1..])
            } else {
                None
            }
        } else {
            None
        }
    }

    /// Get a mutable subtree at the given path
    pub fn get_subtree_mut(&mut self, path: &[usize]) -> Option<&mut Self> {
        if path.is_empty() {
            return Some(self);
        }

        if let Self::Function(_, children) = self {
            let idx = path[0];
            if idx < children.len() {
                children[idx].get_subtree_mut(&path[1..])
            } else {
                None
            }
        } else {
            None
        }
    }

    /// Replace a subtree at the given path
    pub fn replace_subtree(&mut self, path: &[usize], new_subtree: Self) -> bool {
        if path.is_empty() {
            *self = new_subtree;
            return true;
        }

        if let Self::Function(_, children) = self {
            let idx = path[0];
            if idx < children.len() {
                if path.len() == 1 {
                    children[idx] = new_subtree;
                    true
                } else {
                    children[idx].replace_subtree(&path[1..], new_subtree)
                }
            } else {
                false
            }
        } else {
            false
        }
    }
}

/// Trait for terminal nodes in GP trees
pub trait Terminal:
    Clone + Send + Sync + PartialEq + fmt::Debug + Serialize + for<'de> Deserialize<'de> + 'static
{
    /// Convert to string representation
    fn to_string(&self) -> String;
}

/// Trait for function nodes in GP trees
pub trait Function:
    Clone + Send + Sync + PartialEq + fmt::Debug + Serialize + for<'de> Deserialize<'de> + 'static
{
    /// Get the arity (number of arguments) of this function
    fn arity(&self) -> usize;

    /// Convert to string representation
    fn to_string(&self) -> String;
}

/// Standard arithmetic terminals for symbolic regression
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ArithmeticTerminal {
    /// Variable x_i
    Variable(usize),
    /// Constant value
    Constant(f64),
}

impl Terminal for ArithmeticTerminal {
    fn to_string(&self) -> String {
        match self {
            Self::Variable(i) => format!("x{}", i),
            Self::Constant(c) => format!("{:.4}", c),
        }
    }
}

/// Standard arithmetic functions for symbolic regression
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ArithmeticFunction {
    /// Addition
    Add,
    /// Subtraction
    Sub,
    /// Multiplication
    Mul,
    /// Protected division
    Div,
    /// Sine
    Sin,
    /// Cosine
    Cos,
    /// Exponential
    Exp,
    /// Natural logarithm (protected)
    Log,
    /// Square root (protected)
    Sqrt,
    /// Negation (unary)
    Neg,
    /// Absolute value (unary)
    Abs,
}

impl ArithmeticFunction {
    /// The full arithmetic function set
    pub fn all() -> &'static [Self] {
        &[
            Self::Add,
            Self::Sub,
            Self::Mul,
            Self::Div,
            Self::Sin,
            Self::Cos,
            Self::Exp,
            Self::Log,
            Self::Sqrt,
            Self::Neg,
            Self::Abs,
        ]
    }
}

impl Function for ArithmeticFunction {
    fn arity(&self) -> usize {
        match self {
            Self::Add | Self::Sub | Self::Mul | Self::Div => 2,
            Self::Sin | Self::Cos | Self::Exp | Self::Log | Self::Sqrt | Self::Neg | Self::Abs => 1,
        }
    }

    fn to_string(&self) -> String {
        match self {
            Self::Add => "+".to_string(),
            Self::Sub => "-".to_string(),
            Self::Mul => "*".to_string(),
            Self::Div => "/".to_string(),
            Self::Sin => "sin".to_string(),
            Self::Cos => "cos".to_string(),
            Self::Exp => "exp".to_string(),
            Self::Log => "log".to_string(),
            Self::Sqrt => "sqrt".to_string(),
            Self::Neg => "neg".to_string(),
            Self::Abs => "abs".to_string(),
        }
    }
}

/// Tree genome for genetic programming
///
/// Random construction samples from caller-supplied primitive slices, so the
/// function and terminal sets an individual was built from travel with its
/// configuration rather than being baked into the type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TreeGenome<T: Terminal = ArithmeticTerminal, F: Function = ArithmeticFunction> {
    /// Root node of the tree
    pub root: TreeNode<T, F>,
    /// Maximum allowed depth
    pub max_depth: usize,
}

impl<T: Terminal, F: Function> TreeGenome<T, F> {
    /// Create a new tree genome
    pub fn new(root: TreeNode<T, F>, max_depth: usize) -> Self {
        Self { root, max_depth }
    }

    /// Get the depth of the tree
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Get the number of nodes in the tree
    pub fn size(&self) -> usize {
        self.root.size()
    }

    /// Generate a random tree using the "full" method
    pub fn generate_full<R: Rng>(
        rng: &mut R,
        functions: &[F],
        terminals: &[T],
        depth: usize,
        max_depth: usize,
    ) -> Self {
        let root = Self::generate_full_node(rng, functions, terminals, depth, 0);
        Self { root, max_depth }
    }

    fn generate_full_node<R: Rng>(
        rng: &mut R,
        functions: &[F],
        terminals: &[T],
        target_depth: usize,
        current_depth: usize,
    ) -> TreeNode<T, F> {
        if current_depth >= target_depth {
            TreeNode::Terminal(random_primitive(rng, terminals))
        } else {
            let func = random_primitive(rng, functions);
            let arity = func.arity();
            let children: Vec<TreeNode<T, F>> = (0..arity)
                .map(|_| {
                    Self::generate_full_node(rng, functions, terminals, target_depth, current_depth + 1)
                })
                .collect();
            TreeNode::Function(func, children)
        }
    }

    /// Generate a random tree using the "grow" method
    pub fn generate_grow<R: Rng>(
        rng: &mut R,
        functions: &[F],
        terminals: &[T],
        max_depth: usize,
        terminal_prob: f64,
    ) -> Self {
        let root = Self::generate_grow_node(rng, functions, terminals, max_depth, 0, terminal_prob);
        Self { root, max_depth }
    }

    fn generate_grow_node<R: Rng>(
        rng: &mut R,
        functions: &[F],
        terminals: &[T],
        max_depth: usize,
        current_depth: usize,
        terminal_prob: f64,
    ) -> TreeNode<T, F> {
        if current_depth >= max_depth || rng.gen::<f64>() < terminal_prob {
            TreeNode::Terminal(random_primitive(rng, terminals))
        } else {
            let func = random_primitive(rng, functions);
            let arity = func.arity();
            let children: Vec<TreeNode<T, F>> = (0..arity)
                .map(|_| {
                    Self::generate_grow_node(
                        rng,
                        functions,
                        terminals,
                        max_depth,
                        current_depth + 1,
                        terminal_prob,
                    )
                })
                .collect();
            TreeNode::Function(func, children)
        }
    }

    /// Generate using ramped half-and-half
    pub fn generate_ramped_half_and_half<R: Rng>(
        rng: &mut R,
        functions: &[F],
        terminals: &[T],
        min_depth: usize,
        max_depth: usize,
    ) -> Self {
        let depth = rng.gen_range(min_depth..=max_depth);
        if rng.gen() {
            Self::generate_full(rng, functions, terminals, depth, max_depth)
        } else {
            Self::generate_grow(rng, functions, terminals, depth, 0.3)
        }
    }

    /// Get a uniformly random node position
    pub fn random_position<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        let positions = self.root.positions();
        positions[rng.gen_range(0..positions.len())].clone()
    }

    /// Swap the subtrees at two positions of two distinct trees
    ///
    /// After the swap each tree owns the structure the other contributed;
    /// no node is shared between them.
    pub fn swap_subtrees(a: &mut Self, path_a: &[usize], b: &mut Self, path_b: &[usize]) {
        let node_a = a
            .root
            .get_subtree_mut(path_a)
            .expect("path must address a node of the first tree");
        let node_b = b
            .root
            .get_subtree_mut(path_b)
            .expect("path must address a node of the second tree");
        std::mem::swap(node_a, node_b);
    }

    /// Convert tree to S-expression string
    pub fn to_sexpr(&self) -> String {
        self.node_to_sexpr(&self.root)
    }

    fn node_to_sexpr(&self, node: &TreeNode<T, F>) -> String {
        match node {
            TreeNode::Terminal(t) => t.to_string(),
            TreeNode::Function(f, children) => {
                let child_strs: Vec<String> =
                    children.iter().map(|c| self.node_to_sexpr(c)).collect();
                format!("({} {})", f.to_string(), child_strs.join(" "))
            }
        }
    }
}

fn random_primitive<R: Rng, P: Clone>(rng: &mut R, set: &[P]) -> P {
    set.choose(rng)
        .expect("primitive set must be non-empty")
        .clone()
}

impl<T: Terminal, F: Function> fmt::Display for TreeGenome<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_sexpr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn functions() -> Vec<ArithmeticFunction> {
        ArithmeticFunction::all().to_vec()
    }

    fn terminals() -> Vec<ArithmeticTerminal> {
        vec![
            ArithmeticTerminal::Variable(0),
            ArithmeticTerminal::Variable(1),
            ArithmeticTerminal::Constant(1.0),
        ]
    }

    #[test]
    fn test_tree_node_terminal() {
        let node: TreeNode<ArithmeticTerminal, ArithmeticFunction> =
            TreeNode::terminal(ArithmeticTerminal::Variable(0));
        assert!(node.is_terminal());
        assert!(!node.is_function());
        assert_eq!(node.depth(), 1);
        assert_eq!(node.size(), 1);
    }

    #[test]
    fn test_tree_node_function() {
        let left = TreeNode::terminal(ArithmeticTerminal::Variable(0));
        let right = TreeNode::terminal(ArithmeticTerminal::Constant(1.0));
        let node = TreeNode::function(ArithmeticFunction::Add, vec![left, right]);

        assert!(!node.is_terminal());
        assert!(node.is_function());
        assert_eq!(node.depth(), 2);
        assert_eq!(node.size(), 3);
    }

    #[test]
    fn test_tree_node_positions() {
        // Create: (+ x0 (* 1.0 x1))
        let x0 = TreeNode::terminal(ArithmeticTerminal::Variable(0));
        let c1 = TreeNode::terminal(ArithmeticTerminal::Constant(1.0));
        let x1 = TreeNode::terminal(ArithmeticTerminal::Variable(1));
        let mul = TreeNode::function(ArithmeticFunction::Mul, vec![c1, x1]);
        let add = TreeNode::function(ArithmeticFunction::Add, vec![x0, mul]);

        let positions = add.positions();
        assert_eq!(positions.len(), 5); // root, left, right, right-left, right-right
        assert!(positions.contains(&vec![])); // root
        assert!(positions.contains(&vec![0])); // left child (x0)
        assert!(positions.contains(&vec![1])); // right child (mul)
        assert!(positions.contains(&vec![1, 0])); // mul's left child
        assert!(positions.contains(&vec![1, 1])); // mul's right child
    }

    #[test]
    fn test_tree_node_get_subtree() {
        let x0 = TreeNode::terminal(ArithmeticTerminal::Variable(0));
        let c1 = TreeNode::terminal(ArithmeticTerminal::Constant(1.0));
        let add: TreeNode<ArithmeticTerminal, ArithmeticFunction> =
            TreeNode::function(ArithmeticFunction::Add, vec![x0.clone(), c1]);

        assert_eq!(add.get_subtree(&[0]), Some(&x0));
        assert!(add.get_subtree(&[2]).is_none());
    }

    #[test]
    fn test_tree_node_replace_subtree() {
        let x0 = TreeNode::terminal(ArithmeticTerminal::Variable(0));
        let x1 = TreeNode::terminal(ArithmeticTerminal::Variable(1));
        let mut add: TreeNode<ArithmeticTerminal, ArithmeticFunction> =
            TreeNode::function(ArithmeticFunction::Add, vec![x0, x1]);

        let c5 = TreeNode::terminal(ArithmeticTerminal::Constant(5.0));
        assert!(add.replace_subtree(&[0], c5.clone()));
        assert_eq!(add.get_subtree(&[0]), Some(&c5));
    }

    #[test]
    fn test_tree_genome_generate_full() {
        let mut rng = StdRng::seed_from_u64(7);
        let tree: TreeGenome = TreeGenome::generate_full(&mut rng, &functions(), &terminals(), 3, 5);

        // Full construction places functions on every level above the target depth
        assert!(tree.depth() >= 3);
        assert!(tree.size() >= 1);
    }

    #[test]
    fn test_tree_genome_generate_grow_respects_depth_bound() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let tree: TreeGenome =
                TreeGenome::generate_grow(&mut rng, &functions(), &terminals(), 5, 0.3);
            assert!(tree.depth() <= 6);
            assert!(tree.size() >= 1);
        }
    }

    #[test]
    fn test_tree_genome_random_position_is_valid() {
        let mut rng = StdRng::seed_from_u64(11);
        let tree: TreeGenome =
            TreeGenome::generate_grow(&mut rng, &functions(), &terminals(), 4, 0.2);

        for _ in 0..100 {
            let pos = tree.random_position(&mut rng);
            assert!(tree.root.get_subtree(&pos).is_some());
        }
    }

    #[test]
    fn test_swap_subtrees_moves_structure_between_trees() {
        let x0 = TreeNode::terminal(ArithmeticTerminal::Variable(0));
        let x1 = TreeNode::terminal(ArithmeticTerminal::Variable(1));
        let mut a: TreeGenome = TreeGenome::new(
            TreeNode::function(ArithmeticFunction::Add, vec![x0.clone(), x1.clone()]),
            5,
        );
        let mut b: TreeGenome = TreeGenome::new(
            TreeNode::terminal(ArithmeticTerminal::Constant(9.0)),
            5,
        );

        TreeGenome::swap_subtrees(&mut a, &[0], &mut b, &[]);

        // a's left child is now the constant, b is now x0
        assert_eq!(
            a.root.get_subtree(&[0]),
            Some(&TreeNode::terminal(ArithmeticTerminal::Constant(9.0)))
        );
        assert_eq!(b.root, x0);
    }

    #[test]
    fn test_swap_subtrees_preserves_total_size() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut a: TreeGenome =
            TreeGenome::generate_grow(&mut rng, &functions(), &terminals(), 5, 0.2);
        let mut b: TreeGenome =
            TreeGenome::generate_grow(&mut rng, &functions(), &terminals(), 5, 0.2);
        let total = a.size() + b.size();

        let pa = a.random_position(&mut rng);
        let pb = b.random_position(&mut rng);
        TreeGenome::swap_subtrees(&mut a, &pa, &mut b, &pb);

        assert_eq!(a.size() + b.size(), total);
    }

    #[test]
    fn test_tree_genome_to_sexpr() {
        let x0 = TreeNode::terminal(ArithmeticTerminal::Variable(0));
        let c1 = TreeNode::terminal(ArithmeticTerminal::Constant(1.0));
        let add: TreeNode<ArithmeticTerminal, ArithmeticFunction> =
            TreeNode::function(ArithmeticFunction::Add, vec![x0, c1]);
        let tree = TreeGenome::new(add, 5);

        assert_eq!(tree.to_sexpr(), "(+ x0 1.0000)");
        assert_eq!(format!("{}", tree), "(+ x0 1.0000)");
    }

    #[test]
    fn test_arithmetic_function_arity() {
        assert_eq!(ArithmeticFunction::Add.arity(), 2);
        assert_eq!(ArithmeticFunction::Neg.arity(), 1);
        for f in ArithmeticFunction::all() {
            assert!(f.arity() >= 1 && f.arity() <= 2);
        }
    }

    #[test]
    fn test_tree_genome_serde_roundtrip() {
        let mut rng = StdRng::seed_from_u64(19);
        let tree: TreeGenome =
            TreeGenome::generate_grow(&mut rng, &functions(), &terminals(), 4, 0.3);

        let json = serde_json::to_string(&tree).unwrap();
        let recovered: TreeGenome = serde_json::from_str(&json).unwrap();
        assert_eq!(tree, recovered);
    }
}
