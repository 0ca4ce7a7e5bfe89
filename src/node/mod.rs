
use compare::Compare;
use std::cmp::Ordering::*;
use std::fmt::{self, Display};
use std::mem;

pub type Link<K, V> = Option<Box<Node<K, V>>>;

pub struct Node<K, V> {
    pub left: Link<K, V>,
    pub right: Link<K, V>,
    pub key: K,
    pub value: V,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Self {
        Node { left: None, right: None, key, value }
    }
}

/// Inserts the entry at the slot reached by ordered descent, or replaces the
/// value in place if the key is already present, returning the old value.
pub fn insert<K, V, C>(link: &mut Link<K, V>, cmp: &C, key: K, value: V) -> Option<V>
where
    C: Compare<K>,
{
    match link {
        None => {
            *link = Some(Box::new(Node::new(key, value)));
            None
        }
        Some(node) => match cmp.compare(&key, &node.key) {
            Equal => Some(mem::replace(&mut node.value, value)),
            Less => insert(&mut node.left, cmp, key, value),
            Greater => insert(&mut node.right, cmp, key, value),
        },
    }
}

pub fn search<'a, K, V, C, Q: ?Sized>(
    mut link: &'a Link<K, V>,
    cmp: &C,
    key: &Q,
) -> Option<&'a Node<K, V>>
where
    C: Compare<Q, K>,
{
    while let Some(node) = link {
        match cmp.compare(key, &node.key) {
            Equal => return Some(&**node),
            Less => link = &node.left,
            Greater => link = &node.right,
        }
    }

    None
}

pub fn search_mut<'a, K, V, C, Q: ?Sized>(
    link: &'a mut Link<K, V>,
    cmp: &C,
    key: &Q,
) -> Option<&'a mut Node<K, V>>
where
    C: Compare<Q, K>,
{
    match link {
        None => None,
        Some(node) => match cmp.compare(key, &node.key) {
            Equal => Some(&mut **node),
            Less => search_mut(&mut node.left, cmp, key),
            Greater => search_mut(&mut node.right, cmp, key),
        },
    }
}

/// Removes the entry whose key is equal to the given key, splicing its node
/// out of the tree.
pub fn remove<K, V, C, Q: ?Sized>(link: &mut Link<K, V>, cmp: &C, key: &Q) -> Option<(K, V)>
where
    C: Compare<Q, K>,
{
    if let Some(node) = link {
        match cmp.compare(key, &node.key) {
            Less => return remove(&mut node.left, cmp, key),
            Greater => return remove(&mut node.right, cmp, key),
            Equal => {}
        }
    } else {
        return None;
    }

    // The key matches the node owned by this slot.
    link.take().map(|node| {
        let (key_value, rest) = splice_out(node);
        *link = rest;
        key_value
    })
}

/// Detaches the node from the tree, returning its entry and the subtree that
/// takes over its slot.
///
/// A leaf leaves the slot empty and a node with a single child promotes that
/// child. A node with two children is replaced by its in-order successor, the
/// minimum of its right subtree: the successor is unhooked from its old
/// position (its right subtree moves up into it) and then takes over the
/// node's left and remaining right subtrees.
fn splice_out<K, V>(mut node: Box<Node<K, V>>) -> ((K, V), Link<K, V>) {
    let rest = match (node.left.take(), node.right.take()) {
        (None, None) => None,
        (Some(child), None) | (None, Some(child)) => Some(child),
        (Some(left), Some(right)) => {
            let mut right = Some(right);
            let mut successor = detach_min(&mut right);
            successor.left = Some(left);
            successor.right = right;
            Some(successor)
        }
    };

    let node = *node;
    ((node.key, node.value), rest)
}

/// Unhooks the leftmost node, moving its right subtree into its old slot. The
/// given link must be occupied.
fn detach_min<K, V>(link: &mut Link<K, V>) -> Box<Node<K, V>> {
    if link.as_ref().map_or(false, |node| node.left.is_some()) {
        detach_min(&mut link.as_mut().unwrap().left)
    } else {
        let mut node = link.take().unwrap();
        *link = node.right.take();
        node
    }
}

pub fn clone_tree<K, V>(link: &Link<K, V>) -> Link<K, V>
where
    K: Clone,
    V: Clone,
{
    link.as_ref().map(|node| {
        Box::new(Node {
            left: clone_tree(&node.left),
            right: clone_tree(&node.right),
            key: node.key.clone(),
            value: node.value.clone(),
        })
    })
}

/// Overwrites the destination tree with the source tree's contents, reusing
/// already-allocated destination nodes where the shapes coincide. Destination
/// subtrees with no source counterpart are pruned; source subtrees with no
/// destination counterpart are cloned fresh.
pub fn clone_tree_from<K, V>(link: &mut Link<K, V>, source: &Link<K, V>)
where
    K: Clone,
    V: Clone,
{
    match source {
        None => drop_tree(link),
        Some(src) => match link {
            None => *link = clone_tree(source),
            Some(dst) => {
                dst.key.clone_from(&src.key);
                dst.value.clone_from(&src.value);
                clone_tree_from(&mut dst.left, &src.left);
                clone_tree_from(&mut dst.right, &src.right);
            }
        },
    }
}

/// Frees the whole tree with an explicit worklist, so that teardown of a
/// degenerate, list-shaped tree cannot exhaust the call stack.
pub fn drop_tree<K, V>(link: &mut Link<K, V>) {
    let mut worklist = Vec::new();
    worklist.extend(link.take());

    while let Some(mut node) = worklist.pop() {
        worklist.extend(node.left.take());
        worklist.extend(node.right.take());
    }
}

/// Number of nodes on the longest root-to-leaf path; 0 for an empty tree.
pub fn height<K, V>(link: &Link<K, V>) -> usize {
    match link {
        None => 0,
        Some(node) => 1 + height(&node.left).max(height(&node.right)),
    }
}

/// Writes the `key: value` pairs at exactly the given depth, left to right,
/// each preceded by `indent` spaces.
pub fn write_level<K, V, W>(
    link: &Link<K, V>,
    level: usize,
    indent: usize,
    w: &mut W,
) -> fmt::Result
where
    K: Display,
    V: Display,
    W: fmt::Write,
{
    if let Some(node) = link {
        if level == 0 {
            write!(w, "{:indent$}{}: {}", "", node.key, node.value)?;
        } else {
            write_level(&node.left, level - 1, indent, w)?;
            write_level(&node.right, level - 1, indent, w)?;
        }
    }

    Ok(())
}
