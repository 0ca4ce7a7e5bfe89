//! An ordered map based on an unbalanced binary search tree.

use compare::{Compare, Natural};
use log::debug;
use std::fmt::{self, Debug, Display};
use std::ops;

use crate::error::NotFound;
use crate::node::{self, Link, Node};

/// Spaces of indentation per level of depth in [`Map::write_levels`].
const LEVEL_INDENT: usize = 4;

/// An ordered map based on an unbalanced binary search tree.
///
/// The tree performs no rebalancing: each entry stays where ordered descent
/// first placed it, so operations are `O(h)` where `h` is the tree's height.
/// Keys inserted in random order keep `h` near `log n`, while keys inserted
/// in sorted order degrade the tree into a list with `h = n`.
///
/// The behavior of this map is undefined if a key's ordering relative to any
/// other key changes while the key is in the map. This is normally only
/// possible through `Cell`, `RefCell`, or unsafe code.
pub struct Map<K, V, C = Natural<K>>
where
    C: Compare<K>,
{
    root: Link<K, V>,
    len: usize,
    cmp: C,
}

impl<K, V> Map<K, V>
where
    K: Ord,
{
    /// Creates an empty map ordered according to the natural order of its keys.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bstmap::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), Some((&3, &"c")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn new() -> Self {
        Map::with_cmp(compare::natural())
    }
}

impl<K, V, C> Map<K, V, C>
where
    C: Compare<K>,
{
    /// Creates an empty map ordered according to the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{natural, Compare};
    ///
    /// let mut map = bstmap::Map::with_cmp(natural().rev());
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&3, &"c")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn with_cmp(cmp: C) -> Self {
        Map { root: None, len: 0, cmp }
    }

    /// Checks if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns a reference to the map's comparator.
    pub fn cmp(&self) -> &C {
        &self.cmp
    }

    /// Removes all entries from the map.
    ///
    /// The tree is torn down iteratively, so clearing a degenerate,
    /// list-shaped map does not risk exhausting the call stack.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bstmap::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// map.clear();
    ///
    /// assert!(map.is_empty());
    /// assert_eq!(map.len(), 0);
    /// ```
    pub fn clear(&mut self) {
        node::drop_tree(&mut self.root);
        self.len = 0;
    }

    /// Inserts an entry into the map, returning the previous value, if any,
    /// associated with the key.
    ///
    /// If the key is already present its value is replaced in place; no new
    /// node is created and the key itself is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bstmap::Map::new();
    /// assert_eq!(map.insert(1, "a"), None);
    /// assert_eq!(map.get(&1), Ok(&"a"));
    /// assert_eq!(map.insert(1, "b"), Some("a"));
    /// assert_eq!(map.get(&1), Ok(&"b"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let old_value = node::insert(&mut self.root, &self.cmp, key, value);

        match old_value {
            Some(_) => debug!("insert replaced the value of an existing key"),
            None => self.len += 1,
        }

        old_value
    }

    /// Returns a reference to the value associated with the given key.
    ///
    /// The reference aliases the map's internal storage and is invalidated by
    /// the map's next mutation.
    ///
    /// # Errors
    ///
    /// If the map does not contain the key, a [`NotFound`] carrying an owned
    /// copy of the key is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstmap::NotFound;
    ///
    /// let mut map = bstmap::Map::new();
    /// assert_eq!(map.get(&1), Err(NotFound { key: 1 }));
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Ok(&"a"));
    /// ```
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Result<&V, NotFound<Q::Owned>>
    where
        C: Compare<Q, K>,
        Q: ToOwned,
    {
        match node::search(&self.root, &self.cmp, key) {
            Some(node) => Ok(&node.value),
            None => Err(NotFound { key: key.to_owned() }),
        }
    }

    /// Returns a mutable reference to the value associated with the given
    /// key.
    ///
    /// # Errors
    ///
    /// If the map does not contain the key, a [`NotFound`] carrying an owned
    /// copy of the key is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bstmap::Map::new();
    /// map.insert(1, "a");
    ///
    /// if let Ok(value) = map.get_mut(&1) {
    ///     *value = "b";
    /// }
    ///
    /// assert_eq!(map.get(&1), Ok(&"b"));
    /// ```
    pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Result<&mut V, NotFound<Q::Owned>>
    where
        C: Compare<Q, K>,
        Q: ToOwned,
    {
        match node::search_mut(&mut self.root, &self.cmp, key) {
            Some(node) => Ok(&mut node.value),
            None => Err(NotFound { key: key.to_owned() }),
        }
    }

    /// Checks if the map contains the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bstmap::Map::new();
    /// assert!(!map.contains_key(&1));
    /// map.insert(1, "a");
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
    where
        C: Compare<Q, K>,
    {
        node::search(&self.root, &self.cmp, key).is_some()
    }

    /// Removes the entry whose key is equal to the given key and returns it.
    ///
    /// The removed node is spliced out of the tree: a leaf is simply
    /// detached, a node with a single child is replaced by that child, and a
    /// node with two children is replaced by its in-order successor, the
    /// minimum of its right subtree. The remaining keys keep their relative
    /// in-order positions.
    ///
    /// # Errors
    ///
    /// If the map does not contain the key, a [`NotFound`] carrying an owned
    /// copy of the key is returned and the map is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstmap::NotFound;
    ///
    /// let mut map = bstmap::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// assert_eq!(map.remove(&1), Ok((1, "a")));
    /// assert_eq!(map.remove(&1), Err(NotFound { key: 1 }));
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Result<(K, V), NotFound<Q::Owned>>
    where
        C: Compare<Q, K>,
        Q: ToOwned,
    {
        match node::remove(&mut self.root, &self.cmp, key) {
            Some(key_value) => {
                self.len -= 1;
                Ok(key_value)
            }
            None => Err(NotFound { key: key.to_owned() }),
        }
    }

    /// Returns the number of nodes on the longest root-to-leaf path, or 0 if
    /// the map is empty.
    pub fn height(&self) -> usize {
        node::height(&self.root)
    }

    /// Writes a level-by-level rendering of the tree to the given sink.
    ///
    /// Each line holds the `key: value` pairs at one depth, left to right,
    /// indented proportionally to the distance between that depth and the
    /// deepest level. The rendering is a diagnostic aid; its exact layout is
    /// not a stability guarantee.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bstmap::Map::new();
    ///
    /// map.insert(20, 'j');
    /// map.insert(10, 'g');
    /// map.insert(40, 'h');
    ///
    /// let mut out = String::new();
    /// map.write_levels(&mut out).unwrap();
    /// assert_eq!(out, "    20: j\n10: g40: h\n");
    /// ```
    pub fn write_levels<W>(&self, w: &mut W) -> fmt::Result
    where
        K: Display,
        V: Display,
        W: fmt::Write,
    {
        let height = self.height();

        for level in 0..height {
            node::write_level(&self.root, level, LEVEL_INDENT * (height - level - 1), w)?;
            writeln!(w)?;
        }

        Ok(())
    }

    /// Renders the tree level by level into a `String`.
    ///
    /// See [`Map::write_levels`].
    pub fn render_levels(&self) -> String
    where
        K: Display,
        V: Display,
    {
        let mut out = String::new();
        self.write_levels(&mut out)
            .expect("writing to a String cannot fail");
        out
    }

    /// Returns an iterator that consumes the map.
    ///
    /// The iterator yields the entries in ascending order according to the
    /// map's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bstmap::Map::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.into_iter();
    /// assert_eq!(it.next(), Some((1, "a")));
    /// assert_eq!(it.next(), Some((2, "b")));
    /// assert_eq!(it.next(), Some((3, "c")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter::new(self.root.take(), self.len)
    }

    /// Returns an iterator over the map's entries with immutable references
    /// to the values.
    ///
    /// The iterator yields the entries in ascending order according to the
    /// map's comparator.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.root, self.len)
    }

    /// Returns an iterator over the map's entries with mutable references to
    /// the values.
    ///
    /// The iterator yields the entries in ascending order according to the
    /// map's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bstmap::Map::new();
    ///
    /// map.insert("b", 2);
    /// map.insert("a", 1);
    /// map.insert("c", 3);
    ///
    /// for (_, value) in map.iter_mut() {
    ///     *value *= 2;
    /// }
    ///
    /// assert_eq!(map[&"a"], 2);
    /// assert_eq!(map[&"b"], 4);
    /// assert_eq!(map[&"c"], 6);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&mut self.root, self.len)
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> &Link<K, V> {
        &self.root
    }
}

impl<K, V, C> Clone for Map<K, V, C>
where
    K: Clone,
    V: Clone,
    C: Compare<K> + Clone,
{
    fn clone(&self) -> Self {
        Map {
            root: node::clone_tree(&self.root),
            len: self.len,
            cmp: self.cmp.clone(),
        }
    }

    /// Overwrites `self` with a deep copy of `source`, reusing `self`'s
    /// already-allocated nodes wherever the two tree shapes coincide.
    fn clone_from(&mut self, source: &Self) {
        node::clone_tree_from(&mut self.root, &source.root);
        self.len = source.len;
        self.cmp.clone_from(&source.cmp);
    }
}

impl<K, V, C> Drop for Map<K, V, C>
where
    C: Compare<K>,
{
    fn drop(&mut self) {
        node::drop_tree(&mut self.root);
    }
}

impl<K, V, C> Debug for Map<K, V, C>
where
    K: Debug,
    V: Debug,
    C: Compare<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;

        let mut it = self.iter();

        if let Some((k, v)) = it.next() {
            write!(f, "{:?}: {:?}", k, v)?;
            for (k, v) in it {
                write!(f, ", {:?}: {:?}", k, v)?;
            }
        }

        write!(f, "}}")
    }
}

impl<K, V, C> Default for Map<K, V, C>
where
    C: Compare<K> + Default,
{
    fn default() -> Self {
        Map::with_cmp(C::default())
    }
}

impl<K, V, C> Extend<(K, V)> for Map<K, V, C>
where
    C: Compare<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, it: I) {
        for (k, v) in it {
            self.insert(k, v);
        }
    }
}

impl<K, V, C> FromIterator<(K, V)> for Map<K, V, C>
where
    C: Compare<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(it: I) -> Self {
        let mut map: Self = Default::default();
        map.extend(it);
        map
    }
}

impl<'a, K, V, C, Q: ?Sized> ops::Index<&'a Q> for Map<K, V, C>
where
    C: Compare<K> + Compare<Q, K>,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        node::search(&self.root, &self.cmp, key)
            .map(|node| &node.value)
            .expect("key not found")
    }
}

impl<'a, K, V, C> IntoIterator for &'a Map<K, V, C>
where
    C: Compare<K>,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a mut Map<K, V, C>
where
    C: Compare<K>,
{
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V, C> IntoIterator for Map<K, V, C>
where
    C: Compare<K>,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        self.into_iter()
    }
}

impl<K, V, C> PartialEq for Map<K, V, C>
where
    V: PartialEq,
    C: Compare<K>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(l, r)| self.cmp.compares_eq(l.0, r.0) && l.1 == r.1)
    }
}

impl<K, V, C> Eq for Map<K, V, C>
where
    V: Eq,
    C: Compare<K>,
{
}

/// An iterator over the map's entries with immutable references to the
/// values.
///
/// The iterator yields the entries in ascending order according to the map's
/// comparator. Acquire through [`Map::iter`] or the `IntoIterator` trait.
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(root: &'a Link<K, V>, len: usize) -> Self {
        let mut it = Iter { stack: Vec::new(), remaining: len };
        it.descend(root);
        it
    }

    // Pushes the nodes on the path to the subtree's minimum.
    fn descend(&mut self, mut link: &'a Link<K, V>) {
        while let Some(node) = link {
            self.stack.push(&**node);
            link = &node.left;
        }
    }
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Iter { stack: self.stack.clone(), remaining: self.remaining }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        let node = self.stack.pop()?;
        self.descend(&node.right);
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

/// An iterator over the map's entries with mutable references to the values.
///
/// The iterator yields the entries in ascending order according to the map's
/// comparator. Acquire through [`Map::iter_mut`] or the `IntoIterator` trait.
pub struct IterMut<'a, K, V> {
    stack: Vec<(&'a K, &'a mut V, Option<&'a mut Node<K, V>>)>,
    remaining: usize,
}

impl<'a, K, V> IterMut<'a, K, V> {
    fn new(root: &'a mut Link<K, V>, len: usize) -> Self {
        let mut it = IterMut { stack: Vec::new(), remaining: len };
        it.descend(root.as_deref_mut());
        it
    }

    // Pushes the nodes on the path to the subtree's minimum, splitting each
    // node's borrow into its entry and its pending right subtree.
    fn descend(&mut self, mut node: Option<&'a mut Node<K, V>>) {
        while let Some(n) = node {
            let Node { left, right, key, value } = n;
            self.stack.push((&*key, value, right.as_deref_mut()));
            node = left.as_deref_mut();
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<(&'a K, &'a mut V)> {
        let (key, value, right) = self.stack.pop()?;
        self.descend(right);
        self.remaining -= 1;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {}

/// An iterator that consumes the map.
///
/// The iterator yields the entries in ascending order according to the map's
/// comparator. Acquire through [`Map::into_iter`] or the `IntoIterator`
/// trait.
pub struct IntoIter<K, V> {
    stack: Vec<Box<Node<K, V>>>,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    fn new(root: Link<K, V>, len: usize) -> Self {
        let mut it = IntoIter { stack: Vec::new(), remaining: len };
        it.descend(root);
        it
    }

    fn descend(&mut self, mut link: Link<K, V>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        let mut node = self.stack.pop()?;
        let right = node.right.take();
        self.descend(right);
        self.remaining -= 1;

        let node = *node;
        Some((node.key, node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> Drop for IntoIter<K, V> {
    // The pending nodes still own their right subtrees; free them with the
    // stack as a worklist instead of recursing.
    fn drop(&mut self) {
        while let Some(mut node) = self.stack.pop() {
            self.stack.extend(node.left.take());
            self.stack.extend(node.right.take());
        }
    }
}
