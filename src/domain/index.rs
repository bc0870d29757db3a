//! An ordered index of course records.
//!
//! The [`CourseIndex`] is an unbalanced binary search tree keyed by
//! [`CourseId`]. Nodes live in an arena and refer to their children by
//! position, so the tree owns every record exactly once and dropping the
//! index releases all of them without recursion.
//!
//! Keys that compare equal to an existing node are routed to the right
//! subtree. Duplicate identifiers are therefore kept rather than rejected or
//! overwritten; see [`CourseIndex::find`] and [`CourseIndex::find_all`] for how
//! they are observed.

use std::{cmp::Ordering, iter::FusedIterator};

use crate::domain::{Course, CourseId};

/// Position of a node in the arena.
type NodeId = usize;

#[derive(Debug, Clone)]
struct Node {
    course: Course,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl Node {
    const fn leaf(course: Course) -> Self {
        Self {
            course,
            left: None,
            right: None,
        }
    }
}

/// A binary search tree of [`Course`] records keyed by course identifier.
///
/// For every node, all records in its left subtree have a strictly smaller
/// identifier and all records in its right subtree have an identifier greater
/// than or equal to its own. There is no rebalancing, so inserting records in
/// sorted order produces a list-shaped tree; every operation is iterative and
/// is safe on such degenerate shapes.
#[derive(Debug, Clone, Default)]
pub struct CourseIndex {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl CourseIndex {
    /// Creates an empty index.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// Creates an empty index with room for `capacity` records.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root: None,
        }
    }

    /// The number of records in the index, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the index holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Inserts a course as a new leaf.
    ///
    /// Descends left while the new identifier is strictly less than the
    /// visited node's identifier, and right otherwise. Always succeeds; an
    /// identifier that is already present is stored again to the right of the
    /// existing one.
    pub fn insert(&mut self, course: Course) {
        let new_id = self.nodes.len();

        let Some(mut cursor) = self.root else {
            self.nodes.push(Node::leaf(course));
            self.root = Some(new_id);
            return;
        };

        loop {
            let node = &mut self.nodes[cursor];
            let slot = if course.id() < node.course.id() {
                &mut node.left
            } else {
                &mut node.right
            };

            match *slot {
                Some(next) => cursor = next,
                None => {
                    *slot = Some(new_id);
                    break;
                }
            }
        }

        self.nodes.push(Node::leaf(course));
    }

    /// Looks up a course by its exact identifier.
    ///
    /// The comparison is case-sensitive. If the identifier was inserted more
    /// than once, the record nearest the root is returned, which is the one
    /// inserted first.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&Course> {
        self.find_all(key).next()
    }

    /// Returns every record stored under `key`, in insertion order.
    ///
    /// All duplicates of a key sit on the single search path for that key,
    /// so this is a walk down that path rather than a scan.
    pub fn find_all<'k>(&self, key: &'k str) -> Matches<'_, 'k> {
        Matches {
            nodes: &self.nodes,
            key,
            cursor: self.root,
        }
    }

    /// Returns `true` if at least one record is stored under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Returns an iterator over the records in ascending identifier order.
    ///
    /// The walk is recomputed on each call and never modifies the index.
    /// Records sharing an identifier appear in the order they were inserted.
    #[must_use]
    pub fn iter(&self) -> InOrder<'_> {
        InOrder {
            nodes: &self.nodes,
            stack: Vec::new(),
            cursor: self.root,
            remaining: self.nodes.len(),
        }
    }

    /// Alias of [`CourseIndex::iter`], named after the walk it performs.
    #[must_use]
    pub fn traverse_ordered(&self) -> InOrder<'_> {
        self.iter()
    }

    /// The number of nodes on the longest root-to-leaf path.
    ///
    /// An empty index has height zero. A tree built from sorted input has a
    /// height equal to its length.
    #[must_use]
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();

        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[id];
            stack.extend(node.left.map(|left| (left, depth + 1)));
            stack.extend(node.right.map(|right| (right, depth + 1)));
        }

        height
    }

    /// Returns the identifiers in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = &CourseId> {
        self.iter().map(Course::id)
    }
}

impl Extend<Course> for CourseIndex {
    fn extend<T: IntoIterator<Item = Course>>(&mut self, iter: T) {
        for course in iter {
            self.insert(course);
        }
    }
}

impl FromIterator<Course> for CourseIndex {
    fn from_iter<T: IntoIterator<Item = Course>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let mut index = Self::with_capacity(iter.size_hint().0);
        index.extend(iter);
        index
    }
}

impl<'a> IntoIterator for &'a CourseIndex {
    type Item = &'a Course;
    type IntoIter = InOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over a [`CourseIndex`], driven by an explicit stack.
#[derive(Debug, Clone)]
pub struct InOrder<'a> {
    nodes: &'a [Node],
    stack: Vec<NodeId>,
    cursor: Option<NodeId>,
    remaining: usize,
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a Course;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.cursor {
            self.stack.push(id);
            self.cursor = self.nodes[id].left;
        }

        let id = self.stack.pop()?;
        let node = &self.nodes[id];
        self.cursor = node.right;
        self.remaining -= 1;
        Some(&node.course)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for InOrder<'_> {}

impl FusedIterator for InOrder<'_> {}

/// Iterator over the records stored under a single key.
///
/// Returned by [`CourseIndex::find_all`].
#[derive(Debug, Clone)]
pub struct Matches<'a, 'k> {
    nodes: &'a [Node],
    key: &'k str,
    cursor: Option<NodeId>,
}

impl<'a> Iterator for Matches<'a, '_> {
    type Item = &'a Course;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.cursor {
            let node = &self.nodes[id];
            match self.key.cmp(node.course.id().as_str()) {
                Ordering::Less => self.cursor = node.left,
                Ordering::Greater => self.cursor = node.right,
                Ordering::Equal => {
                    // later duplicates were routed right of this one
                    self.cursor = node.right;
                    return Some(&node.course);
                }
            }
        }
        None
    }
}

impl FusedIterator for Matches<'_, '_> {}
