use std::{cmp::Ordering, collections::VecDeque, fmt};

use log::trace;

use crate::error::{Error, Result};
use crate::rbt::{NodeRef, Rbt, NIL};
use crate::song::{Field, Song};

/// Strategy selects the algorithm used by [`Rbt::search`].
///
/// Ordered strategies descend the tree comparing against the key field,
/// taking O(log n) steps, and are valid only for [`Field::KEY`].
/// Breadth-first and depth-first strategies visit every node and accept
/// any field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Ordered descent, loop.
    Iterative,
    /// Ordered descent, recursive.
    Recursive,
    /// Level order visit using a FIFO queue.
    BreadthFirst,
    /// Pre-order visit, left before right.
    DepthFirst,
}

impl Strategy {
    /// Return whether this strategy relies on title order.
    pub fn is_ordered(self) -> bool {
        match self {
            Strategy::Iterative | Strategy::Recursive => true,
            Strategy::BreadthFirst | Strategy::DepthFirst => false,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Strategy::Iterative => "iterative",
            Strategy::Recursive => "recursive",
            Strategy::BreadthFirst => "breadth-first",
            Strategy::DepthFirst => "depth-first",
        };
        write!(f, "{}", name)
    }
}

/// Search API.
impl Rbt {
    /// Search for the first song whose `field` equals `value`, using
    /// `strategy`. Return `Ok(None)` when nothing matches, and
    /// [`Error::InvalidSelector`] when an ordered strategy is asked to
    /// search on a field other than the key.
    ///
    /// ```
    /// use rbt_index::{Error, Field, Rbt, Song, Strategy};
    ///
    /// let mut index = Rbt::new("songs");
    /// index.insert(Song::new("Hey Jude", "The Beatles", "Hey Jude", "Rock"));
    ///
    /// let song = index.search(Strategy::BreadthFirst, Field::Genre, "Rock");
    /// assert_eq!(song.unwrap().map(|s| s.title()), Some("Hey Jude"));
    ///
    /// let err = index.search(Strategy::Iterative, Field::Genre, "Rock");
    /// assert_eq!(err, Err(Error::InvalidSelector(Field::Genre)));
    /// ```
    pub fn search(
        &self,
        strategy: Strategy,
        field: Field,
        value: &str,
    ) -> Result<Option<&Song>> {
        trace!("{}: {} search {}={:?}", self.id(), strategy, field, value);
        match strategy {
            Strategy::Iterative => self.search_iterative(field, value),
            Strategy::Recursive => self.search_recursive(field, value),
            Strategy::BreadthFirst => Ok(self.search_bfs(field, value)),
            Strategy::DepthFirst => Ok(self.search_dfs(field, value)),
        }
    }

    /// Ordered descent by loop, `field` must be the key field.
    pub fn search_iterative(&self, field: Field, value: &str) -> Result<Option<&Song>> {
        if !field.is_key() {
            return Err(Error::InvalidSelector(field));
        }
        let mut node = self.root_ref();
        while node != NIL {
            node = match value.cmp(self.song(node).field(field)) {
                Ordering::Less => self.left(node),
                Ordering::Greater => self.right(node),
                Ordering::Equal => return Ok(Some(self.song(node))),
            };
        }
        Ok(None)
    }

    /// Ordered descent by recursion, `field` must be the key field.
    pub fn search_recursive(&self, field: Field, value: &str) -> Result<Option<&Song>> {
        if !field.is_key() {
            return Err(Error::InvalidSelector(field));
        }
        Ok(self.descend(self.root_ref(), field, value))
    }

    /// Breadth-first search on any field.
    pub fn search_bfs(&self, field: Field, value: &str) -> Option<&Song> {
        let mut queue: VecDeque<NodeRef> = VecDeque::new();
        if self.root_ref() != NIL {
            queue.push_back(self.root_ref());
        }
        while let Some(node) = queue.pop_front() {
            let song = self.song(node);
            if song.field(field) == value {
                return Some(song);
            }
            for &child in [self.left(node), self.right(node)].iter() {
                if child != NIL {
                    queue.push_back(child);
                }
            }
        }
        None
    }

    /// Depth-first, pre-order, search on any field.
    pub fn search_dfs(&self, field: Field, value: &str) -> Option<&Song> {
        self.preorder(self.root_ref(), field, value)
    }

    fn descend(&self, node: NodeRef, field: Field, value: &str) -> Option<&Song> {
        if node == NIL {
            return None;
        }
        let song = self.song(node);
        match value.cmp(song.field(field)) {
            Ordering::Less => self.descend(self.left(node), field, value),
            Ordering::Greater => self.descend(self.right(node), field, value),
            Ordering::Equal => Some(song),
        }
    }

    fn preorder(&self, node: NodeRef, field: Field, value: &str) -> Option<&Song> {
        if node == NIL {
            return None;
        }
        let song = self.song(node);
        if song.field(field) == value {
            return Some(song);
        }
        self.preorder(self.left(node), field, value)
            .or_else(|| self.preorder(self.right(node), field, value))
    }
}
