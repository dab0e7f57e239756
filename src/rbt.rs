use std::{
    cmp::Ordering,
    mem,
    ops::{Bound, RangeBounds},
};

use log::{debug, trace};

use crate::depth::Depth;
use crate::error::{Error, Result};
use crate::song::{Field, Song};

/// Handle to a node slot in the arena.
pub(crate) type NodeRef = usize;

/// Arena slot reserved for the sentinel. The sentinel is black, is the
/// child of every leaf and the parent of root, and is never written to
/// after the tree is constructed.
pub(crate) const NIL: NodeRef = 0;

/// Rbt manage a single instance of in-memory index over [`Song`] records
/// using a [red-black][rbt] tree, keyed on title.
///
/// Titles need not be unique. Equal titles are placed to the right of
/// existing ones, lookups return one of the matching entries.
///
/// [rbt]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
#[derive(Clone)]
pub struct Rbt {
    name: String,
    nodes: Vec<Node>, // slot 0 is the sentinel.
    free: Vec<NodeRef>, // released slots, reused by insert.
    root: NodeRef,
    n_count: usize, // number of entries in the tree.
}

/// Different ways to construct a new Rbt instance.
impl Rbt {
    /// Create an empty instance of Rbt, identified by `name`.
    /// Applications can choose unique names.
    pub fn new<S>(name: S) -> Rbt
    where
        S: AsRef<str>,
    {
        Rbt {
            name: name.as_ref().to_string(),
            nodes: vec![Node::sentinel()],
            free: vec![],
            root: NIL,
            n_count: 0,
        }
    }

    /// Create a new instance of Rbt and load it with songs from `iter`.
    pub fn load_from<S, I>(name: S, iter: I) -> Rbt
    where
        S: AsRef<str>,
        I: IntoIterator<Item = Song>,
    {
        let mut rbt = Rbt::new(name);
        for song in iter {
            rbt.insert(song);
        }
        debug!("{}: loaded {} entries", rbt.name, rbt.n_count);
        rbt
    }
}

/// Maintenance API.
impl Rbt {
    /// Identify this instance. Applications can choose unique names while
    /// creating Rbt instances.
    #[inline]
    pub fn id(&self) -> String {
        self.name.clone()
    }

    /// Return number of entries in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_count
    }

    /// Check whether this index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_count == 0
    }

    /// Return the song held by the root node.
    pub fn root(&self) -> Option<&Song> {
        match self.root {
            NIL => None,
            root => Some(self.song(root)),
        }
    }

    /// Return the number of nodes on the longest path from root to a
    /// leaf. An empty tree has height 0.
    pub fn height(&self) -> usize {
        self.height_of(self.root)
    }

    /// Return the number of bytes held by this instance, counting node
    /// slots (including released and sentinel slots) and string
    /// payloads of live entries.
    pub fn footprint(&self) -> usize {
        let slots = self.nodes.capacity() * mem::size_of::<Node>();
        let free = self.free.capacity() * mem::size_of::<NodeRef>();
        let payload: usize = self.iter().map(Song::heap_size).sum();
        mem::size_of::<Rbt>() + self.name.capacity() + slots + free + payload
    }

    /// Return quickly with basic statisics, only entries() and
    /// node_size() are valid with this statisics.
    pub fn stats(&self) -> Stats {
        Stats::new(self.n_count, mem::size_of::<Node>())
    }

    fn height_of(&self, node: NodeRef) -> usize {
        match node {
            NIL => 0,
            node => {
                let (left, right) = (self.left(node), self.right(node));
                1 + self.height_of(left).max(self.height_of(right))
            }
        }
    }
}

/// Write operations on Rbt instance.
impl Rbt {
    /// Insert a song into the index. Songs with a title already present
    /// are kept alongside the existing ones.
    pub fn insert(&mut self, song: Song) {
        let (mut parent, mut node) = (NIL, self.root);
        while node != NIL {
            parent = node;
            node = if song < *self.song(node) {
                self.left(node)
            } else {
                self.right(node)
            };
        }

        let to_left = parent != NIL && song < *self.song(parent);
        trace!("{}: insert {:?}", self.name, song.title());
        let node = self.alloc(song, parent);
        if parent == NIL {
            self.root = node;
        } else if to_left {
            self.nodes[parent].left = node;
        } else {
            self.nodes[parent].right = node;
        }
        self.n_count += 1;

        self.insert_fixup(node);
    }

    /// Delete an entry with `title` from this instance and return it. If
    /// title is not present, then delete is effectively a no-op and
    /// `None` is returned.
    ///
    /// Entries are keyed on title, so the lookup takes the title alone,
    /// remaining fields play no part in matching. When several entries
    /// share the title, the first one met while descending from root is
    /// removed. The removed record is handed back since its payload is
    /// not recoverable from the title, callers that do not need it can
    /// ignore the return value.
    pub fn delete(&mut self, title: &str) -> Option<Song> {
        let target = self.find(title);
        if target == NIL {
            debug!("{}: delete {:?}, no such entry", self.name, title);
            return None;
        }
        trace!("{}: delete {:?}", self.name, title);

        // node to splice out, it has at most one child.
        let (left, right) = (self.left(target), self.right(target));
        let spliced = if left != NIL && right != NIL {
            self.minimum(right)
        } else {
            target
        };

        let child = match self.left(spliced) {
            NIL => self.right(spliced),
            left => left,
        };
        let parent = self.parent(spliced);
        if child != NIL {
            self.nodes[child].parent = parent;
        }
        if parent == NIL {
            self.root = child;
        } else if spliced == self.left(parent) {
            self.nodes[parent].left = child;
        } else {
            self.nodes[parent].right = child;
        }

        let was_black = self.is_black(spliced);
        let mut song = self.release(spliced);
        if spliced != target {
            // successor's record moves into target's slot.
            song = mem::replace(&mut self.nodes[target].song, song);
        }
        self.n_count -= 1;

        if was_black {
            self.delete_fixup(child, parent);
        }
        Some(song)
    }

    /// Validate red-black tree with following rules:
    ///
    /// * Root and sentinel are black.
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * Number of blacks should be same under left child and right child.
    /// * Every child links back to its parent.
    /// * Titles are in non-decreasing order.
    ///
    /// Additionally return full statistics on the tree. Refer to [`Stats`]
    /// for more information.
    pub fn validate(&self) -> Result<Stats> {
        let s = &self.nodes[NIL];
        if !s.black || s.left != NIL || s.right != NIL || s.parent != NIL {
            return Err(Error::BrokenLink("<sentinel>".to_string()));
        }
        if self.is_red(self.root) {
            return Err(Error::RedRoot(self.title_of(self.root)));
        }
        if self.root != NIL && self.parent(self.root) != NIL {
            return Err(Error::BrokenLink(self.title_of(self.root)));
        }

        let mut stats = Stats::new(self.n_count, mem::size_of::<Node>());
        stats.set_depths(Depth::new());
        let blacks = self.validate_tree(self.root, false, 0, 0, &mut stats)?;
        stats.set_blacks(blacks);

        let mut prev: Option<&Song> = None;
        for song in self.iter() {
            match prev {
                Some(p) if p > song => {
                    let (a, b) = (p.title().to_string(), song.title().to_string());
                    return Err(Error::SortError(a, b));
                }
                _ => prev = Some(song),
            }
        }
        Ok(stats)
    }

    fn validate_tree(
        &self,
        node: NodeRef,
        fromred: bool,
        mut nb: usize,
        depth: usize,
        stats: &mut Stats,
    ) -> Result<usize> {
        if node == NIL {
            if let Some(depths) = stats.depths.as_mut() {
                depths.sample(depth);
            }
            return Ok(nb);
        }

        let red = self.is_red(node);
        if fromred && red {
            return Err(Error::ConsecutiveReds(self.title_of(node)));
        }
        if !red {
            nb += 1;
        }

        let (left, right) = (self.left(node), self.right(node));
        for &child in [left, right].iter() {
            if child != NIL && self.parent(child) != node {
                return Err(Error::BrokenLink(self.title_of(child)));
            }
        }
        let lblacks = self.validate_tree(left, red, nb, depth + 1, stats)?;
        let rblacks = self.validate_tree(right, red, nb, depth + 1, stats)?;
        if lblacks != rblacks {
            let title = self.title_of(node);
            let err = format!("at {:?} left: {} right: {}", title, lblacks, rblacks);
            return Err(Error::UnbalancedBlacks(err));
        }
        if left != NIL && self.song(left) > self.song(node) {
            let (lkey, parent) = (self.title_of(left), self.title_of(node));
            return Err(Error::SortError(lkey, parent));
        }
        if right != NIL && self.song(right) < self.song(node) {
            let (parent, rkey) = (self.title_of(node), self.title_of(right));
            return Err(Error::SortError(parent, rkey));
        }
        Ok(lblacks)
    }
}

/// Read operations on Rbt instance.
impl Rbt {
    /// Get a song by title. When several songs share the title, one of
    /// them is returned.
    pub fn get(&self, title: &str) -> Option<&Song> {
        match self.find(title) {
            NIL => None,
            node => Some(self.song(node)),
        }
    }

    /// Return an iterator over all entries in title order. The iterator
    /// is lazy, walking the tree as it is consumed.
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter {
            tree: self,
            stack: vec![],
        };
        iter.push_left(self.root);
        iter
    }

    /// Range over all entries with titles from low to high.
    ///
    /// ```
    /// use rbt_index::{Rbt, Song};
    ///
    /// let mut index = Rbt::new("songs");
    /// for title in ["A", "B", "C", "D"].iter() {
    ///     index.insert(Song::new(*title, "artist", "album", "genre"));
    /// }
    /// let titles: Vec<&str> = index.range("B".."D").map(|s| s.title()).collect();
    /// assert_eq!(titles, vec!["B", "C"]);
    /// ```
    pub fn range<'b, R>(&self, range: R) -> Range<'_>
    where
        R: RangeBounds<&'b str>,
    {
        let low: Bound<String> = match range.start_bound() {
            Bound::Included(title) => Bound::Included((*title).to_string()),
            Bound::Excluded(title) => Bound::Excluded((*title).to_string()),
            Bound::Unbounded => Bound::Unbounded,
        };
        let high: Bound<String> = match range.end_bound() {
            Bound::Included(title) => Bound::Included((*title).to_string()),
            Bound::Excluded(title) => Bound::Excluded((*title).to_string()),
            Bound::Unbounded => Bound::Unbounded,
        };

        // seek to the first entry not below `low`.
        let mut iter = Iter {
            tree: self,
            stack: vec![],
        };
        let mut node = self.root;
        while node != NIL {
            let title = self.song(node).title();
            let below = match &low {
                Bound::Included(low) => title < low.as_str(),
                Bound::Excluded(low) => title <= low.as_str(),
                Bound::Unbounded => false,
            };
            if below {
                node = self.right(node);
            } else {
                iter.stack.push(node);
                node = self.left(node);
            }
        }

        Range { iter, high }
    }

    /// Return all entries ordered on `field`, ascending or descending.
    /// Entries with equal field values stay in title order.
    ///
    /// ```
    /// use rbt_index::{Field, Rbt, Song};
    ///
    /// let mut index = Rbt::new("songs");
    /// index.insert(Song::new("Imagine", "John Lennon", "Imagine", "Pop"));
    /// index.insert(Song::new("Hey Jude", "The Beatles", "Hey Jude", "Rock"));
    /// index.insert(Song::new("So What", "Miles Davis", "Kind of Blue", "Jazz"));
    ///
    /// let genres: Vec<&str> = index
    ///     .sorted_by(Field::Genre, false)
    ///     .into_iter()
    ///     .map(|s| s.genre())
    ///     .collect();
    /// assert_eq!(genres, vec!["Rock", "Pop", "Jazz"]);
    /// ```
    pub fn sorted_by(&self, field: Field, ascending: bool) -> Vec<&Song> {
        let mut songs: Vec<&Song> = self.iter().collect();
        match (field, ascending) {
            (Field::Title, true) => (),
            (Field::Title, false) => songs.reverse(),
            (field, true) => songs.sort_by(|a, b| a.field(field).cmp(b.field(field))),
            (field, false) => songs.sort_by(|a, b| b.field(field).cmp(a.field(field))),
        }
        songs
    }
}

/// Node level access, shared with search strategies.
impl Rbt {
    #[inline]
    pub(crate) fn root_ref(&self) -> NodeRef {
        self.root
    }

    #[inline]
    pub(crate) fn song(&self, node: NodeRef) -> &Song {
        &self.nodes[node].song
    }

    #[inline]
    pub(crate) fn left(&self, node: NodeRef) -> NodeRef {
        self.nodes[node].left
    }

    #[inline]
    pub(crate) fn right(&self, node: NodeRef) -> NodeRef {
        self.nodes[node].right
    }

    #[inline]
    fn parent(&self, node: NodeRef) -> NodeRef {
        self.nodes[node].parent
    }

    #[inline]
    fn is_red(&self, node: NodeRef) -> bool {
        !self.nodes[node].black
    }

    #[inline]
    fn is_black(&self, node: NodeRef) -> bool {
        self.nodes[node].black
    }

    #[inline]
    fn set_red(&mut self, node: NodeRef) {
        debug_assert!(node != NIL, "set_red() on sentinel");
        self.nodes[node].black = false
    }

    #[inline]
    fn set_black(&mut self, node: NodeRef) {
        debug_assert!(node != NIL, "set_black() on sentinel");
        self.nodes[node].black = true
    }

    fn title_of(&self, node: NodeRef) -> String {
        self.song(node).title().to_string()
    }

    fn find(&self, title: &str) -> NodeRef {
        let mut node = self.root;
        while node != NIL {
            node = match self.song(node).title().cmp(title) {
                Ordering::Less => self.right(node),
                Ordering::Greater => self.left(node),
                Ordering::Equal => return node,
            };
        }
        NIL
    }

    fn minimum(&self, mut node: NodeRef) -> NodeRef {
        while self.left(node) != NIL {
            node = self.left(node);
        }
        node
    }

    fn alloc(&mut self, song: Song, parent: NodeRef) -> NodeRef {
        let node = Node::new(song, parent);
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    // detach slot from the tree, returning the record it held.
    fn release(&mut self, node: NodeRef) -> Song {
        let slot = mem::replace(&mut self.nodes[node], Node::sentinel());
        self.free.push(node);
        slot.song
    }
}

// Raw node access for exercising `validate` against damaged trees.
#[cfg(test)]
impl Rbt {
    pub(crate) fn node_of(&self, title: &str) -> NodeRef {
        self.find(title)
    }

    pub(crate) fn force_black(&mut self, node: NodeRef, black: bool) {
        self.nodes[node].black = black
    }

    pub(crate) fn force_parent(&mut self, node: NodeRef, parent: NodeRef) {
        self.nodes[node].parent = parent
    }

    pub(crate) fn force_song(&mut self, node: NodeRef, song: Song) {
        self.nodes[node].song = song
    }
}

/// Rebalancing, rotations and fixups.
impl Rbt {
    fn insert_fixup(&mut self, mut node: NodeRef) {
        // root's parent is the sentinel, which is black.
        while self.is_red(self.parent(node)) {
            let parent = self.parent(node);
            let grand = self.parent(parent);
            if parent == self.left(grand) {
                let uncle = self.right(grand);
                if self.is_red(uncle) {
                    self.set_black(parent);
                    self.set_black(uncle);
                    self.set_red(grand);
                    node = grand;
                } else {
                    if node == self.right(parent) {
                        node = parent;
                        self.rotate_left(node);
                    }
                    let parent = self.parent(node);
                    let grand = self.parent(parent);
                    self.set_black(parent);
                    self.set_red(grand);
                    self.rotate_right(grand);
                }
            } else {
                let uncle = self.left(grand);
                if self.is_red(uncle) {
                    self.set_black(parent);
                    self.set_black(uncle);
                    self.set_red(grand);
                    node = grand;
                } else {
                    if node == self.left(parent) {
                        node = parent;
                        self.rotate_right(node);
                    }
                    let parent = self.parent(node);
                    let grand = self.parent(parent);
                    self.set_black(parent);
                    self.set_red(grand);
                    self.rotate_left(grand);
                }
            }
        }
        let root = self.root;
        self.set_black(root);
    }

    // `node` carries an extra black, it may be the sentinel, hence its
    // parent is passed along instead of read from the sentinel slot.
    fn delete_fixup(&mut self, mut node: NodeRef, mut parent: NodeRef) {
        while node != self.root && self.is_black(node) {
            if node == self.left(parent) {
                let mut sibling = self.right(parent);
                if self.is_red(sibling) {
                    self.set_black(sibling);
                    self.set_red(parent);
                    self.rotate_left(parent);
                    sibling = self.right(parent);
                }
                let (sl, sr) = (self.left(sibling), self.right(sibling));
                if self.is_black(sl) && self.is_black(sr) {
                    self.set_red(sibling);
                    node = parent;
                    parent = self.parent(node);
                } else {
                    if self.is_black(sr) {
                        self.set_black(sl);
                        self.set_red(sibling);
                        self.rotate_right(sibling);
                        sibling = self.right(parent);
                    }
                    let black = self.is_black(parent);
                    self.nodes[sibling].black = black;
                    self.set_black(parent);
                    let sr = self.right(sibling);
                    self.set_black(sr);
                    self.rotate_left(parent);
                    node = self.root;
                    parent = NIL;
                }
            } else {
                let mut sibling = self.left(parent);
                if self.is_red(sibling) {
                    self.set_black(sibling);
                    self.set_red(parent);
                    self.rotate_right(parent);
                    sibling = self.left(parent);
                }
                let (sl, sr) = (self.left(sibling), self.right(sibling));
                if self.is_black(sl) && self.is_black(sr) {
                    self.set_red(sibling);
                    node = parent;
                    parent = self.parent(node);
                } else {
                    if self.is_black(sl) {
                        self.set_black(sr);
                        self.set_red(sibling);
                        self.rotate_left(sibling);
                        sibling = self.left(parent);
                    }
                    let black = self.is_black(parent);
                    self.nodes[sibling].black = black;
                    self.set_black(parent);
                    let sl = self.left(sibling);
                    self.set_black(sl);
                    self.rotate_right(parent);
                    node = self.root;
                    parent = NIL;
                }
            }
        }
        if node != NIL {
            self.set_black(node);
        }
    }

    //              (p)                       (p)
    //               |                         |
    //              node                       x
    //              /  \                      / \
    //             /    \                    /   \
    //            /      \                  /     \
    //          left       x             node      xr
    //                    / \            /  \
    //                  xl   xr       left   xl
    //
    fn rotate_left(&mut self, node: NodeRef) {
        let x = self.right(node);
        if x == NIL {
            panic!("rotate_left(): rotating into sentinel, fatal logic, call the programmer");
        }
        trace!("{}: rotate left at {:?}", self.name, self.song(node).title());

        let xl = self.left(x);
        self.nodes[node].right = xl;
        if xl != NIL {
            self.nodes[xl].parent = node;
        }
        let parent = self.parent(node);
        self.nodes[x].parent = parent;
        if parent == NIL {
            self.root = x;
        } else if node == self.left(parent) {
            self.nodes[parent].left = x;
        } else {
            self.nodes[parent].right = x;
        }
        self.nodes[x].left = node;
        self.nodes[node].parent = x;
    }

    //              (p)                       (p)
    //               |                         |
    //              node                       x
    //              /  \                      / \
    //             /    \                    /   \
    //            /      \                  /     \
    //          x       right             xl      node
    //         / \                                / \
    //       xl   xr                             xr  right
    //
    fn rotate_right(&mut self, node: NodeRef) {
        let x = self.left(node);
        if x == NIL {
            panic!("rotate_right(): rotating into sentinel, fatal logic, call the programmer");
        }
        trace!("{}: rotate right at {:?}", self.name, self.song(node).title());

        let xr = self.right(x);
        self.nodes[node].left = xr;
        if xr != NIL {
            self.nodes[xr].parent = node;
        }
        let parent = self.parent(node);
        self.nodes[x].parent = parent;
        if parent == NIL {
            self.root = x;
        } else if node == self.right(parent) {
            self.nodes[parent].right = x;
        } else {
            self.nodes[parent].left = x;
        }
        self.nodes[x].right = node;
        self.nodes[node].parent = x;
    }
}

/// In-order iterator over [`Rbt`] entries, created by [`Rbt::iter`].
pub struct Iter<'a> {
    tree: &'a Rbt,
    stack: Vec<NodeRef>,
}

impl<'a> Iter<'a> {
    fn push_left(&mut self, mut node: NodeRef) {
        while node != NIL {
            self.stack.push(node);
            node = self.tree.left(node);
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Song;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(self.tree.right(node));
        Some(self.tree.song(node))
    }
}

/// In-order iterator over a title range, created by [`Rbt::range`].
pub struct Range<'a> {
    iter: Iter<'a>,
    high: Bound<String>,
}

impl<'a> Iterator for Range<'a> {
    type Item = &'a Song;

    fn next(&mut self) -> Option<Self::Item> {
        let song = self.iter.next()?;
        let ok = match &self.high {
            Bound::Unbounded => true,
            Bound::Included(high) => song.title() <= high.as_str(),
            Bound::Excluded(high) => song.title() < high.as_str(),
        };
        if ok {
            Some(song)
        } else {
            self.iter.stack.clear();
            None
        }
    }
}

/// Node corresponds to a single entry in Rbt instance.
#[derive(Clone)]
pub(crate) struct Node {
    song: Song,
    black: bool,       // store: black or red
    left: NodeRef,     // store: left child
    right: NodeRef,    // store: right child
    parent: NodeRef,   // store: parent, NIL for root
}

impl Node {
    // new nodes are always red.
    fn new(song: Song, parent: NodeRef) -> Node {
        Node {
            song,
            black: false,
            left: NIL,
            right: NIL,
            parent,
        }
    }

    // also used to blank released slots.
    fn sentinel() -> Node {
        Node {
            song: Song::default(),
            black: true,
            left: NIL,
            right: NIL,
            parent: NIL,
        }
    }
}

/// Statistics on [`Rbt`] tree. Serves two purpose:
///
/// * To get partial but quick statistics via [`Rbt::stats`] method.
/// * To get full statisics via [`Rbt::validate`] method.
#[derive(Default, Debug)]
pub struct Stats {
    entries: usize, // number of entries in the tree.
    node_size: usize,
    blacks: Option<usize>,
    depths: Option<Depth>,
}

impl Stats {
    fn new(entries: usize, node_size: usize) -> Stats {
        Stats {
            entries,
            node_size,
            blacks: Default::default(),
            depths: Default::default(),
        }
    }

    #[inline]
    fn set_blacks(&mut self, blacks: usize) {
        self.blacks = Some(blacks)
    }

    #[inline]
    fn set_depths(&mut self, depths: Depth) {
        self.depths = Some(depths)
    }

    /// Return number entries in [`Rbt`] instance.
    #[inline]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Return node-size, excluding string payload held on the heap.
    #[inline]
    pub fn node_size(&self) -> usize {
        self.node_size
    }

    /// Return number of black nodes from root to leaf, that is the
    /// black height of root.
    #[inline]
    pub fn blacks(&self) -> Option<usize> {
        self.blacks
    }

    /// Return [`Depth`] statistics, available only from full statistics
    /// of a non-empty tree.
    pub fn depths(&self) -> Option<Depth> {
        match &self.depths {
            Some(depths) if depths.samples() > 1 => Some(depths.clone()),
            _ => None,
        }
    }
}
