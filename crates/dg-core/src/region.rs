//! Region bookkeeping with a main-biased union-find
//!
//! Every room and every maze seed gets its own region. Doors merge regions
//! through [`Regions::union`]. Region 0 is the main set: whenever it takes
//! part in a union it stays the root, so "connected to the dungeon" is a
//! plain `find(id) == RegionId::MAIN` comparison.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Region identifier, sequential from 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionId(pub usize);

impl RegionId {
    /// The absorbing set every other region is merged into
    pub const MAIN: RegionId = RegionId(0);

    pub fn index(self) -> usize {
        self.0
    }

    pub fn is_main(self) -> bool {
        self == Self::MAIN
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// A room or corridor region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub is_room: bool,
    /// Doors opened onto this region
    pub door_count: u32,
    /// Cosmetic seed for renderers
    pub color_seed: u64,
}

/// Disjoint-set forest over regions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Regions {
    parent: Vec<usize>,
    regions: Vec<Region>,
    /// Added to region ids to derive color seeds (the run id)
    color_offset: u64,
}

impl Regions {
    pub fn new(color_offset: u64) -> Self {
        Self {
            parent: Vec::new(),
            regions: Vec::new(),
            color_offset,
        }
    }

    /// Allocate the next region as a singleton set
    pub fn create(&mut self, is_room: bool) -> RegionId {
        let id = RegionId(self.regions.len());
        self.parent.push(id.0);
        self.regions.push(Region {
            id,
            is_room,
            door_count: 0,
            color_seed: id.0 as u64 + self.color_offset,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn get(&self, id: RegionId) -> &Region {
        &self.regions[id.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    pub fn is_room(&self, id: RegionId) -> bool {
        self.regions[id.0].is_room
    }

    pub fn door_count(&self, id: RegionId) -> u32 {
        self.regions[id.0].door_count
    }

    pub fn add_door(&mut self, id: RegionId) {
        self.regions[id.0].door_count += 1;
    }

    /// Root of `id`'s set, compressing the path behind it
    pub fn find(&mut self, id: RegionId) -> RegionId {
        let mut root = id.0;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = id.0;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        RegionId(root)
    }

    /// Root of `id`'s set without compression, for read-only callers
    pub fn root(&self, id: RegionId) -> RegionId {
        let mut root = id.0;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        RegionId(root)
    }

    /// Merge the sets of `a` and `b`
    ///
    /// Returns false if they already share a root. The main root always
    /// survives; otherwise `b`'s root is reparented onto `a`'s.
    pub fn union(&mut self, a: RegionId, b: RegionId) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }
        if root_b.is_main() {
            self.parent[root_a.0] = root_b.0;
        } else {
            self.parent[root_b.0] = root_a.0;
        }
        true
    }

    /// True when every region's root is main
    pub fn all_connected(&self) -> bool {
        self.regions.iter().all(|r| self.root(r.id).is_main())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions(n: usize) -> Regions {
        let mut regions = Regions::new(0);
        for i in 0..n {
            regions.create(i % 2 == 0);
        }
        regions
    }

    #[test]
    fn test_create_is_sequential_singleton() {
        let mut regions = Regions::new(10);
        let a = regions.create(true);
        let b = regions.create(false);
        assert_eq!(a, RegionId(0));
        assert_eq!(b, RegionId(1));
        assert_eq!(regions.find(b), b);
        assert!(regions.is_room(a));
        assert!(!regions.is_room(b));
        assert_eq!(regions.door_count(a), 0);
        assert_eq!(regions.get(b).color_seed, 11);
    }

    #[test]
    fn test_union_returns_false_when_joined() {
        let mut regions = regions(3);
        assert!(regions.union(RegionId(1), RegionId(2)));
        assert!(!regions.union(RegionId(2), RegionId(1)));
        assert_eq!(regions.find(RegionId(2)), RegionId(1));
    }

    #[test]
    fn test_main_root_always_wins() {
        let mut regions = regions(6);
        // Build a non-main chain first: 5 -> 4 -> 3
        regions.union(RegionId(4), RegionId(5));
        regions.union(RegionId(3), RegionId(4));
        assert_eq!(regions.find(RegionId(5)), RegionId(3));

        // Main on the b side still ends up as the root
        assert!(regions.union(RegionId(5), RegionId::MAIN));
        for id in 3..6 {
            assert_eq!(regions.find(RegionId(id)), RegionId::MAIN);
        }

        // And on the a side
        assert!(regions.union(RegionId::MAIN, RegionId(2)));
        assert_eq!(regions.find(RegionId(2)), RegionId::MAIN);
        assert!(!regions.all_connected());
        regions.union(RegionId(1), RegionId(2));
        assert!(regions.all_connected());
    }

    #[test]
    fn test_path_compression() {
        let mut regions = regions(5);
        for i in (1..5).rev() {
            // i-1 becomes the parent of i's root
            regions.union(RegionId(i - 1), RegionId(i));
        }
        assert_eq!(regions.root(RegionId(4)), RegionId::MAIN);
        assert_eq!(regions.find(RegionId(4)), RegionId::MAIN);
        assert_eq!(regions.parent[4], 0);
        assert_eq!(regions.parent[3], 0);
    }

    #[test]
    fn test_door_counts() {
        let mut regions = regions(2);
        regions.add_door(RegionId(0));
        regions.add_door(RegionId(0));
        assert_eq!(regions.door_count(RegionId(0)), 2);
        assert_eq!(regions.door_count(RegionId(1)), 0);
    }
}
