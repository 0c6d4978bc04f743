//! Contiguous storage of provisional labels and their union-find chains.
//!
//! Ids are 1-indexed; id `0` is the reserved background sentinel and is
//! never allocated. During the raster scan (pass 1) only `target_id` is
//! mutated, as a plain (uncompressed) union-find parent pointer — see
//! [`LabelArena::union`]. `target_ref` stays unset until pass 2
//! ([`LabelArena::finalize`]), where it becomes the path-compressed link
//! that pass 3 walks via [`LabelArena::resolve`].

use crate::component::Component;

#[derive(Debug, Clone)]
pub(crate) struct Label<A> {
    pub image_value: A,
    pub target_id: u32,
    pub target_ref: Option<u32>,
    pub size: u64,
    pub on_edge_x: bool,
    pub on_edge_y: bool,
    pub on_edge_z: bool,
}

impl<A: Copy> Label<A> {
    fn new(id: u32, image_value: A) -> Self {
        Label { image_value, target_id: id, target_ref: None, size: 0, on_edge_x: false, on_edge_y: false, on_edge_z: false }
    }
}

pub(crate) struct LabelArena<A> {
    // Index 0 is an unused placeholder so ids can index directly.
    labels: Vec<Label<A>>,
}

impl<A: Copy> LabelArena<A> {
    pub(crate) fn with_capacity(capacity_hint: usize, placeholder: A) -> Self {
        let mut labels = Vec::with_capacity(capacity_hint + 1);
        labels.push(Label::new(0, placeholder));
        LabelArena { labels }
    }

    /// Number of labels allocated so far (the highest valid id, `H`).
    pub(crate) fn len(&self) -> usize {
        self.labels.len() - 1
    }

    /// Allocates a fresh label with `target_id = target_ref = self`.
    ///
    /// Returns `None` if the arena would grow past `u32::MAX - 1`, the
    /// overflow condition callers should treat as fatal and split the volume
    /// to avoid.
    pub(crate) fn allocate(&mut self, image_value: A) -> Option<u32> {
        if self.labels.len() as u64 >= u32::MAX as u64 - 1 {
            return None;
        }
        let id = self.labels.len() as u32;
        self.labels.push(Label::new(id, image_value));
        Some(id)
    }

    pub(crate) fn image_value(&self, id: u32) -> A {
        self.labels[id as usize].image_value
    }

    /// Increments `id`'s voxel count and ORs in the edge flags observed at
    /// the voxel that was just assigned to it.
    pub(crate) fn add_voxel(&mut self, id: u32, on_edge_x: bool, on_edge_y: bool, on_edge_z: bool) {
        let rec = &mut self.labels[id as usize];
        rec.size += 1;
        rec.on_edge_x |= on_edge_x;
        rec.on_edge_y |= on_edge_y;
        rec.on_edge_z |= on_edge_z;
    }

    /// Live union-find parent walk used during pass 1. Deliberately
    /// uncompressed: unions keep happening throughout the scan, so caching a
    /// shortcut here (as `target_ref` eventually does) would go stale the
    /// moment a cached root gets unioned under something smaller. See
    /// `resolve` for the compressed walk used once the arena is frozen.
    fn find_root(&self, mut id: u32) -> u32 {
        while self.labels[id as usize].target_id != id {
            id = self.labels[id as usize].target_id;
        }
        id
    }

    /// Unions the equivalence classes of `a` and `b`, always pointing the
    /// numerically higher canonical root at the lower one, including the
    /// case where `a` or `b` is itself already a non-canonical id:
    /// resolving both sides to their *current* canonical root before
    /// comparing handles it uniformly, whichever one turns out to already
    /// be the lower root.
    pub(crate) fn union(&mut self, a: u32, b: u32) {
        let root_a = self.find_root(a);
        let root_b = self.find_root(b);
        if root_a == root_b {
            return;
        }
        let (lo, hi) = if root_a < root_b { (root_a, root_b) } else { (root_b, root_a) };
        self.labels[hi as usize].target_id = lo;
    }

    /// Pass 2: resolve equivalences highest-id-first, apply the size/edge
    /// filters to canonical labels, and assign dense final ids.
    ///
    /// Returns the finalized `Component` stubs (capacity-reserved, empty of
    /// points — pass 3 fills those in) in ascending final-id order.
    pub(crate) fn finalize(
        &mut self,
        t: usize,
        min_size: usize,
        max_size: usize,
        no_edge_x: bool,
        no_edge_y: bool,
        no_edge_z: bool,
    ) -> Vec<Component> {
        let h = self.len();
        let mut next_final_id = 0u32;
        let mut components: Vec<Component> = Vec::new();

        for l in (1..=h as u32).rev() {
            let target_id = self.labels[l as usize].target_id;
            if target_id < l {
                // Non-canonical: fuse into its (possibly also non-canonical,
                // but numerically smaller, so processed later in this same
                // backward pass) target.
                let size = self.labels[l as usize].size;
                let (ex, ey, ez) = {
                    let rec = &self.labels[l as usize];
                    (rec.on_edge_x, rec.on_edge_y, rec.on_edge_z)
                };
                let target = &mut self.labels[target_id as usize];
                target.size += size;
                target.on_edge_x |= ex;
                target.on_edge_y |= ey;
                target.on_edge_z |= ez;
                self.labels[l as usize].target_ref = Some(target_id);
            } else {
                // Canonical (target_id == l, the invariant forbids target_id > l).
                let rec = &self.labels[l as usize];
                let size = rec.size as usize;
                let discard = size < min_size
                    || size > max_size
                    || (rec.on_edge_x && no_edge_x)
                    || (rec.on_edge_y && no_edge_y)
                    || (rec.on_edge_z && no_edge_z);

                if discard {
                    self.labels[l as usize].target_id = 0;
                } else {
                    next_final_id += 1;
                    let rec = &self.labels[l as usize];
                    components.push(Component::new_stub(
                        t,
                        rec.on_edge_x,
                        rec.on_edge_y,
                        rec.on_edge_z,
                        rec.size as usize,
                    ));
                    self.labels[l as usize].target_id = next_final_id;
                }
            }
        }

        components.reverse();
        components
    }

    /// Pass 3 lookup: walks `target_ref` links set by `finalize` until it
    /// reaches the canonical record (`target_ref.is_none()`), then returns
    /// that record's final `target_id` (`0` if discarded, otherwise the
    /// dense final id). Idempotent: `resolve(resolve(id)) == resolve(id)`.
    pub(crate) fn resolve(&self, mut id: u32) -> u32 {
        if id == 0 {
            return 0;
        }
        loop {
            let rec = &self.labels[id as usize];
            match rec.target_ref {
                Some(next) => id = next,
                None => return rec.target_id,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_assigns_sequential_ids() {
        let mut arena = LabelArena::with_capacity(4, 0u8);
        assert_eq!(arena.allocate(1).unwrap(), 1);
        assert_eq!(arena.allocate(1).unwrap(), 2);
        assert_eq!(arena.allocate(1).unwrap(), 3);
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn union_points_higher_root_at_lower() {
        let mut arena = LabelArena::with_capacity(4, 0u8);
        arena.allocate(1).unwrap();
        arena.allocate(1).unwrap();
        arena.allocate(1).unwrap();
        arena.union(2, 3);
        arena.union(1, 3);
        assert_eq!(arena.find_root(3), 1);
        assert_eq!(arena.find_root(2), 1);
    }

    #[test]
    fn resolve_is_idempotent_after_finalize() {
        let mut arena = LabelArena::with_capacity(4, 0u8);
        arena.allocate(1).unwrap();
        arena.allocate(1).unwrap();
        arena.allocate(1).unwrap();
        arena.union(2, 3);
        arena.union(1, 3);
        arena.add_voxel(1, false, false, false);
        let _ = arena.finalize(0, 1, usize::MAX, false, false, false);
        for id in 0..=3u32 {
            let r = arena.resolve(id);
            assert_eq!(arena.resolve(r), r);
        }
    }

    #[test]
    fn finalize_discards_out_of_bounds_size() {
        let mut arena = LabelArena::with_capacity(4, 0u8);
        arena.allocate(1).unwrap();
        arena.add_voxel(1, false, false, false);
        let components = arena.finalize(0, 2, usize::MAX, false, false, false);
        assert!(components.is_empty());
        assert_eq!(arena.resolve(1), 0);
    }

    #[test]
    fn finalize_discards_on_edge_when_requested() {
        let mut arena = LabelArena::with_capacity(4, 0u8);
        arena.allocate(1).unwrap();
        arena.add_voxel(1, true, false, false);
        let components = arena.finalize(0, 1, usize::MAX, true, false, false);
        assert!(components.is_empty());
        assert_eq!(arena.resolve(1), 0);
    }
}
