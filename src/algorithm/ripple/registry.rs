use std::fmt::Debug;
use num_traits::Float;

/// Index of a ripple in the registry arena
pub type RippleId = usize;

/// A ripple: a wavefront expanding from an epicenter node.
#[derive(Debug, Clone, PartialEq)]
pub struct Ripple<W> {
    /// Node the ripple originates from
    pub epicenter: usize,

    /// Distance travelled past the epicenter so far
    pub radius: W,

    /// Ripple whose wavefront spawned this one; `None` for the seed
    pub parent: Option<RippleId>,

    /// Length of the path from the source to `epicenter`
    pub length: W,
}

/// Arena of ripples plus the node -> ripple claim map.
///
/// Ripples are never removed, so a `RippleId` stays valid for the lifetime
/// of the registry. A node is claimed at most once.
#[derive(Debug, Clone)]
pub struct RippleRegistry<W> {
    ripples: Vec<Ripple<W>>,
    claims: Vec<Option<RippleId>>,
}

impl<W> RippleRegistry<W>
where
    W: Float + Debug,
{
    /// Creates an empty registry for a graph with `node_count` nodes
    pub fn new(node_count: usize) -> Self {
        RippleRegistry {
            ripples: Vec::new(),
            claims: vec![None; node_count],
        }
    }

    /// Creates a ripple at `epicenter` and claims the node for it.
    ///
    /// # Panics
    ///
    /// Panics if `epicenter` is already claimed; the engine only promotes
    /// candidates for unclaimed nodes.
    pub fn create(&mut self, epicenter: usize, radius: W, parent: Option<RippleId>, length: W) -> RippleId {
        assert!(
            self.claims[epicenter].is_none(),
            "node {} claimed twice (already by ripple {:?})",
            epicenter,
            self.claims[epicenter]
        );

        let id = self.ripples.len();
        self.ripples.push(Ripple {
            epicenter,
            radius,
            parent,
            length,
        });
        self.claims[epicenter] = Some(id);
        id
    }

    /// Looks up a ripple by id
    pub fn get(&self, id: RippleId) -> Option<&Ripple<W>> {
        self.ripples.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: RippleId) -> Option<&mut Ripple<W>> {
        self.ripples.get_mut(id)
    }

    /// The ripple that claimed `node`, if any
    pub fn claim_of(&self, node: usize) -> Option<RippleId> {
        self.claims.get(node).copied().flatten()
    }

    pub fn is_claimed(&self, node: usize) -> bool {
        self.claim_of(node).is_some()
    }

    /// The whole claim map, indexed by node
    pub fn claims(&self) -> &[Option<RippleId>] {
        &self.claims
    }

    /// Number of ripples ever created
    pub fn len(&self) -> usize {
        self.ripples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ripples.is_empty()
    }

    /// Node sequence from the source to the epicenter of ripple `id`.
    pub fn path_of(&self, id: RippleId) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(ripple) = current.and_then(|r| self.ripples.get(r)) {
            path.push(ripple.epicenter);
            current = ripple.parent;
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_claims_node() {
        let mut registry: RippleRegistry<f64> = RippleRegistry::new(4);
        let seed = registry.create(2, 0.0, None, 0.0);
        assert_eq!(seed, 0);
        assert_eq!(registry.claim_of(2), Some(seed));
        assert!(!registry.is_claimed(0));
        assert_eq!(registry.claim_of(99), None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_path_follows_parents() {
        let mut registry: RippleRegistry<f64> = RippleRegistry::new(4);
        let a = registry.create(0, 0.0, None, 0.0);
        let b = registry.create(3, 0.5, Some(a), 2.0);
        let c = registry.create(1, 0.0, Some(b), 5.0);
        assert_eq!(registry.path_of(c), vec![0, 3, 1]);
        assert_eq!(registry.path_of(a), vec![0]);
        assert_eq!(registry.get(c).map(|r| r.length), Some(5.0));
    }

    #[test]
    #[should_panic(expected = "claimed twice")]
    fn test_double_claim_panics() {
        let mut registry: RippleRegistry<f64> = RippleRegistry::new(2);
        registry.create(1, 0.0, None, 0.0);
        registry.create(1, 0.0, None, 0.0);
    }
}
