/// Shared manager for BDD, ADD and ZDD kernels.
///
/// Description:
///
/// One manager owns one node store, one unique table per variable level,
/// one memoization cache, and the variable ordering. The three kernels
/// allocate through flavor-specific constructors that apply the matching
/// reduction rule before hash-consing:
///
/// - `create_bdd_node`: Shannon reduction plus complement normalization
///   (the stored else edge is always regular);
/// - `create_add_node`: Shannon reduction only, complement edges rejected;
/// - `create_zdd_node`: zero-suppression (a then edge of ZERO collapses the
///   node to its else child).
///
/// The Boolean constant is a single terminal node: ONE is its regular
/// handle and ZERO the complemented one. ADD terminals are separate
/// terminal nodes interned by exact bit pattern, one per distinct value.
///
/// Clients pin roots with `acquire`/`release`; everything unreachable from
/// a pinned root is reclaimed by `gc`.
use crate::cache::OpCache;
use crate::common::{DdError, HashMap, Level, NodeId, Result, VarId};
use crate::nodes::{Edge, NodeStore, BOTTOM, TERMINAL};
use crate::unique::LevelTable;

pub const DEFAULT_CACHE_SIZE: usize = 1 << 18;

/// `maybe_gc` collects once dead roots exceed this fraction of live nodes.
const GC_DEAD_RATIO: (usize, usize) = (1, 5);

pub struct DdManager {
    pub(crate) store: NodeStore,
    /// One table per level, indexed 1..=num_vars; slot 0 is unused.
    pub(crate) utable: Vec<LevelTable>,
    /// ADD terminal interning, keyed by the value's bit pattern.
    pub(crate) vtable: HashMap<u64, NodeId>,
    pub(crate) cache: OpCache,
    pub(crate) level_of: Vec<Level>,
    pub(crate) var_at: Vec<VarId>,
    num_vars: usize,
    one: Edge,
    pub(crate) num_live: usize,
    pub(crate) num_dead: usize,
}

impl DdManager {
    pub fn new(num_vars: usize) -> Self {
        Self::with_cache_size(num_vars, DEFAULT_CACHE_SIZE)
    }

    pub fn with_cache_size(num_vars: usize, cache_size: usize) -> Self {
        let mut store = NodeStore::new();
        // The Boolean constant; pinned so no sweep can touch it.
        let constant = store.alloc(TERMINAL, Edge::NONE, Edge::NONE, 1.0);
        store.node_mut(constant).ref_count = 1;
        let one = Edge::new(constant);
        let utable = (0..=num_vars).map(|_| LevelTable::new()).collect();
        // Identity ordering; operations consult these arrays, never the
        // variable index itself.
        let level_of = (0..=num_vars).collect();
        let var_at = (0..=num_vars).collect();
        Self {
            store,
            utable,
            vtable: HashMap::default(),
            cache: OpCache::new(cache_size),
            level_of,
            var_at,
            num_vars,
            one,
            num_live: 1,
            num_dead: 0,
        }
    }

    #[inline]
    pub fn one(&self) -> Edge {
        self.one
    }

    #[inline]
    pub fn zero(&self) -> Edge {
        self.one.complement()
    }

    #[inline]
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub(crate) fn check_var(&self, var: VarId) -> Result<()> {
        if var == 0 || var > self.num_vars {
            return Err(DdError::VarOutOfRange {
                var,
                num_vars: self.num_vars,
            });
        }
        Ok(())
    }

    /// Level of the edge's node; `BOTTOM` for terminals so that the
    /// minimum over operands always picks a real top level.
    #[inline]
    pub(crate) fn edge_level(&self, f: Edge) -> Level {
        let node = self.store.node(f.index());
        if node.is_terminal() {
            BOTTOM
        } else {
            self.level_of[node.var]
        }
    }

    #[inline]
    pub fn is_terminal(&self, f: Edge) -> bool {
        self.store.node(f.index()).is_terminal()
    }

    #[inline]
    pub(crate) fn children(&self, f: Edge) -> (Edge, Edge) {
        let node = self.store.node(f.index());
        (node.then_edge, node.else_edge)
    }

    #[inline]
    pub(crate) fn node_var(&self, f: Edge) -> VarId {
        self.store.node(f.index()).var
    }

    /// Value of an ADD terminal; meaningless for internal nodes.
    #[inline]
    pub(crate) fn terminal_value(&self, f: Edge) -> f64 {
        self.store.node(f.index()).value
    }

    fn insert_unique(&mut self, level: Level, then_edge: Edge, else_edge: Edge) -> Edge {
        debug_assert!(level >= 1 && level <= self.num_vars);
        if let Some(id) = self.utable[level].find(&self.store, then_edge, else_edge) {
            return Edge::new(id);
        }
        let id = self.store.alloc(self.var_at[level], then_edge, else_edge, 0.0);
        self.utable[level].insert(&mut self.store, id);
        self.num_live += 1;
        Edge::new(id)
    }

    /// BDD lookup: Shannon reduction, then sign normalization of the else
    /// edge (flip both children and complement the returned handle).
    pub(crate) fn create_bdd_node(&mut self, level: Level, t: Edge, e: Edge) -> Edge {
        if t == e {
            return t;
        }
        if e.is_complemented() {
            let r = self.insert_unique(level, t.complement(), e.complement());
            r.complement()
        } else {
            self.insert_unique(level, t, e)
        }
    }

    /// ADD lookup: Shannon reduction only. ADDs carry no complement edges.
    pub(crate) fn create_add_node(&mut self, level: Level, t: Edge, e: Edge) -> Edge {
        debug_assert!(!t.is_complemented() && !e.is_complemented());
        if t == e {
            return t;
        }
        self.insert_unique(level, t, e)
    }

    /// ZDD lookup: zero-suppression. Equal children do not merge here; a
    /// ZDD node with then == else is meaningful.
    pub(crate) fn create_zdd_node(&mut self, level: Level, t: Edge, e: Edge) -> Edge {
        if t == self.zero() {
            return e;
        }
        self.insert_unique(level, t, e)
    }

    /// BDD projection for variable `var`.
    pub fn ith_var(&mut self, var: VarId) -> Result<Edge> {
        self.check_var(var)?;
        let one = self.one();
        let zero = self.zero();
        Ok(self.create_bdd_node(self.level_of[var], one, zero))
    }

    /// ADD terminal for `value`, interned by exact bit pattern. NaN is
    /// never interned, so NaN terminals compare unequal to each other.
    pub fn add_const(&mut self, value: f64) -> Edge {
        if value.is_nan() {
            let id = self.store.alloc(TERMINAL, Edge::NONE, Edge::NONE, value);
            self.num_live += 1;
            return Edge::new(id);
        }
        let bits = value.to_bits();
        if let Some(&id) = self.vtable.get(&bits) {
            return Edge::new(id);
        }
        let id = self.store.alloc(TERMINAL, Edge::NONE, Edge::NONE, value);
        self.vtable.insert(bits, id);
        self.num_live += 1;
        Edge::new(id)
    }

    /// ADD projection: terminal 1.0 under the then edge, 0.0 under else.
    pub fn add_ith_var(&mut self, var: VarId) -> Result<Edge> {
        self.check_var(var)?;
        let t = self.add_const(1.0);
        let e = self.add_const(0.0);
        Ok(self.create_add_node(self.level_of[var], t, e))
    }

    /// The empty family of sets.
    #[inline]
    pub fn zdd_empty(&self) -> Edge {
        self.zero()
    }

    /// The family containing only the empty set.
    #[inline]
    pub fn zdd_base(&self) -> Edge {
        self.one()
    }

    /// The family containing only the set `{var}`.
    pub fn zdd_singleton(&mut self, var: VarId) -> Result<Edge> {
        self.check_var(var)?;
        let one = self.one();
        let zero = self.zero();
        Ok(self.create_zdd_node(self.level_of[var], one, zero))
    }

    /// Pins the node under `f` as a root for the collector.
    pub fn acquire(&mut self, f: Edge) {
        let node = self.store.node_mut(f.index());
        if node.ref_count == 0 && self.num_dead > 0 {
            self.num_dead -= 1;
        }
        node.ref_count = node.ref_count.saturating_add(1);
    }

    /// Releases a pinned root; at zero the node becomes collectible.
    pub fn release(&mut self, f: Edge) {
        let node = self.store.node_mut(f.index());
        debug_assert!(node.ref_count > 0);
        node.ref_count = node.ref_count.saturating_sub(1);
        if node.ref_count == 0 {
            self.num_dead += 1;
        }
    }

    /// Collects if dead roots exceed the configured fraction of live nodes.
    pub fn maybe_gc(&mut self) -> bool {
        let (num, den) = GC_DEAD_RATIO;
        if self.num_dead * den > self.num_live * num {
            self.gc();
            true
        } else {
            false
        }
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// (live nodes, dead roots, unique-table entries, cache slots).
    pub fn size(&self) -> (usize, usize, usize, usize) {
        let entries = self.utable.iter().map(|t| t.len()).sum();
        (self.num_live, self.num_dead, entries, self.cache.len())
    }
}
