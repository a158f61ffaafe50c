/// ZDD (Zero-suppressed Decision Diagram) kernel.
///
/// Description:
///
/// Families of subsets over the manager's variables. A node's then branch
/// holds the member sets that contain the node's variable, the else branch
/// those that do not; a variable skipped along an edge is absent from
/// every set below it. The reduction rule is zero-suppression, applied by
/// `create_zdd_node`, and internal ZDD edges are never complemented; the
/// only complemented handle in play is the ZERO constant itself.
///
/// Set operations:
/// - union / intersection / difference
/// - subset1(f, v): members containing v, with v stripped
/// - subset0(f, v): members omitting v
/// - change(f, v): toggle membership of v in every set
/// - count: exact member count, arbitrary precision
/// - from_sets / to_sets: explicit enumeration in both directions
use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::cache::Operation;
use crate::common::{HashMap, Result, VarId};
use crate::manager::DdManager;
use crate::nodes::Edge;

impl DdManager {
    /// Cofactors at `top` under the ZDD skip convention: a deeper operand
    /// contains `top`'s variable in none of its sets, so its then cofactor
    /// is the empty family and its else cofactor is itself.
    fn zdd_cofactors(&self, f: Edge, top: usize) -> (Edge, Edge) {
        if self.edge_level(f) != top {
            (self.zero(), f)
        } else {
            self.children(f)
        }
    }

    pub fn zdd_union(&mut self, f: Edge, g: Edge) -> Edge {
        if f == self.zero() || f == g {
            return g;
        }
        if g == self.zero() {
            return f;
        }
        let (f, g) = if f.bits() <= g.bits() { (f, g) } else { (g, f) };
        if let Some(r) = self.cache.lookup(Operation::ZddUnion, f, g, Edge::NONE) {
            return r;
        }
        let top = self.edge_level(f).min(self.edge_level(g));
        let (f1, f0) = self.zdd_cofactors(f, top);
        let (g1, g0) = self.zdd_cofactors(g, top);
        let t = self.zdd_union(f1, g1);
        let e = self.zdd_union(f0, g0);
        let r = self.create_zdd_node(top, t, e);
        self.cache.insert(Operation::ZddUnion, f, g, Edge::NONE, r);
        r
    }

    pub fn zdd_intersection(&mut self, f: Edge, g: Edge) -> Edge {
        if f == self.zero() || g == self.zero() {
            return self.zero();
        }
        if f == g {
            return f;
        }
        let (f, g) = if f.bits() <= g.bits() { (f, g) } else { (g, f) };
        if let Some(r) = self.cache.lookup(Operation::ZddIntersect, f, g, Edge::NONE) {
            return r;
        }
        let top = self.edge_level(f).min(self.edge_level(g));
        let (f1, f0) = self.zdd_cofactors(f, top);
        let (g1, g0) = self.zdd_cofactors(g, top);
        let t = self.zdd_intersection(f1, g1);
        let e = self.zdd_intersection(f0, g0);
        let r = self.create_zdd_node(top, t, e);
        self.cache
            .insert(Operation::ZddIntersect, f, g, Edge::NONE, r);
        r
    }

    pub fn zdd_difference(&mut self, f: Edge, g: Edge) -> Edge {
        if f == self.zero() || f == g {
            return self.zero();
        }
        if g == self.zero() {
            return f;
        }
        if let Some(r) = self.cache.lookup(Operation::ZddDiff, f, g, Edge::NONE) {
            return r;
        }
        let top = self.edge_level(f).min(self.edge_level(g));
        let (f1, f0) = self.zdd_cofactors(f, top);
        let (g1, g0) = self.zdd_cofactors(g, top);
        let t = self.zdd_difference(f1, g1);
        let e = self.zdd_difference(f0, g0);
        let r = self.create_zdd_node(top, t, e);
        self.cache.insert(Operation::ZddDiff, f, g, Edge::NONE, r);
        r
    }

    /// Member sets that contain `var`, with `var` stripped from each. A
    /// variable above the diagram's support is in no member set, so the
    /// result is empty.
    pub fn zdd_subset1(&mut self, f: Edge, var: VarId) -> Result<Edge> {
        self.check_var(var)?;
        Ok(self.zdd_subset1_rec(f, self.level_of[var], Edge::new(var)))
    }

    fn zdd_subset1_rec(&mut self, f: Edge, lv: usize, key: Edge) -> Edge {
        let level = self.edge_level(f);
        if level > lv {
            return self.zero();
        }
        if level == lv {
            let (t, _) = self.children(f);
            return t;
        }
        if let Some(r) = self.cache.lookup(Operation::ZddSubset1, f, key, Edge::NONE) {
            return r;
        }
        let (f1, f0) = self.children(f);
        let t = self.zdd_subset1_rec(f1, lv, key);
        let e = self.zdd_subset1_rec(f0, lv, key);
        let r = self.create_zdd_node(level, t, e);
        self.cache.insert(Operation::ZddSubset1, f, key, Edge::NONE, r);
        r
    }

    /// Member sets that omit `var`. A variable above the support is absent
    /// from every member set, so the family passes through unchanged.
    pub fn zdd_subset0(&mut self, f: Edge, var: VarId) -> Result<Edge> {
        self.check_var(var)?;
        Ok(self.zdd_subset0_rec(f, self.level_of[var], Edge::new(var)))
    }

    fn zdd_subset0_rec(&mut self, f: Edge, lv: usize, key: Edge) -> Edge {
        let level = self.edge_level(f);
        if level > lv {
            return f;
        }
        if level == lv {
            let (_, e) = self.children(f);
            return e;
        }
        if let Some(r) = self.cache.lookup(Operation::ZddSubset0, f, key, Edge::NONE) {
            return r;
        }
        let (f1, f0) = self.children(f);
        let t = self.zdd_subset0_rec(f1, lv, key);
        let e = self.zdd_subset0_rec(f0, lv, key);
        let r = self.create_zdd_node(level, t, e);
        self.cache.insert(Operation::ZddSubset0, f, key, Edge::NONE, r);
        r
    }

    /// Toggles membership of `var` in every member set.
    pub fn zdd_change(&mut self, f: Edge, var: VarId) -> Result<Edge> {
        self.check_var(var)?;
        Ok(self.zdd_change_rec(f, self.level_of[var], Edge::new(var)))
    }

    fn zdd_change_rec(&mut self, f: Edge, lv: usize, key: Edge) -> Edge {
        if f == self.zero() {
            return f;
        }
        let level = self.edge_level(f);
        if level > lv {
            // var is absent below; every set gains it
            return self.create_zdd_node(lv, f, self.zero());
        }
        if level == lv {
            let (t, e) = self.children(f);
            return self.create_zdd_node(lv, e, t);
        }
        if let Some(r) = self.cache.lookup(Operation::ZddChange, f, key, Edge::NONE) {
            return r;
        }
        let (f1, f0) = self.children(f);
        let t = self.zdd_change_rec(f1, lv, key);
        let e = self.zdd_change_rec(f0, lv, key);
        let r = self.create_zdd_node(level, t, e);
        self.cache.insert(Operation::ZddChange, f, key, Edge::NONE, r);
        r
    }

    /// Exact number of member sets.
    pub fn zdd_count(&self, f: Edge) -> BigUint {
        let mut memo = HashMap::default();
        self.zdd_count_rec(f, &mut memo)
    }

    fn zdd_count_rec(&self, f: Edge, memo: &mut HashMap<u64, BigUint>) -> BigUint {
        if f == self.zero() {
            return BigUint::zero();
        }
        if f == self.one() {
            return BigUint::one();
        }
        if let Some(c) = memo.get(&f.bits()) {
            return c.clone();
        }
        let (t, e) = self.children(f);
        let c = self.zdd_count_rec(t, memo) + self.zdd_count_rec(e, memo);
        memo.insert(f.bits(), c.clone());
        c
    }

    /// Builds the family containing exactly the given sets. Duplicate
    /// variables within a set and duplicate sets are both harmless.
    pub fn zdd_from_sets(&mut self, sets: &[Vec<VarId>]) -> Result<Edge> {
        for set in sets {
            for &v in set {
                self.check_var(v)?;
            }
        }
        let mut family = self.zdd_empty();
        for set in sets {
            let mut levels: Vec<usize> = set.iter().map(|&v| self.level_of[v]).collect();
            levels.sort_unstable();
            levels.dedup();
            // deepest level first so every new node sits above its child
            let mut acc = self.zdd_base();
            for &lv in levels.iter().rev() {
                let zero = self.zdd_empty();
                acc = self.create_zdd_node(lv, acc, zero);
            }
            family = self.zdd_union(family, acc);
        }
        Ok(family)
    }

    /// Enumerates the member sets, each as a sorted list of variables.
    pub fn zdd_to_sets(&self, f: Edge) -> Vec<Vec<VarId>> {
        let mut out = Vec::new();
        let mut stack = Vec::new();
        self.zdd_to_sets_rec(f, &mut stack, &mut out);
        out
    }

    fn zdd_to_sets_rec(&self, f: Edge, stack: &mut Vec<VarId>, out: &mut Vec<Vec<VarId>>) {
        if f == self.zero() {
            return;
        }
        if f == self.one() {
            let mut set = stack.clone();
            set.sort_unstable();
            out.push(set);
            return;
        }
        let var = self.node_var(f);
        let (t, e) = self.children(f);
        self.zdd_to_sets_rec(e, stack, out);
        stack.push(var);
        self.zdd_to_sets_rec(t, stack, out);
        stack.pop();
    }
}
