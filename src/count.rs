/// Analysis over built diagrams: node counts, path counts, minterm counts.
///
/// `count_paths` is exact (arbitrary precision); `count_minterms` works in
/// doubles and may overflow to infinity for very wide cubes, which is
/// acceptable for its use as a satisfaction fraction.
use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::common::{HashMap, HashSet, NodeId};
use crate::manager::DdManager;
use crate::nodes::Edge;

impl DdManager {
    /// Number of internal nodes reachable from `f`; terminals are not
    /// counted. Complemented and regular references to a node count once.
    pub fn count_nodes(&self, f: Edge) -> usize {
        let mut visited = HashSet::default();
        self.count_nodes_rec(f.index(), &mut visited)
    }

    fn count_nodes_rec(&self, id: NodeId, visited: &mut HashSet<NodeId>) -> usize {
        if !visited.insert(id) {
            return 0;
        }
        let node = self.store.node(id);
        if node.is_terminal() {
            return 0;
        }
        let t = node.then_edge.index();
        let e = node.else_edge.index();
        1 + self.count_nodes_rec(t, visited) + self.count_nodes_rec(e, visited)
    }

    /// Number of paths from `f` to the ONE terminal, resolving complement
    /// parity along the way. Skipped levels do not multiply paths.
    pub fn count_paths(&self, f: Edge) -> BigUint {
        let mut memo = HashMap::default();
        self.count_paths_rec(f, &mut memo)
    }

    fn count_paths_rec(&self, f: Edge, memo: &mut HashMap<u64, BigUint>) -> BigUint {
        if f == self.one() {
            return BigUint::one();
        }
        if self.is_terminal(f) {
            return BigUint::zero();
        }
        if let Some(c) = memo.get(&f.bits()) {
            return c.clone();
        }
        let (mut t, mut e) = self.children(f);
        if f.is_complemented() {
            t = t.complement();
            e = e.complement();
        }
        let c = self.count_paths_rec(t, memo) + self.count_paths_rec(e, memo);
        memo.insert(f.bits(), c.clone());
        c
    }

    /// Number of assignments of `num_vars` variables satisfying the BDD
    /// `f`, as the on-set fraction of the cube scaled by 2^num_vars.
    /// Levels skipped along an edge halve the fraction implicitly, so the
    /// count is exact up to double precision.
    pub fn count_minterms(&self, f: Edge, num_vars: usize) -> f64 {
        let mut memo = HashMap::default();
        self.minterm_fraction(f, &mut memo) * 2f64.powi(num_vars as i32)
    }

    fn minterm_fraction(&self, f: Edge, memo: &mut HashMap<u64, f64>) -> f64 {
        if f == self.one() {
            return 1.0;
        }
        if f == self.zero() {
            return 0.0;
        }
        if let Some(&v) = memo.get(&f.bits()) {
            return v;
        }
        let (t, e) = self.bdd_cofactors(f, self.edge_level(f));
        let v = 0.5 * self.minterm_fraction(t, memo) + 0.5 * self.minterm_fraction(e, memo);
        memo.insert(f.bits(), v);
        v
    }
}
