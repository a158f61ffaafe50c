/// BDD (Binary Decision Diagram) kernel.
///
/// Description:
///
/// Boolean functions over the manager's variables, with complement edges:
/// negation is a bit flip on the handle and costs nothing. All binary
/// connectives share the same shape: terminal short-circuits, a cache
/// probe, cofactor recursion at the top level of the operands, and a
/// hash-consing rebuild. Commutative connectives order their operands by
/// handle value first so both argument orders hit the same cache slot.
///
/// The kernel provides:
/// - ite(f, g, h): if-then-else, the central operation
/// - and / or / xor, specialized for their terminal tables
/// - not(f): complement, O(1), no allocation
/// - restrict(f, v, b): cofactor by a single variable
/// - exists / forall over a set of variables
/// - imp / nand / nor / xnor, derived connectives
/// - eval(f, assignment): deterministic descent
use crate::cache::Operation;
use crate::common::{Result, VarId};
use crate::manager::DdManager;
use crate::nodes::Edge;

impl DdManager {
    /// Positive and negative cofactors of `f` at `top`. An operand whose
    /// level is deeper than `top` is its own cofactor; a complemented
    /// handle pushes the complement onto both children.
    pub(crate) fn bdd_cofactors(&self, f: Edge, top: usize) -> (Edge, Edge) {
        if self.edge_level(f) != top {
            return (f, f);
        }
        let (mut t, mut e) = self.children(f);
        if f.is_complemented() {
            t = t.complement();
            e = e.complement();
        }
        (t, e)
    }

    #[inline]
    pub fn bdd_not(&self, f: Edge) -> Edge {
        f.complement()
    }

    pub fn bdd_and(&mut self, f: Edge, g: Edge) -> Edge {
        let one = self.one();
        let zero = self.zero();
        if f == zero || g == zero {
            return zero;
        }
        if f == one {
            return g;
        }
        if g == one {
            return f;
        }
        if f == g {
            return f;
        }
        if f == g.complement() {
            return zero;
        }
        let (f, g) = if f.bits() <= g.bits() { (f, g) } else { (g, f) };
        if let Some(r) = self.cache.lookup(Operation::BddAnd, f, g, Edge::NONE) {
            return r;
        }
        let top = self.edge_level(f).min(self.edge_level(g));
        let (f1, f0) = self.bdd_cofactors(f, top);
        let (g1, g0) = self.bdd_cofactors(g, top);
        let t = self.bdd_and(f1, g1);
        let e = self.bdd_and(f0, g0);
        let r = self.create_bdd_node(top, t, e);
        self.cache.insert(Operation::BddAnd, f, g, Edge::NONE, r);
        r
    }

    pub fn bdd_or(&mut self, f: Edge, g: Edge) -> Edge {
        let one = self.one();
        let zero = self.zero();
        if f == one || g == one {
            return one;
        }
        if f == zero {
            return g;
        }
        if g == zero {
            return f;
        }
        if f == g {
            return f;
        }
        if f == g.complement() {
            return one;
        }
        let (f, g) = if f.bits() <= g.bits() { (f, g) } else { (g, f) };
        if let Some(r) = self.cache.lookup(Operation::BddOr, f, g, Edge::NONE) {
            return r;
        }
        let top = self.edge_level(f).min(self.edge_level(g));
        let (f1, f0) = self.bdd_cofactors(f, top);
        let (g1, g0) = self.bdd_cofactors(g, top);
        let t = self.bdd_or(f1, g1);
        let e = self.bdd_or(f0, g0);
        let r = self.create_bdd_node(top, t, e);
        self.cache.insert(Operation::BddOr, f, g, Edge::NONE, r);
        r
    }

    pub fn bdd_xor(&mut self, f: Edge, g: Edge) -> Edge {
        let one = self.one();
        let zero = self.zero();
        if f == zero {
            return g;
        }
        if g == zero {
            return f;
        }
        if f == one {
            return g.complement();
        }
        if g == one {
            return f.complement();
        }
        if f == g {
            return zero;
        }
        if f == g.complement() {
            return one;
        }
        let (f, g) = if f.bits() <= g.bits() { (f, g) } else { (g, f) };
        if let Some(r) = self.cache.lookup(Operation::BddXor, f, g, Edge::NONE) {
            return r;
        }
        let top = self.edge_level(f).min(self.edge_level(g));
        let (f1, f0) = self.bdd_cofactors(f, top);
        let (g1, g0) = self.bdd_cofactors(g, top);
        let t = self.bdd_xor(f1, g1);
        let e = self.bdd_xor(f0, g0);
        let r = self.create_bdd_node(top, t, e);
        self.cache.insert(Operation::BddXor, f, g, Edge::NONE, r);
        r
    }

    /// ITE(f, g, h) = (f AND g) OR (NOT f AND h).
    pub fn bdd_ite(&mut self, f: Edge, g: Edge, h: Edge) -> Edge {
        let one = self.one();
        let zero = self.zero();
        if f == one {
            return g;
        }
        if f == zero {
            return h;
        }
        if g == h {
            return g;
        }
        if g == one && h == zero {
            return f;
        }
        if g == zero && h == one {
            return f.complement();
        }
        if f == g {
            return self.bdd_or(f, h);
        }
        if f == h {
            return self.bdd_and(f, g);
        }
        if f == g.complement() {
            return self.bdd_and(g, h);
        }
        // Canonical predicate sign: a complemented f swaps the branches.
        let (f, g, h) = if f.is_complemented() {
            (f.complement(), h, g)
        } else {
            (f, g, h)
        };
        if let Some(r) = self.cache.lookup(Operation::BddIte, f, g, h) {
            return r;
        }
        let top = self
            .edge_level(f)
            .min(self.edge_level(g))
            .min(self.edge_level(h));
        let (f1, f0) = self.bdd_cofactors(f, top);
        let (g1, g0) = self.bdd_cofactors(g, top);
        let (h1, h0) = self.bdd_cofactors(h, top);
        let t = self.bdd_ite(f1, g1, h1);
        let e = self.bdd_ite(f0, g0, h0);
        let r = self.create_bdd_node(top, t, e);
        self.cache.insert(Operation::BddIte, f, g, h, r);
        r
    }

    /// Cofactor of `f` by `var = val`.
    pub fn bdd_restrict(&mut self, f: Edge, var: VarId, val: bool) -> Result<Edge> {
        self.check_var(var)?;
        let proj = self.ith_var(var)?;
        let key = if val { proj } else { proj.complement() };
        Ok(self.bdd_restrict_rec(f, self.level_of[var], val, key))
    }

    fn bdd_restrict_rec(&mut self, f: Edge, lv: usize, val: bool, key: Edge) -> Edge {
        let level = self.edge_level(f);
        // Terminal, or the variable sits above f's support.
        if level > lv {
            return f;
        }
        if level == lv {
            let (t, e) = self.bdd_cofactors(f, lv);
            return if val { t } else { e };
        }
        if let Some(r) = self.cache.lookup(Operation::BddRestrict, f, key, Edge::NONE) {
            return r;
        }
        let (f1, f0) = self.bdd_cofactors(f, level);
        let t = self.bdd_restrict_rec(f1, lv, val, key);
        let e = self.bdd_restrict_rec(f0, lv, val, key);
        let r = self.create_bdd_node(level, t, e);
        self.cache.insert(Operation::BddRestrict, f, key, Edge::NONE, r);
        r
    }

    /// Existential quantification over `vars`, one variable at a time.
    pub fn bdd_exists(&mut self, f: Edge, vars: &[VarId]) -> Result<Edge> {
        for &v in vars {
            self.check_var(v)?;
        }
        let mut r = f;
        for &v in vars {
            let r1 = self.bdd_restrict(r, v, true)?;
            let r0 = self.bdd_restrict(r, v, false)?;
            r = self.bdd_or(r0, r1);
        }
        Ok(r)
    }

    /// Universal quantification over `vars`.
    pub fn bdd_forall(&mut self, f: Edge, vars: &[VarId]) -> Result<Edge> {
        for &v in vars {
            self.check_var(v)?;
        }
        let mut r = f;
        for &v in vars {
            let r1 = self.bdd_restrict(r, v, true)?;
            let r0 = self.bdd_restrict(r, v, false)?;
            r = self.bdd_and(r0, r1);
        }
        Ok(r)
    }

    pub fn bdd_imp(&mut self, f: Edge, g: Edge) -> Edge {
        self.bdd_or(f.complement(), g)
    }

    pub fn bdd_nand(&mut self, f: Edge, g: Edge) -> Edge {
        self.bdd_and(f, g).complement()
    }

    pub fn bdd_nor(&mut self, f: Edge, g: Edge) -> Edge {
        self.bdd_or(f, g).complement()
    }

    pub fn bdd_xnor(&mut self, f: Edge, g: Edge) -> Edge {
        self.bdd_xor(f, g).complement()
    }

    /// Evaluates `f` under the assignment; `assignment[i]` is the value of
    /// variable `i + 1`, and missing entries default to false.
    pub fn bdd_eval(&self, f: Edge, assignment: &[bool]) -> bool {
        let mut cur = f;
        loop {
            if self.is_terminal(cur) {
                return cur == self.one();
            }
            let var = self.node_var(cur);
            let bit = assignment.get(var - 1).copied().unwrap_or(false);
            let (t, e) = self.bdd_cofactors(cur, self.edge_level(cur));
            cur = if bit { t } else { e };
        }
    }
}
