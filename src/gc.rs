/// Mark-and-sweep collection.
///
/// Roots are the nodes with a positive reference count; everything they
/// reach through then/else edges survives. The sweep unlinks dead nodes
/// from their collision chains, returns dead ADD terminals from the value
/// table, and finally reclaims unreachable uninterned terminals (NaN
/// constants live outside the value table). The memoization cache is
/// cleared unconditionally: its entries may name freed nodes.
///
/// Diagrams are acyclic by construction, so marking needs no cycle
/// detection and its depth is bounded by the variable count.
use crate::common::NodeId;
use crate::manager::DdManager;
use crate::nodes::TERMINAL;

impl DdManager {
    pub fn gc(&mut self) {
        // Mark from every externally referenced node.
        for id in 1..self.store.len() {
            if self.store.node(id).ref_count > 0 {
                self.mark_rec(id);
            }
        }

        // Sweep the per-level chains.
        let mut freed = 0;
        for table in self.utable.iter_mut().skip(1) {
            freed += table.sweep(&mut self.store, |store, id| {
                let node = store.node(id);
                node.marked || node.ref_count > 0
            });
        }

        // Sweep interned ADD terminals.
        let mut dead_terminals = Vec::new();
        {
            let store = &self.store;
            self.vtable.retain(|_, id| {
                let node = store.node(*id);
                let keep = node.marked || node.ref_count > 0;
                if !keep {
                    dead_terminals.push(*id);
                }
                keep
            });
        }
        for id in dead_terminals {
            self.store.release_slot(id);
            freed += 1;
        }

        // Uninterned terminals (NaN constants) are in no chain and no
        // table; reclaim whatever of them the mark phase did not reach.
        for id in 2..self.store.len() {
            let node = self.store.node(id);
            if node.var == TERMINAL && !node.marked && node.ref_count == 0 {
                self.store.release_slot(id);
                freed += 1;
            }
        }

        for id in 1..self.store.len() {
            self.store.node_mut(id).marked = false;
        }

        self.num_live -= freed;
        self.num_dead = 0;
        self.cache.clear();
        log::debug!("gc: freed {} nodes, {} live", freed, self.num_live);
    }

    fn mark_rec(&mut self, id: NodeId) {
        if self.store.node(id).marked {
            return;
        }
        self.store.node_mut(id).marked = true;
        let node = self.store.node(id);
        if node.is_terminal() {
            return;
        }
        let t = node.then_edge.index();
        let e = node.else_edge.index();
        self.mark_rec(t);
        self.mark_rec(e);
    }
}
