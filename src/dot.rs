/// DOT-format export for visualization tooling.
///
/// One line per node, two edges per internal node: then edges solid, else
/// edges dashed, with "dotted" appended when the edge handle is
/// complemented. Terminals are boxes labeled with their value.
use std::io::BufWriter;

use crate::common::{HashSet, NodeId};
use crate::manager::DdManager;
use crate::nodes::Edge;

pub trait Dot {
    type Handle;

    fn dot<T>(&self, io: &mut T, f: Self::Handle)
    where
        T: std::io::Write;

    fn dot_string(&self, f: Self::Handle) -> String;
}

impl Dot for DdManager {
    type Handle = Edge;

    fn dot<T>(&self, io: &mut T, f: Edge)
    where
        T: std::io::Write,
    {
        let mut visited: HashSet<NodeId> = HashSet::default();
        io.write_all(b"digraph DD {\n").unwrap();
        self.dot_impl(io, f.index(), &mut visited);
        io.write_all(b"}\n").unwrap();
    }

    fn dot_string(&self, f: Edge) -> String {
        let mut buf = vec![];
        {
            let mut io = BufWriter::new(&mut buf);
            self.dot(&mut io, f);
        }
        std::str::from_utf8(&buf).unwrap().to_string()
    }
}

impl DdManager {
    fn dot_impl<T>(&self, io: &mut T, id: NodeId, visited: &mut HashSet<NodeId>)
    where
        T: std::io::Write,
    {
        if !visited.insert(id) {
            return;
        }
        let node = self.store.node(id);
        if node.is_terminal() {
            let s = format!("node{} [label=\"{}\" shape=box];\n", id, node.value);
            io.write_all(s.as_bytes()).unwrap();
            return;
        }
        let s = format!("node{} [label=\"x{}\"];\n", id, node.var);
        io.write_all(s.as_bytes()).unwrap();
        let (t, e) = (node.then_edge, node.else_edge);
        self.dot_impl(io, t.index(), visited);
        self.dot_impl(io, e.index(), visited);
        let style = if t.is_complemented() {
            "solid,dotted"
        } else {
            "solid"
        };
        let s = format!("node{} -> node{} [style=\"{}\"];\n", id, t.index(), style);
        io.write_all(s.as_bytes()).unwrap();
        let style = if e.is_complemented() {
            "dashed,dotted"
        } else {
            "dashed"
        };
        let s = format!("node{} -> node{} [style=\"{}\"];\n", id, e.index(), style);
        io.write_all(s.as_bytes()).unwrap();
    }
}
