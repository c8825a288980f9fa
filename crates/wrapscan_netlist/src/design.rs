//! The design: all module definitions plus the instantiation graph.

use crate::ids::ModuleId;
use crate::module::Module;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// A complete netlist design as delivered by the parsing collaborator.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Design {
    /// All module definitions, in source order.
    pub modules: Vec<Module>,
}

impl Design {
    /// Creates an empty design.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a design from a list of module definitions.
    pub fn from_modules(modules: Vec<Module>) -> Self {
        Self { modules }
    }

    /// Looks up a module definition by name.
    pub fn module_by_name(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// Looks up a module definition by ID.
    pub fn module(&self, id: ModuleId) -> Option<&Module> {
        self.modules.get(id.as_raw() as usize)
    }

    /// The ID of the module with the given name, if defined.
    pub fn module_id(&self, name: &str) -> Option<ModuleId> {
        self.modules
            .iter()
            .position(|m| m.name == name)
            .map(|i| ModuleId::from_raw(i as u32))
    }

    /// The set of cell-type names instantiated anywhere in the design.
    ///
    /// Includes library cell types that have no module definition.
    pub fn instantiated_types(&self) -> BTreeSet<&str> {
        self.modules
            .iter()
            .flat_map(|m| m.instances.iter())
            .map(|i| i.cell_type.as_str())
            .collect()
    }

    /// Builds the module instantiation graph.
    ///
    /// One node per defined module; an edge from `A` to `B` whenever `A`
    /// instantiates `B`. Instantiated types with no definition (library
    /// cells) contribute no nodes or edges.
    pub fn instantiation_graph(&self) -> DiGraph<ModuleId, ()> {
        let mut graph = DiGraph::new();
        let mut nodes: HashMap<&str, NodeIndex> = HashMap::new();
        for (i, module) in self.modules.iter().enumerate() {
            let node = graph.add_node(ModuleId::from_raw(i as u32));
            nodes.insert(module.name.as_str(), node);
        }
        for module in &self.modules {
            let from = nodes[module.name.as_str()];
            for inst in &module.instances {
                if let Some(&to) = nodes.get(inst.cell_type.as_str()) {
                    graph.add_edge(from, to, ());
                }
            }
        }
        graph
    }

    /// Module names that are defined but never instantiated, in sorted
    /// order. These are the top-module candidates.
    pub fn uninstantiated_modules(&self) -> Vec<&str> {
        let graph = self.instantiation_graph();
        let mut candidates: Vec<&str> = graph
            .node_indices()
            .filter(|&n| {
                graph
                    .neighbors_directed(n, petgraph::Direction::Incoming)
                    .next()
                    .is_none()
            })
            .filter_map(|n| self.module(graph[n]).map(|m| m.name.as_str()))
            .collect();
        candidates.sort_unstable();
        candidates
    }
}
