//! Single-owner assembly of the netlist from parsed statements.

use std::collections::btree_map::Entry;

use crate::netlist::{Model, Netlist};
use crate::parser::Parsed;

/// Netlist under construction, owned by the aggregation thread.
#[derive(Debug, Default)]
pub struct Aggregate {
    netlist: Netlist,
    /// Line of the comment the current title came from
    title_line: Option<usize>,
}

impl Aggregate {
    /// Create an empty aggregate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one parsed statement from the given line.
    pub fn apply(&mut self, line: usize, parsed: Parsed) {
        match parsed {
            Parsed::Title(title) => self.offer_title(line, title),
            Parsed::Component(comp) => self.netlist.components.push(comp),
            Parsed::Command(cmd) => self.netlist.commands.push(cmd),
            Parsed::Model(model) => self.insert_model(model),
        }
    }

    /// Keep the title from the earliest comment line, whatever the arrival order.
    fn offer_title(&mut self, line: usize, title: String) {
        if self.title_line.map_or(true, |current| line < current) {
            self.title_line = Some(line);
            self.netlist.title = title;
        }
    }

    /// Insert a model; on a name collision the later source line wins.
    fn insert_model(&mut self, model: Model) {
        match self.netlist.models.entry(model.name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(model);
            }
            Entry::Occupied(mut slot) => {
                let previous_line = slot.get().line;
                let replaced = model.line >= previous_line;
                tracing::warn!(
                    model = %model.name,
                    line = model.line,
                    previous_line,
                    replaced,
                    "model redefined"
                );
                if replaced {
                    slot.insert(model);
                }
            }
        }
    }

    /// Finish assembly and hand out the netlist.
    pub fn into_netlist(self) -> Netlist {
        self.netlist
    }
}
