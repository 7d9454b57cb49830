use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Report},
    line::{Line, SourceLine},
};

// ----------------------------------------------------------------------------
// Label Table

/// Label → PC bindings of one assembly run, in definition order.
#[derive(Debug, Default)]
pub struct Labels {
    labels: IndexMap<String, (SourceLine, usize)>,
}

impl Labels {
    pub fn new() -> Self {
        Labels {
            labels: IndexMap::new(),
        }
    }

    /// Binds `name` to `pc`. On a duplicate, returns the line of the first definition.
    pub fn insert(&mut self, name: &str, line: &SourceLine, pc: usize) -> Result<(), &SourceLine> {
        if self.labels.contains_key(name) {
            return Err(&self.labels[name].0);
        }
        self.labels.insert(name.to_string(), (line.clone(), pc));
        Ok(())
    }

    pub fn get_pc(&self, name: &str) -> Option<usize> {
        self.labels.get(name).map(|(_, pc)| *pc)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.labels.iter().map(|(name, (_, pc))| (name.as_str(), *pc))
    }

    pub fn symbol_map(&self) -> SymbolMap {
        SymbolMap {
            code: self.iter().map(|(name, pc)| (name.to_string(), pc)).collect(),
        }
    }
}

/// Exported label table, written next to the memory image on request.
#[derive(Debug, Serialize, Deserialize)]
pub struct SymbolMap {
    pub code: IndexMap<String, usize>,
}

impl SymbolMap {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ----------------------------------------------------------------------------
// Pass 1

/// Instruction text with comment and label stripped, placed at `pc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stmt {
    pub code: String,
    pub line: SourceLine,
    pub pc: usize,
}

/// Assigns a PC to every instruction-bearing line and binds labels to the PC
/// of the next instruction. Stops at the first bad line.
pub fn collect(lines: &[SourceLine]) -> Result<(Labels, Vec<Stmt>), Report> {
    let mut labels = Labels::new();
    let mut stmts = vec![];
    let mut pc: usize = 0;

    for line in lines {
        let parsed = Line::classify(&line.text).map_err(|err| Report::at(line, err))?;

        if let Some(label) = parsed.label {
            if let Err(prev) = labels.insert(label, line, pc) {
                return Err(
                    Report::at(line, Error::DuplicateLabel(label.to_string())).with_previous(prev)
                );
            }
        }

        if parsed.has_code() {
            stmts.push(Stmt {
                code: parsed.code.to_string(),
                line: line.clone(),
                pc,
            });
            pc += 1;
        }
    }

    Ok((labels, stmts))
}
