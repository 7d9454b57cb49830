use arch::inst::Inst;

use crate::{
    error::Report,
    label::{self, Labels, Stmt},
    line::collect_lines,
    mif::Program,
    msg::Warning,
    parser::Code,
};

/// One encoded statement, kept for the dump listing.
#[derive(Debug, Clone)]
pub struct Listed {
    pub stmt: Stmt,
    pub inst: Inst,
    pub bin: u16,
}

#[derive(Debug)]
pub struct Assembly {
    pub program: Program,
    pub labels: Labels,
    pub listing: Vec<Listed>,
    pub warnings: Vec<Warning>,
}

/// Assembles a whole source text. Every call starts from an empty label table.
pub fn assemble(src: &str) -> Result<Assembly, Report> {
    let lines = collect_lines(src);

    // Pass 1
    let (labels, stmts) = label::collect(&lines)?;

    // Pass 2
    let mut listing = Vec::with_capacity(stmts.len());
    let mut warnings = vec![];
    for stmt in stmts {
        let code = Code::parse(&stmt.code).map_err(|err| Report::at(&stmt.line, err))?;
        if let Some(message) = code.truncation() {
            warnings.push(Warning {
                line: stmt.line.clone(),
                message,
            });
        }
        let inst = code
            .resolve(&labels, stmt.pc)
            .map_err(|err| Report::at(&stmt.line, err))?;
        listing.push(Listed {
            bin: inst.to_bin(),
            inst,
            stmt,
        });
    }

    let program = Program::new(listing.iter().map(|l| l.bin).collect())?;

    Ok(Assembly {
        program,
        labels,
        listing,
        warnings,
    })
}
