use color_print::cprintln;

use crate::line::SourceLine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Error(String),
    Warn(String),
    Note(String),
}

impl Msg {
    pub fn print(&self, file: &str, line: Option<&SourceLine>) {
        match self {
            Msg::Error(msg) => cprintln!("<red,bold>error</>: {}", msg),
            Msg::Warn(msg) => cprintln!("<yellow,bold>warn</>: {}", msg),
            Msg::Note(msg) => cprintln!("<green,bold>note</>: {}", msg),
        }
        match line {
            Some(line) => {
                cprintln!("     <blue>--></> <underline>{}:{}</>", file, line.num);
                cprintln!("      <blue>|</>");
                cprintln!(" <blue>{:>4} |</> {}", line.num, line.text);
                cprintln!("      <blue>|</>");
            }
            None => cprintln!("     <blue>--></> <underline>{}</>", file),
        }
    }
}

/// Non-fatal finding attached to a source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub line: SourceLine,
    pub message: String,
}

impl Warning {
    pub fn print(&self, file: &str) {
        Msg::Warn(self.message.clone()).print(file, Some(&self.line));
    }
}
