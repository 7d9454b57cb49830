use std::path::{Path, PathBuf};

use cas::{error::Error, util, Report};
use color_print::cprintln;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file
    #[clap(default_value = "main.s")]
    input: String,

    /// Output file [default: <input stem>.mif]
    #[clap(short, long)]
    output: Option<String>,

    /// Dump assembled listing
    #[clap(short, long)]
    dump: bool,

    /// Write label table as JSON
    #[clap(short, long)]
    symbols: Option<String>,
}

impl Args {
    fn output(&self) -> PathBuf {
        match &self.output {
            Some(path) => PathBuf::from(path),
            None => match Path::new(&self.input).file_stem() {
                Some(stem) => PathBuf::from(stem).with_extension("mif"),
                None => PathBuf::from("out.mif"),
            },
        }
    }
}

fn main() {
    use clap::Parser;

    let args: Args = Args::parse();
    if let Err(report) = run(&args) {
        report.print_diag(&args.input);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Report> {
    println!("1. Read Source");
    println!("  < {}", args.input);
    let src = std::fs::read_to_string(&args.input)
        .map_err(|err| Error::FileOpen(args.input.clone(), err))?;

    println!("2. Resolve Labels & Encode");
    let asm = cas::assemble(&src)?;
    for warning in &asm.warnings {
        warning.print(&args.input);
    }
    println!(
        "  - {} instructions, {} labels",
        asm.program.len(),
        asm.labels.len()
    );

    if args.dump {
        util::print_dump(&asm);
    }

    // Render first so a failed run never leaves a partial file behind.
    let output = args.output();
    let output_name = output.display().to_string();
    println!("3. Write Memory Image");
    println!("  > {}", output_name);
    let mut image = vec![];
    cas::write_mif(&asm.program, &mut image)
        .map_err(|err| Error::FileWrite(output_name.clone(), err))?;
    std::fs::write(&output, image).map_err(|err| Error::FileCreate(output_name.clone(), err))?;

    if let Some(path) = &args.symbols {
        println!("  > {}", path);
        let json = asm
            .labels
            .symbol_map()
            .to_json()
            .map_err(|err| Error::FileWrite(path.clone(), err.into()))?;
        std::fs::write(path, json).map_err(|err| Error::FileCreate(path.clone(), err))?;
    }

    cprintln!(
        "<green,bold>done</>: {} words, depth {}",
        asm.program.len(),
        asm.program.depth()
    );
    Ok(())
}
