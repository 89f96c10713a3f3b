use anyhow::{Context, bail};
use clap::{Parser, Subcommand}; // clap crate for CLI argument parsing
use codegen::Codegen;
use interpreter::Interpreter;
use parser::parse_program;
use std::{fs, path::{Path, PathBuf}, process::{Command, ExitCode}};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Log pipeline details (slots, labels, commands) to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Mode,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Interpret the program, printing every `put` to stdout
    Sim {
        /// Path to the stem source file
        input: PathBuf,
    },
    /// Compile the program to a native x86-64 Linux executable
    Com {
        /// Path to the stem source file
        input: PathBuf,

        /// Base name of the .asm, .o and executable outputs
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit assembly but do not assemble or link
        #[arg(short = 'S', long)]
        emit_asm: bool,
    },
}

impl Mode {
    fn input(&self) -> &Path {
        match self {
            Mode::Sim { input } | Mode::Com { input, .. } => input.as_path(),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let source_name = args.command.input().display().to_string();
    match run(&args.command, &source_name) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<model::Error>() {
                Some(e) if e.has_position() => eprintln!("{}", e),
                _ => eprintln!("{}: ERROR: {:#}", source_name, err),
            }
            ExitCode::FAILURE
        }
    }
}

// RUST_LOG wins over -v; the default keeps stderr to real problems.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(mode: &Mode, source_name: &str) -> anyhow::Result<()> {
    let input = mode.input();
    let text = fs::read_to_string(input)
        .with_context(|| format!("cannot read `{}`", input.display()))?;
    let program = parse_program(&text, source_name)?;
    debug!(nodes = program.nodes.len(), "parsed");

    match mode {
        Mode::Sim { .. } => {
            let stdout = std::io::stdout();
            Interpreter::new(stdout.lock()).run(&program)?;
        }
        Mode::Com { input, output, emit_asm } => {
            let base = match output {
                Some(path) => path.clone(),
                None => default_base(input)?,
            };
            let asm = Codegen::new().gen_program(&program)?;

            let asm_path = base.with_extension("asm");
            fs::write(&asm_path, asm)
                .with_context(|| format!("cannot write `{}`", asm_path.display()))?;
            info!(path = %asm_path.display(), "wrote assembly");

            if *emit_asm {
                return Ok(());
            }

            let obj_path = base.with_extension("o");
            run_command(
                "nasm",
                &[Path::new("-felf64"), asm_path.as_path(), Path::new("-o"), obj_path.as_path()],
            )?;
            run_command("ld", &[Path::new("-o"), base.as_path(), obj_path.as_path()])?;
        }
    }
    Ok(())
}

fn default_base(input: &Path) -> anyhow::Result<PathBuf> {
    match input.file_stem() {
        Some(stem) => Ok(PathBuf::from(stem)),
        None => bail!("cannot derive an output name from `{}`", input.display()),
    }
}

/// Echo the command line, then run it and fail on a non-zero status.
fn run_command(program: &str, args: &[&Path]) -> anyhow::Result<()> {
    let line = std::iter::once(program.to_string())
        .chain(args.iter().map(|a| a.display().to_string()))
        .collect::<Vec<_>>()
        .join(" ");
    println!("{}", line);
    info!(command = %line, "running");

    let status = Command::new(program)
        .args(args)
        .status()
        .with_context(|| format!("failed to execute `{}`", program))?;

    if !status.success() {
        match status.code() {
            Some(code) => bail!("`{}` failed with exit code {}", program, code),
            None => bail!("`{}` was terminated by a signal", program),
        }
    }
    Ok(())
}
