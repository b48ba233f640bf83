use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use anyhow::{bail, Context};
use clap::Parser;
use frontend::ast::ARGS_MAX_NUM;
use interpreter::error_formatter::ErrorFormatter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The program file to run
    file: PathBuf,

    /// Arguments passed to the program as $ARGS
    args: Vec<String>,

    /// Do not print the variable store after the program finishes
    #[arg(long)]
    no_report: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    if cli.args.len() > ARGS_MAX_NUM {
        bail!("at most {} program arguments are accepted, got {}", ARGS_MAX_NUM, cli.args.len());
    }

    let source = frontend::read_source(&cli.file)
        .with_context(|| format!("failed to read source file '{}'", cli.file.display()))?;
    let filename = cli.file.display().to_string();
    let formatter = ErrorFormatter::new(&source, &filename);

    let program = match frontend::parse_source(&source, &cli.args) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{}", formatter.format_parse_error(&e));
            return Ok(ExitCode::FAILURE);
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();

    let env = match interpreter::execute_program(&program, &mut input, &mut output) {
        Ok(env) => env,
        Err(e) => {
            output.flush().context("failed to flush program output")?;
            eprintln!("{}", formatter.format_runtime_error(&e));
            return Ok(ExitCode::FAILURE);
        }
    };

    if !cli.no_report {
        interpreter::report_variables(&env, &mut output).context("failed to write variable report")?;
    }
    output.flush().context("failed to flush program output")?;
    Ok(ExitCode::SUCCESS)
}
