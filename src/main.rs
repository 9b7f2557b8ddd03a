use intcode::ascii::AsciiSession;
use intcode::config::Config;
use intcode::program::{load_program, parse_inputs};
use intcode::Machine;
use log::{debug, error, info};
use std::env;
use std::io;
use std::path::{Path, PathBuf};

/// Parsed command line
struct Options {
    program_path: PathBuf,
    inputs: Vec<i64>,
    ascii: bool,
    config_path: Option<PathBuf>,
    legacy_halt_output: bool,
}

fn print_usage(program: &str) {
    println!("intcode - Intcode virtual machine");
    println!();
    println!(
        "Usage: {} <program_file> [--input a,b,c] [--ascii] [--config file] [--legacy-halt-output]",
        program
    );
    println!("Examples:");
    println!("  {} day09.txt --input 1", program);
    println!("  {} day25.txt --ascii", program);
    println!();
    println!("Without --ascii the program runs once with the given inputs and its");
    println!("outputs are printed one per line. With --ascii, lines typed on stdin");
    println!("are sent as commands and output is shown as text.");
    println!();
    println!("Sample configuration:");
    print!("{}", Config::sample_config());
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        program_path: PathBuf::from(&args[1]),
        inputs: Vec::new(),
        ascii: false,
        config_path: None,
        legacy_halt_output: false,
    };

    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--input" => {
                let value = rest.next().ok_or("--input needs a value")?;
                options.inputs =
                    parse_inputs(value).map_err(|e| format!("Invalid --input: {}", e))?;
            }
            "--config" => {
                let value = rest.next().ok_or("--config needs a file name")?;
                options.config_path = Some(PathBuf::from(value));
            }
            "--ascii" => options.ascii = true,
            "--legacy-halt-output" => options.legacy_halt_output = true,
            other => return Err(format!("Unknown option: {}", other)),
        }
    }

    Ok(options)
}

fn report_missing_program(path: &Path, e: &io::Error) {
    match e.kind() {
        io::ErrorKind::NotFound => {
            eprintln!("Error: Program file not found: {}", path.display());
        }
        io::ErrorKind::PermissionDenied => {
            eprintln!(
                "Error: Permission denied accessing program file: {}",
                path.display()
            );
        }
        _ => {
            eprintln!("Error: Cannot read program file '{}': {}", path.display(), e);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    // No program file: print help and exit successfully
    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage(&args[0]);
        return Ok(());
    }

    let options = parse_args(&args)?;
    let mut config = Config::load(options.config_path.as_deref())?;
    if options.legacy_halt_output {
        config.machine.legacy_halt_output = true;
    }

    debug!("Loading program: {}", options.program_path.display());
    let program = match load_program(&options.program_path) {
        Ok(program) => program,
        Err(intcode::IntcodeError::Io(e)) => {
            report_missing_program(&options.program_path, &e);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };
    info!("Loaded {} program values", program.len());

    let mut machine = Machine::with_config(&program, config.machine);
    debug!("Machine config: {:?}", machine.config());

    if options.ascii {
        if !atty::is(atty::Stream::Stdin) {
            // piped commands: no prompt between them
            config.host.prompt.clear();
        }
        let mut session = AsciiSession::new(machine, config.host);
        let stdin = io::stdin();
        let summary = match session.run(stdin.lock(), io::stdout()) {
            Ok(summary) => summary,
            Err(e) => {
                error!("Session failed: {} ({})", e, session.machine());
                return Err(e.into());
            }
        };
        info!(
            "Session ended: halted={}, commands={}, position={}",
            summary.halted, summary.commands, summary.position
        );
        return Ok(());
    }

    let result = match machine.run(&options.inputs) {
        Ok(result) => result,
        Err(e) => {
            error!("Run failed: {} ({})", e, machine);
            return Err(e.into());
        }
    };
    for value in machine.drain_output() {
        println!("{}", value);
    }
    println!("[{}; {} input(s) consumed]", result.status, result.inputs_consumed);

    Ok(())
}
