use std::io::{self, BufRead, Write};

use stackdb::{Database, EngineConfig, Output};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = match EngineConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("stackdb: {e}");
            std::process::exit(1);
        }
    };
    let mut db = Database::with_config(config);

    if let Some(path) = std::env::args_os().nth(1) {
        if let Err(e) = db.load(&path) {
            eprintln!("stackdb: {e}");
        }
    }

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        eprint!("stackdb> ");
        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {
                if let Err(e) = run(&mut db, &line) {
                    eprintln!("stackdb: {e}");
                    std::process::exit(1);
                }
            }
            Err(e) => {
                eprintln!("stackdb: {e}");
                break;
            }
        }
    }
    println!();
}

/// Prints a header once, then one tab separated line per row, then the row
/// count. Command errors go to stderr; failing to write stdout is returned.
fn run(db: &mut Database, command: &str) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut header_printed = false;
    let mut write_result = Ok(());

    let count = db.submit(command, |output| match output {
        Output::Row(row) => {
            if write_result.is_err() {
                return;
            }
            if !header_printed {
                write_result = print_line(&mut out, row.columns.iter().map(|c| &**c));
                header_printed = true;
            }
            if write_result.is_ok() {
                write_result = print_line(&mut out, row.values.iter().map(|v| &**v));
            }
        }
        Output::Error(e) => eprintln!("stackdb: {e}"),
    });
    write_result?;
    writeln!(out, "{count}")?;
    out.flush()
}

fn print_line<'a>(out: &mut impl Write, cells: impl Iterator<Item = &'a str>) -> io::Result<()> {
    for cell in cells {
        write!(out, "{cell}\t")?;
    }
    writeln!(out)
}
