use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let stdout = io::stdout();
    let mut writer = io::BufWriter::new(stdout.lock());

    let result = dupfind::run(&argv, &mut writer);
    if let Err(e) = writer.flush() {
        eprintln!("dupfind: failed to flush output: {e}");
        return ExitCode::FAILURE;
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
