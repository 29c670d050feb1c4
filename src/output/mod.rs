mod report;
mod response;

pub use report::TextReport;

use iconswap::{Error, Result};
use serde::Serialize;

pub(crate) use report::result_lines;

fn write_stdout(payload: &str) -> Result<()> {
    use std::io::{self, Write};

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", payload) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            return Ok(()); // Exit gracefully on SIGPIPE
        }
        return Err(Error::internal_io(
            e.to_string(),
            Some("write stdout".to_string()),
        ));
    }
    Ok(())
}

/// Print a command result in the requested format and return the exit code.
pub(crate) fn emit<T: Serialize + TextReport>(result: Result<(T, i32)>, json: bool) -> i32 {
    if json {
        let (json_result, exit_code) = response::map_cmd_result_to_json(result);
        return match response::print_json_result(json_result) {
            Ok(()) => exit_code,
            Err(_) => 1,
        };
    }

    match result {
        Ok((data, exit_code)) => match write_stdout(&data.render_text()) {
            Ok(()) => exit_code,
            Err(_) => 1,
        },
        Err(err) => {
            eprintln!("{}", report::render_error(&err));
            response::exit_code_for_error(err.code)
        }
    }
}
