//! jobsheet main entrypoint.

use jobsheet::run;
use jobsheet::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
