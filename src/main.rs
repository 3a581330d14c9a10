//! Forge's main application entry point.

use forge::{cli::get_args, error::default_error_handler, logger::init_logger};

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.verbose);

    if let Err(err) = forge::run(args) {
        default_error_handler(err);
    }
}
