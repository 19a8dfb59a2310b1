//! Binary entry point for `stv`.

fn main() {
    if let Err(err) = stevedore::cli::run() {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}
