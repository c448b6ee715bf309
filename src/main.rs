#[cfg(feature = "cli")]
mod cli;

fn main() {
    #[cfg(feature = "cli")]
    if let Err(err) = cli::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }

    #[cfg(not(feature = "cli"))]
    eprintln!("This binary was built without the `cli` feature; nothing to run.");
}
