fn main() {
    if let Err(e) = nestjar_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
