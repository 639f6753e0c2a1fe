fn main() {
    if let Err(err) = race_tables::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
