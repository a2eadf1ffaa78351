fn main() {
    if let Err(err) = rdr_ranking::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
