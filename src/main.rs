fn main() {
    if let Err(err) = showroom_board::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
