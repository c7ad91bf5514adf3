fn main() {
    if let Err(err) = overlay_position::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
