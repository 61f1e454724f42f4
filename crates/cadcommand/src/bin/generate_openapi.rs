//! Prints the OpenAPI document, or writes it to the path given as the first argument.
//!
//! Usage: `cargo run --bin generate_openapi [out.json]`

use cadcommand::server::openapi::ApiDoc;
use utoipa::OpenApi;

fn main() {
    let spec = ApiDoc::openapi()
        .to_pretty_json()
        .expect("failed to serialize OpenAPI spec");

    match std::env::args_os().nth(1) {
        Some(out_path) => {
            let out_path = std::path::PathBuf::from(out_path);
            if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).expect("failed to create output directory");
            }
            std::fs::write(&out_path, &spec).expect("failed to write OpenAPI spec");
            eprintln!("Wrote OpenAPI spec to {}", out_path.display());
        }
        None => println!("{spec}"),
    }
}
