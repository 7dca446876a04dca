// Generates foreign-language bindings for the exported codec functions:
//   cargo run --bin uniffi-bindgen -- generate --library <path to libescapify> --language kotlin --out-dir out
fn main() {
    uniffi::uniffi_bindgen_main()
}
