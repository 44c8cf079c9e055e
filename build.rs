use std::env;
use std::fs;
use std::path::Path;

// Compile-time configuration keys read through `option_env!` in src/config.rs.
const CONFIG_KEYS: &[&str] = &[
    "BACKEND_URL_DEVELOPMENT",
    "BACKEND_URL_PRODUCTION",
    "ENVIRONMENT",
    "ENABLE_LOGGING",
    "RESULTS_PAGE_SIZE",
    "TOAST_DURATION_MS",
    "PERSIST_FILTERS",
];

fn main() {
    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env");

    let env_file = Path::new(".env");
    let contents = match fs::read_to_string(env_file) {
        Ok(contents) => contents,
        Err(_) => {
            println!("cargo:warning=No .env file found, course tracker config falls back to defaults.");
            return;
        }
    };

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim().trim_matches('"');

        // Real environment wins over .env
        if !CONFIG_KEYS.contains(&key) || env::var(key).is_ok() {
            continue;
        }
        println!("cargo:rustc-env={}={}", key, value);
    }
}
