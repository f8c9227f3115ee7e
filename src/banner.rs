// src/banner.rs

/// Prints the application startup banner to the console.
pub fn print_banner() {
    let banner = r#"
                      _      _                  _
  _ __ ___   ___   __| | ___| |    _____   ____ _| |
 | '_ ` _ \ / _ \ / _` |/ _ \ |   / _ \ \ / / _` | |
 | | | | | | (_) | (_| |  __/ |  |  __/\ V / (_| | |
 |_| |_| |_|\___/ \__,_|\___|_|   \___| \_/ \__,_|_|

    AI Model Evaluation & Monitoring API
"#;
    println!("{}", banner);
    println!("    v{}\n", env!("CARGO_PKG_VERSION"));
}
