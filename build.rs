use std::fs;

const REQUIRED_SECTIONS: &[&str] = &["page", "reading", "output"];

fn main() {
    // The embedded default config must parse and carry every section
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={config_path}");

    let content = fs::read_to_string(config_path)
        .unwrap_or_else(|e| panic!("Failed to read {config_path}: {e}"));

    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid {config_path}: {e}"),
    };

    for section in REQUIRED_SECTIONS {
        if !table.get(*section).is_some_and(toml::Value::is_table) {
            panic!("{config_path} is missing the [{section}] table");
        }
    }
}
