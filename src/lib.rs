mod block;
mod config;
mod convert;
mod inline;
mod parser;
mod template;

pub use block::{ListKind, ScanState};
pub use config::{CONFIG_FILE_NAME, Config, ConfigError, OutputConfig, PageConfig, ReadingConfig};
pub use convert::{ConvertError, Summary, convert_all, convert_file, find_markdown_files};
pub use inline::apply_inline_formatting;
pub use template::render_page;

/// Scan markdown into HTML body fragments, in output order.
pub fn scan_fragments(markdown: &str) -> Vec<String> {
    parser::parse(markdown)
}

/// Convert markdown to an HTML body (no surrounding page).
pub fn convert_md_to_html(markdown: &str) -> String {
    scan_fragments(markdown).join("\n")
}

/// Convert markdown to a complete, standalone HTML page.
pub fn markdown_to_html_page(title: &str, markdown: &str, config: &Config) -> String {
    let body = convert_md_to_html(markdown);
    render_page(title, &body, config)
}
