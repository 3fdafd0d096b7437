use std::sync::OnceLock;

use regex::Regex;

/// One substitution pass: a pattern and its replacement template.
struct Pass {
    pattern: &'static str,
    replacement: &'static str,
}

// Order matters: images before links so `![..](..)` is not read as a link,
// bold before italic so `**` pairs are consumed before single `*`.
const PASSES: [Pass; 7] = [
    Pass {
        pattern: r"!\[([^\]]*)\]\(([^)]+)\)",
        replacement: r#"<img src="${2}" alt="${1}">"#,
    },
    Pass {
        pattern: r"\[([^\]]+)\]\(([^)]+)\)",
        replacement: r#"<a href="${2}">${1}</a>"#,
    },
    Pass {
        pattern: r"\*\*(.+?)\*\*",
        replacement: "<strong>${1}</strong>",
    },
    Pass {
        pattern: r"__(.+?)__",
        replacement: "<strong>${1}</strong>",
    },
    Pass {
        pattern: r"\*(.+?)\*",
        replacement: "<em>${1}</em>",
    },
    Pass {
        pattern: r"_(.+?)_",
        replacement: "<em>${1}</em>",
    },
    Pass {
        pattern: r"`([^`]+)`",
        replacement: "<code>${1}</code>",
    },
];

fn compiled_passes() -> &'static [(Regex, &'static str)] {
    static COMPILED: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        PASSES
            .iter()
            .map(|pass| {
                let regex = Regex::new(pass.pattern).expect("Invalid inline pattern");
                (regex, pass.replacement)
            })
            .collect()
    })
}

/// Rewrite inline Markdown spans (images, links, bold, italic, code) of a single line into HTML.
///
/// Each pass runs over the output of the previous one. Text outside the spans is not
/// HTML-escaped, and there is no backslash escaping of delimiters.
pub fn apply_inline_formatting(text: &str) -> String {
    let mut out = text.to_string();
    for (regex, replacement) in compiled_passes() {
        out = regex.replace_all(&out, *replacement).into_owned();
    }
    out
}
