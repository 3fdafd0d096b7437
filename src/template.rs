use crate::config::{Config, ReadingConfig};

/// Wrap an HTML body in a complete page with the stylesheet and reading-settings widget.
///
/// `title` and `body` are inserted as-is. Nothing here depends on the body content.
pub fn render_page(title: &str, body: &str, config: &Config) -> String {
    let mut out = String::with_capacity(STYLE.len() + SCRIPT.len() + body.len() + 4096);

    out.push_str("<!DOCTYPE html>\n");
    out.push_str(&format!("<html lang=\"{}\">\n", config.page.lang));
    out.push_str("<head>\n");
    out.push_str("    <meta charset=\"UTF-8\">\n");
    out.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0, maximum-scale=5.0, user-scalable=yes\">\n",
    );
    out.push_str(&format!("    <title>{title}</title>\n"));
    out.push_str("    <style>\n");
    out.push_str(STYLE);
    out.push_str("    </style>\n");
    out.push_str("</head>\n");
    out.push_str("<body>\n");
    out.push_str(body);
    out.push_str("\n\n");
    out.push_str(FLOAT_BUTTON);
    out.push('\n');
    emit_settings_panel(&config.reading, &mut out);
    out.push('\n');
    emit_script(&config.reading, &mut out);
    out.push_str("</body>\n");
    out.push_str("</html>");

    out
}

fn emit_settings_panel(reading: &ReadingConfig, out: &mut String) {
    out.push_str("<div class=\"settings-panel\" id=\"settingsPanel\">\n");
    out.push_str("    <h3>阅读设置</h3>\n\n");

    emit_slider(
        out,
        Slider {
            id: "fontSize",
            label: "字体大小",
            display: format!("{}px", reading.font_size),
            min: "12",
            max: "24",
            value: reading.font_size.to_string(),
            step: "1",
        },
    );
    emit_slider(
        out,
        Slider {
            id: "lineHeight",
            label: "行间距",
            display: reading.line_height.to_string(),
            min: "1.0",
            max: "3.0",
            value: reading.line_height.to_string(),
            step: "0.1",
        },
    );
    emit_slider(
        out,
        Slider {
            id: "letterSpacing",
            label: "字间距",
            display: format!("{}px", reading.letter_spacing),
            min: "-1",
            max: "10",
            value: reading.letter_spacing.to_string(),
            step: "0.5",
        },
    );

    out.push_str("    <button class=\"reset-btn\" onclick=\"resetSettings()\">重置默认</button>\n");
    out.push_str("</div>\n");
}

struct Slider {
    id: &'static str,
    label: &'static str,
    display: String,
    min: &'static str,
    max: &'static str,
    value: String,
    step: &'static str,
}

fn emit_slider(out: &mut String, slider: Slider) {
    let Slider {
        id,
        label,
        display,
        min,
        max,
        value,
        step,
    } = slider;

    out.push_str("    <div class=\"setting-item\">\n");
    out.push_str("        <label>\n");
    out.push_str(&format!("            {label}\n"));
    out.push_str(&format!(
        "            <span class=\"setting-value\" id=\"{id}Value\">{display}</span>\n"
    ));
    out.push_str("        </label>\n");
    out.push_str(&format!(
        "        <input type=\"range\" id=\"{id}\" min=\"{min}\" max=\"{max}\" value=\"{value}\" step=\"{step}\">\n"
    ));
    out.push_str("    </div>\n\n");
}

fn emit_script(reading: &ReadingConfig, out: &mut String) {
    out.push_str("<script>\n");
    out.push_str(&format!(
        "    const DEFAULTS = {{ fontSize: '{}', lineHeight: '{}', letterSpacing: '{}' }};\n\n",
        reading.font_size, reading.line_height, reading.letter_spacing
    ));
    out.push_str(SCRIPT);
    out.push_str("</script>\n");
}

const FLOAT_BUTTON: &str = r#"<div class="float-btn" onclick="toggleSettings()">
    <svg viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg">
        <path d="M12 15.5A3.5 3.5 0 0 1 8.5 12 3.5 3.5 0 0 1 12 8.5a3.5 3.5 0 0 1 3.5 3.5 3.5 3.5 0 0 1-3.5 3.5m7.43-2.53c.04-.32.07-.64.07-.97 0-.33-.03-.66-.07-1l2.11-1.63c.19-.15.24-.42.12-.64l-2-3.46c-.12-.22-.39-.31-.61-.22l-2.49 1c-.52-.39-1.06-.73-1.69-.98l-.37-2.65A.506.506 0 0 0 14 2h-4c-.25 0-.46.18-.5.42l-.37 2.65c-.63.25-1.17.59-1.69.98l-2.49-1c-.22-.09-.49 0-.61.22l-2 3.46c-.13.22-.07.49.12.64L4.57 11c-.04.34-.07.67-.07 1 0 .33.03.65.07.97l-2.11 1.66c-.19.15-.25.42-.12.64l2 3.46c.12.22.39.3.61.22l2.49-1.01c.52.4 1.06.74 1.69.99l.37 2.65c.04.24.25.42.5.42h4c.25 0 .46-.18.5-.42l.37-2.65c.63-.26 1.17-.59 1.69-.99l2.49 1.01c.22.08.49 0 .61-.22l2-3.46c.12-.22.07-.49-.12-.64l-2.11-1.66z"/>
    </svg>
</div>
"#;

const STYLE: &str = r#"        /* Page layout */
        html {
            overflow-x: hidden;
            width: 100%;
        }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, sans-serif;
            line-height: 1.6;
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
            color: #333;
            background-color: #faf9f5;
            transition: all 0.3s ease;
            box-sizing: border-box;
            overflow-x: hidden;
            width: 100%;
            word-wrap: break-word;
            overflow-wrap: break-word;
        }
        * {
            box-sizing: border-box;
            max-width: 100%;
        }
        /* Narrow screens */
        @media (max-width: 768px) {
            body {
                padding: 15px;
                max-width: 100vw;
            }
        }
        /* Markdown content */
        h1, h2, h3, h4, h5, h6 {
            margin-top: 24px;
            margin-bottom: 16px;
            font-weight: 600;
            line-height: 1.25;
        }
        h1 { font-size: 2em; border-bottom: 1px solid #eaecef; padding-bottom: 0.3em; }
        h2 { font-size: 1.5em; border-bottom: 1px solid #eaecef; padding-bottom: 0.3em; }
        h3 { font-size: 1.25em; }
        code {
            background-color: #f6f8fa;
            padding: 0.2em 0.4em;
            border-radius: 3px;
            font-family: 'Courier New', Courier, monospace;
            font-size: 85%;
        }
        pre {
            background-color: #f6f8fa;
            padding: 16px;
            overflow: auto;
            border-radius: 6px;
            max-width: 100%;
            overflow-x: auto;
        }
        pre code {
            background-color: transparent;
            padding: 0;
        }
        a {
            color: #0366d6;
            text-decoration: none;
        }
        a:hover {
            text-decoration: underline;
        }
        img {
            max-width: 100%;
            height: auto;
            display: block;
        }
        ul, ol {
            padding-left: 2em;
        }
        li {
            margin-bottom: 0.25em;
        }
        p {
            margin-bottom: 16px;
            word-wrap: break-word;
            overflow-wrap: break-word;
        }

        /* Floating settings button */
        .float-btn {
            position: fixed;
            bottom: 30px;
            right: 30px;
            width: 60px;
            height: 60px;
            background-color: #0366d6;
            border-radius: 50%;
            box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);
            cursor: pointer;
            display: flex;
            align-items: center;
            justify-content: center;
            z-index: 1000;
            transition: all 0.3s ease;
        }
        .float-btn:hover {
            background-color: #0256c7;
            transform: scale(1.1);
        }
        .float-btn svg {
            width: 28px;
            height: 28px;
            fill: white;
        }

        /* Settings panel */
        .settings-panel {
            position: fixed;
            bottom: 100px;
            right: 30px;
            width: 320px;
            background: rgba(255, 255, 255, 0.4);
            backdrop-filter: blur(5px);
            -webkit-backdrop-filter: blur(5px);
            border-radius: 12px;
            box-shadow: 0 8px 32px rgba(0, 0, 0, 0.12);
            border: 1px solid rgba(200, 200, 200, 0.5);
            padding: 24px;
            z-index: 999;
            display: none;
        }
        .settings-panel.active {
            display: block;
            animation: slideIn 0.3s ease;
        }
        @keyframes slideIn {
            from {
                opacity: 0;
                transform: translateY(20px);
            }
            to {
                opacity: 1;
                transform: translateY(0);
            }
        }
        .settings-panel h3 {
            margin: 0 0 20px 0;
            font-size: 18px;
            color: #333;
        }
        /* Sliders */
        .setting-item {
            margin-bottom: 20px;
        }
        .setting-item label {
            display: block;
            margin-bottom: 8px;
            font-size: 14px;
            color: #666;
            font-weight: 500;
        }
        .setting-item input[type="range"] {
            width: 100%;
            height: 6px;
            border-radius: 3px;
            background: #e1e4e8;
            outline: none;
            -webkit-appearance: none;
        }
        .setting-item input[type="range"]::-webkit-slider-thumb {
            -webkit-appearance: none;
            appearance: none;
            width: 18px;
            height: 18px;
            border-radius: 50%;
            background: #0366d6;
            cursor: pointer;
        }
        .setting-item input[type="range"]::-moz-range-thumb {
            width: 18px;
            height: 18px;
            border-radius: 50%;
            background: #0366d6;
            cursor: pointer;
            border: none;
        }
        .setting-value {
            display: inline-block;
            margin-left: 8px;
            font-size: 14px;
            color: #0366d6;
            font-weight: 600;
            min-width: 50px;
        }
        .reset-btn {
            width: 100%;
            padding: 10px;
            margin-top: 10px;
            background-color: #f6f8fa;
            border: 1px solid #e1e4e8;
            border-radius: 6px;
            color: #333;
            font-size: 14px;
            cursor: pointer;
            transition: all 0.2s;
        }
        .reset-btn:hover {
            background-color: #e1e4e8;
        }
"#;

// Expects `DEFAULTS` to be declared before it.
const SCRIPT: &str = r#"    // Load saved settings from localStorage, falling back to the page defaults
    function loadSettings() {
        const fontSize = localStorage.getItem('fontSize') || DEFAULTS.fontSize;
        const lineHeight = localStorage.getItem('lineHeight') || DEFAULTS.lineHeight;
        const letterSpacing = localStorage.getItem('letterSpacing') || DEFAULTS.letterSpacing;

        document.getElementById('fontSize').value = fontSize;
        document.getElementById('lineHeight').value = lineHeight;
        document.getElementById('letterSpacing').value = letterSpacing;

        applySettings(fontSize, lineHeight, letterSpacing);
    }

    // Apply settings to the body and refresh the value labels
    function applySettings(fontSize, lineHeight, letterSpacing) {
        document.body.style.fontSize = fontSize + 'px';
        document.body.style.lineHeight = lineHeight;

        // Undo any previous per-character wrapping
        document.querySelectorAll('.cn-char').forEach(el => {
            const parent = el.parentNode;
            parent.replaceChild(document.createTextNode(el.textContent), el);
            parent.normalize();
        });

        if (letterSpacing != 0) {
            wrapCjkCharacters(letterSpacing);
        }

        document.getElementById('fontSizeValue').textContent = fontSize + 'px';
        document.getElementById('lineHeightValue').textContent = lineHeight;
        document.getElementById('letterSpacingValue').textContent = letterSpacing + 'px';
    }

    // CSS letter-spacing needs each CJK character in its own element
    function wrapCjkCharacters(spacing) {
        // Replace the previous spacing rule
        const oldStyle = document.getElementById('dynamic-letter-spacing');
        if (oldStyle) {
            oldStyle.remove();
        }

        const style = document.createElement('style');
        style.id = 'dynamic-letter-spacing';
        style.textContent = `.cn-char { letter-spacing: ${spacing}px; }`;
        document.head.appendChild(style);

        const walker = document.createTreeWalker(
            document.body,
            NodeFilter.SHOW_TEXT,
            {
                acceptNode: function(node) {
                    // Skip script, style and code text
                    const parent = node.parentElement;
                    if (!parent || parent.classList.contains('cn-char') ||
                        ['SCRIPT', 'STYLE', 'CODE', 'PRE'].includes(parent.tagName)) {
                        return NodeFilter.FILTER_REJECT;
                    }
                    // Only text nodes containing CJK characters
                    if (/[一-龥]/.test(node.textContent)) {
                        return NodeFilter.FILTER_ACCEPT;
                    }
                    return NodeFilter.FILTER_REJECT;
                }
            }
        );

        const nodesToProcess = [];
        let node;
        while (node = walker.nextNode()) {
            nodesToProcess.push(node);
        }

        nodesToProcess.forEach(textNode => {
            const fragment = document.createDocumentFragment();
            const text = textNode.textContent;
            let lastIndex = 0;

            const regex = /[一-龥]/g;
            let match;

            while ((match = regex.exec(text)) !== null) {
                if (match.index > lastIndex) {
                    fragment.appendChild(document.createTextNode(text.substring(lastIndex, match.index)));
                }

                const span = document.createElement('span');
                span.className = 'cn-char';
                span.textContent = match[0];
                fragment.appendChild(span);

                lastIndex = match.index + 1;
            }

            if (lastIndex < text.length) {
                fragment.appendChild(document.createTextNode(text.substring(lastIndex)));
            }

            // Swap the original text node for the wrapped fragment
            textNode.parentNode.replaceChild(fragment, textNode);
        });
    }

    // Show or hide the settings panel
    function toggleSettings() {
        const panel = document.getElementById('settingsPanel');
        panel.classList.toggle('active');
    }

    // Forget saved settings and restore the defaults
    function resetSettings() {
        localStorage.removeItem('fontSize');
        localStorage.removeItem('lineHeight');
        localStorage.removeItem('letterSpacing');
        loadSettings();
    }

    // Persist slider changes as they happen
    document.getElementById('fontSize').addEventListener('input', function(e) {
        const value = e.target.value;
        localStorage.setItem('fontSize', value);
        applySettings(value, document.getElementById('lineHeight').value, document.getElementById('letterSpacing').value);
    });

    document.getElementById('lineHeight').addEventListener('input', function(e) {
        const value = e.target.value;
        localStorage.setItem('lineHeight', value);
        applySettings(document.getElementById('fontSize').value, value, document.getElementById('letterSpacing').value);
    });

    document.getElementById('letterSpacing').addEventListener('input', function(e) {
        const value = e.target.value;
        localStorage.setItem('letterSpacing', value);
        applySettings(document.getElementById('fontSize').value, document.getElementById('lineHeight').value, value);
    });

    // Close the panel on clicks outside of it
    document.addEventListener('click', function(e) {
        const panel = document.getElementById('settingsPanel');
        const btn = document.querySelector('.float-btn');
        if (!panel.contains(e.target) && !btn.contains(e.target)) {
            panel.classList.remove('active');
        }
    });

    // Apply settings on page load
    loadSettings();
"#;
