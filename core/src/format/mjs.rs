//! ES module rendering

use crate::config::MagidocConfig;
use crate::error::Result;
use handlebars::Handlebars;
use serde_json::json;
use std::fmt::Write;

const MJS_TEMPLATE: &str = "export default {
  introspection: {
    type: {{{kind}}},
    location: {{{location}}},
  },
  website: {
    template: {{{template}}},
    options: {
      queryGenerationFactories: {
{{#each factories}}
        {{{this.name}}}: {{{this.value}}},
{{/each}}
      },
    },
  },
};
";

/// Quote a string as a single-quoted JavaScript literal
pub fn quote_js(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            // Line terminators inside JS string literals
            '\u{2028}' | '\u{2029}' => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Render a descriptor as an ES module
pub fn render_mjs(config: &MagidocConfig) -> Result<String> {
    let factories: Vec<_> = config
        .factories()
        .iter()
        .map(|(name, placeholder)| {
            json!({
                "name": quote_js(name),
                "value": quote_js(placeholder),
            })
        })
        .collect();

    let data = json!({
        "kind": quote_js(config.introspection.kind()),
        "location": quote_js(config.introspection.location()),
        "template": quote_js(&config.website.template),
        "factories": factories,
    });

    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    Ok(handlebars.render_template(MJS_TEMPLATE, &data)?)
}
