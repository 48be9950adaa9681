//! Server-side rendering of the card page.

use valentine_engine::card::{CardState, HINT};
use valentine_engine::geometry::ButtonScales;

const TEMPLATE: &str = include_str!("../assets/card.html");

/// Render the card for `state`, addressed to `name` when one is configured.
pub fn render(state: &CardState, name: Option<&str>) -> String {
    let name = name.map(str::trim).filter(|n| !n.is_empty());
    let accepted = CardState {
        accepted: true,
        ..*state
    };

    TEMPLATE
        .replace("{{HEADING}}", &escape_html(&state.heading(name)))
        .replace(
            "{{ACCEPTED_HEADING}}",
            &escape_html(&accepted.heading(name)),
        )
        .replace("{{HINT}}", &escape_html(HINT))
        .replace("{{ACCEPTED_CLASS}}", if state.accepted { "accepted" } else { "open" })
        .replace("{{CONFIG_JSON}}", &script_json(state, name))
}

/// Initial page state for the inline script.
fn script_json(state: &CardState, name: Option<&str>) -> String {
    let value = serde_json::json!({
        "myValentine": name,
        "accepted": state.accepted,
        "noCount": state.no_count,
        "scales": ButtonScales::default(),
    });
    // `<` cannot appear raw inside a <script> element.
    value.to_string().replace('<', "\\u003c")
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
