//! Generated file layout

use super::SourceUnit;

/// Banner, a `#line` directive mapping back to the input, then the source.
///
/// `POST_ACTOR_COMPILER` stays undefined: the untranslated source still
/// needs the shim macros from `flow/actorcompiler.h`.
pub fn render(unit: &SourceUnit<'_>) -> String {
    let mut out = String::with_capacity(unit.text.len() + 256);
    out.push_str(&format!(
        "// Generated by actorcompiler from {} into {}. Do not edit.\n",
        unit.input_path, unit.output_path
    ));
    out.push_str(&format!("#line 1 \"{}\"\n", escape(&unit.input_path)));
    out.push_str(unit.text);
    if !unit.text.is_empty() && !unit.text.ends_with('\n') {
        out.push('\n');
    }
    out
}

fn escape(path: &str) -> String {
    path.replace('"', "\\\"")
}
