//! Companion converter source for babele-register.js
//!
//! Babele applies nested translations through named converter functions
//! registered by the translation module. For every configured field with a
//! converter this emits a function that copies translated sub-fields back
//! onto the live document data.

use crate::domain::value_objects::FieldConfig;

/// Filename of the converter source for a configuration key
pub fn converter_filename(config_key: &str) -> String {
    format!("converter-{config_key}.txt")
}

/// Render the `registerConverters` block, or `None` when nothing declares a converter
pub fn generate_converter_source(config_key: &str, configs: &[FieldConfig]) -> Option<String> {
    let functions: Vec<String> = configs
        .iter()
        .filter(|config| config.has_converter())
        .map(render_function)
        .collect();

    if functions.is_empty() {
        return None;
    }

    let mut source = String::new();
    source.push_str("// ============================================\n");
    source.push_str(&format!("// CONVERTERS FOR: {config_key}\n"));
    source.push_str("// Add to babele-register.js\n");
    source.push_str("// ============================================\n\n");
    source.push_str("Babele.get().registerConverters({\n");
    source.push_str(&functions.join(",\n\n"));
    source.push_str("\n});\n");

    Some(source)
}

fn render_function(config: &FieldConfig) -> String {
    let name = js_string(&config.converter);
    let var = js_identifier(&config.field);
    let mut body = String::new();

    if config.is_direct_object {
        body.push_str(&format!("    {name}: ({var}, translation) => {{\n"));
        body.push_str(&format!("        if (!{var} || !translation) return {var};\n"));
        for sub_field in &config.sub_fields {
            let key = js_string(sub_field);
            body.push_str(&format!("        if (translation[{key}]) {var}[{key}] = translation[{key}];\n"));
        }
        body.push_str(&format!("        return {var};\n"));
        body.push_str("    }");
    } else {
        let id_key = js_string(config.id_key_or_default());
        body.push_str(&format!("    {name}: ({var}, translations) => {{\n"));
        body.push_str(&format!("        if (!{var} || !translations) return {var};\n"));
        body.push('\n');
        body.push_str(&format!("        return {var}.map(entry => {{\n"));
        body.push_str(&format!("            const translation = translations[entry[{id_key}]];\n"));
        body.push_str("            if (translation) {\n");
        for sub_field in &config.sub_fields {
            let key = js_string(sub_field);
            body.push_str(&format!(
                "                if (translation[{key}]) entry[{key}] = translation[{key}];\n"
            ));
        }
        body.push_str("            }\n");
        body.push_str("            return entry;\n");
        body.push_str("        });\n");
        body.push_str("    }");
    }

    body
}

/// Quoted JavaScript string literal
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// The field name when usable as a parameter name, `value` otherwise
fn js_identifier(field: &str) -> &str {
    let mut chars = field.chars();
    let valid = chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if valid {
        field
    } else {
        "value"
    }
}
