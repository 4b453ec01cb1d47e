//! Ad-hoc template rendering.

use anyhow::{Context, Result};
use std::path::Path;
use tailforge_core::{RenderedDocument, Substitutions, Template};

/// Render one template with values from a JSON file and `name=value` pairs.
///
/// Pairs are applied after the file, so they win.
pub fn render_template(
    path: &Path,
    vars: Option<&Path>,
    assignments: &[String],
) -> Result<RenderedDocument> {
    let mut subs = match vars {
        Some(vars) => {
            let content = std::fs::read_to_string(vars)
                .with_context(|| format!("Failed to read values file: {}", vars.display()))?;
            Substitutions::from_json(&content)
                .with_context(|| format!("Failed to parse values file: {}", vars.display()))?
        }
        None => Substitutions::new(),
    };

    for assignment in assignments {
        subs.insert_assignment(assignment)?;
    }

    let template = Template::from_file(path)
        .with_context(|| format!("Failed to parse template: {}", path.display()))?;
    let doc = template
        .render(&subs)
        .with_context(|| format!("Failed to render template: {}", path.display()))?;
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_with_assignments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tailwind.config.js");
        std::fs::write(&path, "daisyui: { themes: {{daisyuithemes}} }").unwrap();

        let doc = render_template(&path, None, &[r#"daisyuithemes=["dark","light"]"#.to_string()])
            .unwrap();
        assert_eq!(doc.as_str(), r#"daisyui: { themes: ["dark","light"] }"#);
    }

    #[test]
    fn test_assignments_override_values_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.js");
        let vars = dir.path().join("vars.json");
        std::fs::write(&path, "{{ a }} {{ b }}").unwrap();
        std::fs::write(&vars, serde_json::json!({"a": 1, "b": 2}).to_string()).unwrap();

        let doc = render_template(&path, Some(vars.as_path()), &["b=3".to_string()]).unwrap();
        assert_eq!(doc.as_str(), "1 3");
    }

    #[test]
    fn test_missing_value_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.js");
        std::fs::write(&path, "theme: { ...{{themeoverride}} }").unwrap();

        let err = render_template(&path, None, &[]).unwrap_err();
        assert!(format!("{:#}", err).contains("unresolved placeholder 'themeoverride'"));
    }

    #[test]
    fn test_bad_assignment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.js");
        std::fs::write(&path, "").unwrap();

        assert!(render_template(&path, None, &["novalue".to_string()]).is_err());
    }
}
