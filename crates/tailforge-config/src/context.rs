//! Template substitutions for a project.
//!
//! Placeholders provided:
//! - `themeoverride` - the theme override object
//! - `daisyuithemes` - the daisyUI theme list, pretty-printed
//! - `projectpaths` - one content glob line per template directory
//! - `cssfiles` - one `@import` line per stylesheet

use crate::ProjectConfig;
use crate::theme::themes_to_value;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tailforge_core::{Substitutions, to_pretty_literal};

// Continuation indent of the theme list inside `daisyui: { themes: ... }`
const THEMES_INDENT: usize = 10;

/// Build the substitutions for a file rendered into `target_dir`.
///
/// `extra_css` holds stylesheets generated for this run, such as theme files.
pub fn build_context(
    config: &ProjectConfig,
    target_dir: &Path,
    extra_css: &[PathBuf],
) -> Substitutions {
    let mut subs = Substitutions::new();

    subs.insert("themeoverride", Value::Object(config.theme_override.clone()));
    subs.insert_raw(
        "daisyuithemes",
        to_pretty_literal(&themes_to_value(&config.themes), THEMES_INDENT),
    );
    subs.insert_raw("projectpaths", project_paths(&config.template_dirs));

    let css_files: Vec<PathBuf> = config
        .css_files
        .iter()
        .chain(extra_css.iter())
        .cloned()
        .collect();
    subs.insert_raw("cssfiles", css_imports(&css_files, target_dir));

    subs
}

/// Content globs for each template directory, one per line, as
/// single-quoted JS strings.
pub fn project_paths(template_dirs: &[PathBuf]) -> String {
    template_dirs
        .iter()
        .map(|dir| {
            let dir = js_escape(&dir.display().to_string());
            format!("        '{}/**/*.html',", dir)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn js_escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}

/// `@import` lines sorted by file stem, relative to `target_dir` where possible.
pub fn css_imports(css_files: &[PathBuf], target_dir: &Path) -> String {
    let mut files: Vec<&PathBuf> = css_files.iter().collect();
    files.sort_by(|a, b| a.file_stem().cmp(&b.file_stem()));

    files
        .into_iter()
        .map(|path| format!("@import \"{}\";", make_relative(path, target_dir).display()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip `base` from `path` if `path` lies beneath it.
pub fn make_relative(path: &Path, base: &Path) -> PathBuf {
    let absolute = |p: &Path| std::path::absolute(p).unwrap_or_else(|_| p.to_path_buf());

    absolute(path)
        .strip_prefix(absolute(base))
        .map(|relative| relative.to_path_buf())
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Theme;
    use serde_json::json;
    use tailforge_core::render;

    fn config() -> ProjectConfig {
        let mut config = ProjectConfig::with_base_dir("/srv/app");
        config.template_dirs = vec![
            PathBuf::from("/srv/app/templates"),
            PathBuf::from("../templates"),
        ];
        config.themes = vec![Theme::builtin("dark"), Theme::builtin("light")];
        config
    }

    #[test]
    fn test_all_placeholders_present() {
        let subs = build_context(&config(), Path::new("/srv/app/out"), &[]);
        assert_eq!(
            subs.names().collect::<Vec<_>>(),
            vec!["themeoverride", "daisyuithemes", "projectpaths", "cssfiles"]
        );
    }

    #[test]
    fn test_theme_override_value() {
        let mut config = config();
        config
            .theme_override
            .insert("colors".to_string(), json!({"brand": "red"}));

        let subs = build_context(&config, Path::new("/srv/app/out"), &[]);
        let result = render("theme: { ...{{ themeoverride }} }", &subs).unwrap();
        assert_eq!(result.as_str(), r#"theme: { ...{"colors":{"brand":"red"}} }"#);
    }

    #[test]
    fn test_daisyui_themes_indented() {
        let subs = build_context(&config(), Path::new("/srv/app/out"), &[]);
        let result = render("themes: {{ daisyuithemes }},", &subs).unwrap();

        let expected = "themes: [\n            \"dark\",\n            \"light\"\n          ],";
        assert_eq!(result.as_str(), expected);
    }

    #[test]
    fn test_project_paths() {
        let paths = project_paths(&config().template_dirs);
        assert_eq!(
            paths,
            "        '/srv/app/templates/**/*.html',\n        '../templates/**/*.html',"
        );
    }

    #[test]
    fn test_project_paths_escape_quotes() {
        let dirs = vec![PathBuf::from("/home/o'brien/templates"), PathBuf::from(r"C:\app")];
        assert_eq!(
            project_paths(&dirs),
            r"        '/home/o\'brien/templates/**/*.html',
        'C:\\app/**/*.html',"
        );
    }

    #[test]
    fn test_css_imports_sorted_and_relative() {
        let files = vec![
            PathBuf::from("/srv/app/out/themes/zeta.css"),
            PathBuf::from("/elsewhere/alpha.css"),
            PathBuf::from("/srv/app/out/main.css"),
        ];

        let imports = css_imports(&files, Path::new("/srv/app/out"));
        assert_eq!(
            imports,
            "@import \"/elsewhere/alpha.css\";\n@import \"main.css\";\n@import \"themes/zeta.css\";"
        );
    }

    #[test]
    fn test_generated_css_files_included() {
        let subs = build_context(
            &config(),
            Path::new("/srv/app/out"),
            &[PathBuf::from("/srv/app/out/themes/argus.css")],
        );
        assert_eq!(
            subs.get("cssfiles"),
            Some(&json!("@import \"themes/argus.css\";"))
        );
    }

    #[test]
    fn test_no_css_files() {
        let subs = build_context(&config(), Path::new("/srv/app/out"), &[]);
        assert_eq!(subs.get("cssfiles"), Some(&json!("")));
    }
}
