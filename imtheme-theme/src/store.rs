//! Reading and writing theme files.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::{ThemeError, ThemeResult};
use crate::theme::Theme;

/// Load a template or theme from a JSON file.
///
/// Unreadable files, invalid JSON and an absent or empty `imgui` payload are
/// all reported as [ThemeError::Template] carrying the path.
pub fn load_theme<P: AsRef<Path>>(path: P) -> ThemeResult<Theme> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|err| ThemeError::template_file(path, err.to_string()))?;
    let theme = Theme::from_json_template(&content).map_err(|err| err.with_path(path))?;
    log::debug!("Loaded template {:?} with {} slots", path, theme.imgui.len());
    Ok(theme)
}

/// Render a theme as JSON indented by four spaces.
pub fn to_pretty_json(theme: &Theme) -> ThemeResult<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    theme.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|err| ThemeError::Serialization(err.to_string()))
}

/// Persist a theme to `path`.
///
/// The file is written next to its destination first and then renamed into
/// place, so a failed write never leaves a truncated theme behind. Missing
/// parent directories are created.
pub fn save_theme<P: AsRef<Path>>(path: P, theme: &Theme) -> ThemeResult<()> {
    let path = path.as_ref();
    let json = to_pretty_json(theme)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp = staging_path(path);
    let written = fs::File::create(&tmp).and_then(|mut file| {
        file.write_all(json.as_bytes())?;
        file.write_all(b"\n")?;
        file.sync_all()
    });
    if let Err(err) = written.and_then(|_| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(err.into());
    }

    log::info!("Saved theme {:?} to {:?}", theme.metadata.name, path);
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
