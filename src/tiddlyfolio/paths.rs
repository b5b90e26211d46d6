use crate::error::{Result, TiddlyError};
use glob::Pattern;
use std::path::{Component, Path, PathBuf};

/// Expands image arguments into existing files, in argument order.
///
/// Each argument is a glob pattern (a plain path is a pattern matching
/// itself); relative patterns are resolved against `cwd`. Matches of one
/// pattern come back sorted. A pattern that matches no regular file is an
/// `InvalidRequest`, so nothing is linked that the browser could not show.
pub fn expand_images(patterns: &[PathBuf], cwd: &Path) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    for pattern in patterns {
        let full = if pattern.is_absolute() {
            pattern.clone()
        } else {
            PathBuf::from(Pattern::escape(&cwd.to_string_lossy())).join(pattern)
        };
        let full = full.to_string_lossy();

        let entries = glob::glob(&full).map_err(|e| {
            TiddlyError::InvalidRequest(format!("bad image pattern {}: {}", pattern.display(), e))
        })?;
        let before = images.len();
        images.extend(entries.filter_map(|entry| entry.ok()).filter(|path| path.is_file()));

        if images.len() == before {
            return Err(TiddlyError::InvalidRequest(format!(
                "no image file matches {}",
                pattern.display()
            )));
        }
    }
    Ok(images)
}

/// Link to `image` as seen from the wiki file `document`.
///
/// Relative inputs are resolved against `cwd`. Both paths are normalized
/// lexically (no filesystem access, symlinks are not followed). The link always
/// uses `/` separators since it ends up in a browser. When the two paths share
/// no root (different drives), the absolute image path is returned.
pub fn image_link(document: &Path, image: &Path, cwd: &Path) -> String {
    let document = normalize(&cwd.join(document));
    let image = normalize(&cwd.join(image));

    let doc_dir: Vec<Component> = match document.parent() {
        Some(parent) => parent.components().collect(),
        None => Vec::new(),
    };
    let image_parts: Vec<Component> = image.components().collect();

    let common = doc_dir
        .iter()
        .zip(image_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    if common == 0 {
        return join_slash(&image_parts);
    }

    let mut parts: Vec<String> = vec!["..".to_string(); doc_dir.len() - common];
    parts.extend(
        image_parts[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );
    parts.join("/")
}

/// Folds `.` and `..` components without touching the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out.iter().collect()
}

fn join_slash(parts: &[Component]) -> String {
    let mut out = String::new();
    for part in parts {
        match part {
            Component::RootDir => out.push('/'),
            other => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
                out.push_str(&other.as_os_str().to_string_lossy().replace('\\', "/"));
            }
        }
    }
    out
}
