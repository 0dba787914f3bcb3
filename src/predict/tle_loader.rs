use std::fs;
use std::path::{Path, PathBuf};

use sgp4::Elements;

use crate::catalog::{Catalog, TrackedObject};
use crate::predict::error::PredictError;
use crate::predict::propagation::Sgp4Elements;

pub struct TleLoader {
    tle_path: PathBuf,
}

impl TleLoader {
    pub fn new(tle_path: PathBuf) -> Self {
        Self { tle_path }
    }

    /// Load a single TLE file, or every `.tle`/`.txt` file of a directory.
    pub fn load(&self) -> Result<Catalog<Sgp4Elements>, PredictError> {
        if !self.tle_path.exists() {
            return Err(PredictError::DirectoryNotFound(
                self.tle_path.display().to_string(),
            ));
        }

        let mut catalog = Catalog::new();

        if self.tle_path.is_file() {
            self.load_file(&self.tle_path, &mut catalog)?;
            return Ok(catalog);
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.tle_path)? {
            let path = entry?.path();
            if path.is_file() && is_tle_file(&path) {
                files.push(path);
            }
        }
        // directory order is not stable across platforms
        files.sort();

        for path in files {
            if let Err(e) = self.load_file(&path, &mut catalog) {
                log::warn!("Failed to parse TLE file {}: {}", path.display(), e);
            }
        }

        Ok(catalog)
    }

    fn load_file(
        &self,
        path: &Path,
        catalog: &mut Catalog<Sgp4Elements>,
    ) -> Result<(), PredictError> {
        let content = fs::read_to_string(path)?;
        let filename = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        for object in parse_tle_content(&content, &filename)? {
            let name = object.name.clone();
            if let Err(e) = catalog.insert(object) {
                log::warn!("Skipping {} from {}: {}", name, filename, e);
            }
        }
        Ok(())
    }
}

fn is_tle_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == "tle" || ext == "txt")
        .unwrap_or(false)
}

/// Parse every element set of a file into tracked objects.
pub fn parse_tle_content(
    content: &str,
    filename: &str,
) -> Result<Vec<TrackedObject<Sgp4Elements>>, PredictError> {
    let invalid = |message: String| PredictError::InvalidTle {
        file: filename.to_string(),
        message,
    };

    parse_multi_tle(content)
        .into_iter()
        .map(|(name, line1, line2)| {
            let elements = Elements::from_tle(name.clone(), line1.as_bytes(), line2.as_bytes())
                .map_err(|e| invalid(e.to_string()))?;
            let sat_name = name.unwrap_or_else(|| format!("NORAD {}", elements.norad_id));
            let sat = Sgp4Elements::from_elements(elements).map_err(|e| invalid(e.to_string()))?;
            Ok(TrackedObject::new(sat_name, sat))
        })
        .collect()
}

/// Parse multi-satellite TLE content
fn parse_multi_tle(content: &str) -> Vec<(Option<String>, String, String)> {
    let lines: Vec<&str> = content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let mut result = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if lines[i].starts_with("1 ") && i + 1 < lines.len() && lines[i + 1].starts_with("2 ") {
            // 2-line TLE (no name)
            result.push((None, lines[i].to_string(), lines[i + 1].to_string()));
            i += 2;
        } else if i + 2 < lines.len()
            && lines[i + 1].starts_with("1 ")
            && lines[i + 2].starts_with("2 ")
        {
            // 3-line TLE, Celestrak prefixes names with "0 "
            let name = lines[i].strip_prefix("0 ").unwrap_or(lines[i]).trim();
            result.push((
                Some(name.to_string()),
                lines[i + 1].to_string(),
                lines[i + 2].to_string(),
            ));
            i += 3;
        } else {
            i += 1; // Skip unknown line
        }
    }

    result
}
