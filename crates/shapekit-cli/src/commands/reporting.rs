//! Shared path and file helpers for command output.

use anyhow::{Context, Result};
use shapekit_bake::BakeReport;
use std::fs;
use std::path::Path;

/// Default output path for a baked scene: a `.baked.json` sibling of the
/// input file.
pub(crate) fn baked_scene_path(scene_path: &str) -> String {
    let path = Path::new(scene_path);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("scene");
    let dir = path.parent().unwrap_or(Path::new("."));
    dir.join(format!("{}.baked.json", stem))
        .to_string_lossy()
        .to_string()
}

/// Default report path: `{object}.bake.report.json` next to the scene file.
pub(crate) fn report_path(scene_path: &str, object: &str) -> String {
    let dir = Path::new(scene_path).parent().unwrap_or(Path::new("."));
    dir.join(BakeReport::filename(object))
        .to_string_lossy()
        .to_string()
}

pub(crate) fn write_report(report: &BakeReport, path: &str) -> Result<()> {
    let json = report
        .to_json_pretty()
        .context("Failed to serialize report")?;
    fs::write(path, json).with_context(|| format!("Failed to write report to: {}", path))?;
    Ok(())
}

pub(crate) fn write_scene(json: &str, path: &str) -> Result<()> {
    fs::write(path, json).with_context(|| format!("Failed to write scene to: {}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapekit_bake::{MeshMetrics, REPORT_VERSION};

    #[test]
    fn test_baked_scene_path_sibling_file() {
        let path = baked_scene_path("scenes/props/crate.json");
        let path = Path::new(&path);
        let expected = Path::new("scenes").join("props").join("crate.baked.json");
        assert_eq!(path, expected);
    }

    #[test]
    fn test_baked_scene_path_bare_file() {
        // A bare filename has an empty parent, so the output lands beside it.
        let path = baked_scene_path("crate.json");
        assert_eq!(Path::new(&path), Path::new("crate.baked.json"));
    }

    #[test]
    fn test_report_path_sibling_file() {
        let path = report_path("scenes/crate.json", "Crate");
        let path = Path::new(&path);
        let expected = Path::new("scenes").join("Crate.bake.report.json");
        assert_eq!(path, expected);
    }

    #[test]
    fn test_write_report_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let report_path = tmp.path().join("report.json");

        let report = BakeReport {
            report_version: REPORT_VERSION,
            ok: true,
            object: "Crate".to_string(),
            modifier: "Mirror".to_string(),
            shape_keys: 2,
            warnings: Vec::new(),
            duration_ms: 3,
            scene_hash: "abc".to_string(),
            metrics: MeshMetrics {
                vertex_count: 8,
                triangle_count: 12,
                bounding_box: None,
            },
        };

        write_report(&report, report_path.to_str().unwrap()).unwrap();

        let json = fs::read_to_string(&report_path).unwrap();
        let parsed = BakeReport::from_json(&json).unwrap();
        assert_eq!(parsed.report_version, report.report_version);
        assert_eq!(parsed.object, "Crate");
        assert_eq!(parsed.shape_keys, 2);
    }
}
