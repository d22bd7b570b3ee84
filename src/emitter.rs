//! Output package emission: writing rendered files to disk.
//!
//! The emitter is the pipeline's only external resource. Each output
//! path is a write-once target; the core never touches the file system.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::render::RenderedFile;

/// Writes the rendered design package into `out_dir`, creating the
/// directory if needed.
pub fn write_package(out_dir: &Path, files: &[RenderedFile]) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    for file in files {
        let path = out_dir.join(&file.file_name);
        fs::write(&path, &file.content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{OutputKind, RenderedFile};
    use tempfile::TempDir;

    #[test]
    fn test_write_package_creates_files() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("demo");
        let files = vec![
            RenderedFile {
                kind: OutputKind::Schematic,
                file_name: "demo.sch".to_string(),
                content: "schematic\n".to_string(),
            },
            RenderedFile {
                kind: OutputKind::Board,
                file_name: "demo.kicad_pcb".to_string(),
                content: "board\n".to_string(),
            },
        ];

        write_package(&out, &files).unwrap();

        assert_eq!(fs::read_to_string(out.join("demo.sch")).unwrap(), "schematic\n");
        assert_eq!(
            fs::read_to_string(out.join("demo.kicad_pcb")).unwrap(),
            "board\n"
        );
    }
}
