//! Test fixtures shared by the exporter and bundle tests.

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use folio_diagrams::{DiagramBackend, RenderError, RenderJob};

/// Backend returning a fixed SVG, or failing every job.
#[derive(Clone, Default)]
pub(crate) struct FakeBackend {
    calls: Rc<Cell<usize>>,
    fail: bool,
}

impl FakeBackend {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl DiagramBackend for FakeBackend {
    fn render(&self, _job: &RenderJob) -> Result<String, RenderError> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(RenderError::Failed {
                exit_code: 1,
                stderr: "Parse error on line 1".to_owned(),
            });
        }
        Ok(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 50"><g/></svg>"#.to_owned())
    }
}

/// Write `<root>/<slug>/index.md` and return its path.
pub(crate) fn write_post(root: &Path, slug: &str, text: &str) -> PathBuf {
    let dir = root.join(slug);
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("index.md");
    fs::write(&path, text).unwrap();
    path
}
