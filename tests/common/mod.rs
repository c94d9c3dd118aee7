pub mod fixtures;
pub mod pdf_assertions;

use folio::{CompileError, CompileRequest, TypstEngine, World};
use lopdf::Document as LopdfDocument;
use std::sync::OnceLock;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Save PDF to a file for manual debugging
    #[allow(dead_code)]
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One world shared by every test in a binary, like a long-lived host would.
pub fn shared_world() -> &'static World<TypstEngine> {
    static WORLD: OnceLock<World<TypstEngine>> = OnceLock::new();
    WORLD.get_or_init(|| {
        init_logger();
        World::new(TypstEngine::new())
    })
}

/// Compile a source with no directories configured
pub fn compile_source(source: &str) -> Result<GeneratedPdf, CompileError> {
    compile_request(&CompileRequest::new(source.as_bytes()))
}

/// Compile a full request against the shared world
pub fn compile_request(request: &CompileRequest<'_>) -> Result<GeneratedPdf, CompileError> {
    let bytes = shared_world().compile(request)?;
    Ok(GeneratedPdf::from_bytes(bytes).expect("engine output must be a readable PDF"))
}
