//! Positioned text extraction from the PDF text layer using lopdf.

use std::collections::BTreeMap;

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, trace};

use super::{FragmentSource, Result, TextFragment};
use crate::error::PdfError;

/// 2-D affine transform in PDF `[a b c d e f]` layout.
type Matrix = [f32; 6];

const IDENTITY: Matrix = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// Approximate line height multiplier used for `T*` and `'` when no
/// leading has been tracked.
const LINE_ADVANCE: f32 = 1.2;

fn multiply(m1: &Matrix, m2: &Matrix) -> Matrix {
    [
        m1[0] * m2[0] + m1[1] * m2[2],
        m1[0] * m2[1] + m1[1] * m2[3],
        m1[2] * m2[0] + m1[3] * m2[2],
        m1[2] * m2[1] + m1[3] * m2[3],
        m1[4] * m2[0] + m1[5] * m2[2] + m2[4],
        m1[4] * m2[1] + m1[5] * m2[3] + m2[5],
    ]
}

fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

fn matrix_operands(operands: &[Object]) -> Option<Matrix> {
    if operands.len() < 6 {
        return None;
    }
    let mut m = IDENTITY;
    for (i, operand) in operands.iter().take(6).enumerate() {
        m[i] = get_number(operand)?;
    }
    Some(m)
}

/// Positioned text source backed by lopdf.
///
/// `load` is the explicit initialization step: it parses the document,
/// transparently decrypts empty-password encryption, and rejects documents
/// without pages.
pub struct PdfExtractor {
    document: Option<Document>,
}

impl PdfExtractor {
    pub fn new() -> Self {
        Self { document: None }
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("no document loaded".to_string()))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FragmentSource for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // PDFs carrying empty-password encryption are still readable.
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("decrypted PDF with empty password");
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn page_fragments(&self, page: u32) -> Result<Vec<TextFragment>> {
        let doc = self.document()?;
        let pages = doc.get_pages();
        let page_id = *pages.get(&page).ok_or(PdfError::InvalidPage(page))?;

        let fragments = PageWalker::new(doc, page_id)?.run();
        trace!("page {}: {} text fragments", page, fragments.len());
        Ok(fragments)
    }
}

/// Content-stream interpreter tracking just enough graphics and text state
/// to place each shown string at its device-space baseline.
struct PageWalker<'a> {
    doc: &'a Document,
    fonts: BTreeMap<Vec<u8>, &'a Dictionary>,
    operations: Vec<Operation>,
    ctm: Matrix,
    ctm_stack: Vec<Matrix>,
    text_matrix: Matrix,
    line_matrix: Matrix,
    font_name: String,
    font_size: f32,
    in_text: bool,
    fragments: Vec<TextFragment>,
}

impl<'a> PageWalker<'a> {
    fn new(doc: &'a Document, page_id: ObjectId) -> Result<Self> {
        let fonts = doc.get_page_fonts(page_id).unwrap_or_default();
        let content_data = doc
            .get_page_content(page_id)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        let content =
            Content::decode(&content_data).map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        Ok(Self {
            doc,
            fonts,
            operations: content.operations,
            ctm: IDENTITY,
            ctm_stack: Vec::new(),
            text_matrix: IDENTITY,
            line_matrix: IDENTITY,
            font_name: String::new(),
            font_size: 12.0,
            in_text: false,
            fragments: Vec::new(),
        })
    }

    fn run(mut self) -> Vec<TextFragment> {
        let operations = std::mem::take(&mut self.operations);
        for op in &operations {
            self.apply(op);
        }
        self.fragments
    }

    fn apply(&mut self, op: &Operation) {
        match op.operator.as_str() {
            "q" => self.ctm_stack.push(self.ctm),
            "Q" => {
                if let Some(saved) = self.ctm_stack.pop() {
                    self.ctm = saved;
                }
            }
            "cm" => {
                if let Some(m) = matrix_operands(&op.operands) {
                    self.ctm = multiply(&m, &self.ctm);
                }
            }
            "BT" => {
                self.in_text = true;
                self.text_matrix = IDENTITY;
                self.line_matrix = IDENTITY;
            }
            "ET" => self.in_text = false,
            "Tf" => {
                if op.operands.len() >= 2 {
                    if let Ok(name) = op.operands[0].as_name() {
                        self.font_name = String::from_utf8_lossy(name).to_string();
                    }
                    if let Some(size) = get_number(&op.operands[1]) {
                        self.font_size = size;
                    }
                }
            }
            "Td" | "TD" => {
                if op.operands.len() >= 2 {
                    let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                    let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                    self.line_matrix[4] += tx;
                    self.line_matrix[5] += ty;
                    self.text_matrix = self.line_matrix;
                }
            }
            "Tm" => {
                if let Some(m) = matrix_operands(&op.operands) {
                    self.text_matrix = m;
                    self.line_matrix = m;
                }
            }
            "T*" => self.next_line(),
            "Tj" => {
                if let Some(operand) = op.operands.first() {
                    if let Some(text) = self.decode_text(operand) {
                        self.push_run(text);
                    }
                }
            }
            "TJ" => {
                if let Some(Ok(array)) = op.operands.first().map(|o| o.as_array()) {
                    let mut combined = String::new();
                    for item in array {
                        if let Some(text) = self.decode_text(item) {
                            combined.push_str(&text);
                        }
                    }
                    self.push_run(combined);
                }
            }
            "'" => {
                self.next_line();
                if let Some(operand) = op.operands.first() {
                    if let Some(text) = self.decode_text(operand) {
                        self.push_run(text);
                    }
                }
            }
            _ => {}
        }
    }

    fn next_line(&mut self) {
        self.line_matrix[5] -= self.font_size * LINE_ADVANCE;
        self.text_matrix = self.line_matrix;
    }

    fn push_run(&mut self, text: String) {
        if !self.in_text || text.trim().is_empty() {
            return;
        }
        let device = multiply(&self.text_matrix, &self.ctm);
        self.fragments
            .push(TextFragment::new(text, device[4], device[5]));
    }

    /// Decode a string operand through the current font's encoding, falling
    /// back to UTF-16BE (BOM-marked) and then Latin-1.
    fn decode_text(&self, obj: &Object) -> Option<String> {
        let Object::String(bytes, _) = obj else {
            return None;
        };

        if let Some(font) = self.fonts.get(self.font_name.as_bytes()) {
            if let Ok(encoding) = font.get_font_encoding(self.doc) {
                if let Ok(text) = Document::decode_text(&encoding, bytes) {
                    return Some(text);
                }
            }
        }

        if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
            let utf16: Vec<u16> = bytes[2..]
                .chunks_exact(2)
                .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
                .collect();
            return Some(String::from_utf16_lossy(&utf16));
        }

        Some(bytes.iter().map(|&b| b as char).collect())
    }
}
