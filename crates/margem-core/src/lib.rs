//! Core library for loan-proposal processing.
//!
//! This crate provides:
//! - PDF text-layer processing (positioned fragment extraction)
//! - Reading-order line reconstruction with page-break sentinels
//! - Rule-based proposal field extraction (nome, CPF, RG, agência, conta,
//!   valores, datas, convênio)
//! - Margin-reservation letter templates and plain-text rendering

pub mod error;
pub mod letter;
pub mod models;
pub mod pdf;
pub mod proposal;

pub use error::{MargemError, PdfError, Result};
pub use letter::{format_date_pt, render_letter};
pub use models::config::MargemConfig;
pub use models::letter::{LetterTemplate, LETTER_TEMPLATES};
pub use models::proposal::{FieldKey, ProposalData};
pub use pdf::{FragmentSource, PdfExtractor, TextFragment};
pub use proposal::{
    extract_from_bytes, extract_from_source, reconstruct_lines, ExtractionResult, ProposalParser,
    PAGE_BREAK,
};
