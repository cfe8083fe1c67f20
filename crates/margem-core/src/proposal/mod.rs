//! Proposal field extraction module.

pub mod lines;
mod parser;
pub mod rules;

pub use lines::{reconstruct_lines, PAGE_BREAK};
pub use parser::{ExtractionResult, ProposalParser};

use tracing::{info, warn};

use crate::error::Result;
use crate::models::config::MargemConfig;
use crate::pdf::{FragmentSource, PdfExtractor};

/// Run the whole pipeline against an in-memory PDF document.
///
/// Unreadable documents propagate as errors; thin documents and
/// unresolved fields degrade to sentinel defaults instead.
pub fn extract_from_bytes(data: &[u8], config: &MargemConfig) -> Result<ExtractionResult> {
    let mut source = PdfExtractor::new();
    source.load(data)?;
    extract_from_source(&source, config)
}

/// Run the pipeline against any loaded fragment source.
///
/// Pages are retrieved sequentially in document order so line ordering
/// and page-break sentinels stay deterministic.
pub fn extract_from_source<S: FragmentSource>(
    source: &S,
    config: &MargemConfig,
) -> Result<ExtractionResult> {
    let page_count = source.page_count();
    let limit = match config.pdf.max_pages {
        0 => page_count,
        max => page_count.min(max as u32),
    };

    let mut pages = Vec::with_capacity(limit as usize);
    for page in 1..=limit {
        pages.push(source.page_fragments(page)?);
    }

    let lines = reconstruct_lines(&pages);
    info!("reconstructed {} lines from {} pages", lines.len(), limit);

    let text_len: usize = lines
        .iter()
        .filter(|l| l.as_str() != PAGE_BREAK)
        .map(|l| l.chars().count())
        .sum();
    if text_len < config.extraction.min_text_length {
        warn!(
            "document yielded {} characters, below the {} minimum; returning default record",
            text_len, config.extraction.min_text_length
        );
        return Ok(ExtractionResult::degraded(format!(
            "document text too short ({} characters), all fields defaulted",
            text_len
        )));
    }

    Ok(ProposalParser::new()
        .with_composite_rows(config.extraction.composite_rows)
        .parse(&lines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PdfError;
    use crate::models::proposal::ProposalData;
    use crate::pdf::TextFragment;

    /// In-memory fragment source standing in for a rendered document.
    struct StaticSource {
        pages: Vec<Vec<TextFragment>>,
    }

    impl FragmentSource for StaticSource {
        fn load(&mut self, _data: &[u8]) -> crate::pdf::Result<()> {
            Ok(())
        }

        fn page_count(&self) -> u32 {
            self.pages.len() as u32
        }

        fn page_fragments(&self, page: u32) -> crate::pdf::Result<Vec<TextFragment>> {
            self.pages
                .get(page as usize - 1)
                .cloned()
                .ok_or(PdfError::InvalidPage(page))
        }
    }

    #[test]
    fn test_pipeline_over_fragment_source() {
        let source = StaticSource {
            pages: vec![vec![
                TextFragment::new("CPF:", 40.0, 700.0),
                TextFragment::new("005.534.623-50", 80.0, 700.0),
                TextFragment::new("Agência:", 40.0, 680.0),
                TextFragment::new("2651", 110.0, 680.0),
                TextFragment::new("Número da proposta: 181816970", 40.0, 660.0),
            ]],
        };

        let result = extract_from_source(&source, &MargemConfig::default()).unwrap();
        assert_eq!(result.proposal.cpf, "005.534.623-50");
        assert_eq!(result.proposal.agencia, "2651");
        assert_eq!(result.proposal.proposal_number, "181816970");
    }

    #[test]
    fn test_thin_document_degrades_to_defaults() {
        let source = StaticSource {
            pages: vec![vec![TextFragment::new("ok", 40.0, 700.0)]],
        };

        let result = extract_from_source(&source, &MargemConfig::default()).unwrap();
        assert_eq!(result.proposal, ProposalData::default());
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("too short"));
    }

    #[test]
    fn test_max_pages_limits_processing() {
        let source = StaticSource {
            pages: vec![
                vec![TextFragment::new(
                    "Número da proposta: 111111111 em duas vias",
                    40.0,
                    700.0,
                )],
                vec![TextFragment::new(
                    "Número da proposta: 222222222 em duas vias",
                    40.0,
                    700.0,
                )],
            ],
        };

        let mut config = MargemConfig::default();
        config.pdf.max_pages = 1;
        config.extraction.min_text_length = 10;

        let result = extract_from_source(&source, &config).unwrap();
        assert_eq!(result.proposal.proposal_number, "111111111");
    }
}
