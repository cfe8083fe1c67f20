//! Table-driven proposal field extraction over reconstructed lines.

use std::time::Instant;

use tracing::debug;

use super::lines::PAGE_BREAK;
use super::rules::patterns::{
    BRANCH_MARKER, COLUMN_SPLIT, CPF_MARKER, CPF_STRICT, DIGIT_RUN, DOCUMENT_MARKER, NAME_MARKER,
};
use super::rules::FIELD_TABLE;
use crate::models::proposal::{FieldKey, ProposalData};

/// Result of proposal extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted proposal record, defaulted where unresolved.
    pub proposal: ProposalData,
    /// One warning per defaulted field, plus pipeline-level notices.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl ExtractionResult {
    /// All-defaults record for documents that are not worth matching.
    pub(crate) fn degraded(warning: String) -> Self {
        Self {
            proposal: ProposalData::default(),
            warnings: vec![warning],
            processing_time_ms: 0,
        }
    }
}

/// Proposal field extractor.
///
/// Walks logical lines in reading order and resolves each field through
/// its recognizer table row; the first non-empty capture freezes the
/// field. Two layout-specific composite strategies look one line ahead:
/// the identity row (name + CPF derived from the line after their shared
/// label line) and the banking row (RG, branch and account split out of
/// whitespace-separated columns). Unresolved fields fall back to their
/// sentinel defaults; extraction itself never fails.
pub struct ProposalParser {
    composite_rows: bool,
}

impl ProposalParser {
    /// Create a parser with the composite row strategies enabled.
    pub fn new() -> Self {
        Self {
            composite_rows: true,
        }
    }

    /// Enable or disable the layout-specific composite row strategies.
    pub fn with_composite_rows(mut self, enabled: bool) -> Self {
        self.composite_rows = enabled;
        self
    }

    /// Resolve all fields against reconstructed lines.
    ///
    /// Pure function of its input: no state survives between calls, and
    /// re-running over the same lines yields an identical record.
    pub fn parse(&self, lines: &[String]) -> ExtractionResult {
        let start = Instant::now();
        debug!(
            "matching {} fields against {} lines",
            FieldKey::COUNT,
            lines.len()
        );

        let mut resolved: Vec<Option<String>> = vec![None; FieldKey::COUNT];

        for (idx, line) in lines.iter().enumerate() {
            if line.as_str() == PAGE_BREAK {
                continue;
            }

            if self.composite_rows {
                self.try_identity_row(lines, idx, &mut resolved);
                self.try_banking_row(lines, idx, &mut resolved);
            }

            for spec in FIELD_TABLE.iter() {
                if resolved[spec.key as usize].is_some() {
                    continue;
                }
                for pattern in &spec.patterns {
                    let Some(caps) = pattern.captures(line) else {
                        continue;
                    };
                    let Some(group) = caps.get(1) else {
                        continue;
                    };
                    let value = group.as_str().trim();
                    if value.is_empty() {
                        continue;
                    }
                    resolved[spec.key as usize] = Some(spec.normalize.apply(value));
                    break;
                }
            }
        }

        let mut warnings = Vec::new();
        let mut proposal = ProposalData::default();
        for key in FieldKey::ALL {
            match resolved[key as usize].take() {
                Some(value) => proposal.set(key, value),
                None => warnings.push(format!("could not extract {}", key.name())),
            }
        }

        let processing_time_ms = start.elapsed().as_millis() as u64;
        debug!(
            "resolved {}/{} fields in {}ms",
            FieldKey::COUNT - warnings.len(),
            FieldKey::COUNT,
            processing_time_ms
        );

        ExtractionResult {
            proposal,
            warnings,
            processing_time_ms,
        }
    }

    /// Convenience entry point for newline-separated text (fixtures,
    /// debugging). Production input comes from [`super::reconstruct_lines`].
    pub fn parse_text(&self, text: &str) -> ExtractionResult {
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        self.parse(&lines)
    }

    /// Identity row strategy: a line carrying both the name and CPF labels
    /// makes the next line a values row. The CPF is matched strictly; the
    /// client name is the remainder of the row with the CPF removed. Both
    /// fields resolve together.
    fn try_identity_row(&self, lines: &[String], idx: usize, resolved: &mut [Option<String>]) {
        if resolved[FieldKey::ClientName as usize].is_some()
            || resolved[FieldKey::Cpf as usize].is_some()
        {
            return;
        }

        let line = &lines[idx];
        if !(NAME_MARKER.is_match(line) && CPF_MARKER.is_match(line)) {
            return;
        }

        let Some(values) = next_values_row(lines, idx) else {
            return;
        };
        let Some(cpf) = CPF_STRICT.find(values) else {
            return;
        };

        resolved[FieldKey::Cpf as usize] = Some(cpf.as_str().to_string());

        let name = format!("{}{}", &values[..cpf.start()], &values[cpf.end()..]);
        let name = name.trim();
        if !name.is_empty() {
            resolved[FieldKey::ClientName as usize] = Some(name.to_string());
        }
    }

    /// Banking row strategy: a line carrying both the document and branch
    /// labels makes the next line a three-column values row, split on runs
    /// of two or more whitespace characters. Column order is fixed:
    /// secondary ID first, branch second, account third.
    fn try_banking_row(&self, lines: &[String], idx: usize, resolved: &mut [Option<String>]) {
        let wanted = [FieldKey::Rg, FieldKey::Agencia, FieldKey::Conta];
        if wanted.iter().all(|key| resolved[*key as usize].is_some()) {
            return;
        }

        let line = &lines[idx];
        if !(DOCUMENT_MARKER.is_match(line) && BRANCH_MARKER.is_match(line)) {
            return;
        }

        let Some(values) = next_values_row(lines, idx) else {
            return;
        };
        let columns: Vec<&str> = COLUMN_SPLIT
            .split(values.trim())
            .filter(|c| !c.is_empty())
            .collect();
        if columns.len() < 3 {
            return;
        }

        if resolved[FieldKey::Rg as usize].is_none() {
            if let Some(digits) = DIGIT_RUN.find(columns[0]) {
                resolved[FieldKey::Rg as usize] = Some(digits.as_str().to_string());
            }
        }
        if resolved[FieldKey::Agencia as usize].is_none() {
            resolved[FieldKey::Agencia as usize] = Some(columns[1].trim().to_string());
        }
        if resolved[FieldKey::Conta as usize].is_none() {
            resolved[FieldKey::Conta as usize] = Some(columns[2].trim().to_string());
        }
    }
}

impl Default for ProposalParser {
    fn default() -> Self {
        Self::new()
    }
}

/// The line after `idx`, unless it crosses a page boundary.
fn next_values_row(lines: &[String], idx: usize) -> Option<&str> {
    let next = lines.get(idx + 1)?;
    if next.as_str() == PAGE_BREAK {
        return None;
    }
    Some(next.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(input: &[&str]) -> Vec<String> {
        input.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_empty_lines_yield_default_record() {
        let result = ProposalParser::new().parse(&[]);
        assert_eq!(result.proposal, ProposalData::default());
        assert_eq!(result.warnings.len(), FieldKey::COUNT);
    }

    #[test]
    fn test_identity_row_scenario() {
        let input = lines(&[
            "Nome Carlos Silva CPF",
            "123.456.789-00 CARLOS SILVA",
            "Número da proposta: 55555",
        ]);
        let result = ProposalParser::new().parse(&input);

        assert_eq!(result.proposal.client_name, "CARLOS SILVA");
        assert_eq!(result.proposal.cpf, "123.456.789-00");
        assert_eq!(result.proposal.proposal_number, "55555");

        // Everything else stays at its sentinel.
        let defaults = ProposalData::default();
        for key in FieldKey::ALL {
            if !matches!(
                key,
                FieldKey::ClientName | FieldKey::Cpf | FieldKey::ProposalNumber
            ) {
                assert_eq!(result.proposal.get(key), defaults.get(key));
            }
        }
    }

    #[test]
    fn test_banking_row_scenario() {
        let input = lines(&[
            "Documento de Identidade  Agência  Conta Corrente",
            "RG123456   4321   98.765",
        ]);
        let result = ProposalParser::new().parse(&input);

        assert_eq!(result.proposal.rg, "123456");
        assert_eq!(result.proposal.agencia, "4321");
        assert_eq!(result.proposal.conta, "98.765");
    }

    #[test]
    fn test_no_match_across_page_boundary() {
        let input = lines(&[
            "Documento de Identidade  Agência  Conta Corrente",
            PAGE_BREAK,
            "RG123456   4321   98.765",
        ]);
        let result = ProposalParser::new().parse(&input);

        let defaults = ProposalData::default();
        assert_eq!(result.proposal.rg, defaults.rg);
        assert_eq!(result.proposal.agencia, defaults.agencia);
        assert_eq!(result.proposal.conta, defaults.conta);
    }

    #[test]
    fn test_identity_labels_blocked_by_page_boundary() {
        let input = lines(&["Nome: CPF:", PAGE_BREAK, "123.456.789-00 CARLOS SILVA"]);
        let result = ProposalParser::new().parse(&input);

        // The label-only line resolves nothing, and the values row on the
        // next page is never paired with it. The bare CPF on page two still
        // resolves through its standalone pattern, by design.
        assert_eq!(result.proposal.client_name, "NOME NÃO ENCONTRADO");
        assert_eq!(result.proposal.cpf, "123.456.789-00");
    }

    #[test]
    fn test_composite_rows_disabled_falls_back_to_patterns() {
        let input = lines(&["Nome Carlos Silva CPF", "123.456.789-00 CARLOS SILVA"]);
        let result = ProposalParser::new()
            .with_composite_rows(false)
            .parse(&input);

        assert_eq!(result.proposal.client_name, "Carlos Silva");
        assert_eq!(result.proposal.cpf, "123.456.789-00");
    }

    #[test]
    fn test_parse_is_idempotent() {
        let input = lines(&[
            "Nome: MARIA GICELMA OLIVEIRA DA SILVA",
            "CPF: 005.534.623-50",
            "Valor solicitado: R$ 77.995,11",
        ]);
        let parser = ProposalParser::new();
        let first = parser.parse(&input);
        let second = parser.parse(&input);
        assert_eq!(first.proposal, second.proposal);
        assert_eq!(first.warnings, second.warnings);
    }

    #[test]
    fn test_labeled_document_fixture() {
        let text = "Número da proposta: 181816970\n\
                    Nome: MARIA GICELMA OLIVEIRA DA SILVA\n\
                    CPF: 005.534.623-50\n\
                    RG: 191849520010\n\
                    Agência: 2651\n\
                    Conta: 23.321\n\
                    Valor solicitado: R$ 77.995,11\n\
                    Valor Parcela: R$ 2.267,16\n\
                    Prazo em Meses: 120\n\
                    Data do Débito da Primeira Parcela: 25/07/2025\n\
                    Data do Débito Da Última Parcela: 25/06/2035\n\
                    Nome do convênio: SECRETARIA MUNICIPAL DE EDUCACAO\n\
                    CNPJ: 31.043.226/0001-01";

        let result = ProposalParser::new().parse_text(text);
        let proposal = &result.proposal;

        assert_eq!(proposal.proposal_number, "181816970");
        assert_eq!(proposal.client_name, "MARIA GICELMA OLIVEIRA DA SILVA");
        assert_eq!(proposal.cpf, "005.534.623-50");
        assert_eq!(proposal.rg, "191849520010");
        assert_eq!(proposal.agencia, "2651");
        assert_eq!(proposal.conta, "23.321");
        assert_eq!(proposal.loan_value, "77.995,11");
        assert_eq!(proposal.installment_value, "2.267,16");
        assert_eq!(proposal.installment_count, "120");
        assert_eq!(proposal.first_installment_date, "25/07/2025");
        assert_eq!(proposal.last_installment_date, "25/06/2035");
        assert_eq!(proposal.convention_name, "SECRETARIA MUNICIPAL DE EDUCACAO");
        assert_eq!(proposal.convention_cnpj, "31.043.226/0001-01");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_first_candidate_wins_across_lines() {
        // The labeled CPF on a later line loses to the strict standalone
        // form seen earlier: candidates are tried line by line.
        let input = lines(&["111.222.333-44 em anexo", "CPF: 555.666.777-88"]);
        let result = ProposalParser::new().parse(&input);
        assert_eq!(result.proposal.cpf, "111.222.333-44");
    }

    #[test]
    fn test_warnings_name_defaulted_fields() {
        let input = lines(&["CPF: 005.534.623-50"]);
        let result = ProposalParser::new().parse(&input);
        assert!(!result.warnings.iter().any(|w| w.contains("cpf")));
        assert!(result.warnings.iter().any(|w| w.contains("agencia")));
        assert_eq!(result.warnings.len(), FieldKey::COUNT - 1);
    }
}
