//! Regex patterns for Brazilian loan-proposal extraction.
//!
//! Per-field candidates are tried in declaration order: labeled forms
//! first, then the looser standalone fallbacks.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Client name. Uppercase Portuguese letters; the capture stops at the
    // CPF label when both sit on one line.
    pub static ref CLIENT_NAME_LABELED: Regex = Regex::new(
        r"(?i)nome\s+do\s+cliente[:\s]*([A-ZÁÀÂÃÇÉÊÍÓÔÕÚÜ\s]+?)(?:\bCPF\b|$)"
    ).unwrap();

    pub static ref CLIENT_NAME: Regex = Regex::new(
        r"(?i)\bnome\b[:\s]*([A-ZÁÀÂÃÇÉÊÍÓÔÕÚÜ\s]+?)(?:\bCPF\b|$)"
    ).unwrap();

    // CPF (national tax ID): labeled, then strict standalone.
    pub static ref CPF_LABELED: Regex = Regex::new(
        r"(?i)\bCPF\b[:\s]*(\d{3}\.?\d{3}\.?\d{3}-?\d{2})"
    ).unwrap();

    pub static ref CPF_STANDALONE: Regex = Regex::new(
        r"\b(\d{3}\.\d{3}\.\d{3}-\d{2})\b"
    ).unwrap();

    // RG (secondary identity document).
    pub static ref RG_LABELED: Regex = Regex::new(
        r"(?i)\bRG\b[:\s]*(\d+)"
    ).unwrap();

    pub static ref RG_DOCUMENT: Regex = Regex::new(
        r"(?i)documento\s+de\s+identidade[:\s]*(\d+)"
    ).unwrap();

    // Bank branch.
    pub static ref AGENCIA_LABELED: Regex = Regex::new(
        r"(?i)ag[êe]ncia[:\s]*(\d+)"
    ).unwrap();

    pub static ref AGENCIA_SHORT: Regex = Regex::new(
        r"(?i)\bAg\.?\s*:\s*(\d{3,5})\b"
    ).unwrap();

    // Bank account.
    pub static ref CONTA_LABELED: Regex = Regex::new(
        r"(?i)\bconta\b[:\s]*(\d+\.?\d*)"
    ).unwrap();

    pub static ref CONTA_SHORT: Regex = Regex::new(
        r"(?i)\bC/?C\b\s*:\s*(\d[\d.\-]*)"
    ).unwrap();

    // Loan principal. Currency markers stay in the capture; the normalizer
    // strips them.
    pub static ref LOAN_VALUE: Regex = Regex::new(
        r"(?i)valor\s+solicitado[:\s]*([R$\s]*[\d.,]+)"
    ).unwrap();

    pub static ref LOAN_VALUE_ALT: Regex = Regex::new(
        r"(?i)valor\s+do\s+empr[ée]stimo(?:\s*R\$)?[:\s]*([R$\s]*[\d.,]+)"
    ).unwrap();

    // Installment amount.
    pub static ref INSTALLMENT_VALUE: Regex = Regex::new(
        r"(?i)valor\s+(?:da\s+)?parcela[:\s]*([R$\s]*[\d.,]+)"
    ).unwrap();

    pub static ref INSTALLMENT_VALUE_ALT: Regex = Regex::new(
        r"(?i)valor\s+das\s+presta[çc][õo]es(?:\s*R\$)?[:\s]*([R$\s]*[\d.,]+)"
    ).unwrap();

    // Installment count.
    pub static ref INSTALLMENT_COUNT: Regex = Regex::new(
        r"(?i)prazo\s+em\s+meses[:\s]*(\d+)"
    ).unwrap();

    pub static ref INSTALLMENT_COUNT_ALT: Regex = Regex::new(
        r"(?i)(?:quantidade|n[úu]mero)\s+de\s+(?:parcelas|presta[çc][õo]es)[:\s]*(\d+)"
    ).unwrap();

    // Installment dates (dd/mm/yyyy, kept as display text).
    pub static ref FIRST_DATE: Regex = Regex::new(
        r"(?i)data\s+do\s+d[ée]bito\s+da\s+primeira\s+parcela[:\s]*(\d{2}/\d{2}/\d{4})"
    ).unwrap();

    pub static ref FIRST_DATE_ALT: Regex = Regex::new(
        r"(?i)primeira\s+(?:parcela|presta[çc][ãa]o)[:\s]*(\d{2}/\d{2}/\d{4})"
    ).unwrap();

    pub static ref LAST_DATE: Regex = Regex::new(
        r"(?i)data\s+do\s+d[ée]bito\s+da\s+[úu]ltima\s+parcela[:\s]*(\d{2}/\d{2}/\d{4})"
    ).unwrap();

    pub static ref LAST_DATE_ALT: Regex = Regex::new(
        r"(?i)[úu]ltima\s+(?:parcela|presta[çc][ãa]o)[:\s]*(\d{2}/\d{2}/\d{4})"
    ).unwrap();

    // Proposal number.
    pub static ref PROPOSAL_NUMBER: Regex = Regex::new(
        r"(?i)n[úu]mero\s+da\s+proposta[:\s]*(\d+)"
    ).unwrap();

    pub static ref PROPOSAL_NUMBER_ALT: Regex = Regex::new(
        r"(?i)\bproposta\b\s*(?:n[º°o]?\.?\s*)?[:\s]\s*(\d+)"
    ).unwrap();

    // Convention (employer).
    pub static ref CONVENTION_NAME: Regex = Regex::new(
        r"(?i)nome\s+do\s+conv[êe]nio[:\s]*([A-ZÁÀÂÃÇÉÊÍÓÔÕÚÜ\s\-]+?)(?:\bn[úu]mero\b|\bCNPJ\b|$)"
    ).unwrap();

    pub static ref CONVENTION_NAME_ALT: Regex = Regex::new(
        r"(?i)\bconv[êe]nio\b[:\s]*([A-ZÁÀÂÃÇÉÊÍÓÔÕÚÜ\s\-]+?)(?:\bCNPJ\b|$)"
    ).unwrap();

    pub static ref CNPJ_LABELED: Regex = Regex::new(
        r"(?i)\bCNPJ\b[:\s]*(\d{2}\.?\d{3}\.?\d{3}/?\d{4}-?\d{2})"
    ).unwrap();

    pub static ref CNPJ_STANDALONE: Regex = Regex::new(
        r"\b(\d{2}\.\d{3}\.\d{3}/\d{4}-\d{2})\b"
    ).unwrap();

    // Composite row markers. A line carrying both markers of a pair turns
    // the following line into a values row.
    pub static ref NAME_MARKER: Regex = Regex::new(r"(?i)\bnome\b").unwrap();
    pub static ref CPF_MARKER: Regex = Regex::new(r"(?i)\bCPF\b").unwrap();
    pub static ref DOCUMENT_MARKER: Regex = Regex::new(r"(?i)\bdocumento\b").unwrap();
    pub static ref BRANCH_MARKER: Regex = Regex::new(r"(?i)\bag[êe]ncia\b").unwrap();

    // Strict CPF form used inside the identity values row.
    pub static ref CPF_STRICT: Regex = Regex::new(r"\d{3}\.\d{3}\.\d{3}-\d{2}").unwrap();

    // Column separator of the banking values row: runs of 2+ whitespace.
    pub static ref COLUMN_SPLIT: Regex = Regex::new(r"\s{2,}").unwrap();

    // Digit run, used to peel the label prefix off the RG column.
    pub static ref DIGIT_RUN: Regex = Regex::new(r"\d+").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_name_stops_at_cpf_label() {
        let caps = CLIENT_NAME.captures("Nome Carlos Silva CPF").unwrap();
        assert_eq!(caps[1].trim(), "Carlos Silva");
    }

    #[test]
    fn test_client_name_accented_uppercase() {
        let caps = CLIENT_NAME
            .captures("Nome: JOÃO ANTÔNIO DA CONCEIÇÃO")
            .unwrap();
        assert_eq!(caps[1].trim(), "JOÃO ANTÔNIO DA CONCEIÇÃO");
    }

    #[test]
    fn test_cpf_labeled_accepts_loose_punctuation() {
        let caps = CPF_LABELED.captures("CPF: 005.534.623-50").unwrap();
        assert_eq!(&caps[1], "005.534.623-50");

        let caps = CPF_LABELED.captures("cpf 00553462350").unwrap();
        assert_eq!(&caps[1], "00553462350");
    }

    #[test]
    fn test_cpf_label_does_not_fire_inside_cnpj() {
        assert!(CPF_LABELED.captures("CNPJ: 31.043.226/0001-01").is_none());
    }

    #[test]
    fn test_rg_label_requires_boundary() {
        assert!(RG_LABELED.captures("RG: 191849520010").is_some());
        // No boundary between the label and the digits: that form belongs
        // to the banking values row, not to the labeled pattern.
        assert!(RG_LABELED.captures("RG123456").is_none());
    }

    #[test]
    fn test_monetary_capture_keeps_currency_marker() {
        let caps = LOAN_VALUE.captures("Valor solicitado: R$ 77.995,11").unwrap();
        assert_eq!(caps[1].trim(), "R$ 77.995,11");
    }

    #[test]
    fn test_installment_value_does_not_match_loan_line() {
        assert!(INSTALLMENT_VALUE
            .captures("Valor solicitado: R$ 77.995,11")
            .is_none());
    }

    #[test]
    fn test_dates() {
        let caps = FIRST_DATE
            .captures("Data do Débito da Primeira Parcela: 25/07/2025")
            .unwrap();
        assert_eq!(&caps[1], "25/07/2025");

        let caps = LAST_DATE
            .captures("Data do Débito Da Última Parcela: 25/06/2035")
            .unwrap();
        assert_eq!(&caps[1], "25/06/2035");
    }

    #[test]
    fn test_convention_name_stops_before_cnpj() {
        let caps = CONVENTION_NAME
            .captures("Nome do convênio: SECRETARIA MUNICIPAL DE EDUCACAO CNPJ: 31.043.226/0001-01")
            .unwrap();
        assert_eq!(caps[1].trim(), "SECRETARIA MUNICIPAL DE EDUCACAO");
    }

    #[test]
    fn test_banking_row_column_split() {
        let columns: Vec<&str> = COLUMN_SPLIT.split("RG123456   4321   98.765").collect();
        assert_eq!(columns, vec!["RG123456", "4321", "98.765"]);
    }
}
