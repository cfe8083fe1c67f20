//! Signatory templates for the margin-reservation letter.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// Signatory data for one convention, selected by exact CNPJ match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterTemplate {
    /// Short identifier (stable, CLI-facing).
    pub id: String,

    /// Convention legal name as printed in the letter.
    pub name: String,

    /// Convention CNPJ, punctuated display form.
    pub cnpj: String,

    /// Signatory full name.
    pub signatory: String,

    /// Signatory role line.
    pub signatory_role: String,

    /// Signatory CPF.
    pub signatory_cpf: String,
}

lazy_static! {
    /// Built-in convention templates.
    pub static ref LETTER_TEMPLATES: Vec<LetterTemplate> = vec![
        LetterTemplate {
            id: "prefeitura".to_string(),
            name: "SECRETARIA MUNICIPAL DE EDUCAÇÃO -  MUNICÍPIO DE SÃO MATEUS".to_string(),
            cnpj: "31.043.226/0001-01".to_string(),
            signatory: "TELMA DA SILVA VIEIRA".to_string(),
            signatory_role: "SECRETARIA MUNICIPAL DE SÃO MATEUS DO MA".to_string(),
            signatory_cpf: "279.219.053-15".to_string(),
        },
        LetterTemplate {
            id: "ipam".to_string(),
            name: "INST MUNC PREV ASSIST DO MUNICIPIO IPAM".to_string(),
            cnpj: "01.743.768/0001-18".to_string(),
            signatory: "IARA AMARAL LIMA LOPES".to_string(),
            signatory_role: "INSTITUTO MUNICIPAL DE PREVIDÊNCIA E ASSIST IPAM".to_string(),
            signatory_cpf: "048.597.213-14".to_string(),
        },
    ];
}

impl LetterTemplate {
    /// Find the template whose convention CNPJ matches exactly.
    pub fn for_cnpj(cnpj: &str) -> Option<&'static LetterTemplate> {
        LETTER_TEMPLATES.iter().find(|t| t.cnpj == cnpj)
    }

    /// Find a template by identifier.
    pub fn by_id(id: &str) -> Option<&'static LetterTemplate> {
        LETTER_TEMPLATES.iter().find(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_cnpj_exact_match() {
        let template = LetterTemplate::for_cnpj("31.043.226/0001-01");
        assert!(template.is_some());
        assert_eq!(template.unwrap().id, "prefeitura");

        assert!(LetterTemplate::for_cnpj("31.043.226/0001-02").is_none());
        // Unpunctuated form is a different string, not a match.
        assert!(LetterTemplate::for_cnpj("31043226000101").is_none());
    }

    #[test]
    fn test_by_id() {
        assert!(LetterTemplate::by_id("ipam").is_some());
        assert!(LetterTemplate::by_id("unknown").is_none());
    }
}
