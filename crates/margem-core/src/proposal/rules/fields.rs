//! Declarative recognizer table: field, ordered patterns, normalization.
//!
//! New document layouts extend this table instead of adding control flow
//! to the parser.

use lazy_static::lazy_static;
use regex::Regex;

use super::amounts::normalize_currency;
use super::patterns::*;
use crate::models::proposal::FieldKey;

/// Post-processing applied to a matched capture before storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalize {
    /// Generic whitespace trim.
    Trim,
    /// Currency marker stripping, for the monetary fields.
    Currency,
}

impl Normalize {
    pub fn apply(self, raw: &str) -> String {
        match self {
            Normalize::Trim => raw.trim().to_string(),
            Normalize::Currency => normalize_currency(Some(raw)),
        }
    }
}

/// One row of the recognizer table.
pub struct FieldSpec {
    pub key: FieldKey,
    pub patterns: Vec<&'static Regex>,
    pub normalize: Normalize,
}

impl FieldSpec {
    fn new(key: FieldKey, patterns: Vec<&'static Regex>) -> Self {
        Self {
            key,
            patterns,
            normalize: Normalize::Trim,
        }
    }

    fn currency(key: FieldKey, patterns: Vec<&'static Regex>) -> Self {
        Self {
            key,
            patterns,
            normalize: Normalize::Currency,
        }
    }
}

lazy_static! {
    /// The recognizer table, one row per proposal field, rows in record
    /// order, candidates within a row in matching order.
    pub static ref FIELD_TABLE: Vec<FieldSpec> = vec![
        FieldSpec::new(
            FieldKey::ClientName,
            vec![&*CLIENT_NAME_LABELED, &*CLIENT_NAME],
        ),
        FieldSpec::new(FieldKey::Cpf, vec![&*CPF_LABELED, &*CPF_STANDALONE]),
        FieldSpec::new(FieldKey::Rg, vec![&*RG_LABELED, &*RG_DOCUMENT]),
        FieldSpec::new(FieldKey::Agencia, vec![&*AGENCIA_LABELED, &*AGENCIA_SHORT]),
        FieldSpec::new(FieldKey::Conta, vec![&*CONTA_LABELED, &*CONTA_SHORT]),
        FieldSpec::currency(FieldKey::LoanValue, vec![&*LOAN_VALUE, &*LOAN_VALUE_ALT]),
        FieldSpec::currency(
            FieldKey::InstallmentValue,
            vec![&*INSTALLMENT_VALUE, &*INSTALLMENT_VALUE_ALT],
        ),
        FieldSpec::new(
            FieldKey::InstallmentCount,
            vec![&*INSTALLMENT_COUNT, &*INSTALLMENT_COUNT_ALT],
        ),
        FieldSpec::new(
            FieldKey::FirstInstallmentDate,
            vec![&*FIRST_DATE, &*FIRST_DATE_ALT],
        ),
        FieldSpec::new(
            FieldKey::LastInstallmentDate,
            vec![&*LAST_DATE, &*LAST_DATE_ALT],
        ),
        FieldSpec::new(
            FieldKey::ProposalNumber,
            vec![&*PROPOSAL_NUMBER, &*PROPOSAL_NUMBER_ALT],
        ),
        FieldSpec::new(
            FieldKey::ConventionName,
            vec![&*CONVENTION_NAME, &*CONVENTION_NAME_ALT],
        ),
        FieldSpec::new(
            FieldKey::ConventionCnpj,
            vec![&*CNPJ_LABELED, &*CNPJ_STANDALONE],
        ),
    ];
}
