//! Proposal data model: the extracted fields and their sentinel defaults.

use serde::{Deserialize, Serialize};

/// Keys of the proposal fields, in the fixed presentation order of the
/// record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    /// Client full name.
    ClientName,
    /// National tax ID (CPF).
    Cpf,
    /// Secondary identity document (RG).
    Rg,
    /// Bank branch code.
    Agencia,
    /// Bank account number.
    Conta,
    /// Requested loan principal.
    LoanValue,
    /// Monthly installment amount.
    InstallmentValue,
    /// Number of installments.
    InstallmentCount,
    /// Debit date of the first installment.
    FirstInstallmentDate,
    /// Debit date of the last installment.
    LastInstallmentDate,
    /// Proposal number.
    ProposalNumber,
    /// Convention (employer) name.
    ConventionName,
    /// Convention (employer) CNPJ.
    ConventionCnpj,
}

impl FieldKey {
    /// All keys, in declaration order.
    pub const ALL: [FieldKey; 13] = [
        FieldKey::ClientName,
        FieldKey::Cpf,
        FieldKey::Rg,
        FieldKey::Agencia,
        FieldKey::Conta,
        FieldKey::LoanValue,
        FieldKey::InstallmentValue,
        FieldKey::InstallmentCount,
        FieldKey::FirstInstallmentDate,
        FieldKey::LastInstallmentDate,
        FieldKey::ProposalNumber,
        FieldKey::ConventionName,
        FieldKey::ConventionCnpj,
    ];

    /// Number of fields in the schema.
    pub const COUNT: usize = Self::ALL.len();

    /// Field name as serialized.
    pub fn name(self) -> &'static str {
        match self {
            FieldKey::ClientName => "client_name",
            FieldKey::Cpf => "cpf",
            FieldKey::Rg => "rg",
            FieldKey::Agencia => "agencia",
            FieldKey::Conta => "conta",
            FieldKey::LoanValue => "loan_value",
            FieldKey::InstallmentValue => "installment_value",
            FieldKey::InstallmentCount => "installment_count",
            FieldKey::FirstInstallmentDate => "first_installment_date",
            FieldKey::LastInstallmentDate => "last_installment_date",
            FieldKey::ProposalNumber => "proposal_number",
            FieldKey::ConventionName => "convention_name",
            FieldKey::ConventionCnpj => "convention_cnpj",
        }
    }

    /// Sentinel assigned when no recognizer resolves the field.
    pub fn default_value(self) -> &'static str {
        match self {
            FieldKey::ClientName => "NOME NÃO ENCONTRADO",
            FieldKey::Cpf => "000.000.000-00",
            FieldKey::Rg => "0000000000",
            FieldKey::Agencia => "0000",
            FieldKey::Conta => "00.000",
            FieldKey::LoanValue => "0,00",
            FieldKey::InstallmentValue => "0,00",
            FieldKey::InstallmentCount => "0",
            FieldKey::FirstInstallmentDate => "00/00/0000",
            FieldKey::LastInstallmentDate => "00/00/0000",
            FieldKey::ProposalNumber => "000000000",
            FieldKey::ConventionName => "CONVÊNIO NÃO IDENTIFICADO",
            FieldKey::ConventionCnpj => "00.000.000/0001-00",
        }
    }
}

/// The extraction result record consumed by the editor and the letter
/// generator.
///
/// Every field is always present; unresolved fields carry their sentinel
/// default. Values are opaque display strings, never parsed numerics or
/// dates. Downstream edits replace the whole record, they never mutate a
/// shared instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalData {
    /// Client full name.
    pub client_name: String,

    /// National tax ID (CPF), punctuated display form.
    pub cpf: String,

    /// Secondary identity document (RG).
    pub rg: String,

    /// Bank branch code.
    pub agencia: String,

    /// Bank account number.
    pub conta: String,

    /// Requested loan principal (decimal comma, thousands dot).
    pub loan_value: String,

    /// Monthly installment amount.
    pub installment_value: String,

    /// Number of installments.
    pub installment_count: String,

    /// Debit date of the first installment (dd/mm/yyyy).
    pub first_installment_date: String,

    /// Debit date of the last installment (dd/mm/yyyy).
    pub last_installment_date: String,

    /// Proposal number.
    pub proposal_number: String,

    /// Convention (employer) name.
    pub convention_name: String,

    /// Convention (employer) CNPJ.
    pub convention_cnpj: String,
}

impl Default for ProposalData {
    fn default() -> Self {
        let mut record = Self {
            client_name: String::new(),
            cpf: String::new(),
            rg: String::new(),
            agencia: String::new(),
            conta: String::new(),
            loan_value: String::new(),
            installment_value: String::new(),
            installment_count: String::new(),
            first_installment_date: String::new(),
            last_installment_date: String::new(),
            proposal_number: String::new(),
            convention_name: String::new(),
            convention_cnpj: String::new(),
        };
        for key in FieldKey::ALL {
            record.set(key, key.default_value().to_string());
        }
        record
    }
}

impl ProposalData {
    /// Read a field by key.
    pub fn get(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::ClientName => &self.client_name,
            FieldKey::Cpf => &self.cpf,
            FieldKey::Rg => &self.rg,
            FieldKey::Agencia => &self.agencia,
            FieldKey::Conta => &self.conta,
            FieldKey::LoanValue => &self.loan_value,
            FieldKey::InstallmentValue => &self.installment_value,
            FieldKey::InstallmentCount => &self.installment_count,
            FieldKey::FirstInstallmentDate => &self.first_installment_date,
            FieldKey::LastInstallmentDate => &self.last_installment_date,
            FieldKey::ProposalNumber => &self.proposal_number,
            FieldKey::ConventionName => &self.convention_name,
            FieldKey::ConventionCnpj => &self.convention_cnpj,
        }
    }

    pub(crate) fn set(&mut self, key: FieldKey, value: String) {
        match key {
            FieldKey::ClientName => self.client_name = value,
            FieldKey::Cpf => self.cpf = value,
            FieldKey::Rg => self.rg = value,
            FieldKey::Agencia => self.agencia = value,
            FieldKey::Conta => self.conta = value,
            FieldKey::LoanValue => self.loan_value = value,
            FieldKey::InstallmentValue => self.installment_value = value,
            FieldKey::InstallmentCount => self.installment_count = value,
            FieldKey::FirstInstallmentDate => self.first_installment_date = value,
            FieldKey::LastInstallmentDate => self.last_installment_date = value,
            FieldKey::ProposalNumber => self.proposal_number = value,
            FieldKey::ConventionName => self.convention_name = value,
            FieldKey::ConventionCnpj => self.convention_cnpj = value,
        }
    }
}
