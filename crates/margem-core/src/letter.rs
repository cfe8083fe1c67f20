//! Plain-text rendering of the margin-reservation confirmation letter.

use chrono::{Datelike, NaiveDate};

use crate::models::letter::LetterTemplate;
use crate::models::proposal::ProposalData;

/// Format a date in long Brazilian Portuguese form ("25 de julho de 2025").
pub fn format_date_pt(date: NaiveDate) -> String {
    format!(
        "{:02} de {} de {}",
        date.day(),
        month_name_pt(date.month()),
        date.year()
    )
}

fn month_name_pt(month: u32) -> &'static str {
    match month {
        1 => "janeiro",
        2 => "fevereiro",
        3 => "março",
        4 => "abril",
        5 => "maio",
        6 => "junho",
        7 => "julho",
        8 => "agosto",
        9 => "setembro",
        10 => "outubro",
        11 => "novembro",
        12 => "dezembro",
        _ => "",
    }
}

/// Render the confirmation letter for a proposal.
///
/// All thirteen field values are substituted verbatim; no re-validation
/// happens here.
pub fn render_letter(data: &ProposalData, template: &LetterTemplate, date: NaiveDate) -> String {
    format!(
        "\
São Mateus do Maranhão, {date}

Ao
Banco do Brasil S.A
Agência {agencia} de São Mateus do Maranhão MA

Referente a Empréstimo de Consignação em Folha Pagamento - Confirmação de
Reserva de Margem Consignável.

DADOS DO EMPREGADO:

NOME: {client_name}
CPF: {cpf}   Ag: {agencia}   C/C: {conta}
RG: {rg}

DADOS DO EMPREGADOR:

NOME: {employer_name}
CNPJ: {employer_cnpj}

DADOS DO EMPRÉSTIMO:

Valor do Empréstimo R$: {loan_value}  Número de Prestações: {installment_count}
Valor das Prestações R$: {installment_value}
Data da Primeira Prestação: {first_date}
Data da Última Prestação: {last_date}

Informo-lhe que recebemos de nosso empregado em referência, comunicado sobre
Operação de Crédito Número {proposal_number}, conforme dados acima com pagamento
mediante consignação em folha de Pagamento com esse Banco, autorizado os
devidos descontos das prestações mensais em Folha de Pagamento e o posterior
repasse a esta Instituição Financeira.

Dessa forma, ao tempo em que confirmamos a existência de margem consignável
suficiente para amparar os valores que serão consignados, informamos que a
autorização de nosso Empregado estará sendo integralmente atendida.

Assumimos desde já, o compromisso de consignar e repassar a esse Banco na forma
da legislação em vigor, os valores mensais, inclusive aqueles eventualmente
decorrentes de verbas rescisórias, no caso de desligamento do empregado do quadro
da nossa empresa.

Atenciosamente,

___________________________________________________________________

{signatory_role}
{signatory}

CPF: {signatory_cpf}
",
        date = format_date_pt(date),
        agencia = data.agencia,
        client_name = data.client_name,
        cpf = data.cpf,
        conta = data.conta,
        rg = data.rg,
        employer_name = template.name,
        employer_cnpj = template.cnpj,
        loan_value = data.loan_value,
        installment_count = data.installment_count,
        installment_value = data.installment_value,
        first_date = data.first_installment_date,
        last_date = data.last_installment_date,
        proposal_number = data.proposal_number,
        signatory_role = template.signatory_role,
        signatory = template.signatory,
        signatory_cpf = template.signatory_cpf,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::letter::LetterTemplate;

    #[test]
    fn test_format_date_pt() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 25).unwrap();
        assert_eq!(format_date_pt(date), "25 de julho de 2025");

        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert_eq!(format_date_pt(date), "01 de março de 2026");
    }

    #[test]
    fn test_render_substitutes_fields_verbatim() {
        let mut data = ProposalData::default();
        data.client_name = "MARIA GICELMA OLIVEIRA DA SILVA".to_string();
        data.cpf = "005.534.623-50".to_string();
        data.agencia = "2651".to_string();
        data.conta = "23.321".to_string();
        data.loan_value = "77.995,11".to_string();
        data.installment_count = "120".to_string();
        data.proposal_number = "181816970".to_string();
        data.convention_cnpj = "31.043.226/0001-01".to_string();

        let template = LetterTemplate::for_cnpj(&data.convention_cnpj).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 7, 25).unwrap();
        let letter = render_letter(&data, template, date);

        assert!(letter.contains("São Mateus do Maranhão, 25 de julho de 2025"));
        assert!(letter.contains("NOME: MARIA GICELMA OLIVEIRA DA SILVA"));
        assert!(letter.contains("CPF: 005.534.623-50   Ag: 2651   C/C: 23.321"));
        assert!(letter.contains("Operação de Crédito Número 181816970"));
        assert!(letter.contains("Valor do Empréstimo R$: 77.995,11"));
        assert!(letter.contains(&template.signatory));
        assert!(letter.contains(&template.signatory_cpf));
    }

    #[test]
    fn test_render_keeps_defaulted_values() {
        let data = ProposalData::default();
        let template = LetterTemplate::by_id("ipam").unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let letter = render_letter(&data, template, date);

        // Degraded records render too; correction happens in the editor.
        assert!(letter.contains("NOME: NOME NÃO ENCONTRADO"));
        assert!(letter.contains("CPF: 000.000.000-00"));
    }
}
