//! Invoice, payment, quote and sales order rules

use crm_core::ValidationErrors;
use crm_models::{
    Invoice, InvoiceDto, Payment, PaymentDto, Quote, QuoteDto, SalesOrder, SalesOrderDto,
};

use crate::base::DtoRules;
use crate::rules;

impl DtoRules for Invoice {
    fn check(dto: &InvoiceDto, errors: &mut ValidationErrors) {
        rules::require_text(&dto.invoice_number, "invoiceNumber", "Invoice number", 50, errors);
        rules::require_reference(dto.company_id, "companyId", "Company", errors);
        if dto.due_date < dto.issue_date {
            errors.add("dueDate", "Due date must be on or after the issue date");
        }
        rules::positive(dto.amount, "amount", "Amount", errors);
    }
}

impl DtoRules for Payment {
    fn check(dto: &PaymentDto, errors: &mut ValidationErrors) {
        rules::require_reference(dto.invoice_id, "invoiceId", "Invoice", errors);
        rules::positive(dto.amount, "amount", "Amount", errors);
        rules::optional_max_length(dto.reference.as_deref(), "reference", "Reference", 100, errors);
    }
}

impl DtoRules for Quote {
    fn check(dto: &QuoteDto, errors: &mut ValidationErrors) {
        rules::require_text(&dto.quote_number, "quoteNumber", "Quote number", 50, errors);
        rules::require_reference(dto.company_id, "companyId", "Company", errors);
        rules::positive(dto.amount, "amount", "Amount", errors);
    }
}

impl DtoRules for SalesOrder {
    fn check(dto: &SalesOrderDto, errors: &mut ValidationErrors) {
        rules::require_text(&dto.order_number, "orderNumber", "Order number", 50, errors);
        rules::require_reference(dto.company_id, "companyId", "Company", errors);
        rules::positive(dto.amount, "amount", "Amount", errors);
    }
}
