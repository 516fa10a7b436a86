use bizadmin_api::types::{
    BankAccountPayload, CategoryPayload, ContractPayload, CustomerPayload, ProductPayload,
    ReceiptPayload, ReceiptType, WarehousePayload,
};
use bizadmin_api::{RecordStatus, COMMON_PARAMS};
use chrono::NaiveDate;

use crate::error::AdminError;

pub const MAX_SEARCH_LENGTH: usize = 100;
pub const MAX_NAME_LENGTH: usize = 200;
pub const MAX_PAGE_SIZE: i64 = 200;

/// Client-side checks run before a create or update is sent.
pub trait Validate {
    fn validate(&self) -> Result<(), AdminError>;
}

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, AdminError> {
    if input.len() > max_len {
        return Err(AdminError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(AdminError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate a search string: enforce length, strip control chars, trim.
pub fn validate_search(input: &str) -> Result<String, AdminError> {
    sanitize_text(input, MAX_SEARCH_LENGTH)
}

/// Validate page number (must be >= 1).
pub fn validate_page(page: i64) -> Result<i64, AdminError> {
    if page < 1 {
        return Err(AdminError::InvalidInput("page must be >= 1".to_string()));
    }
    Ok(page)
}

/// Validate page size (must be 1..=MAX_PAGE_SIZE).
pub fn validate_page_size(page_size: i64) -> Result<i64, AdminError> {
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(AdminError::InvalidInput(format!(
            "page_size must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }
    Ok(page_size)
}

/// Validate a `YYYY-MM-DD` date.
pub fn validate_date(input: &str) -> Result<NaiveDate, AdminError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        AdminError::InvalidInput(format!(
            "invalid date '{}'. Expected format: YYYY-MM-DD",
            trimmed
        ))
    })
}

/// Validate a date range; `from` must not be after `to`.
pub fn validate_date_range(from: &str, to: &str) -> Result<(NaiveDate, NaiveDate), AdminError> {
    let from = validate_date(from)?;
    let to = validate_date(to)?;
    if from > to {
        return Err(AdminError::InvalidInput(format!(
            "date range start {} is after end {}",
            from, to
        )));
    }
    Ok((from, to))
}

/// Validate an accounting month in `YYYY-MM` form.
pub fn validate_month(input: &str) -> Result<String, AdminError> {
    let trimmed = input.trim();
    let valid = trimmed.len() == 7
        && NaiveDate::parse_from_str(&format!("{}-01", trimmed), "%Y-%m-%d").is_ok();
    if !valid {
        return Err(AdminError::InvalidInput(format!(
            "invalid month '{}'. Expected format: YYYY-MM",
            trimmed
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate a record status filter: active/1 or deleted/0, case-insensitive.
pub fn validate_status(input: &str) -> Result<RecordStatus, AdminError> {
    input.trim().to_lowercase().parse().map_err(|_| {
        AdminError::InvalidInput(format!(
            "unknown status '{}'. Valid values: active (1), deleted (0)",
            input
        ))
    })
}

/// Validate a receipt type: income or expense, case-insensitive.
pub fn validate_receipt_type(input: &str) -> Result<ReceiptType, AdminError> {
    input.trim().to_lowercase().parse().map_err(|_| {
        AdminError::InvalidInput(format!(
            "unknown receipt type '{}'. Valid values: income, expense",
            input
        ))
    })
}

/// Validate a `key=value` extra filter.
pub fn validate_filter_pair(input: &str) -> Result<(String, String), AdminError> {
    let Some((key, value)) = input.split_once('=') else {
        return Err(AdminError::InvalidInput(format!(
            "invalid filter '{}'. Expected key=value",
            input
        )));
    };
    let key = key.trim();
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(AdminError::InvalidInput(format!(
            "invalid filter key '{}'. Use letters, digits and underscores",
            key
        )));
    }
    if COMMON_PARAMS.iter().any(|p| p.eq_ignore_ascii_case(key)) {
        return Err(AdminError::InvalidInput(format!(
            "filter key '{}' is reserved. Use the dedicated option instead",
            key
        )));
    }
    Ok((key.to_string(), sanitize_text(value, MAX_SEARCH_LENGTH)?))
}

/// Validate one record id. Ids become a single path segment, so blanks,
/// `.`/`..`, slashes and control characters are rejected.
pub fn validate_id(id: &str) -> Result<String, AdminError> {
    let trimmed = id.trim();
    let bad = trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.len() > MAX_NAME_LENGTH
        || trimmed
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_control());
    if bad {
        return Err(AdminError::InvalidInput(format!("invalid id '{}'", id)));
    }
    Ok(trimmed.to_string())
}

/// Validate a list of record ids: at least one, each a valid id.
pub fn validate_ids(ids: &[String]) -> Result<Vec<String>, AdminError> {
    if ids.is_empty() {
        return Err(AdminError::InvalidInput("no ids given".to_string()));
    }
    ids.iter().map(|id| validate_id(id)).collect()
}

fn require(field: &str, value: &str) -> Result<(), AdminError> {
    sanitize_text(value, MAX_NAME_LENGTH)
        .map(|_| ())
        .map_err(|_| AdminError::InvalidInput(format!("{} is required", field)))
}

fn non_negative(field: &str, value: f64) -> Result<(), AdminError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AdminError::InvalidInput(format!(
            "{} must be a non-negative number",
            field
        )));
    }
    Ok(())
}

impl Validate for BankAccountPayload {
    fn validate(&self) -> Result<(), AdminError> {
        require("accountName", &self.account_name)?;
        require("bankName", &self.bank_name)?;
        let number = self.account_number.trim();
        if !(6..=20).contains(&number.len()) || !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(AdminError::InvalidInput(
                "accountNumber must be 6 to 20 digits".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for CategoryPayload {
    fn validate(&self) -> Result<(), AdminError> {
        require("name", &self.name)
    }
}

impl Validate for ContractPayload {
    fn validate(&self) -> Result<(), AdminError> {
        require("contractNumber", &self.contract_number)?;
        require("customerId", &self.customer_id)?;
        non_negative("totalValue", self.total_value)?;
        if let (Some(sign), Some(expiry)) = (self.sign_date, self.expiry_date) {
            if expiry < sign {
                return Err(AdminError::InvalidInput(
                    "expiryDate must not be before signDate".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Validate for CustomerPayload {
    fn validate(&self) -> Result<(), AdminError> {
        require("name", &self.name)?;
        if let Some(ref email) = self.email {
            let valid = email
                .split_once('@')
                .is_some_and(|(user, domain)| !user.is_empty() && domain.contains('.'));
            if !valid {
                return Err(AdminError::InvalidInput(format!("invalid email '{}'", email)));
            }
        }
        if let Some(ref phone) = self.phone {
            let valid = !phone.trim().is_empty()
                && phone
                    .chars()
                    .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '.'));
            if !valid {
                return Err(AdminError::InvalidInput(format!("invalid phone '{}'", phone)));
            }
        }
        Ok(())
    }
}

impl Validate for ProductPayload {
    fn validate(&self) -> Result<(), AdminError> {
        require("code", &self.code)?;
        require("name", &self.name)?;
        non_negative("price", self.price)?;
        if self.quantity_in_stock < 0 {
            return Err(AdminError::InvalidInput(
                "quantityInStock must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for ReceiptPayload {
    fn validate(&self) -> Result<(), AdminError> {
        require("receiptNumber", &self.receipt_number)?;
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(AdminError::InvalidInput(
                "amount must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for WarehousePayload {
    fn validate(&self) -> Result<(), AdminError> {
        require("name", &self.name)
    }
}
