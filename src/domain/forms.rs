//! Form models for wallet creation and transfers.
//!
//! Form values are kept as the raw strings the user typed; they are only
//! parsed into numbers once the whole form validates.

use thiserror::Error;

use super::wallet::{TransferRequest, WalletCreationRequest, parse_int_prefix};

/// Smallest value accepted for a transfer.
pub const MIN_TRANSFER_VALUE: f64 = 0.01;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("email address is malformed")]
    InvalidEmail,

    #[error("{0} is not a number")]
    NotANumber(&'static str),

    #[error("{0} must not be negative")]
    Negative(&'static str),

    #[error("{field} must be at least {minimum}")]
    BelowMinimum { field: &'static str, minimum: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletField {
    FullName,
    Cpf,
    Email,
    Password,
    AccountType,
    InitialBalance,
}

impl WalletField {
    pub const ALL: [WalletField; 6] = [
        WalletField::FullName,
        WalletField::Cpf,
        WalletField::Email,
        WalletField::Password,
        WalletField::AccountType,
        WalletField::InitialBalance,
    ];

    /// Wire name of the field, also used in validation errors.
    pub fn name(self) -> &'static str {
        match self {
            WalletField::FullName => "fullName",
            WalletField::Cpf => "cpf",
            WalletField::Email => "email",
            WalletField::Password => "password",
            WalletField::AccountType => "type",
            WalletField::InitialBalance => "initialBalance",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WalletField::FullName => "Nome completo",
            WalletField::Cpf => "CPF",
            WalletField::Email => "Email",
            WalletField::Password => "Senha",
            WalletField::AccountType => "Tipo de conta",
            WalletField::InitialBalance => "Saldo inicial",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WalletForm {
    pub full_name: String,
    pub cpf: String,
    pub email: String,
    pub password: String,
    pub account_type: String,
    pub initial_balance: String,
}

impl Default for WalletForm {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            cpf: String::new(),
            email: String::new(),
            password: String::new(),
            account_type: "0".to_string(),
            initial_balance: "0".to_string(),
        }
    }
}

impl WalletForm {
    /// Reset to `{type: 0, initialBalance: 0}` with every other field empty.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn value(&self, field: WalletField) -> &str {
        match field {
            WalletField::FullName => &self.full_name,
            WalletField::Cpf => &self.cpf,
            WalletField::Email => &self.email,
            WalletField::Password => &self.password,
            WalletField::AccountType => &self.account_type,
            WalletField::InitialBalance => &self.initial_balance,
        }
    }

    pub fn value_mut(&mut self, field: WalletField) -> &mut String {
        match field {
            WalletField::FullName => &mut self.full_name,
            WalletField::Cpf => &mut self.cpf,
            WalletField::Email => &mut self.email,
            WalletField::Password => &mut self.password,
            WalletField::AccountType => &mut self.account_type,
            WalletField::InitialBalance => &mut self.initial_balance,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.to_request().map(|_| ())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Validate the form and parse it into a creation request.
    pub fn to_request(&self) -> Result<WalletCreationRequest, ValidationError> {
        for field in WalletField::ALL {
            if self.value(field).is_empty() {
                return Err(ValidationError::Required(field.name()));
            }
        }

        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }

        let account_type = parse_int_prefix(&self.account_type)
            .ok_or(ValidationError::NotANumber(WalletField::AccountType.name()))?;

        let initial_balance = parse_number(&self.initial_balance)
            .ok_or(ValidationError::NotANumber(WalletField::InitialBalance.name()))?;
        if initial_balance < 0.0 {
            return Err(ValidationError::Negative(WalletField::InitialBalance.name()));
        }

        Ok(WalletCreationRequest {
            full_name: self.full_name.clone(),
            cpf: self.cpf.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            account_type,
            initial_balance,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferField {
    PayerId,
    PayeeId,
    Value,
}

impl TransferField {
    pub const ALL: [TransferField; 3] = [
        TransferField::PayerId,
        TransferField::PayeeId,
        TransferField::Value,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TransferField::PayerId => "payerId",
            TransferField::PayeeId => "payeeId",
            TransferField::Value => "value",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TransferField::PayerId => "ID do pagador",
            TransferField::PayeeId => "ID do recebedor",
            TransferField::Value => "Valor",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransferForm {
    pub payer_id: String,
    pub payee_id: String,
    pub value: String,
}

impl Default for TransferForm {
    fn default() -> Self {
        Self {
            payer_id: String::new(),
            payee_id: String::new(),
            value: "0".to_string(),
        }
    }
}

impl TransferForm {
    /// Reset to `{value: 0}` with both wallet ids cleared.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn value(&self, field: TransferField) -> &str {
        match field {
            TransferField::PayerId => &self.payer_id,
            TransferField::PayeeId => &self.payee_id,
            TransferField::Value => &self.value,
        }
    }

    pub fn value_mut(&mut self, field: TransferField) -> &mut String {
        match field {
            TransferField::PayerId => &mut self.payer_id,
            TransferField::PayeeId => &mut self.payee_id,
            TransferField::Value => &mut self.value,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.to_request().map(|_| ())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Validate the form and parse it into a transfer request.
    pub fn to_request(&self) -> Result<TransferRequest, ValidationError> {
        for field in TransferField::ALL {
            if self.value(field).is_empty() {
                return Err(ValidationError::Required(field.name()));
            }
        }

        let value = parse_number(&self.value)
            .ok_or(ValidationError::NotANumber(TransferField::Value.name()))?;
        if value < MIN_TRANSFER_VALUE {
            return Err(ValidationError::BelowMinimum {
                field: TransferField::Value.name(),
                minimum: MIN_TRANSFER_VALUE,
            });
        }

        Ok(TransferRequest {
            payer_id: self.payer_id.clone(),
            payee_id: self.payee_id.clone(),
            value,
        })
    }
}

/// Parse a decimal amount. A comma is accepted as the decimal separator.
fn parse_number(s: &str) -> Option<f64> {
    s.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

const LOCAL_PART_SPECIALS: &str = "!#$%&'*+/=?^_`{|}~-";

/// Email format check: dot-separated atoms, `@`, then a domain of
/// hostname labels. Local part is capped at 64 bytes, the whole address at
/// 254.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.len() > 254 {
        return false;
    }
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > 64 {
        return false;
    }

    let local_ok = local.split('.').all(|atom| {
        !atom.is_empty()
            && atom
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || LOCAL_PART_SPECIALS.contains(c))
    });

    let domain_ok = domain.split('.').all(|label| {
        let bytes = label.as_bytes();
        !bytes.is_empty()
            && bytes.len() <= 63
            && bytes[0].is_ascii_alphanumeric()
            && bytes[bytes.len() - 1].is_ascii_alphanumeric()
            && bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-')
    });

    local_ok && domain_ok
}
