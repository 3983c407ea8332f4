//! Wallet records and request payloads exchanged with the wallet service.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Account type code for merchants.
pub const SHOPKEEPER: i64 = 0;
/// Account type code for regular users. Also the fallback for unknown input.
pub const USER: i64 = 1;

/// Account classification of a wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountType {
    Shopkeeper,
    User,
}

impl AccountType {
    pub fn code(self) -> i64 {
        match self {
            AccountType::Shopkeeper => SHOPKEEPER,
            AccountType::User => USER,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            SHOPKEEPER => Some(AccountType::Shopkeeper),
            USER => Some(AccountType::User),
            _ => None,
        }
    }

    /// Localized label shown in the UI.
    pub fn label(self) -> &'static str {
        match self {
            AccountType::Shopkeeper => "Lojista",
            AccountType::User => "Usuário",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            AccountType::Shopkeeper => AccountType::User,
            AccountType::User => AccountType::Shopkeeper,
        }
    }
}

/// The `type` field as the server sends it: an integer or a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAccountType {
    Code(i64),
    Label(String),
    Other(serde_json::Value),
}

/// Normalize a server-supplied account type to its numeric code.
///
/// Integers (and strings with an integer prefix) outside {0, 1} pass through
/// unchanged; everything unrecognized becomes [`USER`].
pub fn normalize_account_type(value: Option<&RawAccountType>) -> i64 {
    match value {
        None => USER,
        Some(RawAccountType::Code(code)) => *code,
        Some(RawAccountType::Label(label)) => {
            let label = label.trim().to_lowercase();
            match label.as_str() {
                "shopkeeper" | "lojista" | "0" => SHOPKEEPER,
                "user" | "usuário" | "1" => USER,
                other => parse_int_prefix(other).unwrap_or(USER),
            }
        }
        Some(RawAccountType::Other(_)) => USER,
    }
}

/// Parse a leading base-10 integer the way form inputs are read: optional
/// sign, then digits, ignoring whatever follows.
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign_len..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}

/// A wallet as delivered by `GET /wallets`, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletRecord {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cpf: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(rename = "type", default)]
    pub account_type: Option<RawAccountType>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub balance: f64,
}

/// A wallet held in the view, with its account type normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct Wallet {
    pub id: Option<String>,
    pub full_name: String,
    pub cpf: String,
    pub email: String,
    pub account_type: i64,
    pub balance: f64,
}

impl From<WalletRecord> for Wallet {
    fn from(record: WalletRecord) -> Self {
        let account_type = normalize_account_type(record.account_type.as_ref());
        Self {
            id: record.id,
            full_name: record.full_name,
            cpf: record.cpf,
            email: record.email,
            account_type,
            balance: record.balance,
        }
    }
}

impl Wallet {
    pub fn is_shopkeeper(&self) -> bool {
        self.account_type == SHOPKEEPER
    }

    pub fn type_label(&self) -> String {
        match AccountType::from_code(self.account_type) {
            Some(kind) => kind.label().to_string(),
            None => format!("Tipo {}", self.account_type),
        }
    }
}

/// Body of `POST /wallets`.
#[derive(Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletCreationRequest {
    pub full_name: String,
    pub cpf: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "type")]
    pub account_type: i64,
    pub initial_balance: f64,
}

impl fmt::Debug for WalletCreationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletCreationRequest")
            .field("full_name", &self.full_name)
            .field("cpf", &self.cpf)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("account_type", &self.account_type)
            .field("initial_balance", &self.initial_balance)
            .finish()
    }
}

/// Body of `POST /transfer`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub payer_id: String,
    pub payee_id: String,
    pub value: f64,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Id>::deserialize(deserializer)?.map(|id| match id {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    }))
}

/// A `null` field decodes like a missing one.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
