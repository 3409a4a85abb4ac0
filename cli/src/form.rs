//! New-address form validation

use addrbook_core::{AddrbookError, AddrbookResult, CreateAddressRequest};
use std::fmt;

const MIN_STREET_LEN: usize = 5;
const POSTAL_CODE_LEN: std::ops::RangeInclusive<usize> = 3..=10;

/// Raw form input, as typed
#[derive(Debug, Clone, Default)]
pub struct AddressForm {
    pub street: String,
    pub address_line2: String,
    pub city: String,
    pub state_province: String,
    pub country: String,
    pub postal_code: String,
}

/// A field that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

impl From<FieldError> for AddrbookError {
    fn from(err: FieldError) -> Self {
        AddrbookError::invalid_input(err.field, err.reason)
    }
}

fn required(field: &'static str, value: &str, errors: &mut Vec<FieldError>) -> bool {
    if value.is_empty() {
        errors.push(FieldError {
            field,
            reason: "is required".to_string(),
        });
        return false;
    }
    true
}

fn is_postal_code(value: &str) -> bool {
    POSTAL_CODE_LEN.contains(&value.chars().count())
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || c == '-')
}

impl AddressForm {
    /// Check every field, reporting all failures
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        required("country", self.country.trim(), &mut errors);

        let street = self.street.trim();
        if required("street", street, &mut errors) && street.chars().count() < MIN_STREET_LEN {
            errors.push(FieldError {
                field: "street",
                reason: format!("must be at least {} characters", MIN_STREET_LEN),
            });
        }

        required("city", self.city.trim(), &mut errors);
        required("state/province", self.state_province.trim(), &mut errors);

        let postal_code = self.postal_code.trim();
        if required("postal code", postal_code, &mut errors) && !is_postal_code(postal_code) {
            errors.push(FieldError {
                field: "postal code",
                reason: "must be 3-10 letters, digits, spaces or dashes".to_string(),
            });
        }

        errors
    }

    /// Validate and build the store request from trimmed values
    pub fn into_request(self) -> AddrbookResult<CreateAddressRequest> {
        if let Some(err) = self.validate().into_iter().next() {
            return Err(err.into());
        }

        let line2 = self.address_line2.trim();
        Ok(CreateAddressRequest {
            street: self.street.trim().to_string(),
            address_line2: (!line2.is_empty()).then(|| line2.to_string()),
            city: self.city.trim().to_string(),
            state_province: self.state_province.trim().to_string(),
            country: self.country.trim().to_string(),
            postal_code: self.postal_code.trim().to_string(),
        })
    }
}
