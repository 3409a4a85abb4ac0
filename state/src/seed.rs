//! Synthetic seed data
//!
//! Twenty addresses cycling through ten street names and ten city entries,
//! created on distinct days of January 2024.

use addrbook_core::{Address, AddressId};
use chrono::{DateTime, TimeZone, Utc};

/// Number of seeded addresses
pub const SEED_COUNT: u32 = 20;

const SEED_YEAR: i32 = 2024;
const SEED_MONTH: u32 = 1;

const STREETS: [&str; 10] = [
    "Main", "Oak", "Pine", "Maple", "Cedar", "Elm", "Birch", "Willow", "Chestnut", "Walnut",
];

/// City, state/province, postal code, country
const CITY_CATALOG: [(&str, &str, &str, &str); 10] = [
    ("New York", "NY", "10001", "USA"),
    ("Los Angeles", "CA", "90001", "USA"),
    ("Chicago", "IL", "60601", "USA"),
    ("Houston", "TX", "77001", "USA"),
    ("Phoenix", "AZ", "85001", "USA"),
    ("Toronto", "ON", "M5H", "Canada"),
    ("Vancouver", "BC", "V5K", "Canada"),
    ("London", "ENG", "SW1A", "UK"),
    ("Berlin", "BE", "10115", "Germany"),
    ("Paris", "IDF", "75001", "France"),
];

fn seed_date(n: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(SEED_YEAR, SEED_MONTH, 1 + n % 28, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Build the seed address with id `n`
pub fn seed_address(n: u32) -> Address {
    let index = (n % 10) as usize;
    let (city, state_province, postal_code, country) = CITY_CATALOG[index];

    Address {
        id: AddressId(n.to_string()),
        street: format!("{} {} Street", 100 + n, STREETS[index]),
        city: city.to_string(),
        state_province: state_province.to_string(),
        country: country.to_string(),
        postal_code: postal_code.to_string(),
        created_at: seed_date(n),
    }
}

/// The full seed set, ids "1" through "20"
pub fn seed_addresses() -> Vec<Address> {
    (1..=SEED_COUNT).map(seed_address).collect()
}
