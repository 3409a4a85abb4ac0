//! Terminal output

use addrbook_core::Address;
use addrbook_query::Page;
use colored::Colorize;

const STREET_WIDTH: usize = 26;
const PLACE_WIDTH: usize = 30;
const COUNTRY_WIDTH: usize = 10;

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

/// "City, ST 12345"
pub fn city_state_postal(address: &Address) -> String {
    format!(
        "{}, {} {}",
        address.city, address.state_province, address.postal_code
    )
}

/// One table row
pub fn format_row(address: &Address) -> String {
    format!(
        "{:<8} {:<sw$} {:<pw$} {:<cw$} {}",
        truncate(address.id.as_str(), 8),
        truncate(&address.street, STREET_WIDTH),
        truncate(&city_state_postal(address), PLACE_WIDTH),
        truncate(&address.country, COUNTRY_WIDTH),
        address.created_at.format("%Y-%m-%d"),
        sw = STREET_WIDTH,
        pw = PLACE_WIDTH,
        cw = COUNTRY_WIDTH,
    )
}

/// Render a page as a table plus the paginator caption
pub fn format_page(page: &Page<Address>) -> String {
    let mut out = String::new();

    if page.items.is_empty() {
        out.push_str("No addresses found.\n");
    } else {
        let header = format!(
            "{:<8} {:<sw$} {:<pw$} {:<cw$} {}",
            "Id",
            "Street",
            "City / State / Postal",
            "Country",
            "Created",
            sw = STREET_WIDTH,
            pw = PLACE_WIDTH,
            cw = COUNTRY_WIDTH,
        );
        out.push_str(&header.bold().to_string());
        out.push('\n');
        for address in &page.items {
            out.push_str(&format_row(address));
            out.push('\n');
        }
    }

    out.push_str(&format!(
        "{}  (page {} of {})\n",
        page.range_label(),
        page.page_index + 1,
        page.total_pages().max(1)
    ));
    out
}

/// Multi-line detail view of one address
pub fn format_address(address: &Address) -> String {
    format!(
        "Id:       {}\nStreet:   {}\nCity:     {}\nState:    {}\n\
         Postal:   {}\nCountry:  {}\nCreated:  {}\n",
        address.id,
        address.street,
        address.city,
        address.state_province,
        address.postal_code,
        address.country,
        address.created_at.to_rfc3339(),
    )
}
