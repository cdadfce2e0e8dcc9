//! vCard 3.0 export, chunked so mobile importers don't choke on
//! oversized files.

use motorpool_core::export::{card_batches, contact_cards, ContactCard};
use motorpool_core::DriverRecord;

/// Renders one vCard artifact per batch of contact cards. Drivers
/// without any usable phone number contribute no card.
pub fn export_contact_batches(drivers: &[DriverRecord]) -> Vec<String> {
    let cards = contact_cards(drivers);
    card_batches(cards)
        .iter()
        .map(|batch| render_batch(batch))
        .collect()
}

fn render_batch(batch: &[ContactCard]) -> String {
    let mut out = String::new();
    for card in batch {
        out.push_str("BEGIN:VCARD\r\n");
        out.push_str("VERSION:3.0\r\n");
        out.push_str(&format!("FN:{}\r\n", escape_vcard_value(&card.name)));
        out.push_str(&format!("N:{};;;;\r\n", escape_vcard_value(&card.name)));
        out.push_str(&format!("TEL;TYPE=CELL:{}\r\n", card.phone));
        if let Some(telegram) = &card.telegram_phone {
            out.push_str(&format!("TEL;TYPE=CELL;PREF=0:{}\r\n", telegram));
        }
        out.push_str("END:VCARD\r\n");
    }
    out
}

fn escape_vcard_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\n"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            _ => out.push(ch),
        }
    }
    out
}
