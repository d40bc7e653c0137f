use ratatui::style::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
    Owner,
}

impl Rarity {
    pub fn label(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
            Rarity::Owner => "Owner",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Rarity::Common => Color::Rgb(160, 160, 180),
            Rarity::Rare => Color::Rgb(80, 160, 255),
            Rarity::Epic => Color::Rgb(200, 120, 255),
            Rarity::Legendary => Color::Rgb(255, 160, 60),
            Rarity::Owner => Color::Rgb(255, 220, 80),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct AircraftProfile {
    pub id: &'static str,
    pub name: &'static str,
    pub price: i64,
    pub speed: f64,
    pub turn_rate: f64,
    pub capacity: &'static str,
    pub rarity: Rarity,
    pub glyph: &'static str,
    /// Only listed in the dealership for administrators.
    pub hidden: bool,
}

pub const CATALOG_SIZE: usize = 5;

pub static CATALOG: [AircraftProfile; CATALOG_SIZE] = [
    AircraftProfile { id: "p1", name: "Cessna Skyhawk", price: 25_000, speed: 5.0, turn_rate: 2.0, capacity: "4 Pax", rarity: Rarity::Common, glyph: "🛩", hidden: false },
    AircraftProfile { id: "p2", name: "Learjet 75", price: 500_000, speed: 8.0, turn_rate: 3.0, capacity: "9 Pax", rarity: Rarity::Rare, glyph: "✈", hidden: false },
    AircraftProfile { id: "p3", name: "Boeing 747", price: 2_500_000, speed: 7.0, turn_rate: 1.5, capacity: "416 Pax", rarity: Rarity::Epic, glyph: "🛫", hidden: false },
    AircraftProfile { id: "p4", name: "Concorde X", price: 10_000_000, speed: 12.0, turn_rate: 2.5, capacity: "100 Pax", rarity: Rarity::Legendary, glyph: "🚀", hidden: false },
    AircraftProfile { id: "p_ceo", name: "Executive One", price: 0, speed: 15.0, turn_rate: 5.0, capacity: "Infinite", rarity: Rarity::Owner, glyph: "🛸", hidden: true },
];

/// Aircraft granted to a bootstrapped administrator.
pub const EXECUTIVE_AIRCRAFT: &str = "p_ceo";

pub fn find(id: &str) -> Option<&'static AircraftProfile> {
    CATALOG.iter().find(|p| p.id == id)
}

/// Unknown or missing ids fly the first catalog entry.
pub fn profile_or_default(id: Option<&str>) -> &'static AircraftProfile {
    id.and_then(find).unwrap_or(&CATALOG[0])
}

pub fn shop_listing(is_admin: bool) -> Vec<&'static AircraftProfile> {
    CATALOG.iter().filter(|p| is_admin || !p.hidden).collect()
}

pub fn format_price(price: i64) -> String {
    if price == 0 {
        return "FREE".to_string();
    }
    format!("{} AZ", group_thousands(price))
}

pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0 {
        out.insert(0, '-');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_falls_back_to_first_entry() {
        assert_eq!(profile_or_default(Some("p3")).name, "Boeing 747");
        assert_eq!(profile_or_default(Some("nope")).id, "p1");
        assert_eq!(profile_or_default(None).id, "p1");
    }

    #[test]
    fn hidden_aircraft_only_listed_for_admins() {
        assert_eq!(shop_listing(false).len(), 4);
        assert_eq!(shop_listing(true).len(), 5);
        assert!(shop_listing(false).iter().all(|p| p.id != EXECUTIVE_AIRCRAFT));
    }

    #[test]
    fn prices_are_grouped() {
        assert_eq!(format_price(0), "FREE");
        assert_eq!(format_price(25_000), "25,000 AZ");
        assert_eq!(format_price(10_000_000), "10,000,000 AZ");
        assert_eq!(group_thousands(-1_500), "-1,500");
        assert_eq!(group_thousands(999), "999");
    }
}
