use std::collections::{BTreeSet, HashMap};

use crate::models::{Offer, SlotKey};

/// Offers nested by row slot and club, one surviving offer per cell, plus
/// the full set of club names seen in the input.
///
/// Club names are collected from every offer regardless of whether the
/// offer survives dedup, so a club keeps its column even when all of its
/// offers lost their cells.
#[derive(Debug, Default)]
pub struct Grouped {
    pub slots: HashMap<SlotKey, HashMap<String, Offer>>,
    pub clubs: BTreeSet<String>,
}

/// Fold a flat offer list into grid cells in encounter order.
///
/// Cell conflicts resolve by source priority, never by price: an occupant
/// keeps its cell unless its source yields (golfpang), in which case any
/// later offer takes the cell.
pub fn group_offers(offers: Vec<Offer>) -> Grouped {
    let mut grouped = Grouped::default();

    for offer in offers {
        grouped.clubs.insert(offer.golf.clone());

        let slot = SlotKey::new(&offer.date, &offer.hour);
        let cells = grouped.slots.entry(slot).or_default();

        let replace = match cells.get(&offer.golf) {
            Some(occupant) => occupant.source.yields_cell(),
            None => true,
        };
        if replace {
            cells.insert(offer.golf.clone(), offer);
        }
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;
    use pretty_assertions::assert_eq;

    fn offer(golf: &str, price: i64, source: Source) -> Offer {
        Offer {
            date: "07/10".to_string(),
            hour: "09시대".to_string(),
            golf: golf.to_string(),
            price,
            source,
            url: format!("https://example.com/{golf}"),
        }
    }

    #[test]
    fn teescan_occupant_is_never_replaced() {
        let grouped = group_offers(vec![
            offer("A", 90000, Source::Teescan),
            offer("A", 50000, Source::Golfpang),
            offer("A", 10000, Source::Teescan),
        ]);

        let slot = SlotKey::new("07/10", "09시대");
        let cell = &grouped.slots[&slot]["A"];
        assert_eq!(cell.source, Source::Teescan);
        assert_eq!(cell.price, 90000);
    }

    #[test]
    fn golfpang_occupant_gives_way_to_any_challenger() {
        let grouped = group_offers(vec![
            offer("A", 100000, Source::Golfpang),
            offer("A", 120000, Source::Golfpang),
        ]);

        let slot = SlotKey::new("07/10", "09시대");
        assert_eq!(grouped.slots[&slot]["A"].price, 120000);

        let grouped = group_offers(vec![
            offer("A", 100000, Source::Golfpang),
            offer("A", 120000, Source::Teescan),
        ]);
        assert_eq!(grouped.slots[&slot]["A"].source, Source::Teescan);
    }

    #[test]
    fn every_club_appears_once_in_the_club_set() {
        let grouped = group_offers(vec![
            offer("B", 80000, Source::Golfpang),
            offer("A", 90000, Source::Teescan),
            offer("A", 70000, Source::Golfpang),
            offer("B", 60000, Source::Teescan),
        ]);

        assert_eq!(
            grouped.clubs.iter().cloned().collect::<Vec<_>>(),
            vec!["A".to_string(), "B".to_string()]
        );
        assert_eq!(grouped.slots.len(), 1);
    }

    #[test]
    fn offers_in_different_slots_never_collide() {
        let mut early = offer("A", 90000, Source::Golfpang);
        let mut late = offer("A", 70000, Source::Golfpang);
        early.hour = "07시대".to_string();
        late.hour = "15시대".to_string();

        let grouped = group_offers(vec![early, late]);

        assert_eq!(grouped.slots.len(), 2);
        assert_eq!(
            grouped.slots[&SlotKey::new("07/10", "07시대")]["A"].price,
            90000
        );
        assert_eq!(
            grouped.slots[&SlotKey::new("07/10", "15시대")]["A"].price,
            70000
        );
    }
}
