/*!
 * Result Post-Processing
 * BSSID deduplication and strongest-first ordering
 */

use std::collections::HashSet;

use crate::network::WifiNetworkRecord;

/// Keep the first record seen for each BSSID, then sort by signal,
/// strongest first. The sort is stable, so ties keep encounter order.
pub fn process(records: Vec<WifiNetworkRecord>) -> Vec<WifiNetworkRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut unique: Vec<WifiNetworkRecord> = records
        .into_iter()
        .filter(|record| seen.insert(record.bssid))
        .collect();

    unique.sort_by(|a, b| b.signal_dbm.cmp(&a.signal_dbm));
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{decode_bss_list, DecodeOptions};
    use crate::testing::{EntryBuilder, ListBuilder};

    fn records(entries: Vec<EntryBuilder>) -> Vec<WifiNetworkRecord> {
        let bytes = entries
            .into_iter()
            .fold(ListBuilder::new(), ListBuilder::entry)
            .build();
        decode_bss_list(&bytes, &DecodeOptions::default())
            .unwrap()
            .records
    }

    #[test]
    fn sorts_strongest_first() {
        let input = records(vec![
            EntryBuilder::new("a", [1; 6]).rssi(-70),
            EntryBuilder::new("b", [2; 6]).rssi(-40),
            EntryBuilder::new("c", [3; 6]).rssi(-90),
        ]);
        let dbm: Vec<i32> = process(input).iter().map(|r| r.signal_dbm).collect();
        assert_eq!(dbm, [-40, -70, -90]);
    }

    #[test]
    fn duplicate_bssid_keeps_first_record() {
        let input = records(vec![
            EntryBuilder::new("first", [7; 6]).rssi(-80),
            EntryBuilder::new("other", [8; 6]).rssi(-50),
            EntryBuilder::new("second", [7; 6]).rssi(-30),
        ]);
        let output = process(input);
        assert_eq!(output.len(), 2);

        let kept = output.iter().find(|r| r.bssid.0 == [7; 6]).unwrap();
        assert_eq!(kept.ssid, "first");
        assert_eq!(kept.signal_dbm, -80);
        assert_eq!(kept.signal_percent, 40);
    }

    #[test]
    fn ties_keep_encounter_order() {
        let input = records(vec![
            EntryBuilder::new("one", [1; 6]).rssi(-60),
            EntryBuilder::new("two", [2; 6]).rssi(-60),
            EntryBuilder::new("three", [3; 6]).rssi(-60),
        ]);
        let ssids: Vec<String> = process(input).into_iter().map(|r| r.ssid).collect();
        assert_eq!(ssids, ["one", "two", "three"]);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(process(Vec::new()).is_empty());
    }
}
