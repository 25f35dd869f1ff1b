use alloc::{format, string::String};

use rstest::rstest;

use super::utils::ScriptedProvider;
use crate::{
    WriteCursor,
    catalog::{
        COMMON, Catalog, CatalogEntry, Common, DATE_PARTS, DAYS_OF_WEEK, DayOfWeek, ESCAPE_000,
        ESCAPE_001, ESCAPES, EscapeCatalog, FORMATTING, MONTHS, Month,
    },
};

fn write_entry(catalog: &Catalog, index: usize, window: usize) -> String {
    let mut provider = ScriptedProvider::fixed(window);
    let mut cursor = WriteCursor::new(&mut provider).unwrap();
    cursor.write_catalog_entry(catalog, index).unwrap();
    cursor.finish();
    provider.output_str().into()
}

#[rstest]
fn every_catalog_entry_is_reproduced(
    #[values(&COMMON, &FORMATTING, &ESCAPES, &DATE_PARTS, &DAYS_OF_WEEK, &MONTHS)]
    catalog: &'static Catalog,
    #[values(1, 3, 64)] window: usize,
) {
    for index in 0..catalog.len() {
        assert_eq!(
            write_entry(catalog, index, window),
            catalog.entry(index),
            "{} entry {index}",
            catalog.name()
        );
    }
}

#[rstest]
fn every_escape_entry_is_reproduced(
    #[values(&ESCAPE_000, &ESCAPE_001)] catalog: &'static EscapeCatalog,
    #[values(1, 5, 6, 64)] window: usize,
) {
    for index in 0..catalog.len() {
        let mut provider = ScriptedProvider::fixed(window);
        let mut cursor = WriteCursor::new(&mut provider).unwrap();
        cursor.write_escape_entry(catalog, index).unwrap();
        cursor.finish();

        let expected = format!("{}{}", catalog.prefix(), catalog.entry(index));
        assert_eq!(provider.output_str(), expected);
    }
}

#[test]
fn typed_and_raw_lookups_agree() {
    for &entry in Common::ALL {
        assert_eq!(write_entry(&COMMON, entry.index(), 2), entry.text());
    }
    for &day in DayOfWeek::ALL {
        assert_eq!(write_entry(&DAYS_OF_WEEK, day.index(), 2), day.text());
    }
}

#[test]
fn literal_text_is_what_the_tables_declare() {
    assert_eq!(write_entry(&COMMON, Common::Null.index(), 1), "null");
    assert_eq!(write_entry(&DAYS_OF_WEEK, DayOfWeek::Wednesday.index(), 1), "Wed");
    assert_eq!(write_entry(&MONTHS, Month::September.index(), 1), "Sep");
    assert_eq!(COMMON.text().len(), 39);
}
