//! Historical schema decoding tests.

use tic_rs::payload::field::{Slot, ValueToken};
use tic_rs::tic::frame::{tokenize_row, Frame};
use tic_rs::HistoricalReading;

fn row(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

fn frame(lines: &[&str]) -> Frame {
    Frame::new(lines.iter().map(|l| tokenize_row(l)).collect())
}

/// Every label of the table fills its own slot and nothing else.
#[test]
fn test_each_label_populates_one_field() {
    for spec in HistoricalReading::fields().iter() {
        assert_eq!(spec.token, if spec.name == "motdetat" {
            ValueToken::FreeText
        } else {
            ValueToken::First
        });

        let label = spec.name.to_uppercase();
        let mut reading = HistoricalReading::default();
        reading.decode_row(&row(&[&label, "7", "X"]));
        assert_ne!(reading, HistoricalReading::default(), "{label} not decoded");

        spec.slot.reset(&mut reading);
        assert_eq!(reading, HistoricalReading::default(), "{label} touched other fields");
    }
}

/// Declared widths: indexes are 32-bit, currents 16-bit, contract values 8-bit.
#[test]
fn test_slot_widths() {
    let table = HistoricalReading::fields();
    let width = |name: &str| table.lookup(name).and_then(|spec| spec.slot.width());

    assert_eq!(width("base"), Some(32));
    assert_eq!(width("bbrhpjr"), Some(32));
    assert_eq!(width("papp"), Some(32));
    assert_eq!(width("iinst2"), Some(16));
    assert_eq!(width("adps"), Some(16));
    assert_eq!(width("isousc"), Some(8));
    assert_eq!(width("pejp"), Some(8));
    assert_eq!(width("adco"), None);
    assert!(matches!(table.lookup("ptec").map(|s| s.slot), Some(Slot::Text(_))));
}

/// A three-phase Tempo frame.
#[test]
fn test_tempo_three_phase_frame() {
    let reading = HistoricalReading::from_frame(&frame(&[
        "ADCO 041876097418 4",
        "OPTARIF BBR( S",
        "ISOUSC 45 ?",
        "BBRHCJB 012345678 Z",
        "BBRHPJB 023456789 4",
        "BBRHCJW 000123456 ,",
        "BBRHPJW 000234567 4",
        "BBRHCJR 000034567 9",
        "BBRHPJR 000045678 ?",
        "PTEC HPJB P",
        "DEMAIN ---- \"",
        "IINST1 004 I",
        "IINST2 003 I",
        "IINST3 005 K",
        "IMAX1 060 6",
        "IMAX2 060 7",
        "IMAX3 060 8",
        "PMAX 12540 4",
        "PAPP 02310 )",
        "HHPHC Y D",
        "MOTDETAT 000000 B",
        "PPOT 00 #",
    ]));

    assert_eq!(reading.adco, "041876097418");
    assert_eq!(reading.optarif, "BBR(");
    assert_eq!(reading.isousc, 45);
    assert_eq!(reading.bbrhcjb, 12_345_678);
    assert_eq!(reading.bbrhpjr, 45_678);
    assert_eq!(reading.ptec, "HPJB");
    assert_eq!(reading.demain, "----");
    assert_eq!((reading.iinst1, reading.iinst2, reading.iinst3), (4, 3, 5));
    assert_eq!(reading.imax3, 60);
    assert_eq!(reading.pmax, 12_540);
    assert_eq!(reading.papp, 2_310);
    assert_eq!(reading.hhphc, "Y");
    assert_eq!(reading.ppot, "00");
    assert_eq!(reading.base, 0);
}

/// Unknown labels leave the reading untouched.
#[test]
fn test_unknown_label_ignored() {
    let mut reading = HistoricalReading::default();
    reading.decode_row(&row(&["TOTO", "123", "X"]));
    reading.decode_row(&row(&["EAST", "123", "X"]));
    assert_eq!(reading, HistoricalReading::default());
}

/// Rows with no value token are skipped.
#[test]
fn test_short_rows_ignored() {
    let mut reading = HistoricalReading::default();
    reading.decode_row(&row(&[]));
    reading.decode_row(&row(&["BASE"]));
    assert_eq!(reading, HistoricalReading::default());
}

/// Labels match regardless of case.
#[test]
fn test_label_case_insensitive() {
    let mut reading = HistoricalReading::default();
    reading.decode_row(&row(&["papp", "00750", "2"]));
    reading.decode_row(&row(&["Iinst", "003", "Y"]));
    assert_eq!(reading.papp, 750);
    assert_eq!(reading.iinst, 3);
}

/// Free text keeps every word but the checksum.
#[test]
fn test_free_text_status_word() {
    let mut reading = HistoricalReading::default();
    reading.decode_row(&row(&["MOTDETAT", "Hello", "World", "C"]));
    assert_eq!(reading.motdetat, "Hello World");
}

/// Malformed numbers decode to zero, oversize numbers saturate.
#[test]
fn test_malformed_and_oversize_values() {
    let reading = HistoricalReading::from_frame(&frame(&[
        "BASE 00765A964 $",
        "IINST -02 Y",
        "ISOUSC 300 9",
        "IMAX 99999 H",
        "PAPP 99999999999 *",
    ]));
    assert_eq!(reading.base, 0);
    assert_eq!(reading.iinst, 0);
    assert_eq!(reading.isousc, u8::MAX);
    assert_eq!(reading.imax, u16::MAX);
    assert_eq!(reading.papp, u32::MAX);
}

/// A label repeated within one frame keeps its first value.
#[test]
fn test_repeated_label_first_wins() {
    let reading = HistoricalReading::from_frame(&frame(&["PAPP 00470 *", "PAPP 00990 *"]));
    assert_eq!(reading.papp, 470);
}

/// An empty frame is the zero reading.
#[test]
fn test_empty_frame() {
    assert_eq!(HistoricalReading::from_frame(&Frame::default()), HistoricalReading::default());
}

/// Both spellings of the EJP peak index land in the same field.
#[test]
fn test_ejp_peak_index_spellings() {
    let reading = HistoricalReading::from_frame(&frame(&["EJPHPM 000123456 X"]));
    assert_eq!(reading.ejphpm, 123_456);

    let reading = HistoricalReading::from_frame(&frame(&["EJPHPN 000654321 X"]));
    assert_eq!(reading.ejphpm, 654_321);
}
