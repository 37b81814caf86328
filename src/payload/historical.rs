//! # Historical TIC Schema
//!
//! Labels emitted by meters in historical mode (and by pre-Linky electronic
//! meters). Indexes are in Wh, currents in A, powers in VA or W.

use crate::payload::field::{FieldSpec, FieldTable, Slot, ValueToken};
use crate::tic::frame::Frame;
use once_cell::sync::Lazy;
use serde::Serialize;

/// One decoded historical-mode snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HistoricalReading {
    /// Adresse du compteur
    pub adco: String,
    /// Option tarifaire choisie
    pub optarif: String,
    /// Intensité souscrite en A
    pub isousc: u8,
    /// Index option Base
    pub base: u32,
    /// Index option Heures Creuses, heures creuses
    pub hchc: u32,
    /// Index option Heures Creuses, heures pleines
    pub hchp: u32,
    /// Index option EJP, heures normales
    pub ejphn: u32,
    /// Index option EJP, heures de pointe mobile
    pub ejphpm: u32,
    /// Index option Tempo, heures creuses jours bleus
    pub bbrhcjb: u32,
    /// Index option Tempo, heures pleines jours bleus
    pub bbrhpjb: u32,
    /// Index option Tempo, heures creuses jours blancs
    pub bbrhcjw: u32,
    /// Index option Tempo, heures pleines jours blancs
    pub bbrhpjw: u32,
    /// Index option Tempo, heures creuses jours rouges
    pub bbrhcjr: u32,
    /// Index option Tempo, heures pleines jours rouges
    pub bbrhpjr: u32,
    /// Préavis début EJP (30 min)
    pub pejp: u8,
    /// Période tarifaire en cours
    pub ptec: String,
    /// Couleur du lendemain
    pub demain: String,
    /// Intensité instantanée
    pub iinst: u16,
    pub iinst1: u16,
    pub iinst2: u16,
    pub iinst3: u16,
    /// Avertissement de dépassement de puissance souscrite
    pub adps: u16,
    /// Intensité maximale appelée
    pub imax: u16,
    pub imax1: u16,
    pub imax2: u16,
    pub imax3: u16,
    /// Puissance maximale triphasée atteinte en W
    pub pmax: u32,
    /// Puissance apparente en VA
    pub papp: u32,
    /// Horaire heures pleines heures creuses
    pub hhphc: String,
    /// Mot d'état du compteur
    pub motdetat: String,
    /// Présence des potentiels
    pub ppot: String,
}

macro_rules! field {
    ($name:literal, $token:ident, $slot:ident, $field:ident) => {
        FieldSpec {
            name: $name,
            token: ValueToken::$token,
            slot: Slot::$slot(|r: &mut HistoricalReading| &mut r.$field),
        }
    };
}

static HISTORICAL_FIELDS: Lazy<FieldTable<HistoricalReading>> = Lazy::new(|| {
    FieldTable::new(vec![
        field!("adco", First, Text, adco),
        field!("optarif", First, Text, optarif),
        field!("isousc", First, U8, isousc),
        field!("base", First, U32, base),
        field!("hchc", First, U32, hchc),
        field!("hchp", First, U32, hchp),
        field!("ejphn", First, U32, ejphn),
        field!("ejphpm", First, U32, ejphpm),
        // Alternate spelling of the EJP peak index
        field!("ejphpn", First, U32, ejphpm),
        field!("bbrhcjb", First, U32, bbrhcjb),
        field!("bbrhpjb", First, U32, bbrhpjb),
        field!("bbrhcjw", First, U32, bbrhcjw),
        field!("bbrhpjw", First, U32, bbrhpjw),
        field!("bbrhcjr", First, U32, bbrhcjr),
        field!("bbrhpjr", First, U32, bbrhpjr),
        field!("pejp", First, U8, pejp),
        field!("ptec", First, Text, ptec),
        field!("demain", First, Text, demain),
        field!("iinst", First, U16, iinst),
        field!("iinst1", First, U16, iinst1),
        field!("iinst2", First, U16, iinst2),
        field!("iinst3", First, U16, iinst3),
        field!("adps", First, U16, adps),
        field!("imax", First, U16, imax),
        field!("imax1", First, U16, imax1),
        field!("imax2", First, U16, imax2),
        field!("imax3", First, U16, imax3),
        field!("pmax", First, U32, pmax),
        field!("papp", First, U32, papp),
        field!("hhphc", First, Text, hhphc),
        field!("motdetat", FreeText, Text, motdetat),
        field!("ppot", First, Text, ppot),
    ])
});

impl HistoricalReading {
    /// Label table of the historical schema.
    pub fn fields() -> &'static FieldTable<HistoricalReading> {
        &HISTORICAL_FIELDS
    }

    pub fn from_frame(frame: &Frame) -> Self {
        HISTORICAL_FIELDS.decode_frame(frame)
    }

    /// Decodes one row into this reading. Unknown labels are ignored.
    pub fn decode_row(&mut self, row: &[String]) {
        HISTORICAL_FIELDS.decode_row(self, row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tic::frame::tokenize_row;

    fn frame(lines: &[&str]) -> Frame {
        Frame::new(lines.iter().map(|l| tokenize_row(l)).collect())
    }

    #[test]
    fn test_decode_base_contract() {
        let reading = HistoricalReading::from_frame(&frame(&[
            "ADCO 031762120214 D",
            "OPTARIF BASE 0",
            "ISOUSC 30 9",
            "BASE 007658964 $",
            "PTEC TH.. $",
            "IINST 002 Y",
            "IMAX 090 H",
            "PAPP 00470 *",
            "HHPHC A ,",
            "MOTDETAT 000000 B",
        ]));

        assert_eq!(reading.adco, "031762120214");
        assert_eq!(reading.optarif, "BASE");
        assert_eq!(reading.isousc, 30);
        assert_eq!(reading.base, 7_658_964);
        assert_eq!(reading.ptec, "TH..");
        assert_eq!(reading.iinst, 2);
        assert_eq!(reading.imax, 90);
        assert_eq!(reading.papp, 470);
        assert_eq!(reading.hhphc, "A");
        assert_eq!(reading.motdetat, "000000");
        assert_eq!(reading.hchc, 0);
    }

    #[test]
    fn test_table_size() {
        assert_eq!(HistoricalReading::fields().len(), 32);
    }
}
