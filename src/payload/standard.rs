//! # Standard TIC Schema
//!
//! Labels emitted by Linky meters in standard mode. Next to plain values the
//! schema carries dated values (`LABEL timestamp value C`), a packed status
//! word, a packed relay byte and free-text messages.
//!
//! Energies are in Wh or VArh, currents in A, voltages in V, powers in VA or W.
//! `*_last_year` fields are the `-1` labels, the same quantity one year back.

use crate::payload::field::{FieldSpec, FieldTable, Slot, ValueToken};
use crate::payload::relay::RelayRegister;
use crate::payload::status::StatusRegister;
use crate::tic::frame::Frame;
use chrono::{DateTime, FixedOffset};
use once_cell::sync::Lazy;
use serde::Serialize;

/// One decoded standard-mode snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StandardReading {
    /// Adresse secondaire du compteur
    pub adsc: String,
    /// Version de la TIC
    pub vtic: String,
    /// Date et heure courante
    pub date: Option<DateTime<FixedOffset>>,
    /// Nom du calendrier tarifaire fournisseur
    pub ngtf: String,
    /// Libellé tarif fournisseur en cours
    pub ltarf: String,
    /// Energie active soutirée totale
    pub east: u32,
    pub easf01: u32,
    pub easf02: u32,
    pub easf03: u32,
    pub easf04: u32,
    pub easf05: u32,
    pub easf06: u32,
    pub easf07: u32,
    pub easf08: u32,
    pub easf09: u32,
    pub easf10: u32,
    pub easd01: u32,
    pub easd02: u32,
    pub easd03: u32,
    pub easd04: u32,
    /// Energie active injectée totale
    pub eait: u32,
    /// Energie réactive Q1..Q4 totale
    pub erq1: u32,
    pub erq2: u32,
    pub erq3: u32,
    pub erq4: u32,
    pub irms1: u16,
    pub irms2: u16,
    pub irms3: u16,
    pub urms1: u16,
    pub urms2: u16,
    pub urms3: u16,
    /// Puissance apparente de référence, kVA
    pub pref: u8,
    /// Puissance apparente de coupure, kVA
    pub pcoup: u8,
    pub sinsts: u32,
    pub sinsts1: u32,
    pub sinsts2: u32,
    pub sinsts3: u32,
    pub smaxsn: u32,
    pub smaxsn1: u32,
    pub smaxsn2: u32,
    pub smaxsn3: u32,
    pub smaxsn_last_year: u32,
    pub smaxsn1_last_year: u32,
    pub smaxsn2_last_year: u32,
    pub smaxsn3_last_year: u32,
    /// Puissance apparente instantanée injectée
    pub sinsti: u32,
    pub smaxin: u32,
    pub smaxin_last_year: u32,
    /// Points de la courbe de charge active soutirée / injectée
    pub ccasn: u32,
    pub ccasn_last_year: u32,
    pub ccain: u32,
    pub ccain_last_year: u32,
    /// Tension moyenne par phase
    pub umoy1: u16,
    pub umoy2: u16,
    pub umoy3: u16,
    pub status: StatusRegister,
    /// Début / fin des pointes mobiles 1 à 3
    pub dpm1: u8,
    pub fpm1: u8,
    pub dpm2: u8,
    pub fpm2: u8,
    pub dpm3: u8,
    pub fpm3: u8,
    /// Message court
    pub msg1: String,
    /// Message ultra court
    pub msg2: String,
    pub prm: String,
    pub relais: RelayRegister,
    /// Numéro de l'index tarifaire en cours
    pub ntarf: u8,
    /// Numéro du jour en cours calendrier fournisseur
    pub njourf: u8,
    /// Numéro du prochain jour calendrier fournisseur
    pub njourf_next_day: u8,
    /// Profil du prochain jour calendrier fournisseur
    pub pjourf_next_day: String,
    /// Profil du prochain jour de pointe
    pub ppointe: String,
}

macro_rules! field {
    ($name:literal, $token:ident, $slot:ident, $field:ident) => {
        FieldSpec {
            name: $name,
            token: ValueToken::$token,
            slot: Slot::$slot(|r: &mut StandardReading| &mut r.$field),
        }
    };
}

static STANDARD_FIELDS: Lazy<FieldTable<StandardReading>> = Lazy::new(|| {
    FieldTable::new(vec![
        field!("adsc", First, Text, adsc),
        field!("vtic", First, Text, vtic),
        field!("date", First, Date, date),
        field!("ngtf", First, Text, ngtf),
        field!("ltarf", First, Text, ltarf),
        field!("east", First, U32, east),
        field!("easf01", First, U32, easf01),
        field!("easf02", First, U32, easf02),
        field!("easf03", First, U32, easf03),
        field!("easf04", First, U32, easf04),
        field!("easf05", First, U32, easf05),
        field!("easf06", First, U32, easf06),
        field!("easf07", First, U32, easf07),
        field!("easf08", First, U32, easf08),
        field!("easf09", First, U32, easf09),
        field!("easf10", First, U32, easf10),
        field!("easd01", First, U32, easd01),
        field!("easd02", First, U32, easd02),
        field!("easd03", First, U32, easd03),
        field!("easd04", First, U32, easd04),
        field!("eait", First, U32, eait),
        field!("erq1", First, U32, erq1),
        field!("erq2", First, U32, erq2),
        field!("erq3", First, U32, erq3),
        field!("erq4", First, U32, erq4),
        field!("irms1", First, U16, irms1),
        field!("irms2", First, U16, irms2),
        field!("irms3", First, U16, irms3),
        field!("urms1", First, U16, urms1),
        field!("urms2", First, U16, urms2),
        field!("urms3", First, U16, urms3),
        field!("pref", First, U8, pref),
        field!("pcoup", First, U8, pcoup),
        field!("sinsts", First, U32, sinsts),
        field!("sinsts1", First, U32, sinsts1),
        field!("sinsts2", First, U32, sinsts2),
        field!("sinsts3", First, U32, sinsts3),
        field!("smaxsn", Second, U32, smaxsn),
        field!("smaxsn1", Second, U32, smaxsn1),
        field!("smaxsn2", Second, U32, smaxsn2),
        field!("smaxsn3", Second, U32, smaxsn3),
        field!("smaxsn-1", Second, U32, smaxsn_last_year),
        field!("smaxsn1-1", Second, U32, smaxsn1_last_year),
        field!("smaxsn2-1", Second, U32, smaxsn2_last_year),
        field!("smaxsn3-1", Second, U32, smaxsn3_last_year),
        field!("sinsti", First, U32, sinsti),
        field!("smaxin", Second, U32, smaxin),
        field!("smaxin-1", Second, U32, smaxin_last_year),
        field!("ccasn", Second, U32, ccasn),
        field!("ccasn-1", Second, U32, ccasn_last_year),
        field!("ccain", Second, U32, ccain),
        field!("ccain-1", Second, U32, ccain_last_year),
        field!("umoy1", Second, U16, umoy1),
        field!("umoy2", Second, U16, umoy2),
        field!("umoy3", Second, U16, umoy3),
        field!("status", First, Status, status),
        field!("dpm1", Second, U8, dpm1),
        field!("fpm1", Second, U8, fpm1),
        field!("dpm2", Second, U8, dpm2),
        field!("fpm2", Second, U8, fpm2),
        field!("dpm3", Second, U8, dpm3),
        field!("fpm3", Second, U8, fpm3),
        field!("msg1", FreeText, Text, msg1),
        field!("msg2", FreeText, Text, msg2),
        field!("prm", First, Text, prm),
        field!("relais", First, Relay, relais),
        field!("ntarf", First, U8, ntarf),
        field!("njourf", First, U8, njourf),
        field!("njourf+1", First, U8, njourf_next_day),
        field!("pjourf+1", First, Text, pjourf_next_day),
        field!("ppointe", First, Text, ppointe),
    ])
});

impl StandardReading {
    /// Label table of the standard schema.
    pub fn fields() -> &'static FieldTable<StandardReading> {
        &STANDARD_FIELDS
    }

    pub fn from_frame(frame: &Frame) -> Self {
        STANDARD_FIELDS.decode_frame(frame)
    }

    /// Decodes one row into this reading. Unknown labels are ignored.
    pub fn decode_row(&mut self, row: &[String]) {
        STANDARD_FIELDS.decode_row(self, row);
    }
}
