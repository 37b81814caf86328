//! # Status Register (STGE)
//!
//! The standard-mode status word packs 18 independent meter states into one
//! 32-bit value. Bit 0 is the least significant bit. Bits 3, 5 and 18 are
//! reserved and belong to no sub-field.
//!
//! ```text
//!  31 30 29 28 27 26 25 24 23 22 21 20 19 18 17 16 15 14 13 12 11 10  9  8  7  6  5  4  3  2  1  0
//! | MP  | MPN | TND | TC  |CS| CPL | EUR |--|TI|CK|CTD  |    CTP    |ED|CO|RP|SU|--|TS|--| COD |DC|
//! ```

use serde::Serialize;

use crate::constants::TIC_STATUS_BIT_COUNT;

/// Inclusive range of bits inside the status word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitRange {
    pub low: u32,
    pub high: u32,
}

impl BitRange {
    pub const fn new(low: u32, high: u32) -> Self {
        BitRange { low, high }
    }

    pub const fn mask(&self) -> u32 {
        let width = self.high - self.low + 1;
        if width as usize >= TIC_STATUS_BIT_COUNT {
            u32::MAX
        } else {
            ((1u32 << width) - 1) << self.low
        }
    }

    pub const fn extract(&self, value: u32) -> u8 {
        ((value & self.mask()) >> self.low) as u8
    }

    pub const fn insert(&self, field: u8) -> u32 {
        ((field as u32) << self.low) & self.mask()
    }
}

pub const DRY_CONTACT: BitRange = BitRange::new(0, 0);
pub const CUT_OFF_DEVICE: BitRange = BitRange::new(1, 2);
pub const TERMINAL_SHIELD: BitRange = BitRange::new(4, 4);
pub const SURGE: BitRange = BitRange::new(6, 6);
pub const REFERENCE_POWER_EXCEEDED: BitRange = BitRange::new(7, 7);
pub const CONSUMPTION: BitRange = BitRange::new(8, 8);
pub const ENERGY_DIRECTION: BitRange = BitRange::new(9, 9);
pub const CONTRACT_TYPE_PRICE: BitRange = BitRange::new(10, 13);
pub const CONTRACT_TYPE_PRICE_DISTRIBUTOR: BitRange = BitRange::new(14, 15);
pub const CLOCK: BitRange = BitRange::new(16, 16);
pub const TIC: BitRange = BitRange::new(17, 17);
pub const EURIDIS_LINK: BitRange = BitRange::new(19, 20);
pub const CPL: BitRange = BitRange::new(21, 22);
pub const CPL_SYNC: BitRange = BitRange::new(23, 23);
pub const TEMPO_COLOR: BitRange = BitRange::new(24, 25);
pub const TEMPO_NEXT_DAY_COLOR: BitRange = BitRange::new(26, 27);
pub const MOVING_PEAK_NOTICE: BitRange = BitRange::new(28, 29);
pub const MOVING_PEAK: BitRange = BitRange::new(30, 31);

/// Sub-field names and their bit ranges, least significant first.
pub const STATUS_LAYOUT: [(&str, BitRange); 18] = [
    ("dry_contact", DRY_CONTACT),
    ("cut_off_device", CUT_OFF_DEVICE),
    ("terminal_shield", TERMINAL_SHIELD),
    ("surge", SURGE),
    ("reference_power_exceeded", REFERENCE_POWER_EXCEEDED),
    ("consumption", CONSUMPTION),
    ("energy_direction", ENERGY_DIRECTION),
    ("contract_type_price", CONTRACT_TYPE_PRICE),
    ("contract_type_price_distributor", CONTRACT_TYPE_PRICE_DISTRIBUTOR),
    ("clock", CLOCK),
    ("tic", TIC),
    ("euridis_link", EURIDIS_LINK),
    ("cpl", CPL),
    ("cpl_sync", CPL_SYNC),
    ("tempo_color", TEMPO_COLOR),
    ("tempo_next_day_color", TEMPO_NEXT_DAY_COLOR),
    ("moving_peak_notice", MOVING_PEAK_NOTICE),
    ("moving_peak", MOVING_PEAK),
];

/// Bits that carry no sub-field.
pub const STATUS_RESERVED_BITS: [u32; 3] = [3, 5, 18];

/// Decoded status word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusRegister {
    /// Contact sec
    pub dry_contact: u8,
    /// Organe de coupure
    pub cut_off_device: u8,
    /// Etat du cache-bornes distributeur
    pub terminal_shield: u8,
    /// Surtension sur une des phases
    pub surge: u8,
    /// Dépassement de la puissance de référence
    pub reference_power_exceeded: u8,
    /// Fonctionnement producteur/consommateur
    pub consumption: u8,
    /// Sens de l'énergie active
    pub energy_direction: u8,
    /// Tarif en cours sur le contrat fourniture
    pub contract_type_price: u8,
    /// Tarif en cours sur le contrat distributeur
    pub contract_type_price_distributor: u8,
    /// Mode dégradé de l'horloge
    pub clock: u8,
    /// Etat de la sortie télé-information
    pub tic: u8,
    /// Etat de la sortie communication Euridis
    pub euridis_link: u8,
    /// Statut du CPL
    pub cpl: u8,
    /// Synchronisation CPL
    pub cpl_sync: u8,
    /// Couleur du jour pour le contrat historique tempo
    pub tempo_color: u8,
    /// Couleur du lendemain pour le contrat historique tempo
    pub tempo_next_day_color: u8,
    /// Préavis pointes mobiles
    pub moving_peak_notice: u8,
    /// Pointe mobile
    pub moving_peak: u8,
}

impl StatusRegister {
    pub fn from_raw(value: u32) -> Self {
        StatusRegister {
            dry_contact: DRY_CONTACT.extract(value),
            cut_off_device: CUT_OFF_DEVICE.extract(value),
            terminal_shield: TERMINAL_SHIELD.extract(value),
            surge: SURGE.extract(value),
            reference_power_exceeded: REFERENCE_POWER_EXCEEDED.extract(value),
            consumption: CONSUMPTION.extract(value),
            energy_direction: ENERGY_DIRECTION.extract(value),
            contract_type_price: CONTRACT_TYPE_PRICE.extract(value),
            contract_type_price_distributor: CONTRACT_TYPE_PRICE_DISTRIBUTOR.extract(value),
            clock: CLOCK.extract(value),
            tic: TIC.extract(value),
            euridis_link: EURIDIS_LINK.extract(value),
            cpl: CPL.extract(value),
            cpl_sync: CPL_SYNC.extract(value),
            tempo_color: TEMPO_COLOR.extract(value),
            tempo_next_day_color: TEMPO_NEXT_DAY_COLOR.extract(value),
            moving_peak_notice: MOVING_PEAK_NOTICE.extract(value),
            moving_peak: MOVING_PEAK.extract(value),
        }
    }

    /// Recombines the sub-fields. Reserved bits come back as zero.
    pub fn to_raw(&self) -> u32 {
        self.fields()
            .iter()
            .zip(STATUS_LAYOUT.iter())
            .fold(0, |acc, ((_, field), (_, range))| acc | range.insert(*field))
    }

    /// Sub-field values paired with their names, in [`STATUS_LAYOUT`] order.
    pub fn fields(&self) -> [(&'static str, u8); 18] {
        [
            ("dry_contact", self.dry_contact),
            ("cut_off_device", self.cut_off_device),
            ("terminal_shield", self.terminal_shield),
            ("surge", self.surge),
            ("reference_power_exceeded", self.reference_power_exceeded),
            ("consumption", self.consumption),
            ("energy_direction", self.energy_direction),
            ("contract_type_price", self.contract_type_price),
            ("contract_type_price_distributor", self.contract_type_price_distributor),
            ("clock", self.clock),
            ("tic", self.tic),
            ("euridis_link", self.euridis_link),
            ("cpl", self.cpl),
            ("cpl_sync", self.cpl_sync),
            ("tempo_color", self.tempo_color),
            ("tempo_next_day_color", self.tempo_next_day_color),
            ("moving_peak_notice", self.moving_peak_notice),
            ("moving_peak", self.moving_peak),
        ]
    }
}
