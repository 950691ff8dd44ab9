use crate::CalendarTime;
use core::fmt;

/// Year stored as offset zero in the `year` field.
pub const BASE_YEAR: u16 = 2000;

/// A 64-bit unique ID stamped with its caller tag, agent label, local
/// calendar hour and agent sequence.
///
/// - 8 bits user tag
/// - 8 bits label
/// - 7 bits year (offset from [`BASE_YEAR`])
/// - 4 bits month
/// - 5 bits day
/// - 5 bits hour
/// - 27 bits sequence
///
/// ```text
///  Bit Index:  63    56 55     48 47    41 40     37 36   32 31    27 26          0
///              +-------+---------+--------+---------+-------+--------+-------------+
///  Field:      | user  |  label  |  year  |  month  |  day  |  hour  |  sequence   |
///              |  (8)  |   (8)   |  (7)   |   (4)   |  (5)  |  (5)   |    (27)     |
///              +-------+---------+--------+---------+-------+--------+-------------+
///              |<--------------- MSB ---------- 64 bits ---------- LSB ----------->|
/// ```
///
/// Every field is masked to its width when packed; nothing is range checked
/// against calendar rules.
///
/// # Example
///
/// ```
/// use uniqid::UniqueId;
///
/// let id = UniqueId::from_fields(7, 42, 2024, 3, 15, 9, 123_456);
/// assert_eq!(id.user(), 7);
/// assert_eq!(id.label(), 42);
/// assert_eq!(id.year(), 2024);
/// assert_eq!(id.sequence(), 123_456);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UniqueId {
    id: u64,
}

impl UniqueId {
    pub const USER_BITS: u64 = 8;
    pub const LABEL_BITS: u64 = 8;
    pub const YEAR_BITS: u64 = 7;
    pub const MONTH_BITS: u64 = 4;
    pub const DAY_BITS: u64 = 5;
    pub const HOUR_BITS: u64 = 5;
    pub const SEQUENCE_BITS: u64 = 27;

    pub const SEQUENCE_SHIFT: u64 = 0;
    pub const HOUR_SHIFT: u64 = Self::SEQUENCE_SHIFT + Self::SEQUENCE_BITS;
    pub const DAY_SHIFT: u64 = Self::HOUR_SHIFT + Self::HOUR_BITS;
    pub const MONTH_SHIFT: u64 = Self::DAY_SHIFT + Self::DAY_BITS;
    pub const YEAR_SHIFT: u64 = Self::MONTH_SHIFT + Self::MONTH_BITS;
    pub const LABEL_SHIFT: u64 = Self::YEAR_SHIFT + Self::YEAR_BITS;
    pub const USER_SHIFT: u64 = Self::LABEL_SHIFT + Self::LABEL_BITS;

    pub const USER_MASK: u64 = (1 << Self::USER_BITS) - 1;
    pub const LABEL_MASK: u64 = (1 << Self::LABEL_BITS) - 1;
    pub const YEAR_MASK: u64 = (1 << Self::YEAR_BITS) - 1;
    pub const MONTH_MASK: u64 = (1 << Self::MONTH_BITS) - 1;
    pub const DAY_MASK: u64 = (1 << Self::DAY_BITS) - 1;
    pub const HOUR_MASK: u64 = (1 << Self::HOUR_BITS) - 1;
    pub const SEQUENCE_MASK: u64 = (1 << Self::SEQUENCE_BITS) - 1;

    /// Packs explicit fields. `year` is the full year; it is stored as an
    /// offset from [`BASE_YEAR`] (years before the base wrap within the
    /// field).
    pub const fn from_fields(
        user: u8,
        label: u8,
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        sequence: u32,
    ) -> Self {
        let year = year.wrapping_sub(BASE_YEAR) as u64;
        let id = ((user as u64 & Self::USER_MASK) << Self::USER_SHIFT)
            | ((label as u64 & Self::LABEL_MASK) << Self::LABEL_SHIFT)
            | ((year & Self::YEAR_MASK) << Self::YEAR_SHIFT)
            | ((month as u64 & Self::MONTH_MASK) << Self::MONTH_SHIFT)
            | ((day as u64 & Self::DAY_MASK) << Self::DAY_SHIFT)
            | ((hour as u64 & Self::HOUR_MASK) << Self::HOUR_SHIFT)
            | ((sequence as u64 & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT);
        Self { id }
    }

    /// Packs a resolved calendar time.
    pub const fn from_calendar(user: u8, label: u8, at: CalendarTime, sequence: u32) -> Self {
        Self::from_fields(user, label, at.year, at.month, at.day, at.hour, sequence)
    }

    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }

    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    pub const fn user(&self) -> u8 {
        ((self.id >> Self::USER_SHIFT) & Self::USER_MASK) as u8
    }

    pub const fn label(&self) -> u8 {
        ((self.id >> Self::LABEL_SHIFT) & Self::LABEL_MASK) as u8
    }

    /// Full year, i.e. [`BASE_YEAR`] plus the stored offset.
    pub const fn year(&self) -> u16 {
        BASE_YEAR + ((self.id >> Self::YEAR_SHIFT) & Self::YEAR_MASK) as u16
    }

    pub const fn month(&self) -> u8 {
        ((self.id >> Self::MONTH_SHIFT) & Self::MONTH_MASK) as u8
    }

    pub const fn day(&self) -> u8 {
        ((self.id >> Self::DAY_SHIFT) & Self::DAY_MASK) as u8
    }

    pub const fn hour(&self) -> u8 {
        ((self.id >> Self::HOUR_SHIFT) & Self::HOUR_MASK) as u8
    }

    pub const fn sequence(&self) -> u32 {
        ((self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK) as u32
    }

    pub const fn calendar(&self) -> CalendarTime {
        CalendarTime {
            year: self.year(),
            month: self.month(),
            day: self.day(),
            hour: self.hour(),
        }
    }

    pub const fn max_sequence() -> u32 {
        Self::SEQUENCE_MASK as u32
    }

    /// Two-digit lowercase hex of the label.
    pub fn label_hex(&self) -> String {
        label_to_hex(self.label(), false)
    }

    /// Returns the ID as a zero-padded 20-digit string.
    pub fn to_padded_string(&self) -> String {
        format!("{:020}", self.id)
    }
}

const _: () = {
    // Compile-time check: the fields must tile the u64 exactly.
    assert!(
        UniqueId::USER_BITS
            + UniqueId::LABEL_BITS
            + UniqueId::YEAR_BITS
            + UniqueId::MONTH_BITS
            + UniqueId::DAY_BITS
            + UniqueId::HOUR_BITS
            + UniqueId::SEQUENCE_BITS
            == u64::BITS as u64,
        "UniqueId layout must span exactly 64 bits"
    );
    assert!(UniqueId::USER_SHIFT + UniqueId::USER_BITS == 64);
};

impl From<UniqueId> for u64 {
    fn from(id: UniqueId) -> Self {
        id.to_raw()
    }
}

impl From<u64> for UniqueId {
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl fmt::Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniqueId")
            .field("id", &format_args!("{} (0x{:016x})", self.id, self.id))
            .field("user", &self.user())
            .field("label", &format_args!("{} (0x{})", self.label(), self.label_hex()))
            .field("year", &self.year())
            .field("month", &self.month())
            .field("day", &self.day())
            .field("hour", &self.hour())
            .field("sequence", &self.sequence())
            .finish()
    }
}

/// Renders a label as two hex digits.
///
/// ```
/// assert_eq!(uniqid::label_to_hex(0x0a, false), "0a");
/// assert_eq!(uniqid::label_to_hex(0xbe, true), "BE");
/// ```
pub fn label_to_hex(label: u8, uppercase: bool) -> String {
    if uppercase {
        format!("{label:02X}")
    } else {
        format!("{label:02x}")
    }
}
