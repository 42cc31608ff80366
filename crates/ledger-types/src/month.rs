use strum::{Display, EnumString};

/// Calendar month of the fiscal year being depreciated.
///
/// The remote service only accepts months in `1..=12`, so holding a `Month`
/// is proof the value is in range.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Display,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Month {
    #[strum(to_string = "Ene")]
    Jan = 1,
    #[strum(to_string = "Feb")]
    Feb = 2,
    #[strum(to_string = "Mar")]
    Mar = 3,
    #[strum(to_string = "Abr")]
    Apr = 4,
    #[strum(to_string = "May")]
    May = 5,
    #[strum(to_string = "Jun")]
    Jun = 6,
    #[strum(to_string = "Jul")]
    Jul = 7,
    #[strum(to_string = "Ago")]
    Aug = 8,
    #[strum(to_string = "Set")]
    Sep = 9,
    #[strum(to_string = "Oct")]
    Oct = 10,
    #[strum(to_string = "Nov")]
    Nov = 11,
    #[strum(to_string = "Dic")]
    Dec = 12,
}

impl Month {
    pub const ALL: [Self; 12] = [
        Self::Jan,
        Self::Feb,
        Self::Mar,
        Self::Apr,
        Self::May,
        Self::Jun,
        Self::Jul,
        Self::Aug,
        Self::Sep,
        Self::Oct,
        Self::Nov,
        Self::Dec,
    ];

    /// 1-based month number, as used in the recompute endpoint path.
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// 0-based position inside a twelve-slot monthly array.
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    /// Short display label (`Ene`, `Feb`, ...).
    pub fn label(self) -> &'static str {
        match self {
            Self::Jan => "Ene",
            Self::Feb => "Feb",
            Self::Mar => "Mar",
            Self::Apr => "Abr",
            Self::May => "May",
            Self::Jun => "Jun",
            Self::Jul => "Jul",
            Self::Aug => "Ago",
            Self::Sep => "Set",
            Self::Oct => "Oct",
            Self::Nov => "Nov",
            Self::Dec => "Dic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Month must be between 1 and 12, got {0}")]
pub struct MonthOutOfRange(pub i64);

impl TryFrom<u8> for Month {
    type Error = MonthOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(value))
    }
}

impl TryFrom<i64> for Month {
    type Error = MonthOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| Self::ALL.get(idx).copied())
            .ok_or(MonthOutOfRange(value))
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.number()
    }
}
