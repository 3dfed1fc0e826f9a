//! Horoscope spread model: zodiac reference data, editorial options, and the
//! per-sign results board filled in during a generation run.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Raw value of an entry whose request has not settled yet.
pub const PENDING: &str = "pending";

/// Entries whose text starts with this prefix are failure markers.
pub const ERROR_PREFIX: &str = "Error";

/// Text stored for a sign whose request failed.
pub const FALLBACK_TEXT: &str = "Error generating horoscope";

/// Target length used when the caller does not choose one.
pub const DEFAULT_WORD_COUNT: u32 = 100;

// ---------------------------------------------------------------------------
// Zodiac signs
// ---------------------------------------------------------------------------

/// The twelve zodiac signs, in calendar order starting at Aries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    /// Every sign, in the order spreads are laid out.
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// Position of the sign within [`ZodiacSign::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "♈",
            ZodiacSign::Taurus => "♉",
            ZodiacSign::Gemini => "♊",
            ZodiacSign::Cancer => "♋",
            ZodiacSign::Leo => "♌",
            ZodiacSign::Virgo => "♍",
            ZodiacSign::Libra => "♎",
            ZodiacSign::Scorpio => "♏",
            ZodiacSign::Sagittarius => "♐",
            ZodiacSign::Capricorn => "♑",
            ZodiacSign::Aquarius => "♒",
            ZodiacSign::Pisces => "♓",
        }
    }

    pub fn date_range(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Mar 21 - Apr 19",
            ZodiacSign::Taurus => "Apr 20 - May 20",
            ZodiacSign::Gemini => "May 21 - Jun 20",
            ZodiacSign::Cancer => "Jun 21 - Jul 22",
            ZodiacSign::Leo => "Jul 23 - Aug 22",
            ZodiacSign::Virgo => "Aug 23 - Sep 22",
            ZodiacSign::Libra => "Sep 23 - Oct 22",
            ZodiacSign::Scorpio => "Oct 23 - Nov 21",
            ZodiacSign::Sagittarius => "Nov 22 - Dec 21",
            ZodiacSign::Capricorn => "Dec 22 - Jan 19",
            ZodiacSign::Aquarius => "Jan 20 - Feb 18",
            ZodiacSign::Pisces => "Feb 19 - Mar 20",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ZodiacSign {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ZodiacSign::ALL
            .into_iter()
            .find(|sign| sign.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::Validation(format!("Unknown zodiac sign: '{wanted}'")))
    }
}

// ---------------------------------------------------------------------------
// Editorial options
// ---------------------------------------------------------------------------

/// Which period (or theme) the forecasts cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoroscopeType {
    #[serde(rename = "Daily")]
    Daily,
    #[serde(rename = "Weekly")]
    Weekly,
    #[serde(rename = "Monthly")]
    Monthly,
    #[serde(rename = "Love & Romance")]
    LoveRomance,
    #[serde(rename = "Career & Finance")]
    CareerFinance,
}

impl HoroscopeType {
    pub const ALL: [HoroscopeType; 5] = [
        HoroscopeType::Daily,
        HoroscopeType::Weekly,
        HoroscopeType::Monthly,
        HoroscopeType::LoveRomance,
        HoroscopeType::CareerFinance,
    ];

    /// Label sent to the backend and written into exports.
    pub fn label(self) -> &'static str {
        match self {
            HoroscopeType::Daily => "Daily",
            HoroscopeType::Weekly => "Weekly",
            HoroscopeType::Monthly => "Monthly",
            HoroscopeType::LoveRomance => "Love & Romance",
            HoroscopeType::CareerFinance => "Career & Finance",
        }
    }

    /// Command-line friendly form, e.g. `love-romance`.
    pub fn slug(self) -> &'static str {
        match self {
            HoroscopeType::Daily => "daily",
            HoroscopeType::Weekly => "weekly",
            HoroscopeType::Monthly => "monthly",
            HoroscopeType::LoveRomance => "love-romance",
            HoroscopeType::CareerFinance => "career-finance",
        }
    }
}

/// Writing voice requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    #[serde(rename = "Mystical & Poetic")]
    Mystical,
    #[serde(rename = "Practical & Grounded")]
    Practical,
    #[serde(rename = "Warm & Encouraging")]
    Warm,
    #[serde(rename = "Witty & Playful")]
    Witty,
}

impl Tone {
    pub const ALL: [Tone; 4] = [Tone::Mystical, Tone::Practical, Tone::Warm, Tone::Witty];

    pub fn label(self) -> &'static str {
        match self {
            Tone::Mystical => "Mystical & Poetic",
            Tone::Practical => "Practical & Grounded",
            Tone::Warm => "Warm & Encouraging",
            Tone::Witty => "Witty & Playful",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Tone::Mystical => "mystical",
            Tone::Practical => "practical",
            Tone::Warm => "warm",
            Tone::Witty => "witty",
        }
    }
}

/// Shared `FromStr` for the option enums: accepts the label or the slug,
/// ignoring ASCII case.
macro_rules! parse_option {
    ($ty:ty, $what:literal) => {
        impl FromStr for $ty {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                <$ty>::ALL
                    .into_iter()
                    .find(|v| {
                        v.label().eq_ignore_ascii_case(wanted) || v.slug().eq_ignore_ascii_case(wanted)
                    })
                    .ok_or_else(|| {
                        let valid: Vec<&str> = <$ty>::ALL.iter().map(|v| v.slug()).collect();
                        CoreError::Validation(format!(
                            "Unknown {}: '{wanted}'. Valid values: {}",
                            $what,
                            valid.join(", ")
                        ))
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

parse_option!(HoroscopeType, "horoscope type");
parse_option!(Tone, "tone");

// ---------------------------------------------------------------------------
// Request parameters
// ---------------------------------------------------------------------------

/// Options shared by every sign in one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoroscopeParams {
    pub magazine: String,
    pub horoscope_type: HoroscopeType,
    pub tone: Tone,
    pub word_count: u32,
}

/// Body of `POST /api/horoscope/generate` for a single sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoroscopeRequest {
    pub magazine: String,
    pub zodiac_sign: ZodiacSign,
    pub horoscope_type: HoroscopeType,
    pub tone: Tone,
    pub word_count: u32,
}

impl HoroscopeParams {
    pub fn new(magazine: impl Into<String>, horoscope_type: HoroscopeType, tone: Tone) -> Self {
        Self {
            magazine: magazine.into(),
            horoscope_type,
            tone,
            word_count: DEFAULT_WORD_COUNT,
        }
    }

    pub fn with_word_count(mut self, word_count: u32) -> Self {
        self.word_count = word_count;
        self
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.magazine.trim().is_empty() {
            return Err(CoreError::Validation(
                "Magazine name must not be empty".to_string(),
            ));
        }
        if self.word_count == 0 {
            return Err(CoreError::Validation(
                "Word count must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// The request body for one sign.
    pub fn request_for(&self, sign: ZodiacSign) -> HoroscopeRequest {
        HoroscopeRequest {
            magazine: self.magazine.clone(),
            zodiac_sign: sign,
            horoscope_type: self.horoscope_type,
            tone: self.tone,
            word_count: self.word_count,
        }
    }
}

// ---------------------------------------------------------------------------
// Results board
// ---------------------------------------------------------------------------

/// What is currently stored for one sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValue {
    /// The request has not settled.
    Pending,
    /// Generated forecast text.
    Forecast(String),
    /// Failure marker; the text starts with [`ERROR_PREFIX`].
    Failed(String),
}

impl EntryValue {
    /// Classify a raw stored string.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if raw == PENDING {
            EntryValue::Pending
        } else if raw.starts_with(ERROR_PREFIX) {
            EntryValue::Failed(raw)
        } else {
            EntryValue::Forecast(raw)
        }
    }

    /// The fallback stored when a sign's request fails.
    pub fn fallback() -> Self {
        EntryValue::Failed(FALLBACK_TEXT.to_string())
    }

    pub fn as_raw(&self) -> &str {
        match self {
            EntryValue::Pending => PENDING,
            EntryValue::Forecast(text) | EntryValue::Failed(text) => text,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, EntryValue::Pending)
    }

    /// Whether this entry may appear in an export.
    ///
    /// True iff the stored value is non-empty, is not the pending sentinel,
    /// and does not begin with [`ERROR_PREFIX`].
    pub fn is_exportable(&self) -> bool {
        let raw = self.as_raw();
        !raw.is_empty() && raw != PENDING && !raw.starts_with(ERROR_PREFIX)
    }
}

/// A state change applied to a [`HoroscopeBoard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// A new run started: every sign goes back to pending.
    RunStarted,
    /// A sign's request settled.
    Settled { sign: ZodiacSign, value: EntryValue },
}

/// Results for all twelve signs, keyed by [`ZodiacSign`].
///
/// Only [`apply`](Self::apply) mutates the board, which enforces that each
/// sign settles at most once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoroscopeBoard {
    entries: [EntryValue; 12],
}

impl Default for HoroscopeBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl HoroscopeBoard {
    /// A board with every sign pending.
    pub fn new() -> Self {
        Self {
            entries: std::array::from_fn(|_| EntryValue::Pending),
        }
    }

    pub fn apply(&mut self, event: BoardEvent) -> Result<(), CoreError> {
        match event {
            BoardEvent::RunStarted => {
                self.entries = std::array::from_fn(|_| EntryValue::Pending);
                Ok(())
            }
            BoardEvent::Settled { sign, value } => {
                if value.is_pending() {
                    return Err(CoreError::Validation(format!(
                        "{sign} cannot settle to pending"
                    )));
                }
                let slot = &mut self.entries[sign.index()];
                if !slot.is_pending() {
                    return Err(CoreError::Conflict(format!(
                        "{sign} has already settled in this run"
                    )));
                }
                *slot = value;
                Ok(())
            }
        }
    }

    pub fn get(&self, sign: ZodiacSign) -> &EntryValue {
        &self.entries[sign.index()]
    }

    /// All signs and their values, Aries first.
    pub fn iter(&self) -> impl Iterator<Item = (ZodiacSign, &EntryValue)> {
        ZodiacSign::ALL.into_iter().zip(self.entries.iter())
    }

    /// Signs eligible for export with their forecast text, Aries first.
    pub fn exportable(&self) -> impl Iterator<Item = (ZodiacSign, &str)> {
        self.iter()
            .filter(|(_, value)| value.is_exportable())
            .map(|(sign, value)| (sign, value.as_raw()))
    }

    pub fn pending_count(&self) -> usize {
        self.entries.iter().filter(|v| v.is_pending()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|v| matches!(v, EntryValue::Failed(_)))
            .count()
    }
}

/// One generation run: the shared options plus the per-sign board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoroscopeRun {
    pub params: HoroscopeParams,
    pub board: HoroscopeBoard,
}

impl HoroscopeRun {
    pub fn new(params: HoroscopeParams) -> Self {
        Self {
            params,
            board: HoroscopeBoard::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn signs_are_in_calendar_order() {
        let names: Vec<&str> = ZodiacSign::ALL.iter().map(|s| s.name()).collect();
        assert_eq!(names.first(), Some(&"Aries"));
        assert_eq!(names.last(), Some(&"Pisces"));
        for (idx, sign) in ZodiacSign::ALL.iter().enumerate() {
            assert_eq!(sign.index(), idx);
        }
    }

    #[test]
    fn sign_parses_case_insensitively() {
        assert_eq!("scorpio".parse::<ZodiacSign>().unwrap(), ZodiacSign::Scorpio);
        assert_eq!(" Leo ".parse::<ZodiacSign>().unwrap(), ZodiacSign::Leo);
        assert_matches!("Ophiuchus".parse::<ZodiacSign>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn options_parse_from_label_or_slug() {
        assert_eq!(
            "Love & Romance".parse::<HoroscopeType>().unwrap(),
            HoroscopeType::LoveRomance
        );
        assert_eq!(
            "career-finance".parse::<HoroscopeType>().unwrap(),
            HoroscopeType::CareerFinance
        );
        assert_eq!("WITTY".parse::<Tone>().unwrap(), Tone::Witty);
        assert_matches!("grim".parse::<Tone>(), Err(CoreError::Validation(msg)) if msg.contains("mystical"));
    }

    #[test]
    fn request_body_uses_labels() {
        let params = HoroscopeParams::new("Star Weekly", HoroscopeType::LoveRomance, Tone::Warm);
        let body = serde_json::to_value(params.request_for(ZodiacSign::Virgo)).unwrap();
        assert_eq!(body["magazine"], "Star Weekly");
        assert_eq!(body["zodiac_sign"], "Virgo");
        assert_eq!(body["horoscope_type"], "Love & Romance");
        assert_eq!(body["tone"], "Warm & Encouraging");
        assert_eq!(body["word_count"], DEFAULT_WORD_COUNT);
    }

    #[test]
    fn params_validation() {
        let params = HoroscopeParams::new(" ", HoroscopeType::Daily, Tone::Mystical);
        assert!(params.validate().is_err());
        let params = HoroscopeParams::new("Vogue", HoroscopeType::Daily, Tone::Mystical);
        assert!(params.validate().is_ok());
        assert!(params.with_word_count(0).validate().is_err());
    }

    #[test]
    fn raw_values_classify() {
        assert_eq!(EntryValue::from_raw("pending"), EntryValue::Pending);
        assert_matches!(EntryValue::from_raw("Error generating horoscope."), EntryValue::Failed(_));
        assert_matches!(EntryValue::from_raw("Stars align."), EntryValue::Forecast(_));
    }

    #[test]
    fn exportability_rule() {
        assert!(!EntryValue::Pending.is_exportable());
        assert!(!EntryValue::fallback().is_exportable());
        assert!(!EntryValue::Forecast(String::new()).is_exportable());
        assert!(!EntryValue::Forecast("Error: upstream".to_string()).is_exportable());
        assert!(EntryValue::Forecast("An error-free week.".to_string()).is_exportable());
    }

    #[test]
    fn board_settles_each_sign_once() {
        let mut board = HoroscopeBoard::new();
        assert_eq!(board.pending_count(), 12);

        board
            .apply(BoardEvent::Settled {
                sign: ZodiacSign::Leo,
                value: EntryValue::Forecast("Roar.".to_string()),
            })
            .unwrap();
        assert_eq!(board.pending_count(), 11);

        let again = board.apply(BoardEvent::Settled {
            sign: ZodiacSign::Leo,
            value: EntryValue::fallback(),
        });
        assert_matches!(again, Err(CoreError::Conflict(_)));
        assert_eq!(board.get(ZodiacSign::Leo).as_raw(), "Roar.");
    }

    #[test]
    fn board_rejects_settling_to_pending() {
        let mut board = HoroscopeBoard::new();
        let result = board.apply(BoardEvent::Settled {
            sign: ZodiacSign::Aries,
            value: EntryValue::Pending,
        });
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn run_started_resets_board() {
        let mut board = HoroscopeBoard::new();
        for sign in ZodiacSign::ALL {
            board
                .apply(BoardEvent::Settled {
                    sign,
                    value: EntryValue::fallback(),
                })
                .unwrap();
        }
        assert_eq!(board.failed_count(), 12);

        board.apply(BoardEvent::RunStarted).unwrap();
        assert_eq!(board.pending_count(), 12);
        assert_eq!(board.failed_count(), 0);
    }

    #[test]
    fn exportable_follows_sign_order() {
        let mut board = HoroscopeBoard::new();
        for sign in [ZodiacSign::Pisces, ZodiacSign::Aries, ZodiacSign::Gemini] {
            board
                .apply(BoardEvent::Settled {
                    sign,
                    value: EntryValue::Forecast(format!("{sign} text")),
                })
                .unwrap();
        }
        let order: Vec<ZodiacSign> = board.exportable().map(|(sign, _)| sign).collect();
        assert_eq!(
            order,
            vec![ZodiacSign::Aries, ZodiacSign::Gemini, ZodiacSign::Pisces]
        );
    }
}
