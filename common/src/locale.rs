use std::str::FromStr;

use strum_macros::{Display, EnumIter, EnumString};

use crate::errors::LocaleError;

const PERIOD: char = '.';
const COMMA: char = ',';

/// Separator pair used to read a localized number.
///
/// Only `.` and `,` are accepted since those are the only separators the
/// price token extraction looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleDescriptor {
    decimal_separator: char,
    grouping_separator: char,
}

impl Default for LocaleDescriptor {
    fn default() -> Self {
        Self::PERIOD_DECIMAL
    }
}

impl LocaleDescriptor {
    /// "1,234.56", en_US style
    pub const PERIOD_DECIMAL: Self = Self {
        decimal_separator: PERIOD,
        grouping_separator: COMMA,
    };

    /// "1.234,56", pt_BR style
    pub const COMMA_DECIMAL: Self = Self {
        decimal_separator: COMMA,
        grouping_separator: PERIOD,
    };

    pub fn new(decimal_separator: char, grouping_separator: char) -> Result<Self, LocaleError> {
        for separator in [decimal_separator, grouping_separator] {
            if separator != PERIOD && separator != COMMA {
                return Err(LocaleError::UnsupportedSeparator(separator));
            }
        }

        if decimal_separator == grouping_separator {
            return Err(LocaleError::SameSeparators(decimal_separator));
        }

        Ok(Self {
            decimal_separator,
            grouping_separator,
        })
    }

    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    pub fn grouping_separator(&self) -> char {
        self.grouping_separator
    }
}

impl From<NamedLocale> for LocaleDescriptor {
    fn from(locale: NamedLocale) -> Self {
        locale.descriptor()
    }
}

impl FromStr for LocaleDescriptor {
    type Err = LocaleError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Ok(NamedLocale::parse(name)?.descriptor())
    }
}

/// Locales whose number formatting only uses `.` and `,`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum NamedLocale {
    #[strum(serialize = "en_US")]
    EnUs,
    #[strum(serialize = "en_GB")]
    EnGb,
    #[strum(serialize = "en_CA")]
    EnCa,
    #[strum(serialize = "en_AU")]
    EnAu,
    #[strum(serialize = "en_IN")]
    EnIn,
    #[strum(serialize = "ja_JP")]
    JaJp,
    #[strum(serialize = "zh_CN")]
    ZhCn,
    #[strum(serialize = "ko_KR")]
    KoKr,
    #[strum(serialize = "es_MX")]
    EsMx,
    #[strum(serialize = "he_IL")]
    HeIl,
    #[strum(serialize = "th_TH")]
    ThTh,
    #[strum(serialize = "pt_BR")]
    PtBr,
    #[strum(serialize = "de_DE")]
    DeDe,
    #[strum(serialize = "es_ES")]
    EsEs,
    #[strum(serialize = "it_IT")]
    ItIt,
    #[strum(serialize = "nl_NL")]
    NlNl,
    #[strum(serialize = "id_ID")]
    IdId,
    #[strum(serialize = "tr_TR")]
    TrTr,
    #[strum(serialize = "da_DK")]
    DaDk,
    #[strum(serialize = "el_GR")]
    ElGr,
    #[strum(serialize = "es_AR")]
    EsAr,
}

impl NamedLocale {
    /// Accepts POSIX style names such as `en_US`, `en_US.UTF-8`, `de_DE@euro`
    /// and the BCP 47 spelling `pt-BR`.
    pub fn parse(name: &str) -> Result<Self, LocaleError> {
        let trimmed = name.trim();
        let base = trimmed
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .replace('-', "_");

        let Ok(locale) = Self::from_str(&base) else {
            return Err(LocaleError::UnknownLocale(trimmed.into()));
        };

        Ok(locale)
    }

    pub fn descriptor(&self) -> LocaleDescriptor {
        match self {
            NamedLocale::EnUs
            | NamedLocale::EnGb
            | NamedLocale::EnCa
            | NamedLocale::EnAu
            | NamedLocale::EnIn
            | NamedLocale::JaJp
            | NamedLocale::ZhCn
            | NamedLocale::KoKr
            | NamedLocale::EsMx
            | NamedLocale::HeIl
            | NamedLocale::ThTh => LocaleDescriptor::PERIOD_DECIMAL,
            NamedLocale::PtBr
            | NamedLocale::DeDe
            | NamedLocale::EsEs
            | NamedLocale::ItIt
            | NamedLocale::NlNl
            | NamedLocale::IdId
            | NamedLocale::TrTr
            | NamedLocale::DaDk
            | NamedLocale::ElGr
            | NamedLocale::EsAr => LocaleDescriptor::COMMA_DECIMAL,
        }
    }
}
